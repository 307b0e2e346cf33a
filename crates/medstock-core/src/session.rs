//! Auth session state.
//!
//! The identity provider (interactive popup sign-in) is an external
//! collaborator behind the [`IdentityProvider`] trait. The session is an
//! explicit context handed to whoever needs `current_user`/`is_admin`, with
//! a watch channel as the "user changed" notification stream, rather than
//! ambient global state.

use crate::config::AppConfig;
use crate::error::{MedstockError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// External identity provider (OAuth-style popup sign-in).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive sign-in flow and return the signed-in user.
    async fn sign_in(&self) -> Result<UserInfo>;

    /// End the provider-side session.
    async fn sign_out(&self) -> Result<()>;
}

/// Per-session auth context.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    user_tx: watch::Sender<Option<UserInfo>>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (user_tx, _) = watch::channel(None);
        Self { provider, user_tx }
    }

    /// Current user, if signed in.
    pub fn current_user(&self) -> Option<UserInfo> {
        self.user_tx.borrow().clone()
    }

    /// True when the current user's email is on the admin allow-list.
    pub fn is_admin(&self) -> bool {
        self.user_tx
            .borrow()
            .as_ref()
            .map(|u| AppConfig::ADMIN_EMAILS.contains(&u.email.as_str()))
            .unwrap_or(false)
    }

    /// Subscribe to "current user changed" notifications.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserInfo>> {
        self.user_tx.subscribe()
    }

    /// Run the interactive sign-in flow and broadcast the new user.
    pub async fn sign_in(&self) -> Result<UserInfo> {
        match self.provider.sign_in().await {
            Ok(user) => {
                info!("Signed in as {}", user.email);
                let _ = self.user_tx.send(Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                error!("Sign-in failed: {}", e);
                Err(MedstockError::SignIn {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Sign out and broadcast the cleared user.
    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await?;
        let _ = self.user_tx.send(None);
        Ok(())
    }

    /// Error unless the current user is an admin.
    pub fn ensure_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(MedstockError::NotAdmin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProvider {
        email: &'static str,
    }

    #[async_trait]
    impl IdentityProvider for StubProvider {
        async fn sign_in(&self) -> Result<UserInfo> {
            Ok(UserInfo {
                email: self.email.to_string(),
                display_name: None,
            })
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_admin_requires_allow_listed_email() {
        let session = AuthSession::new(Arc::new(StubProvider {
            email: "visitor@example.com",
        }));
        assert!(!session.is_admin());
        session.sign_in().await.unwrap();
        assert!(!session.is_admin());
        assert!(session.ensure_admin().is_err());

        let admin = AuthSession::new(Arc::new(StubProvider {
            email: AppConfig::ADMIN_EMAILS[0],
        }));
        admin.sign_in().await.unwrap();
        assert!(admin.is_admin());
        assert!(admin.ensure_admin().is_ok());
    }

    #[tokio::test]
    async fn test_user_change_notifications() {
        let session = AuthSession::new(Arc::new(StubProvider {
            email: "visitor@example.com",
        }));
        let mut rx = session.subscribe();
        assert!(rx.borrow().is_none());

        session.sign_in().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|u| u.email.clone()),
            Some("visitor@example.com".to_string())
        );

        session.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
