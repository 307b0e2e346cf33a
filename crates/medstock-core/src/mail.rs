//! Outbound mail.
//!
//! Contact-form submissions and quote requests both end up as one HTML email
//! to the fixed support address. Delivery goes through an external
//! transactional mail API behind the [`Mailer`] trait; the message bodies are
//! built and validated here so they can be tested without a network.

use crate::config::{AppConfig, NetworkConfig};
use crate::error::{MedstockError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A fully assembled email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// External mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Contact-form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    /// Name, email and message are required.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }

    /// Assemble the support email for this submission.
    pub fn to_email(&self) -> Result<OutboundEmail> {
        self.validate()?;
        let html = format!(
            "<h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Subject:</strong> {}</p>\
             <hr>\
             <h3>Message:</h3>\
             <p>{}</p>",
            html_escape(&self.name),
            html_escape(&self.email),
            html_escape(or_not_provided(&self.subject)),
            html_message(&self.message),
        );
        Ok(OutboundEmail {
            to: AppConfig::SUPPORT_EMAIL.to_string(),
            subject: format!(
                "Contact Form Submission from {}: {}",
                self.name, self.subject
            ),
            html,
        })
    }
}

/// Quote request for one product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub product_name: String,
}

impl QuoteRequest {
    /// Full name, email and message are required.
    pub fn validate(&self) -> Result<()> {
        require("full_name", &self.full_name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }

    /// Assemble the support email for this request.
    pub fn to_email(&self) -> Result<OutboundEmail> {
        self.validate()?;
        let html = format!(
            "<h2>New Quote Request</h2>\
             <p><strong>Product:</strong> {}</p>\
             <hr>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Company:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Country:</strong> {}</p>\
             <hr>\
             <h3>Message:</h3>\
             <p>{}</p>",
            html_escape(&self.product_name),
            html_escape(&self.full_name),
            html_escape(or_not_provided(&self.company)),
            html_escape(&self.email),
            html_escape(or_not_provided(&self.country)),
            html_message(&self.message),
        );
        Ok(OutboundEmail {
            to: AppConfig::SUPPORT_EMAIL.to_string(),
            subject: format!(
                "Quote Request from {} for {}",
                self.full_name, self.product_name
            ),
            html,
        })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(MedstockError::validation(field, "required"))
    } else {
        Ok(())
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not provided"
    } else {
        value
    }
}

/// User-supplied text goes into an HTML body; neutralize any markup in it.
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Free-text message: escaped, with newlines becoming `<br>`.
fn html_message(message: &str) -> String {
    html_escape(message).replace('\n', "<br>")
}

/// Transactional mail API client.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
}

impl HttpMailer {
    /// Create a mailer posting to the given delivery endpoint.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| MedstockError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(email)
            .send()
            .await
            .map_err(|e| MedstockError::Mail {
                message: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(MedstockError::Mail {
                message: format!("mail API returned {}", response.status()),
            });
        }
        info!("Sent mail to {}: {}", email.to, email.subject);
        Ok(())
    }
}
