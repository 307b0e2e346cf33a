//! Library surface of the web crate, so integration tests can start the
//! server in-process against an injected store.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState};
