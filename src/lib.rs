//! A relay between a quiz frontend and the Mailchimp Marketing API.
//!
//! `PUT /subscribe` validates the email, upserts the subscriber into the configured list
//! and normalizes whatever the provider answers into `{ success, message?, error? }`.

pub mod app;
pub mod config;
mod error;
pub mod list_client;
pub mod telemetry;
pub mod utils;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use list_client::ListClient;
pub use telemetry::{init_dbg_tracing, init_production_tracing};
