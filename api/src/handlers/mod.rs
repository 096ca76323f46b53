//! HTTP handlers
//!
//! Axum request handlers for the webhook ingress.

pub mod webhooks;

pub use webhooks::judge_webhook;
