//! Backend Command Wrappers
//!
//! Frontend bindings to the grocery REST backend, organized by domain.

mod grocery;
mod web;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// Re-export all public items
pub use grocery::*;
pub use web::*;

/// Raw JSON transport to the backend.
///
/// Implementations return the already-unwrapped `data` payload. Futures are
/// `!Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait WebTransport {
    async fn get(&self, path: &str) -> Result<Value>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    async fn patch(&self, path: &str, body: &Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<Value>;
}
