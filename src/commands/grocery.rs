//! Grocery Commands
//!
//! CRUD over the `groceries` resource. Every successful mutation publishes the
//! server's record on the hub; failures publish nothing.

use std::rc::Rc;

use super::WebTransport;
use crate::error::{GroceryError, Result};
use crate::hub::Hub;
use crate::models::{Grocery, GroceryPatch};

/// Hub topic for grocery notifications
pub const GROCERY_TOPIC: &str = "Grocery";

const RESOURCE: &str = "groceries";

/// Kind of change carried by a grocery notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroceryEvent {
    Create,
    Update,
    Delete,
}

impl GroceryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryEvent::Create => "create",
            GroceryEvent::Update => "update",
            GroceryEvent::Delete => "delete",
        }
    }
}

/// Grocery model: remote calls plus change notifications
#[derive(Clone)]
pub struct GroceryModel {
    transport: Rc<dyn WebTransport>,
    hub: Hub,
}

impl GroceryModel {
    pub fn new(transport: Rc<dyn WebTransport>, hub: Hub) -> Self {
        Self { transport, hub }
    }

    pub async fn list(&self) -> Result<Vec<Grocery>> {
        let data = self.transport.get(RESOURCE).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn create(&self, patch: GroceryPatch) -> Result<Grocery> {
        if !patch.has_name() {
            return Err(GroceryError::Validation("cannot create with empty name".to_string()));
        }

        let body = serde_json::to_value(&patch)?;
        let data = self.transport.post(RESOURCE, &body).await?;
        let grocery: Grocery = serde_json::from_value(data)?;
        tracing::info!(id = grocery.id, name = %grocery.name, "grocery created");

        self.notify(GroceryEvent::Create, &grocery);
        Ok(grocery)
    }

    // No validation on update: partial patches are sent as-is.
    pub async fn update(&self, id: i64, patch: GroceryPatch) -> Result<Grocery> {
        let body = serde_json::to_value(&patch)?;
        let data = self.transport.patch(&item_path(id), &body).await?;
        let grocery: Grocery = serde_json::from_value(data)?;
        tracing::info!(id, status = grocery.status.as_str(), "grocery updated");

        self.notify(GroceryEvent::Update, &grocery);
        Ok(grocery)
    }

    /// Returns the record as it was just before removal
    pub async fn delete(&self, id: i64) -> Result<Grocery> {
        let data = self.transport.delete(&item_path(id)).await?;
        let grocery: Grocery = serde_json::from_value(data)?;
        tracing::info!(id, "grocery deleted");

        self.notify(GroceryEvent::Delete, &grocery);
        Ok(grocery)
    }

    fn notify(&self, event: GroceryEvent, grocery: &Grocery) {
        let delivered = self.hub.publish(GROCERY_TOPIC, event.as_str(), grocery);
        tracing::debug!(event = event.as_str(), id = grocery.id, delivered, "grocery notification");
    }
}

fn item_path(id: i64) -> String {
    format!("{}/{}", RESOURCE, id)
}
