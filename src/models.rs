//! Frontend Models
//!
//! Data structures matching backend grocery records.

use serde::{Deserialize, Serialize};

/// Where a grocery currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroceryStatus {
    Shelf,
    Basket,
}

impl GroceryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryStatus::Shelf => "Shelf",
            GroceryStatus::Basket => "Basket",
        }
    }

    /// The other status. Shelf and Basket are the only two values.
    pub fn toggled(self) -> Self {
        match self {
            GroceryStatus::Shelf => GroceryStatus::Basket,
            GroceryStatus::Basket => GroceryStatus::Shelf,
        }
    }
}

/// Grocery data structure (matches backend)
///
/// Treated as an immutable value once received: changes arrive as a new
/// `Grocery` and are matched to the old one by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grocery {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    pub status: GroceryStatus,
}

impl Grocery {
    /// CSS state markers for the row bound to this record
    pub fn row_class(&self) -> String {
        format!("grocery-item Grocery-{} {}", self.id, self.status.as_str())
    }
}

/// Partial grocery used for create and update requests.
///
/// There is no `id` field: identity is always assigned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GroceryStatus>,
}

impl GroceryPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn status(status: GroceryStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_cost(mut self, cost: Option<f64>) -> Self {
        self.cost = cost;
        self
    }

    /// True if the patch carries a name that is non-empty after trimming
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Parse the cost field. Empty, negative or non-finite input yields None.
pub fn parse_cost(input: &str) -> Option<f64> {
    let cost: f64 = input.trim().parse().ok()?;
    (cost.is_finite() && cost >= 0.0).then_some(cost)
}
