//! In-memory backend shared by the model and view tests

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::{GroceryModel, WebTransport};
use crate::error::{GroceryError, Result};
use crate::hub::Hub;
use crate::models::{Grocery, GroceryPatch, GroceryStatus};

/// Backend double that records every call
#[derive(Default)]
pub struct FakeBackend {
    pub rows: RefCell<Vec<Grocery>>,
    pub next_id: RefCell<i64>,
    pub calls: RefCell<Vec<(String, String, Option<Value>)>>,
    pub fail: RefCell<bool>,
}

impl FakeBackend {
    pub fn starting_at(next_id: i64) -> Rc<Self> {
        let backend = Self::default();
        *backend.next_id.borrow_mut() = next_id;
        Rc::new(backend)
    }

    fn record(&self, method: &str, path: &str, body: Option<&Value>) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((method.to_string(), path.to_string(), body.cloned()));
        if *self.fail.borrow() {
            return Err(GroceryError::Transport("503 Service Unavailable".to_string()));
        }
        Ok(())
    }

    fn id_of(path: &str) -> i64 {
        path.rsplit('/').next().unwrap().parse().unwrap()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl WebTransport for FakeBackend {
    async fn get(&self, path: &str) -> Result<Value> {
        self.record("GET", path, None)?;
        Ok(serde_json::to_value(&*self.rows.borrow()).unwrap())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.record("POST", path, Some(body))?;
        let patch: GroceryPatch = serde_json::from_value(body.clone()).unwrap();
        let mut next_id = self.next_id.borrow_mut();
        let grocery = Grocery {
            id: *next_id,
            name: patch.name.unwrap(),
            cost: patch.cost.unwrap_or(0.0),
            status: patch.status.unwrap_or(GroceryStatus::Shelf),
        };
        *next_id += 1;
        self.rows.borrow_mut().push(grocery.clone());
        Ok(serde_json::to_value(grocery).unwrap())
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.record("PATCH", path, Some(body))?;
        let patch: GroceryPatch = serde_json::from_value(body.clone()).unwrap();
        let id = Self::id_of(path);
        let mut rows = self.rows.borrow_mut();
        let row = rows.iter_mut().find(|g| g.id == id).unwrap();
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(cost) = patch.cost {
            row.cost = cost;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        Ok(serde_json::to_value(&*row).unwrap())
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.record("DELETE", path, None)?;
        let id = Self::id_of(path);
        let mut rows = self.rows.borrow_mut();
        let pos = rows.iter().position(|g| g.id == id).unwrap();
        Ok(serde_json::to_value(rows.remove(pos)).unwrap())
    }
}

/// Model over a fresh backend whose first assigned id is `next_id`
pub fn setup(next_id: i64) -> (GroceryModel, Rc<FakeBackend>, Hub) {
    let backend = FakeBackend::starting_at(next_id);
    let hub = Hub::new("dataHub");
    let model = GroceryModel::new(backend.clone(), hub.clone());
    (model, backend, hub)
}
