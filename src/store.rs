//! Grocery List State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Grocery;

/// Where the list view is in its load cycle
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListPhase {
    #[default]
    Uninitialized,
    Loading,
    Rendered,
    Failed(String),
}

/// A notification that arrived while a refresh was in flight
#[derive(Clone, Debug, PartialEq)]
pub enum PendingChange {
    Update(Grocery),
    Delete(i64),
}

/// State owned by the grocery list view
#[derive(Clone, Debug, Default, Store)]
pub struct GroceryListState {
    /// Rows in backend order
    pub groceries: Vec<Grocery>,
    pub phase: ListPhase,
    /// Bumped by every refresh. Only the newest refresh may land.
    pub generation: u64,
    /// Replayed over the result of the in-flight refresh
    pub pending: Vec<PendingChange>,
}

/// Type alias for the store
pub type GroceryListStore = Store<GroceryListState>;

// ========================
// Store Helper Functions
// ========================

/// Replace every row with a freshly fetched list
pub fn store_set_groceries(store: &GroceryListStore, groceries: Vec<Grocery>) {
    *store.groceries().write() = groceries;
    *store.phase().write() = ListPhase::Rendered;
}

pub fn store_set_phase(store: &GroceryListStore, phase: ListPhase) {
    *store.phase().write() = phase;
}

/// Enter `Loading` and return the generation the new refresh owns
pub fn store_begin_refresh(store: &GroceryListStore) -> u64 {
    let generation = {
        let field = store.generation();
        let mut generation = field.write();
        *generation += 1;
        *generation
    };
    store_set_phase(store, ListPhase::Loading);
    generation
}

/// Land a refresh result unless a newer refresh has started since.
///
/// Returns false if the result was stale and dropped.
pub fn store_finish_refresh(
    store: &GroceryListStore,
    generation: u64,
    result: std::result::Result<Vec<Grocery>, String>,
) -> bool {
    if store.generation().get_untracked() != generation {
        return false;
    }
    let pending = std::mem::take(&mut *store.pending().write());
    match result {
        Ok(mut groceries) => {
            apply_pending(&mut groceries, &pending);
            store_set_groceries(store, groceries);
        }
        Err(msg) => store_set_phase(store, ListPhase::Failed(msg)),
    }
    true
}

fn store_is_loading(store: &GroceryListStore) -> bool {
    store.phase().with_untracked(|phase| *phase == ListPhase::Loading)
}

/// Rebind the row with the same id. Other rows are untouched.
pub fn store_update_grocery(store: &GroceryListStore, updated: Grocery) -> bool {
    if store_is_loading(store) {
        store.pending().write().push(PendingChange::Update(updated.clone()));
    }
    replace_by_id(&mut store.groceries().write(), updated)
}

pub fn store_remove_grocery(store: &GroceryListStore, id: i64) -> Option<Grocery> {
    if store_is_loading(store) {
        store.pending().write().push(PendingChange::Delete(id));
    }
    remove_by_id(&mut store.groceries().write(), id)
}

// ========================
// By-id helpers
// ========================

pub fn find_by_id(groceries: &[Grocery], id: i64) -> Option<&Grocery> {
    groceries.iter().find(|g| g.id == id)
}

/// Swap in `updated` where the ids match. Returns false if no row matched.
pub fn replace_by_id(groceries: &mut [Grocery], updated: Grocery) -> bool {
    match groceries.iter_mut().find(|g| g.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_by_id(groceries: &mut Vec<Grocery>, id: i64) -> Option<Grocery> {
    let pos = groceries.iter().position(|g| g.id == id)?;
    Some(groceries.remove(pos))
}

/// Replay notifications, in arrival order, over a fetched list
pub fn apply_pending(groceries: &mut Vec<Grocery>, pending: &[PendingChange]) {
    for change in pending {
        match change {
            PendingChange::Update(grocery) => {
                replace_by_id(groceries, grocery.clone());
            }
            PendingChange::Delete(id) => {
                remove_by_id(groceries, *id);
            }
        }
    }
}
