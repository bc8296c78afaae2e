//! Grocery List Component
//!
//! Root list view. Loads the full list on mount and on every `create`
//! notification, rebinds single rows on `update`, drops rows on `delete`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::{GroceryEvent, GroceryModel};
use crate::components::GroceryItem;
use crate::context::{use_app_context, use_attachment, use_grocery_events, AppContext, Attachment};
use crate::models::{Grocery, GroceryPatch};
use crate::store::{
    find_by_id, store_begin_refresh, store_finish_refresh, store_remove_grocery, store_update_grocery,
    GroceryListState, GroceryListStateStoreFields, GroceryListStore, ListPhase,
};

/// Fetch everything and replace the rendered rows wholesale
fn refresh_list(ctx: AppContext, state: GroceryListStore, attachment: Attachment) {
    let generation = store_begin_refresh(&state);
    let model = ctx.model();
    spawn_local(async move {
        load_groceries(&model, state, &attachment, generation).await;
    });
}

/// Body of one refresh. Lands only if still attached and still the newest.
pub(crate) async fn load_groceries(
    model: &GroceryModel,
    state: GroceryListStore,
    attachment: &Attachment,
    generation: u64,
) {
    let result = model.list().await;
    if !attachment.is_attached() {
        tracing::debug!("grocery list detached before refresh completed");
        return;
    }
    let result = match result {
        Ok(groceries) => {
            tracing::debug!(count = groceries.len(), generation, "grocery list refreshed");
            Ok(groceries)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load groceries");
            Err(e.to_string())
        }
    };
    if !store_finish_refresh(&state, generation, result) {
        tracing::debug!(generation, "stale grocery refresh dropped");
    }
}

pub(crate) fn on_grocery_update(state: &GroceryListStore, grocery: &Grocery) {
    if !store_update_grocery(state, grocery.clone()) {
        tracing::debug!(id = grocery.id, "update for a grocery not in the list");
    }
}

pub(crate) fn on_grocery_delete(state: &GroceryListStore, grocery: &Grocery) {
    store_remove_grocery(state, grocery.id);
}

/// Hub bindings of the list view, released with the calling owner.
/// `on_create` runs once per `create` notification.
pub(crate) fn bind_list_events(state: GroceryListStore, on_create: impl Fn() + 'static) {
    use_grocery_events(GroceryEvent::Create, move |_: &Grocery| on_create());
    use_grocery_events(GroceryEvent::Update, move |grocery: &Grocery| on_grocery_update(&state, grocery));
    use_grocery_events(GroceryEvent::Delete, move |grocery: &Grocery| on_grocery_delete(&state, grocery));
}

#[component]
pub fn GroceryList() -> impl IntoView {
    let ctx = use_app_context();
    let state: GroceryListStore = Store::new(GroceryListState::default());
    let attachment = use_attachment();

    // Load on mount
    {
        let attachment = attachment.clone();
        Effect::new(move |_| refresh_list(ctx, state, attachment.clone()));
    }

    // Data events
    {
        let attachment = attachment.clone();
        bind_list_events(state, move || refresh_list(ctx, state, attachment.clone()));
    }

    // UI events, fire-and-forget
    let on_toggle = Callback::new(move |grocery: Grocery| {
        let model = ctx.model();
        let patch = GroceryPatch::status(grocery.status.toggled());
        spawn_local(async move {
            if let Err(e) = model.update(grocery.id, patch).await {
                tracing::error!(id = grocery.id, error = %e, "failed to toggle grocery");
            }
        });
    });

    let on_delete = Callback::new(move |grocery: Grocery| {
        let model = ctx.model();
        spawn_local(async move {
            if let Err(e) = model.delete(grocery.id).await {
                tracing::error!(id = grocery.id, error = %e, "failed to delete grocery");
            }
        });
    });

    let list_class = move || {
        if state.phase().get() == ListPhase::Loading {
            "grocery-list loading"
        } else {
            "grocery-list"
        }
    };

    view! {
        <div class=list_class>
            {move || match state.phase().get() {
                ListPhase::Failed(msg) => Some(view! { <p class="list-error">{msg}</p> }),
                _ => None,
            }}

            <For
                each=move || state.groceries().get()
                key=|grocery| grocery.id
                children=move |initial: Grocery| {
                    let id = initial.id;
                    // Latest record for this id; keeps the last one seen while the row is being removed
                    let grocery = Memo::new(move |prev: Option<&Grocery>| {
                        state
                            .groceries()
                            .with(|rows| find_by_id(rows, id).cloned())
                            .or_else(|| prev.cloned())
                            .unwrap_or_else(|| initial.clone())
                    });
                    view! {
                        <GroceryItem grocery=grocery on_toggle=on_toggle on_delete=on_delete />
                    }
                }
            />
        </div>
    }
}
