//! Grocery Input Component
//!
//! Name and cost fields for adding groceries.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::GroceryEvent;
use crate::context::{use_app_context, use_attachment, use_grocery_events};
use crate::models::{parse_cost, Grocery, GroceryPatch};

/// Keep the remembered record in step with later updates to the same id
pub(crate) fn follow_updates(last_added: RwSignal<Option<Grocery>>) {
    use_grocery_events(GroceryEvent::Update, move |grocery: &Grocery| {
        let same = last_added.with_untracked(|g| g.as_ref().map(|g| g.id) == Some(grocery.id));
        if same {
            last_added.set(Some(grocery.clone()));
        }
    });
}

/// Enter in the name field creates a grocery and clears the fields at once.
///
/// The new row shows up through the list's own `create` handling.
#[component]
pub fn GroceryInput() -> impl IntoView {
    let ctx = use_app_context();
    let attachment = use_attachment();

    let (name, set_name) = signal(String::new());
    let (cost, set_cost) = signal(String::new());
    let last_added = RwSignal::new(None::<Grocery>);
    let (error, set_error) = signal::<Option<String>>(None);

    follow_updates(last_added);

    let on_keyup = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        let patch = GroceryPatch::name(name.get_untracked())
            .with_cost(parse_cost(&cost.get_untracked()));
        let model = ctx.model();
        let attachment = attachment.clone();

        spawn_local(async move {
            let result = model.create(patch).await;
            if !attachment.is_attached() {
                return;
            }
            match result {
                Ok(grocery) => {
                    set_error.set(None);
                    last_added.set(Some(grocery));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "grocery not created");
                    set_error.set(Some(e.to_string()));
                }
            }
        });

        // don't wait for the server
        set_name.set(String::new());
        set_cost.set(String::new());
    };

    view! {
        <div class="grocery-input">
            <input
                type="text"
                placeholder="What needs to be bought?"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
                on:keyup=on_keyup
            />
            <input
                type="number"
                min="0.00"
                max="10000.00"
                step="0.01"
                placeholder="Cost?"
                prop:value=move || cost.get()
                on:input=move |ev| set_cost.set(event_target_value(&ev))
            />

            {move || error.get().map(|msg| view! { <p class="input-error">{msg}</p> })}
            {move || last_added.get().map(|g| view! {
                <p class="last-added">"Added: " {g.name} " (" {g.status.as_str()} ")"</p>
            })}
        </div>
    }
}
