//! Grocery Item Component
//!
//! One grocery row: toggle, title, delete.

use leptos::prelude::*;

use crate::models::{Grocery, GroceryStatus};

/// A single grocery row
///
/// Bound to one record at a time. When a replacement record arrives the old
/// `Grocery-{id}`/status markers are swapped for the new ones and the title
/// follows.
#[component]
pub fn GroceryItem(
    #[prop(into)] grocery: Signal<Grocery>,
    on_toggle: Callback<Grocery>,
    on_delete: Callback<Grocery>,
) -> impl IntoView {
    let in_basket = move || grocery.with(|g| g.status == GroceryStatus::Basket);

    view! {
        <div class=move || grocery.with(Grocery::row_class)>
            <span
                class="c-check"
                on:pointerup=move |_| on_toggle.run(grocery.get_untracked())
            >
                <span class="ico-basket">{move || if in_basket() { "✓" } else { "" }}</span>
            </span>

            <div class="title">{move || grocery.with(|g| g.name.clone())}</div>

            {move || grocery.with(|g| {
                (g.cost > 0.0).then(|| view! { <span class="cost">{format!("{:.2}", g.cost)}</span> })
            })}

            <button
                class="del"
                title="Delete"
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_delete.run(grocery.get_untracked());
                }
            >
                "×"
            </button>
        </div>
    }
}
