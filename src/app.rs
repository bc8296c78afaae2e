//! Grocery App
//!
//! Root component: builds the shared context and lays out the views.

use leptos::prelude::*;

use crate::components::{GroceryInput, GroceryList};
use crate::config::AppConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    tracing::info!(api_base = %config.api_base, hub = %config.hub_channel, "starting grocery app");

    // Provide context to all children
    provide_context(AppContext::new(&config));

    view! {
        <div class="grocery-mvc">
            <div class="box"></div>
            <h1>"Shopping List"</h1>
            <GroceryInput />
            <GroceryList />
        </div>
    }
}
