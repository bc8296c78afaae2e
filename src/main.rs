//! Grocery Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod hub;
mod models;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(App);
}
