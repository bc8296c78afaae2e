//! Application Context
//!
//! Shared state provided via Leptos Context API, plus the attach/detach
//! helpers views use to bind themselves to the hub.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;

use crate::commands::{GroceryEvent, GroceryModel, WebClient, GROCERY_TOPIC};
use crate::config::AppConfig;
use crate::hub::Hub;
use crate::models::Grocery;

/// App-wide handles provided via context
///
/// Hub and model hold `Rc`s, so they live in local storage; the context
/// itself stays `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    hub: StoredValue<Hub, LocalStorage>,
    model: StoredValue<GroceryModel, LocalStorage>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let hub = Hub::new(config.hub_channel.clone());
        let client = Rc::new(WebClient::new(config.clone()));
        let model = GroceryModel::new(client, hub.clone());
        Self::from_parts(hub, model)
    }

    /// `model` should publish on `hub`
    pub fn from_parts(hub: Hub, model: GroceryModel) -> Self {
        Self {
            hub: StoredValue::new_local(hub),
            model: StoredValue::new_local(model),
        }
    }

    pub fn model(&self) -> GroceryModel {
        self.model.get_value()
    }

    pub fn hub(&self) -> Hub {
        self.hub.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Subscribe to a grocery notification for as long as the calling view is
/// mounted. The subscription is dropped when the view's owner is cleaned up.
///
/// `Subscription` is only a shared flag, so it can move into `on_cleanup`.
pub fn use_grocery_events<F>(event: GroceryEvent, handler: F)
where
    F: Fn(&Grocery) + 'static,
{
    let hub = use_app_context().hub();
    let subscription = hub.subscribe::<Grocery, _>(GROCERY_TOPIC, event.as_str(), handler);
    tracing::debug!(
        channel = %hub.channel(),
        label = event.as_str(),
        subscribers = hub.subscriber_count(GROCERY_TOPIC, event.as_str()),
        "view subscribed"
    );
    on_cleanup(move || subscription.unsubscribe());
}

/// Attached flag for a view, cleared when the view is unmounted.
///
/// Async completions check it before touching the view's state.
#[derive(Clone, Debug)]
pub struct Attachment(Arc<AtomicBool>);

impl Attachment {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_attached(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn detach(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

pub fn use_attachment() -> Attachment {
    let attachment = Attachment::new();
    let on_detach = attachment.clone();
    on_cleanup(move || on_detach.detach());
    attachment
}
