//! Fetch Transport
//!
//! `WebTransport` over the browser `fetch` API.

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::WebTransport;
use crate::config::AppConfig;
use crate::error::{GroceryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// HTTP client for the grocery backend
#[derive(Debug, Clone)]
pub struct WebClient {
    config: AppConfig,
}

impl WebClient {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.config.url(path);

        let headers = Headers::new().map_err(js_error)?;
        headers.set("Accept", "application/json").map_err(js_error)?;
        if let Some(token) = &self.config.auth_token {
            headers.set("X-Auth-Token", token).map_err(js_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method(method.as_str());
        if let Some(body) = body {
            headers.set("Content-Type", "application/json").map_err(js_error)?;
            opts.set_body(&JsValue::from_str(&serde_json::to_string(body)?));
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        let window = web_sys::window()
            .ok_or_else(|| GroceryError::Transport("no window available".to_string()))?;

        let resp = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp.dyn_into().map_err(js_error)?;

        if !resp.ok() {
            tracing::warn!(method = method.as_str(), %url, status = resp.status(), "request failed");
            return Err(GroceryError::Transport(format!(
                "{} {} -> {} {}",
                method.as_str(),
                url,
                resp.status(),
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();
        unwrap_envelope(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl WebTransport for WebClient {
    async fn get(&self, path: &str) -> Result<Value> {
        self.send(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::Post, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::Patch, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::Delete, path, None).await
    }
}

fn js_error(e: JsValue) -> GroceryError {
    GroceryError::Transport(format!("{:?}", e))
}

/// Backend responses are `{ "data": ... }`
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| GroceryError::Codec("response has no `data` field".to_string())),
        _ => Err(GroceryError::Codec("response is not a JSON object".to_string())),
    }
}
