//! Push notifications and notification clicks

use babymode_core::{ClickTarget, NotificationSpec, PushPayload};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Client, NotificationOptions, WindowClient};

use crate::util::{log, resolve, scope};

/// Show the notification for a push message with optional JSON `data`
pub async fn show_push(data: Option<String>) -> Result<(), JsValue> {
    let payload = data.as_deref().map(PushPayload::from_json);
    let spec = NotificationSpec::from_push(payload.as_ref());

    let json = spec
        .options_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options: NotificationOptions = js_sys::JSON::parse(&json)?.unchecked_into();

    resolve(
        scope()
            .registration()
            .show_notification_with_options(&spec.title, &options),
    )
    .await?;
    Ok(())
}

/// Focus an open app window, or open a new one
pub async fn focus_or_open() -> Result<(), JsValue> {
    let clients = scope().clients();
    let query = js_sys::Object::new();
    js_sys::Reflect::set(&query, &"type".into(), &"window".into())?;
    let list = resolve(Ok(clients.match_all_with_options(query.unchecked_ref()))).await?;

    let windows: Vec<Client> = js_sys::Array::from(&list)
        .iter()
        .filter_map(|c| c.dyn_into::<Client>().ok())
        .collect();
    let urls: Vec<String> = windows.iter().map(Client::url).collect();

    match ClickTarget::choose(&urls) {
        ClickTarget::Focus(index) => {
            if let Some(window) = windows[index].dyn_ref::<WindowClient>() {
                resolve(window.focus()).await?;
                return Ok(());
            }
            log("[sw] matching client cannot be focused, opening a new window");
            resolve(Ok(clients.open_window(babymode_core::cache::OPEN_URL))).await?;
        }
        ClickTarget::Open(url) => {
            resolve(Ok(clients.open_window(url))).await?;
        }
    }
    Ok(())
}
