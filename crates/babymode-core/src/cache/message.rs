//! Messages, sync tags, push payloads and notifications handled by the worker

use serde::{Deserialize, Serialize};

/// Default notification title
pub const NOTIFICATION_TITLE: &str = "Baby Mode";

/// Default notification body
pub const NOTIFICATION_BODY: &str = "Baby Mode notification";

/// Tag shared by every notification so a new one replaces the last
pub const NOTIFICATION_TAG: &str = "baby-mode-notification";

/// Window clients whose URL contains this are focused on notification click
pub const CLIENT_URL_MARKER: &str = "baby-mode";

/// Opened when no existing client matches
pub const OPEN_URL: &str = "/";

/// `postMessage` commands from the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    /// Activate the waiting worker now
    SkipWaiting,
}

impl WorkerMessage {
    /// Parse a JSON message; anything unrecognised is `None`
    pub fn parse(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// Registered background sync handlers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncTask {
    /// One-off sync when connectivity returns
    Background,
    /// Periodic content refresh
    Content,
}

impl SyncTask {
    pub const BACKGROUND_TAG: &'static str = "background-sync";
    pub const CONTENT_TAG: &'static str = "content-sync";

    /// Match a `sync` or `periodicsync` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            Self::BACKGROUND_TAG => Some(SyncTask::Background),
            Self::CONTENT_TAG => Some(SyncTask::Content),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SyncTask::Background => Self::BACKGROUND_TAG,
            SyncTask::Content => Self::CONTENT_TAG,
        }
    }
}

/// Body of a push message
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PushPayload {
    /// Parse push data; malformed JSON yields an empty payload
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

/// A notification ready for `showNotification(title, options)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSpec {
    #[serde(skip)]
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub require_interaction: bool,
    pub silent: bool,
}

impl NotificationSpec {
    /// Silent, non-interactive notification for `payload`; missing or empty
    /// fields fall back to the defaults.
    pub fn from_push(payload: Option<&PushPayload>) -> Self {
        let pick = |field: Option<&String>, default: &str| {
            field
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };
        let title = pick(payload.and_then(|p| p.title.as_ref()), NOTIFICATION_TITLE);
        let body = pick(payload.and_then(|p| p.body.as_ref()), NOTIFICATION_BODY);

        Self {
            title,
            body,
            icon: "/assets/icons/icon-192x192.png".to_string(),
            badge: "/assets/icons/icon-72x72.png".to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            require_interaction: false,
            silent: true,
        }
    }

    /// Options object as JSON
    pub fn options_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What a notification click should do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// Focus the client at this index
    Focus(usize),
    /// Open a new window at this URL
    Open(&'static str),
}

impl ClickTarget {
    /// Pick the first window client showing the app, else open a new one
    pub fn choose<S: AsRef<str>>(client_urls: &[S]) -> Self {
        client_urls
            .iter()
            .position(|url| url.as_ref().contains(CLIENT_URL_MARKER))
            .map_or(ClickTarget::Open(OPEN_URL), ClickTarget::Focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_waiting_message() {
        assert_eq!(
            WorkerMessage::parse(r#"{"type":"SKIP_WAITING"}"#),
            Some(WorkerMessage::SkipWaiting)
        );
        assert_eq!(WorkerMessage::parse(r#"{"type":"RELOAD"}"#), None);
        assert_eq!(WorkerMessage::parse(r#""SKIP_WAITING""#), None);
        assert_eq!(WorkerMessage::parse("null"), None);
    }

    #[test]
    fn test_sync_tags() {
        assert_eq!(SyncTask::from_tag("background-sync"), Some(SyncTask::Background));
        assert_eq!(SyncTask::from_tag("content-sync"), Some(SyncTask::Content));
        assert_eq!(SyncTask::from_tag("other"), None);
        assert_eq!(SyncTask::Content.tag(), "content-sync");
    }

    #[test]
    fn test_push_defaults() {
        let spec = NotificationSpec::from_push(None);
        assert_eq!(spec.title, "Baby Mode");
        assert_eq!(spec.body, "Baby Mode notification");
        assert_eq!(spec.tag, "baby-mode-notification");
        assert!(spec.silent);
        assert!(!spec.require_interaction);
    }

    #[test]
    fn test_push_payload_overrides() {
        let payload = PushPayload::from_json(r#"{"title":"Nap time","body":"Shh"}"#);
        let spec = NotificationSpec::from_push(Some(&payload));
        assert_eq!(spec.title, "Nap time");
        assert_eq!(spec.body, "Shh");
    }

    #[test]
    fn test_push_empty_fields_use_defaults() {
        let payload = PushPayload::from_json(r#"{"title":"","body":"Hi"}"#);
        let spec = NotificationSpec::from_push(Some(&payload));
        assert_eq!(spec.title, "Baby Mode");
        assert_eq!(spec.body, "Hi");
    }

    #[test]
    fn test_malformed_push_payload() {
        assert_eq!(PushPayload::from_json("not json"), PushPayload::default());
    }

    #[test]
    fn test_options_json_shape() {
        let json = NotificationSpec::from_push(None).options_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["requireInteraction"], false);
        assert_eq!(value["silent"], true);
        assert_eq!(value["tag"], "baby-mode-notification");
        assert!(value.get("title").is_none());
    }

    #[test]
    fn test_click_target() {
        let urls = ["https://example.com/other", "https://example.com/baby-mode/"];
        assert_eq!(ClickTarget::choose(&urls), ClickTarget::Focus(1));

        let none: [&str; 1] = ["https://example.com/"];
        assert_eq!(ClickTarget::choose(&none), ClickTarget::Open("/"));
    }
}
