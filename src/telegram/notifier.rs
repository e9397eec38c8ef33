//! Telegram notifier for sending plain-text messages

use crate::apis::client::build_http_client;
use crate::config::{ChatTarget, Config};
use crate::errors::NotifyError;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};
use teloxide::RequestError;
use url::Url;

/// Sink for user-facing notifications
///
/// One call is one delivery attempt. Failures are reported, never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Telegram notifier for sending messages
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

/// Map the configured chat to a Telegram recipient
///
/// Numeric ids, written as numbers or as strings, address a chat directly.
/// Anything else is treated as a public `@channel` username.
pub fn recipient_for(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Name(name) => match name.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(name.clone()),
        },
    }
}

impl TelegramNotifier {
    /// Create a notifier bound to one bot and one chat
    ///
    /// `api_url` is the Bot API root; requests go to
    /// `{api_url}bot{token}/sendMessage`.
    pub fn new(
        bot_token: &str,
        chat: &ChatTarget,
        api_url: &str,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let api_url = Url::parse(api_url).map_err(|e| NotifyError::InvalidApiUrl {
            url: api_url.to_string(),
            error: e.to_string(),
        })?;
        let client = build_http_client(timeout).map_err(NotifyError::Transport)?;
        let bot = Bot::with_client(bot_token, client).set_api_url(api_url);

        Ok(Self {
            bot,
            recipient: recipient_for(chat),
        })
    }

    /// Create a notifier from config
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        Self::new(
            &config.telegram_bot_token,
            &config.telegram_chat_id,
            &config.telegram_api_url,
            Duration::from_secs(config.settings.request_timeout_secs),
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        // Success follows Telegram's `ok` field, not the HTTP status alone
        self.bot
            .send_message(self.recipient.clone(), message)
            .await
            .map_err(|e| match e {
                RequestError::Network(err) => NotifyError::Transport(err.to_string()),
                RequestError::Io(err) => NotifyError::Transport(err.to_string()),
                other => NotifyError::Rejected(other.to_string()),
            })?;

        logger::debug(
            LogTag::Telegram,
            &format!("Sent Telegram notification (length={})", message.len()),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_stub;
    use axum::extract::State;
    use axum::http::{StatusCode, Uri};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(String, Value)>>>;

    #[test]
    fn test_recipient_mapping() {
        assert_eq!(
            recipient_for(&ChatTarget::Id(-100123)),
            Recipient::Id(ChatId(-100123))
        );
        assert_eq!(
            recipient_for(&ChatTarget::Name("42".to_string())),
            Recipient::Id(ChatId(42))
        );
        assert_eq!(
            recipient_for(&ChatTarget::Name("@alerts".to_string())),
            Recipient::ChannelUsername("@alerts".to_string())
        );
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let result = TelegramNotifier::new(
            "TOKEN",
            &ChatTarget::Id(1),
            "not a url",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(NotifyError::InvalidApiUrl { .. })));
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let paths: Arc<Mutex<Vec<String>>> = Arc::default();
        let router = Router::new()
            .fallback(
                |State(paths): State<Arc<Mutex<Vec<String>>>>, uri: Uri| async move {
                    paths.lock().unwrap().push(uri.path().to_string());
                    (StatusCode::INTERNAL_SERVER_ERROR, "unavailable")
                },
            )
            .with_state(paths.clone());
        let base = spawn_stub(router).await;

        let notifier = TelegramNotifier::new(
            "TOKEN",
            &ChatTarget::Id(7),
            &format!("{}/", base),
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(notifier.notify("hello").await.is_err());
        let paths = paths.lock().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].eq_ignore_ascii_case("/botTOKEN/sendMessage"));
    }

    #[tokio::test]
    async fn test_successful_send_posts_chat_and_text() {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .fallback(
                |State(seen): State<Seen>, uri: Uri, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push((uri.path().to_string(), body));
                    Json(json!({
                        "ok": true,
                        "result": {
                            "message_id": 1,
                            "date": 1700000000,
                            "chat": { "id": 42, "type": "private", "first_name": "Test" },
                            "text": "hello"
                        }
                    }))
                },
            )
            .with_state(seen.clone());
        let base = spawn_stub(router).await;

        let notifier = TelegramNotifier::new(
            "TOKEN",
            &ChatTarget::Name("42".to_string()),
            &format!("{}/", base),
            Duration::from_secs(5),
        )
        .unwrap();

        notifier.notify("hello").await.unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.eq_ignore_ascii_case("/botTOKEN/sendMessage"));
        assert_eq!(seen[0].1, json!({ "chat_id": 42, "text": "hello" }));
    }
}
