//! Telegram notifications
//!
//! The dashboard only ever sends; there is no polling, command handling or
//! chat discovery. Everything goes through the [`Notifier`] trait so the
//! dashboard can be driven without a bot.

pub mod notifier;

pub use notifier::{recipient_for, Notifier, TelegramNotifier};
