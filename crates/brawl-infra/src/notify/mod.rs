//! Notifier implementations - where a due reminder ends up.

mod console;
#[cfg(feature = "webhook")]
mod webhook;

pub use console::ConsoleNotifier;
#[cfg(feature = "webhook")]
pub use webhook::WebhookNotifier;
