// Adapters layer: concrete implementations for external systems (http backend, notification sinks).

pub mod http;
pub mod notify;

pub use http::HttpSubscriptionClient;
pub use notify::{ConsoleNotifier, TracingNotifier};
