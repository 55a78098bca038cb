pub mod form;
pub mod service;
pub mod validation;

pub use crate::domain::model::{
    CaseRecord, Notification, NotificationVariant, SubscriptionRequest, SubscriptionResponse,
};
pub use crate::domain::ports::{ConfigProvider, Notifier, SubscriptionBackend};
pub use crate::utils::error::Result;
