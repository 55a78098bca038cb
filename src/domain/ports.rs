use crate::domain::model::{Notification, SubscriptionRequest, SubscriptionResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn subscribe_path(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// 訂閱後端。非 2xx 回應以 `PortfolioError::Rejected` 回傳，
/// 其餘錯誤視為傳輸失敗。
#[async_trait]
pub trait SubscriptionBackend: Send + Sync {
    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionResponse>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
