use crate::domain::model::{SubscriptionRequest, SubscriptionResponse};
use crate::domain::ports::{ConfigProvider, SubscriptionBackend};
use crate::utils::error::{PortfolioError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpSubscriptionClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpSubscriptionClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url().trim_end_matches('/'),
            self.config.subscribe_path()
        )
    }
}

#[async_trait]
impl<C: ConfigProvider> SubscriptionBackend for HttpSubscriptionClient<C> {
    async fn subscribe(&self, request: &SubscriptionRequest) -> Result<SubscriptionResponse> {
        let endpoint = self.endpoint();
        tracing::debug!("Making subscription request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .json(request)
            .timeout(self.config.timeout())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Subscription response status: {}", status);

        let bytes = response.bytes().await?;

        // 非 2xx 一律視為後端拒絕；內容無法解析時就沒有 message
        if !status.is_success() {
            let message = serde_json::from_slice::<SubscriptionResponse>(&bytes)
                .ok()
                .and_then(|body| body.message);
            return Err(PortfolioError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: SubscriptionResponse = serde_json::from_slice(&bytes)?;

        tracing::info!(
            new_subscription = body.is_new_subscription.unwrap_or(false),
            email_sent = body.email_sent.unwrap_or(false),
            "✅ Subscription accepted"
        );
        Ok(body)
    }
}
