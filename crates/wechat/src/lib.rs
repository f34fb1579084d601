//! Outbound WeChat mini-program API client: fetches client-credential
//! access tokens and delivers booking-audit subscription messages.

use serde::Deserialize;
use thiserror::Error;

mod subscribe;

pub use subscribe::{AuditNotification, AuditStatus, SubscribeMessage};

pub const APPID_ENV: &str = "WX_APPID";
pub const APPSECRET_ENV: &str = "WX_APPSECRET";
pub const TEMPLATE_ID_ENV: &str = "WX_SUBSCRIBE_TEMPLATE_ID";

const DEFAULT_API_BASE: &str = "https://api.weixin.qq.com";

#[derive(Debug, Clone)]
pub struct WechatConfig {
    pub app_id: String,
    pub app_secret: String,
    pub template_id: String,
}

impl WechatConfig {
    /// Reads the mini-program credentials and the audit-result template id
    /// from the environment. Returns `None` when any of them is missing or
    /// blank, which disables the notification relay without failing the
    /// process.
    pub fn from_env() -> Option<Self> {
        match (
            non_empty_var(APPID_ENV),
            non_empty_var(APPSECRET_ENV),
            non_empty_var(TEMPLATE_ID_ENV),
        ) {
            (Some(app_id), Some(app_secret), Some(template_id)) => Some(Self {
                app_id,
                app_secret,
                template_id,
            }),
            _ => {
                tracing::warn!(
                    "{APPID_ENV}/{APPSECRET_ENV}/{TEMPLATE_ID_ENV} not fully configured; audit notifications disabled"
                );
                None
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Error)]
pub enum WechatError {
    #[error("access token response carried no access_token ({0})")]
    MissingAccessToken(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    errcode: Option<i64>,
    errmsg: Option<String>,
}

#[derive(Clone)]
pub struct SubscribeService {
    client: reqwest::Client,
    config: Option<WechatConfig>,
    api_base: String,
}

impl SubscribeService {
    pub fn new(config: Option<WechatConfig>) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    pub fn with_api_base(config: Option<WechatConfig>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            api_base: api_base.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Best-effort delivery of a booking audit result as a subscription
    /// message. A missing openid or missing configuration skips the send
    /// without touching the network; token and transport failures surface
    /// as errors for the caller to log and discard.
    pub async fn send_audit_result(
        &self,
        notification: &AuditNotification,
    ) -> Result<(), WechatError> {
        let Some(config) = &self.config else {
            tracing::warn!("subscribe message config missing, skipping audit notification");
            return Ok(());
        };
        let Some(openid) = notification
            .openid
            .as_deref()
            .filter(|value| !value.is_empty())
        else {
            tracing::warn!("openid missing, skipping audit notification");
            return Ok(());
        };

        let access_token = self.fetch_access_token(config).await?;
        let message = SubscribeMessage::audit_result(openid, &config.template_id, notification);

        let response = self
            .client
            .post(format!("{}/cgi-bin/message/subscribe/send", self.api_base))
            .query(&[("access_token", access_token.as_str())])
            .json(&message)
            .send()
            .await?;
        // The platform reports delivery problems in the body; log it
        // verbatim and move on, delivery is not retried.
        let body = response.text().await?;
        tracing::info!(response = %body, "subscribe message dispatched");
        Ok(())
    }

    /// Fetches a fresh client-credential token for every send; tokens are
    /// never cached.
    async fn fetch_access_token(&self, config: &WechatConfig) -> Result<String, WechatError> {
        let AccessTokenResponse {
            access_token,
            errcode,
            errmsg,
        } = self
            .client
            .get(format!("{}/cgi-bin/token", self.api_base))
            .query(&[
                ("grant_type", "client_credential"),
                ("appid", config.app_id.as_str()),
                ("secret", config.app_secret.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        access_token.ok_or_else(|| {
            WechatError::MissingAccessToken(format!(
                "errcode={} errmsg={}",
                errcode.unwrap_or_default(),
                errmsg.unwrap_or_default()
            ))
        })
    }
}
