use crate::config::api_url;
use gloo_net::http::{Request, Response};
use ramadan_giving_shared::image::ImageResolver;
use ramadan_giving_shared::payment::PaymentSessionProvider;
use ramadan_giving_shared::protocol::{
    ApiRequest, CheckoutSession, CreateCheckoutSessionRequest, ResolveImageRequest,
    SessionStatus, SessionStatusRequest,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Worker 调用错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 请求没有到达（离线、CORS、DNS）
    Network(String),
    /// Worker 返回非 2xx
    Status { status: u16, message: String },
    /// 返回体无法解析
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(_) => write!(f, "Network error, please check your connection"),
            ApiError::Status { message, .. } => write!(f, "{}", message),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

/// Worker 的错误体 `{ code, message }`
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("Request failed ({})", status));
        ApiError::Status { status, message }
    }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    if !res.ok() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::from_body(status, &body));
    }
    res.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// =========================================================
// 捐赠会话
// =========================================================

/// 通过 Worker 创建/查询托管结算会话
#[derive(Clone, Copy, Debug, Default)]
pub struct DonationApi;

#[async_trait::async_trait(?Send)]
impl PaymentSessionProvider for DonationApi {
    type Error = ApiError;

    async fn create_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession, ApiError> {
        let url = api_url(CreateCheckoutSessionRequest::PATH);
        let res = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json::<<CreateCheckoutSessionRequest as ApiRequest>::Response>(res).await
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError> {
        let url = api_url(SessionStatusRequest::PATH);
        let res = Request::get(&url)
            .query([("id", session_id)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(res).await
    }
}

// =========================================================
// 外部图片解析
// =========================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct ApiImageResolver;

#[async_trait::async_trait(?Send)]
impl ImageResolver for ApiImageResolver {
    type Error = ApiError;

    async fn resolve(&self, external_url: &str) -> Result<Option<String>, ApiError> {
        let url = api_url(ResolveImageRequest::PATH);
        let res = Request::get(&url)
            .query([("url", external_url)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let resolved: <ResolveImageRequest as ApiRequest>::Response = read_json(res).await?;
        Ok(resolved.image)
    }
}
