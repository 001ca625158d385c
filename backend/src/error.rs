use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 包含错误对应的语义（状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GivingErrorStatus {
    /// 400: 请求参数校验失败
    InvalidInput,
    /// 400: JSON 解析或序列化错误
    Serialization,
    /// 404: 资源未找到（如不存在的结算会话）
    NotFound,
    /// 500: 部署配置错误（如缺少支付密钥）
    Config,
    /// 500: 运行时内部错误
    Internal,
    /// 502: 外部 API 调用失败（支付处理方、外部页面）
    ExternalApi,
}

impl GivingErrorStatus {
    pub fn status_code(&self) -> u16 {
        match self {
            GivingErrorStatus::InvalidInput | GivingErrorStatus::Serialization => 400,
            GivingErrorStatus::NotFound => 404,
            GivingErrorStatus::Config | GivingErrorStatus::Internal => 500,
            GivingErrorStatus::ExternalApi => 502,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GivingErrorStatus::InvalidInput => "INVALID_INPUT",
            GivingErrorStatus::Serialization => "JSON_PARSE_ERROR",
            GivingErrorStatus::NotFound => "RESOURCE_NOT_FOUND",
            GivingErrorStatus::Config => "MISCONFIGURED",
            GivingErrorStatus::Internal => "INTERNAL_ERROR",
            GivingErrorStatus::ExternalApi => "UPSTREAM_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "stripe.create_session", "image.fetch_page"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// Application Domain Errors
///
/// - status: 错误类型/语义
/// - message: 错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct GivingError {
    pub status: GivingErrorStatus,
    pub message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl GivingError {
    pub fn new(status: GivingErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::InvalidInput, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::Serialization, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::NotFound, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::Config, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::Internal, message)
    }

    pub fn external_api(message: impl Into<String>) -> Self {
        Self::new(GivingErrorStatus::ExternalApi, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for GivingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for GivingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type GivingResult<T> = std::result::Result<T, GivingError>;

// =========================================================
// 传输用错误类型
// =========================================================

/// 返回给前端的错误体
///
/// 5xx 错误只携带通用消息，内部细节只写日志。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&GivingError> for ErrorResponse {
    fn from(e: &GivingError) -> Self {
        let message = if e.status_code() >= 500 {
            match e.status {
                GivingErrorStatus::ExternalApi => "Payment service unavailable".to_string(),
                _ => "Internal Server Error".to_string(),
            }
        } else {
            e.message.clone()
        };
        Self {
            code: e.error_code().to_string(),
            message,
        }
    }
}

// =========================================================
// 类型转换实现
// =========================================================

impl From<worker::Error> for GivingError {
    fn from(e: worker::Error) -> Self {
        GivingError::internal(e.to_string())
    }
}

impl From<serde_json::Error> for GivingError {
    fn from(e: serde_json::Error) -> Self {
        GivingError::serialization(e.to_string()).with_source(e)
    }
}

impl From<ramadan_giving_shared::validation::ValidationError> for GivingError {
    fn from(e: ramadan_giving_shared::validation::ValidationError) -> Self {
        GivingError::invalid_input(e.to_string()).with_source(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramadan_giving_shared::validation::ValidationError;

    #[test]
    fn test_display_includes_trace() {
        let err = GivingError::external_api("card_declined")
            .in_op("stripe.create_session")
            .in_op_with("donation.checkout", "iftar-meals");
        assert_eq!(
            err.to_string(),
            "[UPSTREAM_ERROR] card_declined | trace: stripe.create_session -> donation.checkout(iftar-meals)"
        );
        assert_eq!(err.spans().len(), 2);
    }

    #[test]
    fn test_error_response_masks_server_errors() {
        let upstream = GivingError::external_api("sk_live_... invalid api key");
        let body = ErrorResponse::from(&upstream);
        assert_eq!(body.code, "UPSTREAM_ERROR");
        assert!(!body.message.contains("sk_live"));

        let missing = GivingError::config("secret STRIPE_SECRET_KEY not bound");
        assert_eq!(ErrorResponse::from(&missing).message, "Internal Server Error");

        let bad = GivingError::invalid_input("amount too small");
        assert_eq!(ErrorResponse::from(&bad).message, "amount too small");
        assert_eq!(bad.status_code(), 400);
    }

    #[test]
    fn test_validation_error_keeps_source() {
        use std::error::Error;
        let err: GivingError = ValidationError::InvalidEmail.into();
        assert_eq!(err.status, GivingErrorStatus::InvalidInput);
        assert!(err.source().is_some());
    }
}
