//! 支付会话能力接口
//!
//! 托管支付 SDK 的内部实现不在本仓库内。前端通过后端 API 实现该接口，
//! 后端通过支付处理方的 REST API 实现该接口。

use crate::protocol::{CheckoutSession, CreateCheckoutSessionRequest, SessionStatus};
use std::fmt::Display;

#[async_trait::async_trait(?Send)]
pub trait PaymentSessionProvider {
    type Error: Display;

    /// 创建嵌入式结算会话，返回 client secret
    async fn create_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> Result<CheckoutSession, Self::Error>;

    /// 查询会话最终状态（嵌入式组件只通知"已完成"，成功与否以此为准）
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, Self::Error>;
}
