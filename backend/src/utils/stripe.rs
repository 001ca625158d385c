//! Stripe Checkout 接入
//!
//! - `session`: Stripe 返回体与领域类型之间的转换
//! - `gateway`: 会话创建/查询，实现 `PaymentSessionProvider`

mod gateway;
mod session;

pub use gateway::{CheckoutSettings, StripeGateway};
