//! Ramadan Giving 共享领域层
//!
//! 前端 (WASM)、后端 (Worker) 与静态导出工具共用的纯 Rust 模块：
//! - `donation`: 捐赠向导状态机
//! - `validation`: 金额与邮箱校验
//! - `image`: 外部图片解析查询（带过期请求丢弃）
//! - `payment` / `auth`: 托管服务的能力接口
//! - `protocol`: 前后端 API 协议
//! - `site` / `content`: 站点元数据与静态内容

pub mod auth;
pub mod content;
pub mod donation;
pub mod image;
pub mod payment;
pub mod protocol;
pub mod query;
pub mod site;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 默认结算货币（ISO 4217 小写，Stripe 约定）
pub const DEFAULT_CURRENCY: &str = "usd";

/// 支付处理方的最低扣款额（美分），Stripe 对 USD 为 $0.50
pub const MIN_CHARGE_CENTS: u64 = 50;

/// 单笔捐赠上限（美分）。Stripe 对 USD 的单笔上限为 $999,999.99
pub const MAX_AMOUNT_CENTS: u64 = 99_999_999;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 金额，以最小货币单位（美分）存储，避免浮点误差
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[inline]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    #[inline]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_whole_dollars(&self) -> bool {
        self.0 % 100 == 0
    }
}

impl fmt::Display for Amount {
    /// 以 `$1,250` / `$50.50` 的形式显示
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.is_whole_dollars() {
            write!(f, "${}", grouped)
        } else {
            write!(f, "${}.{:02}", grouped, self.0 % 100)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DonationFrequency {
    #[default]
    OneTime,
    Monthly,
}

impl DonationFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            DonationFrequency::OneTime => "One-time",
            DonationFrequency::Monthly => "Monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, DonationFrequency::Monthly)
    }
}

/// 捐赠者信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DonorDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub anonymous: bool,
    /// 纪念/献给某人（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedication: Option<String>,
}

impl DonorDetails {
    /// 对外展示的名字；匿名捐赠返回 None
    pub fn public_name(&self) -> Option<&str> {
        let name = self.name.trim();
        if self.anonymous || name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}
