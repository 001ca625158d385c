//! 输入校验
//!
//! 捐赠向导前进前的同步校验。错误消息直接展示给用户，使用英文。

use crate::{Amount, MAX_AMOUNT_CENTS};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please choose or enter a donation amount")]
    EmptyAmount,
    #[error("The amount must be a number")]
    AmountNotANumber,
    #[error("The amount must be greater than zero")]
    AmountNotPositive,
    #[error("Amounts can have at most two decimal places")]
    AmountTooPrecise,
    #[error("The amount exceeds the maximum of {}", Amount::from_cents(MAX_AMOUNT_CENTS))]
    AmountTooLarge,
    #[error("Please enter your name or give anonymously")]
    EmptyName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// 解析用户输入的金额
///
/// 接受 `50`、`50.5`、`$1,000.00` 等形式；拒绝空值、零、负数、
/// 非数字、超过两位小数以及超过上限的金额。
pub fn parse_amount(input: &str) -> Result<Amount, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if unsigned.starts_with('-') {
        return Err(ValidationError::AmountNotPositive);
    }

    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits.as_str(), ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(ValidationError::AmountNotANumber);
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::AmountNotANumber);
    }
    if frac.len() > 2 {
        return Err(ValidationError::AmountTooPrecise);
    }

    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ValidationError::AmountTooLarge)?
    };
    let frac_value: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().map_err(|_| ValidationError::AmountNotANumber)? * 10,
        _ => frac.parse().map_err(|_| ValidationError::AmountNotANumber)?,
    };

    let cents = whole_value
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac_value))
        .ok_or(ValidationError::AmountTooLarge)?;

    if cents == 0 {
        return Err(ValidationError::AmountNotPositive);
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(Amount::from_cents(cents))
}

/// 校验邮箱格式，返回去除首尾空白后的地址
///
/// 只做语法检查：恰好一个 `@`，本地部分非空，域名至少包含两段非空标签。
pub fn validate_email(input: &str) -> Result<String, ValidationError> {
    let email = input.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(ValidationError::InvalidEmail);
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld_ok = labels.last().is_some_and(|tld| tld.chars().count() >= 2);

    if !labels_ok || !tld_ok {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_string())
}
