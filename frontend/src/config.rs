//! 编译期配置
//!
//! 静态站点没有运行时环境变量，部署参数在构建时通过环境变量注入：
//!
//! ```sh
//! GIVING_API_BASE=https://api.ramadangiving.org \
//! STRIPE_PUBLISHABLE_KEY=pk_live_... \
//! trunk build --release
//! ```

/// 捐赠 Worker 地址；为空时使用同源的 `/api/...`
pub const API_BASE: &str = env_or(option_env!("GIVING_API_BASE"), "");

/// Stripe 可发布密钥，为空时支付组件初始化失败并提示
pub const STRIPE_PUBLISHABLE_KEY: &str = env_or(option_env!("STRIPE_PUBLISHABLE_KEY"), "");

/// 为空时不启用登录态预填
pub const SUPABASE_URL: &str = env_or(option_env!("SUPABASE_URL"), "");
pub const SUPABASE_ANON_KEY: &str = env_or(option_env!("SUPABASE_ANON_KEY"), "");

const fn env_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

/// 拼接 API 地址，处理多余的斜杠
pub fn api_url(path: &str) -> String {
    join_url(API_BASE, path)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "/api/images/resolve"), "/api/images/resolve");
        assert_eq!(
            join_url("https://api.ramadangiving.org/", "/api/checkout/sessions"),
            "https://api.ramadangiving.org/api/checkout/sessions"
        );
        assert_eq!(join_url("https://w.dev", "api/x"), "https://w.dev/api/x");
    }
}
