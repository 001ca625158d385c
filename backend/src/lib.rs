use worker::*;

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (worker::console_log!($($t)*))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (worker::console_error!($($t)*))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod error;
pub mod logic;
pub(crate) mod utils;

use error::{ErrorResponse, GivingError, GivingResult};
use logic::{DonationLogic, ImageLogic};
use ramadan_giving_shared::DEFAULT_CURRENCY;
use ramadan_giving_shared::protocol::{
    ApiRequest, CreateCheckoutSessionRequest, ResolveImageRequest, SessionStatusRequest,
};
use utils::request::WorkerHttpClient;
use utils::stripe::{CheckoutSettings, StripeGateway};

// =========================================================
// 常量定义
// =========================================================
const DEFAULT_STRIPE_SECRET_NAME: &str = "STRIPE_SECRET_KEY";
const DEFAULT_SITE_URL: &str = "https://ramadangiving.org";
const DEFAULT_ALLOWED_ORIGIN: &str = "*";
const DEFAULT_PRODUCT_NAME: &str = "Ramadan Giving donation";

// =========================================================
// 响应处理
// =========================================================

// 辅助函数：将 GivingError 映射为 Worker Response
fn map_error_to_response(e: GivingError) -> Result<Response> {
    let status = e.status_code();

    // 5xx 的细节只写日志，返回体只有通用消息
    if status >= 500 {
        log_error!("Request failed: {}", e);
    } else {
        log_info!("Rejected request: {}", e);
    }

    Ok(Response::from_json(&ErrorResponse::from(&e))?.with_status(status))
}

// 统一响应宏
macro_rules! respond {
    (json, $expr:expr) => {
        match $expr {
            Ok(v) => Response::from_json(&v),
            Err(e) => map_error_to_response(e),
        }
    };
}

// 辅助宏：提前返回错误响应
macro_rules! try_or_resp {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => return map_error_to_response(e.into()),
        }
    };
}

// =========================================================
// 运行时配置与密钥
// =========================================================

pub trait SecretResolver {
    fn get_secret(&self, name: &str) -> Option<String>;
}

// 实现：生产环境使用 Env 获取 Secret
pub struct EnvSecretResolver<'a>(pub &'a Env);

impl<'a> SecretResolver for EnvSecretResolver<'a> {
    fn get_secret(&self, name: &str) -> Option<String> {
        self.0.secret(name).ok().map(|s| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RuntimeConfig {
    stripe_secret_name: String,
    site_url: String,
    currency: String,
    allowed_origin: String,
    product_name: String,
}

impl RuntimeConfig {
    fn new(env: &Env) -> Self {
        Self::from_lookup(|name| env.var(name).ok().map(|v| v.to_string()))
    }

    /// 未设置或为空的变量使用默认值
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            stripe_secret_name: get("STRIPE_SECRET_NAME", DEFAULT_STRIPE_SECRET_NAME),
            site_url: get("SITE_URL", DEFAULT_SITE_URL)
                .trim_end_matches('/')
                .to_string(),
            currency: get("CURRENCY", DEFAULT_CURRENCY).to_ascii_lowercase(),
            allowed_origin: get("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            product_name: get("PRODUCT_NAME", DEFAULT_PRODUCT_NAME),
        }
    }

    fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            currency: self.currency.clone(),
            product_name: self.product_name.clone(),
            return_url: format!("{}/donate/?session_id={{CHECKOUT_SESSION_ID}}", self.site_url),
        }
    }

    fn stripe_secret<S: SecretResolver>(&self, resolver: &S) -> GivingResult<String> {
        resolver
            .get_secret(&self.stripe_secret_name)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                GivingError::config(format!("Secret '{}' is not bound", self.stripe_secret_name))
            })
    }
}

fn query_param(req: &Request, key: &str) -> GivingResult<String> {
    let url = req.url()?;
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| GivingError::invalid_input(format!("Missing query parameter '{}'", key)))
}

// =========================================================
// API Controllers (适配层)
// =========================================================

async fn create_checkout_session(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let cfg = RuntimeConfig::new(&ctx.env);

    let body: CreateCheckoutSessionRequest = try_or_resp!(req.json().await.map_err(|e| {
        GivingError::serialization(format!("Invalid JSON Body: {}", e))
    }));
    let secret = try_or_resp!(cfg.stripe_secret(&EnvSecretResolver(&ctx.env)));

    let client = WorkerHttpClient;
    let gateway = StripeGateway::new(&client, secret, cfg.checkout_settings());
    let logic = DonationLogic::new(&gateway);
    let result = logic.create_checkout_session(body).await;

    if let Ok(session) = &result {
        log_info!("Checkout session {} created", session.id);
    }
    respond!(json, result)
}

async fn session_status(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let cfg = RuntimeConfig::new(&ctx.env);

    let query = SessionStatusRequest {
        id: try_or_resp!(query_param(&req, "id")),
    };
    let secret = try_or_resp!(cfg.stripe_secret(&EnvSecretResolver(&ctx.env)));

    let client = WorkerHttpClient;
    let gateway = StripeGateway::new(&client, secret, cfg.checkout_settings());
    let logic = DonationLogic::new(&gateway);

    respond!(json, logic.session_status(&query.id).await)
}

async fn resolve_image(req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    let query = ResolveImageRequest {
        url: try_or_resp!(query_param(&req, "url")),
    };

    let client = WorkerHttpClient;
    let logic = ImageLogic::new(&client);
    let result = logic.resolve(&query.url).await;

    match result {
        // 预览图很少变化，允许边缘缓存一小时
        Ok(resolved) => {
            let resp = Response::from_json(&resolved)?;
            resp.headers().set("Cache-Control", "public, max-age=3600")?;
            Ok(resp)
        }
        Err(e) => map_error_to_response(e),
    }
}

// =========================================================
// Entry Points
// =========================================================

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();

    let cfg = RuntimeConfig::new(&env);
    let cors = Cors::new()
        .with_origins(vec![cfg.allowed_origin])
        .with_methods(vec![Method::Get, Method::Post, Method::Options])
        .with_allowed_headers(vec!["Content-Type"]);

    let router = Router::new();
    router
        .post_async(CreateCheckoutSessionRequest::PATH, create_checkout_session)
        .get_async(SessionStatusRequest::PATH, session_status)
        .get_async(ResolveImageRequest::PATH, resolve_image)
        .options_async(CreateCheckoutSessionRequest::PATH, |_, _| async {
            Response::empty()
        })
        .options_async(SessionStatusRequest::PATH, |_, _| async { Response::empty() })
        .options_async(ResolveImageRequest::PATH, |_, _| async { Response::empty() })
        .run(req, env)
        .await?
        .with_cors(&cors)
}
