use crate::error::{GivingError, GivingResult};
use crate::utils::og_image::{extract_preview_image, validate_external_url};
use crate::utils::request::{HttpClient, HttpMethod, HttpRequest};
use ramadan_giving_shared::content::find_campaign;
use ramadan_giving_shared::payment::PaymentSessionProvider;
use ramadan_giving_shared::protocol::{
    CheckoutSession, CreateCheckoutSessionRequest, ResolvedImage, SessionStatus,
};
use ramadan_giving_shared::validation::{ValidationError, validate_email};
use ramadan_giving_shared::{Amount, DonorDetails, MAX_AMOUNT_CENTS, MIN_CHARGE_CENTS};

const MAX_DEDICATION_CHARS: usize = 500;
const USER_AGENT: &str = "ramadan-giving-worker";

/// 捐赠结算的业务逻辑
///
/// 不依赖 worker 运行时 (Env, Request, Response)，支付处理方通过
/// `PaymentSessionProvider` 注入，测试中可替换为 Mock。
pub struct DonationLogic<'a, P: PaymentSessionProvider<Error = GivingError>> {
    provider: &'a P,
}

impl<'a, P: PaymentSessionProvider<Error = GivingError>> DonationLogic<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// 前端已经校验过，这里再做一次，客户端不可信
    fn normalize(&self, req: CreateCheckoutSessionRequest) -> GivingResult<CreateCheckoutSessionRequest> {
        let cents = req.amount.cents();
        if cents < MIN_CHARGE_CENTS {
            return Err(GivingError::invalid_input(format!(
                "The minimum donation is {}",
                Amount::from_cents(MIN_CHARGE_CENTS)
            )));
        }
        if cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::AmountTooLarge.into());
        }

        let email = validate_email(&req.donor.email)?;
        let name = req.donor.name.trim().to_string();
        if name.is_empty() && !req.donor.anonymous {
            return Err(ValidationError::EmptyName.into());
        }

        let dedication = req
            .donor
            .dedication
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        if dedication
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DEDICATION_CHARS)
        {
            return Err(GivingError::invalid_input(format!(
                "Dedications are limited to {} characters",
                MAX_DEDICATION_CHARS
            )));
        }

        if let Some(slug) = &req.campaign {
            if find_campaign(slug).is_none() {
                return Err(GivingError::invalid_input(format!("Unknown campaign '{}'", slug)));
            }
        }

        Ok(CreateCheckoutSessionRequest {
            amount: req.amount,
            frequency: req.frequency,
            donor: DonorDetails {
                name,
                email,
                anonymous: req.donor.anonymous,
                dedication,
            },
            campaign: req.campaign,
        })
    }

    pub async fn create_checkout_session(
        &self,
        req: CreateCheckoutSessionRequest,
    ) -> GivingResult<CheckoutSession> {
        let req = self.normalize(req)?;
        self.provider
            .create_session(&req)
            .await
            .map_err(|e| e.in_op_with("donation.checkout", req.amount.to_string()))
    }

    pub async fn session_status(&self, session_id: &str) -> GivingResult<SessionStatus> {
        let id = session_id.trim();
        let well_formed = id.starts_with("cs_")
            && id.len() <= 255
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(GivingError::invalid_input("Invalid checkout session id"));
        }
        self.provider
            .session_status(id)
            .await
            .map_err(|e| e.in_op("donation.status"))
    }
}

/// 外部募捐页面预览图解析
pub struct ImageLogic<'a, C: HttpClient> {
    client: &'a C,
}

impl<'a, C: HttpClient> ImageLogic<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// 页面无预览图或上游非 2xx 时返回 `image: None`，由前端显示占位图
    pub async fn resolve(&self, raw_url: &str) -> GivingResult<ResolvedImage> {
        let url = validate_external_url(raw_url)?;

        let req = HttpRequest::new(url.as_str(), HttpMethod::Get)
            .with_header("User-Agent", USER_AGENT)
            .with_header("Accept", "text/html");
        let resp = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op_with("image.fetch_page", url.to_string()))?;

        if !resp.is_success() {
            return Ok(ResolvedImage { image: None });
        }
        Ok(ResolvedImage {
            image: extract_preview_image(&resp.body, &url),
        })
    }
}

// =========================================================
// 单元测试 (无需 Miniflare/Wasm 环境)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GivingErrorStatus;
    use crate::utils::request::MockHttpClient;
    use crate::utils::stripe::{CheckoutSettings, StripeGateway};
    use ramadan_giving_shared::DonationFrequency;
    use serde_json::json;

    const SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

    fn gateway(client: &MockHttpClient) -> StripeGateway<'_, MockHttpClient> {
        StripeGateway::new(
            client,
            "sk_test_123".into(),
            CheckoutSettings {
                currency: "usd".into(),
                product_name: "Ramadan Giving donation".into(),
                return_url: "https://ramadangiving.org/donate/?session_id={CHECKOUT_SESSION_ID}"
                    .into(),
            },
        )
    }

    fn request() -> CreateCheckoutSessionRequest {
        CreateCheckoutSessionRequest {
            amount: Amount::from_dollars(50),
            frequency: DonationFrequency::OneTime,
            donor: DonorDetails {
                name: "  A. Example ".into(),
                email: " a@example.org ".into(),
                anonymous: false,
                dedication: Some("   ".into()),
            },
            campaign: None,
        }
    }

    #[tokio::test]
    async fn test_checkout_normalizes_donor() {
        let client = MockHttpClient::new();
        client.mock_response(
            SESSIONS_URL,
            200,
            json!({ "id": "cs_test_1", "client_secret": "secret_1", "payment_status": "unpaid" }),
        );
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        let session = logic.create_checkout_session(request()).await.unwrap();
        assert_eq!(session.client_secret, "secret_1");

        let form = client.form_of(0);
        assert_eq!(form["customer_email"], "a@example.org");
        assert_eq!(form["metadata[donor_name]"], "A. Example");
        // 空白的献词被丢弃
        assert!(!form.contains_key("metadata[dedication]"));
    }

    #[tokio::test]
    async fn test_checkout_rejects_invalid_requests_without_calling_stripe() {
        let client = MockHttpClient::new();
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        let mut tiny = request();
        tiny.amount = Amount::from_cents(25);
        let mut huge = request();
        huge.amount = Amount::from_cents(MAX_AMOUNT_CENTS + 1);
        let mut bad_email = request();
        bad_email.donor.email = "not-an-email".into();
        let mut nameless = request();
        nameless.donor.name = " ".into();
        let mut unknown_campaign = request();
        unknown_campaign.campaign = Some("does-not-exist".into());
        let mut long_dedication = request();
        long_dedication.donor.dedication = Some("x".repeat(MAX_DEDICATION_CHARS + 1));

        for req in [tiny, huge, bad_email, nameless, unknown_campaign, long_dedication] {
            let err = logic.create_checkout_session(req).await.unwrap_err();
            assert_eq!(err.status, GivingErrorStatus::InvalidInput);
        }
        assert!(client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_donor_may_omit_name() {
        let client = MockHttpClient::new();
        client.mock_response(
            SESSIONS_URL,
            200,
            json!({ "id": "cs_test_2", "client_secret": "secret_2", "payment_status": "unpaid" }),
        );
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        let mut req = request();
        req.donor.name = String::new();
        req.donor.anonymous = true;
        req.campaign = Some("iftar-meals".into());
        assert!(logic.create_checkout_session(req).await.is_ok());
        assert_eq!(client.form_of(0)["metadata[anonymous]"], "true");
    }

    #[tokio::test]
    async fn test_upstream_failure_carries_trace() {
        let client = MockHttpClient::new();
        client.mock_response(SESSIONS_URL, 402, json!({ "error": { "message": "declined" } }));
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        let err = logic.create_checkout_session(request()).await.unwrap_err();
        assert_eq!(err.status, GivingErrorStatus::ExternalApi);
        assert!(err.to_string().contains("donation.checkout($50)"));
    }

    #[tokio::test]
    async fn test_session_status_validates_id() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.stripe.com/v1/checkout/sessions/cs_test_9",
            200,
            json!({ "id": "cs_test_9", "status": "complete", "payment_status": "paid" }),
        );
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        assert!(logic.session_status("cs_test_9").await.unwrap().is_successful());

        for bad in ["", "pi_123", "cs_../../v1/customers", "cs_a?expand=x"] {
            let err = logic.session_status(bad).await.unwrap_err();
            assert_eq!(err.status, GivingErrorStatus::InvalidInput, "{}", bad);
        }
        assert_eq!(client.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.stripe.com/v1/checkout/sessions/cs_missing",
            404,
            json!({ "error": { "message": "No such checkout.session" } }),
        );
        let stripe = gateway(&client);
        let logic = DonationLogic::new(&stripe);

        let err = logic.session_status("cs_missing").await.unwrap_err();
        assert_eq!(err.status, GivingErrorStatus::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_image() {
        let client = MockHttpClient::new();
        client.mock_text(
            "https://www.launchgood.com/campaign/eid_for_every_orphan",
            200,
            r#"<html><head><meta property="og:image" content="/media/eid.jpg"></head></html>"#,
        );
        let logic = ImageLogic::new(&client);

        let resolved = logic
            .resolve("https://www.launchgood.com/campaign/eid_for_every_orphan")
            .await
            .unwrap();
        assert_eq!(
            resolved.image.as_deref(),
            Some("https://www.launchgood.com/media/eid.jpg")
        );
        assert_eq!(
            client.requests.borrow()[0].2.get("User-Agent").map(String::as_str),
            Some(USER_AGENT)
        );
    }

    #[tokio::test]
    async fn test_resolve_image_upstream_error_yields_none() {
        let client = MockHttpClient::new();
        let logic = ImageLogic::new(&client);

        // 未 mock 的地址返回 404
        let resolved = logic
            .resolve("https://www.launchgood.com/campaign/gone")
            .await
            .unwrap();
        assert_eq!(resolved.image, None);

        let err = logic.resolve("https://localhost/").await.unwrap_err();
        assert_eq!(err.status, GivingErrorStatus::InvalidInput);
        assert_eq!(client.requests.borrow().len(), 1);
    }
}
