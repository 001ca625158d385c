use super::session::{StripeCheckoutSession, stripe_error};
use crate::error::{GivingError, GivingResult};
use crate::utils::request::{HttpClient, HttpMethod, HttpRequest};
use ramadan_giving_shared::payment::PaymentSessionProvider;
use ramadan_giving_shared::protocol::{CheckoutSession, CreateCheckoutSessionRequest, SessionStatus};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";
const STRIPE_API_VERSION: &str = "2025-03-31.basil";
/// Stripe 元数据值的长度上限
const METADATA_VALUE_LIMIT: usize = 500;

/// 会话创建时与部署相关的参数
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub product_name: String,
    /// 需要跳转的支付方式完成后回到这里，`{CHECKOUT_SESSION_ID}` 由 Stripe 替换
    pub return_url: String,
}

// =========================================================
// 表单构造
// =========================================================

// https://docs.stripe.com/api/checkout/sessions/create
//
// 嵌入式结算：ui_mode=embedded，返回 client_secret 交给前端 initEmbeddedCheckout。
// 月捐使用 subscription 模式 + recurring price_data。
pub fn checkout_form(
    req: &CreateCheckoutSessionRequest,
    settings: &CheckoutSettings,
) -> Vec<(&'static str, String)> {
    let recurring = req.frequency.is_recurring();
    let mut fields = vec![
        ("ui_mode", "embedded".to_string()),
        ("redirect_on_completion", "if_required".to_string()),
        ("return_url", settings.return_url.clone()),
        (
            "mode",
            if recurring { "subscription" } else { "payment" }.to_string(),
        ),
        ("line_items[0][quantity]", "1".to_string()),
        ("line_items[0][price_data][currency]", settings.currency.clone()),
        (
            "line_items[0][price_data][unit_amount]",
            req.amount.cents().to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]",
            settings.product_name.clone(),
        ),
        ("customer_email", req.donor.email.clone()),
        ("metadata[donor_name]", truncate(&req.donor.name)),
        ("metadata[anonymous]", req.donor.anonymous.to_string()),
        ("metadata[frequency]", req.frequency.label().to_string()),
    ];

    if recurring {
        fields.push((
            "line_items[0][price_data][recurring][interval]",
            "month".to_string(),
        ));
    } else {
        fields.push(("submit_type", "donate".to_string()));
    }
    if let Some(dedication) = &req.donor.dedication {
        fields.push(("metadata[dedication]", truncate(dedication)));
    }
    if let Some(campaign) = &req.campaign {
        fields.push(("metadata[campaign]", truncate(campaign)));
    }
    fields
}

fn truncate(value: &str) -> String {
    value.chars().take(METADATA_VALUE_LIMIT).collect()
}

// =========================================================
// 服务封装: StripeGateway
// =========================================================

/// 封装所有与 Stripe 交互的细节
pub struct StripeGateway<'a, C: HttpClient> {
    client: &'a C,
    secret_key: String,
    settings: CheckoutSettings,
}

impl<'a, C: HttpClient> StripeGateway<'a, C> {
    pub fn new(client: &'a C, secret_key: String, settings: CheckoutSettings) -> Self {
        Self {
            client,
            secret_key,
            settings,
        }
    }

    fn request(&self, url: &str, method: HttpMethod) -> HttpRequest {
        HttpRequest::new(url, method)
            .with_header("Authorization", &format!("Bearer {}", self.secret_key))
            .with_header("Stripe-Version", STRIPE_API_VERSION)
    }
}

#[async_trait::async_trait(?Send)]
impl<'a, C: HttpClient> PaymentSessionProvider for StripeGateway<'a, C> {
    type Error = GivingError;

    async fn create_session(
        &self,
        request: &CreateCheckoutSessionRequest,
    ) -> GivingResult<CheckoutSession> {
        let url = format!("{}/checkout/sessions", STRIPE_API_BASE);
        let req = self
            .request(&url, HttpMethod::Post)
            .with_form(checkout_form(request, &self.settings));

        let resp = self.client.send(req).await?;
        if !resp.is_success() {
            return Err(stripe_error(&resp, "stripe.create_session"));
        }
        resp.json::<StripeCheckoutSession>()?.into_checkout_session()
    }

    async fn session_status(&self, session_id: &str) -> GivingResult<SessionStatus> {
        let url = format!("{}/checkout/sessions/{}", STRIPE_API_BASE, session_id);
        let resp = self.client.send(self.request(&url, HttpMethod::Get)).await?;
        if !resp.is_success() {
            return Err(stripe_error(&resp, "stripe.retrieve_session"));
        }
        Ok(resp.json::<StripeCheckoutSession>()?.into_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GivingErrorStatus;
    use crate::utils::request::MockHttpClient;
    use ramadan_giving_shared::protocol::CheckoutStatus;
    use ramadan_giving_shared::{Amount, DonationFrequency, DonorDetails};
    use serde_json::json;

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            currency: "usd".into(),
            product_name: "Ramadan Giving donation".into(),
            return_url: "https://ramadangiving.org/donate/?session_id={CHECKOUT_SESSION_ID}".into(),
        }
    }

    fn donation(frequency: DonationFrequency) -> CreateCheckoutSessionRequest {
        CreateCheckoutSessionRequest {
            amount: Amount::from_dollars(50),
            frequency,
            donor: DonorDetails {
                name: "A. Example".into(),
                email: "a@example.org".into(),
                anonymous: false,
                dedication: Some("For my parents".into()),
            },
            campaign: Some("iftar-meals".into()),
        }
    }

    #[tokio::test]
    async fn test_create_one_time_session() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.stripe.com/v1/checkout/sessions",
            200,
            json!({ "id": "cs_test_1", "client_secret": "cs_test_1_secret_x", "payment_status": "unpaid", "status": "open" }),
        );

        let gateway = StripeGateway::new(&client, "sk_test_123".into(), settings());
        let session = gateway
            .create_session(&donation(DonationFrequency::OneTime))
            .await
            .unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.client_secret, "cs_test_1_secret_x");

        let reqs = client.requests.borrow();
        assert_eq!(reqs[0].1, "Post");
        assert_eq!(
            reqs[0].2.get("Authorization").map(String::as_str),
            Some("Bearer sk_test_123")
        );
        assert_eq!(
            reqs[0].2.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        drop(reqs);

        let form = client.form_of(0);
        assert_eq!(form["ui_mode"], "embedded");
        assert_eq!(form["mode"], "payment");
        assert_eq!(form["submit_type"], "donate");
        assert_eq!(form["line_items[0][price_data][unit_amount]"], "5000");
        assert_eq!(form["line_items[0][price_data][currency]"], "usd");
        assert_eq!(form["customer_email"], "a@example.org");
        assert_eq!(form["metadata[campaign]"], "iftar-meals");
        assert_eq!(form["metadata[dedication]"], "For my parents");
        assert_eq!(
            form["return_url"],
            "https://ramadangiving.org/donate/?session_id={CHECKOUT_SESSION_ID}"
        );
        assert!(!form.contains_key("line_items[0][price_data][recurring][interval]"));
    }

    #[test]
    fn test_monthly_donation_uses_subscription_mode() {
        let form: std::collections::HashMap<_, _> =
            checkout_form(&donation(DonationFrequency::Monthly), &settings())
                .into_iter()
                .collect();
        assert_eq!(form["mode"], "subscription");
        assert_eq!(form["line_items[0][price_data][recurring][interval]"], "month");
        // submit_type 只适用于 payment 模式
        assert!(!form.contains_key("submit_type"));
    }

    #[test]
    fn test_metadata_values_are_truncated() {
        let mut req = donation(DonationFrequency::OneTime);
        req.donor.dedication = Some("x".repeat(800));
        let form: std::collections::HashMap<_, _> =
            checkout_form(&req, &settings()).into_iter().collect();
        assert_eq!(form["metadata[dedication]"].len(), METADATA_VALUE_LIMIT);
    }

    #[tokio::test]
    async fn test_stripe_rejection_surfaces_message() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.stripe.com/v1/checkout/sessions",
            400,
            json!({ "error": { "message": "Invalid email address", "type": "invalid_request_error" } }),
        );

        let gateway = StripeGateway::new(&client, "sk_test_123".into(), settings());
        let err = gateway
            .create_session(&donation(DonationFrequency::OneTime))
            .await
            .unwrap_err();
        assert_eq!(err.status, GivingErrorStatus::ExternalApi);
        assert_eq!(err.message(), "Invalid email address");
    }

    #[tokio::test]
    async fn test_retrieve_session_status() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.stripe.com/v1/checkout/sessions/cs_test_1",
            200,
            json!({ "id": "cs_test_1", "status": "complete", "payment_status": "paid", "amount_total": 5000 }),
        );

        let gateway = StripeGateway::new(&client, "sk_test_123".into(), settings());
        let status = gateway.session_status("cs_test_1").await.unwrap();
        assert_eq!(status.status, CheckoutStatus::Complete);
        assert!(status.is_successful());
        assert_eq!(client.requests.borrow()[0].1, "Get");
    }
}
