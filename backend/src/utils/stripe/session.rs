use crate::error::{GivingError, GivingResult};
use crate::utils::request::HttpResponse;
use ramadan_giving_shared::{Amount, DonationFrequency};
use ramadan_giving_shared::protocol::{CheckoutSession, CheckoutStatus, PaymentStatus, SessionStatus};
use serde::Deserialize;

// https://docs.stripe.com/api/checkout/sessions/object
#[derive(Debug, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Stripe 中可为 null
    #[serde(default)]
    pub status: Option<CheckoutStatus>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub mode: Option<StripeMode>,
    #[serde(default)]
    pub amount_total: Option<u64>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripeMode {
    Payment,
    Subscription,
    Setup,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

impl StripeCheckoutSession {
    pub fn into_checkout_session(self) -> GivingResult<CheckoutSession> {
        let client_secret = self.client_secret.ok_or_else(|| {
            GivingError::external_api("Checkout session has no client_secret (ui_mode must be embedded)")
                .in_op_with("stripe.session", self.id.clone())
        })?;
        Ok(CheckoutSession {
            id: self.id,
            client_secret,
        })
    }

    pub fn into_status(self) -> SessionStatus {
        let customer_email = self
            .customer_details
            .and_then(|d| d.email)
            .or(self.customer_email);
        SessionStatus {
            id: self.id,
            status: self.status.unwrap_or(CheckoutStatus::Open),
            payment_status: self.payment_status,
            amount_total: self.amount_total.map(Amount::from_cents),
            customer_email,
            frequency: match self.mode {
                Some(StripeMode::Subscription) => DonationFrequency::Monthly,
                _ => DonationFrequency::OneTime,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// 将 Stripe 的非 2xx 响应映射为领域错误
pub fn stripe_error(resp: &HttpResponse, operation: &str) -> GivingError {
    let detail = serde_json::from_str::<StripeErrorBody>(&resp.body)
        .ok()
        .map(|b| {
            let message = b.error.message.unwrap_or_else(|| "unknown error".to_string());
            match b.error.code {
                Some(code) => format!("{} ({})", message, code),
                None => message,
            }
        })
        .unwrap_or_else(|| format!("HTTP {}", resp.status));

    let err = if resp.status == 404 {
        GivingError::not_found(detail)
    } else {
        GivingError::external_api(detail)
    };
    err.in_op(operation.to_string())
}
