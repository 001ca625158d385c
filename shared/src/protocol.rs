use crate::{Amount, DonationFrequency, DonorDetails};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Checkout
// =========================================================

/// Ask the backend to open a hosted checkout session for a donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutSessionRequest {
    pub amount: Amount,
    pub frequency: DonationFrequency,
    pub donor: DonorDetails,
    /// Campaign slug the gift is earmarked for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
}

impl ApiRequest for CreateCheckoutSessionRequest {
    type Response = CheckoutSession;
    const PATH: &'static str = "/api/checkout/sessions";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// What the embedded widget needs to mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub client_secret: String,
}

/// Sent as the `id` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusRequest {
    pub id: String,
}

impl ApiRequest for SessionStatusRequest {
    type Response = SessionStatus;
    const PATH: &'static str = "/api/checkout/sessions/status";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Open,
    Complete,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub id: String,
    pub status: CheckoutStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub amount_total: Option<Amount>,
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Derived from the checkout mode (`subscription` means monthly).
    #[serde(default)]
    pub frequency: DonationFrequency,
}

impl SessionStatus {
    /// The donor finished checkout. Only `open` and `expired` sessions may be retried.
    pub fn is_successful(&self) -> bool {
        self.status == CheckoutStatus::Complete
    }

    /// Finished, but a delayed-notification method (e.g. US bank debit) has not settled yet.
    pub fn is_processing(&self) -> bool {
        self.is_successful() && self.payment_status == PaymentStatus::Unpaid
    }
}

// =========================================================
// Image resolution
// =========================================================

/// Sent as the `url` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveImageRequest {
    pub url: String,
}

impl ApiRequest for ResolveImageRequest {
    type Response = ResolvedImage;
    const PATH: &'static str = "/api/images/resolve";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImage {
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_wire_format() {
        let req = CreateCheckoutSessionRequest {
            amount: Amount::from_dollars(50),
            frequency: DonationFrequency::Monthly,
            donor: DonorDetails {
                name: "A. Example".into(),
                email: "a@example.org".into(),
                anonymous: false,
                dedication: None,
            },
            campaign: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["amount"], 5000);
        assert_eq!(value["frequency"], "monthly");
        assert_eq!(value["donor"]["email"], "a@example.org");
        assert!(value.get("campaign").is_none());
        assert!(value["donor"].get("dedication").is_none());
    }

    #[test]
    fn test_session_status_success_rules() {
        let mut status: SessionStatus = serde_json::from_str(
            r#"{"id":"cs_1","status":"complete","payment_status":"paid","amount_total":5000}"#,
        )
        .unwrap();
        assert!(status.is_successful());
        assert!(!status.is_processing());
        assert_eq!(status.amount_total, Some(Amount::from_dollars(50)));
        assert_eq!(status.frequency, DonationFrequency::OneTime);

        status.status = CheckoutStatus::Open;
        assert!(!status.is_successful());

        status.status = CheckoutStatus::Expired;
        assert!(!status.is_successful());
    }

    #[test]
    fn test_delayed_settlement_counts_as_complete() {
        let status: SessionStatus = serde_json::from_str(
            r#"{"id":"cs_1","status":"complete","payment_status":"unpaid","frequency":"monthly"}"#,
        )
        .unwrap();
        assert!(status.is_successful());
        assert!(status.is_processing());
        assert_eq!(status.frequency, DonationFrequency::Monthly);
    }
}
