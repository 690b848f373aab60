use crate::domain::settings::{GatewayKind, PaymentSettings};
use crate::error::{AppError, FieldError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "USD";

const COD_MESSAGE: &str = "Manual/UPI selected. No online payment required.";
const NOT_CONFIGURED_MESSAGE: &str = "Gateway not configured. Add keys in /payments page.";
const PLACEHOLDER_MESSAGE: &str = "Integration scaffold ready. Add keys and we will enable live redirect.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub method: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

impl CheckoutRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut fields = Vec::new();
        if self.method.trim().is_empty() {
            fields.push(FieldError::new("method", "must not be blank"));
        }
        for (i, item) in self.items.iter().enumerate() {
            if !item.price.is_finite() || item.price < 0.0 {
                fields.push(FieldError::new(format!("items[{i}].price"), "must be a number >= 0"));
            }
            if item.qty < 1 {
                fields.push(FieldError::new(format!("items[{i}].qty"), "must be >= 1"));
            }
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation { fields })
        }
    }

    pub fn currency(&self) -> String {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMethod {
    CashOnDelivery,
    Gateway(GatewayKind),
}

impl CheckoutMethod {
    /// Lower-cases `raw`; anything other than `cod` or a known gateway is rejected.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let method = raw.trim().to_lowercase();
        if method == "cod" {
            return Ok(CheckoutMethod::CashOnDelivery);
        }
        method
            .parse::<GatewayKind>()
            .map(CheckoutMethod::Gateway)
            .map_err(AppError::UnsupportedMethod)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMethod::CashOnDelivery => "cod",
            CheckoutMethod::Gateway(kind) => kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    Mock,
    NotConfigured,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub status: CheckoutStatus,
    pub method: String,
    pub message: String,
    pub amount: f64,
    pub currency: String,
}

/// Σ price × qty rounded to cents. A total that overflows `f64` is rejected.
pub fn order_amount(items: &[CheckoutItem]) -> Result<f64, AppError> {
    let total: f64 = items.iter().map(|i| i.price * i.qty as f64).sum();
    if !total.is_finite() {
        return Err(AppError::Validation {
            fields: vec![FieldError::new("items", "order total is too large")],
        });
    }
    Ok(round2(total))
}

/// Half-cent ties go to the even cent.
fn round2(v: f64) -> f64 {
    // No fractional cents survive at this magnitude, and ×100 could overflow.
    if v.abs() >= 1e15 {
        return v;
    }
    (v * 100.0).round_ties_even() / 100.0
}

/// Decides the session response for `method`. Cash on delivery needs no
/// settings; a gateway without settings counts as not configured.
/// Never contacts a provider.
pub fn dispatch(
    method: CheckoutMethod,
    amount: f64,
    currency: String,
    settings: Option<&PaymentSettings>,
) -> CheckoutSessionResponse {
    let (status, message) = match method {
        CheckoutMethod::CashOnDelivery => (CheckoutStatus::Mock, COD_MESSAGE),
        CheckoutMethod::Gateway(kind) => {
            if settings.is_some_and(|s| s.gateway(kind).is_configured(kind)) {
                // Replaced by a live session call once provider integration lands.
                (CheckoutStatus::Placeholder, PLACEHOLDER_MESSAGE)
            } else {
                (CheckoutStatus::NotConfigured, NOT_CONFIGURED_MESSAGE)
            }
        }
    };

    CheckoutSessionResponse {
        status,
        method: method.as_str().to_string(),
        message: message.to_string(),
        amount,
        currency,
    }
}
