use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const SETTINGS_ID: &str = "settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    Stripe,
    Sslcommerz,
    Paypal,
}

impl GatewayKind {
    pub const ALL: [GatewayKind; 3] = [GatewayKind::Stripe, GatewayKind::Sslcommerz, GatewayKind::Paypal];

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayKind::Stripe => "stripe",
            GatewayKind::Sslcommerz => "sslcommerz",
            GatewayKind::Paypal => "paypal",
        }
    }

    /// Credential keys that must be present and non-empty before checkout
    /// treats the gateway as configured.
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            GatewayKind::Stripe => &["secretKey"],
            GatewayKind::Sslcommerz => &["storeId", "storePassword"],
            GatewayKind::Paypal => &["clientId", "secret"],
        }
    }
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatewayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stripe" => Ok(GatewayKind::Stripe),
            "sslcommerz" => Ok(GatewayKind::Sslcommerz),
            "paypal" => Ok(GatewayKind::Paypal),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Gateway {
    pub fn is_configured(&self, kind: GatewayKind) -> bool {
        self.enabled
            && kind
                .required_keys()
                .iter()
                .all(|k| self.data.get(*k).is_some_and(|v| !v.is_empty()))
    }

    /// `enabled` is replaced when supplied; `data` entries are merged key by key.
    pub fn merge(&mut self, update: GatewayUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(data) = update.data {
            self.data.extend(data);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    #[serde(default = "default_settings_id")]
    pub id: String,
    pub stripe: Gateway,
    pub sslcommerz: Gateway,
    pub paypal: Gateway,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_settings_id() -> String {
    SETTINGS_ID.to_string()
}

impl PaymentSettings {
    /// The document written on first read: every gateway disabled with no credentials.
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            stripe: Gateway::default(),
            sslcommerz: Gateway::default(),
            paypal: Gateway::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn gateway(&self, kind: GatewayKind) -> &Gateway {
        match kind {
            GatewayKind::Stripe => &self.stripe,
            GatewayKind::Sslcommerz => &self.sslcommerz,
            GatewayKind::Paypal => &self.paypal,
        }
    }

    pub fn gateway_mut(&mut self, kind: GatewayKind) -> &mut Gateway {
        match kind {
            GatewayKind::Stripe => &mut self.stripe,
            GatewayKind::Sslcommerz => &mut self.sslcommerz,
            GatewayKind::Paypal => &mut self.paypal,
        }
    }

    /// Applies a partial update in place. Gateways absent from `update` are
    /// untouched; `updated_at` always moves to `now`.
    pub fn apply(&mut self, update: PaymentSettingsUpdate, now: DateTime<Utc>) {
        for (kind, gw) in update.into_entries() {
            self.gateway_mut(kind).merge(gw);
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettingsUpdate {
    #[serde(default)]
    pub stripe: Option<GatewayUpdate>,
    #[serde(default)]
    pub sslcommerz: Option<GatewayUpdate>,
    #[serde(default)]
    pub paypal: Option<GatewayUpdate>,
}

impl PaymentSettingsUpdate {
    pub fn touched(&self) -> Vec<GatewayKind> {
        GatewayKind::ALL
            .into_iter()
            .filter(|k| match k {
                GatewayKind::Stripe => self.stripe.is_some(),
                GatewayKind::Sslcommerz => self.sslcommerz.is_some(),
                GatewayKind::Paypal => self.paypal.is_some(),
            })
            .collect()
    }

    fn into_entries(self) -> Vec<(GatewayKind, GatewayUpdate)> {
        [
            (GatewayKind::Stripe, self.stripe),
            (GatewayKind::Sslcommerz, self.sslcommerz),
            (GatewayKind::Paypal, self.paypal),
        ]
        .into_iter()
        .filter_map(|(k, u)| u.map(|u| (k, u)))
        .collect()
    }
}
