use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    // Missing or unrecognised statuses are shown as pending.
    Paid,
    Expired,
    Error,
    #[default]
    #[serde(other)]
    Pending,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Expired => "expired",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "expired" => Some(Self::Expired),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn row_class(self) -> &'static str {
        match self {
            Self::Pending => "table-primary",
            Self::Paid => "table-success",
            Self::Expired => "table-secondary",
            Self::Error => "table-danger",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::Pending => "text-primary",
            Self::Paid => "text-success",
            Self::Expired => "text-secondary",
            Self::Error => "text-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "creationTime", default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(rename = "deroAmount", default)]
    pub dero_amount: String,
    #[serde(rename = "paymentID", default)]
    pub payment_id: String,
    #[serde(rename = "integratedAddress", default)]
    pub integrated_address: String,
    #[serde(rename = "atomicDeroAmount", default)]
    pub atomic_dero_amount: u64,
    #[serde(default)]
    pub currency: String,
    #[serde(rename = "currencyAmount", default)]
    pub currency_amount: f64,
    #[serde(rename = "exchangeRate", default)]
    pub exchange_rate: f64,
    #[serde(default)]
    pub ttl: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsPage {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_payments: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub payments: Option<Vec<Payment>>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmailRequest<'a> {
    pub new_email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
    pub confirm_new_password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreUpdate {
    ViewKey(String),
    NewStoreKeys,
    Webhook(String),
    NewWebhookSecretKey,
}

impl StoreUpdate {
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            Self::ViewKey(view_key) => serde_json::json!({ "viewKey": view_key }),
            Self::NewStoreKeys => serde_json::json!({ "newStoreKeys": true }),
            Self::Webhook(webhook) => serde_json::json!({ "webhook": webhook }),
            Self::NewWebhookSecretKey => serde_json::json!({ "newWebhookSecretKey": true }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUpdateResponse {
    pub view_key: Option<String>,
    pub webhook: Option<String>,
    pub webhook_secret_key: Option<String>,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
}
