use tracing::error;

use crate::api::{ApiError, DashboardClient, Transport};
use crate::auth::PasswordAuth;
use crate::constants::{
    EMAIL_CHANGED_MESSAGE, GENERIC_ERROR_MESSAGE, PASSWORD_CHANGED_MESSAGE,
    STORES_DASHBOARD_PATH, STORE_KEYS_GENERATED_MESSAGE, WEBHOOK_SECRET_GENERATED_MESSAGE,
};
use crate::models::{ChangePasswordRequest, Payment, StoreUpdate};
use crate::pagination::{page_controls, PageControl};
use crate::payments::PaymentsQuery;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
}

impl Tone {
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Danger => "alert-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub tone: Tone,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Success,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Danger,
        }
    }
}

pub fn failure_message(err: &ApiError) -> String {
    match err.server_message() {
        Some(message) => message.to_string(),
        None => {
            error!(error = %err, "request failed");
            GENERIC_ERROR_MESSAGE.to_string()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeEmailForm {
    pub new_email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEmailOutcome {
    pub alert: Alert,
    pub displayed_email: Option<String>,
}

pub async fn submit_change_email<T: Transport>(
    client: &DashboardClient<T>,
    form: &mut ChangeEmailForm,
) -> ChangeEmailOutcome {
    let result = client.change_email(&form.new_email, &form.password).await;
    form.password.clear();

    match result {
        Ok(()) => ChangeEmailOutcome {
            alert: Alert::success(EMAIL_CHANGED_MESSAGE),
            displayed_email: Some(form.new_email.clone()),
        },
        Err(err) => ChangeEmailOutcome {
            alert: Alert::danger(failure_message(&err)),
            displayed_email: None,
        },
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl ChangePasswordForm {
    fn clear(&mut self) {
        self.old_password.clear();
        self.new_password.clear();
        self.confirm_new_password.clear();
    }
}

pub async fn submit_change_password<T: Transport>(
    client: &DashboardClient<T>,
    form: &mut ChangePasswordForm,
) -> Alert {
    let result = client
        .change_password(&ChangePasswordRequest {
            old_password: &form.old_password,
            new_password: &form.new_password,
            confirm_new_password: &form.confirm_new_password,
        })
        .await;
    form.clear();

    match result {
        Ok(()) => Alert::success(PASSWORD_CHANGED_MESSAGE),
        Err(err) => Alert::danger(failure_message(&err)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldOutcome {
    Saved { value: String },
    Invalid { feedback: String },
}

pub async fn submit_view_key<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    view_key: &str,
    auth: &PasswordAuth,
) -> FieldOutcome {
    let update = StoreUpdate::ViewKey(view_key.to_string());
    match client.update_store(store_id, &update, auth).await {
        Ok(response) => FieldOutcome::Saved {
            value: response.view_key.unwrap_or_default(),
        },
        Err(err) => FieldOutcome::Invalid {
            feedback: failure_message(&err),
        },
    }
}

pub async fn submit_webhook<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    webhook: &str,
    auth: &PasswordAuth,
) -> FieldOutcome {
    let update = StoreUpdate::Webhook(webhook.to_string());
    match client.update_store(store_id, &update, auth).await {
        Ok(response) => FieldOutcome::Saved {
            value: response.webhook.unwrap_or_default(),
        },
        Err(err) => FieldOutcome::Invalid {
            feedback: failure_message(&err),
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreKeysOutcome {
    pub alert: Alert,
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
}

pub async fn regenerate_store_keys<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    auth: &PasswordAuth,
) -> StoreKeysOutcome {
    match client
        .update_store(store_id, &StoreUpdate::NewStoreKeys, auth)
        .await
    {
        Ok(response) => StoreKeysOutcome {
            alert: Alert::success(STORE_KEYS_GENERATED_MESSAGE),
            api_key: response.api_key.filter(|key| !key.is_empty()),
            secret_key: response.secret_key.filter(|key| !key.is_empty()),
        },
        Err(err) => StoreKeysOutcome {
            alert: Alert::danger(failure_message(&err)),
            api_key: None,
            secret_key: None,
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebhookSecretOutcome {
    pub alert: Alert,
    pub webhook_secret_key: Option<String>,
}

pub async fn regenerate_webhook_secret<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    auth: &PasswordAuth,
) -> WebhookSecretOutcome {
    match client
        .update_store(store_id, &StoreUpdate::NewWebhookSecretKey, auth)
        .await
    {
        Ok(response) => WebhookSecretOutcome {
            alert: Alert::success(WEBHOOK_SECRET_GENERATED_MESSAGE),
            webhook_secret_key: response.webhook_secret_key.filter(|key| !key.is_empty()),
        },
        Err(err) => WebhookSecretOutcome {
            alert: Alert::danger(failure_message(&err)),
            webhook_secret_key: None,
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoveStoreOutcome {
    Redirect(String),
    Failed(String),
}

pub async fn remove_store<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    auth: &PasswordAuth,
) -> RemoveStoreOutcome {
    match client.remove_store(store_id, auth).await {
        Ok(()) => RemoveStoreOutcome::Redirect(STORES_DASHBOARD_PATH.to_string()),
        Err(err) => RemoveStoreOutcome::Failed(failure_message(&err)),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaymentsOutcome {
    Loaded {
        payments: Vec<Payment>,
        controls: Vec<PageControl>,
    },
    /// The backend refused the query: the table and pagination are reset.
    Rejected { message: String },
    /// The request never completed: the current table is left alone.
    Failed { message: String },
}

pub async fn load_payments<T: Transport>(
    client: &DashboardClient<T>,
    store_id: &str,
    query: &PaymentsQuery,
) -> PaymentsOutcome {
    match client.fetch_payments(store_id, query).await {
        Ok(page) => PaymentsOutcome::Loaded {
            controls: page_controls(page.page, page.total_pages),
            payments: page.payments.unwrap_or_default(),
        },
        Err(err @ ApiError::Server { .. }) | Err(err @ ApiError::UnexpectedStatus(_)) => {
            PaymentsOutcome::Rejected {
                message: failure_message(&err),
            }
        }
        Err(err) => PaymentsOutcome::Failed {
            message: failure_message(&err),
        },
    }
}
