pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while sending the request.";

pub const EMAIL_CHANGED_MESSAGE: &str =
    "Email changed successfully. A verification link will be sent to your new address shortly.";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully.";
pub const STORE_KEYS_GENERATED_MESSAGE: &str = "New store keys generated successfully.";
pub const WEBHOOK_SECRET_GENERATED_MESSAGE: &str =
    "New Webhook Secret Key generated successfully.";

pub const PASSWORD_PROMPT: &str = "Type your password to proceed";
pub const PASSWORD_AUTH_SCHEME: &str = "Password";

pub const STORES_DASHBOARD_PATH: &str = "/dashboard/stores";

pub const DEFAULT_PAYMENTS_LIMIT: u32 = 10;
pub const DEFAULT_PAYMENTS_PAGE: u32 = 1;
pub const PAYMENT_TABLE_COLUMNS: usize = 10;

pub const STORE_ID_META: &str = "store-id";
pub const PAYMENT_ID_META: &str = "payment-id";

pub const COUNTDOWN_TICK_MS: u32 = 60_000;
pub const COPY_FEEDBACK_MS: u32 = 1200;
pub const QR_MIN_DIMENSION: u32 = 200;
