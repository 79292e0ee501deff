pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod editor;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod payments;
pub mod qr;
pub mod status;

#[cfg(not(target_arch = "wasm32"))]
pub mod transport;

#[cfg(target_arch = "wasm32")]
mod wasm_app;

#[cfg(target_arch = "wasm32")]
pub use wasm_app::*;


pub use api::{ApiError, ApiRequest, ApiResponse, DashboardClient, Method, Transport};
pub use auth::PasswordAuth;
pub use config::PageConfig;
pub use models::{Payment, PaymentStatus, PaymentsPage, StoreUpdate, StoreUpdateResponse};
pub use pagination::{page_controls, PageControl};
pub use payments::PaymentsQuery;

#[cfg(not(target_arch = "wasm32"))]
pub use transport::ReqwestTransport;
