use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::PasswordAuth;
use crate::models::{
    ChangeEmailRequest, ChangePasswordRequest, ErrorBody, PaymentsPage, StoreUpdate,
    StoreUpdateResponse,
};
use crate::payments::PaymentsQuery;

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub authorization: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            authorization: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            ..Self::get(path)
        }
    }

    pub fn put_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::Put,
            body: Some(serde_json::to_string(body)?),
            ..Self::get(path)
        })
    }

    pub fn with_password(mut self, auth: &PasswordAuth) -> Self {
        self.authorization = Some(auth.header_value());
        self
    }
}

#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    fn into_error(self) -> ApiError {
        match serde_json::from_str::<ErrorBody>(&self.body) {
            Ok(body) => ApiError::Server {
                status: self.status,
                message: body.error.message,
            },
            Err(_) => ApiError::UnexpectedStatus(self.status),
        }
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct DashboardClient<T> {
    transport: T,
}

impl<T: Transport> DashboardClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn exchange(&self, request: ApiRequest, expected: u16) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        debug!(method = method.as_str(), path = %path, "dashboard request");
        let response = self.transport.send(request).await?;
        if response.status == expected {
            return Ok(response);
        }
        let error = response.into_error();
        warn!(method = method.as_str(), path = %path, %error, "dashboard request rejected");
        Err(error)
    }

    pub async fn change_email(&self, new_email: &str, password: &str) -> Result<(), ApiError> {
        let request = ApiRequest::put_json(
            "/user",
            &ChangeEmailRequest {
                new_email,
                password,
            },
        )?;
        self.exchange(request, STATUS_NO_CONTENT).await.map(|_| ())
    }

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest<'_>,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put_json("/user", request)?;
        self.exchange(request, STATUS_NO_CONTENT).await.map(|_| ())
    }

    pub async fn fetch_payments(
        &self,
        store_id: &str,
        query: &PaymentsQuery,
    ) -> Result<PaymentsPage, ApiError> {
        let path = format!("/store/{}/payments{}", store_id, query.to_query_string());
        let response = self.exchange(ApiRequest::get(path), STATUS_OK).await?;
        response.json()
    }

    pub async fn update_store(
        &self,
        store_id: &str,
        update: &StoreUpdate,
        auth: &PasswordAuth,
    ) -> Result<StoreUpdateResponse, ApiError> {
        let request = ApiRequest::put_json(format!("/store/{}", store_id), &update.to_body())?
            .with_password(auth);
        let response = self.exchange(request, STATUS_OK).await?;
        response.json()
    }

    pub async fn remove_store(&self, store_id: &str, auth: &PasswordAuth) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("/store/{}", store_id)).with_password(auth);
        self.exchange(request, STATUS_NO_CONTENT).await.map(|_| ())
    }
}
