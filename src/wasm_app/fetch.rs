use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

use crate::api::{ApiError, ApiRequest, ApiResponse, Transport};

use super::dom::{js_error_message, window};

pub(crate) struct FetchTransport {
    origin: String,
}

impl FetchTransport {
    pub(crate) fn new(origin: String) -> Self {
        Self { origin }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        fetch_request(&self.origin, request)
            .await
            .map_err(|err| ApiError::Transport(js_error_message(err, "Request failed")))
    }
}

async fn fetch_request(origin: &str, request: ApiRequest) -> Result<ApiResponse, JsValue> {
    let headers = Headers::new()?;
    headers.set("Accept", "application/json")?;

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_credentials(RequestCredentials::Include);
    if let Some(body) = &request.body {
        headers.set("Content-Type", "application/json")?;
        init.set_body(&JsValue::from_str(body));
    }
    if let Some(authorization) = &request.authorization {
        headers.set("Authorization", authorization)?;
    }
    init.set_headers(&headers);

    let url = format!("{}{}", origin, request.path);
    let request = Request::new_with_str_and_init(&url, &init)?;
    let response = JsFuture::from(window().fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?;
    Ok(ApiResponse {
        status,
        body: body.as_string().unwrap_or_default(),
    })
}
