//! HTTP request client for the forum backend.
//!
//! Every call goes through [`ApiClient::build_request`] and
//! [`ApiClient::execute`], which attach the JSON content type and bearer
//! token and turn every failure into a typed [`ApiError`]. Nothing is
//! swallowed: callers always receive either the parsed body or an error.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{multipart, Client, Method, Request, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{ApiError, ApiResult};
use crate::session::SessionPersistence;
use crate::util::compact_text;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Never attach the token.
    Public,
    /// Attach the token when one is stored; send anonymously otherwise.
    Optional,
    /// Refuse to send without a stored token.
    Required,
}

/// Typed client for the forum REST API.
#[derive(Clone)]
pub struct ApiClient<S: SessionPersistence> {
    base_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> ApiClient<S> {
    pub fn new(config: &ClientConfig, store: S) -> ApiResult<Self> {
        let base_url = normalize_base_url(&config.api_base_url)?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url,
            client,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn session_store(&self) -> &S {
        &self.store
    }

    /// True when a non-blank token is stored.
    pub fn is_signed_in(&self) -> ApiResult<bool> {
        Ok(self.store.token()?.is_some())
    }

    /// Builds a JSON request for `path` (relative to the base URL).
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> ApiResult<Request> {
        let request = self
            .client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        Ok(self.authorize(request, auth)?.build()?)
    }

    /// Builds the multipart upload request for an image file.
    pub fn build_upload_request(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<Request> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())?;
        let form = multipart::Form::new().part("image", part);
        Ok(self
            .client
            .post(self.url("/upload"))
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .multipart(form)
            .build()?)
    }

    /// Sends a built request and decodes the JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!("{} {}", method, url);

        let result = self.dispatch(request).await;
        if let Err(error) = &result {
            tracing::warn!("Request {} {} failed: {}", method, url, error);
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> ApiResult<T> {
        let request = self.build_request::<Value>(Method::GET, path, None, auth)?;
        self.execute(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> ApiResult<T> {
        let request = self.build_request(Method::POST, path, Some(body), auth)?;
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorize(&self, request: RequestBuilder, auth: Auth) -> ApiResult<RequestBuilder> {
        match auth {
            Auth::Public => Ok(request),
            Auth::Optional => Ok(match self.store.token()? {
                Some(token) => request.bearer_auth(token),
                None => request,
            }),
            Auth::Required => {
                let token = self.store.token()?.ok_or(ApiError::AuthRequired)?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(
                status.as_u16(),
                parse_error_message(status, &body),
            ));
        }
        decode_body(&body)
    }
}

/// Parses a success body, honouring a failure `status` inside the envelope.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(status) = value.get("status").and_then(Value::as_u64) {
        if !(200..300).contains(&status) {
            let status = u16::try_from(status).unwrap_or(u16::MAX);
            let message = envelope_message(&value).unwrap_or_else(|| format!("status {status}"));
            return Err(ApiError::from_status(status, message));
        }
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

fn envelope_message(value: &Value) -> Option<String> {
    let body = ErrorBody::deserialize(value).ok()?;
    body.message
        .or(body.error)
        .or(body.msg)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = envelope_message(&value) {
            return message;
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}
