// ABOUTME: HTTP client factory bound to the backend base URL
// ABOUTME: Builds anonymous or bearer-authenticated clients issuing GET and POST requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use healthapp_core::constants::defaults;
use healthapp_core::errors::{AppError, AppResult, ErrorCode};
use healthapp_core::models::BearerToken;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use super::endpoints::Endpoint;
use crate::config::ClientConfig;
use crate::logging::AppLogger;

const SERVICE: &str = "backend";

/// Produces API clients bound to one base URL
///
/// The underlying connection pool is shared by every client the factory
/// hands out. No timeout, retry, or caching is configured: whatever the
/// transport reports is surfaced to the caller.
#[derive(Debug, Clone)]
pub struct ApiFactory {
    base_url: Url,
    http: Client,
}

impl ApiFactory {
    /// Create a factory from client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let http = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Client without a credential header
    #[must_use]
    pub fn anonymous(&self) -> ApiClient {
        ApiClient {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: None,
        }
    }

    /// Client attaching `Authorization: Bearer <token>` to every request
    #[must_use]
    pub fn authenticated(&self, token: &BearerToken) -> ApiClient {
        ApiClient {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: Some(token.clone()),
        }
    }
}

/// Client issuing requests against the backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    token: Option<BearerToken>,
}

impl ApiClient {
    /// Whether requests carry a bearer token
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve an endpoint against the base URL, keeping any base path prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL is invalid
    pub fn url_for(&self, endpoint: &Endpoint) -> AppResult<Url> {
        let path = endpoint.path();
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::internal(format!("Invalid endpoint path {path}: {e}")))
    }

    /// GET an endpoint with optional query parameters
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an undecodable body
    pub async fn get(&self, endpoint: &Endpoint, query: &[(&str, &str)]) -> AppResult<Value> {
        self.get_json(endpoint, query).await
    }

    /// GET an endpoint and decode the body into `T`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an undecodable body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = self.url_for(endpoint)?;
        let builder = self.http.request(Method::GET, url).query(query);
        self.execute(Method::GET, endpoint, builder).await
    }

    /// POST a JSON body to an endpoint
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an undecodable body
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> AppResult<Value> {
        self.post_json(endpoint, body).await
    }

    /// POST a JSON body and decode the response into `T`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an undecodable body
    pub async fn post_json<B, T>(&self, endpoint: &Endpoint, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(endpoint)?;
        let builder = self.http.request(Method::POST, url).json(body);
        self.execute(Method::POST, endpoint, builder).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        if self.token.is_none() && !endpoint.is_public() {
            return Err(AppError::auth_required().with_resource_id(endpoint.path()));
        }
        let request_id = Uuid::new_v4().to_string();
        let path = endpoint.path();
        let mut builder = builder.header(defaults::REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose());
        }

        let started = Instant::now();
        let result = builder.send().await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_api_request(method.as_str(), &path, None, elapsed_ms, &request_id);
                return Err(AppError::from(e)
                    .with_request_id(request_id)
                    .with_resource_id(path));
            }
        };

        let status = response.status();
        AppLogger::log_api_request(
            method.as_str(),
            &path,
            Some(status.as_u16()),
            elapsed_ms,
            &request_id,
        );

        if !status.is_success() {
            return Err(status_error(status, &path, response)
                .await
                .with_request_id(request_id));
        }

        decode_body(response, &path)
            .await
            .map_err(|e| e.with_request_id(request_id))
    }
}

async fn status_error(status: StatusCode, path: &str, response: Response) -> AppError {
    let body = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
    let error = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST
            if path == Endpoint::Login.path() =>
        {
            AppError::auth_invalid(format!("Token grant rejected with {status}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::auth_invalid(format!("{path} rejected the credential with {status}"))
        }
        StatusCode::NOT_FOUND => AppError::not_found(path),
        _ => AppError::external_service(SERVICE, format!("{path} returned {status}")),
    };
    warn!(
        http.path = %path,
        http.status = status.as_u16(),
        code = ?error.code,
        "Backend returned an error status"
    );
    error.with_details(serde_json::json!({ "status": status.as_u16(), "body": details }))
}

async fn decode_body<T: DeserializeOwned>(response: Response, path: &str) -> AppResult<T> {
    let bytes = response.bytes().await?;
    // Empty 2xx bodies decode as JSON null
    let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(slice).map_err(|e| {
        AppError::new(
            ErrorCode::SerializationError,
            format!("Failed to decode response from {path}: {e}"),
        )
        .with_resource_id(path)
    })
}
