use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ClientError;
use crate::auth::TokenRefresher;
use crate::config::ApiConfig;
use crate::store::TokenStore;
use crate::utils::http_helpers::{bearer, error_from_response, extract_detail, read_json};

/// A request as the caller describes it, before any credentials are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A request travelling through the gateway together with its one-shot
/// retry marker. Once `already_retried` is set, a 401 is final.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoritativeRequest {
    pub request: ApiRequest,
    pub already_retried: bool,
}

impl AuthoritativeRequest {
    pub fn new(request: ApiRequest) -> Self {
        AuthoritativeRequest {
            request,
            already_retried: false,
        }
    }

    pub fn mark_retried(self) -> Self {
        AuthoritativeRequest {
            already_retried: true,
            ..self
        }
    }
}

/// The single request pipeline for data calls.
///
/// Outbound, the current access token (if any) is read from the store and
/// attached as a bearer credential. Inbound, a 401 on a request that has not
/// been retried triggers exactly one refresh; if that succeeds the request is
/// sent once more with the new token, otherwise the failure surfaces as
/// [`ClientError::SessionExpired`].
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    api: ApiConfig,
    store: Arc<dyn TokenStore>,
    refresher: TokenRefresher,
}

impl HttpGateway {
    pub fn new(
        client: reqwest::Client,
        api: &ApiConfig,
        store: Arc<dyn TokenStore>,
        refresher: TokenRefresher,
    ) -> Self {
        HttpGateway {
            client,
            api: api.clone(),
            store,
            refresher,
        }
    }

    /// Sends the request and returns the 2xx response.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        let mut attempt = AuthoritativeRequest::new(request);
        loop {
            let response = self.dispatch(&attempt.request).await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status != StatusCode::UNAUTHORIZED || attempt.already_retried {
                debug!(
                    event_name = "gateway.request.failed",
                    event_domain = "gateway",
                    method = %attempt.request.method,
                    path = attempt.request.path.as_str(),
                    status = status.as_u16(),
                    retried = attempt.already_retried,
                    "request failed"
                );
                return Err(error_from_response(response).await);
            }

            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(status, &body);
            attempt = attempt.mark_retried();
            info!(
                event_name = "gateway.refresh.triggered",
                event_domain = "gateway",
                method = %attempt.request.method,
                path = attempt.request.path.as_str(),
                "access token rejected, attempting silent refresh"
            );

            if !self.refresher.refresh().await {
                warn!(
                    event_name = "gateway.refresh.failed",
                    event_domain = "gateway",
                    path = attempt.request.path.as_str(),
                    "silent refresh failed, session is over"
                );
                return Err(ClientError::SessionExpired { detail });
            }
            // Loop once more: the outbound step re-reads the store and picks
            // up the new access token.
        }
    }

    /// Sends the request and decodes the JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        read_json(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::put(path).json(body)?).await
    }

    /// Deletes and ignores whatever body comes back.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.api.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(access_token) = self.store.get().access_token {
            builder = builder.header(AUTHORIZATION, bearer(&access_token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }
}
