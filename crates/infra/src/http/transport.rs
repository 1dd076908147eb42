//! reqwest-backed implementation of the `HttpTransport` port

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use storefront_core::{
    ApiRequest, ApiResponse, FormPart, HttpMethod, HttpTransport, RequestBody, TransportError,
};
use storefront_domain::{ApiConfig, Result, StorefrontError};
use url::Url;

use super::client::HttpClient;
use crate::errors::IntoTransportError;

/// Sends [`ApiRequest`]s relative to a fixed base URL
#[derive(Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
    base_url: Url,
}

impl ReqwestTransport {
    /// # Errors
    /// Returns `StorefrontError::Config` when `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StorefrontError::Config(format!("Invalid base URL '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(StorefrontError::Config(format!(
                "Base URL must be http(s), got '{base_url}'"
            )));
        }
        Ok(Self { http, base_url })
    }

    /// Build the transport and its HTTP client from API settings.
    ///
    /// # Errors
    /// Returns `StorefrontError::Config` for an invalid base URL or client
    /// settings.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        let mut builder =
            HttpClient::builder().timeout(api.timeout()).max_attempts(api.max_attempts);
        if let Some(agent) = &api.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Self::new(builder.build()?, &api.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a path; the base URL's own path is kept as a prefix.
    fn url_for(&self, path: &str) -> std::result::Result<Url, TransportError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| TransportError::InvalidRequest(format!("invalid URL '{joined}': {e}")))
    }

    fn build(&self, request: ApiRequest) -> std::result::Result<RequestBuilder, TransportError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.http.request(to_method(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(to_form(parts)?),
        };
        Ok(builder)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let retryable = request.method.is_idempotent();
        let builder = self.build(request)?;
        let response = self.http.send(builder, retryable).await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(IntoTransportError::into_transport)?;

        Ok(ApiResponse { status, headers, body: body.to_vec() })
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_form(parts: Vec<FormPart>) -> std::result::Result<Form, TransportError> {
    let mut form = Form::new();
    for part in parts {
        let mut body = Part::bytes(part.data);
        if let Some(file_name) = part.file_name {
            body = body.file_name(file_name);
        }
        if let Some(content_type) = part.content_type {
            body = body.mime_str(&content_type).map_err(|e| {
                let reason = format!("invalid content type '{content_type}': {e}");
                TransportError::InvalidRequest(reason)
            })?;
        }
        form = form.part(part.name, body);
    }
    Ok(form)
}
