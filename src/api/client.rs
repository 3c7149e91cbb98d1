use crate::api::operations::ApiRequest;
use crate::core::config::ServiceConfig;
use crate::core::error::ClientError;
use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::future::Future;
use tracing::debug;

/// Raw response from the customer service, any status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request/response cycle.
///
/// Non-2xx responses are returned as `Ok`; `Err` is reserved for failures
/// where no response arrived at all.
pub trait Transport {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send {
        let url = self.url_for(request);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");

        match &request.body {
            Some(body) => builder = builder.json(body),
            None => builder = builder.header(CONTENT_TYPE, "application/json"),
        }

        async move {
            debug!(url = %url, "Sending request to customer service");

            let response = builder
                .send()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            Ok(ApiResponse::new(status, body.to_vec()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::Operation;
    use crate::form::binder::{CustomerForm, FormField};

    fn service_config(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 1,
        }
    }

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new(&service_config("http://localhost:5000/"));
        assert!(transport.is_ok());
        assert_eq!(transport.unwrap().base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_url_for_search_without_filters() {
        let transport = HttpTransport::new(&service_config("http://localhost:5000")).unwrap();
        let request = ApiRequest::build(Operation::Search, &CustomerForm::new()).unwrap();
        assert_eq!(transport.url_for(&request), "http://localhost:5000/customers");
    }

    #[test]
    fn test_url_for_item_action() {
        let transport = HttpTransport::new(&service_config("http://localhost:5000")).unwrap();
        let mut form = CustomerForm::new();
        form.set(FormField::Id, "12");
        let request = ApiRequest::build(Operation::Subscribe, &form).unwrap();
        assert_eq!(
            transport.url_for(&request),
            "http://localhost:5000/customers/12/subscribe"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let transport = HttpTransport::new(&service_config("http://127.0.0.1:9")).unwrap();
        let request = ApiRequest::build(Operation::Healthcheck, &CustomerForm::new()).unwrap();

        let result = transport.execute(&request).await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }

    #[test]
    fn test_api_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }
}
