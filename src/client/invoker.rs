//! The single entry point every API method goes through.

use crate::auth::AuthManager;
use crate::config::SlackConfig;
use crate::errors::{ResponseError, SlackError, SlackResult};
use crate::observability::RtmMetrics;
use crate::transport::{FileUpload, FormRequest, HttpTransport, MultipartRequest};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Form parameters for an API call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    fields: Vec<(String, String)>,
}

impl Params {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
        self
    }

    /// Set a parameter only when the value is non-empty
    pub fn set_if_not_empty(self, name: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.set(name, value)
        }
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v.to_string()),
            None => self,
        }
    }

    /// Set `name=1` when the flag is on
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on {
            self.set(name, "1")
        } else {
            self
        }
    }

    /// Look up a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Consume into form fields
    pub fn into_fields(self) -> Vec<(String, String)> {
        self.fields
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Params {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .fold(Params::new(), |params, (k, v)| params.set(k, v))
    }
}

/// Form-encodes parameters, adds the token, POSTs to `{base_url}/{method}`
/// and verifies the `ok` flag of the reply.
pub struct ApiInvoker {
    config: Arc<SlackConfig>,
    auth: AuthManager,
    transport: Arc<dyn HttpTransport>,
    metrics: Arc<RtmMetrics>,
}

impl ApiInvoker {
    /// Create an invoker over a transport
    pub fn new(
        config: Arc<SlackConfig>,
        transport: Arc<dyn HttpTransport>,
        metrics: Arc<RtmMetrics>,
    ) -> Self {
        let auth = AuthManager::new(config.clone());
        Self {
            config,
            auth,
            transport,
            metrics,
        }
    }

    /// Client configuration
    pub fn config(&self) -> &SlackConfig {
        &self.config
    }

    /// Authentication manager
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Shared counters
    pub fn metrics(&self) -> &Arc<RtmMetrics> {
        &self.metrics
    }

    /// Call an API method and return the verified JSON body
    #[instrument(skip(self, params), fields(method = %method))]
    pub async fn invoke(&self, method: &str, params: Params) -> SlackResult<serde_json::Value> {
        let mut fields = params.into_fields();
        self.auth.sign(&mut fields)?;
        self.send(method, fields).await
    }

    /// Call an API method and decode the body into `T`
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Params) -> SlackResult<T> {
        decode(self.invoke(method, params).await?)
    }

    /// Call a method that must not carry a token, such as `oauth.access`
    #[instrument(skip(self, params), fields(method = %method))]
    pub async fn call_unauthenticated<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
    ) -> SlackResult<T> {
        decode(self.send(method, params.into_fields()).await?)
    }

    /// Upload a file as multipart form data and decode the body into `T`
    #[instrument(skip(self, params, file), fields(method = %method, file_name = %file.file_name))]
    pub async fn upload<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
        file: FileUpload,
    ) -> SlackResult<T> {
        let mut fields = params.into_fields();
        self.auth.sign(&mut fields)?;

        let request = MultipartRequest::new(self.config.build_url(method), self.auth.headers(), file)
            .fields(fields)
            .with_timeout(self.config.timeout);
        let result = self.transport.send_multipart(request).await;
        self.record(method, &result);
        decode(result?)
    }

    async fn send(
        &self,
        method: &str,
        fields: Vec<(String, String)>,
    ) -> SlackResult<serde_json::Value> {
        let request = FormRequest::post(self.config.build_url(method), self.auth.headers())
            .fields(fields)
            .with_timeout(self.config.timeout);
        let result = self.transport.send_form(request).await;
        self.record(method, &result);
        result
    }

    fn record(&self, method: &str, result: &SlackResult<serde_json::Value>) {
        self.metrics.record_api_call(method, result.is_ok());
        match result {
            Ok(_) => debug!(method, "Slack API call succeeded"),
            Err(e) => warn!(method, error = %e, code = e.error_code(), "Slack API call failed"),
        }
    }
}

impl std::fmt::Debug for ApiInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiInvoker")
            .field("base_url", &self.config.base_url.as_str())
            .field("auth", &self.auth)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> SlackResult<T> {
    serde_json::from_value(value).map_err(|e| SlackError::Response(ResponseError::from(e)))
}
