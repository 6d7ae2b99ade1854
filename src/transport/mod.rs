//! HTTP transport layer for the Slack client.
//!
//! Sends form-encoded and multipart POSTs and turns the Slack response
//! envelope into either its JSON body or a typed error.

use crate::errors::{NetworkError, RateLimitError, ResponseError, SlackError, SlackResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::{debug, instrument, warn};

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a form-encoded POST and return the verified JSON body
    async fn send_form(&self, request: FormRequest) -> SlackResult<serde_json::Value>;

    /// Send a multipart POST (file uploads) and return the verified JSON body
    async fn send_multipart(&self, request: MultipartRequest) -> SlackResult<serde_json::Value>;
}

/// Form-encoded request
#[derive(Debug)]
pub struct FormRequest {
    /// Full URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Form fields
    pub fields: Vec<(String, String)>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl FormRequest {
    /// Create a new form POST request
    pub fn post(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            url: url.into(),
            headers,
            fields: Vec::new(),
            timeout: None,
        }
    }

    /// Add form fields
    pub fn fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Multipart request for file uploads
#[derive(Debug)]
pub struct MultipartRequest {
    /// Full URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Form fields
    pub fields: Vec<(String, String)>,
    /// File part
    pub file: FileUpload,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl MultipartRequest {
    /// Create a new multipart request
    pub fn new(url: impl Into<String>, headers: HeaderMap, file: FileUpload) -> Self {
        Self {
            url: url.into(),
            headers,
            fields: Vec::new(),
            file,
            timeout: None,
        }
    }

    /// Add form fields
    pub fn fields(mut self, fields: Vec<(String, String)>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Reader the upload body is streamed from
pub type UploadReader = Box<dyn AsyncRead + Send + Sync + Unpin + 'static>;

/// Upload payload
pub enum UploadContent {
    /// In-memory content
    Bytes(Bytes),
    /// Streamed without buffering the whole payload
    Reader(UploadReader),
}

impl std::fmt::Debug for UploadContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Self::Reader(_) => write!(f, "Reader(..)"),
        }
    }
}

/// File upload data
#[derive(Debug)]
pub struct FileUpload {
    /// Form field name
    pub field_name: String,
    /// File name
    pub file_name: String,
    /// File content
    pub content: UploadContent,
    /// MIME type
    pub mime_type: String,
}

impl FileUpload {
    /// Upload in-memory bytes under the `file` field
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self::with_content(file_name, UploadContent::Bytes(content.into()))
    }

    /// Upload from a reader under the `file` field
    pub fn from_reader<R>(file_name: impl Into<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Sync + Unpin + 'static,
    {
        Self::with_content(file_name, UploadContent::Reader(Box::new(reader)))
    }

    fn with_content(file_name: impl Into<String>, content: UploadContent) -> Self {
        let file_name_str = file_name.into();
        let mime_type = mime_guess::from_path(&file_name_str)
            .first_or_octet_stream()
            .to_string();

        Self {
            field_name: "file".to_string(),
            file_name: file_name_str,
            content,
            mime_type,
        }
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    fn into_part(self) -> SlackResult<reqwest::multipart::Part> {
        let part = match self.content {
            UploadContent::Bytes(bytes) => reqwest::multipart::Part::bytes(bytes.to_vec()),
            UploadContent::Reader(reader) => reqwest::multipart::Part::stream(
                reqwest::Body::wrap_stream(ReaderStream::new(reader)),
            ),
        };
        part.file_name(self.file_name)
            .mime_str(&self.mime_type)
            .map_err(|e| SlackError::Network(NetworkError::Http(e.to_string())))
    }
}

/// Interpret a Slack response: status check, JSON parse, `ok` flag.
pub(crate) fn check_envelope(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> SlackResult<serde_json::Value> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SlackError::RateLimit(RateLimitError::RateLimited {
            retry_after: Duration::from_secs(retry_after.unwrap_or(60)),
        }));
    }

    if !status.is_success() {
        warn!(status = %status, "Request failed with non-success status");
        return Err(SlackError::Network(NetworkError::HttpStatus {
            status: status.as_u16(),
        }));
    }

    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| SlackError::Response(ResponseError::from(e)))?;

    match json.get("ok").and_then(|v| v.as_bool()) {
        Some(true) => Ok(json),
        Some(false) => {
            let error_code = json
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown_error");
            Err(SlackError::from_slack_error(error_code, None))
        }
        None => Err(SlackError::Response(ResponseError::MissingOkField)),
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
    default_timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> SlackResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| SlackError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
        }
    }

    async fn parse_response(&self, response: Response) -> SlackResult<serde_json::Value> {
        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| SlackError::Network(NetworkError::from(e)))?;

        debug!(status = %status, body_len = body.len(), "Received response");

        check_envelope(status, retry_after, &body)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send_form(&self, request: FormRequest) -> SlackResult<serde_json::Value> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .form(&request.fields)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SlackError::Network(NetworkError::from(e)))?;

        self.parse_response(response).await
    }

    #[instrument(skip(self, request), fields(url = %request.url, file_name = %request.file.file_name))]
    async fn send_multipart(&self, request: MultipartRequest) -> SlackResult<serde_json::Value> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);

        let mut form = reqwest::multipart::Form::new();
        let field_name = request.file.field_name.clone();
        form = form.part(field_name, request.file.into_part()?);
        for (name, value) in request.fields {
            form = form.text(name, value);
        }

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .multipart(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| SlackError::Network(NetworkError::from(e)))?;

        self.parse_response(response).await
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_request_builder() {
        let request = FormRequest::post("https://slack.com/api/test", HeaderMap::new())
            .fields(vec![("channel".to_string(), "C123".to_string())])
            .with_timeout(Duration::from_secs(5));

        assert_eq!(request.fields.len(), 1);
        assert_eq!(request.fields[0], ("channel".to_string(), "C123".to_string()));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_file_upload_mime_detection() {
        let upload = FileUpload::new("test.png", vec![0u8; 10]);
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.field_name, "file");

        let upload = FileUpload::from_reader("notes.txt", std::io::Cursor::new(b"hi".to_vec()));
        assert_eq!(upload.mime_type, "text/plain");
        assert!(matches!(upload.content, UploadContent::Reader(_)));
    }

    #[test]
    fn test_envelope_ok() {
        let value = check_envelope(StatusCode::OK, None, r#"{"ok":true,"user":"bob"}"#).unwrap();
        assert_eq!(value["user"], "bob");
    }

    #[test]
    fn test_envelope_server_error_keeps_code() {
        let err = check_envelope(StatusCode::OK, None, r#"{"ok":false,"error":"invalid_auth"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid_auth"));
    }

    #[test]
    fn test_envelope_http_status() {
        let err = check_envelope(StatusCode::BAD_GATEWAY, None, "<html>").unwrap_err();
        assert!(matches!(
            err,
            SlackError::Network(NetworkError::HttpStatus { status: 502 })
        ));

        let err = check_envelope(StatusCode::TOO_MANY_REQUESTS, Some(7), "").unwrap_err();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_envelope_malformed_body() {
        let err = check_envelope(StatusCode::OK, None, "not json").unwrap_err();
        assert!(matches!(err, SlackError::Response(ResponseError::DeserializationError { .. })));

        let err = check_envelope(StatusCode::OK, None, "{}").unwrap_err();
        assert!(matches!(err, SlackError::Response(ResponseError::MissingOkField)));
    }
}
