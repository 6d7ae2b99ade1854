//! Files service for Slack API.
//!
//! Uploads are sent as multipart form data; the payload is streamed from
//! bytes or any `AsyncRead`.

use crate::client::{ApiInvoker, Params};
use crate::errors::{SlackError, SlackResult};
use crate::transport::FileUpload;
use crate::types::{ChannelId, File};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Request for files.upload
#[derive(Debug)]
pub struct UploadFileRequest {
    /// Title of the file
    pub title: Option<String>,
    /// File type identifier, e.g. `python`
    pub filetype: Option<String>,
    /// Comment posted with the file
    pub initial_comment: Option<String>,
    /// Channels to share the file in
    pub channels: Vec<ChannelId>,
    /// Payload; its file name is required
    pub content: FileUpload,
}

impl UploadFileRequest {
    /// Create a new upload request
    pub fn new(content: FileUpload) -> Self {
        Self {
            title: None,
            filetype: None,
            initial_comment: None,
            channels: Vec::new(),
            content,
        }
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set file type
    pub fn filetype(mut self, filetype: impl Into<String>) -> Self {
        self.filetype = Some(filetype.into());
        self
    }

    /// Set initial comment
    pub fn initial_comment(mut self, comment: impl Into<String>) -> Self {
        self.initial_comment = Some(comment.into());
        self
    }

    /// Share in a channel
    pub fn channel(mut self, channel: impl Into<ChannelId>) -> Self {
        self.channels.push(channel.into());
        self
    }

    fn into_parts(self) -> SlackResult<(Params, FileUpload)> {
        if self.content.file_name.is_empty() {
            return Err(SlackError::validation(
                "a filename is required for the upload",
            ));
        }

        let channels = self
            .channels
            .iter()
            .map(ChannelId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let params = Params::new()
            .set_if_not_empty("title", self.title.as_deref().unwrap_or_default())
            .set_if_not_empty("filetype", self.filetype.as_deref().unwrap_or_default())
            .set("filename", self.content.file_name.as_str())
            .set_if_not_empty(
                "initial_comment",
                self.initial_comment.as_deref().unwrap_or_default(),
            )
            .set_if_not_empty("channels", &channels);

        Ok((params, self.content))
    }
}

/// Response from files.upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileResponse {
    /// Success indicator
    pub ok: bool,
    /// The uploaded file
    #[serde(default)]
    pub file: File,
}

/// Trait for files service operations
#[async_trait]
pub trait FilesServiceTrait: Send + Sync {
    /// Upload a file
    async fn upload(&self, request: UploadFileRequest) -> SlackResult<UploadFileResponse>;
}

/// Files service implementation
#[derive(Clone)]
pub struct FilesService {
    invoker: Arc<ApiInvoker>,
}

impl FilesService {
    /// Create a new files service
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        Self { invoker }
    }
}

#[async_trait]
impl FilesServiceTrait for FilesService {
    #[instrument(skip(self, request), fields(file_name = %request.content.file_name))]
    async fn upload(&self, request: UploadFileRequest) -> SlackResult<UploadFileResponse> {
        let (params, file) = request.into_parts()?;
        self.invoker.upload("files.upload", params, file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_params() {
        let (params, file) = UploadFileRequest::new(FileUpload::new("notes.txt", "hello"))
            .title("Notes")
            .channel("C1")
            .channel("D2")
            .into_parts()
            .unwrap();

        assert_eq!(params.get("filename"), Some("notes.txt"));
        assert_eq!(params.get("title"), Some("Notes"));
        assert_eq!(params.get("channels"), Some("C1,D2"));
        assert_eq!(params.get("filetype"), None);
        assert_eq!(file.field_name, "file");
    }

    #[test]
    fn test_upload_requires_filename() {
        let err = UploadFileRequest::new(FileUpload::new("", "x"))
            .into_parts()
            .unwrap_err();
        assert!(err.to_string().contains("filename"));
    }
}
