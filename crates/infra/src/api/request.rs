//! Request descriptions and per-request options.
//!
//! A request is kept as plain data until it is sent so it can be rebuilt
//! when re-issued after a token refresh (multipart bodies are consumed by
//! reqwest on send).

use std::fmt;
use std::time::Duration;

use localstore_domain::Upload;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::errors::ApiError;

/// Per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Deadline for the whole exchange, refresh and re-issue included.
    /// Defaults to the client timeout.
    pub timeout: Option<Duration>,
    /// Cancelling aborts the request with [`ApiError::Cancelled`].
    pub cancel: Option<CancellationToken>,
    /// Send without credentials and never refresh (token and sign-up
    /// endpoints).
    pub anonymous: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Options for unauthenticated endpoints.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { anonymous: true, ..Self::default() }
    }
}

/// A multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(Upload),
}

/// A multipart form, rebuilt into a reqwest form on every send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormValue)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), FormValue::Text(value.into())));
        self
    }

    /// Add a text field unless the value is missing or blank.
    #[must_use]
    pub fn optional_text(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value.map(Into::into) {
            Some(value) if !value.trim().is_empty() => self.text(name, value),
            _ => self,
        }
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.parts.push((name.into(), FormValue::File(upload)));
        self
    }

    #[must_use]
    pub fn optional_file(self, name: impl Into<String>, upload: Option<Upload>) -> Self {
        match upload {
            Some(upload) => self.file(name, upload),
            None => self,
        }
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    /// Text value of a field, if present.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(field, value)| match value {
            FormValue::Text(text) if field == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in &self.parts {
            form = match value {
                FormValue::Text(text) => form.text(name.clone(), text.clone()),
                FormValue::File(upload) => {
                    let mut part =
                        Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
                    if let Some(content_type) = &upload.content_type {
                        part = part.mime_str(content_type).map_err(|e| {
                            ApiError::Config(format!("invalid content type {content_type}: {e}"))
                        })?;
                    }
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// Lifecycle of a single request through the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Sent,
    Success,
    Failed,
    Refreshing,
    RetriedSuccess,
    RetriedFailed,
    RedirectLogin,
}

impl RequestState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Refreshing => "refreshing",
            Self::RetriedSuccess => "retried_success",
            Self::RetriedFailed => "retried_failed",
            Self::RedirectLogin => "redirect_login",
        }
    }

    /// No further transitions follow.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Failed | Self::RetriedSuccess | Self::RetriedFailed | Self::RedirectLogin
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as the client tracks it between attempts.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    /// Set once a refresh has been attempted for this request.
    pub retried: bool,
    pub anonymous: bool,
}

impl PreparedRequest {
    pub fn new(method: Method, path: &str, body: RequestBody) -> Self {
        Self { method, path: path.to_string(), body, retried: false, anonymous: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_skip_blank_values() {
        let form = MultipartForm::new()
            .optional_text("notes", Some("  "))
            .optional_text("location", None::<String>)
            .optional_text("latitude", Some("31.5"))
            .text("meets_requirements", "True")
            .optional_file("cv", None);

        assert_eq!(form.field_names().collect::<Vec<_>>(), vec!["latitude", "meets_requirements"]);
        assert_eq!(form.text_value("meets_requirements"), Some("True"));
    }

    #[test]
    fn rejects_bad_content_type() {
        let form = MultipartForm::new()
            .file("cv", Upload::new("cv.pdf", vec![1]).with_content_type("not a mime"));
        assert!(matches!(form.to_form(), Err(ApiError::Config(_))));
    }

    #[test]
    fn terminal_states() {
        assert!(RequestState::RedirectLogin.is_terminal());
        assert!(!RequestState::Refreshing.is_terminal());
        assert_eq!(RequestState::RetriedSuccess.to_string(), "retried_success");
    }
}
