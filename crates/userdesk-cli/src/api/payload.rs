//! Request descriptors and body encodings
//!
//! A [`RequestDescriptor`] is built for each call and consumed when the
//! request is sent. Bodies are JSON unless the caller explicitly asks for a
//! multipart profile update with an [`Attachment`].

use crate::api::error::{ApiError, Result};
use crate::api::normalize::{normalize_in_place, normalize_payload};
use crate::api::types::{to_payload, Payload};
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Form field the backend reads the avatar upload from
pub const DEFAULT_ATTACHMENT_FIELD: &str = "avatar";

/// A binary file sent with a profile update
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Multipart field name
    pub field: String,
    pub file_name: String,
    /// MIME type; `application/octet-stream` when unknown
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Attachment for the default `avatar` field
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: DEFAULT_ATTACHMENT_FIELD.to_string(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::Attachment {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(file_name, content_type, bytes))
    }

    /// Send the file under a different form field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| {
                ApiError::invalid_payload(format!("bad attachment content type: {e}"))
            })
    }
}

/// Body of a profile update
///
/// The encoding is chosen by the variant, never by inspecting the data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    /// Sent as `application/json`
    Plain(Payload),
    /// Sent as `multipart/form-data`: one text part per field plus the file
    Multipart {
        fields: Payload,
        attachment: Attachment,
    },
}

impl ProfileUpdate {
    pub fn plain<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Ok(ProfileUpdate::Plain(to_payload(data)?))
    }

    pub fn multipart<T: Serialize + ?Sized>(data: &T, attachment: Attachment) -> Result<Self> {
        Ok(ProfileUpdate::Multipart {
            fields: to_payload(data)?,
            attachment,
        })
    }

    pub(crate) fn into_body(self) -> RequestBody {
        match self {
            ProfileUpdate::Plain(payload) => RequestBody::Json(Value::Object(payload)),
            ProfileUpdate::Multipart { fields, attachment } => {
                RequestBody::Multipart { fields, attachment }
            }
        }
    }
}

/// Body attached to a request descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(Value),
    Multipart {
        fields: Payload,
        attachment: Attachment,
    },
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart { .. })
    }

    /// Build the multipart form; `null` fields are left out
    pub(crate) fn into_form(fields: Payload, attachment: Attachment) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in fields {
            if let Some(text) = field_text(&value) {
                form = form.text(name, text);
            }
        }
        let field = attachment.field.clone();
        Ok(form.part(field, attachment.into_part()?))
    }
}

/// Everything needed to issue one request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the API base, with trailing slash
    pub path: String,
    pub query: Option<Payload>,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: RequestBody::None,
            headers: HeaderMap::new(),
        }
    }

    pub fn query(mut self, query: Payload) -> Self {
        self.query = Some(query);
        self
    }

    pub fn json(mut self, payload: Payload) -> Self {
        self.body = RequestBody::Json(Value::Object(payload));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Rewrite empty strings to `null` in the body and query
    pub fn normalized(mut self) -> Self {
        if let Some(query) = self.query.as_mut() {
            normalize_payload(query);
        }
        match &mut self.body {
            RequestBody::Json(value) => normalize_in_place(value),
            RequestBody::Multipart { fields, .. } => normalize_payload(fields),
            RequestBody::None => {}
        }
        self
    }

    /// Query string pairs in insertion order
    ///
    /// `null` values are dropped, arrays repeat the key once per element,
    /// nested objects are sent as JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = &self.query else {
            return Vec::new();
        };

        let mut pairs = Vec::with_capacity(query.len());
        for (key, value) in query {
            match value {
                Value::Array(items) => pairs.extend(
                    items
                        .iter()
                        .filter_map(field_text)
                        .map(|text| (key.clone(), text)),
                ),
                other => {
                    if let Some(text) = field_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

/// Text form of a value in a query string or multipart field
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
