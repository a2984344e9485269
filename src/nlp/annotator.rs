// SPDX-License-Identifier: MIT

//! Annotation collaborator boundary
//!
//! The engine never tags or parses text itself. An [`Annotator`] turns raw
//! text into a [`Document`] once per run, before any classification starts.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::env;
use std::time::Duration;

use super::document::Document;
use super::spacy::SpacyDoc;
use crate::error::{AnnotationError, Text2BpmnError};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Produces a sentence-segmented, dependency-parsed document from raw text
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<Document, AnnotationError>;
}

/// Client for an HTTP annotation service that answers with spaCy JSON
pub struct RemoteAnnotator {
    client: Client,
    url: String,
}

impl RemoteAnnotator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Text2BpmnError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Configure from `ANNOTATOR_URL` and optional `ANNOTATOR_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, Text2BpmnError> {
        let url = env::var("ANNOTATOR_URL")
            .map_err(|_| Text2BpmnError::config("ANNOTATOR_URL must be set"))?;
        let timeout = match env::var("ANNOTATOR_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                Text2BpmnError::config(format!("Invalid ANNOTATOR_TIMEOUT_SECS: {}", value))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(url, Duration::from_secs(timeout))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Annotator for RemoteAnnotator {
    async fn annotate(&self, text: &str) -> Result<Document, AnnotationError> {
        log::debug!("Requesting annotation of {} chars from {}", text.len(), self.url);

        let resp = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .json(&json!({ "text": text }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AnnotationError::Service { status, message });
        }

        let doc: SpacyDoc = resp.json().await?;
        doc.into_document()
    }
}

/// Annotator that always returns the same pre-parsed document
///
/// Used when an annotation was produced ahead of time (for instance loaded
/// from a spaCy JSON file) and no service should be contacted.
pub struct StaticAnnotator {
    document: Document,
}

impl StaticAnnotator {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

#[async_trait]
impl Annotator for StaticAnnotator {
    async fn annotate(&self, _text: &str) -> Result<Document, AnnotationError> {
        Ok(self.document.clone())
    }
}
