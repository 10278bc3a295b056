//! Resume text extraction. The contract is lazy and best-effort: given a
//! document URL, produce plain text or fail. Callers recover from any
//! failure with empty text and keep going. Dispatch is by declared content
//! type, falling back to the URL extension; unknown formats yield empty text
//! rather than an error.

pub mod docx;

use async_trait::async_trait;
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{BlockType, Document};
use bytes::Bytes;
use thiserror::Error;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch returned status {status}")]
    Fetch { status: u16 },

    #[error("pdf parse failed: {0}")]
    Pdf(String),

    #[error("docx parse failed: {0}")]
    Docx(String),

    #[error("ocr failed: {0}")]
    Ocr(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError>;
}

/// Fetches the document over HTTP and parses by format: PDF and DOCX locally
/// (on the blocking pool, since both parsers are CPU-bound), images through
/// Textract's synchronous text detection.
pub struct HttpResumeExtractor {
    http: reqwest::Client,
    textract: aws_sdk_textract::Client,
}

impl HttpResumeExtractor {
    pub fn new(http: reqwest::Client, textract: aws_sdk_textract::Client) -> Self {
        Self { http, textract }
    }

    async fn ocr(&self, bytes: Bytes) -> Result<String, ExtractError> {
        let document = Document::builder().bytes(Blob::new(bytes.to_vec())).build();
        let output = self
            .textract
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| ExtractError::Ocr(DisplayErrorContext(e).to_string()))?;

        let lines: Vec<&str> = output
            .blocks
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|b| b.block_type() == Some(&BlockType::Line))
            .filter_map(|b| b.text())
            .collect();
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl ResumeExtractor for HttpResumeExtractor {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractError> {
        if url.is_empty() {
            return Ok(String::new());
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response.bytes().await?;
        let url_lower = url.to_lowercase();

        if content_type.contains(DOCX_MIME) || url_lower.ends_with(".docx") {
            let text =
                tokio::task::spawn_blocking(move || docx::extract_docx_text(&bytes))
                    .await
                    .map_err(|e| ExtractError::Task(e.to_string()))??;
            return Ok(text);
        }

        if content_type.contains("application/pdf") || url_lower.ends_with(".pdf") {
            let text = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))??;
            return Ok(text.trim().to_string());
        }

        if content_type.starts_with("image/") || is_image_url(&url_lower) {
            return self.ocr(bytes).await;
        }

        // Unsupported format: not an error, just nothing to rank on.
        Ok(String::new())
    }
}

fn is_image_url(url_lower: &str) -> bool {
    url_lower.ends_with(".png") || url_lower.ends_with(".jpg") || url_lower.ends_with(".jpeg")
}
