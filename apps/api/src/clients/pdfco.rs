//! PDF text extraction via the PDF.co API.
//!
//! Three-step flow: request a presigned upload URL, PUT the file bytes, then
//! ask for an inline text conversion of the uploaded file.

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const PDFCO_API_URL: &str = "https://api.pdf.co/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresignedUrlResponse {
    presigned_url: String,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextConversionResponse {
    #[serde(default)]
    body: String,
    #[serde(default)]
    error: bool,
    message: Option<String>,
}

pub struct PdfcoClient {
    http: reqwest::Client,
    api_key: String,
}

impl PdfcoClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Extracts plain text from a PDF held in memory.
    pub async fn extract_text(&self, file: Bytes, filename: &str) -> Result<String> {
        let upload = self.presigned_upload_url(filename).await?;
        self.upload_file(&upload.presigned_url, file).await?;
        self.convert_to_text(&upload.url).await
    }

    async fn presigned_upload_url(&self, filename: &str) -> Result<PresignedUrlResponse> {
        debug!(filename, "requesting PDF.co upload URL");
        let response = self
            .http
            .get(format!("{PDFCO_API_URL}/file/upload/get-presigned-url"))
            .query(&[("name", filename), ("contenttype", "application/pdf")])
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .context("PDF.co presigned-url request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("PDF.co presigned-url request failed: {status}");
        }

        response
            .json()
            .await
            .context("PDF.co presigned-url response was malformed")
    }

    async fn upload_file(&self, presigned_url: &str, file: Bytes) -> Result<()> {
        let response = self
            .http
            .put(presigned_url)
            .header("Content-Type", "application/pdf")
            .body(file)
            .send()
            .await
            .context("PDF upload failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("PDF upload failed: {status}");
        }
        Ok(())
    }

    async fn convert_to_text(&self, file_url: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{PDFCO_API_URL}/pdf/convert/to/text"))
            .header("x-api-key", &self.api_key)
            .json(&json!({
                "url": file_url,
                "inline": true,
                "async": false,
            }))
            .send()
            .await
            .context("PDF.co text conversion request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("PDF.co text conversion failed: {status}");
        }

        let body: TextConversionResponse = response
            .json()
            .await
            .context("PDF.co text conversion response was malformed")?;

        if body.error {
            bail!(
                "PDF.co reported an extraction error: {}",
                body.message.unwrap_or_else(|| "unknown".to_string())
            );
        }

        debug!(chars = body.body.len(), "PDF text extracted");
        Ok(body.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_response_parses_error_flag() {
        let json = r#"{"body": "", "error": true, "message": "bad pdf"}"#;
        let parsed: TextConversionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.error);
        assert_eq!(parsed.message.as_deref(), Some("bad pdf"));
    }

    #[test]
    fn test_presigned_response_uses_camel_case() {
        let json = r#"{"presignedUrl": "https://u.example/put", "url": "https://u.example/file.pdf"}"#;
        let parsed: PresignedUrlResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.presigned_url, "https://u.example/put");
        assert_eq!(parsed.url, "https://u.example/file.pdf");
    }
}
