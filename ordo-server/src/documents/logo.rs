//! Company logo inlining
//!
//! The letterhead logo lives behind a URL. Both renderers want the bytes
//! inline (the PDF embeds them, the HTML fragment uses a data URI), so the
//! image is fetched once per render. Failure is non-fatal: the document
//! simply prints without a logo.

use http::header::CONTENT_TYPE;

/// Raw logo bytes plus their content type
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl LogoImage {
    /// data: URI for embedding into an HTML fragment
    pub fn as_data_uri(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.content_type, encoded)
    }
}

/// Best-effort fetch of the company logo. Returns None (with a warning
/// logged) on any failure.
pub async fn fetch_logo(client: &reqwest::Client, url: &str) -> Option<LogoImage> {
    match try_fetch(client, url).await {
        Ok(logo) => Some(logo),
        Err(err) => {
            tracing::warn!(url, error = %err, "Failed to inline company logo, document will omit it");
            None
        }
    }
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> Result<LogoImage, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/png")
        .to_string();
    let bytes = response.bytes().await?;
    Ok(LogoImage {
        bytes: bytes.to_vec(),
        content_type,
    })
}
