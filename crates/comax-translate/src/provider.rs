//! Translation providers.

use std::future::Future;
use std::time::Duration;

use comax_core::enums::CultureCode;

use crate::error::TranslateError;
use crate::http::check_response;

/// Turns source-culture text into target-culture text.
pub trait TranslationProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Translate `text` from `source` into `target`.
    fn translate(
        &self,
        text: &str,
        source: CultureCode,
        target: CultureCode,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// Client for the MyMemory `GET /get?q=..&langpair=src|dst` API.
pub struct MyMemoryProvider {
    http: reqwest::Client,
    endpoint: String,
    contact_email: Option<String>,
}

impl MyMemoryProvider {
    /// Build a client for `endpoint` (without the `/get` path).
    ///
    /// # Errors
    ///
    /// Returns `TranslateError::Http` if the HTTP client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("comax/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            contact_email: None,
        })
    }

    /// Send `de=<email>` with every request. An empty string is ignored.
    #[must_use]
    pub fn with_contact_email(mut self, email: &str) -> Self {
        self.contact_email = Some(email.trim().to_string()).filter(|e| !e.is_empty());
        self
    }

    fn request_url(&self, text: &str, source: CultureCode, target: CultureCode) -> String {
        let mut url = format!(
            "{}/get?q={}&langpair={}|{}",
            self.endpoint,
            urlencoding::encode(text),
            source.language_subtag(),
            target.language_subtag()
        );
        if let Some(email) = &self.contact_email {
            url.push_str("&de=");
            url.push_str(&urlencoding::encode(email));
        }
        url
    }
}

impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(
        &self,
        text: &str,
        source: CultureCode,
        target: CultureCode,
    ) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyText);
        }
        let url = self.request_url(text, source, target);
        tracing::debug!(%source, %target, chars = text.chars().count(), "requesting translation");
        let resp = self.http.get(&url).send().await?;
        read_translation(resp).await
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    #[serde(default)]
    response_status: ResponseStatus,
    #[serde(default)]
    response_data: ResponseData,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,
}

/// The API reports `responseStatus` as a number on success and sometimes as a
/// string on failure.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ResponseStatus {
    Code(i64),
    Text(String),
}

impl Default for ResponseStatus {
    fn default() -> Self {
        Self::Code(0)
    }
}

impl ResponseStatus {
    fn code(&self) -> i64 {
        match self {
            Self::Code(code) => *code,
            Self::Text(text) => text.trim().parse().unwrap_or_default(),
        }
    }
}

/// Check status, then pull `responseData.translatedText` out of the payload.
async fn read_translation(resp: reqwest::Response) -> Result<String, TranslateError> {
    let resp = check_response(resp).await?;
    let body: MyMemoryResponse = resp.json().await?;
    extract_translation(body)
}

/// Accept only `responseStatus == 200` with a non-empty `translatedText`.
fn extract_translation(body: MyMemoryResponse) -> Result<String, TranslateError> {
    let status = body.response_status.code();
    let text = body
        .response_data
        .translated_text
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if status == 200 && !text.is_empty() {
        return Ok(text.to_string());
    }
    let message = body
        .response_details
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "no translated text".to_string());
    Err(TranslateError::Rejected { status, message })
}
