//! Weekly report PDF endpoints and the browser-side save/open helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend renders the PDF; the client only moves opaque bytes. Download
//! and preview return raw bytes, generate returns a JSON status. The
//! `save_bytes_as_file`/`open_bytes_in_new_tab` helpers are purely local DOM
//! side effects and exist only in the `csr` build.

#[cfg(test)]
#[path = "pdf_test.rs"]
mod pdf_test;

use time::{Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339, macros::format_description};

use super::error::ApiError;
use super::http::{ApiClient, ApiRequest, RawResponse, Transport};
use super::types::PdfGeneration;
use super::weekly_reports::report_path;

pub const PDF: &str = "application/pdf";

fn pdf_path(report_id: u64, action: &str) -> String {
    format!("{}/pdf/{action}", report_path(report_id))
}

/// Error for a non-2xx PDF call: the JSON `message` if present, a status
/// summary for JSON bodies without one, `"Unknown error"` otherwise.
fn pdf_failure(verb: &str, response: &RawResponse) -> ApiError {
    let message = match serde_json::from_slice::<serde_json::Value>(&response.body) {
        Ok(body) => body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map_or_else(|| format!("Failed to {verb} PDF: {}", response.status), str::to_owned),
        Err(_) => "Unknown error".to_owned(),
    };
    ApiError::Status { status: response.status, message: Some(message) }
}

pub struct PdfService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for PdfService<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: Transport> PdfService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    async fn fetch_bytes(&self, report_id: u64, action: &str, verb: &str) -> Result<Vec<u8>, ApiError> {
        let request = ApiRequest::get(pdf_path(report_id, action)).header("Accept", PDF);
        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(pdf_failure(verb, &response));
        }
        Ok(response.body)
    }

    /// PDF bytes served as an attachment.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client; non-2xx maps to [`ApiError::Status`].
    pub async fn download(&self, report_id: u64) -> Result<Vec<u8>, ApiError> {
        self.fetch_bytes(report_id, "download", "download").await
    }

    /// PDF bytes served inline.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client; non-2xx maps to [`ApiError::Status`].
    pub async fn preview(&self, report_id: u64) -> Result<Vec<u8>, ApiError> {
        self.fetch_bytes(report_id, "preview", "preview").await
    }

    /// Ask the backend to (re)render the report PDF.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the client; non-2xx maps to [`ApiError::Status`].
    pub async fn generate(&self, report_id: u64) -> Result<PdfGeneration, ApiError> {
        let request = ApiRequest::post(pdf_path(report_id, "generate")).header("Content-Type", super::http::JSON);
        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(pdf_failure("generate", &response));
        }
        response.json()
    }
}

/// `YYYY-MM-DD` for an RFC 3339 timestamp (UTC) or a value starting with a
/// plain date. Anything else is returned trimmed.
fn iso_date(raw: &str) -> String {
    let raw = raw.trim();
    let ymd = format_description!("[year]-[month]-[day]");
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        if let Ok(s) = ts.to_offset(UtcOffset::UTC).date().format(ymd) {
            return s;
        }
    }
    raw.get(..10)
        .and_then(|prefix| Date::parse(prefix, ymd).ok())
        .and_then(|d| d.format(ymd).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// Download filename for a report covering `start..=end`.
#[must_use]
pub fn pdf_filename(start: &str, end: &str) -> String {
    format!("weekly_report_{}_to_{}.pdf", iso_date(start), iso_date(end))
}

#[cfg(feature = "csr")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};

    use super::PDF;

    fn js_err(e: JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    fn object_url(bytes: &[u8]) -> Result<String, JsValue> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let props = web_sys::BlobPropertyBag::new();
        props.set_type(PDF);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)?;
        web_sys::Url::create_object_url_with_blob(&blob)
    }

    fn anchor(document: &web_sys::Document, href: &str) -> Result<web_sys::HtmlAnchorElement, JsValue> {
        let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        link.set_href(href);
        Ok(link)
    }

    /// Trigger the browser's save dialog for `bytes`.
    ///
    /// # Errors
    ///
    /// Returns the DOM error text if the document is unavailable.
    pub fn save_bytes_as_file(bytes: &[u8], filename: &str) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let body = document.body().ok_or_else(|| "no body".to_owned())?;
        let url = object_url(bytes).map_err(js_err)?;
        let link = anchor(&document, &url).map_err(js_err)?;
        link.set_download(filename);
        body.append_child(&link).map_err(js_err)?;
        link.click();
        let _ = body.remove_child(&link);
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }

    /// Open `bytes` in a new tab, falling back to a `target=_blank` link when
    /// the popup is blocked.
    ///
    /// # Errors
    ///
    /// Returns the DOM error text if the window is unavailable.
    pub fn open_bytes_in_new_tab(bytes: &[u8]) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let url = object_url(bytes).map_err(js_err)?;
        if window.open_with_url_and_target(&url, "_blank").map_err(js_err)?.is_none() {
            log::warn!("preview popup blocked; falling back to link");
            let document = window.document().ok_or_else(|| "no document".to_owned())?;
            let link = anchor(&document, &url).map_err(js_err)?;
            link.set_target("_blank");
            link.click();
        }
        Ok(())
    }
}

#[cfg(feature = "csr")]
pub use browser::{open_bytes_in_new_tab, save_bytes_as_file};
