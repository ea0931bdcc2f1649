//! Response classification and decoding
//!
//! Anything other than HTTP 200 goes through [`RestError::from_error_body`].
//! A 200 is decoded as an [`Envelope`] unless the endpoint returns plain JSON
//! or CSV.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::envelope::{Envelope, Page, PaginatedEnvelope};
use crate::error::{RestError, RestResult};

/// Reject anything but 200 with a classified error
pub fn check_status(status: u16, body: &str) -> RestResult<()> {
    if status == StatusCode::OK.as_u16() {
        Ok(())
    } else {
        Err(RestError::from_error_body(status, body))
    }
}

fn from_body<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    serde_json::from_str(body).map_err(|e| RestError::Parse(e.to_string()))
}

/// Decode an enveloped result
pub fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> RestResult<T> {
    check_status(status, body)?;
    from_body::<Envelope<T>>(body)?.into_result()
}

/// Decode an enveloped result, treating a missing result as empty
pub fn parse_envelope_or_default<T: DeserializeOwned + Default>(
    status: u16,
    body: &str,
) -> RestResult<T> {
    check_status(status, body)?;
    from_body::<Envelope<T>>(body)?.into_result_or_default()
}

/// Decode an enveloped list with its page cursors
pub fn parse_page<T: DeserializeOwned>(status: u16, body: &str) -> RestResult<Page<T>> {
    check_status(status, body)?;
    from_body::<PaginatedEnvelope<T>>(body)?.into_page()
}

/// Check an envelope for success, ignoring the result
pub fn parse_unit(status: u16, body: &str) -> RestResult<()> {
    check_status(status, body)?;
    from_body::<Envelope<serde::de::IgnoredAny>>(body)?.into_unit()
}

/// Decode a body that is not wrapped in an envelope
pub fn parse_json<T: DeserializeOwned>(status: u16, body: &str) -> RestResult<T> {
    check_status(status, body)?;
    from_body(body)
}

async fn read(response: Response) -> RestResult<(u16, String)> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    debug!(status, bytes = body.len(), "Read response body");
    Ok((status, body))
}

/// Turn a non-200 response into an error
///
/// Call this only after checking the status yourself; a 200 body is
/// classified the same way.
pub async fn classify_error(response: Response) -> RestError {
    match read(response).await {
        Ok((status, body)) => RestError::from_error_body(status, &body),
        Err(e) => e,
    }
}

pub async fn decode<T: DeserializeOwned>(response: Response) -> RestResult<T> {
    let (status, body) = read(response).await?;
    parse_envelope(status, &body)
}

pub async fn decode_or_default<T: DeserializeOwned + Default>(response: Response) -> RestResult<T> {
    let (status, body) = read(response).await?;
    parse_envelope_or_default(status, &body)
}

pub async fn decode_page<T: DeserializeOwned>(response: Response) -> RestResult<Page<T>> {
    let (status, body) = read(response).await?;
    parse_page(status, &body)
}

pub async fn decode_unit(response: Response) -> RestResult<()> {
    let (status, body) = read(response).await?;
    parse_unit(status, &body)
}

pub async fn decode_json<T: DeserializeOwned>(response: Response) -> RestResult<T> {
    let (status, body) = read(response).await?;
    parse_json(status, &body)
}

/// Read a CSV (or any raw text) body; only the status is checked
pub async fn read_text(response: Response) -> RestResult<String> {
    let (status, body) = read(response).await?;
    check_status(status, &body)?;
    Ok(body)
}
