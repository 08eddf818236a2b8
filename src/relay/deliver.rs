//! HTTP delivery of a mail to the endpoint.

use super::target::Target;
use crate::error::{RelayError, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// POST `mail` to the target as a form field named `parameter`.
///
/// Redirects are never followed: a cookie-based login redirect would
/// otherwise hide an authorization failure behind a 200 login page. A 404
/// maps to [`RelayError::NoUser`]; any other non-2xx status or transport
/// failure is [`RelayError::Delivery`].
///
/// The mail is percent-encoded byte for byte, so 8-bit content reaches the
/// endpoint unchanged.
pub fn deliver(target: &Target, parameter: &str, mail: &[u8], timeout: Duration) -> Result<()> {
    let client = Client::builder()
        .redirect(Policy::none())
        .timeout(timeout)
        .build()
        .map_err(|e| RelayError::Delivery(format!("failed to build HTTP client: {}", e)))?;

    let mut request = client
        .post(&target.url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(parameter, mail));
    if let Some((user, password)) = &target.credentials {
        request = request.basic_auth(user, Some(password));
    }

    debug!(url = %target.url, bytes = mail.len(), "posting mail");
    let response = request.send().map_err(|e| {
        RelayError::Delivery(format!(
            "a problem ({}) occurred uploading mail to {}",
            e, target.url
        ))
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RelayError::NoUser(target.url.clone()));
    }
    if !status.is_success() {
        return Err(RelayError::Delivery(format!("{} answered {}", target.url, status)));
    }

    Ok(())
}

/// `name=value` with both sides form-urlencoded from raw bytes.
fn form_body(name: &str, value: &[u8]) -> String {
    let mut body: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    body.push('=');
    body.extend(form_urlencoded::byte_serialize(value));
    body
}
