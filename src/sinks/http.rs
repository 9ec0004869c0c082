// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::config::ClientConfig;
use crate::event::EventPayload;
use crate::types::{ErrorKind, MetricError, MetricResult};
use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

/// Settings used to post a single event to the Datadog HTTP API.
#[derive(Debug, Clone, Copy)]
pub struct HttpEventTarget<'a> {
    /// Full URL of the events endpoint, without the API key.
    pub url: &'a str,
    pub api_key: &'a str,
    pub tls_verify_peer: bool,
    pub tls_verify_host: bool,
}

impl<'a> HttpEventTarget<'a> {
    /// Target for posting to `url` with the API key and TLS settings of
    /// `config`.
    pub fn from_config(config: &'a ClientConfig, url: &'a str) -> Self {
        HttpEventTarget {
            url,
            api_key: &config.api_key,
            tls_verify_peer: config.tls_verify_peer,
            tls_verify_host: config.tls_verify_host,
        }
    }
}

/// Post an event as JSON to `<url>?api_key=<key>` and validate the
/// collector's acknowledgement.
///
/// Exactly one request is made. There are no retries.
///
/// # Failures
///
/// * `HttpError` if the request could not be completed (connection refused,
///   TLS failure, timeout, ...).
/// * Any of the errors from [`check_response`] if the collector answered but
///   did not acknowledge the event.
pub fn send_http_event(payload: &EventPayload<'_>, target: HttpEventTarget<'_>) -> MetricResult<()> {
    let client = Client::builder()
        .danger_accept_invalid_certs(!target.tls_verify_peer)
        .danger_accept_invalid_hostnames(!target.tls_verify_host)
        .build()?;

    let response = client
        .post(target.url)
        .query(&[("api_key", target.api_key)])
        .json(payload)
        .send()?;

    let code = response.status().as_u16();
    let body = response.text()?;
    debug!("event post to {} answered with {}", target.url, code);

    check_response(code, &body)
}

/// Validate the response of the Datadog events API.
///
/// Checks are made in order and the first failing one determines the kind
/// of error returned:
///
/// 1. `BadStatusCode` unless the code is 200 or 202.
/// 2. `EmptyResponse` if the body is empty.
/// 3. `UndecodableResponse` if the body isn't JSON, or is JSON with no
///    content (`null`, `false`, `0`, `""`, `[]`, `{}`).
/// 4. `StatusNotOk` unless the `status` field of the body is `"ok"`.
///
/// # Example
///
/// ```
/// use dogstatsd_client::ErrorKind;
/// use dogstatsd_client::sinks::check_response;
///
/// assert!(check_response(200, r#"{"status":"ok"}"#).is_ok());
/// assert_eq!(ErrorKind::BadStatusCode, check_response(400, "").unwrap_err().kind());
/// ```
pub fn check_response(code: u16, body: &str) -> MetricResult<()> {
    if code != 200 && code != 202 {
        return Err(MetricError::from((
            ErrorKind::BadStatusCode,
            format!("Event send (http) failed with code: {}, body: {}", code, body),
        )));
    }

    if body.is_empty() {
        return Err(MetricError::from((
            ErrorKind::EmptyResponse,
            "Event send (http) failed: no body",
        )));
    }

    let decoded: Value = match serde_json::from_str(body) {
        Ok(v) if !is_empty_value(&v) => v,
        _ => {
            return Err(MetricError::from((
                ErrorKind::UndecodableResponse,
                "Event send (http) failed: could not decode response body",
            )));
        }
    };

    if decoded.get("status").and_then(Value::as_str) != Some("ok") {
        return Err(MetricError::from((
            ErrorKind::StatusNotOk,
            format!("Event send (http) failed: API status not OK, body: {}", body),
        )));
    }

    Ok(())
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_response, HttpEventTarget};
    use crate::config::ClientConfig;
    use crate::types::ErrorKind;

    #[test]
    fn test_http_event_target_from_config_defaults() {
        let config = ClientConfig::default().with_api_key("abc");
        let url = config.event_url();
        let target = HttpEventTarget::from_config(&config, &url);

        assert_eq!("https://app.datadoghq.com/api/v1/events", target.url);
        assert_eq!("abc", target.api_key);
        assert!(target.tls_verify_peer);
        assert!(target.tls_verify_host);
    }

    #[test]
    fn test_http_event_target_from_config_tls_verify_disabled() {
        let config = ClientConfig::default().with_tls_verify(false, false);
        let url = config.event_url();
        let target = HttpEventTarget::from_config(&config, &url);

        assert!(!target.tls_verify_peer);
        assert!(!target.tls_verify_host);
    }

    #[test]
    fn test_http_event_target_from_config_tls_verify_independent() {
        let config = ClientConfig::default().with_tls_verify(true, false);
        let url = config.event_url();
        let target = HttpEventTarget::from_config(&config, &url);

        assert!(target.tls_verify_peer);
        assert!(!target.tls_verify_host);
    }

    #[test]
    fn test_check_response_ok() {
        assert!(check_response(200, r#"{"status":"ok"}"#).is_ok());
        assert!(check_response(202, r#"{"status":"ok","event":{"id":1}}"#).is_ok());
    }

    #[test]
    fn test_check_response_bad_status_code() {
        let err = check_response(400, r#"{"status":"ok"}"#).unwrap_err();
        assert_eq!(ErrorKind::BadStatusCode, err.kind());
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_check_response_bad_status_code_before_body_checks() {
        let err = check_response(500, "").unwrap_err();
        assert_eq!(ErrorKind::BadStatusCode, err.kind());
    }

    #[test]
    fn test_check_response_empty_body() {
        let err = check_response(200, "").unwrap_err();
        assert_eq!(ErrorKind::EmptyResponse, err.kind());
    }

    #[test]
    fn test_check_response_not_json() {
        let err = check_response(200, "not json").unwrap_err();
        assert_eq!(ErrorKind::UndecodableResponse, err.kind());
    }

    #[test]
    fn test_check_response_json_without_content() {
        for body in ["null", "false", "0", "{}", "[]", "\"\""] {
            let err = check_response(200, body).unwrap_err();
            assert_eq!(ErrorKind::UndecodableResponse, err.kind(), "body: {}", body);
        }
    }

    #[test]
    fn test_check_response_status_not_ok() {
        let err = check_response(200, r#"{"status":"fail"}"#).unwrap_err();
        assert_eq!(ErrorKind::StatusNotOk, err.kind());
        assert!(err.to_string().contains("fail"));
    }

    #[test]
    fn test_check_response_status_missing() {
        let err = check_response(202, r#"{"errors":["bad key"]}"#).unwrap_err();
        assert_eq!(ErrorKind::StatusNotOk, err.kind());
    }

    #[test]
    fn test_check_response_non_object_json() {
        let err = check_response(200, "[1, 2]").unwrap_err();
        assert_eq!(ErrorKind::StatusNotOk, err.kind());
    }
}
