// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error;
use std::fmt;
use std::io;

/// Potential categories an error from this library falls into.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// Input given by the caller (tags, sample rates, addresses) was invalid.
    InvalidInput,
    /// A socket or file operation failed.
    IoError,
    /// The HTTP request for an event could not be completed.
    HttpError,
    /// The configured transport is not one this client knows how to use.
    UnsupportedTransport,
    /// The collector answered with a status code other than 200 or 202.
    BadStatusCode,
    /// The collector answered with an empty body.
    EmptyResponse,
    /// The collector answered with a body that could not be decoded as JSON.
    UndecodableResponse,
    /// The collector answered with JSON whose `status` was not `"ok"`.
    StatusNotOk,
}

impl ErrorKind {
    /// Socket, file, or HTTP level failure.
    pub fn is_transport(self) -> bool {
        matches!(self, ErrorKind::IoError | ErrorKind::HttpError)
    }

    /// The collector was reached but rejected the request or answered with
    /// something other than a successful acknowledgement.
    pub fn is_protocol_response(self) -> bool {
        matches!(
            self,
            ErrorKind::BadStatusCode | ErrorKind::EmptyResponse | ErrorKind::UndecodableResponse | ErrorKind::StatusNotOk
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ErrorKind::InvalidInput => "invalid input".fmt(f),
            ErrorKind::IoError => "I/O error".fmt(f),
            ErrorKind::HttpError => "HTTP error".fmt(f),
            ErrorKind::UnsupportedTransport => "unsupported transport".fmt(f),
            ErrorKind::BadStatusCode => "bad status code".fmt(f),
            ErrorKind::EmptyResponse => "empty response".fmt(f),
            ErrorKind::UndecodableResponse => "undecodable response".fmt(f),
            ErrorKind::StatusNotOk => "status not ok".fmt(f),
        }
    }
}

/// Error generated by this library potentially wrapping another
/// type of error (exposed via the `Error` trait).
#[derive(Debug)]
pub struct MetricError {
    repr: ErrorRepr,
}

#[derive(Debug)]
enum ErrorRepr {
    WithDescription(ErrorKind, &'static str),
    WithMessage(ErrorKind, String),
    IoError(io::Error),
    HttpError(reqwest::Error),
}

impl MetricError {
    /// Return the kind of the error
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::IoError(_) => ErrorKind::IoError,
            ErrorRepr::HttpError(_) => ErrorKind::HttpError,
            ErrorRepr::WithDescription(kind, _) => kind,
            ErrorRepr::WithMessage(kind, _) => kind,
        }
    }

    /// Shorthand for `self.kind().is_transport()`
    pub fn is_transport(&self) -> bool {
        self.kind().is_transport()
    }

    /// Shorthand for `self.kind().is_protocol_response()`
    pub fn is_protocol_response(&self) -> bool {
        self.kind().is_protocol_response()
    }
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            ErrorRepr::IoError(ref err) => err.fmt(f),
            ErrorRepr::HttpError(ref err) => write!(f, "Event send (http) failed: {}", err),
            ErrorRepr::WithDescription(_, desc) => desc.fmt(f),
            ErrorRepr::WithMessage(_, ref msg) => msg.fmt(f),
        }
    }
}

impl error::Error for MetricError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.repr {
            ErrorRepr::IoError(ref err) => Some(err),
            ErrorRepr::HttpError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MetricError {
    fn from(err: io::Error) -> MetricError {
        MetricError {
            repr: ErrorRepr::IoError(err),
        }
    }
}

impl From<reqwest::Error> for MetricError {
    fn from(err: reqwest::Error) -> MetricError {
        MetricError {
            repr: ErrorRepr::HttpError(err),
        }
    }
}

impl From<(ErrorKind, &'static str)> for MetricError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> MetricError {
        MetricError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

impl From<(ErrorKind, String)> for MetricError {
    fn from((kind, msg): (ErrorKind, String)) -> MetricError {
        MetricError {
            repr: ErrorRepr::WithMessage(kind, msg),
        }
    }
}

pub type MetricResult<T> = Result<T, MetricError>;

#[cfg(test)]
mod tests {
    use super::{ErrorKind, MetricError};
    use std::error::Error;
    use std::io;

    #[test]
    fn test_metric_error_kind_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "Broken!");
        let our_err = MetricError::from(io_err);
        assert_eq!(ErrorKind::IoError, our_err.kind());
        assert!(our_err.is_transport());
        assert!(!our_err.is_protocol_response());
    }

    #[test]
    fn test_metric_error_kind_invalid_input() {
        let our_err = MetricError::from((ErrorKind::InvalidInput, "Nope!"));
        assert_eq!(ErrorKind::InvalidInput, our_err.kind());
        assert!(!our_err.is_transport());
    }

    #[test]
    fn test_metric_error_description_with_message() {
        let our_err = MetricError::from((ErrorKind::StatusNotOk, "status was fail".to_string()));
        assert_eq!("status was fail", our_err.to_string());
        assert!(our_err.is_protocol_response());
    }

    #[test]
    fn test_metric_error_source_io_error() {
        let io_err = io::Error::new(io::ErrorKind::TimedOut, "Timeout!");
        let our_err = MetricError::from(io_err);
        assert!(our_err.source().is_some());
    }

    #[test]
    fn test_metric_error_source_other() {
        let our_err = MetricError::from((ErrorKind::UnsupportedTransport, "Nope!"));
        assert!(our_err.source().is_none());
    }

    #[test]
    fn test_protocol_response_kinds() {
        for kind in [
            ErrorKind::BadStatusCode,
            ErrorKind::EmptyResponse,
            ErrorKind::UndecodableResponse,
            ErrorKind::StatusNotOk,
        ] {
            assert!(kind.is_protocol_response(), "{} should be a protocol response kind", kind);
            assert!(!kind.is_transport());
        }
    }
}
