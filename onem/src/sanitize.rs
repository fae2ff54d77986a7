//! Callback target checks shared by every component that accepts a url.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::{Result, ValidationError};

/// HTTP method the platform uses to invoke a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Method {
    /// `GET` request.
    #[default]
    #[serde(rename = "GET")]
    Get,
    /// `POST` request.
    #[serde(rename = "POST")]
    Post,
}

impl Method {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => {
                debug!("rejecting method {s:?}");
                Err(ValidationError::InvalidMethod(s.to_string()))
            }
        }
    }
}

/// Checks that a callback target is a relative platform route.
///
/// `None` passes through unchanged. Anything else must be a non-empty string
/// starting with `/`; absolute urls pointing at other hosts are rejected.
pub fn sanitize_url(url: Option<&str>) -> Result<Option<String>> {
    match url {
        None => Ok(None),
        Some(u) if u.starts_with('/') => Ok(Some(u.to_string())),
        Some(u) => {
            debug!("rejecting callback url {u:?}");
            Err(ValidationError::InvalidUrl(u.to_string()))
        }
    }
}

/// Parses an optional method name, case-insensitively.
///
/// `None` passes through unchanged.
pub fn sanitize_method(method: Option<&str>) -> Result<Option<Method>> {
    method.map(str::parse).transpose()
}

/// Resolves a `(url, method)` pair into a callback target.
///
/// Without a url there is no callback, so the method is dropped whatever the
/// caller passed. With a url the method defaults to `GET`.
pub(crate) fn callback(
    url: Option<&str>,
    method: Option<Method>,
) -> Result<(Option<String>, Option<Method>)> {
    match sanitize_url(url)? {
        Some(url) => Ok((Some(url), Some(method.unwrap_or_default()))),
        None => Ok((None, None)),
    }
}
