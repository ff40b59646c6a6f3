//! Validated newtype wrappers for declaration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use axum::http::HeaderValue;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A validated argument-document field name.
///
/// Used for the primary key (`"id"` by default) and the parent key
/// (`"parent_id"` by default) injected into callback arguments.
///
/// # Example
///
/// ```rust
/// use rest_resources::KeyName;
///
/// let key = KeyName::new("post_id").unwrap();
/// assert_eq!(key.as_ref(), "post_id");
/// assert!(KeyName::new("post id").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyName(pub(super) String);

impl KeyName {
    /// Creates a new validated key name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKeyName`] if the name is empty or
    /// contains whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidKeyName { name });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated media type used as a resource's `Content-Type`.
///
/// The value must have the form `type/subtype`, optionally followed by
/// parameters (`; charset=utf-8`), and must be a legal header value.
///
/// # Serialization
///
/// `MediaType` serializes to and deserializes from its string form:
///
/// ```rust
/// use rest_resources::MediaType;
///
/// let media_type = MediaType::new("application/json").unwrap();
/// let json = serde_json::to_string(&media_type).unwrap();
/// assert_eq!(json, r#""application/json""#);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MediaType {
    raw: String,
    header: HeaderValue,
}

impl MediaType {
    /// Media type used when a resource does not declare one.
    pub const APPLICATION_JSON: &'static str = "application/json";

    /// Creates a new validated media type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidContentType`] if the value is not of the
    /// form `type/subtype` or cannot be used as a header value.
    pub fn new(content_type: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = content_type.into();
        let essence = raw.split(';').next().unwrap_or_default().trim();

        let valid_essence = essence.split_once('/').is_some_and(|(kind, subtype)| {
            is_token(kind) && is_token(subtype)
        });
        if !valid_essence {
            return Err(ConfigError::InvalidContentType { content_type: raw });
        }

        let Ok(header) = HeaderValue::from_str(&raw) else {
            return Err(ConfigError::InvalidContentType { content_type: raw });
        };
        Ok(Self { raw, header })
    }

    /// Returns the `application/json` media type.
    #[must_use]
    pub fn json() -> Self {
        Self {
            raw: Self::APPLICATION_JSON.to_string(),
            header: HeaderValue::from_static(Self::APPLICATION_JSON),
        }
    }

    /// Returns the value as a header value.
    #[must_use]
    pub const fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

fn is_token(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
}

impl Default for MediaType {
    fn default() -> Self {
        Self::json()
    }
}

impl AsRef<str> for MediaType {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MediaType").field(&self.raw).finish()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for MediaType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated subdomain an API scope is restricted to.
///
/// A request matches when its `Host` header starts with `"<subdomain>."`.
///
/// # Example
///
/// ```rust
/// use rest_resources::Subdomain;
///
/// let subdomain = Subdomain::new("api").unwrap();
/// assert!(subdomain.matches_host("api.example.com"));
/// assert!(!subdomain.matches_host("www.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subdomain(String);

impl Subdomain {
    /// Creates a new validated subdomain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSubdomain`] if the value is empty, starts
    /// or ends with a dot, or contains characters other than ASCII letters,
    /// digits, `-` and `.`.
    pub fn new(subdomain: impl Into<String>) -> Result<Self, ConfigError> {
        let subdomain = subdomain.into().to_lowercase();
        let valid = !subdomain.is_empty()
            && !subdomain.starts_with('.')
            && !subdomain.ends_with('.')
            && subdomain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

        if !valid {
            return Err(ConfigError::InvalidSubdomain { subdomain });
        }
        Ok(Self(subdomain))
    }

    /// Returns `true` if `host` is served under this subdomain.
    ///
    /// The comparison is case-insensitive and ignores any port.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        host.strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
    }
}

impl AsRef<str> for Subdomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
