// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::str::FromStr;

use tracing::{Level, event};

/// Machine-readable classification of an [`Error`](crate::Error).
///
/// A `Kind` is a small integer code with a fixed mapping to a lowercase tag. Codes outside of
/// the mapping are representable (see [`Kind::from_code`]) but are never stored in an error:
/// construction coerces them to [`Kind::INTERNAL`].
///
/// # Examples
///
/// ```rust
/// use errs::Kind;
///
/// assert_eq!(Kind::NOT_FOUND.as_str(), "not_found");
/// assert_eq!(Kind::from_code(0).as_str(), "unknown");
/// assert!(!Kind::from_code(-1).is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(i32);

impl Kind {
    /// Unexpected failure inside the system.
    pub const INTERNAL: Self = Self(1);
    /// The action conflicts with the current state of a resource.
    pub const CONFLICT: Self = Self(2);
    /// The resource or credential is no longer valid.
    pub const EXPIRED: Self = Self(3);
    /// The caller is known but lacks permission.
    pub const FORBIDDEN: Self = Self(4);
    /// The request is malformed.
    pub const INVALID: Self = Self(5);
    /// The resource does not exist.
    pub const NOT_FOUND: Self = Self(6);
    /// The operation is not supported yet.
    pub const NOT_IMPLEMENTED: Self = Self(7);
    /// The failure is transient.
    pub const TEMPORARY: Self = Self(8);
    /// The operation did not finish in time.
    pub const TIMEOUT: Self = Self(9);
    /// The caller could not be identified.
    pub const UNAUTHORIZED: Self = Self(10);
    /// The request is well-formed but cannot be processed.
    pub const UNPROCESSABLE: Self = Self(11);

    /// Every valid kind, in code order.
    pub const ALL: [Self; 11] = [
        Self::INTERNAL,
        Self::CONFLICT,
        Self::EXPIRED,
        Self::FORBIDDEN,
        Self::INVALID,
        Self::NOT_FOUND,
        Self::NOT_IMPLEMENTED,
        Self::TEMPORARY,
        Self::TIMEOUT,
        Self::UNAUTHORIZED,
        Self::UNPROCESSABLE,
    ];

    /// Creates a kind from its raw code. The code does not have to be valid.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw code of this kind.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns the lowercase tag of this kind, or `"unknown"` for codes outside the mapping.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.tag() {
            Some(tag) => tag,
            None => "unknown",
        }
    }

    /// Returns `true` if the code is part of the fixed mapping.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.tag().is_some()
    }

    /// Returns this kind if it is valid, [`Kind::INTERNAL`] otherwise.
    pub(crate) fn or_internal(self) -> Self {
        if self.is_valid() {
            return self;
        }

        event!(Level::DEBUG, code = self.0, "coercing unmapped error kind to internal");
        Self::INTERNAL
    }

    const fn tag(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("internal"),
            2 => Some("conflict"),
            3 => Some("expired"),
            4 => Some("forbidden"),
            5 => Some("invalid"),
            6 => Some("not_found"),
            7 => Some("not_implemented"),
            8 => Some("temporary"),
            9 => Some("timeout"),
            10 => Some("unauthorized"),
            11 => Some("unprocessable"),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "Kind({tag})"),
            None => write!(f, "Kind(unknown: {})", self.0),
        }
    }
}

/// The error returned when parsing a [`Kind`] from an unrecognized tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized error kind tag: {tag:?}")]
pub struct ParseKindError {
    tag: String,
}

impl ParseKindError {
    /// Returns the tag that failed to parse.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError { tag: s.to_owned() })
    }
}

#[cfg(feature = "serde")]
impl serde_core::Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_core::Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        let tag = <String as serde_core::Deserialize>::deserialize(deserializer)?;
        tag.parse().map_err(serde_core::de::Error::custom)
    }
}
