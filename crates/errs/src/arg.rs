// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::Error;

/// A boxed error that can be stored as the cause of an [`Error`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// One argument of an error construction.
///
/// Construction scans its arguments left to right. Before the message template only three
/// shapes are legal:
///
/// - [`Arg::Nil`] is skipped,
/// - [`Arg::Str`] is the message template, everything after it formats the template,
/// - [`Arg::Cause`] is the wrapped cause.
///
/// Any other variant in that position is a bug in the calling code and panics. After the
/// template every variant is a format argument.
///
/// Most values convert into an `Arg` through [`From`], which is what the construction macros
/// rely on. Use [`Arg::cause`] and [`Arg::value`] for types without a conversion.
pub enum Arg {
    /// No value. A lone `Nil` constructs no error at all.
    Nil,
    /// A string: the message template, or a format argument after it.
    Str(String),
    /// A signed integer format argument.
    Int(i64),
    /// An unsigned integer format argument.
    Uint(u64),
    /// A floating point format argument.
    Float(f64),
    /// A boolean format argument.
    Bool(bool),
    /// A character format argument.
    Char(char),
    /// An error: the wrapped cause, or a format argument after the template.
    Cause(BoxError),
    /// Any other displayable format argument.
    Value(Box<dyn fmt::Display + Send + Sync + 'static>),
}

/// The role of an argument that appears before the message template.
pub(crate) enum Positional {
    Absent,
    Message(String),
    Cause(BoxError),
    Invalid(&'static str),
}

impl Arg {
    /// Wraps an error of any type.
    pub fn cause(error: impl StdError + Send + Sync + 'static) -> Self {
        Self::Cause(Box::new(error))
    }

    /// Wraps a displayable value for use as a format argument.
    pub fn value(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::Value(Box::new(value))
    }

    /// Short type name used in diagnostics.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Str(_) => "str",
            Self::Int(_) => "i64",
            Self::Uint(_) => "u64",
            Self::Float(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Cause(_) => "error",
            Self::Value(_) => "value",
        }
    }

    pub(crate) fn into_positional(self) -> Positional {
        match self {
            Self::Nil => Positional::Absent,
            Self::Str(message) => Positional::Message(message),
            Self::Cause(cause) => Positional::Cause(cause),
            other @ (Self::Int(_) | Self::Uint(_) | Self::Float(_) | Self::Bool(_) | Self::Char(_) | Self::Value(_)) => {
                Positional::Invalid(other.type_name())
            }
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Char(v) => f.debug_tuple("Char").field(v).finish(),
            Self::Cause(v) => f.debug_tuple("Cause").field(v).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(&v.to_string()).finish(),
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Str(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Cause(v) => write!(f, "{v}"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Cow<'_, str>> for Arg {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Str(value.into_owned())
    }
}

macro_rules! from_int {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for Arg {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

from_int!(Int(i64): i8, i16, i32, i64);
from_int!(Uint(u64): u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::value(value), Self::Int)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::value(value), Self::Uint)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<Error> for Arg {
    fn from(value: Error) -> Self {
        Self::Cause(Box::new(value))
    }
}

impl From<BoxError> for Arg {
    fn from(value: BoxError) -> Self {
        Self::Cause(value)
    }
}

macro_rules! from_std_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Arg {
                fn from(value: $source) -> Self {
                    Self::cause(value)
                }
            }
        )+
    };
}

from_std_error!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
);

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
