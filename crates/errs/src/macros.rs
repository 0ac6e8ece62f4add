// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Builds an [`Error`](crate::Error) of the given kind at the current call site.
///
/// Every argument is converted with [`Arg::from`](crate::Arg). The expansion calls
/// [`Error::construct`](crate::Error::construct) and evaluates to `Option<Error>`.
///
/// # Panics
///
/// Panics if no argument is given, or if an argument before the message template is not a
/// string, an error or `None`.
///
/// # Examples
///
/// ```rust
/// use errs::Kind;
///
/// let err = errs::new!(Kind::INVALID, "bad port %d", 70000).unwrap();
/// assert_eq!(err.message(), "bad port 70000");
///
/// assert!(errs::new!(Kind::INVALID, None::<errs::Error>).is_none());
/// ```
#[macro_export]
macro_rules! new {
    ($kind:expr, $($arg:expr),+ $(,)?) => {
        $crate::Error::construct($kind, $crate::call_site!(), ::std::vec![$($crate::Arg::from($arg)),+])
    };
    ($kind:expr $(,)?) => {
        $crate::Error::construct($kind, $crate::call_site!(), ::std::vec::Vec::new())
    };
}

/// Builds a [`Kind::INTERNAL`](crate::Kind::INTERNAL) error: a failure inside the program that the caller cannot fix.
///
/// Takes the same arguments as [`new!`](crate::new).
///
/// # Examples
///
/// ```rust
/// let cause = std::io::Error::other("disk full");
/// let err = errs::internal!(cause).unwrap();
/// assert_eq!(err.message(), "disk full");
/// ```
#[macro_export]
macro_rules! internal {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::INTERNAL $(, $arg)*)
    };
}

/// Builds a [`Kind::CONFLICT`](crate::Kind::CONFLICT) error: a request that conflicts with the current state of a resource.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! conflict {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::CONFLICT $(, $arg)*)
    };
}

/// Builds a [`Kind::EXPIRED`](crate::Kind::EXPIRED) error: something that is no longer valid, such as a token or a lease.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! expired {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::EXPIRED $(, $arg)*)
    };
}

/// Builds a [`Kind::FORBIDDEN`](crate::Kind::FORBIDDEN) error: a caller that is known but not allowed to perform the operation.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! forbidden {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::FORBIDDEN $(, $arg)*)
    };
}

/// Builds a [`Kind::INVALID`](crate::Kind::INVALID) error: input that is malformed or violates a precondition.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! invalid {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::INVALID $(, $arg)*)
    };
}

/// Builds a [`Kind::NOT_FOUND`](crate::Kind::NOT_FOUND) error: a resource that does not exist.
///
/// Takes the same arguments as [`new!`](crate::new).
///
/// # Examples
///
/// ```rust
/// let err = errs::not_found!("user %q", "ada").unwrap();
/// assert_eq!(err.message(), "user \"ada\"");
/// ```
#[macro_export]
macro_rules! not_found {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::NOT_FOUND $(, $arg)*)
    };
}

/// Builds a [`Kind::NOT_IMPLEMENTED`](crate::Kind::NOT_IMPLEMENTED) error: an operation that is not supported.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! not_implemented {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::NOT_IMPLEMENTED $(, $arg)*)
    };
}

/// Builds a [`Kind::TEMPORARY`](crate::Kind::TEMPORARY) error: a transient failure that may succeed if retried.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! temporary {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::TEMPORARY $(, $arg)*)
    };
}

/// Builds a [`Kind::TIMEOUT`](crate::Kind::TIMEOUT) error: an operation that did not finish in time.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! timeout {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::TIMEOUT $(, $arg)*)
    };
}

/// Builds a [`Kind::UNAUTHORIZED`](crate::Kind::UNAUTHORIZED) error: a caller whose identity could not be established.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! unauthorized {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::UNAUTHORIZED $(, $arg)*)
    };
}

/// Builds a [`Kind::UNPROCESSABLE`](crate::Kind::UNPROCESSABLE) error: input that is well formed but cannot be acted upon.
///
/// Takes the same arguments as [`new!`](crate::new).
#[macro_export]
macro_rules! unprocessable {
    ($($arg:expr),* $(,)?) => {
        $crate::new!($crate::Kind::UNPROCESSABLE $(, $arg)*)
    };
}

/// Re-annotates an error one level up at the current call site.
///
/// The compile-time counterpart of [`trace()`](crate::trace()): an [`Error`](crate::Error) keeps
/// its kind and message, other errors become [`Kind::INTERNAL`](crate::Kind::INTERNAL), and
/// `None` gives `None`.
///
/// # Examples
///
/// ```rust
/// fn read_config() -> Result<String, errs::Error> {
///     std::fs::read_to_string("/nonexistent/errs.toml")
///         .map_err(|e| errs::trace!(e).unwrap())
/// }
///
/// let err = read_config().unwrap_err();
/// assert_eq!(err.kind(), errs::Kind::INTERNAL);
/// assert!(err.operation().function().ends_with("read_config"));
/// ```
#[macro_export]
macro_rules! trace {
    ($err:expr $(,)?) => {
        $crate::trace_at($crate::call_site!(), $crate::Arg::from($err))
    };
}
