// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;

use crate::arg::{BoxError, Positional};
use crate::format::reconcile;
use crate::locator::locate;
use crate::render::{render_with, separator};
use crate::{Arg, CallSite, Kind};

/// Error data, boxed to keep `Error` pointer-sized.
struct Inner {
    kind: Kind,
    message: String,
    log: bool,
    cause: Option<BoxError>,
    site: CallSite,
}

/// An annotated error: a kind, a message, a call site and an optional cause.
///
/// Each layer of a program that handles a failure wraps it in a new `Error` stating its own
/// kind and message. The [`Display`](fmt::Display) output walks the whole chain and renders
/// it as one line, collapsing layers that repeat their predecessor's message or kind.
///
/// Errors are built with the construction macros ([`new!`](crate::new),
/// [`internal!`](crate::internal), [`not_found!`](crate::not_found), ...), with
/// [`Error::new`], or with [`Error::construct`] when the call site is already known.
///
/// # Examples
///
/// ```rust
/// use errs::Kind;
///
/// let io = std::io::Error::other("connection reset");
/// let err = errs::temporary!(io, "failed to fetch user %d", 42).unwrap();
///
/// assert_eq!(err.kind(), Kind::TEMPORARY);
/// assert_eq!(err.message(), "failed to fetch user 42");
/// assert!(err.to_string().starts_with("connection reset :: "));
/// ```
pub struct Error {
    data: Box<Inner>,
}

impl Error {
    /// Builds an error at an explicit call site.
    ///
    /// This is the entry point every constructor goes through:
    ///
    /// - an invalid `kind` is replaced by [`Kind::INTERNAL`],
    /// - a single [`Arg::Nil`] builds no error and returns `None`,
    /// - the arguments are scanned left to right: [`Arg::Nil`] is skipped, an [`Arg::Cause`]
    ///   becomes the cause (a later one replaces an earlier one), and the first [`Arg::Str`]
    ///   is the message template with every remaining argument used to format it,
    /// - without a message, the message of the cause is adopted,
    /// - the log flag of an [`Error`] cause carries over.
    ///
    /// See the crate documentation for how templates and their arguments are reconciled.
    ///
    /// # Panics
    ///
    /// Panics if `args` is empty, or if an argument before the template is neither
    /// [`Arg::Nil`], [`Arg::Str`] nor [`Arg::Cause`]. Both indicate a bug at the call site.
    #[must_use]
    pub fn construct(kind: Kind, site: CallSite, args: Vec<Arg>) -> Option<Self> {
        let kind = kind.or_internal();

        assert!(!args.is_empty(), "errs: no arguments provided from {site}");

        if let [Arg::Nil] = args.as_slice() {
            return None;
        }

        let mut cause = None;
        let mut template = None;
        let mut args = args.into_iter();

        for arg in args.by_ref() {
            match arg.into_positional() {
                Positional::Absent => {}
                Positional::Message(message) => {
                    template = Some(message);
                    break;
                }
                Positional::Cause(error) => cause = Some(error),
                Positional::Invalid(type_name) => invalid_argument(type_name, &site),
            }
        }

        let format_args: Vec<Arg> = args.collect();
        let mut message = template.map(|t| reconcile(&t, &format_args)).unwrap_or_default();

        let previous = cause.as_deref().and_then(|c| c.downcast_ref::<Self>());

        if message.is_empty() {
            message = match (previous, cause.as_deref()) {
                (Some(previous), _) => previous.message().to_owned(),
                (None, Some(cause)) => cause.to_string(),
                (None, None) => String::new(),
            };
        }

        let log = previous.is_some_and(Self::to_log);

        Some(Self {
            data: Box::new(Inner {
                kind,
                message,
                log,
                cause,
                site,
            }),
        })
    }

    /// Builds an error, locating the call site by walking the stack.
    ///
    /// Prefer the construction macros, whose call sites are resolved at compile time. This
    /// function is for callers that cannot use a macro, such as function pointers.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Error::construct`].
    #[inline(never)]
    #[must_use]
    pub fn new(kind: Kind, args: Vec<Arg>) -> Option<Self> {
        Self::construct(kind, locate(1), args)
    }

    /// Marks this error to be logged. The mark carries over to every error that wraps this one
    /// and cannot be removed.
    #[must_use]
    pub fn log(mut self) -> Self {
        self.data.log = true;
        self
    }

    /// Returns `true` if this error, or an error it wraps, asked to be logged.
    #[must_use]
    pub fn to_log(&self) -> bool {
        self.data.log
    }

    /// Returns the kind of this layer.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.data.kind
    }

    /// Returns the message of this layer.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.data.message
    }

    /// Returns where this error was built.
    #[must_use]
    pub fn operation(&self) -> &CallSite {
        &self.data.site
    }

    /// Returns the wrapped cause, if any.
    ///
    /// The returned reference points at the very value that was passed in, so it can be
    /// downcast back to its original type.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.data.cause.as_deref()
    }

    /// Consumes this error and returns the wrapped cause, if any.
    #[must_use]
    pub fn into_cause(self) -> Option<BoxError> {
        self.data.cause
    }
}

#[cold]
#[track_caller]
#[expect(clippy::panic, reason = "an unsupported argument is a bug in the calling code")]
fn invalid_argument(type_name: &str, site: &CallSite) -> ! {
    panic!("errs: invalid argument of type {type_name} from {site}");
}

/// Re-annotates an error one level up, recording a new call site.
///
/// An [`Error`] keeps its kind and message. Any other error is wrapped as
/// [`Kind::INTERNAL`]. [`Arg::Nil`] (for instance `None`) gives `None`.
///
/// The call site is located by walking the stack. The [`trace!`](crate::trace!) macro does the
/// same with a compile-time call site.
///
/// # Panics
///
/// Panics if `err` is neither an error nor [`Arg::Nil`].
///
/// # Examples
///
/// ```rust
/// let err = errs::conflict!("version mismatch").unwrap();
/// let traced = errs::trace(err).unwrap();
///
/// assert_eq!(traced.kind(), errs::Kind::CONFLICT);
/// assert_eq!(traced.message(), "version mismatch");
/// ```
#[inline(never)]
#[must_use]
pub fn trace(err: impl Into<Arg>) -> Option<Error> {
    trace_at(locate(1), err.into())
}

#[doc(hidden)]
#[must_use]
pub fn trace_at(site: CallSite, err: Arg) -> Option<Error> {
    let cause = match err.into_positional() {
        Positional::Absent => return None,
        Positional::Cause(cause) => cause,
        Positional::Message(_) => invalid_argument("str", &site),
        Positional::Invalid(type_name) => invalid_argument(type_name, &site),
    };

    let (kind, message) = match cause.downcast_ref::<Error>() {
        Some(previous) => (previous.kind(), previous.message().to_owned()),
        None => (Kind::INTERNAL, String::new()),
    };

    let mut args = vec![Arg::Cause(cause)];
    if !message.is_empty() {
        args.push(Arg::Str(message));
    }

    Error::construct(kind, site, args)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_with(self, &separator()))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.data.kind)
            .field("message", &self.data.message)
            .field("log", &self.data.log)
            .field("site", &self.data.site)
            .field("cause", &self.data.cause)
            .finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.data.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}
