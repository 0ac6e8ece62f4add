// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Annotated, chainable errors.
//!
//! Every layer of a program that handles a failure wraps it in an [`Error`] that records
//! three things: a [`Kind`] that classifies the failure, a human-readable message, and the
//! [`CallSite`] where the wrapping happened. Displaying the outermost error renders the whole
//! chain on one line, from the root cause outwards, collapsing layers that only repeat what
//! the layer before them said.
//!
//! # Quick Start
//!
//! ```rust
//! fn load_user(id: u32) -> Result<String, errs::Error> {
//!     let io = std::io::Error::other("connection refused");
//!     Err(errs::temporary!(io, "cannot load user %d", id).unwrap())
//! }
//!
//! fn handler() -> Result<String, errs::Error> {
//!     load_user(7).map_err(|e| errs::trace!(e).unwrap())
//! }
//!
//! let err = handler().unwrap_err();
//! assert_eq!(err.kind(), errs::Kind::TEMPORARY);
//! assert_eq!(err.message(), "cannot load user 7");
//!
//! // connection refused :: <load_user site> :: <handler site> [temporary] cannot load user 7
//! println!("{err}");
//! ```
//!
//! # Construction
//!
//! Errors are built by [`new!`] or by one of the per-kind macros: [`internal!`], [`conflict!`],
//! [`expired!`], [`forbidden!`], [`invalid!`], [`not_found!`], [`not_implemented!`],
//! [`temporary!`], [`timeout!`], [`unauthorized!`] and [`unprocessable!`]. They take any
//! number of arguments, each converted into an [`Arg`], and evaluate to `Option<Error>`.
//!
//! The arguments are scanned from the left:
//!
//! - `None` is skipped. A construction whose only argument is `None` yields `None`, which
//!   makes `errs::internal!(maybe_err)` a no-op when there is nothing to wrap.
//! - An error becomes the cause. A later error replaces an earlier one.
//! - The first string is the message template. Everything after it is a format argument.
//! - Anything else before the template is a bug in the calling code and panics.
//!
//! Without a template the message of the cause is adopted.
//!
//! # Templates
//!
//! Templates use printf-style directives: `%v`, `%s`, `%q`, `%d`, `%x`, `%X`, `%o`, `%b`,
//! `%c`, `%U`, `%f`, `%e`, `%g`, `%t` and `%T`, with flags, width and precision. `%%` is a
//! literal percent sign. Templates and arguments are reconciled as follows:
//!
//! - with no arguments the template is used as is, directives included,
//! - surplus arguments are dropped,
//! - if arguments run out, the template is cut right before the first directive left
//!   without one and `...` is appended.
//!
//! ```rust
//! let err = errs::invalid!("expected %d fields, got %d", 3).unwrap();
//! assert_eq!(err.message(), "expected 3 fields, got...");
//!
//! let err = errs::invalid!("%d%% done", 50, "ignored").unwrap();
//! assert_eq!(err.message(), "50% done");
//! ```
//!
//! # Rendering
//!
//! The innermost cause comes first, followed by one segment per annotated layer:
//!
//! - the outermost layer always shows `<site> [<kind>] <message>`,
//! - an inner layer with the same message and kind as the layer wrapping it shows only its
//!   site, with the same message but another kind it adds `[<kind>]`, and otherwise it shows
//!   everything,
//! - the first cause that is not an [`Error`] shows its own display output and ends the walk.
//!
//! Segments are joined by [`separator()`], which defaults to [`DEFAULT_SEPARATOR`] and can be
//! changed once at start-up with [`set_separator`]. [`render_with`] takes the separator
//! explicitly.
//!
//! # Logging
//!
//! [`Error::log`] marks an error for logging, and wrapping a marked error marks the wrapper.
//! [`report()`] emits a [`tracing`] event for a marked error and does nothing for others.
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for [`Kind`], using the kind's tag.

mod arg;
mod chain;
mod error;
mod format;
mod kind;
mod locator;
mod macros;
mod render;
mod report;

pub use arg::{Arg, BoxError};
pub use chain::{as_annotated, is_annotated, kind_of};
pub use error::{Error, trace, trace_at};
pub use kind::{Kind, ParseKindError};
pub use locator::{CallSite, locate, parse_symbol};
pub use render::{DEFAULT_SEPARATOR, render_with, separator, set_separator};
pub use report::report;
