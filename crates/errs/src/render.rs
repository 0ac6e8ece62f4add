// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use parking_lot::RwLock;

use crate::{Error, Kind};

/// The separator placed between the segments of a rendered trace unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = " :: ";

static SEPARATOR: RwLock<Cow<'static, str>> = RwLock::new(Cow::Borrowed(DEFAULT_SEPARATOR));

/// Replaces the process-wide separator used by the [`Display`](std::fmt::Display) output of
/// [`Error`].
///
/// The separator is global state. Set it once during start-up, before errors are rendered
/// concurrently; renders already in flight keep the separator they started with.
pub fn set_separator(separator: impl Into<Cow<'static, str>>) {
    *SEPARATOR.write() = separator.into();
}

/// Returns the process-wide separator.
#[must_use]
pub fn separator() -> Cow<'static, str> {
    SEPARATOR.read().clone()
}

/// Renders an error and its causes as a single line, joined by `separator`.
///
/// The outermost error contributes `<site> [<kind>] <message>`. Walking inwards, each wrapped
/// [`Error`] contributes its site, plus its kind if the kind changed, plus its message if the
/// message changed, compared with the layer just outside it. The first cause that is not an
/// [`Error`] contributes its own display output and ends the walk. Inner layers come first.
///
/// # Examples
///
/// ```rust
/// use errs::{CallSite, Error, Kind, render_with};
///
/// let io = std::io::Error::other("disk full");
/// let inner = Error::construct(Kind::INTERNAL, CallSite::new("db", "write", "db.rs", 3), vec![io.into()]);
/// let outer = Error::construct(Kind::INTERNAL, CallSite::new("api", "save", "api.rs", 9), vec![inner.into()]).unwrap();
///
/// assert_eq!(render_with(&outer, " | "), "disk full | db::write:3 | api::save:9 [internal] disk full");
/// ```
#[must_use]
pub fn render_with(err: &Error, separator: &str) -> String {
    let mut segments = vec![format!("{} [{}] {}", err.operation(), err.kind(), err.message())];

    let mut message = err.message();
    let mut kind = err.kind();
    let mut next = err.cause();

    while let Some(cause) = next {
        let Some(x) = cause.downcast_ref::<Error>() else {
            segments.push(cause.to_string());
            break;
        };

        segments.push(segment(x, message, kind));

        message = x.message();
        kind = x.kind();
        next = x.cause();
    }

    segments.reverse();
    segments.join(separator)
}

fn segment(x: &Error, message: &str, kind: Kind) -> String {
    match (x.message() == message, x.kind() == kind) {
        (true, true) => x.operation().to_string(),
        (true, false) => format!("{} [{}]", x.operation(), x.kind()),
        (false, _) => format!("{} [{}] {}", x.operation(), x.kind(), x.message()),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arg, CallSite};

    fn at(function: &str, line: u32) -> CallSite {
        CallSite::new("app", function, "src/app.rs", line)
    }

    fn build(kind: Kind, function: &str, line: u32, args: Vec<Arg>) -> Error {
        Error::construct(kind, at(function, line), args).unwrap()
    }

    #[test]
    fn single_layer() {
        let err = build(Kind::INVALID, "parse", 1, vec!["bad header".into()]);
        insta::assert_snapshot!(render_with(&err, DEFAULT_SEPARATOR), @"app::parse:1 [invalid] bad header");
    }

    #[test]
    fn empty_message_keeps_trailing_space() {
        let err = build(Kind::INVALID, "parse", 1, vec![Arg::Nil, Arg::Nil]);
        assert_eq!(render_with(&err, DEFAULT_SEPARATOR), "app::parse:1 [invalid] ");
    }

    #[test]
    fn external_cause_ends_the_walk() {
        let err = build(Kind::INTERNAL, "load", 2, vec![std::io::Error::other("external error").into()]);
        insta::assert_snapshot!(render_with(&err, DEFAULT_SEPARATOR), @"external error :: app::load:2 [internal] external error");
    }

    #[test]
    fn same_message_and_kind_collapses_to_site() {
        let inner = build(Kind::CONFLICT, "c", 3, vec!["new error message".into()]);
        let outer = build(Kind::CONFLICT, "d", 4, vec![inner.into(), "new error message".into()]);
        insta::assert_snapshot!(render_with(&outer, DEFAULT_SEPARATOR), @"app::c:3 :: app::d:4 [conflict] new error message");
    }

    #[test]
    fn same_message_other_kind_keeps_kind() {
        let inner = build(Kind::TIMEOUT, "c", 3, vec!["slow".into()]);
        let outer = build(Kind::TEMPORARY, "d", 4, vec![inner.into()]);
        insta::assert_snapshot!(render_with(&outer, DEFAULT_SEPARATOR), @"app::c:3 [timeout] :: app::d:4 [temporary] slow");
    }

    #[test]
    fn other_message_keeps_everything() {
        let inner = build(Kind::TIMEOUT, "c", 3, vec!["slow".into()]);
        let outer = build(Kind::TIMEOUT, "d", 4, vec![inner.into(), "request failed".into()]);
        insta::assert_snapshot!(render_with(&outer, DEFAULT_SEPARATOR), @"app::c:3 [timeout] slow :: app::d:4 [timeout] request failed");
    }

    #[test]
    fn full_chain() {
        let a = std::io::Error::other("external error");
        let b = build(Kind::INTERNAL, "b", 10, vec![a.into()]);
        let c = build(Kind::CONFLICT, "c", 20, vec![b.into(), "new error message".into()]);
        let d = build(Kind::CONFLICT, "d", 30, vec![c.into(), "new error message".into()]);

        insta::assert_snapshot!(
            render_with(&d, DEFAULT_SEPARATOR),
            @"external error :: app::b:10 [internal] external error :: app::c:20 :: app::d:30 [conflict] new error message"
        );
    }

    #[test]
    fn comparison_is_with_the_nearest_layer() {
        let a = build(Kind::INVALID, "a", 1, vec!["x".into()]);
        let b = build(Kind::INVALID, "b", 2, vec![a.into(), "y".into()]);
        let c = build(Kind::INVALID, "c", 3, vec![b.into(), "x".into()]);
        assert_eq!(
            render_with(&c, " | "),
            "app::a:1 [invalid] x | app::b:2 [invalid] y | app::c:3 [invalid] x"
        );
    }

    #[test]
    fn nested_external_structure_is_opaque() {
        let inner = std::io::Error::other("root");
        let wrapped = std::io::Error::other(build(Kind::INTERNAL, "x", 1, vec![inner.into()]));
        let err = build(Kind::INTERNAL, "y", 2, vec![wrapped.into(), "outer".into()]);

        let rendered = render_with(&err, DEFAULT_SEPARATOR);
        assert_eq!(rendered.matches(DEFAULT_SEPARATOR).count(), 2);
        assert!(rendered.ends_with("app::y:2 [internal] outer"));
    }

    #[test]
    fn default_separator() {
        assert_eq!(DEFAULT_SEPARATOR, " :: ");
    }
}
