// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::io;

use crate::{Error, Kind};

fn chain<'a>(err: &'a (dyn StdError + 'static)) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |e: &&'a (dyn StdError + 'static)| next(*e))
}

/// `io::Error::source` returns the source of the wrapped error, not the wrapped error itself.
fn next<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    if let Some(inner) = err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
        let inner: &'a (dyn StdError + 'static) = inner;
        return Some(inner);
    }

    err.source()
}

/// Returns `true` if `err` or any error in its source chain is an annotated [`Error`].
#[must_use]
pub fn is_annotated(err: &(dyn StdError + 'static)) -> bool {
    as_annotated(err).is_some()
}

/// Returns the first annotated [`Error`] found in the source chain of `err`, starting with
/// `err` itself.
///
/// The chain is followed through [`StdError::source`], and through
/// [`io::Error::get_ref`] for I/O errors, so an annotated error wrapped by some other error
/// type is still found.
///
/// # Examples
///
/// ```rust
/// let inner = errs::not_found!("no such user").unwrap();
/// let outer = std::io::Error::other(inner);
///
/// let found = errs::as_annotated(&outer).unwrap();
/// assert_eq!(found.kind(), errs::Kind::NOT_FOUND);
/// ```
#[must_use]
pub fn as_annotated<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    chain(err).find_map(|e| e.downcast_ref::<Error>())
}

/// Returns the kind of the first annotated [`Error`] in the chain of `err`, or
/// [`Kind::INTERNAL`] if there is none.
#[must_use]
pub fn kind_of(err: &(dyn StdError + 'static)) -> Kind {
    as_annotated(err).map_or(Kind::INTERNAL, Error::kind)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::CallSite;

    fn annotated(kind: Kind) -> Error {
        Error::construct(kind, CallSite::new("app", "f", "app.rs", 1), vec!["m".into()]).unwrap()
    }

    #[test]
    fn direct() {
        let err = annotated(Kind::TIMEOUT);
        assert!(is_annotated(&err));
        assert_eq!(kind_of(&err), Kind::TIMEOUT);
    }

    #[test]
    fn external() {
        let err = io::Error::other("plain");
        assert!(!is_annotated(&err));
        assert!(as_annotated(&err).is_none());
        assert_eq!(kind_of(&err), Kind::INTERNAL);
    }

    #[test]
    fn wrapped_by_foreign_error() {
        let err = io::Error::other(annotated(Kind::FORBIDDEN));
        assert!(is_annotated(&err));
        assert_eq!(kind_of(&err), Kind::FORBIDDEN);
    }

    #[test]
    fn io_error_without_payload_ends_the_walk() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert!(!is_annotated(&err));
    }

    #[test]
    fn source_based_wrapper() {
        #[derive(Debug, thiserror::Error)]
        #[error("request failed")]
        struct RequestError(#[source] Error);

        let err = RequestError(annotated(Kind::UNAUTHORIZED));
        assert_eq!(kind_of(&err), Kind::UNAUTHORIZED);
    }

    #[test]
    fn annotated_inside_io_inside_io() {
        let err = io::Error::other(io::Error::other(annotated(Kind::EXPIRED)));
        assert_eq!(kind_of(&err), Kind::EXPIRED);
    }

    #[test]
    fn outermost_wins() {
        let inner = annotated(Kind::TIMEOUT);
        let outer = Error::construct(Kind::TEMPORARY, CallSite::unknown(), vec![inner.into()]).unwrap();
        assert_eq!(kind_of(&outer), Kind::TEMPORARY);
    }
}
