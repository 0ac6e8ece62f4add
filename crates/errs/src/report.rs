// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;

use tracing::{Level, event};

use crate::as_annotated;

/// Emits an `ERROR` event for `err` if it is marked for logging.
///
/// The first annotated [`Error`](crate::Error) in the chain decides. If its log flag is set, one
/// event is recorded through [`tracing`] and `true` is returned. The event message is the error's
/// message, and the kind, operation and rendered trace are attached as fields. Errors that are
/// not annotated or not marked are ignored.
///
/// # Examples
///
/// ```rust
/// let err = errs::timeout!("upstream did not answer").unwrap().log();
/// assert!(errs::report(&err));
///
/// let quiet = errs::timeout!("upstream did not answer").unwrap();
/// assert!(!errs::report(&quiet));
/// ```
pub fn report(err: &(dyn StdError + 'static)) -> bool {
    let Some(annotated) = as_annotated(err).filter(|e| e.to_log()) else {
        return false;
    };

    event!(
        Level::ERROR,
        message = annotated.message(),
        kind = %annotated.kind(),
        operation = %annotated.operation(),
        trace = %annotated
    );

    true
}
