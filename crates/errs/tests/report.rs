// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

use std::io;

use errs::Kind;

mod util;

use util::LogCapture;

#[test]
fn marked_error_is_reported() {
    let capture = LogCapture::new();
    let err = errs::not_found!("no such user %s", "ada").unwrap().log();

    assert!(capture.capture(|| errs::report(&err)));

    capture.assert_contains("ERROR");
    capture.assert_contains("no such user ada");
    capture.assert_contains("kind=not_found");
    capture.assert_contains("operation=report::marked_error_is_reported:");
    capture.assert_contains("trace=report::marked_error_is_reported:");
}

#[test]
fn unmarked_error_is_quiet() {
    let capture = LogCapture::new();
    let err = errs::not_found!("no such user").unwrap();

    assert!(!capture.capture(|| errs::report(&err)));
    assert_eq!(capture.output(), "");
}

#[test]
fn external_error_is_quiet() {
    let capture = LogCapture::new();
    let err = io::Error::other("plain");

    assert!(!capture.capture(|| errs::report(&err)));
    assert_eq!(capture.output(), "");
}

#[test]
fn mark_survives_wrapping() {
    let capture = LogCapture::new();
    let inner = errs::timeout!("upstream slow").unwrap().log();
    let outer = errs::temporary!(inner, "request failed").unwrap();
    let foreign = io::Error::other(outer);

    assert!(capture.capture(|| errs::report(&foreign)));
    capture.assert_contains("request failed");
    capture.assert_contains("kind=temporary");
}

#[test]
fn coercion_is_logged_at_debug() {
    let capture = LogCapture::new();
    let err = capture.capture(|| errs::new!(Kind::from_code(99), "odd").unwrap());

    assert_eq!(err.kind(), Kind::INTERNAL);
    capture.assert_contains("DEBUG");
    capture.assert_contains("code=99");
}
