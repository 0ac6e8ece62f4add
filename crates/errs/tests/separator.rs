// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

// The separator is process-wide, so everything that changes it lives in this one test.

use std::io;

#[test]
fn separator_is_configurable() {
    assert_eq!(errs::separator(), errs::DEFAULT_SEPARATOR);

    let err = errs::internal!(io::Error::other("external error")).unwrap();
    assert_eq!(err.to_string().matches(" :: ").count(), 1);

    errs::set_separator(" <- ");
    assert_eq!(errs::separator(), " <- ");

    let rendered = err.to_string();
    assert!(rendered.starts_with("external error <- "), "{rendered}");
    assert!(!rendered.contains(" :: "), "{rendered}");

    errs::set_separator(String::from(" | "));
    assert!(err.to_string().starts_with("external error | "));

    // render_with does not depend on the global
    assert!(errs::render_with(&err, "/").starts_with("external error/"));

    errs::set_separator(errs::DEFAULT_SEPARATOR);
    assert_eq!(errs::separator(), " :: ");
}
