// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Test code")]

use std::io;

use errs::{Error, Kind};

#[test]
fn every_macro_sets_its_kind() {
    let cases: [(Option<Error>, Kind, &str); 11] = [
        (errs::internal!("m"), Kind::INTERNAL, "internal"),
        (errs::conflict!("m"), Kind::CONFLICT, "conflict"),
        (errs::expired!("m"), Kind::EXPIRED, "expired"),
        (errs::forbidden!("m"), Kind::FORBIDDEN, "forbidden"),
        (errs::invalid!("m"), Kind::INVALID, "invalid"),
        (errs::not_found!("m"), Kind::NOT_FOUND, "not_found"),
        (errs::not_implemented!("m"), Kind::NOT_IMPLEMENTED, "not_implemented"),
        (errs::temporary!("m"), Kind::TEMPORARY, "temporary"),
        (errs::timeout!("m"), Kind::TIMEOUT, "timeout"),
        (errs::unauthorized!("m"), Kind::UNAUTHORIZED, "unauthorized"),
        (errs::unprocessable!("m"), Kind::UNPROCESSABLE, "unprocessable"),
    ];

    for (err, kind, tag) in cases {
        let err = err.unwrap();
        assert_eq!(err.kind(), kind);
        assert_eq!(err.kind().as_str(), tag);
        assert_eq!(errs::kind_of(&err), kind);
        assert!(err.to_string().contains(&format!("[{tag}]")));
    }
}

#[test]
fn codes() {
    for (index, kind) in Kind::ALL.into_iter().enumerate() {
        assert_eq!(usize::try_from(kind.code()).unwrap(), index + 1);
        assert_eq!(Kind::from_code(kind.code()), kind);
    }

    assert_eq!(Kind::from_code(0).as_str(), "unknown");
    assert_eq!(Kind::from_code(12).as_str(), "unknown");
}

#[test]
fn parse_tags() {
    assert_eq!("not_implemented".parse::<Kind>().unwrap(), Kind::NOT_IMPLEMENTED);

    let err = "unknown".parse::<Kind>().unwrap_err();
    assert_eq!(err.tag(), "unknown");
    assert_eq!(err.to_string(), "unrecognized error kind tag: \"unknown\"");
}

#[test]
fn kind_of_external_is_internal() {
    let err = io::Error::other("plain");
    assert_eq!(errs::kind_of(&err), Kind::INTERNAL);
    assert!(!errs::is_annotated(&err));
}

#[test]
fn kind_of_looks_through_foreign_wrappers() {
    let annotated = errs::expired!("lease lost").unwrap();
    let wrapped = io::Error::other(annotated);

    assert!(errs::is_annotated(&wrapped));
    assert_eq!(errs::kind_of(&wrapped), Kind::EXPIRED);
    assert_eq!(errs::as_annotated(&wrapped).unwrap().message(), "lease lost");
}
