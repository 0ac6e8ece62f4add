// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "serde")]
#![expect(missing_docs, reason = "Test code")]

use errs::Kind;

#[test]
fn kinds_serialize_as_tags() {
    assert_eq!(serde_json::to_string(&Kind::NOT_FOUND).unwrap(), "\"not_found\"");

    let kinds: Vec<Kind> = serde_json::from_str(r#"["timeout", "internal"]"#).unwrap();
    assert_eq!(kinds, [Kind::TIMEOUT, Kind::INTERNAL]);
}

#[test]
fn every_kind_survives_json() {
    for kind in Kind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(serde_json::from_str::<Kind>(&json).unwrap(), kind);
    }
}

#[test]
fn unknown_tags_are_rejected() {
    let err = serde_json::from_str::<Kind>("\"sideways\"").unwrap_err();
    assert!(err.to_string().contains("sideways"), "{err}");
}
