// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_wiring_splits_port_and_object() {
    let wiring = parse_wiring(&["inp:raw".to_string(), "aux:side".to_string()]).unwrap();
    assert_eq!(wiring.get("inp").map(String::as_str), Some("raw"));
    assert_eq!(wiring.get("aux").map(String::as_str), Some("side"));
}

#[yare::parameterized(
    no_colon     = { "inpraw" },
    empty_port   = { ":raw" },
    empty_object = { "inp:" },
)]
fn parse_wiring_rejects_malformed_bindings(binding: &str) {
    assert!(parse_wiring(&[binding.to_string()]).is_err());
}

#[test]
fn parse_wiring_rejects_duplicate_ports() {
    let err = parse_wiring(&["inp:a".to_string(), "inp:b".to_string()]).unwrap_err();
    assert!(err.to_string().contains("bound twice"));
}

#[test]
fn parse_wiring_keeps_the_first_colon_as_separator() {
    // Object names cannot contain ':' but the split must not eat ports
    let wiring = parse_wiring(&["inp:a:b".to_string()]).unwrap();
    assert_eq!(wiring.get("inp").map(String::as_str), Some("a:b"));
}
