//! Argument guard behaviour.

use std::collections::{BTreeMap, HashMap};

use nebula_util::{OptionExt, UtilError, require_non_empty, require_non_null};
use rstest::rstest;

#[test]
fn null_argument_names_the_argument() {
    let value: Option<&str> = None;
    let err = require_non_null(value, "str").unwrap_err();
    match err {
        UtilError::InvalidArgument { name, .. } => assert_eq!(name, "str"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn present_argument_returns_normally() {
    let value = Some("123");
    assert_eq!(require_non_null(value, "Not thrown").unwrap(), "123");
    assert_eq!(Some(vec![1]).require("v").unwrap(), vec![1]);
}

#[rstest]
#[case(None, true)]
#[case(Some(""), true)]
#[case(Some(" "), false)]
#[case(Some("value"), false)]
fn require_non_empty_cases(#[case] input: Option<&str>, #[case] rejected: bool) {
    assert_eq!(require_non_empty(input, "input").is_err(), rejected);
}

#[rstest]
#[case(0_i64)]
#[case(-1_i64)]
#[case(i64::MAX)]
fn non_nullable_values_always_pass(#[case] value: i64) {
    assert_eq!(require_non_null(value, "value"), Ok(value));
}

#[derive(Debug, PartialEq)]
struct Config {
    retries: u32,
}

#[test]
fn borrowed_values_always_pass() {
    let config = Config { retries: 1 };
    let checked = require_non_null(&config, "config").unwrap();
    assert!(std::ptr::eq(checked, &config));

    let items = [1, 2, 3];
    assert_eq!(require_non_null(&items[..], "items").unwrap(), &[1, 2, 3]);
}

#[test]
fn collections_always_pass() {
    assert_eq!(require_non_null(Vec::<u8>::new(), "vec"), Ok(Vec::new()));
    assert_eq!(
        require_non_null(HashMap::from([("k", 1)]), "map").unwrap().len(),
        1
    );
    assert!(require_non_null(BTreeMap::<u8, u8>::new(), "tree").is_ok());
}

#[test]
fn optional_borrowed_values_are_checked() {
    let config = Config { retries: 3 };
    assert_eq!(require_non_null(Some(&config), "config").unwrap().retries, 3);
    assert!(require_non_null(None::<&Config>, "config").is_err());
}
