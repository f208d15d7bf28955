//! Integration tests for rendered failure messages.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use verity_validator::message::DIFF_LEGEND;
use verity_validator::prelude::*;

fn first_message<T>(chain: Validator<T>) -> String {
    chain.into_failures().messages()[0].to_owned()
}

#[test]
fn single_line_diff_is_one_triple() {
    let message = first_message(check_if(String::from("abc"), "code").is_equal_to(&String::from("xyz")));
    assert_eq!(
        message,
        format!(
            "\"code\" had an unexpected value.\n\
             \n\
             Actual  : \"abc   \"\n\
             Diff    :  ---+++ \n\
             Expected: \"   xyz\"\n\
             \n\
             {DIFF_LEGEND}"
        )
    );
}

#[test]
fn multi_line_diff_flags_only_the_changed_line() {
    let message = first_message(
        check_if(String::from("line1\nline2\nline3"), "text").is_equal_to(&String::from("line1\nlineX\nline3")),
    );
    assert_eq!(
        message,
        format!(
            "\"text\" had an unexpected value.\n\
             \n\
             Actual@0  : \"line1\n\
             Expected@0: \"line1\n\
             \n\
             Actual@1  : line2 \n\
             Diff      :     -+\n\
             Expected@1: line X\n\
             \n\
             Actual@2  : line3\"\n\
             Expected@2: line3\"\n\
             \n\
             {DIFF_LEGEND}"
        )
    );
}

#[test]
fn identical_multi_line_values_elide_interior_lines() {
    let text = String::from("a\nb\nc\nd\ne");
    let message = MessageBuilder::new(Arc::new(Configuration::default()), "\"text\" differs.")
        .with_diff(Some(&text), &text.clone(), true)
        .render();
    assert_eq!(
        message,
        "\"text\" differs.\n\
         \n\
         Actual@0  : \"a\n\
         Expected@0: \"a\n\
         \n\
         [...]\n\
         \n\
         Actual@4  : e\"\n\
         Expected@4: e\""
    );
    assert!(!message.contains("Diff"));
}

#[test]
fn diff_can_be_disabled() {
    let factory = ValidatorFactory::new();
    factory.update_configuration_with(|updater| {
        updater.set_allow_diff(false);
    });
    let message = first_message(factory.check_if(String::from("abc"), "code").is_equal_to(&String::from("xyz")));
    assert_eq!(
        message,
        "\"code\" had an unexpected value.\n\nActual  : \"abc\"\nExpected: \"xyz\""
    );
}

#[test]
fn colored_diff_styles_changes_instead_of_a_marker_row() {
    let factory = ValidatorFactory::new();
    factory.update_configuration_with(|updater| {
        updater.set_terminal_encoding(TerminalEncoding::Xterm16Colors);
    });
    let message = first_message(factory.check_if(String::from("abc"), "code").is_equal_to(&String::from("xyz")));
    assert_eq!(
        message,
        "\"code\" had an unexpected value.\n\
         \n\
         Actual  : \"\x1b[30;101mabc\x1b[0m\x1b[90m///\x1b[0m\"\n\
         Expected: \"\x1b[90m///\x1b[0m\x1b[30;102mxyz\x1b[0m\""
    );
}

#[test]
fn booleans_are_compared_without_markers() {
    let message = first_message(check_if(true, "flag").is_equal_to(&false));
    assert_eq!(message, "\"flag\" had an unexpected value.\n\nActual  : true\nExpected: false");
}

#[derive(Debug, PartialEq)]
struct Version {
    major: u32,
    build: u32,
}

impl Equatable for Version {}

#[test]
fn equal_renderings_are_told_apart_by_debug_output() {
    let factory = ValidatorFactory::new();
    factory.update_configuration_with(|updater| {
        updater.string_converters_mut().insert::<Version>(|v| format!("v{}", v.major));
    });

    let message = first_message(
        factory
            .check_if(Version { major: 2, build: 7 }, "version")
            .is_equal_to(&Version { major: 2, build: 8 }),
    );
    assert!(message.contains("Actual.debug  : Version { major: 2, build: 7 }"));
    assert!(message.contains("Expected.debug: Version { major: 2, build: 8 }"));
}

#[test]
fn dotted_names_are_not_quoted() {
    let message = first_message(check_if(vec![1, 2], "items").size().is_greater_than(5));
    assert_eq!(
        message,
        "items.size() must be greater than 5.\nActual: 2\nitems : [1, 2]"
    );
}

#[test]
fn bare_messages_drop_their_period_unless_they_list_things() {
    let message = first_message(check_if(5, "x").is_not_equal_to(&5));
    assert_eq!(message, "\"x\" may not be equal to 5");

    let config = Arc::new(Configuration::default());
    let message = MessageBuilder::new(config, "\"x\" must be odd, prime, or zero.").render();
    assert_eq!(message, "\"x\" must be odd, prime, or zero.");
}

#[test]
fn errors_export_as_json() {
    let error = require_that(-1, "count").is_positive().into_result().unwrap_err();
    let json = error.to_json_value();
    assert_eq!(json["kind"], "invalid_argument");
    assert_eq!(json["message"], "\"count\" must be positive.\nActual: -1");
}
