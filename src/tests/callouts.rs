use super::*;
use crate::nodes::BlockValue;
use crate::CalloutType;
use ntest::test_case;

#[test]
fn marker_line_turns_a_quote_into_a_callout() {
    let blocks = parse_document("> [!note]\n> Pay attention");
    assert_eq!(type_names(&blocks), vec!["callout"]);
    match blocks[0].value {
        BlockValue::Callout(ref nc) => assert_eq!(nc.callout_type, CalloutType::Note),
        ref other => panic!("expected callout, got {:?}", other),
    }
    assert_eq!(blocks[0].text(), "Pay attention");
}

#[test_case("info")]
#[test_case("warning")]
#[test_case("tip")]
#[test_case("danger")]
#[test_case("note")]
#[test_case("success")]
fn every_type_parses(tag: &str) {
    let blocks = parse_document(&format!("> [!{}]\n> body", tag));
    assert_eq!(type_names(&blocks), vec!["callout"]);
}

#[test]
fn tags_match_caselessly() {
    let lower = parse_document("> [!warning]\n> w");
    let upper = parse_document("> [!WARNING]\n> w");
    assert_eq!(lower[0].value, upper[0].value);
}

#[test]
fn unknown_tags_stay_a_blockquote() {
    let blocks = parse_document("> [!SHRUG]\n> eh");
    assert_eq!(type_names(&blocks), vec!["blockquote"]);
    assert_eq!(blocks[0].text(), "[!SHRUG] eh");
}

#[test]
fn marker_must_be_the_first_line() {
    let blocks = parse_document("> body first\n> [!note]");
    assert_eq!(type_names(&blocks), vec!["blockquote"]);
}

#[test]
fn serialization_uppercases_the_tag() {
    commonmark("> [!note]\n> Pay attention\n", "> [!NOTE]\n> Pay attention\n");
}

#[test]
fn callout_without_body() {
    let blocks = parse_document("> [!TIP]");
    assert_eq!(type_names(&blocks), vec!["callout"]);
    assert_eq!(blocks[0].content, vec![]);
    commonmark("> [!TIP]\n", "> [!TIP]\n");
}

#[test]
fn multi_line_bodies_concatenate() {
    let blocks = parse_document("> [!danger]\n> line one\n> line two");
    assert_eq!(blocks[0].text(), "line one line two");
}

#[test]
fn html_rendering() {
    html(
        "> [!note]\n> Pay attention\n",
        concat!(
            "<div class=\"callout callout-note\">\n",
            "<p class=\"callout-title\">Note</p>\n",
            "<p>Pay attention</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn plain_blockquotes_concatenate_lines() {
    let blocks = parse_document("> a\n> b");
    assert_eq!(type_names(&blocks), vec!["blockquote"]);
    assert_eq!(blocks[0].text(), "a b");
    commonmark("> a\n> b\n", "> a b\n");
}
