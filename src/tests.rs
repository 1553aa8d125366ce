//! Test harness: shared helpers and one module per concern.

use crate::factory::SequentialIds;
use crate::nodes::{Block, Styles, TextSpan};
use crate::parser::parse_document_with_ids;
use crate::{blocks_to_markdown, parse_document};

mod callouts;
mod code;
mod json;
mod roundtrip;
mod table;
mod tasklist;

fn compare_strs(output: &str, expected: &str, kind: &str, input: &str) {
    if output != expected {
        println!("Running {} test", kind);
        println!("Input:");
        println!("==============================");
        println!("{}", input);
        println!("==============================");
        println!("Got:");
        println!("==============================");
        println!("{}", output);
        println!("==============================");
    }
    pretty_assertions::assert_eq!(output, expected);
}

/// Parse with deterministic ids and compare the canonical markdown.
#[track_caller]
fn commonmark(input: &str, expected: &str) {
    let blocks = parse_document_with_ids(input, &SequentialIds::new());
    let output = blocks_to_markdown(&blocks);
    compare_strs(&output, expected, "markdown", input);
}

/// Parse and compare the rendered HTML fragment.
#[track_caller]
fn html(input: &str, expected: &str) {
    let blocks = parse_document(input);
    let output = crate::html::blocks_to_html(&blocks);
    compare_strs(&output, expected, "html", input);
}

/// Assert that serializing twice through a parse is stable.
#[track_caller]
fn idempotent(input: &str) {
    let first = blocks_to_markdown(&parse_document(input));
    let second = blocks_to_markdown(&parse_document(&first));
    compare_strs(&second, &first, "idempotence", input);
}

/// Assert the canonical span-merge invariant: no two adjacent spans share
/// a style set, and no span is empty.
#[track_caller]
fn assert_merged(spans: &[TextSpan]) {
    for span in spans {
        assert!(!span.text.is_empty(), "empty span in {:?}", spans);
    }
    for pair in spans.windows(2) {
        assert_ne!(
            pair[0].styles, pair[1].styles,
            "adjacent spans share styles: {:?}",
            spans
        );
    }
}

/// A span with the styles produced by `f`.
fn styled(text: &str, f: impl FnOnce(&mut Styles)) -> TextSpan {
    let mut styles = Styles::default();
    f(&mut styles);
    TextSpan::new(text, styles)
}

/// The sequence of type tags of a block slice.
fn type_names(blocks: &[Block]) -> Vec<&'static str> {
    blocks.iter().map(|b| b.value.type_name()).collect()
}
