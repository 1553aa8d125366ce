use super::*;
use crate::factory::{Factory, SequentialIds};
use crate::CalloutType;

/// Stringify, reparse, and require the same type sequence and the same
/// content text per block.  Ids are allowed to differ.
#[track_caller]
fn assert_round_trips(blocks: &[Block]) {
    let markdown = blocks_to_markdown(blocks);
    let reparsed = parse_document(&markdown);

    assert_eq!(
        type_names(&reparsed),
        type_names(blocks),
        "type sequence changed over:\n{}",
        markdown
    );
    for (before, after) in blocks.iter().zip(&reparsed) {
        assert_eq!(before.text(), after.text(), "content changed over:\n{}", markdown);
        assert_eq!(
            before.children.len(),
            after.children.len(),
            "child count changed over:\n{}",
            markdown
        );
        for (b, a) in before.children.iter().zip(&after.children) {
            assert_eq!(b.text(), a.text());
            assert_eq!(b.value.type_name(), a.value.type_name());
        }
    }
}

#[test]
fn factory_built_trees_round_trip() {
    let ids = SequentialIds::new();
    let f = Factory::new(&ids);

    let blocks = vec![
        f.h1("The title"),
        f.paragraph("Plain prose with several words."),
        f.bullet_list(["alpha", "beta", "gamma"]),
        f.numbered_list(["first", "second"]),
        f.check_list([(false, "todo"), (true, "done")]),
        f.code_block("rust", "fn main() {}\n// done"),
        f.block_quote("Someone said this."),
        f.callout(CalloutType::Warning, "Mind the gap."),
        f.divider(),
        f.image("https://x.com/a.png", "a chart"),
        f.table(
            vec!["name".into(), "count".into()],
            vec![vec!["widgets".into(), "3".into()]],
        ),
        f.paragraph("The end."),
    ];

    assert_round_trips(&blocks);
}

#[test]
fn reparsed_ids_are_fresh() {
    let ids = SequentialIds::new();
    let f = Factory::new(&ids);
    let blocks = vec![f.paragraph("hello")];

    let reparsed = parse_document(&blocks_to_markdown(&blocks));
    assert_ne!(reparsed[0].id, blocks[0].id);
}

#[test]
fn stringify_is_idempotent_over_messy_input() {
    for input in [
        "#Hello\n#  # Hi\n\n  text  \n\n\n\nmore\n",
        "- a\n-    spaced\n* mixed\n1. one\n",
        "> quote\nno longer a quote\n",
        "**bold** *italic* `code` ~~strike~~ ==mark==\n",
        "| a | b\n|--|--\n| 1 | 2\n\ntrailing | pipe text\n",
        "```\nunterminated fence\n",
        "danglers: * _ ` ~~ == [\n",
        "deep\n- one\n  - two\n    - three\n",
        "![img](u)\n---\n> [!tip]\n> hi\n",
    ] {
        idempotent(input);
    }
}

#[test]
fn empty_round_trip() {
    assert_eq!(blocks_to_markdown(&parse_document("")), "");
    assert_eq!(parse_document(&blocks_to_markdown(&[])), vec![]);
}

#[test]
fn span_styles_survive_the_trip() {
    let input = "a **b** *c* `d` ~~e~~ ==f== [g](https://x.com)\n";
    let first = parse_document(input);
    let second = parse_document(&blocks_to_markdown(&first));
    assert_eq!(first[0].content, second[0].content);
}
