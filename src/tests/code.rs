use super::*;
use crate::factory;
use crate::nodes::BlockValue;

#[test]
fn codefence() {
    let blocks = parse_document("```js\ncode\n```");
    assert_eq!(blocks.len(), 1);
    match blocks[0].value {
        BlockValue::CodeBlock(ref ncb) => assert_eq!(ncb.info, "js"),
        ref other => panic!("expected code block, got {:?}", other),
    }
    assert_eq!(blocks[0].text(), "code");
}

#[test]
fn fence_contents_are_verbatim() {
    let blocks = parse_document("```\n**x** and [a](b)\n# not a heading\n```");
    assert_eq!(blocks[0].text(), "**x** and [a](b)\n# not a heading");
    assert_eq!(blocks[0].content.len(), 1);
    assert!(blocks[0].content[0].styles.is_plain());
}

#[test]
fn unterminated_fence_runs_to_end_of_input() {
    let blocks = parse_document("```rs\nlet x;\nlet y;");
    assert_eq!(type_names(&blocks), vec!["codeBlock"]);
    assert_eq!(blocks[0].text(), "let x;\nlet y;");
}

#[test]
fn blank_lines_inside_fences_are_kept() {
    let blocks = parse_document("```\na\n\nb\n```");
    assert_eq!(blocks[0].text(), "a\n\nb");
}

#[test]
fn info_string_keeps_only_the_language_word() {
    let blocks = parse_document("``` rust yum\nfn main() {}\n```");
    match blocks[0].value {
        BlockValue::CodeBlock(ref ncb) => assert_eq!(ncb.info, "rust"),
        ref other => panic!("expected code block, got {:?}", other),
    }
}

#[test]
fn canonical_form() {
    commonmark("```js\ncode\n```\n", "```js\ncode\n```\n");
}

#[test]
fn tildes_are_not_fences() {
    let blocks = parse_document("~~~\ntext\n~~~");
    assert_eq!(type_names(&blocks), vec!["paragraph"]);
}

#[test]
fn longer_fences_close_only_on_matching_length() {
    let blocks = parse_document("````\n```\n````");
    assert_eq!(type_names(&blocks), vec!["codeBlock"]);
    assert_eq!(blocks[0].text(), "```");
}

#[test]
fn fence_length_adapts_to_contents() {
    let block = factory::code_block("", "```");
    let output = blocks_to_markdown(&[block]);
    assert_eq!(output, "````\n```\n````\n");

    let reparsed = parse_document(&output);
    assert_eq!(reparsed[0].text(), "```");
}

#[test]
fn empty_code_block() {
    let blocks = parse_document("```\n```");
    assert_eq!(type_names(&blocks), vec!["codeBlock"]);
    assert_eq!(blocks[0].content, vec![]);
    assert_eq!(blocks_to_markdown(&blocks), "```\n```\n");
}
