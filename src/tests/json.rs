use super::*;
use crate::factory::{Factory, SequentialIds};
use crate::{Document, markdown_to_document};
use serde_json::{json, Value};

#[test]
fn blocks_serialize_with_a_type_tag() {
    let ids = SequentialIds::new();
    let f = Factory::new(&ids);

    let value = serde_json::to_value(f.heading(2, "Hi")).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "b1",
            "type": "heading",
            "level": 2,
            "content": [{ "text": "Hi" }],
        })
    );
}

#[test]
fn styles_serialize_sparsely() {
    let span = styled("x", |s| {
        s.bold = true;
        s.code = true;
    });
    let value = serde_json::to_value(&span).unwrap();
    assert_eq!(
        value,
        json!({ "text": "x", "styles": { "bold": true, "code": true } })
    );
}

#[test]
fn code_blocks_expose_language() {
    let ids = SequentialIds::new();
    let f = Factory::new(&ids);
    let value = serde_json::to_value(f.code_block("js", "x")).unwrap();
    assert_eq!(value["language"], json!("js"));

    let untagged = serde_json::to_value(f.code_block("", "x")).unwrap();
    assert!(untagged.get("language").is_none());
}

#[test]
fn callout_types_are_lowercase() {
    let blocks = parse_document("> [!WARNING]\n> w");
    let value = serde_json::to_value(&blocks[0]).unwrap();
    assert_eq!(value["calloutType"], json!("warning"));
}

#[test]
fn trees_round_trip_through_json() {
    let doc = markdown_to_document(
        "# h\n\n- a\n- [x] hm\n\n```js\ncode\n```\n\n| a |\n| --- |\n| b |\n",
    );
    let text = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&text).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn document_json_shape() {
    let doc = markdown_to_document("hi\n");
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["version"], json!(1));
    assert!(value["meta"]["createdAt"].is_u64());
    assert!(value["blocks"].is_array());
}

#[test]
fn task_items_carry_their_checked_state() {
    let blocks = parse_document("- [x] done");
    let value = serde_json::to_value(&blocks[0]).unwrap();
    assert_eq!(value["children"][0]["type"], json!("taskItem"));
    assert_eq!(value["children"][0]["checked"], json!(true));
}

#[test]
fn nested_list_shape_is_preserved() {
    let blocks = parse_document("- a\n  - b");
    let value = serde_json::to_value(&blocks[0]).unwrap();
    assert_eq!(value["type"], json!("bulletList"));
    assert_eq!(
        value["children"][0]["children"][0]["type"],
        json!("bulletList")
    );
    let round: Value = serde_json::from_str(&value.to_string()).unwrap();
    assert_eq!(round, value);
}
