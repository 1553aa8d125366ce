use super::*;
use crate::nodes::BlockValue;

#[test]
fn task_items_group_into_a_check_list() {
    let blocks = parse_document("- [ ] Red\n- [x] Green\n- [ ] Blue");
    assert_eq!(type_names(&blocks), vec!["checkList"]);
    let checks: Vec<bool> = blocks[0]
        .children
        .iter()
        .map(|c| matches!(c.value, BlockValue::TaskItem { checked: true }))
        .collect();
    assert_eq!(checks, vec![false, true, false]);
    assert_eq!(blocks[0].children[1].text(), "Green");
}

#[test]
fn capital_x_counts_as_checked() {
    let blocks = parse_document("- [X] shouty");
    assert!(matches!(
        blocks[0].children[0].value,
        BlockValue::TaskItem { checked: true }
    ));
}

#[test]
fn plain_bullets_split_off_from_task_items() {
    let blocks = parse_document("- [ ] task\n- plain");
    assert_eq!(type_names(&blocks), vec!["checkList", "bulletList"]);
}

#[test]
fn unknown_markers_stay_literal_text() {
    let blocks = parse_document("- [!] odd");
    assert_eq!(type_names(&blocks), vec!["bulletList"]);
    assert_eq!(blocks[0].children[0].text(), "[!] odd");
}

#[test]
fn canonical_form() {
    commonmark("- [ ] Red\n- [x] Green\n", "- [ ] Red\n- [x] Green\n");
    commonmark("- [X] done\n", "- [x] done\n");
}

#[test]
fn html_renders_checkboxes() {
    html(
        "- [ ] Red\n- [x] Green\n",
        concat!(
            "<ul>\n",
            "<li><input type=\"checkbox\" disabled=\"\" /> Red</li>\n",
            "<li><input type=\"checkbox\" disabled=\"\" checked=\"\" /> Green</li>\n",
            "</ul>\n"
        ),
    );
}
