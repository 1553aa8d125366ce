use super::*;
use crate::nodes::BlockValue;

#[test]
fn header_separator_rows_make_a_table() {
    let blocks = parse_document("| a | b |\n|---|---|\n| c | d |");
    assert_eq!(type_names(&blocks), vec!["table"]);
    match blocks[0].value {
        BlockValue::Table(ref nt) => {
            assert_eq!(nt.headers, vec!["a", "b"]);
            assert_eq!(nt.rows, vec![vec!["c".to_string(), "d".to_string()]]);
        }
        ref other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn separator_validation_is_loose() {
    let blocks = parse_document("| a | b |\n| :-: | --- |\n| c | d |");
    assert_eq!(type_names(&blocks), vec!["table"]);

    let blocks = parse_document("a | b\n---|---\n1 | 2");
    assert_eq!(type_names(&blocks), vec!["table"]);
}

#[test]
fn pipe_lines_without_a_separator_stay_a_paragraph() {
    let blocks = parse_document("| a | b |\n| c | d |");
    assert_eq!(type_names(&blocks), vec!["paragraph"]);
}

#[test]
fn escaped_pipes_stay_inside_cells() {
    let blocks = parse_document("| a \\| b |\n| --- |\n| c |");
    match blocks[0].value {
        BlockValue::Table(ref nt) => assert_eq!(nt.headers, vec!["a | b"]),
        ref other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn short_rows_are_padded_to_the_header_width() {
    let blocks = parse_document("| a | b |\n|---|---|\n| only |");
    match blocks[0].value {
        BlockValue::Table(ref nt) => {
            assert_eq!(nt.rows, vec![vec!["only".to_string(), String::new()]]);
        }
        ref other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn a_table_ends_at_the_first_non_row_line() {
    let blocks = parse_document("| a |\n|---|\n| b |\nplain text after");
    assert_eq!(type_names(&blocks), vec!["table", "paragraph"]);
}

#[test]
fn canonical_form() {
    commonmark(
        "a | b\n:-|-:\n1 | 2\n",
        "| a | b |\n| --- | --- |\n| 1 | 2 |\n",
    );
    idempotent("| x | y |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |\n");
}

#[test]
fn cell_round_trip_keeps_special_characters() {
    idempotent("| a\\|b | c*d |\n| --- | --- |\n| e | f |\n");
}

#[test]
fn html_rendering() {
    html(
        "| a | b |\n|---|---|\n| c | d |\n",
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "<th>b</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td>c</td>\n",
            "<td>d</td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n"
        ),
    );
}
