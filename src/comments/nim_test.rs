use crate::comments::{collect_comments, comment_texts};
use pretty_assertions::assert_eq;

#[test]
fn hash_comment() {
    assert_eq!(
        comment_texts("main.nim", "echo 1 # TODO 5: x\n"),
        vec!["# TODO 5: x"]
    );
}

#[test]
fn block_comment_includes_both_delimiters() {
    let comments = collect_comments("main.nim", "#[ first\n TODO 6: x ]#\necho 1\n");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "#[ first\n TODO 6: x ]#");
    assert_eq!(comments[0].lines.len(), 2);
}

#[test]
fn nested_block_comment() {
    assert_eq!(
        comment_texts("main.nim", "#[ a #[ b ]# c ]#\n"),
        vec!["#[ a #[ b ]# c ]#"]
    );
}

#[test]
fn plain_code_is_not_a_comment() {
    assert!(collect_comments("main.nim", "let x = [1, 2]\necho x\n").is_empty());
}

#[test]
fn hash_in_string_is_ignored() {
    assert!(collect_comments("main.nim", "echo \"#[ no ]#\"\n").is_empty());
}
