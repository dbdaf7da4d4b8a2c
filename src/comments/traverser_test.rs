use super::*;
use crate::comments::Comment;
use crate::logging::NoopLogger;
use pretty_assertions::assert_eq;

fn visit_all(files: &[(&str, &str)]) -> Result<Vec<Comment>, Error> {
    let logger = NoopLogger;
    let mut traverser = CommentTraverser::new(&logger);
    let mut out = Vec::new();
    for (name, src) in files {
        for (idx, line) in src.split_inclusive('\n').enumerate() {
            traverser.visit_line(name, line, idx + 1, &mut |c| {
                out.push(c);
                Ok(())
            })?;
        }
    }
    traverser.finish();
    Ok(out)
}

#[test]
fn unsupported_extension_is_skipped() {
    let comments = visit_all(&[("notes.txt", "// TODO: nothing\n")]).unwrap();
    assert!(comments.is_empty());
}

#[test]
fn unterminated_comment_does_not_leak_into_next_file() {
    let comments = visit_all(&[
        ("a.go", "/* open\n"),
        ("b.go", "x := 1\n// closed */\n"),
    ])
    .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].filename, "b.go");
    assert_eq!(comments[0].text, "// closed */");
}

#[test]
fn dialect_changes_with_the_file() {
    let comments = visit_all(&[("a.py", "# py\n"), ("b.go", "# not a comment\n// go\n")]).unwrap();
    let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["# py", "// go"]);
}

#[test]
fn comment_on_first_character_of_file() {
    let comments = visit_all(&[("a.go", "// first\n")]).unwrap();
    assert_eq!(comments[0].text, "// first");
    assert_eq!(comments[0].line_no, 1);
}

#[test]
fn callback_error_aborts_traversal() {
    let logger = NoopLogger;
    let mut traverser = CommentTraverser::new(&logger);
    let mut calls = 0;
    let mut emit = |_: Comment| {
        calls += 1;
        Err(Error::Config("stop".into()))
    };
    let err = traverser
        .visit_line("a.go", "// one\n", 1, &mut emit)
        .unwrap_err();
    assert_eq!(err.to_string(), "stop");
    assert_eq!(calls, 1);
}

#[test]
fn invariant_violation_propagates() {
    // No Twig dialect transition enters a string; drive one there directly.
    let mut matcher = CommentMatcher::for_dialect(crate::language::Dialect::Twig);
    let at = Position {
        filename: "page.twig",
        line: "x\n",
        line_no: 1,
    };
    let err = matcher
        .step(CommentState::InString, &at, Tokens::EMPTY, &mut |_| Ok(()))
        .unwrap_err();
    assert!(err.is_defect());
}

#[test]
fn repeated_traversals_are_identical() {
    let files = [("a.rs", "/* a */\n// b\n"), ("b.vue", "<!-- c -->\n")];
    assert_eq!(visit_all(&files).unwrap(), visit_all(&files).unwrap());
}
