use tree_sitter::Node;

use super::go::node_text;

/// Doc comment attached to `node`: the run of comments ending on the line
/// directly above it. A comment trailing code on its own line never starts
/// a doc comment.
pub fn doc_comment(node: Node, src: &str) -> String {
    comment_text(&leading_comments(node, src))
}

/// Raw source of the comments forming `node`'s doc comment, in order.
pub fn leading_comments<'a>(node: Node, src: &'a str) -> Vec<&'a str> {
    let mut comments = Vec::new();
    let mut expected_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(comment) = current {
        if comment.kind() != "comment" || comment.end_position().row + 1 != expected_row {
            break;
        }
        if let Some(before) = comment.prev_named_sibling() {
            if before.kind() != "comment"
                && before.end_position().row == comment.start_position().row
            {
                break;
            }
        }
        comments.push(node_text(comment, src));
        expected_row = comment.start_position().row;
        current = comment.prev_named_sibling();
    }

    comments.reverse();
    comments
}

/// Comment on the same line after `node`, as in `Red = 1 // red`.
pub fn trailing_comment<'a>(node: Node, src: &'a str) -> Option<&'a str> {
    let next = node.next_named_sibling()?;
    (next.kind() == "comment" && next.start_position().row == node.end_position().row)
        .then(|| node_text(next, src))
}

/// Text of a comment group with markers removed.
///
/// Leading and trailing blank lines are dropped, interior runs of blank
/// lines collapse to one, and non-empty text ends with a newline.
pub fn comment_text(comments: &[&str]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for raw in comments {
        if let Some(body) = raw.strip_prefix("//") {
            if is_directive(body) {
                continue;
            }
            lines.push(body.strip_prefix(' ').unwrap_or(body).to_string());
        } else if let Some(body) = raw.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            lines.extend(body.split('\n').map(str::to_string));
        }
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim_end().to_string();
        if line.is_empty() && out.last().map_or(true, |l: &String| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    if out.is_empty() {
        return String::new();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn is_directive(body: &str) -> bool {
    body.starts_with("go:") || body.starts_with("line ") || body.trim_start().starts_with("+build")
}
