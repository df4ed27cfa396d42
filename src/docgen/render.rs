//! Doc comment rendering and identifier helpers handed to renderers.

/// Synopsis used when a package has no usable documentation.
pub const SYNOPSIS_UNAVAILABLE: &str = "Synopsis is unavailable.";

enum Block {
    Para(Vec<String>),
    Heading(String),
    Pre(Vec<String>),
}

/// Converts doc comment text to HTML.
///
/// Paragraphs become `<p>`, indented runs become `<pre>`, and a lone
/// capitalised line between paragraphs becomes an `<h3>` heading. Text is
/// escaped; URLs are linked.
pub fn render_doc(text: &str) -> String {
    let mut out = String::new();
    for block in blocks(text) {
        match block {
            Block::Para(lines) => {
                out.push_str("<p>\n");
                for line in lines {
                    emphasize(&mut out, &line);
                    out.push('\n');
                }
                out.push_str("</p>\n");
            }
            Block::Heading(line) => {
                out.push_str("<h3 id=\"");
                out.push_str(&heading_id(&line));
                out.push_str("\">");
                escape_nice(&mut out, &line);
                out.push_str("</h3>\n");
            }
            Block::Pre(lines) => {
                out.push_str("<pre>");
                for line in lines {
                    escape(&mut out, &line);
                    out.push('\n');
                }
                out.push_str("</pre>\n");
            }
        }
    }
    out
}

fn blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    let mut para: Vec<String> = Vec::new();
    let mut last_was_blank = false;
    let mut last_was_heading = false;

    let close = |para: &mut Vec<String>, out: &mut Vec<Block>| {
        if !para.is_empty() {
            out.push(Block::Para(std::mem::take(para)));
        }
    };

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_blank(line) {
            close(&mut para, &mut out);
            i += 1;
            last_was_blank = true;
            continue;
        }

        if indent_len(line) > 0 {
            close(&mut para, &mut out);
            let mut j = i + 1;
            while j < lines.len() && (is_blank(lines[j]) || indent_len(lines[j]) > 0) {
                j += 1;
            }
            while j > i && is_blank(lines[j - 1]) {
                j -= 1;
            }
            out.push(Block::Pre(unindent(&lines[i..j])));
            i = j;
            last_was_heading = false;
            continue;
        }

        if last_was_blank
            && !last_was_heading
            && i + 2 < lines.len()
            && is_blank(lines[i + 1])
            && !is_blank(lines[i + 2])
            && indent_len(lines[i + 2]) == 0
        {
            if let Some(head) = heading(line) {
                close(&mut para, &mut out);
                out.push(Block::Heading(head));
                i += 2;
                last_was_heading = true;
                continue;
            }
        }

        last_was_blank = false;
        last_was_heading = false;
        para.push(line.to_string());
        i += 1;
    }
    close(&mut para, &mut out);
    out
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

fn unindent(lines: &[&str]) -> Vec<String> {
    let prefix = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| &l[..indent_len(l)])
        .reduce(common_prefix)
        .unwrap_or("");

    lines
        .iter()
        .map(|l| {
            if is_blank(l) {
                String::new()
            } else {
                l[prefix.len()..].to_string()
            }
        })
        .collect()
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let n = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..n]
}

fn heading(line: &str) -> Option<String> {
    let line = line.trim();
    let first = line.chars().next()?;
    if !first.is_alphabetic() || !first.is_uppercase() {
        return None;
    }
    let last = line.chars().last()?;
    if !last.is_alphanumeric() {
        return None;
    }
    if line.chars().any(|c| ",.;:!?+*/=()[]{}_^°&§~%#@<\">\\".contains(c)) {
        return None;
    }
    // An apostrophe is only allowed as a possessive "'s".
    let mut rest = line;
    while let Some(i) = rest.find('\'') {
        let after = &rest[i + 1..];
        if !after.starts_with('s') || after[1..].chars().next().is_some_and(|c| c != ' ') {
            return None;
        }
        rest = &after[1..];
    }
    Some(line.to_string())
}

fn heading_id(line: &str) -> String {
    let id: String = line
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("hdr-{}", id)
}

fn escape(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Escapes `s`, turning ``` `` ``` and `''` into typographic quotes.
fn escape_nice(out: &mut String, s: &str) {
    let quoted = s.replace("``", "\u{201c}").replace("''", "\u{201d}");
    escape(out, &quoted);
}

/// Writes a paragraph line with URLs turned into links.
fn emphasize(out: &mut String, line: &str) {
    let mut rest = line;
    while let Some(start) = find_url(rest) {
        escape_nice(out, &rest[..start]);
        let tail = &rest[start..];
        let end = tail
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '<' | '>'))
            .unwrap_or(tail.len());
        let url = tail[..end].trim_end_matches(['.', ',', ':', ';', '?', '!', ')']);
        out.push_str("<a href=\"");
        escape(out, url);
        out.push_str("\">");
        escape(out, url);
        out.push_str("</a>");
        rest = &tail[url.len()..];
    }
    escape_nice(out, rest);
}

fn find_url(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// First sentence of a doc comment, whitespace collapsed.
///
/// A sentence ends at a period followed by whitespace unless the period
/// follows a single capital letter (an initial). Copyright and authorship
/// notices yield an empty synopsis.
pub fn synopsis(text: &str) -> String {
    let sentence = &text[..first_sentence_len(text)];
    let clean = sentence.split_whitespace().collect::<Vec<_>>().join(" ");

    let lower = clean.to_lowercase();
    for prefix in ["copyright", "all rights", "author"] {
        if lower.starts_with(prefix) {
            return String::new();
        }
    }
    clean
}

fn first_sentence_len(s: &str) -> usize {
    let (mut ppp, mut pp, mut p) = (' ', ' ', ' ');
    for (i, q) in s.char_indices() {
        let q = if matches!(q, '\n' | '\r' | '\t') { ' ' } else { q };
        if q == ' ' && p == '.' && (!pp.is_uppercase() || ppp.is_uppercase()) {
            return i;
        }
        if p == '\u{3002}' || p == '\u{ff0e}' {
            return i;
        }
        ppp = pp;
        pp = p;
        p = q;
    }
    s.len()
}

/// Synopsis for the package index; falls back to [`SYNOPSIS_UNAVAILABLE`].
pub fn index_synopsis(doc: &str) -> String {
    let s = synopsis(doc);
    if s.is_empty() {
        SYNOPSIS_UNAVAILABLE.to_string()
    } else {
        s
    }
}

/// Anchor id for a section or declaration name, e.g. `Mesh Draw` becomes
/// `mesh-draw`.
pub fn section_id(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-')
        .map(|c| if c == ' ' { '-' } else { c.to_ascii_lowercase() })
        .collect();

    let mut id = String::with_capacity(kept.len());
    for c in kept.chars() {
        if c == '-' && id.ends_with('-') {
            continue;
        }
        id.push(c);
    }
    id.trim_matches('-').to_string()
}

/// Filesystem-safe identifier for a package path.
pub fn path_id(path: &str) -> String {
    path.replace('/', "-")
}
