//! Line-level edits to a block-style YAML document.
//!
//! Only the lines that hold the target key change. Comments, quoting and key
//! order elsewhere in the file stay as written. These functions return `None`
//! for layouts they do not understand (flow collections, block scalars,
//! anchors); the caller then falls back to a full rewrite. The caller also
//! re-parses every result before trusting it.

use serde_yaml::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Single,
    Double,
}

/// Replace the scalar at `segments` in place, keeping its quote style and any
/// trailing comment.
pub(super) fn replace_scalar(raw: &str, segments: &[&str], value: &str) -> Option<String> {
    let mut lines: Vec<String> = raw.split_inclusive('\n').map(str::to_string).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

    let (mut start, mut end, mut index) = (0, refs.len(), None);
    for segment in segments {
        let found = find_key(&refs, start, end, segment)?;
        index = Some(found);
        start = found + 1;
        end = block_end(&refs, found);
    }
    let index = index?;
    let has_children = (start..end).any(|i| is_content(refs[i]));

    let (body, eol) = split_eol(refs[index]);
    let (_, after_colon) = key_of(body)?;
    let tail = &body[after_colon..];
    let token = tail.trim_start_matches(' ');
    let value_at = after_colon + (tail.len() - token.len());

    let replaced = if token.is_empty() || token.starts_with('#') {
        // `key:` with no value of its own is a null only when nothing nests under it.
        if has_children {
            return None;
        }
        let comment = if token.is_empty() {
            String::new()
        } else {
            format!(" {token}")
        };
        format!(
            "{}: {}{comment}{eol}",
            &body[..after_colon - 1],
            render(value, Style::Plain)
        )
    } else {
        let (style, consumed) = scalar_token(token)?;
        let rest = &token[consumed..];
        if !rest.trim().is_empty() && !rest.trim_start().starts_with('#') {
            return None;
        }
        format!(
            "{}{}{rest}{eol}",
            &body[..value_at],
            render(value, style)
        )
    };

    lines[index] = replaced;
    Some(lines.concat())
}

/// Add a key that does not exist yet, creating the missing parent mappings.
///
/// The new entry goes after the last line of the deepest existing parent, or
/// at the end of the file for a new top-level key.
pub(super) fn insert_key(raw: &str, segments: &[&str], value: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split_inclusive('\n').collect();
    let newline = if raw.contains("\r\n") { "\r\n" } else { "\n" };

    let (mut start, mut end) = (0, lines.len());
    let mut parent = None;
    let mut depth = 0;
    for segment in segments {
        match find_key(&lines, start, end, segment) {
            Some(found) => {
                parent = Some(found);
                start = found + 1;
                end = block_end(&lines, found);
                depth += 1;
            }
            None => break,
        }
    }
    if depth == segments.len() {
        return None;
    }

    let first_child = (start..end).find(|&i| is_content(lines[i]));
    let (indent_width, at) = match parent {
        Some(parent) => {
            let (body, _) = split_eol(lines[parent]);
            let (_, after_colon) = key_of(body)?;
            let tail = body[after_colon..].trim();
            if !tail.is_empty() && !tail.starts_with('#') {
                return None;
            }
            let width = first_child.map_or(indent(lines[parent]) + 2, |i| indent(lines[i]));
            let last_child = (start..end).rev().find(|&i| is_content(lines[i]));
            (width, last_child.map_or(parent + 1, |i| i + 1))
        }
        None => (first_child.map_or(0, |i| indent(lines[i])), lines.len()),
    };

    let mut added = String::new();
    let remaining = &segments[depth..];
    for (level, segment) in remaining.iter().enumerate() {
        let pad = " ".repeat(indent_width + 2 * level);
        let key = render(segment, Style::Plain);
        if level + 1 == remaining.len() {
            added.push_str(&format!("{pad}{key}: {}{newline}", render(value, Style::Plain)));
        } else {
            added.push_str(&format!("{pad}{key}:{newline}"));
        }
    }

    let mut out = lines[..at].concat();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(newline);
    }
    out.push_str(&added);
    out.push_str(&lines[at..].concat());
    Some(out)
}

fn split_eol(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Lines that carry document content, as opposed to blanks, comments and
/// document markers.
fn is_content(line: &str) -> bool {
    let trimmed = line.trim();
    !(trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "...")
}

/// The key on a `key: value` line and the byte offset just past its colon.
fn key_of(line: &str) -> Option<(String, usize)> {
    let offset = indent(line);
    let body = &line[offset..];

    let (key, after) = if let Some(rest) = body.strip_prefix('\'') {
        let close = rest.find('\'')?;
        (rest[..close].to_string(), close + 2)
    } else if let Some(rest) = body.strip_prefix('"') {
        let close = rest.find('"')?;
        (rest[..close].to_string(), close + 2)
    } else {
        let colon = body.char_indices().find_map(|(i, c)| {
            (c == ':' && body[i + 1..].chars().next().is_none_or(|n| n.is_whitespace()))
                .then_some(i)
        })?;
        (body[..colon].trim_end().to_string(), colon)
    };

    let rest = &body[after..];
    let gap = indent(rest);
    rest[gap..].starts_with(':').then(|| (key, offset + after + gap + 1))
}

/// Index of the line holding `key` among the direct children of a block.
fn find_key(lines: &[&str], start: usize, end: usize, key: &str) -> Option<usize> {
    let block_indent = (start..end)
        .find(|&i| is_content(lines[i]))
        .map(|i| indent(lines[i]))?;
    (start..end).find(|&i| {
        is_content(lines[i])
            && indent(lines[i]) == block_indent
            && key_of(lines[i]).is_some_and(|(found, _)| found == key)
    })
}

/// One past the last line nested under the key on line `index`.
fn block_end(lines: &[&str], index: usize) -> usize {
    let key_indent = indent(lines[index]);
    (index + 1..lines.len())
        .find(|&i| is_content(lines[i]) && indent(lines[i]) <= key_indent)
        .unwrap_or(lines.len())
}

/// Style and byte length of the scalar at the start of `token`.
fn scalar_token(token: &str) -> Option<(Style, usize)> {
    let bytes = token.as_bytes();
    match bytes.first()? {
        b'\'' => {
            let mut i = 1;
            while i < bytes.len() {
                if bytes[i] == b'\'' {
                    if bytes.get(i + 1) == Some(&b'\'') {
                        i += 2;
                        continue;
                    }
                    return Some((Style::Single, i + 1));
                }
                i += 1;
            }
            None
        }
        b'"' => {
            let mut i = 1;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b'"' => return Some((Style::Double, i + 1)),
                    _ => i += 1,
                }
            }
            None
        }
        b'|' | b'>' | b'&' | b'*' | b'!' | b'{' | b'[' | b'%' | b'@' | b'`' => None,
        _ => {
            let end = [" #", "\t#"]
                .iter()
                .filter_map(|marker| token.find(marker))
                .min()
                .unwrap_or(token.len());
            Some((Style::Plain, token[..end].trim_end().len()))
        }
    }
}

/// Render `value` as a YAML string scalar, keeping `style` where it is safe.
fn render(value: &str, style: Style) -> String {
    let style = match style {
        _ if value.contains(['\n', '\r', '\t']) => Style::Double,
        Style::Plain if !reads_back_as_string(value) => Style::Single,
        other => other,
    };
    match style {
        Style::Plain => value.to_string(),
        Style::Single => format!("'{}'", value.replace('\'', "''")),
        Style::Double => {
            let mut out = String::with_capacity(value.len() + 2);
            out.push('"');
            for c in value.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    other => out.push(other),
                }
            }
            out.push('"');
            out
        }
    }
}

/// Words that YAML 1.1 readers load as booleans even though YAML 1.2 does not.
const LEGACY_BOOLEANS: &[&str] = &["y", "n", "yes", "no", "on", "off"];

fn reads_back_as_string(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && !LEGACY_BOOLEANS.contains(&value.to_ascii_lowercase().as_str())
        && serde_yaml::from_str::<Value>(value).is_ok_and(|parsed| parsed.as_str() == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_comment_and_quotes() {
        let raw = "# header\nname: 'old' # trailing\nother: 1\n";
        let edited = replace_scalar(raw, &["name"], "it's").unwrap();
        assert_eq!(edited, "# header\nname: 'it''s' # trailing\nother: 1\n");
    }

    #[test]
    fn test_replace_nested_plain_value() {
        let raw = "api:\n  # secret\n  key: abc\n  model: gpt\nlang: en\n";
        let edited = replace_scalar(raw, &["api", "model"], "claude").unwrap();
        assert_eq!(edited, "api:\n  # secret\n  key: abc\n  model: claude\nlang: en\n");
    }

    #[test]
    fn test_replace_double_quoted_escapes() {
        let raw = "path: \"C:\\\\old\"\n";
        let edited = replace_scalar(raw, &["path"], "say \"hi\"").unwrap();
        assert_eq!(edited, "path: \"say \\\"hi\\\"\"\n");
    }

    #[test]
    fn test_plain_value_that_would_change_type_is_quoted() {
        let edited = replace_scalar("flag: on\n", &["flag"], "yes").unwrap();
        assert_eq!(edited, "flag: 'yes'\n");
        let edited = replace_scalar("n: x\n", &["n"], "4").unwrap();
        assert_eq!(edited, "n: '4'\n");
        let edited = replace_scalar("n: x\n", &["n"], "a: b").unwrap();
        assert_eq!(edited, "n: 'a: b'\n");
    }

    #[test]
    fn test_replace_null_value() {
        let edited = replace_scalar("lang: # unset\nx: 1\n", &["lang"], "en").unwrap();
        assert_eq!(edited, "lang: en # unset\nx: 1\n");
    }

    #[test]
    fn test_replace_declines_block_scalars_and_mappings() {
        assert!(replace_scalar("text: |\n  line\n", &["text"], "x").is_none());
        assert!(replace_scalar("api:\n  key: a\n", &["api"], "x").is_none());
        assert!(replace_scalar("list: [a, b]\n", &["list"], "x").is_none());
    }

    #[test]
    fn test_replace_ignores_same_key_at_other_depth() {
        let raw = "api:\n  key: nested\nkey: top\n";
        let edited = replace_scalar(raw, &["key"], "changed").unwrap();
        assert_eq!(edited, "api:\n  key: nested\nkey: changed\n");
    }

    #[test]
    fn test_insert_top_level_appends() {
        let edited = insert_key("# c\na: 1", &["b"], "two").unwrap();
        assert_eq!(edited, "# c\na: 1\nb: two\n");
        assert_eq!(insert_key("", &["b"], "x").unwrap(), "b: x\n");
    }

    #[test]
    fn test_insert_into_existing_block_uses_its_indent() {
        let raw = "api:\n    key: a # k\n\n# next section\nlang: en\n";
        let edited = insert_key(raw, &["api", "model"], "gpt").unwrap();
        assert_eq!(
            edited,
            "api:\n    key: a # k\n    model: gpt\n\n# next section\nlang: en\n"
        );
    }

    #[test]
    fn test_insert_creates_missing_parents() {
        let edited = insert_key("lang: en\n", &["whisper", "model", "size"], "large").unwrap();
        assert_eq!(edited, "lang: en\nwhisper:\n  model:\n    size: large\n");
    }

    #[test]
    fn test_insert_under_scalar_parent_declines() {
        assert!(insert_key("whisper: large\n", &["whisper", "language"], "en").is_none());
    }

    #[test]
    fn test_crlf_is_preserved() {
        let edited = replace_scalar("a: 1\r\nb: x\r\n", &["b"], "y").unwrap();
        assert_eq!(edited, "a: 1\r\nb: y\r\n");
        let edited = insert_key("a: 1\r\n", &["c"], "z").unwrap();
        assert_eq!(edited, "a: 1\r\nc: z\r\n");
    }

    #[test]
    fn test_quoted_keys_are_found() {
        let edited = replace_scalar("\"lang\": en\n'x': 1\n", &["x"], "2").unwrap();
        assert_eq!(edited, "\"lang\": en\n'x': '2'\n");
    }
}
