//! Frontmatter encoding and decoding
//!
//! Decoding is lenient: anything that is not an intact `---` block at the top
//! of the text is treated as plain body, so a malformed header never turns into
//! an error. Encoding is deterministic and quotes exactly the strings that
//! would otherwise change meaning on the way back in, plus glob patterns,
//! which editors expect quoted (`applyTo: '**/*.py'`).

use crate::core::value::{FrontMatterValue, Metadata};
use crate::error::{PromptMatterError, Result};
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

const DELIMITER: &str = "---";

fn key_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<key>[^\s#:\-][^:]*?)\s*:\s*(?P<value>.*?)\s*$")
            .expect("key line pattern is valid")
    })
}

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?[0-9]+$").expect("integer pattern is valid"))
}

/// Split raw text into metadata and body.
///
/// Returns empty metadata and the untouched input when there is no complete
/// frontmatter block.
pub fn parse(raw: &str) -> (Metadata, String) {
    match split_front_matter(raw) {
        Some((block, body)) => (parse_block(block), body.to_string()),
        None => (Metadata::new(), raw.to_string()),
    }
}

/// Render metadata and body back into raw text.
///
/// Fails only for metadata the one-key-per-line format cannot carry, such as
/// values containing line breaks.
pub fn serialize(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        // A body that itself opens with a closed `---` block would be read
        // back as metadata, so fence it with an empty header.
        if split_front_matter(body).is_some() {
            return Ok(format!("{DELIMITER}\n{DELIMITER}\n{body}"));
        }
        return Ok(body.to_string());
    }

    let mut out = String::with_capacity(body.len() + 64 * metadata.len());
    out.push_str(DELIMITER);
    out.push('\n');
    for (key, value) in metadata {
        validate_key(key)?;
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&encode_value(key, value)?);
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    Ok(out)
}

/// Locate an intact block, returning `(block, body)`
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let first_end = raw.find('\n')?;
    if trim_cr(&raw[..first_end]) != DELIMITER {
        return None;
    }

    let block_start = first_end + 1;
    let mut offset = block_start;
    for line in raw[block_start..].split_inclusive('\n') {
        if trim_cr(line.trim_end_matches('\n')) == DELIMITER {
            return Some((&raw[block_start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    debug!("Front matter opened but never closed, treating as plain text");
    None
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    let mut lines = block.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(caps) = key_line_regex().captures(line) else {
            debug!("Skipping front matter line without a key: {:?}", line);
            continue;
        };

        let key = caps["key"].to_string();
        let raw_value = caps.name("value").map(|m| m.as_str()).unwrap_or("");

        let value = if raw_value.is_empty() {
            // `key:` followed by `- item` lines
            let mut items = Vec::new();
            while let Some(next) = lines.peek() {
                let item = next.trim();
                if item == "-" {
                    items.push(String::new());
                } else if let Some(rest) = item.strip_prefix("- ") {
                    let rest = rest.trim();
                    items.push(unquote(rest).unwrap_or_else(|| rest.to_string()));
                } else {
                    break;
                }
                lines.next();
            }
            if items.is_empty() {
                FrontMatterValue::String(String::new())
            } else {
                FrontMatterValue::List(items)
            }
        } else {
            parse_value(raw_value)
        };

        metadata.insert(key, value);
    }

    metadata
}

fn parse_value(raw: &str) -> FrontMatterValue {
    if let Some(inner) = unquote(raw) {
        return FrontMatterValue::String(inner);
    }

    match raw {
        "true" => return FrontMatterValue::Bool(true),
        "false" => return FrontMatterValue::Bool(false),
        _ => {}
    }

    if integer_regex().is_match(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return FrontMatterValue::Integer(i);
        }
    }

    if raw.starts_with('[') && raw.ends_with(']') {
        return FrontMatterValue::List(split_list_items(&raw[1..raw.len() - 1]));
    }

    FrontMatterValue::String(raw.to_string())
}

/// Strip one matching pair of quotes, if present
fn unquote(s: &str) -> Option<String> {
    if s.len() < 2 {
        return None;
    }
    let strip = |q: char| s.strip_prefix(q).and_then(|rest| rest.strip_suffix(q));
    if let Some(inner) = strip('\'') {
        Some(inner.replace("''", "'"))
    } else {
        strip('"').map(str::to_string)
    }
}

fn split_list_items(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in inner.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '\'' | '"' if current.trim().is_empty() => {
                    quote = Some(c);
                    current.push(c);
                }
                ',' => {
                    push_list_item(&mut items, &current);
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }
    push_list_item(&mut items, &current);

    items
}

fn push_list_item(items: &mut Vec<String>, raw: &str) {
    let item = raw.trim();
    if item.is_empty() {
        return;
    }
    items.push(unquote(item).unwrap_or_else(|| item.to_string()));
}

fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "key is empty"
    } else if key.trim() != key {
        "key has surrounding whitespace"
    } else if key.contains(':') {
        "key contains ':'"
    } else if key.contains(['\n', '\r']) {
        "key contains a line break"
    } else if key.starts_with(['#', '-']) {
        "key starts with '#' or '-'"
    } else {
        return Ok(());
    };
    Err(PromptMatterError::encode(key, reason))
}

fn encode_value(key: &str, value: &FrontMatterValue) -> Result<String> {
    match value {
        FrontMatterValue::Bool(b) => Ok(b.to_string()),
        FrontMatterValue::Integer(i) => Ok(i.to_string()),
        FrontMatterValue::String(s) => encode_string(key, s),
        FrontMatterValue::List(items) => {
            let encoded = items
                .iter()
                .map(|item| encode_list_item(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", encoded.join(", ")))
        }
    }
}

fn encode_string(key: &str, s: &str) -> Result<String> {
    if s.contains(['\n', '\r']) {
        return Err(PromptMatterError::encode(
            key,
            "value contains a line break",
        ));
    }

    // An embedded single quote wins over every other trigger: double quotes
    // carry it verbatim.
    if s.contains('\'') {
        Ok(format!("\"{s}\""))
    } else if needs_quotes(s) {
        Ok(format!("'{s}'"))
    } else {
        Ok(s.to_string())
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.trim() != s
        || s.contains('*')
        || s.contains(": ")
        || s.ends_with(':')
        || s.contains(" #")
        || s == "true"
        || s == "false"
        || s == "-"
        || s.starts_with("- ")
        || integer_regex().is_match(s)
        || (s.starts_with('[') && s.ends_with(']'))
        || s.starts_with(['"', '#', '&', '!', '|', '>', '%', '@', '`', '{', '['])
}

fn encode_list_item(key: &str, item: &str) -> Result<String> {
    if item.contains(['\n', '\r']) {
        return Err(PromptMatterError::encode(
            key,
            "list item contains a line break",
        ));
    }
    match (item.contains('"'), item.contains('\'')) {
        (true, true) => Err(PromptMatterError::encode(
            key,
            "list item contains both quote characters",
        )),
        (true, false) => Ok(format!("'{item}'")),
        _ => Ok(format!("\"{item}\"")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(pairs: &[(&str, FrontMatterValue)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_parse_quoted_glob() {
        let content = "---\napplyTo: '**'\ndescription: Test description\n---\nThis is the content body.\n";
        let (metadata, body) = parse(content);

        assert_eq!(metadata["applyTo"], FrontMatterValue::string("**"));
        assert_eq!(
            metadata["description"],
            FrontMatterValue::string("Test description")
        );
        assert_eq!(body, "This is the content body.\n");
    }

    #[test]
    fn test_quote_styles_are_equivalent() {
        for line in ["applyTo: '**'", "applyTo: \"**\"", "applyTo: **"] {
            let (metadata, body) = parse(&format!("---\n{line}\n---\nContent.\n"));
            assert_eq!(metadata["applyTo"], FrontMatterValue::string("**"), "{line}");
            assert_eq!(body, "Content.\n");
        }
    }

    #[test]
    fn test_parse_complex_quoting() {
        let content = "---\npattern: 'src/**/*.py'\ncommand: \"echo 'hello world'\"\nsimple: value\nquoted: 'it''s'\n---\nContent here.\n";
        let (metadata, _) = parse(content);

        assert_eq!(metadata["pattern"].as_str(), Some("src/**/*.py"));
        assert_eq!(metadata["command"].as_str(), Some("echo 'hello world'"));
        assert_eq!(metadata["simple"].as_str(), Some("value"));
        assert_eq!(metadata["quoted"].as_str(), Some("it's"));
    }

    #[test]
    fn test_parse_without_front_matter() {
        let content = "Just plain content without frontmatter.";
        let (metadata, body) = parse(content);

        assert!(metadata.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_unclosed_block_is_soft() {
        let content = "---\napplyTo: '**'\ndescription: Test\nThis content has malformed frontmatter.\n";
        let (metadata, body) = parse(content);

        assert!(metadata.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_lone_delimiter() {
        let (metadata, body) = parse("---");
        assert!(metadata.is_empty());
        assert_eq!(body, "---");
    }

    #[test]
    fn test_parse_empty_block() {
        let (metadata, body) = parse("---\n---\nContent after empty frontmatter.\n");
        assert!(metadata.is_empty());
        assert_eq!(body, "Content after empty frontmatter.\n");
    }

    #[test]
    fn test_parse_skips_comments() {
        let content = "---\n# This is a comment\napplyTo: '**'\n  # Another comment\ndescription: Test description\n---\nContent body.\n";
        let (metadata, body) = parse(content);

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata["applyTo"].as_str(), Some("**"));
        assert_eq!(body, "Content body.\n");
    }

    #[test]
    fn test_parse_scalar_types() {
        let content = "---\nenabled: true\ndisabled: false\ncount: 42\nversion: -1\nnot_bool: True\nbig: 99999999999999999999\n---\nContent.\n";
        let (metadata, _) = parse(content);

        assert_eq!(metadata["enabled"], FrontMatterValue::Bool(true));
        assert_eq!(metadata["disabled"], FrontMatterValue::Bool(false));
        assert_eq!(metadata["count"], FrontMatterValue::Integer(42));
        assert_eq!(metadata["version"], FrontMatterValue::Integer(-1));
        assert_eq!(metadata["not_bool"], FrontMatterValue::string("True"));
        assert_eq!(
            metadata["big"],
            FrontMatterValue::string("99999999999999999999")
        );
    }

    #[test]
    fn test_parse_lists() {
        let content = "---\ntools: [\"tool1\", \"tool2\", \"tool3\"]\nbare: [a, b ,c]\nmixed: ['x, y', \"it's\", z]\nempty: []\n---\nContent.\n";
        let (metadata, _) = parse(content);

        assert_eq!(
            metadata["tools"],
            FrontMatterValue::list(["tool1", "tool2", "tool3"])
        );
        assert_eq!(metadata["bare"], FrontMatterValue::list(["a", "b", "c"]));
        assert_eq!(
            metadata["mixed"],
            FrontMatterValue::list(["x, y", "it's", "z"])
        );
        assert_eq!(metadata["empty"], FrontMatterValue::List(vec![]));
    }

    #[test]
    fn test_parse_block_sequence() {
        let content = "---\ntools:\n  - codebase\n  - 'search'\nempty:\ndescription: d\n---\nBody\n";
        let (metadata, _) = parse(content);

        assert_eq!(
            metadata["tools"],
            FrontMatterValue::list(["codebase", "search"])
        );
        assert_eq!(metadata["empty"], FrontMatterValue::string(""));
        assert_eq!(metadata["description"].as_str(), Some("d"));
    }

    #[test]
    fn test_parse_crlf() {
        let content = "---\r\ndescription: Windows\r\n---\r\nBody\r\n";
        let (metadata, body) = parse(content);

        assert_eq!(metadata["description"].as_str(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let (metadata, _) = parse("---\nzeta: 1\nalpha: 2\nmid: 3\n---\n");
        let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_serialize_glob_quoting() {
        let cases = [
            ("applyTo", "**", "applyTo: '**'"),
            ("applyTo", "**/*.py", "applyTo: '**/*.py'"),
            ("applyTo", "**/src/**", "applyTo: '**/src/**'"),
            ("applyTo", "*/test.js", "applyTo: '*/test.js'"),
            ("description", "Test: description", "description: 'Test: description'"),
        ];

        for (key, value, expected) in cases {
            let raw = serialize(&meta(&[(key, value.into())]), "Test content").unwrap();
            assert!(raw.contains(expected), "expected {expected:?} in {raw:?}");
        }
    }

    #[test]
    fn test_serialize_layout() {
        let metadata = meta(&[
            ("description", "Plain description".into()),
            ("tools", FrontMatterValue::list(["a", "b"])),
            ("enabled", true.into()),
            ("count", 42i64.into()),
            ("empty", "".into()),
            ("quote", "it's".into()),
        ]);
        let raw = serialize(&metadata, "# Body\n").unwrap();

        assert_eq!(
            raw,
            "---\ndescription: Plain description\ntools: [\"a\", \"b\"]\nenabled: true\ncount: 42\nempty: ''\nquote: \"it's\"\n---\n# Body\n"
        );
    }

    #[test]
    fn test_serialize_single_quote_beats_glob() {
        let raw = serialize(&meta(&[("applyTo", "it's/**".into())]), "").unwrap();
        assert!(raw.contains("applyTo: \"it's/**\""));
    }

    #[test]
    fn test_serialize_without_metadata() {
        assert_eq!(serialize(&Metadata::new(), "plain body").unwrap(), "plain body");
        assert_eq!(
            serialize(&Metadata::new(), "---\na: 1\n---\nbody").unwrap(),
            "---\n---\n---\na: 1\n---\nbody"
        );
    }

    #[test]
    fn test_serialize_rejects_unencodable() {
        let err = serialize(&meta(&[("description", "two\nlines".into())]), "").unwrap_err();
        assert!(matches!(err, PromptMatterError::Encode { .. }));

        let err = serialize(&meta(&[("bad: key", "v".into())]), "").unwrap_err();
        assert!(matches!(err, PromptMatterError::Encode { .. }));

        let err = serialize(
            &meta(&[("tools", FrontMatterValue::list(["a\"b'c"]))]),
            "",
        )
        .unwrap_err();
        assert!(matches!(err, PromptMatterError::Encode { .. }));
    }

    #[test]
    fn test_parse_multibyte_edges() {
        let content = "---\ndescription: café\ntitle: Überblick\nquoted: 'ünïcödé'\nflow: [日本, 'ß', \"ö\"]\nblock:\n  - é\n  - 'ñ'\n---\nbody\n";
        let (metadata, body) = parse(content);

        assert_eq!(metadata["description"], FrontMatterValue::string("café"));
        assert_eq!(metadata["title"], FrontMatterValue::string("Überblick"));
        assert_eq!(metadata["quoted"], FrontMatterValue::string("ünïcödé"));
        assert_eq!(metadata["flow"], FrontMatterValue::list(["日本", "ß", "ö"]));
        assert_eq!(metadata["block"], FrontMatterValue::list(["é", "ñ"]));
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_round_trip_multibyte() {
        let metadata = meta(&[
            ("description", "café".into()),
            ("title", "Überblick".into()),
            ("single", "é".into()),
            ("glob", "**/*.ü".into()),
            ("apostrophe", "l'été".into()),
            ("emoji", "🦀 rust 🦀".into()),
            ("tools", FrontMatterValue::list(["日本", "ß", "é'é", "\"ö\""])),
        ]);

        let raw = serialize(&metadata, "körper\n").unwrap();
        let (decoded, body) = parse(&raw);
        assert_eq!(decoded, metadata);
        assert_eq!(body, "körper\n");
    }

    #[test]
    fn test_round_trip() {
        let metadata = meta(&[
            ("applyTo", "**/*.py".into()),
            ("description", "Test: description".into()),
            ("plain", "value".into()),
            ("looks_bool", "true".into()),
            ("looks_int", "007".into()),
            ("looks_list", "[x]".into()),
            ("spaced", "  padded ".into()),
            ("quoted", "'single'".into()),
            ("dquoted", "\"double\"".into()),
            ("comment", "# not a comment".into()),
            ("colon_end", "ends:".into()),
            ("empty", "".into()),
            ("flag", false.into()),
            ("negative", (-12i64).into()),
            (
                "tools",
                FrontMatterValue::list(["a, b", "it's", "say \"hi\"", "", " x "]),
            ),
            ("none", FrontMatterValue::List(vec![])),
        ]);

        for body in ["", "body", "\n\nleading blank lines\n", "---\nfake: 1\n---\n"] {
            let raw = serialize(&metadata, body).unwrap();
            let (decoded, decoded_body) = parse(&raw);
            assert_eq!(decoded, metadata);
            assert_eq!(decoded_body, body);
        }

        let raw = serialize(&Metadata::new(), "---\nfake: 1\n---\n").unwrap();
        assert_eq!(parse(&raw), (Metadata::new(), "---\nfake: 1\n---\n".to_string()));
    }
}
