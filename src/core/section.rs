//! Markdown section editing for document bodies

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}(\s|$)").expect("heading pattern is valid"))
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Insert `entry` at the end of the section opened by the first line equal to
/// `header`.
///
/// The section runs until the next Markdown heading or the end of the body;
/// the entry goes after its last non-blank line. When no line matches the
/// header, the entry is appended to the end of the body and no header is
/// created.
pub fn insert_into_section(body: &str, header: &str, entry: &str) -> String {
    let mut entry = entry.to_string();
    if !entry.ends_with('\n') {
        entry.push('\n');
    }

    let lines: Vec<&str> = body.split_inclusive('\n').collect();

    let Some(header_idx) = lines.iter().position(|line| strip_eol(line) == header) else {
        debug!("Section {:?} not found, appending to end of body", header);
        let mut out = body.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&entry);
        return out;
    };

    let section_end = lines[header_idx + 1..]
        .iter()
        .position(|line| heading_regex().is_match(strip_eol(line)))
        .map(|offset| header_idx + 1 + offset)
        .unwrap_or(lines.len());

    let insert_at = (header_idx + 1..section_end)
        .rev()
        .find(|&i| !lines[i].trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(header_idx + 1);

    let mut out = String::with_capacity(body.len() + entry.len() + 1);
    for line in &lines[..insert_at] {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&entry);
    for line in &lines[insert_at..] {
        out.push_str(line);
    }
    out
}
