//! HTML serialization for document nodes.

use std::fmt::Write;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Escape text for use in element content or a quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Write `name="value"` with a leading space.
pub(crate) fn write_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", name, escape(value));
}
