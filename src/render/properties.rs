use crate::derive::KeyValueSet;

/// Render a Java-style `.properties` file: `#comment` header, then `key=value` lines.
///
/// Output is pure ASCII: anything outside `0x20..=0x7E` becomes `\uXXXX`, since
/// readers decode the file as ISO-8859-1. No timestamp line is written, so the
/// same input always gives the same bytes.
pub fn render_properties(kv: &KeyValueSet, comment: &str) -> String {
    let mut out = String::new();
    if !comment.is_empty() {
        out.push('#');
        out.push_str(&escape_unicode(comment));
        out.push('\n');
    }
    for (key, value) in kv.iter() {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0C}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(&mut out, c),
        }
    }
    out
}

fn escape_unicode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' '..='~' => out.push(c),
            _ => push_unicode_escape(&mut out, c),
        }
    }
    out
}

/// `\uXXXX` per UTF-16 code unit, so characters outside the BMP become a surrogate pair.
fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{:04X}", unit));
    }
}
