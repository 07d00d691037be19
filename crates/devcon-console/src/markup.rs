//! Inline markup used in console output.
//!
//! A BBCode-like syntax: `[b]`, `[color=red]`, `[/color]` and so on. A
//! renderer may interpret the tags; plain-text consumers strip them.
//! Literal brackets are written as `[lb]` and `[rb]`.

/// Escape user text so it renders verbatim.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '[' => out.push_str("[lb]"),
            ']' => out.push_str("[rb]"),
            _ => out.push(ch),
        }
    }
    out
}

/// Remove tags and resolve bracket escapes.
///
/// Bracketed text that is not tag-shaped (`[1, 2]`, `[]`) is kept as is.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close) => {
                let inner = &after[..close];
                match inner {
                    "lb" => out.push('['),
                    "rb" => out.push(']'),
                    _ if is_tag(inner) => {},
                    _ => {
                        // Not a tag: keep the bracket and rescan after it.
                        out.push('[');
                        rest = after;
                        continue;
                    },
                }
                rest = &after[close + 1..];
            },
            None => {
                out.push('[');
                rest = after;
            },
        }
    }
    out.push_str(rest);
    out
}

/// Wrap `text` in a color tag.
pub fn color(color: &str, text: &str) -> String {
    format!("[color={color}]{text}[/color]")
}

/// `name`, `/name` or `name=value`; names start with a letter.
fn is_tag(inner: &str) -> bool {
    let body = inner.strip_prefix('/').unwrap_or(inner);
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    if inner.starts_with('/') && value.is_some() {
        return false;
    }
    let mut chars = name.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && value.is_none_or(|v| !v.is_empty() && !v.contains('['))
}
