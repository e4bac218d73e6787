use regex::Regex;
use std::sync::OnceLock;

/// Width of a bullet's leading whitespace, with tabs advancing to the next multiple of
/// `tab_width`.
pub(super) fn indent_width(prefix: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut col = 0usize;
    for ch in prefix.chars() {
        match ch {
            '\t' => col += tab_width - (col % tab_width),
            '\r' | '\n' => col = 0,
            _ => col += 1,
        }
    }
    col
}

/// Splits on `\n`, `\r\n` and a lone `\r`, like [`str::lines`] otherwise.
pub(super) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(['\n', '\r']) {
            Some(i) => {
                let skip = if s[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[i + skip..]);
                Some(&s[..i])
            }
            None => {
                rest = None;
                (!s.is_empty()).then_some(s)
            }
        }
    })
}

/// Reduces inline markdown to plain label text.
///
/// Links keep their text, emphasis/code markers and HTML-like tags are dropped, and whitespace
/// runs collapse to a single space.
pub fn clean_text(text: &str) -> String {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    let link_re = LINK_RE.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());
    let ws_re = WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let cleaned = link_re.replace_all(text.trim(), "${1}");
    let cleaned = cleaned
        .replace('`', "")
        .replace("**", "")
        .replace("__", "")
        .replace('*', "");
    let cleaned = tag_re.replace_all(&cleaned, "");
    ws_re.replace_all(&cleaned, " ").trim().to_string()
}

pub(super) fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}\s+(.*)$").unwrap())
}

pub(super) fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)[-*]\s+(.*)$").unwrap())
}
