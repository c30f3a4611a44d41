//! Conversion of the API's HTML descriptions into terminal-safe text.
//!
//! Descriptions arrive as HTML fragments from a third party. They are never
//! passed through as markup: tags are dropped, entities decoded and control
//! characters removed so the text cannot drive the terminal.

use once_cell::sync::Lazy;
use regex::Regex;

static BREAK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*br\s*/?\s*>").expect("valid line break pattern")
});

static BLOCK_END_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*/\s*(p|div|h[1-6]|li|ul|ol|blockquote|section|article)\s*>")
        .expect("valid block pattern")
});

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style)\b.*?<\s*/\s*(script|style)\s*>")
        .expect("valid script pattern")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity pattern")
});

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid blank pattern"));

/// Turn an HTML fragment into plain-text paragraphs.
pub fn description_paragraphs(html: &str) -> Vec<String> {
    let text = SCRIPT_BLOCK.replace_all(html, "");
    let text = BREAK_TAG.replace_all(&text, "\n");
    let text = BLOCK_END_TAG.replace_all(&text, "\n\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = strip_controls(&text);

    BLANK_LINES
        .split(&text)
        .map(|paragraph| {
            paragraph
                .lines()
                .map(collapse_whitespace)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(number) = entity.strip_prefix('#') {
        let code = match number.strip_prefix(|ch: char| ch == 'x' || ch == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).map(|ch| ch.to_string());
    }
    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "rsquo" | "lsquo" => "'",
        "rdquo" | "ldquo" => "\"",
        "copy" => "©",
        "reg" => "®",
        "trade" => "™",
        _ => return None,
    };
    Some(decoded.to_string())
}

/// Single-line terminal-safe form of a plain API field.
pub(crate) fn inline_text(text: &str) -> String {
    collapse_whitespace(&strip_controls(text))
}

/// Drop C0/C1 control characters (ESC included) but keep line structure.
fn strip_controls(text: &str) -> String {
    text.chars()
        .filter_map(|ch| match ch {
            '\n' => Some('\n'),
            '\t' | '\r' => Some(' '),
            ch if ch.is_control() => None,
            ch => Some(ch),
        })
        .collect()
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
