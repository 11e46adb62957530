use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<w:p[^>]*>").unwrap());
static PARAGRAPH_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</w:p>").unwrap());
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

const XML_ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&apos;", "'"),
    ("&quot;", "\""),
];

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_space = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }

    out
}

pub fn decode_xml_entities(raw: &str) -> String {
    XML_ENTITIES
        .iter()
        .fold(raw.to_string(), |text, (entity, replacement)| {
            text.replace(entity, replacement)
        })
}

/// Pattern-based text recovery for WordprocessingML that a real XML parser rejected.
///
/// Paragraph starts become newlines, every other tag is dropped.
pub fn strip_document_xml_tags(xml: &str) -> String {
    let text = PARAGRAPH_OPEN.replace_all(xml, "\n");
    let text = PARAGRAPH_CLOSE.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_xml_entities(&text);
    BLANK_LINES
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}
