const DELIMITER: &str = "---";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
}

/// Splits a leading `---` block off the markdown.
///
/// An unterminated block is left in place; while a response is still
/// streaming the closing delimiter simply has not arrived yet.
pub fn split_front_matter(markdown: &str) -> (FrontMatter, &str) {
    let Some(rest) = strip_delimiter_line(markdown) else {
        return (FrontMatter::default(), markdown);
    };

    let mut front_matter = FrontMatter::default();
    let mut offset = 0;

    for line in rest.split_inclusive('\n') {
        offset += line.len();
        let trimmed = line.trim_end();

        if trimmed == DELIMITER {
            return (front_matter, &rest[offset..]);
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            if key.trim() == "title" {
                let value = unquote(value.trim());
                if !value.is_empty() {
                    front_matter.title = Some(value.to_string());
                }
            }
        }
    }

    (FrontMatter::default(), markdown)
}

fn strip_delimiter_line(markdown: &str) -> Option<&str> {
    let rest = markdown.strip_prefix(DELIMITER)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
