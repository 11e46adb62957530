use std::fmt::Write;

use crate::domain::{MindMap, OutlineNode};

pub const HTML_EXPORT_FILENAME: &str = "smart-markmap-export.html";
pub const MARKDOWN_EXPORT_FILENAME: &str = "smart-markmap-export.md";

const DEFAULT_TITLE: &str = "Smart mind map export";

const DEFAULT_SCRIPT_URLS: [&str; 2] = [
    "https://cdn.jsdelivr.net/npm/d3@7",
    "https://cdn.jsdelivr.net/npm/markmap-view@0.18",
];

const STYLES: &str = r#"body { margin: 0; padding: 20px; font-family: system-ui, -apple-system, sans-serif; }
.markmap-container { width: 100%; height: 100vh; }
#mindmap { width: 100%; height: 100%; }
#outline details { margin-left: 1.25rem; }
#outline summary { cursor: pointer; }
#outline .leaf { margin-left: 2.2rem; white-space: pre-wrap; }
.has-markmap #outline { display: none; }"#;

const BOOTSTRAP_SCRIPT: &str = r#"(function () {
  var data = JSON.parse(document.getElementById('mindmap-data').textContent);
  if (!window.markmap || !window.markmap.Markmap) { return; }
  document.body.classList.add('has-markmap');
  window.markmap.Markmap.create('svg#mindmap', null, data).fit();
})();"#;

/// Writes a single HTML file that carries the whole diagram.
///
/// The outline is embedded twice: as collapsible `<details>` markup that reads
/// fine offline, and as JSON picked up by the markmap view scripts when the
/// browser can load them.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    script_urls: Vec<String>,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_URLS.iter().map(|s| s.to_string()).collect())
    }
}

impl HtmlExporter {
    pub fn new(script_urls: Vec<String>) -> Self {
        Self { script_urls }
    }

    pub fn export(&self, mind_map: &MindMap, title: Option<&str>) -> String {
        let title = title
            .or(mind_map.title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let data = serde_json::to_string(&mind_map.root)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(title));
        let _ = writeln!(html, "<style>\n{STYLES}\n</style>");
        html.push_str("</head>\n<body>\n");
        html.push_str("<div class=\"markmap-container\"><svg id=\"mindmap\"></svg></div>\n");
        html.push_str("<div id=\"outline\">\n");
        write_node(&mut html, &mind_map.root);
        html.push_str("</div>\n");
        let _ = writeln!(
            html,
            "<script type=\"application/json\" id=\"mindmap-data\">{data}</script>"
        );
        for url in &self.script_urls {
            let _ = writeln!(html, "<script src=\"{}\"></script>", escape_html(url));
        }
        let _ = writeln!(html, "<script>\n{BOOTSTRAP_SCRIPT}\n</script>");
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn write_node(html: &mut String, node: &OutlineNode) {
    let content = escape_html(&node.content);
    if node.children.is_empty() {
        let _ = writeln!(html, "<div class=\"leaf\">{content}</div>");
        return;
    }

    let _ = writeln!(html, "<details open>\n<summary>{content}</summary>");
    for child in &node.children {
        write_node(html, child);
    }
    html.push_str("</details>\n");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
