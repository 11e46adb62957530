use serde::{Deserialize, Serialize};

const CODE_FENCE: &str = "```";

/// A node of the rendered outline. Headings, list items and leaf blocks all map to nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutlineNode {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::depth).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMap {
    pub title: Option<String>,
    pub root: OutlineNode,
}

/// Strips the code fence models like to wrap their answer in.
///
/// A leading fence may carry a language tag (```` ```markdown ````). A trailing
/// fence is stripped even when it closes a code block inside the answer.
pub fn clean_generated_markdown(raw: &str) -> String {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix(CODE_FENCE) {
        cleaned = rest.trim_start_matches(|c: char| c.is_alphanumeric() || c == '-' || c == '_');
    }

    if let Some(rest) = cleaned.strip_suffix(CODE_FENCE) {
        cleaned = rest;
    }

    cleaned.trim().to_string()
}
