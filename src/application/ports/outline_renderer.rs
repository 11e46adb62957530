use crate::domain::MindMap;

pub trait OutlineRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<MindMap, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("outline nests {depth} levels, more than the supported {limit}")]
    TooDeep { depth: usize, limit: usize },
}
