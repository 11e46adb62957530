use std::sync::Arc;

use crate::application::ports::{OutlineRenderer, RenderError};
use crate::domain::MindMap;

use super::stream_consumer::ConsumerUpdate;

/// Client-side view of one mind map: the working markdown, whether the diagram
/// is shown, and the diagram rendered from the latest markdown.
///
/// Any change to the markdown, streamed or edited, re-renders the whole tree.
pub struct MindMapSession<R>
where
    R: OutlineRenderer + ?Sized,
{
    renderer: Arc<R>,
    markdown: String,
    visible: bool,
    rendered: Option<MindMap>,
    last_error: Option<String>,
}

impl<R> MindMapSession<R>
where
    R: OutlineRenderer + ?Sized,
{
    pub fn new(renderer: Arc<R>) -> Self {
        Self {
            renderer,
            markdown: String::new(),
            visible: false,
            rendered: None,
            last_error: None,
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mind_map(&self) -> Option<&MindMap> {
        self.rendered.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Resets the view for a new generation. Tracking of any earlier one is dropped.
    pub fn begin_generation(&mut self) {
        self.markdown.clear();
        self.visible = false;
        self.rendered = None;
        self.last_error = None;
    }

    pub fn apply(&mut self, update: ConsumerUpdate) {
        match update {
            ConsumerUpdate::Shown => self.visible = true,
            ConsumerUpdate::Markdown(markdown) | ConsumerUpdate::Completed(markdown) => {
                if !markdown.is_empty() {
                    self.set_markdown(markdown);
                }
            }
            ConsumerUpdate::Failed(message) => self.last_error = Some(message),
        }
    }

    /// Replaces the markdown with a user edit.
    pub fn edit(&mut self, markdown: impl Into<String>) {
        self.set_markdown(markdown.into());
    }

    pub fn export_markdown(&self) -> String {
        self.markdown.clone()
    }

    fn set_markdown(&mut self, markdown: String) {
        self.markdown = markdown;
        self.rerender();
    }

    fn rerender(&mut self) {
        if !self.visible || self.markdown.is_empty() {
            return;
        }

        match self.renderer.render(&self.markdown) {
            Ok(mind_map) => self.rendered = Some(mind_map),
            Err(e) => self.report_render_error(e),
        }
    }

    fn report_render_error(&mut self, e: RenderError) {
        tracing::error!(error = %e, "Error rendering mind map");
        self.last_error = Some(e.to_string());
    }
}
