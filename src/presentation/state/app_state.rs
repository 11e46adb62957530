use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, OutlineRenderer};
use crate::application::services::{MindMapService, TextExtractionService};
use crate::infrastructure::rendering::HtmlExporter;

pub struct AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient,
{
    pub mind_map_service: Arc<MindMapService<L>>,
    pub extraction_service: Arc<TextExtractionService<F>>,
    pub renderer: Arc<dyn OutlineRenderer>,
    pub html_exporter: Arc<HtmlExporter>,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader + ?Sized,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            mind_map_service: Arc::clone(&self.mind_map_service),
            extraction_service: Arc::clone(&self.extraction_service),
            renderer: Arc::clone(&self.renderer),
            html_exporter: Arc::clone(&self.html_exporter),
        }
    }
}
