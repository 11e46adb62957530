use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileFormat, SourceDocument};

use super::text_sanitizer::{collapse_whitespace, strip_document_xml_tags};

const DOCUMENT_PART: &str = "word/document.xml";
const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the main document part of a `.docx` container.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(data: &[u8]) -> Result<String, String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| format!("not a zip container: {e}"))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;
        Ok(xml)
    }

    /// Walks the XML in document order and joins every non-blank text node with a space.
    fn extract_text_nodes(xml: &str) -> Result<String, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        let mut nodes: Vec<String> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Text(text) => {
                    let value = text.unescape()?;
                    if !value.trim().is_empty() {
                        nodes.push(value.into_owned());
                    }
                }
                Event::CData(cdata) => {
                    let value = String::from_utf8_lossy(&cdata);
                    if !value.trim().is_empty() {
                        nodes.push(value.into_owned());
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(collapse_whitespace(&nodes.join(" ")))
    }

    fn extract(data: &[u8]) -> Result<String, FileLoaderError> {
        let xml = Self::read_document_xml(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("Unable to parse DOCX file: {e}"))
        })?;

        match Self::extract_text_nodes(&xml) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(error = %e, "Structured DOCX parse failed, stripping tags instead");
                Ok(strip_document_xml_tags(&xml))
            }
        }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<String, FileLoaderError> {
        if document.format != FileFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.as_mime().to_string(),
            ));
        }

        let data = data.to_vec();
        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract(&data)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("DOCX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(chars = text.chars().count(), "DOCX text extraction complete");
        Ok(text)
    }
}
