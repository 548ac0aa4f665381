//! Document I/O operations for spreads

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Parse PDF bytes, reporting parse failures as a malformed document
pub fn load_pdf_bytes(bytes: &[u8]) -> Result<Document> {
    if bytes.is_empty() {
        return Err(SpreadError::MissingInput);
    }
    Document::load_mem(bytes).map_err(SpreadError::MalformedDocument)
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || load_pdf_bytes(&bytes)).await??;
    Ok(doc)
}

/// Serialize a document to bytes
pub fn save_pdf_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Save a document to disk
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || save_pdf_bytes(doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
