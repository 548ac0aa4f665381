//! Spread imposition - pairing source pages side by side
//!
//! This module orchestrates the pipeline:
//! 1. Resolve the pages the pairing table needs into a working document
//! 2. Compose one spread sheet per pairing, with printer's marks
//! 3. Wrap every sheet onto a padded canvas
//!
//! Each stage takes ownership of the previous stage's document, so a run
//! never shares mutable state with another.

mod compose;
mod io;
mod wrap;

pub use compose::{SheetRecord, SpreadDocument, compose_spreads, xobject_name};
pub use io::{load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};
pub use wrap::wrap_spreads;

use crate::geometry::compute_geometry;
use crate::options::SpreadConfig;
use crate::resolve::resolve_pages;
use crate::types::*;
use lopdf::Document;

/// Impose `source` on a worker thread and return the wrapped document
pub async fn impose_spreads(
    source: Document,
    pairings: PairingTable,
    config: SpreadConfig,
) -> Result<Document> {
    tokio::task::spawn_blocking(move || impose_spreads_sync(&source, &pairings, &config)).await?
}

/// Run the whole pipeline on the current thread
pub fn impose_spreads_sync(
    source: &Document,
    pairings: &PairingTable,
    config: &SpreadConfig,
) -> Result<Document> {
    config.validate()?;
    if pairings.is_empty() {
        return Err(SpreadError::InvalidPairings(
            "pairing table is empty".to_string(),
        ));
    }

    let (sheet, wrap) = compute_geometry(config);

    let mut working = Document::with_version("1.7");
    let pages = resolve_pages(pairings, source, &mut working)?;
    let spreads = compose_spreads(working, pairings, &pages, &sheet, &config.marks)?;
    let output = wrap_spreads(spreads, &wrap)?;

    log::info!(
        "Imposed {} spreads from {} unique source pages",
        pairings.len(),
        pages.len()
    );
    Ok(output)
}

/// Bytes in, bytes out: parse, impose and serialize
pub fn impose_bytes(
    bytes: &[u8],
    pairings: &PairingTable,
    config: &SpreadConfig,
) -> Result<Vec<u8>> {
    let source = load_pdf_bytes(bytes)?;
    let output = impose_spreads_sync(&source, pairings, config)?;
    save_pdf_bytes(output)
}
