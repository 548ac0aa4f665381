//! Page resolution
//!
//! Maps every page index a pairing table mentions onto a Form XObject in
//! the working document. Each index is extracted once, however often the
//! table uses it.

use crate::render::{EmbeddedPage, create_page_xobject};
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::collections::HashMap;

/// Source page index to embeddable handle in the working document
#[derive(Debug, Clone, Default)]
pub struct ResolvedPageMap {
    pages: HashMap<usize, EmbeddedPage>,
    order: Vec<usize>,
}

impl ResolvedPageMap {
    pub fn get(&self, index: usize) -> Option<&EmbeddedPage> {
        self.pages.get(&index)
    }

    /// Handle for a slot, `None` for blank slots
    pub fn lookup(&self, page_ref: PageRef) -> Option<&EmbeddedPage> {
        page_ref.index().and_then(|index| self.get(index))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pages.contains_key(&index)
    }

    /// Indices in the order they were extracted
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Check every referenced index against the source page count
pub fn validate_pairings(pairings: &PairingTable, page_count: usize) -> Result<()> {
    if let Some(index) = pairings
        .iter()
        .flat_map(|pairing| pairing.refs())
        .filter_map(PageRef::index)
        .find(|index| *index >= page_count)
    {
        return Err(SpreadError::PageOutOfRange { index, page_count });
    }
    Ok(())
}

/// Extract the pages `pairings` needs from `source` into `working`.
///
/// Nothing is written to `working` unless every index is in range.
pub fn resolve_pages(
    pairings: &PairingTable,
    source: &Document,
    working: &mut Document,
) -> Result<ResolvedPageMap> {
    let source_page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    validate_pairings(pairings, source_page_ids.len())?;

    let requested = pairings.unique_indices();
    let handles = copy_pages(working, source, &source_page_ids, &requested)?;

    let pages = requested.iter().copied().zip(handles).collect();
    log::debug!(
        "Resolved {} unique pages out of {} source pages",
        requested.len(),
        source_page_ids.len()
    );

    Ok(ResolvedPageMap {
        pages,
        order: requested,
    })
}

/// Bulk copy of `indices` into `working`, returning handles in the same order
fn copy_pages(
    working: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    indices: &[usize],
) -> Result<Vec<EmbeddedPage>> {
    let mut cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    indices
        .iter()
        .map(|&index| {
            let page = create_page_xobject(working, source, source_page_ids[index], &mut cache)?;
            if page.width() <= 0.0 || page.height() <= 0.0 {
                return Err(SpreadError::InvalidPageBox { index });
            }
            Ok(page)
        })
        .collect()
}
