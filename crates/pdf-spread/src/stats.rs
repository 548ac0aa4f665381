use crate::resolve::validate_pairings;
use crate::types::*;
use std::collections::BTreeMap;

/// Calculate statistics for imposing a `source_pages`-page document
pub fn calculate_statistics(
    pairings: &PairingTable,
    source_pages: usize,
) -> Result<SpreadStatistics> {
    validate_pairings(pairings, source_pages)?;

    let mut uses: BTreeMap<usize, usize> = BTreeMap::new();
    let mut blank_slots = 0;
    for page_ref in pairings.iter().flat_map(|pairing| pairing.refs()) {
        match page_ref {
            PageRef::Blank => blank_slots += 1,
            PageRef::Index(index) => *uses.entry(index).or_default() += 1,
        }
    }

    let placed_slots: usize = uses.values().sum();
    let reused_pages: Vec<usize> = uses
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(index, _)| *index)
        .collect();
    let unused_pages: Vec<usize> = (0..source_pages)
        .filter(|index| !uses.contains_key(index))
        .collect();

    Ok(SpreadStatistics {
        source_pages,
        sheets: pairings.len(),
        output_pages: pairings.len(),
        placed_slots,
        blank_slots,
        unique_pages_used: uses.len(),
        reused_pages,
        unused_pages,
    })
}
