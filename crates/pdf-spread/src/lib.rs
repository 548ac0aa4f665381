pub mod constants;
pub mod geometry;
pub mod impose;
pub mod marks;
mod options;
pub mod render;
pub mod resolve;
mod stats;
mod types;

pub use geometry::{SheetGeometry, WrapGeometry, compute_geometry};
pub use impose::{
    SpreadDocument, compose_spreads, impose_bytes, impose_spreads, impose_spreads_sync, load_pdf,
    load_pdf_bytes, save_pdf, save_pdf_bytes, wrap_spreads,
};
pub use options::*;
pub use resolve::{ResolvedPageMap, resolve_pages};
pub use stats::calculate_statistics;
pub use types::*;
