//! PDF rendering modules for spreads
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from pages
//! - Building output pages and the page tree
//! - Generating placement transformations
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::*;
pub use xobject::{EmbeddedPage, copy_object_deep, create_page_xobject, page_box};
