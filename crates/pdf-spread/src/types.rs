use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpreadError {
    #[error("No PDF data provided")]
    MissingInput,
    #[error("Malformed PDF document: {0}")]
    MalformedDocument(#[source] lopdf::Error),
    #[error("Page index {index} is out of range (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },
    #[error("Invalid pairing table: {0}")]
    InvalidPairings(String),
    #[error("Page {index} has an empty or inverted page box")]
    InvalidPageBox { index: usize },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Coarse classification of a [`SpreadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No document bytes were supplied
    MissingInput,
    /// The bytes could not be parsed as a PDF
    MalformedDocument,
    /// A pairing referenced a page the document does not have
    PageOutOfRange,
    /// The pairing table or configuration was rejected before any work
    InvalidRequest,
    /// Anything that failed while composing, wrapping or encoding
    RenderingFailure,
}

impl SpreadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpreadError::MissingInput => ErrorKind::MissingInput,
            SpreadError::MalformedDocument(_) => ErrorKind::MalformedDocument,
            SpreadError::PageOutOfRange { .. } => ErrorKind::PageOutOfRange,
            SpreadError::InvalidPairings(_) | SpreadError::Config(_) => ErrorKind::InvalidRequest,
            SpreadError::InvalidPageBox { .. }
            | SpreadError::Pdf(_)
            | SpreadError::Io(_)
            | SpreadError::TaskJoin(_) => ErrorKind::RenderingFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpreadError>;

/// One slot of a spread: either a zero-based source page or nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageRef {
    Blank,
    Index(usize),
}

impl PageRef {
    pub fn index(self) -> Option<usize> {
        match self {
            PageRef::Blank => None,
            PageRef::Index(index) => Some(index),
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, PageRef::Blank)
    }
}

impl From<usize> for PageRef {
    fn from(index: usize) -> Self {
        PageRef::Index(index)
    }
}

impl From<Option<usize>> for PageRef {
    fn from(index: Option<usize>) -> Self {
        index.map_or(PageRef::Blank, PageRef::Index)
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRef::Blank => f.write_str("blank"),
            PageRef::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Left and right page of one output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePairing {
    pub left: PageRef,
    pub right: PageRef,
}

impl PagePairing {
    pub fn new(left: PageRef, right: PageRef) -> Self {
        Self { left, right }
    }

    pub fn refs(self) -> [PageRef; 2] {
        [self.left, self.right]
    }
}

/// Ordered list of pairings. Sheet `i` of the output is built from entry `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingTable {
    pairings: Vec<PagePairing>,
}

impl PairingTable {
    /// Build a table, rejecting an empty one
    pub fn new(pairings: Vec<PagePairing>) -> Result<Self> {
        if pairings.is_empty() {
            return Err(SpreadError::InvalidPairings(
                "pairing table is empty".to_string(),
            ));
        }
        Ok(Self { pairings })
    }

    pub fn pairings(&self) -> &[PagePairing] {
        &self.pairings
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PagePairing> {
        self.pairings.iter()
    }

    /// Every non-blank index referenced by the table, first occurrence wins
    pub fn unique_indices(&self) -> Vec<usize> {
        let mut seen = std::collections::HashSet::new();
        self.pairings
            .iter()
            .flat_map(|pairing| pairing.refs())
            .filter_map(PageRef::index)
            .filter(|index| seen.insert(*index))
            .collect()
    }
}

impl Default for PairingTable {
    /// The 17-page booklet table the service ships with
    fn default() -> Self {
        use PageRef::{Blank, Index};
        let pairings = [
            (Index(2), Blank),
            (Blank, Index(1)),
            (Index(6), Index(3)),
            (Index(4), Index(5)),
            (Index(10), Index(7)),
            (Index(8), Index(9)),
            (Index(14), Index(11)),
            (Index(12), Index(13)),
            (Blank, Index(15)),
            (Index(16), Index(0)),
        ]
        .into_iter()
        .map(|(left, right)| PagePairing { left, right })
        .collect();
        Self { pairings }
    }
}

impl<'a> IntoIterator for &'a PairingTable {
    type Item = &'a PagePairing;
    type IntoIter = std::slice::Iter<'a, PagePairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairings.iter()
    }
}

/// Statistics about one imposition run
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadStatistics {
    /// Pages in the source document
    pub source_pages: usize,
    /// Spread sheets produced (one per pairing)
    pub sheets: usize,
    /// Pages in the final document
    pub output_pages: usize,
    /// Slots filled with source content
    pub placed_slots: usize,
    /// Slots left blank
    pub blank_slots: usize,
    /// Distinct source pages extracted
    pub unique_pages_used: usize,
    /// Source pages placed on more than one slot
    pub reused_pages: Vec<usize>,
    /// Source pages the table never references
    pub unused_pages: Vec<usize>,
}
