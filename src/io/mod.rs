//! Archive and product I/O modules

pub mod archive;
pub mod product;

// Re-export main types
pub use archive::{ArchiveExtractor, ExtractionSummary};
pub use product::LstProduct;
