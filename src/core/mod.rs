//! Core LST conversion modules

pub mod cleanup;
pub mod convert;
pub mod gcp;
pub mod pipeline;
pub mod reproject;

// Re-export main types
pub use cleanup::{clean_product_folder, purge_source_dir};
pub use convert::{convert_product, output_file_name};
pub use gcp::{build_gcps, fit_geo_transform, sample_indices, DEFAULT_GCP_STRIDE};
pub use pipeline::{BatchConfig, BatchConverter, BatchSummary, ProductReport};
pub use reproject::{SwathReprojector, OUTPUT_EPSG};
