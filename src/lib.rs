//! sen3lst: A Fast, Modular Sentinel-3 L2 LST Product Converter
//!
//! This library converts zipped Sentinel-3 Level-2 Land Surface Temperature
//! products into georeferenced GeoTIFFs. Each product is geolocated with
//! ground control points sampled from its geodetic bands and reprojected from
//! swath geometry to EPSG:4326 with a thin plate spline warp.

pub mod core;
pub mod io;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{
    GeoGrid, GeoTransform, GeodeticGrids, GroundControlPoint, LstError, LstResult,
};

pub use crate::core::{BatchConfig, BatchConverter, BatchSummary, ProductReport};
pub use io::{ArchiveExtractor, ExtractionSummary, LstProduct};
