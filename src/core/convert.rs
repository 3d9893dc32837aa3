use crate::core::gcp::{build_gcps, fit_geo_transform};
use crate::core::reproject::SwathReprojector;
use crate::io::product::LstProduct;
use crate::types::{LstError, LstResult};
use std::path::{Path, PathBuf};

/// Title prefix of every output raster
pub const OUTPUT_TITLE: &str = "Sentinel-3_L2";

/// Deterministic output file name: `Sentinel-3_L2_<product_id>_LST_reproj.tif`
pub fn output_file_name(product_id: &str) -> String {
    format!("{}_{}_LST_reproj.tif", OUTPUT_TITLE, product_id)
}

/// Convert one extracted product folder into a reprojected GeoTIFF.
///
/// Returns the exact path of the written raster; the cleanup stage keeps
/// that path and nothing else. Every failure mode maps to a typed
/// [`LstError`] variant, so the caller can report it and move on to the
/// next product.
pub fn convert_product(
    product_dir: &Path,
    product_id: &str,
    stride: usize,
) -> LstResult<PathBuf> {
    let product = LstProduct::open(product_dir)?;

    let (width, height) = product.lst_size()?;
    let geodetic = product.read_geodetic()?;
    if geodetic.dim() != (height, width) {
        return Err(LstError::InvalidFormat(format!(
            "geolocation grid {:?} does not match LST grid ({}, {})",
            geodetic.dim(),
            height,
            width
        )));
    }

    let gcps = build_gcps(&geodetic, width, height, stride);
    log::debug!(
        "Built {} ground control points for {}",
        gcps.len(),
        product_id
    );
    let reference = fit_geo_transform(&gcps)?;

    // The geolocation handles are closed by now; reopen LST on its own
    let lst = product.open_lst()?;
    let output_path = product_dir.join(output_file_name(product_id));

    let reprojector = SwathReprojector::new();
    reprojector.reproject(&lst, &gcps, &reference, &output_path)?;

    Ok(output_path)
}
