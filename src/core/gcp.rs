use crate::types::{GeodeticGrids, GeoTransform, GroundControlPoint, LstError, LstResult};
use std::ffi::CString;
use std::os::raw::{c_char, c_int};

/// Pixel stride between ground control points along each axis.
///
/// Subsampling keeps the control point count tractable for transform
/// fitting while still covering the full raster extent.
pub const DEFAULT_GCP_STRIDE: usize = 30;

/// Sampled pixel indices along one axis: `{0, stride, 2*stride, ...} < size`
pub fn sample_indices(size: usize, stride: usize) -> Vec<usize> {
    (0..size).step_by(stride.max(1)).collect()
}

/// Build ground control points from the geolocation grids.
///
/// Iterates columns-outer / rows-inner; identifiers are contiguous from 0 in
/// iteration order. The fit is order-insensitive, but a deterministic order
/// keeps identifiers reproducible between runs.
pub fn build_gcps(
    geodetic: &GeodeticGrids,
    width: usize,
    height: usize,
    stride: usize,
) -> Vec<GroundControlPoint> {
    let cols = sample_indices(width, stride);
    let rows = sample_indices(height, stride);

    let mut gcps = Vec::with_capacity(cols.len() * rows.len());
    let mut id = 0;
    for &col in &cols {
        for &row in &rows {
            gcps.push(GroundControlPoint {
                row,
                col,
                longitude: geodetic.longitude[[row, col]],
                latitude: geodetic.latitude[[row, col]],
                elevation: geodetic.elevation[[row, col]],
                id,
            });
            id += 1;
        }
    }
    gcps
}

/// C-compatible GCP list. The returned strings own the id/info storage the
/// GDAL_GCP entries point into and must stay alive while the entries are used.
pub(crate) struct CGcpList {
    _ids: Vec<CString>,
    _info: CString,
    pub entries: Vec<gdal_sys::GDAL_GCP>,
}

pub(crate) fn to_c_gcps(gcps: &[GroundControlPoint]) -> LstResult<CGcpList> {
    let info = CString::new("")
        .map_err(|e| LstError::TransformFit(format!("GCP info string: {}", e)))?;

    let mut ids = Vec::with_capacity(gcps.len());
    for gcp in gcps {
        let id = CString::new(gcp.id.to_string())
            .map_err(|e| LstError::TransformFit(format!("GCP id string: {}", e)))?;
        ids.push(id);
    }

    let entries = gcps
        .iter()
        .zip(&ids)
        .map(|(gcp, id)| gdal_sys::GDAL_GCP {
            pszId: id.as_ptr() as *mut c_char,
            pszInfo: info.as_ptr() as *mut c_char,
            dfGCPPixel: gcp.col as f64,
            dfGCPLine: gcp.row as f64,
            dfGCPX: gcp.longitude,
            dfGCPY: gcp.latitude,
            dfGCPZ: gcp.elevation,
        })
        .collect();

    Ok(CGcpList {
        _ids: ids,
        _info: info,
        entries,
    })
}

/// Fit a reference affine transform from the full GCP list.
///
/// Wraps `GDALGCPsToGeoTransform` with approximate (least-squares) fitting
/// permitted. This transform is attached as metadata before the warp; the
/// warp itself works from the GCPs directly.
pub fn fit_geo_transform(gcps: &[GroundControlPoint]) -> LstResult<GeoTransform> {
    if gcps.len() < 3 {
        return Err(LstError::TransformFit(format!(
            "need at least 3 ground control points, got {}",
            gcps.len()
        )));
    }

    let c_gcps = to_c_gcps(gcps)?;
    let mut coefficients = [0f64; 6];
    let ok = unsafe {
        gdal_sys::GDALGCPsToGeoTransform(
            c_gcps.entries.len() as c_int,
            c_gcps.entries.as_ptr(),
            coefficients.as_mut_ptr(),
            1,
        )
    };

    if ok == 0 {
        return Err(LstError::TransformFit(format!(
            "could not fit an affine transform from {} ground control points",
            gcps.len()
        )));
    }

    Ok(GeoTransform::from_gdal(coefficients))
}
