use crate::core::gcp::to_c_gcps;
use crate::types::{GeoTransform, GroundControlPoint, LstError, LstResult};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::path::Path;

/// Output coordinate reference system (geographic latitude/longitude)
pub const OUTPUT_EPSG: u32 = 4326;

/// Reprojects a swath-geometry raster to geographic coordinates.
///
/// The raster is staged in memory with the output CRS, the reference affine
/// transform and the ground control points attached, then warped with a thin
/// plate spline transformer driven by the GCPs. The spline tolerates the
/// sensor geometry distortion an affine fit cannot express.
pub struct SwathReprojector {
    output_crs: u32,
}

impl Default for SwathReprojector {
    fn default() -> Self {
        Self::new()
    }
}

impl SwathReprojector {
    pub fn new() -> Self {
        Self {
            output_crs: OUTPUT_EPSG,
        }
    }

    /// Warp `source` to the output CRS and write a single-band Float32
    /// GeoTIFF at `output_path`, overwriting any previous output.
    pub fn reproject(
        &self,
        source: &Dataset,
        gcps: &[GroundControlPoint],
        reference: &GeoTransform,
        output_path: &Path,
    ) -> LstResult<()> {
        let mut staged = self.stage_in_memory(source)?;

        let srs = SpatialRef::from_epsg(self.output_crs)?;
        staged.set_spatial_ref(&srs)?;
        staged.set_geo_transform(&reference.to_gdal())?;
        attach_gcps(&staged, gcps, &srs)?;

        self.warp_tps(&staged, output_path)?;

        if !output_path.is_file() {
            return Err(LstError::Write(format!(
                "warp reported success but {} was not written",
                output_path.display()
            )));
        }

        log::info!("Saved {}", output_path.display());
        Ok(())
    }

    /// Copy the source band into an in-memory Float32 dataset so the
    /// georeferencing can be attached without touching the source file.
    fn stage_in_memory(&self, source: &Dataset) -> LstResult<Dataset> {
        let (width, height) = source.raster_size();
        let band = source.rasterband(1)?;
        let buffer = band.read_as::<f32>((0, 0), (width, height), (width, height), None)?;

        let driver = DriverManager::get_driver_by_name("MEM")?;
        let mut staged =
            driver.create_with_band_type::<f32, _>("", width as isize, height as isize, 1)?;

        let mut staged_band = staged.rasterband(1)?;
        staged_band.write((0, 0), (width, height), &buffer)?;
        if let Some(nodata) = band.no_data_value() {
            staged_band.set_no_data_value(Some(nodata))?;
        }

        Ok(staged)
    }

    fn warp_tps(&self, staged: &Dataset, output_path: &Path) -> LstResult<()> {
        let dest = CString::new(output_path.to_string_lossy().as_ref())
            .map_err(|e| LstError::Reprojection(format!("output path: {}", e)))?;

        let target_srs = format!("EPSG:{}", self.output_crs);
        let args = ["-of", "GTiff", "-t_srs", &target_srs, "-tps", "-overwrite"];
        let c_args: Vec<CString> = args
            .iter()
            .map(|a| CString::new(*a))
            .collect::<Result<_, _>>()
            .map_err(|e| LstError::Reprojection(format!("warp options: {}", e)))?;

        let mut argv: Vec<*mut c_char> = c_args
            .iter()
            .map(|a| a.as_ptr() as *mut c_char)
            .collect();
        argv.push(std::ptr::null_mut());

        unsafe {
            let options = gdal_sys::GDALWarpAppOptionsNew(argv.as_mut_ptr(), std::ptr::null_mut());
            if options.is_null() {
                return Err(LstError::Reprojection(
                    "invalid warp options".to_string(),
                ));
            }

            let mut usage_error: c_int = 0;
            let mut sources = [staged.c_dataset()];
            let warped = gdal_sys::GDALWarp(
                dest.as_ptr(),
                std::ptr::null_mut(),
                1,
                sources.as_mut_ptr(),
                options,
                &mut usage_error,
            );
            gdal_sys::GDALWarpAppOptionsFree(options);

            if warped.is_null() {
                return Err(LstError::Reprojection(format!(
                    "thin plate spline warp failed for {}",
                    output_path.display()
                )));
            }
            // Closing flushes the GeoTIFF to disk
            gdal_sys::GDALClose(warped);
        }

        Ok(())
    }
}

/// Attach the GCP list to a dataset with a WGS84 GCP projection
fn attach_gcps(
    dataset: &Dataset,
    gcps: &[GroundControlPoint],
    srs: &SpatialRef,
) -> LstResult<()> {
    let wkt = srs.to_wkt()?;
    let c_wkt = CString::new(wkt)
        .map_err(|e| LstError::Reprojection(format!("GCP projection: {}", e)))?;
    let c_gcps = to_c_gcps(gcps)?;

    let err = unsafe {
        gdal_sys::GDALSetGCPs(
            dataset.c_dataset(),
            c_gcps.entries.len() as c_int,
            c_gcps.entries.as_ptr(),
            c_wkt.as_ptr(),
        )
    };

    if err != gdal_sys::CPLErr::CE_None {
        return Err(LstError::Reprojection(format!(
            "failed to attach {} ground control points",
            gcps.len()
        )));
    }

    Ok(())
}
