use crate::types::{GeoGrid, GeodeticGrids, LstError, LstResult};
use gdal::Dataset;
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// NetCDF file holding the geolocation bands
pub const GEODETIC_FILE: &str = "geodetic_in.nc";
/// NetCDF file holding the surface temperature band
pub const LST_FILE: &str = "LST_in.nc";
/// Variable name of the surface temperature band
pub const LST_VARIABLE: &str = "LST";

/// Reader for one extracted Sentinel-3 L2 LST product folder
pub struct LstProduct {
    dir: PathBuf,
}

impl LstProduct {
    /// Open a product folder, checking that the expected NetCDF files exist
    pub fn open<P: AsRef<Path>>(dir: P) -> LstResult<Self> {
        let dir = dir.as_ref().to_path_buf();

        for file_name in [GEODETIC_FILE, LST_FILE] {
            if !dir.join(file_name).is_file() {
                return Err(LstError::MissingVariable(format!(
                    "{} not found in {}",
                    file_name,
                    dir.display()
                )));
            }
        }

        Ok(Self { dir })
    }

    /// Read latitude, longitude and elevation with scale factors applied.
    ///
    /// Each band is opened, read and closed before the next one, so no
    /// dataset handle outlives this call.
    pub fn read_geodetic(&self) -> LstResult<GeodeticGrids> {
        let latitude = self.read_scaled(GEODETIC_FILE, "latitude_in")?;
        let longitude = self.read_scaled(GEODETIC_FILE, "longitude_in")?;
        let elevation = self.read_scaled(GEODETIC_FILE, "elevation_in")?;

        if latitude.dim() != longitude.dim() || latitude.dim() != elevation.dim() {
            return Err(LstError::InvalidFormat(format!(
                "geolocation grids disagree on shape: lat {:?}, lon {:?}, elevation {:?}",
                latitude.dim(),
                longitude.dim(),
                elevation.dim()
            )));
        }

        Ok(GeodeticGrids {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Width and height of the LST grid
    pub fn lst_size(&self) -> LstResult<(usize, usize)> {
        let dataset = self.open_variable(LST_FILE, LST_VARIABLE)?;
        Ok(dataset.raster_size())
    }

    /// Reopen the LST variable as its own raster for reprojection
    pub fn open_lst(&self) -> LstResult<Dataset> {
        self.open_variable(LST_FILE, LST_VARIABLE)
    }

    /// Product folder path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open_variable(&self, file_name: &str, variable: &str) -> LstResult<Dataset> {
        let uri = format!(
            "NETCDF:\"{}\":{}",
            self.dir.join(file_name).display(),
            variable
        );
        Dataset::open(&uri).map_err(|e| {
            LstError::MissingVariable(format!("{}:{}: {}", file_name, variable, e))
        })
    }

    fn read_scaled(&self, file_name: &str, variable: &str) -> LstResult<GeoGrid> {
        let dataset = self.open_variable(file_name, variable)?;
        let (width, height) = dataset.raster_size();
        let band = dataset.rasterband(1)?;

        // GDAL reports the NetCDF scale_factor but does not apply it
        let scale = band.scale().unwrap_or(1.0);
        let buffer = band.read_as::<f64>((0, 0), (width, height), (width, height), None)?;

        let values: Vec<f64> = buffer.data.iter().map(|v| v * scale).collect();
        Array2::from_shape_vec((height, width), values).map_err(|e| {
            LstError::InvalidFormat(format!("{}:{}: {}", file_name, variable, e))
        })
    }
}
