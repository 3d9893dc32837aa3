use ndarray::Array2;

/// 2D geolocation grid (rows x columns), physical units after scaling
pub type GeoGrid = Array2<f64>;

/// Geolocation bands of one Sentinel-3 product, scale factors already applied
#[derive(Debug, Clone)]
pub struct GeodeticGrids {
    /// Latitude in degrees for every swath pixel
    pub latitude: GeoGrid,
    /// Longitude in degrees for every swath pixel
    pub longitude: GeoGrid,
    /// Surface elevation in meters for every swath pixel
    pub elevation: GeoGrid,
}

impl GeodeticGrids {
    /// Grid shape as (rows, columns); all three bands share it
    pub fn dim(&self) -> (usize, usize) {
        self.latitude.dim()
    }
}

/// A correspondence between a swath pixel and a geographic location
#[derive(Debug, Clone, PartialEq)]
pub struct GroundControlPoint {
    /// Pixel row (line) in the swath grid
    pub row: usize,
    /// Pixel column (sample) in the swath grid
    pub col: usize,
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Elevation in meters
    pub elevation: f64,
    /// Sequential identifier, contiguous from 0
    pub id: usize,
}

/// Geospatial transformation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GeoTransform {
    pub top_left_x: f64,
    pub pixel_width: f64,
    pub rotation_x: f64,
    pub top_left_y: f64,
    pub rotation_y: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build from GDAL's 6-element coefficient array
    pub fn from_gdal(coefficients: [f64; 6]) -> Self {
        Self {
            top_left_x: coefficients[0],
            pixel_width: coefficients[1],
            rotation_x: coefficients[2],
            top_left_y: coefficients[3],
            rotation_y: coefficients[4],
            pixel_height: coefficients[5],
        }
    }

    /// Coefficient array in GDAL ordering
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.top_left_x,
            self.pixel_width,
            self.rotation_x,
            self.top_left_y,
            self.rotation_y,
            self.pixel_height,
        ]
    }
}

/// Error types for LST product conversion
#[derive(Debug, thiserror::Error)]
pub enum LstError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing variable: {0}")]
    MissingVariable(String),

    #[error("Transform fit error: {0}")]
    TransformFit(String),

    #[error("Reprojection error: {0}")]
    Reprojection(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

/// Result type for conversion operations
pub type LstResult<T> = Result<T, LstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_transform_roundtrip() {
        let coefficients = [10.0, 0.01, 0.0, 50.0, 0.0, -0.01];
        let transform = GeoTransform::from_gdal(coefficients);

        assert_eq!(transform.top_left_x, 10.0);
        assert_eq!(transform.pixel_height, -0.01);
        assert_eq!(transform.to_gdal(), coefficients);
    }
}
