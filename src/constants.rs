// Spherical Mercator (EPSG:3857) parameters
pub const EARTH_RADIUS_M: f64 = 6378137.0; // WGS84 semi-major axis
pub const MAX_LATITUDE_DEG: f64 = 85.0511287798; // top/bottom edge of the square Mercator world

// Default pipeline settings
pub const DEFAULT_DEBOUNCE_MS: u64 = 200; // quiet period before a viewport change is processed

// Fixed cell style (stroke/fill colors come from the owning hexagon)
pub const CELL_FILL_OPACITY: f64 = 0.5;
pub const CELL_STROKE_WEIGHT: f64 = 1.0;
