//! Great-circle distance between coordinates.

/// Mean Earth radius used for all distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
///
/// Symmetric in its arguments and zero for identical points. Antipodal and
/// polar coordinates are handled: the intermediate term is clamped to `[0, 1]`
/// so rounding can never push `sqrt(1 - a)` into NaN.
///
/// # Examples
///
/// ```
/// use ghcn_server::geo::distance_km;
///
/// let d = distance_km(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
