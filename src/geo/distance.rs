//! Great-circle distance on a spherical Earth.

/// Earth radius used by the solver, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3961.0;

/// Haversine great-circle distance between two points, in miles.
///
/// All angles are in radians. The intermediate `a` term is clamped to
/// `[0, 1]` so floating-point overshoot near antipodal points never reaches
/// the square roots as a negative operand.
///
/// # Examples
///
/// ```
/// use u_geotsp::geo::haversine;
///
/// let quarter = haversine(0.0, 0.0, 0.0, std::f64::consts::FRAC_PI_2);
/// assert!((quarter - 6221.92).abs() < 0.01);
/// ```
pub fn haversine(lat1: f64, lat2: f64, lon1: f64, lon2: f64) -> f64 {
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (lon2 - lon1) / 2.0;
    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}
