/// Angular distance between two geographic points, in degrees.
pub trait Geodesic {
    fn degrees_between(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64;
}

/// Great-circle distance on a sphere using the Vincenty form, which stays
/// well conditioned for both antipodal and nearly coincident points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalDistance;

impl Geodesic for SphericalDistance {
    fn degrees_between(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let lat1 = lat1.to_radians();
        let lat2 = lat2.to_radians();
        let dlon = (lon2 - lon1).to_radians();

        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let (sin_lat2, cos_lat2) = lat2.sin_cos();
        let (sin_dlon, cos_dlon) = dlon.sin_cos();

        let a = cos_lat2 * sin_dlon;
        let b = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon;
        let numerator = (a * a + b * b).sqrt();
        let denominator = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

        numerator.atan2(denominator).to_degrees()
    }
}
