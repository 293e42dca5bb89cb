//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Segment endpoints coming from
//! different source features rarely collide exactly, so vertex merging works
//! on a metre tolerance and needs the extra precision to stay stable.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the WGS-84 ranges.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Linear interpolation between `a` and `b` at fraction `t` in `[0, 1]`.
    #[inline]
    pub fn lerp(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
    }

    /// Project `self` onto the segment `a`–`b`.
    ///
    /// Works in a local equirectangular frame centred on `self` (longitude
    /// scaled by `cos(lat)`), which is accurate for segment lengths at city
    /// scale.  Returns the fraction along `a → b` (clamped to `[0, 1]`) and
    /// the projected coordinate.
    pub fn project_onto(self, a: GeoPoint, b: GeoPoint) -> (f64, GeoPoint) {
        let k = self.lat.to_radians().cos();

        let ax = (a.lon - self.lon) * k;
        let ay = a.lat - self.lat;
        let dx = (b.lon - a.lon) * k;
        let dy = b.lat - a.lat;

        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return (0.0, a);
        }

        let t = (-(ax * dx + ay * dy) / len2).clamp(0.0, 1.0);
        (t, GeoPoint::lerp(a, b, t))
    }
}

/// Total haversine length of a polyline in metres.
pub fn polyline_length_m(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
