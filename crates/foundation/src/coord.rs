/// Geographic position as emitted by the map: longitude first, then latitude.
///
/// Values are kept exactly as received. Server matching relies on bitwise
/// `f64` equality, so nothing here rounds or normalizes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Builds a position from a GeoJSON-style coordinate array.
    ///
    /// Extra components (altitude) are ignored; fewer than two yields `None`.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match coords {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<(f64, f64)> for LonLat {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}
