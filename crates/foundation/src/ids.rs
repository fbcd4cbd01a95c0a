use std::fmt;

/// Identifier of a user-placed marker.
///
/// Assigned once at creation and never reused within a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(u64);

/// Identifier of a polygon, whether grouped by the user or returned by the service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolygonId(u64);

impl MarkerId {
    pub const fn new(n: u64) -> Self {
        MarkerId(n)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl PolygonId {
    pub const fn new(n: u64) -> Self {
        PolygonId(n)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl std::str::FromStr for MarkerId {
    type Err = std::num::ParseIntError;

    /// Accepts both the display form (`m7`) and a bare number (`7`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('m').unwrap_or(s);
        digits.parse().map(MarkerId)
    }
}

/// Monotonic id source. Marker and polygon ids are drawn from separate counters.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next_marker: u64,
    next_polygon: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&mut self) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        id
    }

    pub fn polygon(&mut self) -> PolygonId {
        let id = PolygonId(self.next_polygon);
        self.next_polygon += 1;
        id
    }
}
