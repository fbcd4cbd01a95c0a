//! Wire types for the `/process` endpoint of the geospatial reasoning service.
//!
//! Request: `{ "input": <command + context> }`.
//!
//! Responses come in two shapes:
//! - GeoJSON: a `Feature` or a `FeatureCollection` of Point/Polygon geometries.
//! - Ranked points: `{ "response": [{ "coordinates": [x, y], "distance": d }, ...] }`.
//!
//! Decoding is lenient: unknown geometry types decode to `Geometry::Unsupported`
//! and absent or null `features` / `response` fields decode as empty.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub input: String,
}

impl ProcessRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResponse {
    GeoJson(GeoJson),
    Ranked(RankedResponse),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection {
        #[serde(default, deserialize_with = "null_as_empty")]
        features: Vec<Feature>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[lon, lat]`, optionally followed by altitude.
    Point { coordinates: Vec<f64> },
    /// Rings of positions; the first ring is the exterior.
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RankedResponse {
    #[serde(default)]
    pub response: Option<Vec<RankedPoint>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankedPoint {
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl GeoJson {
    /// Geometries in document order; features without geometry are skipped.
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry> + '_ {
        let features: &[Feature] = match self {
            GeoJson::Feature(f) => std::slice::from_ref(f),
            GeoJson::FeatureCollection { features } => features,
        };
        features.iter().filter_map(|f| f.geometry.as_ref())
    }
}

impl ProcessResponse {
    /// Decodes a response body, choosing the shape by the presence of a
    /// top-level `type` member.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.get("type").is_some() {
            serde_json::from_value(value).map(ProcessResponse::GeoJson)
        } else {
            serde_json::from_value(value).map(ProcessResponse::Ranked)
        }
    }
}
