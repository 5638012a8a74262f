use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric value that keeps its integral look when written back out.
///
/// YAML coordinates like `10` must come out as `10`, not `10.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Scalar(pub f64);

/// Largest integer an f64 represents exactly (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

impl Scalar {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar(value)
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INT {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Scalar)
    }
}

/// Accepts any YAML value and keeps it only if it is a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

// ============================================================================
// Input model (Dynmap markers.yml)
// ============================================================================

/// Parsed Dynmap marker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputDocument {
    pub sets: IndexMap<String, InputSet>,
}

/// One marker set of the input document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSet {
    pub label: Option<String>,
    #[serde(default)]
    pub hide: bool,
    /// Icon used by point markers that do not pick one themselves
    pub deficon: Option<String>,
    pub markers: Option<IndexMap<String, InputPoint>>,
    pub lines: Option<IndexMap<String, InputLine>>,
    pub areas: Option<IndexMap<String, InputArea>>,
}

/// Point marker (`markers` category)
#[derive(Debug, Clone, Deserialize)]
pub struct InputPoint {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub world: Option<String>,
}

/// Stroke and fill attributes shared by lines and areas
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputStyle {
    pub stroke_weight: Option<Scalar>,
    pub stroke_color: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub opacity: Option<f64>,
    pub fill_color: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fill_opacity: Option<f64>,
}

/// Polyline marker (`lines` category)
#[derive(Debug, Clone, Deserialize)]
pub struct InputLine {
    pub x: Vec<Scalar>,
    pub y: Vec<Scalar>,
    pub z: Vec<Scalar>,
    pub label: Option<String>,
    pub world: Option<String>,
    #[serde(flatten)]
    pub style: InputStyle,
}

/// Polygon marker (`areas` category)
#[derive(Debug, Clone, Deserialize)]
pub struct InputArea {
    pub x: Vec<Scalar>,
    pub z: Vec<Scalar>,
    pub ytop: Scalar,
    pub ybottom: Scalar,
    pub label: Option<String>,
    pub world: Option<String>,
    #[serde(flatten)]
    pub style: InputStyle,
}

/// Access to the world a marker lives in, used by the world filter
pub trait WorldScoped {
    fn world(&self) -> Option<&str>;
}

impl WorldScoped for InputPoint {
    fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }
}

impl WorldScoped for InputLine {
    fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }
}

impl WorldScoped for InputArea {
    fn world(&self) -> Option<&str> {
        self.world.as_deref()
    }
}

// ============================================================================
// Output model (BlueMap marker-sets)
// ============================================================================

/// Output marker set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub toggleable: bool,
    #[serde(rename = "default-hidden")]
    pub default_hidden: bool,
    pub markers: IndexMap<String, OutputMarker>,
}

/// RGBA color with 8-bit channels and a fractional alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Scalar,
}

/// Vertex or position; `y` is absent for horizontal outlines
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: Scalar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Scalar>,
    pub z: Scalar,
}

impl Point {
    pub fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y: Some(y), z }
    }

    pub fn flat(x: Scalar, z: Scalar) -> Self {
        Self { x, y: None, z }
    }
}

/// Icon pixel offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub x: i64,
    pub y: i64,
}

/// Marker kind tag written as `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Poi,
    Line,
    Shape,
    Extrude,
}

/// Output marker: common shell plus a kind-specific body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputMarker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub body: MarkerBody,
}

/// Kind-specific part of an output marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerBody {
    Poi(PoiBody),
    Line(LineBody),
    Area(AreaBody),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiBody {
    pub position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
}

/// Stroke and fill styling; absent source fields stay absent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Style {
    #[serde(rename = "line-width", skip_serializing_if = "Option::is_none")]
    pub line_width: Option<Scalar>,
    #[serde(rename = "line-color", skip_serializing_if = "Option::is_none")]
    pub line_color: Option<Color>,
    #[serde(rename = "fill-color", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBody {
    #[serde(flatten)]
    pub style: Style,
    pub line: Vec<Point>,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub style: Style,
    pub shape: Vec<Point>,
    pub position: Point,
    #[serde(flatten)]
    pub elevation: Elevation,
}

/// Vertical extent of an area marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Elevation {
    Flat {
        #[serde(rename = "shape-y")]
        y: Scalar,
    },
    Extruded {
        #[serde(rename = "shape-min-y")]
        min_y: Scalar,
        #[serde(rename = "shape-max-y")]
        max_y: Scalar,
    },
}

impl Elevation {
    /// Flat when top and bottom coincide, extruded otherwise
    pub fn from_bounds(ytop: Scalar, ybottom: Scalar) -> Self {
        if ytop == ybottom {
            Elevation::Flat { y: ytop }
        } else {
            Elevation::Extruded {
                min_y: ybottom,
                max_y: ytop,
            }
        }
    }

    pub fn kind(&self) -> MarkerKind {
        match self {
            Elevation::Flat { .. } => MarkerKind::Shape,
            Elevation::Extruded { .. } => MarkerKind::Extrude,
        }
    }
}
