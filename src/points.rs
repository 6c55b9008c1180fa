//! Point input: the `Point` type and loaders for the JSON shapes the robot emits.
//!
//! Accepted documents:
//! - `null` (no scan yet)
//! - a bare array of `[x, y]` pairs
//! - the live map payload `{"points": [...]}`
//! - a saved cartography map `{"pose": [x, y, theta], "points": [...]}`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A raw input coordinate pair, in caller units (millimetres from the lidar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

/// A saved map as written by the cartography mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapDocument {
    /// Robot pose `[x, y, theta]` at save time, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<[f64; 3]>,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
}

/// Parse a point collection from JSON. `null` (or a document with
/// `"points": null`) yields `None`, which renders the same as an empty list.
pub fn parse_points(json: &str) -> Result<Option<Vec<Point>>> {
    // Branch on the JSON shape first so a malformed array can never be read
    // as a document with every field defaulted.
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Array(_) => Ok(Some(serde_json::from_value(value)?)),
        serde_json::Value::Object(_) => {
            let doc: MapDocument = serde_json::from_value(value)?;
            Ok(doc.points)
        }
        other => Err(Error::InputError(format!(
            "expected null, an array of [x, y] pairs or a map object, got {}",
            other
        ))),
    }
}

/// Read and parse a point file.
pub fn load_points(path: impl AsRef<Path>) -> Result<Option<Vec<Point>>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let points = parse_points(&text)
        .map_err(|e| Error::InputError(format!("{}: {}", path.display(), e)))?;
    log::debug!(
        "loaded {} points from {}",
        points.as_ref().map_or(0, Vec::len),
        path.display()
    );
    Ok(points)
}

/// The newest `n` points (the end of the slice).
pub fn tail(points: &[Point], n: usize) -> &[Point] {
    &points[points.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_document_shape() {
        assert_eq!(parse_points("null").unwrap(), None);
        assert_eq!(parse_points("[]").unwrap(), Some(vec![]));
        assert_eq!(
            parse_points("[[1, 2], [-3.5, 4]]").unwrap(),
            Some(vec![Point::from([1.0, 2.0]), Point::new(-3.5, 4.0)])
        );
        assert_eq!(
            parse_points(r#"{"points": [[10, 20]]}"#).unwrap(),
            Some(vec![Point::new(10.0, 20.0)])
        );
        assert_eq!(
            parse_points(r#"{"pose": [30.0, 0.0, 0.17], "points": [[0, 0]]}"#).unwrap(),
            Some(vec![Point::new(0.0, 0.0)])
        );
        assert_eq!(parse_points(r#"{"points": null}"#).unwrap(), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse_points("[[1]]"), Err(Error::InputError(_))));
        assert!(matches!(parse_points("[[1, \"a\"]]"), Err(Error::InputError(_))));
        assert!(matches!(parse_points("{"), Err(Error::InputError(_))));
        // a three-component point must not fall back to "no points"
        assert!(matches!(parse_points("[[100, 200, 300]]"), Err(Error::InputError(_))));
        assert!(matches!(
            parse_points(r#"{"Points": [[10, 20]]}"#),
            Err(Error::InputError(_))
        ));
        assert!(matches!(parse_points("42"), Err(Error::InputError(_))));
    }

    #[test]
    fn point_serialises_as_pair() {
        let s = serde_json::to_string(&vec![Point::new(1.5, -2.0)]).unwrap();
        assert_eq!(s, "[[1.5,-2.0]]");
    }

    #[test]
    fn tail_keeps_newest() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        assert_eq!(tail(&pts, 2), &pts[3..]);
        assert_eq!(tail(&pts, 10), &pts[..]);
        assert!(tail(&pts, 0).is_empty());
    }

    #[test]
    fn load_points_reports_missing_file() {
        let err = load_points("/nonexistent/lidarmap/points.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
