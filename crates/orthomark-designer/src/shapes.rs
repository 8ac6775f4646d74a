//! Persisted drafting primitives: line segments and closed polygons.

use std::fmt;
use std::str::FromStr;

use orthomark_core::{Error, Point, Result, ShapeId};
use serde::{Deserialize, Serialize};

/// Named drawing colours available to the line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
    Black,
    White,
}

impl ShapeColor {
    pub const ALL: [ShapeColor; 6] = [
        ShapeColor::Blue,
        ShapeColor::Red,
        ShapeColor::Green,
        ShapeColor::Yellow,
        ShapeColor::Black,
        ShapeColor::White,
    ];

    /// Look up a colour by English name (any case) or Chinese name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let color = match name.to_ascii_lowercase().as_str() {
            "blue" | "蓝色" => ShapeColor::Blue,
            "red" | "红色" => ShapeColor::Red,
            "green" | "绿色" => ShapeColor::Green,
            "yellow" | "黄色" => ShapeColor::Yellow,
            "black" | "黑色" => ShapeColor::Black,
            "white" | "白色" => ShapeColor::White,
            _ => return None,
        };
        Some(color)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeColor::Blue => "blue",
            ShapeColor::Red => "red",
            ShapeColor::Green => "green",
            ShapeColor::Yellow => "yellow",
            ShapeColor::Black => "black",
            ShapeColor::White => "white",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ShapeColor::Blue => [0x00, 0x00, 0xFF],
            ShapeColor::Red => [0xFF, 0x00, 0x00],
            ShapeColor::Green => [0x00, 0xFF, 0x00],
            ShapeColor::Yellow => [0xFF, 0xFF, 0x00],
            ShapeColor::Black => [0x00, 0x00, 0x00],
            ShapeColor::White => [0xFF, 0xFF, 0xFF],
        }
    }

    /// AutoCAD colour index used in DXF output.
    pub fn aci(&self) -> u8 {
        match self {
            ShapeColor::Red => 1,
            ShapeColor::Yellow => 2,
            ShapeColor::Green => 3,
            ShapeColor::Blue => 5,
            // ACI 7 renders black on light backgrounds and white on dark ones
            ShapeColor::Black | ShapeColor::White => 7,
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ShapeColor::from_name(s).ok_or_else(|| format!("Unknown colour: {}", s))
    }
}

/// A straight segment between two pixel positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub p1: Point,
    pub p2: Point,
    pub color: ShapeColor,
}

impl LineShape {
    pub fn new(p1: Point, p2: Point, color: ShapeColor) -> Self {
        Self { p1, p2, color }
    }

    /// Endpoints in stored order.
    pub fn endpoints(&self) -> [Point; 2] {
        [self.p1, self.p2]
    }

    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    pub fn has_endpoint(&self, p: &Point) -> bool {
        self.p1 == *p || self.p2 == *p
    }
}

/// A closed ring of at least three vertices.
///
/// The closing edge back to the first vertex is implicit and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    vertices: Vec<Point>,
}

impl PolygonShape {
    pub const MIN_VERTICES: usize = 3;

    /// Fails with [`Error::DegenerateShape`] below three vertices.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(Error::DegenerateShape {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Vertices followed by the first vertex again, ready for stroking.
    pub fn closed_ring(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().copied().chain(self.vertices.first().copied())
    }

    /// Returns (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.vertices.iter().fold(
            (
                f64::INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::NEG_INFINITY,
            ),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }
}

/// Any persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(LineShape),
    Polygon(PolygonShape),
}

impl Shape {
    pub fn as_line(&self) -> Option<&LineShape> {
        match self {
            Shape::Line(line) => Some(line),
            Shape::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Shape::Polygon(poly) => Some(poly),
            Shape::Line(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Line(_) => "line",
            Shape::Polygon(_) => "polygon",
        }
    }
}

/// A shape together with the id the store issued for it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredShape {
    pub id: ShapeId,
    pub shape: Shape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(ShapeColor::from_name("Red"), Some(ShapeColor::Red));
        assert_eq!(ShapeColor::from_name("绿色"), Some(ShapeColor::Green));
        assert_eq!(ShapeColor::from_name(" 黑色 "), Some(ShapeColor::Black));
        assert_eq!(ShapeColor::from_name("purple"), None);
        assert_eq!(ShapeColor::default(), ShapeColor::Blue);
        assert_eq!("yellow".parse::<ShapeColor>(), Ok(ShapeColor::Yellow));
    }

    #[test]
    fn test_polygon_needs_three_vertices() {
        let err = PolygonShape::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, Error::DegenerateShape { vertices: 2 }));

        let poly = PolygonShape::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
        .unwrap();
        assert_eq!(poly.vertices().len(), 3);
        let ring: Vec<Point> = poly.closed_ring().collect();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[3], ring[0]);
        assert_eq!(poly.bounds(), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_line_endpoints() {
        let line = LineShape::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0), ShapeColor::Red);
        assert_eq!(line.length(), 5.0);
        assert!(line.has_endpoint(&Point::new(3.0, 4.0)));
        assert!(!line.has_endpoint(&Point::new(1.0, 1.0)));
    }
}
