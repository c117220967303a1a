//! Integer point-in-triangle classification.

/// A pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Triangle vertices, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    /// The reference triangle used by the built-in presets.
    pub const REFERENCE: Triangle = Triangle::new(
        Point::new(5, 5),
        Point::new(95, 40),
        Point::new(30, 95),
    );

    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }
}

/// Result of testing one point against the run's triangle. Derived per chunk,
/// never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Inside,
    Outside,
}

impl Classification {
    pub fn is_inside(self) -> bool {
        matches!(self, Classification::Inside)
    }
}

fn edge(from: Point, to: Point) -> (i64, i64) {
    (
        i64::from(to.x) - i64::from(from.x),
        i64::from(to.y) - i64::from(from.y),
    )
}

fn dot(u: (i64, i64), v: (i64, i64)) -> i64 {
    u.0 * v.0 + u.1 * v.1
}

/// Barycentric sign test. Integer-only; never divides.
///
/// A degenerate (zero-area) triangle yields `u = v = area = 0` for every probe
/// point, so the strict `u + v < area` comparison fails and every point comes
/// back outside. Deterministic, but not geometrically meaningful.
pub fn point_in_triangle(point: Point, tri: &Triangle) -> bool {
    let v0 = edge(tri.a, tri.c);
    let v1 = edge(tri.a, tri.b);
    let v2 = edge(tri.a, point);

    let dot00 = dot(v0, v0);
    let dot01 = dot(v0, v1);
    let dot02 = dot(v0, v2);
    let dot11 = dot(v1, v1);
    let dot12 = dot(v1, v2);

    let area = dot00 * dot11 - dot01 * dot01;
    let u = dot11 * dot02 - dot01 * dot12;
    let v = dot00 * dot12 - dot01 * dot02;

    u >= 0 && v >= 0 && u + v < area
}

pub fn classify(point: Point, tri: &Triangle) -> Classification {
    if point_in_triangle(point, tri) {
        Classification::Inside
    } else {
        Classification::Outside
    }
}
