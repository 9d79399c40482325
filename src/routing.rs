//! Curve routing for edges.
//!
//! The shape of an edge depends only on where its two endpoints are and which
//! side of a node each one sits on. Control points are pushed outward along
//! the socket's normal; intersections have no side and contribute no offset.
//! Geometry is derived from scratch every frame, so nothing here is cached.

use crate::canvas::{Canvas, Direction, ElementKind};
use crate::edge_pool::Edge;
use crate::geometry::Point;
use std::fmt::Write;

/// Orientation of an edge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Socket(Direction),
    Intersection,
}

impl Orientation {
    pub fn from_kind(kind: ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Socket(direction) => Some(Orientation::Socket(direction)),
            ElementKind::Intersection => Some(Orientation::Intersection),
            _ => None,
        }
    }
}

/// An endpoint resolved to its on-screen midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub point: Point,
    pub orientation: Orientation,
}

impl Anchor {
    pub fn new(point: Point, orientation: Orientation) -> Self {
        Self { point, orientation }
    }

    /// Control point for this end of a curve.
    pub fn control_point(&self, offset: f32) -> Point {
        match self.orientation {
            Orientation::Socket(direction) => {
                let n = direction.normal();
                Point::new(self.point.x + n.x * offset, self.point.y + n.y * offset)
            }
            Orientation::Intersection => self.point,
        }
    }
}

/// Geometry handed to the renderer for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedCurve {
    /// Both ends are intersections
    Line { p0: Point, p3: Point },
    /// One end is an intersection; `control` belongs to the oriented end
    Quadratic { p0: Point, control: Point, p3: Point },
    /// Both ends are sockets
    Cubic {
        p0: Point,
        p1: Point,
        p2: Point,
        p3: Point,
    },
}

impl RoutedCurve {
    pub fn start(&self) -> Point {
        match *self {
            RoutedCurve::Line { p0, .. }
            | RoutedCurve::Quadratic { p0, .. }
            | RoutedCurve::Cubic { p0, .. } => p0,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            RoutedCurve::Line { p3, .. }
            | RoutedCurve::Quadratic { p3, .. }
            | RoutedCurve::Cubic { p3, .. } => p3,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0)
    pub fn eval(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        match *self {
            RoutedCurve::Line { p0, p3 } => p0.lerp(p3, t),
            RoutedCurve::Quadratic { p0, control, p3 } => {
                let a = p0.lerp(control, t);
                let b = control.lerp(p3, t);
                a.lerp(b, t)
            }
            RoutedCurve::Cubic { p0, p1, p2, p3 } => {
                // De Casteljau
                let q0 = p0.lerp(p1, t);
                let q1 = p1.lerp(p2, t);
                let q2 = p2.lerp(p3, t);
                let r0 = q0.lerp(q1, t);
                let r1 = q1.lerp(q2, t);
                r0.lerp(r1, t)
            }
        }
    }

    /// SVG path commands, e.g. "M 10 20 C 58 20 92 80 140 80"
    pub fn to_path_commands(&self) -> String {
        let mut out = String::with_capacity(64);
        // Writing into a String cannot fail.
        let _ = match *self {
            RoutedCurve::Line { p0, p3 } => {
                write!(out, "M {} {} L {} {}", p0.x, p0.y, p3.x, p3.y)
            }
            RoutedCurve::Quadratic { p0, control, p3 } => write!(
                out,
                "M {} {} Q {} {} {} {}",
                p0.x, p0.y, control.x, control.y, p3.x, p3.y
            ),
            RoutedCurve::Cubic { p0, p1, p2, p3 } => write!(
                out,
                "M {} {} C {} {} {} {} {} {}",
                p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
        };
        out
    }
}

/// Derive the curve between two anchors.
///
/// Pure: identical anchors always give identical curves, and each control
/// point depends only on its own anchor.
pub fn route(start: Anchor, end: Anchor, offset: f32) -> RoutedCurve {
    let p0 = start.point;
    let p3 = end.point;
    match (start.orientation, end.orientation) {
        (Orientation::Intersection, Orientation::Intersection) => RoutedCurve::Line { p0, p3 },
        (Orientation::Intersection, Orientation::Socket(_)) => RoutedCurve::Quadratic {
            p0,
            control: end.control_point(offset),
            p3,
        },
        (Orientation::Socket(_), Orientation::Intersection) => RoutedCurve::Quadratic {
            p0,
            control: start.control_point(offset),
            p3,
        },
        (Orientation::Socket(_), Orientation::Socket(_)) => RoutedCurve::Cubic {
            p0,
            p1: start.control_point(offset),
            p2: end.control_point(offset),
            p3,
        },
    }
}

/// Resolve an edge's endpoints against the canvas and route it.
///
/// Returns `None` if either endpoint is missing or is not a connector.
pub fn route_edge(canvas: &Canvas, edge: &Edge, offset: f32) -> Option<RoutedCurve> {
    let anchor = |id| {
        let orientation = Orientation::from_kind(canvas.kind(id)?)?;
        Some(Anchor::new(canvas.midpoint(id)?, orientation))
    };
    Some(route(anchor(edge.p0)?, anchor(edge.p1)?, offset))
}
