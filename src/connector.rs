//! Connector primitives handed to the host for drawing.
//!
//! A connector is a cubic curve leaving its start point horizontally and
//! entering its end point horizontally, with both control points on the
//! vertical line halfway between the ends:
//!
//! ```text
//! M from C (mid_x, from.y) (mid_x, to.y) to
//! ```

use crate::connection::ConnectionId;
use crate::constants::{CONNECTOR_HIT_WIDTH, CURVE_SAMPLES, ENDPOINT_RADIUS};
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

impl CubicCurve {
    pub fn between(from: Point, to: Point) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        Self {
            from,
            c1: Point::new(mid_x, from.y),
            c2: Point::new(mid_x, to.y),
            to,
        }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * self.from.x + b * self.c1.x + c * self.c2.x + d * self.to.x,
            a * self.from.y + b * self.c1.y + c * self.c2.y + d * self.to.y,
        )
    }

    /// Approximate distance from `p` to the curve, measured against a
    /// polyline of [`CURVE_SAMPLES`] segments.
    pub fn distance_to(&self, p: Point) -> f32 {
        let mut prev = self.from;
        let mut best = f32::INFINITY;
        for i in 1..=CURVE_SAMPLES {
            let next = self.point_at(i as f32 / CURVE_SAMPLES as f32);
            best = best.min(distance_to_segment(p, prev, next));
            prev = next;
        }
        best
    }

    /// True if `p` falls inside the clickable stroke around the curve.
    pub fn hit(&self, p: Point, stroke_width: f32) -> bool {
        self.distance_to(p) <= stroke_width / 2.0
    }

    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.from.x,
            self.from.y,
            self.c1.x,
            self.c1.y,
            self.c2.x,
            self.c2.y,
            self.to.x,
            self.to.y
        )
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

/// Stroke parameters for one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorStyle {
    pub stroke: &'static str,
    pub stroke_width: f32,
    /// SVG dash array, `None` for a solid line
    pub dash: Option<&'static str>,
    pub endpoint_radius: f32,
    /// Width of the invisible stroke that receives clicks
    pub hit_width: f32,
}

impl ConnectorStyle {
    pub const ACTIVE: ConnectorStyle = ConnectorStyle {
        stroke: "#3b82f6",
        stroke_width: 2.0,
        dash: None,
        endpoint_radius: ENDPOINT_RADIUS,
        hit_width: CONNECTOR_HIT_WIDTH,
    };

    pub const INACTIVE: ConnectorStyle = ConnectorStyle {
        stroke: "#94a3b8",
        stroke_width: 1.5,
        dash: Some("4,4"),
        endpoint_radius: ENDPOINT_RADIUS,
        hit_width: CONNECTOR_HIT_WIDTH,
    };

    pub fn for_state(active: bool) -> Self {
        if active { Self::ACTIVE } else { Self::INACTIVE }
    }
}

/// A connection resolved to screen geometry for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedConnector {
    pub id: ConnectionId,
    pub curve: CubicCurve,
    pub style: ConnectorStyle,
}

impl RenderedConnector {
    pub fn is_active(&self) -> bool {
        self.style == ConnectorStyle::ACTIVE
    }

    pub fn svg_path(&self) -> String {
        self.curve.to_svg_path()
    }
}
