//! Handle regions on a node and geometric hit testing against them.

use crate::constants::{CORNER_HANDLE_SIZE, EDGE_HANDLE_THICKNESS, HEADER_HEIGHT};
use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which edge or corner a resize handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "e")]
    East,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "se")]
    SouthEast,
}

impl ResizeHandle {
    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "e" => Some(Self::East),
            "s" => Some(Self::South),
            "se" => Some(Self::SouthEast),
            _ => None,
        }
    }

    /// Compass code: `"e"`, `"s"` or `"se"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::East => "e",
            Self::South => "s",
            Self::SouthEast => "se",
        }
    }

    pub fn affects_width(&self) -> bool {
        matches!(self, Self::East | Self::SouthEast)
    }

    pub fn affects_height(&self) -> bool {
        matches!(self, Self::South | Self::SouthEast)
    }
}

/// Which part of a node starts a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragRegion {
    /// Only the header strip; the body stays free for editing
    #[default]
    Header,
    /// Anywhere outside the resize handles
    WholeNode,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    DragHandle,
    Resize(ResizeHandle),
    /// Inner content; the gesture is left to the content itself
    Content,
}

/// Sizes of the handle regions, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    pub header_height: f32,
    pub edge_thickness: f32,
    pub corner_size: f32,
    pub drag_region: DragRegion,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            header_height: HEADER_HEIGHT,
            edge_thickness: EDGE_HANDLE_THICKNESS,
            corner_size: CORNER_HANDLE_SIZE,
            drag_region: DragRegion::default(),
        }
    }
}

/// Resolve `pointer` against a node occupying `rect`.
///
/// Returns `None` when the pointer is outside the node. The corner takes
/// precedence over the edges, and the edges over the drag handle.
pub fn hit_test(rect: Rect, pointer: Point, metrics: &HandleMetrics) -> Option<HitTarget> {
    if !rect.contains(pointer) {
        return None;
    }

    let local = pointer - rect.origin;
    let (w, h) = (rect.size.width, rect.size.height);

    let near_right = local.x >= w - metrics.edge_thickness;
    let near_bottom = local.y >= h - metrics.edge_thickness;
    let in_corner = local.x >= w - metrics.corner_size && local.y >= h - metrics.corner_size;

    if in_corner {
        return Some(HitTarget::Resize(ResizeHandle::SouthEast));
    }
    if near_right {
        return Some(HitTarget::Resize(ResizeHandle::East));
    }
    if near_bottom {
        return Some(HitTarget::Resize(ResizeHandle::South));
    }

    let on_drag_handle = match metrics.drag_region {
        DragRegion::WholeNode => true,
        DragRegion::Header => local.y <= metrics.header_height,
    };
    Some(if on_drag_handle {
        HitTarget::DragHandle
    } else {
        HitTarget::Content
    })
}
