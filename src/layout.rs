//! Layout queries: where things actually ended up on the rendering surface.
//!
//! Table sizes depend on intrinsic content as well as manual resizing, so the
//! canvas never trusts its own numbers for connector endpoints. It asks a
//! [`LayoutQuery`] after the host has laid out the frame. Hosts with a real
//! surface implement the trait over their measurement API; everything else
//! (tests, headless hosts) uses [`StaticLayout`].

use crate::canvas::Canvas;
use crate::types::{Point, Rect, TableCenter, TableId};
use std::collections::HashMap;

/// Read-only access to measured rectangles, in surface coordinates.
pub trait LayoutQuery {
    /// Bounding box of the canvas element, `None` if not laid out yet.
    fn canvas_rect(&self) -> Option<Rect>;

    /// Bounding box of a table element, `None` if not measured yet.
    fn node_rect(&self, id: TableId) -> Option<Rect>;

    /// Convert a surface position into canvas-local coordinates.
    fn to_canvas_local(&self, surface: Point) -> Option<Point> {
        self.canvas_rect().map(|canvas| surface - canvas.origin)
    }
}

/// Canvas-local rectangle of every id the layout has measured; unmeasured
/// ids are skipped, and nothing is measured before the canvas is laid out.
pub fn measure_nodes<L, I>(layout: &L, ids: I) -> HashMap<TableId, Rect>
where
    L: LayoutQuery + ?Sized,
    I: IntoIterator<Item = TableId>,
{
    let Some(canvas) = layout.canvas_rect() else {
        return HashMap::new();
    };
    ids.into_iter()
        .filter_map(|id| {
            let node = layout.node_rect(id)?;
            Some((id, Rect::new(node.origin - canvas.origin, node.size)))
        })
        .collect()
}

/// Center of a canvas-local rectangle, tagged with its table.
pub fn table_center(id: TableId, local: Rect) -> TableCenter {
    let center = local.center();
    TableCenter {
        x: center.x,
        y: center.y,
        table_id: id,
    }
}

/// Measure every id that the layout knows about; unmeasured ids are skipped.
pub fn compute_centers<L, I>(layout: &L, ids: I) -> HashMap<TableId, TableCenter>
where
    L: LayoutQuery + ?Sized,
    I: IntoIterator<Item = TableId>,
{
    measure_nodes(layout, ids)
        .into_iter()
        .map(|(id, rect)| (id, table_center(id, rect)))
        .collect()
}

/// A layout held in memory: fixed rectangles fed by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    canvas: Option<Rect>,
    nodes: HashMap<TableId, Rect>,
}

impl StaticLayout {
    pub fn new(canvas: Rect) -> Self {
        Self {
            canvas: Some(canvas),
            nodes: HashMap::new(),
        }
    }

    /// A layout that has not measured anything yet.
    pub fn unmeasured() -> Self {
        Self::default()
    }

    /// Lay the model out as-is: the canvas at `origin`, each table at its
    /// live position and size offset by the same origin.
    pub fn snapshot(canvas: &Canvas, origin: Point) -> Self {
        let mut layout = Self::new(Rect::new(origin, canvas.settings().canvas_size));
        for table in canvas.tables() {
            if let Some(geometry) = canvas.live_geometry(table.id) {
                layout.set_node(table.id, Rect::new(origin + geometry.position, geometry.size));
            }
        }
        layout
    }

    pub fn with_node(mut self, id: TableId, rect: Rect) -> Self {
        self.set_node(id, rect);
        self
    }

    pub fn set_node(&mut self, id: TableId, rect: Rect) {
        self.nodes.insert(id, rect);
    }

    pub fn remove_node(&mut self, id: TableId) {
        self.nodes.remove(&id);
    }

    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = Some(canvas);
    }
}

impl LayoutQuery for StaticLayout {
    fn canvas_rect(&self) -> Option<Rect> {
        self.canvas
    }

    fn node_rect(&self, id: TableId) -> Option<Rect> {
        self.nodes.get(&id).copied()
    }
}
