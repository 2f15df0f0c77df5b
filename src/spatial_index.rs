//! Spatial Index Module
//!
//! R-tree over committed table rectangles, used to find which table a
//! pointer-down landed on without scanning every table.

use crate::types::{Point, Rect, TableId};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub table_id: TableId,
    pub rect: Rect,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.origin.x, self.rect.origin.y],
            [self.rect.max_x(), self.rect.max_y()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.table_id == other.table_id
    }
}

#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<TableId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the rectangle for a table.
    pub fn insert(&mut self, table_id: TableId, rect: Rect) {
        if let Some(old_entry) = self.entries.remove(&table_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry { table_id, rect };
        self.tree.insert(entry);
        self.entries.insert(table_id, entry);
    }

    pub fn remove(&mut self, table_id: TableId) -> bool {
        if let Some(entry) = self.entries.remove(&table_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// All tables whose rectangle contains `point`, in no particular order.
    pub fn query_point(&self, point: Point) -> Vec<TableId> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.rect.contains(point))
            .map(|entry| entry.table_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
