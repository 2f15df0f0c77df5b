//! The canvas controller.
//!
//! [`Canvas`] is the single writer for the table set and the connection set.
//! Hosts drive it with three kinds of input:
//!
//! - commands (create/remove tables, edit fields, connect, disconnect),
//! - pointer events in canvas-local coordinates,
//! - one [`Canvas::on_frame`] call per paint, carrying a [`LayoutQuery`].
//!
//! and read back tables, rendered connectors and a queue of [`CanvasEvent`]s.
//!
//! ## Geometry ownership
//!
//! While a drag or resize runs, the gesture session owns the node's geometry
//! ([`Canvas::live_geometry`]). The table itself is only updated when the
//! pointer is released, after which a center recomputation is scheduled.
//!
//! Hit testing uses the rectangle the layout last measured for a table,
//! since content can render a table larger than its stored size. Tables
//! that were never measured fall back to their stored geometry.

use crate::connection::{
    ConnectOutcome, ConnectingState, Connection, ConnectionId, ConnectionSet, RejectReason,
};
use crate::connector::{ConnectorStyle, CubicCurve, RenderedConnector};
use crate::constants::{
    PLACEMENT_COLUMNS, PLACEMENT_ORIGIN, PLACEMENT_SLOTS, PLACEMENT_STEP_X, PLACEMENT_STEP_Y,
};
use crate::interaction::{
    GestureOutcome, GestureSession, HitTarget, InteractionState, NodeInteraction,
    PointerListeners, hit_test,
};
use crate::layout::{LayoutQuery, measure_nodes, table_center};
use crate::profile_scope;
use crate::scheduler::{RecomputeScheduler, RecomputeTrigger};
use crate::settings::CanvasSettings;
use crate::spatial_index::SpatialIndex;
use crate::types::{
    FieldPatch, NodeGeometry, Point, Rect, TableCenter, TableId, TableNode, TableTemplate,
};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Notifications for the host, drained with [`Canvas::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    TableCreated(TableId),
    TableRemoved(TableId),
    ConnectionCreated(Connection),
    ConnectionRemoved(ConnectionId),
    ConnectionRejected(RejectReason),
    /// Centers were recomputed; connectors need redrawing
    GeometryChanged,
}

pub struct Canvas {
    settings: CanvasSettings,
    tables: Vec<TableNode>,
    connections: ConnectionSet,
    connecting: ConnectingState,
    selected_connection: Option<ConnectionId>,
    centers: HashMap<TableId, TableCenter>,
    /// Canvas-local rectangles from the last layout measurement
    measured: HashMap<TableId, Rect>,
    spatial: SpatialIndex,
    listeners: PointerListeners,
    session: Option<GestureSession>,
    scheduler: RecomputeScheduler,
    events: Vec<CanvasEvent>,
    next_table_id: u64,
}

impl Canvas {
    pub fn new(settings: CanvasSettings) -> Self {
        let scheduler = RecomputeScheduler::new(settings.mount_recompute_delay());
        Self {
            settings,
            tables: Vec::new(),
            connections: ConnectionSet::new(),
            connecting: ConnectingState::default(),
            selected_connection: None,
            centers: HashMap::new(),
            measured: HashMap::new(),
            spatial: SpatialIndex::new(),
            listeners: PointerListeners::new(),
            session: None,
            scheduler,
            events: Vec::new(),
            next_table_id: 1,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Tables in stacking order, bottom first.
    pub fn tables(&self) -> &[TableNode] {
        &self.tables
    }

    pub fn table(&self, id: TableId) -> Option<&TableNode> {
        self.tables.iter().find(|t| t.id == id)
    }

    fn table_mut(&mut self, id: TableId) -> Option<&mut TableNode> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    pub fn connecting(&self) -> &ConnectingState {
        &self.connecting
    }

    pub fn selected_connection(&self) -> Option<&ConnectionId> {
        self.selected_connection.as_ref()
    }

    pub fn centers(&self) -> &HashMap<TableId, TableCenter> {
        &self.centers
    }

    pub fn center(&self, id: TableId) -> Option<TableCenter> {
        self.centers.get(&id).copied()
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    pub fn gesture(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.session
            .as_ref()
            .map(|s| *s.interaction().state())
            .unwrap_or_default()
    }

    /// Geometry to draw this frame: the gesture's transient geometry for the
    /// node being dragged or resized, the committed geometry otherwise.
    pub fn live_geometry(&self, id: TableId) -> Option<NodeGeometry> {
        match &self.session {
            Some(session) if session.table_id() == id => Some(session.interaction().live()),
            _ => self.table(id).map(TableNode::geometry),
        }
    }

    /// Geometry pointer events are resolved against: the measured rectangle
    /// when there is one, the stored geometry otherwise.
    pub fn hit_geometry(&self, id: TableId) -> Option<NodeGeometry> {
        match self.measured.get(&id) {
            Some(rect) => Some(NodeGeometry {
                position: rect.origin,
                size: rect.size,
            }),
            None => self.table(id).map(TableNode::geometry),
        }
    }

    pub fn is_recompute_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Swap in new settings. Existing tables grow to a raised minimum size.
    /// A running gesture keeps the policy it started with, and its result is
    /// raised to the new minimum when it is committed.
    pub fn apply_settings(&mut self, settings: CanvasSettings) {
        let min = settings.min_table_size;
        for table in &mut self.tables {
            let size = table.size.at_least(min);
            if size != table.size {
                table.size = size;
                if !self.measured.contains_key(&table.id) {
                    self.spatial.insert(table.id, table.rect());
                }
            }
        }
        self.scheduler.set_mount_delay(settings.mount_recompute_delay());
        self.settings = settings;
        self.scheduler.request(RecomputeTrigger::SettingsChanged);
        info!("Canvas settings applied");
    }

    // ========================================================================
    // Table commands
    // ========================================================================

    /// Create a table with `field_count` generated fields.
    pub fn create_table(&mut self, name: impl Into<String>, field_count: usize) -> TableId {
        let id = self.allocate_table_id();
        let table = TableNode::with_field_count(id, name, field_count, self.initial_geometry(id));
        self.insert_table(table)
    }

    /// Create a table copying the template's name and fields.
    pub fn create_table_from_template(&mut self, template: &TableTemplate) -> TableId {
        let id = self.allocate_table_id();
        let table = TableNode::with_fields(
            id,
            template.name.clone(),
            template.fields.iter().cloned(),
            self.initial_geometry(id),
        );
        self.insert_table(table)
    }

    pub fn rename_table(&mut self, id: TableId, name: impl Into<String>) -> bool {
        let Some(table) = self.table_mut(id) else {
            warn!(table = %id, "rename of unknown table ignored");
            return false;
        };
        table.name = name.into();
        true
    }

    /// Remove a table together with every connection touching it.
    pub fn remove_table(&mut self, id: TableId) -> bool {
        let Some(index) = self.tables.iter().position(|t| t.id == id) else {
            warn!(table = %id, "remove of unknown table ignored");
            return false;
        };

        for connection in self.connections.remove_touching(id) {
            if self.selected_connection.as_ref() == Some(&connection.id) {
                self.selected_connection = None;
            }
            self.events.push(CanvasEvent::ConnectionRemoved(connection.id));
        }
        if self.connecting.from_table_id() == Some(id) {
            self.connecting.clear();
        }
        if self.session.as_ref().is_some_and(|s| s.table_id() == id) {
            // Dropping the session releases its pointer listeners.
            self.session = None;
        }

        self.spatial.remove(id);
        self.centers.remove(&id);
        self.measured.remove(&id);
        let table = self.tables.remove(index);
        self.events.push(CanvasEvent::TableRemoved(id));
        self.scheduler.request(RecomputeTrigger::TableRemoved);
        info!(table = %id, name = %table.name, "table removed");
        true
    }

    /// Append an empty field. Returns the new field id.
    pub fn add_field(&mut self, table_id: TableId) -> Option<String> {
        let Some(table) = self.table_mut(table_id) else {
            warn!(table = %table_id, "add_field on unknown table ignored");
            return None;
        };
        let field_id = table.add_field().id.clone();
        self.scheduler.request(RecomputeTrigger::ContentChanged);
        Some(field_id)
    }

    pub fn update_field(&mut self, table_id: TableId, field_id: &str, patch: FieldPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let updated = self
            .table_mut(table_id)
            .is_some_and(|table| table.update_field(field_id, patch));
        if !updated {
            warn!(table = %table_id, field = field_id, "update of unknown field ignored");
        }
        updated
    }

    pub fn remove_field(&mut self, table_id: TableId, field_id: &str) -> bool {
        let removed = self
            .table_mut(table_id)
            .is_some_and(|table| table.remove_field(field_id));
        if removed {
            self.scheduler.request(RecomputeTrigger::ContentChanged);
        } else {
            warn!(table = %table_id, field = field_id, "remove of unknown field ignored");
        }
        removed
    }

    fn allocate_table_id(&mut self) -> TableId {
        let id = TableId(self.next_table_id);
        self.next_table_id += 1;
        id
    }

    /// Tables fill a 3-wide grid of slots, wrapping after ten.
    fn initial_geometry(&self, id: TableId) -> NodeGeometry {
        let slot = (id.0 - 1) % PLACEMENT_SLOTS;
        let column = (slot % PLACEMENT_COLUMNS) as f32;
        let row = (slot / PLACEMENT_COLUMNS) as f32;
        NodeGeometry {
            position: Point::new(
                PLACEMENT_ORIGIN.0 + column * PLACEMENT_STEP_X,
                PLACEMENT_ORIGIN.1 + row * PLACEMENT_STEP_Y,
            ),
            size: self.settings.default_table_size.at_least(self.settings.min_table_size),
        }
    }

    fn insert_table(&mut self, table: TableNode) -> TableId {
        let id = table.id;
        info!(table = %id, name = %table.name, fields = table.fields.len(), "table created");
        self.spatial.insert(id, table.rect());
        self.tables.push(table);
        self.events.push(CanvasEvent::TableCreated(id));
        self.scheduler.request(RecomputeTrigger::Mount);
        id
    }

    // ========================================================================
    // Connection commands
    // ========================================================================

    /// Click on a table's connect affordance: starts, cancels or finishes
    /// the two-click connect gesture.
    pub fn start_or_finish_connection(&mut self, table_id: TableId) -> ConnectOutcome {
        let exists = self.table(table_id).is_some();
        let outcome = self.connecting.click(table_id, exists, &mut self.connections);

        match &outcome {
            ConnectOutcome::Connected(id) => {
                if let Some(connection) = self.connections.get(id) {
                    info!(
                        connection = %id,
                        from = %connection.from_table_id,
                        to = %connection.to_table_id,
                        "tables connected"
                    );
                    self.events.push(CanvasEvent::ConnectionCreated(connection.clone()));
                }
            }
            ConnectOutcome::Rejected(reason) => {
                debug!(table = %table_id, ?reason, "connection rejected");
                self.events.push(CanvasEvent::ConnectionRejected(*reason));
            }
            ConnectOutcome::Started(_) | ConnectOutcome::Cancelled(_) => {}
        }
        outcome
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> bool {
        if self.connections.remove(id).is_none() {
            warn!(connection = %id, "remove of unknown connection ignored");
            return false;
        }
        if self.selected_connection.as_ref() == Some(id) {
            self.selected_connection = None;
        }
        self.events.push(CanvasEvent::ConnectionRemoved(id.clone()));
        info!(connection = %id, "connection removed");
        true
    }

    /// Mark one connection as active, or clear the selection with `None`.
    pub fn select_connection(&mut self, id: Option<ConnectionId>) -> bool {
        if let Some(id) = &id {
            if self.connections.get(id).is_none() {
                return false;
            }
        }
        self.selected_connection = id;
        true
    }

    /// Topmost connector whose clickable stroke contains `point`.
    pub fn connection_at(&self, point: Point) -> Option<ConnectionId> {
        let hit_width = self.settings.connector_hit_width;
        self.connectors()
            .into_iter()
            .rev()
            .find(|c| c.curve.hit(point, hit_width))
            .map(|c| c.id)
    }

    /// Connectors for every connection whose two centers are known.
    ///
    /// A connection touching a table that has not been measured yet is
    /// skipped for this frame.
    pub fn connectors(&self) -> Vec<RenderedConnector> {
        self.connections
            .iter()
            .filter_map(|connection| {
                let from = self.centers.get(&connection.from_table_id)?;
                let to = self.centers.get(&connection.to_table_id)?;
                let active = self.selected_connection.as_ref() == Some(&connection.id);
                Some(RenderedConnector {
                    id: connection.id.clone(),
                    curve: CubicCurve::between(from.point(), to.point()),
                    style: ConnectorStyle::for_state(active),
                })
            })
            .collect()
    }

    /// Rubber-band line from the connect origin to the pointer.
    pub fn preview_connector(&self) -> Option<CubicCurve> {
        let from = self.connecting.from_table_id()?;
        let center = self.centers.get(&from)?;
        let to = self.connecting.temp_to_position()?;
        Some(CubicCurve::between(center.point(), to))
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    /// Pointer pressed at a canvas-local position.
    ///
    /// Returns the table and region that were hit. A drag or resize starts
    /// only for drag-handle and resize-handle hits; content hits and misses
    /// leave the canvas idle.
    pub fn pointer_down(&mut self, pointer: Point) -> Option<(TableId, HitTarget)> {
        profile_scope!("pointer_down");

        if self.session.is_some() {
            return None;
        }

        let candidates = self.spatial.query_point(pointer);
        let table_id = self.tables.iter().rev().find(|t| candidates.contains(&t.id))?.id;
        let geometry = self.hit_geometry(table_id)?;
        let target = hit_test(geometry.rect(), pointer, &self.settings.handle_metrics())?;

        let mut interaction = NodeInteraction::new(self.settings.interaction_policy());
        if interaction.begin(Some(target), pointer, geometry) {
            self.session = Some(GestureSession::start(&self.listeners, table_id, interaction));
        }
        Some((table_id, target))
    }

    /// Pointer moved anywhere on the surface. Returns true if anything needs
    /// redrawing.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        profile_scope!("pointer_move");

        let mut changed = false;
        if self.connecting.is_connecting() {
            self.connecting.track_pointer(pointer);
            changed = true;
        }
        if let Some(session) = self.session.as_mut() {
            let parent = self.settings.canvas_size;
            changed |= session.interaction_mut().update(pointer, parent).is_some();
        }
        changed
    }

    /// Pointer released. Commits a running gesture and schedules a center
    /// recomputation if the geometry changed.
    ///
    /// The committed size never goes below the current minimum, even if the
    /// minimum was raised while the gesture ran.
    pub fn pointer_up(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        let table_id = session.table_id();
        let mut outcome = session.finish()?;
        outcome.geometry.size = outcome.geometry.size.at_least(self.settings.min_table_size);

        if outcome.changed {
            let geometry = outcome.geometry;
            if let Some(table) = self.table_mut(table_id) {
                table.position = geometry.position;
                table.size = geometry.size;
            }
            // Stands in for the measurement until the next recomputation.
            if let Some(rect) = self.measured.get_mut(&table_id) {
                *rect = geometry.rect();
            }
            self.spatial.insert(table_id, geometry.rect());
            self.scheduler.request(RecomputeTrigger::GeometryCommitted);
            debug!(table = %table_id, ?geometry, "geometry committed");
        }
        Some(outcome)
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn window_resized(&mut self) {
        self.scheduler.request(RecomputeTrigger::WindowResized);
    }

    /// Called once per paint, after the host laid the frame out. Runs a
    /// pending center recomputation when it is due and returns true if it
    /// ran.
    pub fn on_frame<L: LayoutQuery + ?Sized>(&mut self, now: Instant, layout: &L) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        self.recompute_centers(layout);
        self.events.push(CanvasEvent::GeometryChanged);
        true
    }

    /// Re-measure every table and recompute centers right away.
    pub fn recompute_centers<L: LayoutQuery + ?Sized>(&mut self, layout: &L) {
        profile_scope!("recompute_centers");

        self.measured = measure_nodes(layout, self.tables.iter().map(|t| t.id));
        self.centers = self
            .measured
            .iter()
            .map(|(&id, &rect)| (id, table_center(id, rect)))
            .collect();
        for table in &self.tables {
            let rect = self.measured.get(&table.id).copied().unwrap_or_else(|| table.rect());
            self.spatial.insert(table.id, rect);
        }
        trace!(
            measured = self.centers.len(),
            tables = self.tables.len(),
            "centers recomputed"
        );
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}
