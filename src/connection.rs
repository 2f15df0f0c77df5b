//! Connections between tables and the two-click connect gesture.
//!
//! Connections are undirected: `from` and `to` only record the click order.
//! The set never holds two connections over the same unordered pair, and
//! never a connection from a table to itself.

use crate::types::{Point, TableId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new_v4() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub from_table_id: TableId,
    pub to_table_id: TableId,
}

impl Connection {
    pub fn touches(&self, table: TableId) -> bool {
        self.from_table_id == table || self.to_table_id == table
    }

    /// Unordered pair match: `(a, b)` equals `(b, a)`.
    pub fn joins(&self, a: TableId, b: TableId) -> bool {
        (self.from_table_id == a && self.to_table_id == b)
            || (self.from_table_id == b && self.to_table_id == a)
    }
}

/// Ordered set of connections, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn contains_pair(&self, a: TableId, b: TableId) -> bool {
        self.connections.iter().any(|c| c.joins(a, b))
    }

    /// Append a connection unless it would be a self-loop or duplicate.
    pub fn insert(&mut self, from: TableId, to: TableId) -> Option<ConnectionId> {
        if from == to || self.contains_pair(from, to) {
            return None;
        }
        let id = ConnectionId::new_v4();
        self.connections.push(Connection {
            id: id.clone(),
            from_table_id: from,
            to_table_id: to,
        });
        Some(id)
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| &c.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Drop every connection touching `table` and return them.
    pub fn remove_touching(&mut self, table: TableId) -> Vec<Connection> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| c.touches(table));
        self.connections = kept;
        removed
    }
}

/// Why a finishing click did not create a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The pair is already connected, in either direction
    Duplicate,
    /// The clicked table does not exist
    UnknownTable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Started(TableId),
    /// Origin clicked again
    Cancelled(TableId),
    Connected(ConnectionId),
    Rejected(RejectReason),
}

/// Transient state of the two-click connect gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConnectingState {
    from_table_id: Option<TableId>,
    temp_to_position: Option<Point>,
}

impl ConnectingState {
    pub fn is_connecting(&self) -> bool {
        self.from_table_id.is_some()
    }

    pub fn from_table_id(&self) -> Option<TableId> {
        self.from_table_id
    }

    /// Latest pointer position while connecting.
    pub fn temp_to_position(&self) -> Option<Point> {
        self.temp_to_position
    }

    /// Record the pointer for the rubber-band preview. Ignored when idle.
    pub fn track_pointer(&mut self, position: Point) {
        if self.is_connecting() {
            self.temp_to_position = Some(position);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Handle a click on a table's connect affordance.
    ///
    /// The first click starts the gesture; the second finishes it, on any
    /// outcome. `table_exists` guards against ids the caller no longer owns.
    pub fn click(
        &mut self,
        table: TableId,
        table_exists: bool,
        set: &mut ConnectionSet,
    ) -> ConnectOutcome {
        let Some(from) = self.from_table_id else {
            if !table_exists {
                return ConnectOutcome::Rejected(RejectReason::UnknownTable);
            }
            self.from_table_id = Some(table);
            debug!(table = %table, "connect started");
            return ConnectOutcome::Started(table);
        };

        self.clear();

        if from == table {
            debug!(table = %table, "connect cancelled");
            return ConnectOutcome::Cancelled(table);
        }
        if !table_exists {
            return ConnectOutcome::Rejected(RejectReason::UnknownTable);
        }
        match set.insert(from, table) {
            Some(id) => ConnectOutcome::Connected(id),
            None => ConnectOutcome::Rejected(RejectReason::Duplicate),
        }
    }
}
