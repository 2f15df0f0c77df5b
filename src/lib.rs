//! Schemaboard - headless core of a diagram editor for sketching database
//! tables and the relationships between them.
//!
//! The host owns rendering and event delivery. It feeds pointer events and
//! commands into a [`Canvas`], calls [`Canvas::on_frame`] once per paint with a
//! [`LayoutQuery`] describing what was actually laid out, and draws the
//! connector curves the canvas hands back.
//!
//! ## Modules
//!
//! - `types` - geometry primitives, tables and fields
//! - `interaction` - drag/resize state machine and gesture sessions
//! - `connection` - connection set and the two-click connect gesture
//! - `connector` - cubic connector curves, styles and hit testing
//! - `layout` - layout query capability and center computation
//! - `scheduler` - deferred, coalescing center recomputation
//! - `canvas` - the controller that owns all of the above
//! - `settings` / `settings_watcher` - JSON settings and hot reload

pub mod canvas;
pub mod connection;
pub mod connector;
pub mod constants;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod perf;
pub mod scheduler;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;

pub use canvas::{Canvas, CanvasEvent};
pub use connection::{
    ConnectOutcome, ConnectingState, Connection, ConnectionId, ConnectionSet, RejectReason,
};
pub use connector::{ConnectorStyle, CubicCurve, RenderedConnector};
pub use error::{SettingsError, SettingsResult};
pub use interaction::{ClampPolicy, DragRegion, HitTarget, InteractionState, ResizeHandle};
pub use layout::{LayoutQuery, StaticLayout};
pub use settings::CanvasSettings;
pub use types::{
    Field, FieldPatch, FieldType, NodeGeometry, Point, Rect, Size, TableCenter, TableId,
    TableNode, TableTemplate,
};
