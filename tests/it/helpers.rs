//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCanvasBuilder` - builder for canvases with tables and connections
//! - `settle()` - run frames until pending center recomputation has happened
//! - `drag()` - a full pointer down/move/up sequence

use schemaboard::interaction::GestureOutcome;
use schemaboard::{
    Canvas, CanvasSettings, ClampPolicy, ConnectOutcome, Point, StaticLayout, TableId,
};
use std::time::{Duration, Instant};

// ============================================================================
// TestCanvasBuilder
// ============================================================================

/// Builder for canvases with tables and connections.
///
/// # Example
/// ```ignore
/// let (canvas, ids) = TestCanvasBuilder::new()
///     .with_table("Users", 3)
///     .with_table("Orders", 4)
///     .with_connection(0, 1)
///     .build();
/// ```
pub struct TestCanvasBuilder {
    settings: CanvasSettings,
    tables: Vec<(String, usize)>,
    connections: Vec<(usize, usize)>,
}

impl Default for TestCanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCanvasBuilder {
    pub fn new() -> Self {
        Self {
            settings: CanvasSettings::default(),
            tables: Vec::new(),
            connections: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: CanvasSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clamp(mut self, clamp: ClampPolicy) -> Self {
        self.settings.clamp = clamp;
        self
    }

    /// Add a table with `field_count` generated fields.
    pub fn with_table(mut self, name: impl Into<String>, field_count: usize) -> Self {
        self.tables.push((name.into(), field_count));
        self
    }

    /// Connect two tables by their position in the `with_table` calls.
    pub fn with_connection(mut self, from: usize, to: usize) -> Self {
        self.connections.push((from, to));
        self
    }

    /// Build the canvas. Returned ids are in `with_table` order. Events
    /// produced while building are drained.
    pub fn build(self) -> (Canvas, Vec<TableId>) {
        let mut canvas = Canvas::new(self.settings);
        let ids: Vec<TableId> = self
            .tables
            .into_iter()
            .map(|(name, count)| canvas.create_table(name, count))
            .collect();

        for (from, to) in self.connections {
            assert!(matches!(
                canvas.start_or_finish_connection(ids[from]),
                ConnectOutcome::Started(_)
            ));
            assert!(matches!(
                canvas.start_or_finish_connection(ids[to]),
                ConnectOutcome::Connected(_)
            ));
        }

        canvas.drain_events();
        (canvas, ids)
    }

    /// Build and run frames until the centers are known.
    pub fn build_settled(self) -> (Canvas, Vec<TableId>) {
        let (mut canvas, ids) = self.build();
        settle(&mut canvas);
        canvas.drain_events();
        (canvas, ids)
    }
}

// ============================================================================
// Frame helpers
// ============================================================================

/// Lay the canvas out at the origin, as a host with no offsets would.
pub fn layout_of(canvas: &Canvas) -> StaticLayout {
    StaticLayout::snapshot(canvas, Point::ZERO)
}

/// Run two frames a second apart so any pending request arms and fires.
/// Returns true if a recomputation ran.
pub fn settle(canvas: &mut Canvas) -> bool {
    let t0 = Instant::now();
    let layout = layout_of(canvas);
    let first = canvas.on_frame(t0, &layout);
    let second = canvas.on_frame(t0 + Duration::from_secs(1), &layout);
    first || second
}

/// Press at `from`, move to `to`, release.
pub fn drag(canvas: &mut Canvas, from: (f32, f32), to: (f32, f32)) -> Option<GestureOutcome> {
    canvas.pointer_down(Point::new(from.0, from.1));
    canvas.pointer_move(Point::new(to.0, to.1));
    canvas.pointer_up()
}
