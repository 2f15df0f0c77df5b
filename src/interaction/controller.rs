//! Drag and resize math for one gesture on one node.
//!
//! Every move is computed from the values captured at pointer down, never
//! from the previous move, so a burst of events cannot accumulate drift.

use super::handles::HitTarget;
use super::state::InteractionState;
use crate::constants::{MIN_TABLE_HEIGHT, MIN_TABLE_WIDTH};
use crate::types::{NodeGeometry, Point, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether a dragged node may leave its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    #[default]
    Unclamped,
    /// Keep `0 <= x <= parent.width - width`, same for y
    WithinParent,
}

impl ClampPolicy {
    pub fn apply(&self, position: Point, size: Size, parent: Size) -> Point {
        match self {
            ClampPolicy::Unclamped => position,
            ClampPolicy::WithinParent => {
                // A node larger than its parent pins to the top-left.
                let max_x = (parent.width - size.width).max(0.0);
                let max_y = (parent.height - size.height).max(0.0);
                Point::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionPolicy {
    pub min_size: Size,
    pub clamp: ClampPolicy,
}

impl Default for InteractionPolicy {
    fn default() -> Self {
        Self {
            min_size: Size::new(MIN_TABLE_WIDTH, MIN_TABLE_HEIGHT),
            clamp: ClampPolicy::default(),
        }
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOutcome {
    pub geometry: NodeGeometry,
    /// False for a press-and-release without movement
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct NodeInteraction {
    policy: InteractionPolicy,
    state: InteractionState,
    start: NodeGeometry,
    live: NodeGeometry,
}

impl NodeInteraction {
    pub fn new(policy: InteractionPolicy) -> Self {
        Self {
            policy,
            state: InteractionState::Idle,
            start: NodeGeometry::default(),
            live: NodeGeometry::default(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn policy(&self) -> &InteractionPolicy {
        &self.policy
    }

    /// Geometry as of the latest move.
    pub fn live(&self) -> NodeGeometry {
        self.live
    }

    /// Handle pointer down. Returns true if a drag or resize started.
    ///
    /// A missing target or a content hit leaves the controller idle.
    pub fn begin(
        &mut self,
        target: Option<HitTarget>,
        pointer: Point,
        geometry: NodeGeometry,
    ) -> bool {
        if self.state.is_active() {
            return false;
        }

        self.state = match target {
            Some(HitTarget::DragHandle) => InteractionState::Dragging {
                offset: pointer - geometry.position,
            },
            Some(HitTarget::Resize(handle)) => InteractionState::Resizing {
                handle,
                start_pointer: pointer,
                start_size: geometry.size,
            },
            Some(HitTarget::Content) | None => return false,
        };
        self.start = geometry;
        self.live = geometry;
        debug!(
            state = ?self.state,
            handle = self.state.resize_handle().map(|h| h.code()),
            "gesture started"
        );
        true
    }

    /// Handle pointer move. Returns the new live geometry while a gesture runs.
    pub fn update(&mut self, pointer: Point, parent: Size) -> Option<NodeGeometry> {
        match self.state {
            InteractionState::Idle => return None,
            InteractionState::Dragging { offset } => {
                let position = pointer - offset;
                self.live.position = self.policy.clamp.apply(position, self.live.size, parent);
            }
            InteractionState::Resizing {
                handle,
                start_pointer,
                start_size,
            } => {
                let delta = pointer - start_pointer;
                let min = self.policy.min_size;
                if handle.affects_width() {
                    self.live.size.width = (start_size.width + delta.x).max(min.width);
                }
                if handle.affects_height() {
                    self.live.size.height = (start_size.height + delta.y).max(min.height);
                }
            }
        }
        Some(self.live)
    }

    /// Handle pointer up. Returns `None` if no gesture was running.
    pub fn finish(&mut self) -> Option<GestureOutcome> {
        if self.state.is_idle() {
            return None;
        }
        let outcome = GestureOutcome {
            geometry: self.live,
            changed: self.live != self.start,
        };
        debug!(state = ?self.state, changed = outcome.changed, "gesture finished");
        self.state.reset();
        Some(outcome)
    }
}

impl Default for NodeInteraction {
    fn default() -> Self {
        Self::new(InteractionPolicy::default())
    }
}
