//! Interaction state machine for a single node.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging    (pointer down on the drag handle)
//! Idle -> Resizing    (pointer down on an e / s / se resize handle)
//!
//! Any -> Idle         (pointer up - commits the gesture)
//! ```
//!
//! Pointer down anywhere else leaves the node `Idle` so clicks reach the
//! editable content inside it.

use super::handles::ResizeHandle;
use crate::types::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,

    /// Moving the node
    Dragging {
        /// Pointer position minus node origin at pointer down
        offset: Point,
    },

    /// Resizing the node
    Resizing {
        /// Handle that was grabbed
        handle: ResizeHandle,
        /// Pointer position at pointer down
        start_pointer: Point,
        /// Node size at pointer down
        start_size: Size,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    /// Returns true while a gesture needs pointer move/up delivery
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn drag_offset(&self) -> Option<Point> {
        match self {
            Self::Dragging { offset } => Some(*offset),
            _ => None,
        }
    }

    pub fn resize_handle(&self) -> Option<ResizeHandle> {
        match self {
            Self::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
