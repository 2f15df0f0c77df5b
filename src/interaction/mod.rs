//! Pointer interaction for table nodes: drag to move, handle drag to resize.
//!
//! ## Architecture
//!
//! One reusable controller ([`NodeInteraction`]) is parameterized by an
//! [`InteractionPolicy`] (minimum size, clamping) and driven by the canvas for
//! whichever node a gesture starts on. Its phase is an explicit
//! [`InteractionState`] so a node can never be dragging and resizing at once.
//!
//! A running gesture is wrapped in a [`GestureSession`], which holds the
//! [`ListenerGuard`] for the canvas-wide move/up subscription. Dropping the
//! session releases the subscription.
//!
//! ## Modules
//!
//! - `state` - interaction state enum and queries
//! - `handles` - handle regions and geometric hit testing
//! - `controller` - per-gesture drag/resize math
//! - `session` - listener registry and gesture sessions

mod controller;
mod handles;
mod session;
mod state;

pub use controller::{ClampPolicy, GestureOutcome, InteractionPolicy, NodeInteraction};
pub use handles::{DragRegion, HandleMetrics, HitTarget, ResizeHandle, hit_test};
pub use session::{GestureSession, ListenerGuard, PointerListeners};
pub use state::InteractionState;
