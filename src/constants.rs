//! Canvas-wide constants.
//!
//! These are the built-in defaults. Most of them can be overridden through
//! [`CanvasSettings`](crate::settings::CanvasSettings).

// ============================================================================
// Table Defaults
// ============================================================================

/// Minimum table width reachable by resizing
pub const MIN_TABLE_WIDTH: f32 = 150.0;

/// Minimum table height reachable by resizing
pub const MIN_TABLE_HEIGHT: f32 = 80.0;

/// Size of a freshly created table
pub const DEFAULT_TABLE_SIZE: (f32, f32) = (300.0, 250.0);

/// Top-left of the first placement slot
pub const PLACEMENT_ORIGIN: (f32, f32) = (100.0, 100.0);

/// Horizontal distance between placement slots
pub const PLACEMENT_STEP_X: f32 = 350.0;

/// Vertical distance between placement slots
pub const PLACEMENT_STEP_Y: f32 = 250.0;

/// Slots per placement row
pub const PLACEMENT_COLUMNS: u64 = 3;

/// Placement slots before positions start repeating
pub const PLACEMENT_SLOTS: u64 = 10;

// ============================================================================
// Canvas
// ============================================================================

/// Default canvas size: an A4 sheet in landscape at 96 dpi (297mm x 210mm)
pub const DEFAULT_CANVAS_SIZE: (f32, f32) = (1123.0, 794.0);

// ============================================================================
// Handles
// ============================================================================

/// Height of the header strip that acts as drag handle
pub const HEADER_HEIGHT: f32 = 32.0;

/// Thickness of the east/south resize strips
pub const EDGE_HANDLE_THICKNESS: f32 = 6.0;

/// Side length of the south-east resize square
pub const CORNER_HANDLE_SIZE: f32 = 12.0;

// ============================================================================
// Connectors
// ============================================================================

/// Radius of the circle drawn at both ends of a connector
pub const ENDPOINT_RADIUS: f32 = 4.0;

/// Width of the invisible stroke used for clicking connectors
pub const CONNECTOR_HIT_WIDTH: f32 = 10.0;

/// Line segments used when measuring distance to a connector curve
pub const CURVE_SAMPLES: usize = 32;

// ============================================================================
// Timing
// ============================================================================

/// Delay between a table mounting and its first center recomputation
pub const MOUNT_RECOMPUTE_DELAY_MS: u64 = 100;
