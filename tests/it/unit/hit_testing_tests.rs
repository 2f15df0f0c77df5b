//! Unit tests for handle hit testing.

use schemaboard::interaction::{HandleMetrics, hit_test};
use schemaboard::{DragRegion, HitTarget, Point, Rect, ResizeHandle};

fn node() -> Rect {
    Rect::from_xywh(100.0, 100.0, 300.0, 250.0)
}

#[test]
fn test_regions_with_default_metrics() {
    let metrics = HandleMetrics::default();
    let cases = [
        ((150.0, 110.0), Some(HitTarget::DragHandle)),
        ((150.0, 200.0), Some(HitTarget::Content)),
        ((398.0, 200.0), Some(HitTarget::Resize(ResizeHandle::East))),
        ((200.0, 348.0), Some(HitTarget::Resize(ResizeHandle::South))),
        ((395.0, 345.0), Some(HitTarget::Resize(ResizeHandle::SouthEast))),
        ((50.0, 50.0), None),
    ];
    for ((x, y), expected) in cases {
        assert_eq!(hit_test(node(), Point::new(x, y), &metrics), expected, "at ({x}, {y})");
    }
}

#[test]
fn test_resize_handle_in_header_row() {
    // East edge wins over the header.
    let metrics = HandleMetrics::default();
    assert_eq!(
        hit_test(node(), Point::new(399.0, 105.0), &metrics),
        Some(HitTarget::Resize(ResizeHandle::East))
    );
}

#[test]
fn test_whole_node_drag_region() {
    let metrics = HandleMetrics {
        drag_region: DragRegion::WholeNode,
        ..HandleMetrics::default()
    };
    assert_eq!(hit_test(node(), Point::new(150.0, 200.0), &metrics), Some(HitTarget::DragHandle));
}

#[test]
fn test_handle_codes() {
    for handle in [ResizeHandle::East, ResizeHandle::South, ResizeHandle::SouthEast] {
        assert_eq!(ResizeHandle::from_code(handle.code()), Some(handle));
    }
    assert_eq!(ResizeHandle::from_code("nw"), None);
}
