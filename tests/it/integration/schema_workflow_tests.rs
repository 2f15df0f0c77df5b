//! Schema Workflow Integration Tests

use crate::helpers::{TestCanvasBuilder, settle};
use schemaboard::{
    Canvas, CanvasEvent, ConnectOutcome, ConnectorStyle, FieldPatch, FieldType, Point,
    RejectReason, TableId, TableTemplate,
};

#[test]
fn test_users_orders_workflow() {
    let mut canvas = Canvas::default();
    let users = canvas.create_table("Users", 3);
    let orders = canvas.create_table("Orders", 4);

    assert_eq!(canvas.table(users).unwrap().position, Point::new(100.0, 100.0));
    assert_eq!(canvas.table(orders).unwrap().position, Point::new(450.0, 100.0));
    assert_eq!(canvas.table(orders).unwrap().fields.len(), 4);

    assert_eq!(canvas.start_or_finish_connection(users), ConnectOutcome::Started(users));
    let ConnectOutcome::Connected(id) = canvas.start_or_finish_connection(orders) else {
        panic!("expected Users and Orders to connect");
    };

    // No centers before the first recomputation.
    assert!(canvas.connectors().is_empty());
    assert!(settle(&mut canvas));

    let connectors = canvas.connectors();
    assert_eq!(connectors.len(), 1);
    assert_eq!(connectors[0].id, id);
    assert_eq!(connectors[0].style, ConnectorStyle::INACTIVE);
    insta::assert_snapshot!(connectors[0].svg_path(), @"M 250 225 C 425 225, 425 225, 600 225");

    let events = canvas.drain_events();
    assert_eq!(events[0], CanvasEvent::TableCreated(users));
    assert_eq!(events[1], CanvasEvent::TableCreated(orders));
    assert!(matches!(&events[2], CanvasEvent::ConnectionCreated(c) if c.id == id));
    assert_eq!(events[3], CanvasEvent::GeometryChanged);
}

#[test]
fn test_remove_table_cascades() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_table("A", 1)
        .with_table("B", 1)
        .with_table("C", 1)
        .with_connection(0, 1)
        .with_connection(0, 2)
        .with_connection(1, 2)
        .build_settled();
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let ab = canvas.connections().iter().find(|conn| conn.joins(a, b)).unwrap().id.clone();
    assert!(canvas.select_connection(Some(ab)));

    assert!(canvas.remove_table(a));

    assert_eq!(canvas.connections().len(), 1);
    assert!(canvas.connections().contains_pair(b, c));
    assert!(canvas.connections().iter().all(|conn| !conn.touches(a)));
    assert_eq!(canvas.selected_connection(), None);
    assert_eq!(canvas.center(a), None);
    assert!(canvas.table(a).is_none());

    let events = canvas.drain_events();
    let removed = events
        .iter()
        .filter(|e| matches!(e, CanvasEvent::ConnectionRemoved(_)))
        .count();
    assert_eq!(removed, 2);
    assert_eq!(events.last(), Some(&CanvasEvent::TableRemoved(a)));

    settle(&mut canvas);
    assert_eq!(canvas.connectors().len(), 1);
}

#[test]
fn test_remove_unknown_table() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_table("A", 1).build();
    assert!(!canvas.remove_table(TableId(99)));
    assert_eq!(canvas.tables().len(), 1);
    assert!(canvas.drain_events().is_empty());
}

#[test]
fn test_remove_connect_origin_clears_gesture() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_table("A", 1).with_table("B", 1).build();
    canvas.start_or_finish_connection(ids[0]);
    assert!(canvas.connecting().is_connecting());

    canvas.remove_table(ids[0]);
    assert!(!canvas.connecting().is_connecting());
    assert_eq!(canvas.start_or_finish_connection(ids[1]), ConnectOutcome::Started(ids[1]));
}

#[test]
fn test_self_connection_cancels() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_table("A", 1).build();
    canvas.start_or_finish_connection(ids[0]);
    assert_eq!(canvas.start_or_finish_connection(ids[0]), ConnectOutcome::Cancelled(ids[0]));
    assert!(canvas.connections().is_empty());
    assert!(!canvas.connecting().is_connecting());
    assert!(canvas.drain_events().is_empty());
}

#[test]
fn test_reverse_connection_rejected() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_table("A", 1)
        .with_table("B", 1)
        .with_connection(0, 1)
        .build();

    canvas.start_or_finish_connection(ids[1]);
    assert_eq!(
        canvas.start_or_finish_connection(ids[0]),
        ConnectOutcome::Rejected(RejectReason::Duplicate)
    );
    assert_eq!(canvas.connections().len(), 1);
    assert_eq!(
        canvas.drain_events(),
        vec![CanvasEvent::ConnectionRejected(RejectReason::Duplicate)]
    );
}

#[test]
fn test_connect_unknown_table() {
    let mut canvas = Canvas::default();
    assert_eq!(
        canvas.start_or_finish_connection(TableId(5)),
        ConnectOutcome::Rejected(RejectReason::UnknownTable)
    );
    assert!(!canvas.connecting().is_connecting());
}

#[test]
fn test_select_and_hit_connection() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_table("Users", 3)
        .with_table("Orders", 4)
        .with_connection(0, 1)
        .build_settled();

    let id = canvas.connection_at(Point::new(425.0, 228.0)).unwrap();
    assert_eq!(canvas.connection_at(Point::new(425.0, 400.0)), None);

    assert!(canvas.select_connection(Some(id.clone())));
    assert!(canvas.connectors()[0].is_active());

    assert!(!canvas.select_connection(Some("missing".into())));
    assert_eq!(canvas.selected_connection(), Some(&id));

    assert!(canvas.select_connection(None));
    assert!(!canvas.connectors()[0].is_active());
}

#[test]
fn test_remove_selected_connection() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_table("A", 1)
        .with_table("B", 1)
        .with_connection(0, 1)
        .build_settled();

    let id = canvas.connections().iter().next().unwrap().id.clone();
    canvas.select_connection(Some(id.clone()));

    assert!(canvas.remove_connection(&id));
    assert!(!canvas.remove_connection(&id));
    assert_eq!(canvas.selected_connection(), None);
    assert!(canvas.connectors().is_empty());
    assert_eq!(canvas.drain_events(), vec![CanvasEvent::ConnectionRemoved(id)]);
}

#[test]
fn test_preview_follows_pointer() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_table("Users", 3).build_settled();

    canvas.start_or_finish_connection(ids[0]);
    assert_eq!(canvas.preview_connector(), None);

    assert!(canvas.pointer_move(Point::new(700.0, 500.0)));
    let preview = canvas.preview_connector().unwrap();
    assert_eq!(preview.from, Point::new(250.0, 225.0));
    assert_eq!(preview.to, Point::new(700.0, 500.0));

    canvas.start_or_finish_connection(ids[0]);
    assert_eq!(canvas.preview_connector(), None);
}

#[test]
fn test_field_editing() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_table("Users", 1).build_settled();
    let users = ids[0];

    let field_id = canvas.add_field(users).unwrap();
    assert_eq!(field_id, "p1-1");
    assert!(canvas.is_recompute_pending());

    assert!(canvas.update_field(users, &field_id, FieldPatch::name("email")));
    assert!(!canvas.update_field(users, &field_id, FieldPatch::default()));
    assert!(!canvas.update_field(users, "p1-9", FieldPatch::field_type(FieldType::Date)));
    assert_eq!(canvas.table(users).unwrap().field(&field_id).unwrap().name, "email");

    assert!(canvas.remove_field(users, "p1-0"));
    assert!(!canvas.remove_field(users, "p1-0"));
    assert_eq!(canvas.table(users).unwrap().fields.len(), 1);

    assert_eq!(canvas.add_field(TableId(42)), None);
}

#[test]
fn test_create_from_template_and_rename() {
    let mut canvas = Canvas::default();
    let template = TableTemplate::new("Products")
        .with_field("sku", FieldType::String)
        .with_field("price", FieldType::Number);

    let id = canvas.create_table_from_template(&template);
    let table = canvas.table(id).unwrap();
    assert_eq!(table.name, "Products");
    assert_eq!(table.fields.len(), 2);
    assert_eq!(table.fields[1].name, "price");

    assert!(canvas.rename_table(id, "Items"));
    assert_eq!(canvas.table(id).unwrap().name, "Items");
    assert!(!canvas.rename_table(TableId(9), "x"));
}
