//! Snapshot tests using the insta crate.
//!
//! Inline snapshots keep the expected serialized form next to the test.
//! To update after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use schemaboard::{ConnectionSet, FieldType, NodeGeometry, Point, Size, TableId, TableNode};

#[test]
fn snapshot_table_node() {
    let mut table = TableNode::with_field_count(
        TableId(1),
        "Users",
        2,
        NodeGeometry {
            position: Point::new(100.0, 100.0),
            size: Size::new(300.0, 250.0),
        },
    );
    table.fields[1].field_type = FieldType::Date;

    insta::assert_snapshot!(serde_json::to_string_pretty(&table).unwrap(), @r#"
    {
      "id": 1,
      "name": "Users",
      "fields": [
        {
          "id": "p1-0",
          "name": "id",
          "type": "number"
        },
        {
          "id": "p1-1",
          "name": "field1",
          "type": "date"
        }
      ],
      "position": {
        "x": 100.0,
        "y": 100.0
      },
      "size": {
        "width": 300.0,
        "height": 250.0
      }
    }
    "#);
}

#[test]
fn snapshot_connection() {
    let mut set = ConnectionSet::new();
    let id = set.insert(TableId(1), TableId(2)).unwrap();
    let connection = set.get(&id).unwrap();

    insta::assert_json_snapshot!(connection, { ".id" => "[uuid]" }, @r#"
    {
      "id": "[uuid]",
      "fromTableId": 1,
      "toTableId": 2
    }
    "#);
}
