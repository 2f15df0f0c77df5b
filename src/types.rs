//! Core types for the schemaboard canvas.
//!
//! Geometry primitives live here together with the table model. Connections
//! have their own module since the canvas owns them, not the tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ============================================================================
// Geometry
// ============================================================================

/// A point in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least the matching dimension of `min`.
    pub fn at_least(self, min: Size) -> Size {
        Size::new(self.width.max(min.width), self.height.max(min.height))
    }

    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        self.origin + self.size.half()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.max_x() && p.y >= self.origin.y && p.y <= self.max_y()
    }
}

/// Position and size of a node, the unit a gesture edits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeGeometry {
    pub position: Point,
    pub size: Size,
}

impl NodeGeometry {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u64);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column types a field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Partial update for a field. `None` leaves the value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
}

impl FieldPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            field_type: None,
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            name: None,
            field_type: Some(field_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.field_type.is_none()
    }
}

/// One table on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableNode {
    pub id: TableId,
    pub name: String,
    pub fields: Vec<Field>,
    pub position: Point,
    pub size: Size,
    /// Next suffix for generated field ids. Never decremented, so removed ids
    /// are not handed out again.
    #[serde(skip)]
    next_field_seq: u64,
}

impl TableNode {
    /// Create a table whose fields are generated from a count: the first
    /// field is a numeric `id`, the rest are `field1`, `field2`... strings.
    pub fn with_field_count(
        id: TableId,
        name: impl Into<String>,
        field_count: usize,
        geometry: NodeGeometry,
    ) -> Self {
        let fields = (0..field_count).map(|i| {
            if i == 0 {
                ("id".to_string(), FieldType::Number)
            } else {
                (format!("field{i}"), FieldType::String)
            }
        });
        Self::with_fields(id, name, fields, geometry)
    }

    pub fn with_fields<I>(
        id: TableId,
        name: impl Into<String>,
        fields: I,
        geometry: NodeGeometry,
    ) -> Self
    where
        I: IntoIterator<Item = (String, FieldType)>,
    {
        let mut table = Self {
            id,
            name: name.into(),
            fields: Vec::new(),
            position: geometry.position,
            size: geometry.size,
            next_field_seq: 0,
        };
        for (name, field_type) in fields {
            table.push_field(name, field_type);
        }
        table
    }

    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry {
            position: self.position,
            size: self.size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Append an empty string field and return its id.
    pub fn add_field(&mut self) -> &Field {
        self.push_field(String::new(), FieldType::String)
    }

    /// Returns false if no field has this id.
    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == field_id) else {
            return false;
        };
        if let Some(name) = patch.name {
            field.name = name;
        }
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
        }
        true
    }

    /// Returns false if no field has this id.
    pub fn remove_field(&mut self, field_id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != field_id);
        self.fields.len() != before
    }

    fn push_field(&mut self, name: String, field_type: FieldType) -> &Field {
        let id = format!("p{}-{}", self.id, self.next_field_seq);
        self.next_field_seq += 1;
        self.fields.push(Field {
            id,
            name,
            field_type,
        });
        &self.fields[self.fields.len() - 1]
    }
}

/// A reusable table shape: name plus field list, copied on creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableTemplate {
    pub name: String,
    pub fields: Vec<(String, FieldType)>,
}

impl TableTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push((name.into(), field_type));
        self
    }
}

/// Cached midpoint of a laid-out table, relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableCenter {
    pub x: f32,
    pub y: f32,
    pub table_id: TableId,
}

impl TableCenter {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
