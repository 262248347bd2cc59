use serde::{Deserialize, Serialize};

/// A 2-D point in chart canvas coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One command of a vector path, mirroring the usual path mini-language
/// but as typed records so geometry stays testable without any markup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc from the current point to `end`.
    Arc {
        radius: f64,
        /// Set when the arc spans more than 180 degrees
        large_arc: bool,
        /// Sweep direction; `true` is clockwise in screen coordinates
        clockwise: bool,
        end: Point,
    },
    Close,
}

/// Horizontal anchoring of a text element relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Role of a shape within a chart, so a renderer can style shapes
/// without the geometry engine knowing about colors or CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeRole {
    Axis,
    Gridline,
    Bar,
    Sector,
    /// Inner cut-out circle of a donut chart
    Hole,
    TrendLine,
    AreaFill,
    DataPoint,
    LevelRing,
    ProgressArc,
    Label,
    Value,
}

/// A renderer-agnostic drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        role: ShapeRole,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        role: ShapeRole,
    },
    Circle {
        center: Point,
        radius: f64,
        role: ShapeRole,
    },
    Path {
        commands: Vec<PathCommand>,
        role: ShapeRole,
    },
    Polyline {
        points: Vec<Point>,
        role: ShapeRole,
    },
    Polygon {
        points: Vec<Point>,
        role: ShapeRole,
    },
    Text {
        position: Point,
        content: String,
        anchor: TextAnchor,
        role: ShapeRole,
    },
}

/// A complete chart scene: canvas extent plus an ordered list of shapes
/// (painter's order — later shapes draw on top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
}

impl ChartScene {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// All shapes carrying the given role, in paint order.
    pub fn shapes_with_role(&self, role: ShapeRole) -> Vec<&Shape> {
        self.shapes
            .iter()
            .filter(|s| match s {
                Shape::Line { role: r, .. }
                | Shape::Rect { role: r, .. }
                | Shape::Circle { role: r, .. }
                | Shape::Path { role: r, .. }
                | Shape::Polyline { role: r, .. }
                | Shape::Polygon { role: r, .. }
                | Shape::Text { role: r, .. } => *r == role,
            })
            .collect()
    }
}

/// Output of every chart builder. The empty-state branch is a value,
/// not an error: charts with zero input rows render a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Chart {
    Scene(ChartScene),
    Empty { message: String },
}

impl Chart {
    /// Convenience constructor for the empty-state branch.
    #[must_use]
    pub fn empty(message: impl Into<String>) -> Self {
        Chart::Empty {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Chart::Empty { .. })
    }

    /// The scene, when this chart actually has one.
    #[must_use]
    pub fn scene(&self) -> Option<&ChartScene> {
        match self {
            Chart::Scene(scene) => Some(scene),
            Chart::Empty { .. } => None,
        }
    }
}
