use crate::models::scene::{
    Chart, ChartScene, PathCommand, Point, Shape, ShapeRole, TextAnchor,
};
use crate::models::series::{CumulativePoint, MonthBucket};

/// XP per level for the progress ring — an intentionally simplified
/// linear leveling curve, not an authoritative platform value.
pub const LEVEL_SPAN: i64 = 10_000;

/// Fraction of a bar slot left as gutter on each side.
const BAR_GUTTER: f64 = 0.1;

/// Donut hole radius as a fraction of the outer radius.
const HOLE_RATIO: f64 = 0.6;

/// Canvas margins for axis-based charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 30.0,
            bottom: 50.0,
            left: 60.0,
        }
    }
}

/// Layout constants for the XP-per-month bar/line composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    /// Number of y-axis tick intervals
    pub y_ticks: usize,
}

impl Default for BarChartLayout {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 300.0,
            margins: Margins::default(),
            y_ticks: 5,
        }
    }
}

/// Layout constants for the cumulative-XP line chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// At most this many data-point markers are emitted
    pub max_markers: usize,
}

impl Default for LineChartLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margins: Margins::default(),
            x_ticks: 5,
            y_ticks: 5,
            max_markers: 20,
        }
    }
}

/// Layout constants for two-value donut charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutLayout {
    pub width: f64,
    pub height: f64,
}

impl DonutLayout {
    /// Outer sector radius: a third of the smaller canvas dimension.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 3.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for DonutLayout {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 300.0,
        }
    }
}

/// Layout constants for the level progress ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub size: f64,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            size: 200.0,
            radius: 80.0,
            stroke_width: 10.0,
        }
    }
}

/// Layout constants for the radar/spider chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    pub size: f64,
    /// Number of concentric level rings
    pub levels: usize,
    /// Distance of axis labels beyond the outer ring
    pub label_offset: f64,
}

impl RadarLayout {
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size * 0.4
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            size: 500.0,
            levels: 5,
            label_offset: 24.0,
        }
    }
}

/// One axis of a radar chart: a label and its raw score.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub label: String,
    pub value: f64,
}

impl RadarAxis {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

// ── Angle helpers ───────────────────────────────────────────────────
// Degrees only at the API boundary; everything internal is radians.

/// Convert a chart angle (degrees from 12 o'clock, clockwise) to a
/// canvas point at the given radius from `center`.
#[must_use]
pub fn polar_point(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point::new(
        center.x + radius * rad.cos(),
        center.y + radius * rad.sin(),
    )
}

/// Angle in degrees a value spans out of a total; 0 when the total is 0.
#[must_use]
pub fn sector_angle(value: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (value / total) * 360.0
    }
}

/// Typed path commands for one pie/donut sector from `start_deg` to
/// `end_deg` (degrees from 12 o'clock, clockwise).
#[must_use]
pub fn sector_commands(
    center: Point,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> Vec<PathCommand> {
    let start = polar_point(center, radius, start_deg);
    let end = polar_point(center, radius, end_deg);
    vec![
        PathCommand::MoveTo(center),
        PathCommand::LineTo(start),
        PathCommand::Arc {
            radius,
            large_arc: end_deg - start_deg > 180.0,
            clockwise: true,
            end,
        },
        PathCommand::Close,
    ]
}

/// Computes chart scenes from aggregated numeric series.
///
/// Every builder is a pure function of its series plus fixed layout
/// constants — no I/O, no mutation of external state. Empty input
/// always yields `Chart::Empty`, never a division by zero or a NaN
/// coordinate.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Bar/line composite of XP earned per month: one bar per bucket,
    /// a trend polyline through the bar top-centers, y gridlines and
    /// month labels.
    #[must_use]
    pub fn xp_month_chart(&self, series: &[MonthBucket], layout: &BarChartLayout) -> Chart {
        if series.is_empty() {
            return Chart::empty("No XP data available");
        }

        let m = layout.margins;
        let inner_w = layout.width - m.left - m.right;
        let inner_h = layout.height - m.top - m.bottom;
        let max_xp = series.iter().map(|b| b.total).max().unwrap_or(0).max(1) as f64;

        let mut scene = ChartScene::new(layout.width, layout.height);

        // Y axis with ticks, value labels and dashed gridlines
        scene.push(Shape::Line {
            from: Point::new(m.left, m.top),
            to: Point::new(m.left, m.top + inner_h),
            role: ShapeRole::Axis,
        });
        for i in 0..=layout.y_ticks {
            let fraction = i as f64 / layout.y_ticks as f64;
            let y = m.top + inner_h - fraction * inner_h;
            scene.push(Shape::Line {
                from: Point::new(m.left - 5.0, y),
                to: Point::new(m.left, y),
                role: ShapeRole::Axis,
            });
            scene.push(Shape::Text {
                position: Point::new(m.left - 10.0, y + 5.0),
                content: format!("{}", (fraction * max_xp).round() as i64),
                anchor: TextAnchor::End,
                role: ShapeRole::Value,
            });
            scene.push(Shape::Line {
                from: Point::new(m.left, y),
                to: Point::new(m.left + inner_w, y),
                role: ShapeRole::Gridline,
            });
        }

        // X axis
        scene.push(Shape::Line {
            from: Point::new(m.left, m.top + inner_h),
            to: Point::new(m.left + inner_w, m.top + inner_h),
            role: ShapeRole::Axis,
        });

        // Bars, month labels and the trend line through bar tops
        let slot = inner_w / series.len() as f64;
        let mut trend = Vec::with_capacity(series.len());

        for (i, bucket) in series.iter().enumerate() {
            let bar_h = (bucket.total as f64 / max_xp) * inner_h;
            let bar_x = m.left + i as f64 * slot + slot * BAR_GUTTER;
            let bar_w = slot * (1.0 - 2.0 * BAR_GUTTER);
            let bar_y = m.top + inner_h - bar_h;

            scene.push(Shape::Rect {
                origin: Point::new(bar_x, bar_y),
                width: bar_w,
                height: bar_h,
                role: ShapeRole::Bar,
            });
            scene.push(Shape::Text {
                position: Point::new(bar_x + bar_w / 2.0, m.top + inner_h + 20.0),
                content: bucket.label.clone(),
                anchor: TextAnchor::Middle,
                role: ShapeRole::Label,
            });

            trend.push(Point::new(bar_x + bar_w / 2.0, bar_y));
        }

        for point in &trend {
            scene.push(Shape::Circle {
                center: *point,
                radius: 4.0,
                role: ShapeRole::DataPoint,
            });
        }
        scene.push(Shape::Polyline {
            points: trend,
            role: ShapeRole::TrendLine,
        });

        Chart::Scene(scene)
    }

    /// Cumulative XP over time: a line through the running totals, the
    /// closed area under it, time-scaled x ticks and value y ticks.
    #[must_use]
    pub fn cumulative_xp_chart(
        &self,
        series: &[CumulativePoint],
        layout: &LineChartLayout,
    ) -> Chart {
        if series.is_empty() {
            return Chart::empty("No XP data available");
        }

        let m = layout.margins;
        let inner_w = layout.width - m.left - m.right;
        let inner_h = layout.height - m.top - m.bottom;

        let t_min = series.first().map(|p| p.at).unwrap_or_default();
        let t_max = series.last().map(|p| p.at).unwrap_or_default();
        let span_ms = ((t_max - t_min).num_milliseconds()).max(1) as f64;
        let y_max = series.last().map(|p| p.total).unwrap_or(0).max(1) as f64;

        let x_of = |at: chrono::DateTime<chrono::Utc>| -> f64 {
            m.left + inner_w * (at - t_min).num_milliseconds() as f64 / span_ms
        };
        let y_of = |total: f64| -> f64 { m.top + inner_h - inner_h * total / y_max };

        let mut scene = ChartScene::new(layout.width, layout.height);

        // Horizontal gridlines and y ticks (0..=y_ticks)
        for i in 0..=layout.y_ticks {
            let value = i as f64 * y_max / layout.y_ticks as f64;
            let y = y_of(value);
            scene.push(Shape::Line {
                from: Point::new(m.left, y),
                to: Point::new(m.left + inner_w, y),
                role: ShapeRole::Gridline,
            });
            scene.push(Shape::Text {
                position: Point::new(m.left - 10.0, y),
                content: format!("{}", value.round() as i64),
                anchor: TextAnchor::End,
                role: ShapeRole::Value,
            });
        }

        // Area under the curve, then the line on top
        let mut area = Vec::with_capacity(series.len() + 3);
        let mut line = Vec::with_capacity(series.len());
        for (i, point) in series.iter().enumerate() {
            let p = Point::new(x_of(point.at), y_of(point.total as f64));
            if i == 0 {
                area.push(PathCommand::MoveTo(p));
            } else {
                area.push(PathCommand::LineTo(p));
            }
            line.push(p);
        }
        area.push(PathCommand::LineTo(Point::new(x_of(t_max), y_of(0.0))));
        area.push(PathCommand::LineTo(Point::new(x_of(t_min), y_of(0.0))));
        area.push(PathCommand::Close);

        scene.push(Shape::Path {
            commands: area,
            role: ShapeRole::AreaFill,
        });
        scene.push(Shape::Polyline {
            points: line.clone(),
            role: ShapeRole::TrendLine,
        });

        // Subsampled data-point markers
        let step = (series.len() / layout.max_markers).max(1);
        for point in line.iter().step_by(step) {
            scene.push(Shape::Circle {
                center: *point,
                radius: 4.0,
                role: ShapeRole::DataPoint,
            });
        }

        // Axes
        scene.push(Shape::Line {
            from: Point::new(m.left, m.top + inner_h),
            to: Point::new(m.left + inner_w, m.top + inner_h),
            role: ShapeRole::Axis,
        });
        scene.push(Shape::Line {
            from: Point::new(m.left, m.top),
            to: Point::new(m.left, m.top + inner_h),
            role: ShapeRole::Axis,
        });

        // Evenly spread x ticks with month labels
        if layout.x_ticks > 1 {
            for i in 0..layout.x_ticks {
                let at = t_min
                    + chrono::Duration::milliseconds(
                        (i as f64 * span_ms / (layout.x_ticks - 1) as f64) as i64,
                    );
                let x = x_of(at);
                scene.push(Shape::Line {
                    from: Point::new(x, m.top + inner_h),
                    to: Point::new(x, m.top + inner_h + 6.0),
                    role: ShapeRole::Axis,
                });
                scene.push(Shape::Text {
                    position: Point::new(x, m.top + inner_h + 20.0),
                    content: at.format("%b %y").to_string(),
                    anchor: TextAnchor::Middle,
                    role: ShapeRole::Label,
                });
            }
        }

        Chart::Scene(scene)
    }

    /// Two-value donut: sectors from 12 o'clock clockwise, an inner
    /// hole, and center texts (rounded primary percentage + caption).
    ///
    /// Both values zero yields the empty state.
    #[must_use]
    pub fn donut_chart(
        &self,
        primary: f64,
        secondary: f64,
        caption: &str,
        layout: &DonutLayout,
    ) -> Chart {
        let total = primary + secondary;
        if total <= 0.0 {
            return Chart::empty("Nothing to display");
        }

        let center = layout.center();
        let radius = layout.radius();
        let split = sector_angle(primary, total);

        let mut scene = ChartScene::new(layout.width, layout.height);

        scene.push(Shape::Path {
            commands: sector_commands(center, radius, 0.0, split),
            role: ShapeRole::Sector,
        });
        scene.push(Shape::Path {
            commands: sector_commands(center, radius, split, 360.0),
            role: ShapeRole::Sector,
        });
        scene.push(Shape::Circle {
            center,
            radius: radius * HOLE_RATIO,
            role: ShapeRole::Hole,
        });

        // Percentage rounds only for display; the geometry above keeps
        // full precision.
        let pct = (primary / total * 100.0).round() as i64;
        scene.push(Shape::Text {
            position: Point::new(center.x, center.y - 10.0),
            content: format!("{pct}%"),
            anchor: TextAnchor::Middle,
            role: ShapeRole::Value,
        });
        scene.push(Shape::Text {
            position: Point::new(center.x, center.y + 20.0),
            content: caption.to_string(),
            anchor: TextAnchor::Middle,
            role: ShapeRole::Label,
        });

        Chart::Scene(scene)
    }

    /// Level progress ring: a background circle plus an arc spanning
    /// the progress fraction toward the next level, drawn from 12
    /// o'clock. Progress = (total_xp mod LEVEL_SPAN) / LEVEL_SPAN.
    #[must_use]
    pub fn level_ring(&self, total_xp: i64, layout: &RingLayout) -> Chart {
        let xp = total_xp.max(0);
        let level = xp / LEVEL_SPAN;
        let progress = ((xp % LEVEL_SPAN) as f64 / LEVEL_SPAN as f64).min(1.0);

        let center = Point::new(layout.size / 2.0, layout.size / 2.0);
        let mut scene = ChartScene::new(layout.size, layout.size);

        scene.push(Shape::Circle {
            center,
            radius: layout.radius,
            role: ShapeRole::LevelRing,
        });

        if progress > 0.0 {
            let sweep = progress * 360.0;
            let start = polar_point(center, layout.radius, 0.0);
            let end = polar_point(center, layout.radius, sweep);
            scene.push(Shape::Path {
                commands: vec![
                    PathCommand::MoveTo(start),
                    PathCommand::Arc {
                        radius: layout.radius,
                        large_arc: sweep > 180.0,
                        clockwise: true,
                        end,
                    },
                ],
                role: ShapeRole::ProgressArc,
            });
        }

        scene.push(Shape::Text {
            position: Point::new(center.x, center.y - 10.0),
            content: format!("lvl {level}"),
            anchor: TextAnchor::Middle,
            role: ShapeRole::Value,
        });
        scene.push(Shape::Text {
            position: Point::new(center.x, center.y + 20.0),
            content: format!("{}% to lvl {}", (progress * 100.0).round() as i64, level + 1),
            anchor: TextAnchor::Middle,
            role: ShapeRole::Label,
        });

        Chart::Scene(scene)
    }

    /// Radar/spider chart: N axes evenly spaced from 12 o'clock, level
    /// rings, a closed score polygon with vertex markers, and axis
    /// labels anchored by quadrant.
    #[must_use]
    pub fn radar_chart(
        &self,
        axes: &[RadarAxis],
        max_score: f64,
        layout: &RadarLayout,
    ) -> Chart {
        if axes.is_empty() || max_score <= 0.0 {
            return Chart::empty("No skills data available");
        }

        let center = layout.center();
        let radius = layout.radius();
        let step_deg = 360.0 / axes.len() as f64;

        let mut scene = ChartScene::new(layout.size, layout.size);

        // Concentric level rings with percentage labels
        for level in 1..=layout.levels {
            let ring_r = radius * level as f64 / layout.levels as f64;
            scene.push(Shape::Circle {
                center,
                radius: ring_r,
                role: ShapeRole::LevelRing,
            });
            scene.push(Shape::Text {
                position: Point::new(center.x + 10.0, center.y - ring_r),
                content: format!("{}%", (level as f64 / layout.levels as f64 * 100.0).round()),
                anchor: TextAnchor::Start,
                role: ShapeRole::Value,
            });
        }

        // Axes and their labels
        for (i, axis) in axes.iter().enumerate() {
            let angle = i as f64 * step_deg;
            let outer = polar_point(center, radius, angle);
            scene.push(Shape::Line {
                from: center,
                to: outer,
                role: ShapeRole::Axis,
            });

            let label_pos = polar_point(center, radius + layout.label_offset, angle);
            scene.push(Shape::Text {
                position: label_pos,
                content: axis.label.clone(),
                anchor: label_anchor(label_pos.x - center.x),
                role: ShapeRole::Label,
            });
        }

        // Score polygon and vertex markers
        let vertices: Vec<Point> = axes
            .iter()
            .enumerate()
            .map(|(i, axis)| {
                let fraction = (axis.value / max_score).clamp(0.0, 1.0);
                polar_point(center, radius * fraction, i as f64 * step_deg)
            })
            .collect();

        for vertex in &vertices {
            scene.push(Shape::Circle {
                center: *vertex,
                radius: 4.0,
                role: ShapeRole::DataPoint,
            });
        }
        scene.push(Shape::Polygon {
            points: vertices,
            role: ShapeRole::AreaFill,
        });

        Chart::Scene(scene)
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Text anchor for a radar label, chosen by which side of the center
/// the label falls on so long names grow away from the chart.
fn label_anchor(dx: f64) -> TextAnchor {
    if dx.abs() < 1.0 {
        TextAnchor::Middle
    } else if dx > 0.0 {
        TextAnchor::Start
    } else {
        TextAnchor::End
    }
}
