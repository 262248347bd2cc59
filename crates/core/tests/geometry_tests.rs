// ═══════════════════════════════════════════════════════════════════
// Chart Geometry Tests — bar/line composite, donut sectors, progress
// ring, radar layout, empty states
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, TimeZone, Utc};

use student_dashboard_core::models::scene::{
    Chart, PathCommand, Point, Shape, ShapeRole,
};
use student_dashboard_core::models::series::{CumulativePoint, MonthBucket};
use student_dashboard_core::services::chart_service::{
    polar_point, sector_angle, sector_commands, BarChartLayout, ChartService, DonutLayout,
    LineChartLayout, RadarAxis, RadarLayout, RingLayout, LEVEL_SPAN,
};

const TOLERANCE: f64 = 1e-9;

fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn bucket(label: &str, year: i32, month: u32, total: i64) -> MonthBucket {
    MonthBucket {
        label: label.to_string(),
        month: chrono::NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
        total,
    }
}

fn assert_finite(point: &Point) {
    assert!(point.x.is_finite() && point.y.is_finite(), "NaN coordinate: {point:?}");
}

// ── Angle math ──────────────────────────────────────────────────────

mod angles {
    use super::*;

    #[test]
    fn sector_angles_sum_to_full_circle() {
        for (a, b) in [(1.0, 3.0), (2.0, 2.0), (0.3, 99.7), (5.0, 0.0)] {
            let total = a + b;
            let sum = sector_angle(a, total) + sector_angle(b, total);
            assert!((sum - 360.0).abs() < TOLERANCE, "({a}, {b}) summed to {sum}");
        }
    }

    #[test]
    fn zero_value_spans_zero_degrees() {
        assert_eq!(sector_angle(0.0, 10.0), 0.0);
    }

    #[test]
    fn zero_total_never_divides() {
        assert_eq!(sector_angle(0.0, 0.0), 0.0);
    }

    #[test]
    fn twelve_oclock_is_straight_up() {
        let p = polar_point(Point::new(100.0, 100.0), 50.0, 0.0);
        assert!((p.x - 100.0).abs() < TOLERANCE);
        assert!((p.y - 50.0).abs() < TOLERANCE);
    }

    #[test]
    fn ninety_degrees_is_to_the_right() {
        let p = polar_point(Point::new(100.0, 100.0), 50.0, 90.0);
        assert!((p.x - 150.0).abs() < TOLERANCE);
        assert!((p.y - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn large_arc_flag_set_past_half_circle() {
        let center = Point::new(0.0, 0.0);
        let minor = sector_commands(center, 10.0, 0.0, 120.0);
        let major = sector_commands(center, 10.0, 0.0, 240.0);

        let flag_of = |commands: &[PathCommand]| {
            commands.iter().find_map(|c| match c {
                PathCommand::Arc { large_arc, .. } => Some(*large_arc),
                _ => None,
            })
        };
        assert_eq!(flag_of(&minor), Some(false));
        assert_eq!(flag_of(&major), Some(true));
    }
}

// ── Bar/line composite ──────────────────────────────────────────────

mod bar_chart {
    use super::*;

    #[test]
    fn one_bar_per_bucket() {
        let charts = ChartService::new();
        let series = vec![
            bucket("Jan 24", 2024, 1, 150),
            bucket("Feb 24", 2024, 2, 200),
            bucket("Mar 24", 2024, 3, 80),
        ];

        let chart = charts.xp_month_chart(&series, &BarChartLayout::default());
        let scene = chart.scene().expect("scene");

        assert_eq!(scene.shapes_with_role(ShapeRole::Bar).len(), 3);
    }

    #[test]
    fn tallest_bar_fills_the_inner_height() {
        let charts = ChartService::new();
        let layout = BarChartLayout::default();
        let series = vec![bucket("Jan 24", 2024, 1, 150), bucket("Feb 24", 2024, 2, 200)];

        let chart = charts.xp_month_chart(&series, &layout);
        let scene = chart.scene().expect("scene");

        let inner_h = layout.height - layout.margins.top - layout.margins.bottom;
        let max_bar_height = scene
            .shapes_with_role(ShapeRole::Bar)
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .fold(0.0_f64, f64::max);
        assert!((max_bar_height - inner_h).abs() < TOLERANCE);
    }

    #[test]
    fn bar_heights_are_proportional() {
        let charts = ChartService::new();
        let series = vec![bucket("Jan 24", 2024, 1, 100), bucket("Feb 24", 2024, 2, 200)];

        let chart = charts.xp_month_chart(&series, &BarChartLayout::default());
        let scene = chart.scene().expect("scene");

        let heights: Vec<f64> = scene
            .shapes_with_role(ShapeRole::Bar)
            .iter()
            .filter_map(|s| match s {
                Shape::Rect { height, .. } => Some(*height),
                _ => None,
            })
            .collect();
        assert!((heights[1] / heights[0] - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn bars_leave_a_ten_percent_gutter() {
        let charts = ChartService::new();
        let layout = BarChartLayout::default();
        let series = vec![bucket("Jan 24", 2024, 1, 100), bucket("Feb 24", 2024, 2, 200)];

        let chart = charts.xp_month_chart(&series, &layout);
        let scene = chart.scene().expect("scene");

        let slot = (layout.width - layout.margins.left - layout.margins.right) / 2.0;
        for shape in scene.shapes_with_role(ShapeRole::Bar) {
            if let Shape::Rect { width, .. } = shape {
                assert!((width - slot * 0.8).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn trend_line_connects_bar_tops() {
        let charts = ChartService::new();
        let series = vec![
            bucket("Jan 24", 2024, 1, 150),
            bucket("Feb 24", 2024, 2, 200),
            bucket("Mar 24", 2024, 3, 80),
        ];

        let chart = charts.xp_month_chart(&series, &BarChartLayout::default());
        let scene = chart.scene().expect("scene");

        let trend = scene.shapes_with_role(ShapeRole::TrendLine);
        assert_eq!(trend.len(), 1);
        if let Shape::Polyline { points, .. } = trend[0] {
            assert_eq!(points.len(), 3);
            points.iter().for_each(assert_finite);
        } else {
            panic!("trend line is not a polyline");
        }
    }

    #[test]
    fn empty_series_yields_empty_state() {
        let charts = ChartService::new();
        let chart = charts.xp_month_chart(&[], &BarChartLayout::default());
        assert!(chart.is_empty_state());
    }

    #[test]
    fn all_zero_values_do_not_divide_by_zero() {
        let charts = ChartService::new();
        let series = vec![bucket("Jan 24", 2024, 1, 0), bucket("Feb 24", 2024, 2, 0)];

        let chart = charts.xp_month_chart(&series, &BarChartLayout::default());
        let scene = chart.scene().expect("scene");

        for shape in scene.shapes_with_role(ShapeRole::Bar) {
            if let Shape::Rect { origin, height, .. } = shape {
                assert_finite(origin);
                assert!(height.is_finite());
            }
        }
    }
}

// ── Cumulative line ─────────────────────────────────────────────────

mod cumulative_chart {
    use super::*;

    fn series() -> Vec<CumulativePoint> {
        vec![
            CumulativePoint { at: ts(2024, 1, 5), total: 100 },
            CumulativePoint { at: ts(2024, 1, 20), total: 150 },
            CumulativePoint { at: ts(2024, 2, 1), total: 350 },
        ]
    }

    #[test]
    fn line_spans_the_inner_width() {
        let charts = ChartService::new();
        let layout = LineChartLayout::default();

        let chart = charts.cumulative_xp_chart(&series(), &layout);
        let scene = chart.scene().expect("scene");

        let trend = scene.shapes_with_role(ShapeRole::TrendLine);
        if let Shape::Polyline { points, .. } = trend[0] {
            assert!((points.first().unwrap().x - layout.margins.left).abs() < TOLERANCE);
            let right = layout.width - layout.margins.right;
            assert!((points.last().unwrap().x - right).abs() < TOLERANCE);
        } else {
            panic!("trend line is not a polyline");
        }
    }

    #[test]
    fn area_path_closes_to_the_baseline() {
        let charts = ChartService::new();
        let chart = charts.cumulative_xp_chart(&series(), &LineChartLayout::default());
        let scene = chart.scene().expect("scene");

        let area = scene.shapes_with_role(ShapeRole::AreaFill);
        assert_eq!(area.len(), 1);
        if let Shape::Path { commands, .. } = area[0] {
            assert!(matches!(commands.last(), Some(PathCommand::Close)));
        } else {
            panic!("area fill is not a path");
        }
    }

    #[test]
    fn single_point_produces_finite_geometry() {
        let charts = ChartService::new();
        let single = vec![CumulativePoint { at: ts(2024, 1, 5), total: 100 }];

        let chart = charts.cumulative_xp_chart(&single, &LineChartLayout::default());
        let scene = chart.scene().expect("scene");

        for shape in &scene.shapes {
            if let Shape::Polyline { points, .. } = shape {
                points.iter().for_each(assert_finite);
            }
        }
    }

    #[test]
    fn empty_series_yields_empty_state() {
        let charts = ChartService::new();
        assert!(charts
            .cumulative_xp_chart(&[], &LineChartLayout::default())
            .is_empty_state());
    }
}

// ── Donut ───────────────────────────────────────────────────────────

mod donut {
    use super::*;

    #[test]
    fn two_sectors_and_a_hole() {
        let charts = ChartService::new();
        let layout = DonutLayout::default();

        let chart = charts.donut_chart(3.0, 1.0, "Success rate", &layout);
        let scene = chart.scene().expect("scene");

        assert_eq!(scene.shapes_with_role(ShapeRole::Sector).len(), 2);
        let holes = scene.shapes_with_role(ShapeRole::Hole);
        assert_eq!(holes.len(), 1);
        if let Shape::Circle { radius, .. } = holes[0] {
            assert!((radius - layout.radius() * 0.6).abs() < TOLERANCE);
        }
    }

    #[test]
    fn first_sector_arc_ends_at_its_share_of_the_circle() {
        let charts = ChartService::new();
        let layout = DonutLayout::default();

        // 1 of 4 → 90 degrees → arc ends due right of center
        let chart = charts.donut_chart(1.0, 3.0, "Success rate", &layout);
        let scene = chart.scene().expect("scene");

        let sectors = scene.shapes_with_role(ShapeRole::Sector);
        if let Shape::Path { commands, .. } = sectors[0] {
            let end = commands.iter().find_map(|c| match c {
                PathCommand::Arc { end, .. } => Some(*end),
                _ => None,
            });
            let expected = polar_point(layout.center(), layout.radius(), 90.0);
            let end = end.expect("arc");
            assert!((end.x - expected.x).abs() < TOLERANCE);
            assert!((end.y - expected.y).abs() < TOLERANCE);
        } else {
            panic!("sector is not a path");
        }
    }

    #[test]
    fn percentage_label_rounds_for_display() {
        let charts = ChartService::new();
        let chart = charts.donut_chart(2.0, 1.0, "Audit ratio", &DonutLayout::default());
        let scene = chart.scene().expect("scene");

        let values = scene.shapes_with_role(ShapeRole::Value);
        if let Shape::Text { content, .. } = values[0] {
            assert_eq!(content, "67%");
        } else {
            panic!("value is not text");
        }
    }

    #[test]
    fn both_zero_yields_empty_state() {
        let charts = ChartService::new();
        assert!(charts
            .donut_chart(0.0, 0.0, "Success rate", &DonutLayout::default())
            .is_empty_state());
    }
}

// ── Progress ring ───────────────────────────────────────────────────

mod ring {
    use super::*;

    #[test]
    fn quarter_progress_arc_ends_due_right() {
        let charts = ChartService::new();
        let layout = RingLayout::default();

        let chart = charts.level_ring(LEVEL_SPAN / 4, &layout);
        let scene = chart.scene().expect("scene");

        let arcs = scene.shapes_with_role(ShapeRole::ProgressArc);
        assert_eq!(arcs.len(), 1);
        if let Shape::Path { commands, .. } = arcs[0] {
            let end = commands.iter().find_map(|c| match c {
                PathCommand::Arc { end, large_arc, .. } => Some((*end, *large_arc)),
                _ => None,
            });
            let (end, large_arc) = end.expect("arc");
            let center = Point::new(layout.size / 2.0, layout.size / 2.0);
            assert!(!large_arc);
            assert!((end.x - (center.x + layout.radius)).abs() < TOLERANCE);
            assert!((end.y - center.y).abs() < TOLERANCE);
        }
    }

    #[test]
    fn level_and_progress_use_one_curve() {
        let charts = ChartService::new();
        let chart = charts.level_ring(2 * LEVEL_SPAN + LEVEL_SPAN / 2, &RingLayout::default());
        let scene = chart.scene().expect("scene");

        let texts: Vec<&str> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"lvl 2"));
        assert!(texts.contains(&"50% to lvl 3"));
    }

    #[test]
    fn zero_xp_has_no_progress_arc() {
        let charts = ChartService::new();
        let chart = charts.level_ring(0, &RingLayout::default());
        let scene = chart.scene().expect("scene");

        assert!(scene.shapes_with_role(ShapeRole::ProgressArc).is_empty());
        assert_eq!(scene.shapes_with_role(ShapeRole::LevelRing).len(), 1);
    }

    #[test]
    fn negative_xp_is_clamped() {
        let charts = ChartService::new();
        let chart = charts.level_ring(-500, &RingLayout::default());
        let scene = chart.scene().expect("scene");

        for shape in &scene.shapes {
            if let Shape::Path { commands, .. } = shape {
                for command in commands {
                    if let PathCommand::Arc { end, .. } = command {
                        assert_finite(end);
                    }
                }
            }
        }
    }
}

// ── Radar ───────────────────────────────────────────────────────────

mod radar {
    use super::*;

    fn axes(values: &[f64]) -> Vec<RadarAxis> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RadarAxis::new(format!("AXIS-{i}"), *v))
            .collect()
    }

    #[test]
    fn all_max_scores_put_vertices_on_the_outer_ring() {
        let charts = ChartService::new();
        let layout = RadarLayout::default();

        let chart = charts.radar_chart(&axes(&[1.0, 1.0, 1.0, 1.0, 1.0]), 1.0, &layout);
        let scene = chart.scene().expect("scene");

        let polygons = scene.shapes_with_role(ShapeRole::AreaFill);
        if let Shape::Polygon { points, .. } = polygons[0] {
            let center = layout.center();
            for point in points {
                assert!((point.distance_to(&center) - layout.radius()).abs() < TOLERANCE);
            }
        } else {
            panic!("radar area is not a polygon");
        }
    }

    #[test]
    fn axes_are_evenly_spaced() {
        let charts = ChartService::new();
        let layout = RadarLayout::default();

        let chart = charts.radar_chart(&axes(&[0.5, 0.5, 0.5, 0.5]), 1.0, &layout);
        let scene = chart.scene().expect("scene");

        let lines = scene.shapes_with_role(ShapeRole::Axis);
        assert_eq!(lines.len(), 4);
        // Four axes at 90-degree spacing: first points up, second right
        if let Shape::Line { to, .. } = lines[0] {
            assert!((to.x - layout.center().x).abs() < TOLERANCE);
            assert!(to.y < layout.center().y);
        }
        if let Shape::Line { to, .. } = lines[1] {
            assert!(to.x > layout.center().x);
            assert!((to.y - layout.center().y).abs() < TOLERANCE);
        }
    }

    #[test]
    fn scores_above_max_are_clamped_to_the_ring() {
        let charts = ChartService::new();
        let layout = RadarLayout::default();

        let chart = charts.radar_chart(&axes(&[2.0, 0.5, 0.5]), 1.0, &layout);
        let scene = chart.scene().expect("scene");

        if let Shape::Polygon { points, .. } = scene.shapes_with_role(ShapeRole::AreaFill)[0] {
            let max_distance = points
                .iter()
                .map(|p| p.distance_to(&layout.center()))
                .fold(0.0_f64, f64::max);
            assert!(max_distance <= layout.radius() + TOLERANCE);
        }
    }

    #[test]
    fn level_ring_count_matches_layout() {
        let charts = ChartService::new();
        let layout = RadarLayout::default();

        let chart = charts.radar_chart(&axes(&[0.4, 0.6, 0.8]), 1.0, &layout);
        let scene = chart.scene().expect("scene");

        assert_eq!(scene.shapes_with_role(ShapeRole::LevelRing).len(), layout.levels);
    }

    #[test]
    fn empty_axes_yield_empty_state() {
        let charts = ChartService::new();
        assert!(charts
            .radar_chart(&[], 1.0, &RadarLayout::default())
            .is_empty_state());
    }

    #[test]
    fn zero_max_score_yields_empty_state_not_nan() {
        let charts = ChartService::new();
        assert!(charts
            .radar_chart(&axes(&[0.0, 0.0]), 0.0, &RadarLayout::default())
            .is_empty_state());
    }
}

// ── Empty states across all builders ────────────────────────────────

#[test]
fn every_builder_handles_empty_input() {
    let charts = ChartService::new();

    assert!(matches!(
        charts.xp_month_chart(&[], &BarChartLayout::default()),
        Chart::Empty { .. }
    ));
    assert!(matches!(
        charts.cumulative_xp_chart(&[], &LineChartLayout::default()),
        Chart::Empty { .. }
    ));
    assert!(matches!(
        charts.donut_chart(0.0, 0.0, "", &DonutLayout::default()),
        Chart::Empty { .. }
    ));
    assert!(matches!(
        charts.radar_chart(&[], 1.0, &RadarLayout::default()),
        Chart::Empty { .. }
    ));
}
