// SVG charts: horizontal bars, a dated line/scatter plot and a pie
use chrono::NaiveDate;
use std::f64::consts::PI;
use std::fmt::Write;

use crate::html::{escape, page};

const PALETTE: [&str; 6] = ["#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u32,
}

/// Horizontal bar chart, bars drawn top to bottom in the given order
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    const WIDTH: f64 = 1000.0;
    const LABEL_WIDTH: f64 = 560.0;
    const BAR_HEIGHT: f64 = 36.0;
    const GAP: f64 = 12.0;
    const TOP: f64 = 10.0;

    pub fn to_html(&self) -> String {
        page(&self.title, &self.to_svg())
    }

    pub fn to_svg(&self) -> String {
        if self.bars.is_empty() {
            return empty_svg("No sightings to chart");
        }

        let max = self.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1) as f64;
        let plot_width = Self::WIDTH - Self::LABEL_WIDTH - 60.0;
        let height = Self::TOP * 2.0 + self.bars.len() as f64 * (Self::BAR_HEIGHT + Self::GAP);

        let mut svg = svg_open(Self::WIDTH, height);
        for (i, bar) in self.bars.iter().enumerate() {
            let y = Self::TOP + i as f64 * (Self::BAR_HEIGHT + Self::GAP);
            let width = bar.value as f64 / max * plot_width;
            let mid = y + Self::BAR_HEIGHT / 2.0;

            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="12">{}</text>"#,
                Self::LABEL_WIDTH - 10.0,
                mid,
                escape(&bar.label)
            );
            let _ = write!(
                svg,
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                Self::LABEL_WIDTH,
                y,
                width,
                Self::BAR_HEIGHT,
                PALETTE[0]
            );
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" dominant-baseline="middle" font-size="12">{}</text>"#,
                Self::LABEL_WIDTH + width + 6.0,
                mid,
                bar.value
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Counts per day joined by a line, one marker per day
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<(NaiveDate, u32)>,
}

impl ScatterChart {
    const WIDTH: f64 = 960.0;
    const HEIGHT: f64 = 480.0;
    const LEFT: f64 = 60.0;
    const RIGHT: f64 = 30.0;
    const TOP: f64 = 20.0;
    const BOTTOM: f64 = 60.0;

    pub fn to_html(&self) -> String {
        page(&self.title, &self.to_svg())
    }

    pub fn to_svg(&self) -> String {
        if self.points.is_empty() {
            return empty_svg("No dated sightings to chart");
        }

        let mut points = self.points.clone();
        points.sort_by_key(|(date, _)| *date);

        let first = points[0].0;
        let span_days = (points[points.len() - 1].0 - first).num_days().max(1) as f64;
        let max_y = points.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);

        let plot_w = Self::WIDTH - Self::LEFT - Self::RIGHT;
        let plot_h = Self::HEIGHT - Self::TOP - Self::BOTTOM;
        let baseline = Self::TOP + plot_h;

        let x_of = |date: NaiveDate| {
            if points.len() == 1 {
                Self::LEFT + plot_w / 2.0
            } else {
                Self::LEFT + (date - first).num_days() as f64 / span_days * plot_w
            }
        };
        let y_of = |value: u32| baseline - value as f64 / max_y as f64 * plot_h;

        let mut svg = svg_open(Self::WIDTH, Self::HEIGHT);

        // Axes
        let _ = write!(
            svg,
            r##"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#888"/><line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#888"/>"##,
            l = Self::LEFT,
            t = Self::TOP,
            b = baseline,
            r = Self::LEFT + plot_w
        );

        for tick in y_ticks(max_y) {
            let y = y_of(tick);
            let _ = write!(
                svg,
                r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#eee"/><text x="{:.1}" y="{y:.1}" text-anchor="end" dominant-baseline="middle" font-size="11">{}</text>"##,
                Self::LEFT,
                Self::LEFT + plot_w,
                Self::LEFT - 8.0,
                tick,
                y = y
            );
        }

        let line: Vec<String> = points
            .iter()
            .map(|(date, value)| format!("{:.1},{:.1}", x_of(*date), y_of(*value)))
            .collect();
        let _ = write!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            line.join(" "),
            PALETTE[0]
        );

        for (date, value) in &points {
            let x = x_of(*date);
            let _ = write!(
                svg,
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"><title>{}: {}</title></circle>"#,
                x,
                y_of(*value),
                PALETTE[0],
                date.format("%Y-%m-%d"),
                value
            );
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
                x,
                baseline + 20.0,
                date.format("%b %d")
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl PieChart {
    const SIZE: f64 = 420.0;
    const RADIUS: f64 = 180.0;

    pub fn to_html(&self) -> String {
        page(&self.title, &self.to_svg())
    }

    pub fn to_svg(&self) -> String {
        let total: u32 = self.slices.iter().map(|s| s.value).sum();
        if total == 0 {
            return empty_svg("No sightings to chart");
        }

        let (cx, cy, r) = (Self::SIZE / 2.0, Self::SIZE / 2.0, Self::RADIUS);
        let legend_x = Self::SIZE + 20.0;
        let mut svg = svg_open(Self::SIZE + 320.0, Self::SIZE);

        // Start at 12 o'clock, go clockwise
        let mut angle = -PI / 2.0;
        for (i, slice) in self.slices.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let fraction = slice.value as f64 / total as f64;

            if slice.value == total {
                let _ = write!(svg, r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{color}"/>"#);
            } else if slice.value > 0 {
                let end = angle + fraction * 2.0 * PI;
                let large_arc = if end - angle > PI { 1 } else { 0 };
                let _ = write!(
                    svg,
                    r#"<path d="M {cx:.1} {cy:.1} L {:.2} {:.2} A {r:.1} {r:.1} 0 {large_arc} 1 {:.2} {:.2} Z" fill="{color}" stroke="white"/>"#,
                    cx + r * angle.cos(),
                    cy + r * angle.sin(),
                    cx + r * end.cos(),
                    cy + r * end.sin(),
                );
                angle = end;
            }

            let legend_y = 40.0 + i as f64 * 28.0;
            let _ = write!(
                svg,
                r#"<rect x="{legend_x:.1}" y="{:.1}" width="16" height="16" fill="{color}"/><text x="{:.1}" y="{:.1}" font-size="13">{} ({}, {:.1}%)</text>"#,
                legend_y - 12.0,
                legend_x + 24.0,
                legend_y,
                escape(&slice.label),
                slice.value,
                fraction * 100.0
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    )
}

fn empty_svg(message: &str) -> String {
    format!(
        r#"{}<text x="20" y="40" font-size="14">{}</text></svg>"#,
        svg_open(600.0, 80.0),
        escape(message)
    )
}

/// Whole-number gridlines from 0 up to `max`, at most about five of them
fn y_ticks(max: u32) -> Vec<u32> {
    let step = ((max as f64) / 4.0).ceil().max(1.0) as u32;
    (0..=max).step_by(step as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test]
    fn test_bar_chart_scales_to_longest_bar() {
        let chart = BarChart {
            title: "Recent Bird Sightings in Alameda County".to_string(),
            bars: vec![
                Bar { label: "Lake Merritt".to_string(), value: 4 },
                Bar { label: "Arrowhead <Marsh>".to_string(), value: 2 },
            ],
        };

        let svg = chart.to_svg();
        assert_eq!(svg.matches("<rect").count(), 2);
        // plot width is 1000 - 560 - 60 = 380
        assert!(svg.contains(r#"width="380.0""#));
        assert!(svg.contains(r#"width="190.0""#));
        assert!(svg.contains("Arrowhead &lt;Marsh&gt;"));

        let html = chart.to_html();
        assert!(html.contains("<title>Recent Bird Sightings in Alameda County</title>"));
    }

    #[test]
    fn test_empty_charts_render_a_message() {
        let bars = BarChart { title: "t".into(), bars: vec![] };
        assert!(bars.to_svg().contains("No sightings to chart"));

        let scatter = ScatterChart { title: "t".into(), points: vec![] };
        assert!(scatter.to_svg().contains("No dated sightings"));

        let pie = PieChart {
            title: "t".into(),
            slices: vec![Slice { label: "Private Property".into(), value: 0 }],
        };
        assert!(pie.to_svg().contains("No sightings to chart"));
    }

    #[test]
    fn test_scatter_has_marker_per_day() {
        let chart = ScatterChart {
            title: "t".into(),
            points: vec![(day(3), 1), (day(1), 5), (day(2), 2)],
        };

        let svg = chart.to_svg();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<polyline"));
        // sorted by date before drawing
        let first = svg.find("2024-04-01").unwrap();
        let last = svg.find("2024-04-03").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_single_day_scatter() {
        let chart = ScatterChart { title: "t".into(), points: vec![(day(1), 3)] };
        let svg = chart.to_svg();
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_pie_legend_percentages() {
        let chart = PieChart {
            title: "t".into(),
            slices: vec![
                Slice { label: "Private Property".into(), value: 1 },
                Slice { label: "Public Property".into(), value: 3 },
            ],
        };

        let svg = chart.to_svg();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Private Property (1, 25.0%)"));
        assert!(svg.contains("Public Property (3, 75.0%)"));
    }

    #[test]
    fn test_pie_single_full_slice_is_a_circle() {
        let chart = PieChart {
            title: "t".into(),
            slices: vec![
                Slice { label: "Private Property".into(), value: 0 },
                Slice { label: "Public Property".into(), value: 7 },
            ],
        };

        let svg = chart.to_svg();
        assert_eq!(svg.matches("<path").count(), 0);
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_y_ticks() {
        assert_eq!(y_ticks(1), vec![0, 1]);
        assert_eq!(y_ticks(4), vec![0, 1, 2, 3, 4]);
        assert_eq!(y_ticks(10), vec![0, 3, 6, 9]);
    }
}
