//! Bar-chart rendering with Plotters' bitmap backend.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::{MonthlyAnalysis, month_label};
use crate::error::ReportError;

/// Output resolution of the daily revenue chart (pixels).
pub const DAILY_CHART_SIZE: (u32, u32) = (1200, 600);
/// Output resolution of the top-supporters chart (pixels).
pub const TOP_CHART_SIZE: (u32, u32) = (1200, 800);

const BAR_HALF_WIDTH: f64 = 0.35;

/// Paths of the two rendered chart PNGs.
///
/// Scoped resource: the files are removed when the guard drops, on every exit
/// path, so repeated runs never leak disk artifacts.
#[derive(Debug)]
pub struct ChartImages {
    pub daily_revenue: PathBuf,
    pub top_supporters: PathBuf,
}

impl Drop for ChartImages {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.daily_revenue);
        let _ = fs::remove_file(&self.top_supporters);
    }
}

/// Render both charts for the analysis into `dir` and return the guard that
/// owns the resulting files.
///
/// An analysis with no daily entries cannot draw a meaningful axis and is a
/// render error; no placeholder chart is produced.
pub fn render_charts(
    analysis: &MonthlyAnalysis,
    year: i32,
    month: u32,
    dir: &Path,
) -> Result<ChartImages, ReportError> {
    if analysis.daily_revenue.is_empty() {
        return Err(ReportError::render(
            "no daily revenue data to plot for an empty month",
        ));
    }
    if analysis.top_supporters.is_empty() {
        return Err(ReportError::render("no supporter totals to plot"));
    }

    fs::create_dir_all(dir).map_err(|e| {
        ReportError::render(format!(
            "failed to create chart directory '{}': {e}",
            dir.display()
        ))
    })?;

    let images = ChartImages {
        daily_revenue: dir.join(format!("daily_revenue_{year}_{month:02}.png")),
        top_supporters: dir.join(format!("top_supporters_{year}_{month:02}.png")),
    };
    let label = month_label(year, month);

    draw_daily_chart(&images.daily_revenue, analysis, &label)?;
    draw_top_chart(&images.top_supporters, analysis, &label)?;

    Ok(images)
}

/// Vertical bars, x = day of month, y = revenue. Zero-revenue days render at
/// zero height rather than being omitted.
fn draw_daily_chart(
    path: &Path,
    analysis: &MonthlyAnalysis,
    label: &str,
) -> Result<(), ReportError> {
    let ctx = |e: String| ReportError::render(format!("daily revenue chart: {e}"));

    let bars: Vec<(u32, f64)> = analysis
        .daily_revenue
        .iter()
        .map(|(&day, &revenue)| (day, decimal_to_f64(revenue)))
        .collect();
    let days = bars.len() as f64;
    let y_max = axis_ceiling(bars.iter().map(|&(_, v)| v));

    let root = BitMapBackend::new(path, DAILY_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ctx(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("Daily Revenue - {label}"), ("sans-serif", 32))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0.5..days + 0.5, 0.0..y_max)
        .map_err(|e| ctx(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Day of Month")
        .y_desc("Revenue ($)")
        .x_labels(bars.len())
        .x_label_formatter(&|v| format!("{}", v.round() as u32))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|e| ctx(e.to_string()))?;

    chart
        .draw_series(bars.iter().map(|&(day, revenue)| {
            let x = day as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, revenue)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(|e| ctx(e.to_string()))?;

    root.present().map_err(|e| ctx(e.to_string()))
}

/// Horizontal bars, one per top supporter, highest total at the top. Names
/// and amounts are drawn next to the bars instead of as axis ticks.
fn draw_top_chart(path: &Path, analysis: &MonthlyAnalysis, label: &str) -> Result<(), ReportError> {
    let ctx = |e: String| ReportError::render(format!("top supporters chart: {e}"));

    let tops = &analysis.top_supporters;
    let n = tops.len();
    let x_max = axis_ceiling(tops.iter().map(|t| decimal_to_f64(t.total)));

    let root = BitMapBackend::new(path, TOP_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| ctx(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("Top 10 Supporters - {label}"), ("sans-serif", 32))
        .set_label_area_size(LabelAreaPosition::Left, 40)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0.0..x_max, -0.5..n as f64 - 0.5)
        .map_err(|e| ctx(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Total Donated ($)")
        .x_label_formatter(&|v| format!("{v:.0}"))
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|e| ctx(e.to_string()))?;

    let name_style = ("sans-serif", 20)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    chart
        .draw_series(tops.iter().enumerate().map(|(rank, t)| {
            let y = bar_center(rank, n);
            let total = decimal_to_f64(t.total);
            Rectangle::new(
                [
                    (0.0, y - BAR_HALF_WIDTH),
                    (total, y + BAR_HALF_WIDTH),
                ],
                GREEN.mix(0.6).filled(),
            )
        }))
        .map_err(|e| ctx(e.to_string()))?;

    chart
        .draw_series(tops.iter().enumerate().map(|(rank, t)| {
            let y = bar_center(rank, n);
            Text::new(t.name.clone(), (x_max * 0.01, y), name_style.clone())
        }))
        .map_err(|e| ctx(e.to_string()))?;

    chart
        .draw_series(tops.iter().enumerate().map(|(rank, t)| {
            let y = bar_center(rank, n);
            let total = decimal_to_f64(t.total);
            Text::new(
                format!("${total:.2}"),
                (total + x_max * 0.01, y),
                name_style.clone(),
            )
        }))
        .map_err(|e| ctx(e.to_string()))?;

    root.present().map_err(|e| ctx(e.to_string()))
}

/// Plot-space center of the bar for `rank` (0 = highest total). The y axis
/// grows upward, so rank 0 maps to the top of the chart.
fn bar_center(rank: usize, n: usize) -> f64 {
    (n - 1 - rank) as f64
}

/// Upper axis bound with headroom for value labels; never collapses to zero.
fn axis_ceiling(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max <= 0.0 { 1.0 } else { max * 1.15 }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::domain::DonationRecord;
    use chrono::NaiveDate;

    fn sample_analysis() -> MonthlyAnalysis {
        let records: Vec<DonationRecord> = (0..6)
            .map(|i| DonationRecord {
                supporter_id: format!("s{i}"),
                supporter_name: format!("Supporter {i}"),
                amount: format!("{}.50", 5 + i).parse().unwrap(),
                timestamp: NaiveDate::from_ymd_opt(2023, 3, 1 + i * 4)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
            })
            .collect();
        analyze(&records, 2023, 3)
    }

    #[test]
    fn empty_analysis_is_a_render_error() {
        let dir = std::env::temp_dir().join("donation-report-test-empty");
        let err = render_charts(&MonthlyAnalysis::empty(), 2023, 3, &dir).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn axis_ceiling_adds_headroom_and_handles_zero() {
        assert_eq!(axis_ceiling([0.0, 0.0].into_iter()), 1.0);
        assert_eq!(axis_ceiling(std::iter::empty()), 1.0);
        let top = axis_ceiling([3.0, 10.0, 7.0].into_iter());
        assert!(top > 10.0 && top < 12.0);
    }

    #[test]
    fn bar_center_puts_rank_zero_on_top() {
        assert_eq!(bar_center(0, 5), 4.0);
        assert_eq!(bar_center(4, 5), 0.0);
    }

    #[test]
    fn renders_png_files_and_guard_removes_them() {
        let dir = std::env::temp_dir().join("donation-report-test-render");
        let analysis = sample_analysis();

        let (daily, tops) = match render_charts(&analysis, 2023, 3, &dir) {
            Ok(images) => {
                let daily = images.daily_revenue.clone();
                let tops = images.top_supporters.clone();
                for path in [&daily, &tops] {
                    let bytes = std::fs::read(path).unwrap();
                    assert!(bytes.len() > 8);
                    // PNG signature.
                    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
                }
                (daily, tops)
            }
            Err(err) => {
                // Headless environments without a usable sans-serif font
                // cannot rasterize text; nothing else should fail here.
                eprintln!("skipping chart render assertions: {err}");
                return;
            }
        };

        // Guard dropped above: both files must be gone.
        assert!(!daily.exists());
        assert!(!tops.exists());
    }
}
