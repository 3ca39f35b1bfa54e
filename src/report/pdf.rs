//! PDF report assembly with `genpdf`.
//!
//! Layout, in document order: centered title naming the period, the key
//! statistics block, the daily revenue chart, a page break, the top-10 table,
//! and the top-supporters chart. The file is written atomically: rendered to
//! a sibling temporary file, then renamed into place, so a failed run never
//! leaves a partial report behind.

use std::fs;
use std::path::{Path, PathBuf};

use genpdf::elements::{Break, FrameCellDecorator, Image, PageBreak, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator};

use crate::domain::{MonthlyAnalysis, month_label};
use crate::error::ReportError;
use crate::plot::ChartImages;
use crate::report::fonts;
use crate::report::format::{format_money, summary_lines};

/// Chart PNGs are 1200px wide; at 180 dpi they fit the A4 content width.
const CHART_DPI: f64 = 180.0;

/// Default output path in the working directory, `report-YYYY-MM.pdf`.
pub fn default_report_path(year: i32, month: u32) -> PathBuf {
    PathBuf::from(format!("report-{year}-{month:02}.pdf"))
}

/// Assemble the PDF and write it to `out_path`.
///
/// Both chart images are decoded up front; a missing or corrupt image is a
/// render error before any output file is touched.
pub fn write_report(
    analysis: &MonthlyAnalysis,
    charts: &ChartImages,
    year: i32,
    month: u32,
    out_path: &Path,
) -> Result<PathBuf, ReportError> {
    let daily_chart = load_chart(&charts.daily_revenue, "daily revenue chart")?;
    let top_chart = load_chart(&charts.top_supporters, "top supporters chart")?;

    let doc = build_document(analysis, daily_chart, top_chart, year, month)?;

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| ReportError::render(format!("failed to render PDF: {e}")))?;

    write_atomically(out_path, &bytes)?;
    Ok(out_path.to_path_buf())
}

fn load_chart(path: &Path, what: &str) -> Result<Image, ReportError> {
    let decoded = image::open(path).map_err(|e| {
        ReportError::render(format!("{what} '{}' is unreadable: {e}", path.display()))
    })?;
    let img = Image::from_dynamic_image(decoded)
        .map_err(|e| ReportError::render(format!("{what} could not be embedded: {e}")))?;
    Ok(img.with_alignment(Alignment::Center).with_dpi(CHART_DPI))
}

fn build_document(
    analysis: &MonthlyAnalysis,
    daily_chart: Image,
    top_chart: Image,
    year: i32,
    month: u32,
) -> Result<Document, ReportError> {
    let family = fonts::load_font_family()?;
    let label = month_label(year, month);

    let mut doc = Document::new(family);
    doc.set_title(format!("Monthly Donation Report - {label}"));
    doc.set_paper_size(genpdf::PaperSize::A4);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let title_style = Style::new().bold().with_font_size(16);
    let heading_style = Style::new().bold().with_font_size(12);
    let body_style = Style::new().with_font_size(10);

    doc.push(
        Paragraph::new(format!("Monthly Donation Report - {label}"))
            .aligned(Alignment::Center)
            .styled(title_style),
    );
    doc.push(Break::new(1.5));

    doc.push(Paragraph::new("Key Statistics").styled(heading_style));
    doc.push(Break::new(0.5));
    for line in summary_lines(analysis) {
        doc.push(Paragraph::new(line).styled(body_style));
    }
    doc.push(Break::new(1.5));

    doc.push(Paragraph::new("Daily Revenue").styled(heading_style));
    doc.push(Break::new(0.5));
    doc.push(daily_chart);

    doc.push(PageBreak::new());

    doc.push(Paragraph::new("Top 10 Supporters").styled(heading_style));
    doc.push(Break::new(0.5));
    doc.push(top_supporters_table(analysis)?);
    doc.push(Break::new(1.0));

    doc.push(Paragraph::new("Top Supporters Visualization").styled(heading_style));
    doc.push(Break::new(0.5));
    doc.push(top_chart);

    Ok(doc)
}

fn top_supporters_table(analysis: &MonthlyAnalysis) -> Result<TableLayout, ReportError> {
    let header_style = Style::new().bold().with_font_size(10);
    let body_style = Style::new().with_font_size(10);

    let mut table = TableLayout::new(vec![3, 2, 2]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let cell = |text: String, style: Style| Paragraph::new(text).styled(style).padded(1);

    table
        .row()
        .element(cell("Supporter Name".to_string(), header_style))
        .element(cell("Total Donated".to_string(), header_style))
        .element(cell("Donation Count".to_string(), header_style))
        .push()
        .map_err(|e| ReportError::render(format!("failed to lay out table header: {e}")))?;

    for supporter in &analysis.top_supporters {
        table
            .row()
            .element(cell(supporter.name.clone(), body_style))
            .element(cell(format_money(supporter.total), body_style))
            .element(cell(supporter.donations.to_string(), body_style))
            .push()
            .map_err(|e| ReportError::render(format!("failed to lay out table row: {e}")))?;
    }

    Ok(table)
}

/// Write the rendered bytes next to the destination and rename into place.
/// The rename is the only step that makes the report visible.
fn write_atomically(out_path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let tmp_path = out_path.with_extension("pdf.tmp");

    fs::write(&tmp_path, bytes).map_err(|e| {
        ReportError::io(format!(
            "failed to write report to '{}': {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = fs::rename(&tmp_path, out_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ReportError::io(format!(
            "failed to move report into place at '{}': {e}",
            out_path.display()
        )));
    }
    Ok(())
}
