// src/runner.rs
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::{
    chart::{self, ChartImage, ChartStyle},
    config::options::{AppOptions, ExportOptions, FetchOptions, Source},
    fetch,
    file::read_source,
    gui,
    readings::{ParseError, Readings, TrendLine, parse_readings},
};

/// Optional progress sink for the frontend (CLI prints lines).
pub trait Progress {
    fn log(&mut self, _msg: &str) {}
    fn file_written(&mut self, _path: &Path) {}
}

pub struct NullProgress;
impl Progress for NullProgress {}

/// Everything `make_plot` produced, kept for the viewer.
pub struct Report {
    pub readings: Readings,
    pub trend: TrendLine,
    pub chart: ChartImage,
    pub files_written: Vec<PathBuf>,
}

pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

/// The export document text, from Drive or from the local argument.
pub fn source_text(
    source: &Source,
    fetch_opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> Result<String, Box<dyn Error>> {
    match source {
        Source::Remote => {
            progress.log("Reading data from google drive");
            Ok(fetch::fetch_latest(fetch_opts)?)
        }
        Source::Local(arg) => read_source(arg),
    }
}

/// Parse, fit, render, then write the PNG and PDF.
/// Nothing is written unless parsing and fitting succeeded.
pub fn make_plot(
    text: &str,
    export: &ExportOptions,
    style: &ChartStyle,
    progress: &mut dyn Progress,
) -> Result<Report, Box<dyn Error>> {
    let readings = parse_readings(text)?;
    let trend = TrendLine::from_weight(&readings.weight).ok_or(ParseError::NoReadings("Weight"))?;
    logd!("Weight trend: slope {} per second", trend.fit.slope);

    let chart = chart::render(&readings, &trend, style, export.width, export.height)?;

    let mut files_written = Vec::with_capacity(2);
    let png = export.png_path();
    chart::write_png(&chart, &png)?;
    progress.file_written(&png);
    files_written.push(png);

    let pdf = export.pdf_path();
    chart::write_pdf(&chart, &pdf)?;
    progress.file_written(&pdf);
    files_written.push(pdf);

    Ok(Report { readings, trend, chart, files_written })
}

/// Top-level pipeline: source text, report files, then the viewer unless disabled.
pub fn run(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunSummary, Box<dyn Error>> {
    let text = source_text(&opts.source, &opts.fetch, progress)?;
    let style = ChartStyle::default();
    let report = make_plot(&text, &opts.export, &style, progress)?;

    let files_written = report.files_written.clone();
    if opts.show {
        gui::show(report, &style.title)?;
    }
    Ok(RunSummary { files_written })
}
