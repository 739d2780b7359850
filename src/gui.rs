// src/gui.rs
use std::error::Error;

use eframe::egui;
use egui::load::SizedTexture;
use egui_extras::{Column, TableBuilder};

use crate::{
    readings::{Readings, TrendLine},
    runner::Report,
};

const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Open the viewer on a finished report; returns when the window closes.
pub fn show(report: Report, title: &str) -> Result<(), Box<dyn Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([report.chart.width as f32 + 20.0, report.chart.height as f32 + 60.0]),
        ..Default::default()
    };
    logf!("Opening viewer");
    eframe::run_native(title, options, Box::new(move |cc| Ok(Box::new(Viewer::new(cc, report)))))?;
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab { Chart, Glucose, Weight }

struct Viewer {
    tab: Tab,
    texture: egui::TextureHandle,
    glucose: Vec<[String; 3]>,
    weight: Vec<[String; 2]>,
    trend_note: String,
}

impl Viewer {
    fn new(cc: &eframe::CreationContext<'_>, report: Report) -> Self {
        let size = [report.chart.width as usize, report.chart.height as usize];
        let image = egui::ColorImage::from_rgb(size, &report.chart.rgb);
        let texture = cc.egui_ctx.load_texture("chart", image, egui::TextureOptions::LINEAR);

        Self {
            tab: Tab::Chart,
            texture,
            glucose: glucose_rows(&report.readings),
            weight: weight_rows(&report.readings),
            trend_note: trend_note(&report.trend),
        }
    }

    fn table<const N: usize>(ui: &mut egui::Ui, headers: [&str; N], rows: &[[String; N]]) {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true).at_least(80.0), N)
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui| { ui.strong(h); });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    if let Some(data) = rows.get(row.index()) {
                        for cell in data {
                            row.col(|ui| { ui.label(cell); });
                        }
                    }
                });
            });
    }
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Chart, "Chart");
                ui.selectable_value(&mut self.tab, Tab::Glucose, format!("Glucose ({})", self.glucose.len()));
                ui.selectable_value(&mut self.tab, Tab::Weight, format!("Weight ({})", self.weight.len()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Chart => {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(SizedTexture::from_handle(&self.texture)).shrink_to_fit());
                });
            }
            Tab::Glucose => Self::table(ui, ["Date/Time", "Concentration", "Event"], &self.glucose),
            Tab::Weight => {
                ui.label(&self.trend_note);
                ui.separator();
                Self::table(ui, ["Date/Time", "Weight"], &self.weight);
            }
        });
    }
}

fn glucose_rows(readings: &Readings) -> Vec<[String; 3]> {
    readings
        .glucose
        .iter()
        .map(|g| {
            [
                g.at.format(TABLE_TIME_FORMAT).to_string(),
                format!("{} mg/dL", g.concentration),
                g.event.clone(),
            ]
        })
        .collect()
}

fn weight_rows(readings: &Readings) -> Vec<[String; 2]> {
    readings
        .weight
        .iter()
        .map(|w| [w.at.format(TABLE_TIME_FORMAT).to_string(), format!("{} lbs", w.weight)])
        .collect()
}

/// Trend slope in lbs/day for the Weight tab header.
fn trend_note(trend: &TrendLine) -> String {
    format!("Trend: {:+.2} lbs/day", trend.fit.slope * 86_400.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::{GlucoseReading, WeightReading};
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 1, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn table_rows_carry_units_and_labels() {
        let readings = Readings {
            glucose: vec![GlucoseReading { at: at(2, 7), concentration: 101.0, event: s!("Before Meal") }],
            weight: vec![WeightReading { at: at(2, 6), weight: 150.5 }],
        };
        assert_eq!(glucose_rows(&readings)[0], [s!("2017-01-02 07:00"), s!("101 mg/dL"), s!("Before Meal")]);
        assert_eq!(weight_rows(&readings)[0], [s!("2017-01-02 06:00"), s!("150.5 lbs")]);
    }

    #[test]
    fn trend_note_in_lbs_per_day() {
        let weight = vec![
            WeightReading { at: at(1, 0), weight: 150.0 },
            WeightReading { at: at(3, 0), weight: 151.0 },
        ];
        let trend = TrendLine::from_weight(&weight).unwrap();
        assert_eq!(trend_note(&trend), "Trend: +0.50 lbs/day");
    }
}
