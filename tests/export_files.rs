// tests/export_files.rs
use std::fs;
use std::path::PathBuf;

use bg_plot::chart::{ChartImage, write_pdf, write_png};
use bg_plot::config::options::ExportOptions;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("bg_export_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    p
}

fn striped(width: u32, height: u32) -> ChartImage {
    let mut chart = ChartImage::blank(width, height);
    for (i, px) in chart.rgb.chunks_mut(3).enumerate() {
        if (i as u32 / width) % 2 == 0 {
            px.copy_from_slice(&[0, 0, 255]);
        }
    }
    chart
}

#[test]
fn png_and_pdf_land_in_created_out_dir() {
    let dir = tmp_dir("both");
    let export = ExportOptions { out_dir: dir.join("nested"), file_stem: "jan".into(), width: 40, height: 30 };
    let chart = striped(export.width, export.height);

    write_png(&chart, &export.png_path()).unwrap();
    write_pdf(&chart, &export.pdf_path()).unwrap();

    let png = fs::read(dir.join("nested").join("jan.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let pdf = fs::read(dir.join("nested").join("jan.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/MediaBox"));
    assert!(text.contains("/Count 1"));
    assert!(text.trim_end().ends_with("%%EOF"));
}

#[test]
fn png_round_trips_dimensions() {
    let dir = tmp_dir("dims");
    let path = dir.join("c.png");
    write_png(&striped(17, 9), &path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (17, 9));
}

#[test]
fn mismatched_buffer_writes_no_pdf() {
    let dir = tmp_dir("bad");
    let path = dir.join("c.pdf");
    let bad = ChartImage { width: 10, height: 10, rgb: vec![0; 12] };
    assert!(write_pdf(&bad, &path).is_err());
    assert!(!path.exists());
}
