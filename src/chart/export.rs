// src/chart/export.rs
//
// Chart outputs: a PNG of the raw pixels, and a one-page landscape PDF with
// the same pixels scaled to fit the page.

use std::{error::Error, path::Path};

use image::{ImageFormat, RgbImage};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};

use crate::file::ensure_parent;

use super::ChartImage;

/// US Letter, landscape, in points.
pub const PAGE_WIDTH_PT: f32 = 792.0;
pub const PAGE_HEIGHT_PT: f32 = 612.0;

pub fn write_png(chart: &ChartImage, path: &Path) -> Result<(), Box<dyn Error>> {
    ensure_parent(path)?;
    let img = RgbImage::from_raw(chart.width, chart.height, chart.rgb.clone())
        .ok_or("chart buffer does not match its dimensions")?;
    img.save_with_format(path, ImageFormat::Png)?;
    logf!("Wrote {}", path.display());
    Ok(())
}

/// Placement `[x, y, w, h]` of a `width` x `height` image centered on the page
/// at the largest aspect-preserving scale.
pub fn fit_on_page(width: u32, height: u32) -> [f32; 4] {
    let scale = (PAGE_WIDTH_PT / width as f32).min(PAGE_HEIGHT_PT / height as f32);
    let (w, h) = (width as f32 * scale, height as f32 * scale);
    [(PAGE_WIDTH_PT - w) / 2.0, (PAGE_HEIGHT_PT - h) / 2.0, w, h]
}

pub fn pdf_bytes(chart: &ChartImage) -> Result<Vec<u8>, Box<dyn Error>> {
    let expected = chart.width as usize * chart.height as usize * 3;
    if chart.width == 0 || chart.height == 0 || chart.rgb.len() != expected {
        return Err("chart buffer does not match its dimensions".into());
    }

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let image_name = Name(b"Chart");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, &chart.rgb);
    image.width(chart.width as i32);
    image.height(chart.height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    let [x, y, w, h] = fit_on_page(chart.width, chart.height);
    let mut content = Content::new();
    content.save_state();
    content.transform([w, 0.0, 0.0, h, x, y]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

pub fn write_pdf(chart: &ChartImage, path: &Path) -> Result<(), Box<dyn Error>> {
    ensure_parent(path)?;
    std::fs::write(path, pdf_bytes(chart)?)?;
    logf!("Wrote {}", path.display());
    Ok(())
}
