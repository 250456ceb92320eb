//! Canvas composition: background fill plus the fitted image overlay.

use anyhow::{Context, Result, ensure};
use fast_image_resize as fir;
use image::{Rgba, RgbaImage, imageops};

use crate::layout::fit;

/// Canvas with only the background fill, used before any image is selected.
pub fn blank_canvas(canvas_w: u32, canvas_h: u32, background: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(
        canvas_w,
        canvas_h,
        Rgba([background[0], background[1], background[2], 255]),
    )
}

/// Paint `source` onto a fresh `canvas_w x canvas_h` canvas: background fill
/// first, then the image scaled to its fit rectangle, centered on the slack
/// axis.
pub fn compose(
    source: &RgbaImage,
    canvas_w: u32,
    canvas_h: u32,
    background: [u8; 3],
) -> Result<RgbaImage> {
    ensure!(
        canvas_w > 0 && canvas_h > 0,
        "canvas dimensions must be positive"
    );
    ensure!(
        source.width() > 0 && source.height() > 0,
        "source dimensions must be positive"
    );

    let mut canvas = blank_canvas(canvas_w, canvas_h, background);
    let rect = fit(
        f64::from(canvas_w),
        f64::from(canvas_h),
        f64::from(source.width()),
        f64::from(source.height()),
    );
    let (dest_x, dest_y, dest_w, dest_h) = rect.pixel_rect();
    let scaled = resize_rgba(source, dest_w, dest_h)?;
    imageops::overlay(&mut canvas, &scaled, dest_x, dest_y);
    Ok(canvas)
}

fn resize_rgba(source: &RgbaImage, target_w: u32, target_h: u32) -> Result<RgbaImage> {
    if source.width() == target_w && source.height() == target_h {
        return Ok(source.clone());
    }

    let src_view = fir::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fir::PixelType::U8x4,
    )
    .context("failed to create source view for canvas resize")?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::CatmullRom));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .context("canvas resize failed")?;
    let buffer = dst_image.into_vec();
    RgbaImage::from_raw(target_w, target_h, buffer)
        .ok_or_else(|| anyhow::anyhow!("failed to construct resized RGBA image"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_noop_for_matching_dimensions() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));
        let out = resize_rgba(&img, 8, 8).unwrap();
        assert_eq!(out.as_raw(), img.as_raw());
    }

    #[test]
    fn compose_rejects_empty_canvas() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        assert!(compose(&img, 0, 10, [0, 0, 0]).is_err());
    }
}
