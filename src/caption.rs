//! Stroked caption text rendering in the classic top/bottom style.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::Error;

/// Resolved pixel-space styling for one caption line.
#[derive(Debug, Clone, Copy)]
pub struct CaptionStyle {
    pub font_px: f32,
    pub fill: [u8; 3],
    pub stroke: [u8; 3],
    /// Stroke halo radius; 0 disables the halo.
    pub stroke_px: f32,
    /// Gap between the caption and the nearest canvas edge.
    pub margin_px: f32,
}

/// Which canvas edge a caption is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
}

/// Load the caption font from an explicit path, or fall back to querying the
/// system font database for a bold display face.
pub fn load_font(font_path: Option<&Path>) -> Result<FontVec, Error> {
    if let Some(path) = font_path {
        let data = fs::read(path)?;
        return FontVec::try_from_vec(data)
            .map_err(|_| Error::FontUnavailable(format!("unreadable font file {}", path.display())));
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[
            fontdb::Family::Name("Impact"),
            fontdb::Family::Name("Anton"),
            fontdb::Family::Name("DejaVu Sans"),
            fontdb::Family::SansSerif,
        ],
        weight: fontdb::Weight::BOLD,
        ..fontdb::Query::default()
    };
    let id = db
        .query(&query)
        .ok_or_else(|| Error::FontUnavailable("no bold face installed".into()))?;
    if let Some(face) = db.face(id) {
        debug!(family = ?face.families.first(), "selected caption font");
    }
    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
            .map_err(|_| Error::FontUnavailable("selected face failed to parse".into()))
    })
    .ok_or_else(|| Error::FontUnavailable("selected face has no readable data".into()))?
}

/// Baseline origin for a caption line.
///
/// The line is centered horizontally; the baseline sits `margin` plus the
/// ascent below the top edge, or `margin` minus the (negative) descent above
/// the bottom edge.
pub fn line_origin(
    canvas_w: f32,
    canvas_h: f32,
    line_w: f32,
    ascent: f32,
    descent: f32,
    margin: f32,
    placement: Placement,
) -> (f32, f32) {
    let x = (canvas_w - line_w) / 2.0;
    let y = match placement {
        Placement::Top => margin + ascent,
        Placement::Bottom => canvas_h - margin + descent,
    };
    (x, y)
}

/// Shape one line of text at origin (0, 0), returning the glyphs and the
/// advance width of the whole line.
fn layout_line(font: &FontVec, scale: PxScale, text: &str) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::new();
    let mut caret = 0.0f32;
    let mut last: Option<GlyphId> = None;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let id = scaled.glyph_id(ch);
        if let Some(prev) = last {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(Glyph {
            id,
            scale,
            position: point(caret, 0.0),
        });
        caret += scaled.h_advance(id);
        last = Some(id);
    }
    (glyphs, caret)
}

/// Draw one caption onto the canvas: stroke halo first, fill on top.
/// Empty and whitespace-only text is skipped.
pub fn draw_caption(
    canvas: &mut RgbaImage,
    font: &FontVec,
    style: &CaptionStyle,
    placement: Placement,
    text: &str,
) {
    if text.trim().is_empty() {
        return;
    }

    let scale = PxScale::from(style.font_px);
    let scaled = font.as_scaled(scale);
    let (glyphs, line_w) = layout_line(font, scale, text);
    let (origin_x, origin_y) = line_origin(
        canvas.width() as f32,
        canvas.height() as f32,
        line_w,
        scaled.ascent(),
        scaled.descent(),
        style.margin_px,
        placement,
    );

    if style.stroke_px > 0.0 {
        let r = style.stroke_px;
        let ring: [(f32, f32); 8] = [
            (-r, -r),
            (0.0, -r),
            (r, -r),
            (-r, 0.0),
            (r, 0.0),
            (-r, r),
            (0.0, r),
            (r, r),
        ];
        for (dx, dy) in ring {
            draw_line(canvas, font, &glyphs, origin_x + dx, origin_y + dy, style.stroke);
        }
    }
    draw_line(canvas, font, &glyphs, origin_x, origin_y, style.fill);
}

fn draw_line(
    canvas: &mut RgbaImage,
    font: &FontVec,
    glyphs: &[Glyph],
    origin_x: f32,
    origin_y: f32,
    color: [u8; 3],
) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    for glyph in glyphs {
        let mut glyph = glyph.clone();
        glyph.position = point(glyph.position.x + origin_x, glyph.position.y + origin_y);
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, coverage| {
            let px = bounds.min.x.floor() as i64 + x as i64;
            let py = bounds.min.y.floor() as i64 + y as i64;
            if (0..w).contains(&px) && (0..h).contains(&py) {
                blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
            }
        });
    }
}

fn blend(px: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    for i in 0..3 {
        px[i] = (color[i] as f32 * a + px[i] as f32 * (1.0 - a)).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_line_is_centered_below_the_edge() {
        let (x, y) = line_origin(400.0, 400.0, 100.0, 30.0, -8.0, 16.0, Placement::Top);
        assert_eq!(x, 150.0);
        assert_eq!(y, 46.0);
    }

    #[test]
    fn bottom_line_sits_descent_above_the_margin() {
        let (x, y) = line_origin(400.0, 400.0, 400.0, 30.0, -8.0, 16.0, Placement::Bottom);
        assert_eq!(x, 0.0);
        assert_eq!(y, 376.0);
    }

    #[test]
    fn blend_interpolates_towards_the_color() {
        let mut px = Rgba([0, 0, 0, 255]);
        blend(&mut px, [255, 255, 255], 0.5);
        assert_eq!(px.0[..3], [128, 128, 128]);
        blend(&mut px, [255, 255, 255], 1.0);
        assert_eq!(px.0[..3], [255, 255, 255]);
    }
}
