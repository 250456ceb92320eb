/// Rectangle, in canvas coordinates, into which a source image is drawn so
/// that it is fully contained, keeps its aspect ratio, and sits centered on
/// whichever axis has leftover space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub width: f64,
    pub height: f64,
    pub start_x: f64,
    pub start_y: f64,
}

impl FitRect {
    /// Integer draw rectangle: rounded offsets and a size of at least 1 px.
    pub fn pixel_rect(&self) -> (i64, i64, u32, u32) {
        let w = self.width.round().max(1.0) as u32;
        let h = self.height.round().max(1.0) as u32;
        (self.start_x.round() as i64, self.start_y.round() as i64, w, h)
    }
}

/// Compute where an `image_w x image_h` source lands on a
/// `canvas_w x canvas_h` canvas.
///
/// Vertical images (aspect ratio below 1) scale so their height exactly
/// fills the canvas and sit flush to the top, centered horizontally.
/// Everything else, squares included, scales so its width exactly fills the
/// canvas and sits flush to the left, centered vertically. A square image on
/// a non-square canvas therefore fills canvas width first.
///
/// Pure and total over positive finite dimensions; callers are responsible
/// for rejecting zero or non-finite sizes before calling.
pub fn fit(canvas_w: f64, canvas_h: f64, image_w: f64, image_h: f64) -> FitRect {
    let aspect_ratio = image_w / image_h;

    if aspect_ratio < 1.0 {
        // Height is the most the canvas allows; width follows the ratio.
        let height = canvas_h;
        let width = canvas_h * aspect_ratio;
        FitRect {
            width,
            height,
            start_x: (canvas_w - width) / 2.0,
            start_y: 0.0,
        }
    } else {
        let width = canvas_w;
        let height = canvas_w / aspect_ratio;
        FitRect {
            width,
            height,
            start_x: 0.0,
            start_y: (canvas_h - height) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rect_rounds_and_keeps_one_px_minimum() {
        let r = FitRect {
            width: 0.4,
            height: 99.6,
            start_x: 10.5,
            start_y: -0.4,
        };
        assert_eq!(r.pixel_rect(), (11, 0, 1, 100));
    }

    #[test]
    fn exact_fit_has_no_offset() {
        let r = fit(400.0, 400.0, 800.0, 800.0);
        assert_eq!((r.start_x, r.start_y), (0.0, 0.0));
        assert_eq!((r.width, r.height), (400.0, 400.0));
    }
}
