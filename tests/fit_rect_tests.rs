use caption_canvas::layout::{FitRect, fit};

fn rect_close(r: FitRect, expected: (f64, f64, f64, f64), eps: f64) {
    assert!(
        (r.width - expected.0).abs() <= eps,
        "width mismatch: {:?} vs {:?}",
        r,
        expected
    );
    assert!(
        (r.height - expected.1).abs() <= eps,
        "height mismatch: {:?} vs {:?}",
        r,
        expected
    );
    assert!(
        (r.start_x - expected.2).abs() <= eps,
        "start_x mismatch: {:?} vs {:?}",
        r,
        expected
    );
    assert!(
        (r.start_y - expected.3).abs() <= eps,
        "start_y mismatch: {:?} vs {:?}",
        r,
        expected
    );
}

#[test]
fn portrait_fills_height_flush_to_top() {
    // 50x100 image on a 100x200 canvas: aspect 0.5, height is the limit.
    let r = fit(100.0, 200.0, 50.0, 100.0);
    rect_close(r, (100.0, 200.0, 0.0, 0.0), 1e-12);
}

#[test]
fn portrait_centers_horizontally_on_square_canvas() {
    let r = fit(400.0, 400.0, 100.0, 200.0);
    rect_close(r, (200.0, 400.0, 100.0, 0.0), 1e-12);
}

#[test]
fn landscape_fills_width_and_centers_vertically() {
    // 400x100 image on a 200x100 canvas: aspect 4, width is the limit.
    let r = fit(200.0, 100.0, 400.0, 100.0);
    rect_close(r, (200.0, 50.0, 0.0, 25.0), 1e-12);
}

#[test]
fn fit_routes_square_to_width_fill() {
    // A square image takes the width-fill branch, so on a non-square canvas
    // it fills canvas width first rather than splitting the slack on both
    // axes.
    let r = fit(300.0, 100.0, 50.0, 50.0);
    rect_close(r, (300.0, 300.0, 0.0, -100.0), 1e-12);

    // On the square product canvas the same branch covers it exactly.
    let r = fit(400.0, 400.0, 50.0, 50.0);
    rect_close(r, (400.0, 400.0, 0.0, 0.0), 1e-12);
}

#[test]
fn aspect_ratio_preserved_across_size_grid() {
    let canvases = [64.0, 100.0, 256.0, 400.0, 1080.0];
    let dims = [1.0, 2.0, 3.0, 50.0, 99.0, 101.0, 333.0, 1024.0, 4032.0];
    for &side in &canvases {
        for &iw in &dims {
            for &ih in &dims {
                let r = fit(side, side, iw, ih);
                let source_ratio = iw / ih;
                let fitted_ratio = r.width / r.height;
                let rel = ((fitted_ratio - source_ratio) / source_ratio).abs();
                assert!(
                    rel <= 1e-9,
                    "aspect drift {rel} for image {iw}x{ih} on canvas {side}"
                );
            }
        }
    }
}

#[test]
fn fitted_rect_contained_in_square_canvas() {
    let canvases = [64.0, 100.0, 256.0, 400.0, 1080.0];
    let dims = [1.0, 2.0, 3.0, 50.0, 99.0, 101.0, 333.0, 1024.0, 4032.0];
    for &side in &canvases {
        for &iw in &dims {
            for &ih in &dims {
                let r = fit(side, side, iw, ih);
                assert!(r.start_x >= 0.0, "{iw}x{ih} on {side}: {r:?}");
                assert!(r.start_y >= 0.0, "{iw}x{ih} on {side}: {r:?}");
                assert!(
                    r.start_x + r.width <= side + 1e-9,
                    "{iw}x{ih} on {side}: {r:?}"
                );
                assert!(
                    r.start_y + r.height <= side + 1e-9,
                    "{iw}x{ih} on {side}: {r:?}"
                );
            }
        }
    }
}

#[test]
fn one_axis_is_flush_and_the_other_centered() {
    let dims = [1.0, 2.0, 50.0, 99.0, 333.0, 1024.0];
    for &iw in &dims {
        for &ih in &dims {
            let r = fit(400.0, 400.0, iw, ih);
            if iw < ih {
                assert_eq!(r.start_y, 0.0);
                let centered = (400.0 - r.width) / 2.0;
                assert!((r.start_x - centered).abs() <= 1e-9);
            } else {
                assert_eq!(r.start_x, 0.0);
                let centered = (400.0 - r.height) / 2.0;
                assert!((r.start_y - centered).abs() <= 1e-9);
            }
        }
    }
}

#[test]
fn fit_is_bitwise_idempotent() {
    let a = fit(400.0, 400.0, 1237.0, 771.0);
    let b = fit(400.0, 400.0, 1237.0, 771.0);
    assert_eq!(a.width.to_bits(), b.width.to_bits());
    assert_eq!(a.height.to_bits(), b.height.to_bits());
    assert_eq!(a.start_x.to_bits(), b.start_x.to_bits());
    assert_eq!(a.start_y.to_bits(), b.start_y.to_bits());
}
