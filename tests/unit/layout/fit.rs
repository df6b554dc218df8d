use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn landscape_fills_width_and_centers_vertically() {
    let r = fit(400.0, 400.0, 800.0, 400.0);
    assert_eq!(
        r,
        FitResult {
            width: 400.0,
            height: 200.0,
            start_x: 0.0,
            start_y: 100.0
        }
    );
}

#[test]
fn portrait_fills_height_and_centers_horizontally() {
    let r = fit(400.0, 400.0, 400.0, 800.0);
    assert_eq!(
        r,
        FitResult {
            width: 200.0,
            height: 400.0,
            start_x: 100.0,
            start_y: 0.0
        }
    );
}

#[test]
fn square_takes_the_width_branch() {
    let r = fit(400.0, 400.0, 400.0, 400.0);
    assert_eq!(
        r,
        FitResult {
            width: 400.0,
            height: 400.0,
            start_x: 0.0,
            start_y: 0.0
        }
    );

    // On a wide canvas the tie-break is observable: width is maximized, height overflows.
    let r = fit(600.0, 300.0, 50.0, 50.0);
    assert_eq!(r.width, 600.0);
    assert_eq!(r.height, 600.0);
    assert_eq!(r.start_y, -150.0);
    assert!(!r.is_contained_in(600.0, 300.0));
}

#[test]
fn square_canvas_contains_and_preserves_aspect() {
    let sizes = [1.0, 3.0, 7.5, 64.0, 99.0, 400.0, 1234.5, 4096.0];
    for &cw in &[1.0, 17.0, 400.0, 1080.0] {
        for &iw in &sizes {
            for &ih in &sizes {
                let r = fit(cw, cw, iw, ih);
                assert!(r.is_contained_in(cw, cw), "{cw} {iw}x{ih} -> {r:?}");
                assert!(approx(r.width / r.height, iw / ih), "{iw}x{ih} -> {r:?}");
                // Centered on the axis that was not maximized.
                assert!(approx(r.start_x * 2.0 + r.width, cw));
                assert!(approx(r.start_y * 2.0 + r.height, cw));
            }
        }
    }
}

#[test]
fn is_pure() {
    let a = fit(640.0, 480.0, 333.0, 777.0);
    let b = fit(640.0, 480.0, 333.0, 777.0);
    assert_eq!(a, b);
}

#[test]
fn degenerate_input_propagates_non_finite() {
    let r = fit(400.0, 400.0, 10.0, 0.0);
    assert!(r.height == 0.0 && r.width == 400.0);
    let r = fit(400.0, 400.0, 0.0, 0.0);
    // 0/0 is NaN, which is not < 1, so the width branch runs on NaN.
    assert!(r.height.is_nan());
    assert!(r.start_y.is_nan());
}

#[test]
fn rect_and_typed_helper_agree() {
    let canvas = Canvas::new(400, 400).unwrap();
    let r = fit_image(canvas, 800, 400);
    assert_eq!(r.to_rect(), Rect::new(0.0, 100.0, 400.0, 300.0));
}

#[test]
fn serializes_with_camel_case_origin() {
    let r = fit(400.0, 400.0, 400.0, 800.0);
    let v = serde_json::to_value(r).unwrap();
    assert_eq!(v["startX"], 100.0);
    assert_eq!(v["startY"], 0.0);
    assert_eq!(v["width"], 200.0);
}
