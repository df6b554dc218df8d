use super::*;

fn surface() -> CanvasSurface {
    CanvasSurface::new(Canvas::default()).unwrap()
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    let data = rgba.repeat((w * h) as usize);
    SourceImage::from_premul_rgba8(w, h, data).unwrap()
}

#[test]
fn anchors_sit_five_percent_from_edges() {
    let (top, bottom) = caption_anchors(Canvas::default(), 0.05);
    assert_eq!(top, Point::new(200.0, 20.0));
    assert_eq!(bottom, Point::new(200.0, 380.0));
}

#[test]
fn background_is_opaque_black_by_default() {
    let p = RenderPipeline::new(&MemeConfig::default(), None);
    let mut s = surface();
    p.paint_background(&mut s).unwrap();
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(399, 399), Some([0, 0, 0, 255]));
}

#[test]
fn landscape_image_is_letterboxed() {
    let p = RenderPipeline::new(&MemeConfig::default(), None);
    let mut s = surface();
    p.paint_background(&mut s).unwrap();
    let fit = p
        .draw_image(&mut s, &solid(8, 4, [255, 255, 255, 255]))
        .unwrap();
    assert_eq!(
        fit,
        FitResult {
            width: 400.0,
            height: 200.0,
            start_x: 0.0,
            start_y: 100.0
        }
    );
    assert_eq!(s.pixel(200, 50), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(200, 200), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(200, 350), Some([0, 0, 0, 255]));
}

#[test]
fn portrait_image_is_pillarboxed() {
    let p = RenderPipeline::new(&MemeConfig::default(), None);
    let mut s = surface();
    p.paint_background(&mut s).unwrap();
    p.draw_image(&mut s, &solid(4, 8, [255, 255, 255, 255]))
        .unwrap();
    assert_eq!(s.pixel(50, 200), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(200, 200), Some([255, 255, 255, 255]));
    assert_eq!(s.pixel(350, 200), Some([0, 0, 0, 255]));
}

#[test]
fn captions_without_font_report_render_error() {
    let mut p = RenderPipeline::new(&MemeConfig::default(), None);
    assert!(!p.has_text());
    let mut s = surface();
    let err = p
        .draw_captions(&mut s, &CaptionPair::new("a", "b"))
        .unwrap_err();
    assert!(err.to_string().contains("render error:"));
    assert!(s.is_blank());
}

#[test]
fn captions_paint_near_top_and_bottom() {
    let cfg = MemeConfig::default();
    let Ok(font) = resolve_caption_font(&cfg.caption) else {
        // No system fonts on this machine.
        return;
    };
    let mut cfg = cfg;
    cfg.caption.color = Rgba8::WHITE;
    let mut p = RenderPipeline::new(&cfg, Some(&font));
    assert!(p.has_text());

    let mut s = surface();
    p.paint_background(&mut s).unwrap();
    p.draw_captions(&mut s, &CaptionPair::new("top", "bottom"))
        .unwrap();

    let lit_rows = |ys: std::ops::Range<u32>| {
        ys.filter(|&y| (0..400).any(|x| s.pixel(x, y).unwrap()[0] > 0))
            .count()
    };
    assert!(lit_rows(0..40) > 0, "top caption missing");
    assert!(lit_rows(340..400) > 0, "bottom caption missing");
    assert_eq!(lit_rows(120..280), 0, "captions leaked into the middle");
}

#[test]
fn clear_leaves_transparent_pixels() {
    let p = RenderPipeline::new(&MemeConfig::default(), None);
    let mut s = surface();
    p.paint_background(&mut s).unwrap();
    p.clear(&mut s);
    assert!(s.is_blank());
}
