use super::*;

#[test]
fn level_thresholds() {
    let level = |v| SliderValue::new(v).level();
    assert_eq!(level(0), VolumeLevel::Level0);
    assert_eq!(level(1), VolumeLevel::Level1);
    assert_eq!(level(33), VolumeLevel::Level1);
    assert_eq!(level(34), VolumeLevel::Level2);
    assert_eq!(level(50), VolumeLevel::Level2);
    assert_eq!(level(66), VolumeLevel::Level2);
    assert_eq!(level(67), VolumeLevel::Level3);
    assert_eq!(level(99), VolumeLevel::Level3);
    assert_eq!(level(100), VolumeLevel::Level3);
}

#[test]
fn slider_clamps_and_normalizes() {
    assert_eq!(SliderValue::new(-5).get(), 0);
    assert_eq!(SliderValue::new(250).get(), 100);
    assert_eq!(SliderValue::new(50).normalized(), 0.5);
    assert_eq!(SliderValue::new(0).normalized(), 0.0);
    assert_eq!(SliderValue::default().normalized(), 1.0);
}

#[test]
fn slider_parses_text_once() {
    assert_eq!(SliderValue::parse(" 42 ").unwrap().get(), 42);
    assert_eq!(SliderValue::parse("66.6").unwrap().get(), 67);
    assert_eq!(SliderValue::parse("1e9").unwrap().get(), 100);
    assert!(SliderValue::parse("loud").is_err());
    assert!(SliderValue::parse("NaN").is_err());
}

#[test]
fn slider_deserializes_with_clamp() {
    let v: SliderValue = serde_json::from_str("120").unwrap();
    assert_eq!(v.get(), 100);
}

#[test]
fn icon_paths_follow_level_index() {
    assert_eq!(VolumeLevel::Level0.icon_path(), "icons/volume-level-0.svg");
    assert_eq!(VolumeLevel::Level3.icon_path(), "icons/volume-level-3.svg");
}

#[test]
fn icons_rasterize_and_differ_by_level() {
    let a = VolumeLevel::Level1.rasterize(48).unwrap();
    let b = VolumeLevel::Level3.rasterize(48).unwrap();
    assert_eq!((a.width, a.height), (48, 48));
    assert!(a.rgba8_premul.chunks_exact(4).any(|px| px[3] > 0));
    assert_ne!(a.rgba8_premul, b.rgba8_premul);
}

#[test]
fn icon_size_is_validated() {
    assert!(VolumeLevel::Level2.rasterize(0).is_err());
}

#[test]
fn icon_svg_is_well_formed_for_every_level() {
    for level in [
        VolumeLevel::Level0,
        VolumeLevel::Level1,
        VolumeLevel::Level2,
        VolumeLevel::Level3,
    ] {
        let svg = level.icon_svg();
        assert!(svg.starts_with("<svg"), "{svg}");
        assert!(svg.ends_with("</svg>"), "{svg}");
        assert!(svg.contains(r##"fill="#000""##));
        usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    }
    let waves = |l: VolumeLevel| l.icon_svg().matches("stroke=").count();
    assert_eq!(waves(VolumeLevel::Level1), 1);
    assert_eq!(waves(VolumeLevel::Level3), 3);
}
