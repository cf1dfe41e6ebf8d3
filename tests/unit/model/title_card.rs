use super::*;

#[test]
fn defaults_are_the_classic_card() {
    let c = TitleCardConfig::default();
    assert_eq!(c.top_text, "NEON GENESIS");
    assert_eq!(c.bottom_text, "EVANGELION");
    assert_eq!(c.episode_label, "EPISODE:1");
    assert_eq!(c.title_lines(), vec!["使徒、", "襲来"]);
    assert_eq!(c.theme, Theme::BlackWhite);
    assert!(!c.effects_enabled);
    for element in TitleElement::PAINT_ORDER {
        assert_eq!(c.scale_percent(element), 100.0);
    }
}

#[test]
fn theme_palettes() {
    let p = Theme::BlackWhite.palette();
    assert_eq!((p.background, p.primary), (Rgba8::BLACK, Rgba8::WHITE));
    let p = Theme::WhiteBlack.palette();
    assert_eq!((p.background, p.primary), (Rgba8::WHITE, Rgba8::BLACK));
    let p = Theme::BlackRed.palette();
    assert_eq!(p.background, Rgba8::BLACK);
    assert_eq!(p.primary.to_hex(), "#dc2626");
    assert_eq!(p.secondary, p.primary);
}

#[test]
fn theme_tags_name_background_first() {
    assert_eq!(
        serde_json::to_string(&Theme::WhiteBlack).unwrap(),
        "\"white-black\""
    );
    let t: Theme = serde_json::from_str("\"black-red\"").unwrap();
    assert_eq!(t, Theme::BlackRed);
}

#[test]
fn title_lines_keep_empty_lines_and_strip_cr() {
    let c = TitleCardConfig {
        title: "A\r\n\nB".to_string(),
        ..TitleCardConfig::default()
    };
    assert_eq!(c.title_lines(), vec!["A", "", "B"]);

    let c = TitleCardConfig {
        title: String::new(),
        ..TitleCardConfig::default()
    };
    assert_eq!(c.title_lines(), vec![""]);
}

#[test]
fn scale_factors_apply_vertical_stretch() {
    let c = TitleCardConfig {
        top_scale: 50.0,
        episode_scale: 200.0,
        ..TitleCardConfig::default()
    };
    assert_eq!(c.scale_factors(TitleElement::Top), (0.5, 0.75));
    assert_eq!(c.scale_factors(TitleElement::Episode), (2.0, 2.5));
    assert_eq!(c.scale_factors(TitleElement::Bottom), (1.0, 1.5));
    assert_eq!(c.scale_factors(TitleElement::Title), (1.0, 1.0));
}

#[test]
fn validate_and_clamp_scales() {
    let c = TitleCardConfig {
        title_scale: f64::NAN,
        ..TitleCardConfig::default()
    };
    assert!(c.validate().is_err());

    let c = TitleCardConfig {
        top_scale: 5.0,
        bottom_scale: 400.0,
        episode_scale: 99.6,
        title_scale: f64::NAN,
        ..TitleCardConfig::default()
    }
    .clamped_to_controls();
    assert_eq!(c.top_scale, 10.0);
    assert_eq!(c.bottom_scale, 300.0);
    assert_eq!(c.episode_scale, 100.0);
    assert_eq!(c.title_scale, 10.0);
    assert!(c.validate().is_ok());
}

#[test]
fn text_of_maps_each_element() {
    let c = TitleCardConfig::default();
    assert_eq!(c.text_of(TitleElement::Top), "NEON GENESIS");
    assert_eq!(c.text_of(TitleElement::Episode), "EPISODE:1");
    assert_eq!(c.text_of(TitleElement::Bottom), "EVANGELION");
    assert_eq!(c.text_of(TitleElement::Title), "使徒、\n襲来");
}
