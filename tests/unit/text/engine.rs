use super::*;

#[test]
fn text_style_builder() {
    let s = TextStyle::new(FontRole::Sans, 40.0).weight(700.0).tracking_em(-0.05);
    assert_eq!(s.weight, 700.0);
    assert!((s.letter_spacing_px + 2.0).abs() < 1e-6);
    assert_eq!(TextStyle::new(FontRole::Serif, 10.0).weight, 400.0);
}

#[test]
fn approx_measure_scales_with_chars_and_tracking() {
    let style = TextStyle::new(FontRole::Sans, 100.0);
    let e = ApproxMeasure.measure("使徒AB", &style).unwrap();
    assert!((e.width - 240.0).abs() < 1e-9);
    assert!((e.ascent - 80.0).abs() < 1e-9);
    assert!((e.descent - 20.0).abs() < 1e-9);
    assert!((e.content_height() - 100.0).abs() < 1e-9);

    let tracked = style.tracking_em(0.1);
    let e = ApproxMeasure.measure("AB", &tracked).unwrap();
    assert!((e.width - 140.0).abs() < 1e-4);

    let e = ApproxMeasure.measure("", &style).unwrap();
    assert_eq!(e.width, 0.0);
}

#[test]
fn approx_measure_rejects_bad_size() {
    let style = TextStyle::new(FontRole::Sans, 0.0);
    assert!(ApproxMeasure.measure("A", &style).is_err());
}

#[test]
fn font_book_collects_roles() {
    let book = FontBook::new().with_font(FontRole::Serif, vec![1, 2, 3]);
    assert!(!book.is_empty());
    assert!(book.get(FontRole::Sans).is_none());
    assert_eq!(book.get(FontRole::Serif).map(|b| b.len()), Some(3));
}

#[test]
fn font_book_load_reports_missing_file() {
    let path = std::env::temp_dir().join("evagen_no_such_font_file.ttf");
    let err = FontBook::new()
        .load(FontRole::Sans, &path)
        .err()
        .unwrap();
    assert!(err.to_string().contains("evagen_no_such_font_file.ttf"));
}

#[test]
fn engine_without_fonts_shapes_nothing_and_measures_approximately() {
    let mut engine = TextLayoutEngine::with_system_fonts(false);
    assert!(!engine.has_fonts());
    assert!(!engine.uses_system_fonts());
    assert!(engine.family_name(FontRole::Sans).is_none());

    let style = TextStyle::new(FontRole::Serif, 50.0);
    assert!(engine.shape("EVA", &style).unwrap().is_none());
    let e = engine.measure("EVA", &style).unwrap();
    assert_eq!(e, ApproxMeasure.measure("EVA", &style).unwrap());
}

#[test]
fn font_book_uses_system_fonts_unless_disabled() {
    assert!(FontBook::new().uses_system_fonts());
    assert!(!FontBook::default().system_fonts(false).uses_system_fonts());

    let engine = TextLayoutEngine::with_fonts(&FontBook::new().system_fonts(false)).unwrap();
    assert!(!engine.uses_system_fonts());
    assert!(TextLayoutEngine::new().uses_system_fonts());
}

#[test]
fn unregistered_roles_fall_back_to_generic_families() {
    use parley::style::{FontFamily, FontStack, GenericFamily};

    let engine = TextLayoutEngine::with_system_fonts(false);
    assert_eq!(
        engine.font_stack(FontRole::Sans),
        FontStack::List(Cow::Owned(vec![FontFamily::Generic(GenericFamily::SansSerif)]))
    );
    assert_eq!(
        engine.font_stack(FontRole::Serif),
        FontStack::List(Cow::Owned(vec![FontFamily::Generic(GenericFamily::Serif)]))
    );
}

#[test]
fn engine_with_system_fonts_shapes_text_without_font_files() {
    let mut engine = TextLayoutEngine::new();
    assert!(!engine.has_fonts());
    let style = TextStyle::new(FontRole::Sans, 40.0);
    let Some(shaped) = engine.shape("EVA", &style).unwrap() else {
        // No installed fonts on this machine.
        return;
    };
    assert!(shaped.extent.width > 0.0);
    assert!(shaped.baseline > 0.0);
}

#[test]
fn engine_rejects_unparseable_font_bytes() {
    let mut engine = TextLayoutEngine::with_system_fonts(false);
    assert!(engine.register_font(FontRole::Sans, b"not a font").is_err());
    assert!(!engine.has_fonts());
}

#[test]
fn engine_shape_rejects_bad_size() {
    let mut engine = TextLayoutEngine::with_system_fonts(false);
    let style = TextStyle::new(FontRole::Sans, f32::NAN);
    assert!(engine.shape("A", &style).is_err());
}

fn test_font() -> Option<Vec<u8>> {
    let path = std::env::var_os("EVAGEN_TEST_FONT")?;
    std::fs::read(path).ok()
}

#[test]
fn engine_with_font_shapes_and_falls_back_across_roles() {
    let Some(bytes) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::with_system_fonts(false);
    let family = engine.register_font(FontRole::Sans, &bytes).unwrap();
    assert!(!family.is_empty());
    assert_eq!(engine.family_name(FontRole::Serif), Some(family.as_str()));

    let style = TextStyle::new(FontRole::Serif, 48.0);
    let shaped = engine.shape("EVA", &style).unwrap().unwrap();
    assert!(shaped.extent.width > 0.0);
    assert!(shaped.extent.ascent > 0.0);
    assert!(shaped.baseline > 0.0);
}

#[test]
fn registered_family_leads_and_generic_follows() {
    use parley::style::{FontFamily, FontStack, GenericFamily};

    let Some(bytes) = test_font() else {
        return;
    };
    let mut engine = TextLayoutEngine::with_system_fonts(false);
    let family = engine.register_font(FontRole::Sans, &bytes).unwrap();
    let named = FontFamily::Named(Cow::Owned(family));

    assert_eq!(
        engine.font_stack(FontRole::Sans),
        FontStack::List(Cow::Owned(vec![
            named.clone(),
            FontFamily::Generic(GenericFamily::SansSerif),
        ]))
    );
    assert_eq!(
        engine.font_stack(FontRole::Serif),
        FontStack::List(Cow::Owned(vec![
            FontFamily::Generic(GenericFamily::Serif),
            named,
        ]))
    );

    // Characters the registered face lacks still shape instead of vanishing.
    let style = TextStyle::new(FontRole::Sans, 32.0);
    let shaped = engine.shape("A使徒", &style).unwrap().unwrap();
    assert!(shaped.extent.width > 0.0);
}
