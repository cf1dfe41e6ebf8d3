use super::*;
use crate::{
    model::{grid::Direction, title_card::Theme},
    render::cpu::CpuBackend,
};

#[test]
fn grid_renders_truncated_canvas_with_background_and_cells() {
    let config = GridConfig::with_text("AB");
    let img = render_grid(&config, &mut CpuBackend::without_system_fonts()).unwrap();
    assert_eq!((img.width, img.height), (257, 148));
    assert_eq!(img.pixel(5, 5), Some([0, 0, 0, 255]));
    assert_eq!(img.pixel(40, 40), Some([0x1a, 0x1a, 0x2e, 255]));
    // Inside the gap between the two cells.
    assert_eq!(img.pixel(128, 74), Some([0, 0, 0, 255]));
}

#[test]
fn vertical_grid_swaps_dimensions() {
    let config = GridConfig {
        direction: Direction::Vertical,
        ..GridConfig::with_text("AB")
    };
    let img = render_grid(&config, &mut CpuBackend::without_system_fonts()).unwrap();
    assert_eq!((img.width, img.height), (148, 257));
}

#[test]
fn empty_grid_renders_nothing() {
    let img = render_grid(&GridConfig::default(), &mut CpuBackend::without_system_fonts()).unwrap();
    assert!(img.is_empty());
}

#[test]
fn title_card_fills_frame_with_theme_background() {
    let config = TitleCardConfig {
        theme: Theme::WhiteBlack,
        ..TitleCardConfig::default()
    };
    let img = render_title_card(&config, FrameSpec::new(800), &mut CpuBackend::without_system_fonts())
        .unwrap();
    assert_eq!((img.width, img.height), (800, 450));
    assert_eq!(img.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(img.pixel(799, 449), Some([255, 255, 255, 255]));
}

#[test]
fn same_config_renders_identical_pixels() {
    let config = TitleCardConfig {
        effects_enabled: true,
        ..TitleCardConfig::default()
    };
    let mut backend = CpuBackend::without_system_fonts();
    let a = render_title_card(&config, FrameSpec::new(640), &mut backend).unwrap();
    let b = render_title_card(&config, FrameSpec::new(640), &mut backend).unwrap();
    assert_eq!(a.digest(), b.digest());
}
