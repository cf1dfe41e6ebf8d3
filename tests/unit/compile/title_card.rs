use super::*;
use crate::{
    layout::title_card::{FrameSpec, layout_title_card},
    model::title_card::{Theme, TitleCardConfig},
    text::engine::ApproxMeasure,
};

fn compiled(config: &TitleCardConfig) -> RenderPlan {
    let layout =
        layout_title_card(config, FrameSpec::default(), &mut ApproxMeasure).unwrap();
    compile_title_card(&layout)
}

fn texts(ops: &[DrawOp]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn plain_card_paints_background_labels_then_title() {
    let plan = compiled(&TitleCardConfig::default());
    assert_eq!(plan.surfaces.len(), 1);
    assert_eq!(plan.clear, Rgba8::BLACK);
    let Pass::Scene(scene) = &plan.passes[0] else {
        panic!("expected scene");
    };
    let DrawOp::FillRect { rect, color, .. } = &scene.ops[0] else {
        panic!("expected background");
    };
    assert_eq!(*color, Rgba8::BLACK);
    assert_eq!(*rect, Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert_eq!(
        texts(&scene.ops),
        vec!["NEON GENESIS", "EPISODE:1", "EVANGELION", "使徒、", "襲来"]
    );
}

#[test]
fn empty_lines_emit_no_text_ops() {
    let config = TitleCardConfig {
        top_text: String::new(),
        title: "A\n\nB".to_string(),
        ..TitleCardConfig::default()
    };
    let plan = compiled(&config);
    let ops: Vec<DrawOp> = plan.draw_ops().cloned().collect();
    assert_eq!(texts(&ops), vec!["EPISODE:1", "EVANGELION", "A", "B"]);
}

#[test]
fn text_ops_carry_line_transform() {
    let config = TitleCardConfig {
        title_scale: 200.0,
        theme: Theme::WhiteBlack,
        ..TitleCardConfig::default()
    };
    let layout =
        layout_title_card(&config, FrameSpec::default(), &mut ApproxMeasure).unwrap();
    let plan = compile_title_card(&layout);
    let title = plan
        .draw_ops()
        .find_map(|op| match op {
            DrawOp::Text(t) if t.text == "襲来" => Some(t.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(title.transform, layout.title_lines[1].transform.to_affine());
    assert_eq!(title.color, Rgba8::BLACK);
    assert_eq!(title.position, layout.title_lines[1].origin);
}

#[test]
fn effects_add_ghosts_then_title_then_scanlines() {
    let config = TitleCardConfig {
        effects_enabled: true,
        ..TitleCardConfig::default()
    };
    let plan = compiled(&config);
    assert_eq!(plan.surfaces.len(), 4);
    assert_eq!(plan.final_surface, SurfaceId(0));

    let kinds: Vec<&str> = plan
        .passes
        .iter()
        .map(|p| match p {
            Pass::Scene(_) => "scene",
            Pass::Offscreen(_) => "offscreen",
            Pass::Composite(_) => "composite",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "scene",
            "scene",
            "scene",
            "offscreen",
            "offscreen",
            "composite",
            "scene",
            "scene",
            "composite"
        ]
    );

    let Pass::Scene(base) = &plan.passes[0] else {
        panic!("expected base scene");
    };
    assert_eq!(texts(&base.ops), vec!["NEON GENESIS", "EPISODE:1", "EVANGELION"]);

    let Pass::Scene(red) = &plan.passes[1] else {
        panic!("expected ghost scene");
    };
    assert!(red.clear_to_transparent);
    let DrawOp::Text(ghost) = &red.ops[0] else {
        panic!("expected ghost text");
    };
    assert_eq!(ghost.color, Rgba8::rgb(255, 0, 0));
    let shift = ghost.transform.translation().x
        - plan_title_transform(&plan).translation().x;
    assert!((shift + CHROMATIC_OFFSET_PX).abs() < 1e-9);

    let Pass::Offscreen(blur) = &plan.passes[3] else {
        panic!("expected blur");
    };
    assert_eq!(blur.fx, CHROMATIC_BLUR);

    let Pass::Composite(ghosts) = &plan.passes[5] else {
        panic!("expected ghost composite");
    };
    assert_eq!(
        ghosts.ops,
        vec![
            CompositeOp::Over {
                src: SurfaceId(1),
                opacity: CHROMATIC_OPACITY
            },
            CompositeOp::Over {
                src: SurfaceId(2),
                opacity: CHROMATIC_OPACITY
            },
        ]
    );

    let Pass::Scene(title) = &plan.passes[6] else {
        panic!("expected title scene");
    };
    assert_eq!(title.target, SurfaceId(0));
    assert_eq!(texts(&title.ops), vec!["使徒、", "襲来"]);

    let Pass::Composite(scan) = &plan.passes[8] else {
        panic!("expected scanline composite");
    };
    assert_eq!(
        scan.ops,
        vec![CompositeOp::Overlay {
            src: SurfaceId(3),
            opacity: SCANLINE_OPACITY
        }]
    );
}

fn plan_title_transform(plan: &RenderPlan) -> Affine {
    let Pass::Scene(title) = &plan.passes[6] else {
        panic!("expected title scene");
    };
    let DrawOp::Text(t) = &title.ops[0] else {
        panic!("expected title text");
    };
    t.transform
}

#[test]
fn scanlines_shade_last_two_rows_of_every_four() {
    let ops = scanline_ops(Rect::new(0.0, 0.0, 10.0, 10.0));
    let rows: Vec<(f64, f64)> = ops
        .iter()
        .map(|op| match op {
            DrawOp::FillRect { rect, color, .. } => {
                assert_eq!(color.a, 77);
                (rect.y0, rect.y1)
            }
            DrawOp::Text(_) => panic!("unexpected text"),
        })
        .collect();
    assert_eq!(rows, vec![(2.0, 4.0), (6.0, 8.0)]);

    let ops = scanline_ops(Rect::new(0.0, 0.0, 10.0, 11.0));
    assert_eq!(ops.len(), 3);
}
