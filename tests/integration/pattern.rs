use std::sync::Arc;

use once_cell::sync::Lazy;
use rnsvg_pattern::{svgtypes::Length, tiny_skia, Group, Node, Options, Paint, Pattern};
use rnsvg_pattern::{PatternSpec, StrokePath, TileCache, Units, ViewBox};

use crate::*;

static CHECKERBOARD: Lazy<Arc<Pattern>> = Lazy::new(checkerboard);

#[test]
fn user_space_tiles_repeat() {
    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &CHECKERBOARD)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), red());
    assert_eq!(pixel(&pixmap, 15, 5), transparent());
    assert_eq!(pixel(&pixmap, 15, 15), transparent());
    assert_eq!(pixel(&pixmap, 25, 5), red());
    assert_eq!(pixel(&pixmap, 85, 65), red());
}

#[test]
fn clipped_by_shape() {
    let pixmap = render(&[fill_rect(40.0, 40.0, 40.0, 40.0, &CHECKERBOARD)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), transparent());
    assert_eq!(pixel(&pixmap, 45, 45), red());
    assert_eq!(pixel(&pixmap, 85, 85), transparent());
}

#[test]
fn bbox_units_follow_shape() {
    let spec = PatternSpec::builder()
        .width(Length::new_number(0.5))
        .height(Length::new_number(0.5))
        .content_units(Units::ObjectBoundingBox)
        .build();
    let patt = Arc::new(Pattern::new(
        "bbox",
        spec,
        vec![red_rect(0.0, 0.0, 0.25, 0.25)],
    ));

    // 40x40 tiles starting at (10, 10), with a 20x20 red square each.
    let pixmap = render(&[fill_rect(10.0, 10.0, 80.0, 80.0, &patt)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), transparent());
    assert_eq!(pixel(&pixmap, 20, 20), red());
    assert_eq!(pixel(&pixmap, 40, 40), transparent());
    assert_eq!(pixel(&pixmap, 60, 20), red());
    assert_eq!(pixel(&pixmap, 60, 60), red());
}

#[test]
fn view_box_scales_content() {
    let spec = user_space_tile(20.0, 20.0)
        .view_box(ViewBox::new(0.0, 0.0, 2.0, 2.0))
        .build();
    let patt = Arc::new(Pattern::new("vb", spec, vec![red_rect(0.0, 0.0, 1.0, 1.0)]));

    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), red());
    assert_eq!(pixel(&pixmap, 15, 15), transparent());
    assert_eq!(pixel(&pixmap, 45, 45), red());
}

#[test]
fn pattern_transform_shifts_tiles() {
    let spec = user_space_tile(20.0, 20.0)
        .transform(tiny_skia::Transform::from_translate(10.0, 0.0))
        .build();
    let patt = Arc::new(CHECKERBOARD.with_spec(spec));

    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), transparent());
    assert_eq!(pixel(&pixmap, 15, 5), red());
    assert_eq!(pixel(&pixmap, 15, 15), transparent());
}

#[test]
fn root_transform_scales_tiles() {
    let cache = TileCache::new(Options::default());
    let pixmap = render_with(
        &[fill_rect(0.0, 0.0, 100.0, 100.0, &CHECKERBOARD)],
        200,
        tiny_skia::Transform::from_scale(2.0, 2.0),
        &cache,
    );
    assert_eq!(pixel(&pixmap, 10, 10), red());
    assert_eq!(pixel(&pixmap, 30, 10), transparent());
    assert_eq!(pixel(&pixmap, 30, 30), transparent());
    assert_eq!(pixel(&pixmap, 50, 10), red());
}

#[test]
fn empty_tile_paints_nothing() {
    let spec = user_space_tile(0.0, 20.0).build();
    let patt = Arc::new(CHECKERBOARD.with_spec(spec));
    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)], 100);
    assert!(is_transparent(&pixmap));

    let spec = user_space_tile(20.0, 20.0)
        .view_box(ViewBox::new(0.0, 0.0, 10.0, 0.0))
        .build();
    let patt = Arc::new(CHECKERBOARD.with_spec(spec));
    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)], 100);
    assert!(is_transparent(&pixmap));
}

#[test]
fn pattern_without_children_paints_nothing() {
    let patt = Arc::new(Pattern::new(
        "empty",
        user_space_tile(20.0, 20.0).build(),
        Vec::new(),
    ));
    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)], 100);
    assert!(is_transparent(&pixmap));
}

#[test]
fn malformed_pattern_does_not_break_siblings() {
    let spec = PatternSpec::builder()
        .width(Length::new_number(-1.0))
        .height(Length::new_number(1.0))
        .align("bogus")
        .build();
    let broken = Arc::new(CHECKERBOARD.with_spec(spec));

    let nodes = [
        fill_rect(0.0, 0.0, 50.0, 100.0, &broken),
        fill_rect(50.0, 0.0, 50.0, 100.0, &CHECKERBOARD),
    ];
    let pixmap = render(&nodes, 100);
    assert_eq!(pixel(&pixmap, 5, 5), transparent());
    assert_eq!(pixel(&pixmap, 65, 5), red());
}

#[test]
fn stroke_with_pattern() {
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(0.0, 45.0);
    pb.line_to(100.0, 45.0);
    let line = pb.finish().unwrap();

    let mut stroke = tiny_skia::Stroke::default();
    stroke.width = 10.0;

    let node = Node::StrokePath(StrokePath::new(
        line.clone(),
        Paint::Pattern(Arc::clone(&CHECKERBOARD)),
        stroke.clone(),
    ));
    let pixmap = render(&[node], 100);
    assert_eq!(pixel(&pixmap, 5, 44), red());
    assert_eq!(pixel(&pixmap, 15, 44), transparent());
    assert_eq!(pixel(&pixmap, 5, 30), transparent());

    // A horizontal line has a zero-sized bounding box.
    let bbox_patt = Arc::new(Pattern::new(
        "bbox",
        PatternSpec::builder()
            .width(Length::new_number(0.1))
            .height(Length::new_number(1.0))
            .build(),
        vec![red_rect(0.0, 0.0, 100.0, 100.0)],
    ));
    let node = Node::StrokePath(StrokePath::new(line, Paint::Pattern(bbox_patt), stroke));
    assert!(is_transparent(&render(&[node], 100)));
}

#[test]
fn nested_patterns() {
    let outer = Arc::new(Pattern::new(
        "outer",
        user_space_tile(80.0, 80.0).build(),
        vec![fill_rect(0.0, 0.0, 40.0, 40.0, &CHECKERBOARD)],
    ));

    let pixmap = render(&[fill_rect(0.0, 0.0, 100.0, 100.0, &outer)], 100);
    assert_eq!(pixel(&pixmap, 5, 5), red());
    assert_eq!(pixel(&pixmap, 15, 15), transparent());
    assert_eq!(pixel(&pixmap, 25, 5), red());
    assert_eq!(pixel(&pixmap, 55, 5), transparent());
    assert_eq!(pixel(&pixmap, 85, 5), red());
}

#[test]
fn group_opacity() {
    let mut group = Group::new(vec![fill_rect(0.0, 0.0, 100.0, 100.0, &CHECKERBOARD)]);
    group.opacity = 0.5;

    let pixmap = render(&[Node::Group(Box::new(group))], 100);
    let p = pixel(&pixmap, 5, 5);
    assert!(p.a > 120 && p.a < 136, "{:?}", p);
    assert_eq!(pixel(&pixmap, 15, 15), transparent());
}

#[test]
fn shared_cache_between_threads() {
    let cache = TileCache::new(Options::default());
    let nodes = vec![
        fill_rect(0.0, 0.0, 100.0, 50.0, &CHECKERBOARD),
        fill_rect(0.0, 50.0, 100.0, 50.0, &CHECKERBOARD),
    ];
    let expected = render(&nodes, 100);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| render_with(&nodes, 100, tiny_skia::Transform::default(), &cache)))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().data(), expected.data());
        }
    });

    // One tile per target bounding box.
    assert_eq!(cache.len(), 2);
}

#[test]
fn replaced_pattern_in_session() {
    let cache = TileCache::new(Options::default());
    let mut patt = checkerboard();

    for size in [20.0, 40.0, 60.0] {
        patt = Arc::new(patt.with_spec(user_space_tile(size, size).build()));
        let pixmap = render_with(
            &[fill_rect(0.0, 0.0, 100.0, 100.0, &patt)],
            100,
            tiny_skia::Transform::default(),
            &cache,
        );
        assert_eq!(pixel(&pixmap, 5, 5), red());
        assert_eq!(pixel(&pixmap, 15, 15), transparent());
        assert_eq!(pixel(&pixmap, size as u32 + 5, 5), red());

        // Only the current geometry is cached.
        assert_eq!(cache.len(), 1);
    }
}
