// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::render::Context;
use crate::tree::{Container, Paint, Pattern};
use crate::OptionLog;

/// Converts a paint into a `tiny-skia` paint.
///
/// `pattern_pixmap` will hold a pattern tile, since the paint shader borrows it.
///
/// Returns `None` when there is nothing to paint.
pub fn convert<'a>(
    paint: &Paint,
    opacity: f32,
    object_bbox: tiny_skia::Rect,
    ctx: &Context,
    transform: tiny_skia::Transform,
    pattern_pixmap: &'a mut Option<tiny_skia::Pixmap>,
) -> Option<tiny_skia::Paint<'a>> {
    let mut skia_paint = tiny_skia::Paint::default();
    match *paint {
        Paint::Color(ref c) => {
            let mut c = *c;
            c.apply_opacity(opacity);
            skia_paint.set_color(c);
        }
        Paint::Pattern(ref pattern) => {
            let (patt_pix, patt_ts) = prepare_pattern_pixmap(pattern, ctx, transform, object_bbox)?;

            let patt_pix: &'a tiny_skia::Pixmap = pattern_pixmap.insert(patt_pix);
            skia_paint.shader = tiny_skia::Pattern::new(
                patt_pix.as_ref(),
                tiny_skia::SpreadMode::Repeat,
                tiny_skia::FilterQuality::Bicubic,
                opacity,
                patt_ts,
            );
        }
    }

    Some(skia_paint)
}

/// Renders a single pattern tile.
///
/// Returns the tile pixmap and a transform that maps the pixmap into user space.
/// The pixmap is rendered at the device scale of `transform`.
pub fn prepare_pattern_pixmap(
    pattern: &Pattern,
    ctx: &Context,
    transform: tiny_skia::Transform,
    object_bbox: tiny_skia::Rect,
) -> Option<(tiny_skia::Pixmap, tiny_skia::Transform)> {
    if !pattern.has_children() {
        return None;
    }

    let tile = ctx.tiles.resolve(pattern, object_bbox);
    let rect = tile.rect()?;

    let (sx, sy) = {
        let ts2 = transform.pre_concat(pattern.spec().transform());
        ts2.get_scale()
    };

    let img_size = tiny_skia::IntSize::from_wh(
        (rect.width() * sx).round() as u32,
        (rect.height() * sy).round() as u32,
    )
    .log_none(|| log::warn!("Pattern '{}' tile is smaller than a pixel.", pattern.id()))?;
    let mut pixmap = tiny_skia::Pixmap::new(img_size.width(), img_size.height())
        .log_none(|| log::warn!("Failed to allocate a tile for: {:?}.", img_size))?;

    let transform = tiny_skia::Transform::from_scale(sx, sy).pre_concat(tile.content_transform());

    crate::render::render_nodes(pattern.children(), ctx, transform, &mut pixmap.as_mut());

    let ts = tile.tile_transform().pre_scale(1.0 / sx, 1.0 / sy);

    Some((pixmap, ts))
}
