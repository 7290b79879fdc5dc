// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::render::Context;
use crate::tree::{FillPath, StrokePath};

pub fn render_fill_path(
    path: &FillPath,
    blend_mode: tiny_skia::BlendMode,
    ctx: &Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    // Horizontal and vertical lines cannot be filled. Skip.
    let bounds = path.path.bounds();
    if bounds.width() == 0.0 || bounds.height() == 0.0 {
        return None;
    }

    let object_bbox = path.path.compute_tight_bounds()?;

    let mut pattern_pixmap = None;
    let mut paint = crate::paint_server::convert(
        &path.paint,
        path.opacity,
        object_bbox,
        ctx,
        transform,
        &mut pattern_pixmap,
    )?;

    paint.anti_alias = path.anti_alias;
    paint.blend_mode = blend_mode;

    pixmap.fill_path(&path.path, &paint, path.rule, transform, None);

    Some(())
}

pub fn render_stroke_path(
    path: &StrokePath,
    blend_mode: tiny_skia::BlendMode,
    ctx: &Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    // Zero-sized stroke path is not an error, because linecap round or square
    // would produce the shape either way.
    let object_bbox = path.path.compute_tight_bounds()?;

    let mut pattern_pixmap = None;
    let mut paint = crate::paint_server::convert(
        &path.paint,
        path.opacity,
        object_bbox,
        ctx,
        transform,
        &mut pattern_pixmap,
    )?;

    paint.anti_alias = path.anti_alias;
    paint.blend_mode = blend_mode;

    pixmap.stroke_path(&path.path, &paint, &path.stroke, transform, None);

    Some(())
}
