// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{Group, Node};
use crate::{OptionLog, TileCache};

pub struct Context<'a> {
    pub tiles: &'a TileCache,
}

pub fn render_nodes(
    children: &[Node],
    ctx: &Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    for node in children {
        render_node(node, ctx, transform, pixmap);
    }
}

pub fn render_node(
    node: &Node,
    ctx: &Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    match node {
        Node::Group(ref group) => {
            render_group(group, ctx, transform, pixmap);
        }
        Node::FillPath(ref path) => {
            crate::path::render_fill_path(
                path,
                tiny_skia::BlendMode::SourceOver,
                ctx,
                transform,
                pixmap,
            );
        }
        Node::StrokePath(ref path) => {
            crate::path::render_stroke_path(
                path,
                tiny_skia::BlendMode::SourceOver,
                ctx,
                transform,
                pixmap,
            );
        }
    }
}

fn render_group(
    group: &Group,
    ctx: &Context,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    let transform = transform.pre_concat(group.transform);

    if group.is_transform_only() {
        render_nodes(&group.children, ctx, transform, pixmap);
        return Some(());
    }

    if !(group.opacity > 0.0) {
        return None;
    }

    let mut sub_pixmap = tiny_skia::Pixmap::new(pixmap.width(), pixmap.height())
        .log_none(|| log::warn!("Failed to allocate a group layer."))?;

    render_nodes(&group.children, ctx, transform, &mut sub_pixmap.as_mut());

    let paint = tiny_skia::PixmapPaint {
        opacity: group.opacity,
        blend_mode: tiny_skia::BlendMode::SourceOver,
        quality: tiny_skia::FilterQuality::Nearest,
    };

    pixmap.draw_pixmap(
        0,
        0,
        sub_pixmap.as_ref(),
        &paint,
        tiny_skia::Transform::identity(),
        None,
    );

    Some(())
}
