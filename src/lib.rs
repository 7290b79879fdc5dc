// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`rnsvg-pattern` resolves SVG `pattern` elements into repeating paint sources.

The core is [`resolve`], a pure function that turns a [`PatternSpec`]
and the bounding box of the filled element into a [`ResolvedTile`]:
the tile rectangle in user space and the transforms under which
the pattern content has to be drawn.

[`render`] uses it to fill and stroke paths with patterns via `tiny-skia`.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::uninlined_format_args)]

pub use svgtypes;
pub use tiny_skia;

mod cache;
mod error;
mod geom;
mod options;
mod paint_server;
mod path;
mod pattern;
mod render;
mod tree;
mod units;

pub use crate::cache::TileCache;
pub use crate::error::Error;
pub use crate::geom::{utils, IsValidLength, ViewBox};
pub use crate::options::Options;
pub use crate::pattern::{resolve, MeetOrSlice, PatternSpec, PatternSpecBuilder, ResolvedTile};
pub use crate::tree::{Container, FillPath, Group, Node, Paint, Pattern, StrokePath};
pub use crate::units::{convert_length, Axis, Units};

/// Renders nodes onto the pixmap.
///
/// `transform` will be used as a root transform.
///
/// Pattern tiles are resolved through `cache`, which also provides
/// the [`Options`] used for units conversion.
pub fn render(
    nodes: &[Node],
    transform: tiny_skia::Transform,
    cache: &TileCache,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    let ctx = render::Context { tiles: cache };
    render::render_nodes(nodes, &ctx, transform, pixmap);
}

pub(crate) trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
