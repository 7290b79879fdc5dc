// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::PatternSpec;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// An element that owns drawable children.
pub trait Container {
    /// Returns children.
    fn children(&self) -> &[Node];

    /// Checks that the element has any children.
    fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

/// A drawable node.
#[allow(missing_docs)]
#[derive(Clone, Debug)]
pub enum Node {
    Group(Box<Group>),
    FillPath(FillPath),
    StrokePath(StrokePath),
}

/// A group container.
#[derive(Clone, Debug)]
pub struct Group {
    /// Element's transform.
    pub transform: tiny_skia::Transform,

    /// Element's opacity. In a 0..=1 range.
    pub opacity: f32,

    /// Group children.
    pub children: Vec<Node>,
}

impl Group {
    /// Creates a new group with an identity transform and full opacity.
    pub fn new(children: Vec<Node>) -> Self {
        Group {
            transform: tiny_skia::Transform::default(),
            opacity: 1.0,
            children,
        }
    }

    /// Checks that the group can be rendered without a layer.
    pub fn is_transform_only(&self) -> bool {
        self.opacity == 1.0
    }
}

impl Container for Group {
    fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A paint source.
#[derive(Clone, Debug)]
pub enum Paint {
    /// A solid color.
    Color(tiny_skia::Color),
    /// A pattern.
    Pattern(Arc<Pattern>),
}

/// A filled path.
#[derive(Clone, Debug)]
pub struct FillPath {
    /// Fill paint.
    pub paint: Paint,

    /// Paint opacity. In a 0..=1 range.
    pub opacity: f32,

    /// Fill rule.
    pub rule: tiny_skia::FillRule,

    /// Enables anti-aliasing.
    pub anti_alias: bool,

    /// Path geometry.
    pub path: Arc<tiny_skia::Path>,
}

impl FillPath {
    /// Creates a new anti-aliased, non-zero filled path.
    pub fn new(path: tiny_skia::Path, paint: Paint) -> Self {
        FillPath {
            paint,
            opacity: 1.0,
            rule: tiny_skia::FillRule::Winding,
            anti_alias: true,
            path: Arc::new(path),
        }
    }
}

/// A stroked path.
#[derive(Clone, Debug)]
pub struct StrokePath {
    /// Stroke paint.
    pub paint: Paint,

    /// Paint opacity. In a 0..=1 range.
    pub opacity: f32,

    /// Stroke properties.
    pub stroke: tiny_skia::Stroke,

    /// Enables anti-aliasing.
    pub anti_alias: bool,

    /// Path geometry.
    pub path: Arc<tiny_skia::Path>,
}

impl StrokePath {
    /// Creates a new anti-aliased stroked path.
    pub fn new(path: tiny_skia::Path, paint: Paint, stroke: tiny_skia::Stroke) -> Self {
        StrokePath {
            paint,
            opacity: 1.0,
            stroke,
            anti_alias: true,
            path: Arc::new(path),
        }
    }
}

/// A pattern element.
///
/// `pattern` element in SVG: geometry plus the content drawn into each tile.
#[derive(Debug)]
pub struct Pattern {
    id: String,
    revision: u64,
    spec: PatternSpec,
    children: Vec<Node>,
}

impl Pattern {
    /// Creates a new pattern.
    pub fn new(id: impl Into<String>, spec: PatternSpec, children: Vec<Node>) -> Self {
        Pattern {
            id: id.into(),
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
            spec,
            children,
        }
    }

    /// Creates a copy of the pattern with a new geometry.
    ///
    /// The copy gets a new revision.
    pub fn with_spec(&self, spec: PatternSpec) -> Self {
        Pattern::new(self.id.clone(), spec, self.children.clone())
    }

    /// Element's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// A process-wide unique number of this pattern instance.
    ///
    /// Used as a [`TileCache`](crate::TileCache) key.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pattern geometry.
    pub fn spec(&self) -> &PatternSpec {
        &self.spec
    }
}

impl Container for Pattern {
    fn children(&self) -> &[Node] {
        &self.children
    }
}
