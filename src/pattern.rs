// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Align, AspectRatio, Length};
use tiny_skia::{NonZeroRect, Point, Rect, Size, Transform};

use crate::geom::{utils, IsValidLength, ViewBox};
use crate::units::{convert_length, Axis, Units};
use crate::{Error, Options};

/// A `meetOrSlice` value of the `preserveAspectRatio` attribute.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MeetOrSlice {
    #[default]
    Meet,
    Slice,
}

impl MeetOrSlice {
    /// Parses a `meet` or `slice` keyword.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "meet" => Some(MeetOrSlice::Meet),
            "slice" => Some(MeetOrSlice::Slice),
            _ => None,
        }
    }
}

/// A pattern element geometry.
///
/// `pattern` element attributes in SVG.
/// An immutable value, created by [`PatternSpecBuilder::build`].
#[derive(Clone, PartialEq, Debug)]
pub struct PatternSpec {
    pub(crate) x: Length,
    pub(crate) y: Length,
    pub(crate) width: Length,
    pub(crate) height: Length,
    pub(crate) units: Units,
    pub(crate) content_units: Units,
    pub(crate) transform: Transform,
    pub(crate) view_box: Option<ViewBox>,
    pub(crate) align: String,
    pub(crate) meet_or_slice: MeetOrSlice,
}

impl Default for PatternSpec {
    fn default() -> Self {
        PatternSpec {
            x: Length::zero(),
            y: Length::zero(),
            width: Length::zero(),
            height: Length::zero(),
            units: Units::ObjectBoundingBox,
            content_units: Units::UserSpaceOnUse,
            transform: Transform::default(),
            view_box: None,
            align: "xMidYMid".to_string(),
            meet_or_slice: MeetOrSlice::Meet,
        }
    }
}

impl PatternSpec {
    /// Creates a new builder.
    pub fn builder() -> PatternSpecBuilder {
        PatternSpecBuilder::default()
    }

    /// Tile origin.
    ///
    /// `x` and `y` in SVG.
    pub fn origin(&self) -> (Length, Length) {
        (self.x, self.y)
    }

    /// Tile size.
    ///
    /// `width` and `height` in SVG.
    pub fn size(&self) -> (Length, Length) {
        (self.width, self.height)
    }

    /// `patternUnits` in SVG.
    pub fn units(&self) -> Units {
        self.units
    }

    /// `patternContentUnits` in SVG.
    pub fn content_units(&self) -> Units {
        self.content_units
    }

    /// Pattern transform.
    ///
    /// `patternTransform` in SVG.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Pattern viewbox.
    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }

    /// Raw `align` token of `preserveAspectRatio`.
    pub fn align(&self) -> &str {
        &self.align
    }

    /// `meetOrSlice` value of `preserveAspectRatio`.
    pub fn meet_or_slice(&self) -> MeetOrSlice {
        self.meet_or_slice
    }

    /// Returns an aspect ratio used for view box fitting.
    ///
    /// An unknown `align` token falls back to `xMidYMid meet`.
    pub fn aspect_ratio(&self) -> AspectRatio {
        match parse_align(&self.align) {
            Some(align) => AspectRatio {
                defer: false,
                align,
                slice: self.meet_or_slice == MeetOrSlice::Slice,
            },
            None => {
                log::warn!(
                    "'{}' is not a valid align value. Fallback to 'xMidYMid meet'.",
                    self.align
                );
                AspectRatio::default()
            }
        }
    }
}

fn parse_align(text: &str) -> Option<Align> {
    AspectRatio::from_str(text).ok().map(|aspect| aspect.align)
}

/// A mutable storage for pattern attributes.
///
/// Attributes are set one by one, usually as the owning element receives them.
/// Unset attributes can be inherited from another pattern
/// and fall back to SVG defaults during [`build`](PatternSpecBuilder::build).
#[derive(Clone, Default, Debug)]
pub struct PatternSpecBuilder {
    x: Option<Length>,
    y: Option<Length>,
    width: Option<Length>,
    height: Option<Length>,
    units: Option<Units>,
    content_units: Option<Units>,
    transform: Option<Transform>,
    view_box: Option<ViewBox>,
    align: Option<String>,
    meet_or_slice: Option<MeetOrSlice>,
}

// Fills the field only when it's not set yet.
macro_rules! fallback_to {
    ($dest:expr, $fallback:expr) => {
        if $dest.is_none() {
            $dest = $fallback.clone();
        }
    };
}

impl PatternSpecBuilder {
    /// Sets `x`.
    pub fn x(&mut self, value: Length) -> &mut Self {
        self.x = Some(value);
        self
    }

    /// Sets `y`.
    pub fn y(&mut self, value: Length) -> &mut Self {
        self.y = Some(value);
        self
    }

    /// Sets `width`.
    pub fn width(&mut self, value: Length) -> &mut Self {
        self.width = Some(value);
        self
    }

    /// Sets `height`.
    pub fn height(&mut self, value: Length) -> &mut Self {
        self.height = Some(value);
        self
    }

    /// Sets `patternUnits`.
    pub fn units(&mut self, value: Units) -> &mut Self {
        self.units = Some(value);
        self
    }

    /// Sets `patternContentUnits`.
    pub fn content_units(&mut self, value: Units) -> &mut Self {
        self.content_units = Some(value);
        self
    }

    /// Sets `patternTransform`.
    pub fn transform(&mut self, value: Transform) -> &mut Self {
        self.transform = Some(value);
        self
    }

    /// Sets `viewBox`.
    pub fn view_box(&mut self, value: ViewBox) -> &mut Self {
        self.view_box = Some(value);
        self
    }

    /// Sets the `align` token of `preserveAspectRatio`.
    ///
    /// The token is not validated here.
    pub fn align(&mut self, value: &str) -> &mut Self {
        self.align = Some(value.to_string());
        self
    }

    /// Sets the `meetOrSlice` value of `preserveAspectRatio`.
    pub fn meet_or_slice(&mut self, value: MeetOrSlice) -> &mut Self {
        self.meet_or_slice = Some(value);
        self
    }

    /// Parses and sets an SVG attribute.
    ///
    /// On error, the previous value is preserved.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match name {
            "x" => {
                self.x = Some(parse_length("x", value)?);
            }
            "y" => {
                self.y = Some(parse_length("y", value)?);
            }
            "width" => {
                self.width = Some(parse_length("width", value)?);
            }
            "height" => {
                self.height = Some(parse_length("height", value)?);
            }
            "patternUnits" => {
                let units = Units::parse(value).ok_or_else(|| invalid("patternUnits", value))?;
                self.units = Some(units);
            }
            "patternContentUnits" => {
                let units =
                    Units::parse(value).ok_or_else(|| invalid("patternContentUnits", value))?;
                self.content_units = Some(units);
            }
            "patternTransform" => {
                let ts = svgtypes::Transform::from_str(value)
                    .map_err(|_| invalid("patternTransform", value))?;
                self.transform = Some(Transform::from_row(
                    ts.a as f32,
                    ts.b as f32,
                    ts.c as f32,
                    ts.d as f32,
                    ts.e as f32,
                    ts.f as f32,
                ));
            }
            "viewBox" => {
                self.view_box = Some(parse_view_box(value)?);
            }
            "preserveAspectRatio" => {
                let (align, meet_or_slice) = split_aspect_ratio(value)?;
                self.align = Some(align);
                self.meet_or_slice = Some(meet_or_slice);
            }
            "align" => {
                self.align = Some(value.trim().to_string());
            }
            "meetOrSlice" => {
                let v = MeetOrSlice::parse(value).ok_or_else(|| invalid("meetOrSlice", value))?;
                self.meet_or_slice = Some(v);
            }
            _ => return Err(Error::UnknownAttribute(name.to_string())),
        }

        Ok(())
    }

    /// Inherits all attributes that are not set yet from `other`.
    ///
    /// Used to resolve a pattern that references another one.
    pub fn inherit_from(&mut self, other: &PatternSpecBuilder) -> &mut Self {
        fallback_to!(self.x, other.x);
        fallback_to!(self.y, other.y);
        fallback_to!(self.width, other.width);
        fallback_to!(self.height, other.height);
        fallback_to!(self.units, other.units);
        fallback_to!(self.content_units, other.content_units);
        fallback_to!(self.transform, other.transform);
        fallback_to!(self.view_box, other.view_box);
        fallback_to!(self.align, other.align);
        fallback_to!(self.meet_or_slice, other.meet_or_slice);
        self
    }

    /// Creates a [`PatternSpec`], using SVG defaults for unset attributes.
    pub fn build(&self) -> PatternSpec {
        let def = PatternSpec::default();
        PatternSpec {
            x: self.x.unwrap_or(def.x),
            y: self.y.unwrap_or(def.y),
            width: self.width.unwrap_or(def.width),
            height: self.height.unwrap_or(def.height),
            units: self.units.unwrap_or(def.units),
            content_units: self.content_units.unwrap_or(def.content_units),
            transform: self.transform.unwrap_or(def.transform),
            view_box: self.view_box,
            align: self.align.clone().unwrap_or(def.align),
            meet_or_slice: self.meet_or_slice.unwrap_or(def.meet_or_slice),
        }
    }
}

fn invalid(name: &'static str, value: &str) -> Error {
    Error::InvalidValue {
        name,
        value: value.to_string(),
    }
}

fn parse_length(name: &'static str, value: &str) -> Result<Length, Error> {
    Length::from_str(value).map_err(|_| invalid(name, value))
}

fn parse_view_box(value: &str) -> Result<ViewBox, Error> {
    let mut numbers = Vec::with_capacity(4);
    for n in svgtypes::NumberListParser::from(value) {
        numbers.push(n.map_err(|_| invalid("viewBox", value))? as f32);
    }

    match numbers.as_slice() {
        &[x, y, w, h] => Ok(ViewBox::new(x, y, w, h)),
        _ => Err(invalid("viewBox", value)),
    }
}

// `defer` is ignored, the align token is preserved as is.
fn split_aspect_ratio(value: &str) -> Result<(String, MeetOrSlice), Error> {
    let mut tokens = value.split_whitespace().peekable();
    if tokens.peek() == Some(&"defer") {
        tokens.next();
    }

    let align = tokens
        .next()
        .ok_or_else(|| invalid("preserveAspectRatio", value))?;

    let meet_or_slice = match tokens.next() {
        Some(v) => MeetOrSlice::parse(v).ok_or_else(|| invalid("preserveAspectRatio", value))?,
        None => MeetOrSlice::Meet,
    };

    if tokens.next().is_some() {
        return Err(invalid("preserveAspectRatio", value));
    }

    Ok((align.to_string(), meet_or_slice))
}

/// A pattern tile resolved against a filled element.
///
/// A pure function of a [`PatternSpec`], a target bounding box and [`Options`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ResolvedTile {
    origin: Point,
    width: f32,
    height: f32,
    content_transform: Transform,
    tile_transform: Transform,
    transform: Transform,
    empty: bool,
}

impl ResolvedTile {
    fn empty() -> Self {
        ResolvedTile {
            origin: Point::zero(),
            width: 0.0,
            height: 0.0,
            content_transform: Transform::default(),
            tile_transform: Transform::default(),
            transform: Transform::default(),
            empty: true,
        }
    }

    /// Checks that the tile has nothing to draw.
    ///
    /// An empty tile must not paint anything.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Tile origin in user space of the filled element.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Tile width in user space of the filled element.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Tile height in user space of the filled element.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Tile size.
    ///
    /// Returns `None` for an empty tile.
    pub fn size(&self) -> Option<Size> {
        if self.empty {
            return None;
        }

        Size::from_wh(self.width, self.height)
    }

    /// Tile rectangle in user space of the filled element.
    ///
    /// Returns `None` for an empty tile.
    pub fn rect(&self) -> Option<NonZeroRect> {
        if self.empty {
            return None;
        }

        NonZeroRect::from_xywh(self.origin.x, self.origin.y, self.width, self.height)
    }

    /// Maps pattern content coordinates into the tile's local space.
    pub fn content_transform(&self) -> Transform {
        self.content_transform
    }

    /// Maps the tile's local space into user space.
    ///
    /// `patternTransform` combined with the tile placement.
    pub fn tile_transform(&self) -> Transform {
        self.tile_transform
    }

    /// Maps pattern content coordinates into user space.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// Resolves a pattern tile for an element with the specified bounding box.
///
/// Never fails. Invalid geometry produces an empty tile.
pub fn resolve(spec: &PatternSpec, target_bbox: Rect, opt: &Options) -> ResolvedTile {
    let units = spec.units;
    let x = convert_length(spec.x, Axis::X, units, opt);
    let y = convert_length(spec.y, Axis::Y, units, opt);
    let width = convert_length(spec.width, Axis::X, units, opt);
    let height = convert_length(spec.height, Axis::Y, units, opt);

    let has_bbox = target_bbox.width().is_valid_length() && target_bbox.height().is_valid_length();

    let (x, y, width, height) = if units == Units::ObjectBoundingBox {
        if !has_bbox {
            log::warn!("Pattern on zero-sized shapes is not allowed.");
            return ResolvedTile::empty();
        }

        let bbox = target_bbox;
        (
            bbox.x() + x * bbox.width(),
            bbox.y() + y * bbox.height(),
            width * bbox.width(),
            height * bbox.height(),
        )
    } else {
        (x, y, width, height)
    };

    let size = match Size::from_wh(width, height) {
        Some(size) if width.is_valid_length() && height.is_valid_length() => size,
        _ => {
            log::warn!("Pattern has an invalid size: {}x{}.", width, height);
            return ResolvedTile::empty();
        }
    };

    if !(x.is_finite() && y.is_finite()) {
        log::warn!("Pattern has an invalid origin: {}x{}.", x, y);
        return ResolvedTile::empty();
    }

    let content_transform = if let Some(view_box) = spec.view_box {
        let rect = match view_box.to_non_zero_rect() {
            Some(rect) => rect,
            None => {
                log::warn!("Pattern has an invalid viewBox: {:?}.", view_box);
                return ResolvedTile::empty();
            }
        };

        // `patternContentUnits` is ignored when `viewBox` is set.
        utils::view_box_to_transform(rect, spec.aspect_ratio(), size)
    } else if spec.content_units == Units::ObjectBoundingBox {
        if !has_bbox {
            log::warn!("Pattern on zero-sized shapes is not allowed.");
            return ResolvedTile::empty();
        }

        // No need to shift patterns.
        Transform::from_scale(target_bbox.width(), target_bbox.height())
    } else {
        Transform::default()
    };

    let tile_transform = spec.transform.pre_translate(x, y);
    let transform = tile_transform.pre_concat(content_transform);

    ResolvedTile {
        origin: Point::from_xy(x, y),
        width,
        height,
        content_transform,
        tile_transform,
        transform,
        empty: false,
    }
}
