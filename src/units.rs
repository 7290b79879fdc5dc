// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::{Length, LengthUnit as Unit};

use crate::Options;

/// A coordinate system units.
///
/// `*Units` attributes in SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

// `Units` cannot have a default value, because it changes depending on an element.

impl Units {
    /// Parses an SVG units keyword.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "userSpaceOnUse" => Some(Units::UserSpaceOnUse),
            "objectBoundingBox" => Some(Units::ObjectBoundingBox),
            _ => None,
        }
    }
}

/// A direction a length is measured in.
///
/// Selects the viewport side percentages are resolved against.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
    Other,
}

/// Converts a length into user units.
///
/// With `ObjectBoundingBox` units, percentages become fractions
/// and are expected to be scaled by the bounding box afterwards.
#[inline(never)]
pub fn convert_length(length: Length, axis: Axis, units: Units, opt: &Options) -> f32 {
    let dpi = opt.dpi;
    let n = length.number as f32;
    match length.unit {
        Unit::None | Unit::Px => n,
        Unit::Em => n * opt.font_size,
        Unit::Ex => n * opt.font_size / 2.0,
        Unit::In => n * dpi,
        Unit::Cm => n * dpi / 2.54,
        Unit::Mm => n * dpi / 25.4,
        Unit::Pt => n * dpi / 72.0,
        Unit::Pc => n * dpi / 6.0,
        Unit::Percent => {
            if units == Units::ObjectBoundingBox {
                n / 100.0
            } else {
                let viewport = opt.viewport;
                match axis {
                    Axis::X => convert_percent(length, viewport.width()),
                    Axis::Y => convert_percent(length, viewport.height()),
                    Axis::Other => {
                        let mut vb_len = viewport.width().powi(2) + viewport.height().powi(2);
                        vb_len = (vb_len / 2.0).sqrt();
                        convert_percent(length, vb_len)
                    }
                }
            }
        }
    }
}

fn convert_percent(length: Length, base: f32) -> f32 {
    base * (length.number as f32) / 100.0
}
