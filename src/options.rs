// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tiny_skia::Size;

/// Processing options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Target DPI.
    ///
    /// Impacts units conversion.
    ///
    /// Default: 96.0
    pub dpi: f32,

    /// A default font size.
    ///
    /// Used to resolve `em` and `ex` units.
    ///
    /// Default: 12
    pub font_size: f32,

    /// Current viewport size.
    ///
    /// Percentage lengths in `userSpaceOnUse` units are resolved against it.
    ///
    /// Default: `(100, 100)`
    pub viewport: Size,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dpi: 96.0,
            font_size: 12.0,
            // Cannot fail.
            viewport: Size::from_wh(100.0, 100.0).unwrap(),
        }
    }
}
