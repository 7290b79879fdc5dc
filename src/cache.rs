// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use tiny_skia::Rect;

use crate::{Options, Pattern, ResolvedTile};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct TileKey {
    revision: u64,
    bbox: [u32; 4],
}

impl TileKey {
    fn new(revision: u64, bbox: Rect) -> Self {
        TileKey {
            revision,
            bbox: [
                bbox.x().to_bits(),
                bbox.y().to_bits(),
                bbox.width().to_bits(),
                bbox.height().to_bits(),
            ],
        }
    }
}

#[derive(Default, Debug)]
struct Tiles {
    cells: HashMap<TileKey, Arc<OnceCell<ResolvedTile>>>,
    // The newest seen revision per pattern ID.
    revisions: HashMap<String, u64>,
}

impl Tiles {
    /// Records the pattern revision and evicts tiles of its older revision.
    ///
    /// Returns `false` when a newer revision of the pattern was already seen.
    fn track(&mut self, pattern: &Pattern) -> bool {
        let revision = pattern.revision();
        match self.revisions.get(pattern.id()).copied() {
            Some(latest) if latest == revision => true,
            Some(latest) if latest > revision => false,
            prev => {
                self.revisions.insert(pattern.id().to_string(), revision);
                if let Some(prev) = prev {
                    log::debug!("Pattern '{}' was replaced.", pattern.id());
                    self.remove_revision(prev);
                }
                true
            }
        }
    }

    fn cell(&mut self, key: TileKey) -> Arc<OnceCell<ResolvedTile>> {
        self.cells.entry(key).or_default().clone()
    }

    fn remove_revision(&mut self, revision: u64) {
        self.cells.retain(|key, _| key.revision != revision);
    }
}

/// A resolved pattern tiles cache.
///
/// Scoped to a rendering session, since the same pattern
/// can be resolved against many bounding boxes.
/// Can be shared between threads.
/// Each tile is computed at most once, even when requested concurrently.
///
/// Patterns are tracked by ID. Once a pattern with a newer revision
/// is resolved, all tiles of the older one are removed.
#[derive(Debug)]
pub struct TileCache {
    opt: Options,
    tiles: Mutex<Tiles>,
}

impl TileCache {
    /// Creates a new, empty cache.
    ///
    /// `opt` will be used for all tiles resolved through this cache.
    pub fn new(opt: Options) -> Self {
        TileCache {
            opt,
            tiles: Mutex::new(Tiles::default()),
        }
    }

    /// Returns options used for tiles resolving.
    pub fn options(&self) -> &Options {
        &self.opt
    }

    /// Returns a tile of `pattern` for an element with the `target_bbox` bounding box.
    pub fn resolve(&self, pattern: &Pattern, target_bbox: Rect) -> ResolvedTile {
        let resolve = || {
            log::debug!("Resolving a tile for pattern '{}'.", pattern.id());
            crate::resolve(pattern.spec(), target_bbox, &self.opt)
        };

        // Do not hold the lock while resolving.
        let cell = {
            let mut tiles = self.lock();
            if tiles.track(pattern) {
                Some(tiles.cell(TileKey::new(pattern.revision(), target_bbox)))
            } else {
                None
            }
        };

        match cell {
            Some(cell) => *cell.get_or_init(resolve),
            // Superseded pattern. Do not let it refill the cache.
            None => resolve(),
        }
    }
    /// Removes all tiles of the pattern with the specified revision.
    ///
    /// Should be called when a pattern is replaced or removed.
    pub fn invalidate(&self, revision: u64) {
        let mut tiles = self.lock();
        tiles.remove_revision(revision);
        tiles.revisions.retain(|_, r| *r != revision);
    }

    /// Removes all tiles.
    pub fn clear(&self) {
        let mut tiles = self.lock();
        tiles.cells.clear();
        tiles.revisions.clear();
    }

    /// Returns the number of cached tiles.
    pub fn len(&self) -> usize {
        self.lock().cells.len()
    }

    /// Checks that the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<Tiles> {
        // Tiles are plain values, so a poisoned map is still consistent.
        self.tiles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
