//! Preview strip cache keyed by unit content.
//!
//! Strips are keyed by [`PaletteUnit::content_hash`], so an edited unit simply
//! misses and renders fresh. Eviction works in passes: a client calls
//! [`ThumbnailCache::begin_pass`], requests every strip it still shows, then
//! [`ThumbnailCache::end_pass`] drops whatever was not requested.

use std::collections::{HashMap, HashSet};

use palette_common::PaletteUnit;
use tracing::debug;

use crate::atlas::Atlas;
use crate::preview::{render_strip, PREVIEW_WIDTH};

/// Counters for cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThumbnailCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl ThumbnailCacheStats {
    /// Calculate cache hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct ThumbnailCache {
    entries: HashMap<u64, Atlas>,
    active: HashSet<u64>,
    width: usize,
    stats: ThumbnailCacheStats,
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(PREVIEW_WIDTH)
    }
}

impl ThumbnailCache {
    /// Create an empty cache producing strips `width` pixels wide.
    pub fn new(width: usize) -> Self {
        Self {
            entries: HashMap::new(),
            active: HashSet::new(),
            width,
            stats: ThumbnailCacheStats::default(),
        }
    }

    /// Start a pass; strips not requested before `end_pass` are evicted.
    pub fn begin_pass(&mut self) {
        self.active.clear();
    }

    /// Return the cached strip for `unit`, rendering it on a miss, and mark it
    /// as in use for the current pass.
    pub fn get_or_render(&mut self, unit: &PaletteUnit) -> &Atlas {
        let hash = unit.content_hash();
        self.active.insert(hash);

        if self.entries.contains_key(&hash) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        let width = self.width;
        self.entries
            .entry(hash)
            .or_insert_with(|| render_strip(unit, width))
    }

    /// Evict every strip not requested since `begin_pass`. Returns the number evicted.
    pub fn end_pass(&mut self) -> usize {
        let before = self.entries.len();
        let active = &self.active;
        self.entries.retain(|hash, _| active.contains(hash));

        let evicted = before - self.entries.len();
        self.stats.evictions += evicted as u64;
        if evicted > 0 {
            debug!(evicted, remaining = self.entries.len(), "Evicted unused thumbnails");
        }
        evicted
    }

    pub fn contains(&self, unit: &PaletteUnit) -> bool {
        self.entries.contains_key(&unit.content_hash())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> ThumbnailCacheStats {
        self.stats
    }

    /// Drop all strips. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_common::{Color, InterpolationMode};

    fn unit(colors: Vec<Color>) -> PaletteUnit {
        PaletteUnit::new(InterpolationMode::Linear, colors)
    }

    #[test]
    fn test_hit_after_miss() {
        let mut cache = ThumbnailCache::default();
        let u = unit(vec![Color::BLACK, Color::WHITE]);

        cache.get_or_render(&u);
        cache.get_or_render(&u);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.hit_rate(), 50.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_edit_changes_key() {
        let mut cache = ThumbnailCache::new(4);
        let mut u = unit(vec![Color::BLACK, Color::WHITE]);
        cache.get_or_render(&u);

        u.colors[1] = Color::rgb(1.0, 0.0, 0.0);
        assert!(!cache.contains(&u));
        let strip = cache.get_or_render(&u);
        assert_eq!(strip.pixels[3], Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_pass_evicts_unrequested() {
        let mut cache = ThumbnailCache::new(8);
        let a = unit(vec![Color::BLACK]);
        let b = unit(vec![Color::WHITE]);

        cache.begin_pass();
        cache.get_or_render(&a);
        cache.get_or_render(&b);
        assert_eq!(cache.end_pass(), 0);

        cache.begin_pass();
        cache.get_or_render(&a);
        assert_eq!(cache.end_pass(), 1);

        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_identical_units_share_entry() {
        let mut cache = ThumbnailCache::default();
        let a = unit(vec![Color::WHITE]).named("first");
        let b = unit(vec![Color::WHITE]).named("second");
        cache.get_or_render(&a);
        cache.get_or_render(&b);
        assert_eq!(cache.len(), 1);
    }
}
