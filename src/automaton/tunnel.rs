//! Tunnel endpoint pairing.
//!
//! Each tunnel orientation (horizontal, vertical) comes from its own marker
//! layer: positions tagged with a key, where every key names one tunnel.
//! Pairing rules per key group:
//! - 1 position: ignored (unpaired marker)
//! - 2 positions: the two positions are the endpoints
//! - more: the two positions farthest apart (squared Euclidean distance)
//!
//! Farthest-pair ties are broken by scanning the group's positions sorted by
//! `(row, col)`, pairs `(i, j)` with `i < j` in order, keeping the first pair
//! found at the maximum distance.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use crate::error::{Result, WormholeError};
use crate::state::Position;

/// An RGB pixel value used as a marker key.
pub type Rgb = [u8; 3];

/// Pure black is the background of an RGB marker raster.
pub const BACKGROUND: Rgb = [0, 0, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Tunnel markers of one orientation, grouped by key.
#[derive(Clone, Debug)]
pub struct MarkerLayer<K> {
    height: u32,
    width: u32,
    groups: HashMap<K, Vec<Position>>,
}

impl<K: Eq + Hash> MarkerLayer<K> {
    /// A layer with no markers.
    pub fn empty(height: u32, width: u32) -> Self {
        MarkerLayer {
            height,
            width,
            groups: HashMap::new(),
        }
    }

    /// Build from explicit `(position, key)` markers.
    pub fn from_markers<I>(height: u32, width: u32, markers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Position, K)>,
    {
        let mut layer = MarkerLayer::empty(height, width);
        let mut seen = HashSet::new();
        for (pos, key) in markers {
            if pos.row >= height || pos.col >= width {
                return Err(WormholeError::MarkerOutOfBounds {
                    row: pos.row,
                    col: pos.col,
                    height,
                    width,
                });
            }
            if !seen.insert(pos) {
                return Err(WormholeError::DuplicateMarker {
                    row: pos.row,
                    col: pos.col,
                });
            }
            layer.groups.entry(key).or_default().push(pos);
        }
        Ok(layer)
    }

    /// Build from a row-major raster where `None` is background.
    pub fn from_raster(height: u32, width: u32, raster: Vec<Option<K>>) -> Result<Self> {
        let expected = (height as usize) * (width as usize);
        if raster.len() != expected {
            return Err(WormholeError::CellCountMismatch {
                what: "marker raster",
                expected,
                found: raster.len(),
            });
        }
        let w = width.max(1) as usize;
        let markers = raster.into_iter().enumerate().filter_map(|(idx, key)| {
            key.map(|k| (Position::new((idx / w) as u32, (idx % w) as u32), k))
        });
        MarkerLayer::from_markers(height, width, markers)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of distinct keys, paired or not.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl MarkerLayer<Rgb> {
    /// Build from a row-major RGB raster; `BACKGROUND` pixels carry no marker.
    pub fn from_rgb(height: u32, width: u32, pixels: &[Rgb]) -> Result<Self> {
        let raster = pixels
            .iter()
            .map(|&px| (px != BACKGROUND).then_some(px))
            .collect();
        MarkerLayer::from_raster(height, width, raster)
    }
}

/// A symmetric endpoint map for one orientation: if `a ↦ b` then `b ↦ a`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TunnelMap {
    partners: HashMap<Position, Position>,
}

impl TunnelMap {
    /// Pair up every group of `layer` and record both directions.
    pub fn build<K: Eq + Hash>(layer: &MarkerLayer<K>) -> TunnelMap {
        let mut map = TunnelMap::default();
        for (a, b) in layer.groups.values().filter_map(|g| farthest_pair(g)) {
            map.partners.insert(a, b);
            map.partners.insert(b, a);
        }
        map
    }

    /// Partner of `pos` if it is an endpoint.
    #[inline]
    pub fn partner(&self, pos: Position) -> Option<Position> {
        self.partners.get(&pos).copied()
    }

    #[inline]
    pub fn is_endpoint(&self, pos: Position) -> bool {
        self.partners.contains_key(&pos)
    }

    pub fn endpoint_count(&self) -> usize {
        self.partners.len()
    }

    pub fn pair_count(&self) -> usize {
        self.partners.len() / 2
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.partners.iter().map(|(&a, &b)| (a, b))
    }
}

/// The two positions of a group that lie farthest apart.
/// Groups smaller than two have no pair.
pub fn farthest_pair(positions: &[Position]) -> Option<(Position, Position)> {
    if positions.len() < 2 {
        return None;
    }

    let mut sorted = positions.to_vec();
    sorted.sort_unstable();

    let mut best = (sorted[0], sorted[1]);
    let mut best_d2 = sorted[0].distance_sq(sorted[1]);
    for i in 0..sorted.len() {
        for j in (i + 1)..sorted.len() {
            let d2 = sorted[i].distance_sq(sorted[j]);
            if d2 > best_d2 {
                best_d2 = d2;
                best = (sorted[i], sorted[j]);
            }
        }
    }
    Some(best)
}

/// Both tunnel maps of a grid, frozen after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TunnelIndex {
    height: u32,
    width: u32,
    horizontal: TunnelMap,
    vertical: TunnelMap,
}

impl TunnelIndex {
    /// Build both maps. Each layer must be `height`×`width`.
    pub fn build<K: Eq + Hash>(
        height: u32,
        width: u32,
        horizontal: &MarkerLayer<K>,
        vertical: &MarkerLayer<K>,
    ) -> Result<TunnelIndex> {
        for (what, layer) in [
            ("horizontal marker layer", horizontal),
            ("vertical marker layer", vertical),
        ] {
            if layer.height != height || layer.width != width {
                return Err(WormholeError::DimensionMismatch {
                    what,
                    expected_height: height,
                    expected_width: width,
                    found_height: layer.height,
                    found_width: layer.width,
                });
            }
        }

        let index = TunnelIndex {
            height,
            width,
            horizontal: TunnelMap::build(horizontal),
            vertical: TunnelMap::build(vertical),
        };
        debug!(
            horizontal_pairs = index.horizontal.pair_count(),
            horizontal_unpaired = horizontal.group_count() - index.horizontal.pair_count(),
            vertical_pairs = index.vertical.pair_count(),
            vertical_unpaired = vertical.group_count() - index.vertical.pair_count(),
            "built tunnel index {}x{}",
            height,
            width
        );
        Ok(index)
    }

    /// A grid with no tunnels at all.
    pub fn without_tunnels(height: u32, width: u32) -> TunnelIndex {
        TunnelIndex {
            height,
            width,
            horizontal: TunnelMap::default(),
            vertical: TunnelMap::default(),
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn map(&self, orientation: Orientation) -> &TunnelMap {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    #[inline]
    pub fn horizontal(&self) -> &TunnelMap {
        &self.horizontal
    }

    #[inline]
    pub fn vertical(&self) -> &TunnelMap {
        &self.vertical
    }
}
