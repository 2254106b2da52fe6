use alloc::vec::Vec;

/// Last-measured height per item index.
///
/// Entries start out unknown and resolve to `min_row_height` until measured. All sums are
/// recomputed from the entries on demand, so float error cannot accumulate across updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightCache {
    heights: Vec<Option<f64>>,
    min_row_height: f64,
}

impl HeightCache {
    pub fn new(len: usize, min_row_height: f64) -> Self {
        Self {
            heights: alloc::vec![None; len],
            min_row_height,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn min_row_height(&self) -> f64 {
        self.min_row_height
    }

    pub(crate) fn set_min_row_height(&mut self, min_row_height: f64) {
        self.min_row_height = min_row_height;
    }

    /// The measured height, or `None` if the item was never measured (or is out of bounds).
    pub fn get(&self, index: usize) -> Option<f64> {
        self.heights.get(index).copied().flatten()
    }

    /// Records a measurement and returns whether the entry changed. Out-of-bounds indexes and
    /// non-finite heights are ignored; negative heights are clamped to zero.
    pub fn set(&mut self, index: usize, height: f64) -> bool {
        if !height.is_finite() {
            vwarn!(index, "HeightCache::set: ignoring non-finite height");
            return false;
        }
        let Some(slot) = self.heights.get_mut(index) else {
            return false;
        };
        let height = Some(height.max(0.0));
        if *slot == height {
            return false;
        }
        *slot = height;
        true
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// The measured height, or `min_row_height` when unknown.
    pub fn resolve(&self, index: usize) -> f64 {
        self.get(index).unwrap_or(self.min_row_height)
    }

    /// Forgets every measurement and resizes to `len` entries.
    pub fn reset(&mut self, len: usize) {
        vdebug!(len, "HeightCache::reset");
        self.heights.clear();
        self.heights.resize(len, None);
    }

    /// Cumulative resolved height of the items before `index`.
    pub fn offset_of(&self, index: usize) -> f64 {
        let end = index.min(self.heights.len());
        (0..end).map(|i| self.resolve(i)).sum()
    }

    /// Sum of resolved heights over all items.
    pub fn total(&self) -> f64 {
        self.offset_of(self.heights.len())
    }

    /// Number of measured entries.
    pub fn measured_len(&self) -> usize {
        self.heights.iter().filter(|h| h.is_some()).count()
    }
}
