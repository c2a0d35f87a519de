use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::*;

/// How many tiles the opening peek shows at once.
pub const PEEK_BATCH_SIZE: usize = 5;

/// Opening animation that shows random batches of tiles on its own scratch grid.
///
/// The caller decides how long a batch stays visible, the sequence only tracks which tiles are face-up.
#[derive(Clone, Debug, PartialEq)]
pub struct PeekSequence {
    order: Vec<Coord2>,
    visible: Array2<bool>,
    next_batch: usize,
    current: Option<core::ops::Range<usize>>,
}

impl PeekSequence {
    pub fn new<R: Rng + ?Sized>(size: Coord2, rng: &mut R) -> Self {
        let mut order: Vec<Coord2> = iter_coords(size).collect();
        order.shuffle(rng);
        Self {
            order,
            visible: Array2::default(size.to_nd_index()),
            next_batch: 0,
            current: None,
        }
    }

    pub fn seeded(size: Coord2, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new(size, &mut rng)
    }

    pub fn batch_count(&self) -> usize {
        self.order.len().div_ceil(PEEK_BATCH_SIZE)
    }

    /// Hides whatever batch is showing and reveals the next one.
    pub fn show_next(&mut self) -> Option<&[Coord2]> {
        self.hide_current();

        let start = self.next_batch * PEEK_BATCH_SIZE;
        if start >= self.order.len() {
            return None;
        }
        let end = (start + PEEK_BATCH_SIZE).min(self.order.len());
        self.next_batch += 1;

        for &coords in &self.order[start..end] {
            self.visible[coords.to_nd_index()] = true;
        }
        log::trace!("Peek batch {}: {:?}", self.next_batch, &self.order[start..end]);
        self.current = Some(start..end);
        Some(&self.order[start..end])
    }

    pub fn hide_current(&mut self) {
        if let Some(range) = self.current.take() {
            for &coords in &self.order[range] {
                self.visible[coords.to_nd_index()] = false;
            }
        }
    }

    pub fn is_visible(&self, coords: Coord2) -> bool {
        self.visible
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    /// No batch showing and none left to show.
    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.next_batch * PEEK_BATCH_SIZE >= self.order.len()
    }
}
