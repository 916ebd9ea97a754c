//! Position within the filtered playlist plus the shuffle flag.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Which way to move through the playlist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// How `next` picks the following entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackOrder {
    Sequential,
    Shuffled,
}

/// Current playlist position and shuffle flag.
///
/// `index` is meaningful only while the playlist is non-empty; otherwise it
/// stays 0 and every move reports `None`.
///
/// Shuffle only changes `next`. `previous` always steps back one entry, in
/// both orders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    index: usize,
    shuffle: bool,
}

impl PlaybackCursor {
    pub fn new(shuffle: bool) -> Self {
        Self { index: 0, shuffle }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    pub fn order(&self) -> PlaybackOrder {
        if self.shuffle {
            PlaybackOrder::Shuffled
        } else {
            PlaybackOrder::Sequential
        }
    }

    /// Back to the first entry; used whenever the playlist is replaced.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Flip shuffle. The position is kept. Returns the new flag.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    /// Move to `index` if it exists in a playlist of `len` entries.
    pub fn jump_to(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Index that follows the current one in a playlist of `len` entries.
    ///
    /// Sequential order wraps after the last entry. Shuffled order draws
    /// uniformly from every other position, so the current entry never repeats
    /// while there is an alternative.
    pub fn next<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Option<usize> {
        match (len, self.order()) {
            (0, _) => None,
            (_, PlaybackOrder::Sequential) => Some((self.index + 1) % len),
            (1, PlaybackOrder::Shuffled) => Some(0),
            (_, PlaybackOrder::Shuffled) => {
                // Exclude by position, not by value: two entries may be identical tracks.
                let mut candidates: Vec<usize> = (0..len).collect();
                if self.index < len {
                    candidates.remove(self.index);
                }
                candidates.choose(rng).copied()
            }
        }
    }

    /// Index before the current one, wrapping to the last entry.
    pub fn previous(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let current = self.index.min(len - 1);
        Some((current + len - 1) % len)
    }

    /// Compute the move in `direction` and apply it.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        len: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let target = match direction {
            Direction::Forward => self.next(len, rng),
            Direction::Backward => self.previous(len),
        }?;
        self.index = target;
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x7a67)
    }

    #[test]
    fn sequential_next_cycles_through_every_index() {
        let mut rng = rng();
        let mut cursor = PlaybackCursor::new(false);
        let visited: Vec<usize> = (0..9)
            .map(|_| cursor.advance(Direction::Forward, 4, &mut rng).unwrap())
            .collect();
        assert_eq!(visited, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn previous_wraps_regardless_of_shuffle() {
        for shuffle in [false, true] {
            let cursor = PlaybackCursor::new(shuffle);
            assert_eq!(cursor.previous(5), Some(4));
        }

        let mut cursor = PlaybackCursor::new(true);
        assert!(cursor.jump_to(3, 5));
        assert_eq!(cursor.previous(5), Some(2));
    }

    #[test]
    fn empty_playlist_has_no_moves() {
        let mut rng = rng();
        for shuffle in [false, true] {
            let mut cursor = PlaybackCursor::new(shuffle);
            assert_eq!(cursor.next(0, &mut rng), None);
            assert_eq!(cursor.previous(0), None);
            assert_eq!(cursor.advance(Direction::Forward, 0, &mut rng), None);
            assert_eq!(cursor.index(), 0);
        }
    }

    #[test]
    fn shuffled_single_entry_stays_on_zero() {
        let mut rng = rng();
        let cursor = PlaybackCursor::new(true);
        for _ in 0..20 {
            assert_eq!(cursor.next(1, &mut rng), Some(0));
        }
    }

    #[test]
    fn shuffled_next_never_repeats_current() {
        let mut rng = rng();
        let mut cursor = PlaybackCursor::new(true);
        for _ in 0..500 {
            let before = cursor.index();
            let after = cursor.advance(Direction::Forward, 3, &mut rng).unwrap();
            assert_ne!(before, after);
            assert!(after < 3);
        }
    }

    #[test]
    fn shuffled_next_is_uniform_over_other_positions() {
        let mut rng = rng();
        let mut cursor = PlaybackCursor::new(true);
        assert!(cursor.jump_to(1, 4));

        let trials = 6000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            counts[cursor.next(4, &mut rng).unwrap()] += 1;
        }

        assert_eq!(counts[1], 0);
        let expected = trials / 3;
        for i in [0, 2, 3] {
            let diff = counts[i].abs_diff(expected);
            assert!(diff < expected / 10, "index {i} drawn {} times", counts[i]);
        }
    }

    #[test]
    fn toggle_shuffle_keeps_index() {
        let mut cursor = PlaybackCursor::new(false);
        assert!(cursor.jump_to(2, 3));
        assert!(cursor.toggle_shuffle());
        assert_eq!(cursor.order(), PlaybackOrder::Shuffled);
        assert_eq!(cursor.index(), 2);
        assert!(!cursor.toggle_shuffle());
        assert_eq!(cursor.order(), PlaybackOrder::Sequential);
    }

    #[test]
    fn jump_to_rejects_out_of_range() {
        let mut cursor = PlaybackCursor::new(false);
        assert!(!cursor.jump_to(3, 3));
        assert_eq!(cursor.index(), 0);
    }
}
