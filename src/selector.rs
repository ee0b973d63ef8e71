use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::names::NameList;

/// Remembers the last index handed out so it is not repeated immediately
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub last_index: Option<usize>,
}

/// Pick a random index into `list`, never the same as the previous pick
/// unless the list has a single entry. Returns `None` for an empty list.
pub fn pick<R: Rng>(
    list: &NameList,
    state: &mut SelectionState,
    rng: &mut R,
) -> Option<usize> {
    let index = match list.len() {
        0 => return None,
        1 => 0,
        len => loop {
            let draw = rng.gen_range(0..len);
            if state.last_index != Some(draw) {
                break draw;
            }
        },
    };

    state.last_index = Some(index);
    Some(index)
}

/// Selection state plus the random source it draws from
pub struct Selector {
    state: SelectionState,
    rng: SmallRng,
}

impl Selector {
    /// Seed from OS entropy, or from `seed` when reproducible picks are wanted
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            state: SelectionState::default(),
            rng: seeded_rng(seed),
        }
    }

    /// Swap the random source, keeping the last pick so it still is not repeated
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = seeded_rng(seed);
    }

    pub fn pick(&mut self, list: &NameList) -> Option<usize> {
        pick(list, &mut self.state, &mut self.rng)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.state.last_index
    }

    /// Forget the previous pick, e.g. after the name list was replaced
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
    }
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => {
            log::info!("Using fixed selection seed {}", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> NameList {
        (0..n).map(|i| format!("Name {}", i)).collect()
    }

    #[test]
    fn test_no_immediate_repeat() {
        for n in [2, 3, 10, 57] {
            let list = list_of(n);
            let mut state = SelectionState::default();
            let mut rng = SmallRng::seed_from_u64(n as u64);

            let mut previous = None;
            for _ in 0..1000 {
                let index = pick(&list, &mut state, &mut rng).unwrap();
                assert!(index < n);
                assert_ne!(Some(index), previous);
                assert_eq!(state.last_index, Some(index));
                previous = Some(index);
            }
        }
    }

    #[test]
    fn test_single_entry_always_zero() {
        let list = list_of(1);
        let mut state = SelectionState {
            last_index: Some(4),
        };
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..100 {
            assert_eq!(pick(&list, &mut state, &mut rng), Some(0));
            assert_eq!(state.last_index, Some(0));
        }
    }

    #[test]
    fn test_empty_list_picks_nothing() {
        let list = NameList::default();
        let mut state = SelectionState {
            last_index: Some(2),
        };
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(pick(&list, &mut state, &mut rng), None);
        assert_eq!(state.last_index, Some(2));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let list = list_of(12);
        let mut a = Selector::new(Some(42));
        let mut b = Selector::new(Some(42));

        let seq_a: Vec<_> = (0..200).map(|_| a.pick(&list)).collect();
        let seq_b: Vec<_> = (0..200).map(|_| b.pick(&list)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_two_entries_alternate() {
        let list = list_of(2);
        let mut selector = Selector::new(Some(3));
        let first = selector.pick(&list).unwrap();
        for i in 1..50 {
            let expected = if i % 2 == 0 { first } else { 1 - first };
            assert_eq!(selector.pick(&list), Some(expected));
        }
    }

    #[test]
    fn test_every_index_reachable() {
        let list = list_of(5);
        let mut selector = Selector::new(Some(9));
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[selector.pick(&list).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_reset_clears_last_index() {
        let list = list_of(3);
        let mut selector = Selector::new(Some(5));
        selector.pick(&list);
        assert!(selector.last_index().is_some());
        selector.reset();
        assert_eq!(selector.last_index(), None);
    }

    #[test]
    fn test_reseed_keeps_last_index() {
        let list = list_of(2);
        for seed in 0..50 {
            let mut selector = Selector::new(Some(1000));
            let first = selector.pick(&list);
            selector.reseed(Some(seed));
            assert_eq!(selector.last_index(), first);
            assert_ne!(selector.pick(&list), first);
        }
    }
}
