use std::ops::RangeInclusive;

use rand::Rng;

/// Picks one element of `domain` uniformly at random.
///
/// Returns `None` for an empty domain. Any [`Rng`] can drive the draw, so a
/// seeded `StdRng` makes the result reproducible.
pub fn choose<'a, T, R>(rng: &mut R, domain: &'a [T]) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if domain.is_empty() {
        return None;
    }
    domain.get(rng.gen_range(0..domain.len()))
}

/// Draws a record count uniformly from `range`, both bounds inclusive.
pub fn count_in<R>(rng: &mut R, range: RangeInclusive<usize>) -> usize
where
    R: Rng + ?Sized,
{
    if range.is_empty() {
        return 0;
    }
    rng.gen_range(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn choose_returns_none_for_empty_domain() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
    }

    #[test]
    fn choose_only_returns_members_and_covers_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let domain = ["a", "b", "c"];
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = choose(&mut rng, &domain).expect("non-empty domain");
            let idx = domain.iter().position(|v| v == picked).expect("member");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let domain: Vec<u32> = (0..100).collect();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| *choose(&mut rng, &domain).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn count_in_respects_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut min_seen = usize::MAX;
        let mut max_seen = 0;
        for _ in 0..500 {
            let count = count_in(&mut rng, 2..=5);
            assert!((2..=5).contains(&count));
            min_seen = min_seen.min(count);
            max_seen = max_seen.max(count);
        }
        assert_eq!((min_seen, max_seen), (2, 5));
    }

    #[test]
    fn count_in_empty_range_is_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        #[allow(clippy::reversed_empty_ranges)]
        let count = count_in(&mut rng, 5..=2);
        assert_eq!(count, 0);
    }
}
