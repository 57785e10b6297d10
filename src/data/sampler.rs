use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LayerError, Result};

/// Picks which sample of a split comes next.
///
/// Sequential samplers walk the split in listing order and wrap around.
/// Random samplers draw uniformly with replacement, so an epoch is only a
/// nominal notion.
#[derive(Debug, Clone)]
pub struct Sampler {
    len: usize,
    idx: usize,
    rng: Option<StdRng>,
}

impl Sampler {
    /// Starts at the first sample. Fails if `len` is zero.
    pub fn sequential(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(LayerError::EmptySplit);
        }
        Ok(Self {
            len,
            idx: 0,
            rng: None,
        })
    }

    /// Starts at a random sample. Without a seed the generator is seeded
    /// from the OS, so runs are not reproducible. Fails if `len` is zero.
    pub fn random(len: usize, seed: Option<u64>) -> Result<Self> {
        if len == 0 {
            return Err(LayerError::EmptySplit);
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let idx = rng.random_range(0..len);
        Ok(Self {
            len,
            idx,
            rng: Some(rng),
        })
    }

    pub fn current(&self) -> usize {
        self.idx
    }

    pub fn is_random(&self) -> bool {
        self.rng.is_some()
    }

    /// Move to the next sample and return its position.
    pub fn advance(&mut self) -> usize {
        self.idx = match &mut self.rng {
            Some(rng) => rng.random_range(0..self.len),
            None => (self.idx + 1) % self.len,
        };
        self.idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_wraps() {
        let mut s = Sampler::sequential(3).unwrap();
        assert_eq!(s.current(), 0);
        let seen: Vec<usize> = (0..5).map(|_| s.advance()).collect();
        assert_eq!(seen, vec![1, 2, 0, 1, 2]);
        assert!(!s.is_random());
    }

    #[test]
    fn single_sample_split() {
        let mut s = Sampler::sequential(1).unwrap();
        assert_eq!(s.advance(), 0);

        let mut r = Sampler::random(1, None).unwrap();
        assert_eq!(r.current(), 0);
        assert_eq!(r.advance(), 0);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = Sampler::random(50, Some(42)).unwrap();
        let mut b = Sampler::random(50, Some(42)).unwrap();
        assert_eq!(a.current(), b.current());
        for _ in 0..100 {
            assert_eq!(a.advance(), b.advance());
        }
    }

    #[test]
    fn random_stays_in_bounds() {
        let mut s = Sampler::random(7, Some(3)).unwrap();
        assert!(s.is_random());
        for _ in 0..500 {
            assert!(s.advance() < 7);
        }
    }

    #[test]
    fn random_eventually_visits_every_sample() {
        let mut s = Sampler::random(4, Some(11)).unwrap();
        let mut seen = [false; 4];
        seen[s.current()] = true;
        for _ in 0..1000 {
            seen[s.advance()] = true;
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn empty_split_is_error() {
        assert!(matches!(Sampler::sequential(0), Err(LayerError::EmptySplit)));
        assert!(matches!(Sampler::random(0, Some(1)), Err(LayerError::EmptySplit)));
    }
}
