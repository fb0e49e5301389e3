//! Cumulative-distribution sampler shared by every weighted draw in the engine.
//!
//! Driver status, vehicle type and preferred vehicle type all go through
//! [`WeightedSampler`] so they share the same distributional semantics.

use rand::Rng;

#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T: Clone> WeightedSampler<T> {
    /// Build from `(item, weight)` pairs. Non-positive and non-finite weights
    /// contribute nothing, so those items are never drawn.
    pub fn new(entries: &[(T, f64)]) -> Self {
        let mut items = Vec::with_capacity(entries.len());
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut total = 0.0;
        for (item, weight) in entries {
            let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
            total += weight;
            items.push(item.clone());
            cumulative.push(total);
        }
        Self { items, cumulative }
    }

    /// Equal weight for every item.
    pub fn uniform(items: &[T]) -> Self {
        let entries: Vec<(T, f64)> = items.iter().cloned().map(|item| (item, 1.0)).collect();
        Self::new(&entries)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Draw one item, or `None` when the sampler is empty or all weights are zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        let total = self.total_weight();
        if self.items.is_empty() || total <= 0.0 {
            return None;
        }
        let r: f64 = rng.gen_range(0.0..total);
        let idx = self
            .cumulative
            .partition_point(|&w| w <= r)
            .min(self.items.len() - 1);
        Some(self.items[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_sampler_returns_none() {
        let sampler: WeightedSampler<u8> = WeightedSampler::new(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sampler.sample(&mut rng).is_none());
    }

    #[test]
    fn zero_weight_items_are_never_drawn() {
        let sampler = WeightedSampler::new(&[('a', 0.0), ('b', 1.0), ('c', 0.0)]);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            assert_eq!(sampler.sample(&mut rng), Some('b'));
        }
    }

    #[test]
    fn draw_frequencies_follow_weights() {
        let sampler = WeightedSampler::new(&[("hi", 0.6), ("mid", 0.3), ("lo", 0.1)]);
        let mut rng = StdRng::seed_from_u64(3);
        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match sampler.sample(&mut rng) {
                Some("hi") => counts[0] += 1,
                Some("mid") => counts[1] += 1,
                Some("lo") => counts[2] += 1,
                other => panic!("unexpected draw {other:?}"),
            }
        }
        let share = |c: usize| c as f64 / n as f64;
        assert!((share(counts[0]) - 0.6).abs() < 0.03);
        assert!((share(counts[1]) - 0.3).abs() < 0.03);
        assert!((share(counts[2]) - 0.1).abs() < 0.02);
    }
}
