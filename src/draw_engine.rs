use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::entities::DrawCount;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("population is empty")]
pub struct EmptyPopulation;

/// Draws `min(count, population.len())` distinct elements in random order.
pub fn draw<T, R>(population: &[T], count: DrawCount, rng: &mut R) -> Result<Vec<T>, EmptyPopulation>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if population.is_empty() {
        return Err(EmptyPopulation);
    }

    let mut shuffled = population.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count.value());
    Ok(shuffled)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn count(n: i64) -> DrawCount {
        DrawCount::try_from(n).unwrap()
    }

    #[test]
    fn test_length_is_min_of_count_and_population() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=25usize {
            let population = (0..n).collect::<Vec<_>>();
            for k in 1..=20i64 {
                let drawn = draw(&population, count(k), &mut rng).unwrap();
                assert_eq!(drawn.len(), n.min(k as usize));

                let distinct = drawn.iter().collect::<HashSet<_>>();
                assert_eq!(distinct.len(), drawn.len());
                assert!(drawn.iter().all(|x| population.contains(x)));
            }
        }
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let population: Vec<u32> = Vec::new();
        assert_eq!(draw(&population, count(5), &mut rng), Err(EmptyPopulation));
    }

    #[test]
    fn test_count_above_population_returns_everything_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = vec!["煮物", "黒豆", "田作り"];
        let mut drawn = draw(&population, count(20), &mut rng).unwrap();
        drawn.sort();
        let mut expected = population.clone();
        expected.sort();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_every_element_can_come_first() {
        let mut rng = StdRng::seed_from_u64(42);
        let population = vec![0, 1, 2, 3];
        let firsts = (0..200)
            .map(|_| draw(&population, count(1), &mut rng).unwrap()[0])
            .collect::<HashSet<_>>();
        assert_eq!(firsts.len(), population.len());
    }
}
