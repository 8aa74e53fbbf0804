use rand::seq::index;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Independent random sub-stream for one ensemble member.
///
/// Deriving each tree's generator from `base_seed + tree_index` keeps
/// parallel construction independent of thread scheduling: the same seed
/// and configuration always produce the same forest.
pub fn sub_stream(base_seed: u64, tree_index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(tree_index))
}

/// `amount` distinct row indices drawn uniformly from `[0, population)`.
/// An `amount` larger than the population is clipped to it, in which case
/// every index is returned (in sampled order).
pub fn sample_without_replacement(
    rng: &mut ChaCha8Rng,
    population: usize,
    amount: usize,
) -> Vec<usize> {
    index::sample(rng, population, amount.min(population)).into_vec()
}
