//! Benchmark utilities.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric value of the specified length.
pub fn random_value(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` keys drawn at random from `key{0..space}`.
pub fn random_keys(count: usize, space: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| format!("key{}", rng.gen_range(0..space.max(1))))
        .collect()
}
