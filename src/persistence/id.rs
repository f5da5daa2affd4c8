//! Task id generation
//!
//! Ids are the creation time in base 36 followed by random base-36
//! characters. Collisions are possible in principle and not handled.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::RANDOM_ID_CHARS;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces task ids
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: Pcg32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic generator for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// New id for a task created at `millis` since the Unix epoch
    pub fn generate(&mut self, millis: i64) -> String {
        let mut id = to_base36(millis.max(0) as u64);
        for _ in 0..RANDOM_ID_CHARS {
            let idx = self.rng.random_range(0..BASE36.len());
            id.push(BASE36[idx] as char);
        }
        id
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
