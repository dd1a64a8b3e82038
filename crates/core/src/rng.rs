//! RNG module - deterministic randomness for spawning
//!
//! Each spawned object draws its template and its skin independently and
//! uniformly. A small LCG keeps games reproducible from their seed.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever produce the increment sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniform index into a non-empty collection of `len` items.
    pub fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty collection");
        self.next_range(len as u32) as usize
    }

    /// Current state, usable as a seed to replay from this point.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
