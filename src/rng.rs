//! Frame-to-frame randomness for the particle animations.

/// Xorshift32 PRNG, plenty for visual effects and deterministic from its
/// seed so animation tests are reproducible.
#[derive(Clone, Debug)]
pub struct FrameRng {
    state: u32,
}

impl FrameRng {
    /// Create a new generator from `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        // Avoid zero state which would produce all zeros.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next uniform byte.
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// True with probability `threshold / 256`.
    pub fn chance(&mut self, threshold: u8) -> bool {
        self.next_u8() < threshold
    }

    /// Uniform value in `lo..hi`.
    pub fn range_u8(&mut self, lo: u8, hi: u8) -> u8 {
        debug_assert!(lo < hi);
        lo + self.next_u8() % (hi - lo)
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u32() as usize) % len
    }
}
