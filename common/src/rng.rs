//! xorshift32 pseudo-random generator for spawners and effects.

/// Seed used when none (or zero) is supplied.
pub const DEFAULT_SEED: u32 = 0xA2C2_B3D5;

/// xorshift32 state. Never zero.
#[derive(Clone, Debug)]
pub struct Rng(u32);

impl Rng {
    /// A zero seed would lock the generator at zero and is replaced.
    pub const fn new(seed: u32) -> Self {
        Self(if seed == 0 { DEFAULT_SEED } else { seed })
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `lo..=hi`. Returns `lo` when the range is empty.
    pub fn range(
        &mut self,
        lo: i32,
        hi: i32,
    ) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as u32 + 1;
        lo + (self.next_u32() % span) as i32
    }

    pub fn coin(&mut self) -> bool { self.next_u32() & 1 != 0 }
}

impl Default for Rng {
    fn default() -> Self { Self::new(DEFAULT_SEED) }
}
