// Per-event random number streams built on a PCG-LCG generator
//
// Every event gets its own stream by skipping the base LCG ahead by a fixed
// stride, so the draws for event N do not depend on how many numbers earlier
// events consumed.

use rand::{RngCore, SeedableRng};

/// LCG multiplier
const PRN_MULT: u64 = 6364136223846793005;
/// LCG additive constant
const PRN_ADD: u64 = 1442695040888963407;
/// Distance between consecutive event streams
pub const EVENT_STRIDE: u64 = 152_917;

/// PCG generator (LCG state with an RXS-M-XS output permutation).
///
/// Reference: Melissa E. O'Neill, "PCG: A Family of Simple Fast Space-Efficient
/// Statistically Good Algorithms for Random Number Generation"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventRng {
    state: u64,
}

impl EventRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream for one event, independent of all other events' consumption.
    pub fn for_event(master_seed: u64, event_id: u64) -> Self {
        Self::new(skip_ahead(master_seed, event_id.wrapping_mul(EVENT_STRIDE)))
    }

    /// Uniform f64 in [0, 1)
    #[inline(always)]
    pub fn uniform(&mut self) -> f64 {
        // top 53 bits, so the result can never round up to 1.0
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Advance the stream by `n` draws without generating them.
    pub fn advance(&mut self, n: u64) {
        self.state = skip_ahead(self.state, n);
    }

    #[inline(always)]
    fn step(&mut self) -> u64 {
        self.state = PRN_MULT.wrapping_mul(self.state).wrapping_add(PRN_ADD);
        let word = ((self.state >> ((self.state >> 59) + 5)) ^ self.state)
            .wrapping_mul(12605985483714917081);
        (word >> 43) ^ word
    }
}

/// LCG state after `n` steps from `seed`, in O(log n).
///
/// Composes the affine map `x -> g*x + c` with itself by repeated squaring.
pub fn skip_ahead(seed: u64, mut n: u64) -> u64 {
    let mut g = PRN_MULT;
    let mut c = PRN_ADD;
    let mut g_new: u64 = 1;
    let mut c_new: u64 = 0;
    while n > 0 {
        if n & 1 == 1 {
            g_new = g_new.wrapping_mul(g);
            c_new = c_new.wrapping_mul(g).wrapping_add(c);
        }
        c = c.wrapping_mul(g.wrapping_add(1));
        g = g.wrapping_mul(g);
        n >>= 1;
    }
    g_new.wrapping_mul(seed).wrapping_add(c_new)
}

impl SeedableRng for EventRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}

impl RngCore for EventRng {
    /// High half of the 64-bit output
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    /// Little-endian words; a short final chunk takes the low bytes of a full draw.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let word = self.step().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
