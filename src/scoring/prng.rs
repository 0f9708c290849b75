/// Multiplier applied to a project id when deriving its seed.
const SEED_MULTIPLIER: i128 = 31_415_927;

/// Seeds are reduced modulo this prime (2^31 - 1).
const SEED_MODULUS: i128 = 2_147_483_647;

/// Derive the PRNG seed for a project id: `|id * 31415927| mod 2147483647`.
///
/// Computed in 128-bit arithmetic so every `i64` id, including negative ids
/// and `i64::MIN`, yields a valid seed.
pub fn seed_from_id(id: i64) -> u32 {
    let product = (id as i128 * SEED_MULTIPLIER).abs();
    (product % SEED_MODULUS) as u32
}

/// Mulberry32 generator.
///
/// The state is an explicit value so each scoring call owns its own
/// sequence and concurrent calls never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_project_id(id: i64) -> Self {
        Self::new(seed_from_id(id))
    }

    /// Advance the state and return the next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value scaled to `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
