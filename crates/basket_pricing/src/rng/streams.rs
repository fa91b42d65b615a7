//! Independent RNG streams derived from one master seed.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::prng::PricerRng;

/// Stages of the experiment that draw random numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Market volatilities and correlation factors.
    Market,
    /// Basket weights.
    Basket,
    /// Path simulation normals.
    Simulation,
    /// Test-set normals.
    TestSet,
}

impl Stream {
    /// All streams in seed-derivation order.
    pub const ALL: [Stream; 4] = [
        Stream::Market,
        Stream::Basket,
        Stream::Simulation,
        Stream::TestSet,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            Stream::Market => 0,
            Stream::Basket => 1,
            Stream::Simulation => 2,
            Stream::TestSet => 3,
        }
    }
}

/// One [`PricerRng`] per [`Stream`].
///
/// Each stream seed is a function of the master seed alone, so how many
/// values one stage consumes never changes what another stage sees.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::rng::{RngStreams, Stream};
///
/// let mut a = RngStreams::from_master_seed(7);
/// let mut b = RngStreams::from_master_seed(7);
///
/// // Consuming the market stream leaves the simulation stream untouched.
/// a.stream(Stream::Market).gen_normal();
/// assert_eq!(
///     a.stream(Stream::Simulation).gen_normal(),
///     b.stream(Stream::Simulation).gen_normal()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RngStreams {
    master_seed: u64,
    streams: [PricerRng; 4],
}

impl RngStreams {
    /// Derives all stream seeds from `master_seed`.
    pub fn from_master_seed(master_seed: u64) -> Self {
        let mut master = StdRng::seed_from_u64(master_seed);
        let streams = Stream::ALL.map(|_| PricerRng::from_seed(master.next_u64()));
        Self {
            master_seed,
            streams,
        }
    }

    /// Returns the master seed.
    #[inline]
    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Seed of an individual stream.
    #[inline]
    pub fn seed_of(&self, stream: Stream) -> u64 {
        self.streams[stream.index()].seed()
    }

    /// Mutable access to one stream.
    #[inline]
    pub fn stream(&mut self, stream: Stream) -> &mut PricerRng {
        &mut self.streams[stream.index()]
    }
}
