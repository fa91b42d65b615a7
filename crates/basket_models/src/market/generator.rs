//! Random market generation.

use basket_core::types::{ensure_positive, SimulationError, SimulationResult};
use rand::Rng;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::correlation::random_correlation;
use super::market::Market;

/// Generator of random markets with volatilities drawn from `[vol_low, vol_high]`.
///
/// # Examples
/// ```
/// use basket_models::market::MarketGenerator;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let generator = MarketGenerator::new(5, 10.0, 30.0, 100.0).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let market = generator.generate(&mut rng).unwrap();
///
/// assert_eq!(market.dim(), 5);
/// assert!(market.sigma().iter().all(|&s| (10.0..=30.0).contains(&s)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarketGenerator {
    n_assets: usize,
    vol_low: f64,
    vol_high: f64,
    spot: f64,
}

impl MarketGenerator {
    /// Creates a validated generator.
    ///
    /// # Errors
    /// `InvalidParameter` if `n_assets == 0`, if `vol_low` is not finite and
    /// positive, if `vol_high < vol_low`, or if `spot` is not finite and
    /// positive.
    pub fn new(n_assets: usize, vol_low: f64, vol_high: f64, spot: f64) -> SimulationResult<Self> {
        if n_assets == 0 {
            return Err(SimulationError::invalid_parameter(
                "n_assets",
                "must be at least 1",
            ));
        }
        ensure_positive("vol_low", vol_low)?;
        ensure_positive("vol_high", vol_high)?;
        if vol_high < vol_low {
            return Err(SimulationError::invalid_parameter(
                "vol_high",
                format!("must be >= vol_low ({}), got {}", vol_low, vol_high),
            ));
        }
        ensure_positive("spot", spot)?;

        Ok(Self {
            n_assets,
            vol_low,
            vol_high,
            spot,
        })
    }

    /// Number of assets generated.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Lower bound of the volatility range.
    #[inline]
    pub fn vol_low(&self) -> f64 {
        self.vol_low
    }

    /// Upper bound of the volatility range.
    #[inline]
    pub fn vol_high(&self) -> f64 {
        self.vol_high
    }

    /// Common initial spot level.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Draws a market.
    ///
    /// Volatilities are drawn first, then the correlation factors, so a given
    /// RNG state always maps to the same market.
    ///
    /// # Errors
    /// `DegenerateMatrix` if the random Gram matrix has a non-positive
    /// diagonal entry.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationResult<Market> {
        let n = self.n_assets;
        let width = self.vol_high - self.vol_low;
        let sigma: Vec<f64> = (0..n)
            .map(|_| self.vol_low + width * rng.gen::<f64>())
            .collect();
        let correl = random_correlation(n, rng)?;
        let spot0 = vec![self.spot; n];

        debug!(n_assets = n, vol_low = self.vol_low, vol_high = self.vol_high, "generated market");
        Market::from_parts(spot0, sigma, correl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_validates() {
        assert!(MarketGenerator::new(3, 10.0, 20.0, 100.0).is_ok());
        assert!(MarketGenerator::new(3, 10.0, 10.0, 100.0).is_ok());
        assert!(matches!(
            MarketGenerator::new(0, 10.0, 20.0, 100.0),
            Err(SimulationError::InvalidParameter { name: "n_assets", .. })
        ));
        assert!(MarketGenerator::new(3, 0.0, 20.0, 100.0).is_err());
        assert!(MarketGenerator::new(3, 20.0, 10.0, 100.0).is_err());
        assert!(MarketGenerator::new(3, 10.0, f64::INFINITY, 100.0).is_err());
        assert!(MarketGenerator::new(3, 10.0, 20.0, 0.0).is_err());
    }

    #[test]
    fn test_generate_shapes_and_ranges() {
        let generator = MarketGenerator::new(8, 10.0, 30.0, 100.0).unwrap();
        let market = generator.generate(&mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(market.dim(), 8);
        assert_eq!(market.spot0(), &[100.0; 8]);
        assert!(market.sigma().iter().all(|&s| (10.0..30.0).contains(&s)));
        assert_eq!(market.correl().shape(), (8, 8));
        assert_eq!(market.covar().shape(), (8, 8));
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let generator = MarketGenerator::new(4, 5.0, 25.0, 50.0).unwrap();
        let a = generator.generate(&mut StdRng::seed_from_u64(11)).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(11)).unwrap();
        let c = generator.generate(&mut StdRng::seed_from_u64(12)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_degenerate_vol_range_gives_constant_vol() {
        let generator = MarketGenerator::new(3, 15.0, 15.0, 100.0).unwrap();
        let market = generator.generate(&mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(market.sigma(), &[15.0; 3]);
    }
}
