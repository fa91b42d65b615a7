//! # basket_models (L2: Market and Pricing Models)
//!
//! Random market generation, basket configuration and the Bachelier
//! (normal) pricer used as the analytic reference for simulated baskets.
//!
//! This crate provides:
//! - [`market`]: random volatilities and correlations, truncation
//! - [`basket`]: weights, volatility rescaling and the two-period schedule
//! - [`analytical`]: `bach` / `bach_bkt` closed forms and normal distribution functions
//!
//! ## Usage Examples
//!
//! ```rust
//! use basket_models::analytical::bach;
//! use basket_models::basket::{Basket, BasketSpec};
//! use basket_models::market::MarketGenerator;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let market = MarketGenerator::new(3, 10.0, 30.0, 100.0)
//!     .unwrap()
//!     .generate(&mut rng)
//!     .unwrap();
//! let basket = Basket::configure(&market, BasketSpec::new(3, 105.0, 1.0, 2.0, 20.0), &mut rng)
//!     .unwrap();
//!
//! let spot = basket.basket_value(basket.market().spot0());
//! let price = bach(spot, basket.strike(), basket.basket_vol(), basket.t2() - basket.t1());
//! assert!(price > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for markets, specs and baskets

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod basket;
pub mod market;
