//! Price dynamics: binomial lattices and GBM.
//!
//! - [`TreeModel`]: CRR, Shreve and Drift-Adjusted factor derivations
//! - [`TreeParams`]: derived per-step parameters, cacheable by their inputs
//! - [`GbmDynamics`]: real-world GBM used by the path simulator
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::TreeModel;
//!
//! for model in TreeModel::ALL {
//!     let params = model.tree_params(365, 1.0, 0.05, 0.2, 0.08).unwrap();
//!     assert!(params.up > 1.0 && params.down < 1.0);
//! }
//! ```

pub mod gbm;
pub mod lattice;

pub use gbm::GbmDynamics;
pub use lattice::{LatticeFactors, ParseTreeModelError, TreeModel, TreeParams};
