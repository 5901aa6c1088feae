pub mod api;
pub mod bits;
pub mod dual;
pub mod error;
pub mod expm;
pub mod float;
pub mod linalg;
pub mod matrix;
pub mod norm;
pub mod pade;
pub mod scalar;
mod traits;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "nalgebra")]
pub mod nalgebra_support;

pub use api::{expm_frechet, expm_jacobian, expm_second_directional, SecondOrder};
pub use dual::Dual;
pub use error::{ExpmError, Result};
pub use expm::{
    expm, expm_in_place, expm_into, try_expm, try_expm_assign, try_expm_in_place, try_expm_into,
};
pub use float::Float;
pub use matrix::{PingPong, SquareMatrix, MAX_DIM};
pub use norm::opnorm1;
pub use scalar::Scalar;

/// Type alias for first-order duals over `f64` with `N` partials.
pub type Dual64<const N: usize> = Dual<f64, N>;
/// Type alias for second-order duals: `M` outer lanes over `N` inner lanes.
pub type DDual64<const N: usize, const M: usize> = Dual<Dual<f64, N>, M>;
