//! Least squares solver for the trend regression.
//!
//! The trend model is linear in its coefficients, so fitting reduces to one
//! (possibly large) least-squares solve:
//!
//! ```text
//! minimize ||y - X β||²
//! ```
//!
//! Ridge penalties are handled by the caller, which appends scaled identity
//! rows to `X` with zero targets before solving.
//!
//! Implementation choice: SVD. The design matrix is tall (observations plus
//! penalty rows over roughly one column per date), frequently rank-deficient
//! without the penalty rows, and we want the solve to degrade gracefully
//! rather than panic on near-collinear columns.

use nalgebra::{DMatrix, DVector};

/// Singular-value cutoffs tried in order; the strictest solve that yields
/// finite coefficients wins.
const SVD_TOLERANCES: [f64; 3] = [1e-10, 1e-8, 1e-6];

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    SVD_TOLERANCES.iter().find_map(|&tol| {
        svd.solve(y, tol)
            .ok()
            .filter(|beta| beta.iter().all(|v| v.is_finite()))
    })
}
