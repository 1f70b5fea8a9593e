//! Third-degree translation interpolants

use nalgebra::Vector3;

use crate::common::TranslationSynthesizer;
use crate::trajectory::polynomial::{Chunk, PiecewisePolynomial, Polynomial};

/// Per-axis cubic matching positions and rates at both ends
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicTranslationInterpolator;

impl CubicTranslationInterpolator {
    /// Coefficients (ascending degree) of the cubic through `(p0, v0)` at
    /// t = 0 and `(p1, v1)` at t = `duration`.
    pub fn cubic_coefficients(p0: f64, p1: f64, v0: f64, v1: f64, duration: f64) -> [f64; 4] {
        let t = duration;
        let t2 = t * t;
        let t3 = t2 * t;
        let dp = p1 - p0;
        let a2 = (3.0 * dp - (2.0 * v0 + v1) * t) / t2;
        let a3 = (-2.0 * dp + (v0 + v1) * t) / t3;
        [p0, v0, a2, a3]
    }
}

impl TranslationSynthesizer for CubicTranslationInterpolator {
    type Path = PiecewisePolynomial;

    fn build(
        &self,
        begin: &Vector3<f64>,
        end: &Vector3<f64>,
        rate_begin: &Vector3<f64>,
        rate_end: &Vector3<f64>,
        duration: f64,
    ) -> PiecewisePolynomial {
        let polynomials = (0..3)
            .map(|i| {
                let c = Self::cubic_coefficients(begin[i], end[i], rate_begin[i], rate_end[i], duration);
                Polynomial::new(c.to_vec())
            })
            .collect();
        PiecewisePolynomial::from_chunk(Chunk::new(duration, polynomials))
    }
}
