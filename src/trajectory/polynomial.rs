//! Piecewise polynomial trajectories and their textual interchange format
//!
//! The text form lists each chunk as a duration line, a dimension line and
//! one line of space-separated coefficients (ascending degree) per
//! dimension:
//!
//! ```text
//! 0.5
//! 3
//! 0 0 1.2 -1.6
//! 1 0 0 0
//! 0.25 0 0 0
//! ```
//!
//! Several chunks are simply joined by a newline.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use nalgebra::Vector3;

use crate::common::{PlanningError, PlanningResult, TranslationPath};

/// Polynomial with coefficients in ascending degree order
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    pub fn derivative(&self, t: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, &c)| acc * t + i as f64 * c)
    }
}

/// One time interval of a piecewise polynomial, one polynomial per axis
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub duration: f64,
    pub polynomials: Vec<Polynomial>,
}

impl Chunk {
    pub fn new(duration: f64, polynomials: Vec<Polynomial>) -> Self {
        Chunk { duration, polynomials }
    }

    pub fn dimension(&self) -> usize {
        self.polynomials.len()
    }

    pub fn evaluate(&self, t: f64) -> Vec<f64> {
        self.polynomials.iter().map(|p| p.evaluate(t)).collect()
    }

    pub fn derivative(&self, t: f64) -> Vec<f64> {
        self.polynomials.iter().map(|p| p.derivative(t)).collect()
    }
}

/// Sequence of chunks played back to back
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewisePolynomial {
    chunks: Vec<Chunk>,
}

impl PiecewisePolynomial {
    pub fn new(chunks: Vec<Chunk>) -> PlanningResult<Self> {
        let first = chunks.first().ok_or_else(|| {
            PlanningError::TrajectoryFormat("trajectory has no chunks".to_string())
        })?;
        let dimension = first.dimension();
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.dimension() != dimension {
                return Err(PlanningError::TrajectoryFormat(format!(
                    "chunk {} has dimension {}, expected {}",
                    i,
                    chunk.dimension(),
                    dimension
                )));
            }
            if !(chunk.duration >= 0.0) {
                return Err(PlanningError::TrajectoryFormat(format!(
                    "chunk {} has invalid duration {}",
                    i, chunk.duration
                )));
            }
        }
        Ok(PiecewisePolynomial { chunks })
    }

    pub fn from_chunk(chunk: Chunk) -> Self {
        PiecewisePolynomial { chunks: vec![chunk] }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn dimension(&self) -> usize {
        self.chunks[0].dimension()
    }

    pub fn duration(&self) -> f64 {
        self.chunks.iter().map(|c| c.duration).sum()
    }

    /// Append `other` after the end of this trajectory
    pub fn concatenate(&mut self, other: &PiecewisePolynomial) -> PlanningResult<()> {
        if other.dimension() != self.dimension() {
            return Err(PlanningError::TrajectoryFormat(format!(
                "cannot concatenate dimension {} onto dimension {}",
                other.dimension(),
                self.dimension()
            )));
        }
        self.chunks.extend(other.chunks.iter().cloned());
        Ok(())
    }

    /// Chunk index and local time for a global time, clamped to the domain
    fn find_chunk(&self, t: f64) -> (usize, f64) {
        let mut remaining = t.max(0.0);
        for (i, chunk) in self.chunks.iter().enumerate() {
            if remaining <= chunk.duration {
                return (i, remaining);
            }
            remaining -= chunk.duration;
        }
        let last = self.chunks.len() - 1;
        (last, self.chunks[last].duration)
    }

    pub fn evaluate(&self, t: f64) -> Vec<f64> {
        let (i, local) = self.find_chunk(t);
        self.chunks[i].evaluate(local)
    }

    pub fn derivative(&self, t: f64) -> Vec<f64> {
        let (i, local) = self.find_chunk(t);
        self.chunks[i].derivative(local)
    }
}

impl TranslationPath for PiecewisePolynomial {
    fn duration(&self) -> f64 {
        PiecewisePolynomial::duration(self)
    }

    fn evaluate(&self, t: f64) -> Vector3<f64> {
        let values = PiecewisePolynomial::evaluate(self, t);
        Vector3::from_fn(|i, _| values.get(i).copied().unwrap_or(0.0))
    }
}

impl fmt::Display for PiecewisePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.chunks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", chunk.duration)?;
            write!(f, "{}", chunk.dimension())?;
            for poly in &chunk.polynomials {
                write!(f, "\n{}", poly.coefficients.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

impl FromStr for PiecewisePolynomial {
    type Err = PlanningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut chunks = Vec::new();

        while let Some(duration_line) = lines.next() {
            let duration: f64 = duration_line.parse().map_err(|_| {
                PlanningError::TrajectoryFormat(format!("invalid duration '{}'", duration_line))
            })?;
            let dimension_line = lines.next().ok_or_else(|| {
                PlanningError::TrajectoryFormat("missing dimension line".to_string())
            })?;
            let dimension: usize = dimension_line.parse().map_err(|_| {
                PlanningError::TrajectoryFormat(format!("invalid dimension '{}'", dimension_line))
            })?;

            let mut polynomials = Vec::with_capacity(dimension);
            for axis in 0..dimension {
                let line = lines.next().ok_or_else(|| {
                    PlanningError::TrajectoryFormat(format!(
                        "missing coefficients for axis {}",
                        axis
                    ))
                })?;
                let coefficients = line
                    .split_whitespace()
                    .map(|c| {
                        c.parse::<f64>().map_err(|_| {
                            PlanningError::TrajectoryFormat(format!("invalid coefficient '{}'", c))
                        })
                    })
                    .collect::<PlanningResult<Vec<f64>>>()?;
                polynomials.push(Polynomial::new(coefficients));
            }
            chunks.push(Chunk::new(duration, polynomials));
        }

        PiecewisePolynomial::new(chunks)
    }
}
