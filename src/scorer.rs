//! FIRESIGHT - Risk Scorer
//!
//! Quantum-inspired nonlinear feature transform. The color vector drives
//! a fixed sequence of rotations and controlled operations over a 7-wire
//! (128-amplitude) state vector, and the score is the Z expectation on
//! the last wire. Pure arithmetic: no sampling, no shared state, and the
//! same input always produces the same score.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::features::{ColorVector, COLOR_BINS};

/// Number of simulated wires
const WIRES: usize = 7;

/// State vector dimension (2^WIRES amplitudes)
const DIM: usize = 1 << WIRES;

/// Stateless risk scorer
pub struct RiskScorer;

impl RiskScorer {
    /// Map a color vector to a risk score in [-1, 1].
    ///
    /// Gate order is fixed and part of the contract: downstream
    /// classification and audit comparability rely on reproducibility.
    pub fn score(color: &ColorVector) -> f64 {
        let mut state = StateVector::zero_basis();

        for i in 0..5 {
            let angle = color.0[i % COLOR_BINS] * PI;
            state.ry(i, angle);
            state.rx((i + 1) % WIRES, angle);
        }

        state.toffoli(0, 1, 6);
        state.cz(2, 3);
        state.cnot(4, 5);
        state.hadamard(6);

        state.expval_z(6)
    }
}

/// Complex amplitudes stored as paired real/imaginary arrays
struct StateVector {
    re: [f64; DIM],
    im: [f64; DIM],
}

impl StateVector {
    /// All-zero basis state |0000000>
    fn zero_basis() -> Self {
        let mut re = [0.0; DIM];
        re[0] = 1.0;
        Self { re, im: [0.0; DIM] }
    }

    /// Apply a 2x2 gate to every amplitude pair split by `wire`.
    /// The closure receives (a0, a1) as (re, im) tuples and returns the
    /// transformed pair.
    fn apply_pairwise<F>(&mut self, wire: usize, gate: F)
    where
        F: Fn((f64, f64), (f64, f64)) -> ((f64, f64), (f64, f64)),
    {
        let mask = 1 << wire;
        for idx in 0..DIM {
            if idx & mask != 0 {
                continue;
            }
            let pair = idx | mask;

            let a0 = (self.re[idx], self.im[idx]);
            let a1 = (self.re[pair], self.im[pair]);
            let (b0, b1) = gate(a0, a1);

            self.re[idx] = b0.0;
            self.im[idx] = b0.1;
            self.re[pair] = b1.0;
            self.im[pair] = b1.1;
        }
    }

    /// Rotation about Y: [[cos, -sin], [sin, cos]] on half-angles
    fn ry(&mut self, wire: usize, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        self.apply_pairwise(wire, |a0, a1| {
            (
                (c * a0.0 - s * a1.0, c * a0.1 - s * a1.1),
                (s * a0.0 + c * a1.0, s * a0.1 + c * a1.1),
            )
        });
    }

    /// Rotation about X: [[cos, -i sin], [-i sin, cos]] on half-angles
    fn rx(&mut self, wire: usize, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        self.apply_pairwise(wire, |a0, a1| {
            (
                (c * a0.0 + s * a1.1, c * a0.1 - s * a1.0),
                (c * a1.0 + s * a0.1, c * a1.1 - s * a0.0),
            )
        });
    }

    /// Equal-superposition mixing on one wire
    fn hadamard(&mut self, wire: usize) {
        self.apply_pairwise(wire, |a0, a1| {
            (
                (
                    FRAC_1_SQRT_2 * (a0.0 + a1.0),
                    FRAC_1_SQRT_2 * (a0.1 + a1.1),
                ),
                (
                    FRAC_1_SQRT_2 * (a0.0 - a1.0),
                    FRAC_1_SQRT_2 * (a0.1 - a1.1),
                ),
            )
        });
    }

    /// Controlled flip of `target` when `control` is set
    fn cnot(&mut self, control: usize, target: usize) {
        let cmask = 1 << control;
        let tmask = 1 << target;
        for idx in 0..DIM {
            if idx & cmask != 0 && idx & tmask == 0 {
                self.re.swap(idx, idx | tmask);
                self.im.swap(idx, idx | tmask);
            }
        }
    }

    /// Doubly-controlled flip of `target` when both controls are set
    fn toffoli(&mut self, c1: usize, c2: usize, target: usize) {
        let cmask = (1 << c1) | (1 << c2);
        let tmask = 1 << target;
        for idx in 0..DIM {
            if idx & cmask == cmask && idx & tmask == 0 {
                self.re.swap(idx, idx | tmask);
                self.im.swap(idx, idx | tmask);
            }
        }
    }

    /// Phase flip on basis states with both wires set
    fn cz(&mut self, a: usize, b: usize) {
        let mask = (1 << a) | (1 << b);
        for idx in 0..DIM {
            if idx & mask == mask {
                self.re[idx] = -self.re[idx];
                self.im[idx] = -self.im[idx];
            }
        }
    }

    /// Z expectation on one wire: sum of probabilities signed by the
    /// wire's bit (+1 when clear, -1 when set)
    fn expval_z(&self, wire: usize) -> f64 {
        let mask = 1 << wire;
        let mut expval = 0.0;
        for idx in 0..DIM {
            let prob = self.re[idx] * self.re[idx] + self.im[idx] * self.im[idx];
            expval += if idx & mask == 0 { prob } else { -prob };
        }
        expval
    }

    #[cfg(test)]
    fn norm(&self) -> f64 {
        (0..DIM)
            .map(|i| self.re[i] * self.re[i] + self.im[i] * self.im[i])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(fill: f64) -> ColorVector {
        ColorVector([fill; COLOR_BINS])
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        // All rotations are identity, no controls fire, so the last
        // wire ends in an equal superposition: <Z> = 0
        let score = RiskScorer::score(&vector(0.0));
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn test_score_bounded() {
        for fill in [0.0, 0.04, 0.1, 0.5, 1.0] {
            let score = RiskScorer::score(&vector(fill));
            assert!((-1.0..=1.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_deterministic_across_instances() {
        let mut color = ColorVector([0.0; COLOR_BINS]);
        for (i, bin) in color.0.iter_mut().enumerate() {
            *bin = (i as f64 + 1.0) / 400.0;
        }

        let a = RiskScorer::score(&color);
        let b = RiskScorer::score(&color);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_input_sensitivity() {
        let a = RiskScorer::score(&vector(0.1));
        let b = RiskScorer::score(&vector(0.4));
        assert_ne!(a, b);
    }

    #[test]
    fn test_gates_preserve_norm() {
        let mut state = StateVector::zero_basis();
        state.ry(0, 1.23);
        state.rx(1, 0.77);
        state.toffoli(0, 1, 6);
        state.cz(2, 3);
        state.cnot(4, 5);
        state.hadamard(6);
        assert!((state.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ry_pi_flips_wire() {
        let mut state = StateVector::zero_basis();
        state.ry(3, PI);
        assert!((state.expval_z(3) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cnot_propagates_flip() {
        let mut state = StateVector::zero_basis();
        state.ry(4, PI);
        state.cnot(4, 5);
        assert!((state.expval_z(5) + 1.0).abs() < 1e-12);
    }
}
