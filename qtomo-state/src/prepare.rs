//! Ground-truth state preparation
//!
//! Three state families are supported as tomography targets:
//! - **GHZ**: (|0…0⟩ + |1…1⟩)/√2, maximal multi-qubit entanglement
//! - **W**: equal superposition of the n single-excitation basis states
//! - **Random**: Haar-random pure state on the unit sphere
//!
//! Only the Random family consumes the random source; GHZ and W are
//! deterministic in the qubit count.

use crate::error::{Result, StateError};
use crate::pure_state::PureState;
use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt;

/// Closed set of supported state families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFamily {
    /// GHZ state: (|0…0⟩ + |1…1⟩)/√2
    Ghz,
    /// W state: single excitations in equal superposition
    W,
    /// Haar-random pure state
    Random,
}

impl StateFamily {
    /// Parse a family from its string label
    ///
    /// Accepts the labels used by dataset tooling ("ghz", "w", "random"),
    /// case-insensitively.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.to_ascii_lowercase().as_str() {
            "ghz" => Ok(StateFamily::Ghz),
            "w" => Ok(StateFamily::W),
            "random" => Ok(StateFamily::Random),
            _ => Err(StateError::InvalidVariant {
                label: label.to_string(),
            }),
        }
    }

    /// The canonical label for this family
    pub fn label(self) -> &'static str {
        match self {
            StateFamily::Ghz => "ghz",
            StateFamily::W => "w",
            StateFamily::Random => "random",
        }
    }
}

impl fmt::Display for StateFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Prepare a unit-norm pure state of the requested family
///
/// # Arguments
/// * `family` - State family to prepare
/// * `num_qubits` - Number of qubits (must be ≥ 1)
/// * `rng` - Random source, consumed only for `StateFamily::Random`
///
/// # Errors
/// Returns `StateError::InvalidDimension` when `num_qubits < 1`.
pub fn prepare<R: Rng + ?Sized>(
    family: StateFamily,
    num_qubits: usize,
    rng: &mut R,
) -> Result<PureState> {
    if num_qubits < 1 {
        return Err(StateError::InvalidDimension { num_qubits });
    }

    match family {
        StateFamily::Ghz => prepare_ghz(num_qubits),
        StateFamily::W => prepare_w(num_qubits),
        StateFamily::Random => prepare_random(num_qubits, rng),
    }
}

/// GHZ state: equal superposition of all-zeros and all-ones
fn prepare_ghz(num_qubits: usize) -> Result<PureState> {
    let dimension = 1usize << num_qubits;
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];

    let amp = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
    amplitudes[0] = amp;
    amplitudes[dimension - 1] = amp;

    PureState::from_amplitudes(num_qubits, &amplitudes)
}

/// W state: equal superposition of the n single-excitation basis states
fn prepare_w(num_qubits: usize) -> Result<PureState> {
    let dimension = 1usize << num_qubits;
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); dimension];

    let amp = Complex64::new(1.0 / (num_qubits as f64).sqrt(), 0.0);
    for qubit in 0..num_qubits {
        // Qubit 0 maps to the most significant bit of the index
        let index = 1usize << (num_qubits - 1 - qubit);
        amplitudes[index] = amp;
    }

    PureState::from_amplitudes(num_qubits, &amplitudes)
}

/// Haar-random pure state
///
/// Each amplitude gets independent standard-normal real and imaginary
/// parts; normalizing the resulting vector yields the uniform (Haar)
/// distribution on the unit sphere.
fn prepare_random<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> Result<PureState> {
    let dimension = 1usize << num_qubits;
    let mut amplitudes = Vec::with_capacity(dimension);

    for _ in 0..dimension {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        amplitudes.push(Complex64::new(re, im));
    }

    let mut state = PureState::from_amplitudes(num_qubits, &amplitudes)?;
    state.normalize();
    Ok(state)
}
