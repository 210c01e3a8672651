//! Deterministic card module
//!
//! All scratch card logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - State changes through explicit transition functions
//! - No rendering or platform dependencies

pub mod config;
pub mod confetti;
pub mod estimator;
pub mod mask;
pub mod reward;
pub mod state;
pub mod surface;

pub use config::{CardVariant, ScratchConfig};
pub use confetti::{Confetti, ConfettiPiece};
pub use estimator::{estimate_progress, samples_to_reveal};
pub use mask::ScratchMask;
pub use reward::RewardCatalog;
pub use state::{CardEvent, CardPhase, SamplePoint, ScratchState, apply_sample, flip, reset};
pub use surface::ScratchSurface;
