//! Core types shared by every view: planet identifiers, orbit math, visual RNG.

pub mod orbit;
pub mod planet;
pub mod random;

pub use planet::{PLANET_ORDER, PlanetId};
pub use random::VisualRng;
