//! Default trajectory synthesizers for rotation and translation interpolants

pub mod polynomial;
pub mod rotation;
pub mod translation;

pub use polynomial::*;
pub use rotation::*;
pub use translation::*;
