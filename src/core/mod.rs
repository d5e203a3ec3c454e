//! Fundamental value types and math utilities.

pub mod math;
mod vec;
mod waypoint;

pub use vec::Vec2d;
pub use waypoint::Waypoint;
