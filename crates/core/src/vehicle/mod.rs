//! Vehicle domain model: variants, behavior and validated creation input.

pub mod input;
mod models;

pub use input::{NewVehicle, NewVehicleKind};
pub use models::{Direction, Vehicle, VehicleKind, Wheel};
