#![allow(missing_docs)]

//! Validated creation input collected by the front-end forms.
//!
//! Free-text answers are parsed here with typed errors instead of being
//! silently coerced, so a mistyped year or weight surfaces as a message
//! and never lands in the fleet as a degenerate value.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{Vehicle, VehicleKind, Wheel};

/// Why a creation field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be a whole number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

impl InputError {
    /// Label of the field that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Empty(label)
            | InputError::NotANumber(label)
            | InputError::NotPositive(label) => label,
        }
    }
}

/// Parse a required free-text field.
pub fn text_field(label: &'static str, raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(label));
    }
    Ok(trimmed.to_string())
}

/// Parse a year field. Any whole number is accepted.
pub fn year_field(label: &'static str, raw: &str) -> Result<i32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(label));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| InputError::NotANumber(label))
}

/// Parse a strictly positive integer field (weight, speed, capacity,
/// wheel diameter).
pub fn positive_field(label: &'static str, raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(label));
    }
    let value = trimmed
        .parse::<u32>()
        .map_err(|_| InputError::NotANumber(label))?;
    if value == 0 {
        return Err(InputError::NotPositive(label));
    }
    Ok(value)
}

/// Variant-specific creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewVehicleKind {
    Car,
    Truck { towing_capacity: u32 },
    Motorbike { front: Wheel, rear: Wheel },
}

/// Validated input for one new vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub color: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub weight: u32,
    pub top_speed: u32,
    pub kind: NewVehicleKind,
}

impl NewVehicle {
    /// Construct the fleet vehicle, assigning the given VIN. Motion state
    /// starts at rest with the engine off.
    pub fn into_vehicle(self, vin: String) -> Vehicle {
        let kind = match self.kind {
            NewVehicleKind::Car => VehicleKind::Car,
            NewVehicleKind::Truck { towing_capacity } => VehicleKind::Truck {
                towing_capacity,
                towing: None,
            },
            NewVehicleKind::Motorbike { front, rear } => VehicleKind::Motorbike { front, rear },
        };
        Vehicle {
            vin,
            color: self.color,
            make: self.make,
            model: self.model,
            year: self.year,
            weight: self.weight,
            top_speed: self.top_speed,
            current_speed: 0,
            started: false,
            created_at: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_trims_and_rejects_empty() {
        assert_eq!(text_field("Make", "  Toyota "), Ok("Toyota".to_string()));
        assert_eq!(text_field("Make", "   "), Err(InputError::Empty("Make")));
    }

    #[test]
    fn year_field_accepts_any_whole_number() {
        assert_eq!(year_field("Year", "2020"), Ok(2020));
        assert_eq!(year_field("Year", "next year"), Err(InputError::NotANumber("Year")));
    }

    #[test]
    fn positive_field_rejects_garbage_and_zero() {
        assert_eq!(positive_field("Weight (lbs)", "1200"), Ok(1200));
        assert_eq!(
            positive_field("Weight (lbs)", "heavy"),
            Err(InputError::NotANumber("Weight (lbs)"))
        );
        assert_eq!(
            positive_field("Weight (lbs)", "0"),
            Err(InputError::NotPositive("Weight (lbs)"))
        );
    }

    #[test]
    fn into_vehicle_starts_at_rest() {
        let input = NewVehicle {
            color: "Red".to_string(),
            make: "Ford".to_string(),
            model: "F-150".to_string(),
            year: 2022,
            weight: 4500,
            top_speed: 110,
            kind: NewVehicleKind::Truck {
                towing_capacity: 5000,
            },
        };
        let truck = input.into_vehicle("vin-1".to_string());
        assert_eq!(truck.vin, "vin-1");
        assert_eq!(truck.current_speed, 0);
        assert!(!truck.started);
        assert!(truck.kind.is_truck());
        match truck.kind {
            VehicleKind::Truck { towing, .. } => assert!(towing.is_none()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn error_reports_offending_field() {
        let err = positive_field("Top speed (MPH)", "-5").unwrap_err();
        assert_eq!(err.field(), "Top speed (MPH)");
    }
}
