//! Vehicle variants and their shared motion state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single wheel fitted to a motorbike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wheel {
    /// Diameter in inches.
    pub diameter: u32,
    /// Manufacturer name.
    pub brand: String,
}

impl Wheel {
    /// Create a wheel from its diameter and brand.
    pub fn new(diameter: u32, brand: impl Into<String>) -> Self {
        Self {
            diameter,
            brand: brand.into(),
        }
    }
}

/// Direction for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Turn left.
    Left,
    /// Turn right.
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// The closed set of vehicle kinds and their variant-specific payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    /// Plain passenger car.
    Car,
    /// Truck able to tow one other vehicle.
    Truck {
        /// Maximum tow weight in pounds.
        towing_capacity: u32,
        /// VIN of the vehicle currently in tow. A relation only; the towed
        /// vehicle stays owned by the fleet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        towing: Option<String>,
    },
    /// Motorbike with its two wheels.
    Motorbike {
        /// Front wheel.
        front: Wheel,
        /// Rear wheel.
        rear: Wheel,
    },
}

impl VehicleKind {
    /// User-facing name of the variant.
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Truck { .. } => "Truck",
            VehicleKind::Motorbike { .. } => "Motorbike",
        }
    }

    /// Whether this vehicle is a truck.
    pub fn is_truck(&self) -> bool {
        matches!(self, VehicleKind::Truck { .. })
    }

    /// Whether this vehicle is a motorbike.
    pub fn is_motorbike(&self) -> bool {
        matches!(self, VehicleKind::Motorbike { .. })
    }
}

/// A vehicle in the fleet: identity, motion state and variant payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier assigned at creation, never reassigned.
    pub vin: String,
    /// Paint color.
    pub color: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Curb weight in pounds.
    pub weight: u32,
    /// Maximum speed in MPH.
    pub top_speed: u32,
    /// Current speed in MPH. Always within `0..=top_speed`.
    #[serde(default)]
    pub current_speed: u32,
    /// Whether the engine is running.
    #[serde(default)]
    pub started: bool,
    /// When the vehicle was added to the fleet.
    pub created_at: DateTime<Utc>,
    /// Variant payload.
    pub kind: VehicleKind,
}

impl Vehicle {
    /// Short `make model` description used in messages.
    pub fn describe(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// Roster entry label: VIN plus make and model.
    pub fn roster_label(&self) -> String {
        format!("{} — {} {}", self.vin, self.make, self.model)
    }

    /// Start the engine. Idempotent; already-started vehicles stay started.
    pub fn start(&mut self) -> String {
        self.started = true;
        format!("{} started", self.describe())
    }

    /// Cut the engine and come to a halt.
    pub fn stop(&mut self) -> String {
        self.started = false;
        self.current_speed = 0;
        format!("{} stopped", self.describe())
    }

    /// Increase speed by `delta`, clamped to the top speed.
    pub fn accelerate(&mut self, delta: u32) -> String {
        self.current_speed = self
            .current_speed
            .saturating_add(delta)
            .min(self.top_speed);
        format!(
            "{} accelerated {delta} MPH; now {} MPH",
            self.describe(),
            self.current_speed
        )
    }

    /// Decrease speed by `delta`, clamped to zero.
    pub fn decelerate(&mut self, delta: u32) -> String {
        self.current_speed = self.current_speed.saturating_sub(delta);
        format!(
            "{} decelerated {delta} MPH; now {} MPH",
            self.describe(),
            self.current_speed
        )
    }

    /// Report a turn. No state change.
    pub fn turn(&mut self, direction: Direction) -> String {
        format!("{} turned {direction}", self.describe())
    }

    /// Report reversing. No state change.
    pub fn reverse(&mut self) -> String {
        format!("{} is reversing", self.describe())
    }

    /// All attributes in human-readable lines, including the
    /// variant-specific ones.
    pub fn details(&self) -> Vec<String> {
        let mut lines = vec![
            format!("VIN: {}", self.vin),
            format!("Type: {}", self.kind.label()),
            format!("Color: {}", self.color),
            format!("Make: {}", self.make),
            format!("Model: {}", self.model),
            format!("Year: {}", self.year),
            format!("Weight: {} lbs", self.weight),
            format!("Top speed: {} MPH", self.top_speed),
            format!("Current speed: {} MPH", self.current_speed),
            format!("Started: {}", if self.started { "yes" } else { "no" }),
            format!("Added: {}", self.created_at.format("%Y-%m-%d %H:%M")),
        ];
        match &self.kind {
            VehicleKind::Car => {}
            VehicleKind::Truck {
                towing_capacity,
                towing,
            } => {
                lines.push(format!("Towing capacity: {towing_capacity} lbs"));
                lines.push(match towing {
                    Some(vin) => format!("Towing: {vin}"),
                    None => "Towing: nothing".to_string(),
                });
            }
            VehicleKind::Motorbike { front, rear } => {
                lines.push(format!("Front wheel: {}\" {}", front.diameter, front.brand));
                lines.push(format!("Rear wheel: {}\" {}", rear.diameter, rear.brand));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Vehicle {
        Vehicle {
            vin: "abc123".to_string(),
            color: "Blue".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            weight: 1200,
            top_speed: 120,
            current_speed: 0,
            started: false,
            created_at: Utc::now(),
            kind: VehicleKind::Car,
        }
    }

    #[test]
    fn accelerate_clamps_to_top_speed() {
        let mut car = sample_car();
        for _ in 0..100 {
            car.accelerate(7);
            assert!(car.current_speed <= car.top_speed);
        }
        assert_eq!(car.current_speed, 120);
    }

    #[test]
    fn decelerate_clamps_to_zero() {
        let mut car = sample_car();
        car.accelerate(10);
        for _ in 0..100 {
            car.decelerate(3);
        }
        assert_eq!(car.current_speed, 0);
    }

    #[test]
    fn stop_resets_speed_and_engine() {
        let mut car = sample_car();
        car.start();
        car.accelerate(50);
        car.stop();
        assert_eq!(car.current_speed, 0);
        assert!(!car.started);
    }

    #[test]
    fn start_is_idempotent() {
        let mut car = sample_car();
        car.start();
        car.start();
        assert!(car.started);
    }

    #[test]
    fn corolla_scenario_matches_reference() {
        let mut car = sample_car();
        for _ in 0..3 {
            car.accelerate(5);
        }
        assert_eq!(car.current_speed, 15);
        for _ in 0..5 {
            car.decelerate(5);
        }
        assert_eq!(car.current_speed, 0);
    }

    #[test]
    fn turn_and_reverse_leave_state_untouched() {
        let mut car = sample_car();
        car.accelerate(20);
        let speed = car.current_speed;
        let message = car.turn(Direction::Left);
        assert!(message.contains("left"));
        car.turn(Direction::Right);
        car.reverse();
        assert_eq!(car.current_speed, speed);
    }

    #[test]
    fn motorbike_details_include_both_wheels() {
        let mut bike = sample_car();
        bike.kind = VehicleKind::Motorbike {
            front: Wheel::new(18, "Brand A"),
            rear: Wheel::new(16, "Brand B"),
        };
        let details = bike.details().join("\n");
        assert!(details.contains("18\" Brand A"));
        assert!(details.contains("16\" Brand B"));
    }

    #[test]
    fn truck_details_show_tow_state() {
        let mut truck = sample_car();
        truck.kind = VehicleKind::Truck {
            towing_capacity: 5000,
            towing: None,
        };
        let details = truck.details().join("\n");
        assert!(details.contains("Towing capacity: 5000 lbs"));
        assert!(details.contains("Towing: nothing"));
    }
}
