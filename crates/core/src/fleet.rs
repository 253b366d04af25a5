//! The in-memory vehicle roster.

use serde::{Deserialize, Serialize};

use crate::vehicle::Vehicle;

/// Ordered collection of every vehicle created this session. Insertion order
/// is preserved; there is no deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// An empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle and return a reference to it. VIN uniqueness is not
    /// re-checked here.
    pub fn add(&mut self, vehicle: Vehicle) -> &Vehicle {
        self.vehicles.push(vehicle);
        let idx = self.vehicles.len() - 1;
        &self.vehicles[idx]
    }

    /// Look up a vehicle by VIN.
    pub fn find(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.vin == vin)
    }

    /// Mutable lookup by VIN.
    pub fn find_mut(&mut self, vin: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|vehicle| vehicle.vin == vin)
    }

    /// Iterate vehicles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Number of vehicles in the fleet.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet has no vehicles yet.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{NewVehicle, NewVehicleKind};

    fn car(make: &str, model: &str, vin: &str) -> Vehicle {
        NewVehicle {
            color: "White".to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year: 2021,
            weight: 1300,
            top_speed: 130,
            kind: NewVehicleKind::Car,
        }
        .into_vehicle(vin.to_string())
    }

    #[test]
    fn preserves_insertion_order() {
        let mut fleet = Fleet::new();
        fleet.add(car("Toyota", "Corolla", "v1"));
        fleet.add(car("Honda", "Civic", "v2"));
        fleet.add(car("Mazda", "3", "v3"));

        let vins: Vec<&str> = fleet.iter().map(|v| v.vin.as_str()).collect();
        assert_eq!(vins, ["v1", "v2", "v3"]);
        assert_eq!(fleet.len(), 3);
    }

    #[test]
    fn find_returns_none_for_unknown_vin() {
        let mut fleet = Fleet::new();
        fleet.add(car("Toyota", "Corolla", "v1"));
        assert!(fleet.find("v1").is_some());
        assert!(fleet.find("missing").is_none());
    }

    #[test]
    fn find_mut_allows_state_changes() {
        let mut fleet = Fleet::new();
        fleet.add(car("Toyota", "Corolla", "v1"));
        if let Some(vehicle) = fleet.find_mut("v1") {
            vehicle.accelerate(10);
        }
        assert_eq!(fleet.find("v1").map(|v| v.current_speed), Some(10));
    }
}
