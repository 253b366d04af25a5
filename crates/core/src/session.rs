//! Menu-session semantics: the current selection, action dispatch, tow
//! rules and the exit flag.
//!
//! The terminal front-end owns the screens and key handling; everything the
//! menus *mean* lives here so it can be exercised without a terminal.

use thiserror::Error;
use tracing::{debug, info};

use crate::fleet::Fleet;
use crate::vehicle::{Direction, NewVehicle, Vehicle, VehicleKind};
use crate::vin;

/// Why a menu action was rejected. Every variant maps to a user-visible
/// message; none of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No vehicle is currently selected.
    #[error("no vehicle is selected")]
    NoSelection,
    /// The VIN no longer resolves against the fleet.
    #[error("vehicle {0} is not in the fleet")]
    VehicleNotFound(String),
    /// Tow was requested on a vehicle that is not a truck.
    #[error("{0} is not a truck and cannot tow")]
    NotATruck(String),
    /// Wheelie was requested on a vehicle that is not a motorbike.
    #[error("{0} is not a motorbike and cannot perform a wheelie")]
    NotAMotorbike(String),
    /// A truck tried to tow itself.
    #[error("a truck cannot tow itself")]
    TowSelf,
    /// A truck tried to tow another truck.
    #[error("a truck cannot tow another truck")]
    TowTruck,
}

/// A simple action invoked on the selected vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAction {
    /// Emit every attribute of the selected vehicle.
    PrintDetails,
    /// Start the engine.
    Start,
    /// Stop the engine and come to a halt.
    Stop,
    /// Speed up by the given MPH delta.
    Accelerate(u32),
    /// Slow down by the given MPH delta.
    Decelerate(u32),
    /// Turn left or right.
    Turn(Direction),
    /// Reverse.
    Reverse,
    /// Motorbikes only.
    Wheelie,
}

/// The single owned session state threaded through the controller: the
/// fleet, the selected VIN and the exit flag.
#[derive(Debug, Default)]
pub struct SessionState {
    fleet: Fleet,
    selected_vin: Option<String>,
    exit: bool,
}

impl SessionState {
    /// Fresh session with an empty fleet and nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the fleet roster.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Create a vehicle from validated input, append it to the fleet and
    /// make it the current selection.
    pub fn create_vehicle(&mut self, input: NewVehicle) -> &Vehicle {
        let vehicle = input.into_vehicle(vin::generate());
        self.selected_vin = Some(vehicle.vin.clone());
        info!(vin = %vehicle.vin, kind = vehicle.kind.label(), "vehicle created");
        self.fleet.add(vehicle)
    }

    /// Make an existing vehicle the current selection.
    pub fn select(&mut self, vin: &str) -> Result<(), ActionError> {
        if self.fleet.find(vin).is_none() {
            return Err(ActionError::VehicleNotFound(vin.to_string()));
        }
        self.selected_vin = Some(vin.to_string());
        debug!(%vin, "selection changed");
        Ok(())
    }

    /// VIN of the current selection, if any.
    pub fn selected_vin(&self) -> Option<&str> {
        self.selected_vin.as_deref()
    }

    /// The currently selected vehicle, resolved against the fleet.
    pub fn selected(&self) -> Option<&Vehicle> {
        self.selected_vin
            .as_deref()
            .and_then(|vin| self.fleet.find(vin))
    }

    fn selected_mut(&mut self) -> Result<&mut Vehicle, ActionError> {
        let vin = self
            .selected_vin
            .clone()
            .ok_or(ActionError::NoSelection)?;
        self.fleet
            .find_mut(&vin)
            .ok_or(ActionError::VehicleNotFound(vin))
    }

    /// Invoke a simple action on the selected vehicle and return the status
    /// lines it emitted.
    pub fn perform(&mut self, action: VehicleAction) -> Result<Vec<String>, ActionError> {
        let vehicle = self.selected_mut()?;
        let lines = match action {
            VehicleAction::PrintDetails => vehicle.details(),
            VehicleAction::Start => vec![vehicle.start()],
            VehicleAction::Stop => vec![vehicle.stop()],
            VehicleAction::Accelerate(delta) => vec![vehicle.accelerate(delta)],
            VehicleAction::Decelerate(delta) => vec![vehicle.decelerate(delta)],
            VehicleAction::Turn(direction) => vec![vehicle.turn(direction)],
            VehicleAction::Reverse => vec![vehicle.reverse()],
            VehicleAction::Wheelie => match vehicle.kind {
                VehicleKind::Motorbike { .. } => {
                    vec![format!("{} pops a wheelie!", vehicle.describe())]
                }
                VehicleKind::Car | VehicleKind::Truck { .. } => {
                    return Err(ActionError::NotAMotorbike(vehicle.describe()))
                }
            },
        };
        Ok(lines)
    }

    /// Check that the current selection may enter the tow flow.
    pub fn begin_tow(&self) -> Result<(), ActionError> {
        let vin = self.selected_vin.as_deref().ok_or(ActionError::NoSelection)?;
        let vehicle = self
            .fleet
            .find(vin)
            .ok_or_else(|| ActionError::VehicleNotFound(vin.to_string()))?;
        if vehicle.kind.is_truck() {
            Ok(())
        } else {
            Err(ActionError::NotATruck(vehicle.describe()))
        }
    }

    /// Attach the tow reference of the selected truck to `target_vin`.
    ///
    /// Trucks are rejected as targets outright, with the self-tow case
    /// reported separately. On rejection the existing tow reference is left
    /// untouched.
    pub fn tow(&mut self, target_vin: &str) -> Result<String, ActionError> {
        let truck_vin = self
            .selected_vin
            .clone()
            .ok_or(ActionError::NoSelection)?;
        if target_vin == truck_vin {
            return Err(ActionError::TowSelf);
        }
        let target = self
            .fleet
            .find(target_vin)
            .ok_or_else(|| ActionError::VehicleNotFound(target_vin.to_string()))?;
        if target.kind.is_truck() {
            return Err(ActionError::TowTruck);
        }
        let target_label = target.describe();

        let truck = self
            .fleet
            .find_mut(&truck_vin)
            .ok_or_else(|| ActionError::VehicleNotFound(truck_vin.clone()))?;
        let truck_label = truck.describe();
        match &mut truck.kind {
            VehicleKind::Truck { towing, .. } => {
                *towing = Some(target_vin.to_string());
                info!(truck = %truck_vin, target = %target_vin, "tow attached");
                Ok(format!("{truck_label} is now towing {target_label}"))
            }
            VehicleKind::Car | VehicleKind::Motorbike { .. } => {
                Err(ActionError::NotATruck(truck_label))
            }
        }
    }

    /// Set the terminal flag. The driving loop observes it and stops
    /// prompting.
    pub fn request_exit(&mut self) {
        self.exit = true;
        info!("session exit requested");
    }

    /// Whether the session has been asked to end.
    pub fn should_exit(&self) -> bool {
        self.exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{NewVehicleKind, Wheel};

    fn car_input(make: &str, model: &str) -> NewVehicle {
        NewVehicle {
            color: "Blue".to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year: 2020,
            weight: 1200,
            top_speed: 120,
            kind: NewVehicleKind::Car,
        }
    }

    fn truck_input() -> NewVehicle {
        NewVehicle {
            color: "Red".to_string(),
            make: "Ford".to_string(),
            model: "F-150".to_string(),
            year: 2022,
            weight: 4500,
            top_speed: 110,
            kind: NewVehicleKind::Truck {
                towing_capacity: 5000,
            },
        }
    }

    fn bike_input() -> NewVehicle {
        NewVehicle {
            color: "Black".to_string(),
            make: "Ducati".to_string(),
            model: "Monster".to_string(),
            year: 2019,
            weight: 450,
            top_speed: 150,
            kind: NewVehicleKind::Motorbike {
                front: Wheel::new(18, "Brand A"),
                rear: Wheel::new(16, "Brand B"),
            },
        }
    }

    fn tow_target(session: &SessionState, truck_vin: &str) -> Option<String> {
        match &session.fleet().find(truck_vin).unwrap().kind {
            VehicleKind::Truck { towing, .. } => towing.clone(),
            _ => panic!("expected a truck"),
        }
    }

    #[test]
    fn create_selects_the_new_vehicle() {
        let mut session = SessionState::new();
        let vin = session.create_vehicle(car_input("Toyota", "Corolla")).vin.clone();
        assert_eq!(session.selected_vin(), Some(vin.as_str()));
        assert_eq!(session.fleet().len(), 1);
    }

    #[test]
    fn select_unknown_vin_is_surfaced() {
        let mut session = SessionState::new();
        session.create_vehicle(car_input("Toyota", "Corolla"));
        assert_eq!(
            session.select("nope"),
            Err(ActionError::VehicleNotFound("nope".to_string()))
        );
    }

    #[test]
    fn perform_without_selection_fails() {
        let mut session = SessionState::new();
        assert_eq!(
            session.perform(VehicleAction::Start),
            Err(ActionError::NoSelection)
        );
    }

    #[test]
    fn accelerate_through_session_respects_top_speed() {
        let mut session = SessionState::new();
        session.create_vehicle(car_input("Toyota", "Corolla"));
        for _ in 0..50 {
            session.perform(VehicleAction::Accelerate(7)).unwrap();
        }
        assert_eq!(session.selected().unwrap().current_speed, 120);
    }

    #[test]
    fn wheelie_on_a_car_is_rejected() {
        let mut session = SessionState::new();
        session.create_vehicle(car_input("Toyota", "Corolla"));
        assert_eq!(
            session.perform(VehicleAction::Wheelie),
            Err(ActionError::NotAMotorbike("Toyota Corolla".to_string()))
        );
    }

    #[test]
    fn wheelie_on_a_motorbike_reports() {
        let mut session = SessionState::new();
        session.create_vehicle(bike_input());
        let lines = session.perform(VehicleAction::Wheelie).unwrap();
        assert!(lines[0].contains("wheelie"));
    }

    #[test]
    fn begin_tow_requires_a_truck() {
        let mut session = SessionState::new();
        session.create_vehicle(car_input("Toyota", "Corolla"));
        assert_eq!(
            session.begin_tow(),
            Err(ActionError::NotATruck("Toyota Corolla".to_string()))
        );

        session.create_vehicle(truck_input());
        assert_eq!(session.begin_tow(), Ok(()));
    }

    #[test]
    fn truck_tows_a_car() {
        let mut session = SessionState::new();
        let car_vin = session.create_vehicle(car_input("Toyota", "Corolla")).vin.clone();
        let truck_vin = session.create_vehicle(truck_input()).vin.clone();

        let message = session.tow(&car_vin).unwrap();
        assert!(message.contains("towing Toyota Corolla"));
        assert_eq!(tow_target(&session, &truck_vin), Some(car_vin));
    }

    #[test]
    fn truck_cannot_tow_itself_or_another_truck() {
        let mut session = SessionState::new();
        let first_truck = session.create_vehicle(truck_input()).vin.clone();
        let second_truck = session.create_vehicle(truck_input()).vin.clone();

        assert_eq!(session.tow(&second_truck), Err(ActionError::TowSelf));
        assert_eq!(session.tow(&first_truck), Err(ActionError::TowTruck));
        assert_eq!(tow_target(&session, &second_truck), None);
        assert_eq!(tow_target(&session, &first_truck), None);
    }

    #[test]
    fn tow_unknown_target_is_surfaced() {
        let mut session = SessionState::new();
        session.create_vehicle(truck_input());
        assert_eq!(
            session.tow("ghost"),
            Err(ActionError::VehicleNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn exit_flag_is_sticky() {
        let mut session = SessionState::new();
        assert!(!session.should_exit());
        session.request_exit();
        assert!(session.should_exit());
    }

    #[test]
    fn stale_selection_is_reported_not_skipped() {
        let mut session = SessionState::new();
        session.create_vehicle(car_input("Toyota", "Corolla"));
        session.selected_vin = Some("stale".to_string());
        assert_eq!(
            session.perform(VehicleAction::Start),
            Err(ActionError::VehicleNotFound("stale".to_string()))
        );
    }
}
