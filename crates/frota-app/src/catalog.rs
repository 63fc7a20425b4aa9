// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! In-memory entity collections mirrored from the backend.
//!
//! Insertion order is display order, except quotes, which are kept most
//! recent first.

use crate::validation::normalize_plate;
use crate::{
    Driver, DriverId, Leave, LeaveId, Maintenance, MaintenanceId, MaintenanceStatus, Quote,
    QuoteId, Snapshot, Trip, TripId, Vehicle, VehicleId,
};

pub const UNKNOWN: &str = "unknown";

pub trait Keyed {
    type Id: Copy + PartialEq;

    fn key(&self) -> Self::Id;
}

macro_rules! keyed {
    ($entity:ty, $id:ty) => {
        impl Keyed for $entity {
            type Id = $id;

            fn key(&self) -> $id {
                self.id
            }
        }
    };
}

keyed!(Trip, TripId);
keyed!(Vehicle, VehicleId);
keyed!(Driver, DriverId);
keyed!(Leave, LeaveId);
keyed!(Maintenance, MaintenanceId);
keyed!(Quote, QuoteId);

/// Replaces the record with the same id in place, or appends it.
pub fn upsert<T: Keyed>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Returns whether a record was removed.
pub fn remove<T: Keyed>(items: &mut Vec<T>, id: T::Id) -> bool {
    let before = items.len();
    items.retain(|item| item.key() != id);
    items.len() != before
}

pub fn find<T: Keyed>(items: &[T], id: T::Id) -> Option<&T> {
    items.iter().find(|item| item.key() == id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub trips: Vec<Trip>,
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub leaves: Vec<Leave>,
    pub maintenance: Vec<Maintenance>,
    pub quotes: Vec<Quote>,
}

impl From<Snapshot> for Catalog {
    fn from(snapshot: Snapshot) -> Self {
        let mut quotes = snapshot.quotes;
        quotes.sort_by(|a, b| b.id.cmp(&a.id));
        Self {
            trips: snapshot.trips,
            vehicles: snapshot.vehicles,
            drivers: snapshot.drivers,
            leaves: snapshot.leaves,
            maintenance: snapshot.maintenance,
            quotes,
        }
    }
}

impl Catalog {
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        find(&self.vehicles, id)
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        find(&self.drivers, id)
    }

    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        find(&self.trips, id)
    }

    pub fn quote(&self, id: QuoteId) -> Option<&Quote> {
        find(&self.quotes, id)
    }

    pub fn vehicle_label(&self, id: VehicleId) -> String {
        self.vehicle(id)
            .map(|vehicle| format!("{} ({})", vehicle.model, vehicle.plate))
            .unwrap_or_else(|| UNKNOWN.to_owned())
    }

    pub fn driver_name(&self, id: DriverId) -> &str {
        self.driver(id)
            .map(|driver| driver.name.as_str())
            .unwrap_or(UNKNOWN)
    }

    /// Whether another vehicle already carries `plate`, ignoring case and
    /// punctuation.
    pub fn plate_taken(&self, plate: &str, exclude: Option<VehicleId>) -> bool {
        let wanted = normalize_plate(plate);
        self.vehicles.iter().any(|vehicle| {
            Some(vehicle.id) != exclude && normalize_plate(&vehicle.plate) == wanted
        })
    }

    pub fn leaves_for(&self, driver_id: DriverId) -> impl Iterator<Item = &Leave> {
        self.leaves
            .iter()
            .filter(move |leave| leave.driver_id == driver_id)
    }

    pub fn maintenance_for(&self, vehicle_id: VehicleId) -> impl Iterator<Item = &Maintenance> {
        self.maintenance
            .iter()
            .filter(move |item| item.vehicle_id == vehicle_id)
    }

    /// Removes a vehicle together with its maintenance records.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> bool {
        self.maintenance.retain(|item| item.vehicle_id != id);
        remove(&mut self.vehicles, id)
    }

    /// Removes a driver together with their leave periods.
    pub fn remove_driver(&mut self, id: DriverId) -> bool {
        self.leaves.retain(|leave| leave.driver_id != id);
        remove(&mut self.drivers, id)
    }

    /// A completed service whose odometer reading is past the vehicle's
    /// current km moves the vehicle forward. Returns whether it moved.
    pub fn advance_odometer(&mut self, item: &Maintenance) -> bool {
        let Some(reading) = item.odometer_km else {
            return false;
        };
        if item.status != MaintenanceStatus::Completed {
            return false;
        }
        match self.vehicles.iter_mut().find(|vehicle| vehicle.id == item.vehicle_id) {
            Some(vehicle) if reading > vehicle.km => {
                vehicle.km = reading;
                true
            }
            _ => false,
        }
    }

    /// New quotes go to the front; a replaced quote keeps its position.
    pub fn upsert_quote(&mut self, quote: Quote) {
        match self.quotes.iter_mut().find(|existing| existing.id == quote.id) {
            Some(existing) => *existing = quote,
            None => self.quotes.insert(0, quote),
        }
    }
}
