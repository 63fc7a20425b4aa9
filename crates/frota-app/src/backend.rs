// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::forms::{DriverFormInput, LeaveFormInput, NewMaintenance, VehicleFormInput};
use crate::{
    Driver, DriverId, KmLogEntry, Leave, LeaveId, Maintenance, MaintenanceId, NewQuote, NewTrip,
    Quote, QuoteId, QuoteStatus, Snapshot, Trip, TripId, Vehicle, VehicleId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("session expired -- log in again")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Persistence collaborator. Every write returns the stored record so the
/// caller can mirror it into its catalog without a reload.
pub trait Backend {
    fn load(&self) -> BackendResult<Snapshot>;

    fn create_trip(&self, trip: &NewTrip) -> BackendResult<Trip>;
    fn update_trip(&self, id: TripId, trip: &NewTrip) -> BackendResult<Trip>;
    fn delete_trip(&self, id: TripId) -> BackendResult<()>;

    fn create_vehicle(&self, vehicle: &VehicleFormInput) -> BackendResult<Vehicle>;
    fn update_vehicle(&self, id: VehicleId, vehicle: &VehicleFormInput) -> BackendResult<Vehicle>;
    fn delete_vehicle(&self, id: VehicleId) -> BackendResult<()>;

    /// Odometer history of one vehicle, oldest first. An unknown vehicle is
    /// rejected.
    fn list_km_log(&self, vehicle_id: VehicleId) -> BackendResult<Vec<KmLogEntry>>;
    /// Drops every odometer entry of one vehicle and returns how many went.
    fn clear_km_log(&self, vehicle_id: VehicleId) -> BackendResult<usize>;

    fn create_driver(&self, driver: &DriverFormInput) -> BackendResult<Driver>;
    fn update_driver(&self, id: DriverId, driver: &DriverFormInput) -> BackendResult<Driver>;
    fn delete_driver(&self, id: DriverId) -> BackendResult<()>;

    fn create_leave(&self, leave: &LeaveFormInput) -> BackendResult<Leave>;
    fn delete_leave(&self, id: LeaveId) -> BackendResult<()>;

    fn create_maintenance(&self, item: &NewMaintenance) -> BackendResult<Maintenance>;
    fn update_maintenance(
        &self,
        id: MaintenanceId,
        item: &NewMaintenance,
    ) -> BackendResult<Maintenance>;
    fn delete_maintenance(&self, id: MaintenanceId) -> BackendResult<()>;

    fn create_quote(&self, quote: &NewQuote) -> BackendResult<Quote>;
    fn set_quote_status(&self, id: QuoteId, status: QuoteStatus) -> BackendResult<Quote>;
    fn delete_quote(&self, id: QuoteId) -> BackendResult<()>;
}
