// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::ids::*;
use crate::quote::{QuoteBreakdown, QuoteRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [Self; 3] = [Self::Scheduled, Self::Completed, Self::Cancelled];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    InState,
    OutOfState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripKind {
    AirportCharter,
    RoundTrip(Region),
    OneWay(Region),
    EmployeeRoute,
}

impl TripKind {
    pub const ALL: [Self; 6] = [
        Self::AirportCharter,
        Self::RoundTrip(Region::InState),
        Self::OneWay(Region::InState),
        Self::RoundTrip(Region::OutOfState),
        Self::OneWay(Region::OutOfState),
        Self::EmployeeRoute,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AirportCharter => "airport_charter",
            Self::RoundTrip(Region::InState) => "round_trip_in_state",
            Self::RoundTrip(Region::OutOfState) => "round_trip_out_of_state",
            Self::OneWay(Region::InState) => "one_way_in_state",
            Self::OneWay(Region::OutOfState) => "one_way_out_of_state",
            Self::EmployeeRoute => "employee_route",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AirportCharter => "airport charter",
            Self::RoundTrip(Region::InState) => "round trip (in state)",
            Self::RoundTrip(Region::OutOfState) => "round trip (out of state)",
            Self::OneWay(Region::InState) => "one way (in state)",
            Self::OneWay(Region::OutOfState) => "one way (out of state)",
            Self::EmployeeRoute => "employee route",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    Inactive,
    InMaintenance,
}

impl VehicleStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::InMaintenance];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::InMaintenance => "in_maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "in_maintenance" => Some(Self::InMaintenance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverStatus {
    Active,
    Inactive,
    OnLeave,
}

impl DriverStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on_leave",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "on_leave" => Some(Self::OnLeave),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
}

impl MaintenanceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "preventive" => Some(Self::Preventive),
            "corrective" => Some(Self::Corrective),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Scheduled,
    Completed,
}

impl MaintenanceStatus {
    pub const ALL: [Self; 2] = [Self::Scheduled, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// What moved a vehicle's odometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KmChangeOrigin {
    Maintenance,
    VehicleEdit,
}

impl KmChangeOrigin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::VehicleEdit => "vehicle_edit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "maintenance" => Some(Self::Maintenance),
            "vehicle_edit" => Some(Self::VehicleEdit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
}

impl QuoteStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageKind {
    Planning,
    Fleet,
    Drivers,
    Maintenance,
    Quotes,
}

impl PageKind {
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Fleet,
        Self::Drivers,
        Self::Maintenance,
        Self::Quotes,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "trips",
            Self::Fleet => "vehicles",
            Self::Drivers => "drivers",
            Self::Maintenance => "maintenance",
            Self::Quotes => "quotes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub title: String,
    pub client_name: String,
    pub kind: TripKind,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub start_location: String,
    pub end_location: String,
    pub value_cents: i64,
    pub status: TripStatus,
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
}

impl Trip {
    /// Whether `day` falls inside the trip's calendar window, both ends
    /// inclusive. Time of day is ignored.
    pub fn spans(&self, day: Date) -> bool {
        self.start.date() <= day && day <= self.end.date()
    }
}

/// A trip as submitted to the backend, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrip {
    pub title: String,
    pub client_name: String,
    pub kind: TripKind,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub start_location: String,
    pub end_location: String,
    pub value_cents: i64,
    pub status: TripStatus,
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
}

impl NewTrip {
    pub fn with_id(self, id: TripId) -> Trip {
        Trip {
            id,
            title: self.title,
            client_name: self.client_name,
            kind: self.kind,
            start: self.start,
            end: self.end,
            start_location: self.start_location,
            end_location: self.end_location,
            value_cents: self.value_cents,
            status: self.status,
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub model: String,
    pub plate: String,
    pub status: VehicleStatus,
    /// Current odometer reading.
    pub km: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub status: DriverStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    pub id: LeaveId,
    pub driver_id: DriverId,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub title: String,
    pub kind: MaintenanceKind,
    pub date: Option<Date>,
    pub cost_cents: i64,
    pub status: MaintenanceStatus,
    pub odometer_km: Option<i64>,
}

/// One odometer change. `reference_id` points at the record that caused it,
/// e.g. the maintenance id for [`KmChangeOrigin::Maintenance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmLogEntry {
    pub id: KmLogId,
    pub vehicle_id: VehicleId,
    pub recorded_at: PrimitiveDateTime,
    pub previous_km: i64,
    pub current_km: i64,
    pub origin: KmChangeOrigin,
    pub reference_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub title: String,
    pub client_name: String,
    pub breakdown: QuoteBreakdown,
    pub request: QuoteRequest,
    pub distance_meters: u64,
    pub status: QuoteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub title: String,
    pub client_name: String,
    pub breakdown: QuoteBreakdown,
    pub request: QuoteRequest,
    pub distance_meters: u64,
    pub status: QuoteStatus,
}

impl NewQuote {
    pub fn with_id(self, id: QuoteId) -> Quote {
        Quote {
            id,
            title: self.title,
            client_name: self.client_name,
            breakdown: self.breakdown,
            request: self.request,
            distance_meters: self.distance_meters,
            status: self.status,
        }
    }
}

/// Everything the backend returns on a full load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub trips: Vec<Trip>,
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub leaves: Vec<Leave>,
    pub maintenance: Vec<Maintenance>,
    pub quotes: Vec<Quote>,
}
