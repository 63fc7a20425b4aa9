// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::slice;
use time::{Date, PrimitiveDateTime};

use crate::validation::parse_plate;
use crate::{
    DriverId, DriverStatus, MaintenanceKind, MaintenanceStatus, NewTrip, Region, TripKind,
    TripStatus, VehicleId, VehicleStatus,
};

/// One vehicle and driver booked for one time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub vehicle_id: VehicleId,
    pub driver_id: DriverId,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl Assignment {
    fn validate(&self, label: &str) -> Result<()> {
        if self.vehicle_id.get() <= 0 {
            bail!("{label} vehicle is required -- choose a vehicle and retry");
        }
        if self.driver_id.get() <= 0 {
            bail!("{label} driver is required -- choose a driver and retry");
        }
        if self.end < self.start {
            bail!("{label} return must be on/after departure");
        }
        Ok(())
    }
}

/// The fields a trip needs depend on its kind; employee routes book one
/// vehicle and driver per shift instead of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripPlan {
    AirportCharter(Assignment),
    RoundTrip {
        region: Region,
        assignment: Assignment,
    },
    OneWay {
        region: Region,
        assignment: Assignment,
    },
    EmployeeRoute {
        shifts: Vec<Assignment>,
    },
}

impl TripPlan {
    pub fn kind(&self) -> TripKind {
        match self {
            Self::AirportCharter(_) => TripKind::AirportCharter,
            Self::RoundTrip { region, .. } => TripKind::RoundTrip(*region),
            Self::OneWay { region, .. } => TripKind::OneWay(*region),
            Self::EmployeeRoute { .. } => TripKind::EmployeeRoute,
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        match self {
            Self::AirportCharter(assignment)
            | Self::RoundTrip { assignment, .. }
            | Self::OneWay { assignment, .. } => slice::from_ref(assignment),
            Self::EmployeeRoute { shifts } => shifts,
        }
    }

    /// Rebuilds a plan of `kind` around an existing assignment, as when a
    /// stored trip is opened for editing.
    pub fn single(kind: TripKind, assignment: Assignment) -> Self {
        match kind {
            TripKind::AirportCharter => Self::AirportCharter(assignment),
            TripKind::RoundTrip(region) => Self::RoundTrip { region, assignment },
            TripKind::OneWay(region) => Self::OneWay { region, assignment },
            TripKind::EmployeeRoute => Self::EmployeeRoute {
                shifts: vec![assignment],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripFormInput {
    pub title: String,
    pub client_name: String,
    pub start_location: String,
    pub end_location: String,
    pub value_cents: i64,
    pub status: TripStatus,
    pub plan: TripPlan,
}

impl TripFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("trip title is required -- enter a title and retry");
        }
        if self.value_cents < 0 {
            bail!("trip value cannot be negative");
        }
        let assignments = self.plan.assignments();
        if assignments.is_empty() {
            bail!("employee route needs at least one shift -- add a vehicle and driver and retry");
        }
        let multiple = assignments.len() > 1;
        for (index, assignment) in assignments.iter().enumerate() {
            let label = if multiple {
                format!("shift {}", index + 1)
            } else {
                "trip".to_owned()
            };
            assignment.validate(&label)?;
        }
        Ok(())
    }

    /// One record per assignment, all sharing the form's descriptive fields.
    pub fn new_trips(&self) -> Vec<NewTrip> {
        let kind = self.plan.kind();
        self.plan
            .assignments()
            .iter()
            .map(|assignment| NewTrip {
                title: self.title.trim().to_owned(),
                client_name: self.client_name.trim().to_owned(),
                kind,
                start: assignment.start,
                end: assignment.end,
                start_location: self.start_location.trim().to_owned(),
                end_location: self.end_location.trim().to_owned(),
                value_cents: self.value_cents,
                status: self.status,
                vehicle_id: assignment.vehicle_id,
                driver_id: assignment.driver_id,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFormInput {
    pub model: String,
    pub plate: String,
    pub status: VehicleStatus,
    /// Odometer reading. `None` starts a new vehicle at zero and leaves an
    /// existing vehicle's reading alone.
    pub km: Option<i64>,
}

impl VehicleFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            bail!("vehicle model is required -- enter a model and retry");
        }
        if self.plate.trim().is_empty() {
            bail!("vehicle plate is required -- enter a plate and retry");
        }
        if let Some(km) = self.km
            && km < 0
        {
            bail!("vehicle km must not be negative, got {km}");
        }
        parse_plate(&self.plate).map_err(|_| {
            anyhow!(
                "vehicle plate {:?} is invalid -- use the AAA9999 or AAA9A99 format",
                self.plate
            )
        })?;
        Ok(())
    }

    /// Trimmed copy with the plate in canonical form.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        Ok(Self {
            model: self.model.trim().to_owned(),
            plate: parse_plate(&self.plate).map_err(|error| anyhow!("{error}"))?,
            status: self.status,
            km: self.km,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverFormInput {
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub status: DriverStatus,
}

impl DriverFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("driver name is required -- enter a name and retry");
        }
        if !self.license_number.is_empty()
            && !self.license_number.chars().all(|ch| ch.is_ascii_digit())
        {
            bail!("driver license number must contain only digits");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveFormInput {
    pub driver_id: DriverId,
    pub start_date: Date,
    pub end_date: Date,
}

impl LeaveFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.driver_id.get() <= 0 {
            bail!("leave driver is required -- choose a driver and retry");
        }
        if self.end_date < self.start_date {
            bail!("leave end date must be on/after start date");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceFormInput {
    pub vehicle_id: VehicleId,
    pub title: String,
    pub kind: MaintenanceKind,
    pub date: Option<Date>,
    pub cost_cents: i64,
    pub status: MaintenanceStatus,
    pub odometer_km: Option<i64>,
    pub next_service_km: Option<i64>,
}

/// A maintenance record as submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaintenance {
    pub vehicle_id: VehicleId,
    pub title: String,
    pub kind: MaintenanceKind,
    pub date: Option<Date>,
    pub cost_cents: i64,
    pub status: MaintenanceStatus,
    pub odometer_km: Option<i64>,
}

impl MaintenanceFormInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("maintenance title is required -- enter a title and retry");
        }
        if self.vehicle_id.get() <= 0 {
            bail!("maintenance vehicle is required -- choose a vehicle and retry");
        }
        if self.date.is_none() {
            bail!("maintenance date is required -- enter a date and retry");
        }
        if self.cost_cents <= 0 {
            bail!("maintenance cost must be positive");
        }
        for km in [self.odometer_km, self.next_service_km].into_iter().flatten() {
            if km <= 0 {
                bail!("maintenance km values must be positive");
            }
        }
        if let (Some(current), Some(next)) = (self.odometer_km, self.next_service_km)
            && next <= current
        {
            bail!("next service km must be greater than the current odometer reading");
        }
        Ok(())
    }

    pub fn record(&self) -> NewMaintenance {
        NewMaintenance {
            vehicle_id: self.vehicle_id,
            title: self.title.trim().to_owned(),
            kind: self.kind,
            date: self.date,
            cost_cents: self.cost_cents,
            status: self.status,
            odometer_km: self.odometer_km,
        }
    }

    /// The scheduled record implied by a next-service km: no date, no cost,
    /// due at that odometer reading.
    pub fn follow_up(&self) -> Option<NewMaintenance> {
        let due_km = self.next_service_km?;
        Some(NewMaintenance {
            vehicle_id: self.vehicle_id,
            title: format!("Scheduled maintenance: {}", self.title.trim()),
            kind: self.kind,
            date: None,
            cost_cents: 0,
            status: MaintenanceStatus::Scheduled,
            odometer_km: Some(due_km),
        })
    }
}
