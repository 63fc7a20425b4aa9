// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Search and status filtering for the entity lists.
//!
//! Derived filters (trips in progress, drivers on duty) depend on the
//! current day, which callers pass in; nothing here reads the clock.

use time::Date;

use crate::{
    Driver, DriverStatus, Maintenance, MaintenanceStatus, Quote, QuoteStatus, Trip, TripStatus,
    Vehicle, VehicleStatus,
};

pub type SearchField<T> = fn(&T) -> &str;

/// Keeps items that pass `keep` and contain `search` (case-insensitive) in
/// any of `fields`. An empty search matches everything; whitespace in the
/// term is matched literally.
pub fn filter<'a, T>(
    items: &'a [T],
    search: &str,
    fields: &[SearchField<T>],
    keep: impl Fn(&T) -> bool,
) -> Vec<&'a T> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| keep(item))
        .filter(|item| {
            needle.is_empty()
                || fields
                    .iter()
                    .any(|field| field(item).to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TripFilter {
    #[default]
    All,
    Status(TripStatus),
    InProgress,
    Upcoming,
    Done,
}

impl TripFilter {
    pub fn matches(self, trip: &Trip, today: Date) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => trip.status == status,
            Self::InProgress => trip.spans(today),
            Self::Upcoming => trip.start.date() > today,
            Self::Done => trip.end.date() < today,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
            Self::InProgress => "in_progress",
            Self::Upcoming => "upcoming",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "in_progress" => Some(Self::InProgress),
            "upcoming" => Some(Self::Upcoming),
            "done" => Some(Self::Done),
            other => TripStatus::parse(other).map(Self::Status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VehicleFilter {
    #[default]
    All,
    Status(VehicleStatus),
}

impl VehicleFilter {
    pub fn matches(self, vehicle: &Vehicle) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => vehicle.status == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            other => VehicleStatus::parse(other).map(Self::Status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriverFilter {
    #[default]
    All,
    Status(DriverStatus),
    OnDuty,
}

impl DriverFilter {
    pub fn matches(self, driver: &Driver, trips: &[Trip], today: Date) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => driver.status == status,
            Self::OnDuty => is_on_duty(driver, trips, today),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
            Self::OnDuty => "on_duty",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "on_duty" => Some(Self::OnDuty),
            other => DriverStatus::parse(other).map(Self::Status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaintenanceFilter {
    #[default]
    All,
    Status(MaintenanceStatus),
}

impl MaintenanceFilter {
    pub fn matches(self, item: &Maintenance) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => item.status == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            other => MaintenanceStatus::parse(other).map(Self::Status),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteFilter {
    #[default]
    All,
    Status(QuoteStatus),
}

impl QuoteFilter {
    pub fn matches(self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => quote.status == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            other => QuoteStatus::parse(other).map(Self::Status),
        }
    }
}

/// A driver is on duty when one of their trips spans `today`.
pub fn is_on_duty(driver: &Driver, trips: &[Trip], today: Date) -> bool {
    trips
        .iter()
        .any(|trip| trip.driver_id == driver.id && trip.spans(today))
}

pub fn filter_trips<'a>(
    trips: &'a [Trip],
    search: &str,
    by: TripFilter,
    today: Date,
) -> Vec<&'a Trip> {
    filter(trips, search, &[trip_title, trip_client], |trip| {
        by.matches(trip, today)
    })
}

pub fn filter_vehicles<'a>(
    vehicles: &'a [Vehicle],
    search: &str,
    by: VehicleFilter,
) -> Vec<&'a Vehicle> {
    filter(vehicles, search, &[vehicle_model, vehicle_plate], |vehicle| {
        by.matches(vehicle)
    })
}

pub fn filter_drivers<'a>(
    drivers: &'a [Driver],
    search: &str,
    by: DriverFilter,
    trips: &[Trip],
    today: Date,
) -> Vec<&'a Driver> {
    filter(drivers, search, &[driver_name], |driver| {
        by.matches(driver, trips, today)
    })
}

pub fn filter_maintenance<'a>(
    items: &'a [Maintenance],
    search: &str,
    by: MaintenanceFilter,
) -> Vec<&'a Maintenance> {
    filter(items, search, &[maintenance_title], |item| by.matches(item))
}

pub fn filter_quotes<'a>(quotes: &'a [Quote], search: &str, by: QuoteFilter) -> Vec<&'a Quote> {
    filter(quotes, search, &[quote_title, quote_client], |quote| {
        by.matches(quote)
    })
}

fn trip_title(trip: &Trip) -> &str {
    &trip.title
}

fn trip_client(trip: &Trip) -> &str {
    &trip.client_name
}

fn vehicle_model(vehicle: &Vehicle) -> &str {
    &vehicle.model
}

fn vehicle_plate(vehicle: &Vehicle) -> &str {
    &vehicle.plate
}

fn driver_name(driver: &Driver) -> &str {
    &driver.name
}

fn maintenance_title(item: &Maintenance) -> &str {
    &item.title
}

fn quote_title(quote: &Quote) -> &str {
    &quote.title
}

fn quote_client(quote: &Quote) -> &str {
    &quote.client_name
}
