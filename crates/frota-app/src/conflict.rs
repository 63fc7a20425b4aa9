// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, PrimitiveDateTime, Time};

use crate::{DriverId, Trip, TripId, VehicleId};

/// The vehicle and time window a trip would occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub vehicle_id: VehicleId,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl Schedule {
    pub fn from_parts(
        vehicle_id: VehicleId,
        start_date: Date,
        start_time: Time,
        end_date: Date,
        end_time: Time,
    ) -> Self {
        Self {
            vehicle_id,
            start: PrimitiveDateTime::new(start_date, start_time),
            end: PrimitiveDateTime::new(end_date, end_time),
        }
    }
}

/// Open-interval overlap: windows that only touch at an endpoint are free.
pub fn overlaps(
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    other_start: PrimitiveDateTime,
    other_end: PrimitiveDateTime,
) -> bool {
    start < other_end && end > other_start
}

/// First trip in `existing` booked on the same vehicle over an overlapping
/// window. `exclude` skips the trip being edited.
pub fn find_conflict<'a>(
    candidate: &Schedule,
    existing: &'a [Trip],
    exclude: Option<TripId>,
) -> Option<&'a Trip> {
    existing.iter().find(|trip| {
        Some(trip.id) != exclude
            && trip.vehicle_id == candidate.vehicle_id
            && overlaps(candidate.start, candidate.end, trip.start, trip.end)
    })
}

/// Same rule keyed by driver.
pub fn find_driver_conflict<'a>(
    driver_id: DriverId,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    existing: &'a [Trip],
    exclude: Option<TripId>,
) -> Option<&'a Trip> {
    existing.iter().find(|trip| {
        Some(trip.id) != exclude
            && trip.driver_id == driver_id
            && overlaps(start, end, trip.start, trip.end)
    })
}

#[cfg(test)]
mod tests {
    use super::{Schedule, find_conflict, find_driver_conflict};
    use crate::{DriverId, Trip, TripId, TripKind, TripStatus, VehicleId};
    use time::PrimitiveDateTime;
    use time::macros::{date, datetime, time};

    fn trip(id: i64, vehicle: i64, start: PrimitiveDateTime, end: PrimitiveDateTime) -> Trip {
        Trip {
            id: TripId::new(id),
            title: format!("Reserva {id}"),
            client_name: "Paulo".to_owned(),
            kind: TripKind::AirportCharter,
            start,
            end,
            start_location: String::new(),
            end_location: String::new(),
            value_cents: 50_000,
            status: TripStatus::Scheduled,
            vehicle_id: VehicleId::new(vehicle),
            driver_id: DriverId::new(id),
        }
    }

    fn schedule(vehicle: i64, start: PrimitiveDateTime, end: PrimitiveDateTime) -> Schedule {
        Schedule {
            vehicle_id: VehicleId::new(vehicle),
            start,
            end,
        }
    }

    #[test]
    fn overlapping_trip_on_same_vehicle_is_reported() {
        let existing = vec![trip(
            1,
            7,
            datetime!(2025-06-25 09:30),
            datetime!(2025-06-30 18:30),
        )];
        let candidate = Schedule::from_parts(
            VehicleId::new(7),
            date!(2025 - 06 - 28),
            time!(08:00),
            date!(2025 - 06 - 29),
            time!(10:00),
        );
        let conflict = find_conflict(&candidate, &existing, None).expect("conflict expected");
        assert_eq!(conflict.id, TripId::new(1));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        let existing = vec![trip(
            1,
            7,
            datetime!(2025-06-25 09:30),
            datetime!(2025-06-30 18:30),
        )];
        let after = schedule(7, datetime!(2025-06-30 18:30), datetime!(2025-07-01 08:00));
        let before = schedule(7, datetime!(2025-06-24 08:00), datetime!(2025-06-25 09:30));
        assert!(find_conflict(&after, &existing, None).is_none());
        assert!(find_conflict(&before, &existing, None).is_none());
    }

    #[test]
    fn excluded_trip_and_other_vehicles_never_match() {
        let existing = vec![
            trip(1, 7, datetime!(2025-06-25 09:30), datetime!(2025-06-30 18:30)),
            trip(2, 8, datetime!(2025-06-25 09:30), datetime!(2025-06-30 18:30)),
        ];
        let candidate = schedule(7, datetime!(2025-06-26 00:00), datetime!(2025-06-27 00:00));
        assert!(find_conflict(&candidate, &existing, Some(TripId::new(1))).is_none());

        let other = schedule(9, datetime!(2025-06-26 00:00), datetime!(2025-06-27 00:00));
        assert!(find_conflict(&other, &existing, None).is_none());
    }

    #[test]
    fn first_conflict_in_collection_order_wins() {
        let existing = vec![
            trip(3, 7, datetime!(2025-06-28 00:00), datetime!(2025-06-29 00:00)),
            trip(1, 7, datetime!(2025-06-25 09:30), datetime!(2025-06-30 18:30)),
        ];
        let candidate = schedule(7, datetime!(2025-06-26 00:00), datetime!(2025-06-30 00:00));
        let conflict = find_conflict(&candidate, &existing, None).expect("conflict expected");
        assert_eq!(conflict.id, TripId::new(3));
    }

    #[test]
    fn containing_window_conflicts() {
        let existing = vec![trip(
            1,
            7,
            datetime!(2025-06-26 10:00),
            datetime!(2025-06-26 12:00),
        )];
        let candidate = schedule(7, datetime!(2025-06-26 00:00), datetime!(2025-06-27 00:00));
        assert!(find_conflict(&candidate, &existing, None).is_some());
    }

    #[test]
    fn driver_conflicts_use_the_same_rule() {
        let existing = vec![trip(
            4,
            7,
            datetime!(2025-06-25 09:30),
            datetime!(2025-06-30 18:30),
        )];
        let hit = find_driver_conflict(
            DriverId::new(4),
            datetime!(2025-06-30 18:00),
            datetime!(2025-07-02 18:00),
            &existing,
            None,
        );
        assert!(hit.is_some());
        let touching = find_driver_conflict(
            DriverId::new(4),
            datetime!(2025-06-30 18:30),
            datetime!(2025-07-02 18:00),
            &existing,
            None,
        );
        assert!(touching.is_none());
    }
}
