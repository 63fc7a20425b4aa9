// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use frota_app::quote::{QuoteParams, QuoteRequest, RouteSummary, compute_quote, new_quote};
use frota_app::{
    Backend, BackendError, DriverId, KmChangeOrigin, LeaveFormInput, LeaveId, MaintenanceId,
    MaintenanceKind, MaintenanceStatus, NewMaintenance, NewTrip, QuoteStatus, TripId, TripKind,
    TripStatus, VehicleFormInput, VehicleId, VehicleStatus,
};
use frota_db::{Store, validate_db_path};
use frota_testkit::{FleetFaker, reference_today, temp_db_path};
use std::collections::BTreeSet;
use time::PrimitiveDateTime;
use time::macros::{date, datetime};

fn seeded_store() -> Result<Store> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.seed_demo_data()?;
    Ok(store)
}

fn trip(
    vehicle: i64,
    driver: i64,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> NewTrip {
    NewTrip {
        title: "Reserva Teste".to_owned(),
        client_name: "Cliente Teste".to_owned(),
        kind: TripKind::AirportCharter,
        start,
        end,
        start_location: "Savassi".to_owned(),
        end_location: "Aeroporto de Confins".to_owned(),
        value_cents: 30_000,
        status: TripStatus::Scheduled,
        vehicle_id: VehicleId::new(vehicle),
        driver_id: DriverId::new(driver),
    }
}

fn rejection(result: Result<impl std::fmt::Debug, BackendError>) -> String {
    match result {
        Err(BackendError::Rejected(message)) => message,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/frota.db").is_ok());
}

#[test]
fn bootstrap_creates_empty_schema() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let snapshot = store.load()?;
    assert!(snapshot.trips.is_empty());
    assert!(snapshot.vehicles.is_empty());
    assert!(snapshot.quotes.is_empty());
    Ok(())
}

#[test]
fn reopening_a_database_keeps_its_rows() -> Result<()> {
    let (_dir, path) = temp_db_path()?;
    {
        let store = Store::open(&path)?;
        store.bootstrap()?;
        store.seed_demo_data()?;
    }

    let store = Store::open(&path)?;
    store.bootstrap()?;
    assert_eq!(store.list_vehicles()?.len(), 3);
    assert_eq!(store.list_trips()?.len(), 4);
    Ok(())
}

#[test]
fn bootstrap_rejects_schema_missing_required_column() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    store.raw_connection().execute_batch(
        "
            PRAGMA foreign_keys = OFF;
            ALTER TABLE vehicles RENAME TO vehicles_old;
            CREATE TABLE vehicles (
              id INTEGER PRIMARY KEY,
              model TEXT NOT NULL,
              plate TEXT NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            DROP TABLE vehicles_old;
            ",
    )?;

    let err = store
        .bootstrap()
        .expect_err("schema validation should fail");
    let message = err.to_string();
    assert!(message.contains("table `vehicles` is missing required columns"));
    assert!(message.contains("status"));
    Ok(())
}

#[test]
fn demo_data_matches_the_sample_fleet() -> Result<()> {
    let store = seeded_store()?;
    let snapshot = store.load()?;

    assert_eq!(snapshot.vehicles.len(), 3);
    assert_eq!(snapshot.drivers.len(), 4);
    assert_eq!(snapshot.trips.len(), 4);
    assert_eq!(snapshot.maintenance.len(), 3);
    assert_eq!(snapshot.vehicles[0].plate, "GHF5G42");
    assert_eq!(snapshot.vehicles[2].status, VehicleStatus::InMaintenance);
    assert_eq!(snapshot.vehicles[0].km, 120_000, "completed service moved the odometer");
    assert_eq!(snapshot.vehicles[1].km, 210_000, "older reading left it alone");
    assert_eq!(snapshot.trips[0].title, "Reserva Juliana");
    assert_eq!(snapshot.trips[0].start, datetime!(2025-06-15 09:30));
    assert_eq!(
        snapshot.maintenance[0].date,
        Some(date!(2025 - 06 - 20))
    );
    Ok(())
}

#[test]
fn duplicate_plate_is_rejected_after_normalizing() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_vehicle(&VehicleFormInput {
        model: "Outra Sprinter".to_owned(),
        plate: "ghf-5g42".to_owned(),
        status: VehicleStatus::Active,
        km: None,
    }));
    assert!(message.contains("GHF5G42 is already registered"), "{message}");

    let updated = store.update_vehicle(
        VehicleId::new(1),
        &VehicleFormInput {
            model: "Sprinter 416 CDI".to_owned(),
            plate: "ghf5g42".to_owned(),
            status: VehicleStatus::Active,
            km: None,
        },
    )?;
    assert_eq!(updated.plate, "GHF5G42");
    assert_eq!(updated.model, "Sprinter 416 CDI");
    assert_eq!(updated.km, 120_000, "an absent reading keeps the stored km");
    Ok(())
}

#[test]
fn malformed_plate_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_vehicle(&VehicleFormInput {
        model: "Van".to_owned(),
        plate: "12AB".to_owned(),
        status: VehicleStatus::Active,
        km: None,
    }));
    assert!(message.contains("invalid"), "{message}");
    Ok(())
}

#[test]
fn overlapping_vehicle_booking_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_trip(&trip(
        1,
        2,
        datetime!(2025-06-16 08:00),
        datetime!(2025-06-16 12:00),
    )));
    assert!(message.contains("vehicle is already booked"), "{message}");
    assert!(message.contains("Reserva Juliana"), "{message}");
    Ok(())
}

#[test]
fn back_to_back_booking_is_allowed() -> Result<()> {
    let store = seeded_store()?;
    let saved = store.create_trip(&trip(
        1,
        2,
        datetime!(2025-06-18 18:30),
        datetime!(2025-06-19 08:00),
    ))?;
    assert_eq!(store.list_trips()?.len(), 5);
    assert_eq!(store.get_trip(saved.id)?.start, datetime!(2025-06-18 18:30));
    Ok(())
}

#[test]
fn overlapping_driver_booking_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_trip(&trip(
        3,
        1,
        datetime!(2025-06-17 10:00),
        datetime!(2025-06-17 16:00),
    )));
    assert!(message.contains("driver is already on"), "{message}");
    Ok(())
}

#[test]
fn return_before_departure_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_trip(&trip(
        3,
        4,
        datetime!(2025-09-02 10:00),
        datetime!(2025-09-01 10:00),
    )));
    assert!(message.contains("before departure"), "{message}");
    Ok(())
}

#[test]
fn editing_a_trip_does_not_conflict_with_itself() -> Result<()> {
    let store = seeded_store()?;
    let updated = store.update_trip(
        TripId::new(1),
        &trip(
            1,
            1,
            datetime!(2025-06-15 10:30),
            datetime!(2025-06-18 19:30),
        ),
    )?;
    assert_eq!(updated.id, TripId::new(1));
    assert_eq!(store.get_trip(TripId::new(1))?.title, "Reserva Teste");
    Ok(())
}

#[test]
fn unknown_vehicle_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_trip(&trip(
        99,
        1,
        datetime!(2025-10-01 10:00),
        datetime!(2025-10-01 12:00),
    )));
    assert_eq!(message, "vehicle 99 not found");
    Ok(())
}

#[test]
fn overlapping_leave_is_rejected_inclusively() -> Result<()> {
    let store = seeded_store()?;
    let driver_id = DriverId::new(3);
    let first = store.create_leave(&LeaveFormInput {
        driver_id,
        start_date: date!(2025 - 07 - 01),
        end_date: date!(2025 - 07 - 05),
    })?;
    assert_eq!(first.driver_id, driver_id);

    let message = rejection(store.create_leave(&LeaveFormInput {
        driver_id,
        start_date: date!(2025 - 07 - 05),
        end_date: date!(2025 - 07 - 10),
    }));
    assert!(message.contains("already has leave"), "{message}");

    store.create_leave(&LeaveFormInput {
        driver_id,
        start_date: date!(2025 - 07 - 06),
        end_date: date!(2025 - 07 - 10),
    })?;
    assert_eq!(store.list_leaves()?.len(), 2);
    Ok(())
}

#[test]
fn leave_over_a_scheduled_trip_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.create_leave(&LeaveFormInput {
        driver_id: DriverId::new(1),
        start_date: date!(2025 - 06 - 17),
        end_date: date!(2025 - 06 - 17),
    }));
    assert!(message.contains("cancel the trip"), "{message}");
    Ok(())
}

#[test]
fn deleting_a_booked_vehicle_is_rejected_until_trips_go() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.delete_vehicle(VehicleId::new(1)));
    assert!(message.contains("1 trip(s) reference it"), "{message}");

    store.delete_trip(TripId::new(1))?;
    store.delete_vehicle(VehicleId::new(1))?;

    let snapshot = store.load()?;
    assert_eq!(snapshot.vehicles.len(), 2);
    assert!(
        snapshot
            .maintenance
            .iter()
            .all(|item| item.vehicle_id != VehicleId::new(1)),
        "maintenance should go with its vehicle"
    );
    Ok(())
}

#[test]
fn deleting_a_missing_record_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    assert_eq!(
        rejection(store.delete_leave(LeaveId::new(42))),
        "leave 42 not found"
    );
    Ok(())
}

#[test]
fn maintenance_round_trips_optional_fields() -> Result<()> {
    let store = seeded_store()?;
    let saved = store.create_maintenance(&NewMaintenance {
        vehicle_id: VehicleId::new(3),
        title: "Troca de pneus".to_owned(),
        kind: MaintenanceKind::Corrective,
        date: None,
        cost_cents: 120_000,
        status: MaintenanceStatus::Scheduled,
        odometer_km: Some(152_300),
    })?;

    let stored = store
        .list_maintenance()?
        .into_iter()
        .find(|item| item.id == saved.id)
        .expect("saved maintenance should be listed");
    assert_eq!(stored, saved);
    assert_eq!(stored.date, None);
    Ok(())
}

#[test]
fn quotes_persist_and_change_status() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let route = RouteSummary::new(100_000);
    let params = QuoteParams::default();
    let mut ids = Vec::new();
    for destination in ["Ouro Preto", "Inhotim"] {
        let request = QuoteRequest {
            origin: "Belo Horizonte".to_owned(),
            destination: destination.to_owned(),
            stops: vec!["Itabirito".to_owned()],
            vehicle_count: 1,
            driver_count: 1,
            day_count: 2,
            params,
        };
        let breakdown = compute_quote(&route, &params, 1, 1, 2);
        ids.push(store.create_quote(&new_quote(request, &route, breakdown))?.id);
    }

    let quotes = store.list_quotes()?;
    assert_eq!(quotes[0].id, ids[1]);
    assert_eq!(quotes[1].request.stops, vec!["Itabirito".to_owned()]);
    assert_eq!(quotes[1].distance_meters, 100_000);

    let approved = store.set_quote_status(ids[0], QuoteStatus::Approved)?;
    assert_eq!(approved.status, QuoteStatus::Approved);
    assert_eq!(approved.title, "Orçamento: Belo Horizonte para Ouro Preto");
    Ok(())
}

#[test]
fn storage_failure_is_reported_as_unavailable() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.raw_connection().execute_batch("DROP TABLE quotes;")?;

    match store.load() {
        Err(BackendError::Unavailable(message)) => {
            assert!(message.contains("quotes"), "{message}");
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
    Ok(())
}

#[test]
fn generated_fleet_saves_cleanly() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let mut faker = FleetFaker::new(42);
    let mut plates = BTreeSet::new();
    for _ in 0..8 {
        let vehicle = faker.vehicle();
        if plates.insert(vehicle.plate.clone()) {
            store.create_vehicle(&vehicle)?;
        }
    }
    let mut names = BTreeSet::new();
    for _ in 0..6 {
        let driver = faker.driver();
        if names.insert(driver.name.clone()) {
            store.create_driver(&driver)?;
        }
    }

    let vehicles = store.list_vehicles()?;
    let drivers = store.list_drivers()?;
    assert_eq!(vehicles.len(), plates.len());
    assert_eq!(drivers.len(), names.len());

    // Three days apart, so no two bookings share a vehicle or driver window.
    let mut day = reference_today();
    for (vehicle, driver) in vehicles.iter().zip(drivers.iter().cycle()) {
        store.create_trip(&faker.trip_on(day, vehicle.id, driver.id))?;
        day += time::Duration::days(3);
    }
    assert_eq!(store.list_trips()?.len(), vehicles.len());

    let clash = faker.trip_on(reference_today(), vehicles[0].id, drivers[0].id);
    let message = rejection(store.create_trip(&clash));
    assert!(message.contains("schedule conflict"), "{message}");
    Ok(())
}

fn service(vehicle: i64, status: MaintenanceStatus, km: Option<i64>) -> NewMaintenance {
    NewMaintenance {
        vehicle_id: VehicleId::new(vehicle),
        title: "Troca de Óleo".to_owned(),
        kind: MaintenanceKind::Preventive,
        date: Some(date!(2025 - 06 - 20)),
        cost_cents: 45_050,
        status,
        odometer_km: km,
    }
}

#[test]
fn completed_service_past_the_odometer_is_logged() -> Result<()> {
    let store = seeded_store()?;
    let van = VehicleId::new(3);
    let saved =
        store.create_maintenance(&service(3, MaintenanceStatus::Completed, Some(70_000)))?;

    let history = store.list_km_log(van)?;
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.vehicle_id, van);
    assert_eq!((entry.previous_km, entry.current_km), (64_300, 70_000));
    assert_eq!(entry.origin, KmChangeOrigin::Maintenance);
    assert_eq!(entry.reference_id, Some(saved.id.get()));

    let vehicle = store.list_vehicles()?.into_iter().find(|v| v.id == van);
    assert_eq!(vehicle.map(|v| v.km), Some(70_000));
    Ok(())
}

#[test]
fn scheduled_lower_or_missing_readings_leave_the_odometer_alone() -> Result<()> {
    let store = seeded_store()?;
    let van = VehicleId::new(3);
    store.create_maintenance(&service(3, MaintenanceStatus::Scheduled, Some(90_000)))?;
    store.create_maintenance(&service(3, MaintenanceStatus::Completed, Some(64_300)))?;
    store.create_maintenance(&service(3, MaintenanceStatus::Completed, Some(50_000)))?;
    store.create_maintenance(&service(3, MaintenanceStatus::Completed, None))?;

    assert!(store.list_km_log(van)?.is_empty());
    let vehicle = store.list_vehicles()?.into_iter().find(|v| v.id == van);
    assert_eq!(vehicle.map(|v| v.km), Some(64_300));
    Ok(())
}

#[test]
fn completing_a_scheduled_service_logs_on_update() -> Result<()> {
    let store = seeded_store()?;
    let van = VehicleId::new(3);
    let planned =
        store.create_maintenance(&service(3, MaintenanceStatus::Scheduled, Some(66_000)))?;
    assert!(store.list_km_log(van)?.is_empty());

    store.update_maintenance(
        planned.id,
        &service(3, MaintenanceStatus::Completed, Some(66_000)),
    )?;
    let history = store.list_km_log(van)?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reference_id, Some(planned.id.get()));
    Ok(())
}

#[test]
fn editing_the_vehicle_km_is_logged_as_an_edit() -> Result<()> {
    let store = seeded_store()?;
    let van = VehicleId::new(3);
    let form = VehicleFormInput {
        model: "Ônibus Executivo".to_owned(),
        plate: "XYZ8T90".to_owned(),
        status: VehicleStatus::Active,
        km: Some(65_000),
    };
    assert_eq!(store.update_vehicle(van, &form)?.km, 65_000);
    store.update_vehicle(van, &form)?;

    let history = store.list_km_log(van)?;
    assert_eq!(history.len(), 1, "an unchanged reading is not logged again");
    assert_eq!(history[0].origin, KmChangeOrigin::VehicleEdit);
    assert_eq!(history[0].reference_id, None);

    let negative = VehicleFormInput {
        km: Some(-10),
        ..form
    };
    let message = rejection(store.update_vehicle(van, &negative));
    assert!(message.contains("must not be negative"), "{message}");
    Ok(())
}

#[test]
fn odometer_history_is_cleared_per_vehicle() -> Result<()> {
    let store = seeded_store()?;
    store.create_maintenance(&service(3, MaintenanceStatus::Completed, Some(70_000)))?;
    store.create_maintenance(&service(3, MaintenanceStatus::Completed, Some(75_000)))?;

    let readings: Vec<i64> = store
        .list_km_log(VehicleId::new(3))?
        .iter()
        .map(|entry| entry.current_km)
        .collect();
    assert_eq!(readings, vec![70_000, 75_000]);

    assert_eq!(store.clear_km_log(VehicleId::new(3))?, 2);
    assert!(store.list_km_log(VehicleId::new(3))?.is_empty());
    assert_eq!(store.list_km_log(VehicleId::new(1))?.len(), 1, "other vehicles keep theirs");
    Ok(())
}

#[test]
fn odometer_history_of_an_unknown_vehicle_is_rejected() -> Result<()> {
    let store = seeded_store()?;
    assert_eq!(rejection(store.list_km_log(VehicleId::new(99))), "vehicle 99 not found");
    assert_eq!(rejection(store.clear_km_log(VehicleId::new(99))), "vehicle 99 not found");
    Ok(())
}

#[test]
fn service_on_a_missing_record_leaves_the_odometer_alone() -> Result<()> {
    let store = seeded_store()?;
    let message = rejection(store.update_maintenance(
        MaintenanceId::new(99),
        &service(3, MaintenanceStatus::Completed, Some(80_000)),
    ));
    assert!(message.contains("not found"), "{message}");
    assert!(store.list_km_log(VehicleId::new(3))?.is_empty());
    Ok(())
}
