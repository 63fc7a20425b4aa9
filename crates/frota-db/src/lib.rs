// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use frota_app::conflict::{Schedule, find_conflict, find_driver_conflict};
use frota_app::quote::{QuoteBreakdown, QuoteRequest};
use frota_app::validation::parse_plate;
use frota_app::{
    Backend, BackendError, BackendResult, Driver, DriverFormInput, DriverId, DriverStatus,
    KmChangeOrigin, KmLogEntry, KmLogId, Leave, LeaveFormInput, LeaveId, Maintenance,
    MaintenanceId, MaintenanceKind, MaintenanceStatus, NewMaintenance, NewQuote, NewTrip, Quote,
    QuoteId, QuoteStatus, Snapshot, Trip, TripId, TripKind, TripStatus, Vehicle,
    VehicleFormInput, VehicleId, VehicleStatus,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::{date, datetime, format_description};
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

pub const APP_NAME: &str = "frota";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "vehicles",
        &["id", "model", "plate", "status", "km", "created_at", "updated_at"],
    ),
    (
        "drivers",
        &[
            "id",
            "name",
            "phone",
            "license_number",
            "status",
            "created_at",
            "updated_at",
        ],
    ),
    (
        "trips",
        &[
            "id",
            "title",
            "client_name",
            "kind",
            "start_at",
            "end_at",
            "start_location",
            "end_location",
            "value_cents",
            "status",
            "vehicle_id",
            "driver_id",
            "created_at",
            "updated_at",
        ],
    ),
    (
        "leaves",
        &["id", "driver_id", "start_date", "end_date", "created_at"],
    ),
    (
        "maintenance",
        &[
            "id",
            "vehicle_id",
            "title",
            "kind",
            "service_date",
            "cost_cents",
            "status",
            "odometer_km",
            "created_at",
            "updated_at",
        ],
    ),
    (
        "km_log",
        &[
            "id",
            "vehicle_id",
            "recorded_at",
            "previous_km",
            "current_km",
            "origin",
            "reference_id",
        ],
    ),
    (
        "quotes",
        &[
            "id",
            "title",
            "client_name",
            "status",
            "request_json",
            "distance_meters",
            "distance_cents",
            "toll_cents",
            "fuel_cents",
            "driver_cents",
            "extras_cents",
            "total_cents",
            "created_at",
            "updated_at",
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_trips_vehicle_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_trips_vehicle_id ON trips (vehicle_id, start_at);",
    },
    RequiredIndex {
        name: "idx_trips_driver_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_trips_driver_id ON trips (driver_id, start_at);",
    },
    RequiredIndex {
        name: "idx_leaves_driver_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_leaves_driver_id ON leaves (driver_id);",
    },
    RequiredIndex {
        name: "idx_maintenance_vehicle_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_maintenance_vehicle_id ON maintenance (vehicle_id);",
    },
    RequiredIndex {
        name: "idx_km_log_vehicle_id",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_km_log_vehicle_id ON km_log (vehicle_id, recorded_at);",
    },
];

const TRIP_COLUMNS: &str = "
    id, title, client_name, kind, start_at, end_at, start_location,
    end_location, value_cents, status, vehicle_id, driver_id
";

const QUOTE_COLUMNS: &str = "
    id, title, client_name, status, request_json, distance_meters,
    distance_cents, toll_cents, fuel_cents, driver_cents, extras_cents, total_cents
";

/// A write the store refuses on business grounds, as opposed to a storage
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Rejection(pub String);

fn reject<T>(message: impl Into<String>) -> Result<T> {
    Err(Rejection(message.into()).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    Trips,
    Vehicles,
    Drivers,
    Leaves,
    Maintenance,
    KmLog,
    Quotes,
}

impl Table {
    const fn name(self) -> &'static str {
        match self {
            Self::Trips => "trips",
            Self::Vehicles => "vehicles",
            Self::Drivers => "drivers",
            Self::Leaves => "leaves",
            Self::Maintenance => "maintenance",
            Self::KmLog => "km_log",
            Self::Quotes => "quotes",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Trips => "trip",
            Self::Vehicles => "vehicle",
            Self::Drivers => "driver",
            Self::Leaves => "leave",
            Self::Maintenance => "maintenance record",
            Self::KmLog => "odometer entry",
            Self::Quotes => "quote",
        }
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            info!("created database schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    /// Loads the demo fleet into an empty database. A database that already
    /// has vehicles is left alone.
    pub fn seed_demo_data(&self) -> Result<()> {
        if self.count(Table::Vehicles)? > 0 {
            debug!("database already has vehicles; skipping demo data");
            return Ok(());
        }

        let vehicles = [
            ("Sprinter 416", "GHF5G42", VehicleStatus::Active, 118_500),
            ("Van Ducato", "ABC1D23", VehicleStatus::Inactive, 210_000),
            ("Ônibus Executivo", "XYZ8T90", VehicleStatus::InMaintenance, 64_300),
        ];
        let mut vehicle_ids = Vec::with_capacity(vehicles.len());
        for (model, plate, status, km) in vehicles {
            vehicle_ids.push(self.insert_vehicle(&VehicleFormInput {
                model: model.to_owned(),
                plate: plate.to_owned(),
                status,
                km: Some(km),
            })?);
        }

        let drivers = [
            (
                "Robson Almeida",
                "(31) 99999-1111",
                "01234567890",
                DriverStatus::Active,
            ),
            (
                "Carlos Pereira",
                "(31) 99999-2222",
                "09876543210",
                DriverStatus::Active,
            ),
            (
                "Ana Souza",
                "(31) 99999-3333",
                "05432167890",
                DriverStatus::OnLeave,
            ),
            (
                "Marcos Lima",
                "(31) 99999-4444",
                "01234567899",
                DriverStatus::Inactive,
            ),
        ];
        let mut driver_ids = Vec::with_capacity(drivers.len());
        for (name, phone, license_number, status) in drivers {
            driver_ids.push(self.insert_driver(&DriverFormInput {
                name: name.to_owned(),
                phone: phone.to_owned(),
                license_number: license_number.to_owned(),
                status,
            })?);
        }

        let pickup = "Buscar passageiros no bairro Palmares e deixá-los no aeroporto de Confins";
        let dropoff = "Retornar com passageiros do aeroporto de Confins até o bairro Palmares";
        let trips = [
            (
                "Reserva Juliana",
                "Juliana Camargo",
                datetime!(2025-06-15 09:30),
                datetime!(2025-06-18 18:30),
                70_000,
                0,
            ),
            (
                "Reserva Paulo",
                "Paulo Alves",
                datetime!(2025-06-19 09:30),
                datetime!(2025-06-22 18:30),
                50_000,
                1,
            ),
            (
                "Reserva Paulo",
                "Paulo Alves",
                datetime!(2025-07-21 09:30),
                datetime!(2025-07-30 18:30),
                50_000,
                1,
            ),
            (
                "Reserva Paulo",
                "Paulo Alves",
                datetime!(2025-08-25 09:30),
                datetime!(2025-08-30 18:30),
                50_000,
                1,
            ),
        ];
        for (title, client_name, start, end, value_cents, index) in trips {
            self.insert_trip(&NewTrip {
                title: title.to_owned(),
                client_name: client_name.to_owned(),
                kind: TripKind::AirportCharter,
                start,
                end,
                start_location: pickup.to_owned(),
                end_location: dropoff.to_owned(),
                value_cents,
                status: TripStatus::Scheduled,
                vehicle_id: vehicle_ids[index],
                driver_id: driver_ids[index],
            })?;
        }

        let maintenance = [
            (
                0,
                "Troca de Óleo e Filtros",
                MaintenanceKind::Preventive,
                date!(2025 - 06 - 20),
                45_050,
                MaintenanceStatus::Completed,
                Some(120_000),
            ),
            (
                1,
                "Revisão dos Freios",
                MaintenanceKind::Corrective,
                date!(2025 - 05 - 15),
                80_000,
                MaintenanceStatus::Completed,
                Some(205_000),
            ),
            (
                0,
                "Alinhamento e Balanceamento",
                MaintenanceKind::Preventive,
                date!(2025 - 07 - 10),
                25_000,
                MaintenanceStatus::Scheduled,
                None,
            ),
        ];
        for (index, title, kind, service_date, cost_cents, status, odometer_km) in maintenance {
            self.insert_maintenance(&NewMaintenance {
                vehicle_id: vehicle_ids[index],
                title: title.to_owned(),
                kind,
                date: Some(service_date),
                cost_cents,
                status,
                odometer_km,
            })?;
        }

        info!(
            vehicles = vehicle_ids.len(),
            drivers = driver_ids.len(),
            "seeded demo data"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            trips: self.list_trips()?,
            vehicles: self.list_vehicles()?,
            drivers: self.list_drivers()?,
            leaves: self.list_leaves()?,
            maintenance: self.list_maintenance()?,
            quotes: self.list_quotes()?,
        })
    }

    pub fn list_trips(&self) -> Result<Vec<Trip>> {
        let sql = format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY start_at ASC, id ASC");
        let mut stmt = self.conn.prepare(&sql).context("prepare trips query")?;
        let rows = stmt.query_map([], trip_from_row).context("query trips")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect trips")
    }

    pub fn get_trip(&self, trip_id: TripId) -> Result<Trip> {
        let sql = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?");
        self.conn
            .query_row(&sql, params![trip_id.get()], trip_from_row)
            .optional()
            .with_context(|| format!("load trip {trip_id}"))?
            .ok_or_else(|| anyhow!("trip {trip_id} not found"))
    }

    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, model, plate, status, km FROM vehicles ORDER BY id ASC")
            .context("prepare vehicles query")?;
        let rows = stmt
            .query_map([], |row| {
                let status: String = row.get(3)?;
                Ok(Vehicle {
                    id: VehicleId::new(row.get(0)?),
                    model: row.get(1)?,
                    plate: row.get(2)?,
                    status: parse_enum(&status, VehicleStatus::parse, "vehicle status")?,
                    km: row.get(4)?,
                })
            })
            .context("query vehicles")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect vehicles")
    }

    pub fn list_drivers(&self) -> Result<Vec<Driver>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, phone, license_number, status FROM drivers ORDER BY id ASC",
            )
            .context("prepare drivers query")?;
        let rows = stmt
            .query_map([], |row| {
                let status: String = row.get(4)?;
                Ok(Driver {
                    id: DriverId::new(row.get(0)?),
                    name: row.get(1)?,
                    phone: row.get(2)?,
                    license_number: row.get(3)?,
                    status: parse_enum(&status, DriverStatus::parse, "driver status")?,
                })
            })
            .context("query drivers")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect drivers")
    }

    pub fn list_leaves(&self) -> Result<Vec<Leave>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, driver_id, start_date, end_date FROM leaves ORDER BY start_date ASC, id ASC",
            )
            .context("prepare leaves query")?;
        let rows = stmt
            .query_map([], |row| {
                let start_raw: String = row.get(2)?;
                let end_raw: String = row.get(3)?;
                Ok(Leave {
                    id: LeaveId::new(row.get(0)?),
                    driver_id: DriverId::new(row.get(1)?),
                    start_date: parse_date(&start_raw).map_err(to_sql_error)?,
                    end_date: parse_date(&end_raw).map_err(to_sql_error)?,
                })
            })
            .context("query leaves")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect leaves")
    }

    pub fn list_maintenance(&self) -> Result<Vec<Maintenance>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT
                  id, vehicle_id, title, kind, service_date, cost_cents,
                  status, odometer_km
                FROM maintenance
                ORDER BY id ASC
                ",
            )
            .context("prepare maintenance query")?;
        let rows = stmt
            .query_map([], |row| {
                let kind: String = row.get(3)?;
                let service_date: Option<String> = row.get(4)?;
                let status: String = row.get(6)?;
                Ok(Maintenance {
                    id: MaintenanceId::new(row.get(0)?),
                    vehicle_id: VehicleId::new(row.get(1)?),
                    title: row.get(2)?,
                    kind: parse_enum(&kind, MaintenanceKind::parse, "maintenance kind")?,
                    date: service_date
                        .as_deref()
                        .map(parse_date)
                        .transpose()
                        .map_err(to_sql_error)?,
                    cost_cents: row.get(5)?,
                    status: parse_enum(&status, MaintenanceStatus::parse, "maintenance status")?,
                    odometer_km: row.get(7)?,
                })
            })
            .context("query maintenance")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect maintenance")
    }

    /// Odometer history of one vehicle, oldest first.
    pub fn odometer_history(&self, vehicle_id: VehicleId) -> Result<Vec<KmLogEntry>> {
        self.require_exists(Table::Vehicles, vehicle_id.get())?;
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT
                  id, vehicle_id, recorded_at, previous_km, current_km, origin,
                  reference_id
                FROM km_log
                WHERE vehicle_id = ?
                ORDER BY recorded_at ASC, id ASC
                ",
            )
            .context("prepare odometer history query")?;
        let rows = stmt
            .query_map(params![vehicle_id.get()], |row| {
                let recorded_raw: String = row.get(2)?;
                let origin: String = row.get(5)?;
                Ok(KmLogEntry {
                    id: KmLogId::new(row.get(0)?),
                    vehicle_id: VehicleId::new(row.get(1)?),
                    recorded_at: parse_datetime(&recorded_raw).map_err(to_sql_error)?,
                    previous_km: row.get(3)?,
                    current_km: row.get(4)?,
                    origin: parse_enum(&origin, KmChangeOrigin::parse, "odometer origin")?,
                    reference_id: row.get(6)?,
                })
            })
            .context("query odometer history")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect odometer history")
    }

    /// Deletes every odometer entry of one vehicle.
    pub fn clear_odometer_history(&self, vehicle_id: VehicleId) -> Result<usize> {
        self.require_exists(Table::Vehicles, vehicle_id.get())?;
        let removed = self
            .conn
            .execute(
                &format!("DELETE FROM {} WHERE vehicle_id = ?", Table::KmLog.name()),
                params![vehicle_id.get()],
            )
            .with_context(|| format!("clear odometer history of vehicle {vehicle_id}"))?;
        info!(vehicle_id = %vehicle_id, removed, "cleared odometer history");
        Ok(removed)
    }

    /// Most recent first.
    pub fn list_quotes(&self) -> Result<Vec<Quote>> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes ORDER BY id DESC");
        let mut stmt = self.conn.prepare(&sql).context("prepare quotes query")?;
        let rows = stmt.query_map([], quote_from_row).context("query quotes")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect quotes")
    }

    pub fn get_quote(&self, quote_id: QuoteId) -> Result<Quote> {
        let sql = format!("SELECT {QUOTE_COLUMNS} FROM quotes WHERE id = ?");
        self.conn
            .query_row(&sql, params![quote_id.get()], quote_from_row)
            .optional()
            .with_context(|| format!("load quote {quote_id}"))?
            .map_or_else(|| reject(format!("quote {quote_id} not found")), Ok)
    }

    fn check_trip(&self, trip: &NewTrip, exclude: Option<TripId>) -> Result<()> {
        if trip.end < trip.start {
            return reject("trip return cannot be before departure");
        }
        self.require_exists(Table::Vehicles, trip.vehicle_id.get())?;
        self.require_exists(Table::Drivers, trip.driver_id.get())?;

        let existing = self.list_trips()?;
        let schedule = Schedule {
            vehicle_id: trip.vehicle_id,
            start: trip.start,
            end: trip.end,
        };
        if let Some(conflict) = find_conflict(&schedule, &existing, exclude) {
            return reject(format!(
                "schedule conflict: vehicle is already booked for {:?} (trip {}) in this period",
                conflict.title, conflict.id
            ));
        }
        if let Some(conflict) =
            find_driver_conflict(trip.driver_id, trip.start, trip.end, &existing, exclude)
        {
            return reject(format!(
                "schedule conflict: driver is already on {:?} (trip {}) in this period",
                conflict.title, conflict.id
            ));
        }
        Ok(())
    }

    fn insert_trip(&self, trip: &NewTrip) -> Result<TripId> {
        self.check_trip(trip, None)?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO trips (
                  title, client_name, kind, start_at, end_at, start_location,
                  end_location, value_cents, status, vehicle_id, driver_id,
                  created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    trip.title,
                    trip.client_name,
                    trip.kind.as_str(),
                    format_datetime(trip.start),
                    format_datetime(trip.end),
                    trip.start_location,
                    trip.end_location,
                    trip.value_cents,
                    trip.status.as_str(),
                    trip.vehicle_id.get(),
                    trip.driver_id.get(),
                    now,
                    now,
                ],
            )
            .context("insert trip")?;
        Ok(TripId::new(self.conn.last_insert_rowid()))
    }

    fn write_trip(&self, trip_id: TripId, trip: &NewTrip) -> Result<()> {
        self.require_exists(Table::Trips, trip_id.get())?;
        self.check_trip(trip, Some(trip_id))?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                UPDATE trips
                SET
                  title = ?,
                  client_name = ?,
                  kind = ?,
                  start_at = ?,
                  end_at = ?,
                  start_location = ?,
                  end_location = ?,
                  value_cents = ?,
                  status = ?,
                  vehicle_id = ?,
                  driver_id = ?,
                  updated_at = ?
                WHERE id = ?
                ",
                params![
                    trip.title,
                    trip.client_name,
                    trip.kind.as_str(),
                    format_datetime(trip.start),
                    format_datetime(trip.end),
                    trip.start_location,
                    trip.end_location,
                    trip.value_cents,
                    trip.status.as_str(),
                    trip.vehicle_id.get(),
                    trip.driver_id.get(),
                    now,
                    trip_id.get(),
                ],
            )
            .context("update trip")?;
        Ok(())
    }

    fn check_plate(&self, plate: &str, exclude: Option<VehicleId>) -> Result<String> {
        let plate = parse_plate(plate).map_err(|_| {
            Rejection(format!(
                "plate {plate:?} is invalid -- use AAA9999 or AAA9A99"
            ))
        })?;
        let taken: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM vehicles WHERE plate = ? AND id != ?",
                params![plate, exclude.map_or(0, VehicleId::get)],
                |row| row.get(0),
            )
            .optional()
            .context("check plate uniqueness")?;
        if taken.is_some() {
            return reject(format!("plate {plate} is already registered"));
        }
        Ok(plate)
    }

    fn insert_vehicle(&self, vehicle: &VehicleFormInput) -> Result<VehicleId> {
        let plate = self.check_plate(&vehicle.plate, None)?;
        let km = check_km(vehicle.km)?.unwrap_or(0);
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO vehicles (model, plate, status, km, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
                params![vehicle.model.trim(), plate, vehicle.status.as_str(), km, now, now],
            )
            .context("insert vehicle")?;
        Ok(VehicleId::new(self.conn.last_insert_rowid()))
    }

    /// A changed km reading is written to the odometer history.
    fn write_vehicle(&self, vehicle_id: VehicleId, vehicle: &VehicleFormInput) -> Result<()> {
        self.require_exists(Table::Vehicles, vehicle_id.get())?;
        let plate = self.check_plate(&vehicle.plate, Some(vehicle_id))?;
        let km = check_km(vehicle.km)?;
        let now = now_rfc3339()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin vehicle update")?;
        self.conn
            .execute(
                "UPDATE vehicles SET model = ?, plate = ?, status = ?, updated_at = ? WHERE id = ?",
                params![
                    vehicle.model.trim(),
                    plate,
                    vehicle.status.as_str(),
                    now,
                    vehicle_id.get()
                ],
            )
            .context("update vehicle")?;
        if let Some(km) = km {
            let previous = self.vehicle_km(vehicle_id)?;
            if km != previous {
                self.set_vehicle_km(vehicle_id, km)?;
                self.insert_km_log(vehicle_id, previous, km, KmChangeOrigin::VehicleEdit, None)?;
            }
        }
        tx.commit().context("commit vehicle update")?;
        Ok(())
    }

    fn vehicle_km(&self, vehicle_id: VehicleId) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT km FROM vehicles WHERE id = ?",
                params![vehicle_id.get()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("read km of vehicle {vehicle_id}"))?
            .map_or_else(|| reject(format!("vehicle {vehicle_id} not found")), Ok)
    }

    fn set_vehicle_km(&self, vehicle_id: VehicleId, km: i64) -> Result<()> {
        self.conn
            .execute(
                "UPDATE vehicles SET km = ?, updated_at = ? WHERE id = ?",
                params![km, now_rfc3339()?, vehicle_id.get()],
            )
            .with_context(|| format!("update km of vehicle {vehicle_id}"))?;
        Ok(())
    }

    fn insert_km_log(
        &self,
        vehicle_id: VehicleId,
        previous_km: i64,
        current_km: i64,
        origin: KmChangeOrigin,
        reference_id: Option<i64>,
    ) -> Result<KmLogId> {
        let now = OffsetDateTime::now_utc();
        let recorded_at = PrimitiveDateTime::new(now.date(), now.time());
        self.conn
            .execute(
                "
                INSERT INTO km_log (
                  vehicle_id, recorded_at, previous_km, current_km, origin, reference_id
                ) VALUES (?, ?, ?, ?, ?, ?)
                ",
                params![
                    vehicle_id.get(),
                    format_datetime(recorded_at),
                    previous_km,
                    current_km,
                    origin.as_str(),
                    reference_id,
                ],
            )
            .context("insert odometer entry")?;
        let id = KmLogId::new(self.conn.last_insert_rowid());
        debug!(
            vehicle_id = %vehicle_id,
            previous_km,
            current_km,
            origin = origin.as_str(),
            "odometer moved"
        );
        Ok(id)
    }

    /// A completed service whose reading is past the vehicle's km moves the
    /// odometer and records the change against the maintenance id.
    fn advance_odometer(
        &self,
        maintenance_id: MaintenanceId,
        item: &NewMaintenance,
    ) -> Result<bool> {
        let Some(reading) = item.odometer_km else {
            return Ok(false);
        };
        if item.status != MaintenanceStatus::Completed {
            return Ok(false);
        }
        let previous = self.vehicle_km(item.vehicle_id)?;
        if reading <= previous {
            return Ok(false);
        }
        self.set_vehicle_km(item.vehicle_id, reading)?;
        self.insert_km_log(
            item.vehicle_id,
            previous,
            reading,
            KmChangeOrigin::Maintenance,
            Some(maintenance_id.get()),
        )?;
        Ok(true)
    }

    fn get_vehicle(&self, vehicle_id: VehicleId) -> Result<Vehicle> {
        self.list_vehicles()?
            .into_iter()
            .find(|vehicle| vehicle.id == vehicle_id)
            .ok_or_else(|| anyhow!("vehicle {vehicle_id} not found"))
    }

    fn check_driver(&self, driver: &DriverFormInput, exclude: Option<DriverId>) -> Result<()> {
        let exclude = exclude.map_or(0, DriverId::get);
        let name_taken: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM drivers WHERE name = ? AND id != ?",
                params![driver.name.trim(), exclude],
                |row| row.get(0),
            )
            .context("check driver name")?;
        if name_taken > 0 {
            return reject(format!("driver {:?} is already registered", driver.name.trim()));
        }
        let phone = driver.phone.trim();
        if !phone.is_empty() {
            let phone_taken: i64 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM drivers WHERE phone = ? AND id != ?",
                    params![phone, exclude],
                    |row| row.get(0),
                )
                .context("check driver phone")?;
            if phone_taken > 0 {
                return reject(format!("phone {phone} is already registered"));
            }
        }
        Ok(())
    }

    fn insert_driver(&self, driver: &DriverFormInput) -> Result<DriverId> {
        self.check_driver(driver, None)?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO drivers (name, phone, license_number, status, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
                params![
                    driver.name.trim(),
                    driver.phone.trim(),
                    driver.license_number.trim(),
                    driver.status.as_str(),
                    now,
                    now
                ],
            )
            .context("insert driver")?;
        Ok(DriverId::new(self.conn.last_insert_rowid()))
    }

    fn write_driver(&self, driver_id: DriverId, driver: &DriverFormInput) -> Result<()> {
        self.require_exists(Table::Drivers, driver_id.get())?;
        self.check_driver(driver, Some(driver_id))?;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                UPDATE drivers
                SET name = ?, phone = ?, license_number = ?, status = ?, updated_at = ?
                WHERE id = ?
                ",
                params![
                    driver.name.trim(),
                    driver.phone.trim(),
                    driver.license_number.trim(),
                    driver.status.as_str(),
                    now,
                    driver_id.get()
                ],
            )
            .context("update driver")?;
        Ok(())
    }

    fn get_driver(&self, driver_id: DriverId) -> Result<Driver> {
        self.list_drivers()?
            .into_iter()
            .find(|driver| driver.id == driver_id)
            .ok_or_else(|| anyhow!("driver {driver_id} not found"))
    }

    fn insert_leave(&self, leave: &LeaveFormInput) -> Result<LeaveId> {
        if leave.end_date < leave.start_date {
            return reject("leave start date cannot be after its end date");
        }
        self.require_exists(Table::Drivers, leave.driver_id.get())?;

        let overlapping = self
            .list_leaves()?
            .into_iter()
            .any(|existing| {
                existing.driver_id == leave.driver_id
                    && existing.start_date <= leave.end_date
                    && leave.start_date <= existing.end_date
            });
        if overlapping {
            return reject("driver already has leave booked on the selected dates");
        }

        let booked = self.list_trips()?.into_iter().any(|trip| {
            trip.driver_id == leave.driver_id
                && trip.status == TripStatus::Scheduled
                && trip.start.date() <= leave.end_date
                && leave.start_date <= trip.end.date()
        });
        if booked {
            return reject(
                "driver has a scheduled trip during the leave -- cancel the trip or adjust the dates",
            );
        }

        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO leaves (driver_id, start_date, end_date, created_at)
                VALUES (?, ?, ?, ?)
                ",
                params![
                    leave.driver_id.get(),
                    format_date(leave.start_date),
                    format_date(leave.end_date),
                    now
                ],
            )
            .context("insert leave")?;
        Ok(LeaveId::new(self.conn.last_insert_rowid()))
    }

    fn insert_maintenance(&self, item: &NewMaintenance) -> Result<MaintenanceId> {
        self.require_exists(Table::Vehicles, item.vehicle_id.get())?;
        let now = now_rfc3339()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin maintenance insert")?;
        self.conn
            .execute(
                "
                INSERT INTO maintenance (
                  vehicle_id, title, kind, service_date, cost_cents, status,
                  odometer_km, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    item.vehicle_id.get(),
                    item.title,
                    item.kind.as_str(),
                    item.date.map(format_date),
                    item.cost_cents,
                    item.status.as_str(),
                    item.odometer_km,
                    now,
                    now,
                ],
            )
            .context("insert maintenance")?;
        let id = MaintenanceId::new(self.conn.last_insert_rowid());
        if self.advance_odometer(id, item)? {
            info!(maintenance_id = %id, vehicle_id = %item.vehicle_id, "service moved odometer");
        }
        tx.commit().context("commit maintenance insert")?;
        Ok(id)
    }

    fn write_maintenance(
        &self,
        maintenance_id: MaintenanceId,
        item: &NewMaintenance,
    ) -> Result<()> {
        self.require_exists(Table::Maintenance, maintenance_id.get())?;
        self.require_exists(Table::Vehicles, item.vehicle_id.get())?;
        let now = now_rfc3339()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin maintenance update")?;
        self.conn
            .execute(
                "
                UPDATE maintenance
                SET
                  vehicle_id = ?,
                  title = ?,
                  kind = ?,
                  service_date = ?,
                  cost_cents = ?,
                  status = ?,
                  odometer_km = ?,
                  updated_at = ?
                WHERE id = ?
                ",
                params![
                    item.vehicle_id.get(),
                    item.title,
                    item.kind.as_str(),
                    item.date.map(format_date),
                    item.cost_cents,
                    item.status.as_str(),
                    item.odometer_km,
                    now,
                    maintenance_id.get(),
                ],
            )
            .context("update maintenance")?;
        if self.advance_odometer(maintenance_id, item)? {
            info!(
                maintenance_id = %maintenance_id,
                vehicle_id = %item.vehicle_id,
                "service moved odometer"
            );
        }
        tx.commit().context("commit maintenance update")?;
        Ok(())
    }

    fn insert_quote(&self, quote: &NewQuote) -> Result<QuoteId> {
        let request_json =
            serde_json::to_string(&quote.request).context("encode quote request")?;
        let distance_meters =
            i64::try_from(quote.distance_meters).context("quote distance out of range")?;
        let breakdown = &quote.breakdown;
        let now = now_rfc3339()?;
        self.conn
            .execute(
                "
                INSERT INTO quotes (
                  title, client_name, status, request_json, distance_meters,
                  distance_cents, toll_cents, fuel_cents, driver_cents,
                  extras_cents, total_cents, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
                params![
                    quote.title,
                    quote.client_name,
                    quote.status.as_str(),
                    request_json,
                    distance_meters,
                    breakdown.distance_cents,
                    breakdown.toll_cents,
                    breakdown.fuel_cents,
                    breakdown.driver_cents,
                    breakdown.extras_cents,
                    breakdown.total_cents,
                    now,
                    now,
                ],
            )
            .context("insert quote")?;
        Ok(QuoteId::new(self.conn.last_insert_rowid()))
    }

    fn write_quote_status(&self, quote_id: QuoteId, status: QuoteStatus) -> Result<()> {
        let now = now_rfc3339()?;
        let rows_affected = self
            .conn
            .execute(
                "UPDATE quotes SET status = ?, updated_at = ? WHERE id = ?",
                params![status.as_str(), now, quote_id.get()],
            )
            .context("update quote status")?;
        if rows_affected == 0 {
            return reject(format!("quote {quote_id} not found"));
        }
        Ok(())
    }

    fn ensure_can_delete(&self, table: Table, id: i64) -> Result<()> {
        let (column, dependents) = match table {
            Table::Vehicles => ("vehicle_id", Table::Trips),
            Table::Drivers => ("driver_id", Table::Trips),
            _ => return Ok(()),
        };
        let count: i64 = self
            .conn
            .query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE {column} = ?",
                    dependents.name()
                ),
                params![id],
                |row| row.get(0),
            )
            .with_context(|| format!("count trips for {} {id}", table.label()))?;
        if count > 0 {
            return reject(format!(
                "cannot delete {} {id} because {count} trip(s) reference it; delete those trips first",
                table.label()
            ));
        }
        Ok(())
    }

    fn delete_row(&self, table: Table, id: i64) -> Result<()> {
        self.ensure_can_delete(table, id)?;
        let rows_affected = self
            .conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?", table.name()),
                params![id],
            )
            .with_context(|| format!("delete {} {id}", table.label()))?;
        if rows_affected == 0 {
            return reject(format!("{} {id} not found", table.label()));
        }
        info!(table = table.name(), id, "deleted row");
        Ok(())
    }

    fn require_exists(&self, table: Table, id: i64) -> Result<()> {
        let exists: i64 = self
            .conn
            .query_row(
                &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", table.name()),
                params![id],
                |row| row.get(0),
            )
            .with_context(|| format!("look up {} {id}", table.label()))?;
        if exists != 1 {
            return reject(format!("{} {id} not found", table.label()));
        }
        Ok(())
    }

    fn count(&self, table: Table) -> Result<i64> {
        self.conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", table.name()),
                [],
                |row| row.get(0),
            )
            .with_context(|| format!("count {}", table.name()))
    }
}

impl Backend for Store {
    fn load(&self) -> BackendResult<Snapshot> {
        self.snapshot().map_err(backend_error)
    }

    fn create_trip(&self, trip: &NewTrip) -> BackendResult<Trip> {
        let id = self.insert_trip(trip).map_err(backend_error)?;
        debug!(trip_id = %id, "trip inserted");
        Ok(trip.clone().with_id(id))
    }

    fn update_trip(&self, id: TripId, trip: &NewTrip) -> BackendResult<Trip> {
        self.write_trip(id, trip).map_err(backend_error)?;
        Ok(trip.clone().with_id(id))
    }

    fn delete_trip(&self, id: TripId) -> BackendResult<()> {
        self.delete_row(Table::Trips, id.get()).map_err(backend_error)
    }

    fn create_vehicle(&self, vehicle: &VehicleFormInput) -> BackendResult<Vehicle> {
        self.insert_vehicle(vehicle)
            .and_then(|id| self.get_vehicle(id))
            .map_err(backend_error)
    }

    fn update_vehicle(&self, id: VehicleId, vehicle: &VehicleFormInput) -> BackendResult<Vehicle> {
        self.write_vehicle(id, vehicle)
            .and_then(|()| self.get_vehicle(id))
            .map_err(backend_error)
    }

    fn delete_vehicle(&self, id: VehicleId) -> BackendResult<()> {
        self.delete_row(Table::Vehicles, id.get())
            .map_err(backend_error)
    }

    fn list_km_log(&self, vehicle_id: VehicleId) -> BackendResult<Vec<KmLogEntry>> {
        self.odometer_history(vehicle_id).map_err(backend_error)
    }

    fn clear_km_log(&self, vehicle_id: VehicleId) -> BackendResult<usize> {
        self.clear_odometer_history(vehicle_id).map_err(backend_error)
    }

    fn create_driver(&self, driver: &DriverFormInput) -> BackendResult<Driver> {
        self.insert_driver(driver)
            .and_then(|id| self.get_driver(id))
            .map_err(backend_error)
    }

    fn update_driver(&self, id: DriverId, driver: &DriverFormInput) -> BackendResult<Driver> {
        self.write_driver(id, driver)
            .and_then(|()| self.get_driver(id))
            .map_err(backend_error)
    }

    fn delete_driver(&self, id: DriverId) -> BackendResult<()> {
        self.delete_row(Table::Drivers, id.get())
            .map_err(backend_error)
    }

    fn create_leave(&self, leave: &LeaveFormInput) -> BackendResult<Leave> {
        let id = self.insert_leave(leave).map_err(backend_error)?;
        Ok(Leave {
            id,
            driver_id: leave.driver_id,
            start_date: leave.start_date,
            end_date: leave.end_date,
        })
    }

    fn delete_leave(&self, id: LeaveId) -> BackendResult<()> {
        self.delete_row(Table::Leaves, id.get()).map_err(backend_error)
    }

    fn create_maintenance(&self, item: &NewMaintenance) -> BackendResult<Maintenance> {
        let id = self.insert_maintenance(item).map_err(backend_error)?;
        Ok(maintenance_with_id(id, item))
    }

    fn update_maintenance(
        &self,
        id: MaintenanceId,
        item: &NewMaintenance,
    ) -> BackendResult<Maintenance> {
        self.write_maintenance(id, item).map_err(backend_error)?;
        Ok(maintenance_with_id(id, item))
    }

    fn delete_maintenance(&self, id: MaintenanceId) -> BackendResult<()> {
        self.delete_row(Table::Maintenance, id.get())
            .map_err(backend_error)
    }

    fn create_quote(&self, quote: &NewQuote) -> BackendResult<Quote> {
        let id = self.insert_quote(quote).map_err(backend_error)?;
        Ok(quote.clone().with_id(id))
    }

    fn set_quote_status(&self, id: QuoteId, status: QuoteStatus) -> BackendResult<Quote> {
        self.write_quote_status(id, status)
            .and_then(|()| self.get_quote(id))
            .map_err(backend_error)
    }

    fn delete_quote(&self, id: QuoteId) -> BackendResult<()> {
        self.delete_row(Table::Quotes, id.get()).map_err(backend_error)
    }
}

/// Rejections keep their message; anything else means the store itself
/// failed.
fn backend_error(error: anyhow::Error) -> BackendError {
    match error.downcast_ref::<Rejection>() {
        Some(rejection) => {
            info!(reason = %rejection, "store rejected write");
            BackendError::Rejected(rejection.0.clone())
        }
        None => {
            warn!(error = %format!("{error:#}"), "store failure");
            BackendError::Unavailable(format!("{error:#}"))
        }
    }
}

fn check_km(km: Option<i64>) -> Result<Option<i64>> {
    match km {
        Some(km) if km < 0 => reject(format!("vehicle km must not be negative, got {km}")),
        other => Ok(other),
    }
}

fn maintenance_with_id(id: MaintenanceId, item: &NewMaintenance) -> Maintenance {
    Maintenance {
        id,
        vehicle_id: item.vehicle_id,
        title: item.title.clone(),
        kind: item.kind,
        date: item.date,
        cost_cents: item.cost_cents,
        status: item.status,
        odometer_km: item.odometer_km,
    }
}

fn trip_from_row(row: &Row<'_>) -> rusqlite::Result<Trip> {
    let kind: String = row.get(3)?;
    let start_raw: String = row.get(4)?;
    let end_raw: String = row.get(5)?;
    let status: String = row.get(9)?;
    Ok(Trip {
        id: TripId::new(row.get(0)?),
        title: row.get(1)?,
        client_name: row.get(2)?,
        kind: parse_enum(&kind, TripKind::parse, "trip kind")?,
        start: parse_datetime(&start_raw).map_err(to_sql_error)?,
        end: parse_datetime(&end_raw).map_err(to_sql_error)?,
        start_location: row.get(6)?,
        end_location: row.get(7)?,
        value_cents: row.get(8)?,
        status: parse_enum(&status, TripStatus::parse, "trip status")?,
        vehicle_id: VehicleId::new(row.get(10)?),
        driver_id: DriverId::new(row.get(11)?),
    })
}

fn quote_from_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    let status: String = row.get(3)?;
    let request_raw: String = row.get(4)?;
    let distance_meters: i64 = row.get(5)?;
    let request: QuoteRequest = serde_json::from_str(&request_raw)
        .map_err(|error| to_sql_error(anyhow::Error::new(error).context("decode quote request")))?;
    Ok(Quote {
        id: QuoteId::new(row.get(0)?),
        title: row.get(1)?,
        client_name: row.get(2)?,
        status: parse_enum(&status, QuoteStatus::parse, "quote status")?,
        request,
        distance_meters: u64::try_from(distance_meters)
            .map_err(|_| to_sql_error(anyhow!("negative quote distance {distance_meters}")))?,
        breakdown: QuoteBreakdown {
            distance_cents: row.get(6)?,
            toll_cents: row.get(7)?,
            fuel_cents: row.get(8)?,
            driver_cents: row.get(9)?,
            extras_cents: row.get(10)?,
            total_cents: row.get(11)?,
        },
    })
}

fn parse_enum<T>(raw: &str, parse: fn(&str) -> Option<T>, what: &str) -> rusqlite::Result<T> {
    parse(raw).ok_or_else(|| to_sql_error(anyhow!("unknown {what} {raw:?}")))
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("FROTA_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set FROTA_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("frota.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use a frota database or migrate first"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    let names = rows
        .collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))?;
    Ok(names)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}

fn parse_datetime(raw: &str) -> Result<PrimitiveDateTime> {
    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ) {
        return Ok(value);
    }

    bail!("unsupported datetime format {raw:?}")
}

fn parse_date(raw: &str) -> Result<Date> {
    if let Ok(value) = Date::parse(raw, &format_description!("[year]-[month]-[day]")) {
        return Ok(value);
    }

    let date_time = parse_datetime(raw)?;
    Ok(date_time.date())
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "1970-01-01".to_owned())
}

fn format_datetime(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| "1970-01-01 00:00:00".to_owned())
}
