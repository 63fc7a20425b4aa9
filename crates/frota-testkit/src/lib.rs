// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use frota_app::{
    DriverFormInput, DriverId, DriverStatus, NewTrip, Region, TripKind, TripStatus,
    VehicleFormInput, VehicleId, VehicleStatus,
};
use std::path::PathBuf;
use time::macros::{date, time};
use time::{Date, Duration, PrimitiveDateTime};

const VEHICLE_MODELS: [&str; 10] = [
    "Sprinter 416",
    "Sprinter 516",
    "Van Ducato",
    "Master Minibus",
    "Daily 30-150",
    "Marcopolo Volare",
    "Ônibus Executivo",
    "Ônibus Rodoviário",
    "Micro-ônibus Urbano",
    "Transit Minibus",
];

const FIRST_NAMES: [&str; 16] = [
    "Robson", "Carlos", "Ana", "Marcos", "Juliana", "Paulo", "Beatriz", "Rafael", "Fernanda",
    "Lucas", "Mariana", "Thiago", "Camila", "Gustavo", "Patrícia", "Rodrigo",
];
const LAST_NAMES: [&str; 14] = [
    "Almeida", "Pereira", "Souza", "Lima", "Camargo", "Alves", "Costa", "Ribeiro", "Martins",
    "Carvalho", "Gomes", "Rocha", "Barbosa", "Teixeira",
];

const PLACES: [&str; 12] = [
    "Aeroporto de Confins",
    "Savassi",
    "Pampulha",
    "Palmares",
    "Ouro Preto",
    "Inhotim",
    "Tiradentes",
    "Sete Lagoas",
    "Contagem",
    "Betim",
    "Nova Lima",
    "Rodoviária de Belo Horizonte",
];

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const REFERENCE_TODAY: Date = date!(2025 - 06 - 16);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for fleet fixtures. The same seed always yields the same
/// sequence of records.
#[derive(Debug, Clone)]
pub struct FleetFaker {
    rng: DeterministicRng,
}

impl FleetFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// Legacy `AAA9999` or Mercosul `AAA9A99`, picked at random.
    pub fn plate(&mut self) -> String {
        let mut plate = String::with_capacity(7);
        for _ in 0..3 {
            plate.push(self.letter());
        }
        plate.push(self.digit());
        if self.rng.bool() {
            plate.push(self.letter());
        } else {
            plate.push(self.digit());
        }
        plate.push(self.digit());
        plate.push(self.digit());
        plate
    }

    pub fn vehicle(&mut self) -> VehicleFormInput {
        let status = match self.rng.int_n(6) {
            0 => VehicleStatus::InMaintenance,
            1 => VehicleStatus::Inactive,
            _ => VehicleStatus::Active,
        };
        VehicleFormInput {
            model: self.pick(&VEHICLE_MODELS).to_owned(),
            plate: self.plate(),
            status,
            km: Some(self.int_range(0, 300_000)),
        }
    }

    pub fn driver(&mut self) -> DriverFormInput {
        let status = match self.rng.int_n(6) {
            0 => DriverStatus::OnLeave,
            1 => DriverStatus::Inactive,
            _ => DriverStatus::Active,
        };
        let phone_suffix = self.int_range(1000, 9999);
        let mut license_number = String::with_capacity(11);
        for _ in 0..11 {
            license_number.push(self.digit());
        }
        DriverFormInput {
            name: self.person_name(),
            phone: format!("(31) 9{:04}-{phone_suffix:04}", self.int_range(1000, 9999)),
            license_number,
            status,
        }
    }

    /// A scheduled trip for `vehicle_id`/`driver_id` starting on `day` at a
    /// random morning hour and lasting one to three days.
    pub fn trip_on(&mut self, day: Date, vehicle_id: VehicleId, driver_id: DriverId) -> NewTrip {
        let hour = self.int_range(6, 11) as u8;
        let start = PrimitiveDateTime::new(day, time!(00:00)) + Duration::hours(i64::from(hour));
        let end = start + Duration::days(self.int_range(0, 2)) + Duration::hours(8);
        let client_name = self.person_name();
        let origin = self.pick(&PLACES);
        let destination = self.pick(&PLACES);
        let kind = match self.rng.int_n(4) {
            0 => TripKind::AirportCharter,
            1 => TripKind::RoundTrip(Region::InState),
            2 => TripKind::OneWay(Region::OutOfState),
            _ => TripKind::EmployeeRoute,
        };
        NewTrip {
            title: format!("Reserva {}", first_word(&client_name)),
            client_name,
            kind,
            start,
            end,
            start_location: origin.to_owned(),
            end_location: destination.to_owned(),
            value_cents: self.int_range(20_000, 150_000),
            status: TripStatus::Scheduled,
            vehicle_id,
            driver_id,
        }
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn letter(&mut self) -> char {
        char::from(LETTERS[self.rng.int_n(LETTERS.len())])
    }

    fn digit(&mut self) -> char {
        char::from(b'0' + self.rng.int_n(10) as u8)
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

fn first_word(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("frota.db");
    Ok((dir, db_path))
}

/// The "today" used by filter and paging fixtures; it falls inside the demo
/// fleet's first booking.
pub fn reference_today() -> Date {
    REFERENCE_TODAY
}
