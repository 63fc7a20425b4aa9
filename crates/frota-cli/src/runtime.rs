// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use frota_app::conflict::{Schedule, find_conflict};
use frota_app::filter::{DriverFilter, MaintenanceFilter, QuoteFilter, TripFilter, VehicleFilter};
use frota_app::quote::{QuoteParams, QuoteRequest, RouteSummary, compute_quote, render_whatsapp};
use frota_app::validation::{format_cents, format_date, format_datetime};
use frota_app::{AppCommand, AppState, ListFilter, PageKind, PageView, TripId, VehicleId};
use frota_db::Store;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use time::PrimitiveDateTime;
use tracing::debug;

const COMPANY_NAME: &str = "Frota";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Overview,
    List(ListArgs),
    Conflict {
        vehicle: VehicleId,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        exclude: Option<TripId>,
    },
    Quote(QuoteArgs),
    KmLog {
        vehicle: VehicleId,
        clear: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    pub page: PageKind,
    pub search: Option<String>,
    pub filter: Option<String>,
    pub page_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteArgs {
    pub route: PathBuf,
    pub origin: String,
    pub destination: String,
    pub vehicles: u32,
    pub drivers: u32,
    pub days: u32,
    pub extras_cents: i64,
    pub save: bool,
}

pub struct DbRuntime<'a> {
    store: &'a Store,
    state: AppState,
    params: QuoteParams,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store, mut state: AppState, params: QuoteParams) -> Result<Self> {
        state
            .load(store)
            .context("load fleet data -- run with --check to validate the database")?;
        Ok(Self {
            store,
            state,
            params,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs one command and returns the text to print.
    pub fn run(&mut self, command: &Command) -> Result<String> {
        debug!(?command, "running command");
        match command {
            Command::Overview => self.overview(),
            Command::List(args) => self.list(args),
            Command::Conflict {
                vehicle,
                start,
                end,
                exclude,
            } => self.conflict(*vehicle, *start, *end, *exclude),
            Command::Quote(args) => self.quote(args),
            Command::KmLog { vehicle, clear } => self.km_log(*vehicle, *clear),
        }
    }

    fn overview(&self) -> Result<String> {
        let mut out = format!(
            "today {} | theme {}\n",
            format_date(Some(self.state.today)),
            self.state.session.theme.as_str()
        );
        for page in PageKind::ALL {
            let summary = self.state.summary(page);
            writeln!(out, "{:<12} {:>4}", page.label(), summary.matches)?;
        }
        Ok(out)
    }

    fn list(&mut self, args: &ListArgs) -> Result<String> {
        self.state.dispatch(AppCommand::ShowPage(args.page));
        if let Some(search) = &args.search {
            self.state.dispatch(AppCommand::SetSearch(search.clone()));
        }
        if let Some(raw) = &args.filter {
            let filter = parse_filter(args.page, raw)?;
            self.state.dispatch(AppCommand::SetFilter(filter));
        }
        for _ in 1..args.page_number {
            if self.state.dispatch(AppCommand::NextPage).is_empty() {
                break;
            }
        }

        let rows = match args.page {
            PageKind::Planning => {
                let catalog = &self.state.catalog;
                render_rows(self.state.trip_page(), |trip| {
                    format!(
                        "{:>4}  {} -> {}  {}  {}  {}  {}  {}",
                        trip.id.get(),
                        format_datetime(trip.start),
                        format_datetime(trip.end),
                        trip.title,
                        catalog.vehicle_label(trip.vehicle_id),
                        catalog.driver_name(trip.driver_id),
                        trip.status.as_str(),
                        format_cents(trip.value_cents),
                    )
                })
            }
            PageKind::Fleet => {
                let catalog = &self.state.catalog;
                render_rows(self.state.vehicle_page(), |vehicle| {
                    format!(
                        "{:>4}  {}  {}  {}  {} km  {} maintenance",
                        vehicle.id.get(),
                        vehicle.plate,
                        vehicle.model,
                        vehicle.status.as_str(),
                        vehicle.km,
                        catalog.maintenance_for(vehicle.id).count(),
                    )
                })
            }
            PageKind::Drivers => {
                let catalog = &self.state.catalog;
                render_rows(self.state.driver_page(), |driver| {
                    format!(
                        "{:>4}  {}  {}  {}  {} leave",
                        driver.id.get(),
                        driver.name,
                        driver.phone,
                        driver.status.as_str(),
                        catalog.leaves_for(driver.id).count(),
                    )
                })
            }
            PageKind::Maintenance => {
                let catalog = &self.state.catalog;
                render_rows(self.state.maintenance_page(), |item| {
                    format!(
                        "{:>4}  {}  {}  {}  {}  {}",
                        item.id.get(),
                        format_date(item.date),
                        item.title,
                        catalog.vehicle_label(item.vehicle_id),
                        item.status.as_str(),
                        format_cents(item.cost_cents),
                    )
                })
            }
            PageKind::Quotes => render_rows(self.state.quote_page(), |quote| {
                format!(
                    "{:>4}  {}  {}  {}",
                    quote.id.get(),
                    quote.title,
                    quote.status.as_str(),
                    format_cents(quote.breakdown.total_cents),
                )
            }),
        };
        Ok(rows)
    }

    fn conflict(
        &self,
        vehicle: VehicleId,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        exclude: Option<TripId>,
    ) -> Result<String> {
        if end < start {
            bail!("--end must not be before --start");
        }
        if self.state.catalog.vehicle(vehicle).is_none() {
            bail!("vehicle {vehicle} not found -- run `frota vehicles` to list vehicle ids");
        }
        let schedule = Schedule {
            vehicle_id: vehicle,
            start,
            end,
        };
        Ok(
            match find_conflict(&schedule, &self.state.catalog.trips, exclude) {
                Some(trip) => format!(
                    "conflict: {} is booked for {:?} (trip {}) from {} to {}\n",
                    self.state.catalog.vehicle_label(vehicle),
                    trip.title,
                    trip.id.get(),
                    format_datetime(trip.start),
                    format_datetime(trip.end),
                ),
                None => format!(
                    "free: {} has no booking in that window\n",
                    self.state.catalog.vehicle_label(vehicle)
                ),
            },
        )
    }

    fn km_log(&mut self, vehicle: VehicleId, clear: bool) -> Result<String> {
        let label = self.state.catalog.vehicle_label(vehicle);
        if clear {
            self.state.clear_km_log(self.store, vehicle)?;
            let status = self.state.status_line.as_deref().unwrap_or_default();
            return Ok(format!("{label}: {status}\n"));
        }
        let entries = self.state.km_log(self.store, vehicle)?;
        let mut out = format!("{label}: {} odometer entries\n", entries.len());
        for entry in &entries {
            let reference = entry
                .reference_id
                .map(|id| format!(" #{id}"))
                .unwrap_or_default();
            writeln!(
                out,
                "{}  {} -> {} km  {}{reference}",
                format_datetime(entry.recorded_at),
                entry.previous_km,
                entry.current_km,
                entry.origin.as_str(),
            )?;
        }
        Ok(out)
    }

    fn quote(&mut self, args: &QuoteArgs) -> Result<String> {
        let raw = fs::read_to_string(&args.route)
            .with_context(|| format!("read route file {}", args.route.display()))?;
        let route = RouteSummary::from_routes_json(&raw)
            .with_context(|| format!("route file {}", args.route.display()))?;
        let params = self.params.with_extras(args.extras_cents);
        let breakdown = compute_quote(&route, &params, args.vehicles, args.drivers, args.days);

        let mut out = String::new();
        writeln!(out, "distance      {} km", route.distance_km())?;
        writeln!(out, "distance cost {}", format_cents(breakdown.distance_cents))?;
        writeln!(out, "tolls         {}", format_cents(breakdown.toll_cents))?;
        writeln!(out, "fuel          {}", format_cents(breakdown.fuel_cents))?;
        writeln!(out, "drivers       {}", format_cents(breakdown.driver_cents))?;
        writeln!(out, "extras        {}", format_cents(breakdown.extras_cents))?;
        writeln!(out, "total         {}", format_cents(breakdown.total_cents))?;

        if args.save {
            let request = QuoteRequest {
                origin: args.origin.clone(),
                destination: args.destination.clone(),
                stops: Vec::new(),
                vehicle_count: args.vehicles,
                driver_count: args.drivers,
                day_count: args.days,
                params,
            };
            self.state.save_quote(self.store, request, &route)?;
            let quote = self
                .state
                .catalog
                .quotes
                .first()
                .ok_or_else(|| anyhow!("saved quote is missing from the catalog"))?;
            writeln!(out, "\nsaved quote {}\n", quote.id)?;
            out.push_str(&render_whatsapp(quote, COMPANY_NAME));
            out.push('\n');
        }
        Ok(out)
    }
}

fn render_rows<T>(view: PageView<'_, T>, row: impl Fn(&T) -> String) -> String {
    let mut out = format!(
        "page {}/{} ({} matches)\n",
        view.page_number,
        view.total_pages.max(1),
        view.matches
    );
    for item in view.items {
        out.push_str(&row(item));
        out.push('\n');
    }
    out
}

fn parse_filter(page: PageKind, raw: &str) -> Result<ListFilter> {
    let parsed = match page {
        PageKind::Planning => TripFilter::parse(raw).map(ListFilter::Trips),
        PageKind::Fleet => VehicleFilter::parse(raw).map(ListFilter::Vehicles),
        PageKind::Drivers => DriverFilter::parse(raw).map(ListFilter::Drivers),
        PageKind::Maintenance => MaintenanceFilter::parse(raw).map(ListFilter::Maintenance),
        PageKind::Quotes => QuoteFilter::parse(raw).map(ListFilter::Quotes),
    };
    parsed.ok_or_else(|| {
        anyhow!(
            "unknown {} filter {raw:?}; use \"all\" or a status name",
            page.label()
        )
    })
}
