// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::num::NonZeroUsize;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendError, BackendResult};
use crate::catalog::{Catalog, remove, upsert};
use crate::conflict::{Schedule, find_conflict, overlaps};
use crate::error::{SaveError, SaveResult};
use crate::filter::{
    DriverFilter, MaintenanceFilter, QuoteFilter, TripFilter, VehicleFilter, filter_drivers,
    filter_maintenance, filter_quotes, filter_trips, filter_vehicles,
};
use crate::forms::{
    DriverFormInput, LeaveFormInput, MaintenanceFormInput, TripFormInput, TripPlan,
    VehicleFormInput,
};
use crate::paging::{DEFAULT_PAGE_SIZE, Pager, total_pages};
use crate::quote::{QuoteRequest, RouteSummary, compute_quote, new_quote, trip_form_from_quote};
use crate::session::{InactivityTimer, Session};
use crate::{
    Driver, DriverId, KmLogEntry, LeaveId, Maintenance, MaintenanceId, NewTrip, PageKind, Quote,
    QuoteId, QuoteStatus, Theme, Trip, TripId, Vehicle, VehicleId,
};

/// Search text, filter and page for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<F> {
    pub search: String,
    pub filter: F,
    pub pager: Pager,
}

impl<F: Default> ViewState<F> {
    fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search: String::new(),
            filter: F::default(),
            pager: Pager::new(page_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Trips(TripFilter),
    Vehicles(VehicleFilter),
    Drivers(DriverFilter),
    Maintenance(MaintenanceFilter),
    Quotes(QuoteFilter),
}

impl ListFilter {
    pub fn page(self) -> PageKind {
        match self {
            Self::Trips(_) => PageKind::Planning,
            Self::Vehicles(_) => PageKind::Fleet,
            Self::Drivers(_) => PageKind::Drivers,
            Self::Maintenance(_) => PageKind::Maintenance,
            Self::Quotes(_) => PageKind::Quotes,
        }
    }
}

const TRIP_PAGES: &[PageKind] = &[PageKind::Planning, PageKind::Drivers];

/// A stored record, by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Trip(TripId),
    Vehicle(VehicleId),
    Driver(DriverId),
    Leave(LeaveId),
    Maintenance(MaintenanceId),
    Quote(QuoteId),
}

impl Record {
    pub fn label(self) -> &'static str {
        match self {
            Self::Trip(_) => "trip",
            Self::Vehicle(_) => "vehicle",
            Self::Driver(_) => "driver",
            Self::Leave(_) => "leave",
            Self::Maintenance(_) => "maintenance",
            Self::Quote(_) => "quote",
        }
    }

    /// Lists whose contents depend on this record. Trips also drive the
    /// on-duty driver filter, and a vehicle owns its maintenance records.
    pub fn pages(self) -> &'static [PageKind] {
        match self {
            Self::Trip(_) => TRIP_PAGES,
            Self::Vehicle(_) => &[PageKind::Fleet, PageKind::Maintenance],
            Self::Driver(_) | Self::Leave(_) => &[PageKind::Drivers],
            Self::Maintenance(_) => &[PageKind::Maintenance],
            Self::Quote(_) => &[PageKind::Quotes],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    pub page: PageKind,
    pub page_number: usize,
    pub total_pages: usize,
    pub matches: usize,
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    ShowPage(PageKind),
    NextPage,
    PrevPage,
    SetSearch(String),
    SetFilter(ListFilter),
    SetToday(Date),
    ToggleTheme,
    Login { token: String, now: OffsetDateTime },
    Activity(OffsetDateTime),
    Tick(OffsetDateTime),
    Logout,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PageChanged(PageKind),
    ViewChanged(ViewSummary),
    ThemeChanged(Theme),
    Saved(Record),
    Deleted(Record),
    LoggedIn,
    LoggedOut,
    StatusUpdated(String),
    StatusCleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub page: PageKind,
    pub today: Date,
    pub session: Session,
    pub timer: InactivityTimer,
    pub catalog: Catalog,
    pub trip_view: ViewState<TripFilter>,
    pub vehicle_view: ViewState<VehicleFilter>,
    pub driver_view: ViewState<DriverFilter>,
    pub maintenance_view: ViewState<MaintenanceFilter>,
    pub quote_view: ViewState<QuoteFilter>,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(today: Date) -> Self {
        Self::with_page_size(today, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(today: Date, page_size: NonZeroUsize) -> Self {
        Self {
            page: PageKind::Planning,
            today,
            session: Session::default(),
            timer: InactivityTimer::default(),
            catalog: Catalog::default(),
            trip_view: ViewState::new(page_size),
            vehicle_view: ViewState::new(page_size),
            driver_view: ViewState::new(page_size),
            maintenance_view: ViewState::new(page_size),
            quote_view: ViewState::new(page_size),
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::ShowPage(page) => {
                self.page = page;
                vec![AppEvent::PageChanged(page), self.refresh(page)]
            }
            AppCommand::NextPage => {
                let page = self.page;
                let total = self.summary(page).total_pages;
                if self.pager_mut(page).next(total) {
                    vec![self.refresh(page)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::PrevPage => {
                let page = self.page;
                if self.pager_mut(page).prev() {
                    vec![self.refresh(page)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::SetSearch(text) => {
                let page = self.page;
                *self.search_mut(page) = text;
                self.pager_mut(page).reset();
                vec![self.refresh(page)]
            }
            AppCommand::SetFilter(filter) => {
                match filter {
                    ListFilter::Trips(value) => self.trip_view.filter = value,
                    ListFilter::Vehicles(value) => self.vehicle_view.filter = value,
                    ListFilter::Drivers(value) => self.driver_view.filter = value,
                    ListFilter::Maintenance(value) => self.maintenance_view.filter = value,
                    ListFilter::Quotes(value) => self.quote_view.filter = value,
                }
                let page = filter.page();
                self.pager_mut(page).reset();
                vec![self.refresh(page)]
            }
            AppCommand::SetToday(today) => {
                self.today = today;
                vec![
                    self.refresh(PageKind::Planning),
                    self.refresh(PageKind::Drivers),
                ]
            }
            AppCommand::ToggleTheme => {
                let theme = self.session.toggle_theme();
                vec![AppEvent::ThemeChanged(theme), self.set_status(theme.as_str())]
            }
            AppCommand::Login { token, now } => {
                self.session.login(token);
                self.timer.touch(now);
                vec![AppEvent::LoggedIn, self.set_status("logged in")]
            }
            AppCommand::Activity(now) => {
                if self.session.is_authenticated() {
                    self.timer.touch(now);
                }
                Vec::new()
            }
            AppCommand::Tick(now) => {
                if self.timer.poll(now) {
                    info!("session expired after inactivity");
                    self.force_logout("logged out after inactivity")
                } else {
                    Vec::new()
                }
            }
            AppCommand::Logout => self.force_logout("logged out"),
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Replaces the catalogs with a fresh backend snapshot.
    pub fn load<B: Backend + ?Sized>(&mut self, backend: &B) -> SaveResult<Vec<AppEvent>> {
        let snapshot = self.call(backend.load())?;
        self.catalog = Catalog::from(snapshot);
        info!(
            trips = self.catalog.trips.len(),
            vehicles = self.catalog.vehicles.len(),
            drivers = self.catalog.drivers.len(),
            quotes = self.catalog.quotes.len(),
            "catalog loaded"
        );
        Ok(PageKind::ALL
            .into_iter()
            .map(|page| self.refresh(page))
            .collect())
    }

    /// Validates, checks the vehicle schedule against the catalog, then
    /// stores one trip per assignment.
    pub fn save_trip<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        form: &TripFormInput,
        editing: Option<TripId>,
    ) -> SaveResult<Vec<AppEvent>> {
        form.validate().map_err(SaveError::validation)?;
        let trips = form.new_trips();
        if editing.is_some() && trips.len() != 1 {
            return Err(SaveError::Validation(
                "an existing trip takes a single shift -- save extra shifts as new trips"
                    .to_owned(),
            ));
        }
        self.check_schedule(&trips, editing)?;

        let mut events = Vec::new();
        for (index, trip) in trips.iter().enumerate() {
            let result = match editing {
                Some(id) => backend.update_trip(id, trip),
                None => backend.create_trip(trip),
            };
            let saved = match self.call(result) {
                Ok(saved) => saved,
                Err(SaveError::Backend(source)) if index > 0 => {
                    self.refresh_pages(TRIP_PAGES);
                    warn!(shift = index + 1, total = trips.len(), "multi-shift save stopped");
                    return Err(SaveError::PartialSave {
                        shift: index + 1,
                        total: trips.len(),
                        source,
                    });
                }
                Err(error) => return Err(error),
            };
            info!(trip_id = %saved.id, vehicle_id = %saved.vehicle_id, "trip saved");
            events.push(AppEvent::Saved(Record::Trip(saved.id)));
            upsert(&mut self.catalog.trips, saved);
        }
        events.extend(self.refresh_pages(TRIP_PAGES));
        events.push(self.set_status("trip saved"));
        Ok(events)
    }

    pub fn save_vehicle<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        form: &VehicleFormInput,
        editing: Option<VehicleId>,
    ) -> SaveResult<Vec<AppEvent>> {
        let vehicle = form.normalized().map_err(SaveError::validation)?;
        if self.catalog.plate_taken(&vehicle.plate, editing) {
            return Err(SaveError::Validation(format!(
                "plate {} is already registered -- check the plate and retry",
                vehicle.plate
            )));
        }
        let result = match editing {
            Some(id) => backend.update_vehicle(id, &vehicle),
            None => backend.create_vehicle(&vehicle),
        };
        let saved = self.call(result)?;
        info!(vehicle_id = %saved.id, plate = %saved.plate, "vehicle saved");
        let record = Record::Vehicle(saved.id);
        upsert(&mut self.catalog.vehicles, saved);
        Ok(self.saved(record))
    }

    pub fn save_driver<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        form: &DriverFormInput,
        editing: Option<DriverId>,
    ) -> SaveResult<Vec<AppEvent>> {
        form.validate().map_err(SaveError::validation)?;
        let result = match editing {
            Some(id) => backend.update_driver(id, form),
            None => backend.create_driver(form),
        };
        let saved = self.call(result)?;
        info!(driver_id = %saved.id, "driver saved");
        let record = Record::Driver(saved.id);
        upsert(&mut self.catalog.drivers, saved);
        Ok(self.saved(record))
    }

    pub fn save_leave<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        form: &LeaveFormInput,
    ) -> SaveResult<Vec<AppEvent>> {
        form.validate().map_err(SaveError::validation)?;
        let saved = self.call(backend.create_leave(form))?;
        info!(leave_id = %saved.id, driver_id = %saved.driver_id, "leave saved");
        let record = Record::Leave(saved.id);
        upsert(&mut self.catalog.leaves, saved);
        Ok(self.saved(record))
    }

    /// Stores the record and, when a next-service km is given, the
    /// scheduled follow-up it implies. A completed service past the
    /// vehicle's km moves the vehicle's odometer too.
    pub fn save_maintenance<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        form: &MaintenanceFormInput,
        editing: Option<MaintenanceId>,
    ) -> SaveResult<Vec<AppEvent>> {
        form.validate().map_err(SaveError::validation)?;
        let record = form.record();
        let result = match editing {
            Some(id) => backend.update_maintenance(id, &record),
            None => backend.create_maintenance(&record),
        };
        let saved = self.call(result)?;
        info!(maintenance_id = %saved.id, vehicle_id = %saved.vehicle_id, "maintenance saved");
        let advanced = self.catalog.advance_odometer(&saved);
        let mut events = self.saved_maintenance(saved);
        if advanced {
            events.extend(self.refresh_pages(&[PageKind::Fleet]));
        }

        if let Some(follow_up) = form.follow_up() {
            let scheduled = self.call(backend.create_maintenance(&follow_up))?;
            debug!(
                maintenance_id = %scheduled.id,
                due_km = ?scheduled.odometer_km,
                "follow-up maintenance scheduled"
            );
            events.extend(self.saved_maintenance(scheduled));
        }
        Ok(events)
    }

    /// Prices `request` over `route` and stores it as a pending quote.
    pub fn save_quote<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        request: QuoteRequest,
        route: &RouteSummary,
    ) -> SaveResult<Vec<AppEvent>> {
        request.validate().map_err(SaveError::validation)?;
        let breakdown = compute_quote(
            route,
            &request.params,
            request.vehicle_count,
            request.driver_count,
            request.day_count,
        );
        let saved = self.call(backend.create_quote(&new_quote(request, route, breakdown)))?;
        info!(quote_id = %saved.id, total_cents = saved.breakdown.total_cents, "quote saved");
        let record = Record::Quote(saved.id);
        self.catalog.upsert_quote(saved);
        Ok(self.saved(record))
    }

    pub fn set_quote_status<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        id: QuoteId,
        status: QuoteStatus,
    ) -> SaveResult<Vec<AppEvent>> {
        let saved = self.call(backend.set_quote_status(id, status))?;
        info!(quote_id = %saved.id, status = saved.status.as_str(), "quote status changed");
        self.catalog.upsert_quote(saved);
        Ok(self.saved(Record::Quote(id)))
    }

    /// Books a trip from a pending quote and marks the quote approved.
    pub fn convert_quote<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        id: QuoteId,
        plan: TripPlan,
    ) -> SaveResult<Vec<AppEvent>> {
        let quote = self
            .catalog
            .quote(id)
            .cloned()
            .ok_or_else(|| SaveError::Validation(format!("quote {id} not found")))?;
        if quote.status == QuoteStatus::Approved {
            return Err(SaveError::Validation(format!(
                "quote {id} is already approved -- edit the booked trip instead"
            )));
        }
        let form = trip_form_from_quote(&quote, plan);
        let mut events = self.save_trip(backend, &form, None)?;
        events.extend(self.set_quote_status(backend, id, QuoteStatus::Approved)?);
        Ok(events)
    }

    pub fn delete<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        record: Record,
    ) -> SaveResult<Vec<AppEvent>> {
        let result = match record {
            Record::Trip(id) => backend.delete_trip(id),
            Record::Vehicle(id) => backend.delete_vehicle(id),
            Record::Driver(id) => backend.delete_driver(id),
            Record::Leave(id) => backend.delete_leave(id),
            Record::Maintenance(id) => backend.delete_maintenance(id),
            Record::Quote(id) => backend.delete_quote(id),
        };
        self.call(result)?;
        let catalog = &mut self.catalog;
        let removed = match record {
            Record::Trip(id) => remove(&mut catalog.trips, id),
            Record::Vehicle(id) => catalog.remove_vehicle(id),
            Record::Driver(id) => catalog.remove_driver(id),
            Record::Leave(id) => remove(&mut catalog.leaves, id),
            Record::Maintenance(id) => remove(&mut catalog.maintenance, id),
            Record::Quote(id) => remove(&mut catalog.quotes, id),
        };
        info!(record = ?record, removed, "record deleted");

        let mut events = vec![AppEvent::Deleted(record)];
        events.extend(self.refresh_record(record));
        events.push(self.set_status(&format!("{} deleted", record.label())));
        Ok(events)
    }

    /// Odometer history of one vehicle, oldest first.
    pub fn km_log<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        vehicle_id: VehicleId,
    ) -> SaveResult<Vec<KmLogEntry>> {
        let entries = self.call(backend.list_km_log(vehicle_id))?;
        debug!(vehicle_id = %vehicle_id, entries = entries.len(), "odometer history loaded");
        Ok(entries)
    }

    pub fn clear_km_log<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        vehicle_id: VehicleId,
    ) -> SaveResult<Vec<AppEvent>> {
        let removed = self.call(backend.clear_km_log(vehicle_id))?;
        info!(vehicle_id = %vehicle_id, removed, "odometer history cleared");
        Ok(vec![self.set_status(&format!("{removed} odometer entries cleared"))])
    }

    pub fn trip_page(&self) -> PageView<'_, Trip> {
        page_view(self.trip_matches(), &self.trip_view.pager)
    }

    pub fn vehicle_page(&self) -> PageView<'_, Vehicle> {
        page_view(self.vehicle_matches(), &self.vehicle_view.pager)
    }

    pub fn driver_page(&self) -> PageView<'_, Driver> {
        page_view(self.driver_matches(), &self.driver_view.pager)
    }

    pub fn maintenance_page(&self) -> PageView<'_, Maintenance> {
        page_view(self.maintenance_matches(), &self.maintenance_view.pager)
    }

    pub fn quote_page(&self) -> PageView<'_, Quote> {
        page_view(self.quote_matches(), &self.quote_view.pager)
    }

    pub fn summary(&self, page: PageKind) -> ViewSummary {
        let matches = match page {
            PageKind::Planning => self.trip_matches().len(),
            PageKind::Fleet => self.vehicle_matches().len(),
            PageKind::Drivers => self.driver_matches().len(),
            PageKind::Maintenance => self.maintenance_matches().len(),
            PageKind::Quotes => self.quote_matches().len(),
        };
        let pager = self.pager(page);
        ViewSummary {
            page,
            page_number: pager.page(),
            total_pages: total_pages(matches, pager.page_size()),
            matches,
        }
    }

    fn trip_matches(&self) -> Vec<&Trip> {
        let view = &self.trip_view;
        filter_trips(&self.catalog.trips, &view.search, view.filter, self.today)
    }

    fn vehicle_matches(&self) -> Vec<&Vehicle> {
        let view = &self.vehicle_view;
        filter_vehicles(&self.catalog.vehicles, &view.search, view.filter)
    }

    fn driver_matches(&self) -> Vec<&Driver> {
        let view = &self.driver_view;
        filter_drivers(
            &self.catalog.drivers,
            &view.search,
            view.filter,
            &self.catalog.trips,
            self.today,
        )
    }

    fn maintenance_matches(&self) -> Vec<&Maintenance> {
        let view = &self.maintenance_view;
        filter_maintenance(&self.catalog.maintenance, &view.search, view.filter)
    }

    fn quote_matches(&self) -> Vec<&Quote> {
        let view = &self.quote_view;
        filter_quotes(&self.catalog.quotes, &view.search, view.filter)
    }

    fn pager(&self, page: PageKind) -> &Pager {
        match page {
            PageKind::Planning => &self.trip_view.pager,
            PageKind::Fleet => &self.vehicle_view.pager,
            PageKind::Drivers => &self.driver_view.pager,
            PageKind::Maintenance => &self.maintenance_view.pager,
            PageKind::Quotes => &self.quote_view.pager,
        }
    }

    fn pager_mut(&mut self, page: PageKind) -> &mut Pager {
        match page {
            PageKind::Planning => &mut self.trip_view.pager,
            PageKind::Fleet => &mut self.vehicle_view.pager,
            PageKind::Drivers => &mut self.driver_view.pager,
            PageKind::Maintenance => &mut self.maintenance_view.pager,
            PageKind::Quotes => &mut self.quote_view.pager,
        }
    }

    fn search_mut(&mut self, page: PageKind) -> &mut String {
        match page {
            PageKind::Planning => &mut self.trip_view.search,
            PageKind::Fleet => &mut self.vehicle_view.search,
            PageKind::Drivers => &mut self.driver_view.search,
            PageKind::Maintenance => &mut self.maintenance_view.search,
            PageKind::Quotes => &mut self.quote_view.search,
        }
    }

    /// Recomputes one list and pulls its page back in range.
    fn refresh(&mut self, page: PageKind) -> AppEvent {
        let summary = self.summary(page);
        self.pager_mut(page).clamp(summary.total_pages);
        AppEvent::ViewChanged(ViewSummary {
            page_number: self.pager(page).page(),
            ..summary
        })
    }

    fn refresh_pages(&mut self, pages: &[PageKind]) -> Vec<AppEvent> {
        pages.iter().map(|page| self.refresh(*page)).collect()
    }

    fn refresh_record(&mut self, record: Record) -> Vec<AppEvent> {
        self.refresh_pages(record.pages())
    }

    fn saved(&mut self, record: Record) -> Vec<AppEvent> {
        let mut events = vec![AppEvent::Saved(record)];
        events.extend(self.refresh_record(record));
        events.push(self.set_status(&format!("{} saved", record.label())));
        events
    }

    fn saved_maintenance(&mut self, saved: Maintenance) -> Vec<AppEvent> {
        let record = Record::Maintenance(saved.id);
        upsert(&mut self.catalog.maintenance, saved);
        self.saved(record)
    }

    fn check_schedule(&self, trips: &[NewTrip], editing: Option<TripId>) -> SaveResult<()> {
        for (index, trip) in trips.iter().enumerate() {
            let schedule = Schedule {
                vehicle_id: trip.vehicle_id,
                start: trip.start,
                end: trip.end,
            };
            if let Some(existing) = find_conflict(&schedule, &self.catalog.trips, editing) {
                warn!(
                    vehicle_id = %trip.vehicle_id,
                    conflicting_trip = %existing.id,
                    "trip rejected: vehicle already booked"
                );
                return Err(SaveError::Conflict {
                    id: existing.id,
                    title: existing.title.clone(),
                });
            }
            let earlier = trips[..index].iter().position(|other| {
                other.vehicle_id == trip.vehicle_id
                    && overlaps(trip.start, trip.end, other.start, other.end)
            });
            if let Some(earlier) = earlier {
                return Err(SaveError::Validation(format!(
                    "shift {} overlaps shift {} on the same vehicle -- pick another vehicle or time",
                    index + 1,
                    earlier + 1
                )));
            }
        }
        Ok(())
    }

    fn call<T>(&mut self, result: BackendResult<T>) -> SaveResult<T> {
        result.map_err(|error| {
            match &error {
                BackendError::Unauthorized => {
                    warn!("backend rejected session; logging out");
                    self.force_logout("session expired -- log in again");
                }
                BackendError::Rejected(message) => info!(%message, "backend rejected save"),
                BackendError::Unavailable(message) => warn!(%message, "backend unavailable"),
            }
            SaveError::Backend(error)
        })
    }

    fn force_logout(&mut self, reason: &str) -> Vec<AppEvent> {
        self.session.logout();
        self.timer.disarm();
        vec![AppEvent::LoggedOut, self.set_status(reason)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

fn page_view<'a, T>(matches: Vec<&'a T>, pager: &Pager) -> PageView<'a, T> {
    let page = pager.slice(&matches);
    PageView {
        items: page.items.to_vec(),
        page_number: pager.page(),
        total_pages: page.total_pages,
        matches: matches.len(),
    }
}
