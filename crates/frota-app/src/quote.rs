// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Budget quotes: route decoding, cost arithmetic and the customer-facing
//! texts generated from a saved quote.
//!
//! All money is integer cents. Intermediate products are computed in `i128`
//! and rounded half up to the nearest cent.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::forms::{TripFormInput, TripPlan};
use crate::model::{NewQuote, Quote, QuoteStatus, TripStatus};
use crate::validation::format_cents;

/// Assumed consumption for every vehicle type.
pub const KM_PER_LITER: i128 = 10;

pub const DEFAULT_CLIENT_NAME: &str = "Cliente a definir";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteParams {
    pub cost_per_km_cents: i64,
    pub fuel_price_cents: i64,
    pub daily_driver_rate_cents: i64,
    pub extras_cents: i64,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            cost_per_km_cents: 390,
            fuel_price_cents: 550,
            daily_driver_rate_cents: 20_000,
            extras_cents: 0,
        }
    }
}

impl QuoteParams {
    pub fn with_extras(self, extras_cents: i64) -> Self {
        Self {
            extras_cents,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TollEstimate {
    pub currency_code: String,
    pub amount_cents: i64,
}

/// The parts of a computed route the calculator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub distance_meters: u64,
    pub duration: Option<Duration>,
    pub tolls: Vec<TollEstimate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutesResponse {
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteBody {
    distance_meters: Option<u64>,
    duration: Option<String>,
    travel_advisory: Option<TravelAdvisory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TravelAdvisory {
    toll_info: Option<TollInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TollInfo {
    #[serde(default)]
    estimated_price: Vec<MoneyBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyBody {
    #[serde(default)]
    currency_code: String,
    units: Option<String>,
    nanos: Option<i32>,
}

impl RouteSummary {
    pub fn new(distance_meters: u64) -> Self {
        Self {
            distance_meters,
            duration: None,
            tolls: Vec::new(),
        }
    }

    /// Decodes a compute-routes response and keeps the first route.
    pub fn from_routes_json(raw: &str) -> Result<Self> {
        let response: RoutesResponse =
            serde_json::from_str(raw).context("decode routing response")?;
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no route found -- check the addresses and try again"))?;
        let distance_meters = route
            .distance_meters
            .ok_or_else(|| anyhow!("route has no distance -- check the addresses and try again"))?;

        let duration = route.duration.as_deref().map(parse_route_duration).transpose()?;
        let tolls = route
            .travel_advisory
            .and_then(|advisory| advisory.toll_info)
            .map(|info| info.estimated_price)
            .unwrap_or_default()
            .into_iter()
            .map(|price| {
                Ok(TollEstimate {
                    amount_cents: money_to_cents(price.units.as_deref(), price.nanos)?,
                    currency_code: price.currency_code,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            distance_meters,
            duration,
            tolls,
        })
    }

    pub fn toll_cents(&self) -> i64 {
        self.tolls
            .iter()
            .fold(0i64, |sum, toll| sum.saturating_add(toll.amount_cents))
    }

    pub fn distance_km(&self) -> u64 {
        (self.distance_meters + 500) / 1000
    }
}

/// Inputs echoed onto a saved quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub origin: String,
    pub destination: String,
    pub stops: Vec<String>,
    pub vehicle_count: u32,
    pub driver_count: u32,
    pub day_count: u32,
    pub params: QuoteParams,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            bail!("quote origin is required -- enter an origin address and retry");
        }
        if self.destination.trim().is_empty() {
            bail!("quote destination is required -- enter a destination address and retry");
        }
        if self.stops.iter().any(|stop| stop.trim().is_empty()) {
            bail!("quote stops cannot be blank -- remove the empty stop and retry");
        }
        if self.vehicle_count == 0 || self.driver_count == 0 || self.day_count == 0 {
            bail!("quote needs at least one vehicle, one driver and one day");
        }
        let QuoteParams {
            cost_per_km_cents,
            fuel_price_cents,
            daily_driver_rate_cents,
            extras_cents,
        } = self.params;
        if cost_per_km_cents <= 0 || fuel_price_cents <= 0 || daily_driver_rate_cents <= 0 {
            bail!("quote rates must be positive -- check [quote] in the config");
        }
        if extras_cents < 0 {
            bail!("quote extras cannot be negative");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub distance_cents: i64,
    pub toll_cents: i64,
    pub fuel_cents: i64,
    pub driver_cents: i64,
    pub extras_cents: i64,
    pub total_cents: i64,
}

/// Pure cost arithmetic; inputs are not range-checked here.
pub fn compute_quote(
    route: &RouteSummary,
    params: &QuoteParams,
    vehicle_count: u32,
    driver_count: u32,
    day_count: u32,
) -> QuoteBreakdown {
    let meters = i128::from(route.distance_meters);
    let vehicles = i128::from(vehicle_count);

    let distance_cents = div_round_half_up(
        meters * i128::from(params.cost_per_km_cents) * vehicles,
        1000,
    );
    let fuel_cents = div_round_half_up(
        meters * i128::from(params.fuel_price_cents) * vehicles,
        1000 * KM_PER_LITER,
    );
    let driver_cents = saturate(
        i128::from(driver_count)
            * i128::from(day_count)
            * i128::from(params.daily_driver_rate_cents),
    );
    let toll_cents = route.toll_cents();

    let total_cents = [distance_cents, fuel_cents, driver_cents, toll_cents]
        .into_iter()
        .fold(params.extras_cents, i64::saturating_add);

    QuoteBreakdown {
        distance_cents,
        toll_cents,
        fuel_cents,
        driver_cents,
        extras_cents: params.extras_cents,
        total_cents,
    }
}

/// The record a calculated quote is saved as.
pub fn new_quote(
    request: QuoteRequest,
    route: &RouteSummary,
    breakdown: QuoteBreakdown,
) -> NewQuote {
    NewQuote {
        title: format!("Orçamento: {} para {}", request.origin, request.destination),
        client_name: DEFAULT_CLIENT_NAME.to_owned(),
        breakdown,
        request,
        distance_meters: route.distance_meters,
        status: QuoteStatus::Pending,
    }
}

/// Prefills a trip form from a quote; the plan carries vehicle, driver and
/// schedule chosen by the user.
pub fn trip_form_from_quote(quote: &Quote, plan: TripPlan) -> TripFormInput {
    TripFormInput {
        title: quote.title.clone(),
        client_name: quote.client_name.clone(),
        start_location: quote.request.origin.clone(),
        end_location: quote.request.destination.clone(),
        value_cents: quote.breakdown.total_cents,
        status: TripStatus::Scheduled,
        plan,
    }
}

pub fn render_whatsapp(quote: &Quote, company: &str) -> String {
    format!(
        "*Orçamento {company}*\n\nOlá! Segue o orçamento da viagem de *{}* para *{}*.\n\nValor total: *{}*\n\nO valor já inclui pedágios, combustível e as despesas do motorista.\n\nFicamos à disposição para qualquer dúvida!",
        quote.request.origin,
        quote.request.destination,
        format_cents(quote.breakdown.total_cents),
    )
}

pub fn render_email(quote: &Quote, company: &str) -> String {
    let request = &quote.request;
    let breakdown = &quote.breakdown;
    let mut body = format!(
        "Prezado(a) cliente,\n\nSegue o orçamento detalhado do serviço de transporte solicitado.\n\nOrigem: {}\nDestino: {}\n",
        request.origin, request.destination,
    );
    if !request.stops.is_empty() {
        body.push_str(&format!("Paradas: {}\n", request.stops.join(", ")));
    }
    body.push_str("\nComposição do valor:\n");
    body.push_str(&format!(
        "- Distância e veículo: {}\n",
        format_cents(breakdown.distance_cents)
    ));
    body.push_str(&format!(
        "- Pedágios: {}\n",
        format_cents(breakdown.toll_cents)
    ));
    body.push_str(&format!(
        "- Combustível: {}\n",
        format_cents(breakdown.fuel_cents)
    ));
    body.push_str(&format!(
        "- Motorista(s): {}\n",
        format_cents(breakdown.driver_cents)
    ));
    if breakdown.extras_cents != 0 {
        body.push_str(&format!(
            "- Adicionais: {}\n",
            format_cents(breakdown.extras_cents)
        ));
    }
    body.push_str(&format!(
        "\nValor total do serviço: {}\n\nAtenciosamente,\nEquipe {company}\n",
        format_cents(breakdown.total_cents)
    ));
    body
}

pub fn format_duration(duration: Duration) -> String {
    let minutes = (duration.as_secs() + 30) / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours == 0 {
        format!("{minutes}min")
    } else {
        format!("{hours}h {minutes:02}min")
    }
}

fn parse_route_duration(raw: &str) -> Result<Duration> {
    let seconds = raw
        .strip_suffix('s')
        .ok_or_else(|| anyhow!("route duration {raw:?} is not in seconds"))?;
    let seconds: f64 = seconds
        .parse()
        .with_context(|| format!("invalid route duration {raw:?}"))?;
    if seconds < 0.0 {
        bail!("invalid route duration {raw:?}");
    }
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("route duration {raw:?} is out of range"))
}

fn money_to_cents(units: Option<&str>, nanos: Option<i32>) -> Result<i64> {
    let units = match units.map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("invalid toll amount {raw:?}"))?,
    };
    let nanos = i128::from(nanos.unwrap_or(0));
    Ok(saturate(
        i128::from(units) * 100 + div_round_half_up(nanos, 10_000_000) as i128,
    ))
}

fn div_round_half_up(numerator: i128, denominator: i128) -> i64 {
    let half = denominator / 2;
    let quotient = if numerator < 0 {
        -((-numerator + half) / denominator)
    } else {
        (numerator + half) / denominator
    };
    saturate(quotient)
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::{
        QuoteParams, QuoteRequest, RouteSummary, TollEstimate, compute_quote, format_duration,
        new_quote, render_email, render_whatsapp,
    };
    use crate::{QuoteId, QuoteStatus};
    use std::time::Duration;

    fn request() -> QuoteRequest {
        QuoteRequest {
            origin: "Belo Horizonte".to_owned(),
            destination: "Ouro Preto".to_owned(),
            stops: vec!["Itabirito".to_owned()],
            vehicle_count: 1,
            driver_count: 1,
            day_count: 1,
            params: QuoteParams::default(),
        }
    }

    #[test]
    fn hundred_km_trip_with_one_toll() {
        let route = RouteSummary {
            distance_meters: 100_000,
            duration: None,
            tolls: vec![TollEstimate {
                currency_code: "BRL".to_owned(),
                amount_cents: 2_000,
            }],
        };
        let breakdown = compute_quote(&route, &QuoteParams::default(), 1, 1, 1);
        assert_eq!(breakdown.distance_cents, 39_000);
        assert_eq!(breakdown.fuel_cents, 5_500);
        assert_eq!(breakdown.driver_cents, 20_000);
        assert_eq!(breakdown.toll_cents, 2_000);
        assert_eq!(breakdown.total_cents, 66_500);
    }

    #[test]
    fn total_is_sum_of_components_plus_extras() {
        let route = RouteSummary::new(437_219);
        let params = QuoteParams::default().with_extras(12_345);
        let breakdown = compute_quote(&route, &params, 2, 3, 4);
        assert_eq!(
            breakdown.total_cents,
            breakdown.distance_cents
                + breakdown.fuel_cents
                + breakdown.driver_cents
                + breakdown.toll_cents
                + 12_345
        );
        assert_eq!(breakdown.driver_cents, 3 * 4 * 20_000);
        assert_eq!(breakdown, compute_quote(&route, &params, 2, 3, 4));
    }

    #[test]
    fn fractional_cents_round_half_up() {
        // 1 m at 3.90/km is 0.39 cents; 2 m is 0.78 cents.
        let params = QuoteParams::default();
        assert_eq!(compute_quote(&RouteSummary::new(1), &params, 1, 0, 0).distance_cents, 0);
        assert_eq!(compute_quote(&RouteSummary::new(2), &params, 1, 0, 0).distance_cents, 1);
    }

    #[test]
    fn no_tolls_means_zero_toll_cost() {
        let breakdown = compute_quote(&RouteSummary::new(0), &QuoteParams::default(), 1, 1, 1);
        assert_eq!(breakdown.toll_cents, 0);
        assert_eq!(breakdown.distance_cents, 0);
        assert_eq!(breakdown.total_cents, 20_000);
    }

    #[test]
    fn decodes_routes_response() -> anyhow::Result<()> {
        let raw = r#"{
          "routes": [{
            "distanceMeters": 98765,
            "duration": "5400s",
            "travelAdvisory": {
              "tollInfo": {
                "estimatedPrice": [
                  {"currencyCode": "BRL", "units": "12", "nanos": 500000000},
                  {"currencyCode": "BRL", "units": "7"}
                ]
              }
            }
          }]
        }"#;
        let route = RouteSummary::from_routes_json(raw)?;
        assert_eq!(route.distance_meters, 98_765);
        assert_eq!(route.distance_km(), 99);
        assert_eq!(route.duration, Some(Duration::from_secs(5_400)));
        assert_eq!(route.toll_cents(), 1_950);
        Ok(())
    }

    #[test]
    fn route_without_tolls_decodes() -> anyhow::Result<()> {
        let raw = r#"{"routes":[{"distanceMeters":1000,"duration":"60s"}]}"#;
        let route = RouteSummary::from_routes_json(raw)?;
        assert!(route.tolls.is_empty());
        Ok(())
    }

    #[test]
    fn empty_routes_is_an_error() {
        let error = RouteSummary::from_routes_json(r#"{"routes":[]}"#)
            .expect_err("no route should fail");
        assert!(error.to_string().contains("no route found"));

        let error = RouteSummary::from_routes_json("{}").expect_err("missing routes should fail");
        assert!(error.to_string().contains("no route found"));
    }

    #[test]
    fn out_of_range_duration_is_an_error() {
        let raw = r#"{"routes":[{"distanceMeters":1000,"duration":"1e30s"}]}"#;
        let error = RouteSummary::from_routes_json(raw).expect_err("huge duration should fail");
        assert!(format!("{error:#}").contains("out of range"), "{error:#}");

        let raw = r#"{"routes":[{"distanceMeters":1000,"duration":"-5s"}]}"#;
        RouteSummary::from_routes_json(raw).expect_err("negative duration should fail");
    }

    #[test]
    fn request_validation_rejects_missing_inputs() {
        let mut missing_origin = request();
        missing_origin.origin = " ".to_owned();
        assert!(missing_origin.validate().is_err());

        let mut no_days = request();
        no_days.day_count = 0;
        assert!(no_days.validate().is_err());

        let mut free_fuel = request();
        free_fuel.params.fuel_price_cents = 0;
        assert!(free_fuel.validate().is_err());

        assert!(request().validate().is_ok());
    }

    #[test]
    fn saved_quote_uses_route_title_and_placeholder_client() {
        let route = RouteSummary::new(100_000);
        let breakdown = compute_quote(&route, &QuoteParams::default(), 1, 1, 1);
        let quote = new_quote(request(), &route, breakdown);
        assert_eq!(quote.title, "Orçamento: Belo Horizonte para Ouro Preto");
        assert_eq!(quote.client_name, "Cliente a definir");
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.distance_meters, 100_000);
    }

    #[test]
    fn texts_include_route_and_total() {
        let route = RouteSummary::new(100_000);
        let breakdown = compute_quote(&route, &QuoteParams::default(), 1, 1, 1);
        let quote = new_quote(request(), &route, breakdown).with_id(QuoteId::new(1));

        let whatsapp = render_whatsapp(&quote, "Frota");
        assert!(whatsapp.contains("*Belo Horizonte*"));
        assert!(whatsapp.contains("R$ 645,00"));

        let email = render_email(&quote, "Frota");
        assert!(email.contains("Paradas: Itabirito"));
        assert!(email.contains("- Combustível: R$ 55,00"));
        assert!(email.contains("Valor total do serviço: R$ 645,00"));
        assert!(!email.contains("Adicionais"));
    }

    #[test]
    fn durations_format_as_hours_and_minutes() {
        assert_eq!(format_duration(Duration::from_secs(5_400)), "1h 30min");
        assert_eq!(format_duration(Duration::from_secs(600)), "10min");
    }
}
