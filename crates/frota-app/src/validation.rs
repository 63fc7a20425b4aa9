// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::sync::LazyLock;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const TIME_LAYOUT: &str = "HH:MM";

static LEGACY_PLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{4}$").expect("legacy plate pattern is valid"));
static MERCOSUL_PLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}[0-9][A-Z][0-9]{2}$").expect("mercosul plate pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidMoney,
    NegativeMoney,
    InvalidDate,
    InvalidTime,
    InvalidPlate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoney => f.write_str("invalid money value"),
            Self::NegativeMoney => f.write_str("negative money value"),
            Self::InvalidDate => f.write_str("invalid date value"),
            Self::InvalidTime => f.write_str("invalid time value"),
            Self::InvalidPlate => f.write_str("invalid plate"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn parse_required_cents(input: &str) -> ValidationResult<i64> {
    parse_cents(input.trim())
}

/// Formats cents as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_cents(cents: i64) -> String {
    let (sign, cents) = normalize_sign(cents);
    let reais = cents / 100;
    let remainder = cents % 100;
    format!("{sign}R$ {},{:02}", group_thousands(reais), remainder)
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    parse_date(input.trim())
}

pub fn format_date(value: Option<Date>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn parse_required_time(input: &str) -> ValidationResult<Time> {
    Time::parse(input.trim(), &format_description!("[hour]:[minute]"))
        .map_err(|_| ValidationError::InvalidTime)
}

/// Accepts `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`.
pub fn parse_datetime(input: &str) -> ValidationResult<PrimitiveDateTime> {
    let trimmed = input.trim();
    let (date, time) = trimmed
        .split_once(['T', ' '])
        .ok_or(ValidationError::InvalidDate)?;
    Ok(PrimitiveDateTime::new(
        parse_date(date)?,
        parse_required_time(time)?,
    ))
}

pub fn format_datetime(value: PrimitiveDateTime) -> String {
    value
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

/// Strips separators and uppercases, so `abc-1d23` becomes `ABC1D23`.
pub fn normalize_plate(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

pub fn parse_plate(input: &str) -> ValidationResult<String> {
    let plate = normalize_plate(input);
    if LEGACY_PLATE.is_match(&plate) || MERCOSUL_PLATE.is_match(&plate) {
        Ok(plate)
    } else {
        Err(ValidationError::InvalidPlate)
    }
}

fn parse_cents(input: &str) -> ValidationResult<i64> {
    let input = input.strip_prefix("R$").unwrap_or(input).trim_start();
    if input.starts_with('-') {
        return Err(ValidationError::NegativeMoney);
    }

    let clean = normalize_decimal_separator(input);
    if clean.is_empty() {
        return Err(ValidationError::InvalidMoney);
    }

    let parts = clean.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(ValidationError::InvalidMoney);
    }

    let whole = parse_digits(parts[0], true)?;
    if whole > i64::MAX / 100 {
        return Err(ValidationError::InvalidMoney);
    }

    let mut frac = 0i64;
    if parts.len() == 2 {
        if parts[1].len() > 2 {
            return Err(ValidationError::InvalidMoney);
        }
        frac = parse_digits(parts[1], false)?;
        if parts[1].len() == 1 {
            frac = frac.checked_mul(10).ok_or(ValidationError::InvalidMoney)?;
        }
    }

    whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .ok_or(ValidationError::InvalidMoney)
}

// `1.234,56` and `1,234.56` both become `1234.56`.
fn normalize_decimal_separator(input: &str) -> String {
    let last_comma = input.rfind(',');
    let last_dot = input.rfind('.');
    let comma_is_decimal = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => comma > dot,
        (Some(comma), None) => input.len() - comma - 1 <= 2,
        _ => false,
    };
    if comma_is_decimal {
        input.replace('.', "").replace(',', ".")
    } else {
        input.replace(',', "")
    }
}

fn parse_digits(input: &str, allow_empty: bool) -> ValidationResult<i64> {
    if input.is_empty() {
        if allow_empty {
            return Ok(0);
        }
        return Err(ValidationError::InvalidMoney);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoney);
    }
    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMoney)
}

fn parse_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
