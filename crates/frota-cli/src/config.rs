// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use frota_app::Theme;
use frota_app::paging::DEFAULT_PAGE_SIZE;
use frota_app::quote::QuoteParams;
use frota_app::session::DEFAULT_INACTIVITY_TIMEOUT;
use frota_app::validation::parse_required_cents;
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

const CONFIG_VERSION: i64 = 2;
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_INACTIVITY: &str = "6h";
const MAX_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub quote: QuoteRates,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            quote: QuoteRates::default(),
            session: SessionSettings::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub page_size: Option<i64>,
    pub theme: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE.get() as i64),
            theme: Some(Theme::Light.as_str().to_owned()),
        }
    }
}

/// Rates as money strings, e.g. `"3.90"` or `"R$ 200,00"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRates {
    pub cost_per_km: Option<String>,
    pub fuel_price: Option<String>,
    pub daily_driver_rate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub inactivity_timeout: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            inactivity_timeout: Some(DEFAULT_INACTIVITY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FROTA_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FROTA_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(frota_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 2` and put values under [storage], [ui], [quote], [session] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 2. Migrate your config to the v2 schema",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            frota_db::validate_db_path(db_path)?;
        }

        if let Some(page_size) = self.ui.page_size
            && page_size <= 0
        {
            bail!(
                "ui.page_size in {} must be positive, got {}",
                path.display(),
                page_size
            );
        }

        if let Some(theme) = &self.ui.theme
            && Theme::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be \"light\" or \"dark\", got {theme:?}",
                path.display()
            );
        }

        self.quote_params()
            .with_context(|| format!("invalid [quote] rates in {}", path.display()))?;

        let timeout = self.inactivity_timeout()?;
        if timeout.is_zero() {
            bail!(
                "session.inactivity_timeout in {} must be positive",
                path.display()
            );
        }
        if timeout > MAX_INACTIVITY_TIMEOUT {
            bail!(
                "session.inactivity_timeout in {} must be at most 720h (30 days)",
                path.display()
            );
        }

        self.log_level()
            .with_context(|| format!("invalid [log] level in {}", path.display()))?;
        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => frota_db::default_db_path(),
        }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.ui
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn theme(&self) -> Theme {
        self.ui
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or(Theme::Light)
    }

    pub fn quote_params(&self) -> Result<QuoteParams> {
        let defaults = QuoteParams::default();
        let params = QuoteParams {
            cost_per_km_cents: rate(
                "quote.cost_per_km",
                self.quote.cost_per_km.as_deref(),
                defaults.cost_per_km_cents,
            )?,
            fuel_price_cents: rate(
                "quote.fuel_price",
                self.quote.fuel_price.as_deref(),
                defaults.fuel_price_cents,
            )?,
            daily_driver_rate_cents: rate(
                "quote.daily_driver_rate",
                self.quote.daily_driver_rate.as_deref(),
                defaults.daily_driver_rate_cents,
            )?,
            extras_cents: 0,
        };
        Ok(params)
    }

    pub fn inactivity_timeout(&self) -> Result<Duration> {
        match self.session.inactivity_timeout.as_deref() {
            Some(raw) => parse_duration(raw),
            None => Ok(DEFAULT_INACTIVITY_TIMEOUT),
        }
    }

    pub fn log_level(&self) -> Result<Level> {
        let raw = self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        raw.parse::<Level>().map_err(|_| {
            anyhow!("unknown log level {raw:?}; use one of: error, warn, info, debug, trace")
        })
    }

    pub fn example_config(path: &Path) -> String {
        let defaults = QuoteParams::default();
        format!(
            "# frota config\n# Place this file at: {}\n\nversion = 2\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/frota/frota.db)\n# db_path = \"/absolute/path/to/frota.db\"\n\n[ui]\npage_size = {}\ntheme = \"light\"\n\n[quote]\ncost_per_km = \"{}\"\nfuel_price = \"{}\"\ndaily_driver_rate = \"{}\"\n\n[session]\ninactivity_timeout = \"{}\"\n\n[log]\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            plain_money(defaults.cost_per_km_cents),
            plain_money(defaults.fuel_price_cents),
            plain_money(defaults.daily_driver_rate_cents),
            DEFAULT_INACTIVITY,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn rate(key: &str, raw: Option<&str>, default_cents: i64) -> Result<i64> {
    let Some(raw) = raw else {
        return Ok(default_cents);
    };
    let cents = parse_required_cents(raw).map_err(|error| anyhow!("{key} {raw:?}: {error}"))?;
    if cents <= 0 {
        bail!("{key} must be positive, got {raw:?}");
    }
    Ok(cents)
}

/// `3.90` rather than the display form with currency symbol.
fn plain_money(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let units: [(&str, u64); 4] = [("ms", 1), ("s", 1_000), ("m", 60_000), ("h", 3_600_000)];
    for (suffix, millis_per_unit) in units {
        let Some(value) = raw.strip_suffix(suffix) else {
            continue;
        };
        let count: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let Some(millis) = count.checked_mul(millis_per_unit) else {
            bail!("timeout duration {raw:?} is too large; use a value such as 30m or 6h");
        };
        return Ok(Duration::from_millis(millis));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m, <N>h (for example 30m or 6h)")
}
