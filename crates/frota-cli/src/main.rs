// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use frota_app::session::session_path_for;
use frota_app::validation::{parse_datetime, parse_required_cents, parse_required_date};
use frota_app::{AppState, PageKind, Session, TripId, VehicleId};
use frota_db::Store;
use runtime::{Command, DbRuntime, ListArgs, QuoteArgs};
use std::env;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `frota --print-example-config` to generate a v2 template",
            options.config_path.display()
        )
    })?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .init();

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or FROTA_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    if options.demo {
        store.seed_demo_data()?;
    }
    let params = config.quote_params()?;
    if options.check_only {
        info!(db = %db_path.display(), "configuration and database are valid");
        return Ok(());
    }

    let today = options
        .today
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let mut state = AppState::with_page_size(today, config.page_size());
    state.timer = frota_app::InactivityTimer::new(config.inactivity_timeout()?);
    state.session = if options.demo {
        Session::default()
    } else {
        Session::load(&session_path_for(&db_path))?
    };
    if options.demo || !session_path_for(&db_path).exists() {
        state.session.theme = config.theme();
    }

    let mut runtime = DbRuntime::new(&store, state, params)?;
    print!("{}", runtime.run(&options.command)?);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    today: Option<Date>,
    command: Command,
}

/// Raw values for command flags; checked against the command once all
/// arguments are read.
#[derive(Debug, Default)]
struct CommandFlags {
    search: Option<String>,
    filter: Option<String>,
    page: Option<usize>,
    vehicle: Option<VehicleId>,
    start: Option<String>,
    end: Option<String>,
    exclude: Option<TripId>,
    route: Option<PathBuf>,
    origin: Option<String>,
    destination: Option<String>,
    vehicles: Option<u32>,
    drivers: Option<u32>,
    days: Option<u32>,
    extras_cents: Option<i64>,
    save: bool,
    clear: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        today: None,
        command: Command::Overview,
    };
    let mut command_name: Option<String> = None;
    let mut flags = CommandFlags::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str, what: &str| -> Result<String> {
            iter.next()
                .map(|value| value.as_ref().to_owned())
                .ok_or_else(|| anyhow!("{flag} requires {what}"))
        };
        match arg.as_ref() {
            "--config" => {
                options.config_path = PathBuf::from(value("--config", "a file path")?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--today" => {
                let raw = value("--today", "a YYYY-MM-DD date")?;
                options.today = Some(
                    parse_required_date(&raw)
                        .map_err(|error| anyhow!("--today {raw:?}: {error}"))?,
                );
            }
            "--search" => flags.search = Some(value("--search", "search text")?),
            "--filter" => flags.filter = Some(value("--filter", "a filter name")?),
            "--page" => flags.page = Some(parse_number("--page", &value("--page", "a number")?)?),
            "--vehicle" => {
                let raw = value("--vehicle", "a vehicle id")?;
                flags.vehicle = Some(VehicleId::new(parse_number("--vehicle", &raw)?));
            }
            "--start" => flags.start = Some(value("--start", "a YYYY-MM-DD HH:MM datetime")?),
            "--end" => flags.end = Some(value("--end", "a YYYY-MM-DD HH:MM datetime")?),
            "--exclude" => {
                let raw = value("--exclude", "a trip id")?;
                flags.exclude = Some(TripId::new(parse_number("--exclude", &raw)?));
            }
            "--route" => flags.route = Some(PathBuf::from(value("--route", "a JSON file path")?)),
            "--origin" => flags.origin = Some(value("--origin", "an address")?),
            "--destination" => flags.destination = Some(value("--destination", "an address")?),
            "--vehicles" => {
                let raw = value("--vehicles", "a count")?;
                flags.vehicles = Some(parse_number("--vehicles", &raw)?);
            }
            "--drivers" => {
                flags.drivers = Some(parse_number("--drivers", &value("--drivers", "a count")?)?);
            }
            "--days" => flags.days = Some(parse_number("--days", &value("--days", "a count")?)?),
            "--extras" => {
                let raw = value("--extras", "an amount")?;
                flags.extras_cents = Some(
                    parse_required_cents(&raw)
                        .map_err(|error| anyhow!("--extras {raw:?}: {error}"))?,
                );
            }
            "--save" => flags.save = true,
            "--clear" => flags.clear = true,
            name @ ("trips" | "vehicles" | "drivers" | "maintenance" | "quotes" | "conflict"
            | "quote" | "km-log")
                if command_name.is_none() =>
            {
                command_name = Some(name.to_owned());
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    options.command = build_command(command_name.as_deref(), flags)?;
    Ok(options)
}

fn build_command(name: Option<&str>, flags: CommandFlags) -> Result<Command> {
    let page = match name {
        None => return Ok(Command::Overview),
        Some("trips") => Some(PageKind::Planning),
        Some("vehicles") => Some(PageKind::Fleet),
        Some("drivers") => Some(PageKind::Drivers),
        Some("maintenance") => Some(PageKind::Maintenance),
        Some("quotes") => Some(PageKind::Quotes),
        Some(_) => None,
    };
    if let Some(page) = page {
        let page_number = flags.page.unwrap_or(1);
        if page_number == 0 {
            bail!("--page starts at 1");
        }
        return Ok(Command::List(ListArgs {
            page,
            search: flags.search,
            filter: flags.filter,
            page_number,
        }));
    }

    match name {
        Some("conflict") => {
            let vehicle = flags
                .vehicle
                .ok_or_else(|| anyhow!("conflict requires --vehicle <id>"))?;
            let start = flags
                .start
                .ok_or_else(|| anyhow!("conflict requires --start <YYYY-MM-DD HH:MM>"))?;
            let end = flags
                .end
                .ok_or_else(|| anyhow!("conflict requires --end <YYYY-MM-DD HH:MM>"))?;
            Ok(Command::Conflict {
                vehicle,
                start: parse_datetime(&start)
                    .map_err(|error| anyhow!("--start {start:?}: {error}"))?,
                end: parse_datetime(&end).map_err(|error| anyhow!("--end {end:?}: {error}"))?,
                exclude: flags.exclude,
            })
        }
        Some("quote") => {
            let route = flags
                .route
                .ok_or_else(|| anyhow!("quote requires --route <routes.json>"))?;
            Ok(Command::Quote(QuoteArgs {
                route,
                origin: flags.origin.unwrap_or_default(),
                destination: flags.destination.unwrap_or_default(),
                vehicles: flags.vehicles.unwrap_or(1),
                drivers: flags.drivers.unwrap_or(1),
                days: flags.days.unwrap_or(1),
                extras_cents: flags.extras_cents.unwrap_or(0),
                save: flags.save,
            }))
        }
        Some("km-log") => {
            let vehicle = flags
                .vehicle
                .ok_or_else(|| anyhow!("km-log requires --vehicle <id>"))?;
            Ok(Command::KmLog {
                vehicle,
                clear: flags.clear,
            })
        }
        Some(other) => bail!("unknown command {other:?}; run with --help"),
        None => Ok(Command::Overview),
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| anyhow!("{flag} expects a whole number, got {raw:?}"))
}

fn print_help() {
    println!("frota: fleet and trip planning");
    println!("usage: frota [options] [command] [command options]");
    println!();
    println!("options:");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a v2 config template");
    println!("  --demo                   Run against seeded demo data (in-memory)");
    println!("  --check                  Validate config + DB and exit");
    println!("  --today <YYYY-MM-DD>     Date used for on-duty and in-progress filters");
    println!("  --help                   Show this help");
    println!();
    println!("commands:");
    println!("  trips|vehicles|drivers|maintenance|quotes");
    println!("      [--search <text>] [--filter <name>] [--page <n>]");
    println!("  conflict --vehicle <id> --start <datetime> --end <datetime> [--exclude <trip id>]");
    println!("  quote --route <routes.json> [--origin <addr>] [--destination <addr>]");
    println!("      [--vehicles <n>] [--drivers <n>] [--days <n>] [--extras <amount>] [--save]");
    println!("  km-log --vehicle <id> [--clear]");
}
