use anyhow::Context;
use aphrodite_config::{load_engine_settings, load_engine_settings_from, EngineSettings, EphemerisBackend};
use aphrodite_core::chart::ChartSettings;
use aphrodite_core::predictive::{
    composite_chart, harmonic_chart, lunar_return, secondary_progression, solar_arc, solar_return, synastry, transits,
};
use aphrodite_core::search::{
    search_stations_concurrently, HeliacalKind, HeliacalSearch, HeliacalTarget, SearchOptions, SearchWindow,
};
use aphrodite_core::{Body, Chart, ChartAssembler, ChartRequest, EphemerisAdapter, GeoLocation, HouseSystem};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute astrological charts as JSON")]
struct Cli {
    /// Engine config; defaults to configs/engine.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured house system (e.g. "koch", "whole_sign")
    #[arg(long, global = true)]
    houses: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct Moment {
    /// RFC 3339 instant, e.g. 1990-07-15T14:30:00Z
    #[arg(long)]
    time: DateTime<Utc>,
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

#[derive(Args, Debug, Clone)]
struct OtherMoment {
    #[arg(long)]
    other_time: DateTime<Utc>,
    #[arg(long, allow_hyphen_values = true)]
    other_lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    other_lon: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Natal chart
    Natal(Moment),
    /// Transits to a natal chart
    Transits {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Secondary progressions to a target date
    Progressions {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        target: DateTime<Utc>,
    },
    /// Solar arc directions to a target date
    SolarArc {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        target: DateTime<Utc>,
    },
    /// First solar return after a date
    SolarReturn {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        after: DateTime<Utc>,
    },
    /// First lunar return after a date
    LunarReturn {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        after: DateTime<Utc>,
    },
    /// Inter-chart aspects and house overlays
    Synastry {
        #[command(flatten)]
        a: Moment,
        #[command(flatten)]
        b: OtherMoment,
    },
    /// Midpoint composite of two charts
    Composite {
        #[command(flatten)]
        a: Moment,
        #[command(flatten)]
        b: OtherMoment,
    },
    /// Harmonic chart
    Harmonic {
        #[command(flatten)]
        natal: Moment,
        #[arg(long)]
        n: u32,
    },
    /// Stations of one or more bodies
    Stations {
        #[arg(long, value_delimiter = ',', default_value = "mercury,venus,mars")]
        bodies: Vec<String>,
        #[arg(long)]
        from: DateTime<Utc>,
        #[arg(long, default_value_t = 365.0)]
        days: f64,
    },
    /// Heliacal rising or setting of a body or catalog star
    Heliacal {
        /// Body name or fixed star from the catalog
        #[arg(long)]
        target: String,
        #[arg(long)]
        setting: bool,
        #[arg(long)]
        from: DateTime<Utc>,
        #[arg(long, default_value_t = 400.0)]
        days: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn build_adapter(backend: &EphemerisBackend) -> anyhow::Result<EphemerisAdapter> {
    match backend {
        EphemerisBackend::Analytic => Ok(EphemerisAdapter::analytic()),
        #[cfg(feature = "swiss-ephemeris")]
        EphemerisBackend::Swiss { path } => {
            let swiss = aphrodite_core::ephemeris::SwissEphemeris::new(path.clone())
                .context("Failed to open Swiss Ephemeris")?;
            Ok(EphemerisAdapter::new(Arc::new(swiss)))
        }
        #[cfg(not(feature = "swiss-ephemeris"))]
        EphemerisBackend::Swiss { .. } => {
            anyhow::bail!("ephemeris.backend = \"swiss\" needs chartctl built with --features swiss-ephemeris")
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<EngineSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_engine_settings_from(path)?,
        None => load_engine_settings().or_else(|e| {
            log::info!("using built-in defaults: {e}");
            aphrodite_config::parse_engine_settings("")
        })?,
    };
    if let Some(name) = &cli.houses {
        settings.chart.house_system = name.parse::<HouseSystem>()?;
    }
    Ok(settings)
}

struct Session {
    assembler: ChartAssembler,
    chart: ChartSettings,
}

impl Session {
    fn chart(&self, time: DateTime<Utc>, lat: f64, lon: f64) -> anyhow::Result<Chart> {
        let request = ChartRequest::new(time, GeoLocation::new(lat, lon)?).with_settings(self.chart.clone());
        Ok(self.assembler.assemble(&request)?)
    }

    fn natal(&self, m: &Moment) -> anyhow::Result<Chart> {
        self.chart(m.time, m.lat, m.lon)
    }

    fn other(&self, m: &OtherMoment) -> anyhow::Result<Chart> {
        self.chart(m.other_time, m.other_lat, m.other_lon)
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_target(name: &str, settings: &EngineSettings) -> anyhow::Result<HeliacalTarget> {
    if let Some(star) = settings.engine.fixed_star(name) {
        return Ok(HeliacalTarget::Star(star.clone()));
    }
    let body = name
        .parse::<Body>()
        .with_context(|| format!("{name:?} is neither a body nor a catalog star"))?;
    Ok(HeliacalTarget::Body(body))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let adapter = build_adapter(&settings.ephemeris)?;
    log::debug!("ephemeris backend: {}", adapter.provider_name());
    let session = Session {
        assembler: ChartAssembler::new(adapter.clone(), Arc::new(settings.engine.clone())),
        chart: settings.chart.clone(),
    };
    let assembler = &session.assembler;

    match &cli.command {
        Command::Natal(m) => print_json(&session.natal(m)?),
        Command::Transits { natal, at } => {
            print_json(&transits(assembler, &session.natal(natal)?, *at, None)?)
        }
        Command::Progressions { natal, target } => {
            print_json(&secondary_progression(assembler, &session.natal(natal)?, *target)?)
        }
        Command::SolarArc { natal, target } => print_json(&solar_arc(assembler, &session.natal(natal)?, *target)?),
        Command::SolarReturn { natal, after } => {
            print_json(&solar_return(assembler, &session.natal(natal)?, *after, None)?)
        }
        Command::LunarReturn { natal, after } => {
            print_json(&lunar_return(assembler, &session.natal(natal)?, *after, None)?)
        }
        Command::Synastry { a, b } => {
            print_json(&synastry(assembler.config(), &session.natal(a)?, &session.other(b)?))
        }
        Command::Composite { a, b } => {
            print_json(&composite_chart(assembler, &session.natal(a)?, &session.other(b)?)?)
        }
        Command::Harmonic { natal, n } => print_json(&harmonic_chart(assembler, &session.natal(natal)?, *n)?),
        Command::Stations { bodies, from, days } => {
            let bodies = bodies
                .iter()
                .map(|b| b.parse::<Body>())
                .collect::<Result<Vec<_>, _>>()?;
            let search = &settings.engine.search;
            let window = SearchWindow::starting_at(adapter.julian_day(*from), *days, search.station_step_days)?;
            let results =
                search_stations_concurrently(adapter.clone(), bodies, window, SearchOptions::from_settings(search))
                    .await?;
            let stations: Vec<_> = results.into_iter().flat_map(|(_, s)| s).collect();
            print_json(&stations)
        }
        Command::Heliacal {
            target,
            setting,
            from,
            days,
            lat,
            lon,
        } => {
            let search = &settings.engine.search;
            let heliacal = HeliacalSearch::new(
                &adapter,
                GeoLocation::new(*lat, *lon)?,
                search.arcus_visionis,
                settings.engine.precession_arcsec_per_year,
            );
            let kind = if *setting { HeliacalKind::Setting } else { HeliacalKind::Rising };
            let window = SearchWindow::starting_at(adapter.julian_day(*from), *days, search.solar_step_days)?;
            let event = heliacal.find(
                &parse_target(target, &settings)?,
                kind,
                &window,
                &SearchOptions::from_settings(search),
            )?;
            print_json(&event)
        }
    }
}
