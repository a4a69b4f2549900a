use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use nimaz_base::ResolvedPrayerState;
use nimaz_schedule::{ScheduleCache, month_schedules, resolve_at, schedule_for_date};
use nimaz_solar::SolarCalculator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;
mod site;
mod ticker;

use site::{Site, SiteArgs};
use ticker::CountdownTicker;

#[derive(Parser)]
#[command(name = "nimaz", about = "Daily prayer times and countdown")]
struct Cli {
    #[command(flatten)]
    site: SiteArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for one day
    Times {
        /// Local date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Current prayer, next prayer and time remaining
    Now {
        /// Instant to evaluate (RFC 3339), defaults to the system clock
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Timetable for a whole month
    Month {
        /// Defaults to the current local year
        #[arg(long)]
        year: Option<i32>,
        /// 1-12, defaults to the current local month
        #[arg(long)]
        month: Option<u32>,
    },
    /// Live countdown to the next prayer until Ctrl-C
    Watch {
        /// Refresh period in seconds
        #[arg(long, default_value = "1")]
        every: u64,
    },
    /// List calculation methods
    Methods,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NIMAZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1)
}

fn load_site(args: &SiteArgs) -> Site {
    args.to_site().unwrap_or_else(|e| fail(e))
}

fn today(site: &Site) -> NaiveDate {
    Utc::now().with_timezone(&site.offset).date_naive()
}

/// Redraw the countdown line. Stops the ticker once the output is gone.
fn draw_tick<W: Write>(out: &mut W, state: &ResolvedPrayerState) -> ControlFlow<()> {
    let written = write!(out, "\r{}\x1b[K", render::tick(state)).and_then(|()| out.flush());
    match written {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => {
            debug!("stopping watch, output closed: {}", e);
            ControlFlow::Break(())
        }
    }
}

fn watch(site: Site, every: Duration) {
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(e));
    runtime.block_on(async move {
        let mut cache = ScheduleCache::default();
        let calculator = SolarCalculator::default();
        let mut ticker = CountdownTicker::new();
        ticker.start(every, move |now| {
            match resolve_at(
                &mut cache,
                &calculator,
                now,
                site.offset,
                &site.location,
                &site.config,
            ) {
                Ok(state) => draw_tick(&mut std::io::stdout().lock(), &state),
                Err(e) => {
                    eprintln!("\nError: {e}");
                    ControlFlow::Break(())
                }
            }
        });

        let interrupted = tokio::select! {
            _ = tokio::signal::ctrl_c() => true,
            _ = ticker.finished() => false,
        };
        if interrupted {
            ticker.stop();
            println!();
            info!("watch interrupted");
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Times { date } => {
            let site = load_site(&cli.site);
            let date = date.unwrap_or_else(|| today(&site));
            let schedule = schedule_for_date(
                &SolarCalculator::default(),
                date,
                &site.location,
                &site.config,
            )
            .unwrap_or_else(|e| fail(e));
            println!("{date}  {} (UTC{})", site.config.method(), site.offset);
            print!("{}", render::schedule(&schedule, site.offset));
        }
        Commands::Now { at } => {
            let site = load_site(&cli.site);
            let now = at.unwrap_or_else(Utc::now);
            let state = resolve_at(
                &mut ScheduleCache::default(),
                &SolarCalculator::default(),
                now,
                site.offset,
                &site.location,
                &site.config,
            )
            .unwrap_or_else(|e| fail(e));
            print!("{}", render::state(&state, site.offset));
        }
        Commands::Month { year, month } => {
            let site = load_site(&cli.site);
            let current = today(&site);
            let year = year.unwrap_or(current.year());
            let month = month.unwrap_or(current.month());
            let days = month_schedules(
                &SolarCalculator::default(),
                year,
                month,
                &site.location,
                &site.config,
            )
            .unwrap_or_else(|e| fail(e));
            println!("{year}-{month:02}  {} (UTC{})", site.config.method(), site.offset);
            print!("{}", render::month(&days, site.offset));
        }
        Commands::Watch { every } => {
            let site = load_site(&cli.site);
            watch(site, Duration::from_secs(every.max(1)));
        }
        Commands::Methods => {
            print!("{}", render::methods());
        }
    }
}
