//! commute: small charging-demand run for the EV commuter simulator.
//!
//! Simulates 14 commuters between two residential areas and two employment
//! areas for three days, with six-minute steps, and reports how much energy
//! was drawn and when the charging peak occurred.
//!
//! ```text
//! cargo run -p commute [-- path/to/options.toml]
//! RUST_LOG=debug cargo run -p commute        # every state change
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_agent::Agent;
use ev_core::{Tick, TimeUnit};
use ev_data::{
    ModelOptions, ReferenceData, load_agent_matrix_reader, load_cars_reader,
    load_distances_reader, load_recharge_behaviors_reader, load_start_times_reader,
};
use ev_output::{OutputWriter, SimOutputObserver};
use ev_sim::{RunLimit, SimBuilder, SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SIM_DAYS:   u32  = 3;
const OUTPUT_DIR: &str = "output/commute";

/// Used when no options file is given.  2023-11-14 00:00 UTC.
const DEFAULT_OPTIONS: &str = r#"
start_unix_secs       = 1699920000
step_secs             = 360
initial_charge_method = "random"
min_initial_charge    = 60
output_interval_ticks = 10
"#;

// ── Reference tables ──────────────────────────────────────────────────────────

const DISTANCES_CSV: &str = "\
,Downtown,CommercePark
Northside,12.5,18
Southside,9,6.5
";

const AGENTS_CSV: &str = "\
,Downtown,CommercePark
Northside,5,2
Southside,3,4
";

const CARS_CSV: &str = "\
code,brand,model,capacity,range,recharge,idle_discharge
compact,Volta,Compact,40,250,6,0.5
saloon,Volta,Saloon,75,420,10,0.3
";

const BEHAVIORS_CSV: &str = "\
code,charge,percentage
anxious,0,100
anxious,60,100
anxious,80,40
anxious,100,0
relaxed,0,100
relaxed,20,80
relaxed,40,10
relaxed,100,0
";

const START_TIMES_CSV: &str = "\
from,to,start,end,percentage
home,work,7,7.5,30
home,work,7.5,8.5,85
home,work,8.5,9.5,100
work,home,16,17,40
work,home,17,18,90
work,home,18,19.5,100
";

// ── Observer wrapper to collect demand figures ────────────────────────────────

struct DemandObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    ticks_per_day: u64,
    daily_kwh:     Vec<f64>,
    peak:          Option<TickSummary>,
}

impl<W: OutputWriter> DemandObserver<W> {
    fn new(inner: SimOutputObserver<W>, step_secs: u32) -> Self {
        Self {
            inner,
            snapshot_rows: 0,
            summary_rows: 0,
            ticks_per_day: (86_400 / u64::from(step_secs)).max(1),
            daily_kwh: Vec::new(),
            peak: None,
        }
    }
}

impl<W: OutputWriter> SimObserver for DemandObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        let day = (summary.tick.0 / self.ticks_per_day) as usize;
        if self.daily_kwh.len() <= day {
            self.daily_kwh.resize(day + 1, 0.0);
        }
        self.daily_kwh[day] += summary.energy_kwh;
        if self
            .peak
            .as_ref()
            .is_none_or(|p| summary.charging_power_kw > p.charging_power_kw)
        {
            self.peak = Some(summary.clone());
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, unix_secs: i64, agents: &[Agent], data: &ReferenceData) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, unix_secs, agents, data);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_options() -> Result<ModelOptions> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading options from {path}"))?;
            toml::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(toml::from_str(DEFAULT_OPTIONS)?),
    }
}

fn load_reference(options: &ModelOptions) -> Result<ReferenceData> {
    Ok(ReferenceData::new(
        load_distances_reader(Cursor::new(DISTANCES_CSV), options.distance_factor)?,
        load_cars_reader(Cursor::new(CARS_CSV))?,
        load_recharge_behaviors_reader(Cursor::new(BEHAVIORS_CSV))?,
        load_start_times_reader(Cursor::new(START_TIMES_CSV))?,
    )?)
}

/// `7.75` → `07:45`.
fn hh_mm(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<ev_output::CsvWriter> {
    Ok(ev_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<ev_output::SqliteWriter> {
    Ok(ev_output::SqliteWriter::new(dir)?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. Options and reference tables.
    let options = load_options()?;
    let data = load_reference(&options)?;
    let matrix = load_agent_matrix_reader(Cursor::new(AGENTS_CSV))?;
    println!("=== commute: EV charging demand ===");
    println!(
        "Agents: {}  |  Days: {SIM_DAYS}  |  Step: {} s  |  Seed: {}",
        matrix.total(),
        options.step_secs,
        options.seed
    );
    println!();

    // 2. Build the population.
    let step_secs = options.step_secs;
    let mut sim = SimBuilder::new(options, data).agent_matrix(matrix).build()?;

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = open_writer(Path::new(OUTPUT_DIR))?;
    let mut obs = DemandObserver::new(SimOutputObserver::new(writer), step_secs);

    // 4. Run.
    let t0 = Instant::now();
    sim.run(RunLimit::duration(f64::from(SIM_DAYS) * 24.0, TimeUnit::Hours), &mut obs)?;
    let elapsed = t0.elapsed();
    info!(secs = elapsed.as_secs_f64(), "simulation complete");

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Demand summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  snapshot rows : {}", obs.snapshot_rows);
    println!("  summary rows  : {}", obs.summary_rows);
    println!();
    for (day, kwh) in obs.daily_kwh.iter().enumerate() {
        println!("  day {}: {kwh:>8.2} kWh recharged", day + 1);
    }
    if let Some(peak) = &obs.peak {
        let tod = ev_core::time_of_day(peak.unix_secs as f64, sim.options.utc_offset_h);
        println!(
            "  peak  : {:>8.2} kW at {} ({} of {} plugged in, {})",
            peak.charging_power_kw,
            peak.tick,
            peak.recharging,
            peak.agents(),
            hh_mm(tod),
        );
    }
    println!();

    // 6. Final agent table.
    println!(
        "{:<6} {:<10} {:<13} {:<6} {:<6} {:<20} {:>8} {:>10}",
        "Agent", "Home", "Work", "Out", "Back", "Location", "Charge", "Recharged"
    );
    println!("{}", "-".repeat(86));
    for agent in &sim.agents {
        println!(
            "{:<6} {:<10} {:<13} {:<6} {:<6} {:<20} {:>7.1}% {:>6.2} kWh",
            agent.id().0,
            sim.data.location_name(agent.home())?,
            sim.data.location_name(agent.work())?,
            hh_mm(agent.depart_home_h()),
            hh_mm(agent.depart_work_h()),
            agent.location().to_string(),
            agent.car().charge(),
            agent.car().recharged_kwh(),
        );
    }

    Ok(())
}
