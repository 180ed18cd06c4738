//! CSV loaders for the reference tables.
//!
//! # Matrix files
//!
//! `distances.csv` and `agents.csv` are label matrices: the first record
//! holds column labels (its first cell is ignored), every later record is a
//! row label followed by one number per column.
//!
//! ```csv
//! ,home_a,home_b
//! work_x,12.5,30
//! work_y,8,22.75
//! ```
//!
//! For `agents.csv` rows are **home** locations, columns are **work**
//! locations, and each cell is the number of commuters on that pair.
//!
//! # Table files
//!
//! | File                     | Columns                                                    |
//! |--------------------------|------------------------------------------------------------|
//! | `recharge_behaviors.csv` | `code,charge,percentage`                                   |
//! | `cars.csv`               | `code,brand,model,capacity,range,recharge,idle_discharge`  |
//! | `start_times.csv`        | `from,to,start,end,percentage`                             |
//!
//! Line numbers in errors are 1-based file lines (the header is line 1).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    CarCatalog, CarSpec, DataError, DataResult, DistanceMatrix, RechargeCurve, RechargeCurves,
    StartTimeTable, StartTimeWindow,
};

pub const DISTANCES_FILE:          &str = "distances.csv";
pub const RECHARGE_BEHAVIORS_FILE: &str = "recharge_behaviors.csv";
pub const CARS_FILE:               &str = "cars.csv";
pub const START_TIMES_FILE:        &str = "start_times.csv";
pub const AGENTS_FILE:             &str = "agents.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BehaviorRecord {
    code:       String,
    charge:     f64,
    percentage: f64,
}

#[derive(Deserialize)]
struct CarRecord {
    code:           String,
    brand:          String,
    model:          String,
    capacity:       f64,
    range:          f64,
    recharge:       f64,
    idle_discharge: f64,
}

#[derive(Deserialize)]
struct StartTimeRecord {
    from:       String,
    to:         String,
    start:      f64,
    end:        f64,
    percentage: f64,
}

// ── Label matrices ────────────────────────────────────────────────────────────

/// Column labels plus labelled rows of parsed cells.
struct RawMatrix<T> {
    cols: Vec<String>,
    rows: Vec<(String, Vec<T>)>,
}

fn read_matrix<R, T, F>(reader: R, file: &'static str, mut parse: F) -> DataResult<RawMatrix<T>>
where
    R: Read,
    F: FnMut(&str) -> Option<T>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cols: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|source| DataError::Csv { file, source })?;
        let line = idx + 1;
        let mut fields = record.iter();
        // Row label, or the ignored corner cell of the header.
        let label = fields.next().unwrap_or_default().to_owned();

        if cols.is_none() {
            cols = Some(fields.map(str::to_owned).collect());
            continue;
        }
        let width = cols.as_ref().map_or(0, Vec::len);
        if record.len() != width + 1 {
            return Err(DataError::Parse {
                file,
                line,
                message: format!(
                    "row {label:?} has {} values, expected {width}",
                    record.len().saturating_sub(1),
                ),
            });
        }
        let values = fields
            .map(|cell| {
                parse(cell).ok_or_else(|| DataError::Parse {
                    file,
                    line,
                    message: format!("invalid value {cell:?} in row {label:?}"),
                })
            })
            .collect::<DataResult<Vec<T>>>()?;
        rows.push((label, values));
    }

    match cols {
        Some(cols) => Ok(RawMatrix { cols, rows }),
        None => Err(DataError::Empty(file)),
    }
}

/// Load `distances.csv`, scaling every cell by `factor`.
pub fn load_distances_reader<R: Read>(reader: R, factor: f64) -> DataResult<DistanceMatrix> {
    let raw = read_matrix(reader, DISTANCES_FILE, |cell| {
        cell.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v * factor)
    })?;
    let matrix = DistanceMatrix::new(raw.cols, raw.rows)?;
    let (rows, cols) = matrix.shape();
    info!(rows, cols, locations = matrix.location_count(), "distances loaded");
    Ok(matrix)
}

/// Commuter counts per `(home, work)` pair, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentMatrix {
    /// `(home, work, count)`; pairs with a zero count are kept.
    pub entries: Vec<(String, String, u32)>,
}

impl AgentMatrix {
    /// Total number of agents described.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, _, n)| u64::from(*n)).sum()
    }
}

/// Load `agents.csv` from any `Read` source.
pub fn load_agent_matrix_reader<R: Read>(reader: R) -> DataResult<AgentMatrix> {
    let raw = read_matrix(reader, AGENTS_FILE, |cell| cell.parse::<u32>().ok())?;
    let mut entries = Vec::with_capacity(raw.rows.len() * raw.cols.len());
    for (home, counts) in raw.rows {
        for (work, n) in raw.cols.iter().zip(counts) {
            entries.push((home.clone(), work.clone(), n));
        }
    }
    let matrix = AgentMatrix { entries };
    info!(pairs = matrix.entries.len(), agents = matrix.total(), "agent matrix loaded");
    Ok(matrix)
}

pub fn load_agent_matrix_csv(path: &Path) -> DataResult<AgentMatrix> {
    let file = std::fs::File::open(path)?;
    load_agent_matrix_reader(file)
}

// ── Keyed tables ──────────────────────────────────────────────────────────────

fn table_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn check_range(
    file:   &'static str,
    line:   usize,
    column: &'static str,
    value:  f64,
    min:    f64,
    max:    f64,
) -> DataResult<f64> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DataError::OutOfRange { file, line, column, value, min, max })
    }
}

/// Load `recharge_behaviors.csv`.  Breakpoints may appear in any order;
/// rows of the same code are grouped into one curve.
pub fn load_recharge_behaviors_reader<R: Read>(reader: R) -> DataResult<RechargeCurves> {
    let file = RECHARGE_BEHAVIORS_FILE;
    let mut points: Vec<(String, Vec<(f64, f64)>)> = Vec::new();

    for (idx, result) in table_reader(reader).deserialize::<BehaviorRecord>().enumerate() {
        let row = result.map_err(|source| DataError::Csv { file, source })?;
        let line = idx + 2;
        let charge = check_range(file, line, "charge", row.charge, 0.0, 100.0)?;
        let desire = check_range(file, line, "percentage", row.percentage, 0.0, 100.0)?;
        match points.iter_mut().find(|(code, _)| *code == row.code) {
            Some((_, pts)) => pts.push((charge, desire)),
            None => points.push((row.code, vec![(charge, desire)])),
        }
    }
    if points.is_empty() {
        return Err(DataError::Empty(file));
    }

    let mut curves = RechargeCurves::new();
    for (code, pts) in points {
        debug!(code = %code, breakpoints = pts.len(), "recharge curve");
        curves.insert(code, RechargeCurve::new(pts));
    }
    info!(behaviors = curves.len(), "recharge behaviors loaded");
    Ok(curves)
}

/// Load `cars.csv`.  Codes must be unique.
pub fn load_cars_reader<R: Read>(reader: R) -> DataResult<CarCatalog> {
    let file = CARS_FILE;
    let mut catalog = CarCatalog::new();

    for (idx, result) in table_reader(reader).deserialize::<CarRecord>().enumerate() {
        let row = result.map_err(|source| DataError::Csv { file, source })?;
        let line = idx + 2;
        let spec = CarSpec::new(
            row.brand,
            row.model,
            check_range(file, line, "capacity", row.capacity, 0.0, f64::MAX)?,
            check_range(file, line, "range", row.range, 0.0, f64::MAX)?,
            check_range(file, line, "recharge", row.recharge, 0.0, f64::MAX)?,
            check_range(file, line, "idle_discharge", row.idle_discharge, 0.0, f64::MAX)?,
        )?;
        if !catalog.insert(row.code.clone(), spec) {
            return Err(DataError::DuplicateKey { file, line, key: row.code });
        }
    }
    if catalog.is_empty() {
        return Err(DataError::Empty(file));
    }
    info!(models = catalog.len(), "car models loaded");
    Ok(catalog)
}

/// Load `start_times.csv`.  Window order within a route is preserved, since
/// percentages are cumulative.
pub fn load_start_times_reader<R: Read>(reader: R) -> DataResult<StartTimeTable> {
    let file = START_TIMES_FILE;
    let mut table = StartTimeTable::new();

    for (idx, result) in table_reader(reader).deserialize::<StartTimeRecord>().enumerate() {
        let row = result.map_err(|source| DataError::Csv { file, source })?;
        let line = idx + 2;
        let window = StartTimeWindow {
            start_h:        check_range(file, line, "start", row.start, 0.0, 24.0)?,
            end_h:          check_range(file, line, "end", row.end, 0.0, 24.0)?,
            cumulative_pct: check_range(file, line, "percentage", row.percentage, 0.0, 100.0)?,
        };
        table.push(row.from, row.to, window);
    }
    info!(routes = table.route_count(), "start times loaded");
    Ok(table)
}
