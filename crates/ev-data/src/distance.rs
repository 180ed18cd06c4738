//! `DistanceMatrix`: scalar road distances between named locations.
//!
//! The matrix is rectangular: its column labels and row labels are both
//! location names and need not be the same set.  Every distinct name is
//! interned once into a [`LocationId`], so agents carry 4-byte ids instead of
//! strings.
//!
//! A lookup `distance(from, to)` reads the cell at column `from`, row `to`;
//! if either label is missing on that axis it retries with the axes swapped.
//! Only one triangle of a symmetric matrix therefore needs to be supplied.

use std::collections::HashMap;

use ev_core::LocationId;

use crate::{DataError, DataResult};

#[derive(Clone, Debug, Default)]
pub struct DistanceMatrix {
    /// Interned names, indexed by `LocationId`.
    names: Vec<String>,
    ids:   HashMap<String, LocationId>,
    /// Column position of each location that labels a column.
    cols:  HashMap<LocationId, usize>,
    /// Row position of each location that labels a row.
    rows:  HashMap<LocationId, usize>,
    width: usize,
    /// Row-major cells, `rows.len() × width`, in kilometres.
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from column labels and labelled rows of kilometre
    /// values.  Every row must have exactly one value per column.
    pub fn new(col_labels: Vec<String>, rows: Vec<(String, Vec<f64>)>) -> DataResult<Self> {
        let mut m = Self {
            width: col_labels.len(),
            ..Self::default()
        };
        for (pos, label) in col_labels.into_iter().enumerate() {
            let id = m.intern(label);
            m.cols.insert(id, pos);
        }
        m.cells.reserve(rows.len() * m.width);
        for (pos, (label, values)) in rows.into_iter().enumerate() {
            if values.len() != m.width {
                return Err(DataError::Config(format!(
                    "distance row {label:?} has {} values, expected {}",
                    values.len(),
                    m.width
                )));
            }
            let id = m.intern(label);
            m.rows.insert(id, pos);
            m.cells.extend(values);
        }
        Ok(m)
    }

    fn intern(&mut self, name: String) -> LocationId {
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = LocationId(self.names.len() as u32);
        self.ids.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    /// Number of distinct location names across both axes.
    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    /// `(row count, column count)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.width)
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: LocationId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Raw cell at column `col`, row `row`, with no symmetric fallback.
    pub fn cell(&self, col: LocationId, row: LocationId) -> Option<f64> {
        let c = *self.cols.get(&col)?;
        let r = *self.rows.get(&row)?;
        self.cells.get(r * self.width + c).copied()
    }

    /// Distance in km from `from` to `to`, trying the reverse pair when the
    /// forward pair is absent.
    pub fn distance(&self, from: LocationId, to: LocationId) -> DataResult<f64> {
        self.cell(from, to)
            .or_else(|| self.cell(to, from))
            .ok_or_else(|| DataError::NoRoute {
                from: self.label(from),
                to:   self.label(to),
            })
    }

    fn label(&self, id: LocationId) -> String {
        self.name(id).map_or_else(|| id.to_string(), str::to_owned)
    }
}
