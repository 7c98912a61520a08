use itertools::Itertools;
use log::{trace, warn};
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("column '{name}' does not exist")]
    ColumnNotFound { name: String },
    #[error("row {row} is out of range for a table of {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}

/// Position of a column in a [`TruthTable`], stable for the lifetime of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Boolean matrix with named columns and a fixed number of rows.
///
/// Columns keep their insertion order; every column holds `row_count` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruthTable {
    rows: usize,
    names: Vec<String>,
    columns: Vec<Vec<bool>>,
    index: FxHashMap<String, ColumnId>,
}

impl TruthTable {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Builds the `2^n` assignments of `operands`, one column per operand.
    ///
    /// Row `i` assigns the binary digits of `i` to the operands, the first operand
    /// taking the most significant bit.
    pub fn from_operands(operands: &[char]) -> Self {
        let n = operands.len();
        let mut table = Self::new(1 << n);

        for (j, operand) in operands.iter().enumerate() {
            let id = table.add_column(operand.to_string());
            let shift = n - 1 - j;

            for (row, cell) in table.columns[id.0].iter_mut().enumerate() {
                *cell = (row >> shift) & 1 == 1;
            }
        }

        table
    }

    /// Appends a column of `false` cells unless one with this name already exists.
    pub fn add_column<S: Into<String>>(&mut self, name: S) -> ColumnId {
        let name = name.into();

        if let Some(&id) = self.index.get(&name) {
            return id;
        }

        let id = ColumnId(self.columns.len());
        trace!("add_column({}) -> {}", name, id.0);
        self.columns.push(vec![false; self.rows]);
        self.names.push(name.clone());
        self.index.insert(name, id);
        id
    }

    pub fn column_id(&self, name: &str) -> Result<ColumnId, TableError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Writes one cell.
    ///
    /// A row past the end first pads every short column back up to `row_count`
    /// cells; the write itself still fails with [`TableError::RowOutOfRange`].
    pub fn set_value(&mut self, name: &str, row: usize, value: bool) -> Result<(), TableError> {
        if row >= self.rows {
            let rows = self.rows;
            for (column_name, column) in self.names.iter().zip(self.columns.iter_mut()) {
                if column.len() < rows {
                    warn!(
                        "set_value: padding column '{}' from {} to {} rows",
                        column_name,
                        column.len(),
                        rows
                    );
                    column.resize(rows, false);
                }
            }
        }

        let id = self.column_id(name)?;
        self.set_cell(id, row, value)
    }

    pub fn set_cell(&mut self, id: ColumnId, row: usize, value: bool) -> Result<(), TableError> {
        let rows = self.rows;
        let cell = self.columns[id.0]
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { row, rows })?;
        *cell = value;
        Ok(())
    }

    pub fn get_cell(&self, name: &str, row: usize) -> Result<bool, TableError> {
        let id = self.column_id(name)?;
        self.cell(id, row)
    }

    pub fn cell(&self, id: ColumnId, row: usize) -> Result<bool, TableError> {
        self.columns[id.0]
            .get(row)
            .copied()
            .ok_or(TableError::RowOutOfRange {
                row,
                rows: self.rows,
            })
    }

    pub fn column(&self, id: ColumnId) -> &[bool] {
        &self.columns[id.0]
    }

    pub fn name(&self, id: ColumnId) -> &str {
        &self.names[id.0]
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// The most recently added column.
    pub fn last_column(&self) -> Option<ColumnId> {
        self.columns.len().checked_sub(1).map(ColumnId)
    }

    pub const fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Writes the table as CSV: a header of column names, then one record per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(&self.names)?;
        for row in 0..self.rows {
            csv_writer.write_record(self.columns.iter().map(|c| bit(c[row])))?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}

const fn bit(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Tab separated, one line per row after the header; cells are padded to the
/// width of their column name.
impl Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }

        let widths: Vec<usize> = self
            .names
            .iter()
            .map(|name| name.chars().count().max(1))
            .collect();

        writeln!(
            f,
            "{}",
            self.names
                .iter()
                .zip(&widths)
                .map(|(name, &w)| format!("{name:<w$}"))
                .join("\t")
        )?;

        for row in 0..self.rows {
            writeln!(
                f,
                "{}",
                self.columns
                    .iter()
                    .zip(&widths)
                    .map(|(column, &w)| format!("{:<w$}", bit(column[row])))
                    .join("\t")
            )?;
        }

        Ok(())
    }
}
