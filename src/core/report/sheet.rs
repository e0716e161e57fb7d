//! Writer-agnostic sheet model

use std::fmt;

/// One cell of a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Blank cell
    Empty,
}

impl Cell {
    /// Build a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text content, if this is a text cell
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for Cell {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.fract().abs() < f64::EPSILON && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

/// A row of cells
pub type Row = Vec<Cell>;

/// A named sheet: a list of ragged rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet (tab) name
    pub name: String,
    /// Rows, top to bottom
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Append an empty spacer row
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Widest row length
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Index of the first row whose first cell is the given text
    #[must_use]
    pub fn find_row(&self, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.first().and_then(Cell::as_text) == Some(label))
    }
}

/// Build a row from anything convertible to cells
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::core::report::sheet::Cell::from($cell)),*]
    };
}
