// ********* Table data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One row of the voter roll.
///
/// The values are stored in the column order of the table that owns the
/// record. A record does not know its own column names: use the accessors of
/// [`VoterTable`] to read the designated fields.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoterRecord {
    pub values: Vec<String>,
}

impl VoterRecord {
    pub fn new(values: Vec<String>) -> VoterRecord {
        VoterRecord { values }
    }

    /// The value at a column position, if the record is long enough.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.values.get(column).map(|s| s.as_str())
    }
}

/// An ordered, immutable collection of voter records.
///
/// Tables are built once (see [`crate::builder::TableBuilder`]) and never
/// modified afterwards. Searching produces a new table that shares the
/// column layout of the source.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoterTable {
    pub(crate) columns: Vec<String>,
    pub(crate) voter_column: usize,
    pub(crate) relation_column: usize,
    pub(crate) records: Vec<VoterRecord>,
}

impl VoterTable {
    /// A table without columns nor records.
    ///
    /// This is what a failed load degrades to.
    pub fn empty() -> VoterTable {
        VoterTable {
            columns: Vec::new(),
            voter_column: 0,
            relation_column: 0,
            records: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[VoterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The name of the voter for this record.
    pub fn voter_name<'a>(&self, record: &'a VoterRecord) -> Option<&'a str> {
        record.get(self.voter_column)
    }

    /// The name of the father or husband for this record.
    pub fn relation_name<'a>(&self, record: &'a VoterRecord) -> Option<&'a str> {
        record.get(self.relation_column)
    }

    /// A table with the same layout, restricted to the given records.
    pub(crate) fn with_records(&self, records: Vec<VoterRecord>) -> VoterTable {
        VoterTable {
            columns: self.columns.clone(),
            voter_column: self.voter_column,
            relation_column: self.relation_column,
            records,
        }
    }
}

// ********* Configuration **********

/// Header name of the column holding the voter names in the 2002 rolls.
pub const DEFAULT_VOTER_COLUMN: &str = "FM_NAME_V2";

/// Header name of the column holding the father's or husband's names.
pub const DEFAULT_RELATION_COLUMN: &str = "RLN_FM_NM_V2";

/// The header names of the two columns that can be searched.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnNames {
    pub voter_name: String,
    pub relation_name: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            voter_name: DEFAULT_VOTER_COLUMN.to_string(),
            relation_name: DEFAULT_RELATION_COLUMN.to_string(),
        }
    }
}

/// Errors that prevent a table from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableError {
    /// The header row has no column at all.
    EmptyHeader,
    /// A designated column could not be found in the header row.
    MissingColumn { column: String },
}

impl Error for TableError {}

impl Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::EmptyHeader => write!(f, "the header row is empty"),
            TableError::MissingColumn { column } => {
                write!(f, "column {:?} not found in the header row", column)
            }
        }
    }
}
