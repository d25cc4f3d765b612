use log::debug;

pub use crate::config::*;

/// A builder for assembling a voter table row by row.
///
/// The builder applies the load-time normalization: the searchable columns
/// are always text, without surrounding whitespace, even when the source
/// cell was missing.
///
/// ```
/// pub use voter_search::builder::TableBuilder;
/// pub use voter_search::ColumnNames;
/// # use voter_search::TableError;
///
/// let header = vec!["SNO".to_string(), "FM_NAME_V2".to_string(), "RLN_FM_NM_V2".to_string()];
/// let mut builder = TableBuilder::new(header, &ColumnNames::default())?;
///
/// builder.add_row(&[Some("1".to_string()), Some(" Ramu ".to_string()), None]);
///
/// let table = builder.build();
/// assert_eq!(table.voter_name(&table.records()[0]), Some("Ramu"));
/// assert_eq!(table.relation_name(&table.records()[0]), Some(""));
///
/// # Ok::<(), TableError>(())
/// ```
pub struct TableBuilder {
    pub(crate) _columns: Vec<String>,
    pub(crate) _voter_column: usize,
    pub(crate) _relation_column: usize,
    pub(crate) _records: Vec<VoterRecord>,
}

impl TableBuilder {
    /// Starts a table from its header row.
    ///
    /// Both designated columns must appear in the header. When a name appears
    /// more than once, the first occurrence wins.
    pub fn new(columns: Vec<String>, names: &ColumnNames) -> Result<TableBuilder, TableError> {
        if columns.is_empty() {
            return Err(TableError::EmptyHeader);
        }
        let voter_column = find_column(&columns, &names.voter_name)?;
        let relation_column = find_column(&columns, &names.relation_name)?;
        debug!(
            "TableBuilder::new: voter column {} relation column {} in {:?}",
            voter_column, relation_column, columns
        );
        Ok(TableBuilder {
            _columns: columns,
            _voter_column: voter_column,
            _relation_column: relation_column,
            _records: Vec::new(),
        })
    }

    /// Adds a row of cells, as read from the source.
    ///
    /// Missing cells (`None`, or a row shorter than the header) become empty
    /// text. Cells beyond the header width are dropped. Rows where every cell
    /// is missing or empty are skipped; returns whether the row was kept.
    pub fn add_row(&mut self, cells: &[Option<String>]) -> bool {
        let is_blank = cells
            .iter()
            .all(|c| c.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true));
        if is_blank {
            debug!("add_row: skipping blank row {:?}", self._records.len());
            return false;
        }

        let mut values: Vec<String> = Vec::with_capacity(self._columns.len());
        for idx in 0..self._columns.len() {
            let cell = cells.get(idx).cloned().flatten().unwrap_or_default();
            if idx == self._voter_column || idx == self._relation_column {
                values.push(cell.trim().to_string());
            } else {
                values.push(cell);
            }
        }
        self._records.push(VoterRecord::new(values));
        true
    }

    pub fn build(self) -> VoterTable {
        VoterTable {
            columns: self._columns,
            voter_column: self._voter_column,
            relation_column: self._relation_column,
            records: self._records,
        }
    }
}

fn find_column(columns: &[String], name: &str) -> Result<usize, TableError> {
    columns
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| TableError::MissingColumn {
            column: name.to_string(),
        })
}
