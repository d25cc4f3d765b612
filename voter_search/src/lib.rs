mod config;
use log::{debug, info};

pub mod builder;
pub mod manual;

pub use crate::config::*;

/// The search terms of one lookup, after trimming.
///
/// At least one of the two terms is non-empty: a lookup without any term is
/// rejected at construction.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct SearchQuery {
    voter_term: String,
    relation_term: String,
}

impl SearchQuery {
    /// Builds a query from raw user input.
    ///
    /// Returns `None` when both inputs are empty or only made of whitespace.
    pub fn new(voter_input: &str, relation_input: &str) -> Option<SearchQuery> {
        let voter_term = voter_input.trim();
        let relation_term = relation_input.trim();
        if voter_term.is_empty() && relation_term.is_empty() {
            None
        } else {
            Some(SearchQuery {
                voter_term: voter_term.to_string(),
                relation_term: relation_term.to_string(),
            })
        }
    }

    pub fn voter_term(&self) -> &str {
        &self.voter_term
    }

    pub fn relation_term(&self) -> &str {
        &self.relation_term
    }

    /// Runs this query against a table.
    pub fn run(&self, table: &VoterTable) -> VoterTable {
        search(table, &self.voter_term, &self.relation_term)
    }
}

/// Filters the table on the voter name and the relation name.
///
/// Arguments:
/// * `table` the table to search. It is not modified.
/// * `voter_term` the text to look for in the voter names. Empty means no constraint.
/// * `relation_term` the text to look for in the father's or husband's names.
/// Empty means no constraint.
///
/// A term matches a name if the name contains it, ignoring case. The term is
/// taken literally: no character has a special meaning. Terms are not
/// trimmed. The matching records are returned in their original order. When
/// both terms are empty, the result is a copy of the whole table.
///
/// ```
/// use voter_search::builder::TableBuilder;
/// use voter_search::{search, ColumnNames};
/// # use voter_search::TableError;
///
/// let header = vec!["FM_NAME_V2".to_string(), "RLN_FM_NM_V2".to_string()];
/// let mut builder = TableBuilder::new(header, &ColumnNames::default())?;
/// builder.add_row(&[Some("Ramu Kumar".to_string()), Some("Murugesan".to_string())]);
/// builder.add_row(&[Some("Ramesh".to_string()), Some("Murugan".to_string())]);
/// let table = builder.build();
///
/// assert_eq!(search(&table, "ram", "").len(), 2);
/// assert_eq!(search(&table, "", "murugesan").len(), 1);
/// assert!(search(&table, "ramu", "murugan").is_empty());
/// # Ok::<(), TableError>(())
/// ```
pub fn search(table: &VoterTable, voter_term: &str, relation_term: &str) -> VoterTable {
    info!(
        "search: {} records, voter term {:?}, relation term {:?}",
        table.len(),
        voter_term,
        relation_term
    );
    let voter_needle = fold_case(voter_term);
    let relation_needle = fold_case(relation_term);

    let mut res: Vec<VoterRecord> = table.records().to_vec();
    if !voter_needle.is_empty() {
        res.retain(|r| contains_folded(table.voter_name(r), &voter_needle));
        debug!("search: {} records left after voter name", res.len());
    }
    if !relation_needle.is_empty() {
        res.retain(|r| contains_folded(table.relation_name(r), &relation_needle));
        debug!("search: {} records left after relation name", res.len());
    }
    table.with_records(res)
}

// Upper case folds `ß` to `SS`, which lower case does not undo.
fn fold_case(s: &str) -> String {
    s.to_uppercase()
}

// A missing field never matches.
fn contains_folded(value: Option<&str>, needle: &str) -> bool {
    match value {
        Some(v) => fold_case(v).contains(needle),
        None => false,
    }
}
