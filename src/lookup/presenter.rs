use std::io::{BufRead, Write};

use serde_json::Map as JSMap;
use serde_json::Value as JSValue;

use crate::lookup::*;

pub const MISSING_INPUT_MSG: &str =
    "Please enter either Voter's Name or Father's/Husband's Name.";
pub const NO_MATCH_MSG: &str = "No matching records found.";
pub const NO_RECORDS_MSG: &str = "The voter file has no records.";
pub const RELOAD_COMMAND: &str = ":reload";

/// What a click on "Search" leads to.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SearchOutcome {
    /// Both names were empty: nothing was searched.
    MissingInput,
    NoMatches,
    Found(VoterTable),
}

/// Handles one search request on the loaded table.
pub fn handle_search(table: &VoterTable, voter_input: &str, relation_input: &str) -> SearchOutcome {
    let query = match SearchQuery::new(voter_input, relation_input) {
        Some(q) => q,
        None => {
            debug!("handle_search: no search term");
            return SearchOutcome::MissingInput;
        }
    };
    let results = query.run(table);
    if results.is_empty() {
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Found(results)
    }
}

/// Renders a table with one line per record, in the pipe table style.
pub fn render_table(table: &VoterTable, output: &mut String) {
    let num_cols = table.columns().len();
    if num_cols == 0 {
        return;
    }

    render_row(table.columns().iter().map(|s| s.as_str()), output);
    output.push('|');
    for _ in 0..num_cols {
        output.push_str(" --- |");
    }
    output.push('\n');

    for record in table.records() {
        render_row((0..num_cols).map(|idx| record.get(idx).unwrap_or("")), output);
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, output: &mut String) {
    output.push('|');
    for cell in cells {
        output.push(' ');
        output.push_str(&escape_cell(cell));
        output.push_str(" |");
    }
    output.push('\n');
}

fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// The records of the table as JSON objects keyed by column name.
pub fn table_to_json(table: &VoterTable) -> JSValue {
    let records: Vec<JSValue> = table
        .records()
        .iter()
        .map(|r| {
            let mut obj: JSMap<String, JSValue> = JSMap::new();
            for (idx, name) in table.columns().iter().enumerate() {
                obj.insert(name.clone(), JSValue::from(r.get(idx).unwrap_or("")));
            }
            JSValue::Object(obj)
        })
        .collect();
    JSValue::Array(records)
}

/// Writes the messages and results of the lookup.
pub struct Presenter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Presenter<W> {
        Presenter { out, format }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_load_failure(&mut self, failure: &str) -> LookupResult<()> {
        writeln!(self.out, "[error] Failed to load the voter file: {}", failure)
            .context(WritingOutputSnafu {})
    }

    /// Shows why the loaded table cannot be searched. Returns `None` when
    /// it holds at least one record.
    pub fn check_loaded(&mut self, loaded: &LoadedTable) -> LookupResult<Option<RunStatus>> {
        if let Some(failure) = loaded.failure.as_ref() {
            self.render_load_failure(failure)?;
            return Ok(Some(RunStatus::LoadFailed));
        }
        if loaded.table.is_empty() {
            writeln!(self.out, "[warning] {}", NO_RECORDS_MSG).context(WritingOutputSnafu {})?;
            return Ok(Some(RunStatus::NoRecords));
        }
        Ok(None)
    }

    pub fn render_outcome(&mut self, outcome: &SearchOutcome) -> LookupResult<()> {
        match (outcome, self.format) {
            (SearchOutcome::MissingInput, _) => {
                writeln!(self.out, "[warning] {}", MISSING_INPUT_MSG)
            }
            (SearchOutcome::NoMatches, OutputFormat::Text) => {
                writeln!(self.out, "[error] {}", NO_MATCH_MSG)
            }
            (SearchOutcome::NoMatches, OutputFormat::Json) => writeln!(self.out, "[]"),
            (SearchOutcome::Found(results), OutputFormat::Text) => {
                let mut table_s = String::new();
                render_table(results, &mut table_s);
                writeln!(self.out, "[success] {} record(s) found.", results.len())
                    .and_then(|_| write!(self.out, "{}", table_s))
            }
            (SearchOutcome::Found(results), OutputFormat::Json) => {
                let pretty_js = serde_json::to_string_pretty(&table_to_json(results))
                    .context(SerializingJsonSnafu {})?;
                writeln!(self.out, "{}", pretty_js)
            }
        }
        .context(WritingOutputSnafu {})
    }

    /// Runs the interactive session until the input is exhausted.
    ///
    /// Each search asks for the voter name, then for the relation name. The
    /// search runs once the second name is entered, on the table currently
    /// held by the loader. Entering `:reload` as the voter name drops the
    /// cached table and reads the file again.
    pub fn run_session<R: BufRead>(
        &mut self,
        title: &str,
        loader: &DataLoader,
        mut input: R,
    ) -> LookupResult<RunStatus> {
        let loaded = loader.load();
        if let Some(status) = self.check_loaded(&loaded)? {
            return Ok(status);
        }
        writeln!(self.out, "{}", title).context(WritingOutputSnafu {})?;
        writeln!(
            self.out,
            "{} voter records loaded. Press Ctrl-D to quit.",
            loaded.table.len()
        )
        .context(WritingOutputSnafu {})?;

        let mut num_searches = 0;
        loop {
            writeln!(self.out).context(WritingOutputSnafu {})?;
            let voter_input = match self.prompt(&mut input, "Voter's Name: ")? {
                Some(s) => s,
                None => break,
            };
            if voter_input.trim() == RELOAD_COMMAND {
                loader.invalidate();
                let loaded = loader.load();
                if let Some(status) = self.check_loaded(&loaded)? {
                    return Ok(status);
                }
                writeln!(self.out, "{} voter records loaded.", loaded.table.len())
                    .context(WritingOutputSnafu {})?;
                continue;
            }
            let relation_input = match self.prompt(&mut input, "Father's / Husband's Name: ")? {
                Some(s) => s,
                None => break,
            };
            let loaded = loader.load();
            let outcome = handle_search(&loaded.table, &voter_input, &relation_input);
            self.render_outcome(&outcome)?;
            num_searches += 1;
        }
        info!("run_session: done after {} searches", num_searches);
        writeln!(self.out).context(WritingOutputSnafu {})?;
        Ok(RunStatus::Done)
    }

    fn prompt<R: BufRead>(&mut self, input: &mut R, label: &str) -> LookupResult<Option<String>> {
        write!(self.out, "{}", label).context(WritingOutputSnafu {})?;
        self.out.flush().context(WritingOutputSnafu {})?;
        let mut line = String::new();
        let n = input.read_line(&mut line).context(ReadingInputSnafu {})?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voter_search::builder::TableBuilder;

    fn scenario() -> VoterTable {
        let header = vec![
            "SNO".to_string(),
            "FM_NAME_V2".to_string(),
            "RLN_FM_NM_V2".to_string(),
        ];
        let mut builder = TableBuilder::new(header, &ColumnNames::default()).unwrap();
        builder.add_row(&[
            Some("1".to_string()),
            Some("Ramu Kumar".to_string()),
            Some("Murugesan".to_string()),
        ]);
        builder.add_row(&[
            Some("2".to_string()),
            Some("Ramesh".to_string()),
            Some("Murugan".to_string()),
        ]);
        builder.build()
    }

    fn render(outcome: &SearchOutcome, format: OutputFormat) -> String {
        let mut presenter = Presenter::new(Vec::new(), format);
        presenter.render_outcome(outcome).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn blank_input_is_missing_input() {
        let t = scenario();
        assert_eq!(handle_search(&t, "", ""), SearchOutcome::MissingInput);
        assert_eq!(handle_search(&t, "   ", "\t"), SearchOutcome::MissingInput);
    }

    #[test]
    fn search_outcomes() {
        let t = scenario();
        match handle_search(&t, " ram ", "") {
            SearchOutcome::Found(res) => assert_eq!(res.len(), 2),
            x => panic!("unexpected outcome {:?}", x),
        }
        assert_eq!(
            handle_search(&t, "ramu", "murugan"),
            SearchOutcome::NoMatches
        );
    }

    #[test]
    fn renders_messages() {
        assert_eq!(
            render(&SearchOutcome::MissingInput, OutputFormat::Text),
            format!("[warning] {}\n", MISSING_INPUT_MSG)
        );
        assert_eq!(
            render(&SearchOutcome::NoMatches, OutputFormat::Text),
            format!("[error] {}\n", NO_MATCH_MSG)
        );
    }

    #[test]
    fn renders_found_records_as_table() {
        let outcome = handle_search(&scenario(), "", "murugesan");
        assert_eq!(
            render(&outcome, OutputFormat::Text),
            "[success] 1 record(s) found.\n\
             | SNO | FM_NAME_V2 | RLN_FM_NM_V2 |\n\
             | --- | --- | --- |\n\
             | 1 | Ramu Kumar | Murugesan |\n"
        );
    }

    #[test]
    fn escapes_cells() {
        assert_eq!(escape_cell("a|b\\c"), "a\\|b\\\\c");
        assert_eq!(escape_cell("Ramu\r\nKumar"), "Ramu Kumar");
        assert_eq!(escape_cell("Ramu\rKumar\nS"), "Ramu Kumar S");
    }

    #[test]
    fn renders_found_records_as_json() {
        let outcome = handle_search(&scenario(), "RAMESH", "");
        let out = render(&outcome, OutputFormat::Json);
        let js: JSValue = serde_json::from_str(&out).unwrap();
        assert_eq!(
            js,
            serde_json::json!([{"SNO": "2", "FM_NAME_V2": "Ramesh", "RLN_FM_NM_V2": "Murugan"}])
        );
        assert_eq!(render(&SearchOutcome::NoMatches, OutputFormat::Json), "[]\n");
    }

    #[test]
    fn renders_load_failure() {
        let mut presenter = Presenter::new(Vec::new(), OutputFormat::Text);
        presenter
            .render_load_failure("Error opening file old_data.xlsx")
            .unwrap();
        assert_eq!(
            String::from_utf8(presenter.into_inner()).unwrap(),
            "[error] Failed to load the voter file: Error opening file old_data.xlsx\n"
        );
    }

    fn csv_loader(dir: &tempfile::TempDir, contents: &str) -> (DataLoader, PathBuf) {
        let p = dir.path().join("roll.csv");
        fs::write(&p, contents).unwrap();
        let loader = DataLoader::new(
            SourceSettings {
                input_type: InputType::Csv,
                path: p.clone(),
                worksheet: None,
            },
            ColumnNames::default(),
        );
        (loader, p)
    }

    const ROLL: &str = "SNO,FM_NAME_V2,RLN_FM_NM_V2\n1,Ramu Kumar,Murugesan\n2,Ramesh,Murugan\n";

    fn session(loader: &DataLoader, input: &str) -> (RunStatus, String) {
        let mut presenter = Presenter::new(Vec::new(), OutputFormat::Text);
        let status = presenter
            .run_session("Voter Details Search", loader, input.as_bytes())
            .unwrap();
        (status, String::from_utf8(presenter.into_inner()).unwrap())
    }

    #[test]
    fn interactive_session() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = csv_loader(&dir, ROLL);
        let (status, out) = session(&loader, "ramu\n\n\n  \nzzz\n\n");
        assert_eq!(status, RunStatus::Done);
        assert!(out.starts_with("Voter Details Search\n2 voter records loaded."));
        assert!(out.contains("[success] 1 record(s) found."));
        assert!(out.contains("| 1 | Ramu Kumar | Murugesan |"));
        assert!(out.contains(MISSING_INPUT_MSG));
        assert!(out.contains(NO_MATCH_MSG));
        assert_eq!(out.matches("Voter's Name: ").count(), 4);
    }

    #[test]
    fn session_ends_on_partial_input() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = csv_loader(&dir, ROLL);
        let (status, out) = session(&loader, "ramu");
        assert_eq!(status, RunStatus::Done);
        assert!(!out.contains("[success]"));
    }

    #[test]
    fn session_stops_on_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, p) = csv_loader(&dir, ROLL);
        fs::remove_file(&p).unwrap();
        let (status, out) = session(&loader, "ramu\n\n");
        assert_eq!(status, RunStatus::LoadFailed);
        assert!(out.starts_with("[error] Failed to load the voter file: "));
        assert!(!out.contains("Voter's Name"));
    }

    #[test]
    fn session_stops_on_empty_roll() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, _) = csv_loader(&dir, "SNO,FM_NAME_V2,RLN_FM_NM_V2\n");
        let (status, out) = session(&loader, "ramu\n\n");
        assert_eq!(status, RunStatus::NoRecords);
        assert_eq!(out, format!("[warning] {}\n", NO_RECORDS_MSG));
    }

    #[test]
    fn session_stops_when_reload_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, p) = csv_loader(&dir, ROLL);
        let _ = loader.load();
        fs::write(&p, "SNO,FM_NAME_V2,RLN_FM_NM_V2\n\n").unwrap();
        let (status, out) = session(&loader, ":reload\nramu\n\n");
        assert_eq!(status, RunStatus::NoRecords);
        assert!(out.ends_with(&format!("[warning] {}\n", NO_RECORDS_MSG)));
        assert!(!out.contains("[success]"));
    }

    #[test]
    fn session_reloads_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let (loader, p) = csv_loader(&dir, ROLL);
        let _ = loader.load();
        fs::write(&p, "SNO,FM_NAME_V2,RLN_FM_NM_V2\n3,Somu,Kannan\n").unwrap();
        let (status, out) = session(&loader, "somu\n\n:reload\nsomu\n\n");
        assert_eq!(status, RunStatus::Done);
        // The cached table is used until the reload.
        assert!(out.contains(NO_MATCH_MSG));
        assert!(out.contains("1 voter records loaded."));
        assert!(out.contains("| 3 | Somu | Kannan |"));
    }
}
