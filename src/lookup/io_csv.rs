// Primitives for reading CSV files.

use crate::lookup::*;

pub fn read_csv_file(path: &Path) -> LookupResult<RawTable> {
    let p = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path: p.clone() })?;
    let mut records = rdr.records();

    let header = records
        .next()
        .context(MissingHeaderSnafu { path: p.clone() })?
        .context(CsvRecordSnafu { lineno: 1_usize })?;
    debug!("read_csv_file: header: {:?}", header);
    let columns: Vec<String> = header.iter().map(|s| s.to_string()).collect();

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is on the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvRecordSnafu { lineno })?;
        rows.push(line.iter().map(|s| Some(s.to_string())).collect());
    }
    debug!("read_csv_file: {} rows in {:?}", rows.len(), p);
    Ok(RawTable { columns, rows })
}
