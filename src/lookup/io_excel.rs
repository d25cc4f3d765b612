use calamine::{open_workbook_auto, Reader};

use crate::lookup::{io_common::cell_to_string, *};

/// Reads the worksheet of a workbook into a raw table.
///
/// The first row of the worksheet is the header. Without a worksheet name,
/// the first worksheet of the workbook is read.
pub fn read_excel_file(path: &Path, worksheet: Option<&str>) -> LookupResult<RawTable> {
    let p = path.display().to_string();
    debug!("read_excel_file: path: {:?} worksheet: {:?}", &p, &worksheet);
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path: p.clone() })?;

    let range_o = match worksheet {
        Some(worksheet_name) => workbook.worksheet_range(worksheet_name),
        None => workbook.worksheet_range_at(0),
    };
    let wrange = match (range_o, worksheet) {
        (Some(r), _) => r.context(OpeningExcelSnafu { path: p.clone() })?,
        (None, Some(worksheet_name)) => {
            return MissingWorksheetSnafu {
                name: worksheet_name,
                path: p,
            }
            .fail()
        }
        (None, None) => return EmptyExcelSnafu { path: p }.fail(),
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(MissingHeaderSnafu { path: p.clone() })?;
    debug!("read_excel_file: header: {:?}", header);
    let columns: Vec<String> = header
        .iter()
        .map(|c| cell_to_string(c).unwrap_or_default())
        .collect();

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    for row in iter {
        rows.push(row.iter().map(cell_to_string).collect());
    }
    debug!("read_excel_file: {} rows in {:?}", rows.len(), p);
    Ok(RawTable { columns, rows })
}
