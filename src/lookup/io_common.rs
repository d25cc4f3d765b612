use calamine::DataType;
use chrono::NaiveTime;
use std::error::Error;

/// Converts a spreadsheet cell to the text that is displayed for it.
///
/// Empty cells have no text.
pub fn cell_to_string(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        // Serial numbers and ages come out of Excel as floats.
        DataType::Float(f) if f.fract() == 0.0 => Some(format!("{:.0}", f)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Dates are stored as serial numbers; midnight is shown as a plain date.
        DataType::DateTime(d) => Some(match cell.as_datetime() {
            Some(dt) if Some(dt.time()) == NaiveTime::from_hms_opt(0, 0, 0) => {
                dt.date().to_string()
            }
            Some(dt) => dt.to_string(),
            None => d.to_string(),
        }),
        DataType::Error(e) => Some(format!("#ERROR: {:?}", e)),
    }
}

/// The message of an error followed by all its causes.
pub fn describe_error(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        cur = cause.source();
    }
    msg
}
