//! Roster import from CSV: one player per line, name in the first column.

use crate::models::TournamentError;
use std::io::Read;

/// Read player names. Lines starting with `#` are comments; blank names are skipped.
pub fn read_roster_csv<R: Read>(reader: R) -> Result<Vec<String>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
