mod gps_record;
mod plot;

pub use gps_record::*;
pub use plot::*;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::Path;

/// Reads all records of a delimited file with a header row.
pub fn read_csv<T: DeserializeOwned>(
    file_path: &Path,
    delimiter: u8,
) -> Result<Vec<T>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.deserialize() {
        let record: T = result?;
        data.push(record);
    }

    Ok(data)
}
