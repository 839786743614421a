//! CSV table writer

use crate::error::Result;
use crate::types::MetadataRecord;
use std::path::Path;

/// Writes harvested records to a CSV file
///
/// One header row naming every column in fixed order, then one data row per
/// record. Every cell is always present, possibly empty. Output is UTF-8;
/// patient names may be non-ASCII. Write failures are fatal and surface to
/// the caller.
pub fn write_csv(path: &Path, records: &[MetadataRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(MetadataRecord::COLUMNS)?;
    for record in records {
        writer.write_record(record.row())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_header_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("results.csv");
        let record = MetadataRecord {
            subject_dir: "1675428".to_string(),
            series_description: "ep2d_diff, 20 dir".to_string(),
            ..Default::default()
        };

        write_csv(&path, &[record]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), MetadataRecord::COLUMNS.len());
        assert_eq!(&headers[0], "SubjectDir");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1675428");
        // Embedded comma survives quoting
        assert_eq!(&rows[0][8], "ep2d_diff, 20 dir");
    }

    #[test]
    fn test_empty_harvest_still_writes_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("results.csv");

        write_csv(&path, &[]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), MetadataRecord::COLUMNS.len());
        assert_eq!(reader.records().count(), 0);
    }

    #[test]
    fn test_non_ascii_fields_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("results.csv");
        let record = MetadataRecord {
            patient_name: "山田^太郎".to_string(),
            institution_name: "Hôpital Général".to_string(),
            ..Default::default()
        };

        write_csv(&path, &[record]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "山田^太郎");
        assert_eq!(&row[7], "Hôpital Général");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let result = write_csv(Path::new("/no/such/dir/results.csv"), &[]);
        assert!(result.is_err());
    }
}
