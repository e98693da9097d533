// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};
use ndarray::{Array1, Array2};

use crate::data::DataLoader;
use crate::data::record::{
    Column, FEATURE_COUNT, Month, SessionRecord, VisitorType, parse_flag,
};
use crate::errors::CsvError;

/// Loads the online shoppers dataset: a headered CSV with the seventeen session
/// features followed by the `Revenue` label.
pub struct ShoppingLoader;

/// Header positions of every required column, indexed by `Column::ordinal`.
struct ColumnIndex {
    positions: [usize; FEATURE_COUNT + 1],
    width: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, CsvError> {
        let mut positions = [0; FEATURE_COUNT + 1];
        for column in Column::ALL {
            positions[column.ordinal()] = headers
                .iter()
                .position(|h| h == column.name())
                .ok_or(CsvError::MissingColumn { column: column.name() })?;
        }
        Ok(ColumnIndex { positions, width: headers.len() })
    }
}

/// A single data row together with the index needed to address its fields.
struct Row<'a> {
    record: &'a StringRecord,
    index: &'a ColumnIndex,
    number: usize,
}

impl Row<'_> {
    fn text(&self, column: Column) -> &str {
        // Row width is checked against the header before a Row is built.
        &self.record[self.index.positions[column.ordinal()]]
    }

    // Numeric fields tolerate surrounding whitespace; categorical ones do not.
    fn integer(&self, column: Column) -> Result<i64, CsvError> {
        let value = self.text(column);
        value.trim().parse::<i64>().map_err(|e| CsvError::InvalidInteger {
            value: value.to_string(),
            row: self.number,
            column: column.name(),
            source: e,
        })
    }

    fn float(&self, column: Column) -> Result<f64, CsvError> {
        let value = self.text(column);
        value.trim().parse::<f64>().map_err(|e| CsvError::InvalidFloat {
            value: value.to_string(),
            row: self.number,
            column: column.name(),
            source: e,
        })
    }

    fn month(&self) -> Result<Month, CsvError> {
        let value = self.text(Column::Month);
        Month::from_abbreviation(value)
            .ok_or_else(|| CsvError::UnknownMonth { value: value.to_string(), row: self.number })
    }

    fn session(&self) -> Result<SessionRecord, CsvError> {
        Ok(SessionRecord {
            administrative: self.integer(Column::Administrative)?,
            administrative_duration: self.float(Column::AdministrativeDuration)?,
            informational: self.integer(Column::Informational)?,
            informational_duration: self.float(Column::InformationalDuration)?,
            product_related: self.integer(Column::ProductRelated)?,
            product_related_duration: self.float(Column::ProductRelatedDuration)?,
            bounce_rates: self.float(Column::BounceRates)?,
            exit_rates: self.float(Column::ExitRates)?,
            page_values: self.float(Column::PageValues)?,
            special_day: self.float(Column::SpecialDay)?,
            month: self.month()?,
            operating_systems: self.integer(Column::OperatingSystems)?,
            browser: self.integer(Column::Browser)?,
            region: self.integer(Column::Region)?,
            traffic_type: self.integer(Column::TrafficType)?,
            visitor_type: VisitorType::from_token(self.text(Column::VisitorType)),
            weekend: parse_flag(self.text(Column::Weekend)),
        })
    }

    fn label(&self) -> u8 {
        u8::from(parse_flag(self.text(Column::Revenue)))
    }
}

impl ShoppingLoader {
    /// Reads every session and its purchase label, preserving file order.
    ///
    /// Rows are numbered from 1, not counting the header. The first malformed
    /// field aborts the whole load.
    pub fn read_sessions<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Vec<SessionRecord>, Vec<u8>), CsvError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(CsvError::EmptyFile);
        }
        let index = ColumnIndex::from_headers(&headers)?;
        debug!("Resolved column positions {:?} in {:?}", index.positions, path);

        let mut sessions = Vec::new();
        let mut labels = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            if record.len() != index.width {
                return Err(CsvError::InconsistentColumns {
                    row: i + 1,
                    actual: record.len(),
                    expected: index.width,
                });
            }
            let row = Row { record: &record, index: &index, number: i + 1 };
            sessions.push(row.session()?);
            labels.push(row.label());
        }

        if sessions.is_empty() {
            return Err(CsvError::EmptyFile);
        }
        info!("Loaded {} sessions from {:?}", sessions.len(), path);
        Ok((sessions, labels))
    }
}

impl DataLoader for ShoppingLoader {
    type Error = CsvError;

    fn load<P: AsRef<Path>>(path: P) -> Result<(Array2<f64>, Array1<u8>), Self::Error> {
        let (sessions, labels) = Self::read_sessions(path)?;

        let n_rows = sessions.len();
        let mut evidence = Vec::with_capacity(n_rows * FEATURE_COUNT);
        for session in &sessions {
            evidence.extend_from_slice(&session.to_evidence());
        }

        let features = Array2::from_shape_vec((n_rows, FEATURE_COUNT), evidence)?;
        let targets = Array1::from_vec(labels);

        Ok((features, targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_data;
    use ndarray::array;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Administrative,Administrative_Duration,Informational,Informational_Duration,\
ProductRelated,ProductRelated_Duration,BounceRates,ExitRates,PageValues,SpecialDay,Month,\
OperatingSystems,Browser,Region,TrafficType,VisitorType,Weekend,Revenue";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn dataset(rows: &[&str]) -> NamedTempFile {
        let mut content = String::from(HEADER);
        content.push('\n');
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        create_temp_csv(&content)
    }

    #[test]
    fn test_load_two_sessions() {
        let temp_file = dataset(&[
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Returning_Visitor,FALSE,FALSE",
            "3,142.5,1,12.0,48,1720.25,0.004,0.017,23.6,0.8,June,2,5,3,20,New_Visitor,TRUE,TRUE",
        ]);

        let (features, targets) =
            load_data::<ShoppingLoader, _>(temp_file.path()).expect("Failed to load CSV");

        let expected_features = array![
            [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.2, 0.2, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            [
                3.0, 142.5, 1.0, 12.0, 48.0, 1720.25, 0.004, 0.017, 23.6, 0.8, 5.0, 2.0, 5.0, 3.0,
                20.0, 0.0, 1.0
            ]
        ];
        let expected_targets = array![0u8, 1];

        assert_eq!(features, expected_features, "Features do not match");
        assert_eq!(targets, expected_targets, "Targets do not match");
    }

    #[test]
    fn test_load_preserves_row_order_and_duplicates() {
        let row = "1,1.0,0,0.0,2,3.0,0.0,0.1,0.0,0.0,Mar,1,1,1,1,Other,FALSE,TRUE";
        let other = "5,1.0,0,0.0,2,3.0,0.0,0.1,0.0,0.0,Nov,1,1,1,1,Other,FALSE,FALSE";
        let temp_file = dataset(&[row, other, row]);

        let (features, targets) =
            load_data::<ShoppingLoader, _>(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(features.nrows(), 3);
        assert_eq!(features.ncols(), FEATURE_COUNT);
        assert_eq!(features[[0, 0]], 1.0);
        assert_eq!(features[[1, 0]], 5.0);
        assert_eq!(features[[1, Column::Month.ordinal()]], 10.0);
        assert_eq!(features.row(0), features.row(2));
        assert_eq!(targets, array![1u8, 0, 1]);
    }

    #[test]
    fn test_flags_are_case_sensitive() {
        let temp_file = dataset(&[
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Jan,1,1,1,1,Returning_Visitor,true,true",
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Dec,1,1,1,1,returning_visitor,TRUE,TRUE",
        ]);

        let (features, targets) =
            load_data::<ShoppingLoader, _>(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(features[[0, Column::Weekend.ordinal()]], 0.0);
        assert_eq!(features[[0, Column::VisitorType.ordinal()]], 1.0);
        assert_eq!(features[[0, Column::Month.ordinal()]], 0.0);
        assert_eq!(features[[1, Column::Weekend.ordinal()]], 1.0);
        assert_eq!(features[[1, Column::VisitorType.ordinal()]], 0.0);
        assert_eq!(features[[1, Column::Month.ordinal()]], 11.0);
        assert_eq!(targets, array![0u8, 1]);
    }

    #[test]
    fn test_columns_located_by_header_name() {
        let content = "Revenue,Month,Administrative,Administrative_Duration,Informational,\
Informational_Duration,ProductRelated,ProductRelated_Duration,BounceRates,ExitRates,PageValues,\
SpecialDay,OperatingSystems,Browser,Region,TrafficType,VisitorType,Weekend,Extra\n\
TRUE,Aug,7,1.5,0,0.0,2,3.0,0.0,0.1,0.0,0.0,1,2,3,4,New_Visitor,FALSE,ignored\n";
        let temp_file = create_temp_csv(content);

        let (sessions, labels) =
            ShoppingLoader::read_sessions(temp_file.path()).expect("Failed to load CSV");

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].administrative, 7);
        assert_eq!(sessions[0].month, Month::August);
        assert_eq!(sessions[0].traffic_type, 4);
        assert_eq!(labels, vec![1]);
    }

    #[test]
    fn test_load_rejects_jun() {
        let temp_file = dataset(&[
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Returning_Visitor,FALSE,FALSE",
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Jun,1,1,1,1,Returning_Visitor,FALSE,FALSE",
        ]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(
            matches!(result, Err(CsvError::UnknownMonth { ref value, row }) if value == "Jun" && row == 2)
        );
    }

    #[test]
    fn test_load_invalid_integer() {
        let temp_file =
            dataset(&["1.5,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Other,FALSE,FALSE"]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(
            result,
            Err(CsvError::InvalidInteger { ref value, row: 1, column: "Administrative", .. })
                if value == "1.5"
        ));
    }

    #[test]
    fn test_load_invalid_float() {
        let temp_file =
            dataset(&["0,0.0,0,0.0,1,0.0,abc,0.2,0.0,0.0,Feb,1,1,1,1,Other,FALSE,FALSE"]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(
            result,
            Err(CsvError::InvalidFloat { ref value, row: 1, column: "BounceRates", .. })
                if value == "abc"
        ));
        if let Err(e) = result {
            assert!(e.to_string().contains("row 1, column BounceRates"), "Unexpected error: {}", e);
        }
    }

    #[test]
    fn test_load_padded_numeric_fields() {
        let temp_file = dataset(&[
            " 3, 1.5,0,0.0,2 ,3.0,0.0,0.1,0.0,0.0,Jan,1,1,1,1,Other,FALSE,FALSE",
        ]);

        let (features, _) =
            load_data::<ShoppingLoader, _>(temp_file.path()).expect("Failed to load CSV");
        assert_eq!(features[[0, Column::Administrative.ordinal()]], 3.0);
        assert_eq!(features[[0, Column::AdministrativeDuration.ordinal()]], 1.5);
        assert_eq!(features[[0, Column::ProductRelated.ordinal()]], 2.0);
    }

    #[test]
    fn test_load_padded_month_is_unknown() {
        let temp_file =
            dataset(&["0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0, Jan,1,1,1,1,Other,FALSE,FALSE"]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(
            matches!(result, Err(CsvError::UnknownMonth { ref value, row: 1 }) if value == " Jan")
        );
    }

    #[test]
    fn test_load_invalid_integer_keeps_raw_text() {
        let temp_file =
            dataset(&[" x ,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Other,FALSE,FALSE"]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(
            result,
            Err(CsvError::InvalidInteger { ref value, row: 1, .. }) if value == " x "
        ));
    }

    #[test]
    fn test_load_missing_column() {
        let content = "Administrative,Month,Revenue\n1,Jan,TRUE\n";
        let temp_file = create_temp_csv(content);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(
            result,
            Err(CsvError::MissingColumn { column: "Administrative_Duration" })
        ));
    }

    #[test]
    fn test_load_short_row() {
        let temp_file = dataset(&[
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Other,FALSE,FALSE",
            "0,0.0,0,0.0,1,0.0,0.2,0.2,0.0,0.0,Feb,1,1,1,1,Other,FALSE",
        ]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(
            result,
            Err(CsvError::InconsistentColumns { row: 2, actual: 17, expected: 18 })
        ));
    }

    #[test]
    fn test_load_header_only() {
        let temp_file = dataset(&[]);

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_file = create_temp_csv("");

        let result = load_data::<ShoppingLoader, _>(temp_file.path());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_data::<ShoppingLoader, _>("nonexistent.csv");
        assert!(matches!(result, Err(CsvError::FileOpen(_))));
    }
}
