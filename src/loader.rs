use crate::error::LoadError;
use crate::record::{ActivityProfile, Address, Record, Status};
use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Load a user collection from a JSON file
///
/// The file must hold an array of records in the same shape the `users`
/// command prints with `--format json`.
///
/// # Examples
/// ```no_run
/// use dashboard::loader::from_json;
///
/// match from_json("users.json") {
///     Ok(users) => println!("Loaded {} users", users.len()),
///     Err(e) => eprintln!("Error loading JSON: {}", e),
/// }
/// ```
pub fn from_json(filepath: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let file = File::open(filepath)?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))?;
    validate(&records)?;
    Ok(records)
}

/// Load a user collection from a CSV file
///
/// The first line is a header. `id` and `name` columns are required;
/// `email`, `phone`, `street`, `city` and `zipcode` are optional. When a
/// `status` column is present and non-empty for a row, `total_orders`,
/// `total_spent`, `join_date` and `last_active` must be filled in as well.
/// Quoted fields may contain commas, line breaks and `""` escapes, and keep
/// their surrounding whitespace; unquoted fields are trimmed.
///
/// # Examples
/// ```no_run
/// use dashboard::loader::from_csv;
///
/// match from_csv("users.csv") {
///     Ok(users) => println!("Loaded {} users", users.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let content = fs::read_to_string(filepath)?;
    let mut rows = parse_csv(&content)?.into_iter();

    let Some(header) = rows.next() else {
        return Err(LoadError::Invalid("CSV file is empty".to_string()));
    };

    let columns: HashMap<String, usize> = header
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| (field.value.trim().to_lowercase(), i))
        .collect();

    for required in ["id", "name"] {
        if !columns.contains_key(required) {
            return Err(LoadError::Csv {
                line: header.line,
                message: format!("missing required column '{required}'"),
            });
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let row = CsvRow {
            fields: &row.fields,
            columns: &columns,
            line: row.line,
        };
        records.push(row.to_record()?);
    }

    validate(&records)?;
    debug!("loaded {} records from CSV", records.len());
    Ok(records)
}

/// Detect the file type and load the user collection
///
/// # Examples
/// ```no_run
/// use dashboard::loader::load_records;
///
/// match load_records("users.csv") {
///     Ok(users) => println!("Loaded {} users", users.len()),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_records(filepath: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("json") => from_json(path),
        Some("csv") => from_csv(path),
        Some(ext) => Err(LoadError::UnsupportedFormat(format!(
            "unsupported file extension: {ext}"
        ))),
        None => Err(LoadError::UnsupportedFormat(
            "file has no extension".to_string(),
        )),
    }
}

/// Check the collection invariants: positive unique ids and non-empty names.
pub fn validate(records: &[Record]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if record.id == 0 {
            return Err(LoadError::Invalid("record id must be positive".to_string()));
        }
        if record.name.trim().is_empty() {
            return Err(LoadError::Invalid(format!(
                "record {} has an empty name",
                record.id
            )));
        }
        if !seen.insert(record.id) {
            return Err(LoadError::Invalid(format!(
                "duplicate record id {}",
                record.id
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CsvField {
    value: String,
    quoted: bool,
}

impl CsvField {
    // Quoted cells are taken verbatim; bare cells lose surrounding whitespace
    fn text(&self) -> &str {
        if self.quoted {
            &self.value
        } else {
            self.value.trim()
        }
    }
}

#[derive(Debug, PartialEq)]
struct CsvLine {
    /// Line the record starts on
    line: usize,
    fields: Vec<CsvField>,
}

struct CsvRow<'a> {
    fields: &'a [CsvField],
    columns: &'a HashMap<String, usize>,
    line: usize,
}

impl CsvRow<'_> {
    // Missing columns and empty cells both read as absent
    fn get(&self, column: &str) -> Option<&str> {
        let index = *self.columns.get(column)?;
        self.fields
            .get(index)
            .map(CsvField::text)
            .filter(|value| !value.is_empty())
    }

    fn require(&self, column: &str) -> Result<&str, LoadError> {
        self.get(column).ok_or_else(|| self.error(format!("missing value for '{column}'")))
    }

    fn error(&self, message: String) -> LoadError {
        LoadError::Csv {
            line: self.line,
            message,
        }
    }

    fn number(&self, column: &str) -> Result<u32, LoadError> {
        let value = self.require(column)?;
        value
            .trim()
            .parse()
            .map_err(|_| self.error(format!("'{column}' is not a number: {value}")))
    }

    fn date(&self, column: &str) -> Result<NaiveDate, LoadError> {
        let value = self.require(column)?;
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| self.error(format!("'{column}' is not a YYYY-MM-DD date: {value}")))
    }

    fn to_record(&self) -> Result<Record, LoadError> {
        let id = self.number("id")?;
        let mut record = Record::new(id, self.require("name")?);

        if let Some(email) = self.get("email") {
            record = record.with_email(email);
        }
        if let Some(phone) = self.get("phone") {
            record = record.with_phone(phone);
        }

        let (street, city, zipcode) = (self.get("street"), self.get("city"), self.get("zipcode"));
        if street.is_some() || city.is_some() || zipcode.is_some() {
            record = record.with_address(Address {
                street: street.unwrap_or_default().to_string(),
                city: city.unwrap_or_default().to_string(),
                zipcode: zipcode.unwrap_or_default().to_string(),
            });
        }

        if let Some(status) = self.get("status") {
            let status = Status::parse(status)
                .ok_or_else(|| self.error(format!("unknown status '{status}'")))?;
            record = record.with_activity(ActivityProfile {
                status,
                total_orders: self.number("total_orders")?,
                total_spent: self.number("total_spent")?,
                join_date: self.date("join_date")?,
                last_active: self.date("last_active")?,
            });
        }

        Ok(record)
    }
}

// Split CSV text into records; quoted fields may span lines
fn parse_csv(content: &str) -> Result<Vec<CsvLine>, LoadError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current_field = CsvField::default();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Double quote inside quoted field - add a single quote
                    current_field.value.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                    current_field.quoted = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current_field));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current_field));
                push_row(&mut rows, std::mem::take(&mut fields), row_start);
                line += 1;
                row_start = line;
            }
            '\n' => {
                current_field.value.push(c);
                line += 1;
            }
            _ => {
                current_field.value.push(c);
            }
        }
    }

    if in_quotes {
        return Err(LoadError::Csv {
            line: row_start,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || current_field != CsvField::default() {
        fields.push(current_field);
        push_row(&mut rows, fields, row_start);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<CsvLine>, fields: Vec<CsvField>, line: usize) {
    if let [only] = fields.as_slice() {
        if !only.quoted && only.value.trim().is_empty() {
            warn!("skipping blank CSV line {}", line);
            return;
        }
    }

    rows.push(CsvLine { line, fields });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn texts(row: &CsvLine) -> Vec<&str> {
        row.fields.iter().map(CsvField::text).collect()
    }

    #[test]
    fn parse_handles_quotes() {
        let rows = parse_csv(r#"1,"Smith, Jane","say ""hi""",,x"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(texts(&rows[0]), vec!["1", "Smith, Jane", r#"say "hi""#, "", "x"]);
    }

    #[test]
    fn parse_quoted_field_spans_lines() {
        let rows = parse_csv("id,name\r\n1,\"Ann\nLee\"\n2,Bob\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(texts(&rows[1]), vec!["1", "Ann\nLee"]);
        assert_eq!(rows[1].line, 2);
        assert_eq!(rows[2].line, 4);
        assert_eq!(texts(&rows[2]), vec!["2", "Bob"]);
    }

    #[test]
    fn parse_keeps_whitespace_only_inside_quotes() {
        let rows = parse_csv("  7 ,\" Bob \", x ").unwrap();
        assert_eq!(texts(&rows[0]), vec!["7", " Bob ", "x"]);
    }

    #[test]
    fn parse_rejects_unterminated_quote() {
        let err = parse_csv("id,name\n\n1,\"open\nstill open").unwrap_err();
        assert!(matches!(err, LoadError::Csv { line: 3, .. }));
    }

    #[test]
    fn csv_multiline_and_padded_values() {
        let file = write_temp(
            ".csv",
            "id,name,email\n1,\"Ann\nLee\",\n2,\" Bob \",\" b@x.io\"\n",
        );

        let records = from_csv(file.path()).unwrap();
        assert_eq!(records[0].name, "Ann\nLee");
        assert!(records[0].email.is_none());
        assert_eq!(records[1].name, " Bob ");
        assert_eq!(records[1].email.as_deref(), Some(" b@x.io"));
    }

    #[test]
    fn csv_with_optional_columns() {
        let file = write_temp(
            ".csv",
            "id,name,email,street,city,zipcode\n\
             1,Bob,bob@site.io,1 Main St,Salem,01970\n\
             \n\
             2,\"Amy, Jr\",,,,\n",
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email.as_deref(), Some("bob@site.io"));
        assert_eq!(records[0].address.as_ref().unwrap().city, "Salem");
        assert_eq!(records[1].name, "Amy, Jr");
        assert!(records[1].email.is_none());
        assert!(records[1].address.is_none());
    }

    #[test]
    fn csv_with_activity_columns() {
        let file = write_temp(
            ".csv",
            "name,id,status,total_orders,total_spent,join_date,last_active\n\
             Bob,1,inactive,4,250,2024-02-01,2025-01-15\n\
             Amy,2,,,,,\n",
        );

        let records = from_csv(file.path()).unwrap();
        let activity = records[0].activity.as_ref().unwrap();
        assert_eq!(activity.status, Status::Inactive);
        assert_eq!(activity.total_orders, 4);
        assert_eq!(
            activity.join_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert!(records[1].activity.is_none());
    }

    #[test]
    fn csv_status_without_figures_is_rejected() {
        let file = write_temp(".csv", "id,name,status\n1,Bob,active\n");
        let err = from_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { line: 2, .. }));
    }

    #[test]
    fn csv_missing_required_column() {
        let file = write_temp(".csv", "name,email\nBob,bob@site.io\n");
        let err = from_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { line: 1, .. }));
    }

    #[test]
    fn csv_bad_id() {
        let file = write_temp(".csv", "id,name\nseven,Bob\n");
        assert!(matches!(
            from_csv(file.path()).unwrap_err(),
            LoadError::Csv { line: 2, .. }
        ));
    }

    #[test]
    fn empty_csv_is_rejected() {
        let file = write_temp(".csv", "");
        assert!(matches!(
            from_csv(file.path()).unwrap_err(),
            LoadError::Invalid(_)
        ));
    }

    #[test]
    fn json_records_round_trip_through_loader() {
        let records = vec![
            Record::new(1, "Bob").with_phone("+1 555-010-0000"),
            Record::new(2, "Amy"),
        ];
        let file = write_temp(".json", &serde_json::to_string(&records).unwrap());
        assert_eq!(load_records(file.path()).unwrap(), records);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_temp(".json", r#"[{"id":1,"name":"a"},{"id":1,"name":"b"}]"#);
        let err = load_records(file.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid record collection: duplicate record id 1"
        );
    }

    #[test]
    fn empty_names_and_zero_ids_are_rejected() {
        assert!(validate(&[Record::new(0, "a")]).is_err());
        assert!(validate(&[Record::new(1, "  ")]).is_err());
        assert!(validate(&[Record::new(1, "a"), Record::new(2, "b")]).is_ok());
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load_records(file.path()).unwrap_err(),
            LoadError::UnsupportedFormat(_)
        ));
        assert!(matches!(
            load_records("users").unwrap_err(),
            LoadError::UnsupportedFormat(_)
        ));
    }
}
