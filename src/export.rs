use crate::engine::QueryPage;
use crate::record::Record;

const CSV_HEADER: [&str; 12] = [
    "id",
    "name",
    "email",
    "phone",
    "street",
    "city",
    "zipcode",
    "status",
    "total_orders",
    "total_spent",
    "join_date",
    "last_active",
];

/// Convert a page of users to CSV format
///
/// The column layout matches what [`crate::loader::from_csv`] reads, so an
/// exported page can be fed back in with `--data`. Fields containing commas,
/// quotes or line breaks, or with leading or trailing whitespace, are quoted,
/// with embedded quotes doubled.
///
/// # Examples
/// ```
/// use dashboard::engine::run_query;
/// use dashboard::export::to_csv;
/// use dashboard::query::ListQuery;
/// use dashboard::record::Record;
///
/// let users = vec![Record::new(1, "Smith, Jane")];
/// let page = run_query(&users, &ListQuery::default()).unwrap();
/// assert!(to_csv(&page).contains("1,\"Smith, Jane\""));
/// ```
pub fn to_csv(page: &QueryPage<'_>) -> String {
    let mut csv_content = CSV_HEADER.join(",");
    csv_content.push('\n');

    for record in &page.records {
        let row: Vec<String> = csv_fields(record).iter().map(|v| escape_csv(v)).collect();
        csv_content.push_str(&row.join(","));
        csv_content.push('\n');
    }

    csv_content
}

fn csv_fields(record: &Record) -> [String; 12] {
    let address = record.address.as_ref();
    let activity = record.activity.as_ref();

    [
        record.id.to_string(),
        record.name.clone(),
        record.email_or_empty().to_string(),
        record.phone.clone().unwrap_or_default(),
        address.map(|a| a.street.clone()).unwrap_or_default(),
        address.map(|a| a.city.clone()).unwrap_or_default(),
        address.map(|a| a.zipcode.clone()).unwrap_or_default(),
        activity.map(|a| a.status.as_str().to_string()).unwrap_or_default(),
        activity.map(|a| a.total_orders.to_string()).unwrap_or_default(),
        activity.map(|a| a.total_spent.to_string()).unwrap_or_default(),
        activity.map(|a| a.join_date.to_string()).unwrap_or_default(),
        activity.map(|a| a.last_active.to_string()).unwrap_or_default(),
    ]
}

fn escape_csv(value: &str) -> String {
    let padded = value.trim() != value;
    if padded || value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize a page, pagination included, as pretty-printed JSON.
pub fn to_json(page: &QueryPage<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(page)
}

/// Render a page as a fixed-width text table followed by a pagination line.
pub fn to_table(page: &QueryPage<'_>) -> String {
    let mut rows: Vec<[String; 6]> = vec![[
        "ID".to_string(),
        "NAME".to_string(),
        "EMAIL".to_string(),
        "STATUS".to_string(),
        "ORDERS".to_string(),
        "SPENT".to_string(),
    ]];

    for record in &page.records {
        let activity = record.activity.as_ref();
        rows.push([
            record.id.to_string(),
            record.name.clone(),
            record.email_or_empty().to_string(),
            activity.map_or("-".to_string(), |a| a.status.as_str().to_string()),
            activity.map_or("-".to_string(), |a| a.total_orders.to_string()),
            activity.map_or("-".to_string(), |a| format!("${}", a.total_spent)),
        ]);
    }

    let mut widths = [0usize; 6];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    let info = page.pagination;
    out.push_str(&format!(
        "page {} of {} ({} matching users)\n",
        info.current_page, info.total_pages, info.total_count
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_query;
    use crate::loader::from_csv;
    use crate::query::ListQuery;
    use crate::sample_data::generate_users;
    use std::io::Write;

    #[test]
    fn csv_escapes_special_characters() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("Ann\nLee"), "\"Ann\nLee\"");
        assert_eq!(escape_csv(" Bob "), "\" Bob \"");
    }

    #[test]
    fn csv_export_keeps_line_breaks_and_padding() {
        let users = vec![
            Record::new(1, "Ann\nLee"),
            Record::new(2, " Bob ").with_email(" b@x.io"),
        ];
        let page = run_query(&users, &ListQuery::default().page(1, 10)).unwrap();

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(to_csv(&page).as_bytes()).unwrap();

        let reloaded = from_csv(file.path()).unwrap();
        let expected: Vec<Record> = page.records.iter().map(|r| (*r).clone()).collect();
        assert_eq!(reloaded, expected);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn csv_export_reloads_to_same_records() {
        let users = generate_users(12, 3);
        let page = run_query(&users, &ListQuery::default().page(1, 100)).unwrap();

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(to_csv(&page).as_bytes()).unwrap();

        let reloaded = from_csv(file.path()).unwrap();
        let expected: Vec<Record> = page.records.iter().map(|r| (*r).clone()).collect();
        assert_eq!(reloaded, expected);

        let activity: Vec<_> = reloaded.iter().map(|r| r.activity.clone()).collect();
        let expected_activity: Vec<_> = expected.iter().map(|r| r.activity.clone()).collect();
        assert_eq!(activity, expected_activity);
    }

    #[test]
    fn json_includes_pagination() {
        let users = vec![Record::new(1, "Bob")];
        let page = run_query(&users, &ListQuery::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&page).unwrap()).unwrap();
        assert_eq!(value["records"][0]["name"], "Bob");
        assert_eq!(value["pagination"]["totalCount"], 1);
        assert_eq!(value["pagination"]["totalPages"], 1);
        assert_eq!(value["pagination"]["currentPage"], 1);
    }

    #[test]
    fn table_aligns_columns() {
        let users = vec![
            Record::new(1, "Bob").with_email("bob@site.io"),
            Record::new(22, "Amy"),
        ];
        let page = run_query(&users, &ListQuery::default()).unwrap();
        let table = to_table(&page);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID  NAME  EMAIL        STATUS  ORDERS  SPENT");
        assert_eq!(lines[1], "22  Amy                -       -       -");
        assert_eq!(lines[2], "1   Bob   bob@site.io  -       -       -");
        assert_eq!(lines[3], "page 1 of 1 (2 matching users)");
    }
}
