use crate::config::{Command, Config, OutputFormat, UsersArgs};
use crate::engine::{find_record, parse_record_id, run_query};
use crate::export::{to_csv, to_json, to_table};
use crate::metrics::{summarize, top_products};
use crate::query::ListQuery;
use crate::record::Record;
use crate::sample_data::{SALES_SERIES, TOP_PRODUCTS};
use std::error::Error;
use std::io::Write;

/// Run one `dashboard` command and write its output to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let records = config.records()?;

    match &config.command {
        Command::Users(args) => list_users(&records, args, out),
        Command::User { id } => show_user(&records, id, out),
        Command::Summary { top } => show_summary(&records, *top, out),
    }
}

fn list_users(
    records: &[Record],
    args: &UsersArgs,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let query = ListQuery::from_raw(&args.to_raw())?;
    let page = run_query(records, &query)?;

    let rendered = match args.format {
        OutputFormat::Table => to_table(&page),
        OutputFormat::Json => to_json(&page)? + "\n",
        OutputFormat::Csv => to_csv(&page),
    };
    out.write_all(rendered.as_bytes())?;

    Ok(())
}

fn show_user(records: &[Record], id: &str, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let id = parse_record_id(id)?;
    let record = find_record(records, id).ok_or_else(|| format!("user {id} not found"))?;

    writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
    Ok(())
}

fn show_summary(records: &[Record], top: usize, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let summary = summarize(records, &SALES_SERIES);
    let report = serde_json::json!({
        "summary": summary,
        "series": SALES_SERIES,
        "topProducts": top_products(&TOP_PRODUCTS, top),
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
