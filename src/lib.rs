/*!
# Admin Dashboard

Data core of an analytics admin dashboard: the user list, its query engine,
and the headline sales metrics, with a small command line front end.

## Overview

The dashboard shows a fixed collection of synthetic users together with a
handful of monthly sales figures. Everything is computed in memory from data
supplied once at start-up; there is no persistence layer and no network
surface.

## Architecture

### Data
- **record**: the `Record` (user) model, its address and activity profile
- **sample_data**: deterministic generator for the 50 sample users plus the
  fixed sales series and top-product figures
- **loader**: alternative data source reading users from JSON or CSV files

### Query
- **query**: typed list parameters (search, sort key and order, status
  filter, page) with lenient parsing from raw strings
- **engine**: the list query engine (filter, stable sort, paginate) and
  single-user lookup

### Presentation helpers
- **metrics**: totals, revenue, first-to-last growth rate and trend
- **export**: renders a result page as a text table, JSON or CSV
- **config** / **app**: command line parsing and command dispatch

## Query semantics

- Search is a case-insensitive substring match on name, email and the
  decimal id; an empty search matches everything.
- Sorting is stable; descending order is the exact reverse of ascending.
- Pages are 1-based; a page past the end is empty rather than an error.
- A zero page or page size is rejected with `QueryError::InvalidArgument`.

## Usage

```text
dashboard users --search am --sort-by email --page 2 --page-size 10
dashboard users --status inactive --format csv > inactive.csv
dashboard --data inactive.csv users --sort-order desc
dashboard user 17
dashboard summary --top 3
```
*/

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod query;
pub mod record;
pub mod sample_data;

/// Re-export the types most callers need
pub use engine::{PageInfo, QueryPage, find_record, run_query};
pub use error::{LoadError, QueryError};
pub use query::{ListQuery, RawQuery, SortKey, SortOrder, StatusFilter};
pub use record::{ActivityProfile, Address, Record, Status};
pub use sample_data::SAMPLE_USERS;
