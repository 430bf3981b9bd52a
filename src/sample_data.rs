use crate::metrics::{ProductSales, SeriesPoint};
use crate::record::{ActivityProfile, Address, Record, Status};
use chrono::{Days, NaiveDate};
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 50;
pub const DEFAULT_SEED: u64 = 0x00AD_B2A4;

const FIRST_NAMES: [&str; 20] = [
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Elijah", "Sophia", "James", "Isabella", "Lucas",
    "Mia", "Mateo", "Amelia", "Henry", "Harper", "Theodore", "Evelyn", "Jack", "Abigail", "Owen",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "example.org",
];

const STREETS: [&str; 8] = [
    "Main St", "Oak Ave", "Pine Rd", "Maple Dr", "Cedar Ln", "Elm St", "Lake View", "Hill Rd",
];

const CITIES: [&str; 10] = [
    "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton", "Fairview",
    "Salem", "Madison", "Georgetown",
];

lazy_static! {
    /// The fixed user collection shown by the dashboard, built once per process.
    pub static ref SAMPLE_USERS: Vec<Record> = generate_users(SAMPLE_SIZE, DEFAULT_SEED);
}

/// Monthly sales and new-user counts plotted on the dashboard.
pub const SALES_SERIES: [SeriesPoint; 7] = [
    SeriesPoint { label: "Jan", sales: 4000, users: 2400 },
    SeriesPoint { label: "Feb", sales: 3000, users: 1398 },
    SeriesPoint { label: "Mar", sales: 2000, users: 9800 },
    SeriesPoint { label: "Apr", sales: 2780, users: 3908 },
    SeriesPoint { label: "May", sales: 1890, users: 4800 },
    SeriesPoint { label: "Jun", sales: 2390, users: 3800 },
    SeriesPoint { label: "Jul", sales: 3490, users: 4300 },
];

pub const TOP_PRODUCTS: [ProductSales; 5] = [
    ProductSales { name: "Product A", sales: 400 },
    ProductSales { name: "Product B", sales: 300 },
    ProductSales { name: "Product C", sales: 200 },
    ProductSales { name: "Product D", sales: 278 },
    ProductSales { name: "Product E", sales: 189 },
];

/// Date the generated activity figures are measured back from.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default()
}

/// Generate `count` synthetic users with ids `1..=count`.
///
/// The same `(count, seed)` pair always yields the same collection, activity
/// profiles included, so status filtering is reproducible.
pub fn generate_users(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    let today = reference_date();

    (1..=count)
        .map(|i| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let domain = DOMAINS[rng.gen_range(0..DOMAINS.len())];

            let email = format!(
                "{}.{}{}@{}",
                first.to_lowercase(),
                last.to_lowercase(),
                rng.gen_range(1..100),
                domain
            );
            let phone = format!(
                "+1 {}-{}-{}",
                rng.gen_range(100..1000),
                rng.gen_range(100..1000),
                rng.gen_range(1000..10000)
            );
            let address = Address {
                street: format!(
                    "{} {}",
                    rng.gen_range(1..10000),
                    STREETS[rng.gen_range(0..STREETS.len())]
                ),
                city: CITIES[rng.gen_range(0..CITIES.len())].to_string(),
                zipcode: format!("{:05}", rng.gen_range(10000..100000)),
            };

            let join_date = today - Days::new(rng.gen_range(0..730));
            let last_active = (today - Days::new(rng.gen_range(0..30))).max(join_date);
            let activity = ActivityProfile {
                status: if rng.gen_bool(0.7) {
                    Status::Active
                } else {
                    Status::Inactive
                },
                total_orders: rng.gen_range(1..=50),
                total_spent: rng.gen_range(100..5100),
                join_date,
                last_active,
            };

            Record::new(i as u32, format!("{first} {last}"))
                .with_email(email)
                .with_phone(phone)
                .with_address(address)
                .with_activity(activity)
        })
        .collect()
}
