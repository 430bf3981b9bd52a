use crate::record::Record;
use serde::Serialize;

/// Revenue is reported as order volume with a flat 20% uplift.
pub const REVENUE_MULTIPLIER: f64 = 1.2;

/// One month of the sales / new-users time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub sales: u64,
    pub users: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub name: &'static str,
    pub sales: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Zero growth counts as trending up.
    pub fn from_growth(growth: f64) -> Self {
        if growth >= 0.0 { Trend::Up } else { Trend::Down }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "Trending up",
            Trend::Down => "Needs attention",
        }
    }
}

/// Headline figures of the dashboard page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_users: usize,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub growth_rate: Option<f64>,
    pub trend: Option<Trend>,
}

pub fn total_sales(series: &[SeriesPoint]) -> u64 {
    series.iter().map(|p| p.sales).sum()
}

/// Percentage change in sales from the first to the last point.
///
/// Returns `None` for an empty series or when the first value is zero.
pub fn growth_rate(series: &[SeriesPoint]) -> Option<f64> {
    let (first, last) = (series.first()?, series.last()?);
    if first.sales == 0 {
        return None;
    }

    Some((last.sales as f64 - first.sales as f64) / first.sales as f64 * 100.0)
}

pub fn summarize(users: &[Record], series: &[SeriesPoint]) -> DashboardSummary {
    let total_orders = total_sales(series);
    let growth = growth_rate(series);

    DashboardSummary {
        total_users: users.len(),
        total_orders,
        total_revenue: total_orders as f64 * REVENUE_MULTIPLIER,
        growth_rate: growth,
        trend: growth.map(Trend::from_growth),
    }
}

/// Best sellers first; products with equal sales keep their input order.
pub fn top_products(products: &[ProductSales], limit: usize) -> Vec<ProductSales> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranked.truncate(limit);
    ranked
}
