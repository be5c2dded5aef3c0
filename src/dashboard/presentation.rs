use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::DisplaySettings;
use crate::dashboard::derive::{MonthlyTotals, StatusAggregate};
use crate::models::{CriticalStockItem, Kpis, TopProduct};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTH_INITIALS: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBar {
    /// 1-based month
    pub month: u32,
    pub label: &'static str,
    pub initial: &'static str,
    pub amount: f64,
    pub formatted_amount: String,
    pub height_percent: f64,
    /// Zero-height bar; renderers draw a hairline instead.
    pub at_floor: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChart {
    pub year: i32,
    pub max_amount: f64,
    pub annual_total: f64,
    pub formatted_annual_total: String,
    pub bars: Vec<RevenueBar>,
}

/// Which bars a chart emphasises.
#[derive(Debug, Clone, Copy)]
pub enum BarHighlight {
    /// The month containing this date, if it falls in the charted year.
    CurrentMonth(NaiveDate),
    NonZero,
}

pub fn revenue_chart(
    totals: &MonthlyTotals,
    year: i32,
    highlight: BarHighlight,
    currency_symbol: &str,
) -> RevenueChart {
    let max_amount = totals.iter().copied().fold(1.0_f64, f64::max);
    let annual_total: f64 = totals.iter().sum();

    let bars = totals
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            let height_percent = (amount / max_amount * 100.0).max(0.0);
            let highlighted = match highlight {
                BarHighlight::CurrentMonth(today) => today.year() == year && today.month0() as usize == i,
                BarHighlight::NonZero => amount > 0.0,
            };
            RevenueBar {
                month: i as u32 + 1,
                label: MONTH_LABELS[i],
                initial: MONTH_INITIALS[i],
                amount,
                formatted_amount: format_amount(amount, currency_symbol),
                height_percent,
                at_floor: height_percent <= 0.0,
                highlighted,
            }
        })
        .collect();

    RevenueChart {
        year,
        max_amount,
        annual_total,
        formatted_annual_total: format_amount(annual_total, currency_symbol),
        bars,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShares {
    pub pending: f64,
    pub prepared_or_shipped: f64,
    pub delivered: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDonut {
    #[serde(flatten)]
    pub counts: StatusAggregate,
    pub shares: StatusShares,
}

impl From<StatusAggregate> for StatusDonut {
    fn from(counts: StatusAggregate) -> Self {
        let share = |n: u64| {
            if counts.total == 0 {
                0.0
            } else {
                n as f64 / counts.total as f64
            }
        };
        Self {
            shares: StatusShares {
                pending: share(counts.pending),
                prepared_or_shipped: share(counts.prepared_or_shipped),
                delivered: share(counts.delivered),
            },
            counts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockBadge {
    Critical,
    Ok,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCards {
    pub total_revenue: f64,
    pub formatted_total_revenue: String,
    pub active_orders: u64,
    pub customer_count: u64,
    pub critical_stock_count: u64,
    pub stock_badge: StockBadge,
}

pub fn kpi_cards(kpis: Option<&Kpis>, currency_symbol: &str) -> KpiCards {
    let default = Kpis::default();
    let kpis = kpis.unwrap_or(&default);

    KpiCards {
        total_revenue: kpis.total_revenue,
        formatted_total_revenue: format_amount(kpis.total_revenue, currency_symbol),
        active_orders: kpis.active_orders,
        customer_count: kpis.customer_count,
        critical_stock_count: kpis.critical_stock_count,
        stock_badge: if kpis.critical_stock_count > 0 {
            StockBadge::Critical
        } else {
            StockBadge::Ok
        },
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductRow {
    pub id: String,
    pub name: String,
    pub units_sold: u64,
    pub image_url: String,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductsPanel {
    pub rows: Vec<TopProductRow>,
    pub is_empty: bool,
}

pub fn top_products(products: &[TopProduct], settings: &DisplaySettings) -> TopProductsPanel {
    let target = settings.top_product_target_units.max(1) as f64;
    let rows: Vec<TopProductRow> = products
        .iter()
        .map(|p| TopProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            units_sold: p.units_sold,
            image_url: image_or_placeholder(p.image_url.as_deref(), settings),
            progress_percent: (p.units_sold as f64 / target * 100.0).min(100.0),
        })
        .collect();

    TopProductsPanel {
        is_empty: rows.is_empty(),
        rows,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalStockRow {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalStockModal {
    pub threshold: u32,
    pub rows: Vec<CriticalStockRow>,
    pub is_empty: bool,
}

pub fn critical_stock_modal(items: &[CriticalStockItem], settings: &DisplaySettings) -> CriticalStockModal {
    let rows: Vec<CriticalStockRow> = items
        .iter()
        .map(|item| CriticalStockRow {
            id: item.id.clone(),
            name: item.name.clone(),
            sku: item.sku.clone(),
            stock: item.stock,
            image_url: image_or_placeholder(item.image_url.as_deref(), settings),
        })
        .collect();

    CriticalStockModal {
        threshold: settings.critical_stock_threshold,
        is_empty: rows.is_empty(),
        rows,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueModal {
    pub selected_year: i32,
    pub selectable_years: Vec<i32>,
    pub chart: RevenueChart,
}

fn image_or_placeholder(url: Option<&str>, settings: &DisplaySettings) -> String {
    url.map(|u| u.to_string())
        .unwrap_or_else(|| settings.placeholder_image_url.clone())
}

/// 2^53, the largest cent count an f64 holds exactly.
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// "S/ 1,234.5": thousands separators, at most two decimals, trailing zeros dropped.
pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    let scaled = (amount.abs() * 100.0).round();
    let (whole, frac, nonzero) = if scaled < MAX_EXACT_CENTS {
        let cents = scaled as u64;
        ((cents / 100).to_string(), cents % 100, cents > 0)
    } else {
        // Past f64 integer precision cents are noise; print whole units only.
        (format!("{:.0}", amount.abs()), 0, true)
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && nonzero { "-" } else { "" };
    let decimals = match frac {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{:02}", f),
    };

    format!("{} {}{}{}", currency_symbol, sign, grouped, decimals)
}
