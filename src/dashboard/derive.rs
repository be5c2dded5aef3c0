use serde::Serialize;

use crate::models::{OrderStatus, SummaryRecord};

/// Revenue per month of one fiscal year, index 0 = January.
pub type MonthlyTotals = [f64; 12];

/// Monthly revenue of `year`, zero where the summary has no entry.
///
/// Keys that are not valid "YYYY-MM" are skipped. When the same month
/// appears more than once the last entry wins.
pub fn derive_monthly_totals(record: Option<&SummaryRecord>, year: i32) -> MonthlyTotals {
    let mut totals = [0.0; 12];
    let Some(record) = record else {
        return totals;
    };

    for sale in &record.charts.monthly_sales {
        match sale.period() {
            Some((y, month)) if y == year => totals[(month - 1) as usize] = sale.total,
            Some(_) => {}
            None => tracing::debug!("Ignoring monthly sale with bad key {:?}", sale.year_month),
        }
    }

    totals
}

/// Order counts folded into the three donut buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusAggregate {
    pub pending: u64,
    pub prepared_or_shipped: u64,
    pub delivered: u64,
    pub total: u64,
}

/// Buckets `orderStatusCounts`; "prepared" and "shipped" share a bucket and
/// unknown statuses are dropped.
pub fn derive_status_aggregate(record: Option<&SummaryRecord>) -> StatusAggregate {
    let mut agg = StatusAggregate::default();
    let Some(record) = record else {
        return agg;
    };

    for entry in &record.charts.order_status_counts {
        let bucket = match OrderStatus::from_str(&entry.status) {
            Some(OrderStatus::Pending) => &mut agg.pending,
            Some(OrderStatus::Prepared) | Some(OrderStatus::Shipped) => &mut agg.prepared_or_shipped,
            Some(OrderStatus::Delivered) => &mut agg.delivered,
            None => continue,
        };
        *bucket = bucket.saturating_add(entry.count);
    }

    // clamped at u64::MAX
    agg.total = agg
        .pending
        .saturating_add(agg.prepared_or_shipped)
        .saturating_add(agg.delivered);
    agg
}
