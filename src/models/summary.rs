use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dashboard summary as returned by the back-office summary endpoint.
///
/// Every field decodes leniently: absent or mistyped values fall back to
/// zero/empty so nothing downstream has to branch on missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryRecord {
    #[serde(deserialize_with = "lenient::object")]
    pub kpis: Kpis,
    #[serde(deserialize_with = "lenient::seq")]
    pub top_products: Vec<TopProduct>,
    #[serde(deserialize_with = "lenient::object")]
    pub charts: SalesCharts,
    #[serde(deserialize_with = "lenient::seq")]
    pub critical_stock_list: Vec<CriticalStockItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kpis {
    #[serde(deserialize_with = "lenient::number")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient::count")]
    pub active_orders: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub customer_count: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub critical_stock_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopProduct {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::count")]
    pub units_sold: u64,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesCharts {
    #[serde(deserialize_with = "lenient::seq")]
    pub monthly_sales: Vec<MonthlySale>,
    #[serde(deserialize_with = "lenient::seq")]
    pub order_status_counts: Vec<StatusCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlySale {
    /// "YYYY-MM"
    #[serde(deserialize_with = "lenient::string")]
    pub year_month: String,
    #[serde(deserialize_with = "lenient::number")]
    pub total: f64,
}

impl MonthlySale {
    pub fn new(year_month: &str, total: f64) -> Self {
        Self {
            year_month: year_month.to_string(),
            total,
        }
    }

    /// Year and 1-based month of this entry, or `None` when the key is not a valid "YYYY-MM".
    pub fn period(&self) -> Option<(i32, u32)> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", self.year_month.trim()), "%Y-%m-%d").ok()?;
        Some((date.year(), date.month()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCount {
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::count")]
    pub count: u64,
}

impl StatusCount {
    pub fn new(status: &str, count: u64) -> Self {
        Self {
            status: status.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriticalStockItem {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub stock: i64,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub image_url: Option<String>,
}

/// Order statuses the dashboard knows about. Anything else is ignored by the donut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Prepared,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Prepared => "prepared",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "prepared" => Some(OrderStatus::Prepared),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

/// Response wrapper of the summary endpoint: `{ "success": bool, "data": {...} }`.
#[derive(Debug, Deserialize)]
pub struct SummaryEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
}

impl SummaryEnvelope {
    /// The decoded record, or `None` when the endpoint reported failure or sent no object.
    pub fn into_record(self) -> Option<SummaryRecord> {
        if !self.success {
            return None;
        }
        match self.data {
            Some(value @ Value::Object(_)) => lenient::decode(value),
            _ => None,
        }
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!("Dropping malformed summary entry: {}", e);
                None
            }
        }
    }

    pub fn object<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(d)?;
        if !value.is_object() {
            return Ok(T::default());
        }
        Ok(decode(value).unwrap_or_default())
    }

    pub fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(d)? {
            Value::Array(items) => items,
            _ => return Ok(Vec::new()),
        };

        Ok(items
            .into_iter()
            .filter(|item| {
                let keep = item.is_object();
                if !keep {
                    tracing::debug!("Dropping non-object summary entry: {}", item);
                }
                keep
            })
            .filter_map(decode)
            .collect())
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let n = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(if n.is_finite() { n } else { 0.0 })
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64))
                .unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        integer(d).map(|n| n.max(0) as u64)
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }
}
