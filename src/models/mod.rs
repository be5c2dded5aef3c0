pub mod summary;

pub use summary::{
    CriticalStockItem, Kpis, MonthlySale, OrderStatus, SalesCharts, StatusCount, SummaryEnvelope,
    SummaryRecord, TopProduct,
};
