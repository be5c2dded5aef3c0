use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DisplaySettings;
use crate::dashboard::derive::{derive_monthly_totals, derive_status_aggregate, MonthlyTotals, StatusAggregate};
use crate::dashboard::modal::{ModalKind, ModalState, ModalTransitionError};
use crate::dashboard::presentation::{
    critical_stock_modal, kpi_cards, revenue_chart, top_products, BarHighlight, CriticalStockModal,
    KpiCards, RevenueChart, RevenueModal, StatusDonut, TopProductsPanel,
};
use crate::models::SummaryRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesGranularity {
    #[default]
    Months,
    Years,
}

/// State of one mounted dashboard: the fetched record, UI selections and
/// the values derived from them.
#[derive(Debug)]
pub struct DashboardView {
    record: Option<SummaryRecord>,
    loading: bool,
    today: NaiveDate,
    selected_year: i32,
    granularity: SalesGranularity,
    modal: ModalState,
    monthly_totals: MonthlyTotals,
    status_aggregate: StatusAggregate,
}

impl DashboardView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            record: None,
            loading: true,
            today,
            selected_year: today.year(),
            granularity: SalesGranularity::default(),
            modal: ModalState::Closed,
            monthly_totals: [0.0; 12],
            status_aggregate: StatusAggregate::default(),
        }
    }

    /// Replaces the record wholesale and re-derives everything from it.
    pub fn apply_record(&mut self, record: SummaryRecord) {
        self.record = Some(record);
        self.monthly_totals = derive_monthly_totals(self.record.as_ref(), self.selected_year);
        self.status_aggregate = derive_status_aggregate(self.record.as_ref());
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Changes the fiscal year. Only the monthly totals depend on it.
    pub fn select_year(&mut self, year: i32) {
        if year == self.selected_year {
            return;
        }
        self.selected_year = year;
        self.monthly_totals = derive_monthly_totals(self.record.as_ref(), year);
    }

    pub fn set_granularity(&mut self, granularity: SalesGranularity) {
        self.granularity = granularity;
    }

    pub fn open_modal(&mut self, kind: ModalKind) -> Result<(), ModalTransitionError> {
        self.modal = self.modal.open(kind)?;
        Ok(())
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = self.modal.dismiss();
    }

    pub fn record(&self) -> Option<&SummaryRecord> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn granularity(&self) -> SalesGranularity {
        self.granularity
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn monthly_totals(&self) -> &MonthlyTotals {
        &self.monthly_totals
    }

    pub fn status_aggregate(&self) -> StatusAggregate {
        self.status_aggregate
    }

    pub fn snapshot(&self, id: Uuid, settings: &DisplaySettings) -> DashboardSnapshot {
        let symbol = settings.currency_symbol.as_str();
        let record = self.record.as_ref();

        let revenue_modal = (self.modal == ModalState::Revenue).then(|| RevenueModal {
            selected_year: self.selected_year,
            selectable_years: settings.fiscal_years.clone(),
            chart: revenue_chart(&self.monthly_totals, self.selected_year, BarHighlight::NonZero, symbol),
        });
        let critical_stock_modal = (self.modal == ModalState::CriticalStock).then(|| {
            critical_stock_modal(record.map(|r| r.critical_stock_list.as_slice()).unwrap_or(&[]), settings)
        });

        DashboardSnapshot {
            id,
            loading: self.loading,
            has_record: record.is_some(),
            selected_year: self.selected_year,
            selectable_years: settings.fiscal_years.clone(),
            granularity: self.granularity,
            modal: self.modal,
            kpis: kpi_cards(record.map(|r| &r.kpis), symbol),
            revenue_chart: revenue_chart(
                &self.monthly_totals,
                self.selected_year,
                BarHighlight::CurrentMonth(self.today),
                symbol,
            ),
            status_donut: StatusDonut::from(self.status_aggregate),
            top_products: top_products(record.map(|r| r.top_products.as_slice()).unwrap_or(&[]), settings),
            revenue_modal,
            critical_stock_modal,
        }
    }
}

/// Everything a renderer needs for one frame of the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub id: Uuid,
    pub loading: bool,
    pub has_record: bool,
    pub selected_year: i32,
    pub selectable_years: Vec<i32>,
    pub granularity: SalesGranularity,
    pub modal: ModalState,
    pub kpis: KpiCards,
    pub revenue_chart: RevenueChart,
    pub status_donut: StatusDonut,
    pub top_products: TopProductsPanel,
    pub revenue_modal: Option<RevenueModal>,
    pub critical_stock_modal: Option<CriticalStockModal>,
}
