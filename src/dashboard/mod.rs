pub mod derive;
pub mod modal;
pub mod presentation;
pub mod registry;
pub mod view;

pub use derive::{derive_monthly_totals, derive_status_aggregate, MonthlyTotals, StatusAggregate};
pub use modal::{ModalKind, ModalState, ModalTransitionError};
pub use registry::{load_summary, ViewHandle, ViewRegistry};
pub use view::{DashboardSnapshot, DashboardView, SalesGranularity};
