use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Revenue,
    CriticalStock,
}

impl ModalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::Revenue => "revenue",
            ModalKind::CriticalStock => "critical_stock",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detail modal currently shown over the dashboard. At most one is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Revenue,
    CriticalStock,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModalTransitionError {
    #[error("Cannot open the {requested} modal while the {open} modal is open")]
    AlreadyOpen { open: ModalKind, requested: ModalKind },
}

impl ModalState {
    pub fn open_kind(&self) -> Option<ModalKind> {
        match self {
            ModalState::Closed => None,
            ModalState::Revenue => Some(ModalKind::Revenue),
            ModalState::CriticalStock => Some(ModalKind::CriticalStock),
        }
    }

    /// Opening the modal that is already open is a no-op; opening a
    /// different one is rejected until the current one is dismissed.
    pub fn open(self, requested: ModalKind) -> Result<ModalState, ModalTransitionError> {
        match self.open_kind() {
            None => Ok(match requested {
                ModalKind::Revenue => ModalState::Revenue,
                ModalKind::CriticalStock => ModalState::CriticalStock,
            }),
            Some(open) if open == requested => Ok(self),
            Some(open) => Err(ModalTransitionError::AlreadyOpen { open, requested }),
        }
    }

    pub fn dismiss(self) -> ModalState {
        ModalState::Closed
    }
}
