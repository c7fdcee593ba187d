//! Transient, auto-dismissing user notifications.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::NOTIFICATION_LIFE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

/// A toast-style message. `life_ms` is how long it stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    pub life_ms: u64,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Notification {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            life_ms: NOTIFICATION_LIFE_MS,
        }
    }

    pub fn success(detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, "Éxito", detail)
    }

    pub fn info(detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, "Info", detail)
    }

    pub fn warn(detail: impl Into<String>) -> Self {
        Self::new(Severity::Warn, "Advertencia", detail)
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, "Error", detail)
    }

    pub fn with_life(mut self, life_ms: u64) -> Self {
        self.life_ms = life_ms;
        self
    }
}
