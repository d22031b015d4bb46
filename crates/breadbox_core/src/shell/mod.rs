//! Shell layer: module dispatch and user notices.
//!
//! # Responsibility
//! - Name the console modules and parse their navigation slugs.
//! - Convert module-boundary errors into transient user notices.
//!
//! # Invariants
//! - Selecting the home module recomputes the summary.
//! - No error crossing this boundary is fatal; each becomes one notice and
//!   one diagnostic log line.

mod console;

pub use console::{Console, HomeSummary};

/// The modules the console can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleId {
    Home,
    PointOfSale,
    SalesHistory,
    Products,
    RawMaterials,
    Staff,
    Finance,
    Equipment,
}

impl ModuleId {
    pub const ALL: [ModuleId; 8] = [
        Self::Home,
        Self::PointOfSale,
        Self::SalesHistory,
        Self::Products,
        Self::RawMaterials,
        Self::Staff,
        Self::Finance,
        Self::Equipment,
    ];

    /// Navigation identifier used by menu entries.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::PointOfSale => "point-of-sale",
            Self::SalesHistory => "sales-history",
            Self::Products => "products",
            Self::RawMaterials => "raw-materials",
            Self::Staff => "staff",
            Self::Finance => "finance",
            Self::Equipment => "equipment",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::PointOfSale => "Point of Sale",
            Self::SalesHistory => "Sales History",
            Self::Products => "Products",
            Self::RawMaterials => "Raw Materials",
            Self::Staff => "Staff",
            Self::Finance => "Earnings & Goals",
            Self::Equipment => "Equipment",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|module| module.slug() == slug)
    }
}

/// Severity of a transient user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Short-lived message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Currency display helper shared by the view layer.
pub fn format_money(value: f64) -> String {
    if value.is_nan() {
        return "$0.00".to_string();
    }
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_money, ModuleId};

    #[test]
    fn slugs_roundtrip_for_every_module() {
        for module in ModuleId::ALL {
            assert_eq!(ModuleId::from_slug(module.slug()), Some(module));
        }
        assert_eq!(ModuleId::from_slug("does-not-exist"), None);
    }

    #[test]
    fn money_formatting_handles_sign_and_nan() {
        assert_eq!(format_money(1234.5), "$1234.50");
        assert_eq!(format_money(-5.0), "-$5.00");
        assert_eq!(format_money(f64::NAN), "$0.00");
    }
}
