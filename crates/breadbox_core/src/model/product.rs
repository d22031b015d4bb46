//! Product catalog model.
//!
//! # Responsibility
//! - Define sellable products and their packaging presentations.
//!
//! # Invariants
//! - Stock is counted in single units, regardless of presentation.
//! - Every product has at least one presentation; the unit presentation
//!   always holds exactly one unit.

use crate::model::{require_amount, require_text, ValidationError};
use crate::store::{RecordId, StoredRecord};
use serde::{Deserialize, Serialize};

/// Units contained in a bag presentation.
pub const BAG_UNITS: u32 = 5;

/// Stock units a freshly registered product starts with.
pub const INITIAL_STOCK: u32 = 100;

/// Packaging variant of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    /// A single piece.
    Unit,
    /// A multi-unit bag with its own price.
    Bag,
}

impl PresentationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unit => "Unit",
            Self::Bag => "Bag",
        }
    }
}

/// One sellable packaging of a product, with its own price and unit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub kind: PresentationKind,
    pub price: f64,
    pub units: u32,
}

/// Catalog entry with nested presentation variants and a unit stock counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    pub presentations: Vec<Presentation>,
    /// Units on hand.
    pub stock: u32,
    /// Units sold over the product lifetime.
    pub units_sold: u32,
}

impl Product {
    /// Creates a catalog entry with a mandatory unit price and an optional
    /// bag price (bag of [`BAG_UNITS`]).
    pub fn new(name: impl Into<String>, unit_price: f64, bag_price: Option<f64>) -> Self {
        let mut presentations = vec![Presentation {
            kind: PresentationKind::Unit,
            price: unit_price,
            units: 1,
        }];
        if let Some(price) = bag_price {
            presentations.push(Presentation {
                kind: PresentationKind::Bag,
                price,
                units: BAG_UNITS,
            });
        }

        Self {
            id: None,
            name: name.into(),
            presentations,
            stock: INITIAL_STOCK,
            units_sold: 0,
        }
    }

    pub fn presentation(&self, kind: PresentationKind) -> Option<&Presentation> {
        self.presentations
            .iter()
            .find(|presentation| presentation.kind == kind)
    }

    /// Price of one presentation of the given kind, when the product sells it.
    pub fn price(&self, kind: PresentationKind) -> Option<f64> {
        self.presentation(kind).map(|presentation| presentation.price)
    }

    /// Display price: the first presentation, by convention the unit one.
    pub fn base_price(&self) -> f64 {
        self.presentations
            .first()
            .map(|presentation| presentation.price)
            .unwrap_or(0.0)
    }

    pub fn out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.presentations.is_empty() {
            return Err(ValidationError::MissingPresentation);
        }
        for presentation in &self.presentations {
            require_amount("price", presentation.price)?;
            if presentation.units == 0 {
                return Err(ValidationError::ZeroUnitCount);
            }
        }
        Ok(())
    }
}

impl StoredRecord for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::{Presentation, PresentationKind, Product, BAG_UNITS, INITIAL_STOCK};
    use crate::model::ValidationError;

    #[test]
    fn new_product_has_unit_presentation_and_seed_stock() {
        let product = Product::new("Baguette", 1.5, None);
        assert_eq!(product.presentations.len(), 1);
        assert_eq!(product.price(PresentationKind::Unit), Some(1.5));
        assert_eq!(product.price(PresentationKind::Bag), None);
        assert_eq!(product.stock, INITIAL_STOCK);
        assert_eq!(product.units_sold, 0);
    }

    #[test]
    fn bag_price_adds_a_five_unit_presentation() {
        let product = Product::new("Croissant", 2.0, Some(9.0));
        let bag = product.presentation(PresentationKind::Bag).unwrap();
        assert_eq!(bag.units, BAG_UNITS);
        assert_eq!(bag.price, 9.0);
    }

    #[test]
    fn validate_rejects_blank_name_and_zero_unit_presentations() {
        let blank = Product::new("   ", 1.0, None);
        assert_eq!(blank.validate(), Err(ValidationError::EmptyField("name")));

        let mut product = Product::new("Roll", 1.0, None);
        product.presentations.push(Presentation {
            kind: PresentationKind::Bag,
            price: 4.0,
            units: 0,
        });
        assert_eq!(product.validate(), Err(ValidationError::ZeroUnitCount));
    }
}
