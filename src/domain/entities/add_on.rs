//! Add-on items (merchandise, meals, services) attachable to a booking.

use serde::Serialize;

/// An optional purchasable item, possibly with variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOn {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub variants: Vec<AddOnVariant>,
    pub bundle_discount: Option<BundleDiscount>,
}

impl AddOn {
    pub fn variant(&self, variant_id: i64) -> Option<&AddOnVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }
}

/// A variant of an add-on (size, flavour...).
///
/// `price` is an absolute override; `price_modifier` is a delta on the
/// add-on's base price and only applies when `price` is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOnVariant {
    pub id: i64,
    pub name: String,
    pub price: Option<f64>,
    pub price_modifier: Option<f64>,
}

/// Percentage off the unit price once the line quantity reaches `min_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BundleDiscount {
    pub min_quantity: u32,
    pub discount_percent: f64,
}

impl BundleDiscount {
    pub fn applies_to(&self, quantity: u32) -> bool {
        self.min_quantity > 0 && quantity >= self.min_quantity
    }
}
