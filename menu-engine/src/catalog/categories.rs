//! Category derivation helpers
//!
//! Categories are free-text labels on products, matched
//! case-insensitively. The known beach categories carry a fixed
//! presentation order; anything else is appended alphabetically.

use shared::models::Product;
use std::collections::HashSet;

/// Fixed presentation order for the known beach categories
pub const CATEGORY_ORDER: &[&str] = &[
    "guarda-sol",
    "cadeiras de praia",
    "bebidas não alcoólicas",
    "bebidas alcoólicas",
    "para petiscar",
    "pratos",
    "sobremesas",
];

/// Active category filter
///
/// `All` is the sentinel default; `Category` holds a case-normalized
/// label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Filter for a single category label (normalized on construction)
    pub fn category(label: impl AsRef<str>) -> Self {
        Self::Category(label.as_ref().trim().to_lowercase())
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(key) => product.category_key() == *key,
        }
    }
}

/// Distinct categories present in `products`: fixed ordering first,
/// unknown categories appended alphabetically so their products stay
/// reachable.
pub fn ordered_categories(products: &[Product]) -> Vec<String> {
    let present: HashSet<String> = products
        .iter()
        .map(Product::category_key)
        .filter(|key| !key.is_empty())
        .collect();

    let mut categories: Vec<String> = CATEGORY_ORDER
        .iter()
        .filter(|key| present.contains(**key))
        .map(|key| key.to_string())
        .collect();

    let mut rest: Vec<String> = present
        .into_iter()
        .filter(|key| !CATEGORY_ORDER.contains(&key.as_str()))
        .collect();
    rest.sort();
    categories.extend(rest);
    categories
}

/// Display form of a category label: first letter uppercased, blank
/// labels fall back to "Outros".
pub fn display_category(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Outros".to_string(),
    }
}
