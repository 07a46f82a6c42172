//! eSIM product rows and catalog helpers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::{Currency, CountryId, Money, ProductId};

/// An eSIM data plan sold for a specific country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsimProduct {
    pub id: ProductId,
    pub country_id: Option<CountryId>,
    pub name: String,
    /// Human-readable allowance, e.g. "5GB" or "Unlimited".
    pub data_amount: String,
    /// Price in minor units of `currency`.
    pub price: i64,
    pub currency: Option<Currency>,
    pub validity_days: i32,
    pub includes_calls: Option<bool>,
    pub includes_sms: Option<bool>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl EsimProduct {
    pub fn is_sellable(&self) -> bool {
        self.is_active.unwrap_or(false)
    }

    pub fn price_money(&self) -> Money {
        Money::new(self.price, self.currency.unwrap_or(Currency::Usd))
    }
}

/// In-memory view over fetched product rows.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<EsimProduct>,
}

impl ProductCatalog {
    pub fn new(products: Vec<EsimProduct>) -> Self {
        Self { products }
    }

    /// Sellable plans for one country, cheapest first.
    pub fn for_country(&self, country_id: CountryId) -> Vec<&EsimProduct> {
        let mut plans: Vec<&EsimProduct> = self
            .products
            .iter()
            .filter(|p| p.is_sellable() && p.country_id == Some(country_id))
            .collect();
        plans.sort_by_key(|p| p.price);
        plans
    }

    /// Sellable plans grouped per country, each group cheapest first.
    pub fn grouped_by_country(&self) -> BTreeMap<CountryId, Vec<&EsimProduct>> {
        let mut grouped: BTreeMap<CountryId, Vec<&EsimProduct>> = BTreeMap::new();
        for product in self.products.iter().filter(|p| p.is_sellable()) {
            if let Some(country_id) = product.country_id {
                grouped.entry(country_id).or_default().push(product);
            }
        }
        for plans in grouped.values_mut() {
            plans.sort_by_key(|p| p.price);
        }
        grouped
    }

    pub fn cheapest_for(&self, country_id: CountryId) -> Option<&EsimProduct> {
        self.for_country(country_id).into_iter().next()
    }
}
