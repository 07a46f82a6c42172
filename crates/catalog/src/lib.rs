//! `simroam-catalog` — countries, eSIM products and static airtime pricing.
//!
//! Read-model glue: rows fetched from the backend are filtered, grouped and
//! priced in memory. There is no mutation here.

pub mod airtime;
pub mod compatibility;
pub mod country;
pub mod product;

pub use airtime::{plans_for, AirtimePlan, PlanTier};
pub use compatibility::{CompatibilityList, DeviceCompatibility};
pub use country::{Country, CountryDirectory};
pub use product::{EsimProduct, ProductCatalog};
