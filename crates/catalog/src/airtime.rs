//! Static airtime/data plan price table.
//!
//! The airtime purchase page prices from this fixed matrix rather than the
//! product catalog: three tiers per covered country, in local currency.

use serde::Serialize;

use simroam_core::{Currency, Money};

/// Tier names shared by every country column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Starter,
    Pro,
    Unlimited,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "Starter",
            PlanTier::Pro => "Pro",
            PlanTier::Unlimited => "Unlimited",
        }
    }
}

/// One row of the price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirtimePlan {
    pub tier: PlanTier,
    pub data_amount: &'static str,
    pub price: Money,
    pub validity_days: u16,
    pub includes_calls: bool,
    pub includes_sms: bool,
}

fn tiers(currency: Currency, starter: i64, pro: i64, unlimited: i64) -> Vec<AirtimePlan> {
    vec![
        AirtimePlan {
            tier: PlanTier::Starter,
            data_amount: "1GB",
            price: Money::new(starter, currency),
            validity_days: 7,
            includes_calls: false,
            includes_sms: false,
        },
        AirtimePlan {
            tier: PlanTier::Pro,
            data_amount: "5GB",
            price: Money::new(pro, currency),
            validity_days: 30,
            includes_calls: true,
            includes_sms: true,
        },
        AirtimePlan {
            tier: PlanTier::Unlimited,
            data_amount: "Unlimited",
            price: Money::new(unlimited, currency),
            validity_days: 30,
            includes_calls: true,
            includes_sms: true,
        },
    ]
}

/// Plans for a country code; unknown codes get an empty list.
///
/// Amounts are whole local-currency units (these currencies have no minor
/// subdivision in practice).
pub fn plans_for(country_code: &str) -> Vec<AirtimePlan> {
    match country_code.to_ascii_uppercase().as_str() {
        "KE" => tiers(Currency::Kes, 500, 1_200, 2_500),
        "UG" => tiers(Currency::Ugx, 15_000, 35_000, 75_000),
        "TZ" => tiers(Currency::Tzs, 2_500, 6_000, 12_000),
        "RW" => tiers(Currency::Rwf, 1_500, 3_500, 7_500),
        "BI" => tiers(Currency::Bif, 3_000, 7_000, 15_000),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_covered_country_has_three_tiers() {
        for code in ["KE", "UG", "TZ", "RW", "BI"] {
            let plans = plans_for(code);
            assert_eq!(plans.len(), 3, "country {code}");
            assert_eq!(plans[0].tier, PlanTier::Starter);
            assert_eq!(plans[2].tier, PlanTier::Unlimited);
        }
    }

    #[test]
    fn prices_are_in_the_local_currency() {
        let kenya = plans_for("ke");
        assert_eq!(kenya[0].price, Money::new(500, Currency::Kes));
        assert_eq!(kenya[1].price, Money::new(1_200, Currency::Kes));

        let uganda = plans_for("UG");
        assert_eq!(uganda[2].price, Money::new(75_000, Currency::Ugx));
    }

    #[test]
    fn starter_tier_is_data_only() {
        let plans = plans_for("TZ");
        assert!(!plans[0].includes_calls);
        assert!(!plans[0].includes_sms);
        assert!(plans[1].includes_calls);
    }

    #[test]
    fn uncovered_country_has_no_plans() {
        assert!(plans_for("ZA").is_empty());
        assert!(plans_for("").is_empty());
    }
}
