//! Static risk-profile allocation table
//!
//! Read-only display data; no logic beyond lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub asset_class: &'static str,
    pub pct: u8,
    pub instruments: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Allocation {
    pub profile: RiskProfile,
    pub fixed_income_pct: u8,
    pub equity_pct: u8,
    pub description: &'static str,
    pub recommendations: [Recommendation; 2],
}

const FIXED_INCOME: &str = "Fixed income";
const EQUITY: &str = "Equity";

const CONSERVATIVE: Allocation = Allocation {
    profile: RiskProfile::Conservative,
    fixed_income_pct: 70,
    equity_pct: 30,
    description: "Priority: safety.",
    recommendations: [
        Recommendation { asset_class: FIXED_INCOME, pct: 70, instruments: "Government bonds" },
        Recommendation { asset_class: EQUITY, pct: 30, instruments: "Dividend ETFs" },
    ],
};

const MODERATE: Allocation = Allocation {
    profile: RiskProfile::Moderate,
    fixed_income_pct: 50,
    equity_pct: 50,
    description: "Balanced.",
    recommendations: [
        Recommendation { asset_class: FIXED_INCOME, pct: 50, instruments: "Corporate debt" },
        Recommendation { asset_class: EQUITY, pct: 50, instruments: "S&P 500" },
    ],
};

const AGGRESSIVE: Allocation = Allocation {
    profile: RiskProfile::Aggressive,
    fixed_income_pct: 30,
    equity_pct: 70,
    description: "High growth.",
    recommendations: [
        Recommendation { asset_class: FIXED_INCOME, pct: 30, instruments: "Short-term bonds" },
        Recommendation { asset_class: EQUITY, pct: 70, instruments: "Technology/Crypto" },
    ],
};

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    /// Lenient parsing; anything unrecognised is `Moderate`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "conservative" | "low" | "conservador" => RiskProfile::Conservative,
            "aggressive" | "high" | "agresivo" => RiskProfile::Aggressive,
            _ => RiskProfile::Moderate,
        }
    }

    pub fn allocation(&self) -> &'static Allocation {
        match self {
            RiskProfile::Conservative => &CONSERVATIVE,
            RiskProfile::Moderate => &MODERATE,
            RiskProfile::Aggressive => &AGGRESSIVE,
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocations_sum_to_hundred() {
        for profile in RiskProfile::ALL {
            let allocation = profile.allocation();
            assert_eq!(allocation.profile, profile);
            assert_eq!(allocation.fixed_income_pct + allocation.equity_pct, 100);
            assert_eq!(allocation.recommendations[0].pct, allocation.fixed_income_pct);
            assert_eq!(allocation.recommendations[1].pct, allocation.equity_pct);
        }
    }

    #[test]
    fn test_parse_profiles() {
        assert_eq!(RiskProfile::parse("Conservative"), RiskProfile::Conservative);
        assert_eq!(RiskProfile::parse("agresivo"), RiskProfile::Aggressive);
        assert_eq!(RiskProfile::parse("whatever"), RiskProfile::Moderate);
    }

    #[test]
    fn test_aggressive_split() {
        let allocation = RiskProfile::Aggressive.allocation();
        assert_eq!((allocation.fixed_income_pct, allocation.equity_pct), (30, 70));
        assert_eq!(allocation.recommendations[1].instruments, "Technology/Crypto");
    }
}
