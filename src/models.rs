//! Core data models for the finance tracker

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Category =================
//

/// Closed set of expense buckets. Declaration order is the display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Housing,
    Food,
    Transport,
    Entertainment,
    Utilities,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Health,
        Category::Other,
    ];

    /// Position in the declared order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Resolve a category label coming from a form or request body.
    ///
    /// Accepts the English names and their Spanish labels, case-insensitively.
    /// Anything else is `None`, which the ledger folds into [`Category::Other`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "housing" | "vivienda" => Some(Category::Housing),
            "food" | "alimentación" | "alimentacion" => Some(Category::Food),
            "transport" | "transporte" => Some(Category::Transport),
            "entertainment" | "entretenimiento" => Some(Category::Entertainment),
            "utilities" | "servicios" => Some(Category::Utilities),
            "health" | "salud" => Some(Category::Health),
            "other" | "otros" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

//
// ================= Transactions =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    #[serde(rename = "debt", alias = "debt_set")]
    DebtSet,
}

impl TransactionKind {
    /// Lenient parsing for form values ("income", "expense", "debt").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "income" | "ingreso" => Some(TransactionKind::Income),
            "expense" | "gasto" => Some(TransactionKind::Expense),
            "debt" | "debt_set" | "deuda" => Some(TransactionKind::DebtSet),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::DebtSet => "Debt",
        };
        write!(f, "{}", s)
    }
}

/// A single mutation request, consumed once by the ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl TransactionRequest {
    pub fn income(amount: f64) -> Self {
        Self {
            kind: TransactionKind::Income,
            amount,
            category: None,
        }
    }

    pub fn expense(amount: f64, category: Option<Category>) -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount,
            category,
        }
    }

    pub fn debt(amount: f64) -> Self {
        Self {
            kind: TransactionKind::DebtSet,
            amount,
            category: None,
        }
    }

    /// Amount must be a positive finite number for the ledger to accept it
    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

//
// ================= Metrics =================
//

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DerivedMetrics {
    pub net_worth: f64,
    pub savings_rate: f64,
    pub debt_ratio: f64,
}

/// Savings rate at or above this percentage is shown as healthy.
pub const HEALTHY_SAVINGS_RATE: f64 = 20.0;

/// Display strings for the dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub net_worth: String,
    pub savings_rate: String,
    pub debt_ratio: String,
    pub savings_healthy: bool,
}

impl DerivedMetrics {
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            net_worth: format!("${:.2}", self.net_worth),
            savings_rate: format!("{:.1}%", self.savings_rate),
            debt_ratio: format!("{:.1}%", self.debt_ratio),
            savings_healthy: self.savings_rate >= HEALTHY_SAVINGS_RATE,
        }
    }
}

//
// ================= Intent =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    SavingsAdvice,
    InvestmentAdvice,
    DebtAdvice,
    Unknown,
}

impl Intent {
    /// Labels the classifier is trained on, in tie-break order.
    /// `Unknown` is the implicit fallback and never scored.
    pub const LABELS: [Intent; 4] = [
        Intent::Greeting,
        Intent::SavingsAdvice,
        Intent::InvestmentAdvice,
        Intent::DebtAdvice,
    ];
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Greeting => "greeting",
            Intent::SavingsAdvice => "savings_advice",
            Intent::InvestmentAdvice => "investment_advice",
            Intent::DebtAdvice => "debt_advice",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
