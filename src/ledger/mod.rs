//! Financial ledger
//!
//! Single source of truth for income, expenses, debt and per-category spend.
//! Every mutation goes through [`Ledger::apply`], which discards malformed
//! requests instead of failing, records a net-worth snapshot and notifies
//! listeners (chart collaborators).

pub mod history;

pub use history::{NetWorthHistory, HISTORY_CAPACITY};

use crate::models::{Category, DerivedMetrics, TransactionKind, TransactionRequest};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::debug;

//
// ================= Category totals =================
//

/// Cumulative spend per category, iterated in declared order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals {
    totals: [f64; Category::ALL.len()],
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        self.totals[category.index()]
    }

    fn add(&mut self, category: Category, amount: f64) {
        self.totals[category.index()] += amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> f64 {
        self.totals.iter().sum()
    }
}

// Serialized as a JSON object whose keys keep the declared order.
impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.totals.len()))?;
        for (category, amount) in self.iter() {
            map.serialize_entry(category.as_str(), &amount)?;
        }
        map.end()
    }
}

//
// ================= State =================
//

#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerState {
    pub income: f64,
    pub expenses: f64,
    pub debt: f64,
    pub categories: CategoryTotals,
    pub history: NetWorthHistory,
}

impl LedgerState {
    pub fn net_worth(&self) -> f64 {
        self.income - self.expenses - self.debt
    }
}

/// Observer notified after each accepted mutation
pub trait LedgerListener: Send + Sync {
    fn on_change(&self, categories: &CategoryTotals, history: &[f64]);
}

//
// ================= Ledger =================
//

#[derive(Default)]
pub struct Ledger {
    state: LedgerState,
    listeners: Vec<Arc<dyn LedgerListener>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn LedgerListener>) {
        self.listeners.push(listener);
    }

    /// Apply a transaction request.
    ///
    /// Returns `false` (and changes nothing) when the amount is not a
    /// positive finite number.
    pub fn apply(&mut self, request: TransactionRequest) -> bool {
        if !request.has_valid_amount() {
            debug!(kind = %request.kind, amount = request.amount, "Discarding transaction");
            return false;
        }

        let amount = request.amount;
        match request.kind {
            TransactionKind::Income => {
                self.state.income += amount;
            }
            TransactionKind::Expense => {
                self.state.expenses += amount;
                let bucket = request.category.unwrap_or(Category::Other);
                self.state.categories.add(bucket, amount);
            }
            TransactionKind::DebtSet => {
                self.state.debt = amount;
            }
        }

        let snapshot = self.state.net_worth().max(0.0);
        self.state.history.push(snapshot);

        debug!(
            kind = %request.kind,
            amount,
            net_worth = self.state.net_worth(),
            "Applied transaction"
        );

        self.notify();
        true
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }

        let history = self.state.history.to_vec();
        for listener in &self.listeners {
            listener.on_change(&self.state.categories, &history);
        }
    }

    pub fn derived_metrics(&self) -> DerivedMetrics {
        let LedgerState {
            income,
            expenses,
            debt,
            ..
        } = self.state;

        let (savings_rate, debt_ratio) = if income > 0.0 {
            ((income - expenses) / income * 100.0, debt / income * 100.0)
        } else {
            (0.0, 0.0)
        };

        DerivedMetrics {
            net_worth: self.state.net_worth(),
            savings_rate,
            debt_ratio,
        }
    }

    pub fn category_totals(&self) -> CategoryTotals {
        self.state.categories
    }

    /// Net-worth snapshots, oldest first
    pub fn history_window(&self) -> Vec<f64> {
        self.state.history.to_vec()
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }
}
