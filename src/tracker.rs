//! Session facade
//!
//! TEXT → PARSE → APPLY → METRICS
//! CHAT → CLASSIFY → RESPOND

use crate::assistant::{AssistantResponder, ChatReply};
use crate::classifier::IntentClassifier;
use crate::ledger::{CategoryTotals, Ledger, LedgerListener};
use crate::models::{Dashboard, DerivedMetrics, Intent, TransactionRequest};
use crate::smart_input::{ParseOutcome, SmartInputParser};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the dashboard renders after a change
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub metrics: DerivedMetrics,
    pub dashboard: Dashboard,
    pub categories: CategoryTotals,
    pub history: Vec<f64>,
}

/// One user's ledger plus the language components that feed it
pub struct Tracker {
    ledger: Ledger,
    parser: SmartInputParser,
    classifier: Arc<IntentClassifier>,
    responder: AssistantResponder,
}

impl Tracker {
    pub fn new(classifier: Arc<IntentClassifier>, responder: AssistantResponder) -> Self {
        Self {
            ledger: Ledger::new(),
            parser: SmartInputParser::new(),
            classifier,
            responder,
        }
    }

    pub fn subscribe(&mut self, listener: Arc<dyn LedgerListener>) {
        self.ledger.subscribe(listener);
    }

    /// Structured form path
    pub fn record(&mut self, request: TransactionRequest) -> bool {
        self.ledger.apply(request)
    }

    /// Free-text path: parse, then apply on success.
    ///
    /// `Parsed` is only returned when the ledger accepted the request.
    pub fn submit_text(&mut self, text: &str) -> ParseOutcome {
        let outcome = self.parser.parse(text);

        if let ParseOutcome::Parsed { request, confirmation } = &outcome {
            if !self.ledger.apply(*request) {
                warn!(amount = request.amount, "Ledger rejected smart input amount");
                return ParseOutcome::NoAmountDetected;
            }
            info!("{}", confirmation);
        }

        outcome
    }

    /// Intent for an utterance and the savings rate its reply should quote
    pub fn prepare_reply(&self, text: &str) -> (Intent, f64) {
        let intent = self.classifier.classify(text);
        (intent, self.ledger.derived_metrics().savings_rate)
    }

    pub async fn chat(&self, text: &str) -> ChatReply {
        let (intent, savings_rate) = self.prepare_reply(text);
        self.responder.respond(intent, savings_rate).await
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let metrics = self.ledger.derived_metrics();
        DashboardSnapshot {
            metrics,
            dashboard: metrics.dashboard(),
            categories: self.ledger.category_totals(),
            history: self.ledger.history_window(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn responder(&self) -> &AssistantResponder {
        &self.responder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionKind};
    use std::time::Duration;

    fn tracker() -> Tracker {
        Tracker::new(
            Arc::new(IntentClassifier::train()),
            AssistantResponder::with_delay(Duration::ZERO),
        )
    }

    #[test]
    fn test_submit_text_applies_parsed_request() {
        let mut tracker = tracker();
        tracker.submit_text("salary 1000");
        let outcome = tracker.submit_text("Food 300");

        assert_eq!(
            outcome.request().map(|r| r.kind),
            Some(TransactionKind::Expense)
        );

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.metrics.net_worth, 700.0);
        assert_eq!(snapshot.metrics.savings_rate, 70.0);
        assert_eq!(snapshot.categories.get(Category::Food), 300.0);
        assert_eq!(snapshot.history, vec![1000.0, 700.0]);
        assert_eq!(snapshot.dashboard.savings_rate, "70.0%");
    }

    #[test]
    fn test_failed_parse_leaves_ledger_untouched() {
        let mut tracker = tracker();
        let outcome = tracker.submit_text("bought groceries");

        assert_eq!(outcome, ParseOutcome::NoAmountDetected);
        assert!(tracker.ledger().history_window().is_empty());
    }

    #[test]
    fn test_unrecordable_amount_reported_to_caller() {
        let mut tracker = tracker();
        let outcome = tracker.submit_text(&format!("food {}", "9".repeat(400)));

        assert_eq!(outcome, ParseOutcome::NoAmountDetected);
        assert!(outcome.request().is_none());

        let snapshot = tracker.snapshot();
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.categories.get(Category::Food), 0.0);
        assert_eq!(snapshot.metrics.net_worth, 0.0);
    }

    #[test]
    fn test_record_structured_debt() {
        let mut tracker = tracker();
        tracker.record(TransactionRequest::income(1000.0));
        tracker.record(TransactionRequest::debt(250.0));

        assert_eq!(tracker.snapshot().metrics.debt_ratio, 25.0);
    }

    #[tokio::test]
    async fn test_chat_quotes_savings_rate() {
        let mut tracker = tracker();
        tracker.record(TransactionRequest::income(1000.0));
        tracker.record(TransactionRequest::expense(300.0, Some(Category::Food)));

        let reply = tracker.chat("savings advice").await;
        assert_eq!(reply.intent, Intent::SavingsAdvice);
        assert!(reply.message.contains("70.0%"));

        let reply = tracker.chat("what is the weather").await;
        assert_eq!(reply.intent, Intent::Unknown);
    }
}
