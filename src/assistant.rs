//! Assistant responder
//!
//! Renders a canned reply for a classified intent. The savings template
//! interpolates the ledger's current savings rate. Replies can be held back
//! by a short "thinking" delay; concurrent replies carry no ordering
//! guarantee.

use crate::models::{Intent, HEALTHY_SAVINGS_RATE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Default simulated thinking time before a reply is shown
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply_id: Uuid,
    pub intent: Intent,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AssistantResponder {
    delay: Duration,
}

impl AssistantResponder {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_REPLY_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Reply text for an intent
    pub fn reply(&self, intent: Intent, savings_rate: f64) -> String {
        match intent {
            Intent::Greeting => "Hi! I'm ready to analyse your finances.".to_string(),
            Intent::SavingsAdvice => format!(
                "Your current savings rate is {:.1}%. Aim for more than {}%. Review your small daily expenses.",
                savings_rate, HEALTHY_SAVINGS_RATE
            ),
            Intent::InvestmentAdvice => "It depends on your profile. If you are conservative, favour fixed income. If you are aggressive, ETFs and equities.".to_string(),
            Intent::DebtAdvice => "Prioritise paying the debts with the highest interest rate first (avalanche method).".to_string(),
            Intent::Unknown => "I'm not sure, but I suggest reviewing your expense charts.".to_string(),
        }
    }

    /// Build the reply without waiting
    pub fn compose(&self, intent: Intent, savings_rate: f64) -> ChatReply {
        ChatReply {
            reply_id: Uuid::new_v4(),
            intent,
            message: self.reply(intent, savings_rate),
            created_at: Utc::now(),
        }
    }

    /// Build the reply and hold it for the configured delay
    pub async fn respond(&self, intent: Intent, savings_rate: f64) -> ChatReply {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = self.compose(intent, savings_rate);
        info!(intent = %reply.intent, reply_id = %reply.reply_id, "Assistant replied");
        reply
    }
}

impl Default for AssistantResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_template_interpolates_rate() {
        let responder = AssistantResponder::new();
        let text = responder.reply(Intent::SavingsAdvice, 70.0);
        assert_eq!(
            text,
            "Your current savings rate is 70.0%. Aim for more than 20%. Review your small daily expenses."
        );

        assert!(responder.reply(Intent::SavingsAdvice, 12.345).contains("12.3%"));
    }

    #[test]
    fn test_every_intent_has_a_reply() {
        let responder = AssistantResponder::new();
        for intent in Intent::LABELS.iter().chain(std::iter::once(&Intent::Unknown)) {
            assert!(!responder.reply(*intent, 0.0).is_empty());
        }
        assert!(responder
            .reply(Intent::Unknown, 0.0)
            .contains("expense charts"));
    }

    #[test]
    fn test_respond_without_delay() {
        let responder = AssistantResponder::with_delay(Duration::ZERO);
        let reply = tokio_test::block_on(responder.respond(Intent::DebtAdvice, 0.0));
        assert_eq!(reply.intent, Intent::DebtAdvice);
        assert!(reply.message.contains("avalanche"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_for_delay() {
        let responder = AssistantResponder::with_delay(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        let reply = responder.respond(Intent::Greeting, 0.0).await;

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(reply.intent, Intent::Greeting);
    }
}
