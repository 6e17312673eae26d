//! Smart Input Parser
//!
//! Turns one line of free text ("uber 35", "got paid 1200 salary") into a
//! transaction request using fixed lexical rules. No external API.
//!
//! Order of evaluation:
//! 1. amount   — first integer or decimal numeral
//! 2. kind     — expense unless an income keyword appears
//! 3. category — first entry of the keyword table with a substring hit
//!
//! Debt is never inferred from free text; it is only set through the
//! structured form.

use crate::models::{Category, TransactionKind, TransactionRequest};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Static keyword lists — zero allocation
const INCOME_KEYWORDS: &[&str] = &[
    "income", "earned", "salary", "got paid", "paid me",
    // Spanish
    "ingreso", "gané", "salario", "cobré",
];

/// Ordered: the first category with a hit wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Housing,
        &["house", "rent", "electricity", "water", "internet", "casa", "renta", "luz", "agua"],
    ),
    (
        Category::Food,
        &[
            "food", "dinner", "lunch", "breakfast", "grocer", "supermarket", "restaurant",
            "comida", "cena", "super", "desayuno", "restaurante",
        ],
    ),
    (
        Category::Transport,
        &["gas", "fuel", "uber", "taxi", "bus", "car", "gasolina", "coche"],
    ),
    (
        Category::Entertainment,
        &["movie", "cinema", "game", "outing", "netflix", "cine", "juego", "salida"],
    ),
    (
        Category::Health,
        &["doctor", "pharmacy", "medicine", "farmacia", "medicina"],
    ),
];

const AMOUNT_PATTERN: &str = r"[0-9]+(\.[0-9]+)?";

/// Prompt shown when no amount could be found
pub const NO_AMOUNT_HINT: &str = "No valid amount detected. Try: 'food 200'";

fn amount_regex() -> &'static Regex {
    static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();
    AMOUNT_RE.get_or_init(|| Regex::new(AMOUNT_PATTERN).expect("valid amount pattern"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseOutcome {
    Parsed {
        request: TransactionRequest,
        confirmation: String,
    },
    NoAmountDetected,
}

impl ParseOutcome {
    pub fn request(&self) -> Option<&TransactionRequest> {
        match self {
            ParseOutcome::Parsed { request, .. } => Some(request),
            ParseOutcome::NoAmountDetected => None,
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::Parsed { confirmation, .. } => write!(f, "{}", confirmation),
            ParseOutcome::NoAmountDetected => write!(f, "{}", NO_AMOUNT_HINT),
        }
    }
}

/// Stateless free-text transaction parser
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartInputParser;

impl SmartInputParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        let text = text.to_lowercase();

        let amount = extract_amount(&text);
        if !amount.is_finite() || amount <= 0.0 {
            debug!(input = %text, "No amount detected in smart input");
            return ParseOutcome::NoAmountDetected;
        }

        let kind = detect_kind(&text);
        let category = detect_category(&text);

        let confirmation = format!("Registered: {} of ${} in {}", kind, amount, category);
        debug!(%kind, amount, %category, "Parsed smart input");

        ParseOutcome::Parsed {
            request: TransactionRequest {
                kind,
                amount,
                category: Some(category),
            },
            confirmation,
        }
    }
}

/// First numeral in the text, or 0 when there is none.
/// A numeral too long for `f64` comes back as infinity.
fn extract_amount(text: &str) -> f64 {
    amount_regex()
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn detect_kind(text: &str) -> TransactionKind {
    if INCOME_KEYWORDS.iter().any(|kw| text.contains(kw)) {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    }
}

fn detect_category(text: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> TransactionRequest {
        match SmartInputParser::new().parse(text) {
            ParseOutcome::Parsed { request, .. } => request,
            ParseOutcome::NoAmountDetected => panic!("expected an amount in {:?}", text),
        }
    }

    #[test]
    fn test_case_insensitive() {
        let parser = SmartInputParser::new();
        let upper = parser.parse("Food 200");
        let lower = parser.parse("food 200");

        assert_eq!(upper, lower);
        assert_eq!(
            upper.request(),
            Some(&TransactionRequest::expense(200.0, Some(Category::Food)))
        );
    }

    #[test]
    fn test_no_amount() {
        let parser = SmartInputParser::new();
        assert_eq!(parser.parse("no numbers here"), ParseOutcome::NoAmountDetected);
        assert_eq!(parser.parse(""), ParseOutcome::NoAmountDetected);
        assert_eq!(parser.parse("lunch 0"), ParseOutcome::NoAmountDetected);
        assert_eq!(
            parser.parse("nothing").to_string(),
            "No valid amount detected. Try: 'food 200'"
        );
    }

    #[test]
    fn test_overflowing_amount_is_rejected() {
        let parser = SmartInputParser::new();
        let text = format!("food {}", "9".repeat(400));

        let outcome = parser.parse(&text);
        assert_eq!(outcome, ParseOutcome::NoAmountDetected);
        assert_eq!(outcome.to_string(), NO_AMOUNT_HINT);
    }

    #[test]
    fn test_decimal_and_first_numeral() {
        let request = parsed("taxi 12.75 then 40 more");
        assert_eq!(request.amount, 12.75);
        assert_eq!(request.category, Some(Category::Transport));
    }

    #[test]
    fn test_income_detection() {
        let cases = vec!["salary 3000", "got paid 1200", "Earned 45.5 today", "cobré 800"];

        for c in cases {
            assert_eq!(parsed(c).kind, TransactionKind::Income, "{}", c);
        }

        assert_eq!(parsed("netflix 15").kind, TransactionKind::Expense);
    }

    #[test]
    fn test_debt_never_inferred() {
        let request = parsed("debt 5000 loan");
        assert_eq!(request.kind, TransactionKind::Expense);
    }

    #[test]
    fn test_category_precedence() {
        // Food is declared before Transport
        let request = parsed("dinner and uber 60");
        assert_eq!(request.category, Some(Category::Food));

        let request = parsed("uber to dinner 60");
        assert_eq!(request.category, Some(Category::Food));
    }

    #[test]
    fn test_category_defaults_to_other() {
        assert_eq!(parsed("gift 25").category, Some(Category::Other));
    }

    #[test]
    fn test_spanish_keywords() {
        let request = parsed("Comida 200");
        assert_eq!(request.category, Some(Category::Food));
        assert_eq!(parsed("farmacia 30").category, Some(Category::Health));
    }

    #[test]
    fn test_confirmation_text() {
        let outcome = SmartInputParser::new().parse("movie 12.5");
        assert_eq!(outcome.to_string(), "Registered: Expense of $12.5 in Entertainment");
    }
}
