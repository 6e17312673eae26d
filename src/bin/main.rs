use finance_tracker::{
    assistant::AssistantResponder,
    classifier::IntentClassifier,
    config::TrackerConfig,
    ledger::{CategoryTotals, LedgerListener},
    models::TransactionRequest,
    portfolio::RiskProfile,
    tracker::Tracker,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Stands in for the chart widgets: logs what they would redraw
struct ChartLog;

impl LedgerListener for ChartLog {
    fn on_change(&self, categories: &CategoryTotals, history: &[f64]) {
        debug!(spent = categories.total(), ?history, "Charts updated");
    }
}

const HELP: &str = "\
Type a transaction in plain words (e.g. 'uber 35', 'salary 1200'), or:
  /chat <message>      ask the assistant
  /debt <amount>       set outstanding debt
  /portfolio <profile> show an allocation (conservative, moderate, aggressive)
  /dashboard           show totals
  /quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TrackerConfig::from_env()?;

    info!("Finance Tracker console starting");

    let classifier = Arc::new(IntentClassifier::train());
    let mut tracker = Tracker::new(classifier, AssistantResponder::with_delay(config.assistant_delay));
    tracker.subscribe(Arc::new(ChartLog));

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "/quit" | "/exit" => break,
            "/help" => println!("{}", HELP),
            "/chat" => {
                let reply = tracker.chat(rest).await;
                println!("assistant> {}", reply.message);
            }
            "/debt" => {
                let amount = rest.trim().parse::<f64>().unwrap_or(f64::NAN);
                if !tracker.record(TransactionRequest::debt(amount)) {
                    println!("Debt must be a positive number");
                }
            }
            "/portfolio" => {
                let allocation = RiskProfile::parse(rest).allocation();
                println!(
                    "{}: {} fixed income {}% / equity {}%",
                    allocation.profile,
                    allocation.description,
                    allocation.fixed_income_pct,
                    allocation.equity_pct
                );
                for rec in &allocation.recommendations {
                    println!("  {:<13} {:>3}%  {}", rec.asset_class, rec.pct, rec.instruments);
                }
            }
            "/dashboard" => print_dashboard(&tracker),
            _ => {
                println!("{}", tracker.submit_text(line));
            }
        }
    }

    print_dashboard(&tracker);
    Ok(())
}

fn print_dashboard(tracker: &Tracker) {
    let snapshot = tracker.snapshot();

    println!("\n=== DASHBOARD ===");
    println!("Net worth:    {}", snapshot.dashboard.net_worth);
    println!("Savings rate: {}", snapshot.dashboard.savings_rate);
    println!("Debt ratio:   {}", snapshot.dashboard.debt_ratio);
    println!("\nSpending by category:");
    for (category, amount) in snapshot.categories.iter() {
        println!("  {:<14} {:>10.2}", category, amount);
    }
    println!("\nNet worth trend: {:?}", snapshot.history);
}
