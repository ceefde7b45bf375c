//! Approval decision example
//!
//! Two boolean decisions over the same transaction:
//! - a unanimous decision loaded from a JSON configuration
//! - a consensus decision mixing expression rules with a hand written rule
//!   that degrades gracefully when its data source is missing

use arbiter_expression::{MathFunctionProvider, ValueFunctionProvider};
use arbiter_sdk::{
    DecisionConfig, DecisionEngine, DecisionEngineBuilder, DecisionType, EvaluationScope,
    ExpressionLanguage, ExpressionRule, Input, Rule, RuleError, RuleOutput,
    SimpleExpressionLanguage, Value,
};
use std::sync::Arc;

const APPROVAL_CONFIG: &str = r#"{
    "decision_type": "unanimous",
    "name": "approval",
    "exit_on_propagation_stopped": true,
    "expressions": [
        { "expression": "amount <= 5000", "name": "amount limit", "priority": 10 },
        { "expression": "country in [\"FR\", \"DE\", \"US\"]", "name": "supported country" },
        { "expression": "customer.verified", "name": "verified customer" }
    ]
}"#;

/// Scores the customer's history, if the input carries one
struct HistoryRule;

impl Rule for HistoryRule {
    fn name(&self) -> String {
        "history".to_string()
    }

    fn supports(&self, input: &Input) -> bool {
        input.contains_key("customer")
    }

    fn evaluate(
        &self,
        input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        let chargebacks = input
            .get("customer")
            .and_then(|customer| customer.get("chargebacks"))
            .and_then(Value::as_f64)
            .ok_or_else(|| RuleError::non_blocking("chargeback history unavailable", false))?;

        Ok(RuleOutput::from(chargebacks < 2.0))
    }
}

fn transaction(amount: f64, country: &str, chargebacks: Option<f64>) -> Input {
    let mut customer = serde_json::json!({ "verified": true });
    if let Some(count) = chargebacks {
        customer["chargebacks"] = serde_json::json!(count);
    }

    let mut input = Input::new();
    input.insert("amount".to_string(), Value::Number(amount));
    input.insert("country".to_string(), Value::from(country));
    input.insert("customer".to_string(), Value::from(customer));
    input
}

fn report(engine: &DecisionEngine, outcome: &Value) -> anyhow::Result<()> {
    let context = engine.get_context()?;
    println!(
        "  {} ({}): {}",
        engine.name(),
        engine.decision_type(),
        serde_json::Value::from(outcome.clone())
    );
    println!(
        "  Rule outputs: {}",
        serde_json::to_string(context.rule_outputs())?
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arbiter_sdk=info".parse()?),
        )
        .init();

    println!("=== Approval Decision Example ===\n");

    let language: Arc<dyn ExpressionLanguage> = Arc::new(
        SimpleExpressionLanguage::new()
            .with_provider(&ValueFunctionProvider)
            .with_provider(&MathFunctionProvider),
    );

    let config = DecisionConfig::from_json(APPROVAL_CONFIG)?;
    let mut approval = DecisionEngineBuilder::from_config(&config)?
        .with_expression_language(Arc::clone(&language))
        .build();

    let mut review = DecisionEngineBuilder::new(DecisionType::Consensus)
        .with_name("manual review")
        .with_expression_language(language)
        .add_rule(ExpressionRule::new("amount > 1000").with_name("large amount"))
        .add_rule(ExpressionRule::new("country != \"FR\"").with_name("foreign"))
        .add_rule(HistoryRule)
        .build();

    let cases = [
        ("Small domestic payment", transaction(120.0, "FR", Some(0.0))),
        ("Large foreign payment", transaction(4200.0, "BR", Some(3.0))),
        ("Payment without history", transaction(2500.0, "US", None)),
    ];

    for (label, input) in cases {
        println!("{}:", label);

        match approval.make(input.clone()) {
            Ok(outcome) => report(&approval, &outcome)?,
            Err(e) => println!("  approval failed: {}", e),
        }
        match review.make(input) {
            Ok(outcome) => report(&review, &outcome)?,
            Err(e) => println!("  review failed: {}", e),
        }
        println!();
    }

    Ok(())
}
