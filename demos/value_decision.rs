//! Value decision example
//!
//! A price is computed by chaining expression rules: each rule reads the
//! current `value` and returns the next one. Rules run by descending
//! priority and every intermediate output ends up in the audit context.

use arbiter_expression::{MathFunctionProvider, ValueFunctionProvider};
use arbiter_sdk::{
    DecisionEngineBuilder, DecisionType, ExpressionRule, Input, SimpleExpressionLanguage, Value,
};
use std::collections::HashMap;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arbiter_sdk=debug".parse()?),
        )
        .init();

    println!("=== Value Decision Example ===\n");

    let language = SimpleExpressionLanguage::new()
        .with_provider(&ValueFunctionProvider)
        .with_provider(&MathFunctionProvider);

    let mut promo = HashMap::new();
    promo.insert("reason".to_string(), Value::from("summer promo"));

    let mut engine = DecisionEngineBuilder::new(DecisionType::Value)
        .with_name("pricing")
        .with_default_output(100)
        .with_expression_language(Arc::new(language))
        .add_rule(ExpressionRule::new("add(shipping)").with_name("shipping").with_priority(10))
        .add_rule(
            ExpressionRule::new("subtract(value * 0.1)")
                .with_name("discount")
                .with_extra(promo),
        )
        .add_rule(ExpressionRule::new("max(value, 80)").with_name("floor").with_priority(-10))
        .build();

    for (label, shipping) in [("domestic", 5.0), ("international", 25.0)] {
        let mut input = Input::new();
        input.insert("shipping".to_string(), Value::Number(shipping));

        let price = engine.make(input)?;
        let context = engine.get_context()?;

        println!("{} order:", label);
        println!("  Run ID: {}", context.run_id());
        println!("  Price: {}", serde_json::Value::from(price));
        println!(
            "  Rule outputs: {}",
            serde_json::to_string_pretty(context.rule_outputs())?
        );
        println!();
    }

    Ok(())
}
