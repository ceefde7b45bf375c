//! Per-run audit record
//!
//! A `Context` is created fresh by every `DecisionEngine::make` call. It keeps
//! the original input, the output recorded for each rule in evaluation order,
//! and whether a rule stopped propagation.

use crate::decision_engine::{DecisionType, Input};
use arbiter_core::Value;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

const SKIPPED: &str = "skipped";
const UNSUPPORTED: &str = "unsupported";

/// What happened to a rule during a run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The rule produced this output (or a non-blocking error output)
    Output(Value),
    /// Not evaluated because propagation was already stopped
    Skipped,
    /// The rule does not support the input
    Unsupported,
}

impl Outcome {
    pub fn to_value(&self) -> Value {
        match self {
            Outcome::Output(value) => value.clone(),
            Outcome::Skipped => Value::from(SKIPPED),
            Outcome::Unsupported => Value::from(UNSUPPORTED),
        }
    }
}

/// Output recorded for one rule, with optional extra metadata
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOutput {
    outcome: Outcome,
    extra: HashMap<String, Value>,
}

impl RecordedOutput {
    pub fn output(value: impl Into<Value>) -> Self {
        Self::from(Outcome::Output(value.into()))
    }

    pub fn skipped() -> Self {
        Self::from(Outcome::Skipped)
    }

    pub fn unsupported() -> Self {
        Self::from(Outcome::Unsupported)
    }

    /// Attach extra metadata, merged over any already present
    pub fn with_extra(mut self, extra: HashMap<String, Value>) -> Self {
        self.extra.extend(extra);
        self
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn extra(&self) -> &HashMap<String, Value> {
        &self.extra
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }

    pub fn is_unsupported(&self) -> bool {
        self.outcome == Outcome::Unsupported
    }

    /// Plain outcome value, or `{"output": ..., ...extra}` when extra is set
    pub fn to_value(&self) -> Value {
        if self.extra.is_empty() {
            return self.outcome.to_value();
        }

        let mut map = self.extra.clone();
        map.insert("output".to_string(), self.outcome.to_value());
        Value::Object(map)
    }
}

impl From<Outcome> for RecordedOutput {
    fn from(outcome: Outcome) -> Self {
        Self {
            outcome,
            extra: HashMap::new(),
        }
    }
}

impl Serialize for RecordedOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Rule outputs in evaluation order, keyed by rule name.
///
/// Recording a name twice overwrites the earlier entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOutputs {
    entries: Vec<(String, RecordedOutput)>,
}

impl RuleOutputs {
    pub(crate) fn insert(&mut self, name: String, output: RecordedOutput) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = output,
            None => self.entries.push((name, output)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RecordedOutput> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, output)| output)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordedOutput)> {
        self.entries
            .iter()
            .map(|(name, output)| (name.as_str(), output))
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(name, output)| (name.clone(), output.to_value()))
                .collect(),
        )
    }
}

impl Serialize for RuleOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, output) in &self.entries {
            map.serialize_entry(name, output)?;
        }
        map.end()
    }
}

/// Audit record of one decision run
#[derive(Debug, Clone)]
pub struct Context {
    decision_type: DecisionType,
    original_input: Input,
    rule_outputs: RuleOutputs,
    propagation_stopped: bool,
    run_id: String,
    started_at: DateTime<Utc>,
}

impl Context {
    pub fn new(decision_type: DecisionType, original_input: Input) -> Self {
        let started_at = Utc::now();

        Self {
            decision_type,
            original_input,
            rule_outputs: RuleOutputs::default(),
            propagation_stopped: false,
            run_id: generate_run_id(&started_at),
            started_at,
        }
    }

    pub fn decision_type(&self) -> DecisionType {
        self.decision_type
    }

    pub fn original_input(&self) -> &Input {
        &self.original_input
    }

    pub fn rule_outputs(&self) -> &RuleOutputs {
        &self.rule_outputs
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stop evaluating the remaining rules. Cannot be undone within a run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Identifier of the run, `run_YYYYmmddHHMMSS_xxxxxx`
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn add_rule_output(&mut self, rule: String, output: RecordedOutput) {
        self.rule_outputs.insert(rule, output);
    }

    /// Context as a value, exposed to expression rules as `context`
    pub fn to_value(&self) -> Value {
        let mut map = HashMap::new();
        map.insert(
            "decision_type".to_string(),
            Value::from(self.decision_type.as_str()),
        );
        map.insert(
            "original_input".to_string(),
            Value::Object(self.original_input.clone()),
        );
        map.insert("rule_outputs".to_string(), self.rule_outputs.to_value());
        map.insert(
            "propagation_stopped".to_string(),
            Value::Bool(self.propagation_stopped),
        );
        map.insert("run_id".to_string(), Value::from(self.run_id.as_str()));
        Value::Object(map)
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Context", 6)?;
        state.serialize_field("run_id", &self.run_id)?;
        state.serialize_field("started_at", &self.started_at)?;
        state.serialize_field("decision_type", &self.decision_type)?;
        state.serialize_field("original_input", &self.original_input)?;
        state.serialize_field("rule_outputs", &self.rule_outputs)?;
        state.serialize_field("propagation_stopped", &self.propagation_stopped)?;
        state.end()
    }
}

/// Format: run_YYYYmmddHHMMSS_xxxxxx
fn generate_run_id(now: &DateTime<Utc>) -> String {
    use rand::Rng;

    let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);
    format!("run_{}_{:06x}", now.format("%Y%m%d%H%M%S"), random)
}
