//! Named functions callable from expressions

use crate::error::Result;
use arbiter_core::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Variable bindings visible to an expression
pub type Variables = HashMap<String, Value>;

type Handler = dyn Fn(&Variables, &[Value]) -> Result<Value> + Send + Sync;

/// A function the expression language can call by name.
///
/// The handler receives the bindings of the current evaluation alongside the
/// evaluated arguments, so functions like `add` can read `value` directly.
#[derive(Clone)]
pub struct ExpressionFunction {
    name: String,
    handler: Arc<Handler>,
}

impl ExpressionFunction {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Variables, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, variables: &Variables, args: &[Value]) -> Result<Value> {
        (self.handler)(variables, args)
    }
}

impl fmt::Debug for ExpressionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Source of a group of related functions
pub trait ExpressionFunctionProvider {
    fn functions(&self) -> Vec<ExpressionFunction>;
}

/// Registered functions, kept in registration order
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<ExpressionFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any existing one with the same name
    pub fn add(&mut self, function: ExpressionFunction) {
        match self.functions.iter_mut().find(|f| f.name == function.name) {
            Some(existing) => *existing = function,
            None => self.functions.push(function),
        }
    }

    /// Remove a function by name. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) {
        self.functions.retain(|f| f.name != name);
    }

    pub fn get(&self, name: &str) -> Option<&ExpressionFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
