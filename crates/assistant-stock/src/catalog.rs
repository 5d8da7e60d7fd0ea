//! Function catalog and argument validation
//!
//! The catalog is the fixed set of analysis functions the model may call.
//! Argument validation is schema-driven: each entry's own `required` list
//! and property types decide what a valid call looks like, so adding a
//! function never touches the dispatch loop.

use crate::error::{AssistantError, Result};
use assistant_llm::FunctionSpec;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// What a function invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionOutcome {
    /// A textual result, fed back to the model for summarization
    Text(String),
    /// A chart written to disk; the turn ends here with no summary round
    Chart(PathBuf),
}

/// Trait for analysis functions the model can invoke
#[async_trait]
pub trait AnalysisFunction: Send + Sync {
    /// Function name as the model sees it
    fn name(&self) -> &str;

    /// Description that helps the model choose this function
    fn description(&self) -> &str;

    /// JSON schema for the function's parameters
    fn parameters(&self) -> Value;

    /// Execute with validated arguments
    async fn execute(&self, args: Value) -> Result<FunctionOutcome>;

    /// The catalog entry sent to the model
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::new(self.name(), self.description(), self.parameters())
    }
}

/// Registry of analysis functions, keyed by name
#[derive(Default)]
pub struct FunctionCatalog {
    functions: HashMap<String, Arc<dyn AnalysisFunction>>,
}

impl FunctionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its own name
    pub fn register(&mut self, function: Arc<dyn AnalysisFunction>) {
        self.functions.insert(function.name().to_string(), function);
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn AnalysisFunction>> {
        self.functions.get(name).cloned()
    }

    /// Specs for every registered function, for the completion request
    pub fn specs(&self) -> Vec<FunctionSpec> {
        self.functions.values().map(|f| f.spec()).collect()
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Validate parsed arguments against a function's own schema
///
/// Checks that every required parameter is present and carries the JSON
/// type its property schema declares; integers must also be positive.
/// Runs before any function code.
pub fn validate_arguments(function: &dyn AnalysisFunction, args: &Value) -> Result<()> {
    let name = function.name();

    let Some(args_obj) = args.as_object() else {
        return Err(AssistantError::InvalidArgument {
            function: name.to_string(),
            reason: "arguments must be a JSON object".to_string(),
        });
    };

    let schema = function.parameters();
    let required: Vec<String> = schema["required"]
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    for param in &required {
        let Some(value) = args_obj.get(param) else {
            return Err(AssistantError::MissingArgument {
                function: name.to_string(),
                parameter: param.clone(),
            });
        };

        let expected = schema["properties"][param]["type"].as_str().unwrap_or("");
        match expected {
            "string" => {
                if !value.is_string() {
                    return Err(AssistantError::InvalidArgument {
                        function: name.to_string(),
                        reason: format!("'{param}' must be a string"),
                    });
                }
            }
            "integer" => {
                let Some(n) = value.as_i64() else {
                    return Err(AssistantError::InvalidArgument {
                        function: name.to_string(),
                        reason: format!("'{param}' must be an integer"),
                    });
                };
                if n <= 0 {
                    return Err(AssistantError::InvalidArgument {
                        function: name.to_string(),
                        reason: format!("'{param}' must be positive, got {n}"),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(())
}
