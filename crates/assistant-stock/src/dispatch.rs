//! The assistant's turn loop
//!
//! One turn is at most two model round trips: the first lets the model
//! answer directly or pick a catalog function; the second summarizes a
//! textual function result in natural language. Chart results end the turn
//! after the first round trip.
//!
//! History is committed only when a turn completes. Any failure, whether
//! from the model API, the data source, or dispatch itself, leaves the
//! conversation exactly as it was before the turn, so the user can simply
//! ask again.

use crate::catalog::{FunctionCatalog, FunctionOutcome, validate_arguments};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use assistant_llm::{ChatProvider, ChatRequest, Message};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// What a completed turn produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A natural-language reply
    Reply(String),
    /// A chart written to the given path
    Chart(PathBuf),
}

/// The conversational finance assistant
pub struct Assistant {
    provider: Arc<dyn ChatProvider>,
    catalog: FunctionCatalog,
    config: AssistantConfig,
    history: Vec<Message>,
}

impl Assistant {
    /// Create a new assistant with an empty conversation
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        catalog: FunctionCatalog,
        config: AssistantConfig,
    ) -> Self {
        Self {
            provider,
            catalog,
            config,
            history: Vec::new(),
        }
    }

    /// The committed conversation so far
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Handle one user turn
    pub async fn handle(&mut self, input: &str) -> Result<TurnOutcome> {
        // Stage the turn's messages; commit to history only on success
        let mut staged = self.history.clone();
        staged.push(Message::user(input));

        let mut first_request = ChatRequest::builder(&self.config.model)
            .messages(staged.clone())
            .functions(self.catalog.specs())
            .max_tokens(self.config.max_tokens);
        if let Some(temperature) = self.config.temperature {
            first_request = first_request.temperature(temperature);
        }

        let response = self.provider.complete(first_request.build()).await?;

        // No function call: the model answered directly
        let Some(call) = response.message.function_call.clone() else {
            let text = response.message.text().unwrap_or_default().to_string();
            staged.push(Message::assistant(text.clone()));
            self.history = staged;
            return Ok(TurnOutcome::Reply(text));
        };

        info!(function = %call.name, "Model requested a function call");
        debug!(arguments = %call.arguments, "Raw function arguments");

        let function = self
            .catalog
            .get(&call.name)
            .ok_or_else(|| AssistantError::UnknownFunction(call.name.clone()))?;

        let args: Value = serde_json::from_str(&call.arguments)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        validate_arguments(function.as_ref(), &args)?;

        let outcome = function.execute(args).await?;

        staged.push(Message::assistant_function_call(call.clone()));

        match outcome {
            FunctionOutcome::Chart(path) => {
                // The chart is the answer; no result message, no summary round
                info!(path = %path.display(), "Chart rendered, ending turn");
                self.history = staged;
                Ok(TurnOutcome::Chart(path))
            }
            FunctionOutcome::Text(text) => {
                staged.push(Message::function(&call.name, text));

                let mut summary_request = ChatRequest::builder(&self.config.summary_model)
                    .messages(staged.clone())
                    .max_tokens(self.config.max_tokens);
                if let Some(temperature) = self.config.temperature {
                    summary_request = summary_request.temperature(temperature);
                }

                let response = self.provider.complete(summary_request.build()).await?;
                let summary = response.message.text().unwrap_or_default().to_string();

                staged.push(Message::assistant(summary.clone()));
                self.history = staged;
                Ok(TurnOutcome::Reply(summary))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::build_catalog;
    use crate::market::StaticMarket;
    use assistant_llm::{ChatResponse, FinishReason, FunctionCall, Role, TokenUsage};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Provider that replays queued responses and records every request
    struct ScriptedProvider {
        responses: Mutex<Vec<ChatResponse>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<ChatResponse>) -> Self {
            let mut reversed = responses;
            reversed.reverse();
            Self {
                responses: Mutex::new(reversed),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn complete(&self, request: ChatRequest) -> assistant_llm::Result<ChatResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses.lock().unwrap().pop().ok_or_else(|| {
                assistant_llm::LLMError::RequestFailed("no scripted response left".to_string())
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn reply(text: &str) -> ChatResponse {
        ChatResponse {
            message: Message::assistant(text),
            finish_reason: FinishReason::Stop,
            usage: TokenUsage::default(),
        }
    }

    fn function_call(name: &str, arguments: &str) -> ChatResponse {
        ChatResponse {
            message: Message::assistant_function_call(FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            }),
            finish_reason: FinishReason::FunctionCall,
            usage: TokenUsage::default(),
        }
    }

    fn market() -> Arc<StaticMarket> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i) * 0.5).collect();
        Arc::new(StaticMarket::new().with_closes("AAPL", start, &closes))
    }

    fn assistant_with(
        provider: Arc<ScriptedProvider>,
        chart_path: PathBuf,
    ) -> Assistant {
        let catalog = build_catalog(market(), chart_path);
        let config = AssistantConfig::builder()
            .model("gpt-3.5-turbo")
            .summary_model("summary-model")
            .build()
            .unwrap();
        Assistant::new(provider, catalog, config)
    }

    fn temp_chart(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[tokio::test]
    async fn test_plain_question_appends_two_messages() {
        let provider = Arc::new(ScriptedProvider::new(vec![reply("Stocks are equity.")]));
        let mut assistant = assistant_with(provider.clone(), temp_chart("unused.png"));

        let outcome = assistant.handle("What is a stock?").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Reply("Stocks are equity.".to_string()));
        assert_eq!(assistant.history().len(), 2);
        assert_eq!(assistant.history()[0].role, Role::User);
        assert_eq!(assistant.history()[1].role, Role::Assistant);
        assert!(assistant.history().iter().all(|m| m.role != Role::Function));

        // First round carries the catalog in auto mode
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].function_call.as_deref(), Some("auto"));
        assert_eq!(requests[0].functions.as_ref().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn test_sma_call_dispatches_to_sma_and_summarizes() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            function_call("calculate_SMA", r#"{"ticker":"AAPL","window":20}"#),
            reply("The 20-day SMA of AAPL is 124.75."),
        ]));
        let mut assistant = assistant_with(provider.clone(), temp_chart("unused.png"));

        let outcome = assistant.handle("20 day SMA for AAPL?").await.unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Reply("The 20-day SMA of AAPL is 124.75.".to_string())
        );

        // user, assistant function-call, function result, assistant summary
        let history = assistant.history();
        assert_eq!(history.len(), 4);
        assert!(history[1].has_function_call());
        assert_eq!(history[2].role, Role::Function);
        assert_eq!(history[2].name.as_deref(), Some("calculate_SMA"));
        // Trailing mean of closes 120.0..=129.5 step 0.5 over 20 days
        assert_eq!(history[2].text(), Some("124.75"));

        // Second round trip uses the summary model and no catalog
        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].model, "summary-model");
        assert!(requests[1].functions.is_none());
        assert!(requests[1].function_call.is_none());
    }

    #[tokio::test]
    async fn test_unknown_function_is_error_and_history_untouched() {
        let provider = Arc::new(ScriptedProvider::new(vec![function_call(
            "calculate_FOO",
            r#"{"ticker":"AAPL"}"#,
        )]));
        let mut assistant = assistant_with(provider, temp_chart("unused.png"));

        let err = assistant.handle("do the FOO").await.unwrap_err();

        assert!(matches!(err, AssistantError::UnknownFunction(name) if name == "calculate_FOO"));
        assert!(assistant.history().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_arguments() {
        let provider = Arc::new(ScriptedProvider::new(vec![function_call(
            "calculate_RSI",
            "{not json",
        )]));
        let mut assistant = assistant_with(provider, temp_chart("unused.png"));

        let err = assistant.handle("RSI for AAPL").await.unwrap_err();

        assert!(matches!(err, AssistantError::MalformedArguments(_)));
        assert!(assistant.history().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let provider = Arc::new(ScriptedProvider::new(vec![function_call(
            "calculate_SMA",
            r#"{"ticker":"AAPL"}"#,
        )]));
        let mut assistant = assistant_with(provider, temp_chart("unused.png"));

        let err = assistant.handle("SMA for AAPL").await.unwrap_err();

        assert!(matches!(
            err,
            AssistantError::MissingArgument { parameter, .. } if parameter == "window"
        ));
        assert!(assistant.history().is_empty());
    }

    #[tokio::test]
    async fn test_chart_turn_single_round_trip() {
        let chart_path = temp_chart("finance-assistant-dispatch-chart.png");
        let provider = Arc::new(ScriptedProvider::new(vec![function_call(
            "plot_stock_price",
            r#"{"ticker":"AAPL"}"#,
        )]));
        let mut assistant = assistant_with(provider.clone(), chart_path.clone());

        let outcome = assistant.handle("plot AAPL").await.unwrap();

        assert_eq!(outcome, TurnOutcome::Chart(chart_path.clone()));
        assert!(chart_path.exists());

        // Exactly one completion; no function-result message in history
        assert_eq!(provider.requests().len(), 1);
        let history = assistant.history();
        assert_eq!(history.len(), 2);
        assert!(history[1].has_function_call());
        assert!(history.iter().all(|m| m.role != Role::Function));

        std::fs::remove_file(&chart_path).ok();
    }

    #[tokio::test]
    async fn test_summary_round_failure_leaves_history_untouched() {
        // Only the first response is scripted; the summary round fails
        let provider = Arc::new(ScriptedProvider::new(vec![function_call(
            "get_stock_price",
            r#"{"ticker":"AAPL"}"#,
        )]));
        let mut assistant = assistant_with(provider, temp_chart("unused.png"));

        let err = assistant.handle("price of AAPL?").await.unwrap_err();

        assert!(matches!(err, AssistantError::Llm(_)));
        assert!(assistant.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_carries_across_turns() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            reply("First answer."),
            reply("Second answer."),
        ]));
        let mut assistant = assistant_with(provider.clone(), temp_chart("unused.png"));

        assistant.handle("first question").await.unwrap();
        assistant.handle("second question").await.unwrap();

        assert_eq!(assistant.history().len(), 4);

        // The second request replays the full committed history
        let requests = provider.requests();
        assert_eq!(requests[1].messages.len(), 3);
        assert_eq!(requests[1].messages[0].text(), Some("first question"));
        assert_eq!(requests[1].messages[1].text(), Some("First answer."));
        assert_eq!(requests[1].messages[2].text(), Some("second question"));
    }
}
