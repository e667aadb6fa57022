use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionNamedToolChoice, ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionTool, ChatCompletionToolChoiceOption,
    ChatCompletionToolType, CreateChatCompletionRequestArgs, CreateChatCompletionResponse, FunctionName,
    FunctionObject,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use indexmap::IndexMap;
use intake_config::catalog::module::Module;
use intake_config::catalog::question::{AnswerValue, Question};
use intake_model::pattern::Pattern;
use intake_utils::args::oracle::OracleService;
use serde::Deserialize;
use serde_json::{Value, json};
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use typed_builder::TypedBuilder;

use crate::oracle::Oracle;
use crate::oracle::error::{FunctionCallError, OracleError};

const DEFAULT_MODEL: &str = "gpt-4.1-mini";

#[derive(TypedBuilder, Debug, Clone)]
pub struct CallConfig {
    total_timeout: Duration,
    iteration_timeout: Duration,
    #[builder(default = Duration::from_millis(100))]
    min_retry_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    max_retry_interval: Duration,
}

/// Function-calling contract for structured oracle output.
pub trait FunctionResponse: serde::de::DeserializeOwned {
    fn function_name() -> &'static str;
    fn function_description() -> &'static str;

    fn function_definition() -> Value;
}

#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl From<OracleService> for OracleConfig {
    fn from(args: OracleService) -> Self {
        Self {
            api_base: args.oracle_api_base,
            api_key: args.oracle_key,
            model: args.oracle_model,
        }
    }
}

impl OracleConfig {
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    #[must_use]
    pub fn openai_config(&self) -> OpenAIConfig {
        let mut config = OpenAIConfig::default();
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base);
        }
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key);
        }
        config
    }
}

/// Oracle backed by an OpenAI-compatible chat endpoint. The choice comes back
/// through a forced function call, so the output is machine-checkable.
pub struct OpenAiOracle {
    config: OracleConfig,
}

impl OpenAiOracle {
    #[must_use]
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Oracle for OpenAiOracle {
    async fn select_next(
        &self,
        history: &IndexMap<String, AnswerValue>,
        patterns: &[Pattern],
        candidates: &[Question],
        module: &Module,
    ) -> Result<Option<String>, OracleError> {
        let messages = prompt_messages(history, patterns, candidates, module);
        let choice: QuestionChoice = call_function_with_timeout(
            &self.config,
            CallConfig::builder()
                .total_timeout(Duration::from_secs(10))
                .iteration_timeout(Duration::from_secs(5))
                .build(),
            messages,
        )
        .await?;
        Ok(choice.question_id)
    }
}

#[derive(Debug, Deserialize)]
struct QuestionChoice {
    question_id: Option<String>,
}

impl FunctionResponse for QuestionChoice {
    fn function_name() -> &'static str {
        "select_next_question"
    }

    fn function_description() -> &'static str {
        "Records which candidate question should be asked next, or null when the order does not matter."
    }

    fn function_definition() -> Value {
        json!({
            "type": "object",
            "properties": {
                "question_id": {
                    "type": ["string", "null"],
                    "description": "Id of the chosen candidate question, or null to keep the default order."
                }
            },
            "required": ["question_id"]
        })
    }
}

fn prompt_messages(
    history: &IndexMap<String, AnswerValue>,
    patterns: &[Pattern],
    candidates: &[Question],
    module: &Module,
) -> Vec<ChatCompletionRequestMessage> {
    let history: Vec<Value> = history
        .iter()
        .map(|(question_id, answer)| json!({ "question-id": question_id, "answer": answer }))
        .collect();
    let patterns: Vec<Value> = patterns
        .iter()
        .map(|pattern| json!({ "name": pattern.name, "severity": pattern.severity, "weight": pattern.weight }))
        .collect();
    let candidates: Vec<Value> = candidates
        .iter()
        .map(|question| json!({ "question-id": question.id, "prompt": question.prompt }))
        .collect();

    let context = json!({
        "module": { "id": module.id, "title": module.title },
        "history": history,
        "patterns": patterns,
        "candidates": candidates,
    });

    vec![
        ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
            content: ChatCompletionRequestSystemMessageContent::Text(
                "You assist a health-intake interview. Several candidate questions currently rank \
                 equally; pick the one that most reduces clinical uncertainty given the answers so \
                 far and the detected symptom patterns. Answer through the function call with the \
                 id of exactly one candidate, or null if the order does not matter."
                    .to_owned(),
            ),
            name: None,
        }),
        ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(context.to_string()),
            name: None,
        }),
    ]
}

#[instrument(skip_all)]
async fn call_function_with_timeout<T: FunctionResponse>(
    config: &OracleConfig,
    call_config: CallConfig,
    messages: Vec<ChatCompletionRequestMessage>,
) -> Result<T, OracleError> {
    let name = T::function_name();

    let request = CreateChatCompletionRequestArgs::default()
        .model(config.model())
        .messages(messages)
        .max_tokens(256u16)
        .tools(vec![ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: name.to_string(),
                description: Some(T::function_description().to_string()),
                parameters: Some(T::function_definition()),
                strict: None,
            },
        }])
        .tool_choice(ChatCompletionToolChoiceOption::Named(ChatCompletionNamedToolChoice {
            r#type: ChatCompletionToolType::Function,
            function: FunctionName { name: name.to_string() },
        }))
        .build()?;

    let http_client = reqwest::Client::builder()
        .timeout(call_config.iteration_timeout)
        .build()
        .map_err(|error| {
            tracing::error!(error = &error as &dyn Error, "failed to build http client for the oracle");
            OracleError::HttpClientBuild(error)
        })?;

    let mut backoff_builder = ExponentialBackoffBuilder::default();
    backoff_builder
        .with_max_interval(call_config.max_retry_interval)
        .with_initial_interval(call_config.min_retry_interval)
        .with_max_elapsed_time(Some(call_config.total_timeout));

    let backoff = backoff_builder.build();

    let client = Client::with_config(config.openai_config())
        .with_http_client(http_client)
        .with_backoff(backoff);

    tracing::debug!("sending oracle request");
    let res = client.chat().create(request).await;
    let chat_completion = res.map_err(|error| {
        tracing::warn!(error = &error as &dyn Error, "oracle call failed");
        OracleError::Api(error)
    })?;

    check_function_call(&chat_completion)
}

#[instrument(skip_all)]
fn check_function_call<T: FunctionResponse>(chat_completion: &CreateChatCompletionResponse) -> Result<T, OracleError> {
    let choice = chat_completion.choices.first().ok_or(OracleError::EmptyResponse)?;
    let message = &choice.message;

    let function_call = message
        .tool_calls
        .as_ref()
        .ok_or(FunctionCallError::Missing)?
        .first()
        .ok_or(FunctionCallError::Missing)?;

    if function_call.function.name != T::function_name() {
        tracing::warn!(
            expected_function = T::function_name(),
            called_function = &function_call.function.name,
            "oracle tried to call the wrong function"
        );
        return Err(FunctionCallError::WrongFunction.into());
    }

    let res: T = serde_json::from_str(&function_call.function.arguments).map_err(|error| {
        tracing::warn!(
            error = &error as &dyn Error,
            arguments = function_call.function.arguments,
            "failed to parse function call arguments"
        );
        FunctionCallError::InvalidSyntax
    })?;
    Ok(res)
}
