use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error(transparent)]
    Api(#[from] async_openai::error::OpenAIError),

    #[error(transparent)]
    FunctionCall(#[from] FunctionCallError),

    #[error("no response from the oracle")]
    EmptyResponse,

    #[error("oracle call timed out")]
    Timeout,

    #[error(transparent)]
    HttpClientBuild(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum FunctionCallError {
    #[error("the oracle called the wrong function")]
    WrongFunction,

    #[error("the oracle returned invalid function-call syntax")]
    InvalidSyntax,

    #[error("no function call in the oracle response even though one was expected")]
    Missing,
}
