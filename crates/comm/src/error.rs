use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommError {
    /// No provider in the chain claimed the request.
    #[error("no communication provider applicable to the request")]
    NoProvider,

    /// The configuration carries no template for the requested stage.
    #[error("no template configured for stage {0}")]
    MissingTemplate(String),

    #[error("template rendering failed: {0}")]
    Render(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}
