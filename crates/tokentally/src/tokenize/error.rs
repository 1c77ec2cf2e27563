/// Error type for tokenizer set-up failures.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TokenizeError {
    /// The encoding table for a model could not be loaded.
    #[error("failed to load the {encoding} encoding for {model}: {reason}")]
    #[diagnostic(
        code(tokentally::tokenize::init),
        help("the encoding tables are embedded in the binary; try reinstalling")
    )]
    Init {
        /// Model the table was requested for.
        model: &'static str,
        /// Name of the encoding table (e.g. `o200k_base`).
        encoding: &'static str,
        /// Underlying loader error.
        reason: String,
    },
}
