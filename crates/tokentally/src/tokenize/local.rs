use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

use super::error::TokenizeError;
use super::{Encoding, ModelId};

/// Common interface for token counters.
pub trait Tokenizer {
    /// Short identifier shown in logs (e.g. `"gpt-4o"`).
    fn name(&self) -> &'static str;
    /// Count the tokens in `content`.
    fn count_tokens(&self, content: &str) -> usize;
}

// ─── encoding cache ──────────────────────────────────────────────────────────

static O200K: OnceLock<CoreBPE> = OnceLock::new();
static CL100K: OnceLock<CoreBPE> = OnceLock::new();

/// Load the BPE table for `encoding`, building it at most once per process.
fn load_encoding(model: ModelId, encoding: Encoding) -> Result<&'static CoreBPE, TokenizeError> {
    match encoding {
        Encoding::O200kBase => cached(&O200K, model, encoding, tiktoken_rs::o200k_base),
        Encoding::Cl100kBase => cached(&CL100K, model, encoding, tiktoken_rs::cl100k_base),
    }
}

fn cached<E: std::fmt::Display>(
    cell: &'static OnceLock<CoreBPE>,
    model: ModelId,
    encoding: Encoding,
    init: impl FnOnce() -> Result<CoreBPE, E>,
) -> Result<&'static CoreBPE, TokenizeError> {
    if let Some(bpe) = cell.get() {
        return Ok(bpe);
    }
    let bpe = init().map_err(|e| TokenizeError::Init {
        model: model.as_str(),
        encoding: encoding.as_str(),
        reason: e.to_string(),
    })?;
    Ok(cell.get_or_init(|| bpe))
}

// ─── tiktoken ────────────────────────────────────────────────────────────────

/// Offline tokenizer backed by the `OpenAI` BPE table of one model.
pub struct BpeTokenizer {
    model: ModelId,
    bpe: &'static CoreBPE,
}

impl BpeTokenizer {
    /// Resolve `model` to its encoding table and load it.
    pub fn for_model(model: ModelId) -> Result<Self, TokenizeError> {
        let bpe = load_encoding(model, model.encoding())?;
        Ok(Self { model, bpe })
    }

    /// The model this tokenizer counts for.
    #[must_use]
    pub fn model(&self) -> ModelId {
        self.model
    }
}

impl Tokenizer for BpeTokenizer {
    fn name(&self) -> &'static str {
        self.model.as_str()
    }

    fn count_tokens(&self, content: &str) -> usize {
        // Special-token text such as `<|endoftext|>` counts as ordinary text.
        self.bpe.encode_ordinary(content).len()
    }
}
