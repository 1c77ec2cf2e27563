//! Model identifiers, encoding lookup, and the tiktoken-backed counter.

mod error;
mod local;

pub use error::TokenizeError;
pub use local::{BpeTokenizer, Tokenizer};
pub use model_id::{Encoding, ModelId};

mod model_id {
    use std::fmt;

    /// The models whose tokenization can be approximated.
    ///
    /// Parsed by clap at the CLI boundary, so an unsupported name never
    /// reaches the tokenizer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
    pub enum ModelId {
        /// `gpt-4o`
        #[default]
        #[value(name = "gpt-4o")]
        Gpt4o,
        /// `gpt-4o-mini`
        #[value(name = "gpt-4o-mini")]
        Gpt4oMini,
        /// `gpt-4-turbo`
        #[value(name = "gpt-4-turbo")]
        Gpt4Turbo,
        /// `gpt-4`
        #[value(name = "gpt-4")]
        Gpt4,
    }

    impl ModelId {
        /// The name used on the command line.
        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Gpt4o => "gpt-4o",
                Self::Gpt4oMini => "gpt-4o-mini",
                Self::Gpt4Turbo => "gpt-4-turbo",
                Self::Gpt4 => "gpt-4",
            }
        }

        /// The encoding table this model tokenizes with.
        #[must_use]
        pub fn encoding(self) -> Encoding {
            match self {
                Self::Gpt4o | Self::Gpt4oMini => Encoding::O200kBase,
                Self::Gpt4Turbo | Self::Gpt4 => Encoding::Cl100kBase,
            }
        }
    }

    impl fmt::Display for ModelId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.pad(self.as_str())
        }
    }

    /// A BPE encoding table. Several models may share one.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Encoding {
        /// `o200k_base` (GPT-4o family).
        O200kBase,
        /// `cl100k_base` (GPT-4 / GPT-4 Turbo).
        Cl100kBase,
    }

    impl Encoding {
        /// The table's canonical name.
        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                Self::O200kBase => "o200k_base",
                Self::Cl100kBase => "cl100k_base",
            }
        }
    }

    impl fmt::Display for Encoding {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.pad(self.as_str())
        }
    }
}
