//! # tokenizer-core — Tokenizador com Fronteiras Aprendidas
//!
//! Este crate divide texto bruto em tokens atômicos (palavras, pontuação,
//! símbolos). A maior parte das decisões é determinística, guiada por tabelas
//! de classes de caracteres; apenas a pontuação ambígua (`.`, `-`, `'`, `/`,
//! `:`, `+`, `@`, `&`) é decidida por um **Perceptron Médio** treinado a partir
//! de um corpus anotado.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Classes de Caracteres** ([`char_class`]): cada caractere é
//!     `AlwaysOwnToken`, `BoundaryDecision` ou `Ordinary`.
//! 2.  **Features** ([`features`]): seis features de contexto local para cada
//!     pontuação ambígua.
//! 3.  **Perceptron** ([`perceptron`]): pesos esparsos com média temporal.
//! 4.  **Treino** ([`trainer`]): treino online, época a época, sobre linhas
//!     anotadas com `|` ([`corpus`]).
//! 5.  **Segmentação** ([`tokenizer`]): varredura única que produz os [`Span`]s.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tokenizer_core::{corpus, BoundaryTrainer, TrainerConfig};
//!
//! // 1. Treina no corpus de demonstração
//! let trainer = BoundaryTrainer::new(TrainerConfig::default());
//! let segmenter = trainer.train(&corpus::demo_corpus());
//!
//! // 2. Tokeniza
//! let tokens = segmenter.tokenize("Dr. Smith arrived.");
//! assert_eq!(tokens, vec!["Dr.", "Smith", "arrived", "."]);
//! ```

pub mod char_class;
pub mod corpus;
pub mod error;
pub mod features;
pub mod model;
pub mod perceptron;
pub mod span;
pub mod tokenizer;
pub mod trainer;

pub use error::{Result, TokenizerError};
pub use perceptron::{AveragedPerceptron, WeightTable};
pub use span::Span;
pub use tokenizer::{Segmenter, Token};
pub use trainer::{BoundaryTrainer, TrainerConfig, TrainingReport};

use std::path::Path;

/// Treina um segmentador a partir de um arquivo de corpus anotado.
pub fn train(corpus_path: impl AsRef<Path>, config: TrainerConfig) -> Result<Segmenter> {
    BoundaryTrainer::new(config).train_file(corpus_path)
}
