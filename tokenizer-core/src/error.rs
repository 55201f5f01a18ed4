//! # Erros do Tokenizador
//!
//! Todos os erros recuperáveis do crate passam por [`TokenizerError`].
//! Linhas de corpus mal anotadas são erros por sentença: o treinador registra
//! um aviso e segue adiante. Falhas ao carregar um modelo são fatais para quem
//! pediu o carregamento.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizerError {
    /// Falha de leitura/escrita (corpus ou arquivo de modelo).
    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// O artefato do modelo não pôde ser (de)serializado.
    #[error("formato de modelo inválido: {0}")]
    ModelFormat(#[from] serde_json::Error),

    /// Marcação `|` inconsistente em uma linha de treino.
    #[error("marcação de fronteira inválida em {line:?}: {reason}")]
    Markup { line: String, reason: MarkupError },
}

/// Motivo pelo qual uma linha anotada foi rejeitada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("mais marcadores ({markers}) do que caracteres ({chars})")]
    TooManyMarkers { markers: usize, chars: usize },
    #[error("marcador após o último caractere (deslocamento {offset})")]
    TrailingMarker { offset: usize },
}

pub type Result<T> = std::result::Result<T, TokenizerError>;
