//! # Spans de Token
//!
//! Um [`Span`] é um intervalo semiaberto `[start, end)` sobre os índices de
//! **caractere** do texto de entrada (não bytes). O segmentador produz spans
//! em ordem, sem sobreposição; espaços em branco nunca fazem parte de um span.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Primeiro caractere (inclusivo).
    pub start: usize,
    /// Fim (exclusivo).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "span vazio: [{start}, {end})");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Converte o span em um intervalo de bytes de `text`.
    ///
    /// `byte_offsets` deve ter `chars + 1` entradas: o deslocamento em bytes
    /// de cada caractere seguido de `text.len()`.
    pub fn byte_range(&self, byte_offsets: &[usize]) -> std::ops::Range<usize> {
        byte_offsets[self.start]..byte_offsets[self.end]
    }

    /// Recorta o texto original coberto pelo span.
    pub fn slice<'a>(&self, text: &'a str, byte_offsets: &[usize]) -> &'a str {
        &text[self.byte_range(byte_offsets)]
    }
}

/// Tabela de deslocamentos em bytes por índice de caractere, com
/// `text.len()` como sentinela final.
pub fn byte_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}
