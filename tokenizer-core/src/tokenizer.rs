//! # Segmentador de Tokens
//!
//! Divide o texto bruto em tokens (palavras, pontuação, símbolos) em uma única
//! passada da esquerda para a direita:
//!
//! 1. **Espaço em branco**: fecha o token pendente; o espaço nunca vira token.
//! 2. **AlwaysOwnToken** (`(`, `,`, `;`...): fecha o token pendente e emite o
//!    próprio caractere como token.
//! 3. **BoundaryDecision** (`.`, `-`, `'`...): pergunta ao Perceptron. Se houver
//!    fronteira, fecha o token pendente **antes** do caractere, que passa a
//!    iniciar o próximo token.
//! 4. **Ordinary**: estende o token pendente.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tokenizer_core::{Segmenter, WeightTable};
//!
//! // Sem pesos nenhuma pontuação ambígua quebra o token.
//! let segmenter = Segmenter::new(WeightTable::new());
//! let tokens = segmenter.tokenize("well-known (really)");
//! assert_eq!(tokens, vec!["well-known", "(", "really", ")"]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::char_class::{CharClass, CharClassTables};
use crate::corpus;
use crate::error::Result;
use crate::features::extract_boundary_features;
use crate::model;
use crate::perceptron::{is_boundary, WeightTable};
use crate::span::{byte_offsets, Span};

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token, recortado do original.
    pub text: String,
    /// Índice de caractere inicial (inclusive).
    pub start: usize,
    /// Índice de caractere final (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Acurácia das decisões de fronteira contra um corpus anotado.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryAccuracy {
    /// Decisões corretas.
    pub correct: usize,
    /// Total de caracteres de decisão avaliados.
    pub total: usize,
    /// Linhas descartadas por marcação inválida.
    pub skipped: usize,
}

impl BoundaryAccuracy {
    /// `correct / total`, ou 0 quando nada foi avaliado.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Segmentador imutável: tabelas de caracteres + pesos treinados.
///
/// Não possui estado mutável, então pode ser compartilhado entre threads
/// (`Arc<Segmenter>`) sem travas.
#[derive(Debug, Clone)]
pub struct Segmenter {
    weights: WeightTable,
    tables: &'static CharClassTables,
}

impl Segmenter {
    pub fn new(weights: WeightTable) -> Self {
        Self {
            weights,
            tables: CharClassTables::global(),
        }
    }

    /// Carrega os pesos de um artefato JSON. Qualquer falha é devolvida ao
    /// chamador; não há recuo para um modelo vazio.
    pub fn from_model_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(model::load_weights_from_path(path)?))
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Veredito do classificador para o caractere de decisão em `position`.
    pub fn is_boundary_at(&self, chars: &[char], position: usize) -> bool {
        let features = extract_boundary_features(chars, position);
        is_boundary(self.weights.score(&features))
    }

    /// Spans dos tokens de `text`, em índices de caractere.
    pub fn segment(&self, text: &str) -> Vec<Span> {
        let chars: Vec<char> = text.chars().collect();
        self.segment_chars(&chars)
    }

    pub fn segment_chars(&self, chars: &[char]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut token_start = 0;

        for (j, &c) in chars.iter().enumerate() {
            if c.is_whitespace() {
                close_pending(&mut spans, token_start, j);
                token_start = j + 1;
                continue;
            }
            match self.tables.class_of(c) {
                CharClass::AlwaysOwnToken => {
                    close_pending(&mut spans, token_start, j);
                    spans.push(Span::new(j, j + 1));
                    token_start = j + 1;
                }
                CharClass::BoundaryDecision => {
                    if self.is_boundary_at(chars, j) {
                        close_pending(&mut spans, token_start, j);
                        token_start = j;
                    }
                }
                CharClass::Ordinary => {}
            }
        }
        close_pending(&mut spans, token_start, chars.len());

        spans
    }

    /// Tokens com texto e posição.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let offsets = byte_offsets(text);
        self.segment(text)
            .into_iter()
            .enumerate()
            .map(|(index, span)| Token {
                text: span.slice(text, &offsets).to_string(),
                start: span.start,
                end: span.end,
                index,
            })
            .collect()
    }

    /// Apenas o texto de cada token, na ordem original.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let offsets = byte_offsets(text);
        self.segment(text)
            .into_iter()
            .map(|span| span.slice(text, &offsets).to_string())
            .collect()
    }

    /// Compara as decisões do modelo com as fronteiras anotadas em `lines`.
    pub fn evaluate<'a, I>(&self, lines: I) -> BoundaryAccuracy
    where
        I: IntoIterator<Item = &'a str> + 'a,
    {
        let mut accuracy = BoundaryAccuracy::default();
        for parsed in corpus::parse_lines(lines) {
            let sentence = match parsed {
                Ok(sentence) => sentence,
                Err(_) => {
                    accuracy.skipped += 1;
                    continue;
                }
            };
            let chars: Vec<char> = sentence.text.chars().collect();
            for (j, &c) in chars.iter().enumerate() {
                if !self.tables.is_boundary_decision(c) {
                    continue;
                }
                accuracy.total += 1;
                if self.is_boundary_at(&chars, j) == sentence.is_boundary(j) {
                    accuracy.correct += 1;
                }
            }
        }
        accuracy
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(WeightTable::new())
    }
}

/// Fecha o token pendente `[start, end)` se não for vazio.
fn close_pending(spans: &mut Vec<Span>, start: usize, end: usize) {
    if start < end {
        spans.push(Span::new(start, end));
    }
}
