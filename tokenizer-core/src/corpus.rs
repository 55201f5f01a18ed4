//! # Corpus Anotado com Marcadores de Fronteira
//!
//! Cada linha de treino é uma sentença em texto cru onde um `|` marca uma
//! fronteira de token **antes** do caractere seguinte:
//!
//! ```text
//! Dr. Smith arrived|.
//! well-known facts, e.g. 3.14|.
//! ```
//!
//! Na primeira linha, o ponto final inicia um novo token; o ponto de "Dr." não.
//! O parser remove os marcadores e registra seus deslocamentos no índice de
//! caracteres do texto limpo.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{MarkupError, Result, TokenizerError};

/// Caractere que marca uma fronteira no corpus de treino.
pub const BOUNDARY_MARKER: char = '|';

/// Uma sentença de treino já sem marcadores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSentence {
    /// Texto limpo.
    pub text: String,
    /// Deslocamentos (em caracteres de `text`) onde há fronteira.
    pub boundaries: BTreeSet<usize>,
}

impl AnnotatedSentence {
    /// Faz o parse de uma linha anotada.
    ///
    /// Marcadores repetidos (`||`) contam como uma única fronteira.
    ///
    /// # Erros
    /// - mais marcadores do que caracteres;
    /// - marcador após o último caractere, que não aponta para nenhum
    ///   caractere real.
    pub fn parse(line: &str) -> std::result::Result<Self, MarkupError> {
        let mut text = String::with_capacity(line.len());
        let mut boundaries = BTreeSet::new();
        let mut markers = 0usize;
        let mut offset = 0usize;

        for c in line.chars() {
            if c == BOUNDARY_MARKER {
                markers += 1;
                boundaries.insert(offset);
            } else {
                text.push(c);
                offset += 1;
            }
        }

        if markers > offset {
            return Err(MarkupError::TooManyMarkers {
                markers,
                chars: offset,
            });
        }
        if boundaries.contains(&offset) {
            return Err(MarkupError::TrailingMarker { offset });
        }

        Ok(Self { text, boundaries })
    }

    pub fn is_boundary(&self, offset: usize) -> bool {
        self.boundaries.contains(&offset)
    }
}

/// Converte as linhas do corpus em sentenças anotadas.
///
/// Linhas em branco são ignoradas em silêncio. Linhas com marcação inválida
/// vêm como `Err` para que o chamador decida (o treinador só registra um
/// aviso e segue).
pub fn parse_lines<'a, I>(lines: I) -> impl Iterator<Item = Result<AnnotatedSentence>> + 'a
where
    I: IntoIterator<Item = &'a str> + 'a,
{
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            AnnotatedSentence::parse(line).map_err(|reason| TokenizerError::Markup {
                line: line.to_string(),
                reason,
            })
        })
}

/// Lê um corpus linha a linha, descartando linhas vazias após `trim`.
///
/// As linhas mantidas não são aparadas: espaços fazem parte do texto.
pub fn load_lines_with_text(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Pequeno corpus embutido para demonstração e testes.
///
/// Cobre os casos clássicos: ponto final contra abreviação, número decimal,
/// hífen em palavra composta, apóstrofo de sufixo, e-mail e URL.
pub fn demo_corpus() -> Vec<&'static str> {
    vec![
        "Dr. Smith arrived|.",
        "Mr. Jones left early|.",
        "The well-known author arrived|.",
        "It costs 3.50 dollars|.",
        "Pi is about 3.14|.",
        "She lives in a two-story house|.",
        "Write to ana.silva@example.com today|.",
        "The site www.example.org is down|.",
        "We met at 10:30 in the morning|.",
        "Rock & roll never dies|.",
        "İstanbul'da yaşıyorum|.",
        "Ankara'ya gittim|.",
        "Prof. Yılmaz geldi|.",
        "The result was 2/3 of the total|.",
        "C++ and C# are languages|.",
        "A state-of-the-art method works|.",
        "Mrs. Brown bought a well-made chair|.",
        "Dr. Who is back|.",
    ]
}
