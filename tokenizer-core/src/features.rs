//! # Features de Fronteira
//!
//! Para cada pontuação ambígua o classificador recebe um pequeno conjunto de
//! features textuais descrevendo a vizinhança imediata do caractere.
//!
//! ## Features Implementadas
//!
//! Dado o caractere na posição `p`:
//!
//! | Feature        | Valor                                        |
//! |----------------|----------------------------------------------|
//! | `prev_upper=`  | caractere anterior é maiúsculo               |
//! | `next_space=`  | caractere seguinte é espaço em branco        |
//! | `prev_char=`   | caractere anterior (`_` no início)           |
//! | `next_char=`   | caractere seguinte (`_` no fim)              |
//! | `prev2=`       | dois caracteres anteriores (`__` se `p <= 2`) |
//! | `next2=`       | dois caracteres seguintes (`__` se faltarem)  |
//!
//! Cada feature tem um prefixo próprio, então valores iguais em posições
//! diferentes nunca colidem na tabela de pesos.

use serde::{Deserialize, Serialize};

/// Marcador usado quando a janela sai do texto.
pub const SENTINEL: char = '_';
const SENTINEL_PAIR: &str = "__";

/// Conjunto ordenado de features extraído em uma posição candidata.
///
/// A ordem não influencia o score (é uma soma), mas é estável para que o
/// treino seja reproduzível.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Features na ordem de extração.
    pub features: Vec<String>,
    /// Posição (em caracteres) do caractere avaliado.
    pub position: usize,
}

impl FeatureSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Extrai as seis features de fronteira para `chars[position]`.
///
/// `chars` é o texto já decomposto em caracteres; as posições são índices de
/// caractere, não de byte.
pub fn extract_boundary_features(chars: &[char], position: usize) -> FeatureSet {
    let len = chars.len();

    let previous = if position > 0 { chars[position - 1] } else { SENTINEL };
    let next = if position + 1 < len { chars[position + 1] } else { SENTINEL };

    let previous_two: String = if position > 2 {
        chars[position - 2..position].iter().collect()
    } else {
        SENTINEL_PAIR.to_string()
    };
    // Basta haver dois caracteres depois de `position`. Modelos treinados com a
    // condição mais estrita `position + 3 < len` não são compatíveis.
    let next_two: String = if position + 3 <= len {
        chars[position + 1..position + 3].iter().collect()
    } else {
        SENTINEL_PAIR.to_string()
    };

    FeatureSet {
        features: vec![
            format!("prev_upper={}", previous.is_uppercase()),
            format!("next_space={}", next.is_whitespace()),
            format!("prev_char={previous}"),
            format!("next_char={next}"),
            format!("prev2={previous_two}"),
            format!("next2={next_two}"),
        ],
        position,
    }
}
