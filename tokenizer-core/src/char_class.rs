//! # Tabelas de Classes de Caracteres
//!
//! Cada caractere do texto cai em uma de três classes:
//!
//! - **AlwaysOwnToken**: pontuação e símbolos que sempre formam um token de um
//!   caractere (`(`, `,`, `;`, `«`...).
//! - **BoundaryDecision**: pontuação ambígua (`'`, `+`, `-`, `.`, `/`, `:`, `@`, `&`).
//!   Se ela encerra ou não o token atual é decidido pelo Perceptron.
//! - **Ordinary**: todo o resto. Espaços em branco são tratados à parte pelo
//!   segmentador.
//!
//! As tabelas são vetores de bits indexados pelo codepoint, dimensionados pelo
//! maior caractere de cada conjunto. Codepoints fora do vetor são `Ordinary`.

use once_cell::sync::Lazy;

/// Pontuação ambígua que exige consulta ao classificador.
pub const BOUNDARY_DECISION_CHARS: &str = "'+-./:@&";

/// Símbolos que sempre viram tokens isolados.
///
/// A lista também contém `+ - . / : @`; como esses caracteres são de
/// decisão, eles são removidos na construção da tabela.
pub const SINGLE_TOKEN_CHARS: &str = "!\"#$%()*+,-./:;<=>?@[\\]^_{|}~¡¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾¿";

/// Classe de um caractere para o segmentador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    AlwaysOwnToken,
    BoundaryDecision,
    Ordinary,
}

/// Vetor de bits de tamanho fixo indexado por codepoint.
#[derive(Debug, Clone)]
pub struct CharBitSet {
    words: Vec<u64>,
    len: usize,
}

impl CharBitSet {
    /// Cria um vetor com `max(codepoint) + 1` bits e liga os bits de `chars`.
    pub fn from_chars(chars: impl IntoIterator<Item = char> + Clone) -> Self {
        let len = chars
            .clone()
            .into_iter()
            .map(|c| c as usize + 1)
            .max()
            .unwrap_or(0);
        let mut set = Self {
            words: vec![0; len.div_ceil(64)],
            len,
        };
        for c in chars {
            let i = c as usize;
            set.words[i / 64] |= 1u64 << (i % 64);
        }
        set
    }

    /// Quantidade de bits indexáveis.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, c: char) -> bool {
        let i = c as usize;
        i < self.len && self.words[i / 64] & (1u64 << (i % 64)) != 0
    }
}

/// As duas tabelas estáticas consultadas pelo segmentador e pelo treinador.
#[derive(Debug, Clone)]
pub struct CharClassTables {
    single_token: CharBitSet,
    boundary_decision: CharBitSet,
}

static TABLES: Lazy<CharClassTables> = Lazy::new(|| {
    CharClassTables::new(SINGLE_TOKEN_CHARS, BOUNDARY_DECISION_CHARS)
});

impl CharClassTables {
    /// Monta as tabelas. Caracteres presentes nos dois conjuntos ficam apenas
    /// na tabela de decisão.
    pub fn new(single_token_chars: &str, boundary_decision_chars: &str) -> Self {
        let single = single_token_chars
            .chars()
            .filter(|c| !boundary_decision_chars.contains(*c))
            .collect::<Vec<_>>();
        Self {
            single_token: CharBitSet::from_chars(single),
            boundary_decision: CharBitSet::from_chars(boundary_decision_chars.chars()),
        }
    }

    /// Tabelas padrão, inicializadas uma única vez por processo.
    pub fn global() -> &'static CharClassTables {
        &TABLES
    }

    pub fn class_of(&self, c: char) -> CharClass {
        if self.boundary_decision.contains(c) {
            CharClass::BoundaryDecision
        } else if self.single_token.contains(c) {
            CharClass::AlwaysOwnToken
        } else {
            CharClass::Ordinary
        }
    }

    pub fn is_boundary_decision(&self, c: char) -> bool {
        self.boundary_decision.contains(c)
    }

    pub fn is_single_token(&self, c: char) -> bool {
        self.single_token.contains(c)
    }
}

/// Atalho para `CharClassTables::global().class_of(c)`.
pub fn class_of(c: char) -> CharClass {
    CharClassTables::global().class_of(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_chars() {
        for c in BOUNDARY_DECISION_CHARS.chars() {
            assert_eq!(class_of(c), CharClass::BoundaryDecision, "{c:?}");
        }
    }

    #[test]
    fn test_single_token_chars() {
        for c in ['!', '(', ')', ',', ';', '?', '"', '«', '»', '¿', '|'] {
            assert_eq!(class_of(c), CharClass::AlwaysOwnToken, "{c:?}");
        }
    }

    #[test]
    fn test_sets_are_disjoint() {
        let tables = CharClassTables::global();
        for c in SINGLE_TOKEN_CHARS.chars() {
            assert!(!(tables.is_single_token(c) && tables.is_boundary_decision(c)));
        }
    }

    #[test]
    fn test_ordinary_and_out_of_range() {
        assert_eq!(class_of('a'), CharClass::Ordinary);
        assert_eq!(class_of('ş'), CharClass::Ordinary);
        assert_eq!(class_of('7'), CharClass::Ordinary);
        // Muito além do maior codepoint indexado
        assert_eq!(class_of('字'), CharClass::Ordinary);
        assert_eq!(class_of('😀'), CharClass::Ordinary);
    }

    #[test]
    fn test_bitset_len() {
        let set = CharBitSet::from_chars("ab".chars());
        assert_eq!(set.len(), 'b' as usize + 1);
        assert!(set.contains('a'));
        assert!(!set.contains('c'));
        assert!(CharBitSet::from_chars("".chars()).is_empty());
    }
}
