//! # Averaged Perceptron para Fronteiras
//!
//! Classificador binário online: para cada pontuação ambígua decide se há
//! fronteira de token (`score > 0`) ou não (`score <= 0`).
//!
//! Os pesos ficam em um mapa esparso feature -> peso. Uma entrada cujo valor
//! chega exatamente a zero é removida, então ausência significa peso zero.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::features::FeatureSet;

/// Tabela esparsa de pesos (feature -> peso).
///
/// É também o formato lógico do artefato de modelo: serializa como um objeto
/// JSON plano `{"prev_char=r": -2.5, ...}`. Na leitura, entradas com peso 0
/// são descartadas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct WeightTable {
    weights: HashMap<String, f64>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peso da feature; ausente vale 0.
    pub fn get(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(0.0)
    }

    /// Soma `amount` ao peso e remove a entrada se o resultado for 0.
    /// Retorna o novo valor.
    pub fn increment(&mut self, feature: &str, amount: f64) -> f64 {
        let value = self.get(feature) + amount;
        if value == 0.0 {
            self.weights.remove(feature);
        } else {
            self.weights.insert(feature.to_string(), value);
        }
        value
    }

    /// Define o peso diretamente (0 remove a entrada).
    pub fn set(&mut self, feature: &str, value: f64) {
        if value == 0.0 {
            self.weights.remove(feature);
        } else {
            self.weights.insert(feature.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.weights.contains_key(feature)
    }

    /// Soma dos pesos das features (ordem irrelevante).
    pub fn score(&self, features: &FeatureSet) -> f64 {
        features.iter().map(|f| self.get(f)).sum()
    }
}

impl FromIterator<(String, f64)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = WeightTable::new();
        for (feature, weight) in iter {
            table.set(&feature, weight);
        }
        table
    }
}

impl From<HashMap<String, f64>> for WeightTable {
    fn from(weights: HashMap<String, f64>) -> Self {
        weights.into_iter().collect()
    }
}

impl From<WeightTable> for HashMap<String, f64> {
    fn from(table: WeightTable) -> Self {
        table.weights
    }
}

/// Regra de decisão usada no treino e na inferência.
pub fn is_boundary(score: f64) -> bool {
    score > 0.0
}

/// Modelo Perceptron Médio em treino.
///
/// # Averaged Perceptron
/// Os pesos brutos de um perceptron oscilam a cada erro. A versão "média" usa
/// a média temporal dos pesos ao longo de todos os passos, o que estabiliza o
/// classificador final.
///
/// A média é mantida sem custo por passo: cada atualização de `delta` no passo
/// `t` acumula `delta * t` em `averages`. No fim, o peso médio é
/// $w - \frac{acc}{T}$, onde $T$ é o total de passos.
#[derive(Debug, Clone, Default)]
pub struct AveragedPerceptron {
    /// Pesos atuais $w$.
    weights: WeightTable,
    /// Acumulador $\sum delta \cdot t$.
    averages: WeightTable,
}

impl AveragedPerceptron {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, features: &FeatureSet) -> f64 {
        self.weights.score(features)
    }

    pub fn predict(&self, features: &FeatureSet) -> bool {
        is_boundary(self.score(features))
    }

    /// Aplica `delta` a todas as features, registrando o passo `update_count`
    /// no acumulador da média.
    pub fn update(&mut self, features: &FeatureSet, delta: f64, update_count: u64) {
        let weighted = delta * update_count as f64;
        for feature in features.iter() {
            self.weights.increment(feature, delta);
            self.averages.increment(feature, weighted);
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn averages(&self) -> &WeightTable {
        &self.averages
    }

    /// Converte os pesos brutos na tabela média final.
    ///
    /// Só as features presentes em `weights` sobrevivem; com `total_updates`
    /// igual a zero nenhum passo foi dado e a tabela (vazia) volta intacta.
    pub fn finalize(self, total_updates: u64) -> WeightTable {
        if total_updates == 0 {
            return self.weights;
        }
        let total = total_updates as f64;
        let averages = self.averages;
        self.weights
            .weights
            .into_iter()
            .map(|(feature, weight)| {
                let averaged = weight - averages.get(&feature) / total;
                (feature, averaged)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs(features: &[&str]) -> FeatureSet {
        FeatureSet {
            features: features.iter().map(|f| f.to_string()).collect(),
            position: 0,
        }
    }

    #[test]
    fn test_score_missing_features_is_zero() {
        let p = AveragedPerceptron::new();
        assert_eq!(p.score(&fs(&["a", "b"])), 0.0);
        assert!(!p.predict(&fs(&["a"])));
    }

    #[test]
    fn test_update_and_zero_removal() {
        let mut p = AveragedPerceptron::new();
        let features = fs(&["a", "b"]);
        p.update(&features, 1.0, 1);
        assert_eq!(p.score(&features), 2.0);
        assert_eq!(p.averages().get("a"), 1.0);

        p.update(&features, -1.0, 1);
        assert!(p.weights().is_empty());
        assert!(p.averages().is_empty());
    }

    #[test]
    fn test_no_zero_entries_after_updates() {
        let mut p = AveragedPerceptron::new();
        let steps = [(1.0, 1), (-1.0, 2), (1.0, 3), (1.0, 4), (-1.0, 5), (-1.0, 7)];
        for (delta, t) in steps {
            p.update(&fs(&["x", "y"]), delta, t);
            assert!(p.weights().iter().all(|(_, w)| w != 0.0));
            assert!(p.averages().iter().all(|(_, a)| a != 0.0));
        }
    }

    #[test]
    fn test_finalize_averaging() {
        // +1 no passo 1 e nada depois, total 4 passos: peso médio 1 - 1/4
        let mut p = AveragedPerceptron::new();
        p.update(&fs(&["f"]), 1.0, 1);
        let table = p.finalize(4);
        assert!((table.get("f") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_finalize_drops_features_absent_from_weights() {
        let mut p = AveragedPerceptron::new();
        p.update(&fs(&["f"]), 1.0, 1);
        p.update(&fs(&["f"]), -1.0, 3);
        // peso final 0 (removido) mas o acumulador guarda -2
        assert!(p.averages().contains("f"));
        let table = p.finalize(3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_finalize_without_updates() {
        let table = AveragedPerceptron::new().finalize(0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_weight_table_serde() {
        let table: WeightTable = vec![("prev_char=r".to_string(), -1.5)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"prev_char=r":-1.5}"#);
        let back: WeightTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
