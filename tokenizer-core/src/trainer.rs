//! # Treinador de Fronteiras
//!
//! Treina o [`AveragedPerceptron`] de forma online sobre um corpus anotado com
//! marcadores `|` (veja [`crate::corpus`]).
//!
//! Para cada época:
//! 1. Embaralha as sentenças, se configurado.
//! 2. Para cada caractere de decisão de cada sentença, extrai as features,
//!    calcula o score e incrementa o contador global de passos.
//! 3. Se errou (score <= 0 em fronteira, ou score > 0 fora de fronteira),
//!    aplica `+1` ou `-1` a todas as features.
//!
//! No fim, os pesos são convertidos na média temporal e entregues a um
//! [`Segmenter`].
//!
//! O treino é sequencial por natureza: cada passo depende dos pesos deixados
//! pelo anterior. Execuções independentes (ex: busca de hiperparâmetros) podem
//! rodar em paralelo com [`train_many`].

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::char_class::CharClassTables;
use crate::corpus::{self, AnnotatedSentence};
use crate::error::Result;
use crate::features::extract_boundary_features;
use crate::perceptron::{is_boundary, AveragedPerceptron};
use crate::tokenizer::Segmenter;

/// Configuração de uma execução de treino.
///
/// Os campos `skip_space_frequency` e `lower_case_first_letter_frequency` estão
/// reservados para injeção de ruído (remover espaços, baixar a primeira letra)
/// e ainda não alteram o treino.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Número de épocas.
    pub iteration_count: usize,
    /// Embaralha as sentenças a cada época.
    pub shuffle_input: bool,
    /// Semente do embaralhamento; `None` usa entropia do sistema.
    pub seed: Option<u64>,
    pub skip_space_frequency: u32,
    pub lower_case_first_letter_frequency: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            iteration_count: 5,
            shuffle_input: false,
            seed: None,
            skip_space_frequency: 20,
            lower_case_first_letter_frequency: 20,
        }
    }
}

impl TrainerConfig {
    pub fn iteration_count(mut self, count: usize) -> Self {
        self.iteration_count = count;
        self
    }

    pub fn shuffle_sentences(mut self) -> Self {
        self.shuffle_input = true;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn skip_space_frequency(mut self, frequency: u32) -> Self {
        self.skip_space_frequency = frequency;
        self
    }

    pub fn lower_case_first_letter_frequency(mut self, frequency: u32) -> Self {
        self.lower_case_first_letter_frequency = frequency;
        self
    }
}

/// Estatísticas de uma execução de treino.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Épocas executadas.
    pub epochs: usize,
    /// Total de passos (caracteres de decisão avaliados, todas as épocas).
    pub update_count: u64,
    /// Erros (atualizações aplicadas) por época.
    pub mistakes_per_epoch: Vec<usize>,
    /// Sentenças válidas no corpus.
    pub sentences: usize,
    /// Linhas descartadas por marcação inválida.
    pub skipped_lines: usize,
    /// Features com peso não nulo no modelo final.
    pub features: usize,
}

/// Orquestra o treino do classificador de fronteiras.
#[derive(Debug, Clone, Default)]
pub struct BoundaryTrainer {
    config: TrainerConfig,
}

impl BoundaryTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Lê o corpus de `path` e treina.
    pub fn train_file(&self, path: impl AsRef<Path>) -> Result<Segmenter> {
        let lines = corpus::load_lines_with_text(path)?;
        Ok(self.train(&lines))
    }

    pub fn train<S: AsRef<str>>(&self, lines: &[S]) -> Segmenter {
        self.train_with_report(lines).0
    }

    /// Treina sobre as linhas anotadas e devolve o segmentador e o relatório.
    ///
    /// Linhas em branco são ignoradas; linhas mal anotadas geram um aviso e
    /// são descartadas. Um corpus sem sentenças válidas produz um modelo vazio.
    pub fn train_with_report<S: AsRef<str>>(&self, lines: &[S]) -> (Segmenter, TrainingReport) {
        let mut report = TrainingReport::default();
        let mut sentences: Vec<Vec<char>> = Vec::new();
        let mut gold: Vec<AnnotatedSentence> = Vec::new();

        for parsed in corpus::parse_lines(lines.iter().map(|line| line.as_ref())) {
            match parsed {
                Ok(sentence) => {
                    sentences.push(sentence.text.chars().collect());
                    gold.push(sentence);
                }
                Err(err) => {
                    warn!("linha de treino ignorada: {err}");
                    report.skipped_lines += 1;
                }
            }
        }
        report.sentences = gold.len();

        let tables = CharClassTables::global();
        let mut perceptron = AveragedPerceptron::new();
        let mut order: Vec<usize> = (0..gold.len()).collect();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut update_count: u64 = 0;

        for epoch in 0..self.config.iteration_count {
            if self.config.shuffle_input {
                order.shuffle(&mut rng);
            }

            let mut mistakes = 0;
            for &i in &order {
                let chars = &sentences[i];
                let sentence = &gold[i];
                for (j, &c) in chars.iter().enumerate() {
                    if !tables.is_boundary_decision(c) {
                        continue;
                    }
                    let features = extract_boundary_features(chars, j);
                    let predicted = is_boundary(perceptron.score(&features));
                    let expected = sentence.is_boundary(j);
                    update_count += 1;

                    let delta = match (predicted, expected) {
                        (false, true) => 1.0,
                        (true, false) => -1.0,
                        _ => continue,
                    };
                    perceptron.update(&features, delta, update_count);
                    mistakes += 1;
                }
            }

            info!(
                "época {}/{}: {} erros, {} passos",
                epoch + 1,
                self.config.iteration_count,
                mistakes,
                update_count
            );
            report.mistakes_per_epoch.push(mistakes);
        }

        let weights = perceptron.finalize(update_count);
        report.epochs = self.config.iteration_count;
        report.update_count = update_count;
        report.features = weights.len();

        (Segmenter::new(weights), report)
    }
}

/// Executa uma rodada de treino independente por configuração, em paralelo.
///
/// Cada rodada tem seu próprio estado mutável; a ordem do resultado segue a de
/// `configs`.
pub fn train_many<S>(lines: &[S], configs: &[TrainerConfig]) -> Vec<(Segmenter, TrainingReport)>
where
    S: AsRef<str> + Sync,
{
    configs
        .par_iter()
        .map(|config| BoundaryTrainer::new(config.clone()).train_with_report(lines))
        .collect()
}
