use tokenizer_core::features::extract_boundary_features;
use tokenizer_core::{corpus, model, BoundaryTrainer, Segmenter, TrainerConfig};

fn demo() -> (Segmenter, tokenizer_core::TrainingReport) {
    BoundaryTrainer::new(TrainerConfig::default()).train_with_report(&corpus::demo_corpus())
}

#[test]
fn test_demo_corpus_scenarios() {
    let (segmenter, _) = demo();

    assert_eq!(
        segmenter.tokenize("Dr. Smith arrived."),
        vec!["Dr.", "Smith", "arrived", "."]
    );
    assert_eq!(segmenter.tokenize("well-known"), vec!["well-known"]);
    assert_eq!(segmenter.tokenize("Pi is 3.14."), vec!["Pi", "is", "3.14", "."]);
    assert_eq!(
        segmenter.tokenize("İstanbul'da yaşıyorum."),
        vec!["İstanbul'da", "yaşıyorum", "."]
    );
    assert_eq!(
        segmenter.tokenize("Write to bob@example.com now."),
        vec!["Write", "to", "bob@example.com", "now", "."]
    );
    assert!(segmenter.tokenize("").is_empty());
}

#[test]
fn test_demo_corpus_converges() {
    let (segmenter, report) = demo();
    assert_eq!(report.sentences, 18);
    assert_eq!(report.skipped_lines, 0);
    assert_eq!(report.mistakes_per_epoch, vec![5, 0, 0, 0, 0]);
    assert_eq!(report.update_count, 215);
    assert_eq!(report.features, segmenter.weights().len());

    let accuracy = segmenter.evaluate(corpus::demo_corpus());
    assert_eq!(accuracy.total, 43);
    assert_eq!(accuracy.correct, 43);
}

#[test]
fn test_separable_feature_gets_positive_weight() {
    // "next_char=_" só aparece em fronteiras verdadeiras.
    let lines = vec!["ab|.", "cd-ef", "gh|.", "ij-kl", "mn|.", "op-qr"];
    let (segmenter, report) = BoundaryTrainer::new(TrainerConfig::default()).train_with_report(&lines);
    let weights = segmenter.weights();

    assert!(weights.get("next_char=_") > 0.0);
    assert!(weights.get("next_char=e") < 0.0);
    assert!(weights.iter().all(|(_, w)| w != 0.0));
    assert_eq!(*report.mistakes_per_epoch.last().unwrap(), 0);

    for line in ["cd-ef", "ij-kl", "op-qr"] {
        let chars: Vec<char> = line.chars().collect();
        let features = extract_boundary_features(&chars, 2);
        assert!(weights.score(&features) <= 0.0, "{line}");
    }
}

#[test]
fn test_resegmenting_joined_tokens_is_stable() {
    let (segmenter, _) = demo();
    for text in [
        "Dr. Smith arrived.",
        "The well-known Dr. Who left.",
        "Pi is 3.14 (roughly)!",
        "  Ankara'ya   gittim.",
    ] {
        let tokens = segmenter.tokenize(text);
        let joined = tokens.join(" ");
        assert_eq!(segmenter.tokenize(&joined), tokens, "{text}");
    }
}

#[test]
fn test_model_round_trip_preserves_behaviour() {
    let (segmenter, _) = demo();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boundary-model.json");
    model::save_weights_to_path(&path, segmenter.weights()).unwrap();

    let loaded = Segmenter::from_model_path(&path).unwrap();
    assert_eq!(loaded.weights(), segmenter.weights());
    assert_eq!(
        loaded.tokenize("The well-known Dr. Who left."),
        vec!["The", "well-known", "Dr.", "Who", "left", "."]
    );
}

#[test]
fn test_explicit_model_load_failure_is_an_error() {
    assert!(Segmenter::from_model_path("/no/such/model.json").is_err());
}

#[test]
fn test_train_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, corpus::demo_corpus().join("\n")).unwrap();

    let segmenter = tokenizer_core::train(&path, TrainerConfig::default()).unwrap();
    assert_eq!(segmenter.tokenize("Dr. Smith arrived."), vec!["Dr.", "Smith", "arrived", "."]);
}

#[test]
fn test_shared_segmenter_across_threads() {
    let (segmenter, _) = demo();
    let segmenter = std::sync::Arc::new(segmenter);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let segmenter = std::sync::Arc::clone(&segmenter);
            std::thread::spawn(move || segmenter.tokenize("well-known facts."))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["well-known", "facts", "."]);
    }
}
