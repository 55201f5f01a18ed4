//! # Artefato do Modelo
//!
//! O modelo treinado é apenas a [`WeightTable`] média. O formato padrão em disco
//! é um objeto JSON plano (feature -> peso). Quem carrega um modelo
//! explicitamente recebe o erro em caso de falha: nunca há recuo silencioso
//! para um classificador vazio.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::perceptron::WeightTable;

pub fn load_weights<R: Read>(reader: R) -> Result<WeightTable> {
    let table: WeightTable = serde_json::from_reader(reader)?;
    Ok(table)
}

pub fn load_weights_from_path(path: impl AsRef<Path>) -> Result<WeightTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = load_weights(BufReader::new(file))?;
    debug!(path = %path.display(), features = table.len(), "modelo carregado");
    Ok(table)
}

pub fn save_weights<W: Write>(writer: W, table: &WeightTable) -> Result<()> {
    serde_json::to_writer(writer, table)?;
    Ok(())
}

pub fn save_weights_to_path(path: impl AsRef<Path>, table: &WeightTable) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    save_weights(&mut writer, table)?;
    writer.flush()?;
    debug!(path = %path.display(), features = table.len(), "modelo salvo");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenizerError;

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let table: WeightTable = vec![
            ("next_char=_".to_string(), 0.75),
            ("prev2=Dr".to_string(), -2.0),
        ]
        .into_iter()
        .collect();

        save_weights_to_path(&path, &table).unwrap();
        let loaded = load_weights_from_path(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        let table: WeightTable = vec![
            ("next_char=_".to_string(), 1.8465116279069766),
            ("prev_char=d".to_string(), 0.9906976744186047),
            ("prev2=Dr".to_string(), -1.0 / 3.0),
            ("next2=kn".to_string(), 0.1 + 0.2),
        ]
        .into_iter()
        .collect();

        let mut buffer = Vec::new();
        save_weights(&mut buffer, &table).unwrap();
        let loaded = load_weights(buffer.as_slice()).unwrap();

        assert_eq!(loaded.len(), table.len());
        for (feature, weight) in table.iter() {
            assert_eq!(loaded.get(feature).to_bits(), weight.to_bits(), "{feature}");
        }
    }

    #[test]
    fn test_zero_weights_are_dropped_on_load() {
        let loaded = load_weights(r#"{"f": 0.0, "g": 1.5, "h": -0.0}"#.as_bytes()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded.contains("f"));
        assert!(!loaded.contains("h"));
        assert_eq!(loaded.get("g"), 1.5);
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let err = load_weights_from_path("/no/such/model.json").unwrap_err();
        assert!(matches!(err, TokenizerError::Io(_)));
    }

    #[test]
    fn test_corrupt_model_is_fatal() {
        let err = load_weights("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, TokenizerError::ModelFormat(_)));
        let err = load_weights(r#"{"f": "x"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, TokenizerError::ModelFormat(_)));
    }
}
