use crate::types::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;

/// ファイルパスからBufReaderを作成する
/// パースやデータ変換は呼び出し側で行う
pub fn load_file(file_path: &str) -> ConfigResult<BufReader<File>> {
    let file =
        File::open(file_path).map_err(|e| ConfigError::missing_config_file(file_path, e))?;
    Ok(BufReader::new(file))
}

/// YAMLファイルからSerdeでDeserializeできる型を読み込む
pub fn load_yaml_from_file<T: DeserializeOwned>(file_path: &str) -> ConfigResult<T> {
    let buf_reader = load_file(file_path)?;
    serde_yaml::from_reader(buf_reader)
        .map_err(|e| ConfigError::invalid_config_file(file_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme: dark\nlang: ja").unwrap();

        let path = file.path().to_str().unwrap();
        let map: BTreeMap<String, String> = load_yaml_from_file(path).unwrap();
        assert_eq!(map.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_load_non_existing_file() {
        // 存在しないファイルでエラーになることを確認
        let result = load_file("non_existent_file.yaml");
        assert!(
            matches!(result, Err(ConfigError::MissingConfigFile { .. })),
            "存在しないファイルでエラーにならなかった"
        );
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- just\n- a list").unwrap();

        let path = file.path().to_str().unwrap();
        let result: ConfigResult<BTreeMap<String, String>> = load_yaml_from_file(path);
        assert!(matches!(result, Err(ConfigError::InvalidConfigFile { .. })));
    }
}
