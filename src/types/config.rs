use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数、設定ファイル、設定値の検証など設定に関するエラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },

    /// 設定ファイルが見つからない
    #[error("設定ファイルが見つかりません: {path} - {source}")]
    MissingConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 設定ファイルの形式が不正
    #[error("設定ファイルの解析に失敗: {path} - {source}")]
    InvalidConfigFile {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// 設定ファイル不足エラーを作成
    pub fn missing_config_file<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::MissingConfigFile {
            path: path.into(),
            source,
        }
    }

    /// 設定ファイル形式エラーを作成
    pub fn invalid_config_file<P: Into<String>>(path: P, source: serde_yaml::Error) -> Self {
        Self::InvalidConfigFile {
            path: path.into(),
            source,
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
