//! ServerConfig - 起動時に固定されるサーバー設定

use std::path::PathBuf;

use crate::impls::JsonFilePersistence;

/// 置き換え前提のプレースホルダー token
pub const DEFAULT_TOKEN: &str = "secret123";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 待ち受けるアドレス（既定は全インターフェース）
    pub host: String,
    pub port: u16,
    /// `Authorization: Bearer <token>` で要求する共有シークレット
    pub token: String,
    /// タスク一覧を保存する JSON ファイル
    pub tasks_file: PathBuf,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_token(&self) -> bool {
        self.token == DEFAULT_TOKEN
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            token: DEFAULT_TOKEN.to_string(),
            tasks_file: PathBuf::from(JsonFilePersistence::DEFAULT_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.uses_default_token());
        assert_eq!(config.tasks_file, PathBuf::from("tasks.json"));
    }
}
