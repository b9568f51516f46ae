//! Task - コントロールパネルが保持する唯一のドメインエンティティ
//!
//! Task は「いつ・何を」実行するかを記述するレコードです。
//! 実行そのものは外部のエージェントが担当し、ここでは保存するだけです。
//!
//! # JSON 形式
//! ```json
//! {
//!   "id": "t1",
//!   "name": "ping",
//!   "schedule": "09:30",
//!   "type": "http_check",
//!   "payload": "https://example.com",
//!   "config": { "remote_url": "...", "auth_token": "..." }
//! }
//! ```
//! - `payload` / `config` は値がないとき出力しない
//! - 欠けている、または `null` の文字列フィールドは空文字として読み込む
//! - Go クライアントがタグなしで出すキー（`ID`, `RemoteURL` など）も受け付ける

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskType(String);

impl TaskType {
    /// 設定更新タスクの慣習的な type 値。この型の Task は `config` を持つ。
    pub const UPDATE_CONFIG: &'static str = "update_config";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_update_config(&self) -> bool {
        self.0 == Self::UPDATE_CONFIG
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// `null` を既定値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `update_config` タスクが運ぶ接続設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default, alias = "RemoteURL", deserialize_with = "null_as_default")]
    pub remote_url: String,
    #[serde(default, alias = "AuthToken", deserialize_with = "null_as_default")]
    pub auth_token: String,
}

/// Task はスケジュールされた 1 件の作業
///
/// store は中身を解釈しない。`id` の一意性も、`type` と `config` の整合性も
/// 呼び出し側の責任。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, alias = "ID", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, alias = "Name", deserialize_with = "null_as_default")]
    pub name: String,
    /// "HH:MM" 形式の時刻（例: "09:30"）。store は検証しない。
    #[serde(default, alias = "Schedule", deserialize_with = "null_as_default")]
    pub schedule: String,
    #[serde(
        rename = "type",
        alias = "Type",
        default,
        deserialize_with = "null_as_default"
    )]
    pub task_type: TaskType,
    #[serde(default, alias = "Payload", skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, alias = "Config", skip_serializing_if = "Option::is_none")]
    pub config: Option<TaskConfig>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        schedule: impl Into<String>,
        task_type: impl Into<TaskType>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schedule: schedule.into(),
            task_type: task_type.into(),
            payload: None,
            config: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_config(mut self, config: TaskConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// `schedule` を時刻として解釈する。"HH:MM" でなければ None。
    ///
    /// 消費側（エージェント）向けの補助で、store 自体は使わない。
    pub fn schedule_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.schedule, "%H:%M").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let task = Task::new("t1", "ping", "09:30", "http_check");
        let value = serde_json::to_value(&task).unwrap();

        // payload / config は None のとき出力されない
        assert_eq!(
            value,
            json!({
                "id": "t1",
                "name": "ping",
                "schedule": "09:30",
                "type": "http_check",
            })
        );
    }

    #[test]
    fn update_config_task_carries_config() {
        let raw = json!({
            "id": "cfg",
            "name": "switch upstream",
            "schedule": "03:00",
            "type": "update_config",
            "config": { "remote_url": "https://panel.example", "auth_token": "abc" }
        });

        let task: Task = serde_json::from_value(raw).unwrap();
        assert!(task.task_type.is_update_config());
        assert_eq!(
            task.config,
            Some(TaskConfig {
                remote_url: "https://panel.example".to_string(),
                auth_token: "abc".to_string(),
            })
        );
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let task: Task = serde_json::from_value(json!({ "id": "a" })).unwrap();
        assert_eq!(task.id, "a");
        assert_eq!(task.name, "");
        assert_eq!(task.task_type.as_str(), "");
        assert!(task.payload.is_none());
        assert!(task.config.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let task: Task = serde_json::from_value(json!({ "id": "a", "priority": 3 })).unwrap();
        assert_eq!(
            task,
            Task {
                id: "a".to_string(),
                ..Task::default()
            }
        );
    }

    #[rstest]
    #[case::id(json!({ "id": null }), "")]
    #[case::name(json!({ "id": "n", "name": null }), "n")]
    #[case::schedule(json!({ "id": "n", "schedule": null }), "n")]
    #[case::task_type(json!({ "id": "n", "type": null }), "n")]
    #[case::payload(json!({ "id": "n", "payload": null }), "n")]
    #[case::config(json!({ "id": "n", "config": null }), "n")]
    #[case::config_url(json!({ "id": "n", "config": { "remote_url": null } }), "n")]
    #[case::config_token(json!({ "id": "n", "config": { "auth_token": null } }), "n")]
    fn null_fields_read_as_empty(#[case] raw: serde_json::Value, #[case] id: &str) {
        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(task.id, id);
        assert!(task.name.is_empty());
        assert!(task.schedule.is_empty());
        assert!(task.task_type.as_str().is_empty());
        assert!(task.payload.is_none());
        if let Some(config) = task.config {
            assert_eq!(config, TaskConfig::default());
        }
    }

    #[test]
    fn accepts_untagged_go_field_names() {
        let raw = json!({
            "ID": "x",
            "Name": "switch",
            "Schedule": "03:00",
            "Type": "update_config",
            "Payload": "p",
            "Config": { "RemoteURL": "https://panel.example", "AuthToken": "abc" }
        });

        let task: Task = serde_json::from_value(raw).unwrap();
        assert_eq!(
            task,
            Task::new("x", "switch", "03:00", "update_config")
                .with_payload("p")
                .with_config(TaskConfig {
                    remote_url: "https://panel.example".to_string(),
                    auth_token: "abc".to_string(),
                })
        );
        // 出力は常に小文字のキー
        assert_eq!(serde_json::to_value(&task).unwrap()["id"], "x");
    }

    #[rstest]
    #[case::morning("09:30", Some((9, 30)))]
    #[case::midnight("00:00", Some((0, 0)))]
    #[case::late("23:59", Some((23, 59)))]
    #[case::out_of_range("24:00", None)]
    #[case::seconds("09:30:15", None)]
    #[case::empty("", None)]
    fn schedule_time_parses_hh_mm(#[case] schedule: &str, #[case] expected: Option<(u32, u32)>) {
        let task = Task::new("t", "n", schedule, "noop");
        let expected = expected.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap());
        assert_eq!(task.schedule_time(), expected);
    }
}
