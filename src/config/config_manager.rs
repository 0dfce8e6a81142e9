// ==========================================
// 记录审核状态组件 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表加载各记录类型的审核字段覆写
// 存储: config_kv 表 (key-value, scope_id='global')
// ==========================================

use crate::config::moderation_config::{ConfigError, ModerationConfig};
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 状态列名: moderation/{record_type}/status_attribute
    pub const STATUS_ATTRIBUTE: &str = "status_attribute";
    /// 审核人列名: moderation/{record_type}/moderated_by_attribute
    pub const MODERATED_BY_ATTRIBUTE: &str = "moderated_by_attribute";

    /// 审核人列关闭标记
    pub const DISABLED: &str = "disabled";

    /// 拼接记录类型作用域下的配置键
    pub fn moderation_key(record_type: &str, key: &str) -> String {
        format!("moderation/{}/{}", record_type, key)
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 打开数据库文件创建 ConfigManager
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }

        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn ensure_table(&self) -> Result<(), ConfigError> {
        let conn = self.lock()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ConfigError> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值 (存在则覆盖)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 加载记录类型的审核字段配置
    ///
    /// # 规则
    /// - 未配置的键使用默认值 (status / moderated_by)
    /// - moderated_by_attribute 为空串或 "disabled" 时关闭审核人审计
    /// - 列名非法时返回 ConfigError::InvalidIdentifier
    pub fn load_moderation_config(&self, record_type: &str) -> Result<ModerationConfig, ConfigError> {
        let status_key = config_keys::moderation_key(record_type, config_keys::STATUS_ATTRIBUTE);
        let moderated_by_key =
            config_keys::moderation_key(record_type, config_keys::MODERATED_BY_ATTRIBUTE);

        let mut builder = ModerationConfig::builder();

        if let Some(status) = self.get_global_config_value(&status_key)? {
            builder = builder.status_attribute(status.trim());
        }

        if let Some(moderated_by) = self.get_global_config_value(&moderated_by_key)? {
            let moderated_by = moderated_by.trim();
            builder = if moderated_by.is_empty()
                || moderated_by.eq_ignore_ascii_case(config_keys::DISABLED)
            {
                builder.disable_audit()
            } else {
                builder.moderated_by_attribute(moderated_by)
            };
        }

        let config = builder.build()?;
        tracing::debug!(
            record_type,
            status_attribute = config.status_attribute(),
            moderated_by_attribute = ?config.moderated_by_attribute(),
            "审核字段配置已加载"
        );
        Ok(config)
    }
}
