// ==========================================
// 记录审核状态组件 - 审核字段配置
// ==========================================
// 职责: 每种记录类型的审核列名配置,注册时一次性校验
// 红线: 非法列名是装配期错误,不允许延迟到查询执行时才暴露
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认状态列名
pub const DEFAULT_STATUS_ATTRIBUTE: &str = "status";

/// 默认审核人列名
pub const DEFAULT_MODERATED_BY_ATTRIBUTE: &str = "moderated_by";

/// 标识符最大长度
const MAX_IDENTIFIER_LEN: usize = 64;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("非法的列名/表名 (field={field}): {value:?}")]
    InvalidIdentifier { field: String, value: String },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("配置读取失败: {0}")]
    Database(#[from] rusqlite::Error),
}

/// SQLite 关键字 (不加引号时不能作为表名/列名)
const SQLITE_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// 是否为 SQLite 关键字 (不区分大小写)
fn is_sqlite_keyword(value: &str) -> bool {
    SQLITE_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(value))
}

/// 校验 SQL 标识符
///
/// 仅允许字母/数字/下划线,不以数字开头,且不能是 SQLite 关键字
pub fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && !is_sqlite_keyword(value)
        && value.len() <= MAX_IDENTIFIER_LEN
        && value
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false)
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

// ==========================================
// ModerationConfig - 审核字段配置
// ==========================================
// 只能通过 builder / from_json 构造,保证列名已校验
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationConfig {
    status_attribute: String,
    moderated_by_attribute: Option<String>, // None 表示关闭审核人审计
}

impl ModerationConfig {
    pub fn builder() -> ModerationConfigBuilder {
        ModerationConfigBuilder::default()
    }

    /// 状态列名
    pub fn status_attribute(&self) -> &str {
        &self.status_attribute
    }

    /// 审核人列名 (关闭审计时为 None)
    pub fn moderated_by_attribute(&self) -> Option<&str> {
        self.moderated_by_attribute.as_deref()
    }

    /// 是否开启审核人审计
    pub fn audit_enabled(&self) -> bool {
        self.moderated_by_attribute.is_some()
    }

    /// 从 JSON 解析并校验
    ///
    /// # 示例
    /// ```
    /// use record_moderation::config::ModerationConfig;
    ///
    /// let cfg = ModerationConfig::from_json(r#"{"status_attribute":"state","moderated_by_attribute":null}"#).unwrap();
    /// assert_eq!(cfg.status_attribute(), "state");
    /// assert!(!cfg.audit_enabled());
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: RawModerationConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let mut builder = ModerationConfig::builder().status_attribute(parsed.status_attribute);
        builder = match parsed.moderated_by_attribute {
            Some(name) => builder.moderated_by_attribute(name),
            None => builder.disable_audit(),
        };
        builder.build()
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            status_attribute: DEFAULT_STATUS_ATTRIBUTE.to_string(),
            moderated_by_attribute: Some(DEFAULT_MODERATED_BY_ATTRIBUTE.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawModerationConfig {
    #[serde(default = "default_status_attribute")]
    status_attribute: String,
    #[serde(default = "default_moderated_by_attribute")]
    moderated_by_attribute: Option<String>,
}

fn default_status_attribute() -> String {
    DEFAULT_STATUS_ATTRIBUTE.to_string()
}

fn default_moderated_by_attribute() -> Option<String> {
    Some(DEFAULT_MODERATED_BY_ATTRIBUTE.to_string())
}

// ==========================================
// ModerationConfigBuilder
// ==========================================
#[derive(Debug, Clone)]
pub struct ModerationConfigBuilder {
    status_attribute: String,
    moderated_by_attribute: Option<String>,
}

impl Default for ModerationConfigBuilder {
    fn default() -> Self {
        Self {
            status_attribute: DEFAULT_STATUS_ATTRIBUTE.to_string(),
            moderated_by_attribute: Some(DEFAULT_MODERATED_BY_ATTRIBUTE.to_string()),
        }
    }
}

impl ModerationConfigBuilder {
    pub fn status_attribute(mut self, name: impl Into<String>) -> Self {
        self.status_attribute = name.into();
        self
    }

    pub fn moderated_by_attribute(mut self, name: impl Into<String>) -> Self {
        self.moderated_by_attribute = Some(name.into());
        self
    }

    /// 关闭审核人审计 (保存时不再改写审核人列)
    pub fn disable_audit(mut self) -> Self {
        self.moderated_by_attribute = None;
        self
    }

    pub fn build(self) -> Result<ModerationConfig, ConfigError> {
        validate_identifier("status_attribute", &self.status_attribute)?;
        if let Some(name) = &self.moderated_by_attribute {
            validate_identifier("moderated_by_attribute", name)?;
            if name == &self.status_attribute {
                return Err(ConfigError::InvalidIdentifier {
                    field: "moderated_by_attribute".to_string(),
                    value: name.clone(),
                });
            }
        }

        Ok(ModerationConfig {
            status_attribute: self.status_attribute,
            moderated_by_attribute: self.moderated_by_attribute,
        })
    }
}
