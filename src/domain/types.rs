// ==========================================
// 记录审核状态组件 - 领域类型定义
// ==========================================
// 职责: 审核状态码注册表、审核人标识
// 红线: 只允许 0..=3 四个状态码,其余存储值一律视为数据完整性错误
// ==========================================

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// 审核状态 (Moderation Status)
// ==========================================
// 无状态转换图: 任意状态可直接转到任意状态(允许重复审核)
// 序列化格式: 整数状态码 (与数据库一致)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ModerationStatus {
    #[default]
    Pending,   // 待审核
    Approved,  // 已通过
    Rejected,  // 已拒绝
    Postponed, // 已推迟
}

/// 非法状态码
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("非法的审核状态码: {0}")]
pub struct InvalidStatusCode(pub String);

impl ModerationStatus {
    /// 全部合法状态 (按状态码升序)
    pub const ALL: [ModerationStatus; 4] = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
        ModerationStatus::Postponed,
    ];

    /// 数据库存储的状态码
    pub fn code(self) -> i64 {
        match self {
            ModerationStatus::Pending => 0,
            ModerationStatus::Approved => 1,
            ModerationStatus::Rejected => 2,
            ModerationStatus::Postponed => 3,
        }
    }

    /// 规范显示名 (与语言无关)
    pub fn label(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "Pending",
            ModerationStatus::Approved => "Approved",
            ModerationStatus::Rejected => "Rejected",
            ModerationStatus::Postponed => "Postponed",
        }
    }

    /// 当前语言下的显示名 (仅用于展示)
    pub fn localized_label(self) -> String {
        crate::i18n::t(self.i18n_key())
    }

    pub(crate) fn i18n_key(self) -> &'static str {
        match self {
            ModerationStatus::Pending => "moderation.status.pending",
            ModerationStatus::Approved => "moderation.status.approved",
            ModerationStatus::Rejected => "moderation.status.rejected",
            ModerationStatus::Postponed => "moderation.status.postponed",
        }
    }

    /// 宽松解析: 接受数字字符串 (如 TEXT 列中的 "1")
    ///
    /// 与整数形式按值比较,"1" 与 1 视为同一状态。
    pub fn parse_loose(raw: &str) -> Result<Self, InvalidStatusCode> {
        let code: i64 = raw
            .trim()
            .parse()
            .map_err(|_| InvalidStatusCode(raw.to_string()))?;
        Self::try_from(code)
    }
}

impl TryFrom<i64> for ModerationStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ModerationStatus::Pending),
            1 => Ok(ModerationStatus::Approved),
            2 => Ok(ModerationStatus::Rejected),
            3 => Ok(ModerationStatus::Postponed),
            other => Err(InvalidStatusCode(other.to_string())),
        }
    }
}

impl From<ModerationStatus> for i64 {
    fn from(status: ModerationStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ToSql for ModerationStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for ModerationStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(code) => {
                ModerationStatus::try_from(code).map_err(|_| FromSqlError::OutOfRange(code))
            }
            // SQLite 动态类型: 数字字符串按值比较
            ValueRef::Text(bytes) => {
                let raw = std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                ModerationStatus::parse_loose(raw).map_err(|e| FromSqlError::Other(Box::new(e)))
            }
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// 列出全部状态及规范显示名
pub fn status_labels() -> Vec<(ModerationStatus, &'static str)> {
    ModerationStatus::ALL
        .iter()
        .map(|s| (*s, s.label()))
        .collect()
}

/// 列出全部状态及当前语言显示名
pub fn localized_status_labels() -> Vec<(ModerationStatus, String)> {
    ModerationStatus::ALL
        .iter()
        .map(|s| (*s, s.localized_label()))
        .collect()
}

// ==========================================
// 审核人标识 (Actor Id)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub i64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for ActorId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for ActorId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(ActorId)
    }
}
