// ==========================================
// 记录审核状态组件 - 审核日志领域模型
// ==========================================
// 用途: 审计追踪,记录每一次已持久化的审核操作
// 对齐: moderation_log 表
// ==========================================

use crate::domain::types::{ActorId, ModerationStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// ModerationLog - 审核日志
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationLog {
    pub log_id: Option<i64>,            // 日志ID (自增)
    pub record_type: String,            // 记录类型
    pub record_id: i64,                 // 记录主键
    pub previous_status: ModerationStatus, // 操作前状态
    pub status: ModerationStatus,       // 操作后状态
    pub actor_id: Option<ActorId>,      // 操作人 (访客/匿名为 None)
    pub logged_at: NaiveDateTime,       // 操作时间
}
