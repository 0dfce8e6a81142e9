// ==========================================
// 记录审核状态组件 - 操作人上下文
// ==========================================
// 职责: 显式传入的请求级操作人,替代全局“当前用户”
// ==========================================

use crate::domain::types::ActorId;
use serde::{Deserialize, Serialize};

/// 请求级操作人上下文
///
/// 由调用方 (会话/身份系统) 构造并显式传入,组件内不读取任何全局状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorContext {
    #[default]
    Anonymous,    // 无操作人 (后台任务等)
    Guest,        // 访客,不是身份
    User(ActorId), // 已认证用户
}

impl ActorContext {
    /// 已认证用户
    pub fn user(id: i64) -> Self {
        ActorContext::User(ActorId(id))
    }

    /// 审计使用的身份: 仅已认证用户返回 Some
    pub fn identity(&self) -> Option<ActorId> {
        match self {
            ActorContext::User(id) => Some(*id),
            ActorContext::Anonymous | ActorContext::Guest => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, ActorContext::Guest)
    }
}
