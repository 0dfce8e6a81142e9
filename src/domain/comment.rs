// ==========================================
// 记录审核状态组件 - 评论实体
// ==========================================
// 用途: 挂载审核状态的示例记录类型
// 对齐: comment 表 (status/moderated_by 列名可配置)
// ==========================================

use crate::domain::moderatable::Moderatable;
use crate::domain::types::{ActorId, ModerationStatus};
use serde::{Deserialize, Serialize};

/// 评论记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<i64>,               // 主键 (未插入时为 None)
    pub author: String,                // 作者
    pub body: String,                  // 正文
    pub status: ModerationStatus,      // 审核状态
    pub moderated_by: Option<ActorId>, // 最近保存人
}

impl Comment {
    pub const RECORD_TYPE: &'static str = "comment";

    /// 新建待审核评论
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            author: author.into(),
            body: body.into(),
            status: ModerationStatus::Pending,
            moderated_by: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl Moderatable for Comment {
    fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn moderation_status(&self) -> ModerationStatus {
        self.status
    }

    fn set_moderation_status(&mut self, status: ModerationStatus) {
        self.status = status;
    }

    fn moderated_by(&self) -> Option<ActorId> {
        self.moderated_by
    }

    fn set_moderated_by(&mut self, actor: Option<ActorId>) {
        self.moderated_by = actor;
    }
}
