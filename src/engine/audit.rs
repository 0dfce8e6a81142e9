// ==========================================
// 记录审核状态组件 - 审核人审计
// ==========================================
// 职责: 每次保存前写入“最近保存人”
// 规则: 已认证用户 → 其 ID;无操作人或访客 → None;审计关闭 → 不改动
// 说明: 任何保存都会重写 (包括普通字段编辑),记录的是最近保存人而非审批人
// ==========================================

use crate::config::ModerationConfig;
use crate::domain::{ActorContext, Moderatable};
use crate::repository::store::SaveHook;

/// 审核人审计钩子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamper {
    enabled: bool,
}

impl AuditStamper {
    /// 按记录类型配置创建 (审核人列关闭时为空操作)
    pub fn new(config: &ModerationConfig) -> Self {
        Self {
            enabled: config.audit_enabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 写入审核人
    pub fn stamp<E: Moderatable + ?Sized>(&self, entity: &mut E, actor: &ActorContext) {
        if !self.enabled {
            return;
        }

        let identity = actor.identity();
        tracing::trace!(
            record_type = entity.record_type(),
            record_id = ?entity.record_id(),
            moderated_by = ?identity,
            "写入审核人"
        );
        entity.set_moderated_by(identity);
    }
}

impl<E: Moderatable> SaveHook<E> for AuditStamper {
    fn before_insert(&self, entity: &mut E, actor: &ActorContext) {
        self.stamp(entity, actor);
    }

    fn before_update(&self, entity: &mut E, actor: &ActorContext) {
        self.stamp(entity, actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActorId, Comment};

    #[test]
    fn test_stamp_authenticated_user() {
        let stamper = AuditStamper::new(&ModerationConfig::default());
        let mut comment = Comment::new("alice", "hello");

        stamper.stamp(&mut comment, &ActorContext::user(7));
        assert_eq!(comment.moderated_by, Some(ActorId(7)));
    }

    #[test]
    fn test_stamp_guest_and_anonymous_clear_value() {
        let stamper = AuditStamper::new(&ModerationConfig::default());
        let mut comment = Comment::new("alice", "hello");
        comment.moderated_by = Some(ActorId(3));

        stamper.stamp(&mut comment, &ActorContext::Guest);
        assert_eq!(comment.moderated_by, None);

        comment.moderated_by = Some(ActorId(3));
        stamper.stamp(&mut comment, &ActorContext::Anonymous);
        assert_eq!(comment.moderated_by, None);
    }

    #[test]
    fn test_disabled_stamper_leaves_value() {
        let config = ModerationConfig::builder().disable_audit().build().unwrap();
        let stamper = AuditStamper::new(&config);
        assert!(!stamper.is_enabled());

        let mut comment = Comment::new("alice", "hello");
        comment.moderated_by = Some(ActorId(3));

        SaveHook::before_insert(&stamper, &mut comment, &ActorContext::user(9));
        SaveHook::before_update(&stamper, &mut comment, &ActorContext::Guest);
        assert_eq!(comment.moderated_by, Some(ActorId(3)));
    }
}
