// ==========================================
// 记录审核状态组件 - 审核控制器
// ==========================================
// 职责: 状态变更、状态判断、审核前钩子、委托持久化
// 流程: 写入状态 → 实体级钩子 → 监听器 → 保存 → 审核后通知
// 红线: 无状态转换图,任意状态可直接转到任意状态
// 红线: 取消或保存失败都不回滚内存中的状态,调用方需视实体为脏
// ==========================================


use crate::domain::{ActorContext, Moderatable, ModerationStatus};
use crate::engine::events::{AfterModerationEvent, BeforeModerationEvent, ModerationListeners};
use crate::repository::error::RepositoryResult;
use crate::repository::store::ModeratedStore;
use serde::{Deserialize, Serialize};

/// 取消来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelledBy {
    EntityHook, // 实体级钩子返回 false
    Listener,   // 监听器否决
}

/// 审核操作结果
///
/// 持久化失败不在此列,作为 Err 原样返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "cancelled_by", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationOutcome {
    Persisted,
    Cancelled(CancelledBy),
}

impl ModerationOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, ModerationOutcome::Persisted)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ModerationOutcome::Cancelled(_))
    }
}

// ==========================================
// ModerationController - 审核控制器
// ==========================================
// 只在一次操作内借用实体,不缓存实体状态
pub struct ModerationController<'a, E, S>
where
    E: Moderatable,
    S: ModeratedStore<E>,
{
    entity: &'a mut E,
    store: &'a S,
    actor: &'a ActorContext,
    listeners: Option<&'a ModerationListeners<E>>,
}

impl<'a, E, S> ModerationController<'a, E, S>
where
    E: Moderatable,
    S: ModeratedStore<E>,
{
    /// 创建控制器
    ///
    /// # 参数
    /// - `entity`: 被审核的实体
    /// - `store`: 持久化协作者
    /// - `actor`: 请求级操作人 (透传给保存前钩子)
    pub fn new(entity: &'a mut E, store: &'a S, actor: &'a ActorContext) -> Self {
        Self {
            entity,
            store,
            actor,
            listeners: None,
        }
    }

    /// 挂载该记录类型的监听器
    pub fn with_listeners(mut self, listeners: &'a ModerationListeners<E>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    pub fn entity(&self) -> &E {
        &*self.entity
    }

    // ==========================================
    // 状态变更
    // ==========================================

    pub fn mark_approved(&mut self) -> RepositoryResult<ModerationOutcome> {
        self.mark(ModerationStatus::Approved)
    }

    pub fn mark_rejected(&mut self) -> RepositoryResult<ModerationOutcome> {
        self.mark(ModerationStatus::Rejected)
    }

    pub fn mark_postponed(&mut self) -> RepositoryResult<ModerationOutcome> {
        self.mark(ModerationStatus::Postponed)
    }

    pub fn mark_pending(&mut self) -> RepositoryResult<ModerationOutcome> {
        self.mark(ModerationStatus::Pending)
    }

    /// 设置任意状态并持久化
    ///
    /// # 返回
    /// - `Ok(Persisted)`: 保存成功
    /// - `Ok(Cancelled(..))`: 审核前钩子否决,未保存
    /// - `Err(..)`: 持久化协作者的失败,原样返回
    pub fn mark(&mut self, status: ModerationStatus) -> RepositoryResult<ModerationOutcome> {
        let previous_status = self.entity.moderation_status();
        self.entity.set_moderation_status(status);

        if let Some(cancelled_by) = self.before_moderation(previous_status, status) {
            tracing::debug!(
                record_type = self.entity.record_type(),
                record_id = ?self.entity.record_id(),
                status = %status,
                cancelled_by = ?cancelled_by,
                "审核已取消"
            );
            return Ok(ModerationOutcome::Cancelled(cancelled_by));
        }

        if let Err(e) = self.store.save(&mut *self.entity, self.actor) {
            tracing::warn!(
                record_type = self.entity.record_type(),
                record_id = ?self.entity.record_id(),
                status = %status,
                error = %e,
                "审核状态保存失败"
            );
            return Err(e);
        }

        tracing::info!(
            record_type = self.entity.record_type(),
            record_id = ?self.entity.record_id(),
            from = %previous_status,
            to = %status,
            "审核状态已更新"
        );

        if let Some(listeners) = self.listeners {
            let event = AfterModerationEvent {
                record_type: self.entity.record_type().to_string(),
                record_id: self.entity.record_id(),
                previous_status,
                status,
                actor: *self.actor,
            };
            listeners.emit_after(&*self.entity, &event);
        }

        Ok(ModerationOutcome::Persisted)
    }

    /// 审核前钩子: 实体级钩子先执行且可短路,其后通知监听器
    fn before_moderation(
        &self,
        previous_status: ModerationStatus,
        status: ModerationStatus,
    ) -> Option<CancelledBy> {
        if let Some(hook) = self.entity.pre_moderation_hook() {
            if !hook.before_moderation(status) {
                return Some(CancelledBy::EntityHook);
            }
        }

        let mut event = BeforeModerationEvent::new(previous_status, status);
        let valid = match self.listeners {
            Some(listeners) => listeners.emit_before(&*self.entity, &mut event),
            None => event.is_valid,
        };

        if valid {
            None
        } else {
            Some(CancelledBy::Listener)
        }
    }

    // ==========================================
    // 状态判断
    // ==========================================

    pub fn is_approved(&self) -> bool {
        self.entity.moderation_status() == ModerationStatus::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.entity.moderation_status() == ModerationStatus::Rejected
    }

    pub fn is_postponed(&self) -> bool {
        self.entity.moderation_status() == ModerationStatus::Postponed
    }

    pub fn is_pending(&self) -> bool {
        self.entity.moderation_status() == ModerationStatus::Pending
    }
}
