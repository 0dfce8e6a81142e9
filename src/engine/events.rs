// ==========================================
// 记录审核状态组件 - 审核事件与监听器
// ==========================================
// 职责: 审核前 (可否决) / 审核后 (通知) 事件
// 说明: 监听器按记录类型注册,实体级钩子优先于监听器执行
// ==========================================

use crate::domain::{ActorContext, ModerationStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// 审核事件
// ==========================================

/// 审核前事件
///
/// 监听器把 `is_valid` 置为 false 即否决本次审核
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeModerationEvent {
    /// 即将持久化的新状态
    pub status: ModerationStatus,
    /// 审核前状态
    pub previous_status: ModerationStatus,
    /// 是否允许继续 (初始为 true)
    pub is_valid: bool,
}

impl BeforeModerationEvent {
    pub fn new(previous_status: ModerationStatus, status: ModerationStatus) -> Self {
        Self {
            status,
            previous_status,
            is_valid: true,
        }
    }

    /// 否决本次审核
    pub fn veto(&mut self) {
        self.is_valid = false;
    }
}

/// 审核后事件 (持久化成功后发出)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterModerationEvent {
    pub record_type: String,
    pub record_id: Option<i64>,
    pub previous_status: ModerationStatus,
    pub status: ModerationStatus,
    pub actor: ActorContext,
}

// ==========================================
// 监听器 Trait
// ==========================================

/// 审核监听器
///
/// 两个回调都有默认空实现,按需覆盖。
pub trait ModerationListener<E: ?Sized>: Send + Sync {
    /// 审核前回调,可通过 `event.veto()` 否决
    fn before_moderation(&self, _entity: &E, _event: &mut BeforeModerationEvent) {}

    /// 审核后回调,不影响审核结果
    fn after_moderation(&self, _entity: &E, _event: &AfterModerationEvent) {}
}

/// 监听器注册表
pub struct ModerationListeners<E: ?Sized> {
    listeners: Vec<Arc<dyn ModerationListener<E>>>,
}

impl<E: ?Sized> ModerationListeners<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// 注册监听器 (按注册顺序通知)
    pub fn register(&mut self, listener: Arc<dyn ModerationListener<E>>) {
        self.listeners.push(listener);
    }

    pub fn with(mut self, listener: Arc<dyn ModerationListener<E>>) -> Self {
        self.register(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// 通知全部监听器,返回事件最终是否仍有效
    ///
    /// 任一监听器否决后其余监听器仍会收到通知
    pub fn emit_before(&self, entity: &E, event: &mut BeforeModerationEvent) -> bool {
        for listener in &self.listeners {
            listener.before_moderation(entity, event);
        }
        event.is_valid
    }

    pub fn emit_after(&self, entity: &E, event: &AfterModerationEvent) {
        for listener in &self.listeners {
            listener.after_moderation(entity, event);
        }
    }
}

impl<E: ?Sized> Default for ModerationListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Clone for ModerationListeners<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Veto;

    impl ModerationListener<str> for Veto {
        fn before_moderation(&self, _entity: &str, event: &mut BeforeModerationEvent) {
            event.veto();
        }
    }

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl ModerationListener<str> for Counter {
        fn before_moderation(&self, _entity: &str, _event: &mut BeforeModerationEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_empty_registry_keeps_event_valid() {
        let listeners: ModerationListeners<str> = ModerationListeners::new();
        let mut event =
            BeforeModerationEvent::new(ModerationStatus::Pending, ModerationStatus::Approved);
        assert!(listeners.emit_before("x", &mut event));
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_veto_still_notifies_later_listeners() {
        let counter = Arc::new(Counter::default());
        let listeners = ModerationListeners::<str>::new()
            .with(Arc::new(Veto))
            .with(counter.clone());

        let mut event =
            BeforeModerationEvent::new(ModerationStatus::Pending, ModerationStatus::Rejected);
        assert!(!listeners.emit_before("x", &mut event));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(listeners.len(), 2);
    }
}
