// ==========================================
// 记录审核状态组件 - 审核日志监听器
// ==========================================
// 职责: 审核持久化成功后写入 moderation_log
// 红线: 日志写入失败只告警,不改变审核结果
// ==========================================

use crate::domain::{Moderatable, ModerationLog};
use crate::engine::events::{AfterModerationEvent, ModerationListener};
use crate::repository::ModerationLogRepository;
use chrono::Utc;
use std::sync::Arc;

/// 审核日志监听器
pub struct ModerationLogListener {
    repo: Arc<ModerationLogRepository>,
}

impl ModerationLogListener {
    pub fn new(repo: Arc<ModerationLogRepository>) -> Self {
        Self { repo }
    }
}

impl<E: Moderatable> ModerationListener<E> for ModerationLogListener {
    fn after_moderation(&self, _entity: &E, event: &AfterModerationEvent) {
        let Some(record_id) = event.record_id else {
            tracing::warn!(
                record_type = %event.record_type,
                "记录无主键,跳过审核日志"
            );
            return;
        };

        let log = ModerationLog {
            log_id: None,
            record_type: event.record_type.clone(),
            record_id,
            previous_status: event.previous_status,
            status: event.status,
            actor_id: event.actor.identity(),
            logged_at: Utc::now().naive_utc(),
        };

        if let Err(e) = self.repo.insert(&log) {
            tracing::warn!(
                record_type = %event.record_type,
                record_id,
                error = %e,
                "审核日志写入失败"
            );
        }
    }
}
