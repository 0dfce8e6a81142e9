// ==========================================
// 记录审核状态组件 - 引擎层
// ==========================================
// 职责: 审核状态机、审核前/后事件、审核人审计、审核日志
// 红线: 不直接拼装 SQL,持久化一律经由 ModeratedStore
// ==========================================

pub mod audit;
pub mod controller;
pub mod events;
pub mod moderation_log;

// 重导出核心引擎
pub use audit::AuditStamper;
pub use controller::{CancelledBy, ModerationController, ModerationOutcome};
pub use events::{
    AfterModerationEvent, BeforeModerationEvent, ModerationListener, ModerationListeners,
};
pub use moderation_log::ModerationLogListener;
