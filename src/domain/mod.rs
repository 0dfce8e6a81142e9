// ==========================================
// 记录审核状态组件 - 领域模型层
// ==========================================
// 职责: 定义审核状态、操作人、可审核实体契约
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod actor;
pub mod comment;
pub mod moderatable;
pub mod moderation_log;
pub mod types;

// 重导出核心类型
pub use actor::ActorContext;
pub use comment::Comment;
pub use moderatable::{Moderatable, PreModerationHook};
pub use moderation_log::ModerationLog;
pub use types::{
    localized_status_labels, status_labels, ActorId, InvalidStatusCode, ModerationStatus,
};
