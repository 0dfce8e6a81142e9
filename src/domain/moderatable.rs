// ==========================================
// 记录审核状态组件 - 可审核实体契约
// ==========================================
// 职责: 定义实体需要暴露的审核字段访问器与可选的审核前钩子
// 说明: 字段访问在编译期绑定,列名映射由 ModerationConfig 负责
// ==========================================

use crate::domain::types::{ActorId, ModerationStatus};

/// 可审核实体
///
/// 任何持久化记录实现此 trait 即可挂载审核状态机。
pub trait Moderatable {
    /// 记录类型名 (用于日志与配置键)
    fn record_type(&self) -> &'static str;

    /// 记录主键 (未持久化时为 None)
    fn record_id(&self) -> Option<i64>;

    fn moderation_status(&self) -> ModerationStatus;

    fn set_moderation_status(&mut self, status: ModerationStatus);

    fn moderated_by(&self) -> Option<ActorId>;

    fn set_moderated_by(&mut self, actor: Option<ActorId>);

    /// 可选能力: 实体级审核前钩子
    ///
    /// 默认不提供;需要无条件规则的实体类型返回 `Some(self)`。
    fn pre_moderation_hook(&self) -> Option<&dyn PreModerationHook> {
        None
    }
}

/// 实体级审核前钩子
///
/// 在监听器之前执行,返回 false 立即取消审核,监听器不会被通知。
pub trait PreModerationHook {
    /// `status` 为即将持久化的新状态 (实体上已写入)
    fn before_moderation(&self, status: ModerationStatus) -> bool;
}
