// ==========================================
// 记录审核状态组件 - 持久化协作者契约
// ==========================================
// 职责: 审核控制器依赖的最小持久化接口 + 保存前生命周期钩子
// 红线: 插入与更新都必须执行保存前钩子 (审核人审计挂在这里)
// ==========================================

use crate::domain::ActorContext;
use crate::repository::error::RepositoryResult;

/// 可审核记录的持久化协作者
pub trait ModeratedStore<E> {
    /// 保存实体 (新记录插入,已有记录更新)
    ///
    /// 失败原样返回,调用方不做解释
    fn save(&self, entity: &mut E, actor: &ActorContext) -> RepositoryResult<()>;
}

/// 保存前钩子
///
/// 由持久化协作者在每次插入/更新前调用,无论保存是否由审核操作触发。
pub trait SaveHook<E>: Send + Sync {
    fn before_insert(&self, entity: &mut E, actor: &ActorContext);

    fn before_update(&self, entity: &mut E, actor: &ActorContext);
}
