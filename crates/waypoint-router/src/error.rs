use thiserror::Error;
use waypoint_core::{RouteConfigError, StoreError};

/// 前置守卫无法放行导航时的错误。
///
/// # 教案式说明
/// - **意图 (Why)**：路由树不可用时放行导航只会进入半初始化的应用，因此这两类错误都阻断 `proceed`；
/// - **契约 (What)**：
///   - `RouteConfig`：声明数据非法，属于启动期致命错误，需要修复配置；
///   - `Store`：路由存储或 keep-alive 注册表拒绝写入；
/// - **范围**：标题、可见性、导航标签写入失败不在此列，它们只记录日志。
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("route configuration rejected: {0}")]
    RouteConfig(#[from] RouteConfigError),

    #[error("route tree could not be published: {0}")]
    Store(#[from] StoreError),
}
