//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为路由配置校验、外部存储与页面表面的失败提供集中定义；
//! - 区分“启动期致命错误”（配置非法）与“运行期环境错误”（存储/表面不可用），
//!   前者必须阻断启动，后者只记录日志、不得打断导航。
//!
//! ## 设计要求（What）
//! - 所有错误派生 `thiserror::Error`，字段保留可读上下文（节点位置、路由名、存储名）；
//! - 变体保持细粒度，便于调用方精确匹配。

use thiserror::Error;

use crate::route::RoutePosition;

/// 路由声明校验失败。
///
/// # 教案式说明
/// - **意图 (Why)**：路由树是应用运行的前提，声明缺字段或名称冲突时必须在构建阶段快速失败；
/// - **契约 (What)**：`position` 采用 `0.1.2` 形式的下标路径定位到出错节点；
/// - **风险 (Trade-offs)**：只报告首个错误，修复后再次构建才能发现后续问题。
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RouteConfigError {
    /// 节点缺少必填字段（`path` 或 `name` 为空）。
    #[error("route at {position} is missing required field `{field}`")]
    MissingField {
        position: RoutePosition,
        field: &'static str,
    },

    /// 两个节点使用了相同的 `name`。
    ///
    /// - **契约 (What)**：`first` 为先出现的位置，`second` 为冲突位置；
    /// - **风险 (Trade-offs)**：拒绝“后者覆盖前者”的静默策略，避免按名导航时命中意外节点。
    #[error("route name `{name}` is declared twice (at {first} and {second})")]
    DuplicateName {
        name: String,
        first: RoutePosition,
        second: RoutePosition,
    },
}

/// 外部存储不可用。
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    /// `store` 为存储的稳定名称，例如 `"routes"`、`"nav-tags"`。
    #[error("store `{store}` is unavailable: {detail}")]
    Unavailable { store: &'static str, detail: String },
}

/// 页面表面（标题、元素可见性）写入失败。
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SurfaceError {
    #[error("page surface is unavailable: {detail}")]
    Unavailable { detail: String },

    #[error("element `{element}` does not exist")]
    MissingElement { element: String },
}
