//! 外部协作者契约。
//!
//! # 教案式说明
//! - **意图（Why）**：路由存储、keep-alive 注册表、导航标签存储与页面表面都属于宿主环境，
//!   核心只通过最小的读写契约与它们交互，便于替换为真实实现或测试替身；
//! - **契约（What）**：
//!   - 存储写入失败返回 [`StoreError`]，表面写入失败返回 [`SurfaceError`]；
//!   - 所有 trait 要求 `Send + Sync`，实现可能被定时器线程访问；
//! - **权衡（Trade-offs）**：读取接口返回 `Arc` 快照而非借用，读者无需持锁。

use std::sync::Arc;

use crate::error::{StoreError, SurfaceError};
use crate::location::{NavigationTag, RouteLocation};
use crate::route::RouteTree;

/// 进程级路由存储：写一次、读多次，仅在被外部清空后重新发布。
pub trait RouteStore: Send + Sync {
    /// 是否尚未发布路由树。
    fn is_empty(&self) -> bool;

    /// 整表替换当前路由树。
    fn publish(&self, tree: RouteTree) -> Result<(), StoreError>;

    /// 当前路由树快照。
    fn snapshot(&self) -> Arc<RouteTree>;

    /// 清空存储，下一次导航将触发重建。
    fn clear(&self);
}

/// keep-alive 名称注册表。
pub trait KeepAliveRegistry: Send + Sync {
    fn replace(&self, names: Vec<String>) -> Result<(), StoreError>;

    fn names(&self) -> Arc<Vec<String>>;

    fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|candidate| candidate == name)
    }
}

/// 导航标签存储，内部结构与持久化方式由实现方决定。
pub trait NavTagStore: Send + Sync {
    fn record(&self, target: &RouteLocation) -> Result<(), StoreError>;

    fn tags(&self) -> Vec<NavigationTag>;
}

/// 页面表面：标题与元素可见性两个输出口。
///
/// 设置为隐藏必须幂等，元素本就隐藏时再次隐藏不视为错误。
pub trait PageSurface: Send + Sync {
    fn set_title(&self, title: &str) -> Result<(), SurfaceError>;

    fn set_visibility(&self, element_id: &str, visible: bool) -> Result<(), SurfaceError>;
}

/// 运行期环境标记，决定是否输出诊断并显示加载指示器。
pub trait RuntimeEnv: Send + Sync {
    fn is_development(&self) -> bool;
}

/// 内置的运行期档位。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    #[default]
    Production,
}

impl RuntimeProfile {
    /// 解析档位名称：`development`/`dev` 视为开发档，其余一律视为生产档。
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    /// 从环境变量读取档位，变量缺失时为生产档。
    pub fn from_env(var: &str) -> Self {
        std::env::var(var)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

impl RuntimeEnv for RuntimeProfile {
    fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parsing_is_case_insensitive() {
        assert_eq!(RuntimeProfile::parse("Development"), RuntimeProfile::Development);
        assert_eq!(RuntimeProfile::parse(" dev "), RuntimeProfile::Development);
        assert_eq!(RuntimeProfile::parse("prod"), RuntimeProfile::Production);
        assert!(RuntimeProfile::Development.is_development());
        assert!(!RuntimeProfile::Production.is_development());
    }

    #[test]
    fn missing_env_var_means_production() {
        assert_eq!(
            RuntimeProfile::from_env("WAYPOINT_TEST_UNSET_PROFILE_VARIABLE"),
            RuntimeProfile::Production
        );
    }
}
