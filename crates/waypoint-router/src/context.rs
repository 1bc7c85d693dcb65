use std::fmt;
use std::sync::Arc;

use waypoint_core::{KeepAliveRegistry, NavTagStore, RouteNode, RouteStore};

use crate::store::{MemoryTagStore, SharedKeepAlive, SwapRouteStore};

/// `NavigationContext` 聚合导航守卫需要的全部协作者。
///
/// # 教案式说明
/// - **意图（Why）**：路由树、keep-alive 列表、导航标签原本都是进程级全局状态，测试之间会互相污染；
///   改为在应用初始化时显式构造一次，并由 [`crate::NavigationLifecycle`] 持有。
/// - **契约（What）**：
///   - `declared`：声明式路由列表（通常是根布局的子路由），构建器只借用它；
///   - `routes`：构建结果的发布目标，为空时触发重建；
///   - `keep_alive`：keep-alive 名称的发布目标；
///   - `tags`：后置守卫写入导航标签的目标。
/// - **权衡（Trade-offs）**：协作者以 `Arc<dyn _>` 持有，克隆上下文只增加引用计数，多个宿主组件可共享同一份存储。
#[derive(Clone)]
pub struct NavigationContext {
    declared: Arc<[RouteNode]>,
    routes: Arc<dyn RouteStore>,
    keep_alive: Arc<dyn KeepAliveRegistry>,
    tags: Arc<dyn NavTagStore>,
}

impl NavigationContext {
    pub fn new(
        declared: Vec<RouteNode>,
        routes: Arc<dyn RouteStore>,
        keep_alive: Arc<dyn KeepAliveRegistry>,
        tags: Arc<dyn NavTagStore>,
    ) -> Self {
        Self {
            declared: declared.into(),
            routes,
            keep_alive,
            tags,
        }
    }

    /// 使用默认内存存储构造上下文。
    pub fn in_memory(declared: Vec<RouteNode>) -> Self {
        Self::new(
            declared,
            Arc::new(SwapRouteStore::new()),
            Arc::new(SharedKeepAlive::new()),
            Arc::new(MemoryTagStore::new()),
        )
    }

    pub fn declared(&self) -> &[RouteNode] {
        &self.declared
    }

    pub fn routes(&self) -> &dyn RouteStore {
        self.routes.as_ref()
    }

    pub fn keep_alive(&self) -> &dyn KeepAliveRegistry {
        self.keep_alive.as_ref()
    }

    pub fn tags(&self) -> &dyn NavTagStore {
        self.tags.as_ref()
    }
}

impl fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("declared", &self.declared.len())
            .field("routes_published", &!self.routes.is_empty())
            .field("keep_alive", &self.keep_alive.names().len())
            .finish()
    }
}
