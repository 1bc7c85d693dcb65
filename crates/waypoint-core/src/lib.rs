#![deny(unsafe_code)]
#![doc = "waypoint-core: 单页应用路由树归一化与导航生命周期的核心契约。"]
#![doc = ""]
#![doc = "== 模块划分 =="]
#![doc = "1. `route`：声明式路由节点、排序后的路由树、构建器与校验；"]
#![doc = "2. `time`：可注入的延迟任务定时器（生产用线程实现、测试用虚拟时间实现）；"]
#![doc = "3. `contract`：路由存储、keep-alive 注册表、导航标签存储、页面表面等外部协作者契约；"]
#![doc = "4. `configuration`：TOML 路由清单与导航参数。"]

pub mod configuration;
pub mod contract;
pub mod error;
pub mod location;
pub mod route;
pub mod time;

pub use configuration::{ManifestError, NavigationConfig, RouteManifest};
pub use contract::{
    KeepAliveRegistry, NavTagStore, PageSurface, RouteStore, RuntimeEnv, RuntimeProfile,
};
pub use error::{RouteConfigError, StoreError, SurfaceError};
pub use location::{NavigationTag, RouteLocation};
pub use route::{
    BuiltRoutes, DEFAULT_SORT, DepthFirst, RouteComponent, RouteMeta, RouteNode, RoutePosition,
    RouteTree, RouteTreeBuilder,
};
pub use time::{DeferredTask, ManualTimer, ThreadTimer, Timer, TimerHandle};
