#![deny(unsafe_code)]
//! waypoint-router：导航守卫生命周期控制器，以及路由存储、keep-alive 注册表、导航标签存储的默认实现。
//!
//! # 组成
//! - [`NavigationLifecycle`]：前置/后置守卫对，负责首次导航时构建路由树、设置标题、延迟显示加载指示器；
//! - [`NavigationContext`]：显式持有的协作者集合，替代进程级全局状态；
//! - [`SwapRouteStore`]/[`SharedKeepAlive`]/[`MemoryTagStore`]：基于 `ArcSwap` 与互斥锁的内存实现；
//! - [`RecordingSurface`]：记录标题与可见性变更的页面表面。

mod context;
mod error;
mod lifecycle;
mod store;
mod surface;

pub use context::NavigationContext;
pub use error::LifecycleError;
pub use lifecycle::{NavigationLifecycle, NavigationPhase, NavigationTicket, NavigationToken};
pub use store::{DEFAULT_TAG_CAPACITY, MemoryTagStore, SharedKeepAlive, SwapRouteStore};
pub use surface::{RecordingSurface, SurfaceEvent};
