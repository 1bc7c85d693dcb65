#![deny(unsafe_code)]
//! waypoint-examples：读取路由清单、装配导航守卫并模拟宿主路由引擎的演示代码。
//!
//! # 组成
//! - [`install_logging`]：`fmt + EnvFilter` 的一次性日志安装；
//! - [`HostSimulator`]：按路由名解析目标，依次执行前置守卫、页面加载与后置守卫。

use std::sync::{Arc, OnceLock};

use anyhow::{Context as _, anyhow};
use tracing::{dispatcher, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};
use waypoint_core::{DepthFirst, PageSurface, RouteLocation, RouteManifest, RuntimeEnv, Timer};
use waypoint_router::{NavigationContext, NavigationLifecycle};

static LOGGING: OnceLock<()> = OnceLock::new();

/// 安装全局 `tracing` Subscriber。
///
/// # 教案式说明
/// - **逻辑（How）**：过滤规则优先读取 `RUST_LOG`，缺省为 `info`；
/// - **契约（What）**：重复调用直接返回 `Ok(())`；外部已设置 Subscriber 时返回错误。
pub fn install_logging() -> anyhow::Result<()> {
    if LOGGING.get().is_some() {
        return Ok(());
    }
    if dispatcher::has_been_set() {
        return Err(anyhow!("a global tracing subscriber is already installed"));
    }

    let subscriber = tracing_subscriber::registry()
        .with(build_env_filter())
        .with(fmt::layer().with_target(false));
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    let _ = LOGGING.set(());
    Ok(())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 一次模拟导航的结果。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub route: String,
    pub title: Option<String>,
}

/// 演示用宿主：扮演路由引擎，把路由名解析为 [`RouteLocation`] 并驱动守卫对。
pub struct HostSimulator {
    lifecycle: NavigationLifecycle,
    current: Option<RouteLocation>,
}

impl HostSimulator {
    pub fn new(lifecycle: NavigationLifecycle) -> Self {
        Self {
            lifecycle,
            current: None,
        }
    }

    /// 由清单装配上下文与守卫对，使用内存存储。
    pub fn from_manifest(
        manifest: RouteManifest,
        surface: Arc<dyn PageSurface>,
        runtime: Arc<dyn RuntimeEnv>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        let context = NavigationContext::in_memory(manifest.routes);
        let lifecycle = NavigationLifecycle::new(context, surface, runtime, timer)
            .with_config(manifest.navigation);
        Self::new(lifecycle)
    }

    pub fn lifecycle(&self) -> &NavigationLifecycle {
        &self.lifecycle
    }

    pub fn current(&self) -> Option<&RouteLocation> {
        self.current.as_ref()
    }

    /// 路由树发布后从快照解析，否则退回声明列表。
    pub fn resolve(&self, name: &str) -> Option<RouteLocation> {
        let context = self.lifecycle.context();
        let snapshot = context.routes().snapshot();
        if let Some(node) = snapshot.find(name) {
            return Some(RouteLocation::from(node));
        }
        DepthFirst::new(context.declared())
            .find(|node| node.name == name)
            .map(RouteLocation::from)
    }

    /// 导航到 `name`；`load` 在守卫放行后执行，模拟视图加载耗时。
    pub fn navigate<F>(&mut self, name: &str, load: F) -> anyhow::Result<NavigationOutcome>
    where
        F: FnOnce(),
    {
        let target = self
            .resolve(name)
            .ok_or_else(|| anyhow!("unknown route `{name}`"))?;

        let ticket = self
            .lifecycle
            .before(&target, self.current.as_ref(), load)
            .with_context(|| format!("navigation to `{name}` was blocked"))?;
        self.lifecycle.after(ticket, &target);

        info!(route = %target.name, path = %target.path, "navigation completed");
        let outcome = NavigationOutcome {
            route: target.name.clone(),
            title: target.meta.title.clone(),
        };
        self.current = Some(target);
        Ok(outcome)
    }
}
