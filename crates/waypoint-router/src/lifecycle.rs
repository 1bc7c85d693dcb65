use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use waypoint_core::{
    DeferredTask, NavigationConfig, PageSurface, RouteLocation, RouteTreeBuilder, RuntimeEnv,
    Timer, TimerHandle,
};

use crate::context::NavigationContext;
use crate::error::LifecycleError;

/// 单次导航的世代号，由前置守卫单调分配。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationToken(u64);

impl NavigationToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav-{}", self.0)
    }
}

/// 前置守卫签发的导航凭据，宿主在导航完成后原样交还给 [`NavigationLifecycle::after`]。
///
/// # 教案式说明
/// - **意图（Why）**：凭据只能由 `before` 产生、只能被 `after` 消费一次，
///   因而“同一导航的后置守卫先于前置守卫执行”在类型层面不可能发生；
/// - **契约（What）**：`token` 只撤销属于自己的延迟任务，重叠导航之间互不干扰；
///   `started_at` 用于统计导航耗时。
/// - **释放**：凭据被丢弃（导航被取代或中止）时同样撤销自己的延迟任务并移出待完成集合，
///   需要同时隐藏指示器时改用 [`NavigationLifecycle::abandon`]。
#[must_use = "a ticket must be handed back to `after` or `abandon` once the navigation settles"]
pub struct NavigationTicket {
    token: NavigationToken,
    started_at: Instant,
    target: String,
    state: Weak<Mutex<LifecycleState>>,
    timer: Arc<dyn Timer>,
}

impl NavigationTicket {
    pub fn token(&self) -> NavigationToken {
        self.token
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// 前置守卫看到的目标路由名。
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 移出待完成集合并撤销延迟任务；重复调用无副作用。
    fn release(&self) -> Option<(TimerHandle, bool)> {
        let state = self.state.upgrade()?;
        let pending = state.lock().pending.remove(&self.token);
        let handle = pending.and_then(|pending| pending.handle)?;
        Some((handle, self.timer.cancel(handle)))
    }
}

impl Drop for NavigationTicket {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for NavigationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationTicket")
            .field("token", &self.token)
            .field("started_at", &self.started_at)
            .field("target", &self.target)
            .finish()
    }
}

/// 生命周期阶段：没有待完成导航时为 `Idle`，否则为 `Armed`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Armed { pending: usize },
}

#[derive(Debug)]
struct PendingReveal {
    handle: Option<TimerHandle>,
}

#[derive(Debug, Default)]
struct LifecycleState {
    next_token: u64,
    pending: BTreeMap<NavigationToken, PendingReveal>,
}

/// `NavigationLifecycle` 是挂在宿主路由引擎上的前置/后置守卫对。
///
/// # 设计动机（Why）
/// - 首次导航时惰性构建路由树，之后只读；
/// - 已缓存的视图瞬间完成导航，不应闪出加载指示器，因此指示器延迟显示、导航完成即撤销；
/// - 每次导航持有独立世代号，快速连续导航时后一次不会覆盖前一次的定时器句柄。
///
/// # 行为概览（How）
/// 1. `before`：必要时构建并发布路由树 → 设置标题 → 记录起始时间 → 登记延迟显示任务 → 调用 `proceed`；
/// 2. 延迟任务到期：仅当该导航仍未完成且处于开发档时显示指示器；
/// 3. `after`：撤销本导航的延迟任务 → 无条件隐藏指示器 → 记录导航标签。
///
/// # 使用契约（What）
/// - 守卫从不重定向或拦截导航，唯一的阻断条件是路由树无法构建或发布；
/// - 标题、可见性与标签写入失败只记录告警，不影响导航；
/// - 调用 `proceed` 与定时器时不持有内部锁；延迟任务在持锁状态下显示指示器，
///   保证与 `after` 的“移除凭据 → 隐藏”序列互斥，避免隐藏之后又被显示。
pub struct NavigationLifecycle {
    context: NavigationContext,
    surface: Arc<dyn PageSurface>,
    runtime: Arc<dyn RuntimeEnv>,
    timer: Arc<dyn Timer>,
    config: NavigationConfig,
    builder: RouteTreeBuilder,
    state: Arc<Mutex<LifecycleState>>,
}

impl NavigationLifecycle {
    pub fn new(
        context: NavigationContext,
        surface: Arc<dyn PageSurface>,
        runtime: Arc<dyn RuntimeEnv>,
        timer: Arc<dyn Timer>,
    ) -> Self {
        Self {
            context,
            surface,
            runtime,
            timer,
            config: NavigationConfig::default(),
            builder: RouteTreeBuilder::new(),
            state: Arc::new(Mutex::new(LifecycleState::default())),
        }
    }

    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(&self) -> &NavigationContext {
        &self.context
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn phase(&self) -> NavigationPhase {
        let state = self.state.lock();
        match state.pending.len() {
            0 => NavigationPhase::Idle,
            pending => NavigationPhase::Armed { pending },
        }
    }

    /// 已放行但尚未完成的导航数量。
    pub fn pending_navigations(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// 清空路由存储，下一次 `before` 将重新构建。
    pub fn reset_routes(&self) {
        self.context.routes().clear();
    }

    /// 前置守卫。
    ///
    /// 路由树构建或发布失败时返回错误且不调用 `proceed`；其余情况下 `proceed` 恰好被调用一次。
    pub fn before<F>(
        &self,
        target: &RouteLocation,
        source: Option<&RouteLocation>,
        proceed: F,
    ) -> Result<NavigationTicket, LifecycleError>
    where
        F: FnOnce(),
    {
        self.ensure_routes()?;

        let title = target
            .title()
            .unwrap_or(self.config.title_fallback.as_str());
        if let Err(err) = self.surface.set_title(title) {
            warn!(route = %target.name, error = %err, "failed to set page title");
        }

        let started_at = self.timer.now();
        let token = {
            let mut state = self.state.lock();
            state.next_token += 1;
            let token = NavigationToken(state.next_token);
            state.pending.insert(token, PendingReveal { handle: None });
            token
        };

        let handle = self
            .timer
            .schedule(self.config.reveal_delay(), self.reveal_task(token));
        if let Some(pending) = self.state.lock().pending.get_mut(&token) {
            pending.handle = Some(handle);
        }

        debug!(
            route = %target.name,
            from = source.map_or("-", |source| source.name.as_str()),
            %token,
            %handle,
            "navigation armed"
        );

        proceed();

        Ok(NavigationTicket {
            token,
            started_at,
            target: target.name.clone(),
            state: Arc::downgrade(&self.state),
            timer: Arc::clone(&self.timer),
        })
    }

    /// 后置守卫。
    pub fn after(&self, ticket: NavigationTicket, target: &RouteLocation) {
        let development = self.runtime.is_development();
        if development {
            let elapsed = self.timer.now().saturating_duration_since(ticket.started_at);
            warn!(
                route = %target.name,
                token = %ticket.token,
                elapsed_ms = as_millis(elapsed),
                "navigation finished"
            );
        }
        if ticket.target != target.name {
            debug!(
                token = %ticket.token,
                started = %ticket.target,
                route = %target.name,
                "navigation settled on a different route than it started"
            );
        }

        if let Some((handle, cancelled)) = ticket.release() {
            if development {
                warn!(%handle, cancelled, "clearing navigation reveal timer");
            }
        }
        drop(ticket);

        self.hide_indicator();

        if let Err(err) = self.context.tags().record(target) {
            warn!(route = %target.name, error = %err, "failed to record navigation tag");
        }
    }

    /// 放弃一次未完成的导航：撤销延迟任务、隐藏指示器，不记录导航标签。
    pub fn abandon(&self, ticket: NavigationTicket) {
        let token = ticket.token;
        drop(ticket);
        debug!(%token, "navigation abandoned");
        self.hide_indicator();
    }

    fn hide_indicator(&self) {
        if let Err(err) = self
            .surface
            .set_visibility(&self.config.loading_element, false)
        {
            warn!(element = %self.config.loading_element, error = %err, "failed to hide loading indicator");
        }
    }

    fn ensure_routes(&self) -> Result<(), LifecycleError> {
        let routes = self.context.routes();
        if !routes.is_empty() {
            return Ok(());
        }

        let built = self.builder.build(self.context.declared())?;
        info!(
            roots = built.tree.len(),
            nodes = built.tree.node_count(),
            keep_alive = built.keep_alive.len(),
            "route tree initialised"
        );
        // 路由树最后发布：存储非空即表示两份数据都已写入。
        self.context.keep_alive().replace(built.keep_alive)?;
        routes.publish(built.tree)?;
        Ok(())
    }

    fn reveal_task(&self, token: NavigationToken) -> DeferredTask {
        let state = Arc::clone(&self.state);
        let surface = Arc::clone(&self.surface);
        let runtime = Arc::clone(&self.runtime);
        let element = self.config.loading_element.clone();
        Box::new(move || {
            let development = runtime.is_development();
            if development {
                warn!(%token, "navigation reveal timer fired");
            }
            let state = state.lock();
            if development && state.pending.contains_key(&token) {
                if let Err(err) = surface.set_visibility(&element, true) {
                    warn!(%token, %element, error = %err, "failed to reveal loading indicator");
                }
            }
        })
    }
}

impl fmt::Debug for NavigationLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationLifecycle")
            .field("context", &self.context)
            .field("config", &self.config)
            .field("phase", &self.phase())
            .finish()
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
