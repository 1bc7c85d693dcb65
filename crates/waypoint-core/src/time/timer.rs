use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// 延迟执行的一次性任务。
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// 定时器登记后返回的撤销句柄。
///
/// # 设计意图（Why）
/// - 以 `NonZeroU64` 表达句柄，“无待触发任务”由 `Option<TimerHandle>` 的 `None` 表示，不再借用 0 作为哨兵值；
/// - 句柄在单个定时器实例内单调递增、不复用。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(NonZeroU64);

impl TimerHandle {
    fn from_counter(counter: &AtomicU64) -> Self {
        let raw = counter.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 可注入的延迟任务定时器。
///
/// # 设计背景（Why）
/// - 加载指示器的延迟显示依赖“登记 → 到期执行 / 提前撤销”的原语；若直接使用系统计时，测试将无法复现；
/// - 通过 trait 注入，守卫在生产环境使用真实时间，在测试中使用虚拟时间。
///
/// # 接口约束（What）
/// - `now`：单调时间点，用于统计导航耗时；
/// - `schedule`：在 `delay` 之后执行 `task`，立即返回句柄，不阻塞调用方；
/// - `cancel`：撤销尚未执行的任务，返回是否真正撤销；任务已执行或句柄未知时返回 `false`；
/// - 实现者不得在持有内部锁时执行任务，任务内部可能再次调用定时器。
pub trait Timer: Send + Sync + 'static {
    fn now(&self) -> Instant;

    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle;

    fn cancel(&self, handle: TimerHandle) -> bool;
}

/// 基于标准库线程的真实时间定时器。
///
/// # 设计动机（Why）
/// - 不依赖任何异步运行时，`std` 构建即可使用；
/// - 导航频率很低，为每次登记启动一个辅助线程的开销可以接受。
///
/// # 契约说明（What）
/// - 辅助线程睡眠到期后，先在锁内把句柄从待触发集合移除，移除成功才执行任务；
/// - `cancel` 同样以“移除成功”为准，因此任务与撤销之间恰有一方生效；
/// - 线程创建失败时记录告警，任务被丢弃，句柄视为已撤销。
#[derive(Clone, Debug, Default)]
pub struct ThreadTimer {
    inner: Arc<ThreadTimerInner>,
}

#[derive(Debug, Default)]
struct ThreadTimerInner {
    next_id: AtomicU64,
    armed: Mutex<HashSet<TimerHandle>>,
}

impl ThreadTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尚未触发也未撤销的任务数量。
    pub fn pending(&self) -> usize {
        self.inner.armed.lock().len()
    }
}

impl Timer for ThreadTimer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle {
        let handle = TimerHandle::from_counter(&self.inner.next_id);
        self.inner.armed.lock().insert(handle);

        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name(format!("waypoint-timer-{handle}"))
            .spawn(move || {
                thread::sleep(delay);
                let still_armed = inner.armed.lock().remove(&handle);
                if still_armed {
                    task();
                }
            });

        if let Err(err) = spawned {
            self.inner.armed.lock().remove(&handle);
            tracing::warn!(%handle, error = %err, "failed to spawn timer thread, task dropped");
        }
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        self.inner.armed.lock().remove(&handle)
    }
}

/// 虚拟时间定时器：通过手动推进时间在测试中复现确定性的触发序列。
///
/// # 行为概览（How）
/// - 内部维护 `elapsed`（自构造起的偏移量）与待触发任务列表；
/// - [`advance`](Self::advance) 增加偏移量，并按 `(截止时间, 登记顺序)` 依次执行所有到期任务；
/// - 任务在释放锁之后执行，任务内部可以再次登记或撤销；新登记且已到期的任务在同一次推进中继续执行。
///
/// # 契约说明（What）
/// - 偏移量单调增加；
/// - 未推进到截止时间的任务永远不会执行。
#[derive(Clone)]
pub struct ManualTimer {
    inner: Arc<ManualTimerInner>,
}

struct ManualTimerInner {
    origin: Instant,
    next_id: AtomicU64,
    state: Mutex<ManualState>,
}

struct ManualState {
    elapsed: Duration,
    entries: Vec<ManualEntry>,
}

struct ManualEntry {
    handle: TimerHandle,
    deadline: Duration,
    task: DeferredTask,
}

impl ManualTimer {
    /// 以当前系统时间为基准创建虚拟定时器。
    pub fn new() -> Self {
        Self::with_origin(Instant::now())
    }

    pub fn with_origin(origin: Instant) -> Self {
        Self {
            inner: Arc::new(ManualTimerInner {
                origin,
                next_id: AtomicU64::new(0),
                state: Mutex::new(ManualState {
                    elapsed: Duration::ZERO,
                    entries: Vec::new(),
                }),
            }),
        }
    }

    /// 推进虚拟时间并执行所有到期任务，返回本次执行的任务数。
    pub fn advance(&self, delta: Duration) -> usize {
        {
            let mut state = self.inner.state.lock();
            state.elapsed = state.elapsed.saturating_add(delta);
        }

        let mut fired = 0;
        while let Some(entry) = self.take_next_due() {
            (entry.task)();
            fired += 1;
        }
        fired
    }

    /// 自构造起累积的虚拟时间。
    pub fn elapsed(&self) -> Duration {
        self.inner.state.lock().elapsed
    }

    /// 尚未触发也未撤销的任务数量。
    pub fn pending(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    fn take_next_due(&self) -> Option<ManualEntry> {
        let mut state = self.inner.state.lock();
        let elapsed = state.elapsed;
        let position = state
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.deadline <= elapsed)
            .min_by_key(|(_, entry)| (entry.deadline, entry.handle))
            .map(|(position, _)| position)?;
        Some(state.entries.remove(position))
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("ManualTimer")
            .field("elapsed", &state.elapsed)
            .field("pending", &state.entries.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    fn now(&self) -> Instant {
        self.inner.origin + self.inner.state.lock().elapsed
    }

    fn schedule(&self, delay: Duration, task: DeferredTask) -> TimerHandle {
        let handle = TimerHandle::from_counter(&self.inner.next_id);
        let mut state = self.inner.state.lock();
        let deadline = state.elapsed.saturating_add(delay);
        state.entries.push(ManualEntry {
            handle,
            deadline,
            task,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut state = self.inner.state.lock();
        let before = state.entries.len();
        state.entries.retain(|entry| entry.handle != handle);
        state.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> DeferredTask) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let make = move |label: &'static str| -> DeferredTask {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().push(label))
        };
        (events, make)
    }

    #[test]
    fn manual_timer_fires_only_after_deadline() {
        let timer = ManualTimer::new();
        let (events, task) = recorder();

        timer.schedule(Duration::from_millis(500), task("reveal"));
        assert_eq!(timer.advance(Duration::from_millis(499)), 0);
        assert!(events.lock().is_empty());

        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(events.lock().as_slice(), ["reveal"]);
        assert_eq!(timer.pending(), 0);
    }

    #[test]
    fn manual_timer_orders_by_deadline_then_registration() {
        let timer = ManualTimer::new();
        let (events, task) = recorder();

        timer.schedule(Duration::from_millis(300), task("late"));
        timer.schedule(Duration::from_millis(100), task("early-1"));
        timer.schedule(Duration::from_millis(100), task("early-2"));

        timer.advance(Duration::from_secs(1));
        assert_eq!(events.lock().as_slice(), ["early-1", "early-2", "late"]);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let timer = ManualTimer::new();
        let (events, task) = recorder();

        let handle = timer.schedule(Duration::from_millis(500), task("reveal"));
        assert!(timer.cancel(handle));
        assert!(!timer.cancel(handle), "重复撤销应返回 false");

        timer.advance(Duration::from_secs(1));
        assert!(events.lock().is_empty());
    }

    #[test]
    fn manual_now_tracks_virtual_time() {
        let origin = Instant::now();
        let timer = ManualTimer::with_origin(origin);
        timer.advance(Duration::from_millis(250));
        assert_eq!(timer.now(), origin + Duration::from_millis(250));
        assert_eq!(timer.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn handles_are_unique_and_non_zero() {
        let timer = ManualTimer::new();
        let first = timer.schedule(Duration::ZERO, Box::new(|| {}));
        let second = timer.schedule(Duration::ZERO, Box::new(|| {}));
        assert_ne!(first, second);
        assert!(first.get() > 0);
    }

    #[test]
    fn thread_timer_runs_task_after_delay() {
        let timer = ThreadTimer::new();
        let (tx, rx) = mpsc::channel();
        timer.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let _ = tx.send("fired");
            }),
        );
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("fired"));
    }

    #[test]
    fn thread_timer_cancel_prevents_execution() {
        let timer = ThreadTimer::new();
        let (tx, rx) = mpsc::channel::<&'static str>();
        let handle = timer.schedule(
            Duration::from_millis(200),
            Box::new(move || {
                let _ = tx.send("fired");
            }),
        );
        assert!(timer.cancel(handle));
        assert_eq!(timer.pending(), 0);
        assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());
    }
}
