//! 时间抽象模块，提供可注入的延迟任务定时器，使导航加载指示器的“延迟显示/提前撤销”在测试中完全确定。
//!
//! # 模块定位（Why）
//! - 导航守卫只依赖 [`Timer`] trait：取当前单调时间、登记延迟任务、按句柄撤销；
//! - 生产环境与测试环境通过注入不同实现切换，守卫逻辑无需感知。
//!
//! # 结构概览（What）
//! - [`timer::Timer`]：核心 trait；
//! - [`timer::ThreadTimer`]：每个任务一个辅助线程的真实时间实现；
//! - [`timer::ManualTimer`]：手动推进的虚拟时间实现，按截止时间与登记顺序稳定触发。

pub mod timer;

pub use timer::{DeferredTask, ManualTimer, ThreadTimer, Timer, TimerHandle};
