//! 路由契约命名空间。
//!
//! # 模块定位（Why）
//! - 统一声明式路由节点、运行期路由树与构建算法，宿主路由引擎只读取构建后的 [`RouteTree`]；
//! - 构建过程保持纯函数语义：输入为借用的声明切片，输出为独立副本，声明数据可重复用于重建或测试。
//!
//! # 结构概览（What）
//! - [`RouteNode`]/[`RouteMeta`]/[`RouteComponent`]：声明模型；
//! - [`RouteTree`]：兄弟节点按 `sort` 稳定降序排列后的树；
//! - [`RouteTreeBuilder`]：校验 + 排序 + keep-alive 提取；
//! - [`RoutePosition`]：错误信息中使用的下标路径。

mod builder;
mod node;
mod tree;
mod validate;

pub use builder::{BuiltRoutes, RouteTreeBuilder};
pub use node::{DEFAULT_SORT, RouteComponent, RouteMeta, RouteNode};
pub use tree::{DepthFirst, RouteTree};
pub use validate::{RoutePosition, validate};
