use core::cmp::Reverse;

use crate::error::RouteConfigError;

use super::{RouteNode, RouteTree, validate};

/// 一次构建的全部产物。
///
/// - `tree`：排序后的路由树，交给路由存储发布；
/// - `keep_alive`：按声明顺序深度优先收集的 `keep_alive_name` 列表，交给 keep-alive 注册表。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltRoutes {
    pub tree: RouteTree,
    pub keep_alive: Vec<String>,
}

/// `RouteTreeBuilder` 将声明式路由列表转换为运行期路由树，并提取 keep-alive 名称。
///
/// # 设计动机（Why）
/// - 声明数据是静态配置，可能被重复用于重建或测试，因此构建器只借用输入，输出全新的副本；
/// - 排序与 keep-alive 提取在同一次深度优先遍历中完成，避免两次遍历出现顺序不一致。
///
/// # 行为概览（How）
/// 1. 校验：`path`/`name` 非空，`name` 全树唯一；
/// 2. 对每一层兄弟节点，按声明顺序逐个处理：若声明了 `keep_alive_name` 则追加，随后递归处理子节点；
/// 3. 本层全部处理完后，按 `sort`（缺省为 1）稳定降序排列副本。
///
/// # 使用契约（What）
/// - **前置条件**：无，空输入返回空树与空列表；
/// - **后置条件**：输入切片保持原样；keep-alive 列表不去重，同名出现几次就记录几次；
/// - **顺序**：keep-alive 列表与排序无关，只取决于声明顺序。
#[derive(Clone, Copy, Debug, Default)]
pub struct RouteTreeBuilder;

impl RouteTreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 校验并构建。
    pub fn build(&self, declared: &[RouteNode]) -> Result<BuiltRoutes, RouteConfigError> {
        validate(declared)?;
        let mut keep_alive = Vec::new();
        let roots = normalize(declared, &mut keep_alive);
        Ok(BuiltRoutes {
            tree: RouteTree::from_sorted(roots),
            keep_alive,
        })
    }
}

fn normalize(siblings: &[RouteNode], keep_alive: &mut Vec<String>) -> Vec<RouteNode> {
    let mut level = Vec::with_capacity(siblings.len());
    for node in siblings {
        if let Some(name) = &node.meta.keep_alive_name {
            keep_alive.push(name.clone());
        }
        let children = if node.children.is_empty() {
            Vec::new()
        } else {
            normalize(&node.children, keep_alive)
        };
        level.push(node.detached(children));
    }
    // `sort_by_key` 为稳定排序，同优先级保持声明顺序。
    level.sort_by_key(|node| Reverse(node.meta.sort_priority()));
    level
}
