use super::RouteNode;

/// 构建完成的运行期路由树。
///
/// # 教案级说明
/// - **意图 (Why)**：与声明数据区分类型，保证宿主只消费经过排序与校验的树；
/// - **契约 (What)**：每一层兄弟节点均按有效 `sort` 降序排列，同优先级保持声明顺序；
/// - **设计 (How)**：内部仅持有 `Vec<RouteNode>`，遍历、扁平化与按名查找均为只读操作；
/// - **风险 (Trade-offs)**：按名查找为线性扫描，路由规模通常在百级以内，无需额外索引。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTree {
    roots: Vec<RouteNode>,
}

impl RouteTree {
    /// 创建空树。
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub(crate) fn from_sorted(roots: Vec<RouteNode>) -> Self {
        Self { roots }
    }

    /// 顶层节点。
    pub fn roots(&self) -> &[RouteNode] {
        &self.roots
    }

    /// 顶层节点数量。
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// 顶层节点迭代。
    pub fn iter(&self) -> core::slice::Iter<'_, RouteNode> {
        self.roots.iter()
    }

    /// 深度优先前序遍历整棵树，顺序即渲染顺序。
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(&self.roots)
    }

    /// 将整棵树展开为前序序列。
    pub fn flatten(&self) -> Vec<&RouteNode> {
        self.depth_first().collect()
    }

    /// 按路由名查找节点，任意深度。
    pub fn find(&self, name: &str) -> Option<&RouteNode> {
        self.depth_first().find(|node| node.name == name)
    }

    /// 全部节点数（含子孙）。
    pub fn node_count(&self) -> usize {
        self.depth_first().count()
    }
}

impl IntoIterator for RouteTree {
    type Item = RouteNode;
    type IntoIter = std::vec::IntoIter<RouteNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.into_iter()
    }
}

impl<'a> IntoIterator for &'a RouteTree {
    type Item = &'a RouteNode;
    type IntoIter = core::slice::Iter<'a, RouteNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// 深度优先前序迭代器。
///
/// 以显式栈代替递归，栈中保存尚未消费的兄弟切片。
#[derive(Clone, Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<core::slice::Iter<'a, RouteNode>>,
}

impl<'a> DepthFirst<'a> {
    pub fn new(roots: &'a [RouteNode]) -> Self {
        Self {
            stack: vec![roots.iter()],
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a RouteNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if !node.children.is_empty() {
                        self.stack.push(node.children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteTree {
        RouteTree::from_sorted(vec![
            RouteNode::new("/dev", "dev").with_children(vec![
                RouteNode::new("/dev/form", "dev-form"),
                RouteNode::new("/dev/modal-form", "dev-modal-form"),
            ]),
            RouteNode::new("/about", "about"),
        ])
    }

    #[test]
    fn flatten_is_preorder() {
        let tree = sample();
        let names: Vec<&str> = tree.flatten().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["dev", "dev-form", "dev-modal-form", "about"]);
    }

    #[test]
    fn find_reaches_nested_nodes() {
        let tree = sample();
        assert_eq!(
            tree.find("dev-modal-form").map(|n| n.path.as_str()),
            Some("/dev/modal-form")
        );
        assert!(tree.find("missing").is_none());
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = RouteTree::new();
        assert!(tree.is_empty());
        assert!(tree.flatten().is_empty());
    }
}
