use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use waypoint_core::{
    KeepAliveRegistry, NavTagStore, NavigationTag, RouteLocation, RouteStore, RouteTree,
    StoreError,
};

/// 导航标签存储的默认容量。
pub const DEFAULT_TAG_CAPACITY: usize = 20;

/// `SwapRouteStore` 提供基于 `ArcSwap` 的路由存储，满足“写一次、无锁读”的需求。
///
/// # 设计动机（Why）
/// - **热替换友好**：发布新树只需一次 `store`，已持有旧 `Arc` 的读者自然过渡；
/// - **读路径零锁**：宿主渲染时只需 `load_full` 获取快照；
/// - **可观测**：每次发布递增修订号，测试与诊断可据此判断是否发生了重建。
///
/// # 使用契约（What）
/// - **初始状态**：空树、修订号 0，[`RouteStore::is_empty`] 返回 `true`；
/// - **发布**：整表替换并递增修订号；
/// - **清空**：替换为空树，修订号保持不变，下一次发布继续递增。
pub struct SwapRouteStore {
    table: ArcSwap<RouteTree>,
    revision: AtomicU64,
}

impl SwapRouteStore {
    pub fn new() -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTree::new()),
            revision: AtomicU64::new(0),
        }
    }

    /// 已发布的次数。
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

impl Default for SwapRouteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteStore for SwapRouteStore {
    fn is_empty(&self) -> bool {
        self.table.load().is_empty()
    }

    fn publish(&self, tree: RouteTree) -> Result<(), StoreError> {
        self.table.store(Arc::new(tree));
        self.revision.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn snapshot(&self) -> Arc<RouteTree> {
        self.table.load_full()
    }

    fn clear(&self) {
        self.table.store(Arc::new(RouteTree::new()));
    }
}

/// 进程级 keep-alive 名称注册表，整表替换、无锁读取。
pub struct SharedKeepAlive {
    names: ArcSwap<Vec<String>>,
}

impl SharedKeepAlive {
    pub fn new() -> Self {
        Self {
            names: ArcSwap::from_pointee(Vec::new()),
        }
    }
}

impl Default for SharedKeepAlive {
    fn default() -> Self {
        Self::new()
    }
}

impl KeepAliveRegistry for SharedKeepAlive {
    fn replace(&self, names: Vec<String>) -> Result<(), StoreError> {
        self.names.store(Arc::new(names));
        Ok(())
    }

    fn names(&self) -> Arc<Vec<String>> {
        self.names.load_full()
    }
}

/// 内存中的导航标签历史。
///
/// # 行为说明（How）
/// - 按首次访问顺序保存标签；再次访问同名路由时原位刷新标题/图标，不追加重复项；
/// - 超过容量时淘汰最早的标签。
pub struct MemoryTagStore {
    capacity: usize,
    tags: Mutex<VecDeque<NavigationTag>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TAG_CAPACITY)
    }

    /// `capacity` 为 0 时按 1 处理。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tags: Mutex::new(VecDeque::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.lock().is_empty()
    }
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NavTagStore for MemoryTagStore {
    fn record(&self, target: &RouteLocation) -> Result<(), StoreError> {
        let tag = NavigationTag::from(target);
        let mut tags = self.tags.lock();
        if let Some(existing) = tags.iter_mut().find(|existing| existing.name == tag.name) {
            *existing = tag;
            return Ok(());
        }
        tags.push_back(tag);
        while tags.len() > self.capacity {
            tags.pop_front();
        }
        Ok(())
    }

    fn tags(&self) -> Vec<NavigationTag> {
        self.tags.lock().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::{RouteMeta, RouteNode, RouteTreeBuilder};

    fn tree(names: &[&str]) -> RouteTree {
        let declared: Vec<RouteNode> = names
            .iter()
            .map(|name| RouteNode::new(format!("/{name}"), *name))
            .collect();
        RouteTreeBuilder::new()
            .build(&declared)
            .expect("合法声明")
            .tree
    }

    #[test]
    fn publish_bumps_revision_and_replaces_snapshot() {
        let store = SwapRouteStore::new();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);

        let old = store.snapshot();
        store.publish(tree(&["home"])).expect("内存存储不会失败");
        assert!(!store.is_empty());
        assert_eq!(store.revision(), 1);
        assert!(old.is_empty(), "旧快照保持不变");
        assert!(store.snapshot().find("home").is_some());
    }

    #[test]
    fn clear_empties_without_resetting_revision() {
        let store = SwapRouteStore::new();
        store.publish(tree(&["home"])).expect("发布");
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn keep_alive_registry_replaces_whole_list() {
        let registry = SharedKeepAlive::new();
        registry
            .replace(vec!["DevForm".to_owned(), "DevForm".to_owned()])
            .expect("替换");
        assert_eq!(registry.names().len(), 2);
        assert!(registry.contains("DevForm"));
        assert!(!registry.contains("Other"));
    }

    #[test]
    fn revisiting_a_route_refreshes_instead_of_appending() {
        let store = MemoryTagStore::new();
        assert!(store.is_empty());
        let home = RouteLocation::new("home", "/");
        let form = RouteLocation::new("dev-form", "/dev/form")
            .with_meta(RouteMeta::default().with_title("普通表单"));

        store.record(&home).expect("记录");
        store.record(&form).expect("记录");
        store
            .record(&home.clone().with_meta(RouteMeta::default().with_title("首页")))
            .expect("记录");

        let tags = store.tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "home");
        assert_eq!(tags[0].title.as_deref(), Some("首页"));
        assert_eq!(tags[1].title.as_deref(), Some("普通表单"));
    }

    #[test]
    fn oldest_tag_is_evicted_beyond_capacity() {
        let store = MemoryTagStore::with_capacity(2);
        for name in ["a", "b", "c"] {
            store
                .record(&RouteLocation::new(name, format!("/{name}")))
                .expect("记录");
        }
        let names: Vec<String> = store.tags().into_iter().map(|tag| tag.name).collect();
        assert_eq!(names, ["b", "c"]);
        assert_eq!(store.len(), 2);
    }
}
