use serde::Deserialize;

/// 未声明 `sort` 时采用的默认优先级。
pub const DEFAULT_SORT: i64 = 1;

/// 路由元数据，以结构化的可选字段表达。
///
/// # 教案级说明
/// - **意图 (Why)**：把“字段缺省”与“字段为零值”区分开：`sort = 0` 是合法优先级，只有缺省才回落到 [`DEFAULT_SORT`]；
/// - **契约 (What)**：
///   - `title`：页面标题；
///   - `icon`：对核心不透明的图标标识；
///   - `sort`：同级排序优先级，数值越大越靠前；
///   - `keep_alive_name`：声明后进入 keep-alive 注册表；
///   - `hidden`：保留字段，当前不参与过滤。
/// - **设计 (How)**：反序列化时同时接受 `keep_alive_name` 与 `keepAliveName` 两种写法。
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub sort: Option<i64>,
    #[serde(alias = "keepAliveName")]
    pub keep_alive_name: Option<String>,
    pub hidden: Option<bool>,
}

impl RouteMeta {
    /// 参与排序的实际优先级。
    pub fn sort_priority(&self) -> i64 {
        self.sort.unwrap_or(DEFAULT_SORT)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_keep_alive(mut self, name: impl Into<String>) -> Self {
        self.keep_alive_name = Some(name.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}

/// 视图组件引用，对核心完全不透明。
///
/// - `View`：已就绪的具体视图；
/// - `Deferred`：按需加载的视图（懒加载模块的标识）。
///
/// TOML 中写作 `component = { view = "LayoutMain" }` 或 `component = { deferred = "views/dev/form" }`。
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteComponent {
    View(String),
    Deferred(String),
}

/// 声明式路由树中的单个节点。
///
/// # 教案式说明
/// - **意图 (Why)**：承载路径、全局唯一名称、元数据与子路由，作为构建器的输入与输出共用形态；
/// - **契约 (What)**：
///   - `path` 在兄弟节点之间唯一，可为绝对或相对路径；
///   - `name` 在整棵树内唯一，用于按名导航与 keep-alive 匹配；
///   - `children` 为空表示叶子路由；
///   - `component` 由宿主解析，核心不做任何假设。
/// - **实现 (How)**：`path`/`name` 反序列化时允许缺省为空串，由 [`super::validate`] 给出带位置的诊断，
///   而不是在解析阶段报出难以定位的错误。
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RouteNode {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<RouteNode>,
    #[serde(default)]
    pub component: Option<RouteComponent>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_component(mut self, component: RouteComponent) -> Self {
        self.component = Some(component);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 复制除 `children` 以外的全部字段，子节点由调用方重新装配。
    pub(crate) fn detached(&self, children: Vec<RouteNode>) -> Self {
        Self {
            path: self.path.clone(),
            name: self.name.clone(),
            meta: self.meta.clone(),
            children,
            component: self.component.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_sort_falls_back_to_default() {
        assert_eq!(RouteMeta::default().sort_priority(), DEFAULT_SORT);
    }

    #[test]
    fn explicit_zero_sort_is_kept() {
        assert_eq!(RouteMeta::default().with_sort(0).sort_priority(), 0);
    }

    #[test]
    fn detached_copy_replaces_children() {
        let node = RouteNode::new("/dev", "dev")
            .with_meta(RouteMeta::default().with_title("Dev"))
            .with_children(vec![RouteNode::new("/dev/form", "dev-form")]);

        let copy = node.detached(Vec::new());
        assert!(copy.is_leaf());
        assert_eq!(copy.meta, node.meta);
        assert_eq!(node.children.len(), 1);
    }
}
