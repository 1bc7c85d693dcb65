use crate::route::{RouteMeta, RouteNode};

/// 导航目标（或来源）的最小描述，由宿主路由引擎在解析完成后提供。
///
/// 与 [`RouteNode`] 的区别：不携带子路由与组件引用，守卫只关心名称、路径与元数据。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteLocation {
    pub name: String,
    pub path: String,
    pub meta: RouteMeta,
}

impl RouteLocation {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta: RouteMeta::default(),
        }
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}

impl From<&RouteNode> for RouteLocation {
    fn from(node: &RouteNode) -> Self {
        Self {
            name: node.name.clone(),
            path: node.path.clone(),
            meta: node.meta.clone(),
        }
    }
}

/// 一次已完成导航的记录，用于历史标签栏与面包屑。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTag {
    pub name: String,
    pub path: String,
    pub title: Option<String>,
    pub icon: Option<String>,
}

impl From<&RouteLocation> for NavigationTag {
    fn from(location: &RouteLocation) -> Self {
        Self {
            name: location.name.clone(),
            path: location.path.clone(),
            title: location.meta.title.clone(),
            icon: location.meta.icon.clone(),
        }
    }
}
