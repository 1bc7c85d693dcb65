//! 路由清单与导航参数。
//!
//! ### 设计目的（Why）
//! - 静态路由声明与导航参数以 TOML 文档交付，启动时一次性解析并校验；
//! - 所有导航参数均有默认值，清单只需覆盖关心的字段。
//!
//! ### 文档结构（What）
//! ```toml
//! [navigation]
//! reveal_delay_ms = 500
//! loading_element = "index-loading"
//! title_fallback = ""
//!
//! [[routes]]
//! path = "/dev"
//! name = "dev"
//! component = { view = "LayoutMain" }
//! [routes.meta]
//! title = "开发者工具"
//! sort = 1
//!
//! [[routes.children]]
//! path = "/dev/form"
//! name = "dev-form"
//! component = { deferred = "views/dev/form" }
//! meta = { title = "普通表单", sort = 9 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::error::RouteConfigError;
use crate::route::{RouteNode, validate};

/// 默认的加载指示器延迟。
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 500;
/// 默认的加载指示器元素标识。
pub const DEFAULT_LOADING_ELEMENT: &str = "index-loading";

/// 导航生命周期参数。
///
/// # 契约说明（What）
/// - `reveal_delay_ms`：导航开始后多久显示加载指示器，快于该阈值的导航不会闪烁；
/// - `loading_element`：加载指示器的元素标识；
/// - `title_fallback`：目标路由未声明标题时使用的页面标题。
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub reveal_delay_ms: u64,
    pub loading_element: String,
    pub title_fallback: String,
}

impl NavigationConfig {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_loading_element(mut self, element: impl Into<String>) -> Self {
        self.loading_element = element.into();
        self
    }

    pub fn with_title_fallback(mut self, title: impl Into<String>) -> Self {
        self.title_fallback = title.into();
        self
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            loading_element: DEFAULT_LOADING_ELEMENT.to_owned(),
            title_fallback: String::new(),
        }
    }
}

/// 路由清单加载失败。
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read route manifest `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("route manifest is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] RouteConfigError),
}

/// 完整的路由清单：导航参数 + 声明式路由列表。
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub routes: Vec<RouteNode>,
}

impl RouteManifest {
    /// 解析并校验 TOML 文本。
    pub fn from_toml_str(source: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(source)?;
        validate(&manifest.routes)?;
        Ok(manifest)
    }

    /// 读取并解析清单文件。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteComponent;

    #[test]
    fn empty_document_uses_defaults() {
        let manifest = RouteManifest::from_toml_str("").expect("空文档合法");
        assert_eq!(manifest.navigation, NavigationConfig::default());
        assert_eq!(manifest.navigation.reveal_delay(), Duration::from_millis(500));
        assert_eq!(manifest.navigation.loading_element, "index-loading");
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn nested_routes_and_meta_are_parsed() {
        let manifest = RouteManifest::from_toml_str(
            r#"
            [navigation]
            reveal_delay_ms = 250

            [[routes]]
            path = "/dev"
            name = "dev"
            component = { view = "LayoutMain" }
            [routes.meta]
            title = "开发者工具"
            icon = "zx-1-2"
            sort = 1

            [[routes.children]]
            path = "/dev/form"
            name = "dev-form"
            component = { deferred = "views/dev/form" }
            meta = { title = "普通表单", sort = 0, keepAliveName = "DevForm" }
            "#,
        )
        .expect("合法清单");

        assert_eq!(manifest.navigation.reveal_delay_ms, 250);
        assert_eq!(manifest.navigation.loading_element, DEFAULT_LOADING_ELEMENT);

        let dev = &manifest.routes[0];
        assert_eq!(dev.component, Some(RouteComponent::View("LayoutMain".to_owned())));
        assert_eq!(dev.meta.icon.as_deref(), Some("zx-1-2"));

        let form = &dev.children[0];
        assert_eq!(form.meta.sort, Some(0));
        assert_eq!(form.meta.keep_alive_name.as_deref(), Some("DevForm"));
        assert_eq!(
            form.component,
            Some(RouteComponent::Deferred("views/dev/form".to_owned()))
        );
    }

    #[test]
    fn missing_name_surfaces_as_config_error() {
        let err = RouteManifest::from_toml_str(
            r#"
            [[routes]]
            path = "/orphan"
            "#,
        )
        .expect_err("缺少 name");
        assert!(matches!(
            err,
            ManifestError::Config(RouteConfigError::MissingField { field: "name", .. })
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = RouteManifest::from_toml_str("[[routes]\npath = ").expect_err("语法错误");
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RouteManifest::from_path("/definitely/not/here/routes.toml")
            .expect_err("文件不存在");
        assert!(matches!(err, ManifestError::Io { .. }));
    }
}
