use std::collections::HashMap;

use parking_lot::Mutex;
use waypoint_core::{PageSurface, SurfaceError};

/// 页面表面收到的一次写入。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Title(String),
    Visibility { element: String, visible: bool },
}

/// 记录所有写入的页面表面，供演示宿主与测试断言使用。
///
/// 元素首次出现时视为存在；可通过 [`RecordingSurface::without_element`] 模拟缺失的元素。
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: Mutex<SurfaceState>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    title: String,
    visibility: HashMap<String, bool>,
    missing: Vec<String>,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让指定元素的写入返回 [`SurfaceError::MissingElement`]。
    pub fn without_element(self, element: impl Into<String>) -> Self {
        self.state.lock().missing.push(element.into());
        self
    }

    pub fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    pub fn is_visible(&self, element: &str) -> bool {
        self.state
            .lock()
            .visibility
            .get(element)
            .copied()
            .unwrap_or(false)
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.state.lock().events.clone()
    }

    /// 指定元素是否曾被设为可见。
    pub fn was_ever_shown(&self, element: &str) -> bool {
        self.state.lock().events.iter().any(|event| {
            matches!(event, SurfaceEvent::Visibility { element: e, visible: true } if e == element)
        })
    }
}

impl PageSurface for RecordingSurface {
    fn set_title(&self, title: &str) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        state.title = title.to_owned();
        state.events.push(SurfaceEvent::Title(title.to_owned()));
        Ok(())
    }

    fn set_visibility(&self, element_id: &str, visible: bool) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        if state.missing.iter().any(|missing| missing == element_id) {
            return Err(SurfaceError::MissingElement {
                element: element_id.to_owned(),
            });
        }
        state.visibility.insert(element_id.to_owned(), visible);
        state.events.push(SurfaceEvent::Visibility {
            element: element_id.to_owned(),
            visible,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiding_twice_is_harmless() {
        let surface = RecordingSurface::new();
        assert!(surface.set_visibility("index-loading", false).is_ok());
        assert!(surface.set_visibility("index-loading", false).is_ok());
        assert!(!surface.is_visible("index-loading"));
        assert!(!surface.was_ever_shown("index-loading"));
    }

    #[test]
    fn missing_element_is_reported() {
        let surface = RecordingSurface::new().without_element("index-loading");
        assert_eq!(
            surface.set_visibility("index-loading", true),
            Err(SurfaceError::MissingElement {
                element: "index-loading".to_owned()
            })
        );
        assert!(surface.events().is_empty());
    }
}
