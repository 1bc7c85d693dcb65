use std::collections::HashMap;
use std::fmt;

use crate::error::RouteConfigError;

use super::RouteNode;

/// 节点在声明树中的下标路径，例如 `0.1.2` 表示第 0 个顶层节点的第 1 个子节点的第 2 个子节点。
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoutePosition(Vec<usize>);

impl RoutePosition {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for RoutePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

/// 校验声明树：必填字段非空、`name` 全树唯一。
///
/// # 教案式说明
/// - **意图 (Why)**：按名导航与 keep-alive 匹配都以 `name` 为键，重名会让后声明的节点静默遮蔽前者；
/// - **执行 (How)**：按声明顺序深度优先遍历，首个违规即返回；
/// - **契约 (What)**：只读遍历，不修改输入。
pub fn validate(declared: &[RouteNode]) -> Result<(), RouteConfigError> {
    let mut seen: HashMap<&str, RoutePosition> = HashMap::new();
    for (index, node) in declared.iter().enumerate() {
        visit(node, RoutePosition::root(index), &mut seen)?;
    }
    Ok(())
}

fn visit<'a>(
    node: &'a RouteNode,
    position: RoutePosition,
    seen: &mut HashMap<&'a str, RoutePosition>,
) -> Result<(), RouteConfigError> {
    if node.path.trim().is_empty() {
        return Err(RouteConfigError::MissingField {
            position,
            field: "path",
        });
    }
    if node.name.trim().is_empty() {
        return Err(RouteConfigError::MissingField {
            position,
            field: "name",
        });
    }
    if let Some(first) = seen.get(node.name.as_str()) {
        return Err(RouteConfigError::DuplicateName {
            name: node.name.clone(),
            first: first.clone(),
            second: position,
        });
    }
    seen.insert(node.name.as_str(), position.clone());

    for (index, child) in node.children.iter().enumerate() {
        visit(child, position.child(index), seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_renders_dotted_path() {
        let position = RoutePosition::root(0).child(3).child(1);
        assert_eq!(position.to_string(), "0.3.1");
        assert_eq!(position.depth(), 3);
        assert_eq!(position.segments(), &[0, 3, 1]);
    }

    #[test]
    fn duplicate_names_across_levels_are_rejected() {
        let declared = vec![
            RouteNode::new("/dev", "dev")
                .with_children(vec![RouteNode::new("/dev/form", "form")]),
            RouteNode::new("/form", "form"),
        ];

        let err = validate(&declared).expect_err("重名应被拒绝");
        assert_eq!(
            err,
            RouteConfigError::DuplicateName {
                name: "form".to_owned(),
                first: RoutePosition::root(0).child(0),
                second: RoutePosition::root(1),
            }
        );
    }

    #[test]
    fn blank_name_reports_position() {
        let declared = vec![RouteNode::new("/dev", "dev").with_children(vec![
            RouteNode::new("/dev/ok", "ok"),
            RouteNode::new("/dev/broken", "  "),
        ])];

        let err = validate(&declared).expect_err("空名称应被拒绝");
        assert_eq!(err.to_string(), "route at 0.1 is missing required field `name`");
    }

    #[test]
    fn missing_path_is_checked_before_name() {
        let declared = vec![RouteNode::new("", "")];
        assert!(matches!(
            validate(&declared),
            Err(RouteConfigError::MissingField { field: "path", .. })
        ));
    }
}
