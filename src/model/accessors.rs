//! 图元素的属性访问函数与属性注册表
//!
//! 注册表在配置阶段构建一次，之后按引用传入算法，不做全局修改。

use std::collections::BTreeMap;

use crate::model::attribute_path::AttributePath;
use crate::model::diagram::{DiagramTree, NodeId};
use crate::model::error::TableError;

/// 数值ID，取自本地样式的 `id`；无法解析为整数时视为不存在
pub fn id_get(tree: &DiagramTree, node: NodeId) -> Option<i64> {
    tree.element(node).local_style.get("id")?.trim().parse().ok()
}

/// ID 不允许修改
pub fn id_set(_: &mut DiagramTree, _: NodeId, _: &i64) -> bool {
    false
}

pub fn value_get(tree: &DiagramTree, node: NodeId) -> Option<String> {
    tree.element(node).local_style.get("value").cloned()
}

pub fn value_set(tree: &mut DiagramTree, node: NodeId, value: &String) -> bool {
    tree.set_local_style(node, "value", value.as_str());
    true
}

pub fn vertex_get(tree: &DiagramTree, node: NodeId) -> Option<String> {
    tree.element(node).local_style.get("vertex").cloned()
}

/// vertex 标记不允许编辑
pub fn vertex_set(_: &mut DiagramTree, _: NodeId, _: &String) -> bool {
    false
}

pub fn fillcolor_get(tree: &DiagramTree, node: NodeId) -> Option<String> {
    tree.drawio_style(node)?.get("fillColor").cloned()
}

pub fn fillcolor_set(tree: &mut DiagramTree, node: NodeId, value: &String) -> bool {
    match tree.drawio_style_mut(node) {
        Some(style) => {
            style.insert("fillColor".to_string(), value.clone());
            true
        }
        None => false,
    }
}

/// 一条字符串属性记录
#[derive(Clone)]
pub struct AttributeRecord {
    pub getter: fn(&DiagramTree, NodeId) -> Option<String>,
    pub setter: fn(&mut DiagramTree, NodeId, &String) -> bool,
    pub default_value: Option<String>,
}

#[derive(Clone, Default)]
pub struct AttributeRegistry {
    records: BTreeMap<String, AttributeRecord>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 图元素的常用属性：`value`、`vertex`（默认空字符串）与 `fillColor`
    pub fn diagram() -> Self {
        let mut registry = Self::new();
        registry.register(
            "value",
            AttributeRecord {
                getter: value_get,
                setter: value_set,
                default_value: Some(String::new()),
            },
        );
        registry.register(
            "vertex",
            AttributeRecord {
                getter: vertex_get,
                setter: vertex_set,
                default_value: Some(String::new()),
            },
        );
        registry.register(
            "fillColor",
            AttributeRecord {
                getter: fillcolor_get,
                setter: fillcolor_set,
                default_value: None,
            },
        );
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, record: AttributeRecord) {
        self.records.insert(name.into(), record);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeRecord> {
        self.records.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn path(&self, name: &str) -> Result<AttributePath<DiagramTree, String>, TableError> {
        let record = self
            .records
            .get(name)
            .ok_or_else(|| TableError::UnknownAttribute(name.to_string()))?;

        let mut path = AttributePath::new(name, record.getter, record.setter);
        path.set_default(record.default_value.clone());
        Ok(path)
    }
}

/// 整数类型的ID路径
pub fn id_path() -> AttributePath<DiagramTree, i64> {
    AttributePath::new("id", id_get, id_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::diagram::NodeKind;

    fn sample() -> (DiagramTree, NodeId, NodeId) {
        let mut tree = DiagramTree::new("page");
        let cell = tree.add_element(tree.root(), NodeKind::cell());
        tree.set_local_style(cell, "id", "2");
        tree.set_local_style(cell, "vertex", "1");
        let shape = tree.add_element(tree.root(), NodeKind::Shape);
        tree.set_local_style(shape, "id", "abc");
        (tree, cell, shape)
    }

    #[test]
    fn test_id_is_parsed_and_immutable() {
        let (mut tree, cell, shape) = sample();
        let path = id_path();

        assert_eq!(path.get_value(&tree, cell).unwrap(), 2);
        assert!(!path.has_value(&tree, shape), "非数字ID视为不存在");
        assert!(!path.set_value(&mut tree, cell, &5));
    }

    #[test]
    fn test_value_defaults_to_empty_string() {
        let (mut tree, cell, _) = sample();
        let path = AttributeRegistry::diagram().path("value").unwrap();

        assert_eq!(path.get_value(&tree, cell).unwrap(), "");
        assert!(path.set_value(&mut tree, cell, &"A".to_string()));
        assert_eq!(path.get_value(&tree, cell).unwrap(), "A");
    }

    #[test]
    fn test_vertex_is_read_only() {
        let (mut tree, cell, shape) = sample();
        let path = AttributeRegistry::diagram().path("vertex").unwrap();

        assert_eq!(path.get_value(&tree, cell).unwrap(), "1");
        assert_eq!(path.get_value(&tree, shape).unwrap(), "");
        assert!(!path.set_value(&mut tree, cell, &"0".to_string()));
    }

    #[test]
    fn test_fillcolor_depends_on_node_kind() {
        let (mut tree, cell, shape) = sample();
        let path = AttributeRegistry::diagram().path("fillColor").unwrap();

        assert!(!path.has_value(&tree, cell));
        assert!(path.set_value(&mut tree, cell, &"#f8cecc".to_string()));
        assert_eq!(path.get_value(&tree, cell).unwrap(), "#f8cecc");

        assert!(!path.set_value(&mut tree, shape, &"#f8cecc".to_string()));
        assert!(matches!(
            path.get_value(&tree, shape),
            Err(TableError::AttributeMissing(_))
        ));
    }

    #[test]
    fn test_unknown_attribute() {
        let registry = AttributeRegistry::diagram();
        assert!(matches!(
            registry.path("strokeColor"),
            Err(TableError::UnknownAttribute(_))
        ));
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["fillColor", "value", "vertex"]
        );
    }
}
