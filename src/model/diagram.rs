//! 图交换模型（Diagram Interchange）：以arena存储的元素树
//!
//! 元素之间的父子关系只保存 `NodeId`，不持有引用。

use std::collections::HashMap;

use crate::model::tree::NodeTree;

/// 元素在arena中的下标，只能由 `DiagramTree` 生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

pub type StyleMap = HashMap<String, String>;

/// 元素类型（封闭集合，属性访问通过 match 区分）
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Diagram {
        name: String,
        documentation: String,
        resolution: f64,
    },
    Element,
    Shape,
    Edge {
        source: Option<NodeId>,
        target: Option<NodeId>,
    },
    /// drawio 的 mxCell
    Cell { drawio_style: StyleMap },
    /// drawio 的连线
    Arrow {
        source: Option<NodeId>,
        target: Option<NodeId>,
        drawio_style: StyleMap,
    },
}

impl NodeKind {
    pub fn diagram(name: impl Into<String>) -> Self {
        NodeKind::Diagram {
            name: name.into(),
            documentation: String::new(),
            resolution: 300.0,
        }
    }

    pub fn cell() -> Self {
        NodeKind::Cell {
            drawio_style: StyleMap::new(),
        }
    }

    pub fn arrow(source: Option<NodeId>, target: Option<NodeId>) -> Self {
        NodeKind::Arrow {
            source,
            target,
            drawio_style: StyleMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiagramElement {
    pub owning_element: Option<NodeId>,
    pub owned_elements: Vec<NodeId>,
    /// 元素自身的样式属性（id、value、vertex 等）
    pub local_style: StyleMap,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct DiagramTree {
    elements: Vec<DiagramElement>,
}

impl DiagramTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            elements: vec![DiagramElement {
                owning_element: None,
                owned_elements: Vec::new(),
                local_style: StyleMap::new(),
                kind: NodeKind::diagram(name),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_element(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(DiagramElement {
            owning_element: Some(parent),
            owned_elements: Vec::new(),
            local_style: StyleMap::new(),
            kind,
        });
        self.elements[parent.0].owned_elements.push(id);
        id
    }

    pub fn element(&self, id: NodeId) -> &DiagramElement {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut DiagramElement {
        &mut self.elements[id.0]
    }

    pub fn set_local_style(&mut self, id: NodeId, key: &str, value: impl Into<String>) {
        self.elements[id.0]
            .local_style
            .insert(key.to_string(), value.into());
    }

    /// 只有 mxCell 与连线带有 drawio 样式
    pub fn drawio_style(&self, id: NodeId) -> Option<&StyleMap> {
        match &self.elements[id.0].kind {
            NodeKind::Cell { drawio_style } | NodeKind::Arrow { drawio_style, .. } => {
                Some(drawio_style)
            }
            _ => None,
        }
    }

    pub fn drawio_style_mut(&mut self, id: NodeId) -> Option<&mut StyleMap> {
        match &mut self.elements[id.0].kind {
            NodeKind::Cell { drawio_style } | NodeKind::Arrow { drawio_style, .. } => {
                Some(drawio_style)
            }
            _ => None,
        }
    }

    /// 从根节点先序查找本地样式中键值匹配的第一个元素
    pub fn find_node_with(&self, key: &str, value: &str) -> Option<NodeId> {
        self.find_node_from(self.root(), key, value)
    }

    /// 从 `start`（含）开始先序查找
    pub fn find_node_from(&self, start: NodeId, key: &str, value: &str) -> Option<NodeId> {
        if self.elements[start.0].local_style.get(key).map(String::as_str) == Some(value) {
            return Some(start);
        }
        self.elements[start.0]
            .owned_elements
            .iter()
            .find_map(|&child| self.find_node_from(child, key, value))
    }

    /// drawio 风格的示例页面：两个容器单元、四个顶点和一条连线
    ///
    /// 顶点的 id 为 2、3、5、7，标签 A 到 D；容器与连线不带 `vertex` 标记。
    pub fn sample() -> Self {
        let mut tree = Self::new("Page-1");

        let base = tree.add_element(tree.root(), NodeKind::cell());
        tree.set_local_style(base, "id", "0");
        let layer = tree.add_element(base, NodeKind::cell());
        tree.set_local_style(layer, "id", "1");

        let mut vertices = Vec::new();
        for (id, label, color) in [
            ("2", "A", "#dae8fc"),
            ("3", "B", "#f8cecc"),
            ("5", "C", "#d5e8d4"),
            ("7", "D", "#fff2cc"),
        ] {
            let cell = tree.add_element(layer, NodeKind::cell());
            tree.set_local_style(cell, "id", id);
            tree.set_local_style(cell, "value", label);
            tree.set_local_style(cell, "vertex", "1");
            if let Some(style) = tree.drawio_style_mut(cell) {
                style.insert("fillColor".to_string(), color.to_string());
            }
            vertices.push(cell);
        }

        let edge = tree.add_element(
            layer,
            NodeKind::arrow(vertices.first().copied(), vertices.get(1).copied()),
        );
        tree.set_local_style(edge, "id", "8");
        tree.set_local_style(edge, "edge", "1");

        tree
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl NodeTree for DiagramTree {
    type Handle = NodeId;

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.elements[node.0].owned_elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_diagram_root() {
        let tree = DiagramTree::new("page");
        assert_eq!(tree.len(), 1);
        match &tree.element(tree.root()).kind {
            NodeKind::Diagram { name, resolution, .. } => {
                assert_eq!(name, "page");
                assert_eq!(*resolution, 300.0);
            }
            other => panic!("根节点类型错误: {:?}", other),
        }
    }

    #[test]
    fn test_add_element_links_parent_and_child() {
        let mut tree = DiagramTree::new("page");
        let layer = tree.add_element(tree.root(), NodeKind::Element);
        let cell = tree.add_element(layer, NodeKind::cell());

        assert_eq!(tree.children(tree.root()), &[layer]);
        assert_eq!(tree.children(layer), &[cell]);
        assert_eq!(tree.element(cell).owning_element, Some(layer));
    }

    #[test]
    fn test_drawio_style_only_on_cells_and_arrows() {
        let mut tree = DiagramTree::new("page");
        let shape = tree.add_element(tree.root(), NodeKind::Shape);
        let cell = tree.add_element(tree.root(), NodeKind::cell());
        let arrow = tree.add_element(tree.root(), NodeKind::arrow(Some(cell), None));

        assert!(tree.drawio_style(shape).is_none());
        assert!(tree.drawio_style_mut(shape).is_none());
        assert!(tree.drawio_style(cell).is_some());

        tree.drawio_style_mut(arrow)
            .unwrap()
            .insert("fillColor".into(), "#fff".into());
        assert_eq!(
            tree.drawio_style(arrow).unwrap().get("fillColor").map(String::as_str),
            Some("#fff")
        );
    }

    #[test]
    fn test_sample_page_layout() {
        let tree = DiagramTree::sample();
        assert_eq!(tree.len(), 8, "根 + 两个容器 + 四个顶点 + 一条连线");

        let layer = tree.find_node_with("id", "1").expect("缺少图层单元");
        assert_eq!(tree.children(layer).len(), 5);

        let edge = tree.find_node_with("edge", "1").expect("缺少连线");
        match &tree.element(edge).kind {
            NodeKind::Arrow { source, target, .. } => {
                assert_eq!(*source, tree.find_node_with("id", "2"));
                assert_eq!(*target, tree.find_node_with("id", "3"));
            }
            other => panic!("连线类型错误: {:?}", other),
        }
    }

    #[test]
    fn test_find_node_with_local_style() {
        let mut tree = DiagramTree::new("page");
        let a = tree.add_element(tree.root(), NodeKind::cell());
        let b = tree.add_element(tree.root(), NodeKind::cell());
        tree.set_local_style(a, "id", "2");
        tree.set_local_style(b, "id", "3");

        assert_eq!(tree.find_node_with("id", "3"), Some(b));
        assert_eq!(tree.find_node_with("id", "9"), None);
    }

    #[test]
    fn test_find_node_with_is_pre_order() {
        let mut tree = DiagramTree::new("page");
        let first = tree.add_element(tree.root(), NodeKind::Element);
        let second = tree.add_element(tree.root(), NodeKind::cell());
        tree.set_local_style(second, "value", "X");
        // 后加入、但在先序中排在 second 之前
        let nested = tree.add_element(first, NodeKind::cell());
        tree.set_local_style(nested, "value", "X");

        assert_eq!(tree.find_node_with("value", "X"), Some(nested));
        assert_eq!(tree.find_node_from(second, "value", "X"), Some(second));
        assert_eq!(tree.find_node_from(first, "id", "0"), None);
    }
}
