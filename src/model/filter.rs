//! 节点过滤器：任意谓词函数，或"属性值属于给定集合"

use crate::model::attribute_path::AttributePath;
use crate::model::error::TableError;
use crate::model::tree::NodeTree;

/// 节点过滤器，不修改节点
pub trait Filter<T: NodeTree> {
    fn accepts(&self, tree: &T, node: T::Handle) -> Result<bool, TableError>;
}

/// 包装任意返回布尔值的函数，便于与属性过滤器混用
pub struct FilterFunction<T: NodeTree> {
    func: Box<dyn Fn(&T, T::Handle) -> bool>,
}

impl<T: NodeTree + 'static> FilterFunction<T> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&T, T::Handle) -> bool + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }

    pub fn accept_all() -> Self {
        Self::new(|_: &T, _: T::Handle| true)
    }

    pub fn accept_none() -> Self {
        Self::new(|_: &T, _: T::Handle| false)
    }
}

impl<T: NodeTree> Filter<T> for FilterFunction<T> {
    fn accepts(&self, tree: &T, node: T::Handle) -> Result<bool, TableError> {
        Ok((self.func)(tree, node))
    }
}

/// 节点的属性值属于 `allowed_vals` 时通过
///
/// 属性缺失且路径没有默认值时，`accepts` 会返回 `AttributeMissing`。
pub struct AttributeFilter<T: NodeTree, V> {
    path: AttributePath<T, V>,
    allowed_vals: Vec<V>,
}

impl<T: NodeTree, V: Clone + PartialEq> AttributeFilter<T, V> {
    pub fn new(path: AttributePath<T, V>, allowed_vals: Vec<V>) -> Self {
        Self { path, allowed_vals }
    }

    pub fn path(&self) -> &AttributePath<T, V> {
        &self.path
    }

    pub fn allowed_vals(&self) -> &[V] {
        &self.allowed_vals
    }

    pub fn set_allowed_vals(&mut self, allowed_vals: Vec<V>) {
        self.allowed_vals = allowed_vals;
    }
}

impl<T: NodeTree, V: Clone + PartialEq> Filter<T> for AttributeFilter<T, V> {
    fn accepts(&self, tree: &T, node: T::Handle) -> Result<bool, TableError> {
        let val = self.path.get_value(tree, node)?;
        Ok(self.allowed_vals.contains(&val))
    }
}
