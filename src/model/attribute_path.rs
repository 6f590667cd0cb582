//! AttributePath：对节点上某一个属性的类型化读写访问

use std::fmt;
use std::rc::Rc;

use crate::model::error::TableError;
use crate::model::tree::NodeTree;

type Getter<T, V> = Rc<dyn Fn(&T, <T as NodeTree>::Handle) -> Option<V>>;
type Setter<T, V> = Rc<dyn Fn(&mut T, <T as NodeTree>::Handle, &V) -> bool>;

/// 属性访问器：getter返回 `None` 表示属性不存在，setter返回 `false` 表示拒绝写入
pub struct AttributePath<T: NodeTree, V> {
    name: String,
    func_get: Getter<T, V>,
    func_set: Setter<T, V>,
    default_value: Option<V>,
}

impl<T: NodeTree, V: Clone> Clone for AttributePath<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func_get: Rc::clone(&self.func_get),
            func_set: Rc::clone(&self.func_set),
            default_value: self.default_value.clone(),
        }
    }
}

impl<T: NodeTree, V: fmt::Debug> fmt::Debug for AttributePath<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributePath")
            .field("name", &self.name)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

impl<T: NodeTree, V: Clone> AttributePath<T, V> {
    pub fn new<G, S>(name: impl Into<String>, func_get: G, func_set: S) -> Self
    where
        G: Fn(&T, T::Handle) -> Option<V> + 'static,
        S: Fn(&mut T, T::Handle, &V) -> bool + 'static,
    {
        Self {
            name: name.into(),
            func_get: Rc::new(func_get),
            func_set: Rc::new(func_set),
            default_value: None,
        }
    }

    /// 只读属性：任何写入都会被拒绝
    pub fn read_only<G>(name: impl Into<String>, func_get: G) -> Self
    where
        G: Fn(&T, T::Handle) -> Option<V> + 'static,
        T: 'static,
        V: 'static,
    {
        Self::new(name, func_get, |_: &mut T, _: T::Handle, _: &V| false)
    }

    pub fn with_default(mut self, value: V) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn set_default(&mut self, value: Option<V>) {
        self.default_value = value;
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 读取属性值；属性不存在时回退到默认值，没有默认值则返回 `AttributeMissing`
    pub fn get_value(&self, tree: &T, node: T::Handle) -> Result<V, TableError> {
        match (self.func_get)(tree, node) {
            Some(value) => Ok(value),
            None => self
                .default_value
                .clone()
                .ok_or_else(|| TableError::AttributeMissing(self.name.clone())),
        }
    }

    /// 原样返回setter的结果
    pub fn set_value(&self, tree: &mut T, node: T::Handle, value: &V) -> bool {
        (self.func_set)(tree, node, value)
    }

    /// 节点上是否真实存储了该属性（忽略默认值）
    pub fn has_value(&self, tree: &T, node: T::Handle) -> bool {
        (self.func_get)(tree, node).is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::tree::test_tree::TestTree;

    /// 测试树上的数值属性，锁定的节点拒绝写入
    pub fn number_path() -> AttributePath<TestTree, i64> {
        AttributePath::new(
            "number",
            |tree: &TestTree, node: usize| tree.nodes[node].number,
            |tree: &mut TestTree, node: usize, value: &i64| {
                let target = &mut tree.nodes[node];
                if target.locked {
                    return false;
                }
                target.number = Some(*value);
                true
            },
        )
    }

    pub fn label_path() -> AttributePath<TestTree, String> {
        AttributePath::new(
            "label",
            |tree: &TestTree, node: usize| tree.nodes[node].label.clone(),
            |tree: &mut TestTree, node: usize, value: &String| {
                tree.nodes[node].label = Some(value.clone());
                true
            },
        )
    }

    #[test]
    fn test_get_present_value() {
        let (tree, ids) = TestTree::flat(&[5]);
        assert_eq!(number_path().get_value(&tree, ids[0]).unwrap(), 5);
    }

    #[test]
    fn test_missing_value_without_default_fails() {
        let mut tree = TestTree::new();
        let node = tree.add(0, None);

        let result = number_path().get_value(&tree, node);
        assert!(
            matches!(result, Err(TableError::AttributeMissing(ref name)) if name == "number"),
            "缺失属性应该返回AttributeMissing"
        );
    }

    #[test]
    fn test_missing_value_falls_back_to_default() {
        let mut tree = TestTree::new();
        let node = tree.add(0, None);
        let path = number_path().with_default(-1);

        assert_eq!(path.get_value(&tree, node).unwrap(), -1);
    }

    #[test]
    fn test_has_value_ignores_default() {
        let mut tree = TestTree::new();
        let empty = tree.add(0, None);
        let filled = tree.add(0, Some(3));
        let path = number_path().with_default(0);

        assert!(!path.has_value(&tree, empty), "默认值不算真实存储的值");
        assert!(path.has_value(&tree, filled));
    }

    #[test]
    fn test_set_value_returns_setter_result() {
        let (mut tree, ids) = TestTree::flat(&[1, 2]);
        tree.nodes[ids[1]].locked = true;
        let path = number_path();

        assert!(path.set_value(&mut tree, ids[0], &10));
        assert!(!path.set_value(&mut tree, ids[1], &20));
        assert_eq!(tree.nodes[ids[0]].number, Some(10));
        assert_eq!(tree.nodes[ids[1]].number, Some(2));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let (mut tree, ids) = TestTree::flat(&[7]);
        let path: AttributePath<TestTree, i64> =
            AttributePath::read_only("number", |tree: &TestTree, node: usize| {
                tree.nodes[node].number
            });

        assert!(!path.set_value(&mut tree, ids[0], &8));
        assert_eq!(path.get_value(&tree, ids[0]).unwrap(), 7);
    }

    #[test]
    fn test_reconfigure_default() {
        let mut tree = TestTree::new();
        let node = tree.add(0, None);
        let mut path = number_path().with_default(1);

        path.set_default(None);
        assert!(path.get_value(&tree, node).is_err());
        assert_eq!(path.default_value(), None);
    }
}
