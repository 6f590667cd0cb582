//! 选择视图：将树按先序展开为扁平节点列表，并只保留通过全部过滤器的节点

use crate::model::error::TableError;
use crate::model::filter::Filter;
use crate::model::tree::NodeTree;

/// 视图只保存节点句柄，不拥有节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectiveView<H> {
    view_nodes: Vec<H>,
}

impl<H> Default for SelectiveView<H> {
    fn default() -> Self {
        Self {
            view_nodes: Vec::new(),
        }
    }
}

impl<H: Copy> SelectiveView<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构建视图并立即应用过滤器
    pub fn with_filter<T>(tree: &T, root: H, filters: &[&dyn Filter<T>]) -> Result<Self, TableError>
    where
        T: NodeTree<Handle = H>,
    {
        let mut view = Self::new();
        view.apply_filter(tree, root, filters)?;
        Ok(view)
    }

    /// 清空当前选择，先序遍历 `root` 的全部后代（不含 `root`），
    /// 按顺序保留通过所有过滤器的节点。遇到第一个拒绝的过滤器即停止对该节点的判断。
    ///
    /// 过滤器报错时视图保持为空。
    pub fn apply_filter<T>(
        &mut self,
        tree: &T,
        root: H,
        filters: &[&dyn Filter<T>],
    ) -> Result<(), TableError>
    where
        T: NodeTree<Handle = H>,
    {
        self.view_nodes.clear();

        fn walk<T: NodeTree>(
            tree: &T,
            parent: T::Handle,
            filters: &[&dyn Filter<T>],
            out: &mut Vec<T::Handle>,
        ) -> Result<(), TableError> {
            for &child in tree.children(parent) {
                let mut accepted = true;
                for filter in filters {
                    if !filter.accepts(tree, child)? {
                        accepted = false;
                        break;
                    }
                }
                if accepted {
                    out.push(child);
                }
                walk(tree, child, filters, out)?;
            }
            Ok(())
        }

        let mut selected = Vec::new();
        walk(tree, root, filters, &mut selected)?;
        tracing::debug!("视图筛选完成: {} 个节点", selected.len());
        self.view_nodes = selected;
        Ok(())
    }

    pub fn nodes(&self) -> &[H] {
        &self.view_nodes
    }

    pub fn len(&self) -> usize {
        self.view_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_nodes.is_empty()
    }
}
