//! 列：一个属性路径 + 一个到字符串的转换器 + 表头
//!
//! `sync_with` 只在编辑后的列不会把两个不同的值合并、也不会引入歧义值时才写回树。

use std::collections::HashSet;
use std::hash::Hash;

use crate::model::attribute_path::AttributePath;
use crate::model::error::TableError;
use crate::model::selective_view::SelectiveView;
use crate::model::transform::ValueTransform;
use crate::model::tree::NodeTree;

/// 与具体属性类型无关的列接口，便于在一张表里混合不同类型的列
pub trait Column<T: NodeTree> {
    fn header(&self) -> &str;

    /// 第 0 行为表头，其余每个视图节点一行
    fn build(&self, tree: &T, view: &SelectiveView<T::Handle>) -> Result<Vec<String>, TableError>;

    fn is_valid(&self, tree: &T, view: &SelectiveView<T::Handle>) -> Result<bool, TableError>;

    /// `edited` 包含表头；返回 `false` 表示拒绝同步或有 setter 拒绝写入
    fn sync_with(
        &self,
        tree: &mut T,
        view: &SelectiveView<T::Handle>,
        edited: &[String],
    ) -> Result<bool, TableError>;
}

pub struct AttributeColumn<T: NodeTree, V> {
    linked_attr: AttributePath<T, V>,
    modifier_pipe: ValueTransform<V, String>,
    header: String,
}

impl<T: NodeTree, V> AttributeColumn<T, V> {
    pub fn new(
        linked_attr: AttributePath<T, V>,
        modifier_pipe: ValueTransform<V, String>,
        header: impl Into<String>,
    ) -> Self {
        Self {
            linked_attr,
            modifier_pipe,
            header: header.into(),
        }
    }

    pub fn linked_attr(&self) -> &AttributePath<T, V> {
        &self.linked_attr
    }

    pub fn linked_attr_mut(&mut self) -> &mut AttributePath<T, V> {
        &mut self.linked_attr
    }
}

impl<T, V> AttributeColumn<T, V>
where
    T: NodeTree,
    V: Clone + Eq + Hash + 'static,
{
    /// 编辑列中"新引入"的字符串（当前列里不存在的）必须满足：
    /// 是转换的不动点、还原值不与现有值冲突、且彼此之间数量上一一对应。
    fn admits_new_values(
        &self,
        current_cells: &[String],
        current_values: &[V],
        edited_cells: &[String],
    ) -> Result<bool, TableError> {
        let current_cells: HashSet<&String> = current_cells.iter().collect();
        let current_values: HashSet<&V> = current_values.iter().collect();
        let mut reached_vals: Vec<V> = Vec::new();
        let mut reached_val_keys: Vec<String> = Vec::new();

        for cell in edited_cells {
            if current_cells.contains(cell) {
                continue;
            }

            let reverted = self.modifier_pipe.revert(cell)?;
            let applied = self.modifier_pipe.apply(&reverted)?;

            if applied != *cell {
                tracing::warn!(
                    "列 '{}': '{}' 经转换后变为 '{}'，拒绝同步",
                    self.header,
                    cell,
                    applied
                );
                return Ok(false);
            }
            if current_values.contains(&reverted) {
                tracing::warn!(
                    "列 '{}': '{}' 的还原值与现有值冲突，拒绝同步",
                    self.header,
                    cell
                );
                return Ok(false);
            }

            reached_vals.push(reverted);
            reached_val_keys.push(applied);
        }

        for (val, key) in reached_vals.iter().zip(&reached_val_keys) {
            let count_val = reached_vals.iter().filter(|v| *v == val).count();
            let count_key = reached_val_keys.iter().filter(|k| *k == key).count();
            if count_val != count_key {
                tracing::warn!("列 '{}': 新值 '{}' 与其他新值冲突，拒绝同步", self.header, key);
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl<T, V> Column<T> for AttributeColumn<T, V>
where
    T: NodeTree,
    V: Clone + Eq + Hash + 'static,
{
    fn header(&self) -> &str {
        &self.header
    }

    fn build(&self, tree: &T, view: &SelectiveView<T::Handle>) -> Result<Vec<String>, TableError> {
        let mut column = Vec::with_capacity(view.len() + 1);
        column.push(self.header.clone());
        for &node in view.nodes() {
            let val = self.linked_attr.get_value(tree, node)?;
            column.push(self.modifier_pipe.apply(&val)?);
        }
        Ok(column)
    }

    fn is_valid(&self, tree: &T, view: &SelectiveView<T::Handle>) -> Result<bool, TableError> {
        // 预判 build 是否会因缺失属性而失败
        let has_default = self.linked_attr.default_value().is_some();
        for &node in view.nodes() {
            if !has_default && !self.linked_attr.has_value(tree, node) {
                return Ok(false);
            }
        }

        self.modifier_pipe
            .is_bijective_over(tree, &self.linked_attr, view)
    }

    fn sync_with(
        &self,
        tree: &mut T,
        view: &SelectiveView<T::Handle>,
        edited: &[String],
    ) -> Result<bool, TableError> {
        if !self.is_valid(tree, view)? {
            tracing::warn!("列 '{}' 在当前视图上无效，拒绝同步", self.header);
            return Ok(false);
        }

        // 去掉表头
        let Some((_, edited_cells)) = edited.split_first() else {
            tracing::warn!("列 '{}' 缺少表头", self.header);
            return Ok(false);
        };
        if edited_cells.len() != view.len() {
            tracing::warn!(
                "列 '{}' 行数不符: {} != {}",
                self.header,
                edited_cells.len(),
                view.len()
            );
            return Ok(false);
        }

        let current_cells: Vec<String> = self.build(tree, view)?.into_iter().skip(1).collect();
        let current_values = current_cells
            .iter()
            .map(|cell| self.modifier_pipe.revert(cell))
            .collect::<Result<Vec<V>, _>>()?;

        if !self.admits_new_values(&current_cells, &current_values, edited_cells)? {
            return Ok(false);
        }

        let mut success_flag = true;
        for (row, (&node, cell)) in view.nodes().iter().zip(edited_cells).enumerate() {
            let val_new = self.modifier_pipe.revert(cell)?;
            // 重新读取，节点可能在 build 之后被修改过
            let val_old = self.linked_attr.get_value(tree, node)?;

            if val_old != val_new {
                let accepted = self.linked_attr.set_value(tree, node, &val_new);
                tracing::debug!(
                    "列 '{}' 第 {} 行写入 '{}': {}",
                    self.header,
                    row + 1,
                    cell,
                    if accepted { "成功" } else { "被拒绝" }
                );
                success_flag &= accepted;
            }
        }

        Ok(success_flag)
    }
}
