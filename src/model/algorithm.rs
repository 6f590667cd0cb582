//! 双射表格算法：一个视图 + 有序的列集合
//!
//! 使用步骤：
//! 1. 为需要的属性构建 `AttributePath`
//! 2. 用属性路径和允许值构建过滤器，并据此生成 `SelectiveView`
//! 3. 构建到字符串的 `ValueTransform`（可以由多个转换器串联）
//! 4. 用路径与转换器构建列并注册，检查 `is_valid` 后生成或同步表格
//!
//! 表格与列的对应关系按位置而非表头文本确定。

use crate::model::column::Column;
use crate::model::error::TableError;
use crate::model::filter::Filter;
use crate::model::selective_view::SelectiveView;
use crate::model::tree::NodeTree;

/// 按列存储的表格：每列第 0 行是表头，其余每行对应一个视图节点
pub type Table = Vec<Vec<String>>;

pub struct BijectiveAlgorithm<T: NodeTree> {
    pub view: SelectiveView<T::Handle>,
    columns: Vec<Box<dyn Column<T>>>,
}

impl<T: NodeTree> BijectiveAlgorithm<T> {
    pub fn new(view: SelectiveView<T::Handle>) -> Self {
        Self {
            view,
            columns: Vec::new(),
        }
    }

    pub fn register_column<C>(&mut self, column: C)
    where
        C: Column<T> + 'static,
    {
        self.columns.push(Box::new(column));
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header()).collect()
    }

    /// 用新的过滤条件重新生成视图
    pub fn refresh_view(
        &mut self,
        tree: &T,
        root: T::Handle,
        filters: &[&dyn Filter<T>],
    ) -> Result<(), TableError> {
        self.view.apply_filter(tree, root, filters)
    }

    /// 按注册顺序生成所有列
    pub fn apply(&self, tree: &T) -> Result<Table, TableError> {
        self.columns
            .iter()
            .map(|column| column.build(tree, &self.view))
            .collect()
    }

    pub fn is_valid(&self, tree: &T) -> Result<bool, TableError> {
        for column in &self.columns {
            if !column.is_valid(tree, &self.view)? {
                tracing::debug!("列 '{}' 无效", column.header());
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// 按位置将 `table` 的每一列同步到对应的注册列
    ///
    /// 形状检查通过后所有列都会依次尝试，前面的列失败不会阻止后面的列；
    /// 已写入的列不会回滚。返回所有列结果的与。
    pub fn sync_with(&self, tree: &mut T, table: &[Vec<String>]) -> Result<bool, TableError> {
        if !self.is_valid(tree)? {
            tracing::warn!("表格在当前视图上无效，拒绝同步");
            return Ok(false);
        }

        if table.len() != self.columns.len() {
            tracing::warn!("列数不符: {} != {}", table.len(), self.columns.len());
            return Ok(false);
        }

        // 每列需要 1 行表头 + 每个视图节点一行
        let view_size = self.view.len();
        if let Some(bad) = table.iter().position(|col| col.len() != view_size + 1) {
            tracing::warn!("第 {} 列行数不符，视图共 {} 个节点", bad + 1, view_size);
            return Ok(false);
        }

        let mut success_flag = true;
        for (column, edited) in self.columns.iter().zip(table) {
            let ret_val = column.sync_with(tree, &self.view, edited)?;
            success_flag &= ret_val;
            tracing::info!("列 '{}' 同步完成: {}", column.header(), ret_val);
        }
        Ok(success_flag)
    }
}
