//! TableState：图、属性注册表与双射算法的组合状态

use std::path::Path;

use crate::model::accessors::{id_path, AttributeRegistry};
use crate::model::algorithm::{BijectiveAlgorithm, Table};
use crate::model::column::AttributeColumn;
use crate::model::diagram::{DiagramTree, NodeId};
use crate::model::error::TableError;
use crate::model::filter::{AttributeFilter, Filter};
use crate::model::selective_view::SelectiveView;
use crate::model::transform::ValueTransform;
use crate::utils::fs::{read_table_file, write_table_file};

pub struct TableState {
    pub tree: DiagramTree,
    registry: AttributeRegistry,
    algorithm: BijectiveAlgorithm<DiagramTree>,
}

impl TableState {
    /// 使用默认的图属性注册表
    pub fn new(tree: DiagramTree) -> Self {
        Self::with_registry(tree, AttributeRegistry::diagram())
    }

    pub fn with_registry(tree: DiagramTree, registry: AttributeRegistry) -> Self {
        Self {
            tree,
            registry,
            algorithm: BijectiveAlgorithm::new(SelectiveView::new()),
        }
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn view(&self) -> &SelectiveView<NodeId> {
        &self.algorithm.view
    }

    pub fn headers(&self) -> Vec<&str> {
        self.algorithm.headers()
    }

    /// 从根节点重新选择视图，返回选中的节点数
    pub fn select(&mut self, filters: &[&dyn Filter<DiagramTree>]) -> Result<usize, TableError> {
        let root = self.tree.root();
        self.algorithm.refresh_view(&self.tree, root, filters)?;
        tracing::info!("视图包含 {} 个节点", self.algorithm.view.len());
        Ok(self.algorithm.view.len())
    }

    /// 只选择 `vertex == "1"` 的元素
    pub fn select_vertices(&mut self) -> Result<usize, TableError> {
        let vertex = AttributeFilter::new(self.registry.path("vertex")?, vec!["1".to_string()]);
        let filters: [&dyn Filter<DiagramTree>; 1] = [&vertex];
        self.select(&filters)
    }

    /// 按注册表中的名字添加字符串列（值原样显示）
    pub fn add_column(&mut self, attr: &str, header: impl Into<String>) -> Result<(), TableError> {
        let path = self.registry.path(attr)?;
        self.algorithm
            .register_column(AttributeColumn::new(path, ValueTransform::identity(), header));
        Ok(())
    }

    /// 添加整数ID列，以十进制字符串显示
    pub fn add_id_column(&mut self, header: impl Into<String>) {
        self.algorithm.register_column(AttributeColumn::new(
            id_path(),
            ValueTransform::display_parse(),
            header,
        ));
    }

    pub fn is_valid(&self) -> Result<bool, TableError> {
        self.algorithm.is_valid(&self.tree)
    }

    pub fn render(&self) -> Result<Table, TableError> {
        self.algorithm.apply(&self.tree)
    }

    pub fn sync_table(&mut self, table: &[Vec<String>]) -> Result<bool, TableError> {
        self.algorithm.sync_with(&mut self.tree, table)
    }

    /// 将当前表格写入JSON文件
    pub fn export_table(&self, path: &Path) -> Result<(), TableError> {
        let table = self.render()?;
        write_table_file(path, &table)?;
        tracing::info!("表格已导出到 {}", path.display());
        Ok(())
    }

    /// 读取JSON表格文件并同步回图
    pub fn import_table(&mut self, path: &Path) -> Result<bool, TableError> {
        let table = read_table_file(path)?;
        tracing::info!("从 {} 读取了 {} 列", path.display(), table.len());
        self.sync_table(&table)
    }

    /// 每列一行，单元格加引号并以制表符结尾
    pub fn dump_table(&self) -> Result<String, TableError> {
        let table = self.render()?;
        let mut out = String::new();
        for column in &table {
            for cell in column {
                out.push('"');
                out.push_str(cell);
                out.push_str("\"\t");
            }
            out.push('\n');
        }
        Ok(out)
    }
}
