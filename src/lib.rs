//! 双射表格工具库
//!
//! 将树结构中选中节点的属性导出为按列存储的字符串表格，
//! 并在保证编辑不破坏一一对应关系的前提下把修改同步回树

pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::algorithm::{BijectiveAlgorithm, Table};
pub use model::attribute_path::AttributePath;
pub use model::column::{AttributeColumn, Column};
pub use model::data_core::TableState;
pub use model::diagram::{DiagramTree, NodeId, NodeKind};
pub use model::error::{TableError, TransformError};
pub use model::filter::{AttributeFilter, Filter, FilterFunction};
pub use model::selective_view::SelectiveView;
pub use model::transform::ValueTransform;
pub use model::tree::NodeTree;
