//! 程序入口：初始化日志，构建示例图并演示表格的导出与同步

use std::path::PathBuf;

use anyhow::Context;
use bijective_table::{DiagramTree, Table, TableState};
use tracing_subscriber::fmt::SubscriberBuilder;

/// 未提供编辑文件时使用的修改：ID 不可写，标签与颜色可写
fn builtin_edits() -> Table {
    [
        ["ID-Spalte", "3", "4", "6", "7"],
        ["Label", "E", "E", "G", "H"],
        ["Farbe", "E", "E", "G", "H"],
    ]
    .iter()
    .map(|column| column.iter().map(|cell| cell.to_string()).collect())
    .collect()
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let edit_file = std::env::args().nth(1).map(PathBuf::from);

    let mut state = TableState::new(DiagramTree::sample());
    state.select_vertices()?;
    state.add_id_column("ID-Spalte");
    state.add_column("value", "Label")?;
    state.add_column("fillColor", "Farbe")?;

    println!("valid: {}", state.is_valid()?);
    println!("Table dump:");
    print!("{}", state.dump_table()?);

    let synced = match &edit_file {
        Some(path) => state
            .import_table(path)
            .with_context(|| format!("无法导入编辑文件 {}", path.display()))?,
        None => state.sync_table(&builtin_edits())?,
    };
    println!("sync success: {}", synced);
    println!("valid: {}", state.is_valid()?);

    println!("Table_new dump:");
    print!("{}", state.dump_table()?);

    Ok(())
}
