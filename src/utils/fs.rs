//! IO helper: safe file read/write for JSON tables

use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;

use crate::model::algorithm::Table;
use crate::model::error::TableError;

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, TableError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（格式化输出）
pub fn write_json_file(p: &Path, value: &Value) -> Result<(), TableError> {
    let f = File::create(p)?;
    serde_json::to_writer_pretty(f, value)?;
    Ok(())
}

/// 将JSON值转换为表格：必须是字符串数组的数组（按列存储，表头在前）
pub fn table_from_json(value: &Value) -> Result<Table, TableError> {
    let columns = value
        .as_array()
        .ok_or_else(|| TableError::Format("表格必须是列的数组".into()))?;

    columns
        .iter()
        .enumerate()
        .map(|(col_idx, column)| {
            let cells = column
                .as_array()
                .ok_or_else(|| TableError::Format(format!("第 {} 列不是数组", col_idx + 1)))?;
            cells
                .iter()
                .enumerate()
                .map(|(row_idx, cell)| {
                    cell.as_str().map(str::to_string).ok_or_else(|| {
                        TableError::Format(format!(
                            "第 {} 列第 {} 行不是字符串: {}",
                            col_idx + 1,
                            row_idx,
                            cell
                        ))
                    })
                })
                .collect()
        })
        .collect()
}

pub fn read_table_file(p: &Path) -> Result<Table, TableError> {
    table_from_json(&read_json_file(p)?)
}

pub fn write_table_file(p: &Path, table: &Table) -> Result<(), TableError> {
    write_json_file(p, &serde_json::to_value(table)?)
}
