//! 性能基准测试模块
//!
//! 用于测试大规模图上的视图构建、表格生成和同步操作的性能

use std::time::Instant;

use crate::model::accessors::AttributeRegistry;
use crate::model::data_core::TableState;
use crate::model::diagram::{DiagramTree, NodeKind};
use crate::model::filter::{AttributeFilter, Filter};
use crate::model::selective_view::SelectiveView;

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

const COLORS: [&str; 4] = ["#dae8fc", "#f8cecc", "#d5e8d4", "#fff2cc"];

/// 生成大型测试图：每组一个容器，容器下有若干顶点和一条连线
pub fn generate_large_diagram(groups: usize, cells_per_group: usize) -> DiagramTree {
    let mut tree = DiagramTree::new("benchmark");
    let mut next_id = 1usize;

    for g in 0..groups {
        let group = tree.add_element(tree.root(), NodeKind::Element);
        tree.set_local_style(group, "id", next_id.to_string());
        next_id += 1;

        let mut first = None;
        let mut last = None;
        for c in 0..cells_per_group {
            let cell = tree.add_element(group, NodeKind::cell());
            tree.set_local_style(cell, "id", next_id.to_string());
            tree.set_local_style(cell, "value", format!("节点_{}_{}", g, c));
            tree.set_local_style(cell, "vertex", "1");
            if let Some(style) = tree.drawio_style_mut(cell) {
                style.insert("fillColor".to_string(), COLORS[c % COLORS.len()].to_string());
            }
            next_id += 1;
            first.get_or_insert(cell);
            last = Some(cell);
        }

        let edge = tree.add_element(group, NodeKind::arrow(first, last));
        tree.set_local_style(edge, "id", next_id.to_string());
        next_id += 1;
    }

    tree
}

/// 测试顶点视图构建性能
pub fn benchmark_view_build(tree: &DiagramTree) -> PerformanceResult {
    let start = Instant::now();
    let result = AttributeRegistry::diagram().path("vertex").and_then(|path| {
        let vertex = AttributeFilter::new(path, vec!["1".to_string()]);
        let filters: [&dyn Filter<DiagramTree>; 1] = [&vertex];
        SelectiveView::with_filter(tree, tree.root(), &filters)
    });
    let duration = start.elapsed();

    match result {
        Ok(view) => PerformanceResult::new(
            "视图构建",
            duration.as_millis(),
            !view.is_empty(),
            &format!("从 {} 个元素中选中 {} 个", tree.len(), view.len()),
        ),
        Err(e) => {
            let details = format!("构建失败: {}", e);
            PerformanceResult::new("视图构建", duration.as_millis(), false, &details)
        }
    }
}

/// 测试表格生成性能
pub fn benchmark_table_build(state: &TableState) -> PerformanceResult {
    let start = Instant::now();
    let result = state.render();
    let duration = start.elapsed();

    match result {
        Ok(table) => PerformanceResult::new(
            "表格生成",
            duration.as_millis(),
            true,
            &format!("生成了 {} 列，每列 {} 行", table.len(), state.view().len() + 1),
        ),
        Err(e) => {
            let details = format!("生成失败: {}", e);
            PerformanceResult::new("表格生成", duration.as_millis(), false, &details)
        }
    }
}

/// 测试未修改表格的同步（完整校验，但不写入）
pub fn benchmark_noop_sync(state: &mut TableState) -> PerformanceResult {
    let table = match state.render() {
        Ok(table) => table,
        Err(e) => {
            return PerformanceResult::new("空同步", 0, false, &format!("生成失败: {}", e))
        }
    };

    let start = Instant::now();
    let result = state.sync_table(&table);
    let duration = start.elapsed();

    match result {
        Ok(accepted) => PerformanceResult::new(
            "空同步",
            duration.as_millis(),
            accepted,
            &format!("同步了 {} 个节点", state.view().len()),
        ),
        Err(e) => {
            let details = format!("同步失败: {}", e);
            PerformanceResult::new("空同步", duration.as_millis(), false, &details)
        }
    }
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();

    // 测试不同规模的数据
    let test_cases = [
        (10, 10),  // 小型：10组，每组10个顶点
        (50, 40),  // 中型
        (100, 50), // 大型
    ];

    for (groups, cells) in test_cases {
        tracing::info!("测试规模：{}组，每组{}个顶点", groups, cells);

        let start = Instant::now();
        let tree = generate_large_diagram(groups, cells);
        results.push(PerformanceResult::new(
            &format!("数据生成({}x{})", groups, cells),
            start.elapsed().as_millis(),
            true,
            &format!("生成了 {} 个元素", tree.len()),
        ));

        results.push(benchmark_view_build(&tree));

        let mut state = TableState::new(tree);
        let setup = state
            .select_vertices()
            .and_then(|_| state.add_column("value", "Label"))
            .and_then(|_| state.add_column("fillColor", "Farbe"));
        if let Err(e) = setup {
            let details = format!("配置失败: {}", e);
            results.push(PerformanceResult::new("表格配置", 0, false, &details));
            continue;
        }
        state.add_id_column("ID");

        results.push(benchmark_table_build(&state));
        results.push(benchmark_noop_sync(&mut state));
    }

    results
}
