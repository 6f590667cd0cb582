//! 运行性能基准测试并打印结果

use bijective_table::model::performance::run_performance_suite;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() {
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let results = run_performance_suite();

    println!("{:<28} {:>10}  {:<6} 详情", "操作", "耗时(ms)", "结果");
    for r in &results {
        println!(
            "{:<28} {:>10}  {:<6} {}",
            r.operation,
            r.duration_ms,
            if r.success { "成功" } else { "失败" },
            r.details
        );
    }

    let failed = results.iter().filter(|r| !r.success).count();
    println!("共 {} 项，失败 {} 项", results.len(), failed);
}
