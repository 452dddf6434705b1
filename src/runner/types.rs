use chrono::{DateTime, Utc};
use std::time::Duration;

/// 单个测试方法的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// 测试方法抛出了失败（返回错误、panic 或无法分派）
    Failure { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// 单个测试方法的执行记录
#[derive(Debug, Clone)]
pub struct TestRecord {
    /// 测试序号（从 1 开始）
    pub test_number: usize,

    /// 测试方法名称
    pub name: String,

    /// 执行结果
    pub outcome: Outcome,

    /// 测试方法本身的耗时（不含 Setup/Teardown）
    pub duration: Duration,
}

/// 汇总统计，`overall == successful + failed`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub overall: usize,
    pub successful: usize,
    pub failed: usize,
}

/// 统计聚合器
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    stats: Statistics,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次完成的测试迭代
    pub fn record(&mut self, outcome: &Outcome) {
        self.stats.overall += 1;
        if outcome.is_success() {
            self.stats.successful += 1;
        } else {
            self.stats.failed += 1;
        }
    }

    /// 返回当前累计的统计（可重复调用）
    pub fn finalize(&self) -> Statistics {
        self.stats
    }
}

/// 一次完整套件运行的报告
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub records: Vec<TestRecord>,
    pub statistics: Statistics,
    pub total_duration: Duration,
}
