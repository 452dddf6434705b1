use crate::runner::types::{Outcome, SuiteReport, TestRecord};
use colored::Colorize;

/// 报告输出端，接收一次运行的最终结果
pub trait ReportSink: Send + Sync {
    fn report(&self, report: &SuiteReport);
}

/// 控制台报告器
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// 开启或关闭颜色输出（进程级设置）
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// 将完整报告渲染为字符串
    pub fn render(&self, report: &SuiteReport) -> String {
        let mut output = Vec::new();
        output.push(self.render_header(report));
        output.push(String::new());

        for record in &report.records {
            output.extend(self.render_record(record));
        }

        output.push(render_summary(report));
        output.join("\n")
    }

    fn render_header(&self, report: &SuiteReport) -> String {
        format!(
            "Running {} tests from {} (started {})...",
            report.records.len(),
            report.suite.bold(),
            report.started_at.format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// 单个测试结果
    fn render_record(&self, record: &TestRecord) -> Vec<String> {
        let mut lines = Vec::new();
        let symbol = match record.outcome {
            Outcome::Success => "✓".green(),
            Outcome::Failure { .. } => "✗".red(),
        };

        if self.verbose {
            lines.push(format!(
                " {} [{}] {} ({}ms)",
                symbol,
                record.test_number,
                record.name,
                record.duration.as_millis()
            ));
        } else {
            lines.push(format!(" {} [{}] {}", symbol, record.test_number, record.name));
        }

        // 失败时总是显示原因
        if let Outcome::Failure { message } = &record.outcome {
            lines.push(format!("   {}: {}", "Error".red().bold(), message));
        }

        lines
    }
}

/// 统计摘要，每个字段一行
fn render_summary(report: &SuiteReport) -> String {
    let stats = &report.statistics;
    let mut lines = vec![
        String::new(),
        "━".repeat(50),
        format!("{}", "Summary".bold()),
        "━".repeat(50),
    ];

    lines.push(format!("  Overall tests: {}", stats.overall));
    lines.push(format!(
        "  Successful tests: {}",
        stats.successful.to_string().green()
    ));
    if stats.failed == 0 {
        lines.push(format!("  Failed tests: {}", stats.failed));
    } else {
        lines.push(format!("  Failed tests: {}", stats.failed.to_string().red()));
    }
    lines.push(format!(
        "  {}: {:.3}s",
        "Duration".bold(),
        report.total_duration.as_secs_f64()
    ));

    lines.join("\n")
}

impl ReportSink for ConsoleReporter {
    fn report(&self, report: &SuiteReport) {
        println!("\n{}\n", self.render(report));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::types::Statistics;
    use chrono::Utc;
    use std::time::Duration;

    fn sample_report() -> SuiteReport {
        SuiteReport {
            suite: "calculator".to_string(),
            started_at: Utc::now(),
            records: vec![
                TestRecord {
                    test_number: 1,
                    name: "adds".to_string(),
                    outcome: Outcome::Success,
                    duration: Duration::from_millis(3),
                },
                TestRecord {
                    test_number: 2,
                    name: "divides".to_string(),
                    outcome: Outcome::Failure {
                        message: "division by zero".to_string(),
                    },
                    duration: Duration::from_millis(1),
                },
            ],
            statistics: Statistics {
                overall: 2,
                successful: 1,
                failed: 1,
            },
            total_duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_render_contains_counts() {
        ConsoleReporter::set_color(false);
        let rendered = ConsoleReporter::new(false).render(&sample_report());

        assert!(rendered.contains("Running 2 tests from calculator"));
        assert!(rendered.contains("Overall tests: 2"));
        assert!(rendered.contains("Successful tests: 1"));
        assert!(rendered.contains("Failed tests: 1"));
        assert!(rendered.contains("[2] divides"));
        assert!(rendered.contains("Error: division by zero"));
    }

    #[test]
    fn test_verbose_shows_duration() {
        ConsoleReporter::set_color(false);
        let rendered = ConsoleReporter::new(true).render(&sample_report());
        assert!(rendered.contains("[1] adds (3ms)"));
    }
}
