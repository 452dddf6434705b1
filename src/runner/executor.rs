use crate::error::{Result, RutestError};
use crate::runner::types::{Outcome, Statistics, StatisticsAggregator, SuiteReport, TestRecord};
use crate::suite::{
    InvokeError, Role, RoleClassifier, RoleSet, SuiteDefinition, SuiteInstance, TestFailure,
};
use chrono::Utc;
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

// panic hook 是进程级的，替换与恢复必须成对且互斥
static HOOK_LOCK: Mutex<()> = Mutex::new(());

/// 运行期间屏蔽默认 panic hook 的输出，drop 时恢复原来的 hook
///
/// 被捕获的 panic 已经记录在测试结果里，不需要再打印消息和 backtrace。
struct QuietPanics {
    previous: Option<PanicHook>,
    _lock: MutexGuard<'static, ()>,
}

impl QuietPanics {
    fn install() -> Self {
        let lock = HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| debug!(%info, "Captured panic")));
        Self {
            previous: Some(previous),
            _lock: lock,
        }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(previous);
        }
    }
}

/// 生命周期执行器
///
/// 每个测试方法都在全新的实例上执行：Setup → Test → Teardown。
/// 测试方法的失败被捕获并计数；Setup/Teardown 的失败会中止整个运行。
pub struct LifecycleRunner;

impl LifecycleRunner {
    pub fn new() -> Self {
        Self
    }

    /// 依次执行所有测试方法，返回完整报告
    pub fn run(&self, suite: &dyn SuiteDefinition, roles: &RoleSet) -> Result<SuiteReport> {
        RoleClassifier::check_unique_names(suite)?;

        let _quiet = QuietPanics::install();
        let started_at = Utc::now();
        let start = Instant::now();
        let mut aggregator = StatisticsAggregator::new();
        let mut records = Vec::with_capacity(roles.test.len());

        info!(
            suite = suite.name(),
            tests = roles.test.len(),
            "Running suite"
        );

        for (index, test) in roles.test.iter().enumerate() {
            let record = self.run_one(suite, roles, test, index + 1)?;
            aggregator.record(&record.outcome);
            records.push(record);
        }

        let statistics = aggregator.finalize();
        info!(
            suite = suite.name(),
            overall = statistics.overall,
            successful = statistics.successful,
            failed = statistics.failed,
            "Suite finished"
        );

        Ok(SuiteReport {
            suite: suite.name().to_string(),
            started_at,
            records,
            statistics,
            total_duration: start.elapsed(),
        })
    }

    /// 执行单个测试迭代
    fn run_one(
        &self,
        suite: &dyn SuiteDefinition,
        roles: &RoleSet,
        test: &str,
        test_number: usize,
    ) -> Result<TestRecord> {
        let mut instance = suite
            .instantiate()
            .map_err(|reason| RutestError::Instantiation {
                suite: suite.name().to_string(),
                reason,
            })?;

        for setup in &roles.setup {
            invoke_fatal(instance.as_mut(), Role::Setup, setup)?;
        }

        let start = Instant::now();
        let outcome = match invoke_isolated(instance.as_mut(), test) {
            Ok(()) => Outcome::Success,
            Err(failure) => {
                warn!(test, error = %failure, "Test failed");
                Outcome::Failure {
                    message: failure.message,
                }
            }
        };
        let duration = start.elapsed();

        // Teardown 总会执行，不管测试是否失败
        for teardown in &roles.teardown {
            invoke_fatal(instance.as_mut(), Role::Teardown, teardown)?;
        }

        debug!(test, success = outcome.is_success(), "Test iteration complete");

        Ok(TestRecord {
            test_number,
            name: test.to_string(),
            outcome,
            duration,
        })
    }
}

impl Default for LifecycleRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// 执行套件并只返回统计
pub fn run_suite(suite: &dyn SuiteDefinition, roles: &RoleSet) -> Result<Statistics> {
    LifecycleRunner::new()
        .run(suite, roles)
        .map(|report| report.statistics)
}

/// 在失败隔离区内调用方法：错误和 panic 都被折叠为 [`TestFailure`]
fn invoke_isolated(instance: &mut dyn SuiteInstance, method: &str) -> std::result::Result<(), TestFailure> {
    debug!(method, "Invoking test");
    match panic::catch_unwind(AssertUnwindSafe(|| instance.invoke(method))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(InvokeError::Raised(failure))) => Err(failure),
        Ok(Err(e @ InvokeError::NotFound(_))) => Err(TestFailure::new(e.to_string())),
        Err(payload) => Err(TestFailure::from_panic(payload)),
    }
}

/// 调用 Setup/Teardown 方法，任何失败都是致命的
fn invoke_fatal(instance: &mut dyn SuiteInstance, phase: Role, method: &str) -> Result<()> {
    debug!(%phase, method, "Invoking lifecycle method");
    let reason = match panic::catch_unwind(AssertUnwindSafe(|| instance.invoke(method))) {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => TestFailure::from_panic(payload).message,
    };

    Err(RutestError::Invocation {
        phase,
        method: method.to_string(),
        reason,
    })
}
