pub mod registry;

pub use registry::SuiteRegistry;

use crate::error::Result;
use crate::runner::{LifecycleRunner, ReportSink, Statistics};
use crate::suite::RoleClassifier;
use std::sync::{Mutex, PoisonError};
use tracing::{error, info_span};
use uuid::Uuid;

// 同一进程内同时最多只有一次套件运行，避免两次运行的报告交错
static LAUNCH_LOCK: Mutex<()> = Mutex::new(());

/// 启动器：解析套件、分类方法、执行并把结果交给报告输出端
pub struct Launcher {
    registry: SuiteRegistry,
    sink: Box<dyn ReportSink>,
    runner: LifecycleRunner,
    strict_roles: bool,
}

impl Launcher {
    pub fn new(registry: SuiteRegistry, sink: impl ReportSink + 'static) -> Self {
        Self {
            registry,
            sink: Box::new(sink),
            runner: LifecycleRunner::new(),
            strict_roles: false,
        }
    }

    /// 严格模式下，带多个角色标记的方法会在运行前被拒绝
    pub fn with_strict_roles(mut self, strict: bool) -> Self {
        self.strict_roles = strict;
        self
    }

    pub fn registry(&self) -> &SuiteRegistry {
        &self.registry
    }

    /// 运行指定名称的套件
    ///
    /// 框架级错误（找不到套件、无法实例化、Setup/Teardown 失败）直接返回，
    /// 不会产生统计，也不会调用报告输出端。
    pub fn launch(&self, suite_name: &str) -> Result<Statistics> {
        let _guard = LAUNCH_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let run_id = Uuid::new_v4();
        let span = info_span!("launch", suite = suite_name, %run_id);
        let _enter = span.enter();

        let suite = self.registry.resolve(suite_name)?;
        if self.strict_roles {
            RoleClassifier::check_single_role(suite)?;
        }

        let roles = RoleClassifier::classify(suite);
        let report = self.runner.run(suite, &roles).inspect_err(|e| {
            error!(error = %e, "Suite could not be run");
        })?;

        self.sink.report(&report);
        Ok(report.statistics)
    }
}
