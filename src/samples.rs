//! 内置示例套件，使 `rutest` 命令行无需额外代码即可运行

use crate::launcher::SuiteRegistry;
use crate::suite::Suite;

/// 简单的整数计算器，作为示例套件的被测对象
#[derive(Debug, Default)]
pub struct Calculator {
    accumulator: i64,
}

impl Calculator {
    pub fn add(&mut self, value: i64) -> i64 {
        self.accumulator += value;
        self.accumulator
    }

    pub fn divide(&mut self, divisor: i64) -> Result<i64, String> {
        if divisor == 0 {
            return Err("division by zero".to_string());
        }
        self.accumulator /= divisor;
        Ok(self.accumulator)
    }

    pub fn value(&self) -> i64 {
        self.accumulator
    }
}

/// 示例套件的实例状态
#[derive(Debug, Default)]
pub struct CalculatorFixture {
    calc: Calculator,
}

/// 全部通过的计算器套件
pub fn calculator_suite() -> Suite<CalculatorFixture> {
    Suite::<CalculatorFixture>::with_default("calculator")
        .setup("start_at_ten", |f| {
            f.calc.add(10);
        })
        .test("adds", |f| assert_eq!(f.calc.add(5), 15))
        .test("divides", |f| -> Result<(), String> {
            let value = f.calc.divide(2)?;
            if value == 5 {
                Ok(())
            } else {
                Err(format!("expected 5, got {}", value))
            }
        })
        .test("starts_fresh", |f| assert_eq!(f.calc.value(), 10))
        .teardown("reset", |f| f.calc = Calculator::default())
}

/// 同时包含成功与失败的演示套件
pub fn showcase_suite() -> Suite<CalculatorFixture> {
    Suite::<CalculatorFixture>::with_default("showcase")
        .test("passes", |f| assert_eq!(f.calc.add(1), 1))
        .test("divide_by_zero", |f| f.calc.divide(0).map(|_| ()))
        .test("wrong_expectation", |f| assert_eq!(f.calc.add(2), 3, "2 is not 3"))
        .test("still_runs", |f| assert_eq!(f.calc.value(), 0))
        .teardown("cleanup", |f| f.calc = Calculator::default())
}

/// 注册全部内置示例套件
pub fn builtin_registry() -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    registry
        .register(calculator_suite())
        .register(showcase_suite());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_suite;
    use crate::suite::RoleClassifier;

    #[test]
    fn test_calculator_suite_passes() {
        let suite = calculator_suite();
        let stats = run_suite(&suite, &RoleClassifier::classify(&suite)).unwrap();
        assert_eq!(stats.overall, 3);
        assert_eq!(stats.failed, 0);
    }

    #[test]
    fn test_showcase_suite_mixed() {
        let suite = showcase_suite();
        let stats = run_suite(&suite, &RoleClassifier::classify(&suite)).unwrap();
        assert_eq!(stats.overall, 4);
        assert_eq!(stats.successful, 2);
        assert_eq!(stats.failed, 2);
    }

    #[test]
    fn test_builtin_registry() {
        let registry = builtin_registry();
        assert!(registry.resolve("calculator").is_ok());
        assert!(registry.resolve("showcase").is_ok());
    }
}
