use crate::error::{Result, RutestError};
use crate::suite::types::{Role, SuiteDefinition};
use std::collections::HashSet;

/// 按角色分类后的方法名列表，每个列表保持声明顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub setup: Vec<String>,
    pub test: Vec<String>,
    pub teardown: Vec<String>,
}

impl RoleSet {
    /// 获取指定角色的方法列表
    pub fn for_role(&self, role: Role) -> &[String] {
        match role {
            Role::Setup => &self.setup,
            Role::Test => &self.test,
            Role::Teardown => &self.teardown,
        }
    }

    fn push(&mut self, role: Role, name: &str) {
        let list = match role {
            Role::Setup => &mut self.setup,
            Role::Test => &mut self.test,
            Role::Teardown => &mut self.teardown,
        };
        list.push(name.to_string());
    }
}

/// 角色分类器
pub struct RoleClassifier;

impl RoleClassifier {
    /// 将套件的方法分到 Setup / Test / Teardown 三个列表
    ///
    /// 带多个标记的方法会独立出现在每个对应列表中；没有标记的方法被忽略。
    pub fn classify(suite: &dyn SuiteDefinition) -> RoleSet {
        let mut roles = RoleSet::default();

        for method in suite.methods() {
            for role in Role::ALL {
                if method.roles.contains(role) {
                    roles.push(role, &method.name);
                }
            }
        }

        roles
    }

    /// 严格模式：拒绝同时带有多个角色标记的方法
    pub fn check_single_role(suite: &dyn SuiteDefinition) -> Result<()> {
        match suite.methods().into_iter().find(|m| m.roles.len() > 1) {
            Some(method) => Err(RutestError::MultiRole {
                method: method.name,
                roles: method.roles.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 方法按名称分派，因此同一套件内的方法名必须唯一
    pub fn check_unique_names(suite: &dyn SuiteDefinition) -> Result<()> {
        let mut seen = HashSet::new();
        for method in suite.methods() {
            if !seen.insert(method.name.clone()) {
                return Err(RutestError::DuplicateMethod {
                    suite: suite.name().to_string(),
                    method: method.name,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::{RoleMarkers, Suite};

    #[derive(Default)]
    struct Empty;

    fn sample_suite() -> Suite<Empty> {
        Suite::<Empty>::with_default("sample")
            .setup("open", |_| ())
            .test("t1", |_| ())
            .method("untagged", RoleMarkers::NONE, |_| ())
            .teardown("close", |_| ())
            .test("t2", |_| ())
            .setup("seed", |_| ())
    }

    #[test]
    fn test_classify_preserves_order() {
        let roles = RoleClassifier::classify(&sample_suite());
        assert_eq!(roles.setup, vec!["open", "seed"]);
        assert_eq!(roles.test, vec!["t1", "t2"]);
        assert_eq!(roles.teardown, vec!["close"]);
        assert_eq!(roles.for_role(Role::Test), ["t1", "t2"]);
    }

    #[test]
    fn test_classify_multi_role_method_appears_in_each_list() {
        let suite = Suite::<Empty>::with_default("multi")
            .method("both", [Role::Setup, Role::Test], |_| ())
            .test("other", |_| ());

        let roles = RoleClassifier::classify(&suite);
        assert_eq!(roles.setup, vec!["both"]);
        assert_eq!(roles.test, vec!["both", "other"]);
        assert!(roles.teardown.is_empty());

        match RoleClassifier::check_single_role(&suite) {
            Err(RutestError::MultiRole { method, roles }) => {
                assert_eq!(method, "both");
                assert_eq!(roles, "Setup, Test");
            }
            other => panic!("Expected MultiRole, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_method_names_are_rejected() {
        let suite = Suite::<Empty>::with_default("dup")
            .test("check", |_| ())
            .teardown("check", |_| ());

        match RoleClassifier::check_unique_names(&suite) {
            Err(RutestError::DuplicateMethod { suite, method }) => {
                assert_eq!(suite, "dup");
                assert_eq!(method, "check");
            }
            other => panic!("Expected DuplicateMethod, got {:?}", other),
        }
        assert!(RoleClassifier::check_unique_names(&sample_suite()).is_ok());
    }

    #[test]
    fn test_classify_empty_suite() {
        let suite = Suite::<Empty>::with_default("empty");
        assert_eq!(RoleClassifier::classify(&suite), RoleSet::default());
        assert!(RoleClassifier::check_single_role(&suite).is_ok());
        assert!(RoleClassifier::check_unique_names(&suite).is_ok());
    }
}
