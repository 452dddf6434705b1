use crate::suite::types::{
    IntoMethodResult, InvokeError, MethodDescriptor, MethodResult, Role, RoleMarkers,
    SuiteDefinition, SuiteInstance,
};
use std::fmt;

type Factory<S> = Box<dyn Fn() -> std::result::Result<S, String> + Send + Sync>;
type Body<S> = Box<dyn Fn(&mut S) -> MethodResult + Send + Sync>;

struct SuiteMethod<S> {
    name: String,
    roles: RoleMarkers,
    body: Body<S>,
}

/// 基于普通 Rust 类型 `S` 的测试套件定义
///
/// 方法按照注册顺序声明，每个方法携带自己的角色标记。
///
/// ```
/// use rutest::suite::Suite;
///
/// #[derive(Default)]
/// struct Counter {
///     value: u32,
/// }
///
/// let suite = Suite::<Counter>::with_default("counter")
///     .setup("reset", |c| c.value = 1)
///     .test("is_one", |c| assert_eq!(c.value, 1));
/// # let _ = suite;
/// ```
pub struct Suite<S> {
    name: String,
    factory: Factory<S>,
    methods: Vec<SuiteMethod<S>>,
}

impl<S: 'static> Suite<S> {
    /// 使用不会失败的构造函数创建套件
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self::try_new(name, move || Ok::<S, String>(factory()))
    }

    /// 使用可能失败的构造函数创建套件，构造失败会中止整个运行
    pub fn try_new<F, E>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<S, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            name: name.into(),
            factory: Box::new(move || factory().map_err(|e| e.to_string())),
            methods: Vec::new(),
        }
    }

    /// 声明一个带任意角色标记的方法（也可以没有标记）
    pub fn method<F, R>(mut self, name: impl Into<String>, roles: impl Into<RoleMarkers>, body: F) -> Self
    where
        F: Fn(&mut S) -> R + Send + Sync + 'static,
        R: IntoMethodResult,
    {
        self.methods.push(SuiteMethod {
            name: name.into(),
            roles: roles.into(),
            body: Box::new(move |state| body(state).into_method_result()),
        });
        self
    }

    pub fn setup<F, R>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut S) -> R + Send + Sync + 'static,
        R: IntoMethodResult,
    {
        self.method(name, Role::Setup, body)
    }

    pub fn test<F, R>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut S) -> R + Send + Sync + 'static,
        R: IntoMethodResult,
    {
        self.method(name, Role::Test, body)
    }

    pub fn teardown<F, R>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut S) -> R + Send + Sync + 'static,
        R: IntoMethodResult,
    {
        self.method(name, Role::Teardown, body)
    }
}

impl<S: Default + 'static> Suite<S> {
    /// 使用 `S::default` 作为构造函数
    pub fn with_default(name: impl Into<String>) -> Self {
        Self::new(name, S::default)
    }
}

impl<S: 'static> SuiteDefinition for Suite<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn methods(&self) -> Vec<MethodDescriptor> {
        self.methods
            .iter()
            .map(|m| MethodDescriptor::new(m.name.clone(), m.roles))
            .collect()
    }

    fn instantiate(&self) -> std::result::Result<Box<dyn SuiteInstance + '_>, String> {
        let state = (self.factory)()?;
        Ok(Box::new(Instance {
            state,
            methods: &self.methods,
        }))
    }
}

struct Instance<'a, S> {
    state: S,
    methods: &'a [SuiteMethod<S>],
}

impl<S> SuiteInstance for Instance<'_, S> {
    fn invoke(&mut self, method: &str) -> std::result::Result<(), InvokeError> {
        let target = self
            .methods
            .iter()
            .find(|m| m.name == method)
            .ok_or_else(|| InvokeError::NotFound(method.to_string()))?;

        (target.body)(&mut self.state).map_err(InvokeError::Raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::TestFailure;

    #[derive(Default)]
    struct Probe {
        hits: Vec<&'static str>,
    }

    #[test]
    fn test_methods_keep_declaration_order() {
        let suite = Suite::<Probe>::with_default("probe")
            .teardown("c", |_| ())
            .test("a", |_| ())
            .method("helper", RoleMarkers::NONE, |_| ())
            .setup("b", |_| ());

        let names: Vec<String> = suite.methods().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["c", "a", "helper", "b"]);
        assert_eq!(suite.name(), "probe");
    }

    #[test]
    fn test_instance_invokes_against_own_state() {
        let suite = Suite::<Probe>::with_default("probe")
            .test("first", |p| p.hits.push("first"))
            .test("check", |p| {
                if p.hits == ["first"] {
                    Ok(())
                } else {
                    Err(format!("unexpected hits: {:?}", p.hits))
                }
            });

        let mut instance = suite.instantiate().unwrap();
        assert_eq!(instance.invoke("check"), Err(InvokeError::Raised(TestFailure::new("unexpected hits: []"))));
        instance.invoke("first").unwrap();
        instance.invoke("check").unwrap();

        // 新实例不会看到旧实例的状态
        let mut fresh = suite.instantiate().unwrap();
        assert!(fresh.invoke("check").is_err());
    }

    #[test]
    fn test_invoke_unknown_method() {
        let suite = Suite::<Probe>::with_default("probe");
        let mut instance = suite.instantiate().unwrap();
        assert_eq!(
            instance.invoke("missing"),
            Err(InvokeError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_fallible_factory() {
        let suite = Suite::<Probe>::try_new("broken", || Err::<Probe, _>("no database"));
        match suite.instantiate() {
            Err(reason) => assert_eq!(reason, "no database"),
            Ok(_) => panic!("Expected instantiation failure"),
        }
    }
}
