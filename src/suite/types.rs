use std::any::Any;
use std::fmt;

/// 方法角色标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// 每个测试前执行
    Setup,
    /// 测试方法本身
    Test,
    /// 每个测试后执行（无论测试是否失败）
    Teardown,
}

impl Role {
    /// 按分类顺序排列的全部角色
    pub const ALL: [Role; 3] = [Role::Setup, Role::Test, Role::Teardown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Setup => "Setup",
            Role::Test => "Test",
            Role::Teardown => "Teardown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 附加在单个方法上的角色标记集合（可以为空，也可以有多个）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleMarkers {
    setup: bool,
    test: bool,
    teardown: bool,
}

impl RoleMarkers {
    /// 没有任何标记
    pub const NONE: RoleMarkers = RoleMarkers {
        setup: false,
        test: false,
        teardown: false,
    };

    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个角色标记
    pub fn with(mut self, role: Role) -> Self {
        match role {
            Role::Setup => self.setup = true,
            Role::Test => self.test = true,
            Role::Teardown => self.teardown = true,
        }
        self
    }

    /// 是否带有指定角色标记
    pub fn contains(&self, role: Role) -> bool {
        match role {
            Role::Setup => self.setup,
            Role::Test => self.test,
            Role::Teardown => self.teardown,
        }
    }

    /// 按 Setup、Test、Teardown 顺序遍历已附加的标记
    pub fn iter(&self) -> impl Iterator<Item = Role> + use<> {
        let markers = *self;
        Role::ALL.into_iter().filter(move |role| markers.contains(*role))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Role> for RoleMarkers {
    fn from(role: Role) -> Self {
        RoleMarkers::NONE.with(role)
    }
}

impl<const N: usize> From<[Role; N]> for RoleMarkers {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl FromIterator<Role> for RoleMarkers {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleMarkers::NONE, RoleMarkers::with)
    }
}

impl fmt::Display for RoleMarkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        if names.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

/// 套件中声明的一个方法及其角色标记
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub roles: RoleMarkers,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, roles: impl Into<RoleMarkers>) -> Self {
        Self {
            name: name.into(),
            roles: roles.into(),
        }
    }
}

/// 方法体抛出的失败（返回的错误或 panic）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TestFailure {
    pub message: String,
}

impl TestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 从 `catch_unwind` 捕获的 panic payload 中提取消息
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panicked with a non-string payload".to_string()
        };
        Self::new(format!("panicked: {}", message))
    }
}

/// 单个方法的执行结果
pub type MethodResult = std::result::Result<(), TestFailure>;

/// 方法体返回值到 [`MethodResult`] 的转换
///
/// 方法体既可以不返回值（依靠 `assert!` 等 panic 表示失败），
/// 也可以返回 `Result<(), E>`，其中错误会被视为失败。
pub trait IntoMethodResult {
    fn into_method_result(self) -> MethodResult;
}

impl IntoMethodResult for () {
    fn into_method_result(self) -> MethodResult {
        Ok(())
    }
}

impl<E: fmt::Display> IntoMethodResult for std::result::Result<(), E> {
    fn into_method_result(self) -> MethodResult {
        self.map_err(|e| TestFailure::new(e.to_string()))
    }
}

/// 方法调用错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    /// 无法分派：实例上不存在该方法
    #[error("method not found: {0}")]
    NotFound(String),

    /// 方法体执行时失败
    #[error("{0}")]
    Raised(TestFailure),
}

/// 测试套件定义
///
/// 由外部加载方提供：按声明顺序列出方法及其角色标记，并能创建新的实例。
pub trait SuiteDefinition: Send + Sync {
    /// 套件名称
    fn name(&self) -> &str;

    /// 按声明顺序返回全部方法
    fn methods(&self) -> Vec<MethodDescriptor>;

    /// 创建一个全新的套件实例，失败时返回原因
    fn instantiate(&self) -> std::result::Result<Box<dyn SuiteInstance + '_>, String>;
}

/// 一个存活的套件实例，只属于一次测试迭代
pub trait SuiteInstance {
    /// 按名称调用方法
    fn invoke(&mut self, method: &str) -> std::result::Result<(), InvokeError>;
}
