use crate::error::{Result, RutestError};
use crate::suite::SuiteDefinition;
use std::collections::BTreeMap;

/// 套件注册表：把套件名称解析为已加载的套件定义
#[derive(Default)]
pub struct SuiteRegistry {
    suites: BTreeMap<String, Box<dyn SuiteDefinition>>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册套件，同名套件会被替换
    pub fn register<D>(&mut self, suite: D) -> &mut Self
    where
        D: SuiteDefinition + 'static,
    {
        self.suites.insert(suite.name().to_string(), Box::new(suite));
        self
    }

    /// 按名称解析套件
    pub fn resolve(&self, name: &str) -> Result<&dyn SuiteDefinition> {
        self.suites
            .get(name)
            .map(|suite| suite.as_ref())
            .ok_or_else(|| RutestError::SuiteNotFound(name.to_string()))
    }

    /// 按名称排序遍历所有套件
    pub fn iter(&self) -> impl Iterator<Item = &dyn SuiteDefinition> {
        self.suites.values().map(|suite| suite.as_ref())
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}
