use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    scope::scope::ScopeManager,
    value::value::Item,
};

use super::executor::{BlockExecutor, Executor};

pub type BuiltinFunction = fn(Vec<Item>) -> Result<Item, ErrorImpl>;
pub type Constructor = fn(Vec<Item>) -> Result<Item, ErrorImpl>;

/// Names the expression core can call without a scope binding.
#[derive(Default)]
pub struct Registry {
    functions: HashMap<String, BuiltinFunction>,
    builtin_classes: HashMap<String, Constructor>,
    user_classes: HashMap<String, Constructor>,
}

impl Registry {
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn get_function(&self, name: &str) -> Option<BuiltinFunction> {
        self.functions.get(name).copied()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.user_classes.contains_key(name) || self.builtin_classes.contains_key(name)
    }

    /// User classes shadow built-in ones of the same name.
    pub fn get_constructor(&self, name: &str) -> Option<Constructor> {
        self.user_classes
            .get(name)
            .or_else(|| self.builtin_classes.get(name))
            .copied()
    }

    pub fn register_function(&mut self, name: impl Into<String>, function: BuiltinFunction) {
        self.functions.insert(name.into(), function);
    }

    pub fn register_builtin_class(&mut self, name: impl Into<String>, constructor: Constructor) {
        self.builtin_classes.insert(name.into(), constructor);
    }

    pub fn declare_class(&mut self, name: impl Into<String>, constructor: Constructor) {
        self.user_classes.insert(name.into(), constructor);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Deepest nesting of user-function calls before evaluation gives up.
    /// The default fits a 2 MiB thread stack in unoptimized builds.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { max_call_depth: 64 }
    }
}

/// Everything one program evaluation shares: the scope stack, the registries
/// and the statement executor function bodies are handed to.
pub struct Context {
    pub scopes: ScopeManager,
    pub registry: Registry,
    pub config: Config,
    executor: Rc<dyn Executor>,
    call_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Context {
            scopes: ScopeManager::new(),
            registry: Registry::default(),
            config: Config::default(),
            executor: Rc::new(BlockExecutor),
            call_depth: 0,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_executor(mut self, executor: impl Executor + 'static) -> Self {
        self.executor = Rc::new(executor);
        self
    }

    pub fn with_builtin_function(mut self, name: &str, function: BuiltinFunction) -> Self {
        self.registry.register_function(name, function);
        self
    }

    pub fn with_builtin_class(mut self, name: &str, constructor: Constructor) -> Self {
        self.registry.register_builtin_class(name, constructor);
        self
    }

    pub fn with_user_class(mut self, name: &str, constructor: Constructor) -> Self {
        self.registry.declare_class(name, constructor);
        self
    }

    pub fn executor(&self) -> Rc<dyn Executor> {
        Rc::clone(&self.executor)
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    pub fn enter_call(&mut self, line: u32) -> Result<(), Error> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(ErrorImpl::RuntimeError {
                message: String::from("maximum call depth exceeded"),
            }
            .at(line));
        }
        self.call_depth += 1;
        Ok(())
    }

    pub fn leave_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }
}
