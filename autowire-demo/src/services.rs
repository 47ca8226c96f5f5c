use autowire::{Provider, ServiceLocator, TypeInfo};
use std::{any::Any, sync::Arc};

pub const HELLO_PATH: &str = "/service/hello";

pub trait HelloService: Provider + Send + Sync {
    fn say_hello(&self, name: &str) -> String;
}

pub struct HelloServiceImpl;

impl Provider for HelloServiceImpl {}

impl HelloService for HelloServiceImpl {
    fn say_hello(&self, name: &str) -> String {
        format!("hello, {name}")
    }
}

/// Serves [`HelloService`] by type and under [`HELLO_PATH`].
pub struct AppLocator;

impl ServiceLocator for AppLocator {
    fn resolve_by_type(&self, type_info: TypeInfo) -> Option<Box<dyn Any>> {
        if type_info.is::<Arc<dyn HelloService>>() {
            return Some(Box::new(Arc::new(HelloServiceImpl) as Arc<dyn HelloService>));
        }
        None
    }

    fn resolve_by_path(&self, path: &str) -> Option<Box<dyn Any>> {
        (path == HELLO_PATH).then(|| Box::new(Arc::new(HelloServiceImpl) as Arc<dyn HelloService>) as Box<dyn Any>)
    }
}
