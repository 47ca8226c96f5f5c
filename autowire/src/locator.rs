use core::any::Any;
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::any::TypeInfo;

/// Marks services resolvable through the [`ServiceLocator`].
///
/// `autowire-codegen` treats an `Option<S>` field as a service if `S` implements this trait,
/// directly or through a supertrait, e.g. `trait HelloService: Provider` and `Option<Arc<dyn HelloService>>`.
pub trait Provider {}

/// Registry of services that generated injectors resolve from.
///
/// The locator returns boxed values, the typed entry points [`resolve_by_type`] and
/// [`resolve_by_path`] downcast them to the type the field was declared with.
pub trait ServiceLocator: Send + Sync {
    fn resolve_by_type(&self, type_info: TypeInfo) -> Option<Box<dyn Any>>;
    fn resolve_by_path(&self, path: &str) -> Option<Box<dyn Any>>;
}

static LOCATOR: RwLock<Option<Arc<dyn ServiceLocator>>> = const_rwlock(None);

/// Installs the process-wide locator and returns the previous one.
pub fn install_locator(locator: impl ServiceLocator + 'static) -> Option<Arc<dyn ServiceLocator>> {
    debug!("Service locator installed");
    LOCATOR.write().replace(Arc::new(locator))
}

/// Removes the process-wide locator, after that every resolution yields `None`.
pub fn uninstall_locator() -> Option<Arc<dyn ServiceLocator>> {
    debug!("Service locator uninstalled");
    LOCATOR.write().take()
}

// The lock isn't held while the locator runs, so a locator may resolve recursively
#[inline]
fn current() -> Option<Arc<dyn ServiceLocator>> {
    LOCATOR.read().clone()
}

fn downcast<S: 'static>(service: Box<dyn Any>, type_info: TypeInfo) -> Option<S> {
    match service.downcast::<S>() {
        Ok(service) => Some(*service),
        Err(_) => {
            warn!(service = %type_info.short_name(), "Resolved service has another type");
            None
        }
    }
}

/// Resolves a service by its declared type.
#[must_use]
pub fn resolve_by_type<S: 'static>() -> Option<S> {
    let type_info = TypeInfo::of::<S>();
    let Some(locator) = current() else {
        debug!(service = %type_info.short_name(), "No service locator installed");
        return None;
    };

    let Some(service) = locator.resolve_by_type(type_info) else {
        debug!(service = %type_info.short_name(), "Service not found by type");
        return None;
    };
    downcast(service, type_info)
}

/// Resolves a service registered under `path` and casts it to `S`.
#[must_use]
pub fn resolve_by_path<S: 'static>(path: &str) -> Option<S> {
    let type_info = TypeInfo::of::<S>();
    let Some(locator) = current() else {
        debug!(path, service = %type_info.short_name(), "No service locator installed");
        return None;
    };

    let Some(service) = locator.resolve_by_path(path) else {
        debug!(path, service = %type_info.short_name(), "Service not found by path");
        return None;
    };
    downcast(service, type_info)
}

#[cfg(test)]
mod tests {
    use super::{install_locator, resolve_by_path, resolve_by_type, uninstall_locator, ServiceLocator};
    use crate::any::TypeInfo;

    use core::any::Any;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tracing_test::traced_test;

    // The locator slot is global, tests touching it must not overlap
    static LOCATOR_GUARD: Mutex<()> = parking_lot::const_mutex(());

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;

    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    struct Locator;

    impl ServiceLocator for Locator {
        fn resolve_by_type(&self, type_info: TypeInfo) -> Option<Box<dyn Any>> {
            if type_info.is::<Arc<dyn Greeter>>() {
                return Some(Box::new(Arc::new(Hello) as Arc<dyn Greeter>));
            }
            None
        }

        fn resolve_by_path(&self, path: &str) -> Option<Box<dyn Any>> {
            match path {
                "/service/hello" => Some(Box::new(Arc::new(Hello) as Arc<dyn Greeter>)),
                "/service/number" => Some(Box::new(1u8)),
                _ => None,
            }
        }
    }

    #[test]
    #[traced_test]
    fn test_resolve_without_locator() {
        let _guard = LOCATOR_GUARD.lock();
        uninstall_locator();

        assert!(resolve_by_type::<Arc<dyn Greeter>>().is_none());
        assert!(resolve_by_path::<Arc<dyn Greeter>>("/service/hello").is_none());
        assert!(logs_contain("No service locator installed"));
        assert!(logs_contain("service=Arc<dyn Greeter>"));
    }

    #[test]
    #[traced_test]
    fn test_resolve() {
        let _guard = LOCATOR_GUARD.lock();
        install_locator(Locator);

        assert_eq!(resolve_by_type::<Arc<dyn Greeter>>().map(|greeter| greeter.greet()), Some("hello"));
        assert_eq!(
            resolve_by_path::<Arc<dyn Greeter>>("/service/hello").map(|greeter| greeter.greet()),
            Some("hello")
        );
        assert!(resolve_by_type::<Arc<Hello>>().is_none());
        assert!(resolve_by_path::<Arc<dyn Greeter>>("/service/missing").is_none());

        assert!(resolve_by_path::<Arc<dyn Greeter>>("/service/number").is_none());
        assert!(logs_contain("Resolved service has another type"));

        assert!(uninstall_locator().is_some());
    }
}
