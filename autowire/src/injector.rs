use core::any::{type_name, Any};
use tracing::{debug, debug_span, error};

use crate::errors::InjectError;

/// Capability implemented by every generated injector.
pub trait Injector {
    /// Assigns all autowired fields of `target`.
    ///
    /// # Errors
    /// - Returns [`InjectError::TargetMismatch`] if `target` isn't the owner the injector was generated for
    /// - Returns [`InjectError::MissingService`] if a required service can't be resolved
    /// - Returns [`InjectError::MissingValue`] if a required carrier value is absent
    fn inject(&self, target: &mut dyn Any) -> Result<(), InjectError>;
}

/// Links an owner of autowired fields to its generated injector.
pub trait Autowired: Any {
    type Injector: Injector + Default;
}

/// Runs the generated injector of `T` on `target`.
///
/// # Errors
/// Propagates the error of [`Injector::inject`].
pub fn inject<T: Autowired>(target: &mut T) -> Result<(), InjectError> {
    let span = debug_span!("inject", target = type_name::<T>());
    let _guard = span.enter();

    match T::Injector::default().inject(target) {
        Ok(()) => {
            debug!("Injected");
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            Err(err)
        }
    }
}
