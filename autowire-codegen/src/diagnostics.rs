use tracing::{error, info};

/// Channel for messages of a generation round, an `error` means the surrounding build fails.
pub trait Diagnostics {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Reports through `tracing`, tagging every event with the module name.
#[derive(Debug, Clone, Default)]
pub struct TracingDiagnostics {
    module: String,
}

impl TracingDiagnostics {
    #[inline]
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into() }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        info!(module = %self.module, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(module = %self.module, "{}", message);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
