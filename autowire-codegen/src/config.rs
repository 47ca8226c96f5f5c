use syn::{parse_quote, Path};
use tracing::info;

use crate::type_model::Capability;

/// Option key of the module name passed by the host.
pub const KEY_MODULE_NAME: &str = "AUTOWIRE_MODULE_NAME";

/// Config of a generation round
/// ## Fields
/// - `module_name`:
///   Name of the module being processed, only used to tag diagnostics.
///   Characters other than `[0-9A-Za-z_]` are removed.
///
/// - `runtime_crate`:
///   Path of the runtime crate the generated injectors call into, `::autowire` by default.
///   Set it if the runtime crate is renamed or re-exported.
///
/// - `capability`:
///   Trait a service type must reach to be resolved through the locator, `autowire::Provider` by default.
///   Only the last path segment is compared, so a renamed runtime crate keeps working.
#[derive(Debug, Clone)]
pub struct Config {
    pub module_name: Option<String>,
    pub runtime_crate: Path,
    pub capability: Capability,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_name: None,
            runtime_crate: parse_quote!(::autowire),
            capability: Capability::default(),
        }
    }
}

impl Config {
    /// Creates a config from the host option map, reading [`KEY_MODULE_NAME`].
    pub fn from_options<K, V>(options: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let module_name = options
            .into_iter()
            .find(|(key, _)| key.as_ref() == KEY_MODULE_NAME)
            .map(|(_, value)| sanitize_module_name(value.as_ref()))
            .filter(|name| !name.is_empty());

        match &module_name {
            Some(module_name) => info!(%module_name, "Module name set"),
            None => info!("Module name isn't set, add `{}` to the options", KEY_MODULE_NAME),
        }

        Self {
            module_name,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_runtime_crate(mut self, runtime_crate: Path) -> Self {
        self.runtime_crate = runtime_crate;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self
    }

    #[must_use]
    pub fn module_name_or_default(&self) -> &str {
        self.module_name.as_deref().unwrap_or("app")
    }
}

fn sanitize_module_name(name: &str) -> String {
    name.chars().filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_').collect()
}
