use std::{
    env,
    path::{Path, PathBuf},
};
use syn::Path as SynPath;

use crate::{
    config::{Config, KEY_MODULE_NAME},
    errors::ProcessErrorKind,
    processor::{AutowiredProcessor, RoundOutcome},
    scanner::SourceScanner,
    type_model::Capability,
    writer::FsWriter,
};

/// Starts configuring injector generation for a build script.
///
/// ```no_run
/// // build.rs
/// fn main() {
///     autowire_codegen::configure()
///         .file("src/ui.rs")
///         .generate()
///         .unwrap();
/// }
/// ```
///
/// Generated files are placed under `OUT_DIR` mirroring the module path of the owner,
/// the injector of `crate::ui::Profile` can be included in `src/ui.rs` with
/// `include!(concat!(env!("OUT_DIR"), "/ui/profile_autowired.rs"));`
#[must_use]
pub fn configure() -> Builder {
    Builder {
        files: vec![],
        out_dir: None,
        module_name: None,
        runtime_crate: None,
        capability: None,
        emit_rerun_if_changed: true,
    }
}

#[derive(Debug, Clone)]
pub struct Builder {
    files: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    module_name: Option<String>,
    runtime_crate: Option<SynPath>,
    capability: Option<Capability>,
    emit_rerun_if_changed: bool,
}

impl Builder {
    /// Adds a source file, its module path is derived from its location under `src`.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(path.as_ref().to_path_buf());
        self
    }

    pub fn files(mut self, paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Self {
        self.files.extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    /// Output directory, `OUT_DIR` if not set.
    pub fn out_dir(mut self, out_dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(out_dir.as_ref().to_path_buf());
        self
    }

    /// Module name used in diagnostics, `CARGO_PKG_NAME` if not set.
    pub fn module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }

    pub fn runtime_crate(mut self, runtime_crate: SynPath) -> Self {
        self.runtime_crate = Some(runtime_crate);
        self
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    /// Whether to print `cargo:rerun-if-changed` for every added file, enabled by default.
    pub fn emit_rerun_if_changed(mut self, enable: bool) -> Self {
        self.emit_rerun_if_changed = enable;
        self
    }

    /// Scans the added files and writes an injector per owner of autowired fields.
    ///
    /// # Errors
    /// Returns an error if no output directory is known, or scanning, classification, rendering
    /// or writing fails.
    pub fn generate(self) -> Result<RoundOutcome, ProcessErrorKind> {
        let out_dir = self
            .out_dir
            .or_else(|| env::var_os("OUT_DIR").map(PathBuf::from))
            .ok_or(ProcessErrorKind::NoOutDir)?;
        let module_name = self.module_name.or_else(|| env::var("CARGO_PKG_NAME").ok());

        let mut config = Config::from_options(module_name.map(|name| (KEY_MODULE_NAME, name)));
        if let Some(runtime_crate) = self.runtime_crate {
            config = config.with_runtime_crate(runtime_crate);
        }
        if let Some(capability) = self.capability {
            config = config.with_capability(capability);
        }

        let mut scanner = SourceScanner::new();
        for file in &self.files {
            if self.emit_rerun_if_changed {
                println!("cargo:rerun-if-changed={}", file.display());
            }
            scanner.add_file(file)?;
        }

        let model = scanner.impl_index().clone();
        AutowiredProcessor::new(config, FsWriter::new(out_dir)).process(&mut scanner, &model)
    }
}

#[cfg(test)]
mod tests {
    use super::configure;
    use crate::{
        errors::{ProcessErrorKind, ScanErrorKind},
        processor::RoundOutcome,
    };

    use std::fs;

    const SOURCE: &str = r#"
pub trait Provider {}
pub trait HelloService: Provider {}

pub struct Profile {
    #[autowired]
    pub name: Option<String>,
    #[autowired(required = true)]
    pub hello: Option<Box<dyn HelloService>>,
}
"#;

    #[test]
    fn test_generate() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("ui.rs"), SOURCE).unwrap();
        fs::write(src.join("lib.rs"), "pub mod ui;").unwrap();
        let out = dir.path().join("out");

        let outcome = configure()
            .files([src.join("lib.rs"), src.join("ui.rs")])
            .out_dir(&out)
            .module_name("app")
            .emit_rerun_if_changed(false)
            .generate()
            .unwrap();

        assert_eq!(
            outcome,
            RoundOutcome::Generated {
                injectors: vec!["ProfileAutowired".to_owned()],
            }
        );
        let text = fs::read_to_string(out.join("ui").join("profile_autowired.rs")).unwrap();
        assert!(text.contains("impl ::autowire::Autowired for crate::ui::Profile"));
        assert!(text.contains("resolve_by_type::<Box<dyn HelloService>>()"));
    }

    #[test]
    fn test_generate_unclaimed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("lib.rs");
        fs::write(&file, "pub struct Plain { pub id: i32 }").unwrap();

        let outcome = configure()
            .file(&file)
            .out_dir(dir.path())
            .emit_rerun_if_changed(false)
            .generate()
            .unwrap();

        assert_eq!(outcome, RoundOutcome::Unclaimed);
    }

    #[test]
    fn test_generate_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = configure()
            .file(dir.path().join("src").join("absent.rs"))
            .out_dir(dir.path())
            .emit_rerun_if_changed(false)
            .generate()
            .unwrap_err();

        assert!(matches!(err, ProcessErrorKind::Scan(_)));
    }

    #[test]
    fn test_generate_same_owner_in_two_binaries() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("src").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("a.rs"), "pub struct Profile { #[autowired] pub name: Option<String> }").unwrap();
        fs::write(bin.join("b.rs"), "pub struct Profile { #[autowired] pub age: i32 }").unwrap();
        let out = dir.path().join("out");

        let err = configure()
            .files([bin.join("a.rs"), bin.join("b.rs")])
            .out_dir(&out)
            .emit_rerun_if_changed(false)
            .generate()
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessErrorKind::Scan(ScanErrorKind::DuplicateOwner { ref owner, .. }) if owner == "crate::Profile"
        ));
        assert!(!out.join("profile_autowired.rs").exists());
    }
}
