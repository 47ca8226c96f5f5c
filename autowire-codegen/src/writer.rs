use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{emitter::SourceUnit, errors::WriteErrorKind};

/// Persists rendered injectors.
pub trait Writer {
    /// # Errors
    /// Returns an error if the unit can't be persisted.
    fn write(&mut self, unit: &SourceUnit) -> Result<(), WriteErrorKind>;
}

impl<W: Writer + ?Sized> Writer for &mut W {
    fn write(&mut self, unit: &SourceUnit) -> Result<(), WriteErrorKind> {
        (**self).write(unit)
    }
}

/// Writes every unit to `<out_dir>/<package dirs>/<file name>`, the leading `crate` of the package is dropped.
///
/// For example the injector of `crate::ui::Profile` is written to `<out_dir>/ui/profile_autowired.rs`.
#[derive(Debug, Clone)]
pub struct FsWriter {
    out_dir: PathBuf,
}

impl FsWriter {
    #[inline]
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    #[inline]
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    #[inline]
    #[must_use]
    pub fn path_of(&self, unit: &SourceUnit) -> PathBuf {
        self.out_dir.join(unit.relative_path())
    }
}

impl Writer for FsWriter {
    fn write(&mut self, unit: &SourceUnit) -> Result<(), WriteErrorKind> {
        let path = self.path_of(unit);
        let io_error = |source| WriteErrorKind::Io {
            unit: unit.name.clone(),
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, &unit.text).map_err(io_error)?;

        debug!(unit = %unit.name, path = %path.display(), "Written");
        Ok(())
    }
}

/// Keeps units in memory, in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    units: Vec<SourceUnit>,
}

impl MemoryWriter {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    #[inline]
    #[must_use]
    pub fn into_units(self) -> Vec<SourceUnit> {
        self.units
    }
}

impl Writer for MemoryWriter {
    fn write(&mut self, unit: &SourceUnit) -> Result<(), WriteErrorKind> {
        self.units.push(unit.clone());
        Ok(())
    }
}
