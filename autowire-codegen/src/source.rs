use core::mem;

use crate::{errors::ScanErrorKind, symbol::FieldSymbol};

/// Supplies the annotated fields of the current generation round.
pub trait SymbolSource {
    /// Takes the symbols discovered since the previous call.
    ///
    /// # Errors
    /// Returns an error if the symbols can't be collected.
    fn symbols(&mut self) -> Result<Vec<FieldSymbol>, ScanErrorKind>;
}

impl SymbolSource for Vec<FieldSymbol> {
    fn symbols(&mut self) -> Result<Vec<FieldSymbol>, ScanErrorKind> {
        Ok(mem::take(self))
    }
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    fn symbols(&mut self) -> Result<Vec<FieldSymbol>, ScanErrorKind> {
        (**self).symbols()
    }
}
