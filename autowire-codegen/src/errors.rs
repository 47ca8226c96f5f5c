mod classify;
mod process;
mod scan;
mod write;

pub use classify::ClassifyErrorKind;
pub use process::ProcessErrorKind;
pub use scan::ScanErrorKind;
pub use write::WriteErrorKind;
