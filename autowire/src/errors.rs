/// A required service field resolved to nothing while injecting.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("The field `{field}` is not resolved, in `{owner}` ({site})")]
pub struct MissingServiceError {
    pub field: &'static str,
    pub owner: &'static str,
    /// Declaration site of the field, `file:line` when known, otherwise the owner's name
    pub site: &'static str,
}

impl MissingServiceError {
    #[inline]
    #[must_use]
    pub const fn new(field: &'static str, owner: &'static str, site: &'static str) -> Self {
        Self { field, owner, site }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    #[error(transparent)]
    MissingService(#[from] MissingServiceError),
    #[error("The required value `{key}` of the field `{field}` is absent, in `{owner}`")]
    MissingValue {
        key: &'static str,
        field: &'static str,
        owner: &'static str,
    },
    #[error("Injector for `{expected}` received a target of another type")]
    TargetMismatch { expected: &'static str },
}
