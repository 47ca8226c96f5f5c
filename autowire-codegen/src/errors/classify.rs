/// Errors detected while grouping and classifying fields, each one aborts the whole pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyErrorKind {
    #[error("The autowired fields can't be private, please check field [{field}] in [{owner}]")]
    Accessibility { field: String, owner: String },
    #[error(
        "\
        The field [{field}] in [{owner}] has unsupported type `{ty}`. \
        Expected `Option<_>` of a service or one of \
        `Option<String>`, `i32`, `i64`, `f32`, `f64`, `bool`, `char`, `i8`, `i16`\
        "
    )]
    UnsupportedFieldType { field: String, owner: String, ty: String },
    #[error("Invalid default of field [{field}] in [{owner}]: {reason}")]
    InvalidDefault { field: String, owner: String, reason: String },
}
