use syn::{GenericArgument, PathArguments, Type};

use crate::{
    classifier::FieldDescriptor,
    errors::ClassifyErrorKind,
    symbol::DefaultValue,
    type_model::{Capability, TypeModel},
};

/// Scalar getters of the request carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
    Byte,
    Short,
}

impl AccessorKind {
    /// Maps a declared field type to its accessor, `Option<String>` is the only non-scalar one.
    #[must_use]
    pub fn of(ty: &Type) -> Option<Self> {
        if let Some(inner) = option_inner(ty) {
            return match last_ident(inner)?.as_str() {
                "String" => Some(Self::String),
                _ => None,
            };
        }
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() || type_path.path.segments.len() != 1 {
            return None;
        }
        let kind = match last_ident(ty)?.as_str() {
            "i32" => Self::Int,
            "i64" => Self::Long,
            "f32" => Self::Float,
            "f64" => Self::Double,
            "bool" => Self::Boolean,
            "char" => Self::Char,
            "i8" => Self::Byte,
            "i16" => Self::Short,
            _ => return None,
        };
        Some(kind)
    }

    /// Name of the carrier method, e.g. `get_int`.
    #[must_use]
    pub const fn getter(self) -> &'static str {
        match self {
            Self::String => "get_string",
            Self::Int => "get_int",
            Self::Long => "get_long",
            Self::Float => "get_float",
            Self::Double => "get_double",
            Self::Boolean => "get_boolean",
            Self::Char => "get_char",
            Self::Byte => "get_byte",
            Self::Short => "get_short",
        }
    }

    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::String => "Option<String>",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::Boolean => "bool",
            Self::Char => "char",
            Self::Byte => "i8",
            Self::Short => "i16",
        }
    }

    const fn int_range(self) -> Option<(i128, i128)> {
        match self {
            Self::Byte => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Short => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::Int => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::Long => Some((i64::MIN as i128, i64::MAX as i128)),
            _ => None,
        }
    }

    fn float_default(self, val: f64) -> Option<DefaultValue> {
        let limit = if self == Self::Float { f64::from(f32::MAX) } else { f64::MAX };
        (val.is_finite() && val.abs() <= limit).then_some(DefaultValue::Float(val))
    }

    /// Fallback passed to the getter: the annotation's default, else the zero value of the kind.
    /// Strings take no fallback.
    ///
    /// # Errors
    /// Returns the reason if `default` doesn't fit the kind.
    pub fn resolve_default(self, default: Option<&DefaultValue>) -> Result<Option<DefaultValue>, String> {
        let mismatch = |default: &DefaultValue| format!("`{default}` isn't a valid `{}`", self.rust_type());

        let resolved = match (self, default) {
            (Self::String, None) => return Ok(None),
            (Self::String, Some(_)) => return Err("string values take no default, an absent value is `None`".to_owned()),
            (Self::Boolean, None) => DefaultValue::Bool(false),
            (Self::Boolean, Some(default @ DefaultValue::Bool(_))) => default.clone(),
            (Self::Char, None) => DefaultValue::Char('\0'),
            (Self::Char, Some(default @ DefaultValue::Char(_))) => default.clone(),
            (Self::Float | Self::Double, None) => DefaultValue::Float(0.0),
            #[allow(clippy::cast_precision_loss)]
            (Self::Float | Self::Double, Some(default @ DefaultValue::Int(val))) => {
                self.float_default(*val as f64).ok_or_else(|| mismatch(default))?
            }
            (Self::Float | Self::Double, Some(default @ DefaultValue::Float(val))) => {
                self.float_default(*val).ok_or_else(|| mismatch(default))?
            }
            (Self::Byte | Self::Short | Self::Int | Self::Long, None) => DefaultValue::Int(0),
            (Self::Byte | Self::Short | Self::Int | Self::Long, Some(default @ DefaultValue::Int(val))) => {
                match self.int_range() {
                    Some((min, max)) if (min..=max).contains(val) => default.clone(),
                    _ => return Err(mismatch(default)),
                }
            }
            (_, Some(default)) => return Err(mismatch(default)),
        };
        Ok(Some(resolved))
    }
}

/// Injection strategy of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Resolved from the service locator, by `path` if set, otherwise by the `service` type
    ServiceProvider { service: Type, path: Option<String> },
    /// Read from the request carrier, `default` is `None` only for strings
    CarrierValue {
        accessor: AccessorKind,
        default: Option<DefaultValue>,
    },
}

fn last_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|segment| segment.ident.to_string())
        }
        _ => None,
    }
}

/// Inner type of `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first() {
        Some(GenericArgument::Type(inner)) if arguments.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Decides how `field` is injected.
///
/// `Option<S>` with `S` a subtype of `capability` is a service, anything else must map to an [`AccessorKind`].
///
/// # Errors
/// - Returns [`ClassifyErrorKind::UnsupportedFieldType`] if the type is neither a service nor a carrier value
/// - Returns [`ClassifyErrorKind::InvalidDefault`] if the annotation default doesn't fit the field
pub fn classify<M>(field: &FieldDescriptor, capability: &Capability, model: &M) -> Result<Classification, ClassifyErrorKind>
where
    M: TypeModel + ?Sized,
{
    let invalid_default = |reason: String| ClassifyErrorKind::InvalidDefault {
        field: field.name(),
        owner: field.owner.qualified_name().to_owned(),
        reason,
    };

    if let Some(service) = option_inner(&field.declared_type).filter(|service| model.is_subtype(service, capability)) {
        if field.default.is_some() {
            return Err(invalid_default("services take no default".to_owned()));
        }
        return Ok(Classification::ServiceProvider {
            service: service.clone(),
            path: field.path.clone(),
        });
    }

    let Some(accessor) = AccessorKind::of(&field.declared_type) else {
        let ty = &field.declared_type;
        return Err(ClassifyErrorKind::UnsupportedFieldType {
            field: field.name(),
            owner: field.owner.qualified_name().to_owned(),
            ty: quote::quote!(#ty).to_string(),
        });
    };
    let default = accessor.resolve_default(field.default.as_ref()).map_err(invalid_default)?;

    Ok(Classification::CarrierValue { accessor, default })
}
