use tracing::debug;

use crate::{
    capability::{classify, Classification},
    classifier::{FieldDescriptor, OwnerGroup},
    errors::ClassifyErrorKind,
    symbol::OwnerType,
    type_model::{Capability, TypeModel},
};

/// Appended to the owner's simple name to name its injector.
pub const INJECTOR_SUFFIX: &str = "Autowired";

#[derive(Debug, Clone)]
pub struct Assignment {
    pub field: FieldDescriptor,
    pub classification: Classification,
}

/// Everything needed to render the injector of one owner, in field discovery order.
#[derive(Debug, Clone)]
pub struct InjectorSpec {
    pub owner: OwnerType,
    pub package: String,
    pub type_name: String,
    pub assignments: Vec<Assignment>,
}

impl InjectorSpec {
    #[must_use]
    pub fn has_carrier_values(&self) -> bool {
        self.assignments
            .iter()
            .any(|assignment| matches!(assignment.classification, Classification::CarrierValue { .. }))
    }
}

pub struct InjectorSpecBuilder<'a, M: ?Sized> {
    capability: &'a Capability,
    model: &'a M,
}

impl<'a, M> InjectorSpecBuilder<'a, M>
where
    M: TypeModel + ?Sized,
{
    #[inline]
    #[must_use]
    pub fn new(capability: &'a Capability, model: &'a M) -> Self {
        Self { capability, model }
    }

    /// # Errors
    /// Returns the first classification error of the group's fields.
    pub fn build(&self, group: OwnerGroup) -> Result<InjectorSpec, ClassifyErrorKind> {
        let OwnerGroup { owner, fields } = group;

        let assignments = fields
            .into_iter()
            .map(|field| {
                let classification = classify(&field, self.capability, self.model)?;
                debug!(field = %field.ident, ?classification, "Classified");
                Ok(Assignment { field, classification })
            })
            .collect::<Result<Vec<_>, ClassifyErrorKind>>()?;

        Ok(InjectorSpec {
            package: owner.package().to_owned(),
            type_name: [owner.simple_name(), INJECTOR_SUFFIX].concat(),
            owner,
            assignments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::InjectorSpecBuilder;
    use crate::{
        capability::{AccessorKind, Classification},
        classifier::PassContext,
        errors::ClassifyErrorKind,
        symbol::{AutowiredArgs, DefaultValue, FieldSymbol},
        type_model::{Capability, ImplIndex},
    };

    use syn::{parse_quote, File};

    fn model() -> ImplIndex {
        let file: File = parse_quote! {
            pub trait Provider {}
            pub trait HelloService: Provider {}
        };
        let mut index = ImplIndex::new();
        index.index_items(&file.items);
        index
    }

    #[test]
    fn test_build() {
        let mut context = PassContext::new();
        context
            .categorize([
                FieldSymbol::new(parse_quote!(name), parse_quote!(Option<String>), parse_quote!(crate::ui::Profile)),
                FieldSymbol::new(parse_quote!(age), parse_quote!(i32), parse_quote!(crate::ui::Profile)),
                FieldSymbol::new(parse_quote!(hello), parse_quote!(Option<Arc<dyn HelloService>>), parse_quote!(crate::ui::Profile)),
                FieldSymbol::new(parse_quote!(id), parse_quote!(i64), parse_quote!(crate::Order)),
            ])
            .unwrap();

        let model = model();
        let capability = Capability::default();
        let builder = InjectorSpecBuilder::new(&capability, &model);
        let specs = context
            .into_groups()
            .into_iter()
            .map(|group| builder.build(group))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(specs.len(), 2);

        let profile = &specs[0];
        assert_eq!(profile.package, "crate::ui");
        assert_eq!(profile.type_name, "ProfileAutowired");
        assert!(profile.has_carrier_values());
        assert_eq!(
            profile.assignments.iter().map(|assignment| assignment.field.name()).collect::<Vec<_>>(),
            ["name", "age", "hello"]
        );
        assert_eq!(
            profile.assignments[1].classification,
            Classification::CarrierValue {
                accessor: AccessorKind::Int,
                default: Some(DefaultValue::Int(0)),
            }
        );
        assert_eq!(
            profile.assignments[2].classification,
            Classification::ServiceProvider {
                service: parse_quote!(Arc<dyn HelloService>),
                path: None,
            }
        );

        let order = &specs[1];
        assert_eq!(order.package, "crate");
        assert_eq!(order.type_name, "OrderAutowired");
    }

    #[test]
    fn test_build_only_services() {
        let mut context = PassContext::new();
        context
            .categorize([FieldSymbol::new(
                parse_quote!(svc),
                parse_quote!(Option<Arc<dyn HelloService>>),
                parse_quote!(Profile),
            )
            .with_args(AutowiredArgs {
                required: true,
                path: Some("/service/hello".into()),
                ..AutowiredArgs::default()
            })])
            .unwrap();

        let model = model();
        let capability = Capability::default();
        let spec = InjectorSpecBuilder::new(&capability, &model)
            .build(context.into_groups().remove(0))
            .unwrap();

        assert_eq!(spec.package, "");
        assert!(!spec.has_carrier_values());
        assert!(spec.assignments[0].field.required);
    }

    #[test]
    fn test_build_fails_on_unsupported_field() {
        let mut context = PassContext::new();
        context
            .categorize([
                FieldSymbol::new(parse_quote!(name), parse_quote!(Option<String>), parse_quote!(Profile)),
                FieldSymbol::new(parse_quote!(tags), parse_quote!(Vec<String>), parse_quote!(Profile)),
            ])
            .unwrap();

        let model = model();
        let capability = Capability::default();
        let err = InjectorSpecBuilder::new(&capability, &model)
            .build(context.into_groups().remove(0))
            .unwrap_err();

        assert!(matches!(err, ClassifyErrorKind::UnsupportedFieldType { ref field, .. } if field == "tags"));
    }
}
