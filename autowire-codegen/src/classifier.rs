use std::collections::BTreeMap;
use syn::{ext::IdentExt as _, Ident, Type};
use tracing::debug;

use crate::{
    errors::ClassifyErrorKind,
    symbol::{DefaultValue, FieldSymbol, OwnerType, SourceSite, Visibility},
};

/// Annotated field admitted into an [`OwnerGroup`], immutable after categorization.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub ident: Ident,
    pub declared_type: Type,
    pub owner: OwnerType,
    pub visibility: Visibility,
    /// Carrier key, the annotation's `name` or the field name
    pub key: String,
    pub required: bool,
    pub path: Option<String>,
    pub default: Option<DefaultValue>,
    pub site: Option<SourceSite>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Declaration site hint for runtime faults, the owner's name if the site is unknown.
    #[must_use]
    pub fn site_hint(&self) -> String {
        match &self.site {
            Some(site) => site.to_string(),
            None => self.owner.simple_name().to_owned(),
        }
    }
}

impl From<FieldSymbol> for FieldDescriptor {
    fn from(symbol: FieldSymbol) -> Self {
        let key = symbol.args.name.unwrap_or_else(|| symbol.ident.unraw().to_string());
        Self {
            ident: symbol.ident,
            declared_type: symbol.declared_type,
            owner: symbol.owner,
            visibility: symbol.visibility,
            key,
            required: symbol.args.required,
            path: symbol.args.path,
            default: symbol.args.default,
            site: symbol.site,
        }
    }
}

/// Fields of one owner in discovery order.
#[derive(Debug, Clone)]
pub struct OwnerGroup {
    pub owner: OwnerType,
    pub fields: Vec<FieldDescriptor>,
}

/// Classification state of a single generation pass.
///
/// Groups live only as long as the context, a new round starts with a new context, so fields
/// found in an earlier round are never emitted again.
#[derive(Debug, Default)]
pub struct PassContext {
    groups: Vec<OwnerGroup>,
    index: BTreeMap<OwnerType, usize>,
}

impl PassContext {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups `symbols` by owner, appending to groups of earlier calls in this pass.
    ///
    /// # Errors
    /// Returns [`ClassifyErrorKind::Accessibility`] if any symbol is private. Nothing is grouped then.
    pub fn categorize(&mut self, symbols: impl IntoIterator<Item = FieldSymbol>) -> Result<(), ClassifyErrorKind> {
        let symbols = symbols.into_iter().collect::<Vec<_>>();

        if let Some(symbol) = symbols.iter().find(|symbol| symbol.visibility == Visibility::Private) {
            return Err(ClassifyErrorKind::Accessibility {
                field: symbol.name(),
                owner: symbol.owner.qualified_name().to_owned(),
            });
        }

        for symbol in symbols {
            let field = FieldDescriptor::from(symbol);
            debug!(field = %field.ident, owner = %field.owner, "Categorized");

            match self.index.get(&field.owner) {
                Some(&position) => self.groups[position].fields.push(field),
                None => {
                    self.index.insert(field.owner.clone(), self.groups.len());
                    self.groups.push(OwnerGroup {
                        owner: field.owner.clone(),
                        fields: vec![field],
                    });
                }
            }
        }

        debug!(groups = self.groups.len(), "Categories finished");
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[OwnerGroup] {
        &self.groups
    }

    /// Ends the pass, yielding groups in the order their owners were discovered.
    #[inline]
    #[must_use]
    pub fn into_groups(self) -> Vec<OwnerGroup> {
        self.groups
    }
}
