use std::collections::{BTreeMap, BTreeSet, VecDeque};
use syn::{punctuated::Punctuated, GenericArgument, Item, ItemImpl, ItemTrait, PathArguments, Token, Type, TypeParamBound};

/// Marker capability implemented by services resolvable through the locator.
///
/// Compared by the last path segment, so `Provider` and `autowire::Provider` are the same capability.
/// The default is the runtime's `autowire::Provider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    name: String,
}

impl Capability {
    #[must_use]
    pub fn new(path: &str) -> Self {
        let name = path.rsplit_once("::").map_or(path, |(_, name)| name).trim();
        Self { name: name.to_owned() }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Capability {
    fn default() -> Self {
        Self::new("autowire::Provider")
    }
}

/// Host view of the type system used to decide whether a field holds a service.
pub trait TypeModel {
    fn is_subtype(&self, ty: &Type, capability: &Capability) -> bool;
}

impl<F> TypeModel for F
where
    F: Fn(&Type, &Capability) -> bool,
{
    fn is_subtype(&self, ty: &Type, capability: &Capability) -> bool {
        self(ty, capability)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TypeKey {
    Concrete(String),
    /// Every trait bound of a trait object, in declaration order
    Dyn(Vec<String>),
}

const POINTERS: [&str; 3] = ["Box", "Arc", "Rc"];

fn single_generic_type(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = arguments else {
        return None;
    };
    let mut types = arguments.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(ty), None) => Some(ty),
        _ => None,
    }
}

fn type_key(ty: &Type) -> Option<TypeKey> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            let name = segment.ident.to_string();
            if POINTERS.contains(&name.as_str()) {
                if let Some(inner) = single_generic_type(&segment.arguments) {
                    return type_key(inner);
                }
            }
            Some(TypeKey::Concrete(name))
        }
        Type::TraitObject(object) => {
            let traits = trait_names(&object.bounds);
            (!traits.is_empty()).then_some(TypeKey::Dyn(traits))
        }
        Type::Reference(reference) => type_key(&reference.elem),
        Type::Paren(paren) => type_key(&paren.elem),
        Type::Group(group) => type_key(&group.elem),
        _ => None,
    }
}

fn trait_names(bounds: &Punctuated<TypeParamBound, Token![+]>) -> Vec<String> {
    bounds
        .iter()
        .filter_map(|bound| match bound {
            TypeParamBound::Trait(bound) => bound.path.segments.last().map(|segment| segment.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// [`TypeModel`] built from `impl Trait for Type` and `trait A: B` items of scanned sources.
///
/// A concrete type is a subtype of the capability if one of its implemented traits reaches it
/// through supertraits, `dyn A + B` is if any of its bounds reaches it. `Box`, `Arc`, `Rc` and references
/// are looked through.
#[derive(Debug, Clone, Default)]
pub struct ImplIndex {
    impls: BTreeMap<String, BTreeSet<String>>,
    supertraits: BTreeMap<String, BTreeSet<String>>,
}

impl ImplIndex {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_impl(&mut self, ty: impl Into<String>, trait_name: impl Into<String>) {
        self.impls.entry(ty.into()).or_default().insert(trait_name.into());
    }

    pub fn add_supertraits(&mut self, trait_name: impl Into<String>, supertraits: impl IntoIterator<Item = String>) {
        self.supertraits.entry(trait_name.into()).or_default().extend(supertraits);
    }

    /// Records trait impls and supertraits of `items`, descending into inline modules.
    pub fn index_items(&mut self, items: &[Item]) {
        for item in items {
            match item {
                Item::Impl(ItemImpl {
                    trait_: Some((None, path, _)),
                    self_ty,
                    ..
                }) => {
                    let (Some(TypeKey::Concrete(ty)), Some(segment)) = (type_key(self_ty), path.segments.last()) else {
                        continue;
                    };
                    self.add_impl(ty, segment.ident.to_string());
                }
                Item::Trait(ItemTrait { ident, supertraits, .. }) => {
                    self.add_supertraits(ident.to_string(), trait_names(supertraits));
                }
                Item::Mod(module) => {
                    if let Some((_, items)) = &module.content {
                        self.index_items(items);
                    }
                }
                _ => {}
            }
        }
    }

    fn reaches(&self, start: impl IntoIterator<Item = String>, capability: &str) -> bool {
        let mut visited = BTreeSet::new();
        let mut queue = start.into_iter().collect::<VecDeque<_>>();

        while let Some(trait_name) = queue.pop_front() {
            if trait_name == capability {
                return true;
            }
            if !visited.insert(trait_name.clone()) {
                continue;
            }
            if let Some(supertraits) = self.supertraits.get(&trait_name) {
                queue.extend(supertraits.iter().cloned());
            }
        }
        false
    }
}

impl TypeModel for ImplIndex {
    fn is_subtype(&self, ty: &Type, capability: &Capability) -> bool {
        match type_key(ty) {
            Some(TypeKey::Dyn(traits)) => self.reaches(traits, capability.name()),
            Some(TypeKey::Concrete(name)) => self
                .impls
                .get(&name)
                .is_some_and(|traits| self.reaches(traits.iter().cloned(), capability.name())),
            None => false,
        }
    }
}
