pub(crate) mod attr;

use std::{
    collections::BTreeMap,
    fs, mem,
    path::{Component, Path, PathBuf},
};
use syn::{Fields, Item, ItemStruct, PathSegment};
use tracing::debug;

use crate::{
    errors::ScanErrorKind,
    source::SymbolSource,
    symbol::{path_to_string, FieldSymbol, SourceSite, Visibility},
    type_model::ImplIndex,
};

/// [`SymbolSource`] over Rust source files.
///
/// Every added file is parsed eagerly: `#[autowired]` fields of named-field structs become
/// symbols owned by `<module>::<Struct>` (inline modules extend the module path), trait impls and
/// supertraits go into an [`ImplIndex`] used as the type model of the round.
///
/// An owner path belongs to one file. Library and binary roots all map to `crate`, so the same
/// owner found in another file is rejected instead of merging two distinct types.
#[derive(Debug, Default)]
pub struct SourceScanner {
    symbols: Vec<FieldSymbol>,
    index: ImplIndex,
    files: Vec<PathBuf>,
    owners: BTreeMap<String, Option<PathBuf>>,
}

impl SourceScanner {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the file and scans it as the module derived by [`module_path_for`].
    ///
    /// # Errors
    /// Returns an error if the file can't be read, its path isn't a module path or it fails to scan.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<(), ScanErrorKind> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScanErrorKind::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let module = module_path_for(path)?;

        self.add_source(&module, Some(path.to_path_buf()), &content)?;
        self.files.push(path.to_path_buf());
        Ok(())
    }

    /// Scans `content` as the body of `module`. An empty `module` places owners in the empty package.
    ///
    /// # Errors
    /// Returns an error if `module` isn't a path, the content doesn't parse, an annotation is
    /// malformed, an annotated field is declared in a generic struct or its owner was already
    /// found in another file. Nothing of `content` is kept then.
    pub fn add_source(&mut self, module: &str, file: Option<PathBuf>, content: &str) -> Result<(), ScanErrorKind> {
        let module = if module.is_empty() {
            None
        } else {
            Some(syn::parse_str::<syn::Path>(module).map_err(|_| ScanErrorKind::InvalidModule {
                module: module.to_owned(),
            })?)
        };

        let parsed = syn::parse_file(content).map_err(|source| ScanErrorKind::Parse {
            location: location(file.as_deref(), source.span().start().line),
            source,
        })?;

        let before = self.symbols.len();
        let mut found = vec![];
        scan_items(module.as_ref(), &parsed.items, file.as_deref(), &mut found)?;

        let mut owners = vec![];
        for symbol in &found {
            let owner = symbol.owner.qualified_name();
            match self.owners.get(owner) {
                Some(declared) if declared.as_deref() != file.as_deref() => {
                    return Err(ScanErrorKind::DuplicateOwner {
                        owner: owner.to_owned(),
                        first: source_name(declared.as_deref()),
                        second: source_name(file.as_deref()),
                    });
                }
                Some(_) => {}
                None => owners.push(owner.to_owned()),
            }
        }
        self.owners.extend(owners.into_iter().map(|owner| (owner, file.clone())));
        self.symbols.extend(found);
        self.index.index_items(&parsed.items);

        let module = module.as_ref().map(path_to_string).unwrap_or_default();
        debug!(%module, symbols = self.symbols.len() - before, "Scanned");
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn impl_index(&self) -> &ImplIndex {
        &self.index
    }

    /// Files added with [`SourceScanner::add_file`].
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl SymbolSource for SourceScanner {
    fn symbols(&mut self) -> Result<Vec<FieldSymbol>, ScanErrorKind> {
        Ok(mem::take(&mut self.symbols))
    }
}

fn source_name(file: Option<&Path>) -> String {
    file.map_or_else(|| "<source>".to_owned(), |file| file.display().to_string())
}

fn location(file: Option<&Path>, line: usize) -> String {
    SourceSite {
        file: file.map(Path::to_path_buf),
        line,
    }
    .to_string()
}

fn child_path(module: Option<&syn::Path>, ident: &syn::Ident) -> syn::Path {
    match module {
        Some(module) => {
            let mut path = module.clone();
            path.segments.push(PathSegment::from(ident.clone()));
            path
        }
        None => syn::Path::from(ident.clone()),
    }
}

fn scan_items(
    module: Option<&syn::Path>,
    items: &[Item],
    file: Option<&Path>,
    found: &mut Vec<FieldSymbol>,
) -> Result<(), ScanErrorKind> {
    for item in items {
        match item {
            Item::Struct(item) => scan_struct(module, item, file, found)?,
            Item::Mod(item) => {
                if let Some((_, items)) = &item.content {
                    scan_items(Some(&child_path(module, &item.ident)), items, file, found)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn scan_struct(
    module: Option<&syn::Path>,
    item: &ItemStruct,
    file: Option<&Path>,
    found: &mut Vec<FieldSymbol>,
) -> Result<(), ScanErrorKind> {
    let Fields::Named(fields) = &item.fields else {
        return Ok(());
    };
    let owner = child_path(module, &item.ident);

    for field in &fields.named {
        let Some(args) = attr::parse_field_attrs(&field.attrs) else {
            continue;
        };
        let Some(ident) = &field.ident else {
            continue;
        };
        let line = ident.span().start().line;

        let args = args.map_err(|source| ScanErrorKind::Attribute {
            location: location(file, source.span().start().line),
            source,
        })?;

        if !item.generics.params.is_empty() {
            return Err(ScanErrorKind::GenericOwner {
                field: ident.to_string(),
                owner: path_to_string(&owner),
                location: location(file, line),
            });
        }

        found.push(
            FieldSymbol::new(ident.clone(), field.ty.clone(), owner.clone())
                .with_visibility(Visibility::from(&field.vis))
                .with_args(args)
                .with_site(SourceSite {
                    file: file.map(Path::to_path_buf),
                    line,
                }),
        );
    }
    Ok(())
}

/// Module path of a source file of a Cargo package.
///
/// Components after the last `src` directory name the module: `src/lib.rs`, `src/main.rs` and
/// binaries under `src/bin` are `crate`, `src/a/mod.rs` is `crate::a`, `src/a/b.rs` is `crate::a::b`.
/// A file outside of `src` is named by its stem alone. Every binary is a crate root of its own,
/// [`SourceScanner`] refuses owners declared in more than one of them.
///
/// # Errors
/// Returns [`ScanErrorKind::InvalidModule`] if a component isn't valid UTF-8.
pub fn module_path_for(file: impl AsRef<Path>) -> Result<String, ScanErrorKind> {
    let file = file.as_ref();
    let invalid = || ScanErrorKind::InvalidModule {
        module: file.display().to_string(),
    };

    let components = file
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_str().map(str::to_owned)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    let segments = match components.iter().rposition(|component| component == "src") {
        Some(position) => &components[position + 1..],
        None => &components[components.len().saturating_sub(1)..],
    };
    let segments = match segments.split_last() {
        _ if segments.first().is_some_and(|segment| segment == "bin") => &[][..],
        Some((last, [])) if last == "lib" || last == "main" => &[][..],
        Some((last, rest)) if last == "mod" => rest,
        _ => segments,
    };

    let mut module = vec!["crate"];
    module.extend(segments.iter().map(String::as_str));
    Ok(module.join("::"))
}
