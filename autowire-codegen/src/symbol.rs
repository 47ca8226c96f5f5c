use core::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use std::path::PathBuf;
use syn::{ext::IdentExt as _, Ident, Path, Type};

/// Type that declares autowired fields, the unit of grouping and of generated injectors.
#[derive(Debug, Clone)]
pub struct OwnerType {
    path: Path,
    qualified_name: String,
}

impl OwnerType {
    #[must_use]
    pub fn new(path: Path) -> Self {
        let qualified_name = path_to_string(&path);
        Self { path, qualified_name }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Module path of the owner, empty for a single segment path.
    #[must_use]
    pub fn package(&self) -> &str {
        self.qualified_name.rsplit_once("::").map_or("", |(package, _)| package)
    }

    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit_once("::")
            .map_or(self.qualified_name.as_str(), |(_, name)| name)
    }
}

impl PartialEq for OwnerType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for OwnerType {}

impl Hash for OwnerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

impl PartialOrd for OwnerType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OwnerType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name.cmp(&other.qualified_name)
    }
}

impl Display for OwnerType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

pub(crate) fn path_to_string(path: &Path) -> String {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    for (i, segment) in path.segments.iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.unraw().to_string());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Public,
    /// `pub(crate)`, `pub(super)`, `pub(in path)` and alike
    Restricted(String),
    Private,
}

impl From<&syn::Visibility> for Visibility {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => Self::Public,
            syn::Visibility::Restricted(restricted) => Self::Restricted(path_to_string(&restricted.path)),
            syn::Visibility::Inherited => Self::Private,
        }
    }
}

/// Literal given as `default = ...` in the field annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    Char(char),
    Str(String),
}

impl Display for DefaultValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(val) => write!(f, "{val}"),
            Self::Int(val) => write!(f, "{val}"),
            Self::Float(val) => write!(f, "{val:?}"),
            Self::Char(val) => write!(f, "'{}'", val.escape_default()),
            Self::Str(val) => write!(f, "{val:?}"),
        }
    }
}

/// Parameters of the `#[autowired(...)]` annotation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutowiredArgs {
    /// Carrier key, the field name if not set
    pub name: Option<String>,
    pub required: bool,
    /// Locator path, services are resolved by type if not set
    pub path: Option<String>,
    pub default: Option<DefaultValue>,
}

/// Where a field is declared, used as a hint in runtime faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSite {
    pub file: Option<PathBuf>,
    pub line: usize,
}

impl Display for SourceSite {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Annotated field as reported by a [`crate::SymbolSource`].
#[derive(Debug, Clone)]
pub struct FieldSymbol {
    pub ident: Ident,
    pub declared_type: Type,
    pub owner: OwnerType,
    pub visibility: Visibility,
    pub args: AutowiredArgs,
    pub site: Option<SourceSite>,
}

impl FieldSymbol {
    /// Creates a public field symbol with default annotation parameters.
    #[must_use]
    pub fn new(ident: Ident, declared_type: Type, owner: Path) -> Self {
        Self {
            ident,
            declared_type,
            owner: OwnerType::new(owner),
            visibility: Visibility::Public,
            args: AutowiredArgs::default(),
            site: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: AutowiredArgs) -> Self {
        self.args = args;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_site(mut self, site: SourceSite) -> Self {
        self.site = Some(site);
        self
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }
}
