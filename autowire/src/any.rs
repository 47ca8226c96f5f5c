use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
};

/// Identity of a requested service type, handed to [`crate::ServiceLocator::resolve_by_type`].
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is<T>(&self) -> bool
    where
        T: ?Sized + 'static,
    {
        self.id == TypeId::of::<T>()
    }

    /// Type name without module paths, e.g. `Arc<dyn Greeter>` for `alloc::sync::Arc<dyn app::Greeter>`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let is_delimiter = |ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == ':');

        let mut out = String::with_capacity(self.name.len());
        for part in self.name.split_inclusive(is_delimiter) {
            let (path, delimiter) = match part.char_indices().last() {
                Some((i, ch)) if is_delimiter(ch) => part.split_at(i),
                _ => (part, ""),
            };
            out.push_str(path.rsplit_once("::").map_or(path, |(_, name)| name));
            out.push_str(delimiter);
        }
        out
    }
}
