//! Syntactic type identity.
//!
//! A declared type is identified by `"<module>".<namespace path>.<name>`, so
//! two declarations with the same written name in different files or
//! namespaces never collide, and every way of naming one declaration
//! (local name, import alias, namespace import) yields the same key.

use wirecheck_graph::TypeKey;

use crate::decl::{DeclId, DeclKind, Imported, TypeRef, TypeShape};
use crate::program::TsProgram;

/// Where names are looked up from: a file and its innermost enclosing namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scope {
    pub file: usize,
    pub namespace: Option<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Decl(DeclId),
    /// A name from a module that is not part of the program.
    External { specifier: String, path: Vec<String> },
}

impl TsProgram {
    /// The scope in which the signature of `id` is written.
    pub(crate) fn scope_of(&self, id: DeclId) -> Scope {
        let decl = self.decl(id);
        Scope {
            file: decl.file,
            namespace: decl.parent,
        }
    }

    /// The identity of a declared type.
    pub fn key_of(&self, id: DeclId) -> TypeKey {
        let mut segments = vec![self.decl(id).name.as_str()];
        let mut parent = self.decl(id).parent;
        while let Some(namespace) = parent {
            segments.push(self.decl(namespace).name.as_str());
            parent = self.decl(namespace).parent;
        }
        segments.reverse();
        let module = &self.files[self.decl(id).file].module_name;
        TypeKey::new(format!("\"{module}\".{}", segments.join(".")))
    }

    /// The identity of a written type.
    ///
    /// Named types resolve to their declaration, generic arguments are
    /// resolved recursively. Names without a declaration in scope (globals
    /// such as `Date`) and non-reference types keep their written text.
    pub(crate) fn type_key(&self, scope: Scope, ty: &TypeRef) -> TypeKey {
        let TypeShape::Named { path, arguments } = &ty.shape else {
            return TypeKey::new(ty.text.as_str());
        };
        let base = match self.lookup(scope, path) {
            Some(Resolved::Decl(id)) => self.key_of(id).as_str().to_string(),
            Some(Resolved::External { specifier, path }) => {
                format!("\"{specifier}\".{}", path.join("."))
            }
            None => path.join("."),
        };
        if arguments.is_empty() {
            return TypeKey::new(base);
        }
        let arguments = arguments
            .iter()
            .map(|argument| self.type_key(scope, argument).as_str().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        TypeKey::new(format!("{base}<{arguments}>"))
    }

    /// Whether `ty` names the global `Promise`, returning its single argument.
    pub(crate) fn promise_argument<'t>(&self, scope: Scope, ty: &'t TypeRef) -> Option<&'t TypeRef> {
        match &ty.shape {
            TypeShape::Named { path, arguments }
                if path.len() == 1
                    && path[0] == "Promise"
                    && arguments.len() == 1
                    && self.lookup(scope, path).is_none() =>
            {
                arguments.first()
            }
            _ => None,
        }
    }

    /// The name `ty` has in its declaring module, seen through import aliases.
    ///
    /// Does not need the target module to be part of the program.
    pub(crate) fn apparent_name<'t>(&'t self, scope: Scope, ty: &'t TypeRef) -> Option<&'t str> {
        let path = ty.path()?;
        let last = path.last()?;
        if path.len() == 1 {
            if let Some(binding) = self.files[scope.file].imports.get(last) {
                if let Imported::Named(original) = &binding.imported {
                    return Some(original);
                }
            }
        }
        Some(last)
    }

    fn lookup(&self, scope: Scope, path: &[String]) -> Option<Resolved> {
        let (first, rest) = path.split_first()?;
        let last = rest.is_empty();

        let mut namespace = scope.namespace;
        while let Some(id) = namespace {
            if let Some(found) = self.pick(&self.decl(id).children, first, last) {
                return self.descend(found, rest);
            }
            namespace = self.decl(id).parent;
        }

        let file = &self.files[scope.file];
        if let Some(found) = self.pick(&file.top_level, first, last) {
            return self.descend(found, rest);
        }

        let binding = file.imports.get(first)?;
        let Some(target) = self.resolve_module(scope.file, &binding.specifier) else {
            let mut external = Vec::with_capacity(path.len());
            external.extend(binding.original_name().map(str::to_string));
            external.extend(rest.iter().cloned());
            return Some(Resolved::External {
                specifier: binding.specifier.clone(),
                path: external,
            });
        };
        let exports = &self.files[target].top_level;
        match &binding.imported {
            Imported::Named(name) => {
                let found = self.pick_exported(exports, name, last)?;
                self.descend(found, rest)
            }
            Imported::Default => {
                let found = exports
                    .iter()
                    .copied()
                    .find(|id| self.decl(*id).default_export)?;
                self.descend(found, rest)
            }
            Imported::Namespace => {
                let (member, rest) = rest.split_first()?;
                let found = self.pick_exported(exports, member, rest.is_empty())?;
                self.descend(found, rest)
            }
        }
    }

    fn descend(&self, mut current: DeclId, path: &[String]) -> Option<Resolved> {
        for (index, segment) in path.iter().enumerate() {
            let last = index + 1 == path.len();
            current = self.pick(&self.decl(current).children, segment, last)?;
        }
        Some(Resolved::Decl(current))
    }

    fn pick_exported(&self, ids: &[DeclId], name: &str, last: bool) -> Option<DeclId> {
        let exported: Vec<DeclId> = ids
            .iter()
            .copied()
            .filter(|id| self.decl(*id).exported)
            .collect();
        self.pick(&exported, name, last)
    }

    /// Find a type-position declaration named `name`, preferring a namespace
    /// when more path segments follow and a non-namespace otherwise.
    fn pick(&self, ids: &[DeclId], name: &str, last: bool) -> Option<DeclId> {
        let mut fallback = None;
        for &id in ids {
            let decl = self.decl(id);
            if decl.name != name || !decl.kind.is_type() {
                continue;
            }
            if (decl.kind == DeclKind::Namespace) != last {
                return Some(id);
            }
            fallback.get_or_insert(id);
        }
        fallback
    }
}
