//! Owned declaration model lowered from the OXC AST.
//!
//! The AST borrows from a per-file arena allocator, so each file is lowered
//! into these plain records right after parsing. Declarations from every file
//! share one arena addressed by [`DeclId`].

/// Index of a declaration in a program's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub(crate) usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Function,
    Namespace,
    TypeAlias,
    Enum,
}

impl DeclKind {
    /// Whether a name of this kind can appear in a type position.
    pub fn is_type(self) -> bool {
        !matches!(self, DeclKind::Function)
    }
}

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Source text of the type.
    pub text: String,
    pub shape: TypeShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A (possibly qualified) type name such as `quux.Corge<T>`.
    Named {
        path: Vec<String>,
        arguments: Vec<TypeRef>,
    },
    /// Keywords, literals, unions, arrays and everything else, identified by text.
    Opaque,
}

impl TypeRef {
    pub fn named(text: impl Into<String>, path: Vec<String>, arguments: Vec<TypeRef>) -> Self {
        Self {
            text: text.into(),
            shape: TypeShape::Named { path, arguments },
        }
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shape: TypeShape::Opaque,
        }
    }

    pub fn path(&self) -> Option<&[String]> {
        match &self.shape {
            TypeShape::Named { path, .. } => Some(path),
            TypeShape::Opaque => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSig {
    /// The bound name, or the pattern text for a destructured parameter.
    pub name: String,
    pub ty: Option<TypeRef>,
    /// `name?: T`
    pub optional: bool,
    /// `...name: T`
    pub rest: bool,
}

impl ParamSig {
    /// The parameter as written in a signature, e.g. `...rest: Bar[]`.
    pub fn render(&self) -> String {
        let spread = if self.rest { "..." } else { "" };
        let question = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{spread}{}{question}: {}", self.name, ty.text),
            None => format!("{spread}{}{question}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub is_static: bool,
    pub is_async: bool,
    pub params: Vec<ParamSig>,
    pub return_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySig {
    pub name: String,
    pub ty: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub file: usize,
    /// Enclosing namespace, `None` at file scope.
    pub parent: Option<DeclId>,
    pub kind: DeclKind,
    pub name: String,
    pub exported: bool,
    pub default_export: bool,
    /// `extends` and `implements` entries, in source order.
    pub heritage: Vec<TypeRef>,
    /// Number of class elements or interface signatures.
    pub member_count: usize,
    pub methods: Vec<MethodSig>,
    pub properties: Vec<PropertySig>,
    /// Call signature of a function declaration.
    pub signature: Option<MethodSig>,
    /// Namespace members.
    pub children: Vec<DeclId>,
}

impl Decl {
    pub fn new(file: usize, parent: Option<DeclId>, kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            file,
            parent,
            kind,
            name: name.into(),
            exported: false,
            default_export: false,
            heritage: Vec::new(),
            member_count: 0,
            methods: Vec::new(),
            properties: Vec::new(),
            signature: None,
            children: Vec::new(),
        }
    }
}

/// How a local name was brought in by an `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    Named(String),
    Default,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub imported: Imported,
}

impl ImportBinding {
    /// The name the binding has in the module it comes from.
    pub fn original_name(&self) -> Option<&str> {
        match &self.imported {
            Imported::Named(name) => Some(name),
            Imported::Default => Some("default"),
            Imported::Namespace => None,
        }
    }
}
