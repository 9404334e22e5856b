//! Lowering of OXC ASTs into the owned declaration model.
//!
//! Only declarations that can take part in provider discovery or type
//! resolution are kept: classes, interfaces, functions, namespaces, type
//! aliases and enums, plus the file's import bindings. Bodies of functions
//! and methods are never entered.

use oxc_ast::ast::{
    ArrayPattern, BindingIdentifier, Class, ClassBody, ClassElement, Declaration, Decorator,
    ExportDefaultDeclarationKind, Expression, FormalParameters, Function, ImportDeclaration,
    ImportDeclarationSpecifier, MethodDefinitionKind, ObjectPattern, Program, PropertyKey,
    Statement, TSClassImplements, TSInterfaceBody, TSInterfaceDeclaration, TSInterfaceHeritage,
    TSModuleDeclaration, TSModuleDeclarationBody, TSModuleDeclarationName, TSSignature, TSType,
    TSTypeAnnotation, TSTypeName, TSTypeParameterInstantiation,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::{GetSpan, Span};
use rustc_hash::FxHashMap;

use crate::decl::{
    Decl, DeclId, DeclKind, ImportBinding, Imported, MethodSig, ParamSig, PropertySig, TypeRef,
};

/// The result of lowering one file.
#[derive(Debug, Default)]
pub(crate) struct LoweredFile {
    pub top_level: Vec<DeclId>,
    pub imports: FxHashMap<String, ImportBinding>,
}

/// Lower `program` into `decls`, returning the file's top-level declarations.
pub(crate) fn lower_program(
    program: &Program<'_>,
    source: &str,
    file: usize,
    decls: &mut Vec<Decl>,
) -> LoweredFile {
    let mut lowering = Lowering {
        source,
        file,
        decls,
        imports: FxHashMap::default(),
    };
    let top_level = lowering.statements(&program.body, None);
    LoweredFile {
        top_level,
        imports: lowering.imports,
    }
}

struct Lowering<'s, 'd> {
    source: &'s str,
    file: usize,
    decls: &'d mut Vec<Decl>,
    imports: FxHashMap<String, ImportBinding>,
}

impl Lowering<'_, '_> {
    fn statements(&mut self, statements: &[Statement<'_>], parent: Option<DeclId>) -> Vec<DeclId> {
        let mut ids = Vec::new();
        for statement in statements {
            match statement {
                Statement::ImportDeclaration(import) => self.import(import),
                Statement::ExportNamedDeclaration(export) => {
                    if let Some(declaration) = &export.declaration {
                        if let Some(id) = self.declaration(declaration, parent) {
                            self.decls[id.0].exported = true;
                            ids.push(id);
                        }
                    }
                }
                Statement::ExportDefaultDeclaration(export) => {
                    let id = match &export.declaration {
                        ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                            Some(self.class(class, parent))
                        }
                        ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                            Some(self.function(function, parent))
                        }
                        ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                            Some(self.interface(interface, parent))
                        }
                        _ => None,
                    };
                    if let Some(id) = id {
                        let decl = &mut self.decls[id.0];
                        decl.exported = true;
                        decl.default_export = true;
                        ids.push(id);
                    }
                }
                Statement::ClassDeclaration(class) => ids.push(self.class(class, parent)),
                Statement::FunctionDeclaration(function) => ids.push(self.function(function, parent)),
                Statement::TSInterfaceDeclaration(interface) => {
                    ids.push(self.interface(interface, parent))
                }
                Statement::TSTypeAliasDeclaration(alias) => {
                    ids.push(self.named(DeclKind::TypeAlias, alias.id.name.as_str(), parent))
                }
                Statement::TSEnumDeclaration(enumeration) => {
                    ids.push(self.named(DeclKind::Enum, enumeration.id.name.as_str(), parent))
                }
                Statement::TSModuleDeclaration(module) => ids.extend(self.namespace(module, parent)),
                _ => {}
            }
        }
        ids
    }

    fn declaration(&mut self, declaration: &Declaration<'_>, parent: Option<DeclId>) -> Option<DeclId> {
        match declaration {
            Declaration::ClassDeclaration(class) => Some(self.class(class, parent)),
            Declaration::FunctionDeclaration(function) => Some(self.function(function, parent)),
            Declaration::TSInterfaceDeclaration(interface) => Some(self.interface(interface, parent)),
            Declaration::TSTypeAliasDeclaration(alias) => {
                Some(self.named(DeclKind::TypeAlias, alias.id.name.as_str(), parent))
            }
            Declaration::TSEnumDeclaration(enumeration) => {
                Some(self.named(DeclKind::Enum, enumeration.id.name.as_str(), parent))
            }
            Declaration::TSModuleDeclaration(module) => self.namespace(module, parent),
            _ => None,
        }
    }

    fn import(&mut self, import: &ImportDeclaration<'_>) {
        let Some(specifiers) = &import.specifiers else {
            return;
        };
        let specifier = import.source.value.to_string();
        for item in specifiers {
            let (local, imported) = match item {
                ImportDeclarationSpecifier::ImportSpecifier(named) => (
                    named.local.name.to_string(),
                    Imported::Named(named.imported.name().to_string()),
                ),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                    (default.local.name.to_string(), Imported::Default)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    (namespace.local.name.to_string(), Imported::Namespace)
                }
            };
            self.imports.insert(
                local,
                ImportBinding {
                    specifier: specifier.clone(),
                    imported,
                },
            );
        }
    }

    fn class(&mut self, class: &Class<'_>, parent: Option<DeclId>) -> DeclId {
        let name = class
            .id
            .as_ref()
            .map_or_else(|| "default".to_string(), |id| id.name.to_string());
        let mut decl = Decl::new(self.file, parent, DeclKind::Class, name);

        if let Some(super_class) = &class.super_class {
            if let Some(path) = expression_path(super_class) {
                decl.heritage.push(TypeRef::named(
                    slice_source(self.source, super_class.span()),
                    path,
                    Vec::new(),
                ));
            }
        }
        let mut heritage = HeritageCollector::new(self.source);
        walk::walk_class(&mut heritage, class);
        decl.heritage.extend(heritage.entries);

        decl.member_count = class.body.body.len();
        for element in &class.body.body {
            match element {
                ClassElement::MethodDefinition(method)
                    if matches!(method.kind, MethodDefinitionKind::Method) =>
                {
                    if let Some(name) = key_name(&method.key) {
                        decl.methods
                            .push(self.method(name, method.r#static, &method.value));
                    }
                }
                ClassElement::PropertyDefinition(property) => {
                    if let Some(name) = key_name(&property.key) {
                        decl.properties.push(PropertySig {
                            name,
                            ty: self.annotation(property.type_annotation.as_deref()),
                        });
                    }
                }
                _ => {}
            }
        }
        self.push(decl)
    }

    fn interface(&mut self, interface: &TSInterfaceDeclaration<'_>, parent: Option<DeclId>) -> DeclId {
        let mut decl = Decl::new(
            self.file,
            parent,
            DeclKind::Interface,
            interface.id.name.to_string(),
        );

        let mut heritage = HeritageCollector::new(self.source);
        walk::walk_ts_interface_declaration(&mut heritage, interface);
        decl.heritage = heritage.entries;

        decl.member_count = interface.body.body.len();
        for signature in &interface.body.body {
            match signature {
                TSSignature::TSMethodSignature(method) => {
                    if let Some(name) = key_name(&method.key) {
                        decl.methods.push(MethodSig {
                            name,
                            is_static: false,
                            is_async: false,
                            params: self.params(&method.params),
                            return_type: self.annotation(method.return_type.as_deref()),
                        });
                    }
                }
                TSSignature::TSPropertySignature(property) => {
                    if let Some(name) = key_name(&property.key) {
                        decl.properties.push(PropertySig {
                            name,
                            ty: self.annotation(property.type_annotation.as_deref()),
                        });
                    }
                }
                _ => {}
            }
        }
        self.push(decl)
    }

    fn function(&mut self, function: &Function<'_>, parent: Option<DeclId>) -> DeclId {
        let name = function
            .id
            .as_ref()
            .map_or_else(|| "default".to_string(), |id| id.name.to_string());
        let mut decl = Decl::new(self.file, parent, DeclKind::Function, name.clone());
        decl.signature = Some(self.method(name, false, function));
        self.push(decl)
    }

    fn namespace(&mut self, module: &TSModuleDeclaration<'_>, parent: Option<DeclId>) -> Option<DeclId> {
        // `declare module "pkg"` describes another module, not a namespace.
        if matches!(module.id, TSModuleDeclarationName::StringLiteral(_)) {
            return None;
        }
        // `declare global { .. }` adds to the global scope. Its names are left
        // undeclared so references keep their written text in every file.
        if self.is_global_augmentation(module) {
            return None;
        }
        let id = self.named(DeclKind::Namespace, module.id.name().as_str(), parent);
        let children = match &module.body {
            Some(TSModuleDeclarationBody::TSModuleBlock(block)) => self.statements(&block.body, Some(id)),
            Some(TSModuleDeclarationBody::TSModuleDeclaration(inner)) => {
                self.namespace(inner, Some(id)).into_iter().collect()
            }
            None => Vec::new(),
        };
        self.decls[id.0].children = children;
        Some(id)
    }

    fn method(&self, name: String, is_static: bool, function: &Function<'_>) -> MethodSig {
        MethodSig {
            name,
            is_static,
            is_async: function.r#async,
            params: self.params(&function.params),
            return_type: self.annotation(function.return_type.as_deref()),
        }
    }

    fn params(&self, params: &FormalParameters<'_>) -> Vec<ParamSig> {
        let mut lowered: Vec<ParamSig> = params
            .items
            .iter()
            .map(|param| {
                let mut collector = ParamCollector::new(self.source);
                walk::walk_formal_parameter(&mut collector, param);
                collector.finish(false)
            })
            .collect();
        if let Some(rest) = &params.rest {
            let mut collector = ParamCollector::new(self.source);
            walk::walk_binding_rest_element(&mut collector, rest);
            lowered.push(collector.finish(true));
        }
        lowered
    }

    fn is_global_augmentation(&self, module: &TSModuleDeclaration<'_>) -> bool {
        let text = slice_source(self.source, module.span());
        let text = text.strip_prefix("declare").unwrap_or(&text).trim_start();
        text.strip_prefix("global")
            .is_some_and(|rest| rest.trim_start().starts_with('{'))
    }

    fn annotation(&self, annotation: Option<&TSTypeAnnotation<'_>>) -> Option<TypeRef> {
        annotation.map(|annotation| lower_type(&annotation.type_annotation, self.source))
    }

    fn named(&mut self, kind: DeclKind, name: &str, parent: Option<DeclId>) -> DeclId {
        self.push(Decl::new(self.file, parent, kind, name))
    }

    fn push(&mut self, decl: Decl) -> DeclId {
        self.decls.push(decl);
        DeclId(self.decls.len() - 1)
    }
}

/// Lower a type annotation, keeping the names and generic arguments of type references.
pub(crate) fn lower_type(ty: &TSType<'_>, source: &str) -> TypeRef {
    let text = slice_source(source, ty.span());
    if let TSType::TSTypeReference(reference) = ty {
        if let Some(path) = type_name_path(&reference.type_name) {
            let mut arguments = TypeArguments::new(source);
            walk::walk_ts_type_reference(&mut arguments, reference);
            return TypeRef::named(text, path, arguments.arguments);
        }
    }
    TypeRef::opaque(text)
}

/// Collects `implements` / interface `extends` entries without entering bodies.
struct HeritageCollector<'s> {
    source: &'s str,
    entries: Vec<TypeRef>,
}

impl<'s> HeritageCollector<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }
}

impl<'a> Visit<'a> for HeritageCollector<'_> {
    fn visit_class(&mut self, _it: &Class<'a>) {}

    fn visit_class_body(&mut self, _it: &ClassBody<'a>) {}

    fn visit_ts_interface_body(&mut self, _it: &TSInterfaceBody<'a>) {}

    fn visit_ts_class_implements(&mut self, it: &TSClassImplements<'a>) {
        if let Some(path) = type_name_path(&it.expression) {
            self.entries.push(TypeRef::named(
                slice_source(self.source, it.expression.span()),
                path,
                Vec::new(),
            ));
        }
    }

    fn visit_ts_interface_heritage(&mut self, it: &TSInterfaceHeritage<'a>) {
        if let Some(path) = expression_path(&it.expression) {
            self.entries.push(TypeRef::named(
                slice_source(self.source, it.expression.span()),
                path,
                Vec::new(),
            ));
        }
    }
}

/// Captures a formal parameter's name and type annotation.
///
/// Decorators and default values are skipped, so only the parameter's own
/// binding and annotation are seen.
struct ParamCollector<'s> {
    source: &'s str,
    name: Option<String>,
    optional: bool,
    ty: Option<TypeRef>,
}

impl<'s> ParamCollector<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            name: None,
            optional: false,
            ty: None,
        }
    }

    fn finish(self, rest: bool) -> ParamSig {
        ParamSig {
            name: self.name.unwrap_or_default(),
            ty: self.ty,
            optional: self.optional,
            rest,
        }
    }

    fn pattern_name(&mut self, span: Span) {
        if self.name.is_none() {
            self.name = Some(slice_source(self.source, span));
        }
    }
}

impl<'a> Visit<'a> for ParamCollector<'_> {
    fn visit_decorator(&mut self, _it: &Decorator<'a>) {}

    fn visit_expression(&mut self, _it: &Expression<'a>) {}

    fn visit_object_pattern(&mut self, it: &ObjectPattern<'a>) {
        self.pattern_name(it.span);
    }

    fn visit_array_pattern(&mut self, it: &ArrayPattern<'a>) {
        self.pattern_name(it.span);
    }

    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        if self.name.is_none() {
            self.name = Some(it.name.to_string());
            let after = self.source.get(it.span.end as usize..).unwrap_or_default();
            self.optional = after.trim_start().starts_with('?');
        }
    }

    fn visit_ts_type_annotation(&mut self, it: &TSTypeAnnotation<'a>) {
        if self.ty.is_none() {
            self.ty = Some(lower_type(&it.type_annotation, self.source));
        }
    }
}

/// Captures the generic arguments of one type reference.
struct TypeArguments<'s> {
    source: &'s str,
    arguments: Vec<TypeRef>,
}

impl<'s> TypeArguments<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            arguments: Vec::new(),
        }
    }
}

impl<'a> Visit<'a> for TypeArguments<'_> {
    fn visit_ts_type_parameter_instantiation(&mut self, it: &TSTypeParameterInstantiation<'a>) {
        for param in &it.params {
            self.arguments.push(lower_type(param, self.source));
        }
    }
}

fn type_name_path(name: &TSTypeName<'_>) -> Option<Vec<String>> {
    match name {
        TSTypeName::IdentifierReference(ident) => Some(vec![ident.name.to_string()]),
        TSTypeName::QualifiedName(qualified) => {
            let mut path = type_name_path(&qualified.left)?;
            path.push(qualified.right.name.to_string());
            Some(path)
        }
        _ => None,
    }
}

fn expression_path(expression: &Expression<'_>) -> Option<Vec<String>> {
    match expression {
        Expression::Identifier(ident) => Some(vec![ident.name.to_string()]),
        Expression::StaticMemberExpression(member) => {
            let mut path = expression_path(&member.object)?;
            path.push(member.property.name.to_string());
            Some(path)
        }
        _ => None,
    }
}

fn key_name(key: &PropertyKey<'_>) -> Option<String> {
    key.static_name().map(|name| name.to_string())
}

fn slice_source(source: &str, span: Span) -> String {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::TypeShape;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn lower(source: &str) -> (Vec<Decl>, LoweredFile) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        let mut decls = Vec::new();
        let lowered = lower_program(&ret.program, source, 0, &mut decls);
        (decls, lowered)
    }

    #[test]
    fn lowers_class_heritage_and_static_method() {
        let (decls, lowered) = lower(
            r#"
            import { Provider as Base } from "./inject";
            export class FooProvider extends Base implements Marker {
                static async provide(config: app.Config, retries: number): Promise<Foo> {
                    class Inner extends Other {}
                    return {} as Foo;
                }
            }
            "#,
        );
        assert_eq!(lowered.top_level.len(), 1);
        let class = &decls[lowered.top_level[0].index()];
        assert_eq!(class.kind, DeclKind::Class);
        assert!(class.exported);
        assert_eq!(
            class.heritage.iter().map(|h| h.text.as_str()).collect::<Vec<_>>(),
            vec!["Base", "Marker"]
        );

        let method = &class.methods[0];
        assert!(method.is_static && method.is_async);
        assert_eq!(method.params[0].name, "config");
        assert_eq!(
            method.params[0].ty.as_ref().and_then(TypeRef::path),
            Some(&["app".to_string(), "Config".to_string()][..])
        );
        assert_eq!(method.params[1].ty.as_ref().map(|t| t.text.as_str()), Some("number"));

        let returns = method.return_type.as_ref().expect("annotated");
        match &returns.shape {
            TypeShape::Named { path, arguments } => {
                assert_eq!(path, &vec!["Promise".to_string()]);
                assert_eq!(arguments[0].text, "Foo");
            }
            TypeShape::Opaque => panic!("expected a named type"),
        }

        let binding = &lowered.imports["Base"];
        assert_eq!(binding.specifier, "./inject");
        assert_eq!(binding.original_name(), Some("Provider"));
    }

    #[test]
    fn lowers_nested_namespaces_and_interfaces() {
        let (decls, lowered) = lower(
            r#"
            declare namespace outer.inner {
                interface Corge {}
            }
            interface Builder {}
            interface App extends Builder { foo: Foo; build(): App }
            "#,
        );
        assert_eq!(lowered.top_level.len(), 3);
        let outer = &decls[lowered.top_level[0].index()];
        assert_eq!(outer.kind, DeclKind::Namespace);
        let inner = &decls[outer.children[0].index()];
        assert_eq!(inner.name, "inner");
        let corge = &decls[inner.children[0].index()];
        assert_eq!(corge.name, "Corge");
        assert_eq!(corge.parent, Some(outer.children[0]));

        let marker = &decls[lowered.top_level[1].index()];
        assert_eq!(marker.member_count, 0);

        let app = &decls[lowered.top_level[2].index()];
        assert_eq!(app.member_count, 2);
        assert_eq!(app.properties[0].name, "foo");
        assert_eq!(app.methods[0].name, "build");
        assert_eq!(app.heritage[0].path(), Some(&["Builder".to_string()][..]));
    }

    #[test]
    fn lowers_every_parameter_shape() {
        let (decls, lowered) = lower(
            r#"
            class P {
                static provide(@Inject((x: Baz) => x) a: A, b?: B, { c }: C, d: D = (y: Baz) => y, ...e: E[]): F {}
            }
            function provideG(g: G): H {}
            "#,
        );
        let params = &decls[lowered.top_level[0].index()].methods[0].params;
        let rendered: Vec<String> = params.iter().map(ParamSig::render).collect();
        assert_eq!(rendered, vec!["a: A", "b?: B", "{ c }: C", "d: D", "...e: E[]"]);
        assert!(params[4].rest && !params[0].rest);

        let function = &decls[lowered.top_level[1].index()];
        assert_eq!(function.kind, DeclKind::Function);
        let signature = function.signature.as_ref().expect("functions keep their signature");
        assert_eq!(signature.params[0].render(), "g: G");
        assert_eq!(signature.return_type.as_ref().map(|t| t.text.as_str()), Some("H"));
    }

    #[test]
    fn skips_global_augmentations() {
        let (decls, lowered) = lower(
            r#"
            export {}
            declare global { interface Clock {} }
            namespace global2 { interface Inner {} }
            "#,
        );
        assert_eq!(lowered.top_level.len(), 1);
        assert_eq!(decls[lowered.top_level[0].index()].name, "global2");
    }
}
