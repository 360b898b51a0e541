//! AST visitor that reads literal translation declarations.
//!
//! Recognizes every call of the declaration function imported from the
//! configured module, under any local alias or through a namespace import:
//!
//! ```ignore
//! import { defineTranslations as define } from '@enhanced-dom/intl';
//! import * as intl from '@enhanced-dom/intl';
//!
//! define({ title: { key: 'page.title', default: 'Welcome' } });
//! intl.defineTranslations({ cta: { key: 'page.cta', default: 'Start' } });
//! ```

use std::collections::HashSet;

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ImportSpecifier, Lit, MemberProp, Module, ModuleDecl, ModuleExportName,
    ModuleItem, ObjectLit, Prop, PropName, PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::ExtractionEntry;

/// Where the declaration function is imported from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationImport {
    /// Module specifier prefix, e.g. `@enhanced-dom/intl`.
    pub source: String,
    /// Exported name of the declaration function.
    pub name: String,
}

impl Default for DeclarationImport {
    fn default() -> Self {
        Self {
            source: "@enhanced-dom/intl".to_string(),
            name: "defineTranslations".to_string(),
        }
    }
}

impl DeclarationImport {
    fn matches_source(&self, specifier: &str) -> bool {
        specifier.starts_with(&self.source)
    }
}

/// Local names bound to the declaration function in one module.
#[derive(Debug, Default)]
pub struct DeclarationBindings {
    /// `import { defineTranslations as x }` -> `x`
    pub functions: HashSet<String>,
    /// `import * as x` -> `x`
    pub namespaces: HashSet<String>,
}

impl DeclarationBindings {
    pub fn collect(module: &Module, import: &DeclarationImport) -> Self {
        let mut bindings = Self::default();

        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
                continue;
            };
            if decl.type_only {
                continue;
            }
            let Some(specifier) = decl.src.value.as_str() else {
                continue;
            };
            if !import.matches_source(specifier) {
                continue;
            }

            for spec in &decl.specifiers {
                match spec {
                    ImportSpecifier::Named(named) if !named.is_type_only => {
                        let imported = named
                            .imported
                            .as_ref()
                            .map(|i| match i {
                                ModuleExportName::Ident(ident) => ident.sym.to_string(),
                                ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                            })
                            .unwrap_or_else(|| named.local.sym.to_string());
                        if imported == import.name {
                            bindings.functions.insert(named.local.sym.to_string());
                        }
                    }
                    ImportSpecifier::Namespace(ns) => {
                        bindings.namespaces.insert(ns.local.sym.to_string());
                    }
                    _ => {}
                }
            }
        }

        bindings
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.namespaces.is_empty()
    }
}

/// A declaration the collector could not evaluate statically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationError {
    pub line: usize,
    pub message: String,
}

pub struct DeclarationCollector<'a> {
    import_name: &'a str,
    bindings: DeclarationBindings,
    source_map: &'a SourceMap,
    pub entries: Vec<ExtractionEntry>,
    pub errors: Vec<DeclarationError>,
}

impl<'a> DeclarationCollector<'a> {
    pub fn new(
        import_name: &'a str,
        bindings: DeclarationBindings,
        source_map: &'a SourceMap,
    ) -> Self {
        Self {
            import_name,
            bindings,
            source_map,
            entries: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn is_declaration_call(&self, call: &CallExpr) -> bool {
        let Callee::Expr(expr) = &call.callee else {
            return false;
        };
        match unwrap_ts_expr(expr) {
            Expr::Ident(ident) => self.bindings.functions.contains(ident.sym.as_str()),
            Expr::Member(member) => {
                matches!(&*member.obj, Expr::Ident(obj) if self.bindings.namespaces.contains(obj.sym.as_str()))
                    && matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == self.import_name)
            }
            _ => false,
        }
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        let line = self.source_map.lookup_char_pos(span.lo).line;
        self.errors.push(DeclarationError {
            line,
            message: message.into(),
        });
    }

    fn collect_declarations(&mut self, call: &CallExpr) {
        let Some(arg) = call.args.first() else {
            self.error(call.span, format!("{} called without declarations", self.import_name));
            return;
        };
        if arg.spread.is_some() {
            self.error(call.span, "spread arguments cannot be evaluated statically");
            return;
        }
        let Expr::Object(declarations) = unwrap_ts_expr(&arg.expr) else {
            self.error(
                call.span,
                format!("{} expects an object literal", self.import_name),
            );
            return;
        };

        for prop in &declarations.props {
            let PropOrSpread::Prop(prop) = prop else {
                self.error(call.span, "spread declarations cannot be evaluated statically");
                continue;
            };
            let Prop::KeyValue(kv) = &**prop else {
                self.error(call.span, "declarations must be `name: { key, default }` pairs");
                continue;
            };
            let name = prop_name(&kv.key).unwrap_or_else(|| "<computed>".to_string());
            let Expr::Object(declaration) = unwrap_ts_expr(&kv.value) else {
                self.error(call.span, format!("declaration `{}` is not an object literal", name));
                continue;
            };
            match read_entry(declaration) {
                Ok(entry) => self.entries.push(entry),
                Err(missing) => self.error(
                    call.span,
                    format!("declaration `{}` needs a string literal `{}`", name, missing),
                ),
            }
        }
    }
}

impl Visit for DeclarationCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.is_declaration_call(node) {
            self.collect_declarations(node);
        }
        node.visit_children_with(self);
    }
}

/// Read `{ key: '..', default: '..' }`, returning the first missing field.
fn read_entry(declaration: &ObjectLit) -> Result<ExtractionEntry, &'static str> {
    let mut key = None;
    let mut default = None;

    for prop in &declaration.props {
        if let PropOrSpread::Prop(prop) = prop
            && let Prop::KeyValue(kv) = &**prop
            && let Some(name) = prop_name(&kv.key)
        {
            match name.as_str() {
                "key" => key = string_value(&kv.value),
                "default" => default = string_value(&kv.value),
                _ => {}
            }
        }
    }

    let key = key.ok_or("key")?;
    let default = default.ok_or("default")?;
    Ok(ExtractionEntry { key, default })
}

fn string_value(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        _ => None,
    }
}

fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// Bindings and declarations of one parsed module.
pub fn collect_module<'a>(
    module: &Module,
    import: &'a DeclarationImport,
    source_map: &'a SourceMap,
) -> DeclarationCollector<'a> {
    let bindings = DeclarationBindings::collect(module, import);
    let mut collector = DeclarationCollector::new(&import.name, bindings, source_map);
    if !collector.bindings.is_empty() {
        module.visit_with(&mut collector);
    }
    collector
}
