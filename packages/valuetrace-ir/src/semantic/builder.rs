//! Programmatic tree + binding construction
//!
//! Stand-in for the host compiler's parse/bind services. Embeddings that
//! already hold a bound tree (and the crate's own tests) use this builder to
//! assemble a `SemanticModel`: nodes are created bottom-up, attached in
//! declaration order, and bound to symbols as they are declared.
//!
//! Spans are synthesized one line per node, which preserves declaration
//! order for the deterministic walks without tracking real positions.

use rustc_hash::FxHashMap;

use crate::shared::models::{
    Accessibility, NodeId, Span, Symbol, SymbolId, SymbolKind, SyntaxKind, SyntaxTree, TypeEntry,
    TypeId,
};

use super::model::SemanticModel;

/// Builder for a bound compilation unit.
#[derive(Debug, Default)]
pub struct SemanticBuilder {
    tree: SyntaxTree,
    symbols: Vec<Symbol>,
    types: Vec<TypeEntry>,
    bindings: FxHashMap<NodeId, SymbolId>,
    type_bindings: FxHashMap<NodeId, TypeId>,
    root: NodeId,
    next_line: u32,
}

impl SemanticBuilder {
    pub fn new() -> Self {
        let mut builder = Self::default();
        builder.root = builder.node(SyntaxKind::CompilationUnit, None);
        builder
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&mut self, kind: SyntaxKind, text: Option<&str>) -> NodeId {
        let line = self.next_line;
        self.next_line += 1;
        self.tree
            .push(kind, Span::line(line), text.map(|t| t.to_string()))
    }

    fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = self.symbols.len() as SymbolId;
        debug_assert_eq!(symbol.id, id);
        self.symbols.push(symbol);
        id
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    pub fn class(&mut self, name: &str) -> TypeId {
        self.class_entry(name, None, false)
    }

    pub fn sealed_class(&mut self, name: &str) -> TypeId {
        self.class_entry(name, None, true)
    }

    pub fn class_with_base(&mut self, name: &str, base: TypeId) -> TypeId {
        self.class_entry(name, Some(base), false)
    }

    /// A type with no declaring syntax in this compilation (metadata only).
    pub fn external_type(&mut self, name: &str) -> TypeId {
        let id = self.types.len() as TypeId;
        self.types.push(TypeEntry {
            id,
            name: name.to_string(),
            base: None,
            decl: None,
            is_sealed: false,
        });
        id
    }

    fn class_entry(&mut self, name: &str, base: Option<TypeId>, is_sealed: bool) -> TypeId {
        let decl = self.node(SyntaxKind::ClassDecl, Some(name));
        self.tree.attach(self.root, decl);
        let id = self.types.len() as TypeId;
        self.types.push(TypeEntry {
            id,
            name: name.to_string(),
            base,
            decl: Some(decl),
            is_sealed,
        });
        id
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    pub fn field(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
        is_static: bool,
        is_readonly: bool,
    ) -> SymbolId {
        let decl = self.member_decl(ty, SyntaxKind::FieldDecl, name);
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Field,
            accessibility,
            is_static,
            is_readonly,
            setter_accessibility: None,
            containing_type: Some(ty),
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        sym
    }

    /// Attach a declaration initializer (`= expr`) to a field or local.
    pub fn initializer(&mut self, member: SymbolId, value: NodeId) {
        let decl = self.symbols[member as usize].declarations[0];
        self.tree.attach(decl, value);
    }

    /// Property with compiler-generated accessors. `setter = None` declares
    /// a get-only property.
    pub fn auto_property(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
        setter: Option<Accessibility>,
    ) -> SymbolId {
        let decl = self.member_decl(ty, SyntaxKind::PropertyDecl, name);
        let getter = self.node(SyntaxKind::GetAccessor, None);
        self.tree.attach(decl, getter);
        if setter.is_some() {
            let set = self.node(SyntaxKind::SetAccessor, None);
            self.tree.attach(decl, set);
        }
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Property,
            accessibility,
            is_static: false,
            is_readonly: setter.is_none(),
            setter_accessibility: setter,
            containing_type: Some(ty),
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        sym
    }

    /// Get-only property whose getter body is attached afterwards with
    /// `getter_returns`.
    pub fn computed_property(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
    ) -> (SymbolId, NodeId) {
        let decl = self.member_decl(ty, SyntaxKind::PropertyDecl, name);
        let getter = self.node(SyntaxKind::GetAccessor, None);
        self.tree.attach(decl, getter);
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Property,
            accessibility,
            is_static: false,
            is_readonly: true,
            setter_accessibility: None,
            containing_type: Some(ty),
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        (sym, getter)
    }

    /// Expression-bodied getter: `get => expr;`
    pub fn getter_returns(&mut self, getter: NodeId, expr: NodeId) {
        self.tree.attach(getter, expr);
    }

    pub fn constructor(&mut self, ty: TypeId) -> (SymbolId, NodeId) {
        self.constructor_entry(ty, false)
    }

    pub fn static_constructor(&mut self, ty: TypeId) -> (SymbolId, NodeId) {
        self.constructor_entry(ty, true)
    }

    fn constructor_entry(&mut self, ty: TypeId, is_static: bool) -> (SymbolId, NodeId) {
        let name = self.types[ty as usize].name.clone();
        let decl = self.member_decl(ty, SyntaxKind::ConstructorDecl, &name);
        let params = self.node(SyntaxKind::ParameterList, None);
        self.tree.attach(decl, params);
        let block = self.node(SyntaxKind::Block, None);
        self.tree.attach(decl, block);
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name,
            kind: SymbolKind::Method,
            accessibility: Accessibility::Public,
            is_static,
            is_readonly: false,
            setter_accessibility: None,
            containing_type: Some(ty),
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        (sym, block)
    }

    pub fn method(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
        is_static: bool,
    ) -> (SymbolId, NodeId) {
        let decl = self.member_decl(ty, SyntaxKind::MethodDecl, name);
        let params = self.node(SyntaxKind::ParameterList, None);
        self.tree.attach(decl, params);
        let block = self.node(SyntaxKind::Block, None);
        self.tree.attach(decl, block);
        let sym = self.method_symbol(ty, name, accessibility, is_static, decl);
        (sym, block)
    }

    /// Expression-bodied method: `T M() => expr;`
    pub fn method_expr(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
        expr: NodeId,
    ) -> SymbolId {
        let decl = self.member_decl(ty, SyntaxKind::MethodDecl, name);
        let params = self.node(SyntaxKind::ParameterList, None);
        self.tree.attach(decl, params);
        self.tree.attach(decl, expr);
        self.method_symbol(ty, name, accessibility, false, decl)
    }

    /// Abstract/external method: declared symbol, no declaring body.
    pub fn abstract_method(&mut self, ty: TypeId, name: &str) -> SymbolId {
        let decl = self.member_decl(ty, SyntaxKind::MethodDecl, name);
        self.method_symbol(ty, name, Accessibility::Public, false, decl)
    }

    fn method_symbol(
        &mut self,
        ty: TypeId,
        name: &str,
        accessibility: Accessibility,
        is_static: bool,
        decl: NodeId,
    ) -> SymbolId {
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Method,
            accessibility,
            is_static,
            is_readonly: false,
            setter_accessibility: None,
            containing_type: Some(ty),
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        sym
    }

    /// Record that `symbol` overrides `overridden` (base-chain member).
    pub fn override_of(&mut self, symbol: SymbolId, overridden: SymbolId) {
        self.symbols[symbol as usize].overridden = Some(overridden);
    }

    pub fn parameter(&mut self, member: SymbolId, name: &str) -> SymbolId {
        let decl = self.symbols[member as usize].declarations[0];
        let list = self
            .tree
            .child_of_kind(decl, SyntaxKind::ParameterList)
            .unwrap_or(decl);
        let param_node = self.node(SyntaxKind::Parameter, Some(name));
        self.tree.attach(list, param_node);
        let containing_type = self.symbols[member as usize].containing_type;
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Parameter,
            accessibility: Accessibility::Private,
            is_static: false,
            is_readonly: false,
            setter_accessibility: None,
            containing_type,
            declarations: vec![param_node],
            overridden: None,
        });
        self.bindings.insert(param_node, sym);
        sym
    }

    /// `: base(...)` (or `: this(...)`) constructor initializer, bound to
    /// the chained constructor symbol.
    pub fn base_initializer(&mut self, ctor: SymbolId, chained: SymbolId, args: Vec<NodeId>) {
        let decl = self.symbols[ctor as usize].declarations[0];
        let init = self.node(SyntaxKind::BaseInitializer, None);
        self.tree.attach(decl, init);
        for arg in args {
            let wrapper = self.node(SyntaxKind::Argument, None);
            self.tree.attach(init, wrapper);
            self.tree.attach(wrapper, arg);
        }
        self.bindings.insert(init, chained);
    }

    pub fn local(&mut self, block: NodeId, name: &str, initializer: Option<NodeId>) -> SymbolId {
        let decl = self.node(SyntaxKind::LocalDecl, Some(name));
        self.tree.attach(block, decl);
        if let Some(init) = initializer {
            self.tree.attach(decl, init);
        }
        let id = self.symbols.len() as SymbolId;
        let sym = self.add_symbol(Symbol {
            id,
            name: name.to_string(),
            kind: SymbolKind::Local,
            accessibility: Accessibility::Private,
            is_static: false,
            is_readonly: false,
            setter_accessibility: None,
            containing_type: None,
            declarations: vec![decl],
            overridden: None,
        });
        self.bindings.insert(decl, sym);
        sym
    }

    // ------------------------------------------------------------------
    // Expressions (created unattached, composed by statements)
    // ------------------------------------------------------------------

    pub fn literal(&mut self, text: &str) -> NodeId {
        self.node(SyntaxKind::LiteralExpr, Some(text))
    }

    pub fn object_creation(&mut self, ty: TypeId) -> NodeId {
        let name = self.types[ty as usize].name.clone();
        let node = self.node(SyntaxKind::ObjectCreationExpr, Some(&name));
        self.type_bindings.insert(node, ty);
        node
    }

    /// Identifier bound to a known symbol.
    pub fn identifier(&mut self, symbol: SymbolId) -> NodeId {
        let name = self.symbols[symbol as usize].name.clone();
        let node = self.node(SyntaxKind::IdentifierName, Some(&name));
        self.bindings.insert(node, symbol);
        node
    }

    /// Identifier the oracle cannot resolve (external/unbound).
    pub fn unresolved_identifier(&mut self, name: &str) -> NodeId {
        self.node(SyntaxKind::IdentifierName, Some(name))
    }

    pub fn this_expr(&mut self) -> NodeId {
        self.node(SyntaxKind::ThisExpr, None)
    }

    pub fn base_expr(&mut self) -> NodeId {
        self.node(SyntaxKind::BaseExpr, None)
    }

    /// `receiver.Member`, with the name part bound to `symbol`.
    pub fn member_access(&mut self, receiver: NodeId, symbol: SymbolId) -> NodeId {
        let access = self.node(SyntaxKind::MemberAccessExpr, None);
        self.tree.attach(access, receiver);
        let name = self.identifier(symbol);
        self.tree.attach(access, name);
        access
    }

    /// `this.Member`
    pub fn this_member(&mut self, symbol: SymbolId) -> NodeId {
        let this = self.this_expr();
        self.member_access(this, symbol)
    }

    pub fn invocation(&mut self, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        let call = self.node(SyntaxKind::InvocationExpr, None);
        self.tree.attach(call, callee);
        let list = self.node(SyntaxKind::ArgumentList, None);
        self.tree.attach(call, list);
        for arg in args {
            let wrapper = self.node(SyntaxKind::Argument, None);
            self.tree.attach(list, wrapper);
            self.tree.attach(wrapper, arg);
        }
        call
    }

    /// `Method(...)` on the current instance.
    pub fn call_method(&mut self, method: SymbolId, args: Vec<NodeId>) -> NodeId {
        let callee = self.identifier(method);
        self.invocation(callee, args)
    }

    /// `base.Method(...)`
    pub fn base_call(&mut self, method: SymbolId, args: Vec<NodeId>) -> NodeId {
        let base = self.base_expr();
        let callee = self.member_access(base, method);
        self.invocation(callee, args)
    }

    /// Expression-bodied lambda: `() => expr`
    pub fn lambda_returning(&mut self, expr: NodeId) -> NodeId {
        let lambda = self.node(SyntaxKind::LambdaExpr, None);
        self.tree.attach(lambda, expr);
        lambda
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub fn assign(&mut self, block: NodeId, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.assignment_entry(block, SyntaxKind::AssignmentExpr, lhs, rhs)
    }

    /// `lhs op= rhs`
    pub fn compound_assign(&mut self, block: NodeId, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.assignment_entry(block, SyntaxKind::CompoundAssignmentExpr, lhs, rhs)
    }

    fn assignment_entry(
        &mut self,
        block: NodeId,
        kind: SyntaxKind,
        lhs: NodeId,
        rhs: NodeId,
    ) -> NodeId {
        let stmt = self.node(SyntaxKind::ExpressionStatement, None);
        self.tree.attach(block, stmt);
        let assignment = self.node(kind, None);
        self.tree.attach(stmt, assignment);
        self.tree.attach(assignment, lhs);
        self.tree.attach(assignment, rhs);
        assignment
    }

    pub fn ret(&mut self, block: NodeId, expr: Option<NodeId>) -> NodeId {
        let stmt = self.node(SyntaxKind::ReturnStatement, None);
        self.tree.attach(block, stmt);
        if let Some(expr) = expr {
            self.tree.attach(stmt, expr);
        }
        stmt
    }

    pub fn yield_ret(&mut self, block: NodeId, expr: NodeId) -> NodeId {
        let stmt = self.node(SyntaxKind::YieldReturnStatement, None);
        self.tree.attach(block, stmt);
        self.tree.attach(stmt, expr);
        stmt
    }

    pub fn throw_stmt(&mut self, block: NodeId) -> NodeId {
        let stmt = self.node(SyntaxKind::ThrowStatement, None);
        self.tree.attach(block, stmt);
        stmt
    }

    pub fn expression_statement(&mut self, block: NodeId, expr: NodeId) -> NodeId {
        let stmt = self.node(SyntaxKind::ExpressionStatement, None);
        self.tree.attach(block, stmt);
        self.tree.attach(stmt, expr);
        stmt
    }

    /// `if (<literal>) { .. } else { .. }`; returns the two branch blocks.
    pub fn if_statement(&mut self, block: NodeId) -> (NodeId, NodeId) {
        let stmt = self.node(SyntaxKind::IfStatement, None);
        self.tree.attach(block, stmt);
        let condition = self.literal("true");
        self.tree.attach(stmt, condition);
        let then_block = self.node(SyntaxKind::Block, None);
        self.tree.attach(stmt, then_block);
        let else_block = self.node(SyntaxKind::Block, None);
        self.tree.attach(stmt, else_block);
        (then_block, else_block)
    }

    // ------------------------------------------------------------------

    fn member_decl(&mut self, ty: TypeId, kind: SyntaxKind, name: &str) -> NodeId {
        let class_decl = self.types[ty as usize]
            .decl
            .expect("cannot declare members on an external type");
        let decl = self.node(kind, Some(name));
        self.tree.attach(class_decl, decl);
        decl
    }

    pub fn finish(self) -> SemanticModel {
        SemanticModel {
            tree: self.tree,
            symbols: self.symbols,
            types: self.types,
            bindings: self.bindings,
            type_bindings: self.type_bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::cancel::CancelToken;

    #[test]
    fn test_field_binding_round_trip() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, true);
        let model = builder.finish();

        let decl = model.declaring_syntax(field)[0];
        assert_eq!(model.tree().kind(decl), SyntaxKind::FieldDecl);
        assert_eq!(model.resolve_symbol(decl, &CancelToken::none()), Some(field));
        assert_eq!(model.symbol(field).name, "value");
    }

    #[test]
    fn test_member_access_resolves_through_name() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, false);
        let access = builder.this_member(field);
        let model = builder.finish();

        assert_eq!(
            model.resolve_symbol(access, &CancelToken::none()),
            Some(field)
        );
    }

    #[test]
    fn test_invocation_resolves_through_callee() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, _block) = builder.method(ty, "Create", Accessibility::Private, false);
        let call = builder.call_method(method, vec![]);
        let model = builder.finish();

        assert_eq!(
            model.resolve_symbol(call, &CancelToken::none()),
            Some(method)
        );
    }

    #[test]
    fn test_auto_property_has_no_getter_body() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let prop = builder.auto_property(ty, "Value", Accessibility::Public, None);
        let model = builder.finish();

        assert!(model.is_auto_property(prop));
        let getter = model.getter_of(prop).expect("getter declared");
        assert!(model.body_of(getter).is_none());
    }

    #[test]
    fn test_computed_property_has_getter_body() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (prop, getter) = builder.computed_property(ty, "Value", Accessibility::Public);
        let expr = builder.literal("1");
        builder.getter_returns(getter, expr);
        let model = builder.finish();

        assert!(!model.is_auto_property(prop));
        assert_eq!(model.body_of(getter), Some(expr));
    }

    #[test]
    fn test_object_creation_binds_type() {
        let mut builder = SemanticBuilder::new();
        let disposable = builder.external_type("FileStream");
        let creation = builder.object_creation(disposable);
        let model = builder.finish();

        assert_eq!(
            model.resolve_type(creation, &CancelToken::none()),
            Some(disposable)
        );
    }

    #[test]
    fn test_cancelled_oracle_returns_none() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, false);
        let ident = builder.identifier(field);
        let model = builder.finish();

        let token = CancelToken::new();
        token.cancel();
        assert_eq!(model.resolve_symbol(ident, &token), None);
    }
}
