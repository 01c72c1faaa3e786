//! Return-value walker
//!
//! Produces every expression a method, property getter, or lambda may yield
//! at any exit point: `return` statements and expression bodies. `yield
//! return` is deliberately excluded (generators are out of scope for value
//! classification), and throw-terminated branches contribute nothing.
//!
//! With `recurse_into_calls`, a returned invocation of a locally declared
//! method expands into that method's own return values; the shared
//! recursion guard bounds mutual call cycles.

use tracing::trace;

use crate::errors::Result;
use crate::semantic::{CancelToken, SemanticModel};
use crate::shared::models::{NodeId, SymbolKind, SyntaxKind};
use crate::shared::utils::RecursionGuard;

use super::super::domain::ValueCandidates;

/// Per-query walker over a body owner's exit points.
pub struct ReturnWalker<'a> {
    model: &'a SemanticModel,
    token: CancelToken,
}

impl<'a> ReturnWalker<'a> {
    pub fn new(model: &'a SemanticModel, token: CancelToken) -> Self {
        Self { model, token }
    }

    /// All expressions `owner` may produce, in declaration order.
    ///
    /// `owner` is a method declaration, get-accessor, or lambda node. A
    /// bodyless owner (abstract/external) yields an empty set.
    pub fn return_values(
        &self,
        owner: NodeId,
        recurse_into_calls: bool,
        guard: &mut RecursionGuard,
    ) -> Result<ValueCandidates> {
        let mut out = ValueCandidates::new();
        let Some(body) = self.model.body_of(owner) else {
            return Ok(out);
        };
        if self.model.tree().kind(body) == SyntaxKind::Block {
            self.collect(body, recurse_into_calls, guard, &mut out)?;
        } else {
            // expression-bodied member: the body is the single exit point
            self.push_value(body, recurse_into_calls, guard, &mut out)?;
        }
        trace!(count = out.len(), "return walk complete");
        Ok(out)
    }

    fn collect(
        &self,
        node: NodeId,
        recurse: bool,
        guard: &mut RecursionGuard,
        out: &mut ValueCandidates,
    ) -> Result<()> {
        self.token.check()?;
        let tree = self.model.tree();
        match tree.kind(node) {
            SyntaxKind::ReturnStatement => {
                if let Some(&expr) = tree.children(node).first() {
                    self.push_value(expr, recurse, guard, out)?;
                }
            }
            // generators excluded: a yielded element is not the member's value
            SyntaxKind::YieldReturnStatement => {}
            // nested lambdas and local bodies own their exit points
            kind if kind.is_body_owner() => {}
            _ => {
                for &child in tree.children(node) {
                    self.collect(child, recurse, guard, out)?;
                }
            }
        }
        Ok(())
    }

    fn push_value(
        &self,
        expr: NodeId,
        recurse: bool,
        guard: &mut RecursionGuard,
        out: &mut ValueCandidates,
    ) -> Result<()> {
        if recurse && self.model.tree().kind(expr) == SyntaxKind::InvocationExpr {
            if let Some(target) = self.local_method_body(expr) {
                if !guard.push(expr) {
                    // repetition: the branch is a leaf, not an error
                    trace!(node = expr, "recursion guard stopped call expansion");
                    return Ok(());
                }
                let inner = self.return_values(target, true, guard)?;
                inner.extend_into(out);
                return Ok(());
            }
        }
        out.push(expr);
        Ok(())
    }

    /// Declaration of a locally declared callee with a body, if resolvable.
    fn local_method_body(&self, invocation: NodeId) -> Option<NodeId> {
        let symbol = self.model.resolve_symbol(invocation, &self.token)?;
        let sym = self.model.symbol(symbol);
        if sym.kind != SymbolKind::Method {
            return None;
        }
        let &decl = sym.declarations.first()?;
        self.model.body_of(decl).map(|_| decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticBuilder;
    use crate::shared::models::Accessibility;

    fn returns_of(model: &SemanticModel, owner: NodeId, recurse: bool) -> Vec<NodeId> {
        let mut guard = RecursionGuard::new();
        ReturnWalker::new(model, CancelToken::none())
            .return_values(owner, recurse, &mut guard)
            .expect("walk must not fail")
            .iter()
            .collect()
    }

    #[test]
    fn test_return_statements_in_order() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, block) = builder.method(ty, "Pick", Accessibility::Public, false);
        let (then_block, else_block) = builder.if_statement(block);
        let first = builder.literal("1");
        builder.ret(then_block, Some(first));
        let second = builder.literal("2");
        builder.ret(else_block, Some(second));
        let model = builder.finish();

        let decl = model.declaring_syntax(method)[0];
        assert_eq!(returns_of(&model, decl, false), vec![first, second]);
    }

    #[test]
    fn test_expression_body() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let expr = builder.literal("42");
        let method = builder.method_expr(ty, "Answer", Accessibility::Public, expr);
        let model = builder.finish();

        let decl = model.declaring_syntax(method)[0];
        assert_eq!(returns_of(&model, decl, false), vec![expr]);
    }

    #[test]
    fn test_getter_expression_body() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, true);
        let (_prop, getter) = builder.computed_property(ty, "Value", Accessibility::Public);
        let expr = builder.this_member(field);
        builder.getter_returns(getter, expr);
        let model = builder.finish();

        assert_eq!(returns_of(&model, getter, false), vec![expr]);
    }

    #[test]
    fn test_yield_return_excluded() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, block) = builder.method(ty, "Items", Accessibility::Public, false);
        let yielded = builder.literal("1");
        builder.yield_ret(block, yielded);
        let model = builder.finish();

        let decl = model.declaring_syntax(method)[0];
        assert!(returns_of(&model, decl, false).is_empty());
    }

    #[test]
    fn test_abstract_method_yields_empty() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let method = builder.abstract_method(ty, "Compute");
        let model = builder.finish();

        let decl = model.declaring_syntax(method)[0];
        assert!(returns_of(&model, decl, false).is_empty());
    }

    #[test]
    fn test_nested_lambda_returns_not_collected() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, block) = builder.method(ty, "MakeFactory", Accessibility::Public, false);
        let inner = builder.literal("1");
        let lambda = builder.lambda_returning(inner);
        builder.ret(block, Some(lambda));
        let model = builder.finish();

        // the lambda itself is the returned value; its body is not an exit
        // point of the enclosing method
        let decl = model.declaring_syntax(method)[0];
        assert_eq!(returns_of(&model, decl, false), vec![lambda]);
    }

    #[test]
    fn test_recursion_into_local_call() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let inner_value = builder.literal("7");
        let inner = builder.method_expr(ty, "Inner", Accessibility::Private, inner_value);
        let (outer, block) = builder.method(ty, "Outer", Accessibility::Public, false);
        let call = builder.call_method(inner, vec![]);
        builder.ret(block, Some(call));
        let model = builder.finish();

        let decl = model.declaring_syntax(outer)[0];
        // opaque without recursion, expanded with it
        assert_eq!(returns_of(&model, decl, false), vec![call]);
        assert_eq!(returns_of(&model, decl, true), vec![inner_value]);
    }

    #[test]
    fn test_mutually_recursive_calls_terminate() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        // A() => B(); B() => A(); plus one literal exit in B
        let (a, a_block) = builder.method(ty, "A", Accessibility::Private, false);
        let (b, b_block) = builder.method(ty, "B", Accessibility::Private, false);
        let call_b = builder.call_method(b, vec![]);
        builder.ret(a_block, Some(call_b));
        let (then_block, else_block) = builder.if_statement(b_block);
        let call_a = builder.call_method(a, vec![]);
        builder.ret(then_block, Some(call_a));
        let escape = builder.literal("0");
        builder.ret(else_block, Some(escape));
        let model = builder.finish();

        let decl = model.declaring_syntax(a)[0];
        let values = returns_of(&model, decl, true);
        // the guarded walk terminates and still surfaces the literal exit
        assert!(values.contains(&escape));
        assert!(!values.contains(&call_b));
    }

    #[test]
    fn test_unresolvable_call_stays_opaque() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, block) = builder.method(ty, "Get", Accessibility::Public, false);
        let callee = builder.unresolved_identifier("External");
        let call = builder.invocation(callee, vec![]);
        builder.ret(block, Some(call));
        let model = builder.finish();

        let decl = model.declaring_syntax(method)[0];
        assert_eq!(returns_of(&model, decl, true), vec![call]);
    }
}
