//! Arena-backed syntax tree
//!
//! The analyzed program arrives as an immutable tree of kind-tagged nodes.
//! Nodes are identified by index into an arena (`NodeId`), which makes
//! identity comparison cheap and lets walkers carry plain ids instead of
//! references. The tree is append-only during construction and read-only
//! once handed to a `SemanticModel`.

use serde::{Deserialize, Serialize};

use super::Span;

/// Syntax node identifier (index into the tree arena)
pub type NodeId = u32;

/// Kind tag for syntax nodes.
///
/// This is the C#-flavoured subset the walkers pattern-match on; anything
/// outside it is carried opaquely and treated as a terminal expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    CompilationUnit,
    ClassDecl,
    ConstructorDecl,
    /// `: base(...)` or `: this(...)` initializer on a constructor
    BaseInitializer,
    MethodDecl,
    PropertyDecl,
    GetAccessor,
    SetAccessor,
    FieldDecl,
    ParameterList,
    Parameter,
    LocalDecl,
    Block,
    ExpressionStatement,
    ReturnStatement,
    YieldReturnStatement,
    ThrowStatement,
    IfStatement,
    AssignmentExpr,
    /// `+=`, `-=`, `??=` and friends
    CompoundAssignmentExpr,
    ObjectCreationExpr,
    InvocationExpr,
    MemberAccessExpr,
    IdentifierName,
    ThisExpr,
    BaseExpr,
    LiteralExpr,
    LambdaExpr,
    ArgumentList,
    Argument,
}

impl SyntaxKind {
    /// Whether a node of this kind can stand as an expression value.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::AssignmentExpr
                | SyntaxKind::CompoundAssignmentExpr
                | SyntaxKind::ObjectCreationExpr
                | SyntaxKind::InvocationExpr
                | SyntaxKind::MemberAccessExpr
                | SyntaxKind::IdentifierName
                | SyntaxKind::ThisExpr
                | SyntaxKind::BaseExpr
                | SyntaxKind::LiteralExpr
                | SyntaxKind::LambdaExpr
        )
    }

    /// Whether a node of this kind owns an executable body of its own.
    ///
    /// Walkers must not descend through these when collecting the exit
    /// points of an enclosing member.
    pub fn is_body_owner(self) -> bool {
        matches!(
            self,
            SyntaxKind::MethodDecl
                | SyntaxKind::ConstructorDecl
                | SyntaxKind::LambdaExpr
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
        )
    }
}

/// One node in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub span: Span,
    /// Identifier text, literal text or declared name, where applicable
    pub text: Option<String>,
}

/// Append-only syntax tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unattached node; `attach` links it into the tree.
    pub fn push(&mut self, kind: SyntaxKind, span: Span, text: Option<String>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            span,
            text,
        });
        id
    }

    /// Link `child` under `parent`, in declaration order.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child as usize].parent.is_none(),
            "node attached twice"
        );
        self.nodes[child as usize].parent = Some(parent);
        self.nodes[parent as usize].children.push(child);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id as usize].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id as usize].span
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id as usize].text.as_deref()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id as usize].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id as usize].children
    }

    /// First child of the given kind, if any.
    pub fn child_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.kind(c) == kind)
    }

    /// Walk up the parent chain (excluding `id` itself).
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// Nearest ancestor of the given kind.
    pub fn first_ancestor_of(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.kind(a) == kind)
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    ///
    /// Child order is attachment order, so iteration follows declaration
    /// order and keeps results deterministic.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            for &child in self.children(node).iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &mut SyntaxTree, kind: SyntaxKind) -> NodeId {
        tree.push(kind, Span::zero(), None)
    }

    #[test]
    fn test_attach_and_navigate() {
        let mut tree = SyntaxTree::new();
        let root = leaf(&mut tree, SyntaxKind::CompilationUnit);
        let class = leaf(&mut tree, SyntaxKind::ClassDecl);
        let field = leaf(&mut tree, SyntaxKind::FieldDecl);
        tree.attach(root, class);
        tree.attach(class, field);

        assert_eq!(tree.parent(field), Some(class));
        assert_eq!(tree.children(class), &[field]);
        assert_eq!(tree.first_ancestor_of(field, SyntaxKind::CompilationUnit), Some(root));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = SyntaxTree::new();
        let root = leaf(&mut tree, SyntaxKind::Block);
        let a = leaf(&mut tree, SyntaxKind::ExpressionStatement);
        let b = leaf(&mut tree, SyntaxKind::ReturnStatement);
        let a1 = leaf(&mut tree, SyntaxKind::IdentifierName);
        tree.attach(root, a);
        tree.attach(root, b);
        tree.attach(a, a1);

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
    }

    #[test]
    fn test_ancestors_stop_at_root() {
        let mut tree = SyntaxTree::new();
        let root = leaf(&mut tree, SyntaxKind::CompilationUnit);
        let child = leaf(&mut tree, SyntaxKind::ClassDecl);
        tree.attach(root, child);

        let ancestors: Vec<_> = tree.ancestors(child).collect();
        assert_eq!(ancestors, vec![root]);
        assert!(tree.ancestors(root).next().is_none());
    }
}
