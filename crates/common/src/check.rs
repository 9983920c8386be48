//! Shape predicates and ancestor queries over oxc AST nodes
//!
//! The predicates work on [`AstKind`], so every classification is an
//! exhaustive match over the node variant rather than a string tag test.
//! Ancestor queries run over an [`AncestorPath`]: the chain of nodes from the
//! `Program` root down to the node being looked at, as recorded by a visitor
//! through `enter_node` / `leave_node`.

use oxc_ast::ast::{
    Argument, CallExpression, Expression, FunctionBody, FunctionType, IdentifierReference,
};
use oxc_ast::AstKind;

/// Variable declaration statement, or one of its declarators
pub fn is_variable_declaration(kind: &AstKind) -> bool {
    matches!(
        kind,
        AstKind::VariableDeclaration(_) | AstKind::VariableDeclarator(_)
    )
}

/// Named function declarations, function expressions and arrow functions
pub fn is_function_like(kind: &AstKind) -> bool {
    matches!(
        kind,
        AstKind::Function(_) | AstKind::ArrowFunctionExpression(_)
    )
}

/// `function name() {}` in statement position
pub fn is_function_declaration(kind: &AstKind) -> bool {
    match kind {
        AstKind::Function(func) => matches!(func.r#type, FunctionType::FunctionDeclaration),
        _ => false,
    }
}

pub fn is_program(kind: &AstKind) -> bool {
    matches!(kind, AstKind::Program(_))
}

/// The chain of nodes from the program root to a node, root first.
#[derive(Debug, Clone, Copy)]
pub struct AncestorPath<'s, 'a> {
    path: &'s [AstKind<'a>],
}

impl<'s, 'a> AncestorPath<'s, 'a> {
    pub fn new(path: &'s [AstKind<'a>]) -> Self {
        Self { path }
    }

    /// The node this path ends at
    pub fn node(&self) -> Option<AstKind<'a>> {
        self.path.last().copied()
    }

    /// Number of nodes on the path, the node itself included
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Path ending at the structural parent of the current node
    pub fn parent_of(&self) -> Option<AncestorPath<'s, 'a>> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Self::new(&self.path[..self.path.len() - 1]))
    }

    /// Walk upwards until an ancestor satisfies `predicate`.
    ///
    /// The walk never goes past the `Program` root and is bounded by the
    /// recorded depth, so it always terminates.
    pub fn nearest_ancestor(
        &self,
        predicate: impl Fn(&AstKind<'a>) -> bool,
    ) -> Option<AncestorPath<'s, 'a>> {
        let mut current = *self;
        loop {
            if current.node().is_some_and(|kind| is_program(&kind)) {
                return None;
            }
            current = current.parent_of()?;
            if current.node().is_some_and(|kind| predicate(&kind)) {
                return Some(current);
            }
        }
    }

    /// A call used as a statement (`defineExpose({ ... })`), or the statement
    /// wrapping such a call
    pub fn is_statement_call(&self) -> bool {
        match self.node() {
            Some(AstKind::ExpressionStatement(stmt)) => matches!(
                inner_expression(&stmt.expression),
                Expression::CallExpression(_)
            ),
            Some(AstKind::CallExpression(_)) => self
                .parent_of()
                .and_then(|parent| parent.node())
                .is_some_and(|kind| matches!(kind, AstKind::ExpressionStatement(_))),
            _ => false,
        }
    }
}

/// Look through parentheses and TypeScript-only wrappers (`as`, `satisfies`, `!`)
pub fn inner_expression<'b, 'a>(expr: &'b Expression<'a>) -> &'b Expression<'a> {
    match expr {
        Expression::ParenthesizedExpression(paren) => inner_expression(&paren.expression),
        Expression::TSAsExpression(as_expr) => inner_expression(&as_expr.expression),
        Expression::TSSatisfiesExpression(satisfies) => inner_expression(&satisfies.expression),
        Expression::TSNonNullExpression(non_null) => inner_expression(&non_null.expression),
        _ => expr,
    }
}

/// Function or arrow expression, wrappers ignored
pub fn is_function_expression(expr: &Expression) -> bool {
    matches!(
        inner_expression(expr),
        Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_)
    )
}

/// Statement body of a function or block-bodied arrow expression
pub fn function_body<'b, 'a>(expr: &'b Expression<'a>) -> Option<&'b FunctionBody<'a>> {
    match inner_expression(expr) {
        Expression::FunctionExpression(func) => func.body.as_deref(),
        Expression::ArrowFunctionExpression(arrow) if !arrow.expression => Some(&arrow.body),
        _ => None,
    }
}

/// Identifier being called, if the callee is a plain identifier
pub fn callee_identifier<'b, 'a>(call: &'b CallExpression<'a>) -> Option<&'b IdentifierReference<'a>> {
    match inner_expression(&call.callee) {
        Expression::Identifier(ident) => Some(ident),
        _ => None,
    }
}

/// Argument at `index` as an expression (spread arguments are skipped)
pub fn argument_expression<'b, 'a>(
    call: &'b CallExpression<'a>,
    index: usize,
) -> Option<&'b Expression<'a>> {
    match call.arguments.get(index)? {
        Argument::SpreadElement(_) => None,
        arg => arg.as_expression(),
    }
}

/// Body of the setup function passed as second argument to a store definer.
///
/// Calls with fewer than two arguments, or whose second argument is not a
/// function with a statement body, are not store setups.
pub fn store_setup_body<'b, 'a>(call: &'b CallExpression<'a>) -> Option<&'b FunctionBody<'a>> {
    if call.arguments.len() < 2 {
        return None;
    }
    argument_expression(call, 1).and_then(function_body)
}
