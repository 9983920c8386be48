//! Bucketing of setup body statements into groups
//!
//! Body statements are classified by shape when a definition is opened
//! (each variable declarator becomes a tentative state, function
//! declarations become methods, imports become imports). Everything else
//! only enters a group through a traced call. At the end of the file the tentative states are
//! reconciled against the traced members, groups are sorted by position and
//! empty definitions are dropped.

use indexmap::IndexMap;
use oxc_ast::ast::Statement;
use oxc_span::{GetSpan, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use common::check::inner_expression;

use super::{GroupName, Vocabulary};

/// One node placed in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupMember {
    /// Node diagnostics are reported on
    pub span: Span,
    /// Root statement of the definition body that holds the node
    pub statement: Span,
    /// Nearest enclosing variable declarator, if any
    pub declaration: Option<Span>,
}

impl GroupMember {
    pub fn start(&self) -> u32 {
        self.span.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    /// The top level of a `<script setup>` block
    ScriptSetup,
    /// The setup function of a `defineStore` call
    Store,
}

impl DefinitionKind {
    pub fn vocabulary(self) -> Vocabulary {
        match self {
            Self::ScriptSetup => Vocabulary::Component,
            Self::Store => Vocabulary::Store,
        }
    }
}

/// Members of one definition, keyed by group in vocabulary order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedNodes {
    groups: IndexMap<GroupName, Vec<GroupMember>>,
}

/// Every group of the vocabulary, each with an empty member list
pub fn build_initial_groups(vocabulary: Vocabulary) -> GroupedNodes {
    GroupedNodes {
        groups: vocabulary
            .default_order()
            .iter()
            .map(|group| (*group, Vec::new()))
            .collect(),
    }
}

impl GroupedNodes {
    pub fn get(&self, group: GroupName) -> &[GroupMember] {
        self.groups.get(&group).map_or(&[], Vec::as_slice)
    }

    /// Append `member` to `group`; groups outside the vocabulary are refused
    pub fn push(&mut self, group: GroupName, member: GroupMember) -> bool {
        match self.groups.get_mut(&group) {
            Some(members) => {
                members.push(member);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupName, &[GroupMember])> {
        self.groups
            .iter()
            .map(|(group, members)| (*group, members.as_slice()))
    }

    pub fn total_len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// All members tagged with their group, by ascending position
    pub fn members_in_source_order(&self) -> Vec<(GroupName, GroupMember)> {
        let mut members: Vec<_> = self
            .iter()
            .flat_map(|(group, members)| members.iter().map(move |member| (group, *member)))
            .collect();
        members.sort_by_key(|(_, member)| member.start());
        members
    }

    fn sort(&mut self) {
        for members in self.groups.values_mut() {
            members.sort_by_key(GroupMember::start);
        }
    }
}

/// A store setup call or a script setup body, with its grouped members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInstance {
    pub kind: DefinitionKind,
    /// The `defineStore` call, or the whole program for script setup
    pub anchor: Span,
    pub groups: GroupedNodes,
}

/// Shape-only classification of a definition body statement. A variable
/// declaration yields one tentative state per declarator.
pub fn classify_body_statement(
    statement: &Statement,
    vocabulary: Vocabulary,
) -> Vec<(GroupName, GroupMember)> {
    let statement_span = statement.span();
    let whole = GroupMember {
        span: statement_span,
        statement: statement_span,
        declaration: None,
    };
    let members = match statement {
        Statement::VariableDeclaration(decl) => decl
            .declarations
            .iter()
            .map(|declarator| {
                (
                    GroupName::States,
                    GroupMember {
                        span: declarator.span,
                        statement: statement_span,
                        declaration: Some(declarator.span),
                    },
                )
            })
            .collect(),
        Statement::FunctionDeclaration(_) => vec![(GroupName::Methods, whole)],
        Statement::ImportDeclaration(_) => vec![(GroupName::Imports, whole)],
        _ => Vec::new(),
    };
    members
        .into_iter()
        .filter(|(group, _)| vocabulary.contains(*group))
        .collect()
}

/// States whose declaration is not claimed by a member of another group
pub fn reconcile_states(groups: &GroupedNodes) -> Vec<GroupMember> {
    let claimed: FxHashSet<Span> = groups
        .iter()
        .filter(|(group, _)| *group != GroupName::States)
        .flat_map(|(_, members)| members.iter().filter_map(|member| member.declaration))
        .collect();

    groups
        .get(GroupName::States)
        .iter()
        .filter(|state| !state.declaration.is_some_and(|decl| claimed.contains(&decl)))
        .copied()
        .collect()
}

/// Reconcile states, sort every group by position and drop empty definitions
pub fn finalize_instances(instances: Vec<DefinitionInstance>) -> Vec<DefinitionInstance> {
    instances
        .into_iter()
        .filter_map(|mut instance| {
            let states = reconcile_states(&instance.groups);
            if let Some(slot) = instance.groups.groups.get_mut(&GroupName::States) {
                *slot = states;
            }
            instance.groups.sort();
            if instance.groups.is_empty() {
                tracing::debug!(anchor = ?instance.anchor, "dropping empty definition");
                return None;
            }
            tracing::debug!(
                kind = ?instance.kind,
                anchor = ?instance.anchor,
                members = instance.groups.total_len(),
                "finalized definition"
            );
            Some(instance)
        })
        .collect()
}

/// Where a root expression of some definition body lives
#[derive(Debug, Clone, Copy)]
struct RootSlot {
    instance: usize,
    statement: Span,
}

/// The open definitions of one file.
///
/// Ownership of traced calls is decided by an explicit map from every root
/// expression of a definition body (the initializer of a root declarator, or
/// the expression of a root expression statement) to its definition, filled
/// when the definition is opened.
#[derive(Debug, Default)]
pub struct DefinitionSet {
    instances: Vec<DefinitionInstance>,
    roots: FxHashMap<Span, RootSlot>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition whose body is `statements`
    pub fn open(&mut self, kind: DefinitionKind, anchor: Span, statements: &[Statement]) -> usize {
        let index = self.instances.len();
        let vocabulary = kind.vocabulary();
        let mut groups = build_initial_groups(vocabulary);

        for statement in statements {
            for (group, member) in classify_body_statement(statement, vocabulary) {
                groups.push(group, member);
            }
            for root in root_expressions(statement) {
                self.roots.insert(
                    root,
                    RootSlot {
                        instance: index,
                        statement: statement.span(),
                    },
                );
            }
        }

        tracing::debug!(?kind, ?anchor, statements = statements.len(), "opened definition");
        self.instances.push(DefinitionInstance {
            kind,
            anchor,
            groups,
        });
        index
    }

    /// Whether `expression` is a root expression of an open definition
    pub fn owns(&self, expression: Span) -> bool {
        self.roots.contains_key(&expression)
    }

    /// Add a traced call to the definition owning the root expression `root`.
    ///
    /// Returns `false` when no definition owns it, or when the owning
    /// definition's vocabulary has no such group; the call is dropped then.
    pub fn merge_traced(
        &mut self,
        root: Span,
        group: GroupName,
        span: Span,
        declaration: Option<Span>,
    ) -> bool {
        let Some(slot) = self.roots.get(&root).copied() else {
            tracing::trace!(?span, %group, "traced call outside any definition root");
            return false;
        };
        let member = GroupMember {
            span,
            statement: slot.statement,
            declaration,
        };
        self.instances[slot.instance].groups.push(group, member)
    }

    pub fn finish(self) -> Vec<DefinitionInstance> {
        finalize_instances(self.instances)
    }
}

/// Spans of the expressions that sit directly at the root of a body statement
fn root_expressions(statement: &Statement) -> Vec<Span> {
    match statement {
        Statement::VariableDeclaration(decl) => decl
            .declarations
            .iter()
            .filter_map(|declarator| declarator.init.as_ref())
            .map(|init| inner_expression(init).span())
            .collect(),
        Statement::ExpressionStatement(stmt) => vec![inner_expression(&stmt.expression).span()],
        _ => Vec::new(),
    }
}
