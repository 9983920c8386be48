//! Group order validation
//!
//! The order check reports, for each group, the first member (by position)
//! that sits below a member of a group configured to come later. Only one
//! diagnostic per group is produced, so a single misplaced block does not
//! cascade.

use crate::groups::{upper_first, GroupMember, GroupName, GroupOrder, GroupedNodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderViolation {
    /// Group of the misplaced member
    pub group: GroupName,
    pub member: GroupMember,
    /// Later group whose member appears first
    pub above_group: GroupName,
    pub above: GroupMember,
}

impl OrderViolation {
    pub fn message(&self) -> String {
        format!(
            "{} should be placed above {}",
            upper_first(self.group.humanized()),
            self.above_group.humanized()
        )
    }
}

/// First offender of every group, in `order`
pub fn find_first_out_of_order(groups: &GroupedNodes, order: &GroupOrder) -> Vec<OrderViolation> {
    let order = order.as_slice();
    let mut violations = Vec::new();

    for (index, group) in order.iter().enumerate() {
        let following = &order[index + 1..];
        let violation = groups.get(*group).iter().find_map(|member| {
            following.iter().find_map(|later| {
                groups
                    .get(*later)
                    .iter()
                    .find(|candidate| candidate.start() < member.start())
                    .map(|above| OrderViolation {
                        group: *group,
                        member: *member,
                        above_group: *later,
                        above: *above,
                    })
            })
        });
        violations.extend(violation);
    }

    violations
}

/// A maximal stretch of consecutive members of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRun {
    pub group: GroupName,
    pub first: GroupMember,
    pub last: GroupMember,
}

/// Members in source order, collapsed into runs of the same group
pub fn group_runs(groups: &GroupedNodes) -> Vec<GroupRun> {
    let mut runs: Vec<GroupRun> = Vec::new();
    for (group, member) in groups.members_in_source_order() {
        match runs.last_mut() {
            Some(run) if run.group == group => run.last = member,
            _ => runs.push(GroupRun {
                group,
                first: member,
                last: member,
            }),
        }
    }
    runs
}

/// Whether no group comes back after another group started
pub fn is_contiguous_by_group(runs: &[GroupRun]) -> bool {
    let mut seen = Vec::with_capacity(runs.len());
    runs.iter().all(|run| {
        if seen.contains(&run.group) {
            false
        } else {
            seen.push(run.group);
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::aggregate::build_initial_groups;
    use crate::groups::Vocabulary;
    use oxc_span::Span;

    fn at(start: u32) -> GroupMember {
        GroupMember {
            span: Span::new(start, start + 1),
            statement: Span::new(start, start + 1),
            declaration: None,
        }
    }

    fn store(members: &[(GroupName, u32)]) -> GroupedNodes {
        let mut groups = build_initial_groups(Vocabulary::Store);
        for (group, start) in members {
            groups.push(*group, at(*start));
        }
        groups
    }

    #[test]
    fn test_state_below_method_is_reported_once() {
        let groups = store(&[
            (GroupName::Methods, 5),
            (GroupName::States, 10),
            (GroupName::States, 12),
        ]);
        let violations = find_first_out_of_order(&groups, &GroupOrder::default_for(Vocabulary::Store));

        assert_eq!(violations.len(), 1);
        let violation = violations[0];
        assert_eq!(violation.member, at(10));
        assert_eq!(violation.above, at(5));
        assert_eq!(violation.message(), "States should be placed above methods");
    }

    #[test]
    fn test_one_violation_per_group() {
        let groups = store(&[
            (GroupName::Methods, 1),
            (GroupName::Watchers, 2),
            (GroupName::ComputedProperties, 3),
            (GroupName::States, 4),
        ]);
        let violations = find_first_out_of_order(&groups, &GroupOrder::default_for(Vocabulary::Store));

        let reported: Vec<_> = violations.iter().map(|v| (v.group, v.above_group)).collect();
        assert_eq!(
            reported,
            vec![
                (GroupName::States, GroupName::ComputedProperties),
                (GroupName::ComputedProperties, GroupName::Watchers),
                (GroupName::Watchers, GroupName::Methods),
            ]
        );
    }

    #[test]
    fn test_ordered_groups_are_clean() {
        let groups = store(&[
            (GroupName::States, 1),
            (GroupName::States, 2),
            (GroupName::ComputedProperties, 3),
            (GroupName::Methods, 4),
        ]);
        assert!(find_first_out_of_order(&groups, &GroupOrder::default_for(Vocabulary::Store)).is_empty());

        let runs = group_runs(&groups);
        assert_eq!(runs.len(), 3);
        assert_eq!((runs[0].first, runs[0].last), (at(1), at(2)));
        assert!(is_contiguous_by_group(&runs));
    }

    #[test]
    fn test_interleaving_is_not_contiguous() {
        let groups = store(&[
            (GroupName::States, 1),
            (GroupName::Methods, 2),
            (GroupName::States, 3),
        ]);
        assert!(!is_contiguous_by_group(&group_runs(&groups)));
    }
}
