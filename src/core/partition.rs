//! Random roster partitioning
//!
//! Shuffles the roster and slices it into fixed-size groups; leftover
//! members are folded into the first groups formed.

use crate::domain::model::{Group, Member, RemainderPolicy};
use crate::utils::error::Result;
use crate::utils::validation::validate_group_size;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Output of a single partition run.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub groups: Vec<Group>,
    /// Members that could not be placed (only under [`RemainderPolicy::Drop`]
    /// when the roster is smaller than one group).
    pub unassigned: Vec<Member>,
}

#[derive(Debug, Clone, Copy)]
pub struct GroupPartitioner {
    group_size: usize,
    policy: RemainderPolicy,
}

impl GroupPartitioner {
    pub fn new(group_size: usize) -> Result<Self> {
        validate_group_size(group_size)?;
        Ok(Self {
            group_size,
            policy: RemainderPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: RemainderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn policy(&self) -> RemainderPolicy {
        self.policy
    }

    pub fn split<R: Rng + ?Sized>(&self, roster: &[Member], rng: &mut R) -> Partition {
        let mut shuffled = roster.to_vec();
        shuffled.shuffle(rng);

        let total_groups = shuffled.len() / self.group_size;
        let remainder = shuffled.len() % self.group_size;

        if total_groups == 0 {
            if shuffled.is_empty() {
                return Partition {
                    groups: Vec::new(),
                    unassigned: Vec::new(),
                };
            }
            return match self.policy {
                RemainderPolicy::Drop => {
                    warn!(
                        "Roster of {} is smaller than group size {}; no group formed",
                        shuffled.len(),
                        self.group_size
                    );
                    Partition {
                        groups: Vec::new(),
                        unassigned: shuffled,
                    }
                }
                RemainderPolicy::Undersized => Partition {
                    groups: vec![Group {
                        id: group_id(0),
                        members: shuffled,
                    }],
                    unassigned: Vec::new(),
                },
            };
        }

        // 尾端多出的人依序補進前面的組別
        let leftovers = shuffled.split_off(total_groups * self.group_size);
        let mut groups: Vec<Group> = shuffled
            .chunks(self.group_size)
            .enumerate()
            .map(|(i, chunk)| Group {
                id: group_id(i),
                members: chunk.to_vec(),
            })
            .collect();

        // 餘數多於組數時繞回第一組，確保沒有人被漏掉
        for (i, member) in leftovers.into_iter().enumerate() {
            groups[i % total_groups].members.push(member);
        }

        debug!(
            "Partitioned {} members into {} groups of {} ({} enlarged)",
            roster.len(),
            total_groups,
            self.group_size,
            remainder
        );

        Partition {
            groups,
            unassigned: Vec::new(),
        }
    }
}

fn group_id(index: usize) -> String {
    format!("group-{}", index)
}

/// Shuffle `roster` and split it into groups of `group_size`.
///
/// A roster shorter than `group_size` yields no groups.
pub fn partition<R: Rng + ?Sized>(
    roster: &[Member],
    group_size: usize,
    rng: &mut R,
) -> Result<Vec<Group>> {
    Ok(GroupPartitioner::new(group_size)?.split(roster, rng).groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SkillScores;
    use crate::utils::error::GroupError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| Member::new(format!("m{}", i), format!("Member {}", i), SkillScores::default()))
            .collect()
    }

    #[test]
    fn test_zero_group_size_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = partition(&roster(4), 0, &mut rng).unwrap_err();
        assert!(matches!(err, GroupError::InvalidGroupSize { size: 0 }));
    }

    #[test]
    fn test_seven_members_groups_of_three() {
        let mut rng = StdRng::seed_from_u64(7);
        let groups = partition(&roster(7), 3, &mut rng).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 3);
        assert_eq!(groups[0].id, "group-0");
        assert_eq!(groups[1].id, "group-1");
    }

    #[test]
    fn test_remainder_larger_than_group_count_wraps() {
        let mut rng = StdRng::seed_from_u64(5);
        let groups = partition(&roster(7), 5, &mut rng).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 7);

        let groups = partition(&roster(11), 4, &mut rng).unwrap();
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![6, 5]);
    }

    #[test]
    fn test_same_seed_same_groups() {
        let members = roster(20);
        let a = partition(&members, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = partition(&members, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_roster_drop_policy_reports_unassigned() {
        let mut rng = StdRng::seed_from_u64(3);
        let partitioner = GroupPartitioner::new(10).unwrap();
        let result = partitioner.split(&roster(5), &mut rng);

        assert!(result.groups.is_empty());
        assert_eq!(result.unassigned.len(), 5);
    }

    #[test]
    fn test_small_roster_undersized_policy() {
        let mut rng = StdRng::seed_from_u64(3);
        let partitioner = GroupPartitioner::new(10)
            .unwrap()
            .with_policy(RemainderPolicy::Undersized);
        let result = partitioner.split(&roster(5), &mut rng);

        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].len(), 5);
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_empty_roster() {
        let mut rng = StdRng::seed_from_u64(3);
        let partitioner = GroupPartitioner::new(3)
            .unwrap()
            .with_policy(RemainderPolicy::Undersized);
        let result = partitioner.split(&[], &mut rng);
        assert!(result.groups.is_empty());
        assert!(result.unassigned.is_empty());
    }
}
