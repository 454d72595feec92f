//! Branch-scoped visibility.
//!
//! Each entity kind declares how it relates to branches through a
//! [`Membership`] rule; a [`BranchSelection`] admits an entity when its rule is
//! satisfied. An empty selection means "all branches".

use std::collections::BTreeSet;

use fuelops_core::BranchId;

/// The set of branches the caller is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSelection {
    ids: BTreeSet<BranchId>,
}

impl BranchSelection {
    /// No filter: every entity is visible.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of(ids: impl IntoIterator<Item = BranchId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: BranchId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = BranchId> + '_ {
        self.ids.iter().copied()
    }

    fn any(&self, mut ids: impl Iterator<Item = BranchId>) -> bool {
        ids.any(|id| self.contains(id))
    }
}

impl FromIterator<BranchId> for BranchSelection {
    fn from_iter<I: IntoIterator<Item = BranchId>>(iter: I) -> Self {
        Self::of(iter)
    }
}

/// How an entity relates to branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership<'a> {
    /// The entity belongs to exactly one branch.
    Own(BranchId),
    /// Nested per-branch breakdown rows; any row counts.
    AnyRow(Vec<BranchId>),
    /// Source/destination pair (destination may be an external party).
    Pair { from: BranchId, to: Option<BranchId> },
    /// A trip from one branch to a list of destinations.
    Route {
        source: BranchId,
        destinations: &'a [BranchId],
    },
    /// Fulfilled through the hub: the hub sees everything, other branches see
    /// what they requested or were assigned.
    HubRouted {
        requester: BranchId,
        assigned: Option<BranchId>,
    },
}

impl Membership<'_> {
    pub fn admits(&self, selection: &BranchSelection, hub: BranchId) -> bool {
        if selection.is_all() {
            return true;
        }

        match self {
            Membership::Own(id) => selection.contains(*id),
            Membership::AnyRow(rows) => selection.any(rows.iter().copied()),
            Membership::Pair { from, to } => {
                selection.contains(*from) || to.is_some_and(|to| selection.contains(to))
            }
            Membership::Route {
                source,
                destinations,
            } => selection.contains(*source) || selection.any(destinations.iter().copied()),
            Membership::HubRouted {
                requester,
                assigned,
            } => {
                selection.contains(hub)
                    || selection.contains(*requester)
                    || assigned.is_some_and(|a| selection.contains(a))
            }
        }
    }
}

/// Entities that can be filtered by branch.
pub trait BranchScoped {
    fn membership(&self) -> Membership<'_>;
}
