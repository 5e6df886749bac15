//! Priority classification of category reactors and headcount derivation.

use crate::UserId;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One fixed non-human occupant is always counted in the instance total.
pub const FIXED_OCCUPANTS: usize = 1;

/// Guests each category A reactor brings along.
pub const GUESTS_PER_A: usize = 2;

/// Raw reactor sets for the three tracked categories.
///
/// A user may appear in more than one set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySets {
    /// Category A reactors.
    pub a: HashSet<UserId>,
    /// Category B reactors.
    pub b: HashSet<UserId>,
    /// Category C reactors.
    pub c: HashSet<UserId>,
}

impl CategorySets {
    /// Build from the three raw sets.
    pub fn new(a: HashSet<UserId>, b: HashSet<UserId>, c: HashSet<UserId>) -> Self {
        Self { a, b, c }
    }

    /// Resolve overlaps under the strict precedence A > B > C.
    ///
    /// A is kept as is, B loses everyone in A, and C loses everyone in A or B.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_core::{CategorySets, UserId};
    ///
    /// let sets = CategorySets::new(
    ///     [UserId(1), UserId(2)].into(),
    ///     [UserId(2), UserId(3)].into(),
    ///     [UserId(4)].into(),
    /// );
    /// let disjoint = sets.classify();
    /// assert!(disjoint.a().contains(&UserId(2)));
    /// assert!(!disjoint.b().contains(&UserId(2)));
    /// ```
    pub fn classify(self) -> DisjointCategorySets {
        let Self { a, mut b, mut c } = self;
        b.retain(|id| !a.contains(id));
        c.retain(|id| !a.contains(id) && !b.contains(id));
        DisjointCategorySets { a, b, c }
    }
}

/// Category sets after priority resolution. Pairwise disjoint.
///
/// Only [`CategorySets::classify`] can build one, which keeps the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct DisjointCategorySets {
    /// Users counted under category A.
    a: HashSet<UserId>,
    /// Users counted under category B.
    b: HashSet<UserId>,
    /// Users counted under category C.
    c: HashSet<UserId>,
}

impl DisjointCategorySets {
    /// Derive the headcounts.
    pub fn aggregate(&self) -> AggregateResult {
        AggregateResult::compute(self.a.len(), self.b.len(), self.c.len())
    }
}

/// Headcounts derived from the disjoint category sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Category A headcount.
    pub count_a: usize,
    /// Category B headcount.
    pub count_b: usize,
    /// Category C headcount.
    pub count_c: usize,
    /// `count_a + count_b + count_c`.
    pub staff: usize,
    /// `count_a * 2`.
    pub guest: usize,
    /// `staff + guest + 1`.
    pub instance: usize,
}

impl AggregateResult {
    /// Derive all totals from the three category counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_core::AggregateResult;
    ///
    /// let result = AggregateResult::compute(2, 1, 1);
    /// assert_eq!(result.staff, 4);
    /// assert_eq!(result.guest, 4);
    /// assert_eq!(result.instance, 9);
    /// ```
    pub fn compute(count_a: usize, count_b: usize, count_c: usize) -> Self {
        let staff = count_a + count_b + count_c;
        let guest = count_a * GUESTS_PER_A;
        Self {
            count_a,
            count_b,
            count_c,
            staff,
            guest,
            instance: staff + guest + FIXED_OCCUPANTS,
        }
    }
}
