pub(crate) mod review_assignment_counts;

pub use review_assignment_counts::ReviewAssignmentCountsInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::review_assignment_counts::MockReviewAssignmentCountsInterface;
