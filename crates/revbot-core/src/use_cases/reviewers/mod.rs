pub(crate) mod assign_reviewers;
pub(crate) mod reassign_reviewer;
pub(crate) mod select_reviewer_candidates;

pub use assign_reviewers::AssignReviewersInterface;
pub use reassign_reviewer::ReassignReviewerInterface;
pub use select_reviewer_candidates::SelectReviewerCandidatesInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    assign_reviewers::MockAssignReviewersInterface,
    reassign_reviewer::MockReassignReviewerInterface,
    select_reviewer_candidates::MockSelectReviewerCandidatesInterface,
};
