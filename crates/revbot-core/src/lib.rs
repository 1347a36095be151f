//! Logic module.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest, get_pull_request::GetPullRequest,
        list_reviewer_pull_requests::ListReviewerPullRequests,
        merge_pull_request::MergePullRequest,
    },
    reviewers::{
        assign_reviewers::AssignReviewers, reassign_reviewer::ReassignReviewer,
        select_reviewer_candidates::SelectReviewerCandidates,
    },
    stats::review_assignment_counts::ReviewAssignmentCounts,
    teams::{create_team::CreateTeam, get_team::GetTeam},
    users::set_user_active::SetUserActive,
};

module! {
    pub CoreModule {
        components = [
            SelectReviewerCandidates, AssignReviewers, ReassignReviewer,
            CreatePullRequest, GetPullRequest, MergePullRequest,
            ListReviewerPullRequests, CreateTeam, GetTeam,
            SetUserActive, ReviewAssignmentCounts
        ],
        providers = []
    }
}
