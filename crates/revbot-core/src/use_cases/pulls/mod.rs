pub(crate) mod create_pull_request;
pub(crate) mod get_pull_request;
pub(crate) mod list_reviewer_pull_requests;
pub(crate) mod merge_pull_request;

pub use create_pull_request::CreatePullRequestInterface;
pub use get_pull_request::GetPullRequestInterface;
pub use list_reviewer_pull_requests::ListReviewerPullRequestsInterface;
pub use merge_pull_request::MergePullRequestInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    get_pull_request::MockGetPullRequestInterface,
    list_reviewer_pull_requests::MockListReviewerPullRequestsInterface,
    merge_pull_request::MockMergePullRequestInterface,
};
