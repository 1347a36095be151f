use revbot_database_interface::DatabaseError;
use revbot_models::{PullRequest, PullRequestStatus, Team, TeamMember};

use crate::testcase::db_test_case;

fn team(member_ids: &[&str]) -> Team {
    Team {
        name: "backend".into(),
        members: member_ids
            .iter()
            .map(|id| TeamMember {
                id: (*id).into(),
                username: (*id).into(),
                is_active: true,
            })
            .collect(),
    }
}

fn pull_request(id: &str, author_id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest {
        id: id.into(),
        title: format!("Title of {id}"),
        author_id: author_id.into(),
        reviewers: reviewers.iter().map(|r| (*r).to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32"])).await?;

        let pr = db
            .pull_requests_create(pull_request("pr-1", "u30", &["u31", "u32"]))
            .await?;

        assert_eq!(pr.status, PullRequestStatus::Open);
        assert!(pr.created_at.is_some());
        assert_eq!(pr.merged_at, None);
        // Reviewer rows keep assignment order.
        assert_eq!(pr.reviewers, vec!["u31", "u32"]);

        let fetched = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(fetched.reviewers, vec!["u31", "u32"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_duplicate() {
    db_test_case("pull_request_create_duplicate", |db| async move {
        db.teams_create(team(&["u30", "u31"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &["u31"]))
            .await?;

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u30", &["u31"]))
                .await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "pr-1"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("pull_request_get", |db| async move {
        assert_eq!(db.pull_requests_get("pr-1").await?, None);

        db.teams_create(team(&["u30"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &[]))
            .await?;

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.reviewers, Vec::<String>::new());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn merge() {
    db_test_case("pull_request_merge", |db| async move {
        assert!(matches!(
            db.pull_requests_merge("pr-1").await,
            Err(DatabaseError::UnknownPullRequest(id)) if id == "pr-1"
        ));

        db.teams_create(team(&["u30"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &[]))
            .await?;

        let merged = db.pull_requests_merge("pr-1").await?;
        assert_eq!(merged.status, PullRequestStatus::Merged);
        assert!(merged.merged_at.is_some());

        // The conditional update leaves an already merged row untouched.
        let again = db.pull_requests_merge("pr-1").await?;
        assert_eq!(again.merged_at, merged.merged_at);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn swap_reviewer() {
    db_test_case("pull_request_swap_reviewer", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32", "u33"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &["u31", "u32"]))
            .await?;

        db.pull_requests_swap_reviewer("pr-1", "u31", "u33").await?;

        // The replacement lands at the end of the assignment order.
        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.reviewers, vec!["u32", "u33"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn swap_reviewer_not_assigned() {
    db_test_case("pull_request_swap_not_assigned", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32", "u33"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &["u31"]))
            .await?;

        assert!(matches!(
            db.pull_requests_swap_reviewer("pr-1", "u32", "u33").await,
            Err(DatabaseError::ReviewerNotAssigned { reviewer_id, .. }) if reviewer_id == "u32"
        ));

        // Nothing was inserted.
        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.reviewers, vec!["u31"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn swap_reviewer_loses_race() {
    db_test_case("pull_request_swap_race", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32", "u33", "u34"]))
            .await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &["u31", "u32"]))
            .await?;

        // Two swaps racing on the same (pull request, old reviewer) pair:
        // exactly one wins, the other gets the not-assigned outcome.
        let (first, second) = futures::join!(
            db.pull_requests_swap_reviewer("pr-1", "u31", "u33"),
            db.pull_requests_swap_reviewer("pr-1", "u31", "u34"),
        );

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        let loser = if first.is_ok() { second } else { first };
        assert!(matches!(
            loser,
            Err(DatabaseError::ReviewerNotAssigned { reviewer_id, .. }) if reviewer_id == "u31"
        ));

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.reviewers.len(), 2);
        assert!(!pr.reviewers.contains(&"u31".into()));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_for_reviewer() {
    db_test_case("pull_request_list_for_reviewer", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32"])).await?;
        db.pull_requests_create(pull_request("pr-1", "u30", &["u31"]))
            .await?;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        db.pull_requests_create(pull_request("pr-2", "u30", &["u31", "u32"]))
            .await?;

        // Newest first.
        let listed = db.pull_requests_list_for_reviewer("u31").await?;
        let ids: Vec<_> = listed.iter().map(|pr| pr.id.as_str()).collect();
        assert_eq!(ids, vec!["pr-2", "pr-1"]);

        let listed = db.pull_requests_list_for_reviewer("u32").await?;
        assert_eq!(listed.len(), 1);

        let listed = db.pull_requests_list_for_reviewer("u30").await?;
        assert_eq!(listed, vec![]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn assignment_counts() {
    db_test_case("pull_request_assignment_counts", |db| async move {
        db.teams_create(team(&["u30", "u31", "u32"])).await?;

        assert!(db.review_assignment_counts().await?.is_empty());

        db.pull_requests_create(pull_request("pr-1", "u30", &["u31", "u32"]))
            .await?;
        db.pull_requests_create(pull_request("pr-2", "u30", &["u31"]))
            .await?;

        let counts = db.review_assignment_counts().await?;
        assert_eq!(counts.get("u31"), Some(&2));
        assert_eq!(counts.get("u32"), Some(&1));
        assert_eq!(counts.get("u30"), None);

        Ok(())
    })
    .await;
}
