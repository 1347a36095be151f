use revbot_database_interface::DatabaseError;
use revbot_models::{Team, TeamMember};

use crate::testcase::db_test_case;

fn member(id: &str) -> TeamMember {
    TeamMember {
        id: id.into(),
        username: id.into(),
        is_active: true,
    }
}

#[tokio::test]
async fn get() {
    db_test_case("user_get", |db| async move {
        assert_eq!(db.users_get("u30").await?, None);

        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30")],
        })
        .await?;

        let user = db.users_get_expect("u30").await?;
        assert_eq!(user.team_name, "backend");
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_is_active() {
    db_test_case("user_set_is_active", |db| async move {
        assert!(matches!(
            db.users_set_is_active("u30", false).await,
            Err(DatabaseError::UnknownUser(id)) if id == "u30"
        ));

        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30")],
        })
        .await?;

        let user = db.users_set_is_active("u30", false).await?;
        assert!(!user.is_active);

        let user = db.users_set_is_active("u30", true).await?;
        assert!(user.is_active);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn active_in_team() {
    db_test_case("user_active_in_team", |db| async move {
        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30"), member("u31"), member("u32"), member("u33")],
        })
        .await?;
        db.users_set_is_active("u33", false).await?;

        let mut candidates = db
            .users_active_in_team("backend", &["u30".into()])
            .await?;
        candidates.sort();
        assert_eq!(candidates, vec!["u31", "u32"]);

        let candidates = db
            .users_active_in_team("backend", &["u30".into(), "u31".into(), "u32".into()])
            .await?;
        assert_eq!(candidates, Vec::<String>::new());

        Ok(())
    })
    .await;
}
