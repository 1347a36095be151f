use revbot_database_interface::DatabaseError;
use revbot_models::{Team, TeamMember};

use crate::testcase::db_test_case;

fn member(id: &str, username: &str) -> TeamMember {
    TeamMember {
        id: id.into(),
        username: username.into(),
        is_active: true,
    }
}

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = db
            .teams_create(Team {
                name: "backend".into(),
                members: vec![member("u31", "zoe"), member("u30", "alice")],
            })
            .await?;

        assert_eq!(team.name, "backend");
        // Members come back ordered by username.
        assert_eq!(team.members, vec![member("u30", "alice"), member("u31", "zoe")]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_duplicate() {
    db_test_case("team_create_duplicate", |db| async move {
        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30", "alice")],
        })
        .await?;

        assert!(matches!(
            db.teams_create(Team {
                name: "backend".into(),
                members: vec![member("u31", "bob")],
            })
            .await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "backend"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);

        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30", "alice")],
        })
        .await?;

        let team = db.teams_get_expect("backend").await?;
        assert_eq!(team.members.len(), 1);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn member_upsert_moves_user() {
    db_test_case("team_member_upsert", |db| async move {
        db.teams_create(Team {
            name: "backend".into(),
            members: vec![member("u30", "alice")],
        })
        .await?;
        db.teams_create(Team {
            name: "qa".into(),
            members: vec![member("u30", "alice")],
        })
        .await?;

        // The second creation re-homed the user.
        assert_eq!(db.teams_get_expect("backend").await?.members, vec![]);
        assert_eq!(db.teams_get_expect("qa").await?.members.len(), 1);
        assert_eq!(db.users_get_expect("u30").await?.team_name, "qa");

        Ok(())
    })
    .await;
}
