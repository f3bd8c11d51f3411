use chrono::{NaiveDate, NaiveTime};
use planboard_core::db::open_db_in_memory;
use planboard_core::repo::commitment_repo::{
    CommitmentListQuery, CommitmentRepository, SqliteCommitmentRepository,
};
use planboard_core::repo::RepoError;
use planboard_core::service::commitment_service::{
    CommitmentService, CommitmentServiceError, NewCommitment,
};
use planboard_core::{Commitment, CommitmentCategory, Flexibility, Session};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_commitment(user_id: Uuid, title: &str, start: NaiveDate) -> Commitment {
    Commitment::new(
        user_id,
        "bo@example.com",
        CommitmentCategory::Holidays,
        Flexibility::Firm,
        title,
        start,
        start,
    )
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    let mut commitment = sample_commitment(user_id, "Offsite", date(2024, 3, 1));
    commitment.end_date = date(2024, 3, 3);
    commitment.start_time = NaiveTime::from_hms_opt(9, 0, 0);
    let id = repo.create(&commitment).unwrap();

    let loaded = repo.get(id, user_id).unwrap().unwrap();
    assert_eq!(loaded, commitment);
}

#[test]
fn get_is_scoped_to_the_owning_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    let commitment = sample_commitment(user_id, "Offsite", date(2024, 3, 1));
    let id = repo.create(&commitment).unwrap();

    assert!(repo.get(id, Uuid::new_v4()).unwrap().is_none());
    assert!(repo.get(id, user_id).unwrap().is_some());
}

#[test]
fn update_existing_commitment() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    let mut commitment = sample_commitment(user_id, "Standup", date(2024, 3, 1));
    repo.create(&commitment).unwrap();

    commitment.category = CommitmentCategory::Meetings;
    commitment.flexibility = Flexibility::Flexible;
    commitment.title = "Daily standup".to_string();
    repo.update(&commitment).unwrap();

    let loaded = repo.get(commitment.id, user_id).unwrap().unwrap();
    assert_eq!(loaded.category, CommitmentCategory::Meetings);
    assert_eq!(loaded.flexibility, Flexibility::Flexible);
    assert_eq!(loaded.title, "Daily standup");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);

    let commitment = sample_commitment(Uuid::new_v4(), "Ghost", date(2024, 3, 1));
    let err = repo.update(&commitment).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == commitment.id));
}

#[test]
fn invalid_commitment_is_rejected_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);

    let mut commitment = sample_commitment(Uuid::new_v4(), "Inverted", date(2024, 3, 5));
    commitment.end_date = date(2024, 3, 1);

    let err = repo.create(&commitment).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn list_orders_by_start_date_and_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    let mut meeting = sample_commitment(user_id, "Standup", date(2024, 3, 10));
    meeting.category = CommitmentCategory::Meetings;
    repo.create(&meeting).unwrap();
    repo.create(&sample_commitment(user_id, "Offsite", date(2024, 3, 1)))
        .unwrap();
    repo.create(&sample_commitment(Uuid::new_v4(), "Foreign", date(2024, 3, 2)))
        .unwrap();

    let all = repo.list(&CommitmentListQuery::for_user(user_id)).unwrap();
    let titles: Vec<_> = all.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Offsite", "Standup"]);

    let mut query = CommitmentListQuery::for_user(user_id);
    query.category = Some(CommitmentCategory::Meetings);
    let meetings = repo.list(&query).unwrap();
    assert_eq!(meetings.len(), 1);
    assert_eq!(meetings[0].title, "Standup");
}

#[test]
fn list_applies_limit_and_offset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    for day in 1..=4 {
        repo.create(&sample_commitment(
            user_id,
            &format!("Day {day}"),
            date(2024, 3, day),
        ))
        .unwrap();
    }

    let mut query = CommitmentListQuery::for_user(user_id);
    query.limit = Some(2);
    query.offset = 1;
    let page = repo.list(&query).unwrap();
    let titles: Vec<_> = page.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Day 2", "Day 3"]);
}

#[test]
fn delete_many_skips_foreign_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let user_id = Uuid::new_v4();

    let mine = sample_commitment(user_id, "Mine", date(2024, 3, 1));
    let foreign = sample_commitment(Uuid::new_v4(), "Foreign", date(2024, 3, 1));
    repo.create(&mine).unwrap();
    repo.create(&foreign).unwrap();

    let removed = repo.delete_many(&[mine.id, foreign.id], user_id).unwrap();
    assert_eq!(removed, 1);
    assert!(repo.get(foreign.id, foreign.user_id).unwrap().is_some());
}

#[test]
fn service_add_and_list_scoped_to_session() {
    let conn = open_db_in_memory().unwrap();
    let service = CommitmentService::new(SqliteCommitmentRepository::new(&conn));
    let session = Session::new(Uuid::new_v4(), "bo@example.com");

    let created = service
        .add(
            &session,
            NewCommitment {
                category: CommitmentCategory::Breaks,
                flexibility: Flexibility::Flexible,
                title: "Lunch".to_string(),
                start_date: date(2024, 3, 1),
                end_date: date(2024, 3, 1),
                start_time: NaiveTime::from_hms_opt(12, 0, 0),
                end_time: NaiveTime::from_hms_opt(13, 0, 0),
            },
        )
        .unwrap();
    assert_eq!(created.owner, "bo@example.com");

    let listed = service.list(&session).unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn service_update_rejects_foreign_owner() {
    let conn = open_db_in_memory().unwrap();
    let service = CommitmentService::new(SqliteCommitmentRepository::new(&conn));
    let session = Session::new(Uuid::new_v4(), "bo@example.com");

    let mut commitment = sample_commitment(session.user_id, "Offsite", date(2024, 3, 1));
    commitment.owner = "someone-else@example.com".to_string();

    let err = service.update(&session, &commitment).unwrap_err();
    assert!(matches!(err, CommitmentServiceError::NotOwner(id) if id == commitment.id));
}

#[test]
fn service_delete_many_checks_every_id_before_removing_anything() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCommitmentRepository::new(&conn);
    let service = CommitmentService::new(SqliteCommitmentRepository::new(&conn));
    let session = Session::new(Uuid::new_v4(), "bo@example.com");

    let first = sample_commitment(session.user_id, "First", date(2024, 3, 1));
    repo.create(&first).unwrap();
    let missing = Uuid::new_v4();

    let err = service.delete_many(&session, &[first.id, missing]).unwrap_err();
    assert!(matches!(err, CommitmentServiceError::CommitmentNotFound(id) if id == missing));
    // The batch failed before the delete, so the first record survives.
    assert!(repo.get(first.id, session.user_id).unwrap().is_some());

    let removed = service.delete_many(&session, &[first.id]).unwrap();
    assert_eq!(removed, 1);
}
