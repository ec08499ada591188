//! Dispatch tests against a mocked user service.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use std::collections::VecDeque;
use userdir_client::{ClientError, Result as ClientResult, UserService};
use userdir_core::{FilterChange, FilterCriteria, Photo, User, UserDraft, UserId, UserPatch};
use userdir_store::{Command, Directory, Effect, NoticeLevel, StoreError, UserStore};

mock! {
    pub Service {}

    #[async_trait]
    impl UserService for Service {
        async fn list(&self) -> ClientResult<Vec<User>>;
        async fn get(&self, id: UserId) -> ClientResult<User>;
        async fn create(&self, draft: &UserDraft) -> ClientResult<User>;
        async fn update(&self, id: UserId, patch: &UserPatch) -> ClientResult<User>;
        async fn delete(&self, id: UserId) -> ClientResult<()>;
    }
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn user(id: i64, name: &str, birth: &str, country: &str) -> User {
    User {
        id: Some(UserId::new(id)),
        nickname: name.to_lowercase(),
        country: country.into(),
        province: "Centro".into(),
        neighborhood: "Baixa".into(),
        ..User::new(name, format!("{}@example.com", name.to_lowercase()), birth)
    }
}

fn seeded() -> Vec<User> {
    vec![
        user(1, "Ana", "2000-06-15", "Angola"),
        user(2, "Bruno", "1985-01-20", "Brasil"),
        user(3, "Carla", "2010-12-01", "Angola"),
    ]
}

fn complete_draft() -> UserDraft {
    UserDraft {
        name: "Duarte".into(),
        nickname: "dudu".into(),
        birth_date: "1970-03-03".into(),
        country: "Portugal".into(),
        province: "Lisboa".into(),
        neighborhood: "Alfama".into(),
        email: "duarte@example.com".into(),
        photo: Some(Photo::new(vec![0xFF, 0xD8], "webcam-photo.jpg", "image/jpeg")),
    }
}

fn server_error() -> ClientError {
    ClientError::ServerError {
        status: 500,
        message: "Internal Server Error".into(),
    }
}

/// Queue list responses; the first one is consumed by `loaded`
fn expect_lists(service: &mut MockService, responses: Vec<ClientResult<Vec<User>>>) {
    let mut queue = VecDeque::from(responses);
    service
        .expect_list()
        .times(queue.len())
        .returning(move || queue.pop_front().expect("unexpected list call"));
}

fn seeded_service() -> MockService {
    let mut service = MockService::new();
    expect_lists(&mut service, vec![Ok(seeded())]);
    service
}

async fn loaded(service: MockService) -> Directory<MockService> {
    let mut directory =
        Directory::new(UserStore::new(service)).with_reference_date(reference_date());
    assert!(directory.dispatch(Command::Refresh).await.is_ok());
    directory
}

#[tokio::test]
async fn refresh_populates_store_silently() {
    let directory = loaded(seeded_service()).await;

    assert_eq!(directory.store().users().await, seeded());
    assert_eq!(directory.visible_users().await.len(), 3);
}

#[tokio::test]
async fn refresh_failure_reports_and_records_error() {
    let mut service = MockService::new();
    service.expect_list().times(1).returning(|| Err(server_error()));
    let mut directory = Directory::new(UserStore::new(service));

    let outcome = directory.dispatch(Command::Refresh).await;

    assert!(!outcome.is_ok());
    let notice = outcome.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Failed to load users"));
    assert!(directory.store().last_error().await.is_some());
    assert!(!directory.store().is_loading());
}

#[tokio::test]
async fn create_with_missing_photo_never_reaches_server() {
    // No expectations: any service call would panic
    let mut directory = Directory::new(UserStore::new(MockService::new()));
    let draft = UserDraft {
        photo: None,
        ..complete_draft()
    };

    let outcome = directory.dispatch(Command::Create(draft)).await;

    match outcome.effect {
        Err(ref e @ StoreError::Validation(_)) => assert!(e.is_local()),
        ref other => panic!("Expected validation error, got: {:?}", other),
    }
    assert!(outcome.notice.unwrap().is_error());
    assert!(directory.store().is_empty().await);
}

#[tokio::test]
async fn create_appends_then_reloads() {
    let mut service = MockService::new();
    let created = user(4, "Duarte", "1970-03-03", "Portugal");
    let after = {
        let mut users = seeded();
        users.push(created.clone());
        users
    };

    let returned = created.clone();
    service
        .expect_create()
        .withf(|draft| draft.name == "Duarte" && draft.photo.is_some())
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    expect_lists(&mut service, vec![Ok(seeded()), Ok(after)]);

    let mut directory = loaded(service).await;
    let outcome = directory.dispatch(Command::Create(complete_draft())).await;

    assert_eq!(outcome.effect.unwrap(), Effect::Created(created.clone()));
    assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Success);
    assert_eq!(directory.store().len().await, 4);
    assert_eq!(directory.store().find(UserId::new(4)).await, Some(created));
}

#[tokio::test]
async fn create_failure_leaves_list_unchanged() {
    let mut service = seeded_service();
    service
        .expect_create()
        .times(1)
        .returning(|_| Err(server_error()));

    let mut directory = loaded(service).await;
    let outcome = directory.dispatch(Command::Create(complete_draft())).await;

    assert!(!outcome.is_ok());
    assert!(outcome
        .notice
        .unwrap()
        .message
        .starts_with("Failed to create user"));
    assert_eq!(directory.store().users().await, seeded());
}

#[tokio::test]
async fn create_reload_failure_still_reports_success() {
    let mut service = MockService::new();
    let created = user(4, "Duarte", "1970-03-03", "Portugal");
    let returned = created.clone();
    service
        .expect_create()
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    expect_lists(&mut service, vec![Ok(seeded()), Err(server_error())]);

    let mut directory = loaded(service).await;
    let outcome = directory.dispatch(Command::Create(complete_draft())).await;

    assert!(outcome.is_ok());
    assert_eq!(directory.store().len().await, 4);
    assert!(directory.store().last_error().await.is_some());
}

#[tokio::test]
async fn empty_patch_is_rejected_locally() {
    let mut directory = Directory::new(UserStore::new(MockService::new()));

    let outcome = directory
        .dispatch(Command::Update {
            id: UserId::new(1),
            patch: UserPatch::default(),
        })
        .await;

    assert!(matches!(outcome.effect, Err(StoreError::EmptyPatch)));
}

#[tokio::test]
async fn update_replaces_record() {
    let mut service = MockService::new();
    let mut renamed = user(2, "Bruno", "1985-01-20", "Brasil");
    renamed.email = "bruno@new.example.com".into();
    let returned = renamed.clone();
    let after = vec![seeded()[0].clone(), renamed.clone(), seeded()[2].clone()];

    service
        .expect_update()
        .withf(|id, patch| {
            *id == UserId::new(2) && patch.email.as_deref() == Some("bruno@new.example.com")
        })
        .times(1)
        .returning(move |_, _| Ok(returned.clone()));
    expect_lists(&mut service, vec![Ok(seeded()), Ok(after)]);

    let mut directory = loaded(service).await;
    let outcome = directory
        .dispatch(Command::Update {
            id: UserId::new(2),
            patch: UserPatch {
                email: Some("bruno@new.example.com".into()),
                ..Default::default()
            },
        })
        .await;

    assert_eq!(outcome.effect.unwrap(), Effect::Updated(renamed.clone()));
    assert_eq!(directory.store().users().await[1], renamed);
}

#[tokio::test]
async fn delete_success_and_failure() {
    let mut service = seeded_service();
    service
        .expect_delete()
        .withf(|id| *id == UserId::new(3))
        .times(1)
        .returning(|_| Ok(()));
    service
        .expect_delete()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .returning(|_| Err(server_error()));

    let mut directory = loaded(service).await;

    let outcome = directory.dispatch(Command::Delete(UserId::new(3))).await;
    assert_eq!(outcome.effect.unwrap(), Effect::Deleted(UserId::new(3)));
    assert_eq!(directory.store().len().await, 2);

    let outcome = directory.dispatch(Command::Delete(UserId::new(1))).await;
    assert!(outcome.notice.unwrap().is_error());
    assert_eq!(directory.store().users().await, seeded()[..2].to_vec());
}

#[tokio::test]
async fn filters_reduce_and_clear() {
    let mut directory = loaded(seeded_service()).await;

    directory
        .dispatch(Command::SetFilter(FilterChange::Country("Angola".into())))
        .await;
    let names: Vec<String> = directory
        .visible_users()
        .await
        .into_iter()
        .map(|u| u.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Carla"]);

    directory
        .dispatch(Command::SetFilter(FilterChange::SearchTerm("CARLA".into())))
        .await;
    assert_eq!(directory.visible_users().await.len(), 1);

    let outcome = directory.dispatch(Command::ClearFilters).await;
    assert_eq!(
        outcome.effect.unwrap(),
        Effect::FiltersChanged(FilterCriteria::default())
    );
    assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Success);
    assert_eq!(directory.visible_users().await, seeded());
}

#[tokio::test]
async fn clear_restores_configured_defaults() {
    let mut service = MockService::new();
    service.expect_list().returning(|| Ok(seeded()));
    let mut directory = Directory::with_criteria(
        UserStore::new(service),
        FilterCriteria::with_age_range(18, 65),
    )
    .with_reference_date(reference_date());
    directory.dispatch(Command::Refresh).await;

    // Carla is 13
    assert_eq!(directory.visible_users().await.len(), 2);

    directory.dispatch(Command::SetFilter(FilterChange::MinAge(0))).await;
    assert_eq!(directory.visible_users().await.len(), 3);

    directory.dispatch(Command::ClearFilters).await;
    assert_eq!(directory.criteria(), &FilterCriteria::with_age_range(18, 65));
    assert_eq!(directory.visible_users().await.len(), 2);
}

#[tokio::test]
async fn facets_come_from_full_list() {
    let mut directory = loaded(seeded_service()).await;
    directory
        .dispatch(Command::SetFilter(FilterChange::Country("Brasil".into())))
        .await;

    let facets = directory.facets().await;
    assert_eq!(facets.countries, vec!["Angola", "Brasil"]);
    assert_eq!(facets.provinces, vec!["Centro"]);
}
