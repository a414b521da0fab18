//! Tests for the student service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockStudentRepository;
use crate::domain::{ErrorCode, ErrorExposure};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(fixed_now());
    Arc::new(clock)
}

fn make_service(repo: MockStudentRepository) -> StudentService<MockStudentRepository> {
    StudentService::new(
        Arc::new(repo),
        clock(),
        Deadline::new(Duration::from_secs(5), ErrorExposure::Verbose),
    )
}

#[fixture]
fn draft() -> NewStudent {
    NewStudent {
        name: "Ana".into(),
        age: 21,
        document_identification: "12345678900".into(),
        email_address: "ana@example.com".into(),
        password: "segredo".into(),
    }
}

fn stored(draft: NewStudent) -> Student {
    draft.into_student(StudentId::random(), fixed_now())
}

#[rstest]
#[tokio::test]
async fn create_inserts_after_uniqueness_checks(draft: NewStudent) {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_document()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_find_active_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let student = make_service(repo)
        .create(draft.clone())
        .await
        .expect("student created");

    assert_eq!(student.name, draft.name);
    assert_eq!(student.document_identification, draft.document_identification);
    assert_eq!(student.created_at, fixed_now());
    assert!(!student.deleted);
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_document_without_insert(draft: NewStudent) {
    let existing = stored(draft.clone());
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_document()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_find_active_by_email().times(0);
    repo.expect_insert().times(0);

    let err = make_service(repo)
        .create(draft)
        .await
        .expect_err("duplicate document");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), DUPLICATE_DOCUMENT_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_rejects_duplicate_email(draft: NewStudent) {
    let existing = stored(draft.clone());
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_document()
        .return_once(|_| Ok(None));
    repo.expect_find_active_by_email()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_insert().times(0);

    let err = make_service(repo)
        .create(draft)
        .await
        .expect_err("duplicate email");
    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[case(StudentPersistenceError::duplicate_document(), DUPLICATE_DOCUMENT_MESSAGE)]
#[case(StudentPersistenceError::duplicate_email(), DUPLICATE_EMAIL_MESSAGE)]
#[tokio::test]
async fn insert_time_violation_maps_to_same_conflict(
    draft: NewStudent,
    #[case] violation: StudentPersistenceError,
    #[case] message: &str,
) {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_document()
        .return_once(|_| Ok(None));
    repo.expect_find_active_by_email()
        .return_once(|_| Ok(None));
    repo.expect_insert().return_once(move |_| Err(violation));

    let err = make_service(repo)
        .create(draft)
        .await
        .expect_err("raced insert");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), message);
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_student() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id().return_once(|_| Ok(None));

    let err = make_service(repo)
        .get(&StudentId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), STUDENT_NOT_FOUND_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn connection_failures_surface_as_internal_errors() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id()
        .return_once(|_| Err(StudentPersistenceError::connection("refused")));

    let err = make_service(repo)
        .get(&StudentId::random())
        .await
        .expect_err("connection failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(
        err.message(),
        "Ocorreu um erro inesperado. Erro: Connection - refused"
    );
}

#[rstest]
#[tokio::test]
async fn list_short_circuits_on_empty_collection() {
    let mut repo = MockStudentRepository::new();
    repo.expect_count_active().return_once(|| Ok(0));
    repo.expect_list_active().times(0);

    let request = PageRequest::new(10, 4).expect("valid page");
    let page = make_service(repo).list(request).await.expect("empty page");

    assert!(page.data.is_empty());
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.total_pages, 1);
}

#[rstest]
#[tokio::test]
async fn list_fetches_requested_window(draft: NewStudent) {
    let rows: Vec<Student> = (0..10).map(|_| stored(draft.clone())).collect();
    let mut repo = MockStudentRepository::new();
    repo.expect_count_active().return_once(|| Ok(25));
    repo.expect_list_active()
        .withf(|offset, limit| *offset == 10 && *limit == 10)
        .times(1)
        .return_once(move |_, _| Ok(rows));

    let request = PageRequest::new(10, 2).expect("valid page");
    let page = make_service(repo).list(request).await.expect("page");

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.count, 25);
    assert_eq!(page.pagination.total_pages, 3);
}

#[rstest]
#[tokio::test]
async fn update_with_no_changes_returns_current(draft: NewStudent) {
    let existing = stored(draft);
    let expected = existing.clone();
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update().times(0);

    let student = make_service(repo)
        .update(&expected.id, StudentChanges::default())
        .await
        .expect("unchanged");
    assert_eq!(student, expected);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_student_skips_write() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id().return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let changes = StudentChanges {
        name: Some("Bia".into()),
        age: None,
    };
    let err = make_service(repo)
        .update(&StudentId::random(), changes)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_stamps_deletion_time(draft: NewStudent) {
    let existing = stored(draft);
    let id = existing.id;
    let mut deleted = existing.clone();
    deleted.deleted = true;
    deleted.deleted_at = Some(fixed_now());

    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_soft_delete()
        .withf(|_, at| *at == fixed_now())
        .times(1)
        .return_once(move |_, _| Ok(Some(deleted)));

    let student = make_service(repo).delete(&id).await.expect("deleted");
    assert!(student.deleted);
    assert_eq!(student.deleted_at, Some(fixed_now()));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn slow_repository_hits_the_deadline() {
    let mut repo = MockStudentRepository::new();
    repo.expect_list_active().times(0);

    let service = StudentService::new(
        Arc::new(SlowCount(repo)),
        clock(),
        Deadline::new(Duration::from_millis(50), ErrorExposure::Redacted),
    );
    let err = service
        .list(PageRequest::default())
        .await
        .expect_err("deadline exceeded");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Ocorreu um erro inesperado.");
}

/// Delegating repository whose count never completes in time.
struct SlowCount(MockStudentRepository);

#[async_trait]
impl StudentRepository for SlowCount {
    async fn find_active_by_id(
        &self,
        id: &StudentId,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.0.find_active_by_id(id).await
    }

    async fn find_active_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.0.find_active_by_document(document).await
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.0.find_active_by_email(email).await
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        self.0.insert(student).await
    }

    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.0.update(id, changes).await
    }

    async fn soft_delete(
        &self,
        id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.0.soft_delete(id, deleted_at).await
    }

    async fn count_active(&self) -> Result<u64, StudentPersistenceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(1)
    }

    async fn list_active(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Student>, StudentPersistenceError> {
        self.0.list_active(offset, limit).await
    }
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_student_skips_write() {
    let mut repo = MockStudentRepository::new();
    repo.expect_find_active_by_id().return_once(|_| Ok(None));
    repo.expect_soft_delete().times(0);

    let err = make_service(repo)
        .delete(&StudentId::random())
        .await
        .expect_err("already deleted");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), STUDENT_NOT_FOUND_MESSAGE);
}
