//! In-process repositories used when no database is configured.
//!
//! Each store keeps rows in insertion order behind a single mutex, so the
//! uniqueness check and the insert happen under one lock.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AddressPersistenceError, AddressRepository, StudentPersistenceError, StudentRepository,
};
use crate::domain::{Address, AddressChanges, Student, StudentChanges, StudentId};

const POISONED: &str = "in-memory store lock poisoned";

/// Student rows held in memory.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    rows: Mutex<Vec<Student>>,
}

impl InMemoryStudentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Student>>, StudentPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| StudentPersistenceError::query(POISONED))
    }

    fn find_active<P>(&self, predicate: P) -> Result<Option<Student>, StudentPersistenceError>
    where
        P: Fn(&Student) -> bool,
    {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .find(|student| !student.deleted && predicate(student))
            .cloned())
    }

    fn modify_active<F>(
        &self,
        id: &StudentId,
        change: F,
    ) -> Result<Option<Student>, StudentPersistenceError>
    where
        F: FnOnce(&mut Student),
    {
        let mut rows = self.rows()?;
        Ok(rows
            .iter_mut()
            .find(|student| !student.deleted && student.id == *id)
            .map(|student| {
                change(student);
                student.clone()
            }))
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_active_by_id(
        &self,
        id: &StudentId,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.find_active(|student| student.id == *id)
    }

    async fn find_active_by_document(
        &self,
        document: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.find_active(|student| student.document_identification == document)
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.find_active(|student| student.email_address == email)
    }

    async fn insert(&self, student: &Student) -> Result<(), StudentPersistenceError> {
        let mut rows = self.rows()?;
        let active = || rows.iter().filter(|row| !row.deleted);
        if active().any(|row| row.document_identification == student.document_identification) {
            return Err(StudentPersistenceError::duplicate_document());
        }
        if active().any(|row| row.email_address == student.email_address) {
            return Err(StudentPersistenceError::duplicate_email());
        }
        rows.push(student.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &StudentId,
        changes: &StudentChanges,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.modify_active(id, |student| changes.apply_to(student))
    }

    async fn soft_delete(
        &self,
        id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Student>, StudentPersistenceError> {
        self.modify_active(id, |student| {
            student.deleted = true;
            student.deleted_at = Some(deleted_at);
        })
    }

    async fn count_active(&self) -> Result<u64, StudentPersistenceError> {
        let rows = self.rows()?;
        let count = rows.iter().filter(|student| !student.deleted).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_active(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Student>, StudentPersistenceError> {
        let rows = self.rows()?;
        // Later inserts win ties on `created_at`.
        let mut active: Vec<(usize, &Student)> = rows
            .iter()
            .enumerate()
            .filter(|(_, student)| !student.deleted)
            .collect();
        active.sort_by(|(left_seq, left), (right_seq, right)| {
            right
                .created_at
                .cmp(&left.created_at)
                .then(right_seq.cmp(left_seq))
        });
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(active
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|(_, student)| student.clone())
            .collect())
    }
}

/// Address rows held in memory.
#[derive(Debug, Default)]
pub struct InMemoryAddressRepository {
    rows: Mutex<Vec<Address>>,
}

impl InMemoryAddressRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, Vec<Address>>, AddressPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| AddressPersistenceError::query(POISONED))
    }

    fn modify_active<F>(
        &self,
        owner: &StudentId,
        change: F,
    ) -> Result<Option<Address>, AddressPersistenceError>
    where
        F: FnOnce(&mut Address),
    {
        let mut rows = self.rows()?;
        Ok(rows
            .iter_mut()
            .find(|address| !address.deleted && address.student_id == *owner)
            .map(|address| {
                change(address);
                address.clone()
            }))
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .find(|address| !address.deleted && address.student_id == *student_id)
            .cloned())
    }

    async fn insert(&self, address: &Address) -> Result<(), AddressPersistenceError> {
        let mut rows = self.rows()?;
        if rows
            .iter()
            .any(|row| !row.deleted && row.student_id == address.student_id)
        {
            return Err(AddressPersistenceError::duplicate());
        }
        rows.push(address.clone());
        Ok(())
    }

    async fn update(
        &self,
        student_id: &StudentId,
        changes: &AddressChanges,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        self.modify_active(student_id, |address| changes.apply_to(address))
    }

    async fn soft_delete(
        &self,
        student_id: &StudentId,
        deleted_at: DateTime<Utc>,
    ) -> Result<Option<Address>, AddressPersistenceError> {
        self.modify_active(student_id, |address| {
            address.deleted = true;
            address.deleted_at = Some(deleted_at);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressId, NewAddress, NewStudent};
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn student(document: &str, email: &str, created_at: DateTime<Utc>) -> Student {
        NewStudent {
            name: "Ana".into(),
            age: 20,
            document_identification: document.into(),
            email_address: email.into(),
            password: "segredo".into(),
        }
        .into_student(StudentId::random(), created_at)
    }

    fn address(owner: StudentId) -> Address {
        NewAddress {
            street: "Rua A".into(),
            address_number: "10".into(),
            zip_code: "99884433".into(),
            complement: None,
            neighborhood: "Centro".into(),
            city: "Porto Alegre".into(),
            uf: "RS".into(),
        }
        .into_address(AddressId::random(), owner, base_time())
    }

    #[fixture]
    fn students() -> InMemoryStudentRepository {
        InMemoryStudentRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_document_is_rejected_atomically(students: InMemoryStudentRepository) {
        students
            .insert(&student("111", "a@example.com", base_time()))
            .await
            .expect("first insert");
        let err = students
            .insert(&student("111", "b@example.com", base_time()))
            .await
            .expect_err("duplicate document");
        assert_eq!(err, StudentPersistenceError::DuplicateDocument);
        assert_eq!(students.count_active().await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(students: InMemoryStudentRepository) {
        students
            .insert(&student("111", "a@example.com", base_time()))
            .await
            .expect("first insert");
        let err = students
            .insert(&student("222", "a@example.com", base_time()))
            .await
            .expect_err("duplicate email");
        assert_eq!(err, StudentPersistenceError::DuplicateEmail);
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_students_free_their_document(students: InMemoryStudentRepository) {
        let first = student("111", "a@example.com", base_time());
        students.insert(&first).await.expect("insert");
        students
            .soft_delete(&first.id, base_time())
            .await
            .expect("delete")
            .expect("row existed");

        students
            .insert(&student("111", "a@example.com", base_time()))
            .await
            .expect("document reusable after delete");
        assert!(
            students
                .find_active_by_id(&first.id)
                .await
                .expect("lookup")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn second_delete_finds_nothing(students: InMemoryStudentRepository) {
        let first = student("111", "a@example.com", base_time());
        students.insert(&first).await.expect("insert");
        let deleted = students
            .soft_delete(&first.id, base_time())
            .await
            .expect("delete")
            .expect("row existed");
        assert!(deleted.deleted);
        assert_eq!(deleted.deleted_at, Some(base_time()));
        assert!(
            students
                .soft_delete(&first.id, base_time())
                .await
                .expect("delete")
                .is_none()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_newest_first_and_pages(students: InMemoryStudentRepository) {
        let older = student("1", "1@example.com", base_time());
        let newer = student("2", "2@example.com", base_time() + Duration::minutes(5));
        let tied = student("3", "3@example.com", base_time());
        for row in [&older, &newer, &tied] {
            students.insert(row).await.expect("insert");
        }

        let all = students.list_active(0, 10).await.expect("list");
        let ids: Vec<StudentId> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![newer.id, tied.id, older.id]);

        let second_page = students.list_active(2, 2).await.expect("list");
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page.first().map(|s| s.id), Some(older.id));
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_changes(students: InMemoryStudentRepository) {
        let first = student("111", "a@example.com", base_time());
        students.insert(&first).await.expect("insert");
        let changes = StudentChanges {
            name: Some("Bia".into()),
            age: None,
        };
        let updated = students
            .update(&first.id, &changes)
            .await
            .expect("update")
            .expect("row existed");
        assert_eq!(updated.name, "Bia");
        assert_eq!(updated.age, 20);
    }

    #[rstest]
    #[tokio::test]
    async fn one_active_address_per_owner() {
        let addresses = InMemoryAddressRepository::new();
        let owner = StudentId::random();
        addresses.insert(&address(owner)).await.expect("insert");
        let err = addresses
            .insert(&address(owner))
            .await
            .expect_err("second address");
        assert_eq!(err, AddressPersistenceError::Duplicate);

        addresses
            .soft_delete(&owner, base_time())
            .await
            .expect("delete")
            .expect("row existed");
        addresses
            .insert(&address(owner))
            .await
            .expect("insert after delete");
    }

    #[rstest]
    #[tokio::test]
    async fn address_update_keeps_untouched_fields() {
        let addresses = InMemoryAddressRepository::new();
        let owner = StudentId::random();
        addresses.insert(&address(owner)).await.expect("insert");
        let changes = AddressChanges {
            uf: Some("SC".into()),
            ..AddressChanges::default()
        };
        let updated = addresses
            .update(&owner, &changes)
            .await
            .expect("update")
            .expect("row existed");
        assert_eq!(updated.uf, "SC");
        assert_eq!(updated.city, "Porto Alegre");
    }
}
