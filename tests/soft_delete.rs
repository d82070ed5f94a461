// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Soft-delete repository integration tests against the in-memory
//! backend.

mod support;

use soft_delete_repo::prelude::*;
use support::{Enrollment, MemoryBackend, User};

fn user_repo(rows: Vec<User>) -> SoftDeleteRepository<User, MemoryBackend<User>> {
    SoftDeleteRepository::new(MemoryBackend::with_rows(rows))
}

fn enrollment_repo(
    rows: Vec<Enrollment>
) -> SoftDeleteRepository<Enrollment, MemoryBackend<Enrollment>> {
    SoftDeleteRepository::new(MemoryBackend::with_rows(rows))
}

#[tokio::test]
async fn deleted_entity_is_invisible_but_physically_present() {
    let alice = User::new(1, "alice");
    let repo = user_repo(vec![alice.clone()]);

    repo.delete(&alice).await.unwrap();

    assert!(repo.find_by_id(&1).await.unwrap().is_none());

    let retained = repo.find_by_id_with_deleted(&1).await.unwrap().unwrap();
    assert_eq!(retained.id, 1);
    assert!(retained.removed_at.is_some());
}

#[tokio::test]
async fn delete_sets_timestamp_exactly_on_target_row() {
    let alice = User::new(1, "alice");
    let bob = User::new(2, "bob");
    let repo = user_repo(vec![alice.clone(), bob]);

    repo.delete(&alice).await.unwrap();

    let rows = repo.backend().snapshot();
    assert!(rows.iter().find(|u| u.id == 1).unwrap().removed_at.is_some());
    assert!(rows.iter().find(|u| u.id == 2).unwrap().removed_at.is_none());
}

#[tokio::test]
async fn delete_does_not_affect_other_rows_visibility() {
    let alice = User::new(1, "alice");
    let repo = user_repo(vec![alice.clone(), User::new(2, "bob"), User::new(3, "carol")]);

    repo.delete(&alice).await.unwrap();

    let visible = repo.find_all().await.unwrap();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|u| u.id != 1));
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn empty_batch_delete_executes_no_statement() {
    let repo = user_repo(vec![User::new(1, "alice")]);
    let before = repo.backend().statements();

    repo.delete_in_batch(&[]).await.unwrap();

    assert_eq!(repo.backend().statements(), before);
    assert!(repo.backend().snapshot()[0].removed_at.is_none());
}

#[tokio::test]
async fn batch_delete_marks_exactly_the_given_entities() {
    let alice = User::new(1, "alice");
    let bob = User::new(2, "bob");
    let repo = user_repo(vec![alice.clone(), bob.clone(), User::new(3, "carol")]);
    let before = repo.backend().statements();

    repo.delete_in_batch(&[alice, bob]).await.unwrap();

    // one batched statement for the whole collection
    assert_eq!(repo.backend().statements(), before + 1);
    assert_eq!(repo.count().await.unwrap(), 1);

    let rows = repo.backend().snapshot();
    assert!(rows.iter().find(|u| u.id == 1).unwrap().removed_at.is_some());
    assert!(rows.iter().find(|u| u.id == 2).unwrap().removed_at.is_some());
    assert!(rows.iter().find(|u| u.id == 3).unwrap().removed_at.is_none());
}

#[tokio::test]
async fn delete_all_marks_every_row() {
    let repo = user_repo(vec![User::new(1, "alice"), User::new(2, "bob"), User::new(3, "carol")]);

    repo.delete_all_in_batch().await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(repo.count_with_deleted().await.unwrap(), 3);
    assert!(repo.backend().snapshot().iter().all(|u| u.removed_at.is_some()));
}

#[tokio::test]
async fn composite_identifier_addresses_one_row() {
    let target = Enrollment::new(1, 10);
    let same_student = Enrollment::new(1, 20);
    let same_course = Enrollment::new(2, 10);
    let repo = enrollment_repo(vec![target.clone(), same_student, same_course]);

    repo.delete(&target).await.unwrap();

    // rows sharing one key component stay active
    assert_eq!(repo.count().await.unwrap(), 2);
    assert!(repo.find_by_id(&(1, 10)).await.unwrap().is_none());
    assert!(repo.find_by_id(&(1, 20)).await.unwrap().is_some());
    assert!(repo.find_by_id(&(2, 10)).await.unwrap().is_some());
}

#[tokio::test]
async fn composite_batch_delete_marks_exact_pairs() {
    let first = Enrollment::new(1, 10);
    let second = Enrollment::new(2, 20);
    let repo = enrollment_repo(vec![first.clone(), second.clone(), Enrollment::new(1, 20)]);

    repo.delete_in_batch(&[first, second]).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(repo.find_by_id(&(1, 20)).await.unwrap().is_some());
}

#[tokio::test]
async fn caller_filters_compose_with_active_filter() {
    let alice = User::new(1, "alice");
    let repo = user_repo(vec![alice.clone(), User::new(2, "alice"), User::new(3, "bob")]);

    repo.delete(&alice).await.unwrap();

    let alices = repo.find_where(Predicate::eq("name", "alice")).await.unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].id, 2);

    assert_eq!(repo.count_where(Predicate::eq("name", "alice")).await.unwrap(), 1);
}

#[tokio::test]
async fn paged_reads_skip_deleted_rows() {
    let alice = User::new(1, "alice");
    let repo = user_repo(vec![
        alice.clone(),
        User::new(2, "bob"),
        User::new(3, "carol"),
        User::new(4, "dave"),
    ]);

    repo.delete(&alice).await.unwrap();

    let page = repo.find_page(Pagination::new(2, 0), None).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|u| u.removed_at.is_none()));
}

#[tokio::test]
async fn scenario_two_users_one_deleted() {
    let user_1 = User::new(1, "first");
    let repo = user_repo(vec![user_1.clone(), User::new(2, "second")]);

    repo.delete(&user_1).await.unwrap();

    let rows = repo.backend().snapshot();
    assert!(rows.iter().find(|u| u.id == 1).unwrap().removed_at.is_some());
    assert_eq!(
        rows.iter().find(|u| u.id == 2).unwrap(),
        &User::new(2, "second")
    );

    assert!(repo.find_by_id(&1).await.unwrap().is_none());
    assert!(repo.find_by_id(&2).await.unwrap().is_some());
    assert_eq!(repo.count().await.unwrap(), 1);
}
