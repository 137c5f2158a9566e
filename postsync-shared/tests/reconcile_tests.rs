/// Integration tests for the import reconciler
///
/// Cover the annotate/import cycle for users, bulk post import with and
/// without store faults, and error propagation from the remote source.

mod common;

use common::{leanne_source, memory_store, remote_posts, FaultyStore};
use postsync_shared::error::SyncError;
use postsync_shared::reconcile::Reconciler;
use postsync_shared::remote::mock::user;
use postsync_shared::remote::{MockRemoteSource, RemoteSource};
use postsync_shared::store::Store;
use std::sync::Arc;

#[tokio::test]
async fn test_import_cycle_for_single_user() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(0)));

    let before = reconciler.annotate_users().await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].user.id, 1);
    assert!(!before[0].already_imported);

    reconciler.import_user("Leanne", "a@b.com").await.unwrap();

    let after = reconciler.annotate_users().await.unwrap();
    assert_eq!(after.len(), 1);
    assert!(after[0].already_imported);

    let second = reconciler.import_user("Leanne", "a@b.com").await;
    assert!(matches!(second, Err(SyncError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_annotate_users_keeps_remote_order() {
    let store = memory_store().await;
    let remote = MockRemoteSource::sample()
        .with_user(user(3, "Clementine Bauch", "Nathan@yesenia.net", "McKenziehaven", "Romaguera-Jacobson"));
    let reconciler = Reconciler::new(store.clone(), Arc::new(remote));

    reconciler
        .import_user("Ervin Howell", "Shanna@melissa.tv")
        .await
        .unwrap();

    let annotated = reconciler.annotate_users().await.unwrap();
    let flags: Vec<(i64, bool)> = annotated
        .iter()
        .map(|a| (a.user.id, a.already_imported))
        .collect();

    assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
}

#[tokio::test]
async fn test_annotation_uses_email_not_name() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(0)));

    // Same name, different email
    reconciler.import_user("Leanne", "other@b.com").await.unwrap();

    let annotated = reconciler.annotate_users().await.unwrap();
    assert!(!annotated[0].already_imported);
}

#[tokio::test]
async fn test_annotation_reflects_store_at_call_time() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(0)));

    assert!(!reconciler.annotate_users().await.unwrap()[0].already_imported);

    // Written behind the reconciler's back
    store.insert_user("Leanne", "a@b.com").await.unwrap();

    assert!(reconciler.annotate_users().await.unwrap()[0].already_imported);
}

#[tokio::test]
async fn test_annotate_posts_before_and_after_bulk_import() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(4)));

    let before = reconciler.annotate_posts_for_user(1).await.unwrap();
    assert_eq!(before.user.name, "Leanne");
    assert_eq!(before.posts.len(), 4);
    assert!(!before.already_bulk_imported);

    reconciler.bulk_import_posts(1).await.unwrap();

    let after = reconciler.annotate_posts_for_user(1).await.unwrap();
    assert!(after.already_bulk_imported);
    assert_eq!(after.posts, before.posts);
}

#[tokio::test]
async fn test_annotate_posts_unknown_user_is_not_found() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(2)));

    let result = reconciler.annotate_posts_for_user(99).await;
    assert!(matches!(result, Err(SyncError::NotFound(_))));
}

#[tokio::test]
async fn test_bulk_import_stores_exactly_the_remote_posts() {
    let store = memory_store().await;
    let remote = Arc::new(leanne_source(10));
    let reconciler = Reconciler::new(store.clone(), remote.clone());

    let report = reconciler.bulk_import_posts(1).await.unwrap();
    assert_eq!(report.user_id, 1);
    assert_eq!(report.inserted, 10);

    let expected: Vec<(String, String)> = remote
        .list_posts_for_user(1)
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.title, p.body))
        .collect();
    let stored: Vec<(String, String)> = store
        .list_posts_for_user(1)
        .await
        .unwrap()
        .into_iter()
        .map(|p| (p.title, p.body))
        .collect();

    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_bulk_import_without_remote_posts() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(0)));

    let report = reconciler.bulk_import_posts(1).await.unwrap();
    assert_eq!(report.inserted, 0);

    // Nothing written, so the import is still offered
    assert!(!store.posts_exist_for_user(1).await.unwrap());
}

#[tokio::test]
async fn test_bulk_import_does_not_require_local_user() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(3)));

    reconciler.bulk_import_posts(1).await.unwrap();

    assert!(!store.user_exists("a@b.com").await.unwrap());
    assert_eq!(store.list_posts_for_user(1).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_bulk_import_partial_failure_keeps_written_rows() {
    let inner = memory_store().await;
    let faulty = Arc::new(FaultyStore::new(inner.clone(), 4));
    let reconciler = Reconciler::new(faulty, Arc::new(leanne_source(10)));

    let result = reconciler.bulk_import_posts(1).await;
    assert!(matches!(result, Err(SyncError::Store(_))));

    let stored = inner.list_posts_for_user(1).await.unwrap();
    assert_eq!(stored.len(), 4);

    let expected_titles: Vec<String> = remote_posts(1, 4).into_iter().map(|p| p.title).collect();
    let stored_titles: Vec<String> = stored.into_iter().map(|p| p.title).collect();
    assert_eq!(stored_titles, expected_titles);

    // The partial import now reads as complete
    assert!(inner.posts_exist_for_user(1).await.unwrap());
    let annotated = reconciler.annotate_posts_for_user(1).await.unwrap();
    assert!(annotated.already_bulk_imported);
}

#[tokio::test]
async fn test_bulk_import_failing_on_first_insert_writes_nothing() {
    let inner = memory_store().await;
    let faulty = Arc::new(FaultyStore::new(inner.clone(), 0));
    let reconciler = Reconciler::new(faulty, Arc::new(leanne_source(5)));

    assert!(reconciler.bulk_import_posts(1).await.is_err());
    assert!(!inner.posts_exist_for_user(1).await.unwrap());
}

#[tokio::test]
async fn test_repeated_bulk_import_duplicates_rows() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(3)));

    reconciler.bulk_import_posts(1).await.unwrap();
    reconciler.bulk_import_posts(1).await.unwrap();

    assert_eq!(store.list_posts_for_user(1).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_remote_failure_aborts_without_writes() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(MockRemoteSource::unreachable()));

    assert!(matches!(
        reconciler.annotate_users().await,
        Err(SyncError::Remote(_))
    ));
    assert!(matches!(
        reconciler.bulk_import_posts(1).await,
        Err(SyncError::Remote(_))
    ));
    assert!(!store.posts_exist_for_user(1).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_imports_of_same_email() {
    let store = memory_store().await;
    let reconciler = Reconciler::new(store.clone(), Arc::new(leanne_source(0)));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let reconciler = reconciler.clone();
        handles.push(tokio::spawn(async move {
            reconciler.import_user("Leanne", "a@b.com").await
        }));
    }

    let mut succeeded = 0;
    let mut violations = 0;
    for handle in handles {
        match handle.await.expect("Task panicked") {
            Ok(_) => succeeded += 1,
            Err(SyncError::ConstraintViolation(_)) => violations += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(violations, 7);
}
