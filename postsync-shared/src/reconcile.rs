/// Import reconciler
///
/// Decides, for remote users and posts, whether they already exist locally
/// and performs the one-time imports.
///
/// # Idempotency
///
/// - Users: the store's unique email constraint is the guard. Importing an
///   email twice fails the second time with `ConstraintViolation`, which a
///   caller should read as "already imported".
/// - Posts: the only guard is `posts_exist_for_user`. A bulk import writes
///   the posts one by one without a transaction. If the store fails on the
///   k-th insert the earlier rows stay, the rest are skipped, the call fails,
///   and the existence flag reads true from then on, hiding the gap.
///   Two concurrent bulk imports for one user id both write their rows.
///
/// Every annotation is recomputed from the store on each call.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::reconcile::Reconciler;
/// use postsync_shared::remote::MockRemoteSource;
/// use postsync_shared::store::SqliteStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(SqliteStore::in_memory().await?);
/// let reconciler = Reconciler::new(store, Arc::new(MockRemoteSource::sample()));
///
/// for entry in reconciler.annotate_users().await? {
///     if !entry.already_imported {
///         reconciler.import_user(&entry.user.name, &entry.user.email).await?;
///     }
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::SyncResult;
use crate::models::user::User;
use crate::remote::{RemotePost, RemoteSource, RemoteUser};
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Remote user paired with its local import state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedUser {
    /// Remote record
    #[serde(flatten)]
    pub user: RemoteUser,

    /// Whether a local user with the same email exists
    pub already_imported: bool,
}

/// Remote posts of one user paired with the bulk-import state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosts {
    /// Remote author
    pub user: RemoteUser,

    /// Whether any post for this user id is stored locally
    pub already_bulk_imported: bool,

    /// Remote posts, catalog order
    pub posts: Vec<RemotePost>,
}

/// Outcome of a completed bulk import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportReport {
    /// Remote user id the posts were imported for
    pub user_id: i64,

    /// Number of rows written
    pub inserted: usize,
}

/// Reconciles the remote catalog against the local store
#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn Store>,
    remote: Arc<dyn RemoteSource>,
}

impl Reconciler {
    /// Creates a reconciler over a store and a remote source
    pub fn new(store: Arc<dyn Store>, remote: Arc<dyn RemoteSource>) -> Self {
        Self { store, remote }
    }

    /// Store handle shared with other components
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Lists remote users, each marked with whether its email is stored
    ///
    /// Order follows the remote list.
    #[instrument(skip(self))]
    pub async fn annotate_users(&self) -> SyncResult<Vec<AnnotatedUser>> {
        let users = self.remote.list_users().await?;

        let mut annotated = Vec::with_capacity(users.len());
        for user in users {
            let already_imported = self.store.user_exists(&user.email).await?;
            annotated.push(AnnotatedUser {
                user,
                already_imported,
            });
        }

        debug!(count = annotated.len(), "Annotated remote users");
        Ok(annotated)
    }

    /// Imports a user by name and email
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the email is already stored.
    #[instrument(skip(self))]
    pub async fn import_user(&self, name: &str, email: &str) -> SyncResult<User> {
        match self.store.insert_user(name, email).await {
            Ok(user) => {
                info!(user_id = user.id, "Imported user");
                Ok(user)
            }
            Err(e) => {
                if e.is_constraint_violation() {
                    info!("User already imported");
                } else {
                    warn!(error = %e, "User import failed");
                }
                Err(e)
            }
        }
    }

    /// Fetches a remote user and their posts, with the bulk-import flag
    ///
    /// The flag does not prevent a further bulk import or export.
    #[instrument(skip(self))]
    pub async fn annotate_posts_for_user(&self, user_id: i64) -> SyncResult<UserPosts> {
        let user = self.remote.get_user(user_id).await?;
        let posts = self.remote.list_posts_for_user(user_id).await?;
        let already_bulk_imported = self.store.posts_exist_for_user(user_id).await?;

        debug!(
            posts = posts.len(),
            already_bulk_imported, "Annotated remote posts"
        );

        Ok(UserPosts {
            user,
            already_bulk_imported,
            posts,
        })
    }

    /// Fetches the user's current remote posts and stores each in turn
    ///
    /// Not atomic: a failure leaves the rows written so far in place.
    #[instrument(skip(self))]
    pub async fn bulk_import_posts(&self, user_id: i64) -> SyncResult<BulkImportReport> {
        let posts = self.remote.list_posts_for_user(user_id).await?;
        let total = posts.len();

        let mut inserted = 0;
        for post in &posts {
            if let Err(e) = self
                .store
                .insert_post(user_id, &post.title, &post.body)
                .await
            {
                warn!(
                    inserted,
                    total,
                    error = %e,
                    "Bulk import aborted, rows already written are kept"
                );
                return Err(e);
            }
            inserted += 1;
        }

        info!(inserted, "Bulk imported posts");
        Ok(BulkImportReport { user_id, inserted })
    }
}
