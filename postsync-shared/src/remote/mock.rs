/// In-memory remote source for tests and offline runs
///
/// Serves fixed users and posts with the same semantics as the HTTP client:
/// an unknown user id is `NotFound`, posts are filtered by user id in the
/// order they were added, and a source built with [`MockRemoteSource::unreachable`]
/// fails every call with `Remote`.
///
/// # Example
///
/// ```no_run
/// use postsync_shared::remote::{MockRemoteSource, RemoteSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MockRemoteSource::sample();
/// let user = source.get_user(1).await?;
/// let posts = source.list_posts_for_user(user.id).await?;
/// assert_eq!(posts.len(), 3);
/// # Ok(())
/// # }
/// ```

use super::{RemoteAddress, RemoteCompany, RemotePost, RemoteSource, RemoteUser};
use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;

/// Fixture-backed [`RemoteSource`]
#[derive(Debug, Clone, Default)]
pub struct MockRemoteSource {
    users: Vec<RemoteUser>,
    posts: Vec<RemotePost>,
    unreachable: bool,
}

impl MockRemoteSource {
    /// Source serving exactly these records
    pub fn new(users: Vec<RemoteUser>, posts: Vec<RemotePost>) -> Self {
        Self {
            users,
            posts,
            unreachable: false,
        }
    }

    /// Source whose every call fails as if the network were down
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    /// Two users modelled on the public catalog, three posts for the first
    /// and none for the second
    pub fn sample() -> Self {
        let users = vec![
            user(1, "Leanne Graham", "Sincere@april.biz", "Gwenborough", "Romaguera-Crona"),
            user(2, "Ervin Howell", "Shanna@melissa.tv", "Wisokyburgh", "Deckow-Crist"),
        ];
        let posts = vec![
            post(
                1,
                1,
                "sunt aut facere repellat provident",
                "quia et suscipit\nsuscipit recusandae consequuntur",
            ),
            post(1, 2, "qui est esse", "est rerum tempore vitae\nsequi sint nihil"),
            post(
                1,
                3,
                "ea molestias quasi exercitationem",
                "et iusto sed quo iure\nvoluptatem occaecati",
            ),
        ];

        Self::new(users, posts)
    }

    /// Adds a user
    pub fn with_user(mut self, user: RemoteUser) -> Self {
        self.users.push(user);
        self
    }

    /// Adds a post
    pub fn with_post(mut self, post: RemotePost) -> Self {
        self.posts.push(post);
        self
    }

    fn check_reachable(&self) -> SyncResult<()> {
        if self.unreachable {
            return Err(SyncError::Remote("mock remote source is unreachable".to_string()));
        }
        Ok(())
    }
}

/// Builds a remote user with the given identity and placeholder contact data
pub fn user(id: i64, name: &str, email: &str, city: &str, company: &str) -> RemoteUser {
    RemoteUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("1-770-736-80{:02}", id),
        website: format!("user{}.example.org", id),
        address: RemoteAddress {
            city: city.to_string(),
        },
        company: RemoteCompany {
            name: company.to_string(),
        },
    }
}

/// Builds a remote post
pub fn post(user_id: i64, id: i64, title: &str, body: &str) -> RemotePost {
    RemotePost {
        user_id,
        id: Some(id),
        title: title.to_string(),
        body: body.to_string(),
    }
}

#[async_trait]
impl RemoteSource for MockRemoteSource {
    async fn list_users(&self) -> SyncResult<Vec<RemoteUser>> {
        self.check_reachable()?;
        Ok(self.users.clone())
    }

    async fn get_user(&self, id: i64) -> SyncResult<RemoteUser> {
        self.check_reachable()?;
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(format!("remote user {}", id)))
    }

    async fn list_posts_for_user(&self, id: i64) -> SyncResult<Vec<RemotePost>> {
        self.check_reachable()?;
        Ok(self
            .posts
            .iter()
            .filter(|p| p.user_id == id)
            .cloned()
            .collect())
    }
}
