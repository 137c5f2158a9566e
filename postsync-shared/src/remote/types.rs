/// Records returned by the remote catalog
///
/// Every listed field is required. A response that lacks one fails to
/// decode and surfaces as `SyncError::Parse` instead of carrying an empty
/// value forward. Fields the catalog sends beyond these are ignored.

use serde::{Deserialize, Serialize};

/// A user as published by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    /// Remote-assigned id
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, used as the import identity
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Website
    pub website: String,

    /// Postal address (only the city is kept)
    pub address: RemoteAddress,

    /// Employer (only the name is kept)
    pub company: RemoteCompany,
}

/// Address part of a remote user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAddress {
    /// City
    pub city: String,
}

/// Company part of a remote user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCompany {
    /// Company name
    pub name: String,
}

/// A post as published by the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    /// Remote user id the post belongs to
    pub user_id: i64,

    /// Remote post id, when the catalog sends one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Post title
    pub title: String,

    /// Post body
    pub body: String,
}

impl RemoteUser {
    /// City from the nested address
    pub fn city(&self) -> &str {
        &self.address.city
    }

    /// Company name from the nested company record
    pub fn company_name(&self) -> &str {
        &self.company.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_user() {
        let value = json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        });

        let user: RemoteUser = serde_json::from_value(value).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "Sincere@april.biz");
        assert_eq!(user.city(), "Gwenborough");
        assert_eq!(user.company_name(), "Romaguera-Crona");
    }

    #[test]
    fn test_missing_required_field_fails() {
        // No company
        let value = json!({
            "id": 1,
            "name": "Leanne Graham",
            "email": "Sincere@april.biz",
            "address": { "city": "Gwenborough" },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org"
        });

        let result: Result<RemoteUser, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_object_is_not_a_user() {
        let result: Result<RemoteUser, _> = serde_json::from_value(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_post() {
        let value = json!({
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere",
            "body": "quia et suscipit"
        });

        let post: RemotePost = serde_json::from_value(value).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.id, Some(1));
        assert_eq!(post.title, "sunt aut facere");
    }

    #[test]
    fn test_post_without_body_fails() {
        let value = json!({ "userId": 1, "title": "sunt aut facere" });
        let result: Result<RemotePost, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
