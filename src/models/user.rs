//! User and mute models.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A chat user.
///
/// Fields the service defines beyond the fixed schema are kept in
/// [`extra`](User::extra) and written back at the top level of the object.
///
/// # Example
///
/// ```
/// use stream_chat::models::User;
///
/// let mut user = User::new("jane");
/// user.name = Some("Jane Doe".to_string());
/// user.extra.insert("vip".to_string(), serde_json::Value::Bool(true));
///
/// let json = serde_json::to_value(&user).unwrap();
/// assert_eq!(json["vip"], true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Role (e.g. "user", "admin")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Whether the user is currently connected
    #[serde(default)]
    pub online: bool,
    /// Whether the user hides their presence
    #[serde(default)]
    pub invisible: bool,
    /// Users this user has muted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutes: Vec<Mute>,
    /// When the user was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the user was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// When the user was last active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
    /// Custom fields outside the fixed schema.
    ///
    /// Entries named like a fixed field are dropped from update requests.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Create a user with only an ID set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// A mute relationship between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mute {
    /// The user who muted
    pub user: User,
    /// The user who is muted
    pub target: User,
    /// When the mute was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the mute was last updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user as sent in an update request. Server-managed timestamps are left out.
#[derive(Debug, Serialize)]
pub(crate) struct UserRequest<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    online: bool,
    invisible: bool,
    #[serde(skip_serializing_if = "<[Mute]>::is_empty")]
    mutes: &'a [Mute],
    #[serde(flatten)]
    extra: CustomFields<'a>,
}

/// Fields of [`User`] the custom map may not override.
const FIXED_FIELDS: [&str; 10] = [
    "id",
    "name",
    "image",
    "role",
    "online",
    "invisible",
    "mutes",
    "created_at",
    "updated_at",
    "last_active",
];

/// Custom user fields with the fixed field names filtered out.
#[derive(Debug)]
struct CustomFields<'a>(&'a Map<String, Value>);

impl Serialize for CustomFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.0 {
            if !FIXED_FIELDS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'a> From<&'a User> for UserRequest<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: &user.id,
            name: user.name.as_deref(),
            image: user.image.as_deref(),
            role: user.role.as_deref(),
            online: user.online,
            invisible: user.invisible,
            mutes: &user.mutes,
            extra: CustomFields(&user.extra),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_extra_fields_round_trip() {
        let wire = json!({
            "id": "jane",
            "name": "Jane",
            "role": "user",
            "online": true,
            "invisible": false,
            "created_at": "2019-04-24T08:48:38.440123Z",
            "vip": true
        });

        let user: User = serde_json::from_value(wire).unwrap();
        assert_eq!(user.id, "jane");
        assert_eq!(user.name.as_deref(), Some("Jane"));
        assert!(user.online);
        assert!(user.created_at.is_some());
        assert_eq!(user.extra.len(), 1);
        assert_eq!(user.extra["vip"], json!(true));

        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(encoded["vip"], json!(true));
        assert_eq!(encoded["id"], "jane");

        let decoded: User = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_user_defaults_for_missing_fields() {
        let user: User = serde_json::from_value(json!({"id": "bob"})).unwrap();
        assert_eq!(user, User::new("bob"));
        assert!(user.mutes.is_empty());
        assert!(user.extra.is_empty());
    }

    #[test]
    fn test_mute_decodes_nested_users() {
        let mute: Mute = serde_json::from_value(json!({
            "user": {"id": "a"},
            "target": {"id": "b", "color": "blue"},
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(mute.user.id, "a");
        assert_eq!(mute.target.extra["color"], "blue");
    }

    #[test]
    fn test_user_request_drops_read_only_fields() {
        let mut user: User = serde_json::from_value(json!({
            "id": "jane",
            "name": "Jane",
            "created_at": "2019-04-24T08:48:38Z",
            "updated_at": "2019-04-24T08:48:38Z",
            "last_active": "2019-04-24T08:48:38Z"
        }))
        .unwrap();
        user.extra.insert("team".into(), json!("blue"));

        let encoded = serde_json::to_value(UserRequest::from(&user)).unwrap();
        assert_eq!(
            encoded,
            json!({
                "id": "jane",
                "name": "Jane",
                "online": false,
                "invisible": false,
                "team": "blue"
            })
        );
    }

    #[test]
    fn test_user_request_ignores_custom_fixed_keys() {
        let mut user = User::new("jane");
        user.extra.insert("id".into(), json!("mallory"));
        user.extra.insert("online".into(), json!("yes"));
        user.extra.insert("created_at".into(), json!("2000-01-01T00:00:00Z"));
        user.extra.insert("team".into(), json!("blue"));

        let encoded = serde_json::to_value(UserRequest::from(&user)).unwrap();
        assert_eq!(
            encoded,
            json!({
                "id": "jane",
                "online": false,
                "invisible": false,
                "team": "blue"
            })
        );
    }
}
