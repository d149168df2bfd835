#![forbid(unsafe_code)]

//! Domain record shapes for the blog domain.
//!
//! Declarative shapes only: a categorization tag ([`Theme`]), an author
//! ([`Profile`]), an article ([`Post`]), and the currently signed-in viewer
//! ([`User`]). The `profiles`/`themes` fields on [`Post`] are denormalized
//! join embeds — present only when the data-loading layer populated them; a
//! `Post` is valid either way. Field names mirror the joined table names
//! and are part of the wire shape.
//!
//! `created_at` is carried as text exactly as the backend emits it; nothing
//! in this layer parses or orders timestamps.

use serde::{Deserialize, Serialize};

/// A categorization tag for posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
}

/// An author. The id is an opaque text identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
}

/// An article, optionally carrying its joined author and theme records.
///
/// `theme_id` references a [`Theme`] that logically exists elsewhere;
/// many posts share one theme, and the reference is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub theme_id: i64,
    /// Denormalized author embed, populated by the data-loading layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Profile>,
    /// Denormalized theme embed, populated by the data-loading layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Theme>,
}

impl Post {
    /// A bare post row with no join embeds.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: impl Into<String>,
        theme_id: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: created_at.into(),
            theme_id,
            profiles: None,
            themes: None,
        }
    }

    /// Attach the joined author record.
    #[must_use]
    pub fn with_author(mut self, profile: Profile) -> Self {
        self.profiles = Some(profile);
        self
    }

    /// Attach the joined theme record.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.themes = Some(theme);
        self
    }

    /// The joined author record, if the loader populated it.
    #[must_use]
    pub fn author(&self) -> Option<&Profile> {
        self.profiles.as_ref()
    }

    /// The joined theme record, if the loader populated it.
    #[must_use]
    pub fn theme(&self) -> Option<&Theme> {
        self.themes.as_ref()
    }
}

/// The currently authenticated viewer. Absence of a signed-in viewer is
/// modeled as `Option<User>` at the cell that holds it, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_post_row_parses_without_embeds() {
        let json = r#"{
            "id": 1,
            "title": "Hello",
            "content": "First post.",
            "created_at": "2024-05-01T12:00:00Z",
            "theme_id": 3
        }"#;
        let post: Post = serde_json::from_str(json).expect("bare row parses");
        assert_eq!(post.id, 1);
        assert_eq!(post.theme_id, 3);
        assert!(post.author().is_none());
        assert!(post.theme().is_none());
    }

    #[test]
    fn joined_post_row_parses_with_embeds() {
        let json = r#"{
            "id": 2,
            "title": "Joined",
            "content": "Row with embeds.",
            "created_at": "2024-05-02T09:30:00Z",
            "theme_id": 3,
            "profiles": { "id": "u-42", "email": "a@example.com" },
            "themes": { "id": 3, "name": "rust" }
        }"#;
        let post: Post = serde_json::from_str(json).expect("joined row parses");
        assert_eq!(post.author().map(|p| p.email.as_str()), Some("a@example.com"));
        assert_eq!(post.theme().map(|t| t.name.as_str()), Some("rust"));
        assert_eq!(post.theme().map(|t| t.id), Some(post.theme_id));
    }

    #[test]
    fn absent_embeds_are_omitted_from_serialization() {
        let post = Post::new(7, "t", "c", "2024-05-03T00:00:00Z", 1);
        let json = serde_json::to_string(&post).expect("serializes");
        assert!(!json.contains("profiles"));
        assert!(!json.contains("themes"));
    }

    #[test]
    fn builder_attaches_embeds() {
        let post = Post::new(8, "t", "c", "2024-05-04T00:00:00Z", 2)
            .with_author(Profile {
                id: "u-1".to_string(),
                email: "b@example.com".to_string(),
            })
            .with_theme(Theme {
                id: 2,
                name: "news".to_string(),
            });
        assert_eq!(post.author().map(|p| p.id.as_str()), Some("u-1"));
        assert_eq!(post.theme().map(|t| t.name.as_str()), Some("news"));
    }

    #[test]
    fn user_round_trips() {
        let user = User::new("viewer@example.com");
        let json = serde_json::to_string(&user).expect("serializes");
        let back: User = serde_json::from_str(&json).expect("parses");
        assert_eq!(user, back);
    }
}
