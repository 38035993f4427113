/**
 * Entity Types
 *
 * Back-office records listed by the dashboard: users, customers,
 * products and notifications.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Manager,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
            UserRole::Manager => write!(f, "manager"),
        }
    }
}

/// Lifecycle status shared by users and customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Inactive => write!(f, "inactive"),
            AccountStatus::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Record for User {
    const ENTITY: &'static str = "user";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["name", "email", "username"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "username" => Some(self.username.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "role" => Some(self.role.to_string().into()),
            "status" => Some(self.status.to_string().into()),
            "createdAt" => Some(self.created_at.to_rfc3339().into()),
            "updatedAt" => Some(self.updated_at.to_rfc3339().into()),
            "lastLoginAt" => self.last_login_at.map(|t| t.to_rfc3339().into()),
            _ => None,
        }
    }
}

/// Partial user used for create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
}

impl UserDraft {
    /// Build a new user, filling missing fields with defaults.
    pub fn into_user(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Apply only the fields that are set.
    pub fn apply_to(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(v) = self.username {
            user.username = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.name {
            user.name = v;
        }
        if let Some(v) = self.role {
            user.role = v;
        }
        if let Some(v) = self.status {
            user.status = v;
        }
        user.updated_at = now;
    }
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: AccountStatus,
    pub location: String,
    pub registration_date: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record for Customer {
    const ENTITY: &'static str = "customer";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["name", "email", "company", "phone"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "phone" => Some(self.phone.as_str().into()),
            "company" => Some(self.company.as_str().into()),
            "status" => Some(self.status.to_string().into()),
            "location" => Some(self.location.as_str().into()),
            "registrationDate" => Some(self.registration_date.to_rfc3339().into()),
            "lastContact" => Some(self.last_contact.to_rfc3339().into()),
            "notes" => self.notes.as_deref().map(FieldValue::from),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<AccountStatus>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CustomerDraft {
    pub fn into_customer(self, id: String, now: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            registration_date: now,
            last_contact: now,
            notes: self.notes,
            tags: self.tags.unwrap_or_default(),
        }
    }

    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(v) = self.name {
            customer.name = v;
        }
        if let Some(v) = self.email {
            customer.email = v;
        }
        if let Some(v) = self.phone {
            customer.phone = v;
        }
        if let Some(v) = self.company {
            customer.company = v;
        }
        if let Some(v) = self.status {
            customer.status = v;
        }
        if let Some(v) = self.location {
            customer.location = v;
        }
        if let Some(v) = self.notes {
            customer.notes = Some(v);
        }
        if let Some(v) = self.tags {
            customer.tags = v;
        }
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Discontinued,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Inactive => write!(f, "inactive"),
            ProductStatus::Discontinued => write!(f, "discontinued"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub status: ProductStatus,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Product {
    const ENTITY: &'static str = "product";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["name", "description", "category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "price" => Some(self.price.into()),
            "category" => Some(self.category.as_str().into()),
            "status" => Some(self.status.to_string().into()),
            "stock" => Some(self.stock.into()),
            "createdAt" => Some(self.created_at.to_rfc3339().into()),
            "updatedAt" => Some(self.updated_at.to_rfc3339().into()),
            _ => None,
        }
    }
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for Notification {
    const ENTITY: &'static str = "notification";
    // Notifications are paged but never searched
    const SEARCHABLE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "message" => Some(self.message.as_str().into()),
            "type" => Some(self.kind.to_string().into()),
            "read" => Some(if self.read { "true" } else { "false" }.into()),
            "createdAt" => Some(self.created_at.to_rfc3339().into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        UserDraft {
            username: Some("jdoe".to_string()),
            email: Some("jdoe@example.com".to_string()),
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        }
        .into_user("user_1".to_string(), now)
    }

    #[test]
    fn test_user_draft_defaults() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.status, AccountStatus::Active);
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_user_draft_apply_keeps_unset_fields() {
        let mut user = sample_user();
        let later = user.updated_at + chrono::Duration::seconds(5);
        UserDraft {
            role: Some(UserRole::Admin),
            ..Default::default()
        }
        .apply_to(&mut user, later);

        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.username, "jdoe");
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn test_user_fields() {
        let user = sample_user();
        assert_eq!(user.field("email"), Some(FieldValue::from("jdoe@example.com")));
        assert_eq!(user.field("role"), Some(FieldValue::from("user")));
        assert_eq!(user.field("nope"), None);
        assert_eq!(user.field("lastLoginAt"), None);
    }

    #[test]
    fn test_notification_type_wire_name() {
        let n = Notification {
            id: "n1".to_string(),
            title: "t".to_string(),
            message: "m".to_string(),
            kind: NotificationKind::Warning,
            read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["read"], false);
    }
}
