//! Notification entity models, the typed payload union, and producer DTOs.
//!
//! The `data` column is JSONB holding a [`NotificationPayload`] -- a
//! discriminated union tagged by the notification kind, so each consumer
//! gets a typed, exhaustively-checkable shape instead of an open map.

use maru_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Notification category, stored as the PostgreSQL `notification_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Purchase,
    Sale,
    Review,
    System,
    Promotion,
    Follower,
    Comment,
    Wishlist,
    ProductUpdate,
}

/// Structured notification payload, tagged by notification kind.
///
/// Each variant carries only the fields its consumer needs; the deep-link
/// target is derived via [`NotificationPayload::link`]. Prices are in KRW
/// (whole won, no subunit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationPayload {
    Purchase {
        product_id: DbId,
        price: i64,
    },
    Sale {
        product_id: DbId,
        buyer_name: String,
        price: i64,
    },
    Review {
        product_id: DbId,
        reviewer_name: String,
        rating: i16,
    },
    System {
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Promotion {
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Follower {
        follower_id: DbId,
        follower_name: String,
    },
    Comment {
        comment_id: DbId,
        link: String,
    },
    Wishlist {
        product_id: DbId,
        original_price: i64,
        sale_price: i64,
    },
    ProductUpdate {
        product_id: DbId,
    },
}

impl NotificationPayload {
    /// The notification kind this payload belongs to.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Purchase { .. } => NotificationKind::Purchase,
            Self::Sale { .. } => NotificationKind::Sale,
            Self::Review { .. } => NotificationKind::Review,
            Self::System { .. } => NotificationKind::System,
            Self::Promotion { .. } => NotificationKind::Promotion,
            Self::Follower { .. } => NotificationKind::Follower,
            Self::Comment { .. } => NotificationKind::Comment,
            Self::Wishlist { .. } => NotificationKind::Wishlist,
            Self::ProductUpdate { .. } => NotificationKind::ProductUpdate,
        }
    }

    /// Deep-link path the client navigates to when the notification is opened.
    pub fn link(&self) -> Option<String> {
        match self {
            Self::Purchase { product_id, .. } | Self::ProductUpdate { product_id } => {
                Some(format!("/products/{product_id}"))
            }
            Self::Sale { product_id, .. } => {
                Some(format!("/dashboard/sales?product={product_id}"))
            }
            Self::Review { product_id, .. } => Some(format!("/products/{product_id}#reviews")),
            Self::Wishlist { product_id, .. } => Some(format!("/products/{product_id}")),
            Self::Follower { follower_id, .. } => Some(format!("/users/{follower_id}")),
            Self::Comment { link, .. } => Some(link.clone()),
            Self::System { link } | Self::Promotion { link } => link.clone(),
        }
    }
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<Json<NotificationPayload>>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification (internal producer API).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<NotificationPayload>,
}

impl CreateNotification {
    /// Validate title/message and that the payload tag matches `kind`.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Notification title cannot be empty.".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Notification message cannot be empty.".to_string());
        }
        if let Some(payload) = &self.data {
            if payload.kind() != self.kind {
                return Err(format!(
                    "Payload type {:?} does not match notification kind {:?}.",
                    payload.kind(),
                    self.kind
                ));
            }
        }
        Ok(())
    }

    /// Sale notification for the seller.
    pub fn sale(
        seller_id: DbId,
        product_id: DbId,
        product_title: &str,
        buyer_name: &str,
        price: i64,
    ) -> Self {
        Self {
            user_id: seller_id,
            kind: NotificationKind::Sale,
            title: "New sale!".to_string(),
            message: format!("{buyer_name} purchased \"{product_title}\" for ₩{price}."),
            data: Some(NotificationPayload::Sale {
                product_id,
                buyer_name: buyer_name.to_string(),
                price,
            }),
        }
    }

    /// Purchase confirmation for the buyer.
    pub fn purchase(buyer_id: DbId, product_id: DbId, product_title: &str, price: i64) -> Self {
        Self {
            user_id: buyer_id,
            kind: NotificationKind::Purchase,
            title: "Purchase complete".to_string(),
            message: format!(
                "Your purchase of \"{product_title}\" is complete. The files are ready to download."
            ),
            data: Some(NotificationPayload::Purchase { product_id, price }),
        }
    }

    /// New-review notification for the seller.
    pub fn review(
        seller_id: DbId,
        product_id: DbId,
        product_title: &str,
        reviewer_name: &str,
        rating: i16,
    ) -> Self {
        Self {
            user_id: seller_id,
            kind: NotificationKind::Review,
            title: "New review".to_string(),
            message: format!("{reviewer_name} left a {rating}-star review on \"{product_title}\"."),
            data: Some(NotificationPayload::Review {
                product_id,
                reviewer_name: reviewer_name.to_string(),
                rating,
            }),
        }
    }

    /// New-follower notification.
    pub fn follower(user_id: DbId, follower_id: DbId, follower_name: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Follower,
            title: "New follower".to_string(),
            message: format!("{follower_name} started following you."),
            data: Some(NotificationPayload::Follower {
                follower_id,
                follower_name: follower_name.to_string(),
            }),
        }
    }

    /// Wishlist-item discount notification.
    pub fn wishlist_discount(
        user_id: DbId,
        product_id: DbId,
        product_title: &str,
        original_price: i64,
        sale_price: i64,
    ) -> Self {
        Self {
            user_id,
            kind: NotificationKind::Wishlist,
            title: "Wishlist item on sale".to_string(),
            message: format!(
                "\"{product_title}\" on your wishlist dropped from ₩{original_price} to ₩{sale_price}."
            ),
            data: Some(NotificationPayload::Wishlist {
                product_id,
                original_price,
                sale_price,
            }),
        }
    }

    /// Product-update notification for buyers of a product.
    pub fn product_update(user_id: DbId, product_id: DbId, product_title: &str) -> Self {
        Self {
            user_id,
            kind: NotificationKind::ProductUpdate,
            title: "Product updated".to_string(),
            message: format!("\"{product_title}\" you purchased has a new version available."),
            data: Some(NotificationPayload::ProductUpdate { product_id }),
        }
    }

    /// Free-form system notification.
    pub fn system(user_id: DbId, title: &str, message: &str, link: Option<String>) -> Self {
        Self {
            user_id,
            kind: NotificationKind::System,
            title: title.to_string(),
            message: message.to_string(),
            data: Some(NotificationPayload::System { link }),
        }
    }
}
