//! Marketplace user accounts

use serde::{Deserialize, Serialize};

use super::Id;
use crate::impl_domain_status_conversions;

/// Account role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    JobSeeker,
    ShopOwner,
}

impl_domain_status_conversions!(UserRole {
    JobSeeker => "JOB_SEEKER",
    ShopOwner => "SHOP_OWNER",
});

/// Profile returned by `users/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub profile_photo: Option<String>,
}
