//! Promotional banner records

use chrono::{DateTime, Utc};
use guardpost_core::{
    AdminError, AdminResult, CollectionKey, RecordId, Status, Validatable, flexible_datetime,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::record::{Record, impl_record_accessors};

/// Where on the public site a banner is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPlacement {
    #[default]
    Home,
    Services,
    About,
    Contact,
}

impl BannerPlacement {
    pub fn all() -> &'static [BannerPlacement] {
        &[
            BannerPlacement::Home,
            BannerPlacement::Services,
            BannerPlacement::About,
            BannerPlacement::Contact,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BannerPlacement::Home => "home",
            BannerPlacement::Services => "services",
            BannerPlacement::About => "about",
            BannerPlacement::Contact => "contact",
        }
    }
}

impl fmt::Display for BannerPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BannerPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        BannerPlacement::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| "Placement must be one of home, services, about, contact".to_string())
    }
}

/// A hero/promo banner with an image and optional call-to-action link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: RecordId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Image file reference (name or path of the uploaded file)
    #[serde(default)]
    pub image: String,

    /// Call-to-action target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default)]
    pub placement: BannerPlacement,

    /// Lower numbers are shown first
    #[serde(default)]
    pub display_order: u32,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: Status,

    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: DateTime<Utc>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "flexible_datetime::option::deserialize"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Banner {
    /// Create a new active home-page banner
    pub fn new(title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: RecordId::generate(),
            title: title.into(),
            subtitle: None,
            image: image.into(),
            link: None,
            placement: BannerPlacement::Home,
            display_order: 0,
            start_date: None,
            end_date: None,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Whether the banner should be shown at `now`
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status.is_active()
            && self.start_date.is_none_or(|s| s <= now)
            && self.end_date.is_none_or(|e| now <= e)
    }
}

impl_record_accessors!(Banner, title);

impl Validatable for Banner {
    fn validate(&self) -> AdminResult<()> {
        if self.title.trim().is_empty() {
            return Err(AdminError::field_validation("banner", "title", "Title is required"));
        }
        if self.image.trim().is_empty() {
            return Err(AdminError::field_validation("banner", "image", "Image is required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(AdminError::field_validation(
                    "banner",
                    "end_date",
                    "End date must be on or after the start date",
                ));
            }
        }
        Ok(())
    }
}

impl Record for Banner {
    const KEY: CollectionKey = CollectionKey::Banners;
    const FILTER_FIELDS: &'static [&'static str] = &["status", "placement"];

    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "status" => Some(self.status.to_string()),
            "placement" => Some(self.placement.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_banner_validation() {
        let banner = Banner::new("Winter Promo", "winter.jpg");
        assert!(banner.is_valid());

        let banner = Banner::new("Winter Promo", "");
        assert!(!banner.is_valid());

        let mut banner = Banner::new("Winter Promo", "winter.jpg");
        banner.start_date = Some(Utc::now());
        banner.end_date = Some(Utc::now() - Duration::days(1));
        assert!(!banner.is_valid());
    }

    #[test]
    fn test_banner_is_live() {
        let now = Utc::now();
        let mut banner = Banner::new("Promo", "p.png");
        assert!(banner.is_live(now));

        banner.start_date = Some(now + Duration::days(1));
        assert!(!banner.is_live(now));

        banner.start_date = Some(now - Duration::days(2));
        banner.end_date = Some(now - Duration::days(1));
        assert!(!banner.is_live(now));

        banner.end_date = None;
        banner.status = Status::Inactive;
        assert!(!banner.is_live(now));
    }

    #[test]
    fn test_placement_parse() {
        assert_eq!("Services".parse::<BannerPlacement>().unwrap(), BannerPlacement::Services);
        assert!("footer".parse::<BannerPlacement>().is_err());
    }

    #[test]
    fn test_banner_filter_values() {
        let mut banner = Banner::new("Promo", "p.png");
        banner.placement = BannerPlacement::About;
        assert_eq!(banner.filter_value("placement").as_deref(), Some("about"));
        assert_eq!(banner.filter_value("status").as_deref(), Some("active"));
        assert_eq!(banner.filter_value("image"), None);
    }
}
