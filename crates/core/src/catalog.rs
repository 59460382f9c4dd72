//! Platforms, boost types, and which boosts each platform offers.
//!
//! This is static configuration data. The wizard must never trust the UI to
//! only offer valid combinations - [`Platform::allows`] is the logic-side
//! guard.

use serde::{Deserialize, Serialize};

/// A social-media platform boosts can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Tiktok,
    Youtube,
    Instagram,
    Facebook,
}

/// A purchasable engagement increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostType {
    Followers,
    Likes,
    Views,
    Comments,
    Favorites,
    Subscribers,
}

impl Platform {
    /// All platforms, in display order.
    pub const ALL: [Self; 4] = [Self::Tiktok, Self::Youtube, Self::Instagram, Self::Facebook];

    /// Stable lowercase identifier (used in storage and the CSV export).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Tiktok => "TikTok",
            Self::Youtube => "YouTube",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
        }
    }

    /// The boost types this platform offers.
    #[must_use]
    pub const fn allowed_boosts(self) -> &'static [BoostType] {
        match self {
            Self::Tiktok => &[
                BoostType::Likes,
                BoostType::Followers,
                BoostType::Views,
                BoostType::Favorites,
                BoostType::Comments,
            ],
            Self::Youtube => &[BoostType::Likes, BoostType::Views, BoostType::Subscribers],
            Self::Instagram | Self::Facebook => {
                &[BoostType::Likes, BoostType::Followers, BoostType::Views]
            }
        }
    }

    /// Whether `boost` is a member of this platform's allowed set.
    #[must_use]
    pub fn allows(self, boost: BoostType) -> bool {
        self.allowed_boosts().contains(&boost)
    }
}

impl BoostType {
    /// Human-facing label (also the stored and exported value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Followers => "Followers",
            Self::Likes => "Likes",
            Self::Views => "Views",
            Self::Comments => "Comments",
            Self::Favorites => "Favorites",
            Self::Subscribers => "Subscribers",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::fmt::Display for BoostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiktok" => Ok(Self::Tiktok),
            "youtube" => Ok(Self::Youtube),
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            _ => Err(format!("unknown platform: {s}")),
        }
    }
}

impl std::str::FromStr for BoostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Followers" => Ok(Self::Followers),
            "Likes" => Ok(Self::Likes),
            "Views" => Ok(Self::Views),
            "Comments" => Ok(Self::Comments),
            "Favorites" => Ok(Self::Favorites),
            "Subscribers" => Ok(Self::Subscribers),
            _ => Err(format!("unknown boost type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_boost_membership() {
        assert!(Platform::Tiktok.allows(BoostType::Favorites));
        assert!(Platform::Youtube.allows(BoostType::Subscribers));
        assert!(!Platform::Youtube.allows(BoostType::Followers));
        assert!(!Platform::Instagram.allows(BoostType::Comments));
        assert!(!Platform::Facebook.allows(BoostType::Subscribers));
    }

    #[test]
    fn test_serde_uses_lowercase_platform_ids() {
        let json = serde_json::to_string(&Platform::Tiktok).expect("serialize");
        assert_eq!(json, "\"tiktok\"");
        let json = serde_json::to_string(&BoostType::Likes).expect("serialize");
        assert_eq!(json, "\"Likes\"");
    }

    #[test]
    fn test_from_str_matches_display() {
        for p in Platform::ALL {
            let back: Platform = p.to_string().parse().expect("roundtrip");
            assert_eq!(back, p);
        }
    }
}
