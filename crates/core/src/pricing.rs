//! The static price table.
//!
//! Prices are configuration data, not computation: a lookup of
//! `(platform, boost type, quantity label)` yields a unit price. An absent
//! combination yields [`Price::ZERO`], which callers must treat as "not yet
//! fully configured" - the wizard keeps advancing, the review step is where
//! the amount surfaces.
//!
//! Quantity labels are string keys (`"1k"`, `"500"`), not numeric
//! quantities, and the option list offered at the quantity step is exactly
//! the key set of this table.

use crate::catalog::{BoostType, Platform};
use crate::types::Price;

/// Price rows for one `(platform, boost type)` pair: `(label, amount)`.
type Rows = &'static [(&'static str, i64)];

/// The full table. An empty slice means the platform does not offer that
/// boost type.
const fn rows(platform: Platform, boost: BoostType) -> Rows {
    use BoostType as B;
    use Platform as P;

    match (platform, boost) {
        (P::Tiktok, B::Likes) => &[
            ("1k", 150),
            ("2k", 280),
            ("3k", 430),
            ("4k", 580),
            ("5k", 730),
            ("10k", 1480),
            ("50k", 7480),
            ("100k", 14980),
        ],
        (P::Tiktok, B::Followers) => &[
            ("100", 90),
            ("500", 450),
            ("1k", 900),
            ("2k", 1700),
            ("3k", 2600),
            ("4k", 3500),
            ("5k", 4400),
            ("10k", 8900),
        ],
        (P::Tiktok, B::Views) => &[
            ("1k", 80),
            ("2k", 160),
            ("3k", 240),
            ("4k", 320),
            ("5k", 400),
            ("10k", 700),
            ("50k", 3900),
            ("100k", 7900),
        ],
        (P::Tiktok, B::Favorites) => &[
            ("100", 170),
            ("200", 340),
            ("300", 510),
            ("400", 680),
            ("500", 850),
        ],
        (P::Tiktok, B::Comments) => &[
            ("10", 30),
            ("20", 60),
            ("30", 90),
            ("40", 120),
            ("50", 150),
            ("100", 300),
        ],
        (P::Facebook, B::Likes) => &[
            ("1k", 850),
            ("2k", 1700),
            ("3k", 2550),
            ("4k", 3400),
            ("5k", 4250),
        ],
        (P::Facebook, B::Followers) => &[
            ("1k", 600),
            ("2k", 1200),
            ("3k", 1800),
            ("4k", 2400),
            ("5k", 3000),
        ],
        (P::Facebook, B::Views) => &[
            ("10k", 200),
            ("20k", 350),
            ("30k", 450),
            ("40k", 550),
            ("50k", 600),
        ],
        (P::Youtube, B::Likes) => &[
            ("1k", 250),
            ("2k", 430),
            ("3k", 600),
            ("4k", 800),
            ("5k", 1000),
        ],
        (P::Youtube, B::Views) => &[
            ("1k", 600),
            ("2k", 1200),
            ("3k", 1600),
            ("4k", 2200),
            ("5k", 2800),
        ],
        (P::Youtube, B::Subscribers) => &[
            ("1k", 800),
            ("2k", 1500),
            ("3k", 2100),
            ("4k", 2700),
            ("5k", 3400),
            ("10k", 6650),
        ],
        (P::Instagram, B::Likes) => &[
            ("1k", 70),
            ("2k", 140),
            ("3k", 210),
            ("4k", 280),
            ("5k", 350),
        ],
        (P::Instagram, B::Followers) => &[
            ("1k", 750),
            ("2k", 1400),
            ("3k", 2100),
            ("4k", 2800),
            ("5k", 3500),
        ],
        (P::Instagram, B::Views) => &[
            ("10k", 130),
            ("20k", 260),
            ("30k", 390),
            ("40k", 520),
            ("50k", 650),
        ],
        _ => &[],
    }
}

/// Look up the unit price for a configuration.
///
/// Returns [`Price::ZERO`] when the combination is absent from the table.
#[must_use]
pub fn price(platform: Platform, boost: BoostType, quantity_label: &str) -> Price {
    rows(platform, boost)
        .iter()
        .find(|(label, _)| *label == quantity_label)
        .map_or(Price::ZERO, |&(_, amount)| Price::from_major(amount))
}

/// The quantity labels offered for a `(platform, boost type)` pair, in
/// display order. Empty when the platform does not offer that boost type.
#[must_use]
pub fn quantity_options(platform: Platform, boost: BoostType) -> Vec<&'static str> {
    rows(platform, boost).iter().map(|&(label, _)| label).collect()
}

/// Whether `quantity_label` is one of the offered options for the pair.
#[must_use]
pub fn is_offered(platform: Platform, boost: BoostType, quantity_label: &str) -> bool {
    rows(platform, boost)
        .iter()
        .any(|(label, _)| *label == quantity_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_configured_values() {
        assert_eq!(
            price(Platform::Tiktok, BoostType::Likes, "1k"),
            Price::from_major(150)
        );
        assert_eq!(
            price(Platform::Youtube, BoostType::Views, "2k"),
            Price::from_major(1200)
        );
        assert_eq!(
            price(Platform::Tiktok, BoostType::Likes, "100k"),
            Price::from_major(14980)
        );
        assert_eq!(
            price(Platform::Instagram, BoostType::Likes, "1k"),
            Price::from_major(70)
        );
        assert_eq!(
            price(Platform::Facebook, BoostType::Views, "50k"),
            Price::from_major(600)
        );
        assert_eq!(
            price(Platform::Youtube, BoostType::Subscribers, "10k"),
            Price::from_major(6650)
        );
        assert_eq!(
            price(Platform::Tiktok, BoostType::Comments, "10"),
            Price::from_major(30)
        );
    }

    #[test]
    fn test_absent_combinations_are_zero() {
        // Label not offered for the pair.
        assert!(price(Platform::Facebook, BoostType::Likes, "10k").is_zero());
        // Boost type not offered by the platform at all.
        assert!(price(Platform::Youtube, BoostType::Followers, "1k").is_zero());
        // Unknown label.
        assert!(price(Platform::Tiktok, BoostType::Likes, "7k").is_zero());
    }

    #[test]
    fn test_every_priced_row_is_nonzero() {
        for platform in Platform::ALL {
            for &boost in platform.allowed_boosts() {
                let options = quantity_options(platform, boost);
                assert!(
                    !options.is_empty(),
                    "{platform}/{boost} offered but unpriced"
                );
                for label in options {
                    assert!(!price(platform, boost, label).is_zero());
                }
            }
        }
    }

    #[test]
    fn test_is_offered_matches_options() {
        assert!(is_offered(Platform::Tiktok, BoostType::Favorites, "300"));
        assert!(!is_offered(Platform::Tiktok, BoostType::Favorites, "1k"));
    }
}
