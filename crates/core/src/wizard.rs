//! The five-step order-configuration state machine.
//!
//! `SelectPlatform -> SelectBoostType -> SelectQuantity -> EnterDetails ->
//! Review`, linear and forward-only, with a single `back` transition per
//! step (backing out of step 1 exits the wizard).
//!
//! Guards are enforced here, not in any UI: a boost type must belong to the
//! chosen platform's allowed set and a quantity label must come from that
//! pair's option list, even if a client never offers anything else.
//!
//! The price is a derived accessor over the price table - recomputed from
//! the current selection on every read, never accumulated - so a stale
//! price cannot exist.

use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::catalog::{BoostType, Platform};
use crate::pricing;
use crate::types::{CartItemId, PhoneError, Price, WhatsappNumber};

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    SelectPlatform,
    SelectBoostType,
    SelectQuantity,
    EnterDetails,
    Review,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectPlatform => "select_platform",
            Self::SelectBoostType => "select_boost_type",
            Self::SelectQuantity => "select_quantity",
            Self::EnterDetails => "enter_details",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Errors produced by wizard transitions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WizardError {
    /// The operation is not valid at the current step.
    #[error("not available at step {current}, requires {required}")]
    WrongStep {
        /// Step the operation belongs to.
        required: WizardStep,
        /// Step the wizard is actually at.
        current: WizardStep,
    },
    /// The boost type is not in the chosen platform's allowed set.
    #[error("{platform} does not offer {boost}")]
    BoostNotOffered {
        /// Chosen platform.
        platform: Platform,
        /// Rejected boost type.
        boost: BoostType,
    },
    /// The quantity label is not in the pair's option list.
    #[error("quantity {label:?} is not offered for this configuration")]
    QuantityNotOffered {
        /// Rejected label.
        label: String,
    },
    /// The target link is empty.
    #[error("a target link is required")]
    MissingLink,
    /// The contact number failed validation.
    #[error("invalid contact number: {0}")]
    InvalidContact(#[from] PhoneError),
}

/// The wizard's mutable state.
///
/// One instance exists per device while a configuration is in progress; it
/// is never persisted beyond that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardState {
    step: WizardStep,
    platform: Option<Platform>,
    boost_type: Option<BoostType>,
    quantity_label: Option<String>,
    link: String,
    whatsapp: String,
    note: String,
}

impl WizardState {
    /// A fresh, empty configuration at step 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh configuration with the contact number prefilled (logged-in
    /// customers get their account phone as the default).
    #[must_use]
    pub fn with_contact(contact: &WhatsappNumber) -> Self {
        Self {
            whatsapp: contact.as_str().to_owned(),
            ..Self::default()
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Chosen platform, if any.
    #[must_use]
    pub const fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Chosen boost type, if any.
    #[must_use]
    pub const fn boost_type(&self) -> Option<BoostType> {
        self.boost_type
    }

    /// Chosen quantity label, if any.
    #[must_use]
    pub fn quantity_label(&self) -> Option<&str> {
        self.quantity_label.as_deref()
    }

    /// Target link entered at the details step.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Contact number - possibly the logged-in customer's prefill, until
    /// the details step overwrites it.
    #[must_use]
    pub fn whatsapp(&self) -> &str {
        &self.whatsapp
    }

    /// Free-text note entered at the details step.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// The unit price for the current selection, freshly derived from the
    /// price table. Zero until platform, boost type, and quantity are all
    /// chosen.
    #[must_use]
    pub fn price(&self) -> Price {
        match (self.platform, self.boost_type, &self.quantity_label) {
            (Some(platform), Some(boost), Some(label)) => pricing::price(platform, boost, label),
            _ => Price::ZERO,
        }
    }

    fn require_step(&self, required: WizardStep) -> Result<(), WizardError> {
        if self.step == required {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                required,
                current: self.step,
            })
        }
    }

    /// Step 1: choose a platform. Resets any boost type and quantity from a
    /// previous pass and advances to boost-type selection.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside step 1.
    pub fn select_platform(&mut self, platform: Platform) -> Result<(), WizardError> {
        self.require_step(WizardStep::SelectPlatform)?;
        self.platform = Some(platform);
        self.boost_type = None;
        self.quantity_label = None;
        self.step = WizardStep::SelectBoostType;
        Ok(())
    }

    /// Step 2: choose a boost type from the platform's allowed set. Resets
    /// any quantity and advances to quantity selection.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside step 2 and
    /// [`WizardError::BoostNotOffered`] for a boost the platform lacks.
    pub fn select_boost_type(&mut self, boost: BoostType) -> Result<(), WizardError> {
        self.require_step(WizardStep::SelectBoostType)?;
        let platform = self.platform.ok_or(WizardError::WrongStep {
            required: WizardStep::SelectPlatform,
            current: self.step,
        })?;
        if !platform.allows(boost) {
            return Err(WizardError::BoostNotOffered { platform, boost });
        }
        self.boost_type = Some(boost);
        self.quantity_label = None;
        self.step = WizardStep::SelectQuantity;
        Ok(())
    }

    /// Step 3: choose a quantity label from the pair's option list and
    /// advance to the details form.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside step 3 and
    /// [`WizardError::QuantityNotOffered`] for a label not in the list.
    pub fn select_quantity(&mut self, label: &str) -> Result<(), WizardError> {
        self.require_step(WizardStep::SelectQuantity)?;
        let (Some(platform), Some(boost)) = (self.platform, self.boost_type) else {
            return Err(WizardError::WrongStep {
                required: WizardStep::SelectPlatform,
                current: self.step,
            });
        };
        if !pricing::is_offered(platform, boost, label) {
            return Err(WizardError::QuantityNotOffered {
                label: label.to_owned(),
            });
        }
        self.quantity_label = Some(label.to_owned());
        self.step = WizardStep::EnterDetails;
        Ok(())
    }

    /// Step 4: submit the target link and contact details. This is an
    /// explicit submit, not an automatic advance; it validates the link is
    /// non-empty and the contact is a well-formed 11-digit number, then
    /// moves to review.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside step 4,
    /// [`WizardError::MissingLink`] for an empty link, and
    /// [`WizardError::InvalidContact`] for a malformed number.
    pub fn submit_details(
        &mut self,
        link: &str,
        whatsapp: &str,
        note: &str,
    ) -> Result<(), WizardError> {
        self.require_step(WizardStep::EnterDetails)?;
        let link = link.trim();
        if link.is_empty() {
            return Err(WizardError::MissingLink);
        }
        WhatsappNumber::parse(whatsapp)?;
        self.link = link.to_owned();
        self.whatsapp = whatsapp.to_owned();
        self.note = note.to_owned();
        self.step = WizardStep::Review;
        Ok(())
    }

    /// The single backwards transition. Returns `false` when already at
    /// step 1, which means "exit the wizard" - the state itself is
    /// unchanged in that case.
    pub fn back(&mut self) -> bool {
        self.step = match self.step {
            WizardStep::SelectPlatform => return false,
            WizardStep::SelectBoostType => WizardStep::SelectPlatform,
            WizardStep::SelectQuantity => WizardStep::SelectBoostType,
            WizardStep::EnterDetails => WizardStep::SelectQuantity,
            WizardStep::Review => WizardStep::EnterDetails,
        };
        true
    }

    /// Step 5: produce the cart line item for the reviewed configuration.
    ///
    /// The unit price is resolved from the price table at this instant and
    /// frozen into the item. The caller resets the wizard to a fresh state
    /// after a successful add.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::WrongStep`] outside the review step; the field
    /// guards re-run here rather than trusting the earlier transitions.
    pub fn add_to_cart(&self) -> Result<CartItem, WizardError> {
        self.require_step(WizardStep::Review)?;
        let (Some(platform), Some(boost), Some(label)) =
            (self.platform, self.boost_type, self.quantity_label.as_deref())
        else {
            return Err(WizardError::WrongStep {
                required: WizardStep::SelectPlatform,
                current: self.step,
            });
        };
        if self.link.is_empty() {
            return Err(WizardError::MissingLink);
        }
        let whatsapp = WhatsappNumber::parse(&self.whatsapp)?;

        Ok(CartItem {
            id: CartItemId::new(),
            platform,
            boost_type: boost,
            quantity_label: label.to_owned(),
            link: self.link.clone(),
            whatsapp,
            note: (!self.note.is_empty()).then(|| self.note.clone()),
            price: pricing::price(platform, boost, label),
            count: 1,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn configured() -> WizardState {
        let mut w = WizardState::new();
        w.select_platform(Platform::Tiktok).unwrap();
        w.select_boost_type(BoostType::Likes).unwrap();
        w.select_quantity("1k").unwrap();
        w.submit_details("https://tiktok.com/@me/video/1", "94712345678", "")
            .unwrap();
        w
    }

    #[test]
    fn test_happy_path_reaches_review() {
        let w = configured();
        assert_eq!(w.step(), WizardStep::Review);
        assert_eq!(w.price(), Price::from_major(150));
    }

    #[test]
    fn test_operations_are_step_gated() {
        let mut w = WizardState::new();
        assert!(matches!(
            w.select_boost_type(BoostType::Likes),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(matches!(
            w.select_quantity("1k"),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(matches!(
            w.add_to_cart(),
            Err(WizardError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_boost_must_belong_to_platform() {
        let mut w = WizardState::new();
        w.select_platform(Platform::Youtube).unwrap();
        assert!(matches!(
            w.select_boost_type(BoostType::Followers),
            Err(WizardError::BoostNotOffered { .. })
        ));
        // Rejection leaves the wizard at the same step.
        assert_eq!(w.step(), WizardStep::SelectBoostType);
    }

    #[test]
    fn test_quantity_must_be_offered_for_pair() {
        let mut w = WizardState::new();
        w.select_platform(Platform::Facebook).unwrap();
        w.select_boost_type(BoostType::Likes).unwrap();
        // "10k" exists for other pairs but not facebook/Likes.
        assert!(matches!(
            w.select_quantity("10k"),
            Err(WizardError::QuantityNotOffered { .. })
        ));
        assert!(w.select_quantity("5k").is_ok());
    }

    #[test]
    fn test_details_guards() {
        let mut w = WizardState::new();
        w.select_platform(Platform::Tiktok).unwrap();
        w.select_boost_type(BoostType::Views).unwrap();
        w.select_quantity("10k").unwrap();

        assert!(matches!(
            w.submit_details("", "94712345678", ""),
            Err(WizardError::MissingLink)
        ));
        assert!(matches!(
            w.submit_details("https://x", "9471234567", ""),
            Err(WizardError::InvalidContact(_))
        ));
        assert_eq!(w.step(), WizardStep::EnterDetails);
        assert!(w.submit_details("https://x", "94712345678", "").is_ok());
    }

    #[test]
    fn test_reselecting_platform_resets_downstream() {
        let mut w = configured();
        // Walk all the way back to step 1.
        while w.step() != WizardStep::SelectPlatform {
            assert!(w.back());
        }
        // Backing out of step 1 exits instead.
        assert!(!w.back());

        w.select_platform(Platform::Instagram).unwrap();
        assert_eq!(w.boost_type(), None);
        assert_eq!(w.quantity_label(), None);
        assert!(w.price().is_zero());
    }

    #[test]
    fn test_price_is_always_derived() {
        let mut w = WizardState::new();
        assert!(w.price().is_zero());
        w.select_platform(Platform::Youtube).unwrap();
        assert!(w.price().is_zero());
        w.select_boost_type(BoostType::Views).unwrap();
        assert!(w.price().is_zero());
        w.select_quantity("2k").unwrap();
        assert_eq!(w.price(), Price::from_major(1200));
    }

    #[test]
    fn test_add_to_cart_freezes_price_and_resets_nothing() {
        let w = configured();
        let item = w.add_to_cart().unwrap();
        assert_eq!(item.price, Price::from_major(150));
        assert_eq!(item.count, 1);
        assert_eq!(item.quantity_label, "1k");
        assert_eq!(item.note, None);
        // The state machine itself is untouched; the caller resets it.
        assert_eq!(w.step(), WizardStep::Review);
    }

    #[test]
    fn test_note_survives_into_the_item() {
        let mut w = configured();
        assert!(w.back());
        w.submit_details("https://x", "94712345678", "ramp up slowly")
            .unwrap();
        let item = w.add_to_cart().unwrap();
        assert_eq!(item.note.as_deref(), Some("ramp up slowly"));
    }
}
