//! Wizard routes.
//!
//! The state machine itself lives in core; these handlers apply one
//! transition per request against the device's wizard and return the full
//! state view, including the option lists the next step may offer.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::catalog::{BoostType, Platform};
use boostline_core::pricing;
use boostline_core::types::Price;
use boostline_core::user::UserRole;
use boostline_core::wizard::{WizardState, WizardStep};

use crate::error::Result;
use crate::middleware::session::{Device, OptionalAuth};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Wizard route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wizard", get(current).post(start))
        .route("/wizard/platform", post(select_platform))
        .route("/wizard/boost-type", post(select_boost_type))
        .route("/wizard/quantity", post(select_quantity))
        .route("/wizard/details", post(submit_details))
        .route("/wizard/back", post(back))
        .route("/wizard/add-to-cart", post(add_to_cart))
}

/// Client-facing view of the wizard.
#[derive(Debug, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub platform: Option<Platform>,
    pub boost_type: Option<BoostType>,
    pub quantity_label: Option<String>,
    pub link: String,
    /// Contact number - prefilled from the logged-in customer's account
    /// until the details step overwrites it.
    pub whatsapp: String,
    pub note: String,
    /// Unit price for the current selection; zero until fully configured.
    pub price: Price,
    /// Platforms offered at step 1.
    pub platforms: &'static [Platform],
    /// Boost types offered once a platform is chosen.
    pub boost_options: Vec<BoostType>,
    /// Quantity labels offered once a boost type is chosen.
    pub quantity_options: Vec<&'static str>,
}

impl WizardView {
    fn of(wizard: &WizardState) -> Self {
        let boost_options = wizard
            .platform()
            .map(|p| p.allowed_boosts().to_vec())
            .unwrap_or_default();
        let quantity_options = match (wizard.platform(), wizard.boost_type()) {
            (Some(platform), Some(boost)) => pricing::quantity_options(platform, boost),
            _ => Vec::new(),
        };
        Self {
            step: wizard.step(),
            platform: wizard.platform(),
            boost_type: wizard.boost_type(),
            quantity_label: wizard.quantity_label().map(str::to_owned),
            link: wizard.link().to_owned(),
            whatsapp: wizard.whatsapp().to_owned(),
            note: wizard.note().to_owned(),
            price: wizard.price(),
            platforms: &Platform::ALL,
            boost_options,
            quantity_options,
        }
    }
}

/// A fresh wizard for this device. Logged-in customers get their account
/// phone prefilled as the contact default.
fn fresh_wizard(user: &OptionalAuth) -> WizardState {
    match &user.0 {
        Some(user) if user.role == UserRole::Customer => WizardState::with_contact(&user.phone),
        _ => WizardState::new(),
    }
}

/// Start (or restart) the wizard with an empty configuration.
#[instrument(skip(state, user))]
async fn start(
    State(state): State<AppState>,
    Device(device): Device,
    user: OptionalAuth,
) -> Json<WizardView> {
    let fresh = fresh_wizard(&user);
    let view = WizardView::of(&fresh);
    state.reset_wizard(device, fresh);
    Json(view)
}

/// The device's current wizard state.
async fn current(State(state): State<AppState>, Device(device): Device) -> Json<WizardView> {
    Json(state.with_wizard(device, |w| WizardView::of(w)))
}

#[derive(Debug, Deserialize)]
pub struct PlatformInput {
    pub platform: Platform,
}

#[derive(Debug, Deserialize)]
pub struct BoostTypeInput {
    pub boost_type: BoostType,
}

#[derive(Debug, Deserialize)]
pub struct QuantityInput {
    pub quantity_label: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailsInput {
    pub link: String,
    pub whatsapp: String,
    #[serde(default)]
    pub note: String,
}

#[instrument(skip(state))]
async fn select_platform(
    State(state): State<AppState>,
    Device(device): Device,
    Json(input): Json<PlatformInput>,
) -> Result<Json<WizardView>> {
    state.with_wizard(device, |w| w.select_platform(input.platform))?;
    Ok(Json(state.with_wizard(device, |w| WizardView::of(w))))
}

#[instrument(skip(state))]
async fn select_boost_type(
    State(state): State<AppState>,
    Device(device): Device,
    Json(input): Json<BoostTypeInput>,
) -> Result<Json<WizardView>> {
    state.with_wizard(device, |w| w.select_boost_type(input.boost_type))?;
    Ok(Json(state.with_wizard(device, |w| WizardView::of(w))))
}

#[instrument(skip(state))]
async fn select_quantity(
    State(state): State<AppState>,
    Device(device): Device,
    Json(input): Json<QuantityInput>,
) -> Result<Json<WizardView>> {
    state.with_wizard(device, |w| w.select_quantity(&input.quantity_label))?;
    Ok(Json(state.with_wizard(device, |w| WizardView::of(w))))
}

#[instrument(skip(state, input))]
async fn submit_details(
    State(state): State<AppState>,
    Device(device): Device,
    Json(input): Json<DetailsInput>,
) -> Result<Json<WizardView>> {
    state.with_wizard(device, |w| {
        w.submit_details(&input.link, &input.whatsapp, &input.note)
    })?;
    Ok(Json(state.with_wizard(device, |w| WizardView::of(w))))
}

#[derive(Debug, Serialize)]
pub struct BackResponse {
    /// True when the wizard backed out of step 1 entirely.
    pub exited: bool,
    #[serde(flatten)]
    pub view: WizardView,
}

#[instrument(skip(state))]
async fn back(State(state): State<AppState>, Device(device): Device) -> Json<BackResponse> {
    let moved = state.with_wizard(device, WizardState::back);
    let view = state.with_wizard(device, |w| WizardView::of(w));
    Json(BackResponse {
        exited: !moved,
        view,
    })
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub cart: CartView,
    #[serde(flatten)]
    pub wizard: WizardView,
}

/// Add the reviewed configuration to the cart and reset the wizard.
#[instrument(skip(state, user))]
async fn add_to_cart(
    State(state): State<AppState>,
    Device(device): Device,
    user: OptionalAuth,
) -> Result<Json<AddToCartResponse>> {
    let item = state.with_wizard(device, |w| w.add_to_cart())?;

    let (cart, ()) = state
        .store()
        .carts()
        .mutate(device, move |cart| cart.add(item))
        .await?;

    // Successful add resets the wizard to a fresh configuration.
    let fresh = fresh_wizard(&user);
    let wizard = WizardView::of(&fresh);
    state.reset_wizard(device, fresh);

    Ok(Json(AddToCartResponse {
        cart: CartView::of(&cart),
        wizard,
    }))
}
