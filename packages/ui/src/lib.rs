//! This crate contains all shared UI for the profile client.

use dioxus::prelude::*;

pub mod profile;
pub mod status;
pub mod views;

mod auth;
pub use auth::{
    sign_in, sign_out, use_auth, AuthProvider, AuthState, LoginButton, LogoutButton,
    SignInOutcome,
};

mod services;
pub use services::{make_token_slot, use_services, Services};

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

#[cfg(test)]
mod testing;
