//! minidash - theme toggle plus four independent REST lookups on one page
//!
//! This library exposes the page's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod currency;
pub mod effect;
pub mod fragment;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod theme;
