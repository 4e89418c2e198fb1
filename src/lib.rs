// The whole module tree lives in the library so the binary, the integration
// tests and the criterion benchmark share it. Localized strings are compiled
// in from `locales/`.
rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod event;
pub mod ingest;
pub mod quiz;
pub mod store;
pub mod ui;
