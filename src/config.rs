use crate::constants::{
    DEFAULT_CONTACT_EMAIL, DEFAULT_PARTICLE_COUNT, NARROW_BREAKPOINT_PX, NARROW_PARTICLE_COUNT,
};
use std::str::FromStr;

/// Runtime-tunable page settings.
///
/// Defaults come from `constants.rs`; a page can override them with
/// `data-*` attributes on `<body>` (see [`FxConfig::from_lookup`]).
#[derive(Clone, Debug, PartialEq)]
pub struct FxConfig {
    pub particle_count: usize,
    pub narrow_particle_count: usize,
    pub narrow_breakpoint_px: f64,
    pub contact_email: String,
    /// Fixed seed for particle layout; entropy-seeded when `None`.
    pub particle_seed: Option<u64>,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            narrow_particle_count: NARROW_PARTICLE_COUNT,
            narrow_breakpoint_px: NARROW_BREAKPOINT_PX,
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            particle_seed: None,
        }
    }
}

impl FxConfig {
    /// Build a config from attribute lookups, e.g. `data-particle-count`.
    /// Missing attributes keep their default; unparsable ones are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(n) = parse_attr::<usize>(&lookup, "data-particle-count") {
            cfg.particle_count = n;
        }
        if let Some(n) = parse_attr::<usize>(&lookup, "data-narrow-particle-count") {
            cfg.narrow_particle_count = n;
        }
        if let Some(px) = parse_attr::<f64>(&lookup, "data-narrow-breakpoint") {
            if px.is_finite() && px >= 0.0 {
                cfg.narrow_breakpoint_px = px;
            } else {
                log::warn!("[config] ignoring data-narrow-breakpoint={}", px);
            }
        }
        if let Some(email) = lookup("data-contact-email") {
            let email = email.trim();
            if email.contains('@') {
                cfg.contact_email = email.to_string();
            } else if !email.is_empty() {
                log::warn!("[config] ignoring data-contact-email={:?}", email);
            }
        }
        cfg.particle_seed = parse_attr::<u64>(&lookup, "data-particle-seed");
        cfg
    }
}

fn parse_attr<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("[config] ignoring {}={:?}", name, raw);
            None
        }
    }
}
