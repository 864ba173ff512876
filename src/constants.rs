/// Timing, motion and layout tuning constants.
///
/// These constants express intended behavior (rate-limit windows, parallax
/// rates, breakpoints) and keep magic numbers out of the handlers.
// Rate-limit windows (milliseconds)
pub const SCROLL_THROTTLE_MS: f64 = 16.0; // ~one frame at 60Hz
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;
pub const SCROLL_SETTLE_MS: f64 = 150.0;
pub const FOCUS_CLEAR_MS: f64 = 100.0;

// Transient feedback (milliseconds)
pub const ANNOUNCE_CLEAR_MS: f64 = 1000.0;
pub const EMAIL_FEEDBACK_MS: f64 = 2000.0;

// Scroll parallax
pub const PARALLAX_RATE: f32 = 0.5; // primary layer px per scrolled px
pub const PARALLAX_SECONDARY_RATIO: f32 = -0.3; // secondary layer, relative to primary

// Pointer drift
pub const DRIFT_SCALE: f32 = 100.0;
pub const DRIFT_SPEED_FACTORS: [f32; 3] = [0.3, 0.4, 0.5];

// Cursor light (square, centered on the pointer)
pub const LIGHT_SIZE_PX: f32 = 600.0;

// Particles
pub const DEFAULT_PARTICLE_COUNT: usize = 20;
pub const NARROW_PARTICLE_COUNT: usize = 8;
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;
pub const PARTICLE_DELAY_MAX_S: f32 = 15.0;
pub const PARTICLE_DURATION_MIN_S: f32 = 10.0;
pub const PARTICLE_DURATION_SPAN_S: f32 = 10.0;

// Navbar gets the `scrolled` class past this offset
pub const NAV_SCROLLED_THRESHOLD_PX: f64 = 50.0;

pub const DEFAULT_CONTACT_EMAIL: &str = "hello@example.com";

// Selectors the page is expected to provide
pub const SEL_ROOT: &str = "html";
pub const SEL_BODY: &str = "body";
pub const SEL_NAVBAR: &str = ".navbar";
pub const SEL_EMAIL: &str = "#email-action";
pub const SEL_LANG_BUTTONS: &str = ".lang-btn";
pub const SEL_PARTICLES: &str = ".particles";
pub const SEL_GRID: &str = ".grid-overlay";
pub const SEL_REVEAL: &str = ".animate-on-scroll";

// Classes written by the page
pub const CLASS_PARTICLE: &str = "particle";
pub const CLASS_LIGHT: &str = "cursor-light";
pub const CLASS_LIVE_REGION: &str = "sr-only";
pub const CLASS_SCROLLED: &str = "scrolled";
pub const CLASS_SCROLLING: &str = "is-scrolling";
pub const CLASS_LOADED: &str = "loaded";
pub const CLASS_VISIBLE: &str = "visible";
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_ACTIVATED: &str = "activated";
pub const CLASS_KEYBOARD_NAV: &str = "keyboard-nav";
pub const CLASS_REDUCED_MOTION: &str = "reduced-motion";
pub const CLASS_HIGH_CONTRAST: &str = "high-contrast";

// Media queries, evaluated once at setup
pub const MQ_REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";
pub const MQ_HIGH_CONTRAST: &str = "(prefers-contrast: more)";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
