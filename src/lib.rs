//! Neon Portfolio - front-end effects for a single-page portfolio site
//!
//! Core modules:
//! - `fx`: Deterministic effect state machines (loader, typewriter,
//!   particle field, scroll-derived state) - no platform dependencies
//!
//! The browser glue (timers, animation frames, DOM wiring, observers) lives
//! in the wasm entry point; everything observable about each effect is
//! decided here so it can be tested headlessly.

pub mod fx;

pub use fx::loader::{LoaderPhase, LoaderSim};
pub use fx::particles::{Particle, ParticleField};
pub use fx::typewriter::Typewriter;

/// Effect tuning constants
pub mod consts {
    /// Loader tick interval (ms)
    pub const LOADER_TICK_MS: i32 = 120;
    /// Delay between the bar hitting 100% and the overlay teardown (ms)
    pub const LOADER_SETTLE_MS: i32 = 600;
    /// Loader progress increment range per tick: [min, min + span)
    pub const LOADER_STEP_MIN: f32 = 2.0;
    pub const LOADER_STEP_SPAN: f32 = 8.0;

    /// Typewriter start delay - lands after the loader overlay transition (ms)
    pub const TYPE_START_DELAY_MS: i32 = 3800;
    /// Base typing delay per character (ms); jitter is added on top
    pub const TYPE_DELAY_MS: i32 = 60;
    /// Random jitter span added to the typing delay (ms)
    pub const TYPE_JITTER_MS: i32 = 40;
    /// Hold after a phrase is fully typed (ms)
    pub const TYPE_HOLD_MS: i32 = 2000;
    /// Delete delay per character (ms)
    pub const DELETE_DELAY_MS: i32 = 30;
    /// Pause before typing the next phrase (ms)
    pub const PHRASE_PAUSE_MS: i32 = 400;

    /// Number of ambient particles
    pub const PARTICLE_COUNT: usize = 60;
    /// Particles closer than this get a connecting line
    pub const LINK_DISTANCE: f32 = 150.0;
    /// Peak connecting-line opacity (at distance 0)
    pub const LINK_MAX_ALPHA: f32 = 0.08;
    /// Connecting-line stroke width
    pub const LINK_WIDTH: f64 = 0.5;
    /// Neon palette shared by particles and their links
    pub const PALETTE: [&str; 5] = ["#ff2d7b", "#00f0ff", "#b724ff", "#00ff88", "#ff6b35"];

    /// Nav gains its "scrolled" background past this offset (px)
    pub const NAV_SCROLLED_PX: f64 = 80.0;
    /// Section tops are biased up by this much when picking the active one (px)
    pub const SECTION_BIAS_PX: f64 = 120.0;

    /// Hero scrolls at this fraction of the page scroll
    pub const PARALLAX_FACTOR: f64 = 0.25;
    /// Hero is fully faded after this fraction of one viewport height
    pub const PARALLAX_FADE_FRACTION: f64 = 0.8;

    /// Reveal watcher visibility threshold
    pub const REVEAL_THRESHOLD: f64 = 0.15;
    /// Reveal watcher bottom root margin (shrinks the trigger zone)
    pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
    /// Skill-bar watcher visibility threshold
    pub const SKILL_THRESHOLD: f64 = 0.3;
}

/// Collaborator element contract: ids, classes and data attributes the host
/// page provides. Only existence and semantics are required; every lookup
/// no-ops when the element is absent.
pub mod selectors {
    pub const LOADING_SCREEN_ID: &str = "loading-screen";
    pub const LOADER_FILL_ID: &str = "loader-fill";
    pub const MAIN_NAV_ID: &str = "main-nav";
    pub const TYPED_TEXT_ID: &str = "typed-text";
    pub const PARTICLE_CANVAS_ID: &str = "particle-canvas";
    pub const HAMBURGER_ID: &str = "nav-hamburger";

    /// Element categories that get the scroll-reveal treatment
    pub const REVEAL_TARGETS: &str =
        ".project-card, .timeline-card, .skill-group, .stat-card, .section-header";
    pub const SKILL_BARS: &str = ".stat-bar";
    pub const BAR_FILL: &str = ".bar-fill";
    pub const SECTIONS: &str = ".section";
    pub const NAV_LINKS: &str = ".nav-link";
    pub const NAV_LINK_LIST: &str = ".nav-links";
    pub const ANCHOR_LINKS: &str = "a[href^='#']";
    pub const HERO_CONTENT: &str = ".hero-content";
    pub const GLOW_CARDS: &str = ".project-card, .stat-card";
    pub const GLOW_CHILD: &str = ".card-glow";
}
