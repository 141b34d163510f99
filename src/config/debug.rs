//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use site is additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit every accepted, stale or failed price-feed completion.
    pub print_price_feed_updates: bool,
    /// Emit cross-hair events as they reach the chart sync engine.
    pub print_crosshair_events: bool,
    /// Emit simulation request bodies and response sizes.
    pub print_simulation_requests: bool,
    /// Emit UI interaction logs (run, share, form edits).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_price_feed_updates: false,
    print_crosshair_events: false,
    print_simulation_requests: true,
    print_ui_interactions: true,
    print_state_serde: false,
    print_shutdown: false,
};
