//! Logging facilities for the NVS components.
//!
//! All crates in this workspace are instrumented with the `tracing` crate.
//! Nothing is printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("nvs_components::tree_view=debug")
//!     .init();
//! ```
//!
//! The constants below name the targets and spans used by each subsystem so
//! filters can be written without guessing module paths.

/// Span names used throughout the NVS components for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "nvs::signal";
    /// Font cache materialization span.
    pub const FONT_CACHE: &str = "nvs::font_cache";
    /// Directory tree population span.
    pub const TREE_POPULATE: &str = "nvs::tree_populate";
    /// Thumbnail image load span.
    pub const THUMBNAIL_LOAD: &str = "nvs::thumbnail_load";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "nvs_core::signal";
    /// Font loading in the render crate.
    pub const RENDER_FONT: &str = "nvs_render::font";
    /// Image decoding in the render crate.
    pub const RENDER_IMAGE: &str = "nvs_render::image";
    /// Shared font cache target.
    pub const FONT_CACHE: &str = "nvs_components::font_cache";
    /// Themed button target.
    pub const BUTTON: &str = "nvs_components::button";
    /// Thumbnail control target.
    pub const THUMBNAIL: &str = "nvs_components::thumbnail";
    /// Hierarchical selector target.
    pub const TREE_VIEW: &str = "nvs_components::tree_view";
}
