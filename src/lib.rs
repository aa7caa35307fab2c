//! Anchor Grid - anchor-constrained layout with an editable table model
//!
//! Components are placed by anchoring their edges or centers to other
//! components instead of absolute coordinates. On top of that engine, a
//! [`Table`] keeps its columns and rows as anchor chains so that inserting,
//! deleting, swapping and dragging lines only touches the neighbouring anchors.
//!
//! Tables can be driven from TOML scripts and rendered to SVG.
//!
//! # Example
//!
//! ```rust
//! use anchor_grid::render;
//!
//! let svg = render(r#"
//!     [table]
//!     titles = ["Name", "Qty"]
//!     rows = 3
//! "#).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Name"));
//! ```

pub mod animation;
pub mod error;
pub mod grid;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod script;

pub use animation::ProgressModel;
pub use error::ScriptError;
pub use grid::{CellKind, GridConfig, GridShape, LineKind, Table};
pub use input::NumericInput;
pub use layout::{Anchor, LayoutContainer, LayoutError, ScalePolicy};
pub use renderer::{render_table_svg, Palette, SvgConfig};
pub use script::{Op, Script};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while loading or replaying the script
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Error while laying out the result
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Scale applied after the script ran, overriding the script's own
    pub scale: Option<f64>,
    /// Debug mode: dump resolved bounds to stderr
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_scale(mut self, factor: f64) -> Self {
        self.scale = Some(factor);
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Run a script and return the resulting table, with the configured scale applied
pub fn build_table(source: &str, config: &RenderConfig) -> Result<Table, RenderError> {
    run_script(&Script::parse(source)?, config)
}

fn run_script(script: &Script, config: &RenderConfig) -> Result<Table, RenderError> {
    let mut table = script.run()?;
    if let Some(factor) = config.scale {
        table.set_scale(factor)?;
    }

    if config.debug {
        eprintln!("=== Layout Debug ===");
        eprint!("{}", table);
        eprintln!("====================");
    }
    Ok(table)
}

/// Render a script to SVG with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a script to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use anchor_grid::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_scale(2.0)
///     .with_svg(SvgConfig::default().with_viewbox_padding(0.0));
///
/// let svg = render_with_config("[table]\ncolumns = 1\nrows = 2\n", config).unwrap();
/// assert!(svg.contains("ag-placeholder"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let script = Script::parse(source)?;
    let table = run_script(&script, &config)?;
    let svg = match script.palette {
        Some(palette) => config.svg.with_palette(palette),
        None => config.svg,
    };
    Ok(render_table_svg(&table, &svg))
}
