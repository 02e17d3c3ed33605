//! Drawing-surface contract.
//!
//! The engine never touches a graphics API. Each frame it produces a
//! `DrawList` of plain `DrawCommand`s; a `Surface` (the Canvas 2D backend in
//! `ambient-web`, or a recording surface in tests) replays it.

use glam::Vec2;

use super::viewport::Viewport;

/// Compositing mode for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal alpha blending.
    #[default]
    SourceOver,
    /// Additive blending.
    Lighter,
}

impl BlendMode {
    /// Canvas `globalCompositeOperation` name.
    pub fn composite_operation(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Lighter => "lighter",
        }
    }
}

/// A paint colour. `Base` resolves to the configured particle colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Base,
    /// Hue in degrees, saturation and lightness in percent.
    Hsl { h: f32, s: f32, l: f32 },
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    Transparent,
}

impl Color {
    pub const fn white(a: f32) -> Self {
        Color::Rgba { r: 255, g: 255, b: 255, a }
    }

    /// CSS colour string, substituting `base` for `Color::Base`.
    pub fn to_css(&self, base: &str) -> String {
        match *self {
            Color::Base => base.to_string(),
            Color::Hsl { h, s, l } => format!("hsl({}, {}%, {}%)", h, s, l),
            Color::Hsla { h, s, l, a } => format!("hsla({}, {}%, {}%, {})", h, s, l, a),
            Color::Rgba { r, g, b, a } => format!("rgba({}, {}, {}, {})", r, g, b, a),
            Color::Transparent => "transparent".to_string(),
        }
    }
}

/// Blurred shadow behind a stroke or fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

/// One drawing operation, in CSS pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear,
    /// Solid filled circle.
    Dot { pos: Vec2, radius: f32, color: Color, alpha: f32 },
    /// Filled circle with a radial gradient: `inner` at 0, `outer` at 0.4,
    /// transparent at the rim.
    Halo { pos: Vec2, radius: f32, inner: Color, outer: Color, alpha: f32 },
    /// Straight stroked segment.
    Line { from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32, shadow: Option<Shadow> },
    /// Additive white pulse: a `core_radius` circle filled with a white
    /// gradient spanning `glow_radius`.
    Spark { pos: Vec2, core_radius: f32, glow_radius: f32, alpha: f32, shadow: Shadow },
    /// Additive stroked white ring.
    Ring { center: Vec2, radius: f32, alpha: f32, width: f32, shadow: Shadow },
}

impl DrawCommand {
    pub fn blend(&self) -> BlendMode {
        match self {
            DrawCommand::Spark { .. } | DrawCommand::Ring { .. } => BlendMode::Lighter,
            _ => BlendMode::SourceOver,
        }
    }
}

/// Ordered commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    /// CSS colour substituted for `Color::Base`.
    pub base_color: String,
}

impl DrawList {
    pub fn new(base_color: impl Into<String>) -> Self {
        Self {
            commands: Vec::with_capacity(512),
            base_color: base_color.into(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Resolve a colour against this list's base colour.
    pub fn css(&self, color: &Color) -> String {
        color.to_css(&self.base_color)
    }
}

/// A target that can replay draw lists.
///
/// # Example Implementation
///
/// ```ignore
/// struct Recording(Vec<DrawCommand>);
///
/// impl Surface for Recording {
///     fn backend(&self) -> &'static str { "recording" }
///     fn resize(&mut self, _viewport: &Viewport) {}
///     fn submit(&mut self, list: &DrawList) {
///         self.0 = list.commands.clone();
///     }
/// }
/// ```
pub trait Surface {
    /// Backend identifier (e.g. "canvas2d").
    fn backend(&self) -> &'static str;

    /// Match the backing store to `viewport` and reset the transform so one
    /// unit is one CSS pixel.
    fn resize(&mut self, viewport: &Viewport);

    /// Draw a complete frame.
    fn submit(&mut self, list: &DrawList);
}
