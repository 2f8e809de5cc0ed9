//! Host collaborator interfaces
//!
//! The rendering/entity engine, audio playback and status display live
//! outside this crate. The session only ever commands them; it never reads
//! anything back except the handle returned by `create_visual`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use crate::audio::AudioBackend;

/// Opaque handle to a visual owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgba(0.5, 0.5, 0.5, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// What the host should build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualKind {
    /// glTF model
    Model { asset: String },
    /// Unit box mesh
    Box,
    /// Unit plane mesh
    Plane,
    /// Floating text
    Text { text: String, font_size: f32 },
    /// Invisible anchor (audio sources)
    Anchor,
}

/// Full description of a visual to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSpec {
    pub kind: VisualKind,
    pub position: Vec3,
    pub scale: Vec3,
    /// Material tint (albedo), host default when None
    pub color: Option<Color>,
    /// Always face the camera
    pub billboard: bool,
}

impl VisualSpec {
    pub fn new(kind: VisualKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            scale: Vec3::ONE,
            color: None,
            billboard: false,
        }
    }

    pub fn model(asset: impl Into<String>, position: Vec3) -> Self {
        Self::new(
            VisualKind::Model {
                asset: asset.into(),
            },
            position,
        )
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn tinted(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn billboard(mut self) -> Self {
        self.billboard = true;
        self
    }
}

/// Entity/presentation service plus interaction registration
pub trait Presentation {
    fn create_visual(&mut self, spec: &VisualSpec) -> VisualHandle;
    fn destroy_visual(&mut self, handle: VisualHandle);
    fn set_color(&mut self, handle: VisualHandle, color: Color);
    fn set_position(&mut self, handle: VisualHandle, position: Vec3);
    /// Make a visual clickable; clicks come back through `Session::interact`
    fn enable_interaction(&mut self, handle: VisualHandle, hover_text: &str);
}

/// Status display sink
pub trait StatusSink {
    fn render(&mut self, text: &str, overlay_alpha: f32);
}

/// Everything a session drives
pub trait Host: Presentation + AudioBackend + StatusSink {}

impl<T: Presentation + AudioBackend + StatusSink> Host for T {}
