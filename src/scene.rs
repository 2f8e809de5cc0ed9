//! Scene layout: where the beacon, plates, portal and props go
//!
//! Shard and plate positions are gameplay rules (see [`crate::Rules`]); this
//! module only covers how things look.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::host::{Color, VisualKind, VisualSpec};
use crate::v3;

pub const SHARD_ASSET: &str = "assets/models/shard.gltf";
pub const PORTAL_ASSET: &str = "assets/models/portal_devconnect.gltf";
pub const FOG_ASSET: &str = "assets/models/fog_plane.gltf";
pub const GHOST_ASSET: &str = "assets/models/ghost_plane.gltf";

pub const SHARD_HOVER: &str = "Pick up shard";
pub const PLATE_HOVER: &str = "Step here";
pub const BEACON_HOVER: &str = "Deposit shards";
pub const PORTAL_HOVER: &str = "Enter Devconnect Portal";

const BEACON_COLOR: Color = Color::rgba(0.8, 0.8, 0.95, 1.0);

/// Static placement of everything that is not a shard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub beacon: Vec3,
    pub beacon_scale: Vec3,
    pub plate_scale: Vec3,
    pub shard_scale: Vec3,
    pub portal: Vec3,
    pub portal_scale: Vec3,
    /// Status text anchor
    pub hud: Vec3,
    /// Status text anchor after entering the portal
    pub hud_beyond_portal: Vec3,
    pub hud_font_size: f32,
    pub overlay: Vec3,
    pub overlay_scale: Vec3,
    /// Decor, fog and ghosts; never interactive
    pub props: Vec<VisualSpec>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            beacon: v3(8.0, 1.0, 8.0),
            beacon_scale: v3(1.2, 0.2, 1.2),
            plate_scale: v3(1.0, 0.1, 1.0),
            shard_scale: Vec3::splat(0.7),
            portal: v3(8.0, 1.0, 4.0),
            portal_scale: Vec3::splat(2.0),
            hud: v3(8.0, 12.0, 8.0),
            hud_beyond_portal: v3(8.0, 12.0, 15.0),
            hud_font_size: 2.0,
            overlay: v3(8.0, 8.0, 8.0),
            overlay_scale: v3(16.0, 16.0, 1.0),
            props: default_props(),
        }
    }
}

impl SceneLayout {
    pub fn shard(&self, position: Vec3) -> VisualSpec {
        VisualSpec::model(SHARD_ASSET, position).scaled(self.shard_scale)
    }

    pub fn plate(&self, position: Vec3, lit: bool) -> VisualSpec {
        VisualSpec::new(VisualKind::Box, position)
            .scaled(self.plate_scale)
            .tinted(plate_color(lit))
    }

    pub fn beacon(&self) -> VisualSpec {
        VisualSpec::new(VisualKind::Box, self.beacon)
            .scaled(self.beacon_scale)
            .tinted(BEACON_COLOR)
    }

    pub fn portal(&self) -> VisualSpec {
        VisualSpec::model(PORTAL_ASSET, self.portal).scaled(self.portal_scale)
    }

    pub fn hud(&self, text: &str) -> VisualSpec {
        VisualSpec::new(
            VisualKind::Text {
                text: text.to_string(),
                font_size: self.hud_font_size,
            },
            self.hud,
        )
        .billboard()
    }

    /// Full-scene pixelation plane, starts fully transparent
    pub fn overlay(&self) -> VisualSpec {
        VisualSpec::new(VisualKind::Plane, self.overlay)
            .scaled(self.overlay_scale)
            .tinted(Color::CLEAR)
    }

    /// Silent anchor the ambient loop plays from
    pub fn ambient_source(&self) -> VisualSpec {
        VisualSpec::new(VisualKind::Anchor, Vec3::ZERO)
    }
}

pub fn plate_color(lit: bool) -> Color {
    if lit { Color::GREEN } else { Color::GRAY }
}

/// Ground fog sheet
pub fn fog(position: Vec3, scale: f32) -> VisualSpec {
    VisualSpec::model(FOG_ASSET, position).scaled(v3(8.0 * scale, 1.0, 8.0 * scale))
}

/// Camera-facing ghost
pub fn ghost(position: Vec3, scale: f32, alpha: f32) -> VisualSpec {
    VisualSpec::model(GHOST_ASSET, position)
        .scaled(v3(scale, scale, 1.0))
        .tinted(Color::WHITE.with_alpha(alpha))
        .billboard()
}

fn default_props() -> Vec<VisualSpec> {
    vec![
        VisualSpec::model("assets/models/airport_base.gltf", v3(8.0, 0.0, 4.0)),
        VisualSpec::model("assets/models/recoleta_wall.gltf", v3(8.0, 0.0, 10.0)),
        VisualSpec::model("assets/models/chandelier.gltf", v3(8.0, 2.4, 10.0)),
        VisualSpec::model("assets/models/dome_shell.gltf", v3(8.0, 0.0, 14.0)),
        fog(v3(8.0, 0.12, 8.0), 1.0),
        fog(v3(8.0, 0.12, 4.0), 1.0),
        fog(v3(8.0, 0.12, 10.0), 1.0),
        ghost(v3(6.5, 1.4, 9.5), 1.6, 0.95),
        ghost(v3(10.5, 1.3, 5.2), 1.2, 0.85),
    ]
}
