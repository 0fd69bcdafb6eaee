//! Scene presets.
//!
//! Each [`ScenePreset`] expands into a full [`SceneConfig`]; front-ends only
//! choose the preset and optionally override the grid side.

use crate::camera::{CameraConfig, Placement};
use crate::constants::*;
use crate::deform::DeformationParams;
use crate::error::SceneError;
use crate::instances::GridBounds;
use crate::labels::DEFAULT_LABELS;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScenePreset {
    #[default]
    Cubefield,
    Labels,
    Wave,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 3] = [Self::Cubefield, Self::Labels, Self::Wave];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cubefield => "cubefield",
            Self::Labels => "labels",
            Self::Wave => "wave",
        }
    }

    pub fn default_grid_side(self) -> u32 {
        match self {
            Self::Labels => LABELS_GRID_SIDE,
            Self::Cubefield | Self::Wave => CUBEFIELD_GRID_SIDE,
        }
    }

    pub fn config(self, grid_side: Option<u32>) -> SceneConfig {
        let side = grid_side.unwrap_or_else(|| self.default_grid_side());
        match self {
            Self::Labels => labels_config(side),
            Self::Cubefield => orbit_field_config(
                self,
                side,
                CUBEFIELD_DISTANCE_PER_CELL,
                DeformationParams::PULSE,
            ),
            Self::Wave => orbit_field_config(
                self,
                side,
                WAVE_DISTANCE_PER_CELL,
                DeformationParams::WAVE,
            ),
        }
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SceneError::InvalidConfig(format!("unknown scene mode `{s}`")))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub preset: ScenePreset,
    pub grid: GridBounds,
    pub camera: CameraConfig,
    pub deformation: DeformationParams,
    /// Added to every lattice coordinate before expansion.
    pub origin: Vec3,
    pub cube_size: f32,
    pub labels: bool,
    pub clear_color: [f64; 4],
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.grid.cell_count() == 0 {
            return Err(SceneError::InvalidConfig("grid has no cells".into()));
        }
        if self.labels && self.grid.cell_count() > DEFAULT_LABELS.len() as u64 {
            return Err(SceneError::InvalidConfig(format!(
                "{} cells but only {} labels",
                self.grid.cell_count(),
                DEFAULT_LABELS.len()
            )));
        }
        self.camera.validate()?;
        let d = &self.deformation;
        if d.odd_power % 2 == 0 {
            return Err(SceneError::InvalidConfig(format!(
                "deformation power must be odd, got {}",
                d.odd_power
            )));
        }
        if d.period <= 0.0 || d.scale_divisor.is_some_and(|s| s == 0.0) {
            return Err(SceneError::InvalidConfig(
                "deformation period and scale divisor must be non-zero".into(),
            ));
        }
        if !(self.cube_size > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "cube size must be positive, got {}",
                self.cube_size
            )));
        }
        Ok(())
    }
}

fn labels_config(side: u32) -> SceneConfig {
    let grid = GridBounds::cube(side);
    let origin = -grid.center();
    SceneConfig {
        preset: ScenePreset::Labels,
        grid,
        camera: CameraConfig {
            sensitivity: LABELS_SENSITIVITY,
            elevation_drag: true,
            elevation_clamp: Some(LABELS_ELEVATION_CLAMP),
            decay_divisor: LABELS_DECAY_DIVISOR,
            radius: LABELS_CAMERA_RADIUS * (side.max(1) as f32 / LABELS_GRID_SIDE as f32),
            placement: Placement::Spherical,
            initial_azimuth: LABELS_INITIAL_AZIMUTH,
            initial_elevation: LABELS_INITIAL_ELEVATION,
            fov_y_deg: LABELS_FOV_Y_DEG,
            z_near: LABELS_Z_NEAR,
            z_far: LABELS_Z_FAR,
            wrap_azimuth: true,
        },
        deformation: DeformationParams::STATIC,
        origin,
        cube_size: LABELS_CUBE_SIZE,
        labels: true,
        clear_color: LABELS_CLEAR,
    }
}

fn orbit_field_config(
    preset: ScenePreset,
    side: u32,
    distance_per_cell: f32,
    deformation: DeformationParams,
) -> SceneConfig {
    SceneConfig {
        preset,
        grid: GridBounds::symmetric(side),
        camera: CameraConfig {
            sensitivity: CUBEFIELD_SENSITIVITY,
            elevation_drag: false,
            elevation_clamp: None,
            decay_divisor: CUBEFIELD_DECAY_DIVISOR,
            radius: side as f32 * distance_per_cell,
            placement: Placement::Turntable {
                height_ratio: CUBEFIELD_HEIGHT_RATIO,
            },
            initial_azimuth: CUBEFIELD_INITIAL_AZIMUTH,
            initial_elevation: 0.0,
            fov_y_deg: CUBEFIELD_FOV_Y_DEG,
            z_near: CUBEFIELD_Z_NEAR,
            z_far: CUBEFIELD_Z_FAR,
            wrap_azimuth: true,
        },
        deformation,
        origin: Vec3::ZERO,
        cube_size: 1.0,
        labels: false,
        clear_color: CUBEFIELD_CLEAR,
    }
}

/// Reads `mode` and `size` from a URL query string such as `?mode=wave&size=9`.
/// Unknown keys are ignored; malformed values are errors.
pub fn parse_query(query: &str) -> Result<(ScenePreset, Option<u32>), SceneError> {
    let mut preset = ScenePreset::default();
    let mut side = None;
    for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "mode" => preset = value.parse()?,
            "size" => {
                let n = value.parse::<u32>().map_err(|_| {
                    SceneError::InvalidConfig(format!("grid size `{value}` is not a number"))
                })?;
                side = Some(n);
            }
            _ => {}
        }
    }
    Ok((preset, side))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for p in ScenePreset::ALL {
            assert!(p.config(None).validate().is_ok(), "{p}");
        }
    }

    #[test]
    fn labels_grid_is_centred() {
        let c = ScenePreset::Labels.config(None);
        assert_eq!(c.origin, Vec3::splat(-1.0));
        assert_eq!(c.grid.cell_count(), 27);
    }

    #[test]
    fn query_parsing() {
        assert_eq!(parse_query(""), Ok((ScenePreset::Cubefield, None)));
        assert_eq!(
            parse_query("?mode=labels&size=4&x=1"),
            Ok((ScenePreset::Labels, Some(4)))
        );
        assert!(parse_query("?mode=spiral").is_err());
        assert!(parse_query("?size=big").is_err());
    }

    #[test]
    fn labels_grid_cannot_outgrow_the_label_list() {
        assert!(ScenePreset::Labels.config(Some(4)).validate().is_err());
    }

    #[test]
    fn zero_side_is_rejected() {
        assert!(ScenePreset::Cubefield.config(Some(0)).validate().is_err());
    }
}
