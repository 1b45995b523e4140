use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::simulation::map::VtMap;

/// Walkability grid as shipped in the world-ready message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VtMapData {
    pub data: Vec<Vec<u8>>,
    pub tile_width: f32,
    pub tile_height: f32,
}

impl VtMapData {
    pub fn into_map(self) -> VtMap {
        VtMap::new(self.data, self.tile_width, self.tile_height)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartPose {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Per-creature spawn descriptor from the server roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureDescriptor {
    pub id: u32,
    pub life: i32,
    pub max_life: i32,
    pub immortal_delay_ms: u64,
    pub velocity_speed: f32,
    pub visible_range: f32,
    pub mass: f32,
    #[serde(default)]
    pub fire_rate_ms: u64,
    #[serde(default)]
    pub bullet_speed: f32,
    #[serde(default)]
    pub n_bullets: usize,
    pub start: StartPose,
}

/// The inbound "world ready" payload: the map plus the monster rosters and
/// the local hero's descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldPayload {
    pub vt_map: VtMapData,
    pub player: CreatureDescriptor,
    #[serde(default)]
    pub zombies: Vec<CreatureDescriptor>,
    #[serde(default)]
    pub machines: Vec<CreatureDescriptor>,
    #[serde(default)]
    pub bats: Vec<CreatureDescriptor>,
}

#[derive(Debug)]
pub enum PayloadError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            PayloadError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            PayloadError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for PayloadError {}

pub fn load_world_payload(path: impl AsRef<Path>) -> Result<WorldPayload, PayloadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let payload: WorldPayload =
        serde_json::from_str(&raw).map_err(|source| PayloadError::Json {
            path: path.display().to_string(),
            source,
        })?;
    payload.validate()?;
    Ok(payload)
}

pub fn parse_world_payload(raw: &str) -> Result<WorldPayload, PayloadError> {
    let payload: WorldPayload =
        serde_json::from_str(raw).map_err(|source| PayloadError::Json {
            path: "<inline>".to_string(),
            source,
        })?;
    payload.validate()?;
    Ok(payload)
}

impl WorldPayload {
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.vt_map.data.is_empty() || self.vt_map.data[0].is_empty() {
            return Err(PayloadError::Validation(
                "walkability map must have at least one tile".to_string(),
            ));
        }
        let width = self.vt_map.data[0].len();
        if self.vt_map.data.iter().any(|row| row.len() != width) {
            return Err(PayloadError::Validation(
                "walkability map rows must all have the same width".to_string(),
            ));
        }

        let rosters = [
            std::slice::from_ref(&self.player),
            self.zombies.as_slice(),
            self.machines.as_slice(),
            self.bats.as_slice(),
        ];
        for descriptor in rosters.into_iter().flatten() {
            if descriptor.max_life <= 0 {
                return Err(PayloadError::Validation(format!(
                    "creature {} has non-positive max_life",
                    descriptor.id
                )));
            }
            if descriptor.life < 0 || descriptor.life > descriptor.max_life {
                return Err(PayloadError::Validation(format!(
                    "creature {} has life outside 0..=max_life",
                    descriptor.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_payload_json() -> String {
        r#"{
            "vt_map": { "data": [[0, 0], [0, 5]], "tile_width": 64.0, "tile_height": 64.0 },
            "player": {
                "id": 1, "life": 5, "max_life": 5, "immortal_delay_ms": 1000,
                "velocity_speed": 200.0, "visible_range": 0.0, "mass": 10.0,
                "fire_rate_ms": 500, "bullet_speed": 500.0, "n_bullets": 10,
                "start": { "x": 32.0, "y": 32.0 }
            },
            "zombies": [{
                "id": 2, "life": 3, "max_life": 3, "immortal_delay_ms": 1000,
                "velocity_speed": 120.0, "visible_range": 300.0, "mass": 20.0,
                "start": { "x": 96.0, "y": 96.0, "rotation": 1.0 }
            }]
        }"#
        .to_string()
    }

    #[test]
    fn parses_minimal_payload() {
        let payload = parse_world_payload(&minimal_payload_json()).expect("parse");
        assert_eq!(payload.player.n_bullets, 10);
        assert_eq!(payload.zombies.len(), 1);
        assert_eq!(payload.zombies[0].n_bullets, 0); // defaulted
        assert!(payload.machines.is_empty());
    }

    #[test]
    fn rejects_life_above_max() {
        let raw = minimal_payload_json().replace(r#""life": 5"#, r#""life": 9"#);
        let err = parse_world_payload(&raw).unwrap_err();
        assert!(matches!(err, PayloadError::Validation(_)));
    }

    #[test]
    fn rejects_ragged_map() {
        let raw = minimal_payload_json().replace("[[0, 0], [0, 5]]", "[[0, 0], [0]]");
        let err = parse_world_payload(&raw).unwrap_err();
        assert!(matches!(err, PayloadError::Validation(_)));
    }
}
