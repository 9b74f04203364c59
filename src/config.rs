//! Startup configuration file.
//!
//! ```json
//! {
//!     "team": 1234,
//!     "ntmode": "client",
//!     "cameras": [
//!         { "name": "front", "path": "/dev/video0", "width": 320, "height": 240 }
//!     ],
//!     "switched cameras": [
//!         { "name": "driver", "key": "/camera/select" }
//!     ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "/boot/frc.json";

/// Whether this process hosts the telemetry service or joins a team's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NtMode {
    #[default]
    Client,
    Server,
}

/// Camera control that can be automatic, held, or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSetting")]
pub enum CameraSetting {
    Auto,
    Hold,
    Value(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Number(i64),
    Text(String),
}

impl TryFrom<RawSetting> for CameraSetting {
    type Error = String;

    fn try_from(raw: RawSetting) -> Result<Self, Self::Error> {
        match raw {
            RawSetting::Number(v) => Ok(CameraSetting::Value(v)),
            RawSetting::Text(s) if s.eq_ignore_ascii_case("auto") => Ok(CameraSetting::Auto),
            RawSetting::Text(s) if s.eq_ignore_ascii_case("hold") => Ok(CameraSetting::Hold),
            RawSetting::Text(s) => s
                .parse()
                .map(CameraSetting::Value)
                .map_err(|_| format!("expected \"auto\", \"hold\" or a number, got '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraConfig {
    pub name: String,
    pub path: String,
    pub pixel_format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<u32>,
    pub brightness: Option<u32>,
    pub white_balance: Option<CameraSetting>,
    pub exposure: Option<CameraSetting>,
    pub properties: Vec<Property>,
    pub stream: Option<StreamConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchedCameraConfig {
    /// Name of the virtual camera feed.
    pub name: String,
    /// Telemetry key whose value selects the physical camera.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub team: u32,
    pub ntmode: NtMode,
    pub cameras: Vec<CameraConfig>,
    pub switched_cameras: Vec<SwitchedCameraConfig>,
}

#[derive(Deserialize)]
struct RawConfig {
    team: Option<u32>,
    ntmode: Option<String>,
    cameras: Option<Vec<RawCamera>>,
    #[serde(rename = "switched cameras", default)]
    switched_cameras: Vec<RawSwitchedCamera>,
}

#[derive(Deserialize)]
struct RawCamera {
    name: Option<String>,
    path: Option<String>,
    #[serde(rename = "pixel format")]
    pixel_format: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<u32>,
    brightness: Option<u32>,
    #[serde(rename = "white balance")]
    white_balance: Option<CameraSetting>,
    exposure: Option<CameraSetting>,
    #[serde(default)]
    properties: Vec<Property>,
    stream: Option<StreamConfig>,
}

#[derive(Deserialize)]
struct RawSwitchedCamera {
    name: Option<String>,
    key: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse configuration text; `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let err = |message: String| ConfigError::Parse {
            path: PathBuf::from(path),
            message,
        };

        let top: serde_json::Value = serde_json::from_str(text).map_err(|e| err(e.to_string()))?;
        if !top.is_object() {
            return Err(err("must be JSON object".to_string()));
        }
        let raw: RawConfig = serde_json::from_value(top).map_err(|e| err(e.to_string()))?;

        let team = raw
            .team
            .ok_or_else(|| err("could not read team number".to_string()))?;

        let ntmode = match raw.ntmode.as_deref() {
            None => NtMode::Client,
            Some(s) if s.eq_ignore_ascii_case("client") => NtMode::Client,
            Some(s) if s.eq_ignore_ascii_case("server") => NtMode::Server,
            Some(s) => return Err(err(format!("could not understand ntmode value '{}'", s))),
        };

        let raw_cameras = raw
            .cameras
            .ok_or_else(|| err("could not read cameras".to_string()))?;
        let mut cameras = Vec::with_capacity(raw_cameras.len());
        for cam in raw_cameras {
            let name = cam
                .name
                .ok_or_else(|| err("could not read camera name".to_string()))?;
            let path = cam
                .path
                .ok_or_else(|| err(format!("camera '{}': could not read path", name)))?;
            cameras.push(CameraConfig {
                name,
                path,
                pixel_format: cam.pixel_format,
                width: cam.width,
                height: cam.height,
                fps: cam.fps,
                brightness: cam.brightness,
                white_balance: cam.white_balance,
                exposure: cam.exposure,
                properties: cam.properties,
                stream: cam.stream,
            });
        }

        let mut switched_cameras = Vec::with_capacity(raw.switched_cameras.len());
        for cam in raw.switched_cameras {
            let name = cam
                .name
                .ok_or_else(|| err("could not read switched camera name".to_string()))?;
            let key = cam
                .key
                .ok_or_else(|| err(format!("switched camera '{}': could not read key", name)))?;
            switched_cameras.push(SwitchedCameraConfig { name, key });
        }

        Ok(Self {
            team,
            ntmode,
            cameras,
            switched_cameras,
        })
    }
}
