use std::io::Write;
use std::path::Path;

use pivision::config::{CameraSetting, Config, NtMode};
use pivision::ConfigError;

fn parse(text: &str) -> Result<Config, ConfigError> {
    Config::parse(text, Path::new("/boot/frc.json"))
}

fn parse_err(text: &str) -> String {
    parse(text).unwrap_err().to_string()
}

#[test]
fn test_full_config() -> anyhow::Result<()> {
    let config = parse(
        r#"{
            "team": 4904,
            "ntmode": "Server",
            "cameras": [
                {
                    "name": "front",
                    "path": "/dev/video0",
                    "pixel format": "MJPEG",
                    "width": 320,
                    "height": 240,
                    "fps": 30,
                    "brightness": 40,
                    "white balance": "auto",
                    "exposure": 12,
                    "properties": [{ "name": "contrast", "value": 50 }],
                    "stream": { "properties": [{ "name": "compression", "value": 30 }] }
                },
                { "name": "rear", "path": "/dev/video1", "exposure": "hold" }
            ],
            "switched cameras": [{ "name": "driver", "key": "/camera/select" }]
        }"#,
    )?;

    assert_eq!(config.team, 4904);
    assert_eq!(config.ntmode, NtMode::Server);
    assert_eq!(config.cameras.len(), 2);

    let front = &config.cameras[0];
    assert_eq!(front.pixel_format.as_deref(), Some("MJPEG"));
    assert_eq!((front.width, front.height, front.fps), (Some(320), Some(240), Some(30)));
    assert_eq!(front.white_balance, Some(CameraSetting::Auto));
    assert_eq!(front.exposure, Some(CameraSetting::Value(12)));
    assert_eq!(front.properties[0].name, "contrast");
    assert_eq!(front.stream.as_ref().unwrap().properties.len(), 1);

    assert_eq!(config.cameras[1].exposure, Some(CameraSetting::Hold));
    assert_eq!(config.switched_cameras[0].key, "/camera/select");
    Ok(())
}

#[test]
fn test_minimal_config_defaults_to_client() -> anyhow::Result<()> {
    let config = parse(r#"{ "team": 1, "cameras": [] }"#)?;
    assert_eq!(config.ntmode, NtMode::Client);
    assert!(config.cameras.is_empty());
    assert!(config.switched_cameras.is_empty());
    Ok(())
}

#[test]
fn test_missing_required_fields() {
    assert_eq!(
        parse_err(r#"{ "cameras": [] }"#),
        "config error in '/boot/frc.json': could not read team number"
    );
    assert!(parse_err(r#"{ "team": 1 }"#).ends_with("could not read cameras"));
    assert!(parse_err(r#"{ "team": 1, "cameras": [{ "path": "/dev/video0" }] }"#)
        .ends_with("could not read camera name"));
    assert!(parse_err(r#"{ "team": 1, "cameras": [{ "name": "front" }] }"#)
        .ends_with("camera 'front': could not read path"));
    assert!(parse_err(
        r#"{ "team": 1, "cameras": [], "switched cameras": [{ "name": "driver" }] }"#
    )
    .ends_with("switched camera 'driver': could not read key"));
}

#[test]
fn test_malformed_values_are_rejected() {
    assert!(parse_err("[1, 2]").ends_with("must be JSON object"));
    assert!(parse_err("{ not json").starts_with("config error in"));
    assert!(parse_err(r#"{ "team": 1, "ntmode": "peer", "cameras": [] }"#)
        .ends_with("could not understand ntmode value 'peer'"));
    assert!(matches!(
        parse(r#"{ "team": 1, "cameras": [{ "name": "a", "path": "b", "exposure": "dim" }] }"#),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_load_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, r#"{{ "team": 7, "cameras": [{{ "name": "a", "path": "/dev/video0" }}] }}"#)?;

    let config = Config::load(file.path())?;
    assert_eq!(config.team, 7);
    assert_eq!(config.cameras[0].name, "a");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Config::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().starts_with("could not open"));
}
