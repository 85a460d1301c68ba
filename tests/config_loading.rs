//! Render configuration files on disk.

use std::io::Write;
use tempfile::NamedTempFile;
use tienlen_render::{RenderConfig, RenderError, RenderResult};

#[test]
fn test_load_override_file() -> RenderResult<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"{{ "enable_shadows": false, "bot_display_cap": 5, "glow": {{ "blur": 12.0 }} }}"#
    )?;

    let config = RenderConfig::load(file.path())?;
    assert!(!config.enable_shadows);
    assert_eq!(config.bot_display_cap, 5);
    assert_eq!(config.glow.blur, 12.0);
    assert_eq!(config.glow.min_intensity, 0.3);
    assert_eq!(config.hover_scale, 1.05);
    Ok(())
}

#[test]
fn test_round_trip_preset() -> RenderResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("render.json");
    std::fs::write(&path, serde_json::to_string_pretty(&RenderConfig::performance())?)?;

    assert_eq!(RenderConfig::load(&path)?, RenderConfig::performance());
    Ok(())
}

#[test]
fn test_missing_and_invalid_files() -> RenderResult<()> {
    let dir = tempfile::tempdir()?;
    assert!(matches!(
        RenderConfig::load(dir.path().join("absent.json")),
        Err(RenderError::Io(_))
    ));

    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "bot_display_cap": 0 }"#)?;
    assert!(matches!(
        RenderConfig::load(&path),
        Err(RenderError::InvalidConfig(_))
    ));
    Ok(())
}
