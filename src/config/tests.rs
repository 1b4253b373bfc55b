use clap::Parser;

use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn content_limits_default_to_512_kib_and_200_chars() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.content.max_bytes, 512 * 1024);
    assert_eq!(settings.content.excerpt_chars, 200);
}

#[test]
fn content_limits_can_be_overridden_via_cli() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        content: ContentOverrides {
            max_bytes: Some(2048),
            excerpt_chars: Some(0),
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.content.max_bytes, 2048);
    assert_eq!(settings.content.excerpt_chars, 0);
}

#[test]
fn zero_content_limit_is_rejected() {
    let mut raw = RawSettings::default();
    raw.content.max_bytes = Some(0);

    let err = Settings::from_raw(raw).expect_err("invalid settings");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "content.max_bytes",
            ..
        }
    ));
}

#[test]
fn oversized_excerpt_budget_is_rejected() {
    let mut raw = RawSettings::default();
    raw.content.excerpt_chars = Some(MAX_EXCERPT_CHARS + 1);

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "logging.level",
            ..
        })
    ));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["quire"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_render_arguments() {
    let args = CliArgs::parse_from([
        "quire",
        "render",
        "--content-excerpt-chars",
        "80",
        "post.md",
    ]);

    match args.command.expect("render command") {
        Command::Render(render) => {
            assert_eq!(render.file, std::path::PathBuf::from("post.md"));
            assert_eq!(render.content.excerpt_chars, Some(80));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
