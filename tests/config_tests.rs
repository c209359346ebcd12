use clap::Parser;
use stair_gallery::cli::Cli;
use stair_gallery::config::GalleryConfig;
use stair_gallery::scenes::Variant;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = GalleryConfig::from_json("{}").unwrap();
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.staircase.step_count, 30);
        assert_eq!(config.window.width, 800);
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let json = r#"{
            "variant": "gallery",
            "staircase": { "step_count": 12, "step_color": 255 },
            "camera": { "fov_degrees": 60.0 },
            "spin_speed": 1.5
        }"#;
        let config = GalleryConfig::from_json(json).unwrap();
        assert_eq!(config.variant, Variant::Gallery);
        assert_eq!(config.staircase.step_count, 12);
        assert_eq!(config.staircase.step_color, 255);
        assert_eq!(config.staircase.step_height, 0.3, "unset fields keep defaults");
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.spin_speed, 1.5);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = GalleryConfig::from_json(r#"{ "staircase": { "step_height": 0.0 } }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("step_height"), "unexpected error: {:#}", err);

        for (json, field) in [
            (r#"{ "sun": { "arrive_distance": -1.0 } }"#, "arrive_distance"),
            (r#"{ "sun": { "arrive_distance": 0.0 } }"#, "arrive_distance"),
            (r#"{ "sun": { "speed": -0.5 } }"#, "sun.speed"),
            (r#"{ "sun": { "speed": 0.0 } }"#, "sun.speed"),
        ] {
            let err = GalleryConfig::from_json(json).unwrap_err();
            assert!(format!("{:#}", err).contains(field), "{} should be rejected, got: {:#}", json, err);
        }

        let config = GalleryConfig {
            spin_speed: f32::NAN,
            ..GalleryConfig::default()
        };
        assert!(config.validate().is_err(), "non-finite spin_speed must be rejected");

        assert!(GalleryConfig::from_json(r#"{ "variant": "castle" }"#).is_err());
        assert!(GalleryConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = GalleryConfig::load(std::path::Path::new("no/such/gallery.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("gallery.json"), "unexpected error: {:#}", err);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "stair-gallery",
            "--variant",
            "seaside",
            "--steps",
            "8",
            "--assets",
            "media",
            "--no-ui",
        ])
        .unwrap();
        assert!(cli.no_ui);

        let config = GalleryConfig::from_cli(&cli).unwrap();
        assert_eq!(config.variant, Variant::Seaside);
        assert_eq!(config.staircase.step_count, 8);
        assert_eq!(config.assets_dir, std::path::PathBuf::from("media"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["stair-gallery"]).unwrap();
        assert!(!cli.no_ui);
        assert_eq!(GalleryConfig::from_cli(&cli).unwrap(), GalleryConfig::default());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Variant::Seaside).unwrap(), "\"seaside\"");
        assert_eq!(Variant::default(), Variant::Classic);
    }
}
