#[cfg(test)]
mod tests {
    use std::io::Write;

    use zcomp_core::config::{ConfigError, ZcompConfig};
    use zcomp_core::constants::PAGE_SIZE;
    use zcomp_core::types::ZcompError;

    #[test]
    fn default_is_lz4_without_level() {
        let cfg = ZcompConfig::default();
        assert_eq!(cfg.algorithm, "lz4");
        assert_eq!(cfg.level, None);
        cfg.validate().unwrap();
    }

    #[test]
    fn parses_json_with_defaults() {
        let cfg = ZcompConfig::from_json(r#"{"algorithm": "zstd", "level": 5}"#).unwrap();
        assert_eq!(cfg, ZcompConfig { algorithm: "zstd".into(), level: Some(5) });

        let cfg = ZcompConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ZcompConfig::default());
    }

    #[test]
    fn rejects_unknown_fields_and_bad_json() {
        assert!(matches!(
            ZcompConfig::from_json(r#"{"algo": "lz4"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(ZcompConfig::from_json("lz4"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = ZcompConfig::for_algorithm("lzo").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAlgorithm(ref name) if name == "lzo"));
    }

    #[test]
    fn accepts_sysfs_style_names() {
        assert_eq!(ZcompConfig::for_algorithm("deflate\n").unwrap().algorithm, "deflate");
    }

    #[test]
    fn validates_levels() {
        let err = ZcompConfig::for_algorithm("deflate").unwrap().with_level(12).validate().unwrap_err();
        assert!(matches!(err, ConfigError::LevelOutOfRange { level: 12, min: 0, max: 9, .. }));

        let err = ZcompConfig::default().with_level(1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::LevelNotSupported(_)));

        ZcompConfig::for_algorithm("zstd").unwrap().with_level(7).validate().unwrap();
    }

    #[test]
    fn builds_a_working_stream() {
        let cfg = ZcompConfig::for_algorithm("zstd").unwrap().with_level(3);
        let mut stream = cfg.open_stream().unwrap();
        assert_eq!(stream.backend_name(), "zstd");

        let page = vec![9u8; PAGE_SIZE];
        let compressed = stream.compress(&page).unwrap().to_vec();
        let mut out = vec![0u8; PAGE_SIZE];
        stream.decompress(&compressed, &mut out).unwrap();
        assert_eq!(out, page);
    }

    #[test]
    fn bad_config_surfaces_as_unified_error() {
        let cfg = ZcompConfig { algorithm: "snappy".into(), level: None };
        match cfg.open_stream() {
            Err(ZcompError::Config(ConfigError::UnknownAlgorithm(name))) => assert_eq!(name, "snappy"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("zcomp-config-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"algorithm": "deflate", "level": 1}"#).unwrap();
        drop(file);

        let cfg = ZcompConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.algorithm, "deflate");
        assert_eq!(cfg.level, Some(1));

        assert!(matches!(
            ZcompConfig::from_file(path.with_extension("missing")),
            Err(ZcompError::Io(_))
        ));
    }
}
