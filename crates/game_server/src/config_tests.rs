use super::*;

#[test]
fn empty_file_gives_defaults() {
    let cfg = ServerConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(cfg.log_filter, "info");
}

#[test]
fn missing_path_gives_defaults() {
    assert_eq!(ServerConfig::load(None).unwrap(), ServerConfig::default());
}

#[test]
fn unreadable_path_is_io_error() {
    let err = ServerConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn parses_seed_data() {
    let cfg = ServerConfig::from_toml_str(
        r#"
        bind_addr = "0.0.0.0:9000"

        [[seed.users]]
        username = "alice"
        token = "alice-token"

        [[seed.games]]
        name = "open"

        [[seed.games]]
        name = "casual"
        white = "alice"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
    assert_eq!(cfg.log_filter, "info");
    assert_eq!(cfg.seed.users.len(), 1);
    assert_eq!(cfg.seed.games[1].white.as_deref(), Some("alice"));
    assert_eq!(cfg.seed.games[1].black, None);
}

#[test]
fn bad_toml_is_parse_error() {
    let err = ServerConfig::from_toml_str("bind_addr = [").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn seed_populates_store() {
    let seed = SeedConfig {
        users: vec![SeedUser {
            username: "alice".into(),
            token: "t1".into(),
        }],
        games: vec![
            SeedGame {
                name: "first".into(),
                white: Some("alice".into()),
                black: Some("bob".into()),
            },
            SeedGame {
                name: "second".into(),
                white: None,
                black: None,
            },
        ],
    };
    let store = MemoryStore::new();
    assert_eq!(seed.apply(&store).unwrap(), vec![1, 2]);
    let first = store.game(1).unwrap();
    assert_eq!(first.black_username.as_deref(), Some("bob"));
    assert!(store.game(2).unwrap().white_username.is_none());
}
