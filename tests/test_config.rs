use lantern::config::{CONFIG_ENV, Config};
use std::io::Write;
use std::path::PathBuf;

// Environment-driven loading lives in one test so parallel tests never race
// on process-wide variables.
#[test]
fn test_config_load_from_env_and_file() {
    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var("LISTEN");
        std::env::remove_var("STATIC_ROOT");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.static_root, PathBuf::from("webroot"));

    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
        std::env::set_var("STATIC_ROOT", "/srv/www");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.static_root, PathBuf::from("/srv/www"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "listen_addr: \"127.0.0.1:9000\"\nserver_name: from-file").unwrap();
    unsafe {
        std::env::remove_var("LISTEN");
        std::env::set_var(CONFIG_ENV, file.path());
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.server_name, "from-file");
    // Environment still overrides the file.
    assert_eq!(cfg.static_root, PathBuf::from("/srv/www"));

    unsafe {
        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var("STATIC_ROOT");
    }
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server_name, "TEST SERVER VALUE");
    assert_eq!(cfg.read_timeout().as_millis(), 5000);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("static_root: public\nread_timeout_ms: 250\n").unwrap();
    assert_eq!(cfg.static_root, PathBuf::from("public"));
    assert_eq!(cfg.read_timeout_ms, 250);
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_empty_yaml() {
    let cfg = Config::from_yaml_str("").unwrap();
    assert_eq!(cfg.server_name, "TEST SERVER VALUE");
}

#[test]
fn test_config_invalid_yaml() {
    assert!(Config::from_yaml_str("read_timeout_ms: soon").is_err());
}

#[test]
fn test_config_missing_file() {
    assert!(Config::from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}

#[test]
fn test_config_rejects_zero_timeouts() {
    assert!(Config::from_yaml_str("read_timeout_ms: 0").is_err());
    assert!(Config::from_yaml_str("write_timeout_ms: 0").is_err());

    let cfg = Config {
        read_timeout_ms: 0,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_write_and_shutdown_timeouts() {
    let cfg = Config::from_yaml_str("write_timeout_ms: 750\nshutdown_grace_ms: 0\n").unwrap();
    assert_eq!(cfg.write_timeout().as_millis(), 750);
    assert_eq!(cfg.shutdown_grace().as_millis(), 0);
    assert_eq!(cfg.read_timeout().as_millis(), 5000);
}
