use hr_records::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        env::remove_var("HR_PROFILE");
        env::remove_var("HR_API_BIND_ADDR");
        env::remove_var("HR_LOG_LEVEL");
        env::remove_var("HR_LOG_FORMAT");
        env::remove_var("HR_DATABASE_URL");
        env::remove_var("HR_DB_MAX_CONNECTIONS");
        env::remove_var("HR_DB_ACQUIRE_TIMEOUT_MS");
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:8080");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.database_url, "sqlite://hr_records.db?mode=rwc");
    assert_eq!(cfg.db_max_connections, 10);
    assert_eq!(cfg.db_acquire_timeout_ms, 5000);
    cfg.bind_addr().expect("default bind addr parses");
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "HR_API_BIND_ADDR=127.0.0.1:3000\n");
    write_env_file(
        &temp_dir,
        ".env.test",
        "HR_API_BIND_ADDR=192.168.0.10:5000\nHR_DB_MAX_CONNECTIONS=3\n",
    );
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "HR_API_BIND_ADDR=10.0.0.5:6000\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "HR_PROFILE=test\nHR_API_BIND_ADDR=127.0.0.1:4000\nHR_LOG_FORMAT=pretty\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.api_bind_addr, "10.0.0.5:6000");
    assert_eq!(cfg.log_format, "pretty");
    assert_eq!(cfg.db_max_connections, 3);
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "HR_API_BIND_ADDR=127.0.0.1:3000\nHR_DATABASE_URL=sqlite://from-file.db\n",
    );

    unsafe {
        env::set_var("HR_API_BIND_ADDR", "0.0.0.0:9090");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:9090");
    assert_eq!(cfg.database_url, "sqlite://from-file.db");

    clear_env();
}

#[test]
fn unprefixed_variables_are_ignored() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "API_BIND_ADDR=not-an-addr\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("unprefixed keys do not apply");
    assert_eq!(cfg.api_bind_addr, "0.0.0.0:8080");

    clear_env();
}

#[test]
fn invalid_bind_addr_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("HR_API_BIND_ADDR", "not-an-addr");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("invalid bind addr should fail");
    assert!(format!("{}", err).contains("invalid api bind address"));

    clear_env();
}

#[test]
fn unknown_log_format_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("HR_LOG_FORMAT", "xml");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("unknown log format should fail");
    assert!(matches!(err, ConfigError::InvalidLogFormat { .. }));

    clear_env();
}

#[test]
fn zero_pool_size_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("HR_DB_MAX_CONNECTIONS", "0");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("zero pool size should fail");
    assert!(matches!(
        err,
        ConfigError::InvalidDbMaxConnections { value: 0 }
    ));

    clear_env();
}
