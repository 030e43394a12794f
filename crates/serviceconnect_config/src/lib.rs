use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for environment overrides, e.g. `SERVICECONNECT__SERVER__PORT`.
pub const ENV_PREFIX: &str = "SERVICECONNECT";

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `<CONFIG_DIR>/default.{toml,yaml,json}`
/// 2. `<CONFIG_DIR>/<RUN_ENV>.{toml,yaml,json}`
/// 3. `SERVICECONNECT__*` environment variables
///
/// `CONFIG_DIR` defaults to `config`, `RUN_ENV` to `debug`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Same as [`load_config`] with an explicit directory and environment name.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "Loading config: default={}, env={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file into the process environment once.
///
/// The path defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// A missing file is not an error. Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};

    // Tests reading the process environment must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "serviceconnect-config-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let _guard = env_lock();
        let dir = env::temp_dir().join("serviceconnect-config-does-not-exist");
        let config = load_config_from(&dir, "test").unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(!config.use_booking);
        assert_eq!(config.slot_step_minutes(), DEFAULT_SLOT_STEP_MINUTES);
        assert_eq!(config.log_level(), "info");
        assert!(config.seed_path().is_none());
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let _guard = env_lock();
        let dir = scratch_dir("layered");
        fs::write(
            dir.join("default.toml"),
            "use_booking = false\n[server]\nhost = \"0.0.0.0\"\nport = 3000\n",
        )
        .unwrap();
        fs::write(
            dir.join("staging.toml"),
            "use_booking = true\n[availability]\nslot_step_minutes = 15\n",
        )
        .unwrap();

        let config = load_config_from(&dir, "staging").unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.use_booking);
        assert_eq!(config.slot_step_minutes(), 15);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_slot_step_is_rejected() {
        let _guard = env_lock();
        let dir = scratch_dir("zero-step");
        fs::write(
            dir.join("default.toml"),
            "[availability]\nslot_step_minutes = 0\n",
        )
        .unwrap();

        let result = load_config_from(&dir, "debug");
        assert!(result.is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_environment_variables_override_files() {
        let _guard = env_lock();
        let dir = scratch_dir("env-override");
        fs::write(
            dir.join("default.toml"),
            "[server]\nhost = \"127.0.0.1\"\nport = 3000\n[availability]\nslot_step_minutes = 45\n",
        )
        .unwrap();

        env::set_var("SERVICECONNECT__AVAILABILITY__SLOT_STEP_MINUTES", "15");
        env::set_var("SERVICECONNECT__SERVER__PORT", "9100");
        let result = load_config_from(&dir, "debug");
        env::remove_var("SERVICECONNECT__AVAILABILITY__SLOT_STEP_MINUTES");
        env::remove_var("SERVICECONNECT__SERVER__PORT");

        let config = result.unwrap();
        assert_eq!(config.slot_step_minutes(), 15);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_reads_config_dir_run_env_and_dotenv() {
        let _guard = env_lock();
        let dir = scratch_dir("load-config");
        fs::write(dir.join("default.toml"), "[server]\nhost = \"0.0.0.0\"\nport = 4000\n").unwrap();
        fs::write(dir.join("ci.toml"), "use_booking = true\n").unwrap();
        let dotenv_file = dir.join("ci.env");
        fs::write(&dotenv_file, "SERVICECONNECT__LOGGING__LEVEL=warn\n").unwrap();

        env::set_var("CONFIG_DIR", &dir);
        env::set_var("RUN_ENV", "ci");
        env::set_var("DOTENV_OVERRIDE", &dotenv_file);
        let result = load_config();
        let dotenv_path = ensure_dotenv_loaded();
        for key in [
            "CONFIG_DIR",
            "RUN_ENV",
            "DOTENV_OVERRIDE",
            "SERVICECONNECT__LOGGING__LEVEL",
        ] {
            env::remove_var(key);
        }

        let config = result.unwrap();
        assert_eq!(dotenv_path, dotenv_file.to_string_lossy());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 4000);
        assert!(config.use_booking);
        assert_eq!(config.log_level(), "warn");

        fs::remove_dir_all(&dir).ok();
    }
}
