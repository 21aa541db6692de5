use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DB_ENV: &str = "MEALPLAN_DB";

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve paths: `--db` wins, then `MEALPLAN_DB`, then the platform data dir.
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "mealplan").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let env_path = std::env::var_os(DB_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let db_path = resolve_db_path(db_override, env_path, &data_dir);

        Ok(Config { db_path, data_dir })
    }

    /// Load the API key from disk, or generate a new one.
    ///
    /// Returns `(key, newly_created)` where `newly_created` is true when a
    /// fresh key was just generated (first run).
    pub fn load_or_create_api_key(&self) -> Result<(String, bool)> {
        load_or_create_api_key(&self.data_dir.join("api_key"))
    }
}

fn resolve_db_path(flag: Option<PathBuf>, env: Option<PathBuf>, data_dir: &Path) -> PathBuf {
    flag.or(env)
        .unwrap_or_else(|| data_dir.join("mealplan.db"))
}

fn load_or_create_api_key(path: &Path) -> Result<(String, bool)> {
    use rand::Rng;
    use std::fmt::Write;

    if path.exists() {
        let key = std::fs::read_to_string(path).context("Failed to read API key file")?;
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok((key, false));
        }
    }

    let bytes: [u8; 32] = rand::rng().random();
    let key = bytes
        .iter()
        .fold(String::with_capacity(64), |mut acc: String, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        });
    std::fs::write(path, &key).context("Failed to write API key file")?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .context("Failed to set API key file permissions")?;
    }
    eprintln!("Generated new API key: {key}");
    eprintln!("Include in requests: Authorization: Bearer {key}");
    Ok((key, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_precedence() {
        let data = Path::new("/data");
        assert_eq!(
            resolve_db_path(
                Some(PathBuf::from("/flag.db")),
                Some(PathBuf::from("/env.db")),
                data
            ),
            PathBuf::from("/flag.db")
        );
        assert_eq!(
            resolve_db_path(None, Some(PathBuf::from("/env.db")), data),
            PathBuf::from("/env.db")
        );
        assert_eq!(
            resolve_db_path(None, None, data),
            PathBuf::from("/data/mealplan.db")
        );
    }

    #[test]
    fn test_api_key_created_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");

        let (key, created) = load_or_create_api_key(&path).unwrap();
        assert!(created);
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));

        let (again, created) = load_or_create_api_key(&path).unwrap();
        assert!(!created);
        assert_eq!(again, key);
    }

    #[cfg(unix)]
    #[test]
    fn test_api_key_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        load_or_create_api_key(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
