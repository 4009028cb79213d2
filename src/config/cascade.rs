use crate::config::parser::parse_config_file;
use crate::config::types::{DelimiterOverrides, LoadedConfig, ResolvedConfig, ValueSource};
use crate::error::{Result, SubError};
use std::path::{Path, PathBuf};

/// File name looked up in each directory of the cascade.
pub const CONFIG_FILE_NAME: &str = ".cfnsub.toml";

/// Environment variable that, if truthy, skips the ~/.cfnsub.toml lookup.
pub const NO_USER_CONFIG_ENV_VAR: &str = "CFNSUB_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.cfnsub.toml`
/// 2. If found and `root = true`, stop walking upward
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.cfnsub.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = discover_project_configs(start_dir)?;

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Walk from `start_dir` to the filesystem root collecting `.cfnsub.toml` files.
pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			let is_root = config.root;
			tracing::debug!(path = %config_path.display(), root = is_root, "loaded config");

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if is_root {
				break;
			}
		}

		current_dir = dir.parent();
	}

	Ok(configs)
}

/// Load the user's ~/.cfnsub.toml if it exists and isn't disabled.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	if is_env_truthy(NO_USER_CONFIG_ENV_VAR) {
		return Ok(None);
	}

	let user_config_path = user_config_path()?;

	// Already part of the cascade when working below the home directory
	if existing_configs.iter().any(|c| c.path == user_config_path) {
		return Ok(None);
	}

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into the effective delimiters.
///
/// For each delimiter the first config in cascade order that sets it wins.
pub fn merge_configs(configs: &[LoadedConfig]) -> ResolvedConfig {
	let mut resolved = ResolvedConfig::default();
	let mut prefix_set = false;
	let mut suffix_set = false;

	for loaded in configs {
		if !prefix_set && let Some(ref prefix) = loaded.config.prefix {
			resolved.delimiters.prefix = prefix.clone();
			resolved.prefix_source = ValueSource::File(loaded.path.clone());
			prefix_set = true;
		}

		if !suffix_set && let Some(ref suffix) = loaded.config.suffix {
			resolved.delimiters.suffix = suffix.clone();
			resolved.suffix_source = ValueSource::File(loaded.path.clone());
			suffix_set = true;
		}
	}

	resolved
}

/// Discover, merge, apply overrides and validate.
///
/// Fails fast with `InvalidDelimiters` so that no traversal starts with an
/// unusable delimiter pair.
pub fn resolve_delimiters(
	start_dir: &Path,
	overrides: &DelimiterOverrides,
) -> Result<ResolvedConfig> {
	let configs = discover_configs(start_dir)?;
	let resolved = merge_configs(&configs).with_overrides(overrides);
	resolved.delimiters.validate()?;
	Ok(resolved)
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(SubError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
