// ABOUTME: Config scaffolding for new backup directories.
// ABOUTME: Creates a commented wocker.yml listing every setting and its default.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, generate_template_yaml(&Config::default()))?;
    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# Directory archives are written to (overridden by --output)
archive_dir: {}

# Engine socket; detected automatically when omitted
# runtime:
#   runtime: docker   # or podman
#   socket: /var/run/docker.sock

images:
  extension: {}

volumes:
  extension: {}
  # Image providing tar for backup/restore helper containers
  helper_image: {}

# What a save batch does after a failed item: abort or continue
on_save_error: abort

connect_timeout: {}
"#,
        config.archive_dir.display(),
        config.images.extension,
        config.volumes.extension,
        config.volumes.helper_image,
        humantime_serde::re::humantime::format_duration(config.connect_timeout),
    )
}
