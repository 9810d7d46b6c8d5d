use std::path::PathBuf;

use directories::UserDirs;
use miette::{miette, Result};


/// Returns the default configuration filepath, which is at
/// `~/SEAMM/seamm.ini`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let user_dirs =
        UserDirs::new().ok_or_else(|| miette!("Could not determine the user home directory."))?;

    Ok(user_dirs.home_dir().join("SEAMM").join("seamm.ini"))
}
