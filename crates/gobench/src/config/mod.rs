use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

/// Resolved once at startup and passed to whatever needs a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub cwd: PathBuf,
    pub home_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.to_string_lossy().to_string(),
        }
    }
}

pub fn resolve_runtime_config(cwd: &Path, home_dir: Option<&Path>) -> Result<RuntimeConfig> {
    if !cwd.is_absolute() {
        bail!("cwd must be absolute: {}", cwd.display());
    }
    if let Some(home_dir) = home_dir
        && !home_dir.is_absolute()
    {
        bail!("home_dir must be absolute: {}", home_dir.display());
    }

    Ok(RuntimeConfig {
        cwd: normalize_lexical(cwd),
        home_dir: home_dir.map(normalize_lexical),
    })
}

impl RuntimeConfig {
    /// Resolves a user-supplied input path; `-` selects stdin.
    pub fn resolve_input(&self, path: &Path) -> Result<InputSource> {
        if path == Path::new("-") {
            return Ok(InputSource::Stdin);
        }

        let expanded = self.expand_tilde(path)?;
        let resolved = if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        };

        Ok(InputSource::File(normalize_lexical(&resolved)))
    }

    fn expand_tilde(&self, path: &Path) -> Result<PathBuf> {
        let mut components = path.components();
        match components.next() {
            Some(Component::Normal(first)) if first == "~" => {
                let Some(home_dir) = &self.home_dir else {
                    bail!("HOME is not set; cannot expand {}", path.display());
                };
                let mut expanded = home_dir.clone();
                for component in components {
                    expanded.push(component.as_os_str());
                }
                Ok(expanded)
            }
            Some(Component::Normal(first))
                if first
                    .to_str()
                    .is_some_and(|segment| segment.starts_with('~')) =>
            {
                bail!(
                    "unsupported home expansion syntax (only `~` and `~/...` are supported): {}",
                    path.display()
                )
            }
            _ => Ok(path.to_path_buf()),
        }
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}
