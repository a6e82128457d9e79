use std::path::{Component, Path, PathBuf};

/// Renders a path for messages, absolute and normalised whenever possible.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        if let Ok(canonical) = self.canonicalize() {
            return canonical.display().to_string();
        }

        // Missing files cannot be canonicalised, resolve against the cwd instead
        let absolute = if self.is_absolute() {
            self.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(self))
                .unwrap_or_else(|_| self.to_path_buf())
        };

        normalize(&absolute).display().to_string()
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        self.as_path().best_effort_path_display()
    }
}

/// Drops `.` components and folds `..` into the preceding component.
fn normalize(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}
