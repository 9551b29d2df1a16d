use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use kidori::io::ext_repr::ExtDiagram;
use log::{debug, info};

use crate::io;

/// Characters which are not allowed in diagram file names
const FORBIDDEN_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', '|', '"', '<', '>', ':'];

/// A folder of named diagrams, one `<name>.json` file per diagram.
#[derive(Debug, Clone)]
pub struct DiagramStore {
    folder: PathBuf,
    pretty_json: bool,
}

impl DiagramStore {
    /// Opens the store in `folder`, creating the folder if it does not exist yet.
    pub fn open(folder: &Path, pretty_json: bool) -> Result<Self> {
        if !folder.exists() {
            fs::create_dir_all(folder)
                .with_context(|| format!("could not create diagram folder: {}", folder.display()))?;
            debug!("[STORE] created diagram folder {}", folder.display());
        }
        Ok(DiagramStore {
            folder: folder.to_path_buf(),
            pretty_json,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Saves the diagram under its (sanitized) name, replacing any diagram with the same name.
    pub fn save(&self, diagram: &ExtDiagram) -> Result<PathBuf> {
        let path = self.path_of(&diagram.name)?;
        io::write_json(diagram, &path, self.pretty_json)?;
        info!("[STORE] saved diagram {:?}", diagram.name);
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<ExtDiagram> {
        let path = self.path_of(name)?;
        ensure!(path.exists(), "no diagram named {name:?} in {}", self.folder.display());
        io::read_json(&path)
    }

    /// Names of all saved diagrams, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.folder)
            .with_context(|| format!("could not read diagram folder: {}", self.folder.display()))?;
        let mut names = vec![];
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names.into_iter().sorted().collect_vec())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_of(name)?;
        ensure!(path.exists(), "no diagram named {name:?} in {}", self.folder.display());
        fs::remove_file(&path).with_context(|| format!("could not delete {}", path.display()))?;
        info!("[STORE] deleted diagram {name:?}");
        Ok(())
    }

    fn path_of(&self, name: &str) -> Result<PathBuf> {
        let file_name = sanitize_name(name);
        ensure!(!file_name.trim().is_empty(), "diagram name should not be empty");
        Ok(self.folder.join(format!("{file_name}.json")))
    }
}

/// Replaces every character not allowed in a file name with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match FORBIDDEN_CHARS.contains(&c) {
            true => '_',
            false => c,
        })
        .collect()
}
