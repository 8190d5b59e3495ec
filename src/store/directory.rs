use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;

use crate::foundation::core::Anchor;
use crate::foundation::error::{VttError, VttResult};
use crate::items::StoreItem;
use crate::store::SceneStore;
use crate::store::bundle::SceneBundle;

pub const ITEMS_FILE: &str = "items.jsonl";
pub const SCENE_FILE: &str = "scene.json";
pub const FOG_FILE: &str = "fog.json";

/// File-backed store: items append to `items.jsonl`, scenes land as
/// `scene.json` next to their base map image.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    density: f64,
    anchor: Option<Anchor>,
}

impl DirectoryStore {
    pub fn create(root: impl Into<PathBuf>, density: f64) -> VttResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create output dir '{}'", root.display()))?;
        Ok(Self {
            root,
            density,
            anchor: None,
        })
    }

    pub fn with_anchor(mut self, anchor: Option<Anchor>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join(ITEMS_FILE)
    }

    pub fn scene_path(&self) -> PathBuf {
        self.root.join(SCENE_FILE)
    }

    fn write_file(&self, name: &str, bytes: &[u8]) -> VttResult<PathBuf> {
        let path = self.root.join(name);
        std::fs::write(&path, bytes)
            .map_err(|e| VttError::transport(format!("write '{}': {e}", path.display())))?;
        Ok(path)
    }
}

impl SceneStore for DirectoryStore {
    fn is_ready(&self) -> VttResult<bool> {
        Ok(self.root.is_dir())
    }

    fn pixel_density(&self) -> VttResult<f64> {
        Ok(self.density)
    }

    fn selection_anchor(&self) -> VttResult<Option<Anchor>> {
        Ok(self.anchor)
    }

    fn submit_batch(&mut self, items: &[StoreItem]) -> VttResult<()> {
        let path = self.items_path();
        let transport = |e: &dyn std::fmt::Display| {
            VttError::transport(format!("append to '{}': {e}", path.display()))
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| transport(&e))?;
        let mut w = BufWriter::new(file);
        for item in items {
            serde_json::to_writer(&mut w, item).map_err(|e| transport(&e))?;
            w.write_all(b"\n").map_err(|e| transport(&e))?;
        }
        w.flush().map_err(|e| transport(&e))?;
        Ok(())
    }

    fn submit_scene(&mut self, bundle: SceneBundle) -> VttResult<()> {
        self.write_file(&bundle.base_map.file_name, &bundle.base_map.bytes)?;
        let path = self.scene_path();
        let transport = |e: &dyn std::fmt::Display| {
            VttError::transport(format!("write '{}': {e}", path.display()))
        };
        let f = File::create(&path).map_err(|e| transport(&e))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &bundle).map_err(|e| transport(&e))?;
        w.flush().map_err(|e| transport(&e))?;
        Ok(())
    }

    fn set_fog_filled(&mut self, filled: bool) -> VttResult<()> {
        let body = serde_json::to_vec_pretty(&serde_json::json!({ "filled": filled }))?;
        self.write_file(FOG_FILE, &body)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/directory.rs"]
mod tests;
