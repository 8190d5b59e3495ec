use std::path::Path;

use crate::assets::{
    ImageCrateEncoder, OptimizedImage, RasterEncoder, decode_payload, optimize_image_with,
};
use crate::foundation::core::Anchor;
use crate::foundation::error::{VttError, VttResult};
use crate::items::{Primitive, StoreItem, build_doors, build_walls};
use crate::normalize::{CanonicalGeometry, normalize};
use crate::pipeline::options::ImportOptions;
use crate::schema::{SchemaKind, SourceDocument, parse_document, strip_image};
use crate::store::{
    GridType, ImageUpload, Notifier, SceneBundle, SceneStore, Severity, emit_in_batches,
};

/// Extensions VTT exports usually carry. Content decides, not the name.
pub const KNOWN_EXTENSIONS: [&str; 3] = ["uvtt", "dd2vtt", "json"];

pub const BASE_MAP_NAME: &str = "Imported Map";

/// What an import run produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImportReport {
    pub kind: SchemaKind,
    pub walls: usize,
    pub doors: usize,
    /// Batch submissions; 0 for scene creation.
    pub batches: usize,
    pub image: Option<ImageReport>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImageReport {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub quality: Option<u8>,
    pub within_budget: bool,
}

/// Runs the two import flows against a scene store.
///
/// All user notifications are issued here; the stages it calls only return
/// values or errors.
pub struct Importer<'a> {
    store: &'a mut dyn SceneStore,
    notifier: &'a dyn Notifier,
    encoder: &'a dyn RasterEncoder,
    opts: ImportOptions,
}

impl<'a> Importer<'a> {
    pub fn new(
        store: &'a mut dyn SceneStore,
        notifier: &'a dyn Notifier,
        opts: ImportOptions,
    ) -> Self {
        Self {
            store,
            notifier,
            encoder: &ImageCrateEncoder,
            opts,
        }
    }

    pub fn with_encoder(mut self, encoder: &'a dyn RasterEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Create a new scene from a UVTT document with an embedded map image.
    #[tracing::instrument(skip(self, bytes), fields(input_len = bytes.len()))]
    pub fn create_scene(&mut self, file_name: &str, bytes: &[u8]) -> VttResult<ImportReport> {
        let res = self.run_create_scene(file_name, bytes);
        self.surface("Error creating scene", res)
    }

    /// Add walls and doors from either schema to the current scene.
    #[tracing::instrument(skip(self, bytes), fields(input_len = bytes.len()))]
    pub fn add_to_scene(&mut self, file_name: &str, bytes: &[u8]) -> VttResult<ImportReport> {
        let res = self.run_add_to_scene(file_name, bytes);
        self.surface("Error adding to scene", res)
    }

    fn run_create_scene(&mut self, file_name: &str, bytes: &[u8]) -> VttResult<ImportReport> {
        self.opts.validate()?;
        check_extension(file_name);

        let doc = match SourceDocument::from_value(parse_document(bytes)?)? {
            SourceDocument::Legacy(_) => {
                return Err(VttError::unsupported_for_scene(
                    "FoundryVTT files do not contain map images; add their walls to an existing scene instead",
                ));
            }
            SourceDocument::Canonical(doc) => doc,
        };
        if doc.image_payload().is_none() {
            return Err(VttError::unsupported_for_scene(
                "no map image found in the file; a map image is required to create a new scene",
            ));
        }

        let normalized = normalize(SourceDocument::Canonical(doc), self.opts.normalize_opts())?;
        let image = normalized.image.ok_or_else(|| {
            VttError::unsupported_for_scene("map image was lost during normalization")
        })?;
        let geometry = normalized.geometry;
        let density = self.density()?;

        self.notify("Importing scene (map and items)...", Severity::Info);

        let raw = decode_payload(&image)?;
        drop(image);
        let optimized = optimize_image_with(&raw, self.opts.compression, self.encoder)?;
        drop(raw);
        if optimized.attempts > 0 {
            self.notify(&compression_message(&optimized), Severity::Info);
        }

        let (walls, doors) = self.build_items(&geometry, density, Anchor::IDENTITY);
        let (wall_count, door_count) = (walls.len(), doors.len());
        let file_name_out = format!("map.{}", optimized.kind.extension());
        let image_report = ImageReport {
            file_name: file_name_out.clone(),
            width: optimized.width,
            height: optimized.height,
            bytes: optimized.bytes.len(),
            quality: optimized.quality,
            within_budget: optimized.within_budget,
        };

        let bundle = SceneBundle {
            name: scene_name(file_name),
            grid_type: GridType::Square,
            base_map: ImageUpload {
                name: BASE_MAP_NAME.to_string(),
                dpi: geometry.resolution.pixels_per_grid,
                file_name: file_name_out,
                mime: optimized.kind.mime().to_string(),
                width: optimized.width,
                height: optimized.height,
                bytes: optimized.bytes,
            },
            items: walls.into_iter().chain(doors).collect(),
        };
        tracing::info!(
            scene = %bundle.name,
            items = bundle.items.len(),
            "uploading scene"
        );
        self.store.submit_scene(bundle)?;
        self.notify("Scene imported!", Severity::Success);

        Ok(ImportReport {
            kind: SchemaKind::Canonical,
            walls: wall_count,
            doors: door_count,
            batches: 0,
            image: Some(image_report),
        })
    }

    fn run_add_to_scene(&mut self, file_name: &str, bytes: &[u8]) -> VttResult<ImportReport> {
        self.opts.validate()?;
        if !self.store.is_ready()? {
            return Err(VttError::SceneNotReady);
        }
        check_extension(file_name);

        let mut value = parse_document(bytes)?;
        if strip_image(&mut value) {
            tracing::debug!("dropped embedded map image");
        }
        let doc = SourceDocument::from_value(value)?;
        let kind = doc.kind();
        tracing::info!(?kind, "detected format");

        let geometry = normalize(doc, self.opts.normalize_opts())?.geometry;
        let anchor = if self.opts.anchor_from_selection {
            self.store.selection_anchor()?.unwrap_or_default()
        } else {
            Anchor::IDENTITY
        };
        let density = self.density()?;

        let (walls, doors) = self.build_items(&geometry, density, anchor);
        let batch_size = self.opts.batch_size;
        let mut batches = emit_in_batches(&mut *self.store, &walls, batch_size)?;
        batches += emit_in_batches(&mut *self.store, &doors, batch_size)?;

        self.store.set_fog_filled(true)?;
        self.notify("Import complete!", Severity::Success);

        Ok(ImportReport {
            kind,
            walls: walls.len(),
            doors: doors.len(),
            batches,
            image: None,
        })
    }

    fn density(&self) -> VttResult<f64> {
        let density = self.store.pixel_density()?;
        if !density.is_finite() || density <= 0.0 {
            return Err(VttError::validation(format!(
                "scene pixel density must be > 0, got {density}"
            )));
        }
        Ok(density)
    }

    fn build_items(
        &self,
        geometry: &CanonicalGeometry,
        density: f64,
        anchor: Anchor,
    ) -> (Vec<StoreItem>, Vec<StoreItem>) {
        let prefix = self.opts.run_id_prefix();
        tracing::debug!(%prefix, "item id prefix");
        let to_items = |prims: Vec<Primitive>, kind: &str| -> Vec<StoreItem> {
            prims
                .iter()
                .enumerate()
                .map(|(i, p)| p.to_store_item(format!("{prefix}-{kind}-{i}")))
                .collect()
        };
        (
            to_items(build_walls(geometry, density, anchor), "wall"),
            to_items(build_doors(geometry, density, anchor), "door"),
        )
    }

    fn surface<T>(&self, context: &str, res: VttResult<T>) -> VttResult<T> {
        if let Err(e) = &res {
            tracing::error!(error = %e, "{context}");
            self.notify(&format!("{context}: {e}"), Severity::Error);
        }
        res
    }

    fn notify(&self, message: &str, severity: Severity) {
        if let Err(e) = self.notifier.notify(message, severity) {
            tracing::warn!(error = %e, msg = message, "notification failed");
        }
    }
}

fn compression_message(img: &OptimizedImage) -> String {
    match img.quality {
        Some(q) => format!("Image compressed: {q}% quality ({:.2}MB)", img.size_mb()),
        None => format!("Image re-encoded losslessly ({:.2}MB)", img.size_mb()),
    }
}

/// File name without directories and without its last extension.
pub fn scene_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

fn check_extension(file_name: &str) {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let known = ext
        .as_deref()
        .is_some_and(|e| KNOWN_EXTENSIONS.contains(&e));
    if !known {
        tracing::warn!(file_name, "unexpected file extension; reading content anyway");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/importer.rs"]
mod tests;
