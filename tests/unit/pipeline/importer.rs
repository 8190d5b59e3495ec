use std::cell::RefCell;
use std::io::Cursor;

use base64::Engine as _;
use serde_json::json;

use super::*;
use crate::assets::{CompressionMode, ImageKind};
use crate::foundation::core::{Point, Vec2};
use crate::items::COMMAND_MOVE;
use crate::store::InMemoryStore;

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<(String, Severity)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) -> VttResult<()> {
        self.seen.borrow_mut().push((message.to_string(), severity));
        Ok(())
    }
}

struct BrokenNotifier;

impl Notifier for BrokenNotifier {
    fn notify(&self, _message: &str, _severity: Severity) -> VttResult<()> {
        Err(VttError::transport("ui detached"))
    }
}

fn png_base64() -> String {
    let img = image::RgbaImage::from_pixel(6, 4, image::Rgba([40, 80, 120, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf)
}

fn uvtt(image: Option<String>) -> Vec<u8> {
    let mut v = json!({
        "format": 0.3,
        "resolution": {
            "map_origin": { "x": 0, "y": 0 },
            "map_size": { "x": 6, "y": 4 },
            "pixels_per_grid": 1
        },
        "line_of_sight": [
            [{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 1, "y": 1 }]
        ],
        "objects_line_of_sight": [],
        "portals": [
            { "bounds": [{ "x": 2, "y": 0 }, { "x": 2, "y": 1 }], "closed": true }
        ]
    });
    if let Some(image) = image {
        v["image"] = json!(image);
    }
    serde_json::to_vec(&v).unwrap()
}

fn foundry(n_walls: usize) -> Vec<u8> {
    let walls: Vec<_> = (0..n_walls)
        .map(|i| {
            let x = (i * 100) as f64;
            let door = if i % 10 == 9 { 1 } else { 0 };
            json!({ "c": [x, 100, x + 100.0, 100], "door": door })
        })
        .collect();
    serde_json::to_vec(&json!({
        "name": "Keep",
        "width": 4000,
        "height": 3000,
        "grid": 100,
        "gridDistance": 5,
        "walls": walls
    }))
    .unwrap()
}

#[test]
fn add_legacy_scenario_at_density_50() {
    let mut store = InMemoryStore::new(50.0);
    let notifier = RecordingNotifier::default();
    let bytes = serde_json::to_vec(&json!({
        "grid": 100,
        "gridDistance": 5,
        "width": 1000,
        "height": 1000,
        "walls": [{ "c": [100, 100, 200, 100], "door": 0 }]
    }))
    .unwrap();

    let report = Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("cellar.json", &bytes)
        .unwrap();

    assert_eq!(report.kind, SchemaKind::Legacy);
    assert_eq!((report.walls, report.doors, report.batches), (1, 0, 1));
    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].commands[0].0, COMMAND_MOVE);
    assert_eq!((items[0].commands[0].1, items[0].commands[0].2), (50.0, 50.0));
    assert_eq!((items[0].commands[1].1, items[0].commands[1].2), (100.0, 50.0));
    assert_eq!(store.fog_filled(), Some(true));
    assert_eq!(
        notifier.seen.borrow().last(),
        Some(&("Import complete!".to_string(), Severity::Success))
    );
}

#[test]
fn add_emits_walls_then_doors_in_bounded_batches() {
    let mut store = InMemoryStore::new(70.0);
    let notifier = RecordingNotifier::default();
    let opts = ImportOptions {
        id_prefix: Some("vtt".to_string()),
        ..ImportOptions::default()
    };
    let report = Importer::new(&mut store, &notifier, opts)
        .add_to_scene("keep.json", &foundry(120))
        .unwrap();

    // 108 walls -> 3 batches, 12 doors -> 1 batch.
    assert_eq!((report.walls, report.doors), (108, 12));
    assert_eq!(report.batches, 4);
    let sizes: Vec<usize> = store.batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![50, 50, 8, 12]);
    let names: Vec<&str> = store.items().iter().map(|i| i.name.as_str()).collect();
    assert!(names[..108].iter().all(|n| *n == "Wall"));
    assert!(names[108..].iter().all(|n| *n == "Door"));
    assert_eq!(store.items()[0].id, "vtt-wall-0");
    assert_eq!(store.items()[108].id, "vtt-door-0");
}

#[test]
fn repeated_adds_into_one_scene_get_distinct_ids() {
    let mut store = InMemoryStore::new(70.0);
    let notifier = RecordingNotifier::default();
    Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("keep.json", &foundry(3))
        .unwrap();
    Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("cellar.json", &foundry(2))
        .unwrap();

    let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), 5);
    let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_ne!(ids[0], ids[3]);
}

#[test]
fn explicit_prefix_overrides_random_one() {
    let mut store = InMemoryStore::new(70.0);
    let notifier = RecordingNotifier::default();
    let opts = ImportOptions {
        id_prefix: Some("cellar".to_string()),
        ..ImportOptions::default()
    };
    Importer::new(&mut store, &notifier, opts)
        .add_to_scene("cellar.json", &foundry(2))
        .unwrap();
    let ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["cellar-wall-0", "cellar-wall-1"]);
}

#[test]
fn blank_prefix_is_rejected() {
    let opts = ImportOptions {
        id_prefix: Some("  ".to_string()),
        ..ImportOptions::default()
    };
    assert!(matches!(opts.validate(), Err(VttError::Validation(_))));
}

#[test]
fn add_drops_image_and_uses_selection_anchor_when_asked() {
    let anchor = Anchor::new(Point::new(10.0, 20.0), Vec2::new(2.0, 2.0));
    let mut store = InMemoryStore::new(10.0).with_anchor(anchor);
    let notifier = RecordingNotifier::default();
    let opts = ImportOptions {
        anchor_from_selection: true,
        ..ImportOptions::default()
    };
    Importer::new(&mut store, &notifier, opts)
        .add_to_scene("map.uvtt", &uvtt(Some("!!not base64!!".to_string())))
        .unwrap();

    let items = store.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].position, Point::new(10.0, 20.0));
    assert_eq!((items[0].commands[1].1, items[0].commands[1].2), (20.0, 0.0));
}

#[test]
fn add_ignores_selection_anchor_by_default() {
    let anchor = Anchor::new(Point::new(10.0, 20.0), Vec2::new(2.0, 2.0));
    let mut store = InMemoryStore::new(10.0).with_anchor(anchor);
    let notifier = RecordingNotifier::default();
    Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("map.uvtt", &uvtt(None))
        .unwrap();
    assert_eq!(store.items()[0].position, Point::ORIGIN);
}

#[test]
fn add_fails_when_scene_not_ready() {
    let mut store = InMemoryStore::default().with_ready(false);
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("map.uvtt", &uvtt(None))
        .unwrap_err();
    assert!(matches!(err, VttError::SceneNotReady));
    assert_eq!(store.submissions(), 0);
}

#[test]
fn add_rejects_unknown_format_with_one_error_notification() {
    let mut store = InMemoryStore::default();
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("notes.json", br#"{"hello": "world"}"#)
        .unwrap_err();
    assert!(matches!(err, VttError::UnsupportedFormat(_)));
    let seen = notifier.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, Severity::Error);
    assert!(seen[0].0.starts_with("Error adding to scene:"));
}

#[test]
fn add_keeps_committed_batches_when_a_later_one_fails() {
    let mut store = InMemoryStore::new(70.0).failing_on_batch(2);
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("keep.json", &foundry(120))
        .unwrap_err();
    assert!(matches!(err, VttError::Transport(_)));
    assert_eq!(store.batches().len(), 2);
    assert_eq!(store.fog_filled(), None);
}

#[test]
fn add_rejects_zero_density() {
    let mut store = InMemoryStore::new(0.0);
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .add_to_scene("map.uvtt", &uvtt(None))
        .unwrap_err();
    assert!(matches!(err, VttError::Validation(_)));
}

#[test]
fn create_scene_without_image_fails_before_touching_store() {
    let mut store = InMemoryStore::default();
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .create_scene("map.uvtt", &uvtt(None))
        .unwrap_err();
    assert!(matches!(err, VttError::UnsupportedForSceneCreation(_)));
    assert_eq!(store.submissions(), 0);
    assert!(store.scenes().is_empty());
}

#[test]
fn create_scene_rejects_legacy_documents() {
    let mut store = InMemoryStore::default();
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .create_scene("keep.json", &foundry(3))
        .unwrap_err();
    assert!(matches!(err, VttError::UnsupportedForSceneCreation(_)));
    assert_eq!(store.submissions(), 0);
}

#[test]
fn create_scene_uploads_single_bundle() {
    let mut store = InMemoryStore::new(70.0);
    let notifier = RecordingNotifier::default();
    let report = Importer::new(&mut store, &notifier, ImportOptions::default())
        .create_scene("dungeon.level1.uvtt", &uvtt(Some(png_base64())))
        .unwrap();

    assert_eq!((report.walls, report.doors, report.batches), (1, 1, 0));
    assert_eq!(store.scenes().len(), 1);
    assert!(store.batches().is_empty());

    let scene = &store.scenes()[0];
    assert_eq!(scene.name, "dungeon.level1");
    assert_eq!(scene.grid_type, GridType::Square);
    assert_eq!(scene.base_map.name, BASE_MAP_NAME);
    assert_eq!(scene.base_map.dpi, 1.0);
    assert_eq!(scene.base_map.file_name, "map.jpg");
    assert_eq!(scene.base_map.mime, ImageKind::Jpeg.mime());
    assert_eq!((scene.base_map.width, scene.base_map.height), (6, 4));
    assert_eq!(scene.items.len(), 2);
    assert_eq!(scene.items[0].name, "Wall");
    assert_eq!(scene.items[1].name, "Door");
    // density 70, unit anchor
    assert_eq!((scene.items[0].commands[2].1, scene.items[0].commands[2].2), (70.0, 70.0));

    let seen = notifier.seen.borrow();
    assert_eq!(seen[0].0, "Importing scene (map and items)...");
    assert!(seen[1].0.starts_with("Image compressed: 100% quality"));
}

#[test]
fn create_scene_none_mode_keeps_png() {
    let mut store = InMemoryStore::default();
    let notifier = RecordingNotifier::default();
    let opts = ImportOptions {
        compression: CompressionMode::None,
        ..ImportOptions::default()
    };
    Importer::new(&mut store, &notifier, opts)
        .create_scene("map.uvtt", &uvtt(Some(png_base64())))
        .unwrap();
    let base = &store.scenes()[0].base_map;
    assert_eq!(base.file_name, "map.png");
    assert_eq!(base.mime, "image/png");

    // Pass-through: no compression notice.
    let seen = notifier.seen.borrow();
    assert!(seen.iter().all(|(m, _)| !m.starts_with("Image compressed")));
    assert_eq!(seen.last().map(|(m, _)| m.as_str()), Some("Scene imported!"));
}

#[test]
fn create_scene_bad_image_is_decode_error() {
    let mut store = InMemoryStore::default();
    let notifier = RecordingNotifier::default();
    let err = Importer::new(&mut store, &notifier, ImportOptions::default())
        .create_scene("map.uvtt", &uvtt(Some("aGVsbG8gd29ybGQ=".to_string())))
        .unwrap_err();
    assert!(matches!(err, VttError::ImageDecode(_)));
    assert!(store.scenes().is_empty());
}

#[test]
fn notification_failures_do_not_mask_results() {
    let mut store = InMemoryStore::default();
    let ok = Importer::new(&mut store, &BrokenNotifier, ImportOptions::default())
        .add_to_scene("map.uvtt", &uvtt(None));
    assert!(ok.is_ok());

    let mut store = InMemoryStore::default();
    let err = Importer::new(&mut store, &BrokenNotifier, ImportOptions::default())
        .create_scene("map.uvtt", &uvtt(None))
        .unwrap_err();
    assert!(matches!(err, VttError::UnsupportedForSceneCreation(_)));
}

#[test]
fn scene_name_strips_directories_and_last_extension() {
    assert_eq!(scene_name("maps/cave.dd2vtt"), "cave");
    assert_eq!(scene_name("a.b.uvtt"), "a.b");
    assert_eq!(scene_name("plain"), "plain");
}
