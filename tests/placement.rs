use blueprint_planes::host::SceneHost;
use blueprint_planes::scene_graph::MemoryScene;
use blueprint_planes::{
    AxisRemap, BlueprintConfig, PlacementEngine, StatusKind, ViewDirection, ViewSlots,
    COLLECTION_NAME,
};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_image(path: &Path) {
    RgbImage::new(4, 4).save(path).expect("save fixture image");
}

fn canonical_dir(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().canonicalize().expect("canonicalize temp dir")
}

fn config_for(main_image: PathBuf) -> BlueprintConfig {
    BlueprintConfig {
        main_image,
        remap: AxisRemap { swap_xy: false, switch_x: false, switch_y: false },
        ..BlueprintConfig::default()
    }
}

#[test]
fn partial_set_fills_exactly_the_matching_slots() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));
    write_image(&root.join("house_top.jpg"));
    write_image(&root.join("house_right.bmp"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let report = engine.run_full_placement(&mut scene, &config_for(root.join("house_front.png")));

    let slots = engine.slots();
    assert_eq!(slots.front.as_deref(), Some(root.join("house_front.png").as_path()));
    assert_eq!(slots.top.as_deref(), Some(root.join("house_top.jpg").as_path()));
    assert_eq!(slots.right.as_deref(), Some(root.join("house_right.bmp").as_path()));
    assert!(slots.left.is_none());
    assert!(slots.back.is_none());
    assert!(slots.bottom.is_none());

    assert_eq!(scene.empty_count(), 3);
    for name in ["house_front", "house_top", "house_right"] {
        assert!(scene.find_empty(name).is_some(), "empty '{name}' should exist");
    }
    assert_eq!(report.placed.len(), 3);
    assert!(!report.has_errors());
}

#[test]
fn trigger_with_suffix_lands_in_its_own_slot() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("tower_bottom.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.run_full_placement(&mut scene, &config_for(root.join("tower_bottom.png")));

    assert_eq!(engine.slots().bottom.as_deref(), Some(root.join("tower_bottom.png").as_path()));
    assert!(engine.slots().front.is_none());
    let rotation = scene
        .empty(scene.find_empty("tower_bottom").expect("bottom empty"))
        .expect("object data")
        .rotation;
    assert!((rotation.x - ViewDirection::Bottom.rotation_euler().x).abs() < f32::EPSILON);
}

#[test]
fn swap_xy_reorients_without_moving_slots_or_names() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let mut config = config_for(root.join("house_front.png"));
    config.remap.swap_xy = true;
    engine.run_full_placement(&mut scene, &config);

    // The image stays in the front slot under its own name; only the
    // orientation comes from the remapped view.
    assert_eq!(engine.slots().front.as_deref(), Some(root.join("house_front.png").as_path()));
    let object = scene.empty(scene.find_empty("house_front").expect("front empty")).expect("object");
    let expected = ViewDirection::Right.rotation_euler();
    assert!((object.rotation.x - expected.x).abs() < f32::EPSILON);
    assert!((object.rotation.z - expected.z).abs() < f32::EPSILON);
}

#[test]
fn missing_trigger_leaves_state_untouched_with_one_diagnostic() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);

    let mut prior = ViewSlots::default();
    prior.set(ViewDirection::Top, root.join("earlier_top.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.restore_slots(prior.clone());
    let report = engine.run_full_placement(&mut scene, &config_for(root.join("ghost_front.png")));

    assert_eq!(engine.slots(), &prior);
    assert_eq!(scene.empty_count(), 0);
    assert_eq!(report.messages.len(), 1);
    assert_eq!(report.messages[0].kind, StatusKind::Error);
    assert!(report.placed.is_empty());
}

#[test]
fn empty_main_image_aborts_without_placement() {
    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let report = engine.run_full_placement(&mut scene, &BlueprintConfig::default());

    assert_eq!(scene.empty_count(), 0);
    assert_eq!(report.messages.len(), 1);
    assert_eq!(report.messages[0].kind, StatusKind::Warning);
}

#[test]
fn rerun_with_identical_inputs_converges() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));
    write_image(&root.join("house_left.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let config = config_for(root.join("house_front.png"));
    engine.run_full_placement(&mut scene, &config);
    let first_rotation =
        scene.empty(scene.find_empty("house_left").expect("left empty")).expect("object").rotation;

    engine.run_full_placement(&mut scene, &config);

    assert_eq!(scene.empty_count(), 2);
    for name in ["house_front", "house_left"] {
        assert!(scene.find_empty(name).is_some(), "empty '{name}' should survive re-run");
    }
    let second_rotation =
        scene.empty(scene.find_empty("house_left").expect("left empty")).expect("object").rotation;
    assert_eq!(first_rotation, second_rotation);
    // The image cache hands out one asset per path across runs.
    assert_eq!(scene.image_count(), 2);
}

#[test]
fn unsuffixed_trigger_probes_all_views_but_claims_no_slot() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house.png"));
    write_image(&root.join("house_front.png"));
    write_image(&root.join("house_back.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.run_full_placement(&mut scene, &config_for(root.join("house.png")));

    assert_eq!(engine.slots().front.as_deref(), Some(root.join("house_front.png").as_path()));
    assert_eq!(engine.slots().back.as_deref(), Some(root.join("house_back.png").as_path()));
    assert!(scene.find_empty("house").is_none());
    assert_eq!(scene.empty_count(), 2);
}

#[test]
fn unreadable_sibling_is_skipped_and_reported() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));
    fs::write(root.join("house_top.png"), b"not an image").expect("write corrupt sibling");

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    let report = engine.run_full_placement(&mut scene, &config_for(root.join("house_front.png")));

    // The slot is assigned (the file exists) but no object is created for it.
    assert!(engine.slots().top.is_some());
    assert_eq!(scene.empty_count(), 1);
    assert_eq!(report.placed, vec![ViewDirection::Front]);
    assert!(report.messages.iter().any(|status| status.kind == StatusKind::Warning));
    assert!(!report.has_errors());
}

#[test]
fn new_base_keeps_prior_objects_unless_clear_previous() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));
    write_image(&root.join("tower_front.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.run_full_placement(&mut scene, &config_for(root.join("house_front.png")));
    engine.run_full_placement(&mut scene, &config_for(root.join("tower_front.png")));

    // Default behavior: the unrelated earlier set stays in the scene.
    assert!(scene.find_empty("house_front").is_some());
    assert!(scene.find_empty("tower_front").is_some());
    assert_eq!(scene.empty_count(), 2);
}

#[test]
fn clear_previous_removes_the_prior_set() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));
    write_image(&root.join("tower_front.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.run_full_placement(&mut scene, &config_for(root.join("house_front.png")));
    let mut next = config_for(root.join("tower_front.png"));
    next.clear_previous = true;
    engine.run_full_placement(&mut scene, &next);

    assert!(scene.find_empty("house_front").is_none());
    assert!(scene.find_empty("tower_front").is_some());
    assert_eq!(scene.empty_count(), 1);
}

#[test]
fn rejected_attribute_leaves_object_placed_with_the_rest_applied() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));

    let mut scene = MemoryScene::new();
    scene.deny_attribute("opacity");
    let mut engine = PlacementEngine::new();
    let mut config = config_for(root.join("house_front.png"));
    config.display.use_opacity = true;
    config.display.opacity = 0.25;
    let report = engine.run_full_placement(&mut scene, &config);

    // The rejected opacity stays at the host default; everything else lands.
    let object = scene.empty(scene.find_empty("house_front").expect("front empty")).expect("object");
    assert_eq!(object.opacity, 1.0);
    assert!(!object.show_perspective);
    assert!(report
        .messages
        .iter()
        .any(|status| status.kind == StatusKind::Warning && status.message.contains("opacity")));
    assert_eq!(report.placed, vec![ViewDirection::Front]);
}

#[test]
fn placed_objects_join_the_blueprints_collection() {
    let dir = tempdir().expect("temp dir");
    let root = canonical_dir(&dir);
    write_image(&root.join("house_front.png"));

    let mut scene = MemoryScene::new();
    let mut engine = PlacementEngine::new();
    engine.run_full_placement(&mut scene, &config_for(root.join("house_front.png")));

    let object = scene.empty(scene.find_empty("house_front").expect("front empty")).expect("object");
    assert_eq!(scene.collection_name(object.collection), Some(COLLECTION_NAME));
    assert_eq!(object.position, glam::Vec3::ZERO);
    let asset = scene.image(object.image.expect("image attached")).expect("asset");
    assert_eq!((asset.width, asset.height), (4, 4));
}
