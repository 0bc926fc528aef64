//! End-to-end graph construction against a real image directory.

use std::path::Path;

use slidecast_media::{
    build_graph, collect_images, render::build_render_command, GraphSettings, MediaError,
    RenderJob, TimingPlan, TimingPolicy,
};
use slidecast_models::{AudioTrack, EncodingConfig};

fn image_dir(count: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..count {
        std::fs::write(dir.path().join(format!("img_{i:03}.jpg")), b"jpg").unwrap();
    }
    dir
}

#[test]
fn builds_a_consistent_graph_from_a_directory() {
    let dir = image_dir(5);
    let images = collect_images(dir.path()).unwrap();
    let narration = AudioTrack::new("audio.wav");

    let plan = TimingPlan::build(46.0, images.len(), TimingPolicy::ExactFit).unwrap();
    assert_eq!(plan.durations(), vec![9.0, 9.0, 9.0, 9.0, 10.0]);

    let graph = build_graph(
        &images,
        &narration,
        None,
        &plan,
        &GraphSettings::default(),
        &EncodingConfig::default(),
    )
    .unwrap();

    graph.validate().unwrap();
    assert_eq!(graph.inputs.len(), 2 + images.len());

    let filter = graph.filter_complex();
    assert!(filter.contains("concat=n=5"));
    assert!(filter.ends_with("[aout]"));
}

#[test]
fn identical_inputs_produce_identical_render_commands() {
    let dir = image_dir(4);
    let images = collect_images(dir.path()).unwrap();
    let narration = AudioTrack::new("audio.wav");
    let bgm = AudioTrack::new("bgm.mp3");
    let plan = TimingPlan::build(60.0, images.len(), TimingPolicy::ExactFit).unwrap();
    let settings = GraphSettings::default();
    let encoding = EncodingConfig::default();

    let build = || {
        let graph = build_graph(&images, &narration, Some(&bgm), &plan, &settings, &encoding)
            .unwrap();
        let job = RenderJob::new(graph, "out/final.mp4", encoding.clone());
        build_render_command(&job).build_args()
    };

    assert_eq!(build(), build());
}

#[test]
fn empty_directory_never_reaches_the_render_driver() {
    let dir = tempfile::tempdir().unwrap();
    let err = collect_images(dir.path()).unwrap_err();
    assert!(matches!(err, MediaError::NoAssets(_)));

    let narration = AudioTrack::new("audio.wav");
    let plan = TimingPlan::build(45.0, 1, TimingPolicy::ExactFit).unwrap();
    let err = build_graph(
        &[],
        &narration,
        None,
        &plan,
        &GraphSettings::default(),
        &EncodingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MediaError::NoAssets(_)));
}

#[test]
fn graph_inputs_carry_planned_durations() {
    let dir = image_dir(3);
    let images = collect_images(dir.path()).unwrap();
    let narration = AudioTrack::new("audio.wav");
    let plan = TimingPlan::build(30.0, 3, TimingPolicy::ExactFit).unwrap();

    let graph = build_graph(
        &images,
        &narration,
        None,
        &plan,
        &GraphSettings::default(),
        &EncodingConfig::default(),
    )
    .unwrap();

    let job = RenderJob::new(graph, Path::new("out.mp4"), EncodingConfig::default());
    let args = build_render_command(&job).build_args();

    // Each image input is looped and held for its planned 10s slot.
    assert_eq!(args.iter().filter(|a| *a == "-loop").count(), 3);
    assert_eq!(args.iter().filter(|a| *a == "10.000").count(), 3);
}
