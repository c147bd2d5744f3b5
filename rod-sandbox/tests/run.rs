use image::GenericImageView;
use rod_core::nalgebra::{Point2, Point3};
use rod_core::{Projection, Segment};
use rod_pinhole::ProjectionMatrix;
use rod_sandbox::{SandboxError, SandboxSettings, Summary};
use std::path::PathBuf;

fn scratch(test: &str) -> PathBuf {
    let directory =
        std::env::temp_dir().join(format!("rod-sandbox-{}-{}", test, std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    directory
}

/// Writes the images of a known rod seen by the default cameras.
fn write_observations(directory: &std::path::Path) -> (PathBuf, PathBuf, PathBuf) {
    let rod = Segment::new(Point3::new(-0.5, 0.0, 4.0), Point3::new(0.5, 0.2, 4.2));
    let settings = SandboxSettings::default();
    let times: Vec<f64> = (0..8).map(|i| i as f64 / 7.0).collect();
    let rows = |camera: ProjectionMatrix| {
        let image = camera.project_segment(rod).unwrap();
        times
            .iter()
            .map(|&t| {
                let point = image.interpolate(t);
                format!("{},{}\n", point.x, point.y)
            })
            .collect::<String>()
    };

    let camera = directory.join("points_2d_camera_1.csv");
    let second_camera = directory.join("points_2d_camera_2.csv");
    let inputs = directory.join("inputs.csv");
    std::fs::write(&camera, rows(settings.camera())).unwrap();
    std::fs::write(&second_camera, rows(settings.second_camera())).unwrap();
    let inputs_text: Vec<String> = times.iter().map(f64::to_string).collect();
    std::fs::write(&inputs, inputs_text.join("\n")).unwrap();
    (camera, second_camera, inputs)
}

#[test]
fn figures_and_summary() {
    let directory = scratch("figures");
    let (camera, second_camera, inputs) = write_observations(&directory);

    let points = rod_sandbox::read_points(&camera, ',').unwrap();
    let second_points = rod_sandbox::read_points(&second_camera, ',').unwrap();
    let times = rod_sandbox::read_inputs(&inputs).unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(times.len(), 8);
    approx::assert_relative_eq!(points[0], Point2::new(-0.125, 0.0));

    let mut settings = SandboxSettings::default();
    settings.sampler.iterations = 500;
    let chain = rod_sandbox::estimate(&settings, &times, &points).unwrap();
    assert_eq!(chain.len(), 500);
    let again = rod_sandbox::estimate(&settings, &times, &points).unwrap();
    assert_eq!(chain, again);

    let figures = directory.join("figures");
    let written = rod_sandbox::render_figures(
        &figures,
        "camera1",
        &settings,
        &chain,
        &points,
        Some(second_points.as_slice()),
    )
    .unwrap();
    let names: Vec<_> = written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "MH_camera1_Pi.png",
            "MH_camera1_Pf.png",
            "MH_camera1_MAP.png",
            "MH_camera1_cam2_perspective_MAP.png",
        ]
    );
    for path in &written {
        let image = image::open(path).unwrap();
        assert_eq!(
            image.dimensions(),
            (rod_sandbox::WIDTH, rod_sandbox::HEIGHT)
        );
    }

    let summary = Summary::new("camera1", &chain, settings.camera());
    assert_eq!(summary.iterations, 500);
    assert_eq!(summary.accepted, chain.accepted().len());
    assert_eq!(summary.map, chain.map());
    assert!(summary.projection.is_some());
    let path = directory.join("summary.json");
    summary.save(&path).unwrap();
    let loaded: Summary = serde_json::from_reader(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(loaded.name, "camera1");
    assert_eq!(loaded.accepted, summary.accepted);

    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn malformed_file_names_the_line() {
    let directory = scratch("malformed");
    let path = directory.join("points.csv");
    std::fs::write(&path, "0.0,0.0\n0.1;0.2\n").unwrap();
    match rod_sandbox::read_points(&path, ',') {
        Err(SandboxError::Parse { path: at, line, .. }) => {
            assert_eq!(at, path);
            assert_eq!(line, 2);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let result = rod_sandbox::read_inputs("this/file/does/not/exist.csv");
    assert!(matches!(result, Err(SandboxError::Io { .. })));
}

#[test]
fn settings_file_round_trip() {
    let directory = scratch("settings");
    let path = directory.join("settings.json");
    let mut settings = SandboxSettings::default();
    settings.sampler.seed = 7;
    settings.save(&path).unwrap();
    assert_eq!(SandboxSettings::load(&path).unwrap().sampler.seed, 7);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        SandboxSettings::load(&path),
        Err(SandboxError::Json(_))
    ));
    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn mismatched_files_fail_before_sampling() {
    let settings = SandboxSettings::default();
    let result = rod_sandbox::estimate(&settings, &[0.0, 1.0], &[Point2::origin()]);
    assert!(matches!(result, Err(SandboxError::Sampler(_))));
}
