use data_contracts::ClassRegistry;
use dataset_prep::numeric_universe;
use std::fs;
use std::path::{Path, PathBuf};
use training::{
    final_artifact, run_progressive, AugmentationFlags, DetectionTrainer, PipelineConfig,
    PipelineError, StageConfig, StageSchedule, TrainRequest, TrainingError,
};

/// Records every request and fabricates the weight file a real run would
/// leave behind. Optionally fails at a chosen stage.
struct RecordingTrainer {
    requests: Vec<TrainRequest>,
    fail_at_run: Option<String>,
}

impl RecordingTrainer {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            fail_at_run: None,
        }
    }

    fn failing_at(run_name: &str) -> Self {
        Self {
            requests: Vec::new(),
            fail_at_run: Some(run_name.to_string()),
        }
    }
}

impl DetectionTrainer for RecordingTrainer {
    fn train(&mut self, request: &TrainRequest) -> Result<(), TrainingError> {
        self.requests.push(request.clone());
        if self.fail_at_run.as_deref() == Some(request.run_name.as_str()) {
            return Err(TrainingError::MissingArtifact {
                path: request.project.join("never-written.pt"),
            });
        }
        let weights_dir = request.project.join(&request.run_name).join("weights");
        fs::create_dir_all(&weights_dir).expect("create weights dir");
        fs::write(weights_dir.join("last.pt"), b"weights").expect("write weights");
        Ok(())
    }
}

fn seed_source(dir: &Path) {
    for name in ["fw1.png", "fw1.txt", "fw2.png", "fw2.txt", "fw3.png", "fw3.txt"] {
        fs::write(dir.join(name), name.as_bytes()).expect("write fixture file");
    }
}

fn test_config(source: PathBuf, output: PathBuf, schedule: StageSchedule) -> PipelineConfig {
    PipelineConfig {
        source_dir: source,
        output_dir: output,
        schedule,
        registry: ClassRegistry::fireworks(),
        universe: numeric_universe(3),
        val_ids: vec!["1".to_string()],
        base_weights: PathBuf::from("yolo11x-obb.pt"),
        epochs: 2,
        patience: 1,
        workers: 2,
        device: "cpu".to_string(),
        augmentation: AugmentationFlags::default(),
    }
}

fn two_stage_schedule() -> StageSchedule {
    StageSchedule::new(vec![
        StageConfig { image_size: 640, batch_size: 2 },
        StageConfig { image_size: 960, batch_size: 1 },
    ])
    .expect("valid schedule")
}

#[test]
fn chains_weights_across_stages() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("out");
    fs::create_dir_all(&source).expect("create source");
    seed_source(&source);

    let config = test_config(source, output.clone(), two_stage_schedule());
    let mut trainer = RecordingTrainer::new();
    let runs = run_progressive(&mut trainer, &config).expect("pipeline");

    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|run| run.state.is_completed()));

    // Stage 1 starts from the pretrained weights.
    assert_eq!(trainer.requests[0].model_weights, config.base_weights);
    // Stage 2 starts from exactly stage 1's emitted artifact.
    let stage_one_artifact = runs[0].artifact().expect("stage 1 artifact");
    assert_eq!(trainer.requests[1].model_weights, stage_one_artifact.path());
    assert_eq!(
        stage_one_artifact.path(),
        output.join("step_1/training_step_1/weights/last.pt")
    );

    let last = final_artifact(&runs).expect("final artifact");
    assert_eq!(
        last.path(),
        output.join("step_2/training_step_2/weights/last.pt")
    );
}

#[test]
fn stage_requests_carry_stage_parameters() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("out");
    fs::create_dir_all(&source).expect("create source");
    seed_source(&source);

    let config = test_config(source, output.clone(), two_stage_schedule());
    let mut trainer = RecordingTrainer::new();
    run_progressive(&mut trainer, &config).expect("pipeline");

    let first = &trainer.requests[0];
    assert_eq!(first.image_size, 640);
    assert_eq!(first.batch_size, 2);
    assert_eq!(first.manifest, output.join("step_1/data.yaml"));
    assert_eq!(first.project, output.join("step_1"));
    assert_eq!(first.run_name, "training_step_1");
    assert_eq!(first.epochs, 2);
    assert_eq!(first.patience, 1);

    let second = &trainer.requests[1];
    assert_eq!(second.image_size, 960);
    assert_eq!(second.run_name, "training_step_2");
}

#[test]
fn failed_stage_halts_with_its_index() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("out");
    fs::create_dir_all(&source).expect("create source");
    seed_source(&source);

    let config = test_config(source, output.clone(), two_stage_schedule());
    let mut trainer = RecordingTrainer::failing_at("training_step_2");
    let err = run_progressive(&mut trainer, &config).expect_err("stage 2 must fail");

    assert!(matches!(err, PipelineError::Stage { stage: 2, .. }));
    // Stage 2 was reached, nothing beyond it ran.
    assert_eq!(trainer.requests.len(), 2);
    assert!(!output.join("step_3").exists());
}

#[test]
fn unknown_validation_group_fails_before_any_filesystem_work() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let source = workspace.path().join("source");
    let output = workspace.path().join("out");
    fs::create_dir_all(&source).expect("create source");
    seed_source(&source);

    let mut config = test_config(source, output.clone(), two_stage_schedule());
    config.val_ids = vec!["42".to_string()];
    let mut trainer = RecordingTrainer::new();
    let err = run_progressive(&mut trainer, &config).expect_err("must fail");

    assert!(matches!(err, PipelineError::Prep(_)));
    assert!(trainer.requests.is_empty());
    assert!(!output.exists());
}
