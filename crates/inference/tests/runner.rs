use data_contracts::{ClassLabel, ClassRegistry};
use inference::{
    Detection, DetectionPredictor, ImagePrediction, InferenceError, InferenceRunner, OrientedBox,
    PredictRequest,
};
use std::fs;
use std::path::Path;

fn obb() -> OrientedBox {
    OrientedBox {
        cx: 0.4,
        cy: 0.6,
        width: 0.2,
        height: 0.1,
        rotation: 0.3,
    }
}

/// Returns canned predictions and remembers the request it saw.
struct CannedPredictor {
    predictions: Vec<ImagePrediction>,
    last_request: Option<PredictRequest>,
}

impl DetectionPredictor for CannedPredictor {
    fn predict(
        &mut self,
        request: &PredictRequest,
    ) -> Result<Vec<ImagePrediction>, InferenceError> {
        self.last_request = Some(request.clone());
        Ok(self.predictions.clone())
    }
}

fn seed_images(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"png").expect("write image fixture");
    }
}

#[test]
fn reports_preserve_input_order_and_zero_detection_images() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_images(dir.path(), &["b.png", "a.png", "notes.txt"]);

    let mut predictor = CannedPredictor {
        predictions: vec![
            ImagePrediction {
                detections: vec![Detection {
                    class_index: 11,
                    confidence: 0.91,
                    obb: obb(),
                }],
            },
            ImagePrediction::default(),
        ],
        last_request: None,
    };
    let runner = InferenceRunner::new(ClassRegistry::fireworks(), 1600, 0.6);
    let reports = runner
        .run(&mut predictor, Path::new("best.pt"), dir.path())
        .expect("run");

    // Sorted scan: a.png first, b.png second; the .txt never reaches the
    // predictor.
    let request = predictor.last_request.expect("request recorded");
    assert_eq!(request.images.len(), 2);
    assert_eq!(request.image_size, 1600);
    assert_eq!(request.confidence, 0.6);

    assert_eq!(reports.len(), 2);
    assert!(reports[0].image.ends_with("a.png"));
    assert_eq!(
        reports[0].detections[0].label,
        ClassLabel::Known {
            index: 11,
            name: "Snap".to_string()
        }
    );
    assert!(reports[1].image.ends_with("b.png"));
    assert!(!reports[1].has_detections());
    assert!(reports[1].render().contains("No OBB detections"));
}

#[test]
fn out_of_range_class_decodes_to_placeholder() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_images(dir.path(), &["fw.png"]);

    let mut predictor = CannedPredictor {
        predictions: vec![ImagePrediction {
            detections: vec![Detection {
                class_index: 99,
                confidence: 0.73,
                obb: obb(),
            }],
        }],
        last_request: None,
    };
    let runner = InferenceRunner::new(ClassRegistry::fireworks(), 1600, 0.6);
    let reports = runner
        .run(&mut predictor, Path::new("best.pt"), dir.path())
        .expect("run");

    let det = &reports[0].detections[0];
    assert!(det.label.is_placeholder());
    assert_eq!(det.label.display_name(), "unknown_99");
    assert_eq!(det.confidence, 0.73);
    assert!(reports[0]
        .render()
        .contains("Class: unknown_99, Confidence: 0.73"));
}

#[test]
fn mismatched_result_count_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    seed_images(dir.path(), &["a.png", "b.png"]);

    let mut predictor = CannedPredictor {
        predictions: vec![ImagePrediction::default()],
        last_request: None,
    };
    let runner = InferenceRunner::new(ClassRegistry::fireworks(), 1600, 0.6);
    let err = runner
        .run(&mut predictor, Path::new("best.pt"), dir.path())
        .expect_err("count mismatch must fail");
    assert!(matches!(
        err,
        InferenceError::ResultCountMismatch { got: 1, expected: 2 }
    ));
}
