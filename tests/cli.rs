use assert_cmd::Command;

const VALID: &str = "tests/fixtures/sample_valid.labels.json";
const INVALID: &str = "tests/fixtures/sample_invalid.labels.json";
const WARNINGS: &str = "tests/fixtures/sample_warnings.labels.json";

fn annokit() -> Command {
    let mut cmd = Command::cargo_bin("annokit").unwrap();
    cmd.env_remove("ANNOKIT_VISIBILITY")
        .env_remove("ANNOKIT_BEZIER")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run annokit");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn runs() {
    annokit().assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = annokit();
    cmd.arg("-V");
    cmd.assert().success().stdout("annokit 0.1.0\n");
}

// Validate subcommand tests

#[test]
fn validate_valid_document_succeeds() {
    let mut cmd = annokit();
    cmd.args(["validate", VALID, "--visibility", "ternary"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Validation passed"));
}

#[test]
fn validate_keypoint_codes_need_a_scheme() {
    let mut cmd = annokit();
    cmd.args(["validate", VALID]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("InvalidGeometry in KEYPOINTS2D[0]"));
}

#[test]
fn validate_binary_scheme_rejects_ternary_codes() {
    let mut cmd = annokit();
    cmd.args(["validate", VALID, "--visibility", "binary"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("KEYPOINTS2D[0]"));
}

#[test]
fn validate_reads_scheme_from_env() {
    let mut cmd = annokit();
    cmd.env("ANNOKIT_VISIBILITY", "ternary");
    cmd.args(["validate", VALID]);
    cmd.assert().success();
}

#[test]
fn validate_bezier_polylines_need_point_types() {
    let mut cmd = annokit();
    cmd.env("ANNOKIT_BEZIER", "true");
    cmd.args(["validate", VALID, "--visibility", "ternary"]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("InvalidGeometry in POLYLINE2D[0]"));
}

#[test]
fn validate_invalid_document_fails() {
    let mut cmd = annokit();
    cmd.args(["validate", INVALID]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("4 error(s)"))
        .stderr(predicates::str::contains("Validation failed"));
}

#[test]
fn validate_reports_each_failure_kind() {
    let mut cmd = annokit();
    cmd.args(["validate", INVALID]);
    cmd.assert()
        .failure()
        .stdout(predicates::str::contains("InvalidGeometry in BOX2D[0]"))
        .stdout(predicates::str::contains("InvalidRotation in BOX3D[0]"))
        .stdout(predicates::str::contains("RleShapeMismatch in RLE[0]"))
        .stdout(predicates::str::contains("InvalidGeometry in POLYLINE2D[0]"));
}

#[test]
fn validate_warnings_pass_unless_strict() {
    let mut cmd = annokit();
    cmd.args(["validate", WARNINGS]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("OutOfBounds"));

    let mut cmd = annokit();
    cmd.args(["validate", WARNINGS, "--strict"]);
    cmd.assert().failure();
}

#[test]
fn validate_json_output_format() {
    let mut cmd = annokit();
    cmd.args([
        "validate",
        VALID,
        "--visibility",
        "ternary",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"error_count\": 0"))
        .stdout(predicates::str::contains("\"warning_count\": 0"));
}

#[test]
fn validate_json_output_lists_issue_context() {
    let mut cmd = annokit();
    cmd.args(["validate", INVALID, "--output", "json"]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error_count"], 4);
    let issues = json["issues"].as_array().unwrap();
    assert_eq!(issues[0]["context"]["scope"], "label");
    assert_eq!(issues[0]["context"]["kind"], "Box2D");
    assert_eq!(issues[0]["severity"], "Error");
}

#[test]
fn validate_nonexistent_file_fails() {
    let mut cmd = annokit();
    cmd.args(["validate", "nonexistent_file.json"]);
    cmd.assert().failure();
}

#[test]
fn validate_malformed_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"width": 8, "BOX2D": [{"box2d": "#).unwrap();

    let mut cmd = annokit();
    cmd.arg("validate").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Failed to parse JSON"));
}

// Measure subcommand tests

#[test]
fn measure_reports_quantities() {
    let mut cmd = annokit();
    cmd.args(["measure", VALID, "--visibility", "ternary"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Labels: 6"))
        .stdout(predicates::str::contains("BOX2D[0] vehicle.car area=12.00 points=4"))
        .stdout(predicates::str::contains("BOX3D[0] vehicle.truck volume=6000.00"))
        .stdout(predicates::str::contains("RLE[0] road area=18.00"))
        .stdout(predicates::str::contains("POLYLINE2D[0] lane length=2.00"));
}

#[test]
fn measure_json_groups_categories() {
    let json = stdout_json(annokit().args([
        "measure",
        VALID,
        "--visibility",
        "ternary",
        "--output",
        "json",
    ]));
    assert_eq!(json["counts"]["RLE"], 1);
    assert_eq!(json["categories"]["road"]["labels"], 2);
    assert_eq!(json["categories"]["road"]["area"], 22.0);
    assert_eq!(json["labels"].as_array().unwrap().len(), 6);
}

#[test]
fn measure_rejects_invalid_document() {
    let mut cmd = annokit();
    cmd.args(["measure", INVALID]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid geometry"));
}

// RLE subcommand tests

#[test]
fn rle_encode_mask() {
    let json = stdout_json(annokit().args(["rle", "encode", "tests/fixtures/mask.json"]));
    assert_eq!(json["width"], 3);
    assert_eq!(json["height"], 3);
    assert_eq!(json["rle"], serde_json::json!([2, 3, 4]));
}

#[test]
fn rle_encode_selects_label_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.json");
    std::fs::write(&path, "[[0, 2, 2], [1, 2, 0]]").unwrap();

    let json = stdout_json(annokit().arg("rle").arg("encode").arg(&path).args(["--label", "2"]));
    assert_eq!(json["rle"], serde_json::json!([1, 2, 1, 1, 1]));
}

#[test]
fn rle_encode_rejects_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.json");
    std::fs::write(&path, "[[0, 1], [1]]").unwrap();

    let mut cmd = annokit();
    cmd.arg("rle").arg("encode").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("mask row 1"));
}

#[test]
fn rle_decode_runs() {
    let json = stdout_json(annokit().args([
        "rle",
        "decode",
        "tests/fixtures/runs.json",
        "--width",
        "3",
        "--height",
        "2",
    ]));
    assert_eq!(json, serde_json::json!([[1, 1, 0], [1, 0, 1]]));
}

#[test]
fn rle_decode_shape_mismatch_fails() {
    let mut cmd = annokit();
    cmd.args([
        "rle",
        "decode",
        "tests/fixtures/runs.json",
        "--width",
        "4",
        "--height",
        "4",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("RLE covers 6 pixel(s) but the raster has 16"));
}

// Similarity subcommand tests

#[test]
fn similarity_matches_reference_pair() {
    let json = stdout_json(annokit().args([
        "similarity",
        "tests/fixtures/polyline_a.json",
        "tests/fixtures/polyline_b.json",
        "--output",
        "json",
    ]));
    let distance = json["frechet_distance"].as_f64().unwrap();
    let score = json["similarity"].as_f64().unwrap();
    assert!((distance - 13f64.sqrt()).abs() < 1e-12);
    assert!((score - 0.2788897449072021).abs() < 1e-12);
}

#[test]
fn similarity_of_polyline_with_itself_is_one() {
    let mut cmd = annokit();
    cmd.args([
        "similarity",
        "tests/fixtures/polyline_a.json",
        "tests/fixtures/polyline_a.json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Fréchet distance: 0\n"))
        .stdout(predicates::str::contains("Similarity:       1\n"));
}

#[test]
fn similarity_rejects_single_point() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("point.json");
    std::fs::write(&path, r#"[{"x": 1, "y": 1}]"#).unwrap();

    let mut cmd = annokit();
    cmd.arg("similarity")
        .arg(&path)
        .arg("tests/fixtures/polyline_a.json");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid geometry"));
}
