use super::*;
use crate::render::RenderTarget;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn sample() -> ScoreMatrix {
    ScoreMatrix::from_rows(
        labels(&["en", "deu"]),
        labels(&["en", "deu"]),
        vec![vec![100.0, 50.0], vec![f64::NAN, 150.0]],
    )
}

#[test]
fn test_shade_ramp() {
    assert_eq!(shade(100.0, 100.0, 50.0), ' ');
    assert_eq!(shade(150.0, 100.0, 50.0), '@');
    assert_eq!(shade(50.0, 100.0, 50.0), '=');
    assert_eq!(shade(f64::NAN, 100.0, 50.0), '?');
    assert_eq!(shade(3.0, 3.0, 0.0), ' ');
}

#[test]
fn test_render_layout() {
    let m = sample();
    let spec = RenderSpec::for_matrix("similarity", &m, 100.0);
    let text = render_heatmap_text(&m, &spec);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "similarity");
    assert_eq!(lines[2], "en    ==");
    assert_eq!(lines[3], "deu ??@@");
    assert_eq!(lines[4], "center=100.000 span=50.000");
    assert_eq!(lines[6], "  0 en");
    assert_eq!(lines[7], "  1 deu");
}

#[test]
fn test_render_without_center_uses_midpoint() {
    let m = ScoreMatrix::from_rows(labels(&["a"]), labels(&["x", "y"]), vec![vec![0.0, 10.0]]);
    let mut spec = RenderSpec::for_matrix("t", &m, 0.0);
    spec.center = None;
    spec.cmap = Some("vlag".to_string());
    spec.target = RenderTarget::Inline;
    let text = render_heatmap_text(&m, &spec);
    assert!(text.contains("center=5.000 span=5.000 cmap=vlag"));
    assert!(text.contains("a ==@@"));
}

#[test]
fn test_label_mismatch_rejected() {
    let m = sample();
    let mut spec = RenderSpec::for_matrix("t", &m, 100.0);
    spec.row_labels.pop();
    let err = TextRenderer.render(&m, &spec).unwrap_err();
    assert!(matches!(err, RenderError::LabelMismatch { labels: 1, rows: 2 }));
}
