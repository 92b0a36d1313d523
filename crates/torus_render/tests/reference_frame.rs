//! End-to-end tests against the reference frame
//!
//! Reference instance: A = B = 1, R1 = 1, R2 = 2, K2 = 5, 160x120 raster,
//! θ step 0.07, φ step 0.02, 4-bit codes.

use std::collections::HashSet;

use torus_render::{render_frame, Frame, FrameBuffer, FrameParams, Renderer, Rounding};

const WIDTH: i64 = 160;
const HEIGHT: i64 = 120;

fn reference_buffer() -> FrameBuffer {
    let renderer = Renderer::new(FrameParams::default()).unwrap();
    let (buffer, stats) = renderer.render().unwrap();
    assert_eq!(stats.samples, 28_350);
    buffer
}

/// 4-connected flood fill over pixels matching `pred`, starting at `start`
fn flood(start: (i64, i64), pred: impl Fn(i64, i64) -> bool) -> HashSet<(i64, i64)> {
    let mut seen = HashSet::new();
    if !pred(start.0, start.1) {
        return seen;
    }
    let mut stack = vec![start];
    seen.insert(start);
    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = (x + dx, y + dy);
            if next.0 < 0 || next.1 < 0 || next.0 >= WIDTH || next.1 >= HEIGHT {
                continue;
            }
            if pred(next.0, next.1) && seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen
}

#[test]
fn test_reference_frame_shape() {
    let frame = render_frame(&FrameParams::default()).unwrap();
    assert_eq!(frame.width(), 160);
    assert_eq!(frame.height(), 120);
    assert_eq!(frame.codes().len(), 19_200);
    assert!(frame.codes().iter().all(|&c| c <= 15));
}

#[test]
fn test_reference_frame_is_deterministic() {
    let a = render_frame(&FrameParams::default()).unwrap();
    let b = render_frame(&FrameParams::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_reference_frame_covers_one_region_with_a_hole() {
    let buffer = reference_buffer();

    let covered: Vec<(i64, i64)> = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
        .filter(|&(x, y)| buffer.is_covered(x, y))
        .collect();
    assert!(covered.len() > 3_000, "covered only {} pixels", covered.len());
    assert_eq!(covered.len(), buffer.covered_pixels());

    // One contiguous surface
    let region = flood(covered[0], |x, y| buffer.is_covered(x, y));
    assert_eq!(region.len(), covered.len());

    // Nothing touches the raster edge
    assert!(covered
        .iter()
        .all(|&(x, y)| x > 0 && y > 0 && x < WIDTH - 1 && y < HEIGHT - 1));

    // Roughly centred
    let n = covered.len() as f64;
    let cx = covered.iter().map(|p| p.0 as f64).sum::<f64>() / n;
    let cy = covered.iter().map(|p| p.1 as f64).sum::<f64>() / n;
    assert!((cx - 80.0).abs() < 20.0, "centroid x = {}", cx);
    assert!((cy - 60.0).abs() < 20.0, "centroid y = {}", cy);

    // The centre is the ring's hole: uncovered and enclosed by the surface
    assert!(!buffer.is_covered(80, 60));
    let hole = flood((80, 60), |x, y| !buffer.is_covered(x, y));
    assert!(hole.len() > 50, "hole has {} pixels", hole.len());
    assert!(hole
        .iter()
        .all(|&(x, y)| x > 0 && y > 0 && x < WIDTH - 1 && y < HEIGHT - 1));
}

#[test]
fn test_reference_frame_codes() {
    let buffer = reference_buffer();
    let frame = buffer.clone().into_frame();

    // Background never drawn
    assert_eq!(frame.get(0, 0), Some(0));
    assert_eq!(frame.get(159, 119), Some(0));

    // Lit pixels are a subset of covered pixels
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if frame.get(x as usize, y as usize) != Some(0) {
                assert!(buffer.is_covered(x, y));
            }
        }
    }

    assert!(frame.lit_pixels() > 2_000);
    assert!(frame.lit_pixels() < buffer.covered_pixels());
    let max = frame.codes().iter().copied().max().unwrap();
    assert!(max >= 12, "brightest code is {}", max);
}

#[test]
fn test_truncating_mode_renders_similar_frame() {
    let params = FrameParams { rounding: Rounding::Truncate, ..FrameParams::default() };
    let truncated = render_frame(&params).unwrap();
    let nearest = render_frame(&FrameParams::default()).unwrap();
    assert_eq!(truncated.codes().len(), 19_200);
    assert!(truncated.codes().iter().all(|&c| c <= 15));
    assert_ne!(truncated, nearest);

    let (t, n) = (truncated.lit_pixels() as f64, nearest.lit_pixels() as f64);
    assert!((t - n).abs() / n < 0.25, "lit pixels {} vs {}", t, n);
}

#[test]
fn test_different_orientation_changes_frame() {
    let rotated = FrameParams { angle_b: 2.0, ..FrameParams::default() };
    assert_ne!(
        render_frame(&rotated).unwrap(),
        render_frame(&FrameParams::default()).unwrap()
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_reference_frame_is_identical() {
    let sequential = render_frame(&FrameParams::default()).unwrap();
    let parallel = torus_render::render_frame_parallel(&FrameParams::default()).unwrap();
    assert_eq!(sequential, parallel);
}

fn hex_row(frame: &Frame, y: usize) -> String {
    (0..frame.width()).map(|x| format!("{:x}", frame.get(x, y).unwrap())).collect()
}

#[test]
fn test_legacy_frame_rows() {
    let renderer = Renderer::new(FrameParams::legacy()).unwrap();
    let (buffer, stats) = renderer.render().unwrap();
    assert_eq!(stats.samples, 14_220);
    assert_eq!(stats.clipped, 0);
    assert_eq!(buffer.covered_pixels(), 4_996);

    let frame = buffer.into_frame();
    assert_eq!(frame.lit_pixels(), 3_536);
    assert_eq!(
        hex_row(&frame, 30),
        "0000000000000000000000000000000000000000acc870c54c020b100a00a009080008007706060055055550555515266347578889999000000000000000000000000000000000000000000000000000"
    );
    assert_eq!(
        hex_row(&frame, 60),
        "0000000000000000000000000000006772008808000007070660000004430221000000000000000000000002455555665666666666666555300000000000000000000000000000000000000000000000"
    );
    assert_eq!(
        hex_row(&frame, 90),
        "0000000000000000000000000000000000000000000000011223033044444550550666666607777666776664432100000000000000000000000000000000000000000000000000000000000000000000"
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_legacy_frame_is_identical() {
    let sequential = render_frame(&FrameParams::legacy()).unwrap();
    let parallel = torus_render::render_frame_parallel(&FrameParams::legacy()).unwrap();
    assert_eq!(sequential, parallel);
}
