use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use engine::golden::{
    FrameHashGolden, assert_or_update_golden_hashes, load_golden_json, rgba_sha256_hex,
};
use engine::graphics::{CpuRenderer, Renderer2d, SurfaceSize};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn unique_temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("tracker_disk_goldens_{nanos}"))
}

/// Renders one frame per disk position, the way a session redraws after each
/// hit, and returns one hash per frame.
fn render_frame_hashes(size: SurfaceSize, positions: &[(i32, i32)]) -> Vec<String> {
    positions
        .iter()
        .map(|&origin| {
            let mut frame = vec![0u8; size.rgba_len()];
            let mut gfx = CpuRenderer::new(&mut frame, size);
            gfx.clear(WHITE);
            gfx.fill_disk(origin, 20, RED, 16);
            rgba_sha256_hex(&frame)
        })
        .collect()
}

#[test]
fn replaying_the_same_positions_reproduces_the_golden_hashes() {
    let size = SurfaceSize::new(160, 120);
    let positions = [(60, 40), (0, 0), (118, 78), (60, 40)];

    let golden_path = unique_temp_dir().join("disk_frames.json");
    let live = FrameHashGolden::new(
        "disk_frames",
        size.width,
        size.height,
        render_frame_hashes(size, &positions),
    );

    // First pass records the golden, second pass replays and must match.
    assert_or_update_golden_hashes(&golden_path, &live).expect("recording golden");
    let replayed = FrameHashGolden::new(
        "disk_frames",
        size.width,
        size.height,
        render_frame_hashes(size, &positions),
    );
    assert_or_update_golden_hashes(&golden_path, &replayed).expect("replay should match golden");

    let stored = load_golden_json(&golden_path).expect("golden should load");
    assert_eq!(stored.hashes.len(), positions.len());
    assert_eq!(stored.hash_alg, "sha256");
    // Identical positions produce identical frames.
    assert_eq!(stored.hashes[0], stored.hashes[3]);
    assert_ne!(stored.hashes[0], stored.hashes[1]);
}

#[test]
fn a_diverging_replay_is_rejected() {
    let size = SurfaceSize::new(160, 120);
    let golden_path = unique_temp_dir().join("diverging.json");

    let recorded = FrameHashGolden::new(
        "diverging",
        size.width,
        size.height,
        render_frame_hashes(size, &[(10, 10)]),
    );
    assert_or_update_golden_hashes(&golden_path, &recorded).expect("recording golden");

    let diverged = FrameHashGolden::new(
        "diverging",
        size.width,
        size.height,
        render_frame_hashes(size, &[(11, 10)]),
    );
    assert!(assert_or_update_golden_hashes(&golden_path, &diverged).is_err());
}

#[test]
fn antialiasing_level_changes_the_rendered_frame() {
    let size = SurfaceSize::new(64, 64);

    let hash_at = |aa: u32| {
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.clear(WHITE);
        gfx.fill_disk((12, 12), 20, RED, aa);
        rgba_sha256_hex(&frame)
    };

    assert_ne!(hash_at(1), hash_at(16));
    assert_eq!(hash_at(16), hash_at(16));
}
