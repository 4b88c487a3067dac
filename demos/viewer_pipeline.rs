//! Drives the overlay pipeline through a simulated map session.
//!
//! Builds a synthetic projected-space dataset clustered over the Iberian
//! peninsula, spawns the pipeline with a buffering sink, then pans and
//! zooms the viewport the way an interactive map would. Finishes by
//! printing the last frame as GeoJSON.
//!
//! Run with: `cargo run --example viewer_pipeline`

use std::sync::{Arc, Mutex};

use rand::Rng;
use tokio::time::{sleep, Duration};
use tracing::info;

use hex_overlay::export::cells_to_geojson;
use hex_overlay::hexagon::HexagonFeature;
use hex_overlay::mercator;
use hex_overlay::pipeline::{OverlayPipeline, PipelineProps};
use hex_overlay::render::BufferSink;
use hex_overlay::store::HexagonStore;
use hex_overlay::viewport::{LatLngBounds, Viewport, ViewportFeed};

const PALETTE: [&str; 4] = ["3F8E55", "D95F02", "7570B3", "E7298A"];

/// Synthetic hexagons in projected meters.
fn synthetic_dataset(count: i64) -> Vec<HexagonFeature> {
    let mut rng = rand::rng();

    (0..count)
        .map(|id| {
            let lat = rng.random_range(36.0..43.5);
            let lng = rng.random_range(-9.0..2.5);
            let (cx, cy) = mercator::project(lat, lng);
            let radius_m = rng.random_range(2000.0..6000.0);

            let ring: Vec<[f64; 2]> = (0..6)
                .map(|step| {
                    let angle = step as f64 * std::f64::consts::PI / 3.0;
                    [cx + radius_m * angle.cos(), cy + radius_m * angle.sin()]
                })
                .collect();

            let color = PALETTE[(id % PALETTE.len() as i64) as usize];
            HexagonFeature::multi_polygon(id, color, vec![vec![ring]])
        })
        .collect()
}

async fn settle_and_report(sink: &Arc<Mutex<BufferSink>>, frame: &str) {
    // Longer than the debounce window, so the pass has landed
    sleep(Duration::from_millis(300)).await;

    let sink = sink.lock().unwrap();
    info!(
        frame,
        cells = sink.cells().len(),
        passes = sink.clear_count(),
        "frame settled"
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let store = HexagonStore::new();
    store.publish(synthetic_dataset(250));
    info!(features = store.snapshot().len(), "synthetic dataset published");

    let feed = ViewportFeed::new();
    let sink = Arc::new(Mutex::new(BufferSink::new()));
    let handle = OverlayPipeline::spawn(PipelineProps::new(
        store.subscribe(),
        feed.subscribe(),
        Arc::clone(&sink),
    ));

    // Whole peninsula, zoomed out: dense clusters collapse to coarse cells
    feed.update(Viewport::new(
        LatLngBounds::new((35.0, -10.0), (44.0, 3.0)),
        5.0,
    ));
    settle_and_report(&sink, "peninsula").await;

    // Pan towards the east coast at street-map zoom
    feed.update(Viewport::new(
        LatLngBounds::new((38.0, -2.0), (42.0, 3.0)),
        7.0,
    ));
    settle_and_report(&sink, "east coast").await;

    // Tight city view: the same data spreads across fine cells
    feed.update(Viewport::new(
        LatLngBounds::new((40.0, -4.5), (41.0, -3.0)),
        10.0,
    ));
    settle_and_report(&sink, "city").await;

    // Zoom back out
    feed.update(Viewport::new(
        LatLngBounds::new((35.0, -10.0), (44.0, 3.0)),
        4.0,
    ));
    settle_and_report(&sink, "peninsula again").await;

    let document = {
        let sink = sink.lock().unwrap();
        cells_to_geojson(sink.cells()).to_string()
    };
    println!("GeoJSON export of the last frame ({} bytes):", document.len());
    println!("{}", &document[..document.len().min(400)]);

    handle.shutdown().await;
    info!("session complete");
}
