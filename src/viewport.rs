//! Viewport state: the geographic rectangle currently on screen and the
//! zoom level it is shown at.

use tokio::sync::watch;

/// A geographic rectangle given by its south-west and north-east corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Builds bounds from `(lat, lng)` south-west and north-east corners.
    pub fn new(south_west: (f64, f64), north_east: (f64, f64)) -> Self {
        Self {
            south: south_west.0,
            west: south_west.1,
            north: north_east.0,
            east: north_east.1,
        }
    }

    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }
}

/// One immutable snapshot of the visible map area.
///
/// Zoom rides along with the bounds because aggregation samples both from
/// the same interaction, never from independent streams.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: LatLngBounds,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(bounds: LatLngBounds, zoom: f64) -> Self {
        Self { bounds, zoom }
    }
}

/// Event source for viewport changes.
///
/// The map collaborator pushes a snapshot after every move or zoom. The
/// channel keeps only the latest value: a slow consumer observes the
/// newest viewport, not a queue of stale ones. Subscribers start from
/// `None` until the first snapshot arrives.
#[derive(Debug)]
pub struct ViewportFeed {
    tx: watch::Sender<Option<Viewport>>,
}

impl ViewportFeed {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Publishes a new viewport snapshot.
    pub fn update(&self, viewport: Viewport) {
        // send_replace retains the value even while nobody is subscribed
        self.tx.send_replace(Some(viewport));
    }

    /// Latest published snapshot, if any.
    pub fn current(&self) -> Option<Viewport> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Viewport>> {
        self.tx.subscribe()
    }
}

impl Default for ViewportFeed {
    fn default() -> Self {
        Self::new()
    }
}
