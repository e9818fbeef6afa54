//! Map-view session state.
//!
//! Holds the active route set and the load state of every boundary layer.
//! Any mutation bumps a revision; derivations are computed from immutable
//! snapshots and published only if they are not older than what is already
//! published.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::aggregator::{Derivation, DeriveOptions, derive_intersections};
use crate::boundary::{BoundaryLayer, BoundarySegment};
use crate::error::{BoundaryFetchError, RouteError};
use crate::route::{Route, RouteInput, RouteSet};
use crate::source::LayerLoad;
use crate::traits::Projection;

#[derive(Debug, Clone, PartialEq)]
pub enum LayerState {
    Pending,
    Loaded(Arc<Vec<BoundarySegment>>),
    /// Error message of the failed fetch.
    Failed(String),
}

/// A derivation stamped with the revision it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub revision: u64,
    pub derivation: Derivation,
}

/// Immutable copy of the session inputs.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub routes: Arc<[Route]>,
    pub boundaries: Arc<[BoundarySegment]>,
    pub pending_layers: Vec<String>,
    pub failed_layers: Vec<String>,
}

impl Snapshot {
    /// True once every layer has either loaded or failed.
    pub fn is_complete(&self) -> bool {
        self.pending_layers.is_empty()
    }

    pub fn derive<P: Projection>(&self, projection: &P, options: &DeriveOptions) -> Published {
        Published {
            revision: self.revision,
            derivation: derive_intersections(&self.routes, &self.boundaries, projection, options),
        }
    }
}

#[derive(Debug, Default)]
pub struct CrossingSession {
    routes: RouteSet,
    layers: Vec<(String, LayerState)>,
    revision: u64,
    published: Option<Published>,
}

impl CrossingSession {
    /// Every configured layer starts out pending.
    pub fn new(layers: &[BoundaryLayer]) -> Self {
        Self {
            layers: layers
                .iter()
                .map(|layer| (layer.name.clone(), LayerState::Pending))
                .collect(),
            ..Self::default()
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    pub fn layer_state(&self, name: &str) -> Option<&LayerState> {
        self.layers
            .iter()
            .find(|(layer, _)| layer == name)
            .map(|(_, state)| state)
    }

    pub fn add_route(&mut self, input: RouteInput) -> Result<&Route, RouteError> {
        let route = Route::from_input(input)?;
        if self.routes.get(&route.id).is_some() {
            return Err(RouteError::DuplicateId(route.id));
        }
        self.revision += 1;
        self.routes.insert(route)
    }

    pub fn remove_route(&mut self, id: &str) -> Option<Route> {
        let removed = self.routes.remove(id)?;
        self.revision += 1;
        Some(removed)
    }

    pub fn remove_routes_named(&mut self, name: &str) -> usize {
        let removed = self.routes.remove_by_name(name);
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    pub fn layer_loaded(&mut self, name: &str, segments: Vec<BoundarySegment>) {
        self.set_layer(name, LayerState::Loaded(Arc::new(segments)));
    }

    pub fn layer_failed(&mut self, error: &BoundaryFetchError) {
        warn!(layer = error.layer(), error = %error, "boundary layer excluded from crossings");
        self.set_layer(error.layer(), LayerState::Failed(error.to_string()));
    }

    pub fn apply(&mut self, load: LayerLoad) {
        match load.result {
            Ok(segments) => self.layer_loaded(&load.layer, segments),
            Err(error) => self.layer_failed(&error),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut boundaries = Vec::new();
        let mut pending_layers = Vec::new();
        let mut failed_layers = Vec::new();

        for (name, state) in &self.layers {
            match state {
                LayerState::Pending => pending_layers.push(name.clone()),
                LayerState::Loaded(segments) => boundaries.extend(segments.iter().cloned()),
                LayerState::Failed(_) => failed_layers.push(name.clone()),
            }
        }

        Snapshot {
            revision: self.revision,
            routes: self.routes.as_slice().into(),
            boundaries: boundaries.into(),
            pending_layers,
            failed_layers,
        }
    }

    /// Keep `candidate` unless a newer revision is already published.
    pub fn publish(&mut self, candidate: Published) -> bool {
        if let Some(current) = &self.published {
            if current.revision > candidate.revision {
                debug!(
                    stale = candidate.revision,
                    current = current.revision,
                    "discarding stale crossings"
                );
                return false;
            }
        }
        self.published = Some(candidate);
        true
    }

    pub fn published(&self) -> Option<&Published> {
        self.published.as_ref()
    }

    /// Snapshot, derive and publish in one go.
    pub fn recompute<P: Projection>(&mut self, projection: &P, options: &DeriveOptions) -> &Published {
        let published = self.snapshot().derive(projection, options);
        self.published.insert(published)
    }

    fn set_layer(&mut self, name: &str, state: LayerState) {
        self.revision += 1;
        match self.layers.iter_mut().find(|(layer, _)| layer == name) {
            Some((_, slot)) => *slot = state,
            None => self.layers.push((name.to_string(), state)),
        }
    }
}
