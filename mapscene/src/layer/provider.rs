//! Sources of layer features.

use std::sync::Arc;

use mapscene_types::Rect;
use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::RwLock;

use crate::error::MapsceneError;
use crate::feature::Feature;

/// Lazy sequence of features returned by a [`FeatureProvider`].
///
/// An `Err` item means the enumeration failed. The layer is then not drawn for the current frame.
pub type FeatureIter<'a> = Box<dyn Iterator<Item = Result<Arc<Feature>, MapsceneError>> + 'a>;

/// Source of features of a layer.
pub trait FeatureProvider: MaybeSend + MaybeSync {
    /// Returns features that should be drawn for the given extent and resolution. Returning
    /// features outside the extent is allowed.
    ///
    /// The sequence is consumed once per frame. It is not required to return the same features if
    /// called twice.
    fn features_in_view(&self, extent: &Rect, resolution: f64) -> FeatureIter<'_>;
}

/// Provider keeping features in memory.
///
/// The provider is a cheap handle: clones share the same feature set, so an application can keep
/// a clone to add or replace features while the layer with the other clone is being rendered.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    features: Arc<RwLock<Vec<Arc<Feature>>>>,
}

impl MemoryProvider {
    /// Creates a provider with the given features.
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            features: Arc::new(RwLock::new(features.into_iter().map(Arc::new).collect())),
        }
    }

    /// Adds a feature and returns the shared handle to it.
    pub fn add(&self, feature: Feature) -> Arc<Feature> {
        let feature = Arc::new(feature);
        self.features.write().push(feature.clone());
        feature
    }

    /// Adds an already shared feature.
    pub fn add_shared(&self, feature: Arc<Feature>) {
        self.features.write().push(feature);
    }

    /// Adds all the features.
    pub fn extend(&self, features: impl IntoIterator<Item = Feature>) {
        self.features
            .write()
            .extend(features.into_iter().map(Arc::new));
    }

    /// Replaces the whole feature set at once.
    pub fn replace(&self, features: impl IntoIterator<Item = Feature>) {
        let features: Vec<_> = features.into_iter().map(Arc::new).collect();
        *self.features.write() = features;
    }

    /// Removes all features.
    pub fn clear(&self) {
        self.features.write().clear();
    }

    /// Snapshot of all features.
    pub fn features(&self) -> Vec<Arc<Feature>> {
        self.features.read().clone()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.read().len()
    }

    /// Returns true if there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.read().is_empty()
    }
}

impl FeatureProvider for MemoryProvider {
    fn features_in_view(&self, extent: &Rect, _resolution: f64) -> FeatureIter<'_> {
        // Snapshot under the lock, so that concurrent modifications cannot tear the sequence.
        let snapshot: Vec<_> = self
            .features
            .read()
            .iter()
            .filter(|feature| {
                feature
                    .geometry()
                    .bounding_rect()
                    .is_some_and(|bbox| bbox.intersects(extent))
            })
            .cloned()
            .collect();

        Box::new(snapshot.into_iter().map(Ok))
    }
}
