use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::model::{DatasetRegistry, ShotType};
use crate::report::{DerivedReportBundle, ReportError, SignalView, ViewMode};

// ---------------------------------------------------------------------------
// ReportCache
// ---------------------------------------------------------------------------

/// Append-only memo of derived bundles, keyed solely by shot type.
///
/// The registry never changes, so entries never need invalidating. Failed
/// derivations are not stored.
pub struct ReportCache {
    registry: Arc<DatasetRegistry>,
    bundles: BTreeMap<ShotType, Arc<DerivedReportBundle>>,
    derivations: usize,
}

impl ReportCache {
    pub fn new(registry: Arc<DatasetRegistry>) -> Self {
        Self {
            registry,
            bundles: BTreeMap::new(),
            derivations: 0,
        }
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    /// Return the cached bundle for `shot`, deriving and storing it first on a
    /// miss.
    pub fn get(&mut self, shot: ShotType) -> Result<Arc<DerivedReportBundle>, ReportError> {
        if let Some(bundle) = self.bundles.get(&shot) {
            log::debug!("Report cache hit for {shot}");
            return Ok(Arc::clone(bundle));
        }

        let tables = self.registry.tables(shot).ok_or_else(|| {
            let reason = self
                .registry
                .load_failure(shot)
                .unwrap_or("not loaded")
                .to_string();
            ReportError::DatasetLoadFailure { shot, reason }
        })?;

        self.derivations += 1;
        let bundle = DerivedReportBundle::derive(shot, tables).map_err(|e| {
            log::error!("Report derivation failed: {e:#}");
            e
        })?;
        log::info!("Derived report for {shot}");

        let bundle = Arc::new(bundle);
        self.bundles.insert(shot, Arc::clone(&bundle));
        Ok(bundle)
    }

    pub fn contains(&self, shot: ShotType) -> bool {
        self.bundles.contains_key(&shot)
    }

    /// Number of derivations run so far (cache misses that reached the
    /// deriver).
    pub fn derivations(&self) -> usize {
        self.derivations
    }
}

// ---------------------------------------------------------------------------
// SelectionController
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    NoSelection,
    Selected(ShotType),
}

/// Holds the shot-type and view-mode selection and the report they resolve to.
///
/// Dependency graph, pulled on each selection event:
/// ```text
///   Selection ──► ReportCache::get ──► current bundle ──► project(view_mode)
///                                                            ▲
///   ViewMode ────────────────────────────────────────────────┘
/// ```
/// Changing the view mode only re-projects; it never touches the cache.
pub struct SelectionController {
    cache: ReportCache,
    selection: Selection,
    view_mode: ViewMode,
    current: Result<Arc<DerivedReportBundle>, ReportError>,
}

impl SelectionController {
    /// Starts at `Selected(default_shot)` when that shot type loaded, and at
    /// `NoSelection` otherwise.
    pub fn new(registry: Arc<DatasetRegistry>, default_shot: ShotType) -> Self {
        let available = registry.is_available(default_shot);
        let mut controller = Self {
            cache: ReportCache::new(registry),
            selection: Selection::NoSelection,
            view_mode: ViewMode::default(),
            current: Err(ReportError::MissingSelection),
        };
        if available {
            let _ = controller.select(default_shot);
        } else {
            log::warn!("Default shot type {default_shot} is not available");
        }
        controller
    }

    pub fn registry(&self) -> &DatasetRegistry {
        self.cache.registry()
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    pub fn available(&self) -> Vec<ShotType> {
        self.registry().available()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_shot(&self) -> Option<ShotType> {
        match self.selection {
            Selection::Selected(shot) => Some(shot),
            Selection::NoSelection => None,
        }
    }

    /// Handle a shot-type selection event. The outcome replaces whatever was
    /// shown before; a failure leaves an empty report, not the previous one.
    pub fn select(&mut self, shot: ShotType) -> Result<Arc<DerivedReportBundle>, ReportError> {
        self.selection = Selection::Selected(shot);
        self.current = self.cache.get(shot);
        self.current.clone()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// The bundle for the current selection, or why there is none.
    pub fn report(&self) -> Result<&Arc<DerivedReportBundle>, &ReportError> {
        self.current.as_ref()
    }

    /// Current bundle projected through the active view mode.
    pub fn signal_view(&self) -> Option<SignalView<'_>> {
        self.current
            .as_ref()
            .ok()
            .map(|bundle| bundle.project(self.view_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{complete_source, insert_shot};
    use crate::data::loader::load_registry;

    fn registry() -> Arc<DatasetRegistry> {
        Arc::new(load_registry(&complete_source()))
    }

    #[test]
    fn starts_on_default_shot() {
        let controller = SelectionController::new(registry(), ShotType::Set);
        assert_eq!(controller.selection(), Selection::Selected(ShotType::Set));
        assert_eq!(controller.report().unwrap().shot, ShotType::Set);
        assert_eq!(controller.cache().derivations(), 1);
    }

    #[test]
    fn starts_empty_when_default_is_unavailable() {
        let mut source = complete_source();
        source.remove("Set/timing");
        let controller = SelectionController::new(Arc::new(load_registry(&source)), ShotType::Set);

        assert_eq!(controller.selection(), Selection::NoSelection);
        assert_eq!(controller.report().unwrap_err(), &ReportError::MissingSelection);
        assert!(controller.signal_view().is_none());
        assert_eq!(controller.cache().derivations(), 0);
    }

    #[test]
    fn reselecting_returns_the_cached_bundle() {
        let mut controller = SelectionController::new(registry(), ShotType::Set);
        let first = controller.select(ShotType::ThreePoint).unwrap();
        controller.select(ShotType::Jumper).unwrap();
        let again = controller.select(ShotType::ThreePoint).unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(controller.cache().derivations(), 3);
    }

    #[test]
    fn view_mode_is_a_pure_projection() {
        let mut controller = SelectionController::new(registry(), ShotType::Set);
        let before = controller.cache().derivations();

        controller.set_view_mode(ViewMode::Timing);
        let timing = controller.signal_view().unwrap();
        assert_eq!(timing.combined.curves.len(), 6);
        assert_eq!(timing.pairs.len(), 6);

        controller.set_view_mode(ViewMode::Kinematics);
        let kinematics = controller.signal_view().unwrap();
        assert_eq!(kinematics.combined.curves.len(), 7);
        assert_eq!(kinematics.pairs.len(), 7);

        assert_eq!(controller.cache().derivations(), before);
    }

    #[test]
    fn invalid_timing_degrades_to_empty_and_is_not_cached() {
        let mut source = complete_source();
        insert_shot(&mut source, ShotType::FreeThrow, [30.0, 28.0], [100.0, 0.0]);
        let mut controller = SelectionController::new(Arc::new(load_registry(&source)), ShotType::Set);

        let err = controller.select(ShotType::FreeThrow).unwrap_err();
        assert!(matches!(err, ReportError::InvalidTimingData { .. }));
        assert!(controller.report().is_err());
        assert!(controller.signal_view().is_none());
        assert!(!controller.cache().contains(ShotType::FreeThrow));

        // No automatic retry, but the next selection event derives again.
        let before = controller.cache().derivations();
        controller.select(ShotType::FreeThrow).unwrap_err();
        assert_eq!(controller.cache().derivations(), before + 1);

        assert!(controller.select(ShotType::Set).is_ok());
    }

    #[test]
    fn selecting_an_excluded_shot_reports_load_failure() {
        let mut source = complete_source();
        source.remove("Jumper/signals_make");
        let mut controller = SelectionController::new(Arc::new(load_registry(&source)), ShotType::Set);

        assert!(!controller.available().contains(&ShotType::Jumper));
        let err = controller.select(ShotType::Jumper).unwrap_err();
        assert!(matches!(
            err,
            ReportError::DatasetLoadFailure { shot: ShotType::Jumper, .. }
        ));
    }
}
