use log::debug;
use snafu::{ensure, Snafu};

use crate::config::*;

#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
pub enum SelectionError {
    #[snafu(display("no riding with id {district_id}"))]
    UnknownDistrict { district_id: DistrictId },
}

/// A change of the active riding, as seen by the listeners.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SelectionChange {
    pub previous: Option<DistrictId>,
    pub current: Option<DistrictId>,
}

type Listener = Box<dyn FnMut(&SelectionChange)>;

/// Tracks the riding shown by the map highlight and the information panel.
///
/// At most one riding is active. Selecting a riding replaces the previous
/// one in a single step, and the listeners are only called once the new
/// state is in place.
///
/// ```
/// use riding_results::{DistrictId, SelectionController};
///
/// let mut selection = SelectionController::new();
/// selection.select(DistrictId(1));
/// selection.select(DistrictId(2));
/// assert_eq!(selection.active_district_id(), Some(DistrictId(2)));
/// selection.clear();
/// assert_eq!(selection.active_district_id(), None);
/// ```
#[derive(Default)]
pub struct SelectionController {
    active: Option<DistrictId>,
    listeners: Vec<Listener>,
}

impl SelectionController {
    pub fn new() -> SelectionController {
        SelectionController::default()
    }

    pub fn active_district_id(&self) -> Option<DistrictId> {
        self.active
    }

    pub fn is_active(&self, district_id: DistrictId) -> bool {
        self.active == Some(district_id)
    }

    /// Makes this riding the active one.
    ///
    /// The id is not checked against the known ridings: see
    /// [`SelectionController::select_checked`] for that.
    pub fn select(&mut self, district_id: DistrictId) {
        self.transition(Some(district_id));
    }

    /// Selects the riding if it is part of the collection. Otherwise the
    /// state is left untouched.
    pub fn select_checked(
        &mut self,
        district_id: DistrictId,
        districts: &[District],
    ) -> Result<(), SelectionError> {
        ensure!(
            districts.iter().any(|d| d.district_id == district_id),
            UnknownDistrictSnafu { district_id }
        );
        self.select(district_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.transition(None);
    }

    /// Looks up the active riding in the collection.
    pub fn active_district<'a>(&self, districts: &'a [District]) -> Option<&'a District> {
        let active = self.active?;
        districts.iter().find(|d| d.district_id == active)
    }

    /// Registers a function called after every change of the active riding.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn transition(&mut self, next: Option<DistrictId>) {
        if self.active == next {
            return;
        }
        let change = SelectionChange {
            previous: self.active,
            current: next,
        };
        self.active = next;
        debug!("selection: {:?} -> {:?}", change.previous, change.current);
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
