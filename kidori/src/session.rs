use std::collections::HashMap;

use log::{debug, info, warn};

use crate::KidoriError;
use crate::entities::{CutList, Layout, PieceInstance, PlacedPiece};
use crate::fsize;
use crate::packing::{PackConfig, PackOutcome, Packer, UnplacedPiece};
use crate::validation::MoveOutcome;

/// An editing session: the current cut list and the authoritative layout computed for it.
///
/// Every edit of the cut list invalidates the layout. Packing runs are requested with [`PackingSession::request_pack`],
/// executed anywhere (the returned ticket is `Send`) and handed back with [`PackingSession::complete`].
/// Only the most recently requested run is accepted, results of superseded runs are discarded.
/// Manual moves go through `&mut self` and are therefore serialized with edits and completions.
#[derive(Debug, Clone)]
pub struct PackingSession {
    cut_list: CutList,
    layout: Option<Layout>,
    unplaced: Vec<UnplacedPiece>,
    generation: u64,
}

/// Owned inputs of a single packing run, tagged with the generation of the request.
#[derive(Debug, Clone)]
pub struct PackTicket {
    generation: u64,
    config: PackConfig,
    pieces: Vec<PieceInstance>,
}

/// The result of running a [`PackTicket`].
#[derive(Debug, Clone)]
pub struct CompletedPack {
    pub generation: u64,
    pub outcome: PackOutcome,
}

impl PackingSession {
    pub fn new(cut_list: CutList) -> Self {
        PackingSession {
            cut_list,
            layout: None,
            unplaced: vec![],
            generation: 0,
        }
    }

    /// Resumes a session with a previously computed (and possibly manually adjusted) layout.
    pub fn with_layout(cut_list: CutList, layout: Layout) -> Self {
        PackingSession {
            layout: Some(layout),
            ..PackingSession::new(cut_list)
        }
    }

    pub fn cut_list(&self) -> &CutList {
        &self.cut_list
    }

    /// The authoritative layout, `None` if it was invalidated and no packing run has completed since.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Pieces left out of the current layout
    pub fn unplaced(&self) -> &[UnplacedPiece] {
        &self.unplaced
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies an edit to the cut list. On success the layout is invalidated and outstanding runs become stale.
    /// A failed edit leaves the session untouched.
    pub fn edit<F>(&mut self, f: F) -> Result<(), KidoriError>
    where
        F: FnOnce(&CutList) -> Result<CutList, KidoriError>,
    {
        let cut_list = f(&self.cut_list)?;
        self.cut_list = cut_list;
        self.layout = None;
        self.unplaced.clear();
        self.generation += 1;
        debug!("[SESSION] cut list edited, layout invalidated (generation {})", self.generation);
        Ok(())
    }

    /// Requests a new packing run, superseding any outstanding one.
    pub fn request_pack(&mut self) -> PackTicket {
        self.generation += 1;
        debug!("[SESSION] packing requested (generation {})", self.generation);
        PackTicket {
            generation: self.generation,
            config: self.cut_list.pack_config(),
            pieces: self.cut_list.expand(),
        }
    }

    /// Hands back the result of a run.
    /// Returns the difference with the previous layout if the run is the latest one requested, `None` if it is stale.
    pub fn complete(&mut self, completed: CompletedPack) -> Option<LayoutDiff> {
        if completed.generation != self.generation {
            warn!(
                "[SESSION] discarding result of superseded run {} (latest is {})",
                completed.generation, self.generation
            );
            return None;
        }
        let PackOutcome { layout, unplaced } = completed.outcome;
        let diff = LayoutDiff::between(self.layout.as_ref(), &layout);
        info!(
            "[SESSION] accepted layout of run {}: {} added, {} removed, {} moved, {} resized",
            completed.generation,
            diff.added.len(),
            diff.removed.len(),
            diff.moved.len(),
            diff.resized.len()
        );
        self.layout = Some(layout);
        self.unplaced = unplaced;
        Some(diff)
    }

    /// Requests, runs and completes a packing run on the current thread.
    pub fn pack_now(&mut self) -> Result<LayoutDiff, KidoriError> {
        let completed = self.request_pack().run()?;
        self.complete(completed).ok_or(KidoriError::NoLayout)
    }

    /// Moves placed piece `id` to `(x, y)` if the validator accepts it.
    pub fn move_piece(&mut self, id: usize, x: fsize, y: fsize) -> Result<MoveOutcome, KidoriError> {
        let layout = self.layout.as_ref().ok_or(KidoriError::NoLayout)?;
        let (moved, outcome) = layout.with_moved_piece(id, x, y)?;
        if outcome.is_accepted() {
            self.layout = Some(moved);
        }
        Ok(outcome)
    }
}

impl PackTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Executes the run. Pure, safe to call on any thread.
    pub fn run(self) -> Result<CompletedPack, KidoriError> {
        let packer = Packer::new(self.config)?;
        Ok(CompletedPack {
            generation: self.generation,
            outcome: packer.pack(&self.pieces),
        })
    }
}

/// Difference between two layouts, by placed piece id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDiff {
    /// Placements only present in the new layout
    pub added: Vec<usize>,
    /// Placements only present in the old layout
    pub removed: Vec<usize>,
    /// Placements with the same size at a different position
    pub moved: Vec<usize>,
    /// Placements with a different size
    pub resized: Vec<usize>,
}

impl LayoutDiff {
    /// Compares `new` against `old`. Without an old layout every placement counts as added.
    pub fn between(old: Option<&Layout>, new: &Layout) -> LayoutDiff {
        let old_by_id: HashMap<usize, &PlacedPiece> = old
            .map(|l| l.placed_pieces.iter().map(|pp| (pp.id, pp)).collect())
            .unwrap_or_default();

        let mut diff = LayoutDiff::default();
        for pp in &new.placed_pieces {
            match old_by_id.get(&pp.id) {
                None => diff.added.push(pp.id),
                Some(prev) if (prev.width, prev.height) != (pp.width, pp.height) => diff.resized.push(pp.id),
                Some(prev) if (prev.x, prev.y) != (pp.x, pp.y) => diff.moved.push(pp.id),
                Some(_) => {}
            }
        }
        if let Some(old) = old {
            diff.removed = old
                .placed_pieces
                .iter()
                .map(|pp| pp.id)
                .filter(|id| new.placed_piece(*id).is_none())
                .collect();
        }
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.moved.is_empty() && self.resized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn session() -> PackingSession {
        let cut_list = CutList::new(1000.0, 0.0, false)
            .and_then(|cl| cl.with_piece(500.0, 300.0, 2))
            .unwrap();
        PackingSession::new(cut_list)
    }

    #[test]
    fn pack_now_produces_layout() {
        let mut session = session();
        assert!(session.layout().is_none());
        let diff = session.pack_now().unwrap();
        assert_eq!(diff.added, vec![0, 1]);
        let layout = session.layout().unwrap();
        assert_eq!(layout.sheet_length, 500.0);
        assert!(session.unplaced().is_empty());
    }

    #[test]
    fn edit_invalidates_layout() {
        let mut session = session();
        session.pack_now().unwrap();
        session.edit(|cl| cl.with_piece(200.0, 100.0, 1)).unwrap();
        assert!(session.layout().is_none());
        assert_eq!(session.cut_list().n_instances(), 3);
    }

    #[test]
    fn failed_edit_keeps_layout() {
        let mut session = session();
        session.pack_now().unwrap();
        let generation = session.generation();
        assert!(session.edit(|cl| cl.with_piece(2000.0, 1500.0, 1)).is_err());
        assert!(session.layout().is_some());
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn last_request_wins() {
        let mut session = session();
        let first = session.request_pack();
        session.edit(|cl| cl.with_quantity(0, 3)).unwrap();
        let second = session.request_pack();

        let handles = [first, second].map(|ticket| thread::spawn(move || ticket.run().unwrap()));
        let [first, second] = handles.map(|h| h.join().unwrap());

        // the newest result arrives first, the stale one afterwards
        assert!(session.complete(second).is_some());
        assert!(session.complete(first).is_none());
        assert_eq!(session.layout().unwrap().placed_pieces.len(), 3);
    }

    #[test]
    fn moves_are_validated() {
        let mut session = session();
        assert_eq!(session.move_piece(0, 0.0, 0.0).unwrap_err(), KidoriError::NoLayout);
        session.pack_now().unwrap();

        let outcome = session.move_piece(1, 700.0, 0.0).unwrap();
        assert_eq!(outcome, MoveOutcome::Accepted { x: 700.0, y: 0.0 });
        let outcome = session.move_piece(1, 100.0, 0.0).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected { x: 700.0, y: 0.0 });
        assert_eq!(session.layout().unwrap().placed_piece(1).unwrap().x, 700.0);
    }

    #[test]
    fn diff_after_repack() {
        let mut session = session();
        session.pack_now().unwrap();
        session.move_piece(1, 700.0, 0.0).unwrap();
        let diff = session.pack_now().unwrap();
        assert_eq!(diff.moved, vec![1]);
        assert!(diff.added.is_empty() && diff.removed.is_empty() && diff.resized.is_empty());
    }
}
