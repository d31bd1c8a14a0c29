use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single game, from the first step to victory or defeat.
///
/// Mines are placed lazily by the first [`Board::step`], with the stepped cell
/// kept safe. Until then the hidden truth is absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board<G = RandomMinefieldGenerator> {
    config: GameConfig,
    generator: G,
    knowledge: Array2<Knowledge>,
    truth: Option<MineLayout>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    end_state: Option<EndState>,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates a board with randomly placed mines.
    pub fn new(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((width, height), mines)?;
        Ok(Self::with_generator(config, RandomMinefieldGenerator::new(seed)))
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            knowledge: Array2::default(config.size.to_nd_index()),
            truth: None,
            revealed_count: 0,
            flagged_count: 0,
            end_state: None,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    /// Mine count of the placed layout, or the configured count before the first step.
    pub fn num_mines(&self) -> CellCount {
        self.truth
            .as_ref()
            .map_or(self.config.mines, MineLayout::mine_count)
    }

    pub fn num_revealed(&self) -> CellCount {
        self.revealed_count
    }

    pub fn num_flagged(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative with too many flags.
    pub fn mines_left(&self) -> isize {
        (self.num_mines() as isize) - (self.flagged_count as isize)
    }

    pub fn knowledge_at(&self, coords: Coord2) -> Result<Knowledge> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.knowledge[coords.to_nd_index()])
    }

    /// Hidden truth of a cell, absent until mines are placed.
    pub fn truth_at(&self, coords: Coord2) -> Result<Option<CellTruth>> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.truth.as_ref().map(|layout| layout.truth_at(coords)))
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.truth.as_ref()
    }

    pub fn mines_placed(&self) -> bool {
        self.truth.is_some()
    }

    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }

    pub fn is_over(&self) -> bool {
        self.end_state.is_some()
    }

    /// The mine that ended the game in defeat.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reveals a cell, flooding outwards from bare cells.
    ///
    /// Stepping a cell that is not hidden, or stepping after the game ended, is
    /// a no-op. Returns the end state once the game is over.
    pub fn step(&mut self, x: Coord, y: Coord) -> Result<Option<EndState>> {
        let coords = self.config.validate_coords((x, y))?;
        self.ensure_mines_placed(coords);

        if self.end_state.is_some() {
            return Ok(self.end_state);
        }

        if !self.knowledge[coords.to_nd_index()].is_hidden() {
            return Ok(None);
        }

        let Some(layout) = self.truth.take() else {
            return Ok(None);
        };
        self.reveal(&layout, coords);
        self.truth = Some(layout);

        Ok(self.end_state)
    }

    /// `Hidden` to `Flagged`, a no-op for any other cell or after the game ended.
    pub fn flag(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords((x, y))?;
        Ok(self.mark(coords, Knowledge::Hidden, Knowledge::Flagged))
    }

    /// `Flagged` to `Hidden`, a no-op for any other cell or after the game ended.
    pub fn unflag(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords((x, y))?;
        Ok(self.mark(coords, Knowledge::Flagged, Knowledge::Hidden))
    }

    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords((x, y))?;
        Ok(match self.knowledge[coords.to_nd_index()] {
            Knowledge::Hidden => self.mark(coords, Knowledge::Hidden, Knowledge::Flagged),
            Knowledge::Flagged => self.mark(coords, Knowledge::Flagged, Knowledge::Hidden),
            Knowledge::Stepped => MarkOutcome::NoChange,
        })
    }

    fn mark(&mut self, coords: Coord2, from: Knowledge, to: Knowledge) -> MarkOutcome {
        let cell = &mut self.knowledge[coords.to_nd_index()];
        if self.end_state.is_some() || *cell != from {
            return MarkOutcome::NoChange;
        }

        *cell = to;
        if to.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Marked {:?} as {:?}", coords, to);
        MarkOutcome::Changed
    }

    fn ensure_mines_placed(&mut self, safe: Coord2) {
        if self.truth.is_none() {
            let layout = self.generator.generate(self.config, safe);
            self.truth = Some(layout);
        }
    }

    fn reveal(&mut self, layout: &MineLayout, coords: Coord2) {
        self.knowledge[coords.to_nd_index()] = Knowledge::Stepped;
        self.revealed_count += 1;

        if layout.contains_mine(coords) {
            log::debug!("Stepped on a mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_state = Some(EndState::Defeat);
            return;
        }

        log::debug!(
            "Stepped at {:?}, mine count: {}",
            coords,
            layout.adjacent_mine_count(coords)
        );
        if layout.adjacent_mine_count(coords) == 0 {
            self.flood_from(layout, coords);
        }

        if self.revealed_count + layout.mine_count() >= self.config.total_cells() {
            self.win(layout);
        }
    }

    /// Opens the bare region around `start` together with its numbered border.
    fn flood_from(&mut self, layout: &MineLayout, start: Coord2) {
        let mut to_visit: VecDeque<_> = layout.iter_neighbors(start).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            // skip flagged, already stepped, or queued twice
            if !self.knowledge[visit_coords.to_nd_index()].is_hidden() {
                continue;
            }

            self.knowledge[visit_coords.to_nd_index()] = Knowledge::Stepped;
            self.revealed_count += 1;

            let visit_count = layout.adjacent_mine_count(visit_coords);
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                to_visit.extend(
                    layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.knowledge[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    fn win(&mut self, layout: &MineLayout) {
        self.end_state = Some(EndState::Victory);

        for coords in layout.iter_mines() {
            let cell = &mut self.knowledge[coords.to_nd_index()];
            if cell.is_hidden() {
                *cell = Knowledge::Flagged;
                self.flagged_count += 1;
            }
        }
        log::debug!("Won with {} cells revealed", self.revealed_count);
    }
}
