//! End-to-end generation: graph, then coarse grid, then fine grid

use crate::graph::grid::GridGraph;
use crate::io::configuration::{
    DEFAULT_CYCLE_STEPS, DEFAULT_HEIGHT, DEFAULT_SEED, DEFAULT_WIDTH, MAX_GRID_DIMENSION,
    MIN_CYCLE_STEPS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::tiles::coarse::CoarseTileGrid;
use crate::tiles::fine::FineTileGrid;

/// Parameters for one generation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DungeonConfig {
    /// Graph width in cells
    pub width: usize,
    /// Graph height in cells
    pub height: usize,
    /// Number of random walk steps before the loop is closed
    pub cycle_steps: usize,
    /// Seed of the graph's random source
    pub seed: u64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cycle_steps: DEFAULT_CYCLE_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl DungeonConfig {
    /// Check dimensions and walk length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for zero or oversized dimensions, or a walk
    /// too short to form a loop
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.cycle_steps < MIN_CYCLE_STEPS {
            return Err(invalid_parameter(
                "cycle_steps",
                &self.cycle_steps,
                &format!("must be at least {MIN_CYCLE_STEPS}"),
            ));
        }
        Ok(())
    }

    /// Same configuration with a different seed
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}

/// All three layers of a generated dungeon
#[derive(Debug)]
pub struct Dungeon {
    /// Connectivity graph
    pub graph: GridGraph,
    /// Coarse tile grid derived from the graph
    pub coarse: CoarseTileGrid,
    /// Fine tile grid derived from the coarse grid
    pub fine: FineTileGrid,
}

/// Runs the generation pipeline for one configuration
pub struct DungeonGenerator {
    config: DungeonConfig,
}

impl DungeonGenerator {
    /// Create a generator after validating `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is rejected
    pub fn new(config: DungeonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this generator runs with
    pub const fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Generate the graph only
    ///
    /// # Errors
    ///
    /// Propagates the first failing placement step
    pub fn generate_graph(&self) -> Result<GridGraph> {
        let DungeonConfig {
            width,
            height,
            cycle_steps,
            seed,
        } = self.config;
        log::debug!("generating {width}x{height} graph with seed {seed}");

        let mut graph = GridGraph::with_seed(width, height, seed);
        graph.place_entrance()?;
        graph.place_cycle_entrance()?;
        graph.carve_cycle_path(cycle_steps)?;
        graph.place_goal()?;

        log::debug!("generated graph:\n{graph}");
        Ok(graph)
    }

    /// Generate the graph and both tile grids
    ///
    /// # Errors
    ///
    /// Propagates the first failing placement step; the tile passes
    /// themselves cannot fail
    pub fn generate(&self) -> Result<Dungeon> {
        let graph = self.generate_graph()?;
        let coarse = CoarseTileGrid::new(&graph);
        let fine = FineTileGrid::new(&coarse);
        log::info!(
            "seed {} produced {} areas on a {}x{} tile grid",
            self.config.seed,
            fine.areas().len(),
            fine.width(),
            fine.height()
        );
        Ok(Dungeon {
            graph,
            coarse,
            fine,
        })
    }
}
