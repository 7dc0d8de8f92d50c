//! Board topology: a fixed 3×3 grid of sectors with `start` in the centre.
//!
//! Sectors are laid out row-major exactly as the board is drawn:
//!
//! ```text
//! sector_a | sector_b | sector_c
//! sector_d |  start   | sector_e
//! sector_f | sector_g | sector_h
//! ```
//!
//! Adjacency is orthogonal only (up/down/left/right).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    SectorA,
    SectorB,
    SectorC,
    SectorD,
    Start,
    SectorE,
    SectorF,
    SectorG,
    SectorH,
}

/// All sectors in grid order.
pub const ALL_SECTORS: [Sector; 9] = [
    Sector::SectorA,
    Sector::SectorB,
    Sector::SectorC,
    Sector::SectorD,
    Sector::Start,
    Sector::SectorE,
    Sector::SectorF,
    Sector::SectorG,
    Sector::SectorH,
];

/// Sectors eligible for particle placement.
pub const NON_START_SECTORS: [Sector; 8] = [
    Sector::SectorA,
    Sector::SectorB,
    Sector::SectorC,
    Sector::SectorD,
    Sector::SectorE,
    Sector::SectorF,
    Sector::SectorG,
    Sector::SectorH,
];

const GRID_WIDTH: usize = 3;

impl Sector {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sector::SectorA => "sector_a",
            Sector::SectorB => "sector_b",
            Sector::SectorC => "sector_c",
            Sector::SectorD => "sector_d",
            Sector::Start => "start",
            Sector::SectorE => "sector_e",
            Sector::SectorF => "sector_f",
            Sector::SectorG => "sector_g",
            Sector::SectorH => "sector_h",
        }
    }

    /// Row-major grid index (0..9).
    fn grid_index(self) -> usize {
        ALL_SECTORS
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    fn coords(self) -> (usize, usize) {
        let i = self.grid_index();
        (i / GRID_WIDTH, i % GRID_WIDTH)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SECTORS
            .iter()
            .copied()
            .find(|sector| sector.as_str() == s)
            .ok_or_else(|| DomainError::invalid_target(format!("Unknown sector: {s}")))
    }
}

/// Every sector of the fixed topology.
pub fn all_sectors() -> &'static [Sector] {
    &ALL_SECTORS
}

/// True when `a` and `b` share an edge of the grid. A sector is not adjacent to itself.
pub fn is_adjacent(a: Sector, b: Sector) -> bool {
    let (ar, ac) = a.coords();
    let (br, bc) = b.coords();
    ar.abs_diff(br) + ac.abs_diff(bc) == 1
}

/// Orthogonal neighbours of `sector`, in grid order.
pub fn neighbours(sector: Sector) -> impl Iterator<Item = Sector> {
    ALL_SECTORS
        .into_iter()
        .filter(move |other| is_adjacent(sector, *other))
}

/// Uniformly chosen sector other than `start`.
pub fn random_non_start_sector<R: Rng + ?Sized>(rng: &mut R) -> Sector {
    NON_START_SECTORS[rng.random_range(0..NON_START_SECTORS.len())]
}
