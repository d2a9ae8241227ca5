//! Field of crop dots
//!
//! Each cell is either a crop at some growth level or a hay ball. The field
//! grows while untouched, is mown under the tractor, and hay balls form where
//! enough of the neighbourhood is already mown.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GROWN, GROWTH_STEP, HAYBALL_NEIGHBOURS, MAX_MOWN};

/// One cell of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dot {
    /// Crop at a growth level (0 = freshly cut)
    Crop(u8),
    /// Bundled hay waiting to be gathered
    HayBall,
}

impl Default for Dot {
    fn default() -> Self {
        Dot::Crop(0)
    }
}

impl Dot {
    pub fn is_mown(self) -> bool {
        matches!(self, Dot::Crop(level) if level <= MAX_MOWN)
    }

    pub fn is_grown(self) -> bool {
        matches!(self, Dot::Crop(level) if level >= GROWN)
    }

    pub fn is_hayball(self) -> bool {
        self == Dot::HayBall
    }
}

/// Rectangular grid of dots, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub width: usize,
    pub height: usize,
    dots: Vec<Dot>,
}

impl Field {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![Dot::default(); width * height],
        }
    }

    /// Field dimensions as a vector
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    #[inline]
    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn get(&self, cell: IVec2) -> Option<Dot> {
        self.index(cell).map(|i| self.dots[i])
    }

    pub fn set(&mut self, cell: IVec2, dot: Dot) {
        if let Some(i) = self.index(cell) {
            self.dots[i] = dot;
        }
    }

    /// Iterate cells with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Dot)> + '_ {
        let width = self.width;
        self.dots
            .iter()
            .enumerate()
            .map(move |(i, &dot)| (IVec2::new((i % width) as i32, (i / width) as i32), dot))
    }

    /// Fresh stubble everywhere
    pub fn reset(&mut self, rng: &mut impl Rng) {
        for dot in &mut self.dots {
            *dot = fresh_cut(rng);
        }
    }

    /// One growth step for every crop not yet grown
    pub fn grow(&mut self, rng: &mut impl Rng) {
        for dot in &mut self.dots {
            if let Dot::Crop(level) = dot {
                if *level < GROWN {
                    *level = (*level + rng.random_range(0..GROWTH_STEP)).min(GROWN);
                }
            }
        }
    }

    pub fn is_grown(&self) -> bool {
        self.dots.iter().all(|d| d.is_grown())
    }

    pub fn is_mown(&self) -> bool {
        self.dots.iter().all(|d| d.is_mown() || d.is_hayball())
    }

    pub fn is_gathered(&self) -> bool {
        self.dots.iter().all(|d| d.is_mown())
    }

    pub fn count(&self, pred: impl Fn(Dot) -> bool) -> usize {
        self.dots.iter().filter(|&&d| pred(d)).count()
    }

    pub fn count_hayballs(&self) -> usize {
        self.count(Dot::is_hayball)
    }

    /// Fraction of cells matching `pred` (1.0 for an empty field)
    pub fn fraction(&self, pred: impl Fn(Dot) -> bool) -> f32 {
        if self.dots.is_empty() {
            return 1.0;
        }
        self.count(pred) as f32 / self.dots.len() as f32
    }

    /// Whether `cell` would become a hay ball if mown now.
    ///
    /// Hay balls never touch, and at least three of the eight neighbours
    /// must already be mown.
    pub fn is_hayball(&self, cell: IVec2) -> bool {
        let mut mown = 0;
        let mut qualifies = false;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some(dot) = self.get(cell + IVec2::new(dx, dy)) else {
                    continue;
                };
                if dot.is_hayball() {
                    return false;
                }
                if dot.is_mown() {
                    mown += 1;
                    if mown == HAYBALL_NEIGHBOURS {
                        qualifies = true;
                    }
                }
            }
        }
        qualifies
    }

    /// Mow every on-field cell in `cells`. Returns the hay balls formed.
    ///
    /// A hay ball run over by the mower is cut back to stubble.
    pub fn mow(&mut self, cells: &[IVec2], rng: &mut impl Rng) -> usize {
        let mut formed = 0;
        for &cell in cells {
            match self.get(cell) {
                None => {}
                Some(Dot::HayBall) => self.set(cell, fresh_cut(rng)),
                Some(Dot::Crop(_)) => {
                    if self.is_hayball(cell) {
                        log::debug!("Hay ball formed at {}", cell);
                        self.set(cell, Dot::HayBall);
                        formed += 1;
                    } else {
                        self.set(cell, fresh_cut(rng));
                    }
                }
            }
        }
        formed
    }

    /// Pick up every hay ball in `cells`. Returns how many were collected.
    pub fn gather(&mut self, cells: &[IVec2], rng: &mut impl Rng) -> usize {
        let mut collected = 0;
        for &cell in cells {
            if self.get(cell) == Some(Dot::HayBall) {
                log::debug!("Hay ball collected at {}", cell);
                self.set(cell, fresh_cut(rng));
                collected += 1;
            }
        }
        collected
    }
}

fn fresh_cut(rng: &mut impl Rng) -> Dot {
    Dot::Crop(rng.random_range(0..MAX_MOWN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grown_field(width: usize, height: usize) -> Field {
        let mut field = Field::new(width, height);
        for dot in &mut field.dots {
            *dot = Dot::Crop(GROWN);
        }
        field
    }

    #[test]
    fn test_reset_is_fresh_stubble() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = grown_field(8, 8);
        field.reset(&mut rng);
        assert!(field.dots().iter().all(|d| matches!(d, Dot::Crop(l) if *l < MAX_MOWN)));
        assert!(field.is_gathered());
        assert!(!field.is_grown());
    }

    #[test]
    fn test_grow_clamps_at_grown() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = grown_field(4, 4);
        field.set(IVec2::ZERO, Dot::HayBall);
        field.grow(&mut rng);
        assert_eq!(field.get(IVec2::new(1, 0)), Some(Dot::Crop(GROWN)));
        assert_eq!(field.get(IVec2::ZERO), Some(Dot::HayBall));
    }

    #[test]
    fn test_predicates() {
        let mut field = Field::new(3, 3);
        assert!(field.is_mown());
        assert!(field.is_gathered());
        field.set(IVec2::new(1, 1), Dot::HayBall);
        assert!(field.is_mown());
        assert!(!field.is_gathered());
        field.set(IVec2::new(2, 2), Dot::Crop(MAX_MOWN + 1));
        assert!(!field.is_mown());
        assert_eq!(field.count_hayballs(), 1);
    }

    #[test]
    fn test_hayball_three_mown_neighbours() {
        let mut field = grown_field(5, 5);
        let center = IVec2::new(2, 2);
        assert!(!field.is_hayball(center));
        field.set(IVec2::new(1, 1), Dot::Crop(0));
        field.set(IVec2::new(2, 1), Dot::Crop(MAX_MOWN));
        assert!(!field.is_hayball(center));
        field.set(IVec2::new(3, 3), Dot::Crop(1));
        assert!(field.is_hayball(center));
    }

    #[test]
    fn test_hayball_never_touches_another() {
        let mut field = Field::new(5, 5);
        let center = IVec2::new(2, 2);
        assert!(field.is_hayball(center));
        field.set(IVec2::new(3, 1), Dot::HayBall);
        assert!(!field.is_hayball(center));
    }

    #[test]
    fn test_hayball_corner_counts_in_bounds_only() {
        let mut field = grown_field(4, 4);
        field.set(IVec2::new(1, 0), Dot::Crop(0));
        field.set(IVec2::new(0, 1), Dot::Crop(0));
        assert!(!field.is_hayball(IVec2::ZERO));
        field.set(IVec2::new(1, 1), Dot::Crop(0));
        assert!(field.is_hayball(IVec2::ZERO));
    }

    #[test]
    fn test_mow_and_gather() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = grown_field(6, 6);
        let cells = [IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)];

        // Off-field cells are skipped
        field.mow(&[IVec2::new(-1, 0)], &mut rng);
        let formed = field.mow(&cells, &mut rng);
        // The last cell sees three freshly mown neighbours
        assert_eq!(formed, 1);
        assert_eq!(field.get(IVec2::new(1, 1)), Some(Dot::HayBall));
        assert!(field.get(IVec2::new(0, 0)).is_some_and(Dot::is_mown));

        assert_eq!(field.gather(&cells, &mut rng), 1);
        assert_eq!(field.count_hayballs(), 0);
        assert!(field.get(IVec2::new(1, 1)).is_some_and(Dot::is_mown));
    }

    #[test]
    fn test_mow_cuts_existing_hayball() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = grown_field(4, 4);
        let ball = IVec2::new(1, 1);
        field.set(ball, Dot::HayBall);
        for cell in [IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(0, 1)] {
            field.set(cell, Dot::Crop(0));
        }

        assert_eq!(field.mow(&[ball], &mut rng), 0);
        assert!(matches!(field.get(ball), Some(Dot::Crop(level)) if level < MAX_MOWN));
        assert_eq!(field.count_hayballs(), 0);
    }

    #[test]
    fn test_iter_coordinates() {
        let mut field = Field::new(3, 2);
        field.set(IVec2::new(2, 1), Dot::HayBall);
        let ball = field.iter().find(|(_, d)| d.is_hayball()).map(|(c, _)| c);
        assert_eq!(ball, Some(IVec2::new(2, 1)));
        assert!((field.fraction(Dot::is_hayball) - 1.0 / 6.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_growth_finishes(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = Field::new(8, 8);
            field.reset(&mut rng);
            let mut ticks = 0;
            while !field.is_grown() {
                field.grow(&mut rng);
                ticks += 1;
                prop_assert!(ticks < 500, "field still growing after {} ticks", ticks);
            }
        }

        #[test]
        fn prop_ball_neighbour_blocks(mown in prop::collection::vec(any::<bool>(), 8), ball in 0usize..8) {
            let mut field = grown_field(3, 3);
            let neighbours: Vec<IVec2> = field
                .iter()
                .map(|(c, _)| c)
                .filter(|&c| c != IVec2::ONE)
                .collect();
            for (cell, m) in neighbours.iter().zip(&mown) {
                if *m {
                    field.set(*cell, Dot::Crop(0));
                }
            }
            field.set(neighbours[ball], Dot::HayBall);
            prop_assert!(!field.is_hayball(IVec2::ONE));
        }
    }
}
