use super::element::{Movement, UpdateRule};
use super::movement::solid::solid_process;
use crate::physics::fallingsand::data::element_grid::ElementGrid;
use crate::physics::fallingsand::util::vectors::CellVector;

/// Sand falls like any other solid
#[derive(Default, Copy, Clone, Debug)]
pub struct Sand;

impl UpdateRule for Sand {
    fn evaluate(&self, element_grid: &ElementGrid, pos: CellVector) -> Movement {
        solid_process(element_grid, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::fallingsand::elements::element::ElementType;

    /// Simple tests for testing that the sand falls down through an empty column
    mod falls_down {
        use super::*;

        macro_rules! test_falls_from {
            ($name:ident, $col:expr, $row:expr) => {
                #[test]
                fn $name() {
                    let mut element_grid = ElementGrid::new_empty(5, 5);
                    let pos = CellVector::new($col, $row);
                    element_grid.insert(pos).unwrap();
                    let rule = ElementType::Sand.get_rule();
                    assert_eq!(
                        rule.evaluate(&element_grid, pos),
                        Movement::MoveTo(pos + CellVector::DOWN)
                    );
                }
            };
        }

        test_falls_from!(test_falls_from_top_left, 0, 0);
        test_falls_from!(test_falls_from_top_right, 4, 0);
        test_falls_from!(test_falls_from_middle, 2, 2);
        test_falls_from!(test_falls_from_above_floor, 3, 3);
    }

    #[test]
    fn test_sand_uses_solid_rule() {
        let mut element_grid = ElementGrid::new_empty(3, 2);
        element_grid.insert(CellVector::new(1, 0)).unwrap();
        element_grid.insert(CellVector::new(1, 1)).unwrap();
        let pos = CellVector::new(1, 0);
        assert_eq!(
            Sand.evaluate(&element_grid, pos),
            solid_process(&element_grid, pos)
        );
    }
}
