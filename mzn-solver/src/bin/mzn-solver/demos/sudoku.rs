use itertools::iproduct;
use mzn_solver::constraints;
use mzn_solver::constraints::PropagationStrength;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

/// Zero marks an empty cell.
const PUZZLE: [[i64; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A sudoku with boxes of `size` by `size` cells; the classic puzzle is used when `size` is 3 and
/// the grid is left empty otherwise.
pub(super) fn build(size: u32) -> Result<Model, ModelError> {
    let size = size as usize;
    let n = size * size;
    let mut model = Model::default();

    let cells = model.add_variables_with("cell", iproduct!(0..n, 0..n), |&(row, column)| {
        if n == 9 && PUZZLE[row][column] > 0 {
            VariableDefinition::int().with_domain([PUZZLE[row][column]])
        } else {
            VariableDefinition::int().with_bounds(1, n as i64)
        }
    })?;

    let mut groups = vec![];
    for line in 0..n {
        groups.push(iproduct!([line], 0..n).collect::<Vec<_>>());
        groups.push(iproduct!(0..n, [line]).collect::<Vec<_>>());
    }
    for (box_row, box_column) in iproduct!(0..size, 0..size) {
        groups.push(
            iproduct!(0..size, 0..size)
                .map(|(row, column)| (box_row * size + row, box_column * size + column))
                .collect(),
        );
    }

    let constraints = groups
        .iter()
        .map(|group| {
            constraints::all_different(group.iter().map(|index| &cells[index]))
                .map(|constraint| constraint.with_propagation(PropagationStrength::Domain))
        })
        .collect::<Result<Vec<_>, _>>()?;
    model.add_constraints(constraints).post()?;
    model.satisfy();

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn givens_are_fixed_through_the_domain() {
        let mut model = build(3).unwrap();
        let text = model.generate().unwrap();

        assert!(text.contains("var {5}: cell_0_0;"));
        assert!(text.contains("var 1..9: cell_0_2;"));
        assert_eq!(27, text.matches("all_different(").count());
        assert!(text.contains(
            "constraint all_different([cell_0_0, cell_0_1, cell_0_2, cell_1_0, cell_1_1, \
             cell_1_2, cell_2_0, cell_2_1, cell_2_2]) :: domain;"
        ));
    }

    #[test]
    fn small_grids_have_no_givens() {
        let mut model = build(2).unwrap();
        let text = model.generate().unwrap();

        assert_eq!(16, text.matches("var 1..4: cell_").count());
        assert_eq!(12, text.matches("all_different(").count());
    }
}
