use super::Constraint;
use super::GlobalConstraint;
use crate::error::ModelError;
use crate::expressions::scalar;
use crate::expressions::Expression;
use crate::expressions::IntoCondition;

/// Collects a non-empty array argument.
fn array<E: Into<Expression>>(
    argument: &'static str,
    elements: impl IntoIterator<Item = E>,
) -> Result<Vec<Expression>, ModelError> {
    let elements = elements.into_iter().map(Into::into).collect::<Vec<_>>();
    if elements.is_empty() {
        return Err(ModelError::EmptyOperandSequence { argument });
    }
    Ok(elements)
}

/// Collects a non-empty array argument of scalars.
fn scalar_array<E: Into<Expression>>(
    argument: &'static str,
    elements: impl IntoIterator<Item = E>,
) -> Result<Vec<Expression>, ModelError> {
    array(argument, elements)?
        .into_iter()
        .map(|element| scalar(argument, element))
        .collect()
}

fn condition_array<C: IntoCondition>(
    argument: &'static str,
    elements: impl IntoIterator<Item = C>,
) -> Result<Vec<Expression>, ModelError> {
    let elements = elements
        .into_iter()
        .map(|element| {
            element
                .into_condition()
                .map(Into::into)
                .map_err(|found| ModelError::InvalidConditionKind { argument, found })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if elements.is_empty() {
        return Err(ModelError::EmptyOperandSequence { argument });
    }
    Ok(elements)
}

fn check_length(
    constraint: GlobalConstraint,
    argument: &'static str,
    expected: usize,
    elements: &[Expression],
) -> Result<(), ModelError> {
    if elements.len() != expected {
        return Err(ModelError::MismatchedLengths {
            constraint,
            argument,
            expected,
            actual: elements.len(),
        });
    }
    Ok(())
}

fn int_array(values: impl IntoIterator<Item = i64>) -> Vec<Expression> {
    values.into_iter().map(Expression::int).collect()
}

/// Creates the constraint that all `expressions` take pairwise different values.
pub fn all_different<E: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let expressions = array("expressions", expressions)?;
    Ok(Constraint::global(
        GlobalConstraint::AllDifferent,
        vec![Expression::array(expressions)],
    ))
}

/// Creates the constraint that all `expressions` take the same value.
pub fn all_equal<E: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let expressions = array("expressions", expressions)?;
    Ok(Constraint::global(
        GlobalConstraint::AllEqual,
        vec![Expression::array(expressions)],
    ))
}

/// Creates the constraint that exactly `count` of the `expressions` take a value in `values`.
pub fn among<E: Into<Expression>>(
    count: impl Into<Expression>,
    expressions: impl IntoIterator<Item = E>,
    values: impl IntoIterator<Item = i64>,
) -> Result<Constraint, ModelError> {
    let count = scalar("count", count)?;
    let expressions = scalar_array("expressions", expressions)?;
    Ok(Constraint::global(
        GlobalConstraint::Among,
        vec![
            count,
            Expression::array(expressions),
            Expression::int_set(values),
        ],
    ))
}

/// Creates the constraint that `value` occurs exactly `count` times in `expressions`.
pub fn count<E: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
    value: impl Into<Expression>,
    count: impl Into<Expression>,
) -> Result<Constraint, ModelError> {
    let expressions = scalar_array("expressions", expressions)?;
    let value = scalar("value", value)?;
    let count = scalar("count", count)?;
    Ok(Constraint::global(
        GlobalConstraint::Count,
        vec![Expression::array(expressions), value, count],
    ))
}

/// Creates the constraint that `expressions` is in non-strictly increasing order.
pub fn increasing<E: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let expressions = array("expressions", expressions)?;
    Ok(Constraint::global(
        GlobalConstraint::Increasing,
        vec![Expression::array(expressions)],
    ))
}

/// Creates the constraint that `expressions` is in non-strictly decreasing order.
pub fn decreasing<E: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let expressions = array("expressions", expressions)?;
    Ok(Constraint::global(
        GlobalConstraint::Decreasing,
        vec![Expression::array(expressions)],
    ))
}

fn scheduling<S: Into<Expression>, D: Into<Expression>>(
    constraint: GlobalConstraint,
    start_times: impl IntoIterator<Item = S>,
    durations: impl IntoIterator<Item = D>,
) -> Result<Constraint, ModelError> {
    let start_times = scalar_array("start_times", start_times)?;
    let durations = scalar_array("durations", durations)?;
    check_length(constraint, "durations", start_times.len(), &durations)?;

    Ok(Constraint::global(
        constraint,
        vec![
            Expression::array(start_times),
            Expression::array(durations),
        ],
    ))
}

/// Creates the constraint that the tasks given by `start_times` and `durations` do not overlap.
///
/// Tasks with duration zero may be scheduled at any time.
pub fn disjunctive<S: Into<Expression>, D: Into<Expression>>(
    start_times: impl IntoIterator<Item = S>,
    durations: impl IntoIterator<Item = D>,
) -> Result<Constraint, ModelError> {
    scheduling(GlobalConstraint::Disjunctive, start_times, durations)
}

/// Creates the constraint that the tasks given by `start_times` and `durations` do not overlap,
/// where tasks with duration zero may also not be scheduled during another task.
pub fn disjunctive_strict<S: Into<Expression>, D: Into<Expression>>(
    start_times: impl IntoIterator<Item = S>,
    durations: impl IntoIterator<Item = D>,
) -> Result<Constraint, ModelError> {
    scheduling(GlobalConstraint::DisjunctiveStrict, start_times, durations)
}

/// Creates the constraint that `permutation` sorts `expressions`, i.e.
/// `x[p[i]] <= x[p[i + 1]]`.
pub fn arg_sort<E: Into<Expression>, P: Into<Expression>>(
    expressions: impl IntoIterator<Item = E>,
    permutation: impl IntoIterator<Item = P>,
) -> Result<Constraint, ModelError> {
    let expressions = scalar_array("expressions", expressions)?;
    let permutation = scalar_array("permutation", permutation)?;
    check_length(
        GlobalConstraint::ArgSort,
        "permutation",
        expressions.len(),
        &permutation,
    )?;

    Ok(Constraint::global(
        GlobalConstraint::ArgSort,
        vec![
            Expression::array(expressions),
            Expression::array(permutation),
        ],
    ))
}

/// Creates the constraint that the rectangles with origins `(x[i], y[i])` and sizes
/// `(dx[i], dy[i])` do not overlap.
pub fn diffn<X, Y, DX, DY>(
    x: impl IntoIterator<Item = X>,
    y: impl IntoIterator<Item = Y>,
    dx: impl IntoIterator<Item = DX>,
    dy: impl IntoIterator<Item = DY>,
) -> Result<Constraint, ModelError>
where
    X: Into<Expression>,
    Y: Into<Expression>,
    DX: Into<Expression>,
    DY: Into<Expression>,
{
    let x = scalar_array("x", x)?;
    let y = scalar_array("y", y)?;
    let dx = scalar_array("dx", dx)?;
    let dy = scalar_array("dy", dy)?;
    check_length(GlobalConstraint::Diffn, "y", x.len(), &y)?;
    check_length(GlobalConstraint::Diffn, "dx", x.len(), &dx)?;
    check_length(GlobalConstraint::Diffn, "dy", x.len(), &dy)?;

    Ok(Constraint::global(
        GlobalConstraint::Diffn,
        [x, y, dx, dy].into_iter().map(Expression::array).collect(),
    ))
}

struct Graph {
    from: Vec<Expression>,
    to: Vec<Expression>,
    nodes: Vec<Expression>,
    edges: Vec<Expression>,
}

fn graph<N: IntoCondition, E: IntoCondition>(
    constraint: GlobalConstraint,
    from: impl IntoIterator<Item = i64>,
    to: impl IntoIterator<Item = i64>,
    nodes: impl IntoIterator<Item = N>,
    edges: impl IntoIterator<Item = E>,
) -> Result<Graph, ModelError> {
    let from = int_array(from);
    let to = int_array(to);
    let nodes = condition_array("nodes", nodes)?;
    let edges = condition_array("edges", edges)?;
    check_length(constraint, "to", from.len(), &to)?;
    check_length(constraint, "edges", from.len(), &edges)?;

    Ok(Graph {
        from,
        to,
        nodes,
        edges,
    })
}

/// Creates the constraint that the subgraph selected by `nodes` and `edges` is connected.
///
/// Edge `i` of the underlying graph connects node `from[i]` to node `to[i]`, where nodes are
/// numbered from one.
pub fn connected<N: IntoCondition, E: IntoCondition>(
    from: impl IntoIterator<Item = i64>,
    to: impl IntoIterator<Item = i64>,
    nodes: impl IntoIterator<Item = N>,
    edges: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let Graph {
        from,
        to,
        nodes,
        edges,
    } = graph(GlobalConstraint::Connected, from, to, nodes, edges)?;

    Ok(Constraint::global(
        GlobalConstraint::Connected,
        [from, to, nodes, edges]
            .into_iter()
            .map(Expression::array)
            .collect(),
    ))
}

/// Creates the constraint that every node of the subgraph selected by `nodes` and `edges` is
/// reachable from `root`.
pub fn reachable<N: IntoCondition, E: IntoCondition>(
    from: impl IntoIterator<Item = i64>,
    to: impl IntoIterator<Item = i64>,
    root: impl Into<Expression>,
    nodes: impl IntoIterator<Item = N>,
    edges: impl IntoIterator<Item = E>,
) -> Result<Constraint, ModelError> {
    let root = scalar("root", root)?;
    let Graph {
        from,
        to,
        nodes,
        edges,
    } = graph(GlobalConstraint::Reachable, from, to, nodes, edges)?;

    Ok(Constraint::global(
        GlobalConstraint::Reachable,
        vec![
            Expression::array(from),
            Expression::array(to),
            root,
            Expression::array(nodes),
            Expression::array(edges),
        ],
    ))
}
