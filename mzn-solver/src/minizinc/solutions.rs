use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use mzn_core::variables::Variable;
use regex::Regex;

const SOLUTION_SEPARATOR: &str = "----------";
const OBJECTIVE_NAME: &str = "_objective";
/// The largest `lo..hi` set value that is expanded into its elements.
const MAX_RANGE_SIZE: i128 = 1 << 20;

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+)\s*\.\.\s*(-?\d+)$").expect("the range pattern is a valid regex")
});
static ARRAY_ND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^array\d+d\([^\[]*(\[.*\])\s*\)$").expect("the array pattern is a valid regex")
});

/// A value assigned to an identifier in the `dzn` output of MiniZinc.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    IntSet(BTreeSet<i64>),
    /// Arrays are flattened in row-major order, whatever their dimension.
    Array(Vec<Value>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers are widened to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<i64>> {
        match self {
            Value::IntSet(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::IntSet(values) => write!(f, "{{{}}}", values.iter().join(", ")),
            Value::Array(values) => write!(f, "[{}]", values.iter().join(", ")),
        }
    }
}

impl FromStr for Value {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(value) = s.parse::<bool>() {
            return Ok(Value::Bool(value));
        }
        if let Ok(value) = s.parse::<i64>() {
            return Ok(Value::Int(value));
        }
        if let Ok(value) = s.parse::<f64>() {
            return Ok(Value::Float(value));
        }

        if let Some(captures) = RANGE.captures(s) {
            let lower = parse_int(&captures[1])?;
            let upper = parse_int(&captures[2])?;
            if i128::from(upper) - i128::from(lower) >= MAX_RANGE_SIZE {
                return Err(format!(
                    "the set {lower}..{upper} exceeds {MAX_RANGE_SIZE} elements"
                ));
            }
            return Ok(Value::IntSet((lower..=upper).collect()));
        }

        if let Some(elements) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            return split_elements(elements)
                .into_iter()
                .map(parse_int)
                .collect::<Result<BTreeSet<_>, _>>()
                .map(Value::IntSet);
        }

        if let Some(elements) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return split_elements(elements)
                .into_iter()
                .map(str::parse::<Value>)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        if let Some(captures) = ARRAY_ND.captures(s) {
            return captures[1].parse::<Value>();
        }

        Err(format!("unrecognised value '{s}'"))
    }
}

fn parse_int(s: &str) -> Result<i64, String> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| format!("expected an integer but found '{s}'"))
}

/// Splits on the commas which are not nested inside a set or an array.
fn split_elements(s: &str) -> Vec<&str> {
    if s.trim().is_empty() {
        return vec![];
    }

    let mut elements = vec![];
    let mut depth = 0_usize;
    let mut start = 0;
    for (position, character) in s.char_indices() {
        match character {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                elements.push(&s[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    elements.push(&s[start..]);
    elements
}

/// One assignment reported by MiniZinc, mapping identifiers to their values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    assignments: BTreeMap<String, Value>,
}

impl Solution {
    pub fn get(&self, variable: &Variable) -> Option<&Value> {
        self.get_by_name(variable.name())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.assignments.get(name)
    }

    pub fn int_value(&self, variable: &Variable) -> Option<i64> {
        self.get(variable).and_then(Value::as_int)
    }

    pub fn bool_value(&self, variable: &Variable) -> Option<bool> {
        self.get(variable).and_then(Value::as_bool)
    }

    pub fn float_value(&self, variable: &Variable) -> Option<f64> {
        self.get(variable).and_then(Value::as_float)
    }

    pub fn set_value(&self, variable: &Variable) -> Option<&BTreeSet<i64>> {
        self.get(variable).and_then(Value::as_set)
    }

    /// The objective value, present when the model was optimised.
    pub fn objective(&self) -> Option<&Value> {
        self.assignments.get(OBJECTIVE_NAME)
    }

    /// The assignments in name order, excluding the objective.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.assignments
            .iter()
            .filter(|(name, _)| name.as_str() != OBJECTIVE_NAME)
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl FromStr for Solution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let assignments = s
            .split(';')
            .map(str::trim)
            .filter(|statement| !statement.is_empty())
            .map(parse_assignment)
            .collect::<Result<_, _>>()?;

        Ok(Solution { assignments })
    }
}

fn parse_assignment(statement: &str) -> Result<(String, Value), String> {
    let (name, value) = statement
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment '{statement}'"))?;

    let value = value
        .parse::<Value>()
        .map_err(|error| format!("failed to parse '{statement}': {error}"))?;

    Ok((name.trim().to_owned(), value))
}

/// How a MiniZinc run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// At least one solution was found, but the search was not completed.
    Satisfied,
    /// The search space was exhausted: every solution was reported or the last one is optimal.
    Complete,
    Unsatisfiable,
    Unbounded,
    UnsatisfiableOrUnbounded,
    /// The solver stopped without a solution or a proof of unsatisfiability.
    Unknown,
    Error,
}

impl SolveStatus {
    fn from_marker(line: &str) -> Option<SolveStatus> {
        match line {
            "==========" => Some(SolveStatus::Complete),
            "=====UNSATISFIABLE=====" => Some(SolveStatus::Unsatisfiable),
            "=====UNBOUNDED=====" => Some(SolveStatus::Unbounded),
            "=====UNSATorUNBOUNDED=====" => Some(SolveStatus::UnsatisfiableOrUnbounded),
            "=====UNKNOWN=====" => Some(SolveStatus::Unknown),
            "=====ERROR=====" => Some(SolveStatus::Error),
            _ => None,
        }
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let description = match self {
            SolveStatus::Satisfied => "satisfied",
            SolveStatus::Complete => "complete",
            SolveStatus::Unsatisfiable => "unsatisfiable",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::UnsatisfiableOrUnbounded => "unsatisfiable or unbounded",
            SolveStatus::Unknown => "unknown",
            SolveStatus::Error => "error",
        };
        f.write_str(description)
    }
}

/// The parsed standard output of a MiniZinc run in `dzn` output mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveResult {
    status: SolveStatus,
    solutions: Vec<Solution>,
}

impl SolveResult {
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// The solutions in the order in which MiniZinc reported them.
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// The last reported solution. When optimising, this is the best one found.
    pub fn best_solution(&self) -> Option<&Solution> {
        self.solutions.last()
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.status == SolveStatus::Unsatisfiable
    }
}

impl FromStr for SolveResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut status = None;
        let mut solutions = vec![];
        let mut pending = String::new();

        for line in s.lines().map(str::trim) {
            if line == SOLUTION_SEPARATOR {
                solutions.push(pending.parse::<Solution>()?);
                pending.clear();
            } else if let Some(marker) = SolveStatus::from_marker(line) {
                status = Some(marker);
            } else if !line.is_empty() && !line.starts_with('%') {
                pending.push_str(line);
                pending.push('\n');
            }
        }

        if !pending.trim().is_empty() {
            return Err(format!(
                "output after the last solution is not terminated by '{SOLUTION_SEPARATOR}'"
            ));
        }

        let status = status.unwrap_or(if solutions.is_empty() {
            SolveStatus::Unknown
        } else {
            SolveStatus::Satisfied
        });

        Ok(SolveResult { status, solutions })
    }
}
