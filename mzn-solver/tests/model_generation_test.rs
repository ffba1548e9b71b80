#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::integer_factorisation;
use helpers::ordered_pair;
use helpers::queens;
use mzn_solver::is_valid_identifier;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;

#[test]
fn integer_factorisation_model_text() {
    let (mut model, _, _) = integer_factorisation();

    assert_eq!(
        "var 1..99999999: x;\n\
         var 1..99999999: y;\n\
         constraint ((x * y) = 54074903);\n\
         constraint (y > 1);\n\
         constraint (x > y);\n\
         solve satisfy;\n",
        model.generate().unwrap()
    );
}

#[test]
fn queens_include_all_different_once() {
    let (mut model, queens) = queens(8);
    let text = model.generate().unwrap();

    assert_eq!(8, queens.len());
    assert_eq!(1, text.matches("include \"all_different.mzn\";").count());
    assert_eq!(3, text.matches("constraint all_different([").count());
    assert!(text.contains("var 0..7: q_7;"));
}

#[test]
fn indexed_names_are_sanitized_and_stable() {
    let indices = [(0, 0), (0, 1), (1, 0)];
    let names = |model: &mut Model| {
        model
            .add_variables("bin_item", indices, VariableDefinition::bool())
            .unwrap()
            .iter()
            .map(|variable| variable.name().to_owned())
            .collect::<Vec<_>>()
    };

    let first = names(&mut Model::default());
    let second = names(&mut Model::default());

    assert_eq!(vec!["bin_item_0_0", "bin_item_0_1", "bin_item_1_0"], first);
    assert_eq!(first, second);
    assert!(first.iter().all(|name| is_valid_identifier(name)));
    assert!(first
        .iter()
        .all(|name| !name.contains(['(', ')', ',', ' '])));
}

#[test]
fn redundant_constraints_are_wrapped_only_when_flagged() {
    let (mut plain, _, _) = ordered_pair(false);
    let (mut redundant, _, _) = ordered_pair(true);

    let plain = plain.generate().unwrap().to_owned();
    let redundant = redundant.generate().unwrap();

    assert!(!plain.contains("redundant_constraint"));
    assert!(redundant.contains("constraint redundant_constraint((x != y));"));
    assert!(redundant.contains("constraint (x < y);"));
}

#[test]
fn generation_is_repeatable() {
    let (mut model, _) = queens(4);

    let first = model.render().unwrap();
    let second = model.generate().unwrap().to_owned();

    assert_eq!(first, second);
    assert_eq!(Some(first.as_str()), model.generated_text());
}

#[test]
fn written_model_matches_generated_text() {
    let (mut model, _, _) = integer_factorisation();
    let path = std::env::temp_dir().join(format!(
        "mzn-solver-generation-test-{}.mzn",
        std::process::id()
    ));

    model.write(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(model.text().unwrap(), written);
}
