use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use truthtab::eval::EvalError;
use truthtab::truth_table::TableError;
use truthtab::{Classification, NormalForm, Processor};

fn evaluated(expression: &str) -> Processor {
    let mut processor =
        Processor::parse_and_build(expression).expect("could not parse expression");
    processor.evaluate().expect("could not evaluate expression");
    processor
}

fn bits(s: &str) -> Vec<bool> {
    s.chars().map(|c| c == '1').collect()
}

#[test]
fn test_and_or() {
    let processor = evaluated("a&b|c");

    assert_eq!(processor.postfix().to_string(), "ab&c|");
    assert_eq!(processor.operands(), &['a', 'b', 'c']);
    assert_eq!(processor.table().row_count(), 8);
    assert_eq!(
        processor.table().column_names(),
        &["a", "b", "c", "(a&b)", "((a&b)|c)"].map(String::from)
    );
    assert_eq!(processor.result_column(), Some("((a&b)|c)"));

    assert_eq!(processor.function_vector().bits(), bits("01010111"));
    assert_eq!(processor.function_vector().to_string(), "01010111");
    assert_eq!(processor.function_vector_as_integer(), Ok(87));

    assert_eq!(
        processor.sdnf().unwrap(),
        "(!a&!b&c)|(!a&b&c)|(a&!b&c)|(a&b&!c)|(a&b&c)"
    );
    assert_eq!(processor.sdnf_indices().unwrap(), "(1,3,5,6,7)|");
    assert_eq!(processor.scnf().unwrap(), "(a|b|c)&(a|!b|c)&(!a|b|c)");
    assert_eq!(processor.scnf_indices().unwrap(), "(0,2,4)&");
    assert_eq!(processor.classify(), Classification::Contingent);
}

#[test]
fn test_equivalence_implication() {
    let processor = evaluated("a~b>c");

    assert_eq!(processor.postfix().to_string(), "abc>~");
    assert_eq!(processor.result_column(), Some("(a~(b>c))"));
    assert_eq!(processor.function_vector().to_string(), "00101101");
    assert_eq!(
        processor.scnf().unwrap(),
        "(a|b|c)&(a|b|!c)&(a|!b|!c)&(!a|!b|c)"
    );
    assert_eq!(processor.scnf_indices().unwrap(), "(0,1,3,6)&");
}

#[test]
fn test_forms_before_evaluation_use_last_variable() {
    // without evaluate() the last column is the last variable, c
    let and_or = Processor::parse_and_build("a&b|c").unwrap();
    assert_eq!(
        and_or.sdnf().unwrap(),
        "(!a&!b&c)|(!a&b&c)|(a&!b&c)|(a&b&c)"
    );

    let equiv = Processor::parse_and_build("a~b>c").unwrap();
    assert_eq!(
        equiv.scnf().unwrap(),
        "(a|b|c)&(a|!b|c)&(!a|b|c)&(!a|!b|c)"
    );
}

#[test]
fn test_truth_table_text() {
    let processor = evaluated("a&b|c");
    let text = processor.truth_table_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "a\tb\tc\t(a&b)\t((a&b)|c)");
    assert_eq!(lines[1], "0\t0\t0\t0    \t0        ");
    assert_eq!(lines[7], "1\t1\t0\t1    \t1        ");
    assert!(text.ends_with('\n'));
}

#[test]
fn test_empty_expression() {
    let processor = evaluated("");

    assert!(processor.operands().is_empty());
    assert_eq!(processor.table().row_count(), 1);
    assert_eq!(processor.result_column(), None);
    assert_eq!(processor.function_vector().bits(), &[false]);
    assert_eq!(processor.function_vector_as_integer(), Ok(0));
    assert_eq!(processor.scnf().unwrap(), "()");
    assert_eq!(processor.scnf_indices().unwrap(), "(0)&");
    assert_eq!(processor.sdnf().unwrap(), "");
    assert_eq!(processor.sdnf_indices().unwrap(), "()|");
    assert_eq!(processor.classify(), Classification::Contradiction);
}

#[test]
fn test_single_variable() {
    let processor = evaluated("a");

    assert_eq!(processor.table().column_count(), 1);
    assert_eq!(processor.sdnf().unwrap(), "(a)");
    assert_eq!(processor.scnf().unwrap(), "(a)");
    assert_eq!(processor.function_vector_as_integer(), Ok(1));
}

#[test]
fn test_repeated_subexpressions_share_a_column() {
    let processor = evaluated("(a&b)|(a&b)");

    assert_eq!(
        processor.table().column_names(),
        &["a", "b", "(a&b)", "((a&b)|(a&b))"].map(String::from)
    );
    assert_eq!(processor.graph().len(), 4);
    assert_eq!(processor.function_vector().to_string(), "0001");
}

#[test]
fn test_digit_operand_has_no_column() {
    let mut processor = Processor::parse_and_build("a&1").unwrap();

    assert_eq!(
        processor.evaluate(),
        Err(EvalError::Table(TableError::ColumnNotFound {
            name: "1".to_string()
        }))
    );
}

#[test]
fn test_canonical_form_assignments() {
    let processor = evaluated("a>b");
    let form = processor.canonical_form(NormalForm::Conjunctive).unwrap();

    assert_eq!(form.kind(), NormalForm::Conjunctive);
    assert_eq!(form.assignments(), &[vec![true, false]]);
    assert_eq!(form.indices(), vec![2]);
    assert_eq!(form.to_string(), "(!a|b)");
}

#[test]
fn test_wide_vector() {
    let processor = evaluated("a|b|c|d|e|f|g|h");

    assert_eq!(processor.table().row_count(), 256);
    assert_eq!(
        processor.function_vector_as_integer(),
        Err(EvalError::VectorTooWide { rows: 256 })
    );
}

#[test]
fn test_render_dot() {
    let processor = evaluated("a&!b");
    let mut buffer: Vec<u8> = Vec::new();

    processor.render_dot(&mut buffer).unwrap();

    let rendered = String::from_utf8(buffer).unwrap();
    assert!(rendered.starts_with("digraph expression"));
    assert_eq!(rendered.matches(" -> ").count(), 3);
}

#[test]
fn test_write_csv() {
    let processor = evaluated("!a");
    let mut buffer: Vec<u8> = Vec::new();

    processor.write_csv(&mut buffer).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), "a,!a\n0,1\n1,0\n");
}

fn file_classification<P: AsRef<Path>>(file: P) -> Classification {
    let expression = fs::read_to_string(file).expect("could not read input file");
    evaluated(expression.trim()).classify()
}

#[test]
fn test_files_tautology() {
    for file in glob::glob("tests/data/*_is_tautology.txt").unwrap() {
        let f = file.unwrap();
        println!("testing {}", f.display());
        assert_eq!(file_classification(&f), Classification::Tautology);
    }
}

#[test]
fn test_files_contradiction() {
    for file in glob::glob("tests/data/*_is_contradiction.txt").unwrap() {
        let f = file.unwrap();
        println!("testing {}", f.display());
        assert_eq!(file_classification(&f), Classification::Contradiction);
    }
}
