//! End-to-end tests for control-flow cross-referencing

use stackc::{Compiler, Error, ErrorCategory, Immediate, Opcode, Program};

fn compile(source: &str) -> Result<Program, Error> {
    Compiler::default().compile_source("test.forth", source)
}

fn shape(program: &Program) -> Vec<(Opcode, Option<usize>)> {
    program.iter().map(|op| (op.opcode, op.jump)).collect()
}

// =============================================================================
// JUMP RESOLUTION
// =============================================================================

#[test]
fn test_if_end_jumps() {
    let program = compile("if 1 end").unwrap();
    assert_eq!(
        shape(&program),
        vec![
            (Opcode::If, Some(2)),
            (Opcode::PushInt, None),
            (Opcode::End, Some(3)),
        ]
    );
    assert_eq!(program[1].immediate, Some(Immediate::Int(1)));
}

#[test]
fn test_if_else_end_jumps() {
    let program = compile("if 1 else 2 end").unwrap();
    assert_eq!(
        shape(&program),
        vec![
            (Opcode::If, Some(3)),
            (Opcode::PushInt, None),
            (Opcode::Else, Some(4)),
            (Opcode::PushInt, None),
            (Opcode::End, Some(5)),
        ]
    );
}

#[test]
fn test_while_do_end_jumps() {
    let program = compile("while 1 do 2 end").unwrap();
    assert_eq!(
        shape(&program),
        vec![
            (Opcode::While, None),
            (Opcode::PushInt, None),
            (Opcode::Do, Some(5)),
            (Opcode::PushInt, None),
            (Opcode::End, Some(0)),
        ]
    );
}

#[test]
fn test_loop_after_code_jumps_back_to_its_while() {
    let program = compile("10 while dup do 1 - end drop").unwrap();
    // 0 10, 1 while, 2 dup, 3 do, 4 1, 5 -, 6 end, 7 drop
    assert_eq!(program[3].jump, Some(7));
    assert_eq!(program[6].jump, Some(1));
    assert_eq!(program[7].opcode, Opcode::Drop);
}

#[test]
fn test_if_else_inside_loop() {
    let source = r#"
        0 while dup 10 < do
            dup 2 divmod swap drop 0 = if
                dup .
            else
                "odd" drop
            end
            1 +
        end
    "#;
    let program = compile(source).unwrap();
    let addr_of = |opcode: Opcode| program.iter().position(|op| op.opcode == opcode).unwrap();

    let while_addr = addr_of(Opcode::While);
    let do_addr = addr_of(Opcode::Do);
    let if_addr = addr_of(Opcode::If);
    let else_addr = addr_of(Opcode::Else);
    let ends: Vec<usize> = program
        .iter()
        .enumerate()
        .filter(|(_, op)| op.opcode == Opcode::End)
        .map(|(addr, _)| addr)
        .collect();

    assert_eq!(program[if_addr].jump, Some(else_addr + 1));
    assert_eq!(program[else_addr].jump, Some(ends[0]));
    assert_eq!(program[ends[0]].jump, Some(ends[0] + 1));
    assert_eq!(program[do_addr].jump, Some(ends[1] + 1));
    assert_eq!(program[ends[1]].jump, Some(while_addr));
    assert_eq!(ends[1], program.len() - 1);
}

#[test]
fn test_only_control_ops_have_jumps() {
    let program = compile("1 if 2 else 3 end while 4 do 5 . end").unwrap();
    for op in &program {
        let expected = matches!(op.opcode, Opcode::If | Opcode::Else | Opcode::Do | Opcode::End);
        assert_eq!(op.jump.is_some(), expected, "{:?}", op);
    }
}

#[test]
fn test_string_literal_push() {
    let program = compile(r#""hello world" drop"#).unwrap();
    assert_eq!(program[0].opcode, Opcode::PushStr);
    assert_eq!(
        program[0].immediate,
        Some(Immediate::Str("hello world".to_string()))
    );
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_extra_end_is_unbalanced_at_its_row() {
    let err = compile("if 1 end\n\nend").unwrap_err();
    assert!(matches!(err, Error::UnbalancedBlock { .. }));
    assert_eq!(err.category(), ErrorCategory::Syntax);
    let loc = err.location().unwrap();
    assert_eq!(loc.file(), "test.forth");
    assert_eq!(loc.row(), 2);
}

#[test]
fn test_unclosed_if_is_unbalanced() {
    let err = compile("1 if 2").unwrap_err();
    assert!(matches!(err, Error::UnbalancedBlock { .. }));
    assert_eq!(err.location().unwrap().row(), 0);
}

#[test]
fn test_else_without_if() {
    let err = compile("while else").unwrap_err();
    assert!(matches!(err, Error::ElseWithoutIf { .. }));
}

#[test]
fn test_do_without_open_block() {
    let err = compile("1 do").unwrap_err();
    assert!(matches!(err, Error::UnbalancedBlock { .. }));
}

#[test]
fn test_undefined_word_location() {
    let err = compile("1 bogus").unwrap_err();
    match &err {
        Error::UndefinedWord { location, word } => {
            assert_eq!(word, "bogus");
            assert_eq!(location.file(), "test.forth");
            assert_eq!(location.row(), 0);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.category(), ErrorCategory::Name);

    let diag = err.diagnostic().unwrap();
    assert_eq!((diag.file.as_str(), diag.row), ("test.forth", 0));
}

#[test]
fn test_integer_overflow_is_undefined_word() {
    let err = compile("9223372036854775808").unwrap_err();
    assert!(matches!(err, Error::UndefinedWord { .. }));
    assert!(compile("9223372036854775807 -9223372036854775808").is_ok());
}

#[test]
fn test_compile_file_round_trip() {
    let path = std::env::temp_dir().join(format!("stackc_xref_{}.forth", std::process::id()));
    std::fs::write(&path, "if 1 else 2 end\n").unwrap();

    let program = Compiler::default().compile_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(program.len(), 5);
    assert_eq!(program[0].location.file(), path.display().to_string());
}
