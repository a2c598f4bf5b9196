//! Debug utilities for inspecting generated IR

use super::ir::{Operation, Program};
use crate::error::{Error, Result};

/// Print IR program in human-readable format
pub fn dump_ir(program: &Program) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    IR DUMP");
    println!("═══════════════════════════════════════════════════════════");
    println!("Operations: {}", program.len());
    println!("───────────────────────────────────────────────────────────");

    for line in format_program(program) {
        println!("{}", line);
    }
    println!("═══════════════════════════════════════════════════════════\n");
}

/// Format every operation, one line each, prefixed with its address
pub fn format_program(program: &Program) -> Vec<String> {
    program
        .iter()
        .enumerate()
        .map(|(addr, op)| format!("{:04}: {}", addr, format_operation(op)))
        .collect()
}

/// Format a single operation
pub fn format_operation(op: &Operation) -> String {
    let mut text = op.opcode.to_string();
    if let Some(imm) = &op.immediate {
        text.push(' ');
        text.push_str(&imm.to_string());
    }
    if let Some(target) = op.jump {
        text.push_str(&format!(" -> {}", target));
    }
    text
}

/// Serialize the program as pretty-printed JSON
pub fn ir_to_json(program: &Program) -> Result<String> {
    serde_json::to_string_pretty(program)
        .map_err(|e| Error::internal(format!("IR serialization failed: {}", e)))
}
