//! IR opcode and operation definitions

use crate::lexer::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR opcode
///
/// Two literal pushes, the named builtin words, and the six control keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // Literals
    /// Push an integer immediate
    PushInt,
    /// Push a string immediate
    PushStr,

    // Arithmetic
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `divmod`: quotient and remainder
    DivMod,

    // Comparison
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,

    // I/O
    /// `.`: print and pop the top of the stack
    Dump,
    /// `syscall3`
    Syscall3,

    // Stack manipulation
    /// `dup`
    Dup,
    /// `2dup`
    TwoDup,
    /// `drop`
    Drop,
    /// `swap`
    Swap,
    /// `over`
    Over,

    // Memory
    /// `mem`: push the base address of program memory
    Mem,
    /// `@`: load a byte
    Load,
    /// `!`: store a byte
    Store,

    // Control flow
    /// `if`
    If,
    /// `else`
    Else,
    /// `end`
    End,
    /// `while`
    While,
    /// `do`
    Do,
    /// `macro`, consumed by the generator and never emitted
    Macro,
}

impl Opcode {
    /// Every opcode, in declaration order
    pub const ALL: [Opcode; 28] = [
        Opcode::PushInt,
        Opcode::PushStr,
        Opcode::Plus,
        Opcode::Minus,
        Opcode::Mul,
        Opcode::DivMod,
        Opcode::Equal,
        Opcode::NotEqual,
        Opcode::Greater,
        Opcode::Less,
        Opcode::GreaterEqual,
        Opcode::LessEqual,
        Opcode::Dump,
        Opcode::Syscall3,
        Opcode::Dup,
        Opcode::TwoDup,
        Opcode::Drop,
        Opcode::Swap,
        Opcode::Over,
        Opcode::Mem,
        Opcode::Load,
        Opcode::Store,
        Opcode::If,
        Opcode::Else,
        Opcode::End,
        Opcode::While,
        Opcode::Do,
        Opcode::Macro,
    ];

    /// Number of opcodes
    pub const COUNT: usize = Self::ALL.len();

    /// The source word for this opcode, `None` for the literal pushes
    pub const fn word(self) -> Option<&'static str> {
        match self {
            Opcode::PushInt | Opcode::PushStr => None,
            Opcode::Plus => Some("+"),
            Opcode::Minus => Some("-"),
            Opcode::Mul => Some("*"),
            Opcode::DivMod => Some("divmod"),
            Opcode::Equal => Some("="),
            Opcode::NotEqual => Some("!="),
            Opcode::Greater => Some(">"),
            Opcode::Less => Some("<"),
            Opcode::GreaterEqual => Some(">="),
            Opcode::LessEqual => Some("<="),
            Opcode::Dump => Some("."),
            Opcode::Syscall3 => Some("syscall3"),
            Opcode::Dup => Some("dup"),
            Opcode::TwoDup => Some("2dup"),
            Opcode::Drop => Some("drop"),
            Opcode::Swap => Some("swap"),
            Opcode::Over => Some("over"),
            Opcode::Mem => Some("mem"),
            Opcode::Load => Some("@"),
            Opcode::Store => Some("!"),
            Opcode::If => Some("if"),
            Opcode::Else => Some("else"),
            Opcode::End => Some("end"),
            Opcode::While => Some("while"),
            Opcode::Do => Some("do"),
            Opcode::Macro => Some("macro"),
        }
    }

    /// Looks up the builtin named `word`
    pub fn from_word(word: &str) -> Option<Opcode> {
        let opcode = match word {
            "+" => Opcode::Plus,
            "-" => Opcode::Minus,
            "*" => Opcode::Mul,
            "divmod" => Opcode::DivMod,
            "=" => Opcode::Equal,
            "!=" => Opcode::NotEqual,
            ">" => Opcode::Greater,
            "<" => Opcode::Less,
            ">=" => Opcode::GreaterEqual,
            "<=" => Opcode::LessEqual,
            "." => Opcode::Dump,
            "syscall3" => Opcode::Syscall3,
            "dup" => Opcode::Dup,
            "2dup" => Opcode::TwoDup,
            "drop" => Opcode::Drop,
            "swap" => Opcode::Swap,
            "over" => Opcode::Over,
            "mem" => Opcode::Mem,
            "@" => Opcode::Load,
            "!" => Opcode::Store,
            "if" => Opcode::If,
            "else" => Opcode::Else,
            "end" => Opcode::End,
            "while" => Opcode::While,
            "do" => Opcode::Do,
            "macro" => Opcode::Macro,
            _ => return None,
        };
        Some(opcode)
    }

    /// Opcodes whose jump target is resolved by cross-referencing
    pub fn has_jump(self) -> bool {
        matches!(self, Opcode::If | Opcode::Else | Opcode::End | Opcode::Do)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::PushInt => write!(f, "push-int"),
            Opcode::PushStr => write!(f, "push-str"),
            other => write!(f, "{}", other.word().unwrap_or("?")),
        }
    }
}

/// Builtin words that resolve directly to an opcode
pub const BUILTIN_WORDS: [(&str, Opcode); 26] = [
    ("+", Opcode::Plus),
    ("-", Opcode::Minus),
    ("*", Opcode::Mul),
    ("divmod", Opcode::DivMod),
    ("=", Opcode::Equal),
    ("!=", Opcode::NotEqual),
    (">", Opcode::Greater),
    ("<", Opcode::Less),
    (">=", Opcode::GreaterEqual),
    ("<=", Opcode::LessEqual),
    (".", Opcode::Dump),
    ("syscall3", Opcode::Syscall3),
    ("dup", Opcode::Dup),
    ("2dup", Opcode::TwoDup),
    ("drop", Opcode::Drop),
    ("swap", Opcode::Swap),
    ("over", Opcode::Over),
    ("mem", Opcode::Mem),
    ("@", Opcode::Load),
    ("!", Opcode::Store),
    ("if", Opcode::If),
    ("else", Opcode::Else),
    ("end", Opcode::End),
    ("while", Opcode::While),
    ("do", Opcode::Do),
    ("macro", Opcode::Macro),
];

// Every opcode except the two literal pushes is reachable from a builtin word.
const _: () = assert!(Opcode::COUNT == 28);
const _: () = assert!(BUILTIN_WORDS.len() + 2 == Opcode::COUNT);

/// Immediate payload of a literal push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Immediate {
    /// Integer value
    Int(i64),
    /// String contents, escapes undecoded
    Str(String),
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::Int(value) => write!(f, "{}", value),
            Immediate::Str(text) => write!(f, "{:?}", text),
        }
    }
}

/// One IR instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// What to do
    pub opcode: Opcode,
    /// Literal payload for `PushInt`/`PushStr`
    pub immediate: Option<Immediate>,
    /// Resolved jump address for `if`/`else`/`do`/`end`
    pub jump: Option<usize>,
    /// Token the operation was built from
    pub location: SourceLocation,
}

impl Operation {
    /// Creates an operation with no immediate and no jump
    pub fn new(opcode: Opcode, location: SourceLocation) -> Self {
        Operation {
            opcode,
            immediate: None,
            jump: None,
            location,
        }
    }

    /// Integer push
    pub fn push_int(value: i64, location: SourceLocation) -> Self {
        Operation {
            immediate: Some(Immediate::Int(value)),
            ..Operation::new(Opcode::PushInt, location)
        }
    }

    /// String push
    pub fn push_str(text: impl Into<String>, location: SourceLocation) -> Self {
        Operation {
            immediate: Some(Immediate::Str(text.into())),
            ..Operation::new(Opcode::PushStr, location)
        }
    }
}
