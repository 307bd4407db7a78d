//! # Contract Bytecode
//!
//! Everything about the smart-contract bytecode container:
//!
//! ```text
//! opcodes.rs   — The immutable catalog: semantic name ↔ byte tag tables.
//! container.rs — The nested length-prefixed container codec (decode/encode).
//! decompile.rs — Instruction-stream walker producing readable listings.
//! builder.rs   — The standard token contract, split and no-split variants.
//! render.rs    — The human-facing inspector layout.
//! ```
//!
//! The container codec and the decompiler never guess: a declared length
//! that does not match what the sub-arrays consume, an opcode tag missing
//! from the catalog, or an instruction cut off mid-operand each abort with
//! a [`FormatError`].

pub mod builder;
pub mod container;
pub mod decompile;
pub mod opcodes;
pub mod render;

pub use builder::token_contract;
pub use container::{ContractContainer, FormatError};
pub use decompile::{decompile, FunctionDoc, InstructionLine};
pub use render::render;
