//! # CLI Interface
//!
//! Defines the command-line argument structure for `vela` using `clap`
//! derive: contract inspection, address utilities, and token-id derivation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vela ledger inspector.
///
/// Decompiles contract bytecode into readable opcode listings and handles
/// the address arithmetic of the Vela network: derivation, validation,
/// and token-id construction.
#[derive(Parser, Debug)]
#[command(
    name = "vela",
    about = "Vela ledger inspector",
    version,
    propagate_version = true
)]
pub struct VelaCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Operate against testnet address rules instead of mainnet.
    #[arg(long, global = true)]
    pub testnet: bool,
}

/// Top-level subcommands for the `vela` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decompile contract bytecode and print the full inspection listing.
    Inspect(InspectArgs),
    /// Derive the account address for a public key.
    Derive(DeriveArgs),
    /// Validate an address against the selected network.
    Validate(ValidateArgs),
    /// Derive the token id for a contract id and token index.
    TokenId(TokenIdArgs),
    /// Print the standard token contract as base-58 bytecode.
    Template(TemplateArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Base-58 contract bytecode. Mutually exclusive with --file.
    pub contract: Option<String>,

    /// Read the base-58 bytecode from a file instead.
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

/// Arguments for the `derive` subcommand.
#[derive(Parser, Debug)]
pub struct DeriveArgs {
    /// Base-58 Ed25519 public key.
    pub public_key: String,
}

/// Arguments for the `validate` subcommand.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// The base-58 address to check.
    pub address: String,
}

/// Arguments for the `token-id` subcommand.
#[derive(Parser, Debug)]
pub struct TokenIdArgs {
    /// Base-58 contract id.
    pub contract_id: String,

    /// Token index within the contract.
    #[arg(long, default_value_t = 0)]
    pub index: u32,
}

/// Arguments for the `template` subcommand.
#[derive(Parser, Debug)]
pub struct TemplateArgs {
    /// Omit the split capability from the generated contract.
    #[arg(long)]
    pub no_split: bool,
}
