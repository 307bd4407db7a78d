// Copyright (c) 2026 Vela Labs. MIT License.
// See LICENSE for details.

//! # Vela Protocol — Client Toolkit
//!
//! Client-side library for the Vela proof-of-stake ledger. This crate is the
//! binary protocol layer: it builds and signs contract transactions, derives
//! and validates base-58 addresses and token identifiers, and decompiles the
//! nested contract bytecode container into something a human can read.
//!
//! What it deliberately is *not*: a node, a wallet, or an HTTP client. The
//! network transport and the account balance oracle are seams (traits) that
//! callers plug their own implementations into.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants and network parameters.
//! - **crypto** — Chain hash and Ed25519 keypairs.
//! - **address** — Address and token-id derivation, checksum validation.
//! - **contract** — Opcode catalog, container codec, decompiler, renderer.
//! - **transaction** — Data-stack serialization, the two contract
//!   transaction builders, and broadcast records.
//! - **account** — Keypair-or-watch-only account plus the balance seam.
//!
//! ## Ground Rules
//!
//! 1. Byte layouts are contracts. Every multi-byte integer is big-endian,
//!    every length prefix is `u16`, and nothing is ever silently truncated
//!    or padded.
//! 2. All operations are synchronous pure functions over immutable inputs.
//!    The only shared state is the opcode catalog, which is `const`.
//! 3. Malformed input gets a typed error, not a best-effort guess.

pub mod account;
pub mod address;
pub mod config;
pub mod contract;
pub mod crypto;
pub mod transaction;
