// Copyright (c) 2026 Vela Labs. MIT License.
// See LICENSE for details.

//! # vela — the Vela ledger inspector
//!
//! Thin presentation layer over `vela-protocol`: every subcommand decodes
//! its inputs, calls one library function, and prints the result.

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use vela_protocol::address::{token_id, Network};
use vela_protocol::contract::{render, token_contract};
use vela_protocol::crypto::VelaPublicKey;

use cli::{Commands, VelaCli};

fn main() -> Result<()> {
    logging::init_logging("info");
    let args = VelaCli::parse();

    let network = if args.testnet {
        Network::testnet()
    } else {
        Network::mainnet()
    };

    match args.command {
        Commands::Inspect(inspect) => {
            let text = match (inspect.contract, inspect.file) {
                (Some(_), Some(_)) => bail!("pass bytecode inline or via --file, not both"),
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?
                    .trim()
                    .to_string(),
                (None, None) => bail!("no contract bytecode given"),
            };
            let bytes = bs58::decode(&text)
                .into_vec()
                .context("contract bytecode is not base-58")?;
            let listing = render(&bytes).context("contract bytecode is malformed")?;
            print!("{}", listing);
        }
        Commands::Derive(derive) => {
            let public_key = VelaPublicKey::from_base58(&derive.public_key)
                .context("public key is not a base-58 32-byte key")?;
            println!("{}", network.address_from_public_key(public_key.as_bytes()));
        }
        Commands::Validate(validate) => {
            if network.validate_address(&validate.address) {
                println!("valid");
            } else {
                // The defect was already logged at warn level.
                println!("invalid");
                std::process::exit(1);
            }
        }
        Commands::TokenId(token) => {
            let id = token_id(&token.contract_id, token.index)
                .context("contract id is not a valid base-58 identifier")?;
            println!("{}", id);
        }
        Commands::Template(template) => {
            let container = token_contract(!template.no_split);
            let bytes = container
                .encode()
                .context("encoding the template contract")?;
            println!("{}", bs58::encode(bytes).into_string());
        }
    }

    Ok(())
}
