//! The human-facing contract inspector.
//!
//! Formats a container and its decompiled functions into the listing the
//! CLI prints: total length, hex dumps of the fixed and framed sections,
//! then every function with its resolved opcode lines. A pure consumer of
//! the container codec and the decompiler; no new data contracts.

use std::fmt::Write;

use super::container::{ContractContainer, FormatError};
use super::decompile::decompile;

/// Render a full inspection listing for raw contract bytecode.
pub fn render(bytes: &[u8]) -> Result<String, FormatError> {
    let container = ContractContainer::decode(bytes)?;
    render_container(&container, bytes.len())
}

fn render_container(container: &ContractContainer, total: usize) -> Result<String, FormatError> {
    let docs = decompile(container)?;
    let mut out = String::new();

    // Infallible: fmt::Write over String never errors.
    let _ = writeln!(out, "Total Length of Contract: {} (Bytes)", total);

    let _ = writeln!(out, "Language Code: ({} Bytes)", container.language_code.len());
    let _ = writeln!(out, "{}", hex_row(&container.language_code));
    let _ = writeln!(
        out,
        "Language Version: ({} Bytes)",
        container.language_version.len()
    );
    let _ = writeln!(out, "{}", hex_row(&container.language_version));

    render_section(&mut out, "Trigger", &container.triggers, 0);
    render_section(
        &mut out,
        "Descriptor",
        &container.descriptors,
        container.triggers.len(),
    );
    render_section(&mut out, "State Variable", &container.state_variables, 0);

    let _ = writeln!(out, "All Functions with Opcode:");
    for doc in &docs {
        let _ = writeln!(out, "{} {}({})", doc.id, doc.name, doc.params.join(", "));
        for line in &doc.instructions {
            let _ = writeln!(out, "    {} | {} {}", line.index, line.opcode, line.operands);
        }
    }

    Ok(out)
}

fn render_section(out: &mut String, title: &str, arrays: &[Vec<u8>], id_offset: usize) {
    let payload: usize = arrays.iter().map(|a| a.len()).sum();
    let _ = writeln!(out, "{}: ({} Bytes)", title, payload);
    let _ = writeln!(out, "id | byte");
    for (i, array) in arrays.iter().enumerate() {
        let _ = writeln!(out, "{:02} | {}", id_offset + i, hex_row(array));
    }
}

fn hex_row(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::builder::token_contract;

    #[test]
    fn renders_every_section_header() {
        let bytes = token_contract(true).encode().unwrap();
        let listing = render(&bytes).unwrap();
        assert!(listing.contains(&format!("Total Length of Contract: {} (Bytes)", bytes.len())));
        assert!(listing.contains("Language Code: (4 Bytes)"));
        assert!(listing.contains("Language Version: (4 Bytes)"));
        assert!(listing.contains("Trigger:"));
        assert!(listing.contains("Descriptor:"));
        assert!(listing.contains("State Variable:"));
        assert!(listing.contains("All Functions with Opcode:"));
    }

    #[test]
    fn trigger_row_carries_id_00() {
        let bytes = token_contract(true).encode().unwrap();
        let listing = render(&bytes).unwrap();
        assert!(listing.contains("00 init(max, unity, tokenDescription, signer)"));
    }

    #[test]
    fn language_code_hex_is_vdds() {
        let bytes = token_contract(true).encode().unwrap();
        let listing = render(&bytes).unwrap();
        // "vdds" in hex
        assert!(listing.contains("76 64 64 73"));
    }

    #[test]
    fn malformed_bytes_propagate_format_error() {
        assert!(render(&[1, 2, 3]).is_err());
    }
}
