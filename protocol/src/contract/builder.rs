//! The standard token contract.
//!
//! Assembles the canonical token contract container from the catalog, in
//! two variants: with the split capability (the unity of the token can be
//! changed after issue) and without it. The numeric literals in the
//! instruction streams are data-stack indices into each function's
//! parameter list.

use super::container::ContractContainer;
use super::opcodes::{
    AssertKind, FunctionKind, LoadSource, Opcode, StateVar, TokenActionReadFn, TokenActionWriteFn,
    TokenBalanceReadFn, TokenBalanceWriteFn, ValueType, DESCRIPTOR_FUNCTIONS_WITHOUT_SPLIT,
    DESCRIPTOR_FUNCTIONS_WITH_SPLIT, LANGUAGE_CODE, LANGUAGE_VERSION, STATE_VAR_GET,
    STATE_VAR_SET,
};

/// Build the standard token contract container.
///
/// `split` selects the capability variant; it changes both the descriptor
/// section (the `split` function is present or absent) and every function
/// index behind it.
pub fn token_contract(split: bool) -> ContractContainer {
    let kinds = if split {
        DESCRIPTOR_FUNCTIONS_WITH_SPLIT
    } else {
        DESCRIPTOR_FUNCTIONS_WITHOUT_SPLIT
    };

    ContractContainer {
        language_code: LANGUAGE_CODE,
        language_version: LANGUAGE_VERSION,
        triggers: vec![instructions_for(FunctionKind::Init)],
        descriptors: kinds.iter().map(|k| instructions_for(*k)).collect(),
        state_variables: vec![
            vec![StateVar::Issuer as u8, ValueType::Account as u8],
            vec![StateVar::Maker as u8, ValueType::Account as u8],
        ],
        textual: vec![
            func_texts(&[FunctionKind::Init]),
            func_texts(kinds),
            state_var_names(),
        ],
    }
}

fn instructions_for(kind: FunctionKind) -> Vec<u8> {
    let assert_op = Opcode::Assert as u8;
    let load = Opcode::Load as u8;
    let sv_write = Opcode::StateVarWrite as u8;
    let sv_read = Opcode::StateVarRead as u8;
    let ta_write = Opcode::TokenActionWrite as u8;
    let ta_read = Opcode::TokenActionRead as u8;
    let tb_write = Opcode::TokenBalanceWrite as u8;
    let tb_read = Opcode::TokenBalanceRead as u8;
    let ret = Opcode::Return as u8;

    match kind {
        // load the signer (lands at stack index 3, after the three init
        // arguments), record it as issuer and maker, mint the token type.
        FunctionKind::Init => vec![
            load, LoadSource::Signer as u8,
            sv_write, STATE_VAR_SET, StateVar::Issuer as u8, 3,
            sv_write, STATE_VAR_SET, StateVar::Maker as u8, 3,
            ta_write, TokenActionWriteFn::NewToken as u8, 0, 1, 2,
        ],
        // only the maker may hand the contract to a new issuer.
        FunctionKind::Supersede => vec![
            sv_read, STATE_VAR_GET, StateVar::Maker as u8,
            assert_op, AssertKind::IsSignerOrigin as u8, 1,
            sv_write, STATE_VAR_SET, StateVar::Issuer as u8, 0,
        ],
        FunctionKind::Issue => vec![
            sv_read, STATE_VAR_GET, StateVar::Issuer as u8,
            assert_op, AssertKind::IsCallerOrigin as u8, 1,
            tb_write, TokenBalanceWriteFn::Deposit as u8, 1, 0,
        ],
        FunctionKind::Destroy => vec![
            sv_read, STATE_VAR_GET, StateVar::Issuer as u8,
            assert_op, AssertKind::IsCallerOrigin as u8, 1,
            tb_write, TokenBalanceWriteFn::Withdraw as u8, 1, 0,
        ],
        FunctionKind::Split => vec![
            sv_read, STATE_VAR_GET, StateVar::Issuer as u8,
            assert_op, AssertKind::IsCallerOrigin as u8, 1,
            assert_op, AssertKind::GtZero as u8, 0,
            ta_write, TokenActionWriteFn::Split as u8, 0,
        ],
        FunctionKind::Send => vec![
            load, LoadSource::Caller as u8,
            assert_op, AssertKind::GteqZero as u8, 1,
            tb_write, TokenBalanceWriteFn::Transfer as u8, 2, 0, 1,
        ],
        FunctionKind::Transfer => vec![
            assert_op, AssertKind::IsCallerOrigin as u8, 0,
            tb_write, TokenBalanceWriteFn::Transfer as u8, 0, 1, 2,
        ],
        FunctionKind::Deposit => vec![
            assert_op, AssertKind::IsCallerOrigin as u8, 0,
            tb_write, TokenBalanceWriteFn::Transfer as u8, 0, 1, 2,
        ],
        FunctionKind::Withdraw => vec![
            assert_op, AssertKind::IsCallerOrigin as u8, 1,
            tb_write, TokenBalanceWriteFn::Transfer as u8, 0, 1, 2,
        ],
        FunctionKind::TotalSupply => vec![
            ta_read, TokenActionReadFn::Total as u8, 0,
            ret, 0,
        ],
        FunctionKind::MaxSupply => vec![
            ta_read, TokenActionReadFn::Get as u8, 0,
            ret, 0,
        ],
        FunctionKind::BalanceOf => vec![
            tb_read, TokenBalanceReadFn::Balance as u8, 0,
            ret, 1,
        ],
        FunctionKind::GetIssuer => vec![
            sv_read, STATE_VAR_GET, StateVar::Issuer as u8,
            ret, 0,
        ],
    }
}

/// `u16`-prefix a short static byte string. Catalog names never approach
/// the prefix limit.
fn prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + bytes.len());
    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(bytes);
    out
}

fn func_texts(kinds: &[FunctionKind]) -> Vec<u8> {
    let mut region = Vec::new();
    for kind in kinds {
        let mut entry = Vec::new();
        entry.extend(prefixed(kind.name().as_bytes()));
        for param in kind.parameter_names() {
            entry.extend(prefixed(param.as_bytes()));
        }
        region.extend(prefixed(&entry));
    }
    region
}

fn state_var_names() -> Vec<u8> {
    let mut region = Vec::new();
    for var in [StateVar::Issuer, StateVar::Maker] {
        region.extend(prefixed(var.name().as_bytes()));
    }
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_variant_has_twelve_functions() {
        let container = token_contract(true);
        assert_eq!(container.triggers.len(), 1);
        assert_eq!(container.descriptors.len(), 12);
    }

    #[test]
    fn no_split_variant_has_eleven_functions() {
        assert_eq!(token_contract(false).descriptors.len(), 11);
    }

    #[test]
    fn language_header_is_fixed() {
        let container = token_contract(true);
        assert_eq!(&container.language_code, b"vdds");
        assert_eq!(container.language_version, [0, 0, 0, 1]);
    }

    #[test]
    fn state_variables_declare_account_type() {
        let container = token_contract(true);
        assert_eq!(container.state_variables.len(), 2);
        assert_eq!(container.state_variables[0], vec![0, 7]);
        assert_eq!(container.state_variables[1], vec![1, 7]);
    }

    #[test]
    fn variants_share_the_trigger() {
        assert_eq!(token_contract(true).triggers, token_contract(false).triggers);
    }

    #[test]
    fn variants_differ_in_descriptors_and_textual() {
        let with = token_contract(true);
        let without = token_contract(false);
        assert_ne!(with.descriptors, without.descriptors);
        assert_ne!(with.textual[1], without.textual[1]);
        assert_eq!(with.textual[0], without.textual[0]);
        assert_eq!(with.textual[2], without.textual[2]);
    }

    #[test]
    fn builder_is_deterministic() {
        assert_eq!(token_contract(true), token_contract(true));
    }
}
