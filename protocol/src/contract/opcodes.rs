//! # The Opcode Catalog
//!
//! Process-wide constant tables mapping semantic names to the fixed byte
//! tags of the contract bytecode format. The tables are pure data: every
//! lookup is a `match` on a byte or a name, nothing is computed at runtime,
//! and nothing is ever mutated.
//!
//! The decompiler resolves instruction streams through these tables; the
//! token-contract builder assembles streams from them. Both must agree, so
//! they both live off this single module.

// ---------------------------------------------------------------------------
// Language header
// ---------------------------------------------------------------------------

/// Fixed language code of the token contract language.
pub const LANGUAGE_CODE: [u8; 4] = *b"vdds";

/// Language version 1, big-endian.
pub const LANGUAGE_VERSION: [u8; 4] = [0, 0, 0, 1];

// ---------------------------------------------------------------------------
// Opcode families
// ---------------------------------------------------------------------------

/// The nine instruction families. The tag is the first byte of every
/// instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Assert = 1,
    Load = 2,
    StateVarWrite = 3,
    StateVarRead = 4,
    TokenActionWrite = 5,
    TokenActionRead = 6,
    TokenBalanceWrite = 7,
    TokenBalanceRead = 8,
    Return = 9,
}

impl Opcode {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::Assert,
            2 => Self::Load,
            3 => Self::StateVarWrite,
            4 => Self::StateVarRead,
            5 => Self::TokenActionWrite,
            6 => Self::TokenActionRead,
            7 => Self::TokenBalanceWrite,
            8 => Self::TokenBalanceRead,
            9 => Self::Return,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Load => "load",
            Self::StateVarWrite => "stateVarWrite",
            Self::StateVarRead => "stateVarRead",
            Self::TokenActionWrite => "tokenActionWrite",
            Self::TokenActionRead => "tokenActionRead",
            Self::TokenBalanceWrite => "tokenBalanceWrite",
            Self::TokenBalanceRead => "tokenBalanceRead",
            Self::Return => "return",
        }
    }
}

// ---------------------------------------------------------------------------
// Assertion kinds
// ---------------------------------------------------------------------------

/// Second byte of an `assert` instruction. Each kind consumes a fixed
/// number of operand indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertKind {
    GteqZero = 1,
    Lteq = 2,
    LtInt64 = 3,
    GtZero = 4,
    Eq = 5,
    IsCallerOrigin = 6,
    IsSignerOrigin = 7,
}

impl AssertKind {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::GteqZero,
            2 => Self::Lteq,
            3 => Self::LtInt64,
            4 => Self::GtZero,
            5 => Self::Eq,
            6 => Self::IsCallerOrigin,
            7 => Self::IsSignerOrigin,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GteqZero => "gteqZero",
            Self::Lteq => "lteq",
            Self::LtInt64 => "ltInt64",
            Self::GtZero => "gtZero",
            Self::Eq => "eq",
            Self::IsCallerOrigin => "isCallerOrigin",
            Self::IsSignerOrigin => "isSignerOrigin",
        }
    }

    /// Number of operand-index bytes following the kind tag.
    pub fn operand_count(self) -> usize {
        match self {
            Self::GteqZero | Self::GtZero | Self::IsCallerOrigin | Self::IsSignerOrigin => 1,
            Self::Lteq | Self::LtInt64 | Self::Eq => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Load sources
// ---------------------------------------------------------------------------

/// Second byte of a `load` instruction: where the loaded value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Signer = 1,
    Caller = 2,
}

impl LoadSource {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::Signer,
            2 => Self::Caller,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Signer => "signer",
            Self::Caller => "caller",
        }
    }
}

// ---------------------------------------------------------------------------
// State variables
// ---------------------------------------------------------------------------

/// Declared state-variable roles of the token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateVar {
    Issuer = 0,
    Maker = 1,
}

impl StateVar {
    pub fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => Self::Issuer,
            1 => Self::Maker,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Issuer => "issuer",
            Self::Maker => "maker",
        }
    }
}

/// Sub-function tag of a `stateVarWrite` instruction.
pub const STATE_VAR_SET: u8 = 1;

/// Sub-function tag of a `stateVarRead` instruction.
pub const STATE_VAR_GET: u8 = 1;

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// Type tags of data-stack entries and state-variable declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    PublicKey = 1,
    Address = 2,
    Amount = 3,
    Int32 = 4,
    ShortText = 5,
    ContractAccount = 6,
    Account = 7,
}

impl ValueType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::PublicKey,
            2 => Self::Address,
            3 => Self::Amount,
            4 => Self::Int32,
            5 => Self::ShortText,
            6 => Self::ContractAccount,
            7 => Self::Account,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PublicKey => "publicKey",
            Self::Address => "address",
            Self::Amount => "amount",
            Self::Int32 => "int32",
            Self::ShortText => "shortText",
            Self::ContractAccount => "contractAccount",
            Self::Account => "account",
        }
    }
}

// ---------------------------------------------------------------------------
// Token sub-functions
// ---------------------------------------------------------------------------

/// Sub-function of a `tokenActionWrite` instruction, with its operand
/// index count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenActionWriteFn {
    /// Mint a new token type: operands are max, unity, description.
    NewToken = 1,
    /// Change the token unity: operand is the new unity.
    Split = 2,
}

impl TokenActionWriteFn {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::NewToken,
            2 => Self::Split,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NewToken => "newToken",
            Self::Split => "split",
        }
    }

    pub fn operand_count(self) -> usize {
        match self {
            Self::NewToken => 3,
            Self::Split => 1,
        }
    }
}

/// Sub-function of a `tokenActionRead` instruction. Both take one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenActionReadFn {
    Get = 1,
    Total = 2,
}

impl TokenActionReadFn {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::Get,
            2 => Self::Total,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Total => "total",
        }
    }

    pub fn operand_count(self) -> usize {
        1
    }
}

/// Sub-function of a `tokenBalanceWrite` instruction, with its operand
/// index count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBalanceWriteFn {
    /// Credit an account: operands are account, amount.
    Deposit = 1,
    /// Debit an account: operands are account, amount.
    Withdraw = 2,
    /// Move between accounts: operands are sender, recipient, amount.
    Transfer = 3,
}

impl TokenBalanceWriteFn {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::Deposit,
            2 => Self::Withdraw,
            3 => Self::Transfer,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
        }
    }

    pub fn operand_count(self) -> usize {
        match self {
            Self::Deposit | Self::Withdraw => 2,
            Self::Transfer => 3,
        }
    }
}

/// Sub-function of a `tokenBalanceRead` instruction. One operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBalanceReadFn {
    Balance = 1,
}

impl TokenBalanceReadFn {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Balance),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        "balance"
    }

    pub fn operand_count(self) -> usize {
        1
    }
}

// ---------------------------------------------------------------------------
// Function kinds
// ---------------------------------------------------------------------------

/// The function vocabulary of the standard token contract: the on-init
/// trigger plus the callable descriptor functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Init,
    Supersede,
    Issue,
    Destroy,
    Split,
    Send,
    Transfer,
    Deposit,
    Withdraw,
    TotalSupply,
    MaxSupply,
    BalanceOf,
    GetIssuer,
}

impl FunctionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Supersede => "supersede",
            Self::Issue => "issue",
            Self::Destroy => "destroy",
            Self::Split => "split",
            Self::Send => "send",
            Self::Transfer => "transfer",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::TotalSupply => "totalSupply",
            Self::MaxSupply => "maxSupply",
            Self::BalanceOf => "balanceOf",
            Self::GetIssuer => "getIssuer",
        }
    }

    /// Parameter-role names, in data-stack order. The trailing entries of
    /// some lists name values the function itself pushes (loads and reads
    /// land on the stack after the caller-supplied arguments).
    pub fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Self::Init => &["max", "unity", "tokenDescription", "signer"],
            Self::Supersede => &["newIssuer", "maker"],
            Self::Issue => &["amount", "issuer"],
            Self::Destroy => &["amount", "issuer"],
            Self::Split => &["newUnity", "issuer"],
            Self::Send => &["recipient", "amount", "caller"],
            Self::Transfer => &["sender", "recipient", "amount"],
            Self::Deposit => &["sender", "smart", "amount"],
            Self::Withdraw => &["smart", "recipient", "amount"],
            Self::TotalSupply => &["total"],
            Self::MaxSupply => &["max"],
            Self::BalanceOf => &["address", "balance"],
            Self::GetIssuer => &["issuer"],
        }
    }

    /// Descriptor index of this function in a contract carrying the split
    /// capability. `None` for the trigger.
    pub fn index_with_split(self) -> Option<u16> {
        Some(match self {
            Self::Init => return None,
            Self::Supersede => 0,
            Self::Issue => 1,
            Self::Destroy => 2,
            Self::Split => 3,
            Self::Send => 4,
            Self::Transfer => 5,
            Self::Deposit => 6,
            Self::Withdraw => 7,
            Self::TotalSupply => 8,
            Self::MaxSupply => 9,
            Self::BalanceOf => 10,
            Self::GetIssuer => 11,
        })
    }

    /// Descriptor index in a contract without the split capability.
    /// `None` for the trigger and for `Split` itself.
    pub fn index_without_split(self) -> Option<u16> {
        Some(match self {
            Self::Init | Self::Split => return None,
            Self::Supersede => 0,
            Self::Issue => 1,
            Self::Destroy => 2,
            Self::Send => 3,
            Self::Transfer => 4,
            Self::Deposit => 5,
            Self::Withdraw => 6,
            Self::TotalSupply => 7,
            Self::MaxSupply => 8,
            Self::BalanceOf => 9,
            Self::GetIssuer => 10,
        })
    }
}

/// Descriptor function order of the token contract with split capability.
pub const DESCRIPTOR_FUNCTIONS_WITH_SPLIT: &[FunctionKind] = &[
    FunctionKind::Supersede,
    FunctionKind::Issue,
    FunctionKind::Destroy,
    FunctionKind::Split,
    FunctionKind::Send,
    FunctionKind::Transfer,
    FunctionKind::Deposit,
    FunctionKind::Withdraw,
    FunctionKind::TotalSupply,
    FunctionKind::MaxSupply,
    FunctionKind::BalanceOf,
    FunctionKind::GetIssuer,
];

/// Descriptor function order of the token contract without split.
pub const DESCRIPTOR_FUNCTIONS_WITHOUT_SPLIT: &[FunctionKind] = &[
    FunctionKind::Supersede,
    FunctionKind::Issue,
    FunctionKind::Destroy,
    FunctionKind::Send,
    FunctionKind::Transfer,
    FunctionKind::Deposit,
    FunctionKind::Withdraw,
    FunctionKind::TotalSupply,
    FunctionKind::MaxSupply,
    FunctionKind::BalanceOf,
    FunctionKind::GetIssuer,
];
