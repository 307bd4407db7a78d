//! Instruction-stream decompilation.
//!
//! Walks each trigger and descriptor entry opcode-by-opcode, resolving
//! every byte through the catalog and the container's textual name tables,
//! and produces an ordered listing of readable instruction lines. Pure:
//! the output is a function of the container alone, and every function is
//! decompiled independently.

use super::container::{read_sub_arrays, ContractContainer, FormatError};
use super::opcodes::{
    AssertKind, LoadSource, Opcode, TokenActionReadFn, TokenActionWriteFn,
    TokenBalanceReadFn, TokenBalanceWriteFn, STATE_VAR_GET, STATE_VAR_SET,
};

/// One decompiled instruction: stream position, family name, and the
/// resolved operand description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    pub index: usize,
    pub opcode: &'static str,
    pub operands: String,
}

/// One decompiled function: the trigger (id `"00"`) or a descriptor
/// function (ids counting up from `"01"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDoc {
    pub id: String,
    pub name: String,
    pub params: Vec<String>,
    pub instructions: Vec<InstructionLine>,
}

/// The parsed textual section: per-function name tables plus the
/// state-variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextualInfo {
    pub triggers: Vec<FuncText>,
    pub functions: Vec<FuncText>,
    pub state_variables: Vec<String>,
}

/// Name table of one function: its name followed by parameter names in
/// data-stack order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncText {
    pub name: String,
    pub params: Vec<String>,
}

/// Parse the three textual sub-arrays: trigger texts, descriptor texts,
/// state-variable names.
pub fn parse_textual(container: &ContractContainer) -> Result<TextualInfo, FormatError> {
    if container.textual.len() != 3 {
        return Err(FormatError::TextualShape {
            expected: 3,
            found: container.textual.len(),
        });
    }

    Ok(TextualInfo {
        triggers: parse_func_texts(&container.textual[0])?,
        functions: parse_func_texts(&container.textual[1])?,
        state_variables: parse_strings(&container.textual[2])?,
    })
}

fn parse_func_texts(region: &[u8]) -> Result<Vec<FuncText>, FormatError> {
    let mut texts = Vec::new();
    for entry in read_sub_arrays(region)? {
        let mut strings = parse_strings(&entry)?;
        if strings.is_empty() {
            return Err(FormatError::BadTextual);
        }
        let name = strings.remove(0);
        texts.push(FuncText {
            name,
            params: strings,
        });
    }
    Ok(texts)
}

fn parse_strings(region: &[u8]) -> Result<Vec<String>, FormatError> {
    read_sub_arrays(region)?
        .into_iter()
        .map(|bytes| String::from_utf8(bytes).map_err(|_| FormatError::BadTextual))
        .collect()
}

/// Decompile every function of a container: the trigger first (fixed id
/// `"00"`), then the descriptor functions in declaration order.
pub fn decompile(container: &ContractContainer) -> Result<Vec<FunctionDoc>, FormatError> {
    let textual = parse_textual(container)?;
    let mut docs = Vec::with_capacity(container.triggers.len() + container.descriptors.len());

    for (i, stream) in container.triggers.iter().enumerate() {
        docs.push(decompile_function(
            format!("{:02}", i),
            stream,
            textual.triggers.get(i),
            &textual.state_variables,
        )?);
    }
    for (i, stream) in container.descriptors.iter().enumerate() {
        docs.push(decompile_function(
            format!("{:02}", container.triggers.len() + i),
            stream,
            textual.functions.get(i),
            &textual.state_variables,
        )?);
    }
    Ok(docs)
}

fn decompile_function(
    id: String,
    stream: &[u8],
    text: Option<&FuncText>,
    state_names: &[String],
) -> Result<FunctionDoc, FormatError> {
    let name = text.map(|t| t.name.clone()).unwrap_or_default();
    let params: Vec<String> = text.map(|t| t.params.clone()).unwrap_or_default();

    let mut cursor = Cursor {
        stream,
        pos: 0,
        params: &params,
        state_names,
    };
    let mut instructions = Vec::new();
    let mut index = 0usize;
    while cursor.pos < stream.len() {
        let tag = stream[cursor.pos];
        cursor.pos += 1;
        let opcode = Opcode::from_tag(tag).ok_or(FormatError::UnknownOpcode { tag, index })?;
        let operands = cursor.read_operands(opcode)?;
        instructions.push(InstructionLine {
            index,
            opcode: opcode.name(),
            operands,
        });
        index += 1;
    }

    Ok(FunctionDoc {
        id,
        name,
        params,
        instructions,
    })
}

struct Cursor<'a> {
    stream: &'a [u8],
    pos: usize,
    params: &'a [String],
    state_names: &'a [String],
}

impl Cursor<'_> {
    fn byte(&mut self, opcode: &'static str) -> Result<u8, FormatError> {
        if self.pos >= self.stream.len() {
            return Err(FormatError::TruncatedInstruction { opcode });
        }
        let b = self.stream[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn data_name(&self, index: u8) -> String {
        self.params
            .get(index as usize)
            .cloned()
            .unwrap_or_else(|| format!("var{}", index))
    }

    fn state_name(&self, index: u8) -> String {
        self.state_names
            .get(index as usize)
            .cloned()
            .unwrap_or_else(|| format!("state{}", index))
    }

    fn data_names(&mut self, count: usize, opcode: &'static str) -> Result<String, FormatError> {
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = self.byte(opcode)?;
            names.push(self.data_name(idx));
        }
        Ok(names.join(", "))
    }

    fn read_operands(&mut self, opcode: Opcode) -> Result<String, FormatError> {
        let family = opcode.name();
        match opcode {
            Opcode::Assert => {
                let tag = self.byte(family)?;
                let kind =
                    AssertKind::from_tag(tag).ok_or(FormatError::UnknownFunctionTag {
                        family: "assert",
                        tag,
                    })?;
                let args = self.data_names(kind.operand_count(), family)?;
                Ok(format!("{}({})", kind.name(), args))
            }
            Opcode::Load => {
                let tag = self.byte(family)?;
                let source =
                    LoadSource::from_tag(tag).ok_or(FormatError::UnknownFunctionTag {
                        family: "load",
                        tag,
                    })?;
                Ok(source.name().to_string())
            }
            Opcode::StateVarWrite => {
                let tag = self.byte(family)?;
                if tag != STATE_VAR_SET {
                    return Err(FormatError::UnknownFunctionTag {
                        family: "stateVarWrite",
                        tag,
                    });
                }
                let state = self.byte(family)?;
                let data = self.byte(family)?;
                Ok(format!(
                    "set({}, {})",
                    self.state_name(state),
                    self.data_name(data)
                ))
            }
            Opcode::StateVarRead => {
                let tag = self.byte(family)?;
                if tag != STATE_VAR_GET {
                    return Err(FormatError::UnknownFunctionTag {
                        family: "stateVarRead",
                        tag,
                    });
                }
                let state = self.byte(family)?;
                Ok(format!("get({})", self.state_name(state)))
            }
            Opcode::TokenActionWrite => {
                let tag = self.byte(family)?;
                let func = TokenActionWriteFn::from_tag(tag).ok_or(
                    FormatError::UnknownFunctionTag {
                        family: "tokenActionWrite",
                        tag,
                    },
                )?;
                let args = self.data_names(func.operand_count(), family)?;
                Ok(format!("{}({})", func.name(), args))
            }
            Opcode::TokenActionRead => {
                let tag = self.byte(family)?;
                let func = TokenActionReadFn::from_tag(tag).ok_or(
                    FormatError::UnknownFunctionTag {
                        family: "tokenActionRead",
                        tag,
                    },
                )?;
                let args = self.data_names(func.operand_count(), family)?;
                Ok(format!("{}({})", func.name(), args))
            }
            Opcode::TokenBalanceWrite => {
                let tag = self.byte(family)?;
                let func = TokenBalanceWriteFn::from_tag(tag).ok_or(
                    FormatError::UnknownFunctionTag {
                        family: "tokenBalanceWrite",
                        tag,
                    },
                )?;
                let args = self.data_names(func.operand_count(), family)?;
                Ok(format!("{}({})", func.name(), args))
            }
            Opcode::TokenBalanceRead => {
                let tag = self.byte(family)?;
                let func = TokenBalanceReadFn::from_tag(tag).ok_or(
                    FormatError::UnknownFunctionTag {
                        family: "tokenBalanceRead",
                        tag,
                    },
                )?;
                let args = self.data_names(func.operand_count(), family)?;
                Ok(format!("{}({})", func.name(), args))
            }
            Opcode::Return => {
                let idx = self.byte(family)?;
                Ok(self.data_name(idx))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::builder::token_contract;
    use crate::contract::opcodes::DESCRIPTOR_FUNCTIONS_WITH_SPLIT;

    #[test]
    fn trigger_comes_first_with_id_00() {
        let docs = decompile(&token_contract(true)).unwrap();
        assert_eq!(docs[0].id, "00");
        assert_eq!(docs[0].name, "init");
        assert_eq!(docs[1].id, "01");
    }

    #[test]
    fn all_functions_present_in_declaration_order() {
        let docs = decompile(&token_contract(true)).unwrap();
        assert_eq!(docs.len(), 1 + DESCRIPTOR_FUNCTIONS_WITH_SPLIT.len());
        let names: Vec<&str> = docs[1..].iter().map(|d| d.name.as_str()).collect();
        let expected: Vec<&str> = DESCRIPTOR_FUNCTIONS_WITH_SPLIT
            .iter()
            .map(|k| k.name())
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn no_split_variant_omits_split() {
        let docs = decompile(&token_contract(false)).unwrap();
        assert!(docs.iter().all(|d| d.name != "split"));
        // send shifts down to descriptor index 3, i.e. listing id 04.
        let send = docs.iter().find(|d| d.name == "send").unwrap();
        assert_eq!(send.id, "04");
    }

    #[test]
    fn init_trigger_listing_resolves_names() {
        let docs = decompile(&token_contract(true)).unwrap();
        let init = &docs[0];
        assert_eq!(init.params, ["max", "unity", "tokenDescription", "signer"]);

        assert_eq!(init.instructions[0].opcode, "load");
        assert_eq!(init.instructions[0].operands, "signer");
        assert_eq!(init.instructions[1].opcode, "stateVarWrite");
        assert_eq!(init.instructions[1].operands, "set(issuer, signer)");
        assert_eq!(init.instructions[2].operands, "set(maker, signer)");
        assert_eq!(init.instructions[3].opcode, "tokenActionWrite");
        assert_eq!(
            init.instructions[3].operands,
            "newToken(max, unity, tokenDescription)"
        );
    }

    #[test]
    fn instruction_indices_are_sequential() {
        let docs = decompile(&token_contract(true)).unwrap();
        for doc in docs {
            for (i, line) in doc.instructions.iter().enumerate() {
                assert_eq!(line.index, i, "function {}", doc.name);
            }
        }
    }

    #[test]
    fn decompile_is_pure() {
        let container = token_contract(true);
        assert_eq!(
            decompile(&container).unwrap(),
            decompile(&container).unwrap()
        );
    }

    #[test]
    fn unknown_opcode_rejected() {
        let mut container = token_contract(true);
        container.descriptors[0] = vec![0xEE];
        let err = decompile(&container).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownOpcode {
                tag: 0xEE,
                index: 0
            }
        );
    }

    #[test]
    fn truncated_operands_rejected() {
        let mut container = token_contract(true);
        // assert + isSignerOrigin, but the operand index byte is missing.
        container.descriptors[0] = vec![1, 7];
        let err = decompile(&container).unwrap_err();
        assert_eq!(err, FormatError::TruncatedInstruction { opcode: "assert" });
    }

    #[test]
    fn unknown_assert_kind_rejected() {
        let mut container = token_contract(true);
        container.descriptors[0] = vec![1, 99, 0];
        let err = decompile(&container).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownFunctionTag {
                family: "assert",
                tag: 99
            }
        );
    }

    #[test]
    fn missing_textual_entry_falls_back_to_positional_names() {
        let mut container = token_contract(true);
        // Drop the descriptor name tables entirely.
        container.textual[1] = Vec::new();
        let docs = decompile(&container).unwrap();
        let first_descriptor = &docs[1];
        assert_eq!(first_descriptor.name, "");
        assert!(first_descriptor
            .instructions
            .iter()
            .any(|line| line.operands.contains("var") || line.operands.contains("state")));
    }

    #[test]
    fn wrong_textual_shape_rejected() {
        let mut container = token_contract(true);
        container.textual.pop();
        assert!(matches!(
            decompile(&container),
            Err(FormatError::TextualShape {
                expected: 3,
                found: 2
            })
        ));
    }
}
