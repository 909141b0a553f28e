//! Unsigned version-0 transactions for wallets to sign.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;

use crate::errors::ClientResult;

/// Compiles `instructions` into a v0 message paid by `fee_payer` and leaves
/// one zeroed signature slot per required signer.
pub fn compile_unsigned(
    fee_payer: &Pubkey,
    instructions: &[Instruction],
    recent_blockhash: Hash,
) -> ClientResult<VersionedTransaction> {
    let message = v0::Message::try_compile(fee_payer, instructions, &[], recent_blockhash)?;
    let signatures = vec![Signature::default(); usize::from(message.header.num_required_signatures)];
    Ok(VersionedTransaction {
        signatures,
        message: VersionedMessage::V0(message),
    })
}

/// Wire-format bytes, base64 encoded.
pub fn encode_base64(transaction: &VersionedTransaction) -> ClientResult<String> {
    let bytes = bincode::serialize(transaction)?;
    Ok(BASE64_STANDARD.encode(bytes))
}

pub fn decode_base64(encoded: &str) -> ClientResult<VersionedTransaction> {
    let bytes = BASE64_STANDARD.decode(encoded)?;
    Ok(bincode::deserialize(&bytes)?)
}
