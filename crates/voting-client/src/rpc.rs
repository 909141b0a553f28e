use anchor_lang::{AccountDeserialize, Discriminator};
use log::{debug, info};
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::errors::{ClientError, ClientResult};
use crate::pda::{candidate_address, poll_address};
use crate::states::{decode, Candidate, Poll};

/// Anything that can hand out a recent blockhash for a new transaction.
pub trait BlockhashSource {
    fn latest_blockhash(&self) -> ClientResult<Hash>;
}

/// Voting program view over a JSON-RPC endpoint.
pub struct VotingRpc {
    client: RpcClient,
}

impl VotingRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self::from_client(RpcClient::new_with_commitment(
            url.into(),
            CommitmentConfig::confirmed(),
        ))
    }

    pub fn from_client(client: RpcClient) -> Self {
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    pub fn fetch_maybe_poll(&self, address: &Pubkey) -> ClientResult<Option<Poll>> {
        self.fetch_maybe(address)
    }

    pub fn fetch_poll(&self, address: &Pubkey) -> ClientResult<Poll> {
        self.fetch_maybe_poll(address)?
            .ok_or(ClientError::AccountNotFound(*address))
    }

    pub fn fetch_maybe_candidate(&self, address: &Pubkey) -> ClientResult<Option<Candidate>> {
        self.fetch_maybe(address)
    }

    pub fn fetch_candidate(&self, address: &Pubkey) -> ClientResult<Candidate> {
        self.fetch_maybe_candidate(address)?
            .ok_or(ClientError::AccountNotFound(*address))
    }

    pub fn poll_by_id(&self, poll_id: u64) -> ClientResult<Option<Poll>> {
        self.fetch_maybe_poll(&poll_address(poll_id).0)
    }

    pub fn candidate_by_name(&self, name: &str, poll_id: u64) -> ClientResult<Option<Candidate>> {
        self.fetch_maybe_candidate(&candidate_address(name, poll_id).0)
    }

    /// Every poll account owned by the program.
    pub fn polls(&self) -> ClientResult<Vec<(Pubkey, Poll)>> {
        self.program_accounts()
    }

    /// Every candidate account owned by the program, across all polls.
    pub fn candidates(&self) -> ClientResult<Vec<(Pubkey, Candidate)>> {
        self.program_accounts()
    }

    pub fn balance(&self, address: &Pubkey) -> ClientResult<u64> {
        Ok(self.client.get_balance(address)?)
    }

    /// Signs with `payer` alone and waits for confirmation.
    pub fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
    ) -> ClientResult<Signature> {
        let blockhash = self.client.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        let signature = self.client.send_and_confirm_transaction(&transaction)?;
        info!("confirmed {signature}");
        Ok(signature)
    }

    fn fetch_maybe<T: AccountDeserialize>(&self, address: &Pubkey) -> ClientResult<Option<T>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())?;
        match response.value {
            Some(account) => {
                debug!("fetched {address} ({} bytes)", account.data.len());
                decode(address, &account.data).map(Some)
            }
            None => {
                debug!("account {address} does not exist");
                Ok(None)
            }
        }
    }

    fn program_accounts<T: AccountDeserialize + Discriminator>(
        &self,
    ) -> ClientResult<Vec<(Pubkey, T)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                0,
                T::DISCRIMINATOR.to_vec(),
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.client.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .client
            .get_program_accounts_with_config(&crate::ID, config)?;
        debug!("program returned {} matching accounts", accounts.len());
        accounts
            .into_iter()
            .map(|(address, account)| -> ClientResult<(Pubkey, T)> {
                Ok((address, decode(&address, &account.data)?))
            })
            .collect()
    }
}

impl BlockhashSource for VotingRpc {
    fn latest_blockhash(&self) -> ClientResult<Hash> {
        let (blockhash, _) = self
            .client
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())?;
        Ok(blockhash)
    }
}
