//! Transaction submission.
//!
//! A transaction moves through `Built → Signed → Submitted` and ends in
//! exactly one of `Confirmed`, `Rejected` or `Expired`. Each stage is its own
//! type, so a transaction can only be submitted once it is fully signed and
//! only confirmed once it was submitted. Terminal failures are returned as
//! [`VaultSdkError::Rejected`] / [`VaultSdkError::Expired`]; nothing here
//! retries. A retry means building again, which fetches a fresh blockhash.

use crate::core::config::VaultConfig;
use crate::core::connection::{transaction_error, ConnectionError, SolConnection};
use crate::core::signer::VaultSigner;
use crate::error::{Result, VaultSdkError};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Rejected,
    Expired,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Confirmed | TransactionStatus::Rejected | TransactionStatus::Expired
        )
    }
}

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Delay between signature status polls
    pub poll_interval: Duration,
    /// Upper bound on confirmation polling, independent of blockhash expiry
    pub confirm_timeout: Duration,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            confirm_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&VaultConfig> for SubmitterConfig {
    fn from(config: &VaultConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            confirm_timeout: config.confirm_timeout,
        }
    }
}

fn connection_error(err: ConnectionError) -> VaultSdkError {
    VaultSdkError::Connection(err.to_string())
}

/// Maps an environment rejection onto the terminal state it represents.
fn terminal_error(
    signature: Signature,
    blockhash: Hash,
    reason: TransactionError,
) -> VaultSdkError {
    match reason {
        TransactionError::BlockhashNotFound => {
            warn!(%signature, %blockhash, "transaction expired");
            VaultSdkError::Expired {
                signature,
                blockhash,
            }
        },
        reason => {
            warn!(%signature, %reason, "transaction rejected");
            VaultSdkError::Rejected { signature, reason }
        },
    }
}

//=============================================================================
// Built
//=============================================================================

/// Unsigned transaction bound to a blockhash fetched just before building.
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    transaction: Transaction,
    blockhash: Hash,
}

impl BuiltTransaction {
    /// Fetches a fresh blockhash and assembles an unsigned transaction.
    pub async fn build(
        connection: &impl SolConnection,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
    ) -> Result<Self> {
        let blockhash = connection
            .get_latest_blockhash()
            .await
            .map_err(connection_error)?;

        let message = Message::new_with_blockhash(instructions, Some(fee_payer), &blockhash);
        debug!(
            %blockhash,
            %fee_payer,
            instructions = instructions.len(),
            "transaction built"
        );

        Ok(Self {
            transaction: Transaction::new_unsigned(message),
            blockhash,
        })
    }

    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::Built
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn required_signers(&self) -> &[Pubkey] {
        let required = self.transaction.message.header.num_required_signatures as usize;
        &self.transaction.message.account_keys[..required]
    }

    /// Collects a signature from every supplied signer over the exact message.
    /// Every required signer must be supplied, and nothing else.
    pub async fn sign(mut self, signers: &[&dyn VaultSigner]) -> Result<SignedTransaction> {
        let message_data = self.transaction.message_data();

        for signer in signers {
            let pubkey = signer.pubkey();
            let position = self
                .required_signers()
                .iter()
                .position(|key| key == &pubkey)
                .ok_or(VaultSdkError::UnexpectedSigner(pubkey))?;

            let signature = signer
                .sign_message(&message_data)
                .await
                .map_err(VaultSdkError::Signer)?;
            if !signature.verify(pubkey.as_ref(), &message_data) {
                return Err(VaultSdkError::Signer(format!(
                    "signature from {} does not verify",
                    pubkey
                )));
            }

            self.transaction.signatures[position] = signature;
        }

        if let Some(missing) = self
            .transaction
            .signatures
            .iter()
            .position(|signature| *signature == Signature::default())
        {
            return Err(VaultSdkError::MissingSigner(
                self.transaction.message.account_keys[missing],
            ));
        }

        let signed = SignedTransaction {
            transaction: self.transaction,
            blockhash: self.blockhash,
        };
        debug!(signature = %signed.signature(), "transaction signed");
        Ok(signed)
    }
}

//=============================================================================
// Signed
//=============================================================================

#[derive(Debug, Clone)]
pub struct SignedTransaction {
    transaction: Transaction,
    blockhash: Hash,
}

impl SignedTransaction {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::Signed
    }

    /// Fee payer signature; identifies the transaction.
    pub fn signature(&self) -> Signature {
        self.transaction.signatures[0]
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Hands the transaction to the environment. A synchronous rejection is
    /// returned verbatim; a stale blockhash is reported as expiry.
    pub async fn submit(self, connection: &impl SolConnection) -> Result<SubmittedTransaction> {
        let signature = self.signature();

        match connection.send_transaction(&self.transaction).await {
            Ok(accepted) => {
                debug!(signature = %accepted, "transaction submitted");
                Ok(SubmittedTransaction {
                    signature: accepted,
                    blockhash: self.blockhash,
                })
            },
            Err(err) => match transaction_error(&err) {
                Some(reason) => Err(terminal_error(signature, self.blockhash, reason)),
                None => Err(connection_error(err)),
            },
        }
    }
}

//=============================================================================
// Submitted
//=============================================================================

#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    signature: Signature,
    blockhash: Hash,
}

impl SubmittedTransaction {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::Submitted
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    /// Polls until the environment reports an outcome or the blockhash
    /// leaves its validity window.
    pub async fn confirm(
        &self,
        connection: &impl SolConnection,
        config: &SubmitterConfig,
    ) -> Result<ConfirmedTransaction> {
        tokio::time::timeout(config.confirm_timeout, self.poll(connection, config))
            .await
            .map_err(|_| {
                VaultSdkError::Connection(format!(
                    "confirmation of {} timed out after {:?}",
                    self.signature, config.confirm_timeout
                ))
            })?
    }

    async fn poll(
        &self,
        connection: &impl SolConnection,
        config: &SubmitterConfig,
    ) -> Result<ConfirmedTransaction> {
        loop {
            if let Some(outcome) = self.poll_status(connection).await? {
                return outcome;
            }

            let still_valid = connection
                .is_blockhash_valid(&self.blockhash)
                .await
                .map_err(connection_error)?;
            if !still_valid {
                // It may have landed between the two calls.
                if let Some(outcome) = self.poll_status(connection).await? {
                    return outcome;
                }
                return Err(terminal_error(
                    self.signature,
                    self.blockhash,
                    TransactionError::BlockhashNotFound,
                ));
            }

            tokio::time::sleep(config.poll_interval).await;
        }
    }

    async fn poll_status(
        &self,
        connection: &impl SolConnection,
    ) -> Result<Option<Result<ConfirmedTransaction>>> {
        let status = connection
            .get_signature_status(&self.signature)
            .await
            .map_err(connection_error)?;

        Ok(status.map(|outcome| match outcome {
            Ok(()) => {
                info!(signature = %self.signature, "transaction confirmed");
                Ok(ConfirmedTransaction {
                    signature: self.signature,
                    blockhash: self.blockhash,
                })
            },
            Err(reason) => Err(terminal_error(self.signature, self.blockhash, reason)),
        }))
    }
}

//=============================================================================
// Confirmed
//=============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedTransaction {
    pub signature: Signature,
    pub blockhash: Hash,
}

impl ConfirmedTransaction {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::Confirmed
    }
}

//=============================================================================
// Submitter
//=============================================================================

/// Runs one transaction through every stage against a connection.
pub struct TransactionSubmitter<'a, C: SolConnection> {
    connection: &'a C,
    config: SubmitterConfig,
}

impl<'a, C: SolConnection> TransactionSubmitter<'a, C> {
    pub fn new(connection: &'a C, config: SubmitterConfig) -> Self {
        Self { connection, config }
    }

    pub fn connection(&self) -> &'a C {
        self.connection
    }

    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    pub async fn build(
        &self,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
    ) -> Result<BuiltTransaction> {
        BuiltTransaction::build(self.connection, instructions, fee_payer).await
    }

    /// Build with a fresh blockhash, sign, submit and wait for the outcome.
    pub async fn submit_and_confirm(
        &self,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
        signers: &[&dyn VaultSigner],
    ) -> Result<ConfirmedTransaction> {
        let built = self.build(instructions, fee_payer).await?;
        let signed = built.sign(signers).await?;
        let submitted = signed.submit(self.connection).await?;
        submitted.confirm(self.connection, &self.config).await
    }
}
