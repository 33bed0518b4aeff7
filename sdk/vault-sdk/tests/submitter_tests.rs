use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};
use vault_sdk::advanced::instructions;
use vault_sdk::core::connection::ConnectionError;
use vault_sdk::program::VaultError;
use vault_sdk::{
    run_deposit_withdraw, BuiltTransaction, ErrorKind, SolConnection, TransactionStatus,
    TransactionSubmitter, VaultSdkError,
};

mod common;
use common::{setup_test_context, TestContext};

/// Accepts every transaction and never delivers it.
struct BlackHole<'a> {
    inner: &'a TestContext,
}

#[async_trait]
impl SolConnection for BlackHole<'_> {
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, ConnectionError> {
        Ok(tx.signatures[0])
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ConnectionError> {
        self.inner.get_latest_blockhash().await
    }

    async fn is_blockhash_valid(&self, blockhash: &Hash) -> Result<bool, ConnectionError> {
        self.inner.is_blockhash_valid(blockhash).await
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ConnectionError> {
        self.inner.get_signature_status(signature).await
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>, ConnectionError> {
        self.inner.get_account(pubkey).await
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ConnectionError> {
        self.inner.get_balance(pubkey).await
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ConnectionError> {
        self.inner
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
    }
}

#[tokio::test]
async fn test_stages_report_their_status() -> Result<()> {
    let context = setup_test_context().await;
    let owner = context.owner.pubkey();
    let ix = context.vault().deposit().with_amount(1_000).instruction()?;

    let built = BuiltTransaction::build(&context, &[ix], &owner).await?;
    assert_eq!(built.status(), TransactionStatus::Built);
    assert_eq!(built.required_signers(), &[owner]);
    assert_eq!(built.transaction().message.recent_blockhash, built.blockhash());

    let signed = built.sign(&[&context.owner]).await?;
    assert_eq!(signed.status(), TransactionStatus::Signed);
    signed.transaction().verify()?;

    let submitted = signed.submit(&context).await?;
    assert_eq!(submitted.status(), TransactionStatus::Submitted);
    assert!(!submitted.status().is_terminal());

    let confirmed = submitted
        .confirm(&context, &context.submitter_config())
        .await?;
    assert_eq!(confirmed.status(), TransactionStatus::Confirmed);
    assert!(confirmed.status().is_terminal());
    assert_eq!(confirmed.signature, submitted.signature());
    Ok(())
}

#[tokio::test]
async fn test_stale_blockhash_expires_at_submission() -> Result<()> {
    let context = setup_test_context().await;
    let owner = context.owner.pubkey();
    let vault = context.vault();
    let ix = vault.deposit().with_amount(7_000).instruction()?;

    let built = BuiltTransaction::build(&context, &[ix.clone()], &owner).await?;
    let stale = built.blockhash();
    let signed = built.sign(&[&context.owner]).await?;

    context.expire_blockhash().await;

    let err = signed.submit(&context).await.unwrap_err();
    match &err {
        VaultSdkError::Expired { blockhash, .. } => assert_eq!(*blockhash, stale),
        other => panic!("expected Expired, got {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Expiry);
    assert!(err.is_retryable());
    assert_eq!(context.vault_balance(&vault).await?, 0);

    // Rebuilding picks up a fresh blockhash.
    let submitter = TransactionSubmitter::new(&context, context.submitter_config());
    let confirmed = submitter
        .submit_and_confirm(&[ix], &owner, &[&context.owner])
        .await?;
    assert_ne!(confirmed.blockhash, stale);
    assert_eq!(context.vault_balance(&vault).await?, 7_000);
    Ok(())
}

#[tokio::test]
async fn test_undelivered_transaction_expires_while_polling() -> Result<()> {
    let context = setup_test_context().await;
    let lossy = BlackHole { inner: &context };
    let ix = context.vault().deposit().with_amount(1_000).instruction()?;

    let built = BuiltTransaction::build(&lossy, &[ix], &context.owner.pubkey()).await?;
    let submitted = built.sign(&[&context.owner]).await?.submit(&lossy).await?;

    context.expire_blockhash().await;

    let err = submitted
        .confirm(&lossy, &context.submitter_config())
        .await
        .unwrap_err();
    assert!(matches!(err, VaultSdkError::Expired { .. }));
    Ok(())
}

#[tokio::test]
async fn test_rejection_surfaces_through_polling() -> Result<()> {
    let context = TestContext::deferred().await;
    let owner = context.owner.pubkey();
    let withdraw = context.vault().withdraw().instruction()?;

    let built = BuiltTransaction::build(&context, &[withdraw], &owner).await?;
    let submitted = built
        .sign(&[&context.owner])
        .await?
        .submit(&context)
        .await?;

    let err = submitted
        .confirm(&context, &context.submitter_config())
        .await
        .unwrap_err();

    match &err {
        VaultSdkError::Rejected { signature, reason } => {
            assert_eq!(*signature, submitted.signature());
            assert_eq!(
                *reason,
                TransactionError::InstructionError(
                    0,
                    InstructionError::Custom(VaultError::VaultNotFound.code())
                )
            );
        },
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(context.executed(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failing_instruction_rolls_back_whole_transaction() -> Result<()> {
    let context = setup_test_context().await;
    let owner = context.owner.pubkey();
    let vault = context.vault();
    let submitter = TransactionSubmitter::new(&context, context.submitter_config());

    let good = vault.deposit().with_amount(300_000).instruction()?;
    let bad = instructions::deposit(&context.program_id, &owner, &vault.address, 0)?;

    let err = submitter
        .submit_and_confirm(&[good, bad], &owner, &[&context.owner])
        .await
        .unwrap_err();

    match &err {
        VaultSdkError::Rejected { reason, .. } => assert_eq!(
            *reason,
            TransactionError::InstructionError(
                1,
                InstructionError::Custom(VaultError::ZeroAmount.code())
            )
        ),
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert!(vault.fetch_info(&context).await?.is_none());
    assert_eq!(context.vault_balance(&vault).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_signer_detected_locally() -> Result<()> {
    let context = setup_test_context().await;
    let payer = context.funded_keypair().await;
    let ix = context.vault().deposit().with_amount(1_000).instruction()?;

    let built = BuiltTransaction::build(&context, &[ix], &payer.pubkey()).await?;
    assert_eq!(built.required_signers().len(), 2);

    let err = built.sign(&[&payer]).await.unwrap_err();
    match err {
        VaultSdkError::MissingSigner(missing) => assert_eq!(missing, context.owner.pubkey()),
        other => panic!("expected MissingSigner, got {:?}", other),
    }
    assert_eq!(context.executed(), 0);
    Ok(())
}

#[tokio::test]
async fn test_unexpected_signer_rejected() -> Result<()> {
    let context = setup_test_context().await;
    let stranger = Keypair::new();
    let ix = context.vault().deposit().with_amount(1_000).instruction()?;

    let built = BuiltTransaction::build(&context, &[ix], &context.owner.pubkey()).await?;
    let err = built.sign(&[&context.owner, &stranger]).await.unwrap_err();

    assert!(matches!(err, VaultSdkError::UnexpectedSigner(key) if key == stranger.pubkey()));
    assert_eq!(err.kind(), ErrorKind::Validation);
    Ok(())
}

#[tokio::test]
async fn test_failed_deposit_stops_workflow() -> Result<()> {
    let context = TestContext::deferred().await;
    let poor = Keypair::new();
    context.airdrop(&poor.pubkey(), 1_000_000).await?;

    let err = run_deposit_withdraw(
        &context,
        &poor,
        context.program_id,
        context.submitter_config(),
        500_000_000,
    )
    .await
    .unwrap_err();

    assert_eq!(err.program_error(), Some(VaultError::InsufficientFunds));
    // Only the deposit was ever executed.
    assert_eq!(context.executed(), 1);
    Ok(())
}
