//! Confirmation session engine.
//!
//! One task owns the [`ConfirmationState`] and processes commands one at a
//! time from an mpsc queue: toggles, confirm requests, and the result of the
//! identity lookup (which runs in its own task and posts back through the
//! same queue). Sections and phase are published through `watch` channels,
//! so a new observer always sees the latest value first.
//!
//! The engine stops once every [`ConfirmationHandle`] is dropped.

use crate::assemble::TransactionAssembler;
use crate::error::ConfirmationError;
use crate::format::{AmountFormatter, ConfirmationStrings};
use crate::identity::{embedded_email, RecipientIdentityResolver, ResolvedIdentity};
use crate::model::{ConfirmationState, PaymentIntent};
use crate::sections::{render_sections, CellIdentifier, SectionModel};
use crate::submit::{CacheReload, TransactionSubmitter};
use remit_rpc::{IdentityDirectory, NetworkInfoFetcher, SubmitReceipt, TransactionSender};
use remit_types::AccountId;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{mpsc, oneshot, watch};

const COMMAND_QUEUE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Waiting for the recipient identity.
    Loading,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

/// External collaborators of a confirmation session.
#[derive(Clone)]
pub struct ConfirmationServices {
    pub identity_directory: Arc<dyn IdentityDirectory>,
    pub network_info: Arc<dyn NetworkInfoFetcher>,
    pub sender: Arc<dyn TransactionSender>,
    pub history: Arc<dyn CacheReload>,
    pub balances: Arc<dyn CacheReload>,
}

enum Command {
    SetPayRecipientFee(bool, oneshot::Sender<()>),
    Confirm(oneshot::Sender<Result<SubmitReceipt, ConfirmationError>>),
    IdentityResolved(ResolvedIdentity),
}

pub struct ConfirmationEngine {
    intent: PaymentIntent,
    state: ConfirmationState,
    phase: Phase,
    assembler: TransactionAssembler,
    submitter: TransactionSubmitter,
    network_info: Arc<dyn NetworkInfoFetcher>,
    formatter: Arc<dyn AmountFormatter>,
    strings: ConfirmationStrings,
    sections_tx: watch::Sender<Vec<SectionModel>>,
    phase_tx: watch::Sender<Phase>,
}

impl ConfirmationEngine {
    /// Start a confirmation session for `intent` sent from `source_account`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        intent: PaymentIntent,
        source_account: AccountId,
        services: ConfirmationServices,
        formatter: Arc<dyn AmountFormatter>,
        strings: ConfirmationStrings,
    ) -> ConfirmationHandle {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE_SIZE);
        let (sections_tx, sections_rx) = watch::channel(Vec::new());
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);

        let mut engine = ConfirmationEngine {
            state: ConfirmationState::default(),
            phase: Phase::Idle,
            assembler: TransactionAssembler::new(source_account),
            submitter: TransactionSubmitter::new(
                services.sender,
                services.history,
                services.balances,
            ),
            network_info: services.network_info,
            formatter,
            strings,
            sections_tx,
            phase_tx,
            intent,
        };

        let resolver = RecipientIdentityResolver::new(services.identity_directory);
        let account_id = engine.intent.recipient_account_id.clone();
        let identity_tx = commands_tx.downgrade();
        tokio::spawn(async move {
            let identity = resolver.resolve(&account_id).await;
            if let Some(tx) = identity_tx.upgrade() {
                let _ = tx.send(Command::IdentityResolved(identity)).await;
            }
        });

        engine.set_phase(Phase::Loading);
        if let Some(email) = embedded_email(&engine.intent.description) {
            engine.state.offer_requestor_email(email);
            engine.set_phase(Phase::Ready);
        }
        engine.recompute();

        tokio::spawn(engine.run(commands_rx));

        ConfirmationHandle {
            commands: commands_tx,
            sections: sections_rx,
            phase: phase_rx,
        }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            match command {
                Command::SetPayRecipientFee(value, reply) => {
                    self.state.source_pays_recipient_fee = value;
                    self.recompute();
                    let _ = reply.send(());
                }
                Command::Confirm(reply) => {
                    let result = self.confirm().await;
                    let _ = reply.send(result);
                }
                Command::IdentityResolved(identity) => self.on_identity(identity),
            }
        }
        log::debug!("confirmation engine stopped");
    }

    fn on_identity(&mut self, identity: ResolvedIdentity) {
        let email = match identity {
            ResolvedIdentity::Email(email) => email,
            ResolvedIdentity::Unknown => self.strings.undefined.clone(),
        };
        if self.state.offer_requestor_email(email) {
            self.recompute();
        }
        if self.phase == Phase::Loading {
            self.set_phase(Phase::Ready);
        }
    }

    async fn confirm(&mut self) -> Result<SubmitReceipt, ConfirmationError> {
        if self.phase == Phase::Succeeded {
            return Err(ConfirmationError::AlreadySubmitted);
        }

        // Phase is untouched until network info is in hand.
        let info = match self.network_info.fetch_network_info().await {
            Ok(info) => info,
            Err(e) => {
                log::warn!("failed to fetch network info: {}", e);
                return Err(ConfirmationError::NetworkInfo(e));
            }
        };
        self.set_phase(Phase::Submitting);

        let result = match self
            .assembler
            .assemble(&self.intent, &self.state, &info, SystemTime::now())
        {
            Ok(envelope) => self.submitter.submit(envelope).await.map_err(Into::into),
            Err(e) => Err(e.into()),
        };

        self.set_phase(if result.is_ok() {
            Phase::Succeeded
        } else {
            Phase::Failed
        });
        result
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("confirmation phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.phase_tx.send_replace(phase);
        }
    }

    fn recompute(&self) {
        let sections = render_sections(
            &self.intent,
            &self.state,
            self.formatter.as_ref(),
            &self.strings,
        );
        log::debug!(
            "recomputed {} sections (pay recipient fee: {})",
            sections.len(),
            self.state.source_pays_recipient_fee
        );
        self.sections_tx.send_replace(sections);
    }
}

/// Caller side of a running confirmation session.
#[derive(Clone)]
pub struct ConfirmationHandle {
    commands: mpsc::Sender<Command>,
    sections: watch::Receiver<Vec<SectionModel>>,
    phase: watch::Receiver<Phase>,
}

impl ConfirmationHandle {
    /// Section stream; the current value is available immediately.
    pub fn sections(&self) -> watch::Receiver<Vec<SectionModel>> {
        self.sections.clone()
    }

    pub fn current_sections(&self) -> Vec<SectionModel> {
        self.sections.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase.clone()
    }

    /// Set the "pay recipient's fee" toggle. Returns once sections reflect it.
    pub async fn set_pay_recipient_fee(&self, value: bool) -> Result<(), ConfirmationError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::SetPayRecipientFee(value, reply))
            .await
            .map_err(|_| ConfirmationError::EngineStopped)?;
        rx.await.map_err(|_| ConfirmationError::EngineStopped)
    }

    /// Route a switch edit from the UI. Switches other than the
    /// recipient-fee toggle are ignored.
    pub async fn handle_bool_switch(
        &self,
        identifier: CellIdentifier,
        value: bool,
    ) -> Result<(), ConfirmationError> {
        match identifier {
            CellIdentifier::PayRecipientFee => self.set_pay_recipient_fee(value).await,
            _ => Ok(()),
        }
    }

    /// Fetch network info, assemble, and submit the payment.
    pub async fn confirm(&self) -> Result<SubmitReceipt, ConfirmationError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Confirm(reply))
            .await
            .map_err(|_| ConfirmationError::EngineStopped)?;
        rx.await.map_err(|_| ConfirmationError::EngineStopped)?
    }
}
