//! CLI command implementations.

use crate::AppContext;
use remit_rpc::{HttpIdentityDirectory, HttpNetworkInfoFetcher, HttpTransactionSender, RpcClient};
use remit_tx::{KeyPairSigner, TransactionSigner};
use remit_types::{AccountId, BalanceId};
use remit_wallet::{
    embedded_email, render_sections, CellModel, CellType, ConfirmationEngine,
    ConfirmationServices, ConfirmationState, ConfirmationStrings, DecimalAmountFormatter,
    PaymentIntent, Phase, RecipientIdentityResolver, ResolvedIdentity, SectionModel,
};
use std::path::Path;
use std::sync::Arc;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn prompt_seed(prompt: &str) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let seed = rpassword::prompt_password(prompt)?;
    if seed.trim().is_empty() {
        return Err("secret seed cannot be empty".into());
    }
    Ok(seed)
}

/// Parse an 'S...' secret seed and check it signs for `account`.
fn parse_signer(
    seed: &str,
    account: &AccountId,
) -> std::result::Result<KeyPairSigner, Box<dyn std::error::Error>> {
    let signer = KeyPairSigner::from_secret_seed(seed.trim())?;
    if signer.account_id() != *account {
        return Err(format!("seed does not belong to account {}", account).into());
    }
    Ok(signer)
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn load_intent(path: &Path) -> std::result::Result<PaymentIntent, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&json)?)
}

fn cell_line(cell: &CellModel) -> String {
    let value = match &cell.cell_type {
        CellType::Text(s) => s.clone(),
        CellType::BoolSwitch(true) => "[x]".to_string(),
        CellType::BoolSwitch(false) => "[ ]".to_string(),
    };
    if cell.is_disabled {
        format!("{:<22} {} (covered)", cell.hint, value)
    } else {
        format!("{:<22} {}", cell.hint, value)
    }
}

fn print_sections(sections: &[SectionModel]) {
    for section in sections {
        println!();
        if !section.title.is_empty() {
            println!("{}", section.title);
        }
        for cell in &section.cells {
            println!("  {}", cell_line(cell));
        }
    }
}

fn client(ctx: &AppContext) -> std::result::Result<Arc<RpcClient>, Box<dyn std::error::Error>> {
    Ok(Arc::new(RpcClient::with_config(ctx.rpc_config.clone())?))
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub async fn preview(
    ctx: &AppContext,
    path: &Path,
    pay_recipient_fee: bool,
    resolve: bool,
) -> Result {
    let intent = load_intent(path)?;
    let strings = ConfirmationStrings::default();

    let mut state = ConfirmationState {
        source_pays_recipient_fee: pay_recipient_fee,
        ..Default::default()
    };
    if let Some(email) = embedded_email(&intent.description) {
        state.offer_requestor_email(email);
    }
    if resolve {
        let directory = HttpIdentityDirectory::new(client(ctx)?);
        let resolver = RecipientIdentityResolver::new(Arc::new(directory));
        let email = match resolver.resolve(&intent.recipient_account_id).await {
            ResolvedIdentity::Email(email) => email,
            ResolvedIdentity::Unknown => strings.undefined.clone(),
        };
        state.offer_requestor_email(email);
    }

    let sections = render_sections(&intent, &state, &DecimalAmountFormatter::default(), &strings);
    print_sections(&sections);
    Ok(())
}

pub async fn send(
    ctx: &AppContext,
    path: &Path,
    account: &str,
    pay_recipient_fee: bool,
) -> Result {
    let intent = load_intent(path)?;
    let account: AccountId = account.parse()?;
    let signer = parse_signer(&prompt_seed("Secret seed (S...): ")?, &account)?;

    let client = client(ctx)?;
    let services = ConfirmationServices {
        identity_directory: Arc::new(HttpIdentityDirectory::new(client.clone())),
        network_info: Arc::new(HttpNetworkInfoFetcher::new(client.clone())),
        sender: Arc::new(HttpTransactionSender::new(client, Arc::new(signer))),
        history: Arc::new(|| log::info!("history cache invalidated")),
        balances: Arc::new(|| log::info!("balances cache invalidated")),
    };

    let handle = ConfirmationEngine::spawn(
        intent,
        account,
        services,
        Arc::new(DecimalAmountFormatter::default()),
        ConfirmationStrings::default(),
    );
    handle.set_pay_recipient_fee(pay_recipient_fee).await?;

    let mut phase = handle.subscribe_phase();
    let _ = tokio::time::timeout(
        ctx.rpc_config.timeout,
        phase.wait_for(|p| *p != Phase::Loading),
    )
    .await;
    print_sections(&handle.current_sections());

    let receipt = handle.confirm().await?;
    println!("\nSubmitted: {}", receipt.hash);
    Ok(())
}

pub fn decode_id(id: &str) -> Result {
    let (kind, payload) = if id.starts_with('B') {
        ("balance", *id.parse::<BalanceId>()?.as_bytes())
    } else {
        ("account", *id.parse::<AccountId>()?.as_bytes())
    };
    println!("type:    {}", kind);
    println!("payload: {}", hex::encode(payload));
    Ok(())
}
