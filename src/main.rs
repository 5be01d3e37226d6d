//! Proofmark Demo
//!
//! Runs the full proof lifecycle against the in-process collaborators:
//! upload, anchored creation, verification, tamper detection,
//! local-only fallback, late anchoring, and certificate export.

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use proofmark::{
    display_urls, resolve_token,
    ledger::{FileStore, LocalIdentity, LocalUploader, MockLedger},
    ContentUploader, LifecycleManager, OwnerAddress, ProofCertificate, ProofRecordStore,
    RecordMeta, StoreConfig, VERSION,
};

/// Development owner used when no wallet is connected.
const DEV_OWNER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Proofmark v{}", VERSION);

    // Content comes from an argument file, or a built-in sample.
    let (name, bytes) = match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            (path, bytes)
        }
        None => (
            "sample.txt".to_string(),
            b"proofmark demo content".to_vec(),
        ),
    };
    info!("Input: {} ({} bytes)", name, bytes.len());

    demo_flow(&name, &bytes).await
}

/// Drive every lifecycle phase once.
async fn demo_flow(name: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let owner = OwnerAddress::parse(DEV_OWNER).context("parsing dev owner")?;
    let config = StoreConfig::from_env();

    let store = ProofRecordStore::open(FileStore::new(&config.path), &config);
    info!("Store: {} ({} existing records)", config.path, store.len());

    let ledger = MockLedger::new(owner.clone());
    let identity = LocalIdentity::connected(owner);
    let mut manager = LifecycleManager::new(Some(ledger), identity, store);

    // === Upload and resolve ===
    let token = LocalUploader.upload(bytes).await?;
    info!("Content token: {} ({:?})", token, token.kind());

    let urls = display_urls(Some(&token));
    if urls.is_empty() {
        info!("No gateway URLs (placeholder token, content is unaddressed)");
    } else {
        for url in &urls {
            info!("Gateway URL: {}", url);
        }
    }

    // Resolution handles gateway and URI forms identically.
    let from_uri = resolve_token(Some(
        "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi",
    ));
    info!("Resolved from URI form: {:?}", from_uri.map(|t| t.to_string()));

    // === Anchored creation ===
    let record = manager
        .create(token, RecordMeta::titled(name))
        .await
        .context("creating proof record")?;
    info!("Proof digest: {}", record.proof);
    if let Some(tx) = &record.tx_hash {
        info!("Anchored in tx: {}", tx);
    }

    // === Verification ===
    manager.verify(&record).context("fresh record must verify")?;
    info!("Verification: OK");

    // === Tamper detection ===
    let mut tampered = record.clone();
    tampered.ts += 1;
    match tampered.verify() {
        Err(err) => info!("Tamper detection: {}", err),
        Ok(()) => warn!("Tampered record unexpectedly verified"),
    }

    // === Local-only creation and late anchoring ===
    let second = LocalUploader.upload(b"second piece").await?;
    let local_record = {
        // Pretend the ledger is unreachable for this one.
        let store = ProofRecordStore::open(FileStore::new(&config.path), &config);
        let mut offline: LifecycleManager<MockLedger, _, _> = LifecycleManager::new(
            None,
            LocalIdentity::connected(OwnerAddress::parse(DEV_OWNER)?),
            store,
        );
        let rec = offline
            .create(second, RecordMeta::titled("second piece"))
            .await?;
        offline.shutdown();
        rec
    };
    info!(
        "Local-only record: {} (anchored: {})",
        local_record.proof,
        local_record.is_anchored()
    );

    // Reload so the manager sees the offline insert, then anchor late.
    let store = ProofRecordStore::open(FileStore::new(&config.path), &config);
    let mut manager = LifecycleManager::new(
        Some(MockLedger::new(OwnerAddress::parse(DEV_OWNER)?)),
        LocalIdentity::connected(OwnerAddress::parse(DEV_OWNER)?),
        store,
    );
    let anchored = manager.late_anchor(&local_record.proof).await?;
    info!(
        "Late anchored: {} -> {} (re-keyed under ledger time)",
        local_record.proof, anchored.proof
    );

    // === Certificate export ===
    let certificate = ProofCertificate::from_record(&anchored);
    println!("{}", certificate.to_json()?);

    // === Store summary ===
    info!("=== Stored Records ===");
    for rec in manager.records() {
        info!(
            "{} ts={} anchored={} title={:?}",
            rec.proof,
            rec.ts,
            rec.is_anchored(),
            rec.title
        );
    }
    let failures = manager.verify_all();
    if failures.is_empty() {
        info!("All {} records verify", manager.records().len());
    } else {
        for (digest, err) in failures {
            warn!("Record {} failed verification: {}", digest, err);
        }
    }

    manager.shutdown();
    Ok(())
}
