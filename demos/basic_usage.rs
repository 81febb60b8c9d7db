//! Basic usage examples for stellar-txasm
//!
//! Run with `RUST_LOG=stellar_txasm=debug` to see the library's build and
//! signing events.

use stellar_txasm::prelude::*;
use tracing_subscriber::EnvFilter;

const DESTINATION: &str = "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== stellar-txasm Basic Usage Examples ===\n");

    // Example 1: Building and signing a payment
    example_payment()?;

    // Example 2: Preconditions and memos
    example_preconditions()?;

    // Example 3: Fee bumps
    example_fee_bump()?;

    // Example 4: Contract invocation
    example_contract_call()?;

    // Example 5: Envelope decoding
    example_decoding()?;

    Ok(())
}

fn example_payment() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 1: Building and Signing a Payment");
    println!("-----------------------------------------");

    let keypair = Keypair::random();
    let account = Account::new(&keypair.public_key(), 1_000)?;

    let mut builder = TransactionBuilder::new(account, 100, Network::testnet())
        .append_payment_op(DESTINATION, Asset::native(), "12.25", None)?
        .append_manage_data_op("greeting", Some(b"hello".as_slice()), None)?
        .set_timeout(300)?;

    let mut envelope = builder.build_envelope()?;
    envelope.sign(&keypair)?;

    println!("✓ Transaction built and signed");
    println!("  Sequence: {}", envelope.transaction().sequence());
    println!("  Fee: {} stroops", envelope.transaction().fee());
    println!("  Hash: {}", envelope.hash_hex()?);
    println!("  Next sequence: {}", builder.account().sequence_number() + 1);
    println!();

    Ok(())
}

fn example_preconditions() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 2: Preconditions and Memos");
    println!("----------------------------------");

    let keypair = Keypair::random();
    let usd = Asset::new("USD", &keypair.public_key())?;

    let mut builder = TransactionBuilder::new(Account::new(&keypair.public_key(), 7)?, 200, Network::testnet())
        .add_text_memo("invoice 42")?
        .add_time_bounds(0, 1_900_000_000)?
        .set_ledger_bounds(100, 0)?
        .set_min_sequence_age(60)?
        .add_extra_signer(SignerKey::sha256_hash([7u8; 32]))?
        .append_change_trust_op(usd.clone(), None, None)?
        .append_manage_sell_offer_op(usd, Asset::native(), "25", "2.5".parse()?, 0, None)?;

    let tx = builder.build()?;
    println!("✓ Transaction with v2 preconditions");
    println!("  Shape: {:?}", tx.preconditions().precondition_type());
    println!("  Memo: {:?}", tx.memo().as_text());
    println!("  Operations: {}", tx.operations().len());
    println!();

    Ok(())
}

fn example_fee_bump() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 3: Fee Bumps");
    println!("--------------------");

    let network = Network::testnet();
    let signer = Keypair::random();
    let sponsor = Keypair::random();

    let mut builder = TransactionBuilder::new(Account::new(&signer.public_key(), 1)?, 200, network.clone())
        .append_inflation_op(None)?;
    let mut inner = builder.build_envelope()?;
    inner.sign(&signer)?;

    match TransactionBuilder::build_fee_bump_transaction(&sponsor.public_key(), 150, &inner, &network) {
        Ok(_) => println!("  unexpected: 150 stroops accepted"),
        Err(e) => println!("✓ Rejected low bid: {}", e),
    }

    let mut bump = TransactionBuilder::build_fee_bump_transaction(&sponsor.public_key(), 400, &inner, &network)?;
    bump.sign(&sponsor)?;
    println!("✓ Fee bump built");
    println!("  Total fee: {} stroops", bump.transaction().fee());
    println!("  Inner signatures: {}", bump.transaction().inner_signatures().len());
    println!();

    Ok(())
}

fn example_contract_call() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 4: Contract Invocation");
    println!("------------------------------");

    let keypair = Keypair::random();
    let contract = stellar_txasm::strkey::encode_contract(&[1u8; 32]);
    let args = vec![
        Address::from_string(&keypair.public_key())?.to_sc_val(),
        stellar_txasm::scval::to_int128(1_000_000),
    ];
    let data = SorobanDataBuilder::new()
        .set_resource_fee(50_000)
        .set_resources(2_000_000, 1_000, 500)
        .build()?;

    let mut builder = TransactionBuilder::new(Account::new(&keypair.public_key(), 3)?, 100, Network::testnet())
        .append_invoke_contract_function_op(&contract, "deposit", args, vec![], None)?
        .set_soroban_data(data)?;
    let tx = builder.build()?;

    println!("✓ Soroban transaction built");
    println!("  Soroban: {}", tx.is_soroban_transaction());
    println!("  Fee (inclusion + resources): {} stroops", tx.fee());
    println!();

    Ok(())
}

fn example_decoding() -> Result<(), Box<dyn std::error::Error>> {
    println!("Example 5: Envelope Decoding");
    println!("----------------------------");

    let keypair = Keypair::random();
    let mut builder = TransactionBuilder::new(Account::new(&keypair.public_key(), 0)?, 100, Network::testnet())
        .append_create_account_op(DESTINATION, "100", None)?;
    let mut envelope = builder.build_envelope()?;
    envelope.sign(&keypair)?;
    let encoded = envelope.to_xdr()?;
    println!("✓ Encoded envelope: {} base64 chars", encoded.len());

    let parsed = TransactionBuilder::from_xdr(&encoded, Network::testnet())?;
    let decoded = parsed.envelope();
    println!("✓ Envelope decoded");
    println!("  Fee bump: {}", parsed.is_fee_bump());
    println!("  Hashes match: {}", decoded.hash()? == envelope.hash()?);
    println!(
        "  Signature valid: {}",
        decoded.verify_signature(&keypair.public_key()).is_ok()
    );
    println!();

    Ok(())
}
