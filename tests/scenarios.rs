//! End-to-end scenarios across builder, envelope and codec.

use stellar_txasm::prelude::*;
use stellar_txasm::{scval, strkey, xdr};

const SECRET: &str = "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4";
const SOURCE: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";
const DESTINATION: &str = "GDQERENWDDSQZS7R7WKHZI3BSOYMV3FSWR7TFUYFTKQ447PIX6NREOJM";
const MUXED: &str = "MAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSAAAAAAAAAAE2LP26";

fn builder(source: &str, sequence: i64, base_fee: u32) -> TransactionBuilder {
    TransactionBuilder::new(Account::new(source, sequence).unwrap(), base_fee, Network::testnet())
}

#[test]
fn test_create_account_roundtrip() {
    let mut builder = builder(SOURCE, 0, 100)
        .append_create_account_op(DESTINATION, "12.25", None)
        .unwrap();
    let envelope = builder.build_envelope().unwrap();
    assert_eq!(envelope.transaction().sequence(), 1);
    assert_eq!(envelope.transaction().fee(), 100);

    let encoded = envelope.to_xdr().unwrap();
    let decoded = TransactionEnvelope::from_xdr(&encoded, Network::testnet()).unwrap();
    let tx = decoded.transaction();
    assert_eq!(tx.source().account_id(), SOURCE);
    assert!(tx.memo().is_none());
    match &tx.operations()[0].body {
        OperationBody::CreateAccount {
            destination,
            starting_balance,
        } => {
            assert_eq!(destination, DESTINATION);
            assert_eq!(starting_balance.to_string(), "12.25");
        }
        other => panic!("unexpected operation {other:?}"),
    }
    assert_eq!(decoded.to_xdr().unwrap(), encoded);
}

#[test]
fn test_int128_minus_one() {
    let bytes = scval::to_int128(-1).to_xdr_bytes().unwrap();
    assert_eq!(hex::encode(&bytes), format!("0000000a{}", "ff".repeat(16)));
    let decoded = xdr::ScVal::from_xdr_bytes(&bytes).unwrap();
    assert_eq!(scval::from_int128(&decoded).unwrap(), -1);
}

#[test]
fn test_memo_byte_length() {
    assert!(Memo::text("a".repeat(28)).is_ok());
    assert!(matches!(Memo::text("a".repeat(29)), Err(TxAsmError::InvalidMemo(_))));

    let accented = "é".repeat(14);
    assert_eq!(accented.len(), 28);
    assert!(Memo::text(&accented).is_ok());
    assert!(Memo::text("é".repeat(15)).is_err());
}

#[test]
fn test_fee_bump_floor() {
    let keypair = Keypair::from_secret(SECRET).unwrap();
    let mut builder = builder(&keypair.public_key(), 10, 200)
        .append_payment_op(DESTINATION, Asset::native(), "1", None)
        .unwrap();
    let mut inner = builder.build_envelope().unwrap();
    inner.sign(&keypair).unwrap();
    assert_eq!(inner.transaction().fee(), 200);

    let network = Network::testnet();
    let low = TransactionBuilder::build_fee_bump_transaction(DESTINATION, 150, &inner, &network);
    assert_eq!(
        low.unwrap_err(),
        TxAsmError::FeeBumpBelowInnerFee {
            base_fee: 150,
            inner_base_fee: 200
        }
    );

    let bump = TransactionBuilder::build_fee_bump_transaction(DESTINATION, 200, &inner, &network).unwrap();
    assert_eq!(bump.transaction().fee(), 400);
    assert_eq!(bump.transaction().inner_signatures().len(), 1);
}

#[test]
fn test_fee_bump_minimum() {
    let mut builder = builder(SOURCE, 0, 50).append_inflation_op(None).unwrap();
    let inner = builder.build_envelope().unwrap();
    let network = Network::testnet();

    let err = TransactionBuilder::build_fee_bump_transaction(DESTINATION, 99, &inner, &network).unwrap_err();
    assert_eq!(
        err,
        TxAsmError::FeeBumpBelowMinimum {
            base_fee: 99,
            minimum: 100
        }
    );
    assert_eq!(err.kind(), ErrorKind::Construction);
    assert!(TransactionBuilder::build_fee_bump_transaction(DESTINATION, 100, &inner, &network).is_ok());
}

#[test]
fn test_fee_bump_of_v0_keeps_signatures() {
    let keypair = Keypair::from_secret(SECRET).unwrap();
    let sponsor = Keypair::random();
    let network = Network::testnet();

    let mut builder = builder(&keypair.public_key(), 0, 100)
        .set_v1(false)
        .unwrap()
        .append_inflation_op(None)
        .unwrap();
    let mut inner = builder.build_envelope().unwrap();
    inner.sign(&keypair).unwrap();

    let mut bump =
        TransactionBuilder::build_fee_bump_transaction(&sponsor.public_key(), 300, &inner, &network).unwrap();
    bump.sign(&sponsor).unwrap();

    let rewrapped = bump.inner_envelope();
    assert_eq!(rewrapped.transaction().version(), TransactionVersion::V1);
    assert_eq!(rewrapped.hash().unwrap(), inner.hash().unwrap());
    rewrapped.verify_signature(&keypair.public_key()).unwrap();

    let encoded = bump.to_xdr().unwrap();
    assert!(stellar_txasm::envelope::is_fee_bump_envelope(&encoded).unwrap());
    let parsed = TransactionBuilder::from_xdr(&encoded, network).unwrap();
    assert!(parsed.is_fee_bump());
    parsed.envelope().verify_signature(&sponsor.public_key()).unwrap();
}

#[test]
fn test_hash_determinism() {
    let build = |first: &str, second: &str| {
        let mut builder = builder(SOURCE, 5, 100)
            .add_id_memo(77)
            .add_time_bounds(0, 2_000_000_000)
            .unwrap()
            .append_payment_op(DESTINATION, Asset::native(), first, None)
            .unwrap()
            .append_payment_op(DESTINATION, Asset::native(), second, None)
            .unwrap();
        builder.build_envelope().unwrap().hash().unwrap()
    };

    assert_eq!(build("1", "2"), build("1", "2"));
    assert_ne!(build("1", "2"), build("2", "1"));
    assert_ne!(build("1", "2"), build("1", "3"));
}

#[test]
fn test_signature_hint_is_key_suffix() {
    let keypair = Keypair::from_secret(SECRET).unwrap();
    let mut builder = builder(SOURCE, 0, 100).append_inflation_op(None).unwrap();
    let mut envelope = builder.build_envelope().unwrap();
    envelope.sign(&keypair).unwrap();
    envelope.sign_hashx(b"preimage").unwrap();

    let raw = strkey::decode_account_id(&keypair.public_key()).unwrap();
    assert_eq!(envelope.signatures()[0].hint, raw[28..]);
    assert_eq!(envelope.signatures().len(), 2);
}

#[test]
fn test_muxed_account_vector() {
    let wire = xdr::MuxedAccount::from_xdr("AAABAAAAAAAAAATSIAB1furlg/xQ3Wafl2c6zCXsclgjrHP69sffMa0x5Qk=").unwrap();
    let account = MuxedAccount::from_xdr(&wire);
    assert_eq!(account.id(), Some(1234));
    assert_eq!(account.to_string(), MUXED);
    assert_eq!(account.account_id(), "GAQAA5L65LSYH7CQ3VTJ7F3HHLGCL3DSLAR2Y47263D56MNNGHSQSTVY");
    assert_eq!(account.to_xdr().to_xdr().unwrap(), "AAABAAAAAAAAAATSIAB1furlg/xQ3Wafl2c6zCXsclgjrHP69sffMa0x5Qk=");
}

fn flip_every_bit(encoded: &str, decode: impl Fn(&str) -> bool) {
    let alphabet = base32::Alphabet::Rfc4648 { padding: false };
    let raw = base32::decode(alphabet, encoded).unwrap();
    for byte in 0..raw.len() {
        for bit in 0..8 {
            let mut corrupted = raw.clone();
            corrupted[byte] ^= 1 << bit;
            let candidate = base32::encode(alphabet, &corrupted);
            assert!(!decode(&candidate), "flip of byte {byte} bit {bit} accepted: {candidate}");
        }
    }
}

#[test]
fn test_strkey_single_bit_flips() {
    assert!(strkey::decode_account_id(SOURCE).is_ok());
    flip_every_bit(SOURCE, |s| strkey::decode_account_id(s).is_ok());
    assert!(strkey::decode_muxed_account(MUXED).is_ok());
    flip_every_bit(MUXED, |s| strkey::decode_muxed_account(s).is_ok());
}

#[test]
fn test_claimable_balance_id_matches_operation() {
    let mut builder = builder(SOURCE, 0, 100)
        .append_create_claimable_balance_op(
            Asset::native(),
            "5",
            vec![Claimant::new(DESTINATION, ClaimPredicate::not(ClaimPredicate::before_relative_time(3600))).unwrap()],
            None,
        )
        .unwrap();
    let tx = builder.build().unwrap();
    let id = tx.claimable_balance_id(0).unwrap();

    let mut claim = TransactionBuilder::new(Account::new(DESTINATION, 0).unwrap(), 100, Network::testnet())
        .append_claim_claimable_balance_op(&id.to_string(), None)
        .unwrap();
    let claim_tx = claim.build().unwrap();
    assert!(matches!(
        claim_tx.operations()[0].body,
        OperationBody::ClaimClaimableBalance { balance_id } if balance_id == id
    ));
}

#[test]
fn test_partial_v2_preconditions_roundtrip() {
    let builders = [
        builder(SOURCE, 0, 100).set_ledger_bounds(5, 10).unwrap(),
        builder(SOURCE, 0, 100).set_min_sequence_number(0).unwrap(),
        builder(SOURCE, 0, 100)
            .add_extra_signer(SignerKey::sha256_hash([9u8; 32]))
            .unwrap(),
    ];

    for builder in builders {
        let mut builder = builder.append_inflation_op(None).unwrap();
        let built = builder.build_envelope().unwrap();
        let preconditions = built.transaction().preconditions();
        assert_eq!(preconditions.min_sequence_age, Some(0));
        assert_eq!(preconditions.min_sequence_ledger_gap, Some(0));

        let decoded = TransactionEnvelope::from_xdr(&built.to_xdr().unwrap(), Network::testnet()).unwrap();
        assert_eq!(decoded.transaction(), built.transaction());
        assert_eq!(decoded.hash().unwrap(), built.hash().unwrap());
    }
}

#[test]
fn test_negative_wire_amount_decodes() {
    let mut builder = builder(SOURCE, 0, 100)
        .append_payment_op(DESTINATION, Asset::native(), "1", None)
        .unwrap();
    let mut wire = builder.build().unwrap().to_xdr_v1().unwrap();
    let mut operations = wire.operations.clone().into_vec();
    match &mut operations[0].body {
        xdr::OperationBody::Payment(payment) => payment.amount = -1,
        other => panic!("unexpected operation {other:?}"),
    }
    wire.operations = stellar_txasm::serialization::VarArray::new(operations).unwrap();
    let bytes = wire.to_xdr_bytes().unwrap();

    let tx = Transaction::from_xdr_v1(&xdr::Transaction::from_xdr_bytes(&bytes).unwrap()).unwrap();
    match &tx.operations()[0].body {
        OperationBody::Payment { amount, .. } => {
            assert_eq!(amount.stroops(), -1);
            assert_eq!(amount.to_string(), "-0.0000001");
        }
        other => panic!("unexpected operation {other:?}"),
    }
    assert_eq!(tx.to_xdr_v1().unwrap().to_xdr_bytes().unwrap(), bytes);
}
