use std::ops::RangeInclusive;

use chrono::Duration;
use fake::Fake;
use fake::faker::lorem::en::Words;
use rand::Rng;
use tracing::{info, warn};

use stockseed_core::{InventoryId, Transaction, TransactionKind};

use crate::context::GenerationContext;

const HISTORY_WINDOW_DAYS: i64 = 365;
const NOTE_PROBABILITY: f64 = 0.3;
const NOTE_MAX_CHARS: usize = 50;

/// Signed quantity domain for a transaction kind.
pub fn quantity_range(kind: TransactionKind) -> RangeInclusive<i32> {
    match kind {
        TransactionKind::In => 5..=100,
        TransactionKind::Out => -50..=-1,
        TransactionKind::Adjustment => -10..=10,
    }
}

/// Random stock movements against `inventory_ids`, sorted by timestamp.
///
/// Running balances are not tracked, so a record may be driven negative.
pub fn generate_transactions(
    ctx: &mut GenerationContext,
    inventory_ids: &[InventoryId],
    count: usize,
) -> Vec<Transaction> {
    if inventory_ids.is_empty() {
        if count > 0 {
            warn!(
                event = "transactions_skipped",
                requested = count,
                "no inventory records to reference"
            );
        }
        return Vec::new();
    }

    let mut transactions = Vec::with_capacity(count);
    for _ in 0..count {
        let inventory_id = inventory_ids[ctx.rng().random_range(0..inventory_ids.len())];
        let kind = TransactionKind::ALL[ctx.rng().random_range(0..TransactionKind::ALL.len())];
        let quantity = ctx.rng().random_range(quantity_range(kind));
        let transaction_date = ctx.timestamp_within(Duration::days(HISTORY_WINDOW_DAYS));
        let notes = if ctx.rng().random_bool(NOTE_PROBABILITY) {
            Some(note(ctx.rng()))
        } else {
            None
        };

        transactions.push(Transaction {
            inventory_id,
            transaction_type: kind,
            quantity,
            transaction_date,
            notes,
        });
    }

    transactions.sort_by_key(|transaction| transaction.transaction_date);
    info!(
        event = "transactions_generated",
        transactions = transactions.len(),
        "transactions generated"
    );
    transactions
}

/// Short lorem sentence of at most `NOTE_MAX_CHARS` characters.
fn note<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words: Vec<String> = Words(3..9).fake_with_rng(rng);
    let mut sentence = String::new();
    for word in words {
        let extra = if sentence.is_empty() { 0 } else { 1 };
        if sentence.len() + extra + word.len() + 1 > NOTE_MAX_CHARS {
            break;
        }
        if !sentence.is_empty() {
            sentence.push(' ');
        }
        sentence.push_str(&word);
    }
    if let Some(first) = sentence.get(..1) {
        let upper = first.to_ascii_uppercase();
        sentence.replace_range(..1, &upper);
    }
    sentence.push('.');
    sentence
}
