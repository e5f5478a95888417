//! # Purchase Page
//!
//! Drives the three-step wizard against the store.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  load_products ──► GET /products                                        │
//! │                                                                         │
//! │  SELECT   select_product(id) ──► advance                                │
//! │                                                                         │
//! │  PAY      insert_money(note) ──► confirm_money ──► (insert delay)       │
//! │                               └─► cancel_money                          │
//! │           confirm_payment ──► PATCH /products/:id {stock}               │
//! │                           ──► POST  /transactions                       │
//! │                                                                         │
//! │  DONE     reset ──► GET /products ──► SELECT                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write leaves the session in `PAY` with the money still counted,
//! so the customer can retry.

use chrono::Utc;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use vending_client::VendingStore;
use vending_core::{
    find_product, Denomination, Money, Product, PurchaseError, PurchaseSession, RecordId, Step,
    Transaction,
};

use crate::commands::Notice;
use crate::display;
use crate::error::{KioskError, KioskResult};
use crate::messages;
use crate::prompt::{Confirm, Prompt};

/// Storefront page state.
pub struct PurchaseFlow<S> {
    store: Arc<S>,
    session: PurchaseSession,
    products: Vec<Product>,
    notice: Option<Notice>,
    insert_delay: Duration,
}

impl<S: VendingStore> PurchaseFlow<S> {
    pub fn new(store: Arc<S>, insert_delay: Duration) -> Self {
        PurchaseFlow {
            store,
            session: PurchaseSession::new(),
            products: Vec::new(),
            notice: None,
            insert_delay,
        }
    }

    pub fn session(&self) -> &PurchaseSession {
        &self.session
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetches the product list. On failure the list is emptied.
    pub async fn load_products(&mut self) -> KioskResult<()> {
        debug!("Loading products");

        match self.store.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "Products loaded");
                self.products = products;
                Ok(())
            }
            Err(e) => {
                self.products.clear();
                Err(self.fail(KioskError::network(&e, messages::FETCH_PRODUCTS_FAILED)))
            }
        }
    }

    // =========================================================================
    // SELECT
    // =========================================================================

    /// Selects a product from the loaded list.
    pub fn select_product(&mut self, id: &RecordId) -> KioskResult<()> {
        let product = match find_product(&self.products, id).cloned() {
            Ok(product) => product,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.session
            .select_product(&product)
            .map_err(|e| self.fail(e.into()))?;

        debug!(product_id = %product.id, name = %product.name, "Product selected");
        self.notice = None;
        Ok(())
    }

    pub fn advance(&mut self) -> bool {
        self.session.advance()
    }

    // =========================================================================
    // PAY
    // =========================================================================

    /// Stages a note and returns the confirmation question to ask.
    pub fn insert_money(&mut self, denomination: Denomination) -> KioskResult<String> {
        self.session
            .propose_money(denomination)
            .map_err(|e| self.fail(e.into()))?;
        Ok(messages::confirm_insert(denomination.value()))
    }

    /// Waits out the insertion delay, then counts the staged note.
    pub async fn confirm_money(&mut self) -> KioskResult<Money> {
        let Some(denomination) = self.session.pending() else {
            return Err(self.fail(PurchaseError::NoPendingMoney.into()));
        };

        debug!(amount = %denomination, delay_ms = self.insert_delay.as_millis() as u64, "Processing money");
        tokio::time::sleep(self.insert_delay).await;

        let total = self.session.commit_money().map_err(|e| self.fail(e.into()))?;
        info!(amount = %denomination, total = %total, "Money inserted");

        self.notice = Some(Notice::success(messages::money_inserted(denomination.value())));
        Ok(total)
    }

    /// Discards the staged note without counting it.
    pub fn cancel_money(&mut self) -> Option<Denomination> {
        let cancelled = self.session.cancel_money();
        if let Some(d) = cancelled {
            debug!(amount = %d, "Money insertion cancelled");
        }
        cancelled
    }

    /// Persists the purchase and moves to `DONE`.
    ///
    /// Insufficient funds and store failures both leave the session in `PAY`.
    pub async fn confirm_payment(&mut self) -> KioskResult<Transaction> {
        let plan = self
            .session
            .prepare_payment(Utc::now())
            .map_err(|e| self.fail(e.into()))?;

        let transaction = match self.store.record_purchase(&plan).await {
            Ok(t) => t,
            Err(e) => return Err(self.fail(KioskError::network(&e, messages::PURCHASE_FAILED))),
        };

        self.session
            .complete_payment(&plan)
            .map_err(|e| self.fail(e.into()))?;

        if let Some(product) = self.products.iter_mut().find(|p| p.id.same_as(&plan.product_id)) {
            product.stock = plan.remaining_stock;
        }

        info!(
            transaction_id = %transaction.id,
            product_id = %plan.product_id,
            change = %plan.change,
            remaining_stock = plan.remaining_stock,
            "Purchase completed"
        );

        self.notice = Some(Notice::success(messages::PURCHASE_SUCCESS));
        Ok(transaction)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn back(&mut self) -> bool {
        let moved = self.session.back();
        if moved {
            self.notice = None;
        }
        moved
    }

    /// Starts a new purchase with a fresh product list.
    pub async fn reset(&mut self) -> KioskResult<()> {
        self.session.reset();
        self.notice = None;
        self.load_products().await
    }

    fn fail(&mut self, err: KioskError) -> KioskError {
        self.notice = Some(Notice::error(err.message.clone()));
        err
    }
}

// =============================================================================
// Page Drivers
// =============================================================================

/// Buys one product non-interactively and returns the receipt.
///
/// Every note is confirmed through `confirm`; a declined note is cancelled
/// and the next one is tried.
pub async fn run_buy<S, C>(
    flow: &mut PurchaseFlow<S>,
    product_id: &RecordId,
    notes: &[Denomination],
    confirm: &mut C,
) -> KioskResult<String>
where
    S: VendingStore,
    C: Confirm,
{
    flow.load_products().await?;
    flow.select_product(product_id)?;
    flow.advance();

    for note in notes {
        let question = flow.insert_money(*note)?;
        if confirm.confirm(&question) {
            flow.confirm_money().await?;
        } else {
            flow.cancel_money();
        }
    }

    flow.confirm_payment().await?;
    Ok(display::receipt(flow.session()))
}

/// Interactive storefront loop. Returns when the customer types `q` or the
/// input ends.
pub async fn run_shop<S, R, W>(
    flow: &mut PurchaseFlow<S>,
    prompt: &mut Prompt<R, W>,
) -> KioskResult<()>
where
    S: VendingStore,
    R: BufRead,
    W: Write,
{
    prompt.say(messages::LOADING_PRODUCTS);
    if let Err(e) = flow.load_products().await {
        prompt.say(&e.message);
    }

    loop {
        prompt.say("");
        prompt.say(&display::step_indicator(flow.session().step()));
        prompt.say("");

        match flow.session().step() {
            Step::Select => {
                prompt.say("Pilih Item Yang Kamu Inginkan");
                prompt.say(&display::product_grid(flow.products()));

                let Some(input) = prompt.read_line("ID produk (q untuk keluar): ") else {
                    break;
                };
                if input == "q" {
                    break;
                }
                if input.is_empty() {
                    continue;
                }

                let id: RecordId = match input.parse() {
                    Ok(id) => id,
                    Err(never) => match never {},
                };
                match flow.select_product(&id) {
                    Ok(()) => {
                        flow.advance();
                    }
                    Err(e) => prompt.say(&e.message),
                }
            }

            Step::Pay => {
                prompt.say(&display::pay_screen(flow.session()));

                let Some(input) =
                    prompt.read_line("Nominal, 'bayar', 'kembali' atau 'q': ")
                else {
                    break;
                };

                match input.as_str() {
                    "q" => break,
                    "bayar" => {
                        if let Err(e) = flow.confirm_payment().await {
                            prompt.say(&e.message);
                        }
                    }
                    "kembali" => {
                        flow.back();
                    }
                    amount => match amount.parse::<Denomination>() {
                        Ok(note) => {
                            let question = match flow.insert_money(note) {
                                Ok(q) => q,
                                Err(e) => {
                                    prompt.say(&e.message);
                                    continue;
                                }
                            };
                            if prompt.confirm(&question) {
                                prompt.say(messages::PROCESSING_MONEY);
                                match flow.confirm_money().await {
                                    Ok(_) => {
                                        if let Some(notice) = flow.notice() {
                                            prompt.say(&notice.to_string());
                                        }
                                    }
                                    Err(e) => prompt.say(&e.message),
                                }
                            } else {
                                flow.cancel_money();
                            }
                        }
                        Err(_) => {
                            prompt.say(&format!("Nominal Uang: {}", display::denomination_list()));
                        }
                    },
                }
            }

            Step::Done => {
                prompt.say(&display::receipt(flow.session()));

                match prompt.read_line("Enter untuk beli lagi (q untuk keluar): ") {
                    Some(input) if input != "q" => {
                        if let Err(e) = flow.reset().await {
                            prompt.say(&e.message);
                        }
                    }
                    _ => break,
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::prompt::ScriptedConfirm;
    use std::io::Cursor;
    use vending_client::MemoryStore;
    use vending_core::Category;

    fn product(id: u64, price: i64, stock: u32) -> Product {
        Product {
            id: RecordId::Number(id),
            name: format!("Produk {}", id),
            price: Money::from_rupiah(price),
            stock,
            image: "https://example.com/p.jpg".to_string(),
            category: Category::Drink,
        }
    }

    async fn paying(store: Arc<MemoryStore>) -> PurchaseFlow<MemoryStore> {
        let mut flow = PurchaseFlow::new(store, Duration::ZERO);
        flow.load_products().await.unwrap();
        flow.select_product(&RecordId::Number(1)).unwrap();
        assert!(flow.advance());
        flow
    }

    async fn insert(flow: &mut PurchaseFlow<MemoryStore>, note: Denomination) {
        flow.insert_money(note).unwrap();
        flow.confirm_money().await.unwrap();
    }

    #[tokio::test]
    async fn test_full_purchase_with_change() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = paying(store.clone()).await;

        insert(&mut flow, Denomination::Rp5000).await;
        insert(&mut flow, Denomination::Rp5000).await;

        let transaction = flow.confirm_payment().await.unwrap();
        assert_eq!(transaction.change, Money::from_rupiah(2000));
        assert_eq!(transaction.money_inserted, Money::from_rupiah(10000));
        assert_eq!(flow.session().step(), Step::Done);
        assert_eq!(flow.session().change(), Some(Money::from_rupiah(2000)));
        assert_eq!(flow.notice(), Some(&Notice::success("Pembelian berhasil!")));

        assert_eq!(store.products().await[0].stock, 0);
        assert_eq!(store.transactions().await.len(), 1);
        assert_eq!(flow.products()[0].stock, 0);
    }

    #[tokio::test]
    async fn test_insufficient_money_stays_in_pay() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 4)]));
        let mut flow = paying(store.clone()).await;
        insert(&mut flow, Denomination::Rp5000).await;
        let before = store.request_count();

        let err = flow.confirm_payment().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert!(err.message.contains("Kurang Rp3.000"));
        assert_eq!(flow.session().shortfall(), Some(Money::from_rupiah(3000)));
        assert_eq!(flow.session().step(), Step::Pay);
        assert_eq!(store.request_count(), before);
    }

    #[tokio::test]
    async fn test_cancel_leaves_money_unchanged() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = paying(store).await;
        insert(&mut flow, Denomination::Rp2000).await;

        flow.insert_money(Denomination::Rp20000).unwrap();
        assert_eq!(flow.cancel_money(), Some(Denomination::Rp20000));
        assert_eq!(flow.session().money_inserted(), Money::from_rupiah(2000));
    }

    #[tokio::test]
    async fn test_transaction_write_failure_keeps_pay_step() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 3)]));
        let mut flow = paying(store.clone()).await;
        insert(&mut flow, Denomination::Rp10000).await;

        store.fail_transaction_writes(true);
        let err = flow.confirm_payment().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(err.message, "Gagal melakukan pembelian");
        assert_eq!(flow.session().step(), Step::Pay);
        assert_eq!(flow.session().money_inserted(), Money::from_rupiah(10000));
        // The stock write already happened; the two writes are not atomic.
        assert_eq!(store.products().await[0].stock, 2);
        assert!(store.transactions().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_money_waits_for_delay() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = PurchaseFlow::new(store, Duration::from_millis(1000));
        flow.load_products().await.unwrap();
        flow.select_product(&RecordId::Number(1)).unwrap();
        flow.advance();

        flow.insert_money(Denomination::Rp5000).unwrap();
        let started = tokio::time::Instant::now();
        let total = flow.confirm_money().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(total, Money::from_rupiah(5000));
        assert_eq!(flow.notice(), Some(&Notice::success("Uang Rp5.000 berhasil dimasukkan")));
    }

    #[tokio::test]
    async fn test_out_of_stock_product_is_refused() {
        let store = Arc::new(MemoryStore::with_products(vec![
            product(1, 8000, 0),
            product(2, 5000, 2),
        ]));
        let mut flow = PurchaseFlow::new(store, Duration::ZERO);
        flow.load_products().await.unwrap();

        let err = flow.select_product(&RecordId::Number(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(flow.notice(), Some(&Notice::error("Maaf, produk ini stok habis!")));
        assert!(!flow.advance());

        flow.select_product(&RecordId::Text("2".to_string())).unwrap();
        assert!(flow.advance());
    }

    #[tokio::test]
    async fn test_load_failure_message() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        store.fail_all(true);
        let mut flow = PurchaseFlow::new(store, Duration::ZERO);

        let err = flow.load_products().await.unwrap_err();
        assert_eq!(err.message, "Gagal memuat produk");
        assert!(flow.products().is_empty());
    }

    #[tokio::test]
    async fn test_back_then_reset_refetches() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = paying(store.clone()).await;
        insert(&mut flow, Denomination::Rp5000).await;

        assert!(flow.back());
        assert_eq!(flow.session().money_inserted(), Money::zero());
        assert!(flow.session().selected().is_some());

        let before = store.request_count();
        flow.reset().await.unwrap();
        assert_eq!(store.request_count(), before + 1);
        assert!(flow.session().selected().is_none());
    }

    #[tokio::test]
    async fn test_run_buy_skips_declined_notes() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = PurchaseFlow::new(store.clone(), Duration::ZERO);
        let mut confirm = ScriptedConfirm::new([true, false, true]);

        let receipt = run_buy(
            &mut flow,
            &RecordId::Number(1),
            &[Denomination::Rp5000, Denomination::Rp50000, Denomination::Rp5000],
            &mut confirm,
        )
        .await
        .unwrap();

        assert_eq!(confirm.asked().len(), 3);
        assert!(receipt.contains("Transaksi berhasil!"));
        assert!(receipt.contains("Rp2.000"));
        assert_eq!(store.transactions().await[0].money_inserted, Money::from_rupiah(10000));
    }

    #[tokio::test]
    async fn test_run_shop_session() {
        let store = Arc::new(MemoryStore::with_products(vec![product(1, 8000, 1)]));
        let mut flow = PurchaseFlow::new(store.clone(), Duration::ZERO);
        let input = "1\n5000\ny\nbayar\n5000\ny\nbayar\nq\n";
        let mut prompt = Prompt::new(Cursor::new(input), Vec::new());

        run_shop(&mut flow, &mut prompt).await.unwrap();

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("Uang tidak cukup! Kurang Rp3.000"));
        assert!(output.contains("Transaksi berhasil!"));
        assert_eq!(store.products().await[0].stock, 0);
    }
}
