//! # Admin Page
//!
//! Product CRUD. Forms are validated locally first; an invalid form never
//! reaches the store.
//!
//! ```text
//! submit(form)
//!     │
//!     ├── validate_product_form ── errors ──► field_errors, no request
//!     │
//!     ├── editing = None     ──► POST /products
//!     └── editing = Some(id) ──► PUT  /products/:id
//!             │
//!             ▼
//!     clear form ──► GET /products
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

use vending_client::ProductStore;
use vending_core::validation::validate_product_form;
use vending_core::{find_product, FieldErrors, Product, ProductForm, RecordId};

use crate::cli::AdminCommand;
use crate::commands::Notice;
use crate::display;
use crate::error::{KioskError, KioskResult};
use crate::messages;
use crate::prompt::Confirm;

/// Admin page state.
pub struct AdminPanel<S> {
    store: Arc<S>,
    products: Vec<Product>,
    form: ProductForm,
    editing: Option<RecordId>,
    field_errors: FieldErrors,
    notice: Option<Notice>,
}

impl<S: ProductStore> AdminPanel<S> {
    pub fn new(store: Arc<S>) -> Self {
        AdminPanel {
            store,
            products: Vec::new(),
            form: ProductForm::default(),
            editing: None,
            field_errors: FieldErrors::new(),
            notice: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Id of the product being edited, if any.
    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Fetches the product list.
    pub async fn list(&mut self) -> KioskResult<&[Product]> {
        match self.store.list_products().await {
            Ok(products) => {
                self.products = products;
                Ok(&self.products)
            }
            Err(e) => Err(self.fail(KioskError::network(&e, messages::FETCH_PRODUCTS_FAILED))),
        }
    }

    /// Enters edit mode with the form pre-filled from the product.
    pub fn start_edit(&mut self, id: &RecordId) -> KioskResult<()> {
        let product = match find_product(&self.products, id).cloned() {
            Ok(product) => product,
            Err(e) => return Err(self.fail(e.into())),
        };

        debug!(product_id = %product.id, "Editing product");
        self.form = product.to_form();
        self.editing = Some(product.id);
        self.field_errors = FieldErrors::new();
        Ok(())
    }

    /// Leaves edit mode and clears the form.
    pub fn cancel_edit(&mut self) {
        self.form = ProductForm::default();
        self.editing = None;
        self.field_errors = FieldErrors::new();
    }

    /// Validates and saves `form`, creating or updating depending on the
    /// edit mode, then refreshes the list.
    pub async fn submit(&mut self, form: ProductForm) -> KioskResult<Product> {
        self.form = form;

        let draft = match validate_product_form(&self.form) {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(errors = errors.len(), "Product form rejected");
                let err = KioskError::validation(&errors);
                self.field_errors = errors;
                return Err(self.fail(err));
            }
        };
        self.field_errors = FieldErrors::new();

        let (result, success) = match &self.editing {
            Some(id) => (
                self.store.replace_product(id, &draft).await,
                messages::PRODUCT_UPDATED,
            ),
            None => (self.store.create_product(&draft).await, messages::PRODUCT_ADDED),
        };

        let saved = match result {
            Ok(product) => product,
            Err(e) => return Err(self.fail(KioskError::network(&e, messages::SAVE_PRODUCT_FAILED))),
        };

        info!(product_id = %saved.id, name = %saved.name, "Product saved");

        self.cancel_edit();
        self.notice = Some(Notice::success(success));
        self.refresh().await;
        Ok(saved)
    }

    /// Deletes a product after confirmation. Returns `false` if declined.
    pub async fn delete<C: Confirm + ?Sized>(&mut self, id: &RecordId, confirm: &mut C) -> KioskResult<bool> {
        if !confirm.confirm(messages::CONFIRM_DELETE_PRODUCT) {
            debug!(product_id = %id, "Delete declined");
            self.notice = Some(Notice::success(messages::DELETE_CANCELLED));
            return Ok(false);
        }

        if let Err(e) = self.store.delete_product(id).await {
            return Err(self.fail(KioskError::network(&e, messages::DELETE_PRODUCT_FAILED)));
        }

        info!(product_id = %id, "Product deleted");

        if self.editing.as_ref().is_some_and(|editing| editing.same_as(id)) {
            self.cancel_edit();
        }
        self.notice = Some(Notice::success(messages::PRODUCT_DELETED));
        self.refresh().await;
        Ok(true)
    }

    pub fn render(&self) -> String {
        display::admin_table(&self.products)
    }

    /// Re-fetches after a successful write. A failed refresh keeps the
    /// success notice; the stale list stays until the next load.
    async fn refresh(&mut self) {
        match self.store.list_products().await {
            Ok(products) => self.products = products,
            Err(e) => warn!(error = %e, "Product list refresh failed after write"),
        }
    }

    fn fail(&mut self, err: KioskError) -> KioskError {
        self.notice = Some(Notice::error(err.message.clone()));
        err
    }
}

// =============================================================================
// Page Driver
// =============================================================================

/// Runs one admin command and returns the page text: the notice, if any,
/// followed by the product table.
pub async fn run_admin<S, C>(
    panel: &mut AdminPanel<S>,
    command: AdminCommand,
    confirm: &mut C,
) -> KioskResult<String>
where
    S: ProductStore,
    C: Confirm + ?Sized,
{
    match command {
        AdminCommand::List => {
            panel.list().await?;
        }

        AdminCommand::Add(args) => {
            panel.submit(args.into()).await?;
        }

        AdminCommand::Edit { id, fields } => {
            panel.list().await?;
            panel.start_edit(&id)?;
            let mut form = panel.form().clone();
            fields.apply_to(&mut form);
            panel.submit(form).await?;
        }

        AdminCommand::Delete { id, .. } => {
            panel.list().await?;
            panel.delete(&id, confirm).await?;
        }
    }

    let mut page = String::new();
    if let Some(notice) = panel.notice() {
        page.push_str(&format!("{}\n\n", notice));
    }
    page.push_str(&panel.render());
    Ok(page)
}
