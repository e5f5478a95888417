//! Command-line interface.
//!
//! ```shell
//! vending products
//! vending shop
//! vending buy 1 --insert 5000 --insert 5000 --yes
//! vending admin add --name "Teh Botol" --price 8000 --stock 10 \
//!     --image https://example.com/teh.jpg --category minuman
//! vending admin edit 1 --stock 20
//! vending admin delete 1
//! vending history
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use vending_core::{Denomination, ProductForm, RecordId};

#[derive(Parser, Debug)]
#[command(name = "vending")]
#[command(about = "Vending machine kiosk", long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir, kiosk.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data store base URL, overrides config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products
    Products,

    /// Interactive storefront
    Shop,

    /// Buy one product with the given notes
    Buy {
        /// Product id
        id: RecordId,

        /// Note to insert (2000, 5000, 10000, 20000, 50000); repeatable
        #[arg(short = 'i', long = "insert", required = true)]
        notes: Vec<Denomination>,

        /// Confirm every note without asking
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },

    /// Manage products
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Purchase history, newest first
    History,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List products with image URLs
    List,

    /// Add a product
    Add(ProductArgs),

    /// Edit a product; omitted fields keep their value
    Edit {
        id: RecordId,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete a product
    Delete {
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
}

/// Every product field, as typed. Validation happens in the admin page.
#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub price: String,

    #[arg(long)]
    pub stock: String,

    #[arg(long)]
    pub image: String,

    /// makanan or minuman
    #[arg(long)]
    pub category: String,
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        ProductForm {
            name: args.name,
            price: args.price,
            stock: args.stock,
            image: args.image,
            category: args.category,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub stock: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

impl EditArgs {
    /// Overlays the given fields on a pre-filled form.
    pub fn apply_to(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(stock) = self.stock {
            form.stock = stock;
        }
        if let Some(image) = self.image {
            form.image = image;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
    }
}
