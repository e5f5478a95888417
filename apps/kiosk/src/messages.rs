//! Customer-facing text, in Indonesian.
//!
//! Core errors carry English detail for logs; everything a customer or admin
//! reads on screen comes from here.

use vending_core::{FieldErrors, Money, PurchaseError, ValidationError};

// =============================================================================
// Notices
// =============================================================================

pub const PRODUCT_ADDED: &str = "Produk berhasil ditambahkan!";
pub const PRODUCT_UPDATED: &str = "Produk berhasil diperbarui!";
pub const PRODUCT_DELETED: &str = "Produk berhasil dihapus!";
pub const PURCHASE_SUCCESS: &str = "Pembelian berhasil!";

pub const FETCH_PRODUCTS_FAILED: &str = "Gagal memuat produk";
pub const FETCH_TRANSACTIONS_FAILED: &str = "Gagal memuat transaksi";
pub const SAVE_PRODUCT_FAILED: &str = "Gagal menyimpan produk";
pub const DELETE_PRODUCT_FAILED: &str = "Gagal menghapus produk";
pub const PURCHASE_FAILED: &str = "Gagal melakukan pembelian";

pub const OUT_OF_STOCK: &str = "Maaf, produk ini stok habis!";
pub const CONFIRM_DELETE_PRODUCT: &str = "Yakin ingin menghapus produk ini?";
pub const DELETE_CANCELLED: &str = "Penghapusan dibatalkan";

pub const NO_PRODUCTS: &str = "Belum ada produk";
pub const NO_TRANSACTIONS: &str = "Belum ada transaksi";
pub const NO_TRANSACTIONS_HINT: &str = "Transaksi akan muncul di sini setelah pembelian";

pub const LOADING_PRODUCTS: &str = "Memuat produk...";
pub const LOADING_HISTORY: &str = "Memuat riwayat...";
pub const PROCESSING_MONEY: &str = "Memproses uang...";

/// Shown when inserted money does not cover the price.
pub fn insufficient_funds(shortfall: Money) -> String {
    format!("Uang tidak cukup! Kurang {}", shortfall)
}

pub fn product_not_found(id: &str) -> String {
    format!("Produk {} tidak ditemukan", id)
}

pub fn money_inserted(amount: Money) -> String {
    format!("Uang {} berhasil dimasukkan", amount)
}

pub fn confirm_insert(amount: Money) -> String {
    format!("Konfirmasi Pemasukan Uang {}?", amount)
}

/// Localizes a wizard rule violation.
pub fn purchase_error(err: &PurchaseError) -> String {
    match err {
        PurchaseError::OutOfStock { .. } => OUT_OF_STOCK.to_string(),
        PurchaseError::InsufficientFunds { shortfall, .. } => insufficient_funds(*shortfall),
        PurchaseError::NoProductSelected => "Pilih produk terlebih dahulu".to_string(),
        PurchaseError::InvalidStep { .. } => "Aksi tidak tersedia pada langkah ini".to_string(),
        PurchaseError::MoneyAlreadyPending { pending } => {
            format!("Selesaikan konfirmasi uang {} terlebih dahulu", pending)
        }
        PurchaseError::NoPendingMoney => "Tidak ada uang yang menunggu konfirmasi".to_string(),
        PurchaseError::InvalidDenomination(amount) => format!(
            "Nominal Rp{} tidak diterima",
            Money::from_rupiah(*amount).grouped_digits()
        ),
    }
}

// =============================================================================
// Form Validation
// =============================================================================

/// Localizes one field failure the way the admin form shows it.
pub fn field_error(err: &ValidationError) -> String {
    match (err.field(), err) {
        ("name", ValidationError::Required { .. }) => "Nama produk wajib diisi".to_string(),
        ("name", ValidationError::TooShort { min, .. }) => format!("Nama minimal {} karakter", min),
        ("name", ValidationError::TooLong { max, .. }) => format!("Nama maksimal {} karakter", max),

        ("price", ValidationError::Required { .. }) => "Harga wajib diisi".to_string(),
        ("price", ValidationError::InvalidFormat { .. }) => "Harga harus berupa angka".to_string(),
        ("price", ValidationError::MustBePositive { .. }) => "Harga harus positif".to_string(),
        ("price", ValidationError::BelowMinimum { min, .. }) => {
            format!("Harga minimal {}", Money::from_rupiah(*min))
        }

        ("stock", ValidationError::Required { .. }) => "Stok wajib diisi".to_string(),
        ("stock", ValidationError::InvalidFormat { reason, .. }) if reason.contains("whole") => {
            "Stok harus bilangan bulat".to_string()
        }
        ("stock", ValidationError::InvalidFormat { .. }) => "Stok harus berupa angka".to_string(),
        ("stock", ValidationError::BelowMinimum { .. }) => "Stok tidak boleh negatif".to_string(),

        ("image", ValidationError::Required { .. }) => "URL gambar wajib diisi".to_string(),
        ("image", _) => "Format URL tidak valid".to_string(),

        ("category", _) => "Kategori harus makanan atau minuman".to_string(),

        _ => err.to_string(),
    }
}

/// All field failures of a form, one per line.
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(field_error)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vending_core::types::ProductForm;
    use vending_core::validation::validate_product_form;

    #[test]
    fn test_insufficient_funds_text() {
        assert_eq!(
            insufficient_funds(Money::from_rupiah(3000)),
            "Uang tidak cukup! Kurang Rp3.000"
        );
    }

    #[test]
    fn test_form_messages() {
        let form = ProductForm {
            name: "Aq".to_string(),
            price: "500".to_string(),
            stock: "1.5".to_string(),
            image: "gambar".to_string(),
            category: "snack".to_string(),
        };
        let errors = validate_product_form(&form).unwrap_err();

        assert_eq!(
            field_errors(&errors),
            "Nama minimal 3 karakter\n\
             Harga minimal Rp1.000\n\
             Stok harus bilangan bulat\n\
             Format URL tidak valid\n\
             Kategori harus makanan atau minuman"
        );
    }

    #[test]
    fn test_invalid_denomination_text() {
        assert_eq!(
            purchase_error(&PurchaseError::InvalidDenomination(3000)),
            "Nominal Rp3.000 tidak diterima"
        );
    }
}
