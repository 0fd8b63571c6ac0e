//! Closed status enumerations.
//!
//! Each enum lists every value the collection validators accept, so the
//! `$jsonSchema` `enum` arrays are generated from [`ProductStatus::ALL`] and
//! friends rather than maintained by hand. No transitions between values are
//! modeled; only which strings are legal at write time.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown enumeration value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    /// Enumeration name (e.g. "order status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every legal value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Value as stored in documents.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseStatusError {
                        kind: $label,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

closed_enum! {
    /// Catalog availability of a product.
    #[derive(Default)]
    ProductStatus ("product status") {
        #[default]
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Discontinued => "DISCONTINUED",
    }
}

closed_enum! {
    /// Lifecycle status of an order.
    OrderStatus ("order status") {
        Placed => "PLACED",
        Paid => "PAID",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
        Refunded => "REFUNDED",
    }
}

closed_enum! {
    /// How a payment was made.
    PaymentMethod ("payment method") {
        /// Brazilian instant payment.
        Pix => "PIX",
        /// Brazilian bank slip.
        Boleto => "BOLETO",
        CreditCard => "CREDIT_CARD",
        DebitCard => "DEBIT_CARD",
        Wallet => "WALLET",
    }
}

closed_enum! {
    /// Processing status of a payment.
    PaymentStatus ("payment status") {
        Pending => "PENDING",
        Authorized => "AUTHORIZED",
        Captured => "CAPTURED",
        Failed => "FAILED",
        Cancelled => "CANCELLED",
        Refunded => "REFUNDED",
    }
}
