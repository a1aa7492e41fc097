//! `define_port_error!` declares a port error enum whose variants each carry
//! a `message: String`.
//!
//! Every variant gets a `thiserror` display string and a snake_case
//! constructor taking `impl Into<String>`, so adapters can pass a variant's
//! constructor wherever an `Fn(String) -> E` is expected.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
