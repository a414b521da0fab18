//! Generator for repository error enums.
//!
//! Each variant gets a `thiserror` message, a snake_case constructor taking
//! `impl Into<_>` for every field, a stable `kind()` name and a `detail()`
//! string. The last two are used when the error is reported as an
//! unexpected failure.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

    (@bind $variant:ident) => { Self::$variant };
    (@bind $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { $($field),* } };

    (@detail $message:literal) => { ::std::string::String::from($message) };
    (@detail $message:literal { $($field:ident : $ty:ty),* }) => {
        [$(::std::string::ToString::to_string($field)),*].join(", ")
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Variant name, e.g. `"Connection"`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                            stringify!($variant),
                    )*
                }
            }

            /// Field values joined by `", "`; the message for field-less
            /// variants.
            pub fn detail(&self) -> String {
                match self {
                    $(
                        define_port_error!(@bind $variant $( { $($field : $ty),* } )?) =>
                            define_port_error!(@detail $message $( { $($field : $ty),* } )?),
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
